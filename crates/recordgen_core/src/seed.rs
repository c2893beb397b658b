use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Draws a short base-36 token from a uniform 64-bit value.
pub fn random_seed_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut value: u64 = rng.gen();
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(13);
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}
