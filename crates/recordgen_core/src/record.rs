use serde::{Deserialize, Serialize};

/// A generated row as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub identifier: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Record {
    /// Column names in declaration order.
    pub const FIELDS: [&'static str; 4] = ["identifier", "name", "address", "phone"];

    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }

    /// Field values in the same order as [`Record::FIELDS`].
    pub fn values(&self) -> [&str; 4] {
        [&self.identifier, &self.name, &self.address, &self.phone]
    }
}
