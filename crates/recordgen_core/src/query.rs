use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Highest accepted errors-per-record value.
pub const MAX_ERROR_COUNT: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("unknown region {0:?}")]
    UnknownRegion(String),
    #[error("error count must be a number between 0 and {MAX_ERROR_COUNT}, got {0:?}")]
    InvalidErrorCount(String),
}

/// Locale the remote service generates records for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    Usa,
    Poland,
    Georgia,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Usa, Region::Poland, Region::Georgia];

    /// Name used on the wire and in the UI.
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Usa => "USA",
            Region::Poland => "Poland",
            Region::Georgia => "Georgia",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = SpecError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Region::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SpecError::UnknownRegion(trimmed.to_string()))
    }
}

/// Parameters identifying one dataset. Any field change invalidates all
/// accumulated rows; equality is by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QuerySpec {
    pub region: Region,
    pub error_count: u8,
    /// Empty means the service picks a fresh seed per call.
    pub seed: String,
}

impl QuerySpec {
    pub fn new(region: Region, error_count: u8, seed: impl Into<String>) -> Self {
        Self {
            region,
            error_count: error_count.min(MAX_ERROR_COUNT),
            seed: seed.into(),
        }
    }

    /// Parses an errors-per-record value typed into a numeric input or slider.
    ///
    /// Out-of-range numbers are clamped into `0..=MAX_ERROR_COUNT`; anything
    /// that is not an integer is rejected.
    pub fn parse_error_count(raw: &str) -> Result<u8, SpecError> {
        let trimmed = raw.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| SpecError::InvalidErrorCount(trimmed.to_string()))?;
        Ok(value.clamp(0, i64::from(MAX_ERROR_COUNT)) as u8)
    }
}

/// One page request under a given spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub spec: QuerySpec,
    /// 1-based page index.
    pub page: u32,
    pub batch_size: u32,
}
