use std::fmt;
use std::str::FromStr;

use crate::schema::Bucket;

/// Width of the primary-key column. Most dialects store identifiers as `BIGINT`; embedded
/// dialects fall back to a plain `INTEGER`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum IdWidth {
    #[default]
    BigInt = 1,
    Int = 2,
}

impl IdWidth {
    /// Largest identifier the column can hold (signed range, identifiers are positive).
    ///
    /// ```
    /// use authseq::schema::IdWidth;
    ///
    /// assert_eq!(i64::MAX as u64, IdWidth::BigInt.max_id());
    /// assert_eq!(i32::MAX as u64, IdWidth::Int.max_id());
    /// ```
    pub fn max_id(&self) -> u64 {
        match self {
            Self::BigInt => i64::MAX as u64,
            Self::Int => i32::MAX as u64,
        }
    }

    /// ```
    /// use authseq::schema::IdWidth;
    ///
    /// assert_eq!(Some(IdWidth::BigInt), IdWidth::from(1));
    /// assert_eq!(Some(IdWidth::Int), IdWidth::from(2));
    /// assert_eq!(None, IdWidth::from(42));
    /// ```
    pub fn from(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::BigInt),
            2 => Some(Self::Int),
            _ => None,
        }
    }
}

impl fmt::Display for IdWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BigInt => f.write_str("bigint"),
            Self::Int => f.write_str("int"),
        }
    }
}

impl FromStr for IdWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bigint" => Ok(Self::BigInt),
            "int" | "integer" => Ok(Self::Int),
            other => Err(format!("unknown id width `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub bucket: Bucket,
    pub name: &'static str,
    pub width: IdWidth,
    pub autoincrement: bool,
}

impl Table {
    pub fn new(bucket: Bucket, width: IdWidth) -> Self {
        Self {
            bucket,
            name: bucket.table_name(),
            width,
            autoincrement: true,
        }
    }
}
