use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One identifier bucket per external naming authority. Every bucket owns a dedicated table and
/// its identifiers are allocated independently of all other buckets.
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord)]
pub enum Bucket {
    Viaf = 1,
    Bnf = 2,
    Gnd = 3,
    Mef = 4,
    Rero = 5,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Viaf,
        Bucket::Bnf,
        Bucket::Gnd,
        Bucket::Mef,
        Bucket::Rero,
    ];

    /// ```
    /// use authseq::schema::Bucket;
    ///
    /// assert_eq!("viaf_id", Bucket::Viaf.table_name());
    /// assert_eq!("rero_id", Bucket::Rero.table_name());
    /// ```
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Viaf => "viaf_id",
            Self::Bnf => "bnf_id",
            Self::Gnd => "gnd_id",
            Self::Mef => "mef_id",
            Self::Rero => "rero_id",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Self::Viaf => "VIAF",
            Self::Bnf => "BnF",
            Self::Gnd => "GND",
            Self::Mef => "MEF",
            Self::Rero => "RERO",
        }
    }

    fn short_name(&self) -> &'static str {
        match self {
            Self::Viaf => "viaf",
            Self::Bnf => "bnf",
            Self::Gnd => "gnd",
            Self::Mef => "mef",
            Self::Rero => "rero",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("unknown bucket `{0}`")]
pub struct UnknownBucket(pub String);

impl FromStr for Bucket {
    type Err = UnknownBucket;

    /// ```
    /// use authseq::schema::Bucket;
    ///
    /// assert_eq!(Ok(Bucket::Gnd), "gnd".parse());
    /// assert_eq!(Ok(Bucket::Gnd), "GND_ID".parse());
    /// assert!("isni".parse::<Bucket>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|bucket| name == bucket.short_name() || name == bucket.table_name())
            .ok_or_else(|| UnknownBucket(s.to_string()))
    }
}
