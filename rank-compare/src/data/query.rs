use derive_more::{Deref, Display, Into};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A search phrase.
///
/// Queries are only created through a [`QueryNormalization`], so two queries compare equal iff
/// their normalized forms do.
#[repr(transparent)]
#[derive(
    Clone,
    Debug,
    Deref,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Creates a query from an already normalized phrase.
    pub fn new(phrase: impl Into<String>) -> Self {
        Self(phrase.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How raw query strings are turned into [`Query`]s before lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryNormalization {
    /// Use the raw string verbatim, including surrounding whitespace.
    Exact,
    /// Strip leading and trailing whitespace.
    Trim,
    /// Strip surrounding whitespace and collapse inner whitespace runs to a single space.
    CollapseWhitespace,
}

impl Default for QueryNormalization {
    fn default() -> Self {
        Self::Trim
    }
}

impl QueryNormalization {
    pub fn normalize(self, raw: &str) -> Query {
        match self {
            Self::Exact => Query::new(raw),
            Self::Trim => Query::new(raw.trim()),
            Self::CollapseWhitespace => Query::new(raw.split_whitespace().join(" ")),
        }
    }
}
