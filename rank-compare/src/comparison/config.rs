use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::query::QueryNormalization;

/// What happens to a query which is missing from a result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingQueryPolicy {
    /// Abort the batch with [`Error::MissingQuery`](crate::Error::MissingQuery).
    Fail,
    /// Leave the query out of the batch and its averages.
    Skip,
}

/// What happens to a query whose reference result list is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyReferencePolicy {
    /// Leave the query out of the batch and its averages.
    Skip,
    /// Report zero overlap and a zero coefficient and count the query in the averages.
    ZeroFill,
    /// Abort the batch with [`Error::EmptyReference`](crate::Error::EmptyReference).
    Fail,
}

/// The configuration of a rank comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    normalization: QueryNormalization,
    missing_query: MissingQueryPolicy,
    empty_reference: EmptyReferencePolicy,
    dedup: bool,
    max_results: Option<usize>,
}

/// Potential errors of the rank comparison configuration.
#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum Error {
    /// Invalid maximum number of results, expected positive value
    MaxResults,
}

impl Config {
    /// How raw query strings are normalized before lookups.
    pub fn normalization(&self) -> QueryNormalization {
        self.normalization
    }

    /// Sets the query normalization.
    pub fn with_normalization(self, normalization: QueryNormalization) -> Self {
        Self {
            normalization,
            ..self
        }
    }

    /// The handling of queries missing from a result set.
    pub fn missing_query(&self) -> MissingQueryPolicy {
        self.missing_query
    }

    /// Sets the handling of queries missing from a result set.
    pub fn with_missing_query(self, missing_query: MissingQueryPolicy) -> Self {
        Self {
            missing_query,
            ..self
        }
    }

    /// The handling of queries with an empty reference result list.
    pub fn empty_reference(&self) -> EmptyReferencePolicy {
        self.empty_reference
    }

    /// Sets the handling of queries with an empty reference result list.
    pub fn with_empty_reference(self, empty_reference: EmptyReferencePolicy) -> Self {
        Self {
            empty_reference,
            ..self
        }
    }

    /// Whether repeated urls of a result list are dropped, keeping the first occurrence.
    ///
    /// Off by default, repeated urls of a comparison list are ranked like any other url.
    pub fn dedup(&self) -> bool {
        self.dedup
    }

    /// Sets the url deduplication.
    pub fn with_dedup(self, dedup: bool) -> Self {
        Self { dedup, ..self }
    }

    /// The maximum number of results per list, unlimited if `None`.
    pub fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    /// Sets the maximum number of results per list.
    ///
    /// # Errors
    /// Fails if the maximum is zero.
    pub fn with_max_results(self, max_results: Option<usize>) -> Result<Self, Error> {
        if max_results == Some(0) {
            Err(Error::MaxResults)
        } else {
            Ok(Self {
                max_results,
                ..self
            })
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normalization: QueryNormalization::Trim,
            missing_query: MissingQueryPolicy::Fail,
            empty_reference: EmptyReferencePolicy::Skip,
            dedup: false,
            max_results: None,
        }
    }
}
