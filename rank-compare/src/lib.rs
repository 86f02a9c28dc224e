//! Agreement between the first-page results of two search engines.
//!
//! A reference engine's result list defines the ranks `1..=N` of a query. The comparison
//! engine's list is mapped onto those ranks with [`rank()`] and the two rankings are compared
//! with [`compare()`], a partial-overlap rank correlation. [`compare_batch()`] runs this for a
//! whole query list and aggregates the per-query records into batch averages.

mod comparison;
mod correlation;
mod data;
mod error;
mod rank;
mod validation;

pub use crate::{
    comparison::{
        compare_batch,
        BatchAverages,
        BatchComparison,
        BatchSummary,
        Config,
        ConfigError,
        EmptyReferencePolicy,
        MissingQueryPolicy,
        QueryComparisonRecord,
        SkipReason,
        SkippedQuery,
    },
    correlation::{compare, Correlation},
    data::{
        query::{Query, QueryNormalization},
        result_set::{Engine, ResultSet, ResultSource},
        Url,
    },
    error::Error,
    rank::{identity_ranks, rank, Rank, RankSequence},
    validation::{check, DuplicateUrls, EngineQuery, ValidationReport},
};
