use displaydoc::Display;
use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
    comparison::config::{Config, EmptyReferencePolicy, MissingQueryPolicy},
    correlation::compare,
    data::{
        query::Query,
        result_set::{Engine, ResultSource},
        Url,
    },
    error::Error,
    rank::{identity_ranks, rank},
};

/// The comparison of the two engines' results for one query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryComparisonRecord {
    pub query: Query,
    /// The 1-based position of the query in the query list.
    pub position: usize,
    /// The number of results ranked by both engines.
    pub overlap_count: usize,
    /// The overlap count relative to the length of the reference list, in percent.
    pub percent_overlap: f64,
    /// The partial-overlap rank correlation coefficient.
    pub coefficient: f64,
}

/// Why a query was left out of a batch.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// missing from the {0} result set
    MissingFrom(Engine),
    /// empty reference result list
    EmptyReference,
}

/// A query which was left out of a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedQuery {
    pub query: Query,
    /// The 1-based position of the query in the query list.
    pub position: usize,
    pub reason: SkipReason,
}

pub(crate) enum QueryOutcome {
    Compared(QueryComparisonRecord),
    Skipped(SkippedQuery),
}

impl QueryOutcome {
    fn skipped(query: Query, position: usize, reason: SkipReason) -> Self {
        warn!("Skipping query #{} \"{}\": {}.", position, query, reason);
        Self::Skipped(SkippedQuery {
            query,
            position,
            reason,
        })
    }
}

/// Looks up the results of `query`, `None` if it's missing and may be skipped.
fn lookup(
    source: &impl ResultSource,
    query: &Query,
    config: &Config,
) -> Result<Option<Vec<Url>>, Error> {
    match (source.results(query), config.missing_query()) {
        (Some(urls), _) => Ok(Some(urls)),
        (None, MissingQueryPolicy::Skip) => Ok(None),
        (None, MissingQueryPolicy::Fail) => Err(Error::MissingQuery {
            query: query.clone(),
            engine: source.engine(),
        }),
    }
}

/// Compares the results of the query at the 1-based `position` of the query list.
pub(crate) fn compare_query(
    position: usize,
    raw_query: &str,
    reference_source: &impl ResultSource,
    comparison_source: &impl ResultSource,
    config: &Config,
) -> Result<QueryOutcome, Error> {
    let query = config.normalization().normalize(raw_query);

    let reference = match lookup(reference_source, &query, config)? {
        Some(urls) => urls,
        None => {
            let reason = SkipReason::MissingFrom(reference_source.engine());
            return Ok(QueryOutcome::skipped(query, position, reason));
        }
    };
    let comparison = match lookup(comparison_source, &query, config)? {
        Some(urls) => urls,
        None => {
            let reason = SkipReason::MissingFrom(comparison_source.engine());
            return Ok(QueryOutcome::skipped(query, position, reason));
        }
    };

    if reference.is_empty() {
        return match config.empty_reference() {
            EmptyReferencePolicy::Skip => Ok(QueryOutcome::skipped(
                query,
                position,
                SkipReason::EmptyReference,
            )),
            EmptyReferencePolicy::ZeroFill => Ok(QueryOutcome::Compared(QueryComparisonRecord {
                query,
                position,
                overlap_count: 0,
                percent_overlap: 0.,
                coefficient: 0.,
            })),
            EmptyReferencePolicy::Fail => Err(Error::EmptyReference { query }),
        };
    }

    let ranks = rank(&reference, &comparison);
    let correlation = compare(&identity_ranks(reference.len()), &ranks);
    trace!("Ranks of query #{}: {:?}", position, ranks);

    Ok(QueryOutcome::Compared(QueryComparisonRecord {
        query,
        position,
        overlap_count: correlation.valid_pairs,
        percent_overlap: 100. * correlation.valid_pairs as f64 / reference.len() as f64,
        coefficient: correlation.coefficient,
    }))
}
