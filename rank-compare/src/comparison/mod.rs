mod config;
mod record;
mod summary;

use log::{debug, info};
use serde::{Deserialize, Serialize};

#[cfg(feature = "multithreaded")]
use rayon::prelude::*;

pub use self::{
    config::{Config, EmptyReferencePolicy, Error as ConfigError, MissingQueryPolicy},
    record::{QueryComparisonRecord, SkipReason, SkippedQuery},
    summary::{BatchAverages, BatchSummary},
};
use self::record::{compare_query, QueryOutcome};
use crate::{data::result_set::ResultSource, error::Error};

/// The outcome of comparing the results of a batch of queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchComparison {
    /// The compared queries in query list order.
    pub records: Vec<QueryComparisonRecord>,
    /// The queries left out by the configured policies, in query list order.
    pub skipped: Vec<SkippedQuery>,
    /// The averages over all `records`.
    pub averages: BatchAverages,
}

/// Compares the reference and comparison results of each query and averages the outcomes.
///
/// The queries are processed in list order. Queries are left out or abort the batch as
/// configured if they are missing from a result set or have no reference results. The
/// averages are taken over the compared queries only.
///
/// # Errors
/// Fails if a query violates a failing policy or if no query could be compared at all. With
/// the `multithreaded` feature it isn't specified which error is returned if several
/// queries fail.
pub fn compare_batch<Q, R, C>(
    queries: &[Q],
    reference: &R,
    comparison: &C,
    config: &Config,
) -> Result<BatchComparison, Error>
where
    Q: AsRef<str> + Sync,
    R: ResultSource + Sync,
    C: ResultSource + Sync,
{
    let compare = |(idx, query): (usize, &Q)| {
        compare_query(idx + 1, query.as_ref(), reference, comparison, config)
    };

    #[cfg(not(feature = "multithreaded"))]
    let outcomes = queries
        .iter()
        .enumerate()
        .map(compare)
        .collect::<Result<Vec<_>, _>>()?;
    #[cfg(feature = "multithreaded")]
    let outcomes = queries
        .par_iter()
        .enumerate()
        .map(compare)
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            QueryOutcome::Compared(record) => {
                debug!(
                    "Query #{} \"{}\": overlap={} coefficient={}",
                    record.position, record.query, record.overlap_count, record.coefficient,
                );
                records.push(record);
            }
            QueryOutcome::Skipped(query) => skipped.push(query),
        }
    }

    let averages = records
        .iter()
        .fold(BatchSummary::default(), BatchSummary::add)
        .finalize()
        .ok_or(Error::NoComparableQueries)?;
    info!(
        "Compared {} of {} queries ({} skipped).",
        records.len(),
        queries.len(),
        skipped.len(),
    );

    Ok(BatchComparison {
        records,
        skipped,
        averages,
    })
}

// Run the tests with and without the `multithreaded` feature to cover both paths.
#[cfg(test)]
mod tests {
    use test_utils::assert_approx_eq;

    use super::*;
    use crate::{
        comparison::record::tests::mocked_source,
        correlation::compare,
        data::{
            query::Query,
            result_set::{Engine, ResultSet},
            Url,
        },
        rank::{identity_ranks, rank},
    };

    #[test]
    fn test_compare_batch() {
        // coefficients 1, 0 (single mismatched pair) and 0.5 (partial swap)
        let reference = mocked_source(
            Engine::Reference,
            &[("identical", "abc"), ("single", "ab"), ("swap", "abc")],
        );
        let comparison = mocked_source(
            Engine::Comparison,
            &[("identical", "abc"), ("single", "b"), ("swap", "bac")],
        );

        let batch = compare_batch(
            &["identical", "single", "swap"],
            &reference,
            &comparison,
            &Config::default(),
        )
        .unwrap();

        assert!(batch.skipped.is_empty());
        assert_eq!(
            batch
                .records
                .iter()
                .map(|record| (record.position, record.query.as_str(), record.overlap_count))
                .collect::<Vec<_>>(),
            vec![(1, "identical", 3), (2, "single", 1), (3, "swap", 3)],
        );
        assert_approx_eq!(
            f64,
            batch
                .records
                .iter()
                .map(|record| record.coefficient)
                .collect::<Vec<_>>(),
            [1., 0., 0.5],
        );
        assert_eq!(batch.averages.queries, 3);
        assert_approx_eq!(f64, batch.averages.coefficient, 0.5);
        assert_approx_eq!(f64, batch.averages.overlap_count, 7. / 3.);
        assert_approx_eq!(f64, batch.averages.percent_overlap, 250. / 3., epsilon = 1e-12);
    }

    #[test]
    fn test_skipped_queries_are_not_averaged() {
        let reference = mocked_source(Engine::Reference, &[("a", "ab"), ("b", ""), ("c", "ab")]);
        let comparison = mocked_source(Engine::Comparison, &[("a", "ab"), ("b", "ab")]);
        let config = Config::default().with_missing_query(MissingQueryPolicy::Skip);

        let batch = compare_batch(&["a", "b", "c"], &reference, &comparison, &config).unwrap();

        assert_eq!(batch.records.len(), 1);
        assert_eq!(
            batch.skipped,
            vec![
                SkippedQuery {
                    query: Query::new("b"),
                    position: 2,
                    reason: SkipReason::EmptyReference,
                },
                SkippedQuery {
                    query: Query::new("c"),
                    position: 3,
                    reason: SkipReason::MissingFrom(Engine::Comparison),
                },
            ],
        );
        assert_eq!(batch.averages.queries, 1);
        assert_approx_eq!(f64, batch.averages.coefficient, 1.);
        assert_approx_eq!(f64, batch.averages.percent_overlap, 100.);
    }

    #[test]
    fn test_zero_filled_queries_are_averaged() {
        let reference = mocked_source(Engine::Reference, &[("a", "ab"), ("b", "")]);
        let comparison = mocked_source(Engine::Comparison, &[("a", "ab"), ("b", "ab")]);
        let config = Config::default().with_empty_reference(EmptyReferencePolicy::ZeroFill);

        let batch = compare_batch(&["a", "b"], &reference, &comparison, &config).unwrap();

        assert_eq!(batch.averages.queries, 2);
        assert_approx_eq!(f64, batch.averages.coefficient, 0.5);
        assert_approx_eq!(f64, batch.averages.percent_overlap, 50.);
        assert_approx_eq!(f64, batch.averages.overlap_count, 1.);
    }

    #[test]
    fn test_missing_query_fails_the_batch() {
        let reference = mocked_source(Engine::Reference, &[("a", "ab")]);
        let comparison = mocked_source(Engine::Comparison, &[("a", "ab")]);

        let error = compare_batch(&["a", "b"], &reference, &comparison, &Config::default())
            .unwrap_err();

        assert_eq!(
            error,
            Error::MissingQuery {
                query: Query::new("b"),
                engine: Engine::Reference,
            }
        );
    }

    #[test]
    fn test_nothing_to_compare() {
        let reference = mocked_source(Engine::Reference, &[("a", "")]);
        let comparison = mocked_source(Engine::Comparison, &[("a", "ab")]);

        assert_eq!(
            compare_batch::<&str, _, _>(&[], &reference, &comparison, &Config::default())
                .unwrap_err(),
            Error::NoComparableQueries,
        );
        assert_eq!(
            compare_batch(&["a"], &reference, &comparison, &Config::default()).unwrap_err(),
            Error::NoComparableQueries,
        );
    }

    #[test]
    fn test_result_sets_with_raw_queries() {
        let config = Config::default();
        let reference = ResultSet::new(
            Engine::Reference,
            vec![("rust lang ", vec!["a", "b", "c"])],
            &config,
        )
        .unwrap();
        let comparison = ResultSet::new(
            Engine::Comparison,
            vec![("rust lang", vec!["c", "b", "a", "b"])],
            &config,
        )
        .unwrap();

        let batch = compare_batch(&["rust lang  "], &reference, &comparison, &config).unwrap();

        assert_eq!(batch.records[0].query, Query::new("rust lang"));
        assert_eq!(batch.records[0].overlap_count, 3);
        assert_approx_eq!(f64, batch.records[0].coefficient, -1.);
    }

    #[test]
    fn test_repeated_comparison_urls_are_ranked_by_default() {
        let reference = mocked_source(Engine::Reference, &[("q", "ab")]);
        let comparison = mocked_source(Engine::Comparison, &[("q", "aab")]);
        let urls = |urls: &[&str]| urls.iter().copied().map(Url::from).collect::<Vec<_>>();
        let expected = compare(
            &identity_ranks(2),
            &rank(&urls(&["a", "b"]), &urls(&["a", "a", "b"])),
        );

        let batch = compare_batch(&["q"], &reference, &comparison, &Config::default()).unwrap();
        assert_eq!(batch.records[0].overlap_count, expected.valid_pairs);
        assert_approx_eq!(f64, batch.records[0].coefficient, expected.coefficient);
        assert_approx_eq!(f64, batch.records[0].coefficient, 0.);

        let config = Config::default().with_dedup(true);
        let reference = ResultSet::new(Engine::Reference, vec![("q", vec!["a", "b"])], &config)
            .unwrap();
        let comparison =
            ResultSet::new(Engine::Comparison, vec![("q", vec!["a", "a", "b"])], &config)
                .unwrap();
        let batch = compare_batch(&["q"], &reference, &comparison, &config).unwrap();
        assert_approx_eq!(f64, batch.records[0].coefficient, 1.);
    }

    #[test]
    fn test_records_keep_query_list_order() {
        let queries = (0..200).map(|idx| format!("q{}", idx)).collect::<Vec<_>>();
        let config = Config::default().with_missing_query(MissingQueryPolicy::Skip);
        // every third query is missing from the comparison, the others are identical or reversed
        let reference = ResultSet::new(
            Engine::Reference,
            queries.iter().map(|query| (query.clone(), vec!["a", "b", "c"])),
            &config,
        )
        .unwrap();
        let comparison = ResultSet::new(
            Engine::Comparison,
            queries
                .iter()
                .enumerate()
                .filter(|(idx, _)| idx % 3 != 2)
                .map(|(idx, query)| {
                    let urls = if idx % 3 == 0 {
                        vec!["a", "b", "c"]
                    } else {
                        vec!["c", "b", "a"]
                    };
                    (query.clone(), urls)
                }),
            &config,
        )
        .unwrap();

        let batch = compare_batch(&queries, &reference, &comparison, &config).unwrap();

        assert_eq!(batch.records.len(), 134);
        assert_eq!(batch.skipped.len(), 66);
        for (idx, record) in batch.records.iter().enumerate() {
            let position = idx / 2 * 3 + idx % 2 + 1;
            assert_eq!(record.position, position);
            assert_eq!(record.query.as_str(), queries[position - 1]);
            let expected = if idx % 2 == 0 { 1. } else { -1. };
            assert_approx_eq!(f64, record.coefficient, expected);
        }
        assert!(batch
            .skipped
            .iter()
            .enumerate()
            .all(|(idx, skipped)| skipped.position == idx * 3 + 3));
        assert_approx_eq!(f64, batch.averages.coefficient, 0.);
    }
}
