use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data::{
    query::{Query, QueryNormalization},
    result_set::{Engine, ResultSet, ResultSource},
    Url,
};

/// A query in the context of one engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineQuery {
    pub query: Query,
    pub engine: Engine,
}

/// A result list which contains some urls more than once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateUrls {
    pub query: Query,
    pub engine: Engine,
    pub urls: Vec<Url>,
}

/// The problems found in the inputs of a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Queries which appear more than once in the query list.
    pub repeated_queries: Vec<Query>,
    /// Queries of the query list missing from a result set.
    pub missing_queries: Vec<EngineQuery>,
    /// Queries of the query list with an empty reference result list.
    pub empty_references: Vec<Query>,
    /// Result lists with repeated urls.
    pub duplicate_urls: Vec<DuplicateUrls>,
    /// Queries of a result set which aren't part of the query list.
    pub unused_queries: Vec<EngineQuery>,
}

impl ValidationReport {
    /// Whether no problems were found.
    pub fn is_clean(&self) -> bool {
        self.repeated_queries.is_empty()
            && self.missing_queries.is_empty()
            && self.empty_references.is_empty()
            && self.duplicate_urls.is_empty()
            && self.unused_queries.is_empty()
    }
}

/// Checks the query list against both result sets.
///
/// The result sets should be created without url deduplication, otherwise repeated urls have
/// already been dropped. All findings are in query list order, unused queries are sorted.
pub fn check<Q: AsRef<str>>(
    queries: &[Q],
    normalization: QueryNormalization,
    reference: &ResultSet,
    comparison: &ResultSet,
) -> ValidationReport {
    let queries = queries
        .iter()
        .map(|query| normalization.normalize(query.as_ref()))
        .collect_vec();

    let repeated_queries = queries.iter().duplicates().cloned().collect();

    let mut missing_queries = Vec::new();
    let mut empty_references = Vec::new();
    let mut duplicate_urls = Vec::new();
    for query in queries.iter().unique() {
        for set in [reference, comparison] {
            match set.get(query) {
                Some(urls) => {
                    if set.engine() == Engine::Reference && urls.is_empty() {
                        empty_references.push(query.clone());
                    }
                    let urls = urls.iter().duplicates().cloned().collect_vec();
                    if !urls.is_empty() {
                        duplicate_urls.push(DuplicateUrls {
                            query: query.clone(),
                            engine: set.engine(),
                            urls,
                        });
                    }
                }
                None => missing_queries.push(EngineQuery {
                    query: query.clone(),
                    engine: set.engine(),
                }),
            }
        }
    }

    let mut unused_queries = Vec::new();
    for set in [reference, comparison] {
        unused_queries.extend(
            set.queries()
                .filter(|query| !queries.contains(query))
                .sorted()
                .map(|query| EngineQuery {
                    query: query.clone(),
                    engine: set.engine(),
                }),
        );
    }

    ValidationReport {
        repeated_queries,
        missing_queries,
        empty_references,
        duplicate_urls,
        unused_queries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::Config;

    fn result_set(engine: Engine, lists: &[(&str, &[&str])]) -> ResultSet {
        let config = Config::default().with_dedup(false);
        ResultSet::new(
            engine,
            lists.iter().map(|(query, urls)| (*query, urls.to_vec())),
            &config,
        )
        .unwrap()
    }

    #[test]
    fn test_clean_inputs() {
        let reference = result_set(Engine::Reference, &[("a", &["x", "y"]), ("b", &["z"])]);
        let comparison = result_set(Engine::Comparison, &[("a", &["y"]), ("b", &[])]);

        let report = check(&["a", "b "], QueryNormalization::Trim, &reference, &comparison);

        assert!(report.is_clean());
        assert_eq!(report, ValidationReport::default());
    }

    #[test]
    fn test_problems_are_reported() {
        let reference = result_set(
            Engine::Reference,
            &[("a", &["x", "y", "x"]), ("b", &[]), ("z", &["x"])],
        );
        let comparison = result_set(Engine::Comparison, &[("a", &["y", "y"]), ("y", &[])]);

        let report = check(
            &["a", "b", "a ", "c"],
            QueryNormalization::Trim,
            &reference,
            &comparison,
        );

        assert!(!report.is_clean());
        assert_eq!(report.repeated_queries, vec![Query::new("a")]);
        assert_eq!(
            report.missing_queries,
            vec![
                EngineQuery {
                    query: Query::new("b"),
                    engine: Engine::Comparison,
                },
                EngineQuery {
                    query: Query::new("c"),
                    engine: Engine::Reference,
                },
                EngineQuery {
                    query: Query::new("c"),
                    engine: Engine::Comparison,
                },
            ],
        );
        assert_eq!(report.empty_references, vec![Query::new("b")]);
        assert_eq!(
            report.duplicate_urls,
            vec![
                DuplicateUrls {
                    query: Query::new("a"),
                    engine: Engine::Reference,
                    urls: vec![Url::from("x")],
                },
                DuplicateUrls {
                    query: Query::new("a"),
                    engine: Engine::Comparison,
                    urls: vec![Url::from("y")],
                },
            ],
        );
        assert_eq!(
            report.unused_queries,
            vec![
                EngineQuery {
                    query: Query::new("z"),
                    engine: Engine::Reference,
                },
                EngineQuery {
                    query: Query::new("y"),
                    engine: Engine::Comparison,
                },
            ],
        );
    }
}
