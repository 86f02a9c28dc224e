use std::collections::HashMap;

use displaydoc::Display;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

use crate::{
    comparison::Config,
    data::{query::Query, Url},
    error::Error,
};

/// The role of a search engine in a comparison.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Engine {
    /// reference
    Reference,
    /// comparison
    Comparison,
}

/// Provides the ordered result list an engine returned for a query.
#[cfg_attr(test, automock)]
pub trait ResultSource {
    /// The engine the results stem from.
    fn engine(&self) -> Engine;

    /// The results for the query, best ranked first, or `None` if the query is unknown.
    fn results(&self, query: &Query) -> Option<Vec<Url>>;
}

/// The first-page results of one engine for a batch of queries.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultSet {
    engine: Engine,
    lists: HashMap<Query, Vec<Url>>,
}

impl ResultSet {
    /// Creates a result set from raw `(query, urls)` pairs.
    ///
    /// The queries are normalized and the url lists prepared as configured.
    ///
    /// # Errors
    /// Fails if two raw queries normalize to the same query.
    pub fn new<K, U>(
        engine: Engine,
        raw: impl IntoIterator<Item = (K, Vec<U>)>,
        config: &Config,
    ) -> Result<Self, Error>
    where
        K: Into<String>,
        U: Into<Url>,
    {
        let mut raw_queries = HashMap::new();
        let mut lists = HashMap::new();
        for (raw_query, urls) in raw {
            let raw_query = raw_query.into();
            let query = config.normalization().normalize(&raw_query);
            if let Some(first) = raw_queries.insert(query.clone(), raw_query.clone()) {
                return Err(Error::DuplicateQuery {
                    engine,
                    first,
                    second: raw_query,
                    query,
                });
            }
            let urls = prepare_urls(
                urls.into_iter().map(Into::into),
                config.dedup(),
                config.max_results(),
            );
            lists.insert(query, urls);
        }
        debug!("Loaded {} result lists of the {} engine.", lists.len(), engine);

        Ok(Self { engine, lists })
    }

    pub fn get(&self, query: &Query) -> Option<&[Url]> {
        self.lists.get(query).map(Vec::as_slice)
    }

    pub fn contains(&self, query: &Query) -> bool {
        self.lists.contains_key(query)
    }

    /// Iterates over all queries in arbitrary order.
    pub fn queries(&self) -> impl Iterator<Item = &Query> {
        self.lists.keys()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl ResultSource for ResultSet {
    fn engine(&self) -> Engine {
        self.engine
    }

    fn results(&self, query: &Query) -> Option<Vec<Url>> {
        self.get(query).map(<[Url]>::to_vec)
    }
}

/// Drops repeated urls (keeping the first occurrence) and cuts the list to the top results.
fn prepare_urls(
    urls: impl Iterator<Item = Url>,
    dedup: bool,
    max_results: Option<usize>,
) -> Vec<Url> {
    let mut urls = if dedup {
        urls.unique().collect_vec()
    } else {
        urls.collect_vec()
    };
    if let Some(max_results) = max_results {
        urls.truncate(max_results);
    }
    urls
}
