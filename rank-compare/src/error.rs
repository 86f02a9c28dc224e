use displaydoc::Display;
use thiserror::Error;

use crate::{
    comparison::ConfigError,
    data::{query::Query, result_set::Engine},
};

/// Errors of the rank comparison.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum Error {
    /// Query "{query}" is missing from the {engine} result set
    MissingQuery { query: Query, engine: Engine },
    /// Query "{query}" has an empty reference result list
    EmptyReference { query: Query },
    /// The {engine} result set keys "{first}" and "{second}" both normalize to query "{query}"
    DuplicateQuery {
        engine: Engine,
        first: String,
        second: String,
        query: Query,
    },
    /// None of the queries could be compared
    NoComparableQueries,
    /// Invalid configuration: {0}
    Config(#[from] ConfigError),
}
