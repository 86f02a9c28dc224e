use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Error};
use log::debug;
use structopt::StructOpt;

use rank_compare::{Config, Engine, QueryNormalization, ResultSet};

use crate::utils::{check_file_path, parse_normalization};

/// The input files of a batch.
#[derive(StructOpt, Debug)]
pub struct InputArgs {
    /// Text file with one query per line, in processing order.
    #[structopt(short, long)]
    pub queries: PathBuf,

    /// JSON file mapping each query to the result urls of the reference engine.
    #[structopt(short, long)]
    pub reference: PathBuf,

    /// JSON file mapping each query to the result urls of the comparison engine.
    #[structopt(short, long)]
    pub comparison: PathBuf,

    /// How queries are normalized before lookups ("exact", "trim" or "collapse").
    #[structopt(long, default_value = "trim", parse(try_from_str = parse_normalization))]
    pub normalization: QueryNormalization,
}

/// The loaded inputs of a batch.
pub struct Inputs {
    /// The raw queries in processing order.
    pub queries: Vec<String>,
    pub reference: ResultSet,
    pub comparison: ResultSet,
}

impl InputArgs {
    /// The default configuration with the normalization of these arguments.
    pub fn config(&self) -> Config {
        Config::default().with_normalization(self.normalization)
    }

    /// Loads the query list and both result sets.
    pub fn load(&self, config: &Config) -> Result<Inputs, Error> {
        check_file_path(&self.queries, "Query list")?;
        let queries = load_queries(&self.queries)
            .with_context(|| format!("Loading query list {} failed.", self.queries.display()))?;
        debug!("Loaded {} queries.", queries.len());

        let reference = load_result_set(Engine::Reference, &self.reference, config)?;
        let comparison = load_result_set(Engine::Comparison, &self.comparison, config)?;

        Ok(Inputs {
            queries,
            reference,
            comparison,
        })
    }
}

/// Reads one query per line, skipping blank lines.
pub(crate) fn load_queries(path: &Path) -> Result<Vec<String>, Error> {
    let reader = BufReader::new(File::open(path)?);
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(line) if line.trim().is_empty()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub(crate) fn load_result_set(
    engine: Engine,
    path: &Path,
    config: &Config,
) -> Result<ResultSet, Error> {
    check_file_path(path, "Result set")?;
    let raw = load_raw_results(path)
        .with_context(|| format!("Parsing {} result set {} failed.", engine, path.display()))?;
    ResultSet::new(engine, raw, config)
        .with_context(|| format!("Creating {} result set failed.", engine))
}

fn load_raw_results(path: &Path) -> Result<BTreeMap<String, Vec<String>>, Error> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use rank_compare::{Query, Url};
    use test_utils::fixtures;

    use super::*;

    #[test]
    fn test_load_queries() {
        let queries = load_queries(&fixtures::queries().unwrap()).unwrap();

        assert_eq!(
            queries,
            vec![
                "rust programming language ",
                "weather in berlin ",
                "cheap flights to tokyo ",
                "how to bake bread ",
            ],
        );
    }

    #[test]
    fn test_load_result_set() {
        let config = Config::default();
        let reference = load_result_set(
            Engine::Reference,
            &fixtures::reference_results().unwrap(),
            &config,
        )
        .unwrap();

        assert_eq!(reference.len(), 4);
        assert_eq!(
            reference.get(&Query::new("how to bake bread")),
            Some(
                &[
                    Url::from("https://www.kingarthurbaking.com/recipes/classic-sandwich-bread-recipe"),
                    Url::from("https://www.bbcgoodfood.com/recipes/easy-white-bread"),
                ][..]
            ),
        );
        // the raw key has a trailing space
        assert!(reference.contains(&Query::new("weather in berlin")));
    }

    #[test]
    fn test_load_result_set_from_a_query_list_fails() {
        let error = load_result_set(
            Engine::Comparison,
            &fixtures::queries().unwrap(),
            &Config::default(),
        )
        .unwrap_err();

        assert!(error
            .to_string()
            .starts_with("Parsing comparison result set"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let error = load_result_set(
            Engine::Reference,
            Path::new("does/not/exist.json"),
            &Config::default(),
        )
        .unwrap_err();

        assert!(error.to_string().starts_with("Result set is not a file"));
    }
}
