use anyhow::Error;
use itertools::Itertools;
use log::debug;
use structopt::StructOpt;

use rank_compare::{check, ValidationReport};

use crate::{
    exit_code::{NON_FATAL_ERROR, NO_ERROR},
    inputs::InputArgs,
    utils::progress_spin_until_done,
};

/// Checks the inputs of a batch before comparing them.
///
/// Reports repeated queries, queries missing from a result set, empty reference lists,
/// result lists with repeated urls and result set entries which aren't part of the query list.
#[derive(StructOpt, Debug)]
pub struct CheckCmd {
    #[structopt(flatten)]
    inputs: InputArgs,

    /// Prints the findings as json.
    #[structopt(long)]
    json: bool,
}

impl CheckCmd {
    pub fn run(self) -> Result<i32, Error> {
        let report = self.validate()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }

        let exit_code = if report.is_clean() {
            NO_ERROR
        } else {
            NON_FATAL_ERROR
        };
        Ok(exit_code)
    }

    fn validate(&self) -> Result<ValidationReport, Error> {
        // repeated urls are only visible in the raw lists
        let config = self.inputs.config().with_dedup(false);
        let inputs = progress_spin_until_done("Loading inputs", || self.inputs.load(&config))?;

        debug!("Checking {} queries.", inputs.queries.len());
        Ok(check(
            &inputs.queries,
            config.normalization(),
            &inputs.reference,
            &inputs.comparison,
        ))
    }
}

fn print_report(report: &ValidationReport) {
    if report.is_clean() {
        println!("No problems found.");
        return;
    }

    print_section(
        "Repeated queries",
        report.repeated_queries.iter().map(|query| format!("\"{}\"", query)),
    );
    print_section(
        "Missing queries",
        report
            .missing_queries
            .iter()
            .map(|missing| format!("\"{}\" (no {} results)", missing.query, missing.engine)),
    );
    print_section(
        "Empty reference result lists",
        report.empty_references.iter().map(|query| format!("\"{}\"", query)),
    );
    print_section(
        "Repeated urls",
        report.duplicate_urls.iter().map(|duplicates| {
            format!(
                "\"{}\" ({}): {}",
                duplicates.query,
                duplicates.engine,
                duplicates.urls.iter().join(", ")
            )
        }),
    );
    print_section(
        "Unused result set entries",
        report
            .unused_queries
            .iter()
            .map(|unused| format!("\"{}\" ({})", unused.query, unused.engine)),
    );
}

fn print_section(title: &str, lines: impl ExactSizeIterator<Item = String>) {
    if lines.len() == 0 {
        return;
    }
    println!("----------------------------------------");
    println!("{} ({}):", title, lines.len());
    for line in lines {
        println!("  {}", line);
    }
}
