use std::path::PathBuf;

use anyhow::{Context, Error};
use log::info;
use structopt::StructOpt;

use rank_compare::{
    compare_batch,
    BatchComparison,
    Config,
    EmptyReferencePolicy,
    MissingQueryPolicy,
};

use crate::{
    exit_code::{NON_FATAL_ERROR, NO_ERROR},
    inputs::InputArgs,
    report::{write_report, QueryLabel, ReportFormat},
    utils::{parse_empty_reference, progress_spin_until_done},
};

/// Compares the results of two search engines for a batch of queries.
///
/// Writes one row per query with the number of overlapping results, the percent overlap and
/// the partial-overlap rank correlation (the Spearman formula restricted to the results both
/// engines returned), followed by the averages over all compared queries.
#[derive(StructOpt, Debug)]
pub struct CompareCmd {
    #[structopt(flatten)]
    inputs: InputArgs,

    /// Skip queries missing from a result set instead of failing.
    #[structopt(long)]
    skip_missing: bool,

    /// Handling of queries without reference results ("skip", "zero" or "fail").
    ///
    /// Skipped queries don't count towards the averages, zero filled ones do.
    #[structopt(long, default_value = "skip", parse(try_from_str = parse_empty_reference))]
    empty_reference: EmptyReferencePolicy,

    /// Drop repeated urls of a result list, keeping the first occurrence.
    #[structopt(long)]
    dedup: bool,

    /// Only consider the top results of each list.
    #[structopt(long)]
    max_results: Option<usize>,

    /// File to write the report to, stdout if not given.
    #[structopt(short, long)]
    out: Option<PathBuf>,

    /// Format of the report ("csv" or "json").
    #[structopt(short, long, default_value = "csv")]
    format: ReportFormat,

    /// Labels of the csv rows, either `Query<N>` ("index") or the query itself ("query").
    #[structopt(long, default_value = "index")]
    label: QueryLabel,

    /// Pretty print the json report.
    #[structopt(long)]
    pretty: bool,
}

impl CompareCmd {
    pub fn run(self) -> Result<i32, Error> {
        let config = self.config()?;
        let batch = run_comparison(&self.inputs, &config)?;

        for skipped in &batch.skipped {
            eprintln!(
                "Skipped query #{} \"{}\": {}",
                skipped.position, skipped.query, skipped.reason
            );
        }
        info!(
            "Average rank correlation over {} queries: {}",
            batch.averages.queries, batch.averages.coefficient
        );

        write_report(
            self.out.as_deref(),
            self.format,
            self.label,
            self.pretty,
            &batch,
        )?;

        let exit_code = if batch.skipped.is_empty() {
            NO_ERROR
        } else {
            NON_FATAL_ERROR
        };
        Ok(exit_code)
    }

    fn config(&self) -> Result<Config, Error> {
        let missing_query = if self.skip_missing {
            MissingQueryPolicy::Skip
        } else {
            MissingQueryPolicy::Fail
        };

        self.inputs
            .config()
            .with_missing_query(missing_query)
            .with_empty_reference(self.empty_reference)
            .with_dedup(self.dedup)
            .with_max_results(self.max_results)
            .context("Invalid comparison options.")
    }
}

pub(crate) fn run_comparison(
    inputs: &InputArgs,
    config: &Config,
) -> Result<BatchComparison, Error> {
    let inputs = progress_spin_until_done("Loading inputs", || inputs.load(config))?;

    progress_spin_until_done("Comparing results", || {
        compare_batch(
            &inputs.queries,
            &inputs.reference,
            &inputs.comparison,
            config,
        )
    })
    .context("Comparing the result sets failed.")
}
