use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use anyhow::{bail, Context, Error};
use displaydoc::Display;
use serde::Serialize;

use rank_compare::{BatchAverages, BatchComparison, QueryComparisonRecord};

/// Supported report formats.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// csv
    Csv,
    /// json
    Json,
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &*s.trim().to_lowercase() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            _ => bail!("Unexpected report format. Supported formats are: \"csv\", \"json\""),
        }
    }
}

/// How the rows of a csv report are labeled.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum QueryLabel {
    /// index
    Index,
    /// query
    Query,
}

impl FromStr for QueryLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &*s.trim().to_lowercase() {
            "index" => Ok(QueryLabel::Index),
            "query" => Ok(QueryLabel::Query),
            _ => bail!("Unexpected query label. Supported labels are: \"index\", \"query\""),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum OverlapCount {
    Query(usize),
    Average(f64),
}

#[derive(Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "Queries")]
    label: Cow<'a, str>,
    #[serde(rename = "Number of Overlapping Results")]
    overlap_count: OverlapCount,
    #[serde(rename = "Percent Overlap")]
    percent_overlap: f64,
    #[serde(rename = "Rank Correlation")]
    coefficient: f64,
}

impl<'a> ReportRow<'a> {
    fn from_record(record: &'a QueryComparisonRecord, label: QueryLabel) -> Self {
        let label = match label {
            QueryLabel::Index => Cow::Owned(format!("Query{}", record.position)),
            QueryLabel::Query => Cow::Borrowed(record.query.as_str()),
        };
        Self {
            label,
            overlap_count: OverlapCount::Query(record.overlap_count),
            percent_overlap: record.percent_overlap,
            coefficient: record.coefficient,
        }
    }

    fn from_averages(averages: &BatchAverages) -> Self {
        Self {
            label: Cow::Borrowed("Average"),
            overlap_count: OverlapCount::Average(averages.overlap_count),
            percent_overlap: averages.percent_overlap,
            coefficient: averages.coefficient,
        }
    }
}

/// Writes one row per compared query followed by an `Average` row.
pub(crate) fn write_csv(
    writer: impl Write,
    batch: &BatchComparison,
    label: QueryLabel,
) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in &batch.records {
        writer.serialize(ReportRow::from_record(record, label))?;
    }
    writer.serialize(ReportRow::from_averages(&batch.averages))?;
    writer.flush()?;
    Ok(())
}

/// Writes the whole batch including the skipped queries.
pub(crate) fn write_json(
    mut writer: impl Write,
    batch: &BatchComparison,
    pretty: bool,
) -> Result<(), Error> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, batch)?;
    } else {
        serde_json::to_writer(&mut writer, batch)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Writes the report to `out` or to stdout.
pub(crate) fn write_report(
    out: Option<&Path>,
    format: ReportFormat,
    label: QueryLabel,
    pretty: bool,
    batch: &BatchComparison,
) -> Result<(), Error> {
    let writer: Box<dyn Write> = match out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Creating report file {} failed.", path.display()))?,
        )),
        None => Box::new(io::stdout()),
    };

    match format {
        ReportFormat::Csv => write_csv(writer, batch, label),
        ReportFormat::Json => write_json(writer, batch, pretty),
    }
}
