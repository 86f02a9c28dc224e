use std::path::Path;

use anyhow::{bail, Error};
use indicatif::{ProgressBar, ProgressStyle};

use rank_compare::{EmptyReferencePolicy, QueryNormalization};

/// Runs `func` while showing a spinner with `msg` on stderr.
pub(crate) fn progress_spin_until_done<R>(msg: &'static str, func: impl FnOnce() -> R) -> R {
    let progress_bar = ProgressBar::new_spinner()
        .with_style(ProgressStyle::default_bar().template("{msg}: {elapsed:>10} {spinner:.green}"));
    progress_bar.set_message(msg);
    progress_bar.enable_steady_tick(100);
    let res = func();
    progress_bar.finish_and_clear();
    res
}

pub(crate) fn check_file_path(path: &Path, name: &str) -> Result<(), Error> {
    if path.is_file() {
        Ok(())
    } else {
        bail!("{} is not a file: {}", name, path.display())
    }
}

pub(crate) fn parse_normalization(s: &str) -> Result<QueryNormalization, Error> {
    match &*s.trim().to_lowercase() {
        "exact" => Ok(QueryNormalization::Exact),
        "trim" => Ok(QueryNormalization::Trim),
        "collapse" | "collapse-whitespace" => Ok(QueryNormalization::CollapseWhitespace),
        _ => bail!("Unexpected query normalization. Supported are: \"exact\", \"trim\", \"collapse\""),
    }
}

pub(crate) fn parse_empty_reference(s: &str) -> Result<EmptyReferencePolicy, Error> {
    match &*s.trim().to_lowercase() {
        "skip" => Ok(EmptyReferencePolicy::Skip),
        "zero" | "zero-fill" => Ok(EmptyReferencePolicy::ZeroFill),
        "fail" => Ok(EmptyReferencePolicy::Fail),
        _ => bail!("Unexpected empty reference policy. Supported are: \"skip\", \"zero\", \"fail\""),
    }
}
