use serde::Serialize;

use crate::rank::Rank;

/// The agreement of two rankings over their jointly ranked items.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Correlation {
    /// The partial-overlap rank correlation coefficient.
    pub coefficient: f64,
    /// The number of positions at which both rankings are defined.
    pub valid_pairs: usize,
}

/// Computes the partial-overlap rank correlation of two rankings.
///
/// Both rankings are paired positionally and cut to the shorter one. Only pairs in which the
/// comparison rank is defined take part (the valid pairs). For `n >= 2` valid pairs this is
/// the Spearman formula `1 - 6 * Σd² / (n * (n² - 1))` restricted to the valid pairs, which
/// differs from the textbook Spearman correlation: the ranks aren't re-ranked within the
/// overlap, so the coefficient isn't bounded below by `-1`.
///
/// A single valid pair yields `1` if both ranks agree and `0` otherwise, no valid pair yields
/// `0`.
pub fn compare(reference_ranks: &[Rank], comparison_ranks: &[Option<Rank>]) -> Correlation {
    let valid_pairs = reference_ranks
        .iter()
        .zip(comparison_ranks)
        .filter_map(|(&reference, &comparison)| {
            comparison.map(|comparison| (reference, comparison))
        })
        .collect::<Vec<_>>();

    let coefficient = match valid_pairs.as_slice() {
        [] => 0.,
        [(reference, comparison)] => {
            if reference == comparison {
                1.
            } else {
                0.
            }
        }
        pairs => {
            let d_squared_sum = pairs
                .iter()
                .map(|&(reference, comparison)| {
                    let d = reference as i64 - comparison as i64;
                    d * d
                })
                .sum::<i64>() as f64;
            let n = pairs.len() as f64;
            1. - (6. * d_squared_sum) / (n * (n * n - 1.))
        }
    };

    Correlation {
        coefficient,
        valid_pairs: valid_pairs.len(),
    }
}
