use std::collections::HashMap;

use derive_more::{Deref, From, Into};
use serde::Serialize;

use crate::data::Url;

/// A 1-based position in a reference result list.
pub type Rank = usize;

/// The reference ranks of a comparison result list, `None` for unranked urls.
///
/// A sequence is never shorter than the reference list it was ranked against.
#[derive(Clone, Debug, Default, Deref, From, Into, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankSequence(Vec<Option<Rank>>);

/// The identity ranking `1..=len` of a reference list.
pub fn identity_ranks(len: usize) -> Vec<Rank> {
    (1..=len).collect()
}

/// Maps each comparison url to its rank in the reference list.
///
/// The first occurrence of an url in `reference` defines its rank. Urls which aren't part of
/// the reference list are unranked. A shorter comparison list is padded with unranked entries
/// up to the reference length, a longer one keeps its excess entries.
pub fn rank(reference: &[Url], comparison: &[Url]) -> RankSequence {
    let ranks_by_url = reference
        .iter()
        .enumerate()
        .fold(HashMap::new(), |mut ranks, (idx, url)| {
            ranks.entry(url).or_insert(idx + 1);
            ranks
        });

    let mut ranks = comparison
        .iter()
        .map(|url| ranks_by_url.get(url).copied())
        .collect::<Vec<_>>();
    if ranks.len() < reference.len() {
        ranks.resize(reference.len(), None);
    }

    RankSequence(ranks)
}
