pub(crate) mod query;
pub(crate) mod result_set;

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// A link to a search result.
#[repr(transparent)]
#[derive(Clone, Debug, Display, PartialEq, Eq, Hash, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Url(pub String);

impl From<&str> for Url {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
