use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const DELIMITER: char = ',';

/// An ordered list of words, as kept in a thesaurus relation or a role set.
///
/// Storage flattens it into a single delimited column; everything else
/// handles the list. A term holding [`DELIMITER`] would come back split, so
/// callers reject those with [`Terms::delimited`] before saving.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Terms(Vec<String>);

impl Terms {
    pub fn new(terms: Vec<String>) -> Self {
        Terms(
            terms
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// The first of `terms` that contains the delimiter.
    pub fn delimited(terms: &[String]) -> Option<&str> {
        terms
            .iter()
            .map(String::as_str)
            .find(|t| t.contains(DELIMITER))
    }

    pub fn parse(raw: &str) -> Self {
        Terms(
            raw.split(DELIMITER)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string)
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.iter().any(|t| t == term)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl Display for Terms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(&DELIMITER.to_string()))
    }
}

impl From<Vec<String>> for Terms {
    fn from(terms: Vec<String>) -> Self {
        Terms::new(terms)
    }
}

impl From<&str> for Terms {
    fn from(raw: &str) -> Self {
        Terms::parse(raw)
    }
}
