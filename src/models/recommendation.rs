use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

use super::{Item, ItemId};

/// Signal that produced (part of) a candidate's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Collaborative,
    Content,
    Popularity,
    Serendipity,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Collaborative => "collaborative",
            Source::Content => "content",
            Source::Popularity => "popularity",
            Source::Serendipity => "serendipity",
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An unranked scored item produced by one scoring stage
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub item_id: ItemId,
    pub score: f64,
    pub sources: BTreeSet<Source>,
}

impl Candidate {
    pub fn new(item_id: ItemId, score: f64, source: Source) -> Self {
        Self {
            item_id,
            score,
            sources: BTreeSet::from([source]),
        }
    }

    /// Contributing sources joined with `+`, e.g. `collaborative+content`
    pub fn source_label(&self) -> String {
        self.sources
            .iter()
            .map(Source::as_str)
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Final, externally visible recommendation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedRecommendation {
    pub item_id: ItemId,
    pub score: f64,
    pub source: String,
    pub item: Item,
}
