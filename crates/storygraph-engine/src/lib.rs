pub mod accumulate;
pub mod filter;
pub mod rank;
pub mod timeline;
pub mod view;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use storygraph_core::{ChapterSummary, EntityKind, GraphSnapshot};

use accumulate::accumulate;
use filter::{filter_candidates, node_map, Candidate};
use rank::{rank_focus, unranked};
use timeline::TimelineIndex;

pub use view::{EdgeView, ViewResult, ViewStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Cumulative,
    Focus,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Cumulative
    }
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cumulative => "cumulative",
            Self::Focus => "focus",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Only(HashSet<EntityKind>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub mode: Mode,
    /// Effective in Cumulative mode only; Focus always uses 1.
    pub min_weight: u32,
    pub kinds: KindFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            mode: Mode::Cumulative,
            min_weight: 1,
            kinds: KindFilter::All,
        }
    }
}

/// The engine's sole entry point: for a graph snapshot, a chapter sequence
/// and a cursor into it, compute the exact set of edges to draw, the
/// node visibility map and summary stats. Pure and idempotent; callers
/// re-invoke whenever cursor or criteria change.
///
/// Out-of-range cursors are clamped into the sequence; an empty sequence
/// yields an empty view. The engine never fails, it only shrinks.
pub fn compute_view(
    snapshot: &GraphSnapshot,
    chapters: &[ChapterSummary],
    cursor: usize,
    criteria: &FilterCriteria,
) -> ViewResult {
    let index = TimelineIndex::new(chapters);
    let Some(cursor) = index.clamp_cursor(cursor) else {
        return ViewResult::empty_for(snapshot);
    };

    let nodes = node_map(snapshot);

    let mut candidates: Vec<Candidate<'_>> = Vec::new();
    for edge in &snapshot.edges {
        if let Some(acc) = accumulate(&edge.timeline, &index, cursor, criteria.mode) {
            candidates.push(Candidate {
                edge,
                weight: acc.weight,
                last: acc.last,
            });
        }
    }

    let survivors = filter_candidates(candidates, &nodes, criteria);
    let ranked = match criteria.mode {
        Mode::Focus => rank_focus(survivors),
        Mode::Cumulative => unranked(survivors),
    };

    view::compile(snapshot, ranked, criteria.mode)
}
