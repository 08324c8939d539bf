use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use storygraph_core::{EntityId, GraphSnapshot, InteractionEvent};

use crate::rank::Ranked;
use crate::Mode;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EdgeView {
    pub source: EntityId,
    pub target: EntityId,
    pub label: Option<String>,
    pub tooltip: String,
    pub width: f32,
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct ViewStats {
    pub active_nodes: usize,
    pub active_edges: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewResult {
    pub edges: Vec<EdgeView>,
    pub visible: BTreeMap<EntityId, bool>,
    pub stats: ViewStats,
}

impl ViewResult {
    /// The degenerate view: nothing survives, every known node is hidden.
    pub fn empty_for(snapshot: &GraphSnapshot) -> Self {
        Self {
            edges: Vec::new(),
            visible: snapshot
                .nodes
                .iter()
                .map(|n| (n.name.clone(), false))
                .collect(),
            stats: ViewStats::default(),
        }
    }
}

fn focus_label(event: &InteractionEvent, rank: Option<u32>) -> String {
    match rank {
        Some(rank) => format!("[{rank}] {}", event.relation),
        None => event.relation.clone(),
    }
}

fn focus_tooltip(event: &InteractionEvent) -> String {
    let order = if event.order != 0 {
        event.order.to_string()
    } else {
        "?".to_string()
    };
    format!(
        "[{}] #{order} {}: {}",
        event.chapter_id.0, event.relation, event.description
    )
}

fn cumulative_tooltip(weight: u32, event: &InteractionEvent) -> String {
    format!(
        "{weight} interactions\nLast: {} ({})",
        event.relation, event.chapter_id.0
    )
}

/// Sub-linear so high-frequency relationships don't dominate visually.
fn cumulative_width(weight: u32) -> f32 {
    (weight as f32 + 1.0).log2() * 2.0
}

/// Focus weight is 0 or 1 today; the clamp guards a future move to
/// per-chapter multi-event weighting.
fn focus_width(weight: u32) -> f32 {
    weight.clamp(1, 5) as f32
}

/// Turns ranked survivors into the final draw list, visibility map and
/// summary stats. Edge order is the ranked order.
pub fn compile(snapshot: &GraphSnapshot, ranked: Vec<Ranked<'_>>, mode: Mode) -> ViewResult {
    let mut edges = Vec::with_capacity(ranked.len());
    let mut active: HashSet<&EntityId> = HashSet::new();

    for entry in &ranked {
        let cand = entry.candidate;
        let (label, tooltip, width) = match mode {
            Mode::Focus => (
                Some(focus_label(cand.last, entry.rank)),
                focus_tooltip(cand.last),
                focus_width(cand.weight),
            ),
            Mode::Cumulative => (
                None,
                cumulative_tooltip(cand.weight, cand.last),
                cumulative_width(cand.weight),
            ),
        };
        edges.push(EdgeView {
            source: cand.edge.source.clone(),
            target: cand.edge.target.clone(),
            label,
            tooltip,
            width,
            rank: entry.rank,
        });
        active.insert(&cand.edge.source);
        active.insert(&cand.edge.target);
    }

    // visibility is edge-driven: a node with no surviving edge stays hidden
    let mut visible: BTreeMap<EntityId, bool> = BTreeMap::new();
    for node in &snapshot.nodes {
        visible
            .entry(node.name.clone())
            .or_insert_with(|| active.contains(&node.name));
    }

    let stats = ViewStats {
        // dangling endpoints count here even though they cannot be rendered
        active_nodes: active.len(),
        active_edges: edges.len(),
    };

    ViewResult {
        edges,
        visible,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storygraph_core::ChapterId;

    fn event(chapter: &str, relation: &str, description: &str, order: i32) -> InteractionEvent {
        InteractionEvent {
            chapter_id: ChapterId(chapter.to_string()),
            relation: relation.to_string(),
            description: description.to_string(),
            order,
        }
    }

    #[test]
    fn focus_label_carries_rank_prefix() {
        let evt = event("c1", "confronts", "", 2);
        assert_eq!(focus_label(&evt, Some(3)), "[3] confronts");
        assert_eq!(focus_label(&evt, None), "confronts");
    }

    #[test]
    fn focus_tooltip_shows_question_mark_for_missing_order() {
        let evt = event("c4", "meets", "on the docks", 0);
        assert_eq!(focus_tooltip(&evt), "[c4] #? meets: on the docks");

        let evt = event("c4", "meets", "on the docks", 2);
        assert_eq!(focus_tooltip(&evt), "[c4] #2 meets: on the docks");
    }

    #[test]
    fn cumulative_tooltip_summarizes_weight_and_last() {
        let evt = event("c9", "argues", "", 0);
        assert_eq!(
            cumulative_tooltip(4, &evt),
            "4 interactions\nLast: argues (c9)"
        );
    }

    #[test]
    fn cumulative_width_grows_sublinearly() {
        assert_eq!(cumulative_width(1), 2.0);
        assert_eq!(cumulative_width(3), 4.0);
        assert!(cumulative_width(100) < cumulative_width(50) * 2.0);
    }

    #[test]
    fn focus_width_clamps_into_draw_range() {
        assert_eq!(focus_width(0), 1.0);
        assert_eq!(focus_width(1), 1.0);
        assert_eq!(focus_width(9), 5.0);
    }
}
