use std::collections::HashMap;

use storygraph_core::{Entity, EntityId, EntityKind, GraphSnapshot, InteractionEvent, Relationship};

use crate::{FilterCriteria, KindFilter, Mode};

/// A relationship that survived accumulation and is up for visibility
/// filtering.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub edge: &'a Relationship,
    pub weight: u32,
    pub last: &'a InteractionEvent,
}

pub type NodeMap<'a> = HashMap<&'a EntityId, &'a Entity>;

/// Identity -> entity lookup, built once per query. First occurrence wins
/// on duplicate names.
pub fn node_map(snapshot: &GraphSnapshot) -> NodeMap<'_> {
    let mut map = NodeMap::with_capacity(snapshot.nodes.len());
    for node in &snapshot.nodes {
        map.entry(&node.name).or_insert(node);
    }
    map
}

/// Focus mode ignores the configured threshold: a single in-chapter
/// interaction is always enough.
pub fn effective_min_weight(criteria: &FilterCriteria) -> u32 {
    match criteria.mode {
        Mode::Focus => 1,
        Mode::Cumulative => criteria.min_weight.max(1),
    }
}

fn endpoint_kind(nodes: &NodeMap<'_>, id: &EntityId) -> EntityKind {
    // dangling endpoints degrade to Other instead of failing the lookup
    nodes.get(id).map(|n| n.kind).unwrap_or_default()
}

/// Applies the weight threshold and the entity-kind allow-list. Survivors
/// keep their input order.
pub fn filter_candidates<'a>(
    candidates: Vec<Candidate<'a>>,
    nodes: &NodeMap<'a>,
    criteria: &FilterCriteria,
) -> Vec<Candidate<'a>> {
    let min_weight = effective_min_weight(criteria);
    candidates
        .into_iter()
        .filter(|cand| cand.weight >= min_weight)
        .filter(|cand| {
            let source = endpoint_kind(nodes, &cand.edge.source);
            let target = endpoint_kind(nodes, &cand.edge.target);
            criteria.kinds.allows(source) && criteria.kinds.allows(target)
        })
        .collect()
}

impl KindFilter {
    pub fn allows(&self, kind: EntityKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(kinds) => kinds.contains(&kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use storygraph_core::ChapterId;

    fn entity(name: &str, kind: EntityKind) -> Entity {
        Entity {
            name: EntityId(name.to_string()),
            kind,
            description: String::new(),
            count: 1,
        }
    }

    fn edge(source: &str, target: &str) -> Relationship {
        Relationship {
            source: EntityId(source.to_string()),
            target: EntityId(target.to_string()),
            weight: 0,
            timeline: Vec::new(),
        }
    }

    fn event() -> InteractionEvent {
        InteractionEvent {
            chapter_id: ChapterId("c1".to_string()),
            relation: "meets".to_string(),
            description: String::new(),
            order: 0,
        }
    }

    fn criteria(mode: Mode, min_weight: u32, kinds: KindFilter) -> FilterCriteria {
        FilterCriteria {
            mode,
            min_weight,
            kinds,
        }
    }

    #[test]
    fn weight_threshold_applies_in_cumulative_mode() {
        let snap = GraphSnapshot {
            nodes: vec![entity("A", EntityKind::Person), entity("B", EntityKind::Person)],
            edges: vec![edge("A", "B")],
        };
        let nodes = node_map(&snap);
        let evt = event();
        let cand = Candidate {
            edge: &snap.edges[0],
            weight: 1,
            last: &evt,
        };

        let kept = filter_candidates(
            vec![cand],
            &nodes,
            &criteria(Mode::Cumulative, 2, KindFilter::All),
        );
        assert!(kept.is_empty());

        let kept = filter_candidates(
            vec![cand],
            &nodes,
            &criteria(Mode::Cumulative, 1, KindFilter::All),
        );
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn focus_mode_ignores_configured_min_weight() {
        let c = criteria(Mode::Focus, 5, KindFilter::All);
        assert_eq!(effective_min_weight(&c), 1);
    }

    #[test]
    fn both_endpoints_must_pass_kind_filter() {
        let snap = GraphSnapshot {
            nodes: vec![
                entity("A", EntityKind::Person),
                entity("B", EntityKind::Location),
            ],
            edges: vec![edge("A", "B")],
        };
        let nodes = node_map(&snap);
        let evt = event();
        let cand = Candidate {
            edge: &snap.edges[0],
            weight: 3,
            last: &evt,
        };

        let only_person = KindFilter::Only(HashSet::from([EntityKind::Person]));
        let kept = filter_candidates(vec![cand], &nodes, &criteria(Mode::Cumulative, 1, only_person));
        assert!(kept.is_empty());

        let both = KindFilter::Only(HashSet::from([EntityKind::Person, EntityKind::Location]));
        let kept = filter_candidates(vec![cand], &nodes, &criteria(Mode::Cumulative, 1, both));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn dangling_endpoint_defaults_to_other() {
        let snap = GraphSnapshot {
            nodes: vec![entity("A", EntityKind::Person)],
            edges: vec![edge("A", "ghost")],
        };
        let nodes = node_map(&snap);
        let evt = event();
        let cand = Candidate {
            edge: &snap.edges[0],
            weight: 1,
            last: &evt,
        };

        let with_other = KindFilter::Only(HashSet::from([EntityKind::Person, EntityKind::Other]));
        let kept =
            filter_candidates(vec![cand], &nodes, &criteria(Mode::Cumulative, 1, with_other));
        assert_eq!(kept.len(), 1);

        let person_only = KindFilter::Only(HashSet::from([EntityKind::Person]));
        let kept =
            filter_candidates(vec![cand], &nodes, &criteria(Mode::Cumulative, 1, person_only));
        assert!(kept.is_empty());
    }
}
