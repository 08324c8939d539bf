use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChapterId(pub String);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Location,
    Organization,
    Item,
    Concept,
    #[serde(other)]
    Other,
}

impl Default for EntityKind {
    fn default() -> Self {
        Self::Other
    }
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        Self::Person,
        Self::Location,
        Self::Organization,
        Self::Item,
        Self::Concept,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Location => "Location",
            Self::Organization => "Organization",
            Self::Item => "Item",
            Self::Concept => "Concept",
            Self::Other => "Other",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == input)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub name: EntityId,
    #[serde(rename = "type", default)]
    pub kind: EntityKind,
    #[serde(default)]
    pub description: String,
    // display sizing only, never filtered on
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub chapter_id: ChapterId,
    #[serde(default)]
    pub relation: String,
    #[serde(default)]
    pub description: String,
    // 0 means "no explicit order"
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub source: EntityId,
    pub target: EntityId,
    // upstream aggregate weight; the engine recomputes its own per cursor
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub timeline: Vec<InteractionEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub id: ChapterId,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphSnapshot {
    pub nodes: Vec<Entity>,
    pub edges: Vec<Relationship>,
}

impl GraphSnapshot {
    pub fn totals(&self) -> SnapshotTotals {
        SnapshotTotals {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            events: self.edges.iter().map(|e| e.timeline.len()).sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotTotals {
    pub nodes: usize,
    pub edges: usize,
    pub events: usize,
}
