mod args;
mod config;
mod report;

use anyhow::{Context, Result};
use std::path::Path;

use storygraph_core::{ChapterSummary, EntityKind, GraphSnapshot};
use storygraph_engine::{compute_view, FilterCriteria, KindFilter};

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn load_snapshot(path: &Path) -> Result<GraphSnapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

fn load_chapters(path: &Path) -> Result<Vec<ChapterSummary>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read chapter list {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse chapter list {}", path.display()))
}

fn config_from_criteria(criteria: &FilterCriteria) -> config::QueryConfig {
    let mut kinds: Vec<EntityKind> = match &criteria.kinds {
        KindFilter::All => Vec::new(),
        KindFilter::Only(set) => set.iter().copied().collect(),
    };
    kinds.sort_by_key(|k| k.as_str());
    config::QueryConfig {
        mode: criteria.mode,
        min_weight: criteria.min_weight,
        kinds,
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = args::parse_args()?;
    let defaults = config::load_or_default();

    let criteria = FilterCriteria {
        mode: args.mode.unwrap_or(defaults.mode),
        min_weight: args.min_weight.unwrap_or(defaults.min_weight),
        kinds: args.kinds.unwrap_or_else(|| defaults.kind_filter()),
    };

    if args.save_defaults {
        config::save(&config_from_criteria(&criteria))?;
        tracing::info!("query defaults saved");
    }

    let snapshot = load_snapshot(&args.snapshot)?;
    let chapters = load_chapters(&args.chapters)?;

    let totals = snapshot.totals();
    tracing::info!(
        nodes = totals.nodes,
        edges = totals.edges,
        events = totals.events,
        chapters = chapters.len(),
        "snapshot loaded"
    );

    let view = compute_view(&snapshot, &chapters, args.cursor, &criteria);

    tracing::info!(
        mode = criteria.mode.as_str(),
        cursor = args.cursor,
        active_nodes = view.stats.active_nodes,
        active_edges = view.stats.active_edges,
        "view computed"
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("failed to serialize view")?
        );
    } else {
        print!("{}", report::render_text(&view));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use storygraph_engine::Mode;

    #[test]
    fn criteria_converts_back_to_sorted_config() {
        let criteria = FilterCriteria {
            mode: Mode::Focus,
            min_weight: 2,
            kinds: KindFilter::Only(HashSet::from([EntityKind::Person, EntityKind::Concept])),
        };
        let cfg = config_from_criteria(&criteria);
        assert_eq!(cfg.mode, Mode::Focus);
        assert_eq!(cfg.kinds, vec![EntityKind::Concept, EntityKind::Person]);
    }

    #[test]
    fn all_filter_becomes_empty_kind_list() {
        let cfg = config_from_criteria(&FilterCriteria::default());
        assert!(cfg.kinds.is_empty());
    }
}
