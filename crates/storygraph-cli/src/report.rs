use std::fmt::Write as _;

use storygraph_engine::ViewResult;

/// Plain-text rendering of a computed view, one edge per line.
pub fn render_text(view: &ViewResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "active nodes: {}  active edges: {}",
        view.stats.active_nodes, view.stats.active_edges
    );
    for edge in &view.edges {
        let label = edge.label.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "{} -> {}  width={:.1}  label={}  ({})",
            edge.source.0,
            edge.target.0,
            edge.width,
            label,
            edge.tooltip.replace('\n', " | ")
        );
    }
    out
}
