use storygraph_core::InteractionEvent;

use crate::timeline::TimelineIndex;
use crate::Mode;

/// One relationship's standing at the cursor: how many interactions apply
/// and which one the tooltip should describe.
#[derive(Debug, Clone, Copy)]
pub struct Accumulated<'a> {
    pub weight: u32,
    pub last: &'a InteractionEvent,
}

/// Walks one timeline in original order and accumulates under the given
/// mode. Events whose chapter is outside the index are skipped. Returns
/// None when nothing qualifies, which means no candidate edge.
pub fn accumulate<'a>(
    timeline: &'a [InteractionEvent],
    index: &TimelineIndex,
    cursor: usize,
    mode: Mode,
) -> Option<Accumulated<'a>> {
    let mut weight = 0u32;
    let mut last: Option<&InteractionEvent> = None;

    for event in timeline {
        let Some(pos) = index.position(&event.chapter_id) else {
            continue;
        };
        match mode {
            Mode::Cumulative => {
                if pos <= cursor {
                    weight += 1;
                    last = Some(event);
                }
            }
            Mode::Focus => {
                // several events may land in the cursor chapter; all make
                // the edge eligible, the timeline-last one is displayed
                if pos == cursor {
                    weight = 1;
                    last = Some(event);
                }
            }
        }
    }

    last.map(|last| Accumulated { weight, last })
}
