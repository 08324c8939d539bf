use std::collections::HashMap;

use storygraph_core::{ChapterId, ChapterSummary};

/// Maps chapter ids to their ordinal position in the current sequence.
/// The sequence is the engine's only notion of narrative time.
pub struct TimelineIndex {
    positions: HashMap<ChapterId, usize>,
    len: usize,
}

impl TimelineIndex {
    pub fn new(chapters: &[ChapterSummary]) -> Self {
        let mut positions = HashMap::with_capacity(chapters.len());
        for (idx, chapter) in chapters.iter().enumerate() {
            // duplicates are a caller error; last occurrence wins, no panic
            positions.insert(chapter.id.clone(), idx);
        }
        Self {
            positions,
            len: chapters.len(),
        }
    }

    /// None for chapters outside the sequence, distinct from position 0.
    pub fn position(&self, id: &ChapterId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clamps an out-of-range cursor into `[0, len)`. None on an empty
    /// sequence, where no cursor is meaningful.
    pub fn clamp_cursor(&self, cursor: usize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        Some(cursor.min(self.len - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapters(ids: &[&str]) -> Vec<ChapterSummary> {
        ids.iter()
            .map(|id| ChapterSummary {
                id: ChapterId(id.to_string()),
                title: String::new(),
            })
            .collect()
    }

    #[test]
    fn positions_are_zero_based_and_ordered() {
        let index = TimelineIndex::new(&chapters(&["c1", "c2", "c3"]));
        assert_eq!(index.position(&ChapterId("c1".to_string())), Some(0));
        assert_eq!(index.position(&ChapterId("c3".to_string())), Some(2));
    }

    #[test]
    fn unknown_chapter_is_absent_not_zero() {
        let index = TimelineIndex::new(&chapters(&["c1"]));
        assert_eq!(index.position(&ChapterId("missing".to_string())), None);
    }

    #[test]
    fn cursor_clamps_to_last_chapter() {
        let index = TimelineIndex::new(&chapters(&["c1", "c2"]));
        assert_eq!(index.clamp_cursor(0), Some(0));
        assert_eq!(index.clamp_cursor(99), Some(1));
    }

    #[test]
    fn empty_sequence_has_no_cursor() {
        let index = TimelineIndex::new(&[]);
        assert!(index.is_empty());
        assert_eq!(index.clamp_cursor(0), None);
    }

    #[test]
    fn duplicate_ids_do_not_panic() {
        let index = TimelineIndex::new(&chapters(&["c1", "c1"]));
        assert_eq!(index.len(), 2);
        assert_eq!(index.position(&ChapterId("c1".to_string())), Some(1));
    }
}
