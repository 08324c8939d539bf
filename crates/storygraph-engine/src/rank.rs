use crate::filter::Candidate;

/// A surviving edge plus its focus-mode display rank. Rank is display-only
/// and never feeds back into filtering.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    pub candidate: Candidate<'a>,
    pub rank: Option<u32>,
}

/// Orders focus-mode survivors by their displayed event's explicit order
/// (0 when absent), ties keeping filter output order, then assigns a dense
/// 1-based rank.
pub fn rank_focus(survivors: Vec<Candidate<'_>>) -> Vec<Ranked<'_>> {
    let mut ranked: Vec<Ranked<'_>> = survivors
        .into_iter()
        .map(|candidate| Ranked {
            candidate,
            rank: None,
        })
        .collect();
    ranked.sort_by_key(|r| r.candidate.last.order);
    for (idx, entry) in ranked.iter_mut().enumerate() {
        entry.rank = Some(idx as u32 + 1);
    }
    ranked
}

/// Cumulative mode draws edges unranked, in input order.
pub fn unranked(survivors: Vec<Candidate<'_>>) -> Vec<Ranked<'_>> {
    survivors
        .into_iter()
        .map(|candidate| Ranked {
            candidate,
            rank: None,
        })
        .collect()
}
