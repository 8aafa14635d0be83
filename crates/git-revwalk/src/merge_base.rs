//! Merge base computation using the flag-propagation algorithm.
//!
//! The algorithm works by marking commits reachable from each input with
//! different flags. A commit carrying both flags at once is a common
//! ancestor; once it's accepted as a candidate, the flag set is also
//! carried forward onto its parents so that they stop being considered
//! (they'd only be more remote common ancestors).

use std::collections::VecDeque;

use git_hash::collections::{OidMap, OidSet};
use git_hash::ObjectId;

const ANC_OF_1: u8 = 1;
const ANC_OF_2: u8 = 2;
const DNC: u8 = 4;
const LCA: u8 = 8;

/// Multi-commit lowest common ancestor search over a `parents_of` oracle.
///
/// `parents_of` is a pure function from a commit id to its (possibly
/// empty) parent list; commits it doesn't recognize simply have no
/// parents. This decouples the search from any particular repository
/// or object store representation.
pub struct LcaFinder;

impl LcaFinder {
    /// Find the lowest common ancestors of `c1` and `others`.
    ///
    /// Returns the candidates in discovery order, with no duplicates.
    /// An empty `others` list means there's nothing to intersect with,
    /// so the result is just `c1`; likewise if `c1` already appears in
    /// `others`.
    pub fn find_lcas(
        parents_of: &dyn Fn(&ObjectId) -> Vec<ObjectId>,
        c1: ObjectId,
        others: &[ObjectId],
    ) -> Vec<ObjectId> {
        if others.is_empty() || others.contains(&c1) {
            return vec![c1];
        }

        let mut state: OidMap<u8> = OidMap::new();
        let mut worklist: VecDeque<ObjectId> = VecDeque::new();

        state.insert(c1, ANC_OF_1);
        worklist.push_back(c1);
        for &c in others {
            let merged = state.get(&c).copied().unwrap_or(0) | ANC_OF_2;
            state.insert(c, merged);
            worklist.push_back(c);
        }

        let mut cands: Vec<ObjectId> = Vec::new();

        while has_live_entry(&worklist, &state) {
            let commit = worklist.pop_front().expect("checked non-empty above");
            let mut flags = state.get(&commit).copied().unwrap_or(0);

            if flags == (ANC_OF_1 | ANC_OF_2) && flags & LCA == 0 {
                flags |= LCA;
                state.insert(commit, flags);
                cands.push(commit);
                tracing::debug!(candidate = %commit, "lca candidate found");
                // DNC is folded into the propagated copy, not the stored
                // one, so this commit still counts as a candidate below
                // while its parents get excluded from further search.
                flags |= DNC;
            }

            for parent in parents_of(&commit) {
                let merged = state.get(&parent).copied().unwrap_or(0) | flags;
                state.insert(parent, merged);
                worklist.push_back(parent);
            }
        }

        let result: Vec<ObjectId> = cands
            .into_iter()
            .filter(|c| {
                let survives = state.get(c).copied().unwrap_or(0) & DNC == 0;
                if !survives {
                    tracing::debug!(candidate = %c, "lca candidate pruned by a nearer common ancestor");
                }
                survives
            })
            .collect();
        result
    }

    /// Fold pairwise LCA search across more than two commits.
    ///
    /// Starts with `lcas = [commits[0]]`; for each remaining commit,
    /// replaces `lcas` with the union of `find_lcas(next, [l])` over
    /// every `l` currently in `lcas`.
    pub fn octopus(
        parents_of: &dyn Fn(&ObjectId) -> Vec<ObjectId>,
        commits: &[ObjectId],
    ) -> Vec<ObjectId> {
        let mut lcas = match commits.first() {
            Some(&first) => vec![first],
            None => return Vec::new(),
        };

        for &next in &commits[1..] {
            let mut seen = OidSet::new();
            let mut folded = Vec::new();
            for &lca in &lcas {
                for found in Self::find_lcas(parents_of, next, &[lca]) {
                    if seen.insert(found) {
                        folded.push(found);
                    }
                }
            }
            lcas = folded;
        }

        lcas
    }

    /// True if `ancestor` is a (non-strict) ancestor of `descendant`.
    pub fn is_ancestor(
        parents_of: &dyn Fn(&ObjectId) -> Vec<ObjectId>,
        ancestor: ObjectId,
        descendant: ObjectId,
    ) -> bool {
        if ancestor == descendant {
            return true;
        }
        Self::find_lcas(parents_of, ancestor, &[descendant]).contains(&ancestor)
    }
}

/// Whether the worklist still contains a commit that hasn't been
/// superseded by a nearer candidate.
fn has_live_entry(worklist: &VecDeque<ObjectId>, state: &OidMap<u8>) -> bool {
    worklist
        .iter()
        .any(|c| state.get(c).copied().unwrap_or(0) & DNC == 0)
}
