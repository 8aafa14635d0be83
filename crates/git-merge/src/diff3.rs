//! Cursor-based three-way line merge.
//!
//! Ported from the "merging with diff3" approach: rather than computing a
//! single alignment across all three files, align `this` and `other` each
//! against `base` independently (`git-diff`'s [`LineDiff::align`]) and walk
//! all three cursors together, emitting a run of lines whenever both
//! alignments agree and a conflict hunk whenever they don't.

use std::ops::Range;

use git_diff::{Alignment, LineDiff};

use crate::Diff3Labels;

/// The base/this/other line-range triple behind one conflict hunk.
///
/// Ranges are 0-based, half-open, and index into the line arrays produced
/// by [`LineDiff::split_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRange {
    pub base: Range<usize>,
    pub this: Range<usize>,
    pub other: Range<usize>,
}

/// Three-way line merge producing byte-exact conflict markers.
pub struct Diff3Merger;

impl Diff3Merger {
    /// Merge `this` and `other` against their common `base`.
    ///
    /// Returns the merged bytes and the ordered list of conflict ranges
    /// within them. Cannot fail: an unresolvable hunk becomes a conflict
    /// marker rather than an error.
    pub fn merge(base: &[u8], this: &[u8], other: &[u8], labels: &Diff3Labels) -> (Vec<u8>, Vec<ConflictRange>) {
        let o_lines = LineDiff::split_lines(base);
        let a_lines = LineDiff::split_lines(this);
        let b_lines = LineDiff::split_lines(other);
        let a_matches = LineDiff::align(base, this);
        let b_matches = LineDiff::align(base, other);

        let mut on = 0usize;
        let mut an = 0usize;
        let mut bn = 0usize;
        let mut out = Vec::new();
        let mut conflicts = Vec::new();

        loop {
            let mut i = 1usize;
            while inbounds(&o_lines, &a_lines, &b_lines, on, an, bn, i)
                && ismatch(&a_matches, on, an, i)
                && ismatch(&b_matches, on, bn, i)
            {
                i += 1;
            }

            if !inbounds(&o_lines, &a_lines, &b_lines, on, an, bn, i) {
                write_chunk(
                    &o_lines,
                    &a_lines,
                    &b_lines,
                    on..o_lines.len(),
                    an..a_lines.len(),
                    bn..b_lines.len(),
                    labels,
                    &mut out,
                    &mut conflicts,
                );
                break;
            }

            let (o, a, b) = if i == 1 {
                let mut ov = on + 1;
                while ov <= o_lines.len() && !(a_matches.contains_key(&ov) && b_matches.contains_key(&ov)) {
                    ov += 1;
                }
                match (a_matches.get(&ov).copied(), b_matches.get(&ov).copied()) {
                    (Some(av), Some(bv)) => (ov, av, bv),
                    _ => {
                        write_chunk(
                            &o_lines,
                            &a_lines,
                            &b_lines,
                            on..o_lines.len(),
                            an..a_lines.len(),
                            bn..b_lines.len(),
                            labels,
                            &mut out,
                            &mut conflicts,
                        );
                        break;
                    }
                }
            } else {
                (on + i, an + i, bn + i)
            };

            write_chunk(
                &o_lines,
                &a_lines,
                &b_lines,
                on..o - 1,
                an..a - 1,
                bn..b - 1,
                labels,
                &mut out,
                &mut conflicts,
            );
            on = o - 1;
            an = a - 1;
            bn = b - 1;
        }

        (out, conflicts)
    }
}

fn inbounds(
    o_lines: &[&[u8]],
    a_lines: &[&[u8]],
    b_lines: &[&[u8]],
    on: usize,
    an: usize,
    bn: usize,
    i: usize,
) -> bool {
    on + i <= o_lines.len() || an + i <= a_lines.len() || bn + i <= b_lines.len()
}

fn ismatch(matches: &Alignment, base_idx: usize, derived_offset: usize, i: usize) -> bool {
    matches.get(&(base_idx + i)).copied() == Some(derived_offset + i)
}

fn write_chunk(
    o_lines: &[&[u8]],
    a_lines: &[&[u8]],
    b_lines: &[&[u8]],
    o_range: Range<usize>,
    a_range: Range<usize>,
    b_range: Range<usize>,
    labels: &Diff3Labels,
    out: &mut Vec<u8>,
    conflicts: &mut Vec<ConflictRange>,
) {
    let oc: Vec<u8> = o_lines[o_range.clone()].concat();
    let ac: Vec<u8> = a_lines[a_range.clone()].concat();
    let bc: Vec<u8> = b_lines[b_range.clone()].concat();

    if oc == ac && oc == bc {
        tracing::trace!(base_lines = ?o_range, "diff3 chunk unchanged");
        out.extend_from_slice(&oc);
    } else if oc == ac {
        tracing::trace!(base_lines = ?o_range, "diff3 chunk: other's change wins");
        out.extend_from_slice(&bc);
    } else if oc == bc {
        tracing::trace!(base_lines = ?o_range, "diff3 chunk: this's change wins");
        out.extend_from_slice(&ac);
    } else {
        tracing::trace!(base_lines = ?o_range, "diff3 chunk: conflict");
        out.extend_from_slice(b"<<<<<<< ");
        out.extend_from_slice(&labels.this);
        out.push(b'\n');
        out.extend_from_slice(&ac);
        out.extend_from_slice(b"======= \n");
        out.extend_from_slice(&bc);
        out.extend_from_slice(b">>>>>>> ");
        out.extend_from_slice(&labels.other);
        out.push(b'\n');
        conflicts.push(ConflictRange {
            base: o_range,
            this: a_range,
            other: b_range,
        });
    }
}
