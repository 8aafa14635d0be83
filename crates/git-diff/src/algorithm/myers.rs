//! Myers' O(ND) line-matching algorithm.
//!
//! Implements Eugene Myers' difference algorithm ("An O(ND) Difference
//! Algorithm and Its Variations", 1986), trimmed to what this crate's one
//! caller ([`crate::LineDiff::align`]) needs: not a full insert/delete edit
//! script, just the pairs of lines the algorithm considers unchanged
//! between `old` and `new`. A patch/hunk format would need the inserts and
//! deletes too, but nothing downstream of this crate ever builds one.

use super::line_hash;

/// Find the line pairs that match exactly between `old` and `new`.
///
/// Returns 0-based `(old_index, new_index)` pairs, strictly increasing in
/// both coordinates.
pub fn align(old: &[&[u8]], new: &[&[u8]]) -> Vec<(usize, usize)> {
    if old.is_empty() || new.is_empty() {
        return Vec::new();
    }

    // Pre-compute line hashes for O(1) comparison.
    let old_hashes: Vec<u64> = old.iter().map(|l| line_hash(l)).collect();
    let new_hashes: Vec<u64> = new.iter().map(|l| line_hash(l)).collect();

    // Trim common prefix and suffix; only the remainder needs the O(ND) search.
    let prefix_len = old_hashes
        .iter()
        .zip(new_hashes.iter())
        .zip(old.iter().zip(new.iter()))
        .take_while(|((oh, nh), (a, b))| oh == nh && a == b)
        .count();

    let suffix_len = old_hashes[prefix_len..]
        .iter()
        .rev()
        .zip(new_hashes[prefix_len..].iter().rev())
        .zip(old[prefix_len..].iter().rev().zip(new[prefix_len..].iter().rev()))
        .take_while(|((oh, nh), (a, b))| oh == nh && a == b)
        .count();

    let old_trimmed = &old[prefix_len..old.len() - suffix_len];
    let new_trimmed = &new[prefix_len..new.len() - suffix_len];
    let old_h = &old_hashes[prefix_len..old_hashes.len() - suffix_len];
    let new_h = &new_hashes[prefix_len..new_hashes.len() - suffix_len];

    let mut pairs = Vec::with_capacity(prefix_len + suffix_len);
    for i in 0..prefix_len {
        pairs.push((i, i));
    }
    for (i, j) in inner_matches(old_trimmed, new_trimmed, old_h, new_h) {
        pairs.push((i + prefix_len, j + prefix_len));
    }
    for i in 0..suffix_len {
        pairs.push((old.len() - suffix_len + i, new.len() - suffix_len + i));
    }

    pairs
}

/// Myers' core search on pre-trimmed sequences, returning only matched pairs.
fn inner_matches(old: &[&[u8]], new: &[&[u8]], old_h: &[u64], new_h: &[u64]) -> Vec<(usize, usize)> {
    let n = old.len();
    let m = new.len();
    if n == 0 || m == 0 {
        return Vec::new();
    }

    let max_d = n + m;
    let v_size = 2 * max_d + 1;
    let v_offset = max_d as isize;

    // v[k + offset] = furthest-reaching x on diagonal k. The full trace is
    // kept so the backtrack below can recover the matched diagonals.
    let mut trace: Vec<Vec<usize>> = Vec::new();
    let mut v = vec![0usize; v_size];

    'outer: for d in 0..=max_d {
        let mut v_copy = v.clone();
        let k_min = -(d as isize);
        let k_max = d as isize;

        let mut k = k_min;
        while k <= k_max {
            let idx = (k + v_offset) as usize;

            let mut x = if k == k_min
                || (k != k_max && v[((k - 1) + v_offset) as usize] < v[((k + 1) + v_offset) as usize])
            {
                v[((k + 1) + v_offset) as usize]
            } else {
                v[((k - 1) + v_offset) as usize] + 1
            };
            let mut y = (x as isize - k) as usize;

            while x < n && y < m && old_h[x] == new_h[y] && old[x] == new[y] {
                x += 1;
                y += 1;
            }

            v_copy[idx] = x;

            if x >= n && y >= m {
                trace.push(v_copy);
                break 'outer;
            }

            k += 2;
        }

        trace.push(v_copy);
        v = trace.last().unwrap().clone();
    }

    backtrack_matches(&trace, n, m, v_offset)
}

/// Walk the trace from the end back to the start, collecting only the
/// matched (snake) line pairs along the way.
fn backtrack_matches(trace: &[Vec<usize>], n: usize, m: usize, v_offset: isize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut x = n;
    let mut y = m;

    for d in (0..trace.len()).rev() {
        let k = x as isize - y as isize;

        let prev_k = if d == 0 {
            k
        } else if k == -(d as isize)
            || (k != d as isize
                && trace[d - 1][((k - 1) + v_offset) as usize] < trace[d - 1][((k + 1) + v_offset) as usize])
        {
            k + 1
        } else {
            k - 1
        };

        let prev_x = if d == 0 { 0 } else { trace[d - 1][(prev_k + v_offset) as usize] };
        let prev_y = (prev_x as isize - prev_k) as usize;

        while x > prev_x && y > prev_y && x > 0 && y > 0 {
            x -= 1;
            y -= 1;
            pairs.push((x, y));
        }

        if d > 0 {
            if prev_k == k + 1 {
                if y > 0 {
                    y -= 1;
                }
            } else if x > 0 {
                x -= 1;
            }
        }
    }

    pairs.reverse();
    pairs
}
