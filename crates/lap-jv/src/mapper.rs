//! Mapping kernel output back to the caller's coordinate space.
//!
//! The kernel answers in augmented, canonical coordinates. Everything here
//! undoes that: sentinel and padding matches are discarded, the transpose is
//! unwound, and the surviving pairs are put in row order so every output
//! shape derives from one canonical pair list.

/// Extract the real assignment pairs from the kernel's row mapping over the
/// augmented square: keep `x[0..n)` entries that land in `[0, m)`, then
/// swap coordinates if the canonical matrix was transposed.
pub(crate) fn assigned_pairs(
    x: &[isize],
    n: usize,
    m: usize,
    transposed: bool,
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(n.min(m));
    for (i, &j) in x.iter().take(n).enumerate() {
        if j >= 0 && (j as usize) < m {
            if transposed {
                pairs.push((j as usize, i));
            } else {
                pairs.push((i, j as usize));
            }
        }
    }
    if transposed {
        pairs.sort_unstable();
    }
    pairs
}

/// Expand pairs into mapping vectors over the original `(rows, cols)`
/// shape, with -1 for unmatched rows and columns.
pub(crate) fn mapping_vectors(
    pairs: &[(usize, usize)],
    rows: usize,
    cols: usize,
) -> (Vec<isize>, Vec<isize>) {
    let mut x = vec![-1isize; rows];
    let mut y = vec![-1isize; cols];
    for &(r, c) in pairs {
        x[r] = c as isize;
        y[c] = r as isize;
    }
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_padding_and_sentinel_matches() {
        // canonical 2x3, augmented to 5: row 1 fell on a dummy column
        let x = vec![2, 4, 0, 1, 3];
        assert_eq!(assigned_pairs(&x, 2, 3, false), vec![(0, 2)]);
    }

    #[test]
    fn unwinds_the_transpose() {
        // canonical rows are original columns
        let x = vec![2, 0, 1];
        assert_eq!(assigned_pairs(&x, 3, 3, true), vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn mapping_vectors_mark_unmatched_slots() {
        let (x, y) = mapping_vectors(&[(0, 2), (2, 0)], 3, 4);
        assert_eq!(x, vec![2, -1, 0]);
        assert_eq!(y, vec![2, -1, 0, -1]);
    }
}
