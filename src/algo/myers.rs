//! Myers LCS over token sequences
//!
//! The line diff interns tokens to integers and asks this module which of
//! them are unchanged. Pretty-printed ADF from different vendors shares most
//! of its lines, so the edit distance `d` is small and the `O((n+m)*d)`
//! search stays close to linear.
//!
//! The trace kept for backtracking costs `O(d*(n+m))` memory;
//! [`MAX_EDIT_DISTANCE`] caps it.
//!
//! Myers, E.W. "An O(ND) Difference Algorithm and Its Variations" (1986)

// =============================================================================
// Public Types
// =============================================================================

/// Edit distance beyond which the middle section is reported as entirely
/// removed and re-added.
pub const MAX_EDIT_DISTANCE: usize = 512;

/// Sections at most this long on both sides use the table LCS.
const SMALL_SECTION: usize = 8;

/// One step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// `old[old_idx]` is unchanged and sits at `new[new_idx]`
    Keep { old_idx: usize, new_idx: usize },
    /// `new[new_idx]` was added
    Insert { new_idx: usize },
    /// `old[old_idx]` was removed
    Delete { old_idx: usize },
}

/// Counts per edit kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LcsStats {
    pub kept: usize,
    pub inserted: usize,
    pub deleted: usize,
}

impl LcsStats {
    /// Whether the sequences were equal.
    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

/// Edit script plus its counts.
#[derive(Debug, Default)]
pub struct LcsResult {
    pub edits: Vec<Edit>,
    pub stats: LcsStats,
}

// =============================================================================
// Main API
// =============================================================================

/// Compute the edit script between two sequences.
///
/// Edits come in sequence order; within one change, deletions precede
/// insertions.
pub fn diff_sequences<T: Eq>(old: &[T], new: &[T]) -> LcsResult {
    let mut result = LcsResult {
        edits: Vec::with_capacity(old.len().max(new.len())),
        stats: LcsStats::default(),
    };
    let (mut next_old, mut next_new) = (0, 0);

    // The end pair flushes the trailing change
    let anchors = myers_lcs(old, new)
        .into_iter()
        .chain(std::iter::once((old.len(), new.len())));
    for (old_idx, new_idx) in anchors {
        result
            .edits
            .extend((next_old..old_idx).map(|old_idx| Edit::Delete { old_idx }));
        result
            .edits
            .extend((next_new..new_idx).map(|new_idx| Edit::Insert { new_idx }));
        result.stats.deleted += old_idx - next_old;
        result.stats.inserted += new_idx - next_new;

        if old_idx < old.len() {
            result.edits.push(Edit::Keep { old_idx, new_idx });
            result.stats.kept += 1;
        }
        next_old = old_idx + 1;
        next_new = new_idx + 1;
    }

    result
}

// =============================================================================
// Myers Algorithm Core
// =============================================================================

/// Index pairs of a longest common subsequence, in increasing order.
///
/// Common prefix and suffix are matched directly; only the middle section
/// goes through the edit graph search.
pub fn myers_lcs<T: Eq>(old: &[T], new: &[T]) -> Vec<(usize, usize)> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let old_rest = &old[prefix..];
    let new_rest = &new[prefix..];
    let suffix = old_rest
        .iter()
        .rev()
        .zip(new_rest.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_mid = &old_rest[..old_rest.len() - suffix];
    let new_mid = &new_rest[..new_rest.len() - suffix];

    let mut lcs: Vec<(usize, usize)> = (0..prefix).map(|i| (i, i)).collect();
    lcs.extend(
        middle_lcs(old_mid, new_mid)
            .into_iter()
            .map(|(o, n)| (o + prefix, n + prefix)),
    );
    let (old_tail, new_tail) = (old.len() - suffix, new.len() - suffix);
    lcs.extend((0..suffix).map(|i| (old_tail + i, new_tail + i)));
    lcs
}

/// LCS of a section with no common prefix or suffix.
///
/// Searches the edit graph by increasing edit distance `d`, keeping the
/// furthest `x` reached on every diagonal `k = x - y`. Past
/// [`MAX_EDIT_DISTANCE`] the section is treated as having nothing in common.
fn middle_lcs<T: Eq>(old: &[T], new: &[T]) -> Vec<(usize, usize)> {
    let (n, m) = (old.len(), new.len());
    if n == 0 || m == 0 {
        return Vec::new();
    }
    if n <= SMALL_SECTION && m <= SMALL_SECTION {
        return table_lcs(old, new);
    }

    let max_d = n + m;
    let diagonals = Diagonals { offset: max_d };
    let mut furthest = vec![0usize; 2 * max_d + 1];
    let mut trace: Vec<Vec<usize>> = Vec::with_capacity(max_d.min(MAX_EDIT_DISTANCE) + 1);

    'search: for d in 0..=max_d {
        if d > MAX_EDIT_DISTANCE {
            return Vec::new();
        }
        trace.push(furthest.clone());

        for k in (-(d as isize)..=(d as isize)).step_by(2) {
            let mut x = if diagonals.came_from_insert(&furthest, d, k) {
                furthest[diagonals.index(k + 1)]
            } else {
                furthest[diagonals.index(k - 1)] + 1
            };
            let mut y = (x as isize - k) as usize;

            while x < n && y < m && old[x] == new[y] {
                x += 1;
                y += 1;
            }
            furthest[diagonals.index(k)] = x;

            if x >= n && y >= m {
                break 'search;
            }
        }
    }

    backtrack(&trace, old, new, diagonals)
}

/// Maps signed diagonals onto vector slots.
#[derive(Clone, Copy)]
struct Diagonals {
    offset: usize,
}

impl Diagonals {
    fn index(self, k: isize) -> usize {
        (k + self.offset as isize) as usize
    }

    /// Whether the best path onto diagonal `k` at distance `d` is a
    /// downward move from `k + 1` rather than a rightward one from `k - 1`.
    fn came_from_insert(self, furthest: &[usize], d: usize, k: isize) -> bool {
        let d = d as isize;
        k == -d || (k != d && furthest[self.index(k - 1)] < furthest[self.index(k + 1)])
    }
}

/// Walk the trace from the end back to the origin, collecting the snakes.
fn backtrack<T: Eq>(
    trace: &[Vec<usize>],
    old: &[T],
    new: &[T],
    diagonals: Diagonals,
) -> Vec<(usize, usize)> {
    let (mut x, mut y) = (old.len(), new.len());
    let mut lcs = Vec::new();

    for (d, furthest) in trace.iter().enumerate().rev() {
        let k = x as isize - y as isize;

        let (prev_k, prev_x) = if d == 0 {
            (0, 0)
        } else {
            let prev_k = if diagonals.came_from_insert(furthest, d, k) {
                k + 1
            } else {
                k - 1
            };
            (prev_k, furthest[diagonals.index(prev_k)])
        };
        let prev_y = (prev_x as isize - prev_k) as usize;

        while x > prev_x && y > prev_y {
            x -= 1;
            y -= 1;
            if old[x] == new[y] {
                lcs.push((x, y));
            }
        }

        if d > 0 {
            if prev_k < k {
                x = prev_x;
            } else {
                y = prev_y;
            }
        }
        if x == 0 && y == 0 {
            break;
        }
    }

    lcs.reverse();
    lcs
}

/// Table LCS for sections of at most [`SMALL_SECTION`] tokens per side.
fn table_lcs<T: Eq>(old: &[T], new: &[T]) -> Vec<(usize, usize)> {
    let (n, m) = (old.len(), new.len());

    // table[i][j]: LCS length of old[..i] and new[..j]
    let mut table = [[0u8; SMALL_SECTION + 1]; SMALL_SECTION + 1];
    for i in 1..=n {
        for j in 1..=m {
            table[i][j] = if old[i - 1] == new[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut lcs = Vec::with_capacity(usize::from(table[n][m]));
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if old[i - 1] == new[j - 1] {
            lcs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] > table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    lcs.reverse();
    lcs
}

// =============================================================================
// Tests
// =============================================================================
