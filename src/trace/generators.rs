//! Per-algorithm step generators.
//!
//! Each generator mirrors the decision order of its counterpart in
//! [`crate::algo`] (same pivots, gaps, splits and tie-breaks) so that a trace
//! ends on exactly the array the engine returns. Writes that would briefly
//! duplicate a value in the engine (shell shifts, merge placements, radix
//! redistribution) are rendered as the equivalent permutation.

use super::HighlightRole::{Comparing, Gap, Merging, Pivot, Sorted, Swapping};
use super::Recorder;
use crate::algo::{check_non_negative, counting_sort_by_digit, digit_places, initial_gap, median_of_three};
use crate::error::SortError;

// ---------------------------------------------------------------------------
// Quick Sort
// ---------------------------------------------------------------------------

pub(super) fn quick(rec: &mut Recorder) {
    if rec.len() > 1 {
        let high = rec.len() - 1;
        quick_range(rec, 0, high);
    }
}

/// Partitions `low..=high`, then recurses left before right.
fn quick_range(rec: &mut Recorder, low: usize, high: usize) {
    if low >= high {
        return;
    }

    let mid = low + (high - low) / 2;
    let pivot_idx = median_of_three(&rec.array, low, high);
    let pivot = rec.array[pivot_idx];
    rec.emit(
        &[(pivot_idx, Pivot)],
        &[("lo", low), ("mid", mid), ("hi", high)],
        format!(
            "Pivot {pivot}: median of {}, {}, {}",
            rec.array[low], rec.array[mid], rec.array[high]
        ),
    );

    if pivot_idx != high {
        rec.array.swap(pivot_idx, high);
        rec.emit(
            &[(pivot_idx, Swapping), (high, Swapping)],
            &[],
            format!("Move pivot {pivot} to index {high}"),
        );
    }

    let mut store = low;
    for j in low..high {
        let value = rec.array[j];
        rec.emit(
            &[(high, Pivot), (j, Comparing)],
            &[("i", store), ("j", j)],
            format!("Compare {value} <= {pivot}?"),
        );
        if value <= pivot {
            if store != j {
                rec.array.swap(store, j);
                rec.emit(
                    &[(high, Pivot), (store, Swapping), (j, Swapping)],
                    &[("i", store), ("j", j)],
                    format!("Swap {} <-> {}", rec.array[store], rec.array[j]),
                );
            }
            store += 1;
        }
    }

    rec.array.swap(store, high);
    rec.mark_sorted(store);
    rec.emit(
        &[(store, Sorted)],
        &[("i", store)],
        format!("Pivot {pivot} placed at index {store}"),
    );

    if store > low {
        quick_range(rec, low, store - 1);
    }
    quick_range(rec, store + 1, high);
}

// ---------------------------------------------------------------------------
// Heap Sort
// ---------------------------------------------------------------------------

pub(super) fn heap(rec: &mut Recorder) {
    let n = rec.len();
    if n == 0 {
        return;
    }

    rec.emit(&[(0, Pivot)], &[], "Build max heap (parent >= children)");
    for root in (0..n / 2).rev() {
        sift_down(rec, n, root);
    }
    rec.emit(
        &[(0, Pivot)],
        &[],
        format!("Max heap ready, root {} is the largest", rec.array[0]),
    );

    for end in (1..n).rev() {
        let max = rec.array[0];
        rec.array.swap(0, end);
        rec.mark_sorted(end);
        rec.emit(
            &[(0, Swapping), (end, Sorted)],
            &[],
            format!("Extract max {max} to index {end}, heapify the remaining {end}"),
        );
        sift_down(rec, end, 0);
    }
}

fn sift_down(rec: &mut Recorder, size: usize, mut root: usize) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;

        let mut marks = vec![(root, Pivot)];
        marks.extend([left, right].into_iter().filter(|&c| c < size).map(|c| (c, Comparing)));
        rec.emit(
            &marks,
            &[],
            format!("Heapify: check node {root} ({}) against its children", rec.array[root]),
        );

        let mut largest = root;
        if left < size && rec.array[left] > rec.array[largest] {
            largest = left;
        }
        if right < size && rec.array[right] > rec.array[largest] {
            largest = right;
        }
        if largest == root {
            return;
        }

        rec.array.swap(root, largest);
        rec.emit(
            &[(root, Swapping), (largest, Swapping)],
            &[],
            format!("Swap {} <-> {}", rec.array[root], rec.array[largest]),
        );
        root = largest;
    }
}

// ---------------------------------------------------------------------------
// Shell Sort
// ---------------------------------------------------------------------------

/// The engine shifts larger elements right and drops the held key into the
/// hole; here the key is exchanged leftwards instead, which visits the same
/// comparisons and ends on the same array.
pub(super) fn shell(rec: &mut Recorder) {
    let n = rec.len();
    if n < 2 {
        return;
    }
    let mut gap = initial_gap(n);

    while gap > 0 {
        rec.emit(&[], &[], format!("Gap = {gap} (compare elements {gap} apart)"));

        for i in gap..n {
            let key = rec.array[i];
            let mut j = i;
            while j >= gap {
                let left = rec.array[j - gap];
                rec.emit(
                    &[(j, Gap), (j - gap, Comparing)],
                    &[("i", i), ("j", j)],
                    format!("Compare [{}]={left} > {key}?", j - gap),
                );
                if left <= key {
                    break;
                }
                rec.array.swap(j - gap, j);
                rec.emit(
                    &[(j, Swapping), (j - gap, Swapping)],
                    &[("i", i), ("j", j - gap)],
                    format!("Shift {left} right to index {j}"),
                );
                j -= gap;
            }
        }
        gap /= 3;
    }
}

// ---------------------------------------------------------------------------
// Merge Sort
// ---------------------------------------------------------------------------

pub(super) fn merge(rec: &mut Recorder) {
    if rec.len() > 1 {
        let high = rec.len() - 1;
        merge_range(rec, 0, high);
    }
}

fn merge_range(rec: &mut Recorder, low: usize, high: usize) {
    if low >= high {
        return;
    }

    let mid = low + (high - low) / 2;
    let halves: Vec<_> = (low..=mid)
        .map(|i| (i, Comparing))
        .chain((mid + 1..=high).map(|i| (i, Gap)))
        .collect();
    rec.emit(
        &halves,
        &[],
        format!("Split: left [{low}..={mid}], right [{}..={high}]", mid + 1),
    );

    merge_range(rec, low, mid);
    merge_range(rec, mid + 1, high);
    merge_runs(rec, low, mid, high);
}

/// After each placement the array reads: placed prefix, then what is left of
/// the left run, then what is left of the right run.
fn merge_runs(rec: &mut Recorder, low: usize, mid: usize, high: usize) {
    let left = rec.array[low..=mid].to_vec();
    let right = rec.array[mid + 1..=high].to_vec();
    rec.emit(&[], &[], format!("Merge {left:?} + {right:?}"));

    let (mut i, mut j, mut k) = (0, 0, low);
    while i < left.len() && j < right.len() {
        let value = if left[i] <= right[j] {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        rec.array[k] = value;
        k += 1;

        let rest = left[i..].iter().chain(&right[j..]);
        for (slot, &v) in rec.array[k..=high].iter_mut().zip(rest) {
            *slot = v;
        }
        rec.emit(&[(k - 1, Merging)], &[("k", k - 1)], format!("Place {value}"));
    }
}

// ---------------------------------------------------------------------------
// Radix Sort
// ---------------------------------------------------------------------------

/// Each digit pass computes the engine's counting-sort order, then walks the
/// array fixing every index whose value differs by exchanging it with the
/// next index that holds the required value.
pub(super) fn radix(rec: &mut Recorder) -> Result<(), SortError> {
    check_non_negative(&rec.array, |&v| v)?;
    let n = rec.len();
    let Some(max) = rec.array.iter().copied().max() else {
        return Ok(());
    };

    let mut order = vec![0; n];
    for (pass, exp) in digit_places(max).enumerate() {
        rec.emit(
            &[],
            &[],
            format!("Sort by digit {} (place value {exp})", pass + 1),
        );
        counting_sort_by_digit(&rec.array, &mut order, exp, |&v| v);

        for i in 0..n {
            let wanted = order[i];
            if rec.array[i] == wanted {
                continue;
            }
            let found = rec.array[i + 1..].iter().position(|&v| v == wanted);
            if let Some(offset) = found {
                let p = i + 1 + offset;
                rec.array.swap(i, p);
                rec.emit(
                    &[(i, Swapping), (p, Swapping)],
                    &[],
                    format!("Place {wanted} at index {i}"),
                );
            }
        }
    }
    Ok(())
}
