//! The sorting engine: Quick, Heap, Shell, Merge and LSD Radix sort.
//!
//! Every function borrows its input and returns a freshly allocated sorted
//! copy, so the caller's array can be reused across algorithms. The control
//! flow and tie-breaks here are the reference that [`crate::trace`]
//! reproduces step by step.
//!
//! The main entry point is [`sort`].

use crate::core::Algorithm;
use crate::error::SortError;
use cuneiform::cuneiform;

/// Sorts `data` with the given algorithm, returning a new vector.
///
/// Only [`Algorithm::Radix`] can fail, on negative input.
///
/// # Examples
///
/// ```
/// use sortscope::{Algorithm, sort};
///
/// let sorted = sort(Algorithm::Quick, &[5, 3, 8, 1, 9, 2]).unwrap();
/// assert_eq!(sorted, vec![1, 2, 3, 5, 8, 9]);
/// ```
pub fn sort(algorithm: Algorithm, data: &[i64]) -> Result<Vec<i64>, SortError> {
    match algorithm {
        Algorithm::Quick => Ok(quick_sort(data)),
        Algorithm::Heap => Ok(heap_sort(data)),
        Algorithm::Shell => Ok(shell_sort(data)),
        Algorithm::Merge => Ok(merge_sort(data)),
        Algorithm::Radix => radix_sort(data),
    }
}

/// Returns `true` if `data` is in non-decreasing order.
pub fn is_sorted(data: &[i64]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

// ---------------------------------------------------------------------------
// Quick Sort
// ---------------------------------------------------------------------------

/// Quick Sort with median-of-three pivot selection and Lomuto partitioning.
pub fn quick_sort(data: &[i64]) -> Vec<i64> {
    let mut a = data.to_vec();
    if a.len() > 1 {
        let high = a.len() - 1;
        quick_sort_range(&mut a, 0, high);
    }
    a
}

/// Sorts `a[low..=high]`.
///
/// Recurses into the smaller partition and loops on the larger one so the
/// stack depth stays logarithmic even when a run of equal keys makes the
/// partitions lopsided. Partitions are disjoint, so the visiting order does
/// not change the outcome.
fn quick_sort_range(a: &mut [i64], mut low: usize, mut high: usize) {
    while low < high {
        let p = partition(a, low, high);
        let left_len = p - low;
        let right_len = high - p;

        if left_len < right_len {
            if p > low {
                quick_sort_range(a, low, p - 1);
            }
            low = p + 1;
        } else {
            if p < high {
                quick_sort_range(a, p + 1, high);
            }
            if p == low {
                break;
            }
            high = p - 1;
        }
    }
}

/// Index of the median of `a[low]`, `a[mid]`, `a[high]` by value.
///
/// Ties keep the `low, mid, high` order, so among equal candidates the
/// middle one of that ordering wins.
pub(crate) fn median_of_three(a: &[i64], low: usize, high: usize) -> usize {
    let mid = low + (high - low) / 2;
    let mut candidates = [(a[low], low), (a[mid], mid), (a[high], high)];
    candidates.sort_by_key(|&(value, _)| value);
    candidates[1].1
}

/// Lomuto partition of `a[low..=high]` around the median-of-three pivot.
///
/// Returns the pivot's final index.
fn partition(a: &mut [i64], low: usize, high: usize) -> usize {
    let pivot_idx = median_of_three(a, low, high);
    a.swap(pivot_idx, high);
    let pivot = a[high];

    // `store` is the slot the next "goes left" element lands in.
    let mut store = low;
    for j in low..high {
        if a[j] <= pivot {
            a.swap(store, j);
            store += 1;
        }
    }
    a.swap(store, high);
    store
}

// ---------------------------------------------------------------------------
// Heap Sort
// ---------------------------------------------------------------------------

/// Heap Sort over an in-place max-heap.
pub fn heap_sort(data: &[i64]) -> Vec<i64> {
    let mut a = data.to_vec();
    let n = a.len();

    for root in (0..n / 2).rev() {
        sift_down(&mut a, n, root);
    }

    for end in (1..n).rev() {
        a.swap(0, end);
        sift_down(&mut a, end, 0);
    }
    a
}

/// Restores the max-heap property for the subtree at `root` within `a[..size]`.
fn sift_down(a: &mut [i64], size: usize, mut root: usize) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        if left < size && a[left] > a[largest] {
            largest = left;
        }
        if right < size && a[right] > a[largest] {
            largest = right;
        }
        if largest == root {
            return;
        }
        a.swap(root, largest);
        root = largest;
    }
}

// ---------------------------------------------------------------------------
// Shell Sort
// ---------------------------------------------------------------------------

/// First Knuth gap (1, 4, 13, 40, ...) that is at least `n / 3`.
pub(crate) fn initial_gap(n: usize) -> usize {
    let mut gap = 1;
    while gap < n / 3 {
        gap = gap * 3 + 1;
    }
    gap
}

/// Shell Sort using Knuth's gap sequence.
pub fn shell_sort(data: &[i64]) -> Vec<i64> {
    let mut a = data.to_vec();
    let n = a.len();
    let mut gap = initial_gap(n);

    while gap > 0 {
        for i in gap..n {
            let key = a[i];
            let mut j = i;
            while j >= gap && a[j - gap] > key {
                a[j] = a[j - gap];
                j -= gap;
            }
            a[j] = key;
        }
        gap /= 3;
    }
    a
}

// ---------------------------------------------------------------------------
// Merge Sort
// ---------------------------------------------------------------------------

/// Stable top-down Merge Sort.
pub fn merge_sort(data: &[i64]) -> Vec<i64> {
    merge_sort_by_key(data, |&v| v)
}

/// Stable top-down Merge Sort of arbitrary items by `key`.
///
/// Items with equal keys keep their input order. A single scratch buffer is
/// allocated up front and shared by every merge.
pub fn merge_sort_by_key<T, K, F>(data: &[T], key: F) -> Vec<T>
where
    T: Copy,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut a = data.to_vec();
    if a.len() > 1 {
        let mut scratch = a.clone();
        let high = a.len() - 1;
        merge_sort_range(&mut a, &mut scratch, 0, high, &key);
    }
    a
}

fn merge_sort_range<T: Copy, K: Ord>(a: &mut [T], scratch: &mut [T], low: usize, high: usize, key: &impl Fn(&T) -> K) {
    if low < high {
        let mid = low + (high - low) / 2;
        merge_sort_range(a, scratch, low, mid, key);
        merge_sort_range(a, scratch, mid + 1, high, key);
        merge(a, scratch, low, mid, high, key);
    }
}

/// Merges the sorted runs `a[low..=mid]` and `a[mid+1..=high]`.
fn merge<T: Copy, K: Ord>(a: &mut [T], scratch: &mut [T], low: usize, mid: usize, high: usize, key: &impl Fn(&T) -> K) {
    scratch[low..=high].copy_from_slice(&a[low..=high]);

    let (mut i, mut j, mut k) = (low, mid + 1, low);
    while i <= mid && j <= high {
        // `<=` takes from the left run on ties, which keeps the sort stable.
        if key(&scratch[i]) <= key(&scratch[j]) {
            a[k] = scratch[i];
            i += 1;
        } else {
            a[k] = scratch[j];
            j += 1;
        }
        k += 1;
    }

    let rest_left = mid + 1 - i;
    a[k..k + rest_left].copy_from_slice(&scratch[i..=mid]);
    k += rest_left;
    if j <= high {
        a[k..=high].copy_from_slice(&scratch[j..=high]);
    }
}

// ---------------------------------------------------------------------------
// Radix Sort
// ---------------------------------------------------------------------------

/// Number of buckets for a decimal digit.
const RADIX: usize = 10;

// Cache-aligned digit histogram.
#[cuneiform]
struct DigitCounts {
    data: [usize; RADIX],
}

/// LSD Radix Sort over decimal digits.
///
/// Rejects negative values with [`SortError::NegativeInput`]. Empty input is
/// returned as-is without looking for a maximum.
///
/// # Examples
///
/// ```
/// use sortscope::algo::radix_sort;
///
/// assert_eq!(radix_sort(&[170, 45, 75, 90, 802, 24, 2, 66]).unwrap(), vec![2, 24, 45, 66, 75, 90, 170, 802]);
/// assert!(radix_sort(&[3, -1]).is_err());
/// ```
pub fn radix_sort(data: &[i64]) -> Result<Vec<i64>, SortError> {
    radix_sort_by_key(data, |&v| v)
}

/// Stable LSD Radix Sort of arbitrary items by a non-negative integer `key`.
pub fn radix_sort_by_key<T, F>(data: &[T], key: F) -> Result<Vec<T>, SortError>
where
    T: Copy,
    F: Fn(&T) -> i64,
{
    if data.is_empty() {
        return Ok(Vec::new());
    }
    check_non_negative(data, &key)?;

    let mut a = data.to_vec();
    let mut output = a.clone();
    let max = a.iter().map(&key).max().unwrap_or(0);

    for exp in digit_places(max) {
        counting_sort_by_digit(&a, &mut output, exp, &key);
        std::mem::swap(&mut a, &mut output);
    }
    Ok(a)
}

/// Fails on the first item whose key is negative.
pub(crate) fn check_non_negative<T>(data: &[T], key: impl Fn(&T) -> i64) -> Result<(), SortError> {
    match data.iter().map(key).enumerate().find(|&(_, value)| value < 0) {
        Some((index, value)) => Err(SortError::NegativeInput { index, value }),
        None => Ok(()),
    }
}

/// Decimal place values `1, 10, 100, ...` while `max / place > 0`.
pub(crate) fn digit_places(max: i64) -> impl Iterator<Item = i64> {
    std::iter::successors(Some(1i64), |&exp| exp.checked_mul(10)).take_while(move |&exp| max / exp > 0)
}

#[inline]
pub(crate) fn digit(value: i64, exp: i64) -> usize {
    ((value / exp) % RADIX as i64) as usize
}

/// Stable counting sort of `src` by the digit of `key` at `exp`, written to `dst`.
///
/// 1. Counts the occurrences of each digit.
/// 2. Turns counts into cumulative end positions.
/// 3. Scans `src` right to left, placing each item at its bucket's last free slot.
pub(crate) fn counting_sort_by_digit<T: Copy>(src: &[T], dst: &mut [T], exp: i64, key: impl Fn(&T) -> i64) {
    let mut counts = DigitCounts { data: [0; RADIX] };
    let counts = &mut counts.data;

    src.iter().for_each(|item| counts[digit(key(item), exp)] += 1);

    for d in 1..RADIX {
        counts[d] += counts[d - 1];
    }

    src.iter().rev().for_each(|item| {
        let d = digit(key(item), exp);
        counts[d] -= 1;
        dst[counts[d]] = *item;
    });
}
