//! Step-by-step traces of the sorting engine.
//!
//! [`generate_trace`] replays one of the engine's algorithms on a small array
//! and records a [`Step`] for every comparison, exchange, pivot choice, gap
//! change, merge placement or digit pass it performs. The result is a fully
//! materialised [`Trace`]: walking it (for example with a [`TracePlayer`]) is
//! plain index movement and never re-runs the algorithm.
//!
//! Every snapshot is a permutation of the input, and the last step of every
//! trace marks all indices [`HighlightRole::Sorted`] over the engine's output.

mod generators;

use crate::core::Algorithm;
use crate::error::SortError;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Semantic tag applied to an index in a [`Step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HighlightRole {
    #[default]
    Normal,
    Comparing,
    Swapping,
    Sorted,
    /// Partition pivot in Quick Sort, node under test in Heap Sort.
    Pivot,
    /// Right-hand element of a gapped comparison, or the right half of a split.
    Gap,
    Merging,
}

/// One recorded state of the array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    array: Vec<i64>,
    highlights: BTreeMap<usize, HighlightRole>,
    pointers: BTreeMap<&'static str, usize>,
    description: String,
}

impl Step {
    /// Snapshot of the array at this step.
    pub fn array(&self) -> &[i64] {
        &self.array
    }

    /// Highlighted indices. Indices not present are [`HighlightRole::Normal`].
    pub fn highlights(&self) -> &BTreeMap<usize, HighlightRole> {
        &self.highlights
    }

    pub fn role(&self, index: usize) -> HighlightRole {
        self.highlights.get(&index).copied().unwrap_or_default()
    }

    /// Named cursor positions (`"i"`, `"j"`, ...), possibly empty.
    pub fn pointers(&self) -> &BTreeMap<&'static str, usize> {
        &self.pointers
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `true` when every index is tagged [`HighlightRole::Sorted`].
    pub fn all_sorted(&self) -> bool {
        (0..self.array.len()).all(|i| self.role(i) == HighlightRole::Sorted)
    }
}

/// An ordered, replayable sequence of [`Step`]s for one algorithm run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    algorithm: Algorithm,
    input: Vec<i64>,
    steps: Vec<Step>,
}

impl Trace {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The array the trace was generated from.
    pub fn input(&self) -> &[i64] {
        &self.input
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Number of steps. Always at least one.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// The closing step with every index sorted.
    pub fn final_step(&self) -> &Step {
        // `Recorder::finish` always appends the closing step.
        &self.steps[self.steps.len() - 1]
    }

    /// The sorted array, as shown by the closing step.
    pub fn output(&self) -> &[i64] {
        self.final_step().array()
    }

    /// A replay cursor positioned before the first step.
    pub fn player(&self) -> TracePlayer<'_> {
        TracePlayer {
            trace: self,
            shown: 0,
        }
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Replay cursor over a [`Trace`].
///
/// Stopping a replay is simply dropping the player; restarting is a reset of
/// the cursor.
#[derive(Clone, Debug)]
pub struct TracePlayer<'a> {
    trace: &'a Trace,
    /// Number of steps shown so far; the current step is `shown - 1`.
    shown: usize,
}

impl<'a> TracePlayer<'a> {
    /// Shows the next step, or returns `None` once the trace is exhausted.
    pub fn step_forward(&mut self) -> Option<&'a Step> {
        let step = self.trace.get(self.shown)?;
        self.shown += 1;
        Some(step)
    }

    /// Moves back one step. The first step is the earliest reachable one.
    pub fn step_back(&mut self) -> Option<&'a Step> {
        if self.shown > 1 {
            self.shown -= 1;
        }
        self.current()
    }

    /// Jumps to `index`, returning the step there if it exists.
    pub fn seek(&mut self, index: usize) -> Option<&'a Step> {
        let step = self.trace.get(index)?;
        self.shown = index + 1;
        Some(step)
    }

    pub fn restart(&mut self) {
        self.shown = 0;
    }

    /// The most recently shown step.
    pub fn current(&self) -> Option<&'a Step> {
        self.shown.checked_sub(1).and_then(|i| self.trace.get(i))
    }

    /// Index of the current step, if any has been shown.
    pub fn position(&self) -> Option<usize> {
        self.shown.checked_sub(1)
    }

    pub fn remaining(&self) -> usize {
        self.trace.len() - self.shown
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.trace.len()
    }
}

/// Generates the step trace of `algorithm` on `data`.
///
/// Intended for small arrays (see [`Algorithm::max_trace_len`]); the length
/// is not enforced. Fails only for Radix Sort on negative input.
///
/// # Examples
///
/// ```
/// use sortscope::{Algorithm, HighlightRole, generate_trace};
///
/// let trace = generate_trace(Algorithm::Merge, &[4, 2, 5, 1]).unwrap();
/// let last = trace.final_step();
/// assert_eq!(last.array(), &[1, 2, 4, 5]);
/// assert!((0..4).all(|i| last.role(i) == HighlightRole::Sorted));
/// ```
pub fn generate_trace(algorithm: Algorithm, data: &[i64]) -> Result<Trace, SortError> {
    let mut rec = Recorder::new(data);
    match algorithm {
        Algorithm::Quick => generators::quick(&mut rec),
        Algorithm::Heap => generators::heap(&mut rec),
        Algorithm::Shell => generators::shell(&mut rec),
        Algorithm::Merge => generators::merge(&mut rec),
        Algorithm::Radix => generators::radix(&mut rec)?,
    }
    let trace = rec.finish(algorithm, data);
    debug!(
        "generated {} steps for {} on {} elements",
        trace.len(),
        algorithm,
        data.len()
    );
    Ok(trace)
}

/// Accumulates steps while a generator works on its private copy of the array.
pub(crate) struct Recorder {
    array: Vec<i64>,
    /// Indices fixed in their final position; overlaid onto every later step.
    sorted: BTreeSet<usize>,
    steps: Vec<Step>,
}

impl Recorder {
    fn new(data: &[i64]) -> Self {
        Self {
            array: data.to_vec(),
            sorted: BTreeSet::new(),
            steps: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.array.len()
    }

    fn mark_sorted(&mut self, index: usize) {
        self.sorted.insert(index);
    }

    /// Records the current array with the given highlights and pointers.
    ///
    /// Out-of-range indices are dropped. Sorted indices override any other
    /// role passed in.
    fn emit(
        &mut self,
        highlights: &[(usize, HighlightRole)],
        pointers: &[(&'static str, usize)],
        description: impl Into<String>,
    ) {
        let len = self.len();

        let mut marks = BTreeMap::new();
        for &(index, role) in highlights {
            if index < len {
                marks.insert(index, role);
            } else {
                debug!("ignoring highlight at {index}, array length is {len}");
            }
        }
        for &index in &self.sorted {
            marks.insert(index, HighlightRole::Sorted);
        }

        let pointers = pointers
            .iter()
            .filter(|&&(_, index)| index < len)
            .copied()
            .collect();

        self.steps.push(Step {
            array: self.array.clone(),
            highlights: marks,
            pointers,
            description: description.into(),
        });
    }

    /// Appends the closing all-sorted step.
    fn finish(mut self, algorithm: Algorithm, input: &[i64]) -> Trace {
        let all: Vec<_> = (0..self.len()).map(|i| (i, HighlightRole::Sorted)).collect();
        self.emit(&all, &[], "Sorting complete");
        Trace {
            algorithm,
            input: input.to_vec(),
            steps: self.steps,
        }
    }
}
