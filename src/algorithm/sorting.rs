//! Comparison sorts as resumable step machines.
//!
//! Every step starts by clearing the transient markers of the previous one,
//! so only the elements touched by the current step (plus positions already
//! marked `sorted`) carry a non-default state. Comparisons and swaps are
//! counted as they happen; merge sort reports its writes as swaps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::algorithm::board::Board;
use crate::engine::{drive, Family, NullObserver, Stats, Step, StepAlgorithm};
use crate::model::{ArraySnapshot, ElementState};
use crate::Error;

/// Final array and counters of a completed sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortResult {
    pub values: Vec<i64>,
    pub comparisons: u64,
    pub swaps: u64,
}

/// Boxed sorting run, as produced by [`SortKind::build`]
pub type BoxedSort = Box<dyn StepAlgorithm<Snapshot = ArraySnapshot, Output = SortResult> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    Bubble,
    Insertion,
    Selection,
    Quick,
    Merge,
}

impl SortKind {
    pub const ALL: [SortKind; 5] = [
        SortKind::Bubble,
        SortKind::Insertion,
        SortKind::Selection,
        SortKind::Quick,
        SortKind::Merge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortKind::Bubble => "Bubble Sort",
            SortKind::Insertion => "Insertion Sort",
            SortKind::Selection => "Selection Sort",
            SortKind::Quick => "Quick Sort",
            SortKind::Merge => "Merge Sort",
        }
    }

    pub fn build(self, values: &[i64]) -> BoxedSort {
        match self {
            SortKind::Bubble => Box::new(BubbleSort::new(values)),
            SortKind::Insertion => Box::new(InsertionSort::new(values)),
            SortKind::Selection => Box::new(SelectionSort::new(values)),
            SortKind::Quick => Box::new(QuickSort::new(values)),
            SortKind::Merge => Box::new(MergeSort::new(values)),
        }
    }
}

impl fmt::Display for SortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bubble" => Ok(SortKind::Bubble),
            "insertion" => Ok(SortKind::Insertion),
            "selection" => Ok(SortKind::Selection),
            "quick" => Ok(SortKind::Quick),
            "merge" => Ok(SortKind::Merge),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Sort `values` headlessly and return the result with its counters
pub fn sort(kind: SortKind, values: &[i64]) -> SortResult {
    let mut run = kind.build(values);
    drive(&mut run, &mut NullObserver)
}

/// Board plus the two counters every sort reports
#[derive(Debug, Clone)]
struct Tally {
    board: Board,
    comparisons: u64,
    swaps: u64,
}

impl Tally {
    fn new(values: &[i64]) -> Self {
        Tally {
            board: Board::new(values),
            comparisons: 0,
            swaps: 0,
        }
    }

    /// Counted `a[left] > a[right]`
    fn greater(&mut self, left: usize, right: usize) -> bool {
        self.comparisons += 1;
        self.board.value(left) > self.board.value(right)
    }

    /// Counted exchange, both slots shown as swapping
    fn swap(&mut self, a: usize, b: usize) {
        self.board.mark(a, ElementState::Swapping);
        self.board.mark(b, ElementState::Swapping);
        self.board.swap_values(a, b);
        self.swaps += 1;
    }

    fn finish(&mut self) -> Step<SortResult> {
        self.board.mark_all(ElementState::Sorted);
        Step::Finished(SortResult {
            values: self.board.values(),
            comparisons: self.comparisons,
            swaps: self.swaps,
        })
    }

    fn snapshot(&self) -> ArraySnapshot {
        self.board.snapshot(None, None)
    }

    fn stats(&self) -> Stats {
        Stats {
            comparisons: Some(self.comparisons),
            swaps: Some(self.swaps),
            ..Stats::default()
        }
    }
}

macro_rules! sort_algorithm {
    ($ty:ty, $name:expr) => {
        impl StepAlgorithm for $ty {
            type Snapshot = ArraySnapshot;
            type Output = SortResult;

            fn name(&self) -> &'static str {
                $name
            }

            fn family(&self) -> Family {
                Family::Sorting
            }

            fn step(&mut self) -> Step<SortResult> {
                let kept = self.kept();
                self.tally.board.clear_transient(&kept);
                self.advance()
            }

            fn snapshot(&self) -> ArraySnapshot {
                self.tally.snapshot()
            }

            fn stats(&self) -> Stats {
                self.tally.stats()
            }

            fn settle(&mut self) {
                self.tally.board.settle();
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BubblePhase {
    Compare,
    Swap,
    EndPass,
    Done,
}

/// Adjacent compare-and-swap passes; stops after a pass without swaps
#[derive(Debug, Clone)]
pub struct BubbleSort {
    tally: Tally,
    pass: usize,
    j: usize,
    swapped: bool,
    phase: BubblePhase,
}

impl BubbleSort {
    pub fn new(values: &[i64]) -> Self {
        BubbleSort {
            tally: Tally::new(values),
            pass: 0,
            j: 0,
            swapped: false,
            phase: if values.len() < 2 {
                BubblePhase::Done
            } else {
                BubblePhase::Compare
            },
        }
    }

    fn kept(&self) -> [usize; 0] {
        []
    }

    fn next_pair(&mut self) {
        self.j += 1;
        let n = self.tally.board.len();
        self.phase = if self.j >= n - 1 - self.pass {
            BubblePhase::EndPass
        } else {
            BubblePhase::Compare
        };
    }

    fn advance(&mut self) -> Step<SortResult> {
        let n = self.tally.board.len();
        match self.phase {
            BubblePhase::Compare => {
                let j = self.j;
                self.tally.board.mark(j, ElementState::Comparing);
                self.tally.board.mark(j + 1, ElementState::Comparing);
                if self.tally.greater(j, j + 1) {
                    self.phase = BubblePhase::Swap;
                } else {
                    self.next_pair();
                }
                Step::next()
            }
            BubblePhase::Swap => {
                self.tally.swap(self.j, self.j + 1);
                self.swapped = true;
                self.next_pair();
                Step::next()
            }
            BubblePhase::EndPass => {
                self.tally.board.mark(n - 1 - self.pass, ElementState::Sorted);
                self.pass += 1;
                self.j = 0;
                self.phase = if !self.swapped || self.pass >= n - 1 {
                    BubblePhase::Done
                } else {
                    BubblePhase::Compare
                };
                self.swapped = false;
                Step::immediate()
            }
            BubblePhase::Done => self.tally.finish(),
        }
    }
}

sort_algorithm!(BubbleSort, "Bubble Sort");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertionPhase {
    Select,
    Compare,
    Shift,
}

/// Grows a sorted prefix by sinking each new element into place
#[derive(Debug, Clone)]
pub struct InsertionSort {
    tally: Tally,
    i: usize,
    /// Current slot of the element being inserted
    j: usize,
    phase: InsertionPhase,
}

impl InsertionSort {
    pub fn new(values: &[i64]) -> Self {
        InsertionSort {
            tally: Tally::new(values),
            i: 1,
            j: 1,
            phase: InsertionPhase::Select,
        }
    }

    fn kept(&self) -> [usize; 0] {
        []
    }

    fn place(&mut self) -> Step<SortResult> {
        for k in 0..=self.i {
            self.tally.board.mark(k, ElementState::Sorted);
        }
        self.i += 1;
        self.phase = InsertionPhase::Select;
        Step::next()
    }

    fn advance(&mut self) -> Step<SortResult> {
        // cells of the placed prefix lose their sorted marker while compared or shifted
        if self.i > 1 {
            for k in 0..self.i.min(self.tally.board.len()) {
                if self.tally.board.state(k) == ElementState::Default {
                    self.tally.board.mark(k, ElementState::Sorted);
                }
            }
        }
        match self.phase {
            InsertionPhase::Select => {
                if self.i >= self.tally.board.len() {
                    return self.tally.finish();
                }
                self.j = self.i;
                self.tally.board.mark(self.i, ElementState::Comparing);
                self.phase = InsertionPhase::Compare;
                Step::next()
            }
            InsertionPhase::Compare => {
                let j = self.j;
                if j == 0 {
                    return self.place();
                }
                self.tally.board.mark(j - 1, ElementState::Comparing);
                self.tally.board.mark(j, ElementState::Comparing);
                if self.tally.greater(j - 1, j) {
                    self.phase = InsertionPhase::Shift;
                    Step::next()
                } else {
                    self.place()
                }
            }
            InsertionPhase::Shift => {
                self.tally.swap(self.j - 1, self.j);
                self.j -= 1;
                self.phase = InsertionPhase::Compare;
                Step::next()
            }
        }
    }
}

sort_algorithm!(InsertionSort, "Insertion Sort");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionPhase {
    Anchor,
    Probe,
    Finalize,
}

/// Repeatedly selects the minimum of the unsorted suffix.
///
/// The tentative minimum is shown as `pivot` and loses that marker as soon
/// as a smaller element turns up.
#[derive(Debug, Clone)]
pub struct SelectionSort {
    tally: Tally,
    i: usize,
    j: usize,
    min: usize,
    phase: SelectionPhase,
}

impl SelectionSort {
    pub fn new(values: &[i64]) -> Self {
        SelectionSort {
            tally: Tally::new(values),
            i: 0,
            j: 1,
            min: 0,
            phase: SelectionPhase::Anchor,
        }
    }

    fn kept(&self) -> [usize; 1] {
        [self.min]
    }

    fn advance(&mut self) -> Step<SortResult> {
        let n = self.tally.board.len();
        match self.phase {
            SelectionPhase::Anchor => {
                if self.i + 1 >= n {
                    return self.tally.finish();
                }
                self.tally.board.clear_transient(&[]);
                self.min = self.i;
                self.j = self.i + 1;
                self.tally.board.mark(self.i, ElementState::Pivot);
                self.phase = SelectionPhase::Probe;
                Step::next()
            }
            SelectionPhase::Probe if self.j < n => {
                let j = self.j;
                self.tally.board.mark(j, ElementState::Comparing);
                if self.tally.greater(self.min, j) {
                    self.tally.board.mark(self.min, ElementState::Default);
                    self.min = j;
                    self.tally.board.mark(j, ElementState::Pivot);
                }
                self.j += 1;
                Step::next()
            }
            SelectionPhase::Probe => {
                self.tally.board.clear_transient(&[]);
                self.phase = SelectionPhase::Finalize;
                if self.min != self.i {
                    self.tally.swap(self.i, self.min);
                    Step::next()
                } else {
                    self.finalize()
                }
            }
            SelectionPhase::Finalize => {
                self.tally.board.clear_transient(&[]);
                self.finalize()
            }
        }
    }

    fn finalize(&mut self) -> Step<SortResult> {
        self.tally.board.mark(self.i, ElementState::Sorted);
        self.i += 1;
        self.min = self.i;
        self.phase = SelectionPhase::Anchor;
        Step::immediate()
    }
}

sort_algorithm!(SelectionSort, "Selection Sort");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Partition {
    low: usize,
    high: usize,
    store: usize,
    j: usize,
    swap_pending: bool,
}

/// Lomuto quicksort with the last element as pivot.
///
/// Pending sub-ranges live on an explicit stack; the left range is always
/// partitioned before the right one.
#[derive(Debug, Clone)]
pub struct QuickSort {
    tally: Tally,
    ranges: Vec<(usize, usize)>,
    active: Option<Partition>,
}

impl QuickSort {
    pub fn new(values: &[i64]) -> Self {
        let ranges = if values.is_empty() {
            Vec::new()
        } else {
            vec![(0, values.len() - 1)]
        };
        QuickSort {
            tally: Tally::new(values),
            ranges,
            active: None,
        }
    }

    fn kept(&self) -> Vec<usize> {
        self.active.iter().map(|p| p.high).collect()
    }

    fn advance(&mut self) -> Step<SortResult> {
        let Some(mut part) = self.active else {
            return self.open_next();
        };

        if part.swap_pending {
            self.tally.swap(part.store, part.j);
            part.store += 1;
            part.j += 1;
            part.swap_pending = false;
            self.active = Some(part);
            return Step::next();
        }

        if part.j < part.high {
            let j = part.j;
            self.tally.board.mark(j, ElementState::Comparing);
            if self.tally.greater(part.high, j) {
                if part.store == j {
                    part.store += 1;
                    part.j += 1;
                } else {
                    part.swap_pending = true;
                }
            } else {
                part.j += 1;
            }
            self.active = Some(part);
            return Step::next();
        }

        // Scan finished: move the pivot into its final slot
        let store = part.store;
        if store != part.high {
            self.tally.swap(store, part.high);
        }
        self.tally.board.mark(store, ElementState::Sorted);
        if store < part.high {
            self.ranges.push((store + 1, part.high));
        }
        if store > part.low {
            self.ranges.push((part.low, store - 1));
        }
        self.active = None;
        Step::next()
    }

    fn open_next(&mut self) -> Step<SortResult> {
        while let Some((low, high)) = self.ranges.pop() {
            if low == high {
                self.tally.board.mark(low, ElementState::Sorted);
                continue;
            }
            self.tally.board.mark(high, ElementState::Pivot);
            self.active = Some(Partition {
                low,
                high,
                store: low,
                j: low,
                swap_pending: false,
            });
            return Step::next();
        }
        self.tally.finish()
    }
}

sort_algorithm!(QuickSort, "Quick Sort");

#[derive(Debug, Clone)]
struct Merge {
    left: usize,
    mid: usize,
    right: usize,
    /// Copy of `left..right` taken when the merge started
    aux: Vec<i64>,
    i: usize,
    j: usize,
    k: usize,
}

/// Bottom-up merge sort; every write into the array is one step
#[derive(Debug, Clone)]
pub struct MergeSort {
    tally: Tally,
    width: usize,
    left: usize,
    active: Option<Merge>,
}

impl MergeSort {
    pub fn new(values: &[i64]) -> Self {
        MergeSort {
            tally: Tally::new(values),
            width: 1,
            left: 0,
            active: None,
        }
    }

    fn kept(&self) -> [usize; 0] {
        []
    }

    fn open_next(&mut self) -> Option<Merge> {
        let n = self.tally.board.len();
        while self.width < n {
            if self.left + self.width < n {
                let left = self.left;
                let mid = left + self.width;
                let right = (left + 2 * self.width).min(n);
                let aux = (left..right).map(|k| self.tally.board.value(k)).collect();
                return Some(Merge {
                    left,
                    mid,
                    right,
                    aux,
                    i: 0,
                    j: mid - left,
                    k: left,
                });
            }
            self.width *= 2;
            self.left = 0;
        }
        None
    }

    fn advance(&mut self) -> Step<SortResult> {
        let mut merge = match self.active.take() {
            Some(merge) => merge,
            None => match self.open_next() {
                Some(merge) => merge,
                None => return self.tally.finish(),
            },
        };

        let left_len = merge.mid - merge.left;
        let total = merge.right - merge.left;
        let take_right = if merge.i < left_len && merge.j < total {
            self.tally.comparisons += 1;
            // Ties go left to keep the sort stable
            merge.aux[merge.j] < merge.aux[merge.i]
        } else {
            merge.i >= left_len
        };

        let value = if take_right {
            merge.j += 1;
            merge.aux[merge.j - 1]
        } else {
            merge.i += 1;
            merge.aux[merge.i - 1]
        };

        self.tally.board.set_value(merge.k, value);
        self.tally.board.mark(merge.k, ElementState::Swapping);
        self.tally.swaps += 1;
        merge.k += 1;

        if merge.k < merge.right {
            self.active = Some(merge);
        } else {
            self.left += 2 * self.width;
        }
        Step::next()
    }
}

sort_algorithm!(MergeSort, "Merge Sort");
