//! Array searches as step machines.
//!
//! A step resolves the probe made by the previous step (found, or marked
//! `checked` and the bounds narrowed) and then probes the next index. The
//! probe is what counts as a visit. Binary, jump and interpolation search
//! expect ascending input; linear search accepts anything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::algorithm::board::Board;
use crate::engine::{drive, Family, NullObserver, Stats, Step, StepAlgorithm};
use crate::model::{ArraySnapshot, ElementState};
use crate::Error;

/// Terminal value of a search run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Index holding the target; `None` once the search is exhausted
    pub found: Option<usize>,
    pub elements_visited: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Linear,
    Binary,
    Jump,
    Interpolation,
}

impl SearchKind {
    pub const ALL: [SearchKind; 4] = [
        SearchKind::Linear,
        SearchKind::Binary,
        SearchKind::Jump,
        SearchKind::Interpolation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SearchKind::Linear => "Linear Search",
            SearchKind::Binary => "Binary Search",
            SearchKind::Jump => "Jump Search",
            SearchKind::Interpolation => "Interpolation Search",
        }
    }

    pub fn requires_sorted(self) -> bool {
        !matches!(self, SearchKind::Linear)
    }

    pub fn build(self, values: &[i64], target: i64) -> ArraySearch {
        ArraySearch::new(self, values, target)
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(SearchKind::Linear),
            "binary" => Ok(SearchKind::Binary),
            "jump" => Ok(SearchKind::Jump),
            "interpolation" => Ok(SearchKind::Interpolation),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Search `values` for `target` headlessly
pub fn search(kind: SearchKind, values: &[i64], target: i64) -> SearchResult {
    let mut run = kind.build(values, target);
    drive(&mut run, &mut NullObserver)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Linear { next: usize },
    /// `end` is exclusive
    Binary { lo: usize, end: usize },
    /// Probing the last element of each block
    JumpBlocks { block: usize, start: usize },
    /// Scanning `next..end` inside the block whose last element exceeded the target
    JumpScan { next: usize, end: usize },
    /// `hi` is inclusive
    Interpolation { lo: usize, hi: usize },
}

/// One search run over an owned copy of the array
#[derive(Debug, Clone)]
pub struct ArraySearch {
    kind: SearchKind,
    board: Board,
    target: i64,
    cursor: Cursor,
    probe: Option<usize>,
    current: Option<usize>,
    visits: u64,
    exhausted: bool,
}

impl ArraySearch {
    pub fn new(kind: SearchKind, values: &[i64], target: i64) -> Self {
        let n = values.len();
        let cursor = match kind {
            SearchKind::Linear => Cursor::Linear { next: 0 },
            SearchKind::Binary => Cursor::Binary { lo: 0, end: n },
            SearchKind::Jump => Cursor::JumpBlocks {
                block: ((n as f64).sqrt().floor() as usize).max(1),
                start: 0,
            },
            SearchKind::Interpolation => Cursor::Interpolation {
                lo: 0,
                hi: n.saturating_sub(1),
            },
        };

        ArraySearch {
            kind,
            board: Board::new(values),
            target,
            cursor,
            probe: None,
            current: None,
            visits: 0,
            exhausted: n == 0,
        }
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    fn mark_span(&mut self, from: usize, to_inclusive: usize, state: ElementState) {
        for k in from..=to_inclusive {
            self.board.mark(k, state);
        }
    }

    /// Narrow the bounds after probe `p` missed
    fn after_miss(&mut self, p: usize) {
        let value = self.board.value(p);
        let target = self.target;
        match self.cursor {
            Cursor::Linear { .. } => {}
            Cursor::Binary { lo, end } => {
                if value < target {
                    self.mark_span(lo, p, ElementState::Checked);
                    self.cursor = Cursor::Binary { lo: p + 1, end };
                } else {
                    self.mark_span(p, end - 1, ElementState::Checked);
                    self.cursor = Cursor::Binary { lo, end: p };
                }
            }
            Cursor::JumpBlocks { block, start } => {
                if value < target {
                    self.mark_span(start, p, ElementState::Checked);
                    self.cursor = Cursor::JumpBlocks { block, start: p + 1 };
                } else {
                    self.cursor = Cursor::JumpScan { next: start, end: p };
                }
            }
            Cursor::JumpScan { .. } => {
                if value > target {
                    self.exhausted = true;
                }
            }
            Cursor::Interpolation { lo, hi } => {
                if value < target {
                    self.mark_span(lo, p, ElementState::Checked);
                    self.cursor = Cursor::Interpolation { lo: p + 1, hi };
                } else if p == 0 {
                    self.exhausted = true;
                } else {
                    self.mark_span(p, hi, ElementState::Checked);
                    self.cursor = Cursor::Interpolation { lo, hi: p - 1 };
                }
            }
        }
    }

    /// Pick the next index to probe, or `None` once the target cannot be present
    fn next_probe(&mut self) -> Option<usize> {
        if self.exhausted {
            return None;
        }
        let n = self.board.len();
        let target = self.target;

        match self.cursor {
            Cursor::Linear { next } => {
                if next >= n {
                    return None;
                }
                self.cursor = Cursor::Linear { next: next + 1 };
                Some(next)
            }
            Cursor::Binary { lo, end } => {
                if lo >= end {
                    return None;
                }
                self.mark_span(lo, end - 1, ElementState::Range);
                Some((lo + end - 1) / 2)
            }
            Cursor::JumpBlocks { block, start } => {
                if start >= n {
                    return None;
                }
                let last = (start + block).min(n) - 1;
                self.mark_span(start, last, ElementState::Range);
                Some(last)
            }
            Cursor::JumpScan { next, end } => {
                if next >= end {
                    return None;
                }
                self.cursor = Cursor::JumpScan { next: next + 1, end };
                Some(next)
            }
            Cursor::Interpolation { lo, hi } => {
                if lo > hi || hi >= n {
                    return None;
                }
                let (low, high) = (self.board.value(lo), self.board.value(hi));
                if target < low || target > high {
                    return None;
                }
                self.mark_span(lo, hi, ElementState::Range);
                if high == low {
                    // target == low here, so the probe formula would divide by zero
                    return Some(lo);
                }
                let offset = (hi - lo) as i128 * (i128::from(target) - i128::from(low))
                    / (i128::from(high) - i128::from(low));
                Some((lo + offset as usize).min(hi))
            }
        }
    }

    fn finish(&mut self, found: Option<usize>) -> Step<SearchResult> {
        Step::Finished(SearchResult {
            found,
            elements_visited: self.visits,
        })
    }
}

impl StepAlgorithm for ArraySearch {
    type Snapshot = ArraySnapshot;
    type Output = SearchResult;

    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn family(&self) -> Family {
        Family::Searching
    }

    fn step(&mut self) -> Step<SearchResult> {
        if let Some(p) = self.probe.take() {
            if self.board.value(p) == self.target {
                self.board.mark(p, ElementState::Found);
                return self.finish(Some(p));
            }
            self.board.mark(p, ElementState::Checked);
            self.after_miss(p);
        }

        match self.next_probe() {
            Some(p) => {
                self.board.mark(p, ElementState::Checking);
                self.visits += 1;
                self.current = Some(p);
                self.probe = Some(p);
                Step::next()
            }
            None => {
                self.exhausted = true;
                self.finish(None)
            }
        }
    }

    fn snapshot(&self) -> ArraySnapshot {
        self.board.snapshot(self.current, Some(self.target))
    }

    fn stats(&self) -> Stats {
        Stats {
            elements_visited: Some(self.visits),
            current_index: self.current,
            ..Stats::default()
        }
    }

    fn settle(&mut self) {
        self.board.settle();
    }
}
