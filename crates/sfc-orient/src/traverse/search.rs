//! Explicit-stack depth-first search over displacement sequences.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tracing::{debug, trace};

use crate::gray::{generate_moves, BaseCurve, BitVector, DimensionError};

use super::types::{
    Frame, Orientation, OrientationSet, SolutionCollection, Traversal, TraverseCfg,
};

/// Steps between wall-clock checks in `Traverser::run`.
const CLOCK_STRIDE: u64 = 1 << 12;

/// Enumerate all displacement sequences for `dim` exhaustively.
pub fn traverse(dim: u32) -> Result<Traversal, DimensionError> {
    traverse_with(dim, TraverseCfg::default())
}

/// Enumerate under a step/time budget; the report says whether it finished.
pub fn traverse_with(dim: u32, cfg: TraverseCfg) -> Result<Traversal, DimensionError> {
    let mut t = Traverser::new(dim)?;
    t.run(&cfg);
    Ok(t.finish())
}

/// Result of a single search step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Exhausted,
}

/// Resumable search state: frame stack, per-depth histories, accumulators.
pub struct Traverser {
    curve: BaseCurve,
    target: BitVector,
    final_move: BitVector,
    stack: Vec<Frame>,
    move_hist: Vec<BitVector>,
    in_hist: Vec<BitVector>,
    in_pos: BitVector,
    depth: usize,
    steps: u64,
    exhausted: bool,
    capture: BTreeSet<u64>,
    // accumulators
    total: u64,
    min_count: Option<usize>,
    min_indices: Vec<u64>,
    max_count: Option<usize>,
    max_indices: Vec<u64>,
    solutions: SolutionCollection,
    captured: BTreeMap<u64, Vec<Orientation>>,
}

impl Traverser {
    /// Requires `dim >= 1`: D=0 has neither a final move nor a target axis.
    pub fn new(dim: u32) -> Result<Self, DimensionError> {
        let curve = BaseCurve::new(dim)?;
        let final_move = curve
            .final_move()
            .ok_or_else(|| DimensionError::degenerate(dim, "a 0-cube has no displacement"))?;
        let depth_cap = curve.num_regions();
        Ok(Self {
            target: 1 << (dim - 1),
            final_move,
            stack: Vec::with_capacity(depth_cap),
            move_hist: Vec::with_capacity(depth_cap),
            in_hist: Vec::with_capacity(depth_cap),
            in_pos: 0,
            depth: 0,
            steps: 0,
            exhausted: false,
            capture: BTreeSet::new(),
            total: 0,
            min_count: None,
            min_indices: Vec::new(),
            max_count: None,
            max_indices: Vec::new(),
            solutions: SolutionCollection::new(),
            captured: BTreeMap::new(),
            curve,
        })
    }

    /// Keep the ordered sequence of solution `index` when it is found.
    pub fn capture(&mut self, index: u64) {
        self.capture.insert(index);
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[inline]
    pub fn solutions_found(&self) -> u64 {
        self.total
    }

    /// Run until exhausted or until the budget in `cfg` is spent.
    pub fn run(&mut self, cfg: &TraverseCfg) {
        self.capture.extend(cfg.capture.iter().copied());
        let started = Instant::now();
        let first_step = self.steps;
        while !self.exhausted {
            let taken = self.steps - first_step;
            if cfg.max_steps.is_some_and(|cap| taken >= cap) {
                debug!(steps = taken, "step budget spent");
                break;
            }
            if let Some(limit) = cfg.time_limit {
                if taken % CLOCK_STRIDE == 0 && started.elapsed() >= limit {
                    debug!(steps = taken, "time budget spent");
                    break;
                }
            }
            self.step();
        }
        debug!(
            dim = self.curve.dim(),
            solutions = self.total,
            distinct_sets = self.solutions.len(),
            min = ?self.min_count,
            max = ?self.max_count,
            complete = self.exhausted,
            "traversal"
        );
    }

    /// Expand the current state, then pop and apply the next frame.
    pub fn step(&mut self) -> StepOutcome {
        if self.exhausted {
            return StepOutcome::Exhausted;
        }
        let depth = self.depth;
        if depth == self.curve.terminal_depth() {
            self.try_record();
        } else {
            let out_pos = self.curve.order()[depth];
            let region_disp = self.curve.path()[depth];
            let in_pos = self.in_pos;
            for mv in generate_moves(in_pos, out_pos, region_disp, self.curve.dim()) {
                self.stack.push(Frame { in_pos, mv, depth });
            }
        }

        let Some(frame) = self.stack.pop() else {
            self.exhausted = true;
            return StepOutcome::Exhausted;
        };
        self.move_hist.truncate(frame.depth);
        self.in_hist.truncate(frame.depth);
        self.move_hist.push(frame.mv);
        self.in_hist.push(frame.in_pos);
        self.in_pos = frame.in_pos ^ frame.mv ^ self.curve.path()[frame.depth];
        self.depth = frame.depth + 1;
        self.steps += 1;
        StepOutcome::Continue
    }

    /// At the terminal depth: record a solution if the exit hits the target.
    fn try_record(&mut self) {
        if self.in_pos ^ self.final_move != self.target {
            return;
        }
        let index = self.total;
        let sequence = self
            .in_hist
            .iter()
            .zip(&self.move_hist)
            .map(|(&s, &m)| Orientation::new(s, m))
            .chain(std::iter::once(Orientation::new(self.in_pos, self.final_move)));
        let set: OrientationSet = if self.capture.contains(&index) {
            let ordered: Vec<Orientation> = sequence.collect();
            let set = ordered.iter().copied().collect();
            self.captured.insert(index, ordered);
            set
        } else {
            sequence.collect()
        };
        trace!(index, moves = ?self.move_hist, last = self.final_move, "solution");

        let n = set.len();
        match self.min_count {
            Some(m) if n > m => {}
            Some(m) if n == m => self.min_indices.push(index),
            _ => {
                self.min_count = Some(n);
                self.min_indices = vec![index];
            }
        }
        match self.max_count {
            Some(m) if n < m => {}
            Some(m) if n == m => self.max_indices.push(index),
            _ => {
                self.max_count = Some(n);
                self.max_indices = vec![index];
            }
        }
        self.solutions.insert(set);
        self.total += 1;
    }

    /// Snapshot of the statistics gathered so far.
    pub fn report(&self) -> Traversal {
        Traversal {
            dim: self.curve.dim(),
            total_solutions: self.total,
            min_count: self.min_count,
            min_indices: self.min_indices.clone(),
            max_count: self.max_count,
            max_indices: self.max_indices.clone(),
            solutions: self.solutions.clone(),
            complete: self.exhausted,
            steps: self.steps,
            captured: self.captured.clone(),
        }
    }

    /// Consume the search and return its statistics without copying.
    pub fn finish(self) -> Traversal {
        Traversal {
            dim: self.curve.dim(),
            total_solutions: self.total,
            min_count: self.min_count,
            min_indices: self.min_indices,
            max_count: self.max_count,
            max_indices: self.max_indices,
            solutions: self.solutions,
            complete: self.exhausted,
            steps: self.steps,
            captured: self.captured,
        }
    }
}
