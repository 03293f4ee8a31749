use std::rc::Rc;

use log::{debug, info, trace};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::board::{Board, Configuration};
use crate::config::SolverConfig;
use crate::error::Result;
use crate::frontier::PriorityFrontier;
use crate::geometry::Cell;
use crate::vehicle::Move;

const STEP_COST: i32 = 10;
const EXPANSION_COST: i32 = 1;
const BLOCKER_PENALTY: i32 = 10;
const MOBILITY_CREDIT: i32 = 1;
const GOAL_BONUS: i32 = 9999;

pub type Path = SmallVec<[Move; 32]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(Path),
    /// Every reachable configuration was expanded without freeing the special vehicle.
    Exhausted,
    /// A new configuration turned up after `SolverConfig::max_expansions` were already recorded.
    NodeLimit,
}

#[derive(Clone, Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// Distinct configurations recorded after the initial one.
    pub expanded: usize,
}

impl SearchReport {
    /// The solution, or an empty slice when none was found.
    pub fn moves(&self) -> &[Move] {
        match &self.outcome {
            SearchOutcome::Solved(path) => path.as_slice(),
            SearchOutcome::Exhausted | SearchOutcome::NodeLimit => &[],
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Solved(_))
    }
}

/// Scores the configuration `mv` leads to from `from`; lower is better.
///
/// Each vehicle cell on the exit row beyond the special vehicle's front costs a fixed penalty,
/// eased by one point per legal move that blocker has. A solved configuration gets a large bonus.
/// The board is left in whatever configuration it held before the call.
pub fn heuristic(board: &mut Board, mv: Move, from: &Configuration) -> Result<i32> {
    board.simulate(from, mv, |b| {
        let (_, front) = b.special()?.span();
        let row = b.exit_row();

        let mut score = 0;
        for x in front.saturating_add(1)..b.width() {
            if let Some(blocker) = b.occupant_at(Cell::new(x, row)) {
                score += BLOCKER_PENALTY;
                score -= MOBILITY_CREDIT * blocker.legal_moves(b).len() as i32;
            }
        }

        if b.is_goal()? {
            score -= GOAL_BONUS;
        }
        Ok(score)
    })
}

/// Weighted best-first search over board configurations.
///
/// A configuration keeps the path that first reached it; a cheaper path found later is ignored,
/// so solutions are not guaranteed to be minimal.
pub struct Solver<'b> {
    board: &'b mut Board,
    config: SolverConfig,
    frontier: PriorityFrontier<(Move, Rc<Configuration>)>,
    visited: FxHashMap<Rc<Configuration>, Path>,
    expanded: usize,
}

impl<'b> Solver<'b> {
    pub fn new(board: &'b mut Board, config: SolverConfig) -> Self {
        Solver {
            board,
            config,
            frontier: PriorityFrontier::with_capacity(1024),
            visited: FxHashMap::default(),
            expanded: 0,
        }
    }

    /// Runs the search. The board is put back into its initial configuration afterwards.
    pub fn solve(mut self) -> Result<SearchReport> {
        let initial = Rc::new(self.board.snapshot());
        let outcome = self.search(&initial);
        self.board.restore(&initial)?;
        let outcome = outcome?;

        match &outcome {
            SearchOutcome::Solved(path) => debug!("solved in {} moves", path.len()),
            SearchOutcome::Exhausted => debug!("exhausted frontier"),
            SearchOutcome::NodeLimit => debug!("stopped at expansion limit"),
        }
        info!("Expanded {} positions", self.expanded);

        Ok(SearchReport {
            outcome,
            expanded: self.expanded,
        })
    }

    fn search(&mut self, initial: &Rc<Configuration>) -> Result<SearchOutcome> {
        self.visited.insert(Rc::clone(initial), Path::new());
        if self.board.is_goal()? {
            return Ok(SearchOutcome::Solved(Path::new()));
        }
        self.push_successors(initial, 0)?;

        while let Some((mv, origin)) = self.frontier.pop() {
            self.board.restore(&origin)?;
            self.board.apply_move(mv)?;
            let state = self.board.snapshot();
            if self.visited.contains_key(&state) {
                continue;
            }
            if self.config.max_expansions.is_some_and(|max| self.expanded >= max) {
                return Ok(SearchOutcome::NodeLimit);
            }

            // every origin was recorded before anything was queued from it
            let mut path = self.visited[origin.as_ref()].clone();
            path.push(mv);
            self.expanded += 1;
            trace!("#{} {mv} -> {state}", self.expanded);

            if self.board.is_goal()? {
                return Ok(SearchOutcome::Solved(path));
            }

            let depth = path.len();
            let state = Rc::new(state);
            self.visited.insert(Rc::clone(&state), path);

            if self.config.progress_interval > 0 && self.expanded % self.config.progress_interval == 0 {
                debug!(
                    "{} positions expanded, {} queued",
                    self.expanded,
                    self.frontier.len()
                );
            }

            self.push_successors(&state, depth)?;
        }

        Ok(SearchOutcome::Exhausted)
    }

    /// Queues every legal move from the board's current configuration, which must equal `origin`.
    fn push_successors(&mut self, origin: &Rc<Configuration>, depth: usize) -> Result<()> {
        let g = STEP_COST * depth as i32 + EXPANSION_COST;
        for mv in self.board.all_legal_moves() {
            let h = heuristic(self.board, mv, origin)?;
            self.frontier.push((mv, Rc::clone(origin)), g + h);
        }
        Ok(())
    }
}

pub fn solve(board: &mut Board, config: SolverConfig) -> Result<SearchReport> {
    Solver::new(board, config).solve()
}
