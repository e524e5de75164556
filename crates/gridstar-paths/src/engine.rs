//! The A* driver.
//!
//! A [`SearchEngine`] owns all per-search state (node table, frontier, closed
//! set) and borrows the grid read-only, so independent engines can search
//! the same grid concurrently. Each engine runs at most one search; build a
//! new one for the next query.

use gridstar_core::{Cell, ObstacleGrid};
use log::{debug, trace};

use crate::cancel::CancelToken;
use crate::closed::ClosedSet;
use crate::config::SearchConfig;
use crate::distance::step_cost;
use crate::error::{InvalidInputReason, SearchError};
use crate::frontier::Frontier;
use crate::heuristic::{Heuristic, HeuristicKind};
use crate::neighbors::Neighbors;
use crate::node::{NodeState, NodeTable};
use crate::path::{SearchResult, reconstruct_path};

/// Lifecycle of a search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SearchState {
    Running,
    Succeeded,
    Failed,
}

/// Counters collected while searching.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells moved into the closed set.
    pub expansions: usize,
    /// Successful vertex updates (a cheaper path to a cell was found).
    pub relaxations: usize,
    /// Largest frontier size seen.
    pub frontier_peak: usize,
}

/// Validate `start` and `goal` against `grid` and prepare a search with the
/// default configuration.
pub fn build_search(
    grid: &ObstacleGrid,
    start: Cell,
    goal: Cell,
) -> Result<SearchEngine<'_>, SearchError> {
    SearchEngine::new(grid, start, goal, SearchConfig::default())
}

/// Run a default search from `start` to `goal`.
pub fn find_path(grid: &ObstacleGrid, start: Cell, goal: Cell) -> Result<SearchResult, SearchError> {
    build_search(grid, start, goal)?.run()
}

/// One A* search from `start` to `goal` over a borrowed grid.
pub struct SearchEngine<'g, H = HeuristicKind> {
    grid: &'g ObstacleGrid,
    start: Cell,
    goal: Cell,
    heuristic: H,
    config: SearchConfig,
    cancel: Option<CancelToken>,
    state: SearchState,
    nodes: NodeTable,
    frontier: Frontier,
    closed: ClosedSet,
    neighbors: Neighbors,
    stats: SearchStats,
    result: Option<SearchResult>,
}

impl<'g> SearchEngine<'g, HeuristicKind> {
    /// Validate the endpoints and prepare a search using `config`, including
    /// its heuristic.
    ///
    /// Fails with [`SearchError::InvalidInput`] if the start or goal is out
    /// of bounds or blocked.
    pub fn new(
        grid: &'g ObstacleGrid,
        start: Cell,
        goal: Cell,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        validate(grid, start, goal)?;
        let heuristic = config.heuristic;
        Ok(Self::prepare(grid, start, goal, heuristic, config, None))
    }
}

impl<'g, H: Heuristic> SearchEngine<'g, H> {
    fn prepare(
        grid: &'g ObstacleGrid,
        start: Cell,
        goal: Cell,
        heuristic: H,
        config: SearchConfig,
        cancel: Option<CancelToken>,
    ) -> Self {
        let mut nodes = NodeTable::new(grid.dims());
        let mut frontier = Frontier::new(config.tie_break);
        let root = NodeState::root(heuristic.estimate(start, goal));
        nodes.insert(start, root);
        frontier.insert(start, &root);

        Self {
            grid,
            start,
            goal,
            heuristic,
            config,
            cancel,
            state: SearchState::Running,
            nodes,
            frontier,
            closed: ClosedSet::new(),
            neighbors: Neighbors::new(),
            stats: SearchStats {
                frontier_peak: 1,
                ..SearchStats::default()
            },
            result: None,
        }
    }

    /// Use a different heuristic. Restarts the search from scratch.
    pub fn with_heuristic<H2: Heuristic>(self, heuristic: H2) -> SearchEngine<'g, H2> {
        SearchEngine::prepare(
            self.grid,
            self.start,
            self.goal,
            heuristic,
            self.config,
            self.cancel,
        )
    }

    /// Use a different configuration. The engine keeps its current
    /// heuristic; build with [`SearchEngine::new`] to take the heuristic from
    /// the configuration. Restarts the search from scratch.
    pub fn with_config(self, config: SearchConfig) -> Self {
        Self::prepare(
            self.grid,
            self.start,
            self.goal,
            self.heuristic,
            config,
            self.cancel,
        )
    }

    /// Stop the search with [`SearchError::Cancelled`] once `token` is
    /// cancelled. Checked before every expansion.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Run until the goal is reached or the frontier is exhausted.
    pub fn run(&mut self) -> Result<SearchResult, SearchError> {
        debug!(
            "[astar] search {} -> {} on {} grid",
            self.start,
            self.goal,
            self.grid.dims()
        );
        while self.step()? == SearchState::Running {}
        debug!(
            "[astar] {:?} after {} expansions, {} relaxations, frontier peak {}",
            self.state, self.stats.expansions, self.stats.relaxations, self.stats.frontier_peak
        );
        Ok(self.result.clone().unwrap_or(SearchResult::NotFound))
    }

    /// Perform one expansion and return the resulting state.
    ///
    /// Once the search has finished this is a no-op returning the final
    /// state. Cancellation and the expansion limit are reported as errors
    /// and leave the state `Running`.
    pub fn step(&mut self) -> Result<SearchState, SearchError> {
        if self.state != SearchState::Running {
            return Ok(self.state);
        }
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            debug!("[astar] cancelled after {} expansions", self.stats.expansions);
            return Err(SearchError::Cancelled);
        }

        let Some(s) = self.frontier.peek().map(|e| e.cell) else {
            debug!("[astar] frontier exhausted, no path to {}", self.goal);
            self.state = SearchState::Failed;
            self.result = Some(SearchResult::NotFound);
            return Ok(self.state);
        };

        if s == self.goal {
            self.frontier.pop();
            let path = reconstruct_path(&self.nodes, self.start, self.goal)?;
            let cost = self.nodes.get(self.goal).map_or(0.0, NodeState::g);
            self.state = SearchState::Succeeded;
            self.result = Some(SearchResult::Found { path, cost });
            return Ok(self.state);
        }

        // Reaching the goal is not an expansion.
        if let Some(limit) = self.config.max_expansions {
            if self.stats.expansions >= limit {
                debug!("[astar] expansion limit {limit} reached");
                return Err(SearchError::ExpansionLimit { limit });
            }
        }

        let Some(current) = self.frontier.pop() else {
            return Ok(self.state);
        };
        self.closed.insert(s);
        self.stats.expansions += 1;
        let s_g = self.nodes.get(s).map_or(f64::INFINITY, NodeState::g);
        trace!("[astar] expand {s} g={s_g:.3} f={:.3}", current.f);

        let mut neighbors = std::mem::take(&mut self.neighbors);
        for &sp in neighbors.free(s, self.grid) {
            if !self.closed.contains(sp) {
                self.relax(s, s_g, sp);
            }
        }
        self.neighbors = neighbors;
        self.stats.frontier_peak = self.frontier.peak_len();

        Ok(SearchState::Running)
    }

    /// Vertex update: offer `sp` the path through `s`.
    fn relax(&mut self, s: Cell, s_g: f64, sp: Cell) {
        if s_g.is_infinite() {
            return;
        }
        let tentative = s_g + step_cost(s, sp);
        let Some(node) = self.nodes.entry(sp) else {
            return;
        };
        if !node.is_g_infinite() && tentative >= node.g() {
            return;
        }

        node.update(tentative, self.heuristic.estimate(sp, self.goal), s);
        self.frontier.remove(sp);
        self.frontier.insert(sp, node);
        self.stats.relaxations += 1;
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The outcome, once the search has finished.
    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    /// Cells expanded so far, in expansion order.
    pub fn closed_cells(&self) -> &ClosedSet {
        &self.closed
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn grid(&self) -> &'g ObstacleGrid {
        self.grid
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }
}

fn validate(grid: &ObstacleGrid, start: Cell, goal: Cell) -> Result<(), SearchError> {
    let reject = |reason, cell| -> Result<(), SearchError> {
        Err(SearchError::InvalidInput { reason, cell })
    };
    if !grid.contains(start) {
        return reject(InvalidInputReason::StartOutOfBounds, start);
    }
    if !grid.contains(goal) {
        return reject(InvalidInputReason::GoalOutOfBounds, goal);
    }
    if grid.is_blocked(start) {
        return reject(InvalidInputReason::StartBlocked, start);
    }
    if grid.is_blocked(goal) {
        return reject(InvalidInputReason::GoalBlocked, goal);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TieBreak;
    use crate::heuristic::{Euclidean, Octile};
    use std::f64::consts::SQRT_2;

    const EPS: f64 = 1e-9;

    fn assert_valid_path(grid: &ObstacleGrid, path: &[Cell], start: Cell, goal: Cell) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a step", w[0], w[1]);
        }
        for &c in path {
            assert!(grid.is_free(c), "path crosses obstacle at {c}");
        }
    }

    fn path_cost(path: &[Cell]) -> f64 {
        path.windows(2).map(|w| step_cost(w[0], w[1])).sum()
    }

    #[test]
    fn open_3x3_diagonal() {
        let grid = ObstacleGrid::new(3, 3).unwrap();
        let result = find_path(&grid, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
        let SearchResult::Found { path, cost } = result else {
            panic!("expected a path");
        };
        assert_eq!(path, vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)]);
        assert!((cost - 2.0 * SQRT_2).abs() < EPS);
    }

    #[test]
    fn start_equals_goal() {
        let grid = ObstacleGrid::new(4, 4).unwrap();
        let mut search = build_search(&grid, Cell::new(2, 1), Cell::new(2, 1)).unwrap();
        let result = search.run().unwrap();
        assert_eq!(
            result,
            SearchResult::Found {
                path: vec![Cell::new(2, 1)],
                cost: 0.0
            }
        );
        assert_eq!(search.state(), SearchState::Succeeded);
        assert!(search.closed_cells().is_empty());
    }

    #[test]
    fn walled_goal_is_not_found() {
        let grid = ObstacleGrid::parse(
            "\
......
.###..
.#.#..
.###..
......",
        )
        .unwrap();
        let mut search = build_search(&grid, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
        assert_eq!(search.run().unwrap(), SearchResult::NotFound);
        assert_eq!(search.state(), SearchState::Failed);
        // every reachable free cell outside the ring was expanded exactly once
        assert_eq!(search.closed_cells().len(), 30 - 8 - 1);
    }

    #[test]
    fn invalid_endpoints() {
        let grid = ObstacleGrid::parse("..#\n...").unwrap();
        let reason = |start, goal| match build_search(&grid, start, goal) {
            Err(SearchError::InvalidInput { reason, .. }) => Some(reason),
            _ => None,
        };
        assert_eq!(
            reason(Cell::new(2, 0), Cell::ORIGIN),
            Some(InvalidInputReason::StartOutOfBounds)
        );
        assert_eq!(
            reason(Cell::ORIGIN, Cell::new(0, 3)),
            Some(InvalidInputReason::GoalOutOfBounds)
        );
        assert_eq!(
            reason(Cell::new(0, 2), Cell::ORIGIN),
            Some(InvalidInputReason::StartBlocked)
        );
        assert_eq!(
            reason(Cell::ORIGIN, Cell::new(0, 2)),
            Some(InvalidInputReason::GoalBlocked)
        );
        assert_eq!(reason(Cell::ORIGIN, Cell::new(1, 2)), None);
    }

    #[test]
    fn detours_around_wall() {
        let grid = ObstacleGrid::parse(
            "\
.....
####.
.....",
        )
        .unwrap();
        let (start, goal) = (Cell::new(0, 0), Cell::new(2, 0));
        let mut search = build_search(&grid, start, goal)
            .unwrap()
            .with_heuristic(Octile::admissible());
        let result = search.run().unwrap();
        let path = result.path().unwrap();
        assert_valid_path(&grid, path, start, goal);
        // 3 straight, diagonal through the gap and back, 3 straight
        let expected = 6.0 + 2.0 * SQRT_2;
        assert!((result.cost().unwrap() - expected).abs() < EPS);
        assert!((path_cost(path) - expected).abs() < EPS);
    }

    #[test]
    fn step_by_step_state_machine() {
        let grid = ObstacleGrid::new(1, 3).unwrap();
        let mut search = build_search(&grid, Cell::new(0, 0), Cell::new(0, 2)).unwrap();
        assert_eq!(search.state(), SearchState::Running);
        assert!(search.frontier().contains(Cell::new(0, 0)));
        assert_eq!(search.step().unwrap(), SearchState::Running);
        assert!(search.closed_cells().contains(Cell::new(0, 0)));
        assert!(search.frontier().contains(Cell::new(0, 1)));
        assert_eq!(search.step().unwrap(), SearchState::Running);
        assert_eq!(search.step().unwrap(), SearchState::Succeeded);
        // finished engines stay finished
        assert_eq!(search.step().unwrap(), SearchState::Succeeded);
        assert_eq!(search.result().and_then(SearchResult::cost), Some(2.0));
        assert_eq!(search.nodes().get(Cell::new(0, 2)).unwrap().parent(), Some(Cell::new(0, 1)));
    }

    #[test]
    fn closed_cells_expanded_once() {
        let grid = ObstacleGrid::parse(
            "\
........
..####..
.....#..
.###.#..
........",
        )
        .unwrap();
        let mut search = build_search(&grid, Cell::new(2, 2), Cell::new(0, 7)).unwrap();
        search.run().unwrap();
        let closed = search.closed_cells();
        assert_eq!(closed.as_set().len(), closed.len());
        assert_eq!(search.stats().expansions, closed.len());
        assert!(closed.iter().all(|&c| grid.is_free(c)));
    }

    #[test]
    fn deterministic() {
        let grid = ObstacleGrid::parse(
            "\
..........
...###....
.....#....
..#..#..#.
..#.......",
        )
        .unwrap();
        for tie in [TieBreak::Fifo, TieBreak::LowerHeuristic] {
            let cfg = SearchConfig::default().with_tie_break(tie);
            let run = || {
                SearchEngine::new(&grid, Cell::new(4, 0), Cell::new(0, 9), cfg.clone())
                    .unwrap()
                    .run()
                    .unwrap()
            };
            assert_eq!(run(), run());
        }
    }

    #[test]
    fn admissible_heuristic_matches_dijkstra() {
        let grid = ObstacleGrid::parse(
            "\
.#........
.#.######.
.#.#....#.
...#.##.#.
####..#...
......#.#.",
        )
        .unwrap();
        let (start, goal) = (Cell::new(0, 0), Cell::new(2, 4));
        let cost_with = |kind| {
            let cfg = SearchConfig::default().with_heuristic(kind);
            SearchEngine::new(&grid, start, goal, cfg)
                .unwrap()
                .run()
                .unwrap()
                .cost()
                .unwrap()
        };
        let optimal = cost_with(HeuristicKind::Zero);
        let octile = cost_with(HeuristicKind::Octile { scale: 1.0 });
        let euclid = cost_with(HeuristicKind::Euclidean { scale: 1.0 });
        assert!((optimal - octile).abs() < EPS);
        assert!((optimal - euclid).abs() < EPS);
        // the inflated default may be longer, but never by more than its scale
        let default = cost_with(HeuristicKind::default());
        assert!(default >= optimal - EPS);
        assert!(default <= 1.4 * optimal + EPS);
    }

    #[test]
    fn closure_heuristic() {
        let grid = ObstacleGrid::new(5, 5).unwrap();
        let mut search = build_search(&grid, Cell::new(0, 0), Cell::new(4, 2))
            .unwrap()
            .with_heuristic(|_: Cell, _: Cell| 0.0);
        let cost = search.run().unwrap().cost().unwrap();
        assert!((cost - (2.0 * SQRT_2 + 2.0)).abs() < EPS);
    }

    #[test]
    fn cancelled_before_first_expansion() {
        let grid = ObstacleGrid::new(50, 50).unwrap();
        let token = CancelToken::new();
        let mut search = build_search(&grid, Cell::ORIGIN, Cell::new(49, 49))
            .unwrap()
            .with_cancel_token(token.clone());
        token.cancel();
        assert_eq!(search.run(), Err(SearchError::Cancelled));
        assert_eq!(search.state(), SearchState::Running);
        assert_eq!(search.stats().expansions, 0);
    }

    #[test]
    fn expansion_limit() {
        let grid = ObstacleGrid::new(30, 30).unwrap();
        let cfg = SearchConfig::default().with_max_expansions(5);
        let mut search = build_search(&grid, Cell::ORIGIN, Cell::new(29, 29))
            .unwrap()
            .with_heuristic(Euclidean)
            .with_config(cfg);
        assert_eq!(search.run(), Err(SearchError::ExpansionLimit { limit: 5 }));
        assert_eq!(search.closed_cells().len(), 5);
    }

    #[test]
    fn expansion_limit_counts_only_expansions() {
        // (0,0) -> (0,2) closes (0,0) and (0,1); reaching the goal is free
        let grid = ObstacleGrid::new(1, 3).unwrap();
        let cfg = SearchConfig::default().with_max_expansions(2);
        let mut search = SearchEngine::new(&grid, Cell::ORIGIN, Cell::new(0, 2), cfg).unwrap();
        let result = search.run().unwrap();
        assert_eq!(result.path().map(<[Cell]>::len), Some(3));
        assert_eq!(search.stats().expansions, 2);

        let cfg = SearchConfig::default().with_max_expansions(0);
        let mut search = SearchEngine::new(&grid, Cell::new(0, 1), Cell::new(0, 1), cfg).unwrap();
        assert_eq!(
            search.run(),
            Ok(SearchResult::Found {
                path: vec![Cell::new(0, 1)],
                cost: 0.0
            })
        );
    }

    #[test]
    fn expansion_limit_leaves_search_resumable() {
        let grid = ObstacleGrid::new(1, 3).unwrap();
        let cfg = SearchConfig::default().with_max_expansions(1);
        let mut search = SearchEngine::new(&grid, Cell::ORIGIN, Cell::new(0, 2), cfg).unwrap();
        assert_eq!(search.step(), Ok(SearchState::Running));
        assert_eq!(search.step(), Err(SearchError::ExpansionLimit { limit: 1 }));
        assert_eq!(search.state(), SearchState::Running);
        // the blocked cell is still queued
        assert!(search.frontier().contains(Cell::new(0, 1)));
        assert_eq!(search.closed_cells().len(), 1);
    }

    #[test]
    fn concurrent_searches_share_grid() {
        let grid = ObstacleGrid::parse(
            "\
......
.####.
......",
        )
        .unwrap();
        let goals = [Cell::new(2, 0), Cell::new(2, 5), Cell::new(0, 5)];
        let costs: Vec<f64> = std::thread::scope(|scope| {
            let handles: Vec<_> = goals
                .iter()
                .map(|&goal| {
                    let grid = &grid;
                    scope.spawn(move || find_path(grid, Cell::ORIGIN, goal).unwrap().cost().unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for (cost, goal) in costs.iter().zip(goals) {
            assert_eq!(*cost, find_path(&grid, Cell::ORIGIN, goal).unwrap().cost().unwrap());
        }
    }
}
