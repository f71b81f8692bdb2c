use sweeper_core::{Game, GameState, Position};

use crate::{
    AdvancedSolver, BasicSolver, NodeId, NullLogger, ProbableConfig, ProbableSolver, SolveMode,
    SolverError, SolverState, StateLogger, StateSnapshot,
};

/// Counters of a finished solving session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SolveSummary {
    /// Number of passes through the technique ladder.
    pub turns: usize,
    /// Flags placed.
    pub flags: usize,
    /// Tiles uncovered, guesses included.
    pub reveals: usize,
    /// Tiles uncovered without certainty.
    pub guesses: usize,
    moves_by_mode: [usize; SolveMode::ALL.len()],
}

impl SolveSummary {
    /// Returns the number of flags and reveals chosen by `mode`.
    #[must_use]
    pub fn moves(&self, mode: SolveMode) -> usize {
        self.moves_by_mode[mode.index()]
    }
}

enum Progress {
    Applied(usize),
    Won,
}

/// Plays a [`Game`] to the end.
///
/// Each turn climbs a ladder of techniques and stops at the first rung that
/// makes a move:
///
/// 1. [`BasicSolver`] flags, then its safe tiles are uncovered.
/// 2. [`AdvancedSolver::flaggable`] and [`AdvancedSolver::safe`].
/// 3. [`AdvancedSolver::solve`], counting over pairs of hints.
/// 4. The guess of [`ProbableSolver::solve`], the only move that can lose.
///
/// On a fresh board the first move uncovers the center tile.
///
/// # Examples
///
/// ```
/// use sweeper_core::{Game as _, Tile, Position};
/// use sweeper_game::Minesweeper;
/// use sweeper_solver::MinesweeperSolver;
///
/// let game = Minesweeper::from_layout("
///     ######*
///     #######
///     ######*
/// ".parse()?)?;
/// let mut solver = MinesweeperSolver::new(game)?;
/// let summary = solver.solve()?;
///
/// assert_eq!(summary.flags, 2);
/// assert_eq!(solver.game().tile(Position::new(5, 1))?, Tile::Hint(2));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct MinesweeperSolver<G, L = NullLogger> {
    game: G,
    state: SolverState,
    logger: L,
    mode: SolveMode,
    basic: BasicSolver,
    advanced: AdvancedSolver,
    probable: ProbableSolver,
    summary: SolveSummary,
}

impl<G> MinesweeperSolver<G>
where
    G: Game,
{
    /// Starts a session on `game`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::EmptyGrid`] if the game field has no tiles.
    pub fn new(game: G) -> Result<Self, SolverError> {
        Self::with_logger(game, NullLogger)
    }
}

impl<G, L> MinesweeperSolver<G, L>
where
    G: Game,
    L: StateLogger,
{
    /// Starts a session on `game` that reports every move to `logger`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::EmptyGrid`] if the game field has no tiles.
    pub fn with_logger(game: G, logger: L) -> Result<Self, SolverError> {
        let state = SolverState::new(game.field())?;
        Ok(Self {
            game,
            state,
            logger,
            mode: SolveMode::Basic,
            basic: BasicSolver::new(),
            advanced: AdvancedSolver::new(),
            probable: ProbableSolver::new(),
            summary: SolveSummary::default(),
        })
    }

    /// Replaces the tuning of the guessing step.
    #[must_use]
    pub fn with_probable_config(mut self, config: ProbableConfig) -> Self {
        self.probable = ProbableSolver::with_config(config);
        self
    }

    /// Returns the game being played.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Ends the session and returns the game.
    pub fn into_game(self) -> G {
        self.game
    }

    /// Returns the solver's knowledge of the board.
    pub fn state(&self) -> &SolverState {
        &self.state
    }

    /// Returns the counters so far.
    pub fn summary(&self) -> SolveSummary {
        self.summary
    }

    /// Plays until the game is won.
    ///
    /// After a win every tile still covered is flagged.
    ///
    /// # Errors
    ///
    /// - [`SolverError::MineRevealed`] if a guess hits a mine.
    /// - [`SolverError::NoMoveAvailable`] if nothing is covered but the game
    ///   is not won.
    /// - [`SolverError::ImpossibleConfiguration`] if the hints contradict
    ///   each other.
    pub fn solve(&mut self) -> Result<SolveSummary, SolverError> {
        let blank = self.state.graph().ids().all(|id| !self.state.graph()[id].is_hint());
        if blank {
            let center = Position::new(self.state.width() / 2, self.state.height() / 2);
            if let Some(id) = self.state.node_at(center) {
                self.mode = SolveMode::Probable;
                self.summary.guesses += 1;
                if self.apply(id, false)?.is_win() {
                    return self.finish();
                }
            }
        }

        loop {
            self.summary.turns += 1;

            self.mode = SolveMode::Basic;
            let flags = self.basic.flaggable(&self.state);
            let Progress::Applied(mut applied) = self.apply_all(flags, true)? else {
                return self.finish();
            };
            let safe = self.basic.safe(&self.state);
            match self.apply_all(safe, false)? {
                Progress::Won => return self.finish(),
                Progress::Applied(0) => {}
                Progress::Applied(_) => continue,
            }

            self.mode = SolveMode::Advanced;
            let flags = self.advanced.flaggable(&self.state)?;
            let Progress::Applied(flagged) = self.apply_all(flags, true)? else {
                return self.finish();
            };
            let safe = self.advanced.safe(&self.state);
            let Progress::Applied(revealed) = self.apply_all(safe, false)? else {
                return self.finish();
            };
            applied += flagged + revealed;
            if applied > 0 {
                continue;
            }

            self.mode = SolveMode::SetComparison;
            let deductions = self.advanced.solve(&mut self.state)?;
            let mut concluded = 0;
            for deduction in deductions {
                match self.apply_all([deduction.node], deduction.is_mine)? {
                    Progress::Won => return self.finish(),
                    Progress::Applied(n) => concluded += n,
                }
            }
            if concluded > 0 {
                continue;
            }

            self.mode = SolveMode::Probable;
            let mines_left = self.game.mines_left();
            let Some(id) = self.probable.solve(&mut self.state, mines_left)? else {
                return Err(SolverError::NoMoveAvailable);
            };
            self.summary.guesses += 1;
            if self.apply(id, false)?.is_win() {
                return self.finish();
            }
        }
    }

    fn apply_all(
        &mut self,
        ids: impl IntoIterator<Item = NodeId>,
        flag: bool,
    ) -> Result<Progress, SolverError> {
        let mut applied = 0;
        for id in ids {
            if !self.state.graph()[id].is_covered() {
                continue;
            }
            applied += 1;
            if self.apply(id, flag)?.is_win() {
                return Ok(Progress::Won);
            }
        }
        if applied > 0 {
            let action = if flag { "flagged" } else { "uncovered" };
            log::debug!("{}: {applied} tiles {action}", self.mode);
        }
        Ok(Progress::Applied(applied))
    }

    fn apply(&mut self, id: NodeId, flag: bool) -> Result<GameState, SolverError> {
        let position = self.state.position(id);
        self.state.set_selected(id);
        self.log();

        let game_state = if flag {
            self.game.toggle_flag(position)?;
            self.summary.flags += 1;
            GameState::Continue
        } else {
            self.summary.reveals += 1;
            self.game.uncover_tile(position)?
        };
        self.summary.moves_by_mode[self.mode.index()] += 1;
        self.state.update(id, self.game.field())?;
        self.log();

        if game_state.is_lose() {
            log::info!("uncovered a mine at {position}");
            return Err(SolverError::MineRevealed { position });
        }
        Ok(game_state)
    }

    fn finish(&mut self) -> Result<SolveSummary, SolverError> {
        for id in self.state.covered() {
            self.apply(id, true)?;
        }
        log::info!(
            "minefield swept in {} turns, {} reveals, {} guesses",
            self.summary.turns,
            self.summary.reveals,
            self.summary.guesses
        );
        Ok(self.summary)
    }

    fn log(&mut self) {
        let snapshot = StateSnapshot {
            mode: self.mode,
            selected: self.state.selected().map(|id| self.state.position(id)),
            state: &self.state,
        };
        self.logger.log(&snapshot);
    }
}
