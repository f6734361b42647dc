use crate::{
    algorithm::{
        bitset::TileBitset,
        collapse::collapse_cell,
        propagation::{PropagationMode, Propagator},
        selection::select_cell,
        smoothing::{SmoothingMode, smooth},
    },
    io::configuration::{
        DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_MAX_ATTEMPTS, MAX_GRID_DIMENSION,
    },
    io::error::{AlgorithmError, Result, invalid_parameter},
    spatial::{ResultGrid, TileConstraintTable, WaveGrid},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
///
/// Every random decision of a solve goes through one selector, so a fixed
/// seed replays the same sequence of cell and tile picks.
#[derive(Debug, Clone)]
pub struct RandomSelector<R = StdRng> {
    rng: R,
}

impl RandomSelector<StdRng> {
    /// Create a deterministic selector from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSelector<R> {
    /// Wrap an existing random source
    pub const fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform index below `len`, or `None` when `len` is zero
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniformly chosen element of a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let index = self.choose_index(items.len())?;
        items.get(index)
    }

    /// Uniformly chosen tile among those present in a domain
    pub fn choose_tile(&mut self, domain: &TileBitset) -> Option<usize> {
        let index = self.choose_index(domain.count())?;
        domain.iter_ones().nth(index)
    }
}

/// Hooks called while a solve runs
///
/// All methods default to doing nothing.
pub trait SolveObserver {
    /// A fresh attempt is about to start (1-based)
    fn attempt_started(&mut self, _attempt: usize, _max_attempts: usize) {}

    /// A cell was collapsed and its consequences propagated
    fn cell_collapsed(&mut self, _decided: usize, _total: usize) {}

    /// The attempt ended in a contradiction at the given cell
    fn attempt_failed(&mut self, _attempt: usize, _position: [usize; 2]) {}

    /// The smoothing pass reassigned this many cells
    fn smoothing_applied(&mut self, _reassigned: usize) {}

    /// The attempt produced a finished map
    fn solved(&mut self, _attempt: usize) {}
}

impl SolveObserver for () {}

/// Grid size, retry budget and solver modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Attempts before generation is abandoned
    pub max_attempts: usize,
    /// Seed for the random source; drawn from the thread RNG when absent
    pub seed: Option<u64>,
    /// Rules enforced during propagation
    pub propagation: PropagationMode,
    /// Post-process applied to each successful attempt
    pub smoothing: SmoothingMode,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)
    }
}

impl SolverConfig {
    /// Configuration for a grid with default attempts and modes
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            propagation: PropagationMode::Directional,
            smoothing: SmoothingMode::Relaxed,
        }
    }

    /// Use a fixed seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the retry budget
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the propagation mode
    #[must_use]
    pub const fn with_propagation(mut self, propagation: PropagationMode) -> Self {
        self.propagation = propagation;
        self
    }

    /// Set the smoothing mode
    #[must_use]
    pub const fn with_smoothing(mut self, smoothing: SmoothingMode) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Check dimensions and retry budget
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or above `MAX_GRID_DIMENSION`,
    /// or if `max_attempts` is zero
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if self.max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &self.max_attempts,
                &"at least one attempt is required",
            ));
        }

        Ok(())
    }
}

/// Wave function collapse solver with bounded restarts
///
/// Each attempt owns a fresh wave and worklist. A contradiction discards the
/// attempt entirely; there is no backtracking inside an attempt.
#[derive(Debug, Clone)]
pub struct Solver {
    table: TileConstraintTable,
    config: SolverConfig,
}

impl Solver {
    /// Create a solver for a tileset and configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(table: TileConstraintTable, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { table, config })
    }

    /// Constraint table used by every attempt
    pub const fn table(&self) -> &TileConstraintTable {
        &self.table
    }

    /// Solver configuration
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Generate a map, seeding the random source from the configuration
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::ExhaustedRetries`] when every attempt hits a
    /// contradiction, or any non-recoverable error raised by an attempt
    pub fn solve(&self) -> Result<ResultGrid> {
        self.solve_observed(&mut ())
    }

    /// Generate a map seeded from the configuration, reporting to an observer
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::ExhaustedRetries`] when every attempt hits a
    /// contradiction, or any non-recoverable error raised by an attempt
    pub fn solve_observed<O>(&self, observer: &mut O) -> Result<ResultGrid>
    where
        O: SolveObserver + ?Sized,
    {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut random = RandomSelector::new(seed);
        self.solve_with(&mut random, observer)
    }

    /// Generate a map with an injected random source and observer
    ///
    /// Returns the first successful attempt. Draws continue from the same
    /// random source across attempts, so each retry makes different choices.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::ExhaustedRetries`] after exactly
    /// `max_attempts` contradictions, or any non-recoverable error raised by
    /// an attempt
    pub fn solve_with<R, O>(&self, random: &mut RandomSelector<R>, observer: &mut O) -> Result<ResultGrid>
    where
        R: Rng,
        O: SolveObserver + ?Sized,
    {
        let max_attempts = self.config.max_attempts;
        let mut last_contradiction = None;

        for attempt in 1..=max_attempts {
            observer.attempt_started(attempt, max_attempts);

            match self.run_attempt(random, observer) {
                Ok(grid) => {
                    observer.solved(attempt);
                    return Ok(grid);
                }
                Err(AlgorithmError::Contradiction { position }) => {
                    observer.attempt_failed(attempt, position);
                    last_contradiction = Some(position);
                }
                Err(error) => return Err(error),
            }
        }

        Err(AlgorithmError::ExhaustedRetries {
            attempts: max_attempts,
            last_contradiction,
        })
    }

    /// Run a single attempt from a fresh wave
    ///
    /// Selects and collapses cells until none is undecided, then smooths and
    /// extracts the map.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::Contradiction`] if any domain empties, or
    /// [`AlgorithmError::IncompleteGrid`] if extraction finds an undecided cell
    pub fn run_attempt<R, O>(&self, random: &mut RandomSelector<R>, observer: &mut O) -> Result<ResultGrid>
    where
        R: Rng,
        O: SolveObserver + ?Sized,
    {
        let mut wave = WaveGrid::new(self.config.height, self.config.width, self.table.len());
        let mut propagator = Propagator::new(self.config.propagation);

        // Single-tile tilesets start fully decided; their rule still has to hold
        if wave.decided_cells() > 0 {
            for ([row, col], domain) in wave.cells() {
                if domain.count() == 1 {
                    propagator.push(row, col);
                }
            }
            propagator.propagate(&mut wave, &self.table)?;
        }

        while let Some(position) = select_cell(&wave, random)? {
            collapse_cell(&mut wave, &mut propagator, &self.table, random, position)?;
            observer.cell_collapsed(wave.decided_cells(), wave.cell_count());
        }

        if self.config.smoothing != SmoothingMode::Off {
            let reassigned = smooth(&mut wave, &self.table, self.config.smoothing);
            observer.smoothing_applied(reassigned);
        }

        wave.to_result(&self.table)
    }
}
