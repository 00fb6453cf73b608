use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use board::{Board, OutOfBounds};
use clock::TickerHandle;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

pub mod board;
pub mod clock;
pub mod pos;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,

    /// Per-cell probability of starting `Alive` in a randomized board.
    pub alive_probability: f64,

    /// Fixed tick cadence in milliseconds.
    pub tick_millis: u64,

    /// Whether the simulation starts playing on construction.
    pub autostart: bool,

    /// Seed for the board RNG; random boards are reproducible when set.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cols: 50,
            alive_probability: 0.30,
            tick_millis: 250,
            autostart: true,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

/// Everything a presenter needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub board: Board,

    /// Completed transitions since the last clear.
    pub generation: u64,

    /// Whether a periodic tick is currently scheduled.
    pub running: bool,

    /// True only right after an explicit clear or an extinction auto-clear,
    /// until the next committed tick or toggle producing a living cell.
    pub cleared: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The advanced board was committed and the generation count moved.
    Advanced,

    /// The advanced board had no living cells; the state auto-cleared
    /// instead of committing it.
    Extinct,
}

impl SimulationState {
    /// One transition of the playback state machine.
    ///
    /// The next board is computed in full before anything is committed, so
    /// an extinct generation never replaces the board; it triggers the clear
    /// transition instead.
    pub fn step(&mut self) -> StepOutcome {
        let next_board = self.board.advance();

        if next_board.living_count() == 0 {
            self.clear();
            StepOutcome::Extinct
        } else {
            self.board = next_board;
            self.generation += 1;
            self.cleared = false;
            StepOutcome::Advanced
        }
    }

    pub fn clear(&mut self) {
        self.board = Board::new_cleared(self.board.rows(), self.board.cols());
        self.generation = 0;
        self.running = false;
        self.cleared = true;
    }
}

/// A running Game of Life instance: one board plus the playback clock
/// driving it.
///
/// User intents and scheduled ticks serialize through one `RwLock`;
/// whichever acquires it first applies first and the other observes the
/// result.
pub struct Simulation {
    state: Arc<RwLock<SimulationState>>,
    config: SimulationConfig,
    rng: StdRng,
    ticker: Option<TickerHandle>,
}

impl Simulation {
    pub fn new(mut config: SimulationConfig) -> Self {
        // A config file can carry any number; random_bool requires [0, 1].
        config.alive_probability = if config.alive_probability.is_nan() {
            0.0
        } else {
            config.alive_probability.clamp(0.0, 1.0)
        };

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let board = Board::new_random(
            config.rows,
            config.cols,
            config.alive_probability,
            &mut rng,
        );

        let state = SimulationState {
            board,
            generation: 0,
            running: false,
            cleared: false,
        };

        let mut simulation = Self {
            state: Arc::new(RwLock::new(state)),
            config,
            rng,
            ticker: None,
        };

        if simulation.config.autostart {
            simulation.play();
        }

        simulation
    }

    /// Start the periodic tick. No-op when already running.
    pub fn play(&mut self) {
        let mut state = self.state.write().unwrap();

        if state.running {
            return;
        }
        state.running = true;

        // A leftover handle from an extinction self-stop is inert.
        if let Some(stale) = self.ticker.take() {
            stale.stop();
        }

        self.ticker = Some(TickerHandle::start(
            self.state.clone(),
            self.config.tick_interval(),
        ));
    }

    /// Cancel the periodic tick. Idempotent: pausing a stopped simulation
    /// changes nothing.
    pub fn pause(&mut self) {
        let mut state = self.state.write().unwrap();

        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        state.running = false;
    }

    /// Stop the clock and reset to an all-dead board with generation 0.
    pub fn clear(&mut self) {
        let mut state = self.state.write().unwrap();

        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        state.clear();
    }

    /// Flip one cell. Valid whether running or paused; never touches the
    /// generation count or the clock.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), OutOfBounds> {
        let mut state = self.state.write().unwrap();

        state.board.toggle([row, col])?;
        if state.board.living_count() > 0 {
            state.cleared = false;
        }

        Ok(())
    }

    /// Run one transition by hand, same as a scheduled tick would.
    pub fn step(&mut self) -> StepOutcome {
        let outcome = self.state.write().unwrap().step();

        if outcome == StepOutcome::Extinct {
            // The state machine already stopped; drop the clock with it.
            if let Some(ticker) = self.ticker.take() {
                ticker.stop();
            }
        }

        outcome
    }

    /// Replace the board with a freshly randomized one at the configured
    /// density. Resets the generation count; playback state is untouched.
    pub fn randomize(&mut self) {
        let mut state = self.state.write().unwrap();

        state.board = Board::new_random(
            self.config.rows,
            self.config.cols,
            self.config.alive_probability,
            &mut self.rng,
        );
        state.generation = 0;
        state.cleared = false;
    }

    pub fn snapshot(&self) -> SimulationState {
        self.state.read().unwrap().clone()
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        // A detached ticker would keep stepping the shared state for the
        // rest of the process.
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }
}
