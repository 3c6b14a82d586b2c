//! Fixed-interval pacing and cross-thread publication of the drawing.
//!
//! The interpreter itself is single-threaded and knows nothing about time.
//! [`Driver`] owns one interpreter, advances it one symbol per tick and mirrors
//! every new primitive into a [`SharedSurface`]. A display thread holding a
//! clone of that handle only ever sees whole steps: each step's write happens
//! under one lock acquisition.
//!
//! Pausing is simply not calling [`Driver::tick`]; the full run state lives in
//! the interpreter and is never lost between ticks.

use crate::error::TurtleError;
use crate::grammar::Grammar;
use crate::interpreter::{StepOutcome, TurtleConfig, TurtleInterpreter};
use crate::surface::Surface;
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Cloneable, thread-safe view of a driver's drawing.
#[derive(Clone, Debug, Default)]
pub struct SharedSurface(Arc<RwLock<Surface>>);

impl SharedSurface {
    fn new(surface: Surface) -> Self {
        Self(Arc::new(RwLock::new(surface)))
    }

    /// Runs `f` against the latest published surface.
    pub fn with<R>(&self, f: impl FnOnce(&Surface) -> R) -> R {
        let guard = self.0.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Owned copy of the latest published surface.
    pub fn snapshot(&self) -> Surface {
        self.with(Surface::clone)
    }

    fn publish(&self, f: impl FnOnce(&mut Surface)) {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

/// Paces a [`TurtleInterpreter`] at a fixed interval.
#[derive(Debug)]
pub struct Driver {
    interpreter: TurtleInterpreter,
    interval: Duration,
    shared: SharedSurface,
}

impl Driver {
    /// Tick interval of the interactive viewer.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

    pub fn new(interpreter: TurtleInterpreter) -> Self {
        let shared = SharedSurface::new(interpreter.surface().clone());
        Self {
            interpreter,
            interval: Self::DEFAULT_INTERVAL,
            shared,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn interpreter(&self) -> &TurtleInterpreter {
        &self.interpreter
    }

    /// Handle for readers on other threads.
    pub fn surface(&self) -> SharedSurface {
        self.shared.clone()
    }

    /// `(executed, total)` symbol counts of the current run.
    pub fn progress(&self) -> (usize, usize) {
        (self.interpreter.cursor(), self.interpreter.program().len())
    }

    /// Blanks the drawing and starts `program` from its first symbol.
    pub fn restart(&mut self, program: &str, config: TurtleConfig, width: u32, height: u32) {
        self.interpreter.reset(width, height);
        self.interpreter.configure(program, config);
        let blank = self.interpreter.surface().clone();
        self.shared.publish(|surface| *surface = blank);
    }

    /// Executes one symbol and publishes its primitive, if any.
    pub fn tick(&mut self) -> Result<Option<StepOutcome>, TurtleError> {
        let outcome = self.interpreter.step()?;
        if let Some(primitive) = outcome.and_then(|o| o.primitive) {
            self.shared.publish(|surface| surface.push(primitive));
        }
        Ok(outcome)
    }

    /// Ticks until the program is exhausted, sleeping `interval` between
    /// ticks. `on_step` sees every outcome as it happens.
    ///
    /// Returns the number of symbols executed by this call.
    pub fn run(&mut self, mut on_step: impl FnMut(&StepOutcome)) -> Result<usize, TurtleError> {
        let mut executed = 0;
        while let Some(outcome) = self.tick()? {
            executed += 1;
            on_step(&outcome);
            if !self.interpreter.is_done() && !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }
        let (_, total) = self.progress();
        info!(executed, total, "Turtle run finished");
        Ok(executed)
    }
}

/// Expands `grammar` on a dedicated worker thread.
///
/// Expansion cost grows with the final program length, so interactive hosts
/// should not run it on their event thread.
pub fn expand_in_background(grammar: Grammar) -> std::io::Result<JoinHandle<String>> {
    thread::Builder::new()
        .name("lsystem-expand".into())
        .spawn(move || {
            debug!(generations = grammar.generations, "Background expansion started");
            grammar.expand()
        })
}
