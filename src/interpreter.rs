//! Step-by-step interpreter that turns an expanded L-System string into drawing
//! primitives.
//!
//! The entry point is [`TurtleInterpreter`]. Load a program with
//! [`TurtleInterpreter::configure`], then call [`TurtleInterpreter::step`] once
//! per tick until it returns `Ok(None)`. The accumulated [`Surface`] can be read
//! between any two steps, which is what makes progressive drawing possible.
//!
//! # Lifecycle
//!
//! | Phase     | Meaning                                          |
//! |-----------|--------------------------------------------------|
//! | `Idle`    | No program has been loaded yet.                  |
//! | `Ready`   | Program loaded, nothing executed.                |
//! | `Running` | Some, but not all, symbols executed.             |
//! | `Done`    | Cursor at the end; further steps are no-ops.     |
//!
//! [`configure`](TurtleInterpreter::configure) always returns to `Ready` (or
//! straight to `Done` for an empty program).

use crate::error::{ConfigError, TurtleError};
use crate::surface::{Primitive, Surface};
use crate::turtle::{Precision, TurtleOp, TurtleState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Fixed parameters of one interpretation run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleConfig {
    /// Degrees added (`+`) or subtracted (`-`) per turn symbol.
    pub turn_angle: f64,
    /// Distance covered by one forward move.
    pub step_length: f64,
    /// Whether positions snap to whole units after each move.
    #[serde(default)]
    pub precision: Precision,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            turn_angle: 90.0,
            step_length: 10.0,
            precision: Precision::Pixel,
        }
    }
}

impl TurtleConfig {
    /// Validates and builds a configuration with [`Precision::Pixel`].
    pub fn new(turn_angle: f64, step_length: f64) -> Result<Self, ConfigError> {
        if !turn_angle.is_finite() {
            return Err(ConfigError::TurnAngle(turn_angle));
        }
        if !step_length.is_finite() || step_length <= 0.0 {
            return Err(ConfigError::StepLength(step_length));
        }
        Ok(Self {
            turn_angle,
            step_length,
            precision: Precision::Pixel,
        })
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Radius of the circle dropped by a marker symbol.
    pub fn marker_radius(&self) -> f64 {
        self.step_length / 4.0
    }
}

/// Where the interpreter is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Ready,
    Running,
    Done,
}

/// Result of executing one symbol.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Index of the executed symbol in the program.
    pub index: usize,
    pub symbol: char,
    /// The primitive appended to the surface, if the symbol draws.
    pub primitive: Option<Primitive>,
    /// Turtle state after the symbol took effect.
    pub turtle: TurtleState,
}

/// Interprets an L-System string one symbol at a time.
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: TurtleConfig,
    program: Vec<char>,
    loaded: bool,
    cursor: usize,
    turtle: TurtleState,
    stack: Vec<TurtleState>,
    surface: Surface,
}

impl Default for TurtleInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurtleInterpreter {
    /// Creates an idle interpreter that understands the standard symbols
    /// (`F G 0 1 x + - [ ] *`) and draws on a default-sized surface.
    pub fn new() -> Self {
        let mut interpreter = Self {
            op_map: HashMap::new(),
            config: TurtleConfig::default(),
            program: Vec::new(),
            loaded: false,
            cursor: 0,
            turtle: TurtleState::default(),
            stack: Vec::new(),
            surface: Surface::default(),
        };
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    ///
    /// Symbols missing from `map` are treated as [`TurtleOp::Ignore`].
    pub fn with_map(mut self, map: HashMap<char, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// Registers the fixed, case-sensitive symbol table from [`TurtleOp::STANDARD`].
    pub fn populate_standard_symbols(&mut self) {
        for (symbol, op) in TurtleOp::STANDARD {
            self.set_op(symbol, op);
        }
    }

    /// The operation a symbol maps to. Unmapped symbols are ignored.
    pub fn op_for(&self, symbol: char) -> TurtleOp {
        self.op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }

    /// Loads a program and its run parameters.
    ///
    /// Cursor, turtle and save stack go back to their initial values regardless
    /// of the previous phase. The surface is left alone; call
    /// [`reset`](Self::reset) first to start from a blank drawing.
    pub fn configure(&mut self, program: &str, config: TurtleConfig) {
        self.program = program.chars().collect();
        self.config = config;
        self.loaded = true;
        self.rewind();
        debug!(
            program_len = self.program.len(),
            turn_angle = config.turn_angle,
            step_length = config.step_length,
            "Configured turtle run"
        );
    }

    /// Blanks the surface at the given size and returns the turtle to the
    /// centre, facing up, with an empty stack and the cursor at 0.
    ///
    /// The loaded program and parameters are kept, so calling this mid-run is
    /// an explicit restart.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.surface.reset(width, height);
        self.rewind();
        debug!(width, height, "Reset turtle surface");
    }

    fn rewind(&mut self) {
        self.cursor = 0;
        self.turtle = TurtleState::default();
        self.stack.clear();
    }

    /// Executes the symbol under the cursor.
    ///
    /// Returns `Ok(None)` once the program is exhausted. On
    /// [`TurtleError::StackUnderflow`] nothing is changed: the cursor stays on
    /// the offending `]` and the turtle keeps its last valid state.
    pub fn step(&mut self) -> Result<Option<StepOutcome>, TurtleError> {
        if !self.loaded {
            return Err(TurtleError::NotConfigured);
        }
        let Some(&symbol) = self.program.get(self.cursor) else {
            return Ok(None);
        };
        let index = self.cursor;

        let primitive = match self.op_for(symbol) {
            TurtleOp::Forward => {
                let from = self.turtle.position;
                let to = self
                    .config
                    .precision
                    .apply(self.turtle.ahead(self.config.step_length));
                self.turtle.position = to;
                Some(Primitive::Segment { from, to })
            }
            TurtleOp::Turn(sign) => {
                self.turtle.turn(self.config.turn_angle * sign);
                None
            }
            TurtleOp::Marker => Some(Primitive::Circle {
                center: self.turtle.position,
                radius: self.config.marker_radius(),
            }),
            TurtleOp::Push => {
                self.stack.push(self.turtle);
                None
            }
            TurtleOp::Pop => match self.stack.pop() {
                Some(saved) => {
                    self.turtle = saved;
                    None
                }
                None => {
                    warn!(cursor = index, "Restore without matching save");
                    return Err(TurtleError::StackUnderflow { cursor: index });
                }
            },
            TurtleOp::Ignore => None,
        };

        if let Some(primitive) = primitive {
            self.surface.push(primitive);
        }
        self.cursor += 1;

        trace!(
            index,
            %symbol,
            x = self.turtle.position.x,
            y = self.turtle.position.y,
            heading = self.turtle.heading,
            depth = self.stack.len(),
            "Turtle step"
        );

        Ok(Some(StepOutcome {
            index,
            symbol,
            primitive,
            turtle: self.turtle,
        }))
    }

    /// Steps until the program is exhausted, returning how many primitives
    /// were drawn along the way.
    pub fn run_to_end(&mut self) -> Result<usize, TurtleError> {
        let mut drawn = 0;
        while let Some(outcome) = self.step()? {
            if outcome.primitive.is_some() {
                drawn += 1;
            }
        }
        Ok(drawn)
    }

    pub fn phase(&self) -> Phase {
        if !self.loaded {
            Phase::Idle
        } else if self.cursor == self.program.len() {
            Phase::Done
        } else if self.cursor == 0 {
            Phase::Ready
        } else {
            Phase::Running
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase() == Phase::Done
    }

    /// Index of the next symbol to execute.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn program(&self) -> &[char] {
        &self.program
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    pub fn turtle(&self) -> &TurtleState {
        &self.turtle
    }

    /// Number of saved states currently on the stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Everything drawn since the last [`reset`](Self::reset).
    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn loaded(program: &str) -> TurtleInterpreter {
        let mut interpreter = TurtleInterpreter::new();
        interpreter.configure(program, TurtleConfig::new(45.0, 10.0).unwrap());
        interpreter
    }

    #[test]
    fn config_rejects_bad_numbers() {
        assert!(matches!(
            TurtleConfig::new(f64::NAN, 10.0),
            Err(ConfigError::TurnAngle(_))
        ));
        assert!(matches!(
            TurtleConfig::new(f64::INFINITY, 10.0),
            Err(ConfigError::TurnAngle(_))
        ));
        assert_eq!(
            TurtleConfig::new(90.0, 0.0),
            Err(ConfigError::StepLength(0.0))
        );
        assert_eq!(
            TurtleConfig::new(90.0, -3.0),
            Err(ConfigError::StepLength(-3.0))
        );
        assert_eq!(TurtleConfig::new(-30.0, 4.0).unwrap().marker_radius(), 1.0);
    }

    #[test]
    fn phases_follow_the_cursor() {
        let mut interpreter = TurtleInterpreter::new();
        assert_eq!(interpreter.phase(), Phase::Idle);
        assert_eq!(interpreter.step(), Err(TurtleError::NotConfigured));

        interpreter.configure("F+", TurtleConfig::default());
        assert_eq!(interpreter.phase(), Phase::Ready);

        interpreter.step().unwrap();
        assert_eq!(interpreter.phase(), Phase::Running);

        interpreter.step().unwrap();
        assert_eq!(interpreter.phase(), Phase::Done);

        assert_eq!(interpreter.step(), Ok(None));
        assert_eq!(interpreter.cursor(), 2);
    }

    #[test]
    fn empty_program_is_immediately_done() {
        let mut interpreter = loaded("");
        assert_eq!(interpreter.phase(), Phase::Done);
        assert_eq!(interpreter.step(), Ok(None));
    }

    #[test]
    fn forward_moves_up_and_rounds() {
        let mut interpreter = loaded("+F");
        interpreter.run_to_end().unwrap();
        // Heading 135°: (-7.07, -7.07) snaps to (-7, -7).
        assert_eq!(interpreter.turtle().position, DVec2::new(-7.0, -7.0));
        assert_eq!(interpreter.turtle().heading, 135.0);
    }

    #[test]
    fn exact_precision_keeps_fractions() {
        let mut interpreter = TurtleInterpreter::new();
        let config = TurtleConfig::new(45.0, 10.0)
            .unwrap()
            .with_precision(Precision::Exact);
        interpreter.configure("+F", config);
        interpreter.run_to_end().unwrap();
        let p = interpreter.turtle().position;
        assert!((p.x + 50f64.sqrt()).abs() < 1e-9);
        assert!((p.y + 50f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn marker_uses_quarter_step_radius() {
        let mut interpreter = loaded("*");
        let outcome = interpreter.step().unwrap().unwrap();
        assert_eq!(
            outcome.primitive,
            Some(Primitive::Circle {
                center: DVec2::ZERO,
                radius: 2.5
            })
        );
        assert_eq!(interpreter.turtle(), &TurtleState::default());
    }

    #[test]
    fn custom_ops_extend_the_table() {
        let mut interpreter = loaded("A");
        interpreter.set_op('A', TurtleOp::Forward);
        let outcome = interpreter.step().unwrap().unwrap();
        assert!(matches!(outcome.primitive, Some(Primitive::Segment { .. })));

        let mut bare = TurtleInterpreter::new().with_map(HashMap::new());
        bare.configure("F", TurtleConfig::default());
        assert_eq!(bare.run_to_end(), Ok(0));
    }

    #[test]
    fn underflow_leaves_state_untouched() {
        let mut interpreter = loaded("+]");
        interpreter.step().unwrap();
        let before = *interpreter.turtle();

        let err = interpreter.step().unwrap_err();
        assert_eq!(err, TurtleError::StackUnderflow { cursor: 1 });
        assert_eq!(interpreter.cursor(), 1);
        assert_eq!(interpreter.turtle(), &before);
        assert_eq!(interpreter.phase(), Phase::Running);

        // The fault is sticky until the caller reconfigures.
        assert_eq!(interpreter.step().unwrap_err(), err);
    }

    #[test]
    fn configure_keeps_surface_but_reset_clears_it() {
        let mut interpreter = loaded("F");
        interpreter.run_to_end().unwrap();
        assert_eq!(interpreter.surface().len(), 1);

        interpreter.configure("F", TurtleConfig::default());
        assert_eq!(interpreter.surface().len(), 1);

        interpreter.reset(200, 100);
        assert!(interpreter.surface().is_empty());
        assert_eq!(interpreter.surface().width, 200);
        assert_eq!(interpreter.phase(), Phase::Ready);
    }
}
