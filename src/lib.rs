//! # symbios-turtle
//!
//! Deterministic L-System expansion and a step-by-step 2D turtle interpreter.
//!
//! A [`Grammar`] rewrites an axiom through a number of generations into a
//! program string. A [`TurtleInterpreter`] then walks that program one symbol
//! per [`step`](TurtleInterpreter::step), tracking position, heading and a
//! save/restore stack, and appends line segments and marker circles to a
//! [`Surface`] that any renderer can replay at any point in the run.
//!
//! ```
//! use symbios_turtle::{Grammar, TurtleConfig, TurtleInterpreter};
//!
//! let grammar = Grammar::new("0", Default::default(), 2)
//!     .with_rule('0', "1[*+0]-0")
//!     .with_rule('1', "11");
//! let program = grammar.expand();
//! assert_eq!(program, "1[*+0]-0");
//!
//! let mut turtle = TurtleInterpreter::new();
//! turtle.configure(&program, TurtleConfig::new(45.0, 10.0).unwrap());
//! turtle.run_to_end().unwrap();
//! assert_eq!(turtle.surface().segment_count(), 3);
//! assert_eq!(turtle.surface().circle_count(), 1);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod presets;
pub mod render;
pub mod surface;
pub mod turtle;

pub use config::*;
pub use driver::*;
pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use presets::*;
pub use render::*;
pub use surface::*;
pub use turtle::*;
