// engraf-interpreter: sentence interpretation over the scene contract

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # ENGRAF Interpreter
//!
//! Executes parsed sentences against the scene: creation, transformation,
//! grouping, deletion, naming, and selection, dispatched on the predicate
//! verb's intent dimensions. This crate is the only writer of scene state;
//! the parser core observes the scene between sentences and never mutates
//! it.
//!
//! ```rust
//! use engraf_interpreter::{MockRenderer, SentenceInterpreter};
//!
//! let mut interpreter = SentenceInterpreter::new(MockRenderer::new());
//! let outcome = interpreter.interpret("draw a red cube");
//! assert!(outcome.success);
//! assert_eq!(outcome.objects_created, vec!["cube_1"]);
//! ```

pub mod creator;
pub mod interpreter;
pub mod renderer;
pub mod resolver;

pub use interpreter::{SentenceInterpreter, SentenceOutcome};
pub use renderer::{MockRenderer, NullRenderer, RenderEvent, Renderer};
