// engraf: facade crate re-exporting the ENGRAF surface

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # ENGRAF
//!
//! A Layered Augmented Transition Network (LATN) parser that turns English
//! sentences about a 3D scene into executable scene operations. Five layers
//! lift a character stream through lexical, noun-phrase, prepositional-
//! phrase, verb-phrase, and sentence structure, grounding phrases against
//! the scene as they form and ranking every alternative reading by
//! confidence.
//!
//! The member crates:
//!
//! - [`engraf_core`]: the semantic vector space, phrase records, and
//!   hypothesis container
//! - [`engraf_lexicon`]: vocabulary, inflection, and literals
//! - [`engraf_atn`]: the ATN engine and the four phrase sub-networks
//! - [`engraf_scene`]: the scene model and the spatial validator
//! - [`engraf_tokenizer`]: Layers 1 through 5
//! - [`engraf_grounding`]: Layer 2/3 semantic grounding
//! - [`engraf_pipeline`]: the layered executor
//! - [`engraf_interpreter`]: the sentence interpreter and renderer seam
//!
//! ## Example
//!
//! ```rust
//! use engraf::interpreter::{MockRenderer, SentenceInterpreter};
//!
//! let mut interpreter = SentenceInterpreter::new(MockRenderer::new());
//! interpreter.interpret("draw a red cube");
//! let outcome = interpreter.interpret("make it bigger");
//! assert_eq!(outcome.objects_modified, vec!["cube_1"]);
//! ```

pub use engraf_atn as atn;
pub use engraf_core as core;
pub use engraf_grounding as grounding;
pub use engraf_interpreter as interpreter;
pub use engraf_lexicon as lexicon;
pub use engraf_pipeline as pipeline;
pub use engraf_scene as scene;
pub use engraf_tokenizer as tokenizer;

pub use engraf_interpreter::{SentenceInterpreter, SentenceOutcome};
pub use engraf_pipeline::{ExecutorOptions, LatnExecutor};
