// engraf-pipeline: layered execution entry points for ENGRAF

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # ENGRAF Pipeline
//!
//! The public face of the parser: a [`LatnExecutor`] with entry points at
//! every layer. Calling `execute_layer_k` runs Layers 1 through k, grounds
//! NPs and PPs against the scene when one is attached, and hands back the
//! chained per-layer result records with ranked hypothesis lists.
//!
//! ```rust
//! use engraf_pipeline::LatnExecutor;
//!
//! let executor = LatnExecutor::new();
//! let result = executor.execute_layer5("draw a red cube");
//! assert!(result.success);
//! let sentence = result.best_sentence().unwrap();
//! assert!(sentence.subject.is_none());
//! ```

pub mod error;
pub mod executor;
pub mod options;
pub mod results;

pub use error::{PipelineError, PipelineResult};
pub use executor::LatnExecutor;
pub use options::ExecutorOptions;
pub use results::{Layer1Result, Layer2Result, Layer3Result, Layer4Result, Layer5Result};
