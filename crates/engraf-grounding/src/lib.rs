// engraf-grounding: semantic grounding for the ENGRAF parser

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # ENGRAF Grounding
//!
//! Binds parsed phrases to scene entities. Layer-2 grounding resolves noun
//! phrases (pronouns via the recent queue, everything else via ranked scene
//! search) and multiplies hypotheses across candidate combinations; Layer-3
//! grounding turns prepositional phrases into spatial relations or absolute
//! locations.
//!
//! The grounder reads the scene and never mutates it.

pub mod config;
pub mod error;
pub mod layer2;
pub mod layer3;

pub use config::GroundingConfig;
pub use error::GroundingError;
pub use layer2::{Layer2Grounder, Layer2GroundingResult};
pub use layer3::{Layer3Grounder, Layer3GroundingResult};
