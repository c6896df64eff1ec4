// engraf-scene: Scene model and spatial validation for the ENGRAF parser

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # ENGRAF Scene
//!
//! The 3D scene the parser grounds against: objects and assemblies in
//! creation order, a recent-reference queue for pronoun resolution, noun
//! phrase candidate search with weighted vector distance, and the
//! per-preposition spatial validator that prunes linguistically valid but
//! physically incoherent parses.
//!
//! The parser core only ever reads the scene. Mutation belongs to the
//! external sentence interpreter, which runs after a parse completes.

pub mod model;
pub mod object;
pub mod spatial;

pub use model::{weighted_distance, RecentEntry, Scene};
pub use object::{Assembly, ObjectMetadata, SceneObject};
pub use spatial::{SpatialTest, SpatialValidator};
