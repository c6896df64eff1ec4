//! The closed dimension catalog for the semantic vector space.
//!
//! Every lexical and phrasal item in ENGRAF is a fixed-length vector indexed
//! by [`Dimension`]. The catalog is partitioned into POS dimensions
//! (categorical markers such as `noun` or `NP`) and semantic dimensions
//! (continuous content such as `locX` or `red`). Adding a dimension means
//! editing this catalog; there is no runtime extension.

use serde::{Deserialize, Serialize};

/// Named dimensions of the semantic vector space.
///
/// The declaration order defines the storage index of each dimension, so the
/// variants must never be reordered without migrating serialized vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    // Basic grammatical categories
    Verb,
    Tobe,
    Action,
    Prep,
    Det,
    Def,
    Adv,
    Adj,
    Noun,
    ProperNoun,
    Pronoun,
    Assembly,
    Unknown,
    Np,
    Pp,
    Vp,
    Sp,

    // Grammatical features
    Number,
    VectorLit,
    Singular,
    Plural,
    Conj,
    Disj,
    And,
    Or,
    Comma,
    Neg,
    Modal,
    Question,
    Unit,
    Quoted,

    // Verb inflection forms
    VerbPast,
    VerbPastPart,
    VerbPresentPart,

    // Comparative/superlative forms
    Comp,
    Super,

    // Spatial coordinates
    LocX,
    LocY,
    LocZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    RotX,
    RotY,
    RotZ,

    // Visual properties
    Red,
    Green,
    Blue,
    Texture,
    Transparency,

    // High-level verb intent
    Create,
    Transform,
    Move,
    Rotate,
    Scale,
    Style,
    Organize,
    Edit,
    Select,
    Naming,

    // Semantic preposition dimensions
    SpatialLocation,
    SpatialProximity,
    DirectionalTarget,
    DirectionalAgency,
    RelationalPossession,
    RelationalComparison,
}

/// Number of dimensions in the catalog.
pub const DIMENSION_COUNT: usize = 66;

impl Dimension {
    /// All dimensions in storage order.
    #[must_use]
    pub fn all() -> &'static [Dimension; DIMENSION_COUNT] {
        use Dimension::*;
        &[
            Verb,
            Tobe,
            Action,
            Prep,
            Det,
            Def,
            Adv,
            Adj,
            Noun,
            ProperNoun,
            Pronoun,
            Assembly,
            Unknown,
            Np,
            Pp,
            Vp,
            Sp,
            Number,
            VectorLit,
            Singular,
            Plural,
            Conj,
            Disj,
            And,
            Or,
            Comma,
            Neg,
            Modal,
            Question,
            Unit,
            Quoted,
            VerbPast,
            VerbPastPart,
            VerbPresentPart,
            Comp,
            Super,
            LocX,
            LocY,
            LocZ,
            ScaleX,
            ScaleY,
            ScaleZ,
            RotX,
            RotY,
            RotZ,
            Red,
            Green,
            Blue,
            Texture,
            Transparency,
            Create,
            Transform,
            Move,
            Rotate,
            Scale,
            Style,
            Organize,
            Edit,
            Select,
            Naming,
            SpatialLocation,
            SpatialProximity,
            DirectionalTarget,
            DirectionalAgency,
            RelationalPossession,
            RelationalComparison,
        ]
    }

    /// Storage index of this dimension.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Surface name used in diagnostics and string-keyed access.
    #[must_use]
    pub fn name(self) -> &'static str {
        use Dimension::*;
        match self {
            Verb => "verb",
            Tobe => "tobe",
            Action => "action",
            Prep => "prep",
            Det => "det",
            Def => "def",
            Adv => "adv",
            Adj => "adj",
            Noun => "noun",
            ProperNoun => "proper_noun",
            Pronoun => "pronoun",
            Assembly => "assembly",
            Unknown => "unknown",
            Np => "NP",
            Pp => "PP",
            Vp => "VP",
            Sp => "SP",
            Number => "number",
            VectorLit => "vector",
            Singular => "singular",
            Plural => "plural",
            Conj => "conj",
            Disj => "disj",
            And => "and",
            Or => "or",
            Comma => "comma",
            Neg => "neg",
            Modal => "modal",
            Question => "question",
            Unit => "unit",
            Quoted => "quoted",
            VerbPast => "verb_past",
            VerbPastPart => "verb_past_part",
            VerbPresentPart => "verb_present_part",
            Comp => "comp",
            Super => "super",
            LocX => "locX",
            LocY => "locY",
            LocZ => "locZ",
            ScaleX => "scaleX",
            ScaleY => "scaleY",
            ScaleZ => "scaleZ",
            RotX => "rotX",
            RotY => "rotY",
            RotZ => "rotZ",
            Red => "red",
            Green => "green",
            Blue => "blue",
            Texture => "texture",
            Transparency => "transparency",
            Create => "create",
            Transform => "transform",
            Move => "move",
            Rotate => "rotate",
            Scale => "scale",
            Style => "style",
            Organize => "organize",
            Edit => "edit",
            Select => "select",
            Naming => "naming",
            SpatialLocation => "spatial_location",
            SpatialProximity => "spatial_proximity",
            DirectionalTarget => "directional_target",
            DirectionalAgency => "directional_agency",
            RelationalPossession => "relational_possession",
            RelationalComparison => "relational_comparison",
        }
    }

    /// Look up a dimension by its surface name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Dimension> {
        Dimension::all().iter().copied().find(|d| d.name() == name)
    }

    /// True for continuous-content dimensions used in semantic similarity.
    #[must_use]
    pub fn is_semantic(self) -> bool {
        use Dimension::*;
        matches!(
            self,
            LocX | LocY
                | LocZ
                | ScaleX
                | ScaleY
                | ScaleZ
                | RotX
                | RotY
                | RotZ
                | Red
                | Green
                | Blue
                | Texture
                | Transparency
                | Create
                | Transform
                | Move
                | Rotate
                | Scale
                | Style
                | Organize
                | Edit
                | Select
                | Naming
                | SpatialLocation
                | SpatialProximity
                | DirectionalTarget
                | DirectionalAgency
                | RelationalPossession
                | RelationalComparison
        )
    }

    /// True for categorical part-of-speech and grammatical-feature markers.
    #[must_use]
    pub fn is_pos(self) -> bool {
        !self.is_semantic()
    }
}

/// Mask over the catalog restricting comparisons to the semantic partition.
#[must_use]
pub fn semantic_mask() -> [bool; DIMENSION_COUNT] {
    let mut mask = [false; DIMENSION_COUNT];
    for dim in Dimension::all() {
        mask[dim.index()] = dim.is_semantic();
    }
    mask
}

/// Mask over the catalog restricting comparisons to the POS partition.
#[must_use]
pub fn pos_mask() -> [bool; DIMENSION_COUNT] {
    let mut mask = [false; DIMENSION_COUNT];
    for dim in Dimension::all() {
        mask[dim.index()] = dim.is_pos();
    }
    mask
}
