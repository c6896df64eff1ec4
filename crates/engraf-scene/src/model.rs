//! The scene: ordered objects, assemblies, and the recent-reference queue.

use crate::object::{Assembly, SceneObject};
use engraf_core::{Dimension, NounPhrase, VectorSpace};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One entry in the recent-reference queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecentEntry {
    Object(String),
    Assembly(String),
}

impl RecentEntry {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            RecentEntry::Object(id) | RecentEntry::Assembly(id) => id,
        }
    }
}

/// The scene model: standalone objects and assemblies in creation order,
/// plus the recent queue pronoun resolution reads.
///
/// The recent queue is unbounded per-session history, deduplicated by id
/// with move-to-back on re-reference. The parser core reads the scene as
/// immutable; only the external sentence interpreter mutates it between
/// sentences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    objects: Vec<SceneObject>,
    assemblies: Vec<Assembly>,
    recent: Vec<RecentEntry>,
    next_rank: usize,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a standalone object and push it onto the recent queue.
    pub fn add_object(&mut self, mut obj: SceneObject) {
        obj.creation_rank = self.next_rank;
        self.next_rank += 1;
        self.touch_recent(RecentEntry::Object(obj.object_id.clone()));
        self.objects.push(obj);
    }

    /// Append an assembly; its members leave the standalone list so that
    /// membership stays exclusive.
    pub fn add_assembly(&mut self, mut assembly: Assembly) {
        assembly.creation_rank = self.next_rank;
        self.next_rank += 1;
        let member_ids: Vec<String> = assembly
            .objects
            .iter()
            .map(|o| o.object_id.clone())
            .collect();
        self.objects.retain(|o| !member_ids.contains(&o.object_id));
        self.touch_recent(RecentEntry::Assembly(assembly.assembly_id.clone()));
        self.assemblies.push(assembly);
    }

    /// Dissolve an assembly back into standalone objects.
    pub fn remove_assembly(&mut self, assembly_id: &str) -> Option<Assembly> {
        let idx = self
            .assemblies
            .iter()
            .position(|a| a.assembly_id == assembly_id)?;
        let assembly = self.assemblies.remove(idx);
        self.recent.retain(|e| e.id() != assembly_id);
        for obj in assembly.objects.clone() {
            self.objects.push(obj);
        }
        Some(assembly)
    }

    pub fn remove_object(&mut self, object_id: &str) -> Option<SceneObject> {
        self.recent.retain(|e| e.id() != object_id);
        if let Some(idx) = self.objects.iter().position(|o| o.object_id == object_id) {
            return Some(self.objects.remove(idx));
        }
        for assembly in &mut self.assemblies {
            if let Some(idx) = assembly
                .objects
                .iter()
                .position(|o| o.object_id == object_id)
            {
                return Some(assembly.objects.remove(idx));
            }
        }
        None
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.assemblies.clear();
        self.recent.clear();
    }

    /// Standalone objects in creation order.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    #[must_use]
    pub fn assemblies(&self) -> &[Assembly] {
        &self.assemblies
    }

    /// Every object in the scene, standalone or assembly-owned.
    pub fn all_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects
            .iter()
            .chain(self.assemblies.iter().flat_map(|a| a.objects.iter()))
    }

    #[must_use]
    pub fn find_object(&self, object_id: &str) -> Option<&SceneObject> {
        self.all_objects().find(|o| o.object_id == object_id)
    }

    pub fn find_object_mut(&mut self, object_id: &str) -> Option<&mut SceneObject> {
        if let Some(obj) = self.objects.iter_mut().find(|o| o.object_id == object_id) {
            return Some(obj);
        }
        self.assemblies
            .iter_mut()
            .flat_map(|a| a.objects.iter_mut())
            .find(|o| o.object_id == object_id)
    }

    #[must_use]
    pub fn find_assembly(&self, assembly_id: &str) -> Option<&Assembly> {
        self.assemblies
            .iter()
            .find(|a| a.assembly_id == assembly_id)
    }

    pub fn find_assembly_mut(&mut self, assembly_id: &str) -> Option<&mut Assembly> {
        self.assemblies
            .iter_mut()
            .find(|a| a.assembly_id == assembly_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.assemblies.is_empty()
    }

    /// The recent queue, oldest first.
    #[must_use]
    pub fn recent(&self) -> &[RecentEntry] {
        &self.recent
    }

    /// Push an entity to the back of the recent queue, deduplicating by id.
    pub fn touch_recent(&mut self, entry: RecentEntry) {
        self.recent.retain(|e| e.id() != entry.id());
        self.recent.push(entry);
    }

    /// Resolve a pronoun against the recent queue. "it" denotes the most
    /// recent single entity; "them"/"they" denote everything back to and
    /// including the most recent assembly, or the whole history when no
    /// assembly has been formed. Returns an empty list when nothing has been
    /// referenced yet.
    #[must_use]
    pub fn resolve_pronoun(&self, pronoun: &str) -> Vec<RecentEntry> {
        match pronoun {
            "it" => self.recent.last().cloned().into_iter().collect(),
            "them" | "they" => {
                let boundary = self
                    .recent
                    .iter()
                    .rposition(|e| matches!(e, RecentEntry::Assembly(_)));
                let start = boundary.unwrap_or(0);
                self.recent[start..].to_vec()
            }
            _ => Vec::new(),
        }
    }

    /// Generate a fresh `<name>_<n>` object id.
    #[must_use]
    pub fn next_object_id(&self, name: &str) -> String {
        let count = self.all_objects().filter(|o| o.name == name).count();
        format!("{}_{}", name, count + 1)
    }

    /// Rank scene objects against a noun phrase, best first.
    ///
    /// An object is a candidate when its name (or proper name) matches the
    /// NP's head and no strong-color conflict holds; candidates are ordered
    /// by weighted vector distance, returned as `(confidence, object)` with
    /// confidence = 1 - distance.
    #[must_use]
    pub fn find_noun_phrase(&self, np: &NounPhrase) -> Vec<(f32, &SceneObject)> {
        let mut scored: Vec<(f32, &SceneObject)> = self
            .all_objects()
            .filter(|obj| object_matches(obj, np))
            .map(|obj| {
                let distance = weighted_distance(&obj.vector, &np.vector);
                (1.0 - distance, obj)
            })
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        debug!(np = %np.noun.as_deref().unwrap_or("?"), candidates = scored.len(), "noun phrase search");
        scored
    }
}

/// Generic head nouns that match any object.
const GENERIC_NOUNS: [&str; 3] = ["object", "shape", "thing"];

fn noun_matches(object_name: &str, np_noun: &str) -> bool {
    if GENERIC_NOUNS.contains(&np_noun) || GENERIC_NOUNS.map(|g| format!("{g}s")).contains(&np_noun.to_string()) {
        return true;
    }
    np_noun == object_name
        || np_noun == format!("{object_name}s")
        || np_noun == format!("{object_name}es")
}

fn object_matches(obj: &SceneObject, np: &NounPhrase) -> bool {
    if let Some(proper) = &np.proper_noun {
        if obj.metadata.proper_name.as_deref() != Some(proper.as_str()) {
            return false;
        }
    } else if let Some(noun) = &np.noun {
        let proper_hit = obj.metadata.proper_name.as_deref() == Some(noun.as_str());
        if !proper_hit && !noun_matches(&obj.name, noun) {
            return false;
        }
    }
    !strong_color_conflict(&obj.vector, &np.vector)
}

const COLOR_DIMS: [Dimension; 3] = [Dimension::Red, Dimension::Green, Dimension::Blue];

/// A strong-color conflict disqualifies a candidate outright: the query
/// demands a color the object lacks with no shared strong color, or both
/// sides have strong colors with disjoint sets.
fn strong_color_conflict(obj: &VectorSpace, query: &VectorSpace) -> bool {
    let obj_colors: Vec<Dimension> = COLOR_DIMS
        .iter()
        .copied()
        .filter(|d| obj.get(*d) > 0.5)
        .collect();
    let query_colors: Vec<Dimension> = COLOR_DIMS
        .iter()
        .copied()
        .filter(|d| query.get(*d) > 0.5)
        .collect();

    let shared = query_colors.iter().any(|d| obj_colors.contains(d));
    for dim in &query_colors {
        if obj.get(*dim) <= 0.5 && !shared {
            return true;
        }
    }
    !obj_colors.is_empty() && !query_colors.is_empty() && !shared
}

fn scale_category(value: f32) -> u8 {
    if value >= 1.5 {
        2 // large
    } else if value > 0.0 && value <= 0.75 {
        0 // small
    } else {
        1 // normal
    }
}

/// Weighted vector distance in [0, 1]: color dimensions weigh 2.0 and match
/// as binary on/off at the 0.5 threshold; scale dimensions weigh 1.5 and
/// match by size category; location weighs 0.5; texture and transparency
/// weigh 1.0.
#[must_use]
pub fn weighted_distance(obj: &VectorSpace, query: &VectorSpace) -> f32 {
    let mut total = 0.0f32;
    let mut weight_sum = 0.0f32;

    for dim in COLOR_DIMS {
        let mismatch = (obj.get(dim) > 0.5) != (query.get(dim) > 0.5);
        total += if mismatch { 1.0 } else { 0.0 } * 2.0;
        weight_sum += 2.0;
    }
    for dim in [Dimension::ScaleX, Dimension::ScaleY, Dimension::ScaleZ] {
        let obj_v = obj.get(dim);
        let query_v = query.get(dim);
        let distance = if scale_category(obj_v) == scale_category(query_v) {
            0.0
        } else {
            (obj_v - query_v).abs().min(1.0)
        };
        total += distance * 1.5;
        weight_sum += 1.5;
    }
    for dim in [Dimension::LocX, Dimension::LocY, Dimension::LocZ] {
        total += (obj.get(dim) - query.get(dim)).abs().min(1.0) * 0.5;
        weight_sum += 0.5;
    }
    for dim in [Dimension::Texture, Dimension::Transparency] {
        total += (obj.get(dim) - query.get(dim)).abs().min(1.0);
        weight_sum += 1.0;
    }

    total / weight_sum
}
