//! Target resolution: which scene entities a noun phrase acts on.

use engraf_core::{NounPhrase, Phrase};
use engraf_scene::{RecentEntry, Scene};

/// Resolve the object ids a phrase denotes, expanding assemblies to their
/// member objects.
///
/// Grounding attached during Layer-2 is authoritative; ungrounded NPs fall
/// back to a fresh scene search, and pronouns to the recent queue.
#[must_use]
pub fn resolve_targets(scene: &Scene, phrase: &Phrase) -> Vec<String> {
    match phrase {
        Phrase::Noun(np) => resolve_np(scene, np),
        Phrase::Conjunction(conj) => conj
            .phrases
            .iter()
            .flat_map(|p| resolve_targets(scene, p))
            .collect(),
        _ => Vec::new(),
    }
}

fn resolve_np(scene: &Scene, np: &NounPhrase) -> Vec<String> {
    if let Some(grounding) = &np.grounding {
        return grounding
            .object_ids
            .iter()
            .flat_map(|id| expand_entity(scene, id))
            .collect();
    }
    if let Some(pronoun) = &np.pronoun {
        return scene
            .resolve_pronoun(pronoun)
            .iter()
            .map(RecentEntry::id)
            .flat_map(|id| expand_entity(scene, id))
            .collect();
    }
    let candidates = scene.find_noun_phrase(np);
    if np.is_plural() {
        candidates
            .iter()
            .map(|(_, obj)| obj.object_id.clone())
            .collect()
    } else {
        candidates
            .first()
            .map(|(_, obj)| vec![obj.object_id.clone()])
            .unwrap_or_default()
    }
}

/// An assembly id expands to its member objects; an object id is itself.
fn expand_entity(scene: &Scene, id: &str) -> Vec<String> {
    if let Some(assembly) = scene.find_assembly(id) {
        assembly
            .objects
            .iter()
            .map(|o| o.object_id.clone())
            .collect()
    } else {
        vec![id.to_string()]
    }
}

/// Like [`resolve_targets`] but keeping assemblies unexpanded, for
/// operations that act on whole entities (grouping, deletion, naming).
#[must_use]
pub fn resolve_entities(scene: &Scene, phrase: &Phrase) -> Vec<String> {
    match phrase {
        Phrase::Noun(np) => {
            if let Some(grounding) = &np.grounding {
                return grounding.object_ids.clone();
            }
            if let Some(pronoun) = &np.pronoun {
                return scene
                    .resolve_pronoun(pronoun)
                    .iter()
                    .map(|e| e.id().to_string())
                    .collect();
            }
            resolve_np(scene, np)
        }
        Phrase::Conjunction(conj) => conj
            .phrases
            .iter()
            .flat_map(|p| resolve_entities(scene, p))
            .collect(),
        _ => Vec::new(),
    }
}
