//! The shared Layer 2-5 template: greedy phrase scanning, the two
//! coordination passes, and composite-token span replacement.

use crate::config::TokenizerConfig;
use engraf_atn::TokenStream;
use engraf_core::{
    sort_by_confidence, ConjunctionPhrase, Dimension, Hypothesis, Phrase, PhraseResult,
    Replacement, Token,
};
use std::collections::HashSet;
use tracing::warn;

/// One recognized phrase and the inbound token span it consumed.
#[derive(Debug, Clone)]
pub struct PhraseSequence {
    pub start: usize,
    pub end: usize,
    pub phrase: Phrase,
}

/// A phrase parser over the layer's token stream.
pub trait PhraseParser {
    fn parse(&self, stream: &mut TokenStream<'_>) -> PhraseResult<Option<Phrase>>;
}

impl<F> PhraseParser for F
where
    F: Fn(&mut TokenStream<'_>) -> PhraseResult<Option<Phrase>>,
{
    fn parse(&self, stream: &mut TokenStream<'_>) -> PhraseResult<Option<Phrase>> {
        self(stream)
    }
}

fn is_lexical_conj(token: &Token) -> bool {
    token.phrase.is_none() && token.isa(Dimension::Conj)
}

fn is_lexical_comma(token: &Token) -> bool {
    token.phrase.is_none() && token.isa(Dimension::Comma)
}

/// Scan left-to-right, running the phrase parser greedily at every position.
///
/// With `build_conjunctions` set, a successful parse keeps chaining across
/// "and"/"or"/comma separators into a [`ConjunctionPhrase`]. A mixed
/// "and"/"or" chain abandons the coordination and keeps the phrases parsed
/// before the offending separator; a parser error drops the candidate at
/// that position and scanning continues.
pub fn find_phrase_sequences(
    tokens: &[Token],
    build_conjunctions: bool,
    parser: &dyn PhraseParser,
) -> Vec<PhraseSequence> {
    let mut sequences = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let mut stream = TokenStream::new(&tokens[i..]);
        match parser.parse(&mut stream) {
            Err(err) => {
                warn!(position = i, %err, "phrase candidate dropped");
                i += 1;
            }
            Ok(None) => i += 1,
            Ok(Some(first)) => {
                let mut best = first;
                let mut best_end = i + stream.position() - 1;

                while build_conjunctions {
                    let save = stream.position();
                    let Some(sep) = stream.peek() else { break };
                    let (is_conj, is_comma) = (is_lexical_conj(sep), is_lexical_comma(sep));
                    if !is_conj && !is_comma {
                        break;
                    }
                    let mut conj_vec = sep.vector.clone();
                    stream.advance();
                    if is_comma {
                        // Oxford comma: ", and" joins with the conjunction.
                        if let Some(next) = stream.peek() {
                            if is_lexical_conj(next) {
                                conj_vec = next.vector.clone();
                                stream.advance();
                            }
                        }
                    }
                    match parser.parse(&mut stream) {
                        Ok(Some(next_phrase)) => {
                            match &mut best {
                                Phrase::Conjunction(conj) => {
                                    if let Err(err) = conj.extend(&conj_vec, next_phrase) {
                                        warn!(%err, "coordination abandoned");
                                        stream.rewind_to(save);
                                        break;
                                    }
                                }
                                _ => {
                                    let left = best.clone();
                                    best = Phrase::Conjunction(ConjunctionPhrase::new(
                                        &conj_vec,
                                        left,
                                        next_phrase,
                                    ));
                                }
                            }
                            best_end = i + stream.position() - 1;
                        }
                        Ok(None) | Err(_) => {
                            stream.rewind_to(save);
                            break;
                        }
                    }
                }

                sequences.push(PhraseSequence {
                    start: i,
                    end: best_end,
                    phrase: best,
                });
                i = best_end + 1;
            }
        }
    }
    sequences
}

/// Replace each consumed span with its composite token.
#[must_use]
pub fn replace_sequences(
    tokens: &[Token],
    sequences: &[PhraseSequence],
) -> (Vec<Token>, Vec<Replacement>) {
    let mut out = Vec::new();
    let mut replacements = Vec::new();
    let mut i = 0;
    for seq in sequences {
        while i < seq.start {
            out.push(tokens[i].clone());
            i += 1;
        }
        let token = Token::composite(seq.phrase.clone());
        replacements.push(Replacement {
            start: seq.start,
            end: seq.end,
            token: token.clone(),
        });
        out.push(token);
        i = seq.end + 1;
    }
    while i < tokens.len() {
        out.push(tokens[i].clone());
        i += 1;
    }
    (out, replacements)
}

fn sequences_coordinate(sequences: &[PhraseSequence]) -> bool {
    sequences
        .iter()
        .any(|s| matches!(s.phrase, Phrase::Conjunction(_)))
}

fn same_sequences(a: &[PhraseSequence], b: &[PhraseSequence]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.start == y.start && x.end == y.end && x.phrase == y.phrase)
}

/// Run one layer over every inbound hypothesis: both coordination passes,
/// span replacement, the layer confidence bonus, and dedup by phrase
/// sequence signature. The outbound list is sorted by descending confidence.
pub fn run_layer(
    inbound: &[Hypothesis],
    layer_name: &str,
    config: &TokenizerConfig,
    parser: &dyn PhraseParser,
) -> Vec<Hypothesis> {
    let mut out = Vec::new();
    for hypothesis in inbound {
        let local = find_phrase_sequences(&hypothesis.tokens, false, parser);
        let mut coordination_differs = false;
        let mut variants = vec![(local, false)];
        if config.build_phrase_level_coordination {
            let phrase_level = find_phrase_sequences(&hypothesis.tokens, true, parser);
            coordination_differs = !same_sequences(&variants[0].0, &phrase_level);
            if coordination_differs {
                variants.push((phrase_level, true));
            }
        }

        let mut seen = HashSet::new();
        for (sequences, is_phrase_level) in variants {
            if sequences.is_empty() {
                let mut pass = hypothesis.clone();
                pass.description = format!("{layer_name}: no phrases found");
                pass.replacements.clear();
                if seen.insert(pass.signature()) {
                    out.push(pass);
                }
                continue;
            }
            let (tokens, replacements) = replace_sequences(&hypothesis.tokens, &sequences);
            let bonus = if is_phrase_level && sequences_coordinate(&sequences) {
                config.phrase_coordination_bonus
            } else if !is_phrase_level && coordination_differs {
                config.local_coordination_penalty
            } else {
                1.0
            };
            let coord_kind = if is_phrase_level { "phrase-level" } else { "local" };
            let mut hyp = Hypothesis::new(
                tokens,
                hypothesis.confidence * config.layer_bonus * bonus,
                format!(
                    "{layer_name} ({coord_kind}): {} phrase sequences",
                    sequences.len()
                ),
            );
            hyp.replacements = replacements;
            if seen.insert(hyp.signature()) {
                out.push(hyp);
            }
        }
    }
    sort_by_confidence(&mut out);
    out
}
