//! Layer 1: character stream to ranked lexical hypotheses.
//!
//! The input is split into atoms (words, commas, quoted strings, bracketed
//! vector literals), then every maximal matching partition of the atom list
//! is enumerated: compound entries longest-first, base and inflected
//! lookups, numerals, and an unknown fallback. Each hypothesis carries the
//! product of its per-position confidence factors.

use crate::config::TokenizerConfig;
use engraf_core::{sort_by_confidence, Dimension, Hypothesis, Token, VectorSpace};
use engraf_lexicon::{
    parse_numeral, parse_quoted_literal, parse_vector_literal, LexiconError, LexiconResult,
    Vocabulary,
};
use tracing::debug;

#[derive(Debug, Clone)]
enum Atom {
    Word(String),
    Comma,
    Literal(VectorSpace),
}

fn scan_atoms(input: &str) -> Vec<Atom> {
    let mut atoms = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() || c == '.' || c == '!' || c == '?' {
            i += 1;
        } else if c == ',' {
            atoms.push(Atom::Comma);
            i += 1;
        } else if c == '[' {
            let end = chars[i..]
                .iter()
                .position(|&ch| ch == ']')
                .map_or(chars.len(), |p| i + p + 1);
            let raw: String = chars[i..end].iter().collect();
            let compact: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
            match parse_vector_literal(&compact) {
                Some(v) => atoms.push(Atom::Literal(v)),
                None => atoms.push(Atom::Word(raw.to_lowercase())),
            }
            i = end;
        } else if c == '\'' || c == '"' {
            let close = chars[i + 1..]
                .iter()
                .position(|&ch| ch == c)
                .map(|p| i + 1 + p);
            match close {
                Some(end) => {
                    let raw: String = chars[i..=end].iter().collect();
                    match parse_quoted_literal(&raw) {
                        Some(v) => atoms.push(Atom::Literal(v)),
                        None => atoms.push(Atom::Word(raw.to_lowercase())),
                    }
                    i = end + 1;
                }
                None => {
                    atoms.push(Atom::Word(chars[i..].iter().collect::<String>().to_lowercase()));
                    i = chars.len();
                }
            }
        } else {
            let start = i;
            while i < chars.len()
                && !chars[i].is_whitespace()
                && !matches!(chars[i], ',' | '[' | '\'' | '"' | '.' | '!' | '?')
            {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect::<String>().to_lowercase();
            if !word.is_empty() {
                atoms.push(Atom::Word(word));
            }
        }
    }
    atoms
}

/// A partial partition during enumeration.
#[derive(Clone)]
struct Partial {
    tokens: Vec<Token>,
    confidence: f32,
    known_tokens: usize,
}

/// Enumerate every partition of the atom list into vocabulary matches,
/// depth-first (atom counts are small; the cap bounds pathological fan-out).
fn expand(atoms: &[Atom], vocab: &Vocabulary, config: &TokenizerConfig) -> Vec<Partial> {
    fn recurse(
        atoms: &[Atom],
        index: usize,
        vocab: &Vocabulary,
        config: &TokenizerConfig,
        current: &Partial,
        out: &mut Vec<Partial>,
        cap: usize,
    ) {
        if out.len() >= cap {
            return;
        }
        if index >= atoms.len() {
            out.push(current.clone());
            return;
        }
        for (consumed, token, factor, known) in atom_options(atoms, index, vocab, config) {
            let mut grown = current.clone();
            grown.tokens.push(token);
            grown.confidence *= factor;
            grown.known_tokens += usize::from(known);
            recurse(atoms, index + consumed, vocab, config, &grown, out, cap);
        }
    }

    let mut out = Vec::new();
    let root = Partial {
        tokens: Vec::new(),
        confidence: 1.0,
        known_tokens: 0,
    };
    recurse(
        atoms,
        0,
        vocab,
        config,
        &root,
        &mut out,
        config.max_layer1_hypotheses,
    );
    out
}

/// All ways to consume atoms starting at `index`:
/// `(atoms_consumed, token, confidence_factor, is_known)`.
fn atom_options(
    atoms: &[Atom],
    index: usize,
    vocab: &Vocabulary,
    config: &TokenizerConfig,
) -> Vec<(usize, Token, f32, bool)> {
    let mut options = Vec::new();
    match &atoms[index] {
        Atom::Comma => {
            let v = VectorSpace::from_word(",", &[(Dimension::Comma, 1.0)]);
            options.push((1, Token::lexical(v), 1.0, true));
        }
        Atom::Literal(v) => {
            options.push((1, Token::lexical(v.clone()), 1.0, true));
        }
        Atom::Word(word) => {
            // Longest compound first.
            let max_len = vocab.max_compound_words().min(atoms.len() - index);
            for len in (2..=max_len).rev() {
                let words: Option<Vec<&str>> = atoms[index..index + len]
                    .iter()
                    .map(|a| match a {
                        Atom::Word(w) => Some(w.as_str()),
                        _ => None,
                    })
                    .collect();
                let Some(words) = words else { continue };
                let joined = words.join(" ");
                if let Some(m) = vocab.lookup(&joined) {
                    options.push((len, Token::lexical(m.vector), m.kind.confidence(), true));
                }
            }
            for m in vocab.lookup_all(word) {
                options.push((1, Token::lexical(m.vector), m.kind.confidence(), true));
            }
            if let Some(v) = parse_numeral(word) {
                options.push((1, Token::lexical(v), 1.0, true));
            }
            if options.is_empty() {
                let v = VectorSpace::from_word(word.as_str(), &[(Dimension::Unknown, 1.0)]);
                options.push((1, Token::lexical(v), config.unknown_confidence, false));
            }
        }
    }
    options
}

/// Tokenize a raw input string into ranked Layer-1 hypotheses.
///
/// # Errors
/// [`LexiconError::UnknownToken`] when the input is empty or no partition
/// has any vocabulary coverage (a single unknown word is a parse-fatal
/// error; an unknown word amid known ones survives as a low-confidence
/// fallback token).
pub fn tokenize_layer1(
    input: &str,
    vocab: &Vocabulary,
    config: &TokenizerConfig,
) -> LexiconResult<Vec<Hypothesis>> {
    let atoms = scan_atoms(input);
    if atoms.is_empty() {
        return Err(LexiconError::UnknownToken {
            surface: input.trim().to_string(),
            position: 0,
        });
    }

    let partials = expand(&atoms, vocab, config);
    if partials.iter().all(|p| p.known_tokens == 0) {
        let surface = match &atoms[0] {
            Atom::Word(w) => w.clone(),
            _ => String::new(),
        };
        return Err(LexiconError::UnknownToken {
            surface,
            position: 0,
        });
    }

    let mut hypotheses: Vec<Hypothesis> = partials
        .into_iter()
        .map(|p| {
            let n = p.tokens.len();
            Hypothesis::new(
                p.tokens,
                p.confidence,
                format!("Layer 1: {n} tokens"),
            )
        })
        .collect();
    sort_by_confidence(&mut hypotheses);
    hypotheses.dedup_by(|a, b| a.signature() == b.signature() && a.confidence == b.confidence);
    debug!(input, hypotheses = hypotheses.len(), "layer 1 tokenization");
    Ok(hypotheses)
}
