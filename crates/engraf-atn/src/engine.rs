//! The generic ATN engine.
//!
//! A sub-network is a directed graph of nodes whose arcs carry a guard over
//! the current token and accumulator, an effect that mutates the accumulator,
//! and a target node. [`run_atn`] explores arcs depth-first in declaration
//! order, consuming stream positions as arcs dictate and rewinding to the
//! branch entry position whenever a branch dead-ends. Ambiguity is not
//! handled here; the enclosing layer enumerates it by running the network
//! greedily from every position.

use crate::stream::TokenStream;
use engraf_core::{PhraseResult, Token};
use tracing::trace;

/// Index of a node inside one sub-network.
pub type NodeId = usize;

type Guard<A> = Box<dyn Fn(&Token, &A) -> bool>;
type Effect<A> = Box<dyn Fn(&mut A, &Token) -> PhraseResult<()>>;
type JumpGuard<A> = Box<dyn Fn(&A) -> bool>;

enum AtnArc<A> {
    /// Test the current token; on success run the effect and consume it.
    Consume {
        label: &'static str,
        guard: Guard<A>,
        effect: Effect<A>,
        target: NodeId,
    },
    /// Move between nodes without consuming input.
    Jump {
        label: &'static str,
        guard: JumpGuard<A>,
        target: NodeId,
    },
}

struct Node<A> {
    name: &'static str,
    arcs: Vec<AtnArc<A>>,
}

/// A compiled sub-network with designated start and end nodes.
pub struct Atn<A> {
    nodes: Vec<Node<A>>,
    start: NodeId,
    end: NodeId,
}

/// Incremental builder for a sub-network.
pub struct AtnBuilder<A> {
    nodes: Vec<Node<A>>,
}

impl<A> AtnBuilder<A> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a named node and return its id.
    pub fn node(&mut self, name: &'static str) -> NodeId {
        self.nodes.push(Node {
            name,
            arcs: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Add a consuming arc. Arcs are tried in the order they are added.
    pub fn consume(
        &mut self,
        from: NodeId,
        to: NodeId,
        label: &'static str,
        guard: impl Fn(&Token, &A) -> bool + 'static,
        effect: impl Fn(&mut A, &Token) -> PhraseResult<()> + 'static,
    ) {
        self.nodes[from].arcs.push(AtnArc::Consume {
            label,
            guard: Box::new(guard),
            effect: Box::new(effect),
            target: to,
        });
    }

    /// Add a non-consuming arc taken when its guard accepts the accumulator.
    pub fn jump_if(
        &mut self,
        from: NodeId,
        to: NodeId,
        label: &'static str,
        guard: impl Fn(&A) -> bool + 'static,
    ) {
        self.nodes[from].arcs.push(AtnArc::Jump {
            label,
            guard: Box::new(guard),
            target: to,
        });
    }

    /// Add an unconditional non-consuming arc.
    pub fn jump(&mut self, from: NodeId, to: NodeId, label: &'static str) {
        self.jump_if(from, to, label, |_| true);
    }

    #[must_use]
    pub fn build(self, start: NodeId, end: NodeId) -> Atn<A> {
        Atn {
            nodes: self.nodes,
            start,
            end,
        }
    }
}

impl<A> Default for AtnBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a sub-network over the stream starting from the current position.
///
/// Returns `Ok(Some(accumulator))` when a path reaches the end node, with the
/// stream left after the last consumed token. Returns `Ok(None)` when no path
/// completes, with the stream rewound to where it started.
///
/// # Errors
/// An arc effect error (number agreement, mixed conjunction) aborts the whole
/// run; the enclosing layer treats the parse at this position as failed.
pub fn run_atn<A: Clone>(
    atn: &Atn<A>,
    stream: &mut TokenStream<'_>,
    accumulator: A,
) -> PhraseResult<Option<A>> {
    let entry = stream.position();
    let result = explore(atn, atn.start, stream, accumulator);
    if !matches!(&result, Ok(Some(_))) {
        stream.rewind_to(entry);
    }
    result
}

fn explore<A: Clone>(
    atn: &Atn<A>,
    node: NodeId,
    stream: &mut TokenStream<'_>,
    accumulator: A,
) -> PhraseResult<Option<A>> {
    if node == atn.end {
        return Ok(Some(accumulator));
    }
    for arc in &atn.nodes[node].arcs {
        let entry = stream.position();
        match arc {
            AtnArc::Consume {
                label,
                guard,
                effect,
                target,
            } => {
                let Some(token) = stream.peek() else {
                    continue;
                };
                if !guard(token, &accumulator) {
                    continue;
                }
                trace!(node = atn.nodes[node].name, label, "consume arc");
                let token = token.clone();
                let mut next = accumulator.clone();
                effect(&mut next, &token)?;
                stream.advance();
                if let Some(done) = explore(atn, *target, stream, next)? {
                    return Ok(Some(done));
                }
                stream.rewind_to(entry);
            }
            AtnArc::Jump {
                label,
                guard,
                target,
            } => {
                if !guard(&accumulator) {
                    continue;
                }
                trace!(node = atn.nodes[node].name, label, "jump arc");
                if let Some(done) = explore(atn, *target, stream, accumulator.clone())? {
                    return Ok(Some(done));
                }
                stream.rewind_to(entry);
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engraf_core::{Dimension, VectorSpace};

    fn word_token(word: &str, dim: Dimension) -> Token {
        Token::lexical(VectorSpace::from_word(word, &[(dim, 1.0)]))
    }

    /// det? adj* noun: a miniature NP-shaped network over word lists.
    fn mini_atn() -> Atn<Vec<String>> {
        let mut b = AtnBuilder::<Vec<String>>::new();
        let start = b.node("start");
        let mods = b.node("mods");
        let end = b.node("end");
        let push = |acc: &mut Vec<String>, tok: &Token| {
            acc.push(tok.word().unwrap_or("?").to_string());
            Ok(())
        };
        b.consume(start, mods, "det", |t, _| t.isa(Dimension::Det), push);
        b.jump(start, mods, "no-det");
        b.consume(mods, mods, "adj", |t, _| t.isa(Dimension::Adj), push);
        b.consume(mods, end, "noun", |t, _| t.isa(Dimension::Noun), push);
        b.build(start, end)
    }

    #[test]
    fn accepts_in_declaration_order_and_consumes_span() {
        let tokens = vec![
            word_token("the", Dimension::Det),
            word_token("red", Dimension::Adj),
            word_token("cube", Dimension::Noun),
            word_token("and", Dimension::Conj),
        ];
        let mut stream = TokenStream::new(&tokens);
        let result = run_atn(&mini_atn(), &mut stream, Vec::new()).unwrap().unwrap();
        assert_eq!(result, vec!["the", "red", "cube"]);
        assert_eq!(stream.position(), 3);
    }

    #[test]
    fn rewinds_on_dead_end() {
        let tokens = vec![
            word_token("the", Dimension::Det),
            word_token("red", Dimension::Adj),
        ];
        let mut stream = TokenStream::new(&tokens);
        let result = run_atn(&mini_atn(), &mut stream, Vec::new()).unwrap();
        assert!(result.is_none());
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn optional_arc_skips_when_absent() {
        let tokens = vec![word_token("cube", Dimension::Noun)];
        let mut stream = TokenStream::new(&tokens);
        let result = run_atn(&mini_atn(), &mut stream, Vec::new()).unwrap().unwrap();
        assert_eq!(result, vec!["cube"]);
    }

    #[test]
    fn effect_error_aborts_the_run() {
        let mut b = AtnBuilder::<()>::new();
        let start = b.node("start");
        let end = b.node("end");
        b.consume(
            start,
            end,
            "boom",
            |_, _| true,
            |_, tok| {
                Err(engraf_core::PhraseError::NumberAgreement {
                    determiner: "a".into(),
                    noun: tok.word().unwrap_or("?").into(),
                })
            },
        );
        let atn = b.build(start, end);
        let tokens = vec![word_token("cubes", Dimension::Noun)];
        let mut stream = TokenStream::new(&tokens);
        assert!(run_atn(&atn, &mut stream, ()).is_err());
    }
}
