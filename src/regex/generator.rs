// Backtracking match generator.
//
// `generate` enumerates every (leftover input, captures) pair reachable by
// matching a prefix of the node sequence against a prefix of the input. It
// is written in continuation-passing style: each pair is handed to `visit`,
// and a `Break` from the visitor unwinds the whole search at once.
//
// Exploration order is greedy first: longer repetitions before shorter
// ones, the present branch of `?` before the absent one, alternatives left
// to right. Captures are passed by value; every branch point clones them so
// no branch observes another's writes.

use std::ops::ControlFlow;

use super::atom::Atom;
use super::backref;
use super::parse::{Node, Quantifier};
use super::Captures;

/// Receives each leftover suffix and the captures that produced it.
pub(crate) type Visit<'v, 't> = dyn FnMut(&'t str, Captures<'t>) -> ControlFlow<()> + 'v;

pub(crate) fn generate<'t>(
    nodes: &[Node],
    suffix: &'t str,
    caps: Captures<'t>,
    visit: &mut Visit<'_, 't>,
) -> ControlFlow<()> {
    let Some((head, tail)) = nodes.split_first() else {
        return visit(suffix, caps);
    };

    match head {
        Node::Backref(number) => match backref::resolve(suffix, *number, &caps) {
            Some(rest) => generate(tail, rest, caps, visit),
            None => ControlFlow::Continue(()),
        },

        Node::Group { id, alts, quant } => {
            let group = Group { id: *id, alts };
            match quant {
                Quantifier::One => {
                    group.once(suffix, &caps, &mut |out, inner| generate(tail, out, inner, &mut *visit))
                }
                Quantifier::ZeroOrOne => {
                    group.once(suffix, &caps, &mut |out, inner| generate(tail, out, inner, &mut *visit))?;
                    generate(tail, suffix, caps, visit)
                }
                Quantifier::OneOrMore => group.repeat(suffix, caps, tail, visit),
            }
        }

        Node::Atom { atom, quant } => match quant {
            Quantifier::One => match step(atom, suffix) {
                Some(rest) => generate(tail, rest, caps, visit),
                None => ControlFlow::Continue(()),
            },
            Quantifier::ZeroOrOne => {
                if let Some(rest) = step(atom, suffix) {
                    generate(tail, rest, caps.clone(), visit)?;
                }
                generate(tail, suffix, caps, visit)
            }
            Quantifier::OneOrMore => {
                let run: Vec<usize> = suffix
                    .char_indices()
                    .take_while(|&(_, c)| atom.is_match(c))
                    .map(|(i, c)| i + c.len_utf8())
                    .collect();
                for &end in run.iter().rev() {
                    generate(tail, &suffix[end..], caps.clone(), visit)?;
                }
                ControlFlow::Continue(())
            }
        },
    }
}

/// Consume one character satisfying `atom`.
#[inline]
fn step<'t>(atom: &Atom, suffix: &'t str) -> Option<&'t str> {
    let c = suffix.chars().next()?;
    atom.is_match(c).then(|| &suffix[c.len_utf8()..])
}

struct Group<'n> {
    id: usize,
    alts: &'n [Vec<Node>],
}

impl Group<'_> {
    /// A single pass over the body: every alternative, every way it can
    /// match, with the group's own slot set to the text it consumed.
    fn once<'t>(&self, start: &'t str, caps: &Captures<'t>, visit: &mut Visit<'_, 't>) -> ControlFlow<()> {
        for alt in self.alts {
            generate(alt, start, caps.clone(), &mut |out, mut inner| {
                inner.set(self.id, &start[..start.len() - out.len()]);
                visit(out, inner)
            })?;
        }
        ControlFlow::Continue(())
    }

    /// `+` over the group, then `tail`.
    ///
    /// After every repetition count the tail is tried. A repetition that
    /// consumed input may be followed by another; after the first, a
    /// repetition that consumed nothing is dropped, which bounds the search.
    ///
    /// Repetitions live on a heap worklist, so the native stack stays flat
    /// however many times the group repeats. Each pass pushes the tail
    /// attempt below the next repetition, which keeps longer repetitions
    /// ahead of shorter ones.
    fn repeat<'t>(
        &self,
        start: &'t str,
        caps: Captures<'t>,
        tail: &[Node],
        visit: &mut Visit<'_, 't>,
    ) -> ControlFlow<()> {
        let mut work = vec![Repeat::Extend { start, caps, first: true }];

        while let Some(item) = work.pop() {
            match item {
                Repeat::Tail { rest, caps } => generate(tail, rest, caps, visit)?,
                Repeat::Extend { start, caps, first } => {
                    let mut passes = Vec::new();
                    self.once(start, &caps, &mut |out, inner| {
                        passes.push((out, inner));
                        ControlFlow::Continue(())
                    })?;

                    for (out, inner) in passes.into_iter().rev() {
                        let consumed = out.len() < start.len();
                        if !consumed && !first {
                            continue;
                        }
                        if consumed {
                            work.push(Repeat::Tail { rest: out, caps: inner.clone() });
                            work.push(Repeat::Extend { start: out, caps: inner, first: false });
                        } else {
                            work.push(Repeat::Tail { rest: out, caps: inner });
                        }
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}

/// Pending work for a `+` group.
enum Repeat<'t> {
    /// Match one more repetition starting at `start`.
    Extend { start: &'t str, caps: Captures<'t>, first: bool },
    /// Try the rest of the sequence after some number of repetitions.
    Tail { rest: &'t str, caps: Captures<'t> },
}
