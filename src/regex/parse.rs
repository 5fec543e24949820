// One pass over the pattern text, producing the node tree the generator walks.
//
// Every structural decision is delegated to `scan`, `atom` and `backref`, so
// the tree is exactly what rescanning the text at each step would see.

use super::atom::{next_atom, Atom};
use super::{backref, scan};
use crate::error::PatternError;

/// Repetition applied to the preceding atom or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Quantifier {
    One,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
}

impl Quantifier {
    /// Take a quantifier off the front of `rest`, if there is one.
    fn split(rest: &str) -> (Quantifier, &str) {
        if let Some(tail) = rest.strip_prefix('+') {
            (Quantifier::OneOrMore, tail)
        } else if let Some(tail) = rest.strip_prefix('?') {
            (Quantifier::ZeroOrOne, tail)
        } else {
            (Quantifier::One, rest)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Atom {
        atom: Atom,
        quant: Quantifier,
    },
    Group {
        id: usize,
        alts: Vec<Vec<Node>>,
        quant: Quantifier,
    },
    /// 1-based group number as written.
    Backref(usize),
}

/// Compile `pattern` into a node sequence whose first group gets `next_id`.
///
/// A group takes the next free id; every alternative of its body numbers
/// its own groups from `id + 1`; the siblings after it resume at
/// `id + 1 + count_groups(body)`.
pub(crate) fn parse_seq(mut pattern: &str, mut next_id: usize) -> Result<Vec<Node>, PatternError> {
    let mut nodes = Vec::new();

    while !pattern.is_empty() {
        if let Some((number, rest)) = backref::parse(pattern) {
            nodes.push(Node::Backref(number));
            pattern = rest;
            continue;
        }

        if pattern.starts_with('(') {
            let close = scan::find_close(pattern, 0)?;
            let body = &pattern[1..close];
            let (quant, rest) = Quantifier::split(&pattern[close + 1..]);
            let alts = scan::split_alts(body)
                .into_iter()
                .map(|alt| parse_seq(alt, next_id + 1))
                .collect::<Result<Vec<_>, _>>()?;

            nodes.push(Node::Group { id: next_id, alts, quant });
            next_id += 1 + scan::count_groups(body);
            pattern = rest;
            continue;
        }

        let Some((atom, rest)) = next_atom(pattern)? else {
            break;
        };
        let (quant, rest) = Quantifier::split(rest);
        nodes.push(Node::Atom { atom, quant });
        pattern = rest;
    }

    Ok(nodes)
}
