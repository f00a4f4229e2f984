// src/encode.rs

use crate::{render, Atom, Group, Token};
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::*;

/// One token of the FSMILES encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FsmilesToken {
    /// An atom tagged with the size of the ring it sits in (0 if acyclic).
    /// Atoms that carried a ring-closure label are marked as position zero.
    Atom {
        symbol: String,
        ring_size: usize,
        position_zero: bool,
    },
    /// A double bond inside a group, tagged with the ring size.
    Bond { ring_size: usize },
    /// A `=` that no rule claimed; written out as is.
    Double,
    /// The open end of a ring: `[*]`.
    Wildcard,
    /// The start of a side-branch: `([*])`.
    Branch,
}

impl FsmilesToken {
    fn atom(atom: &Atom, ring_size: usize) -> Self {
        FsmilesToken::Atom {
            symbol: atom.symbol().to_string(),
            ring_size,
            position_zero: atom.has_ring(),
        }
    }
}

impl Display for FsmilesToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FsmilesToken::Atom {
                symbol,
                ring_size,
                position_zero,
            } => {
                write!(f, "{}_{}", symbol, ring_size)?;
                if *position_zero {
                    write!(f, "1_0")?;
                }
                Ok(())
            }
            FsmilesToken::Bond { ring_size } => write!(f, "=_{}", ring_size),
            FsmilesToken::Double => write!(f, "="),
            FsmilesToken::Wildcard => write!(f, "[*]_0"),
            FsmilesToken::Branch => write!(f, "([*])_0"),
        }
    }
}

/// A group in FSMILES form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FsmilesGroup {
    pub tokens: Vec<FsmilesToken>,
    /// Aromatic rings are written in lowercase.
    pub aromatic: bool,
}

impl Display for FsmilesGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let text: String = self.tokens.iter().map(ToString::to_string).collect();
        if self.aromatic {
            write!(f, "{}", text.to_lowercase())
        } else {
            write!(f, "{}", text)
        }
    }
}

fn is_atom_where(token: Option<&Token>, pred: impl Fn(&str) -> bool) -> bool {
    token.and_then(Token::as_atom).is_some_and(|atom| pred(atom.symbol()))
}

/// When a group has back-to-back side-branches, the first branch is moved
/// (reversed) in front of its base atom, leaving `()` behind.
///
/// Every `atom(...)` in the group is rewritten with that same first branch.
fn rotate_branches(tokens: Vec<Token>) -> Vec<Token> {
    let adjacent = tokens
        .windows(2)
        .any(|pair| pair[0] == Token::BranchClose && pair[1] == Token::BranchOpen);
    if !adjacent {
        return tokens;
    }

    let first_branch = tokens.iter().position(|t| *t == Token::BranchOpen).and_then(|open| {
        let len = tokens[open + 1..].iter().position(|t| *t == Token::BranchClose)?;
        Some(&tokens[open + 1..open + 1 + len])
    });
    let Some(first_branch) = first_branch else {
        return tokens;
    };
    let moved: Vec<Token> = first_branch.iter().rev().cloned().collect();

    let mut rotated = Vec::with_capacity(tokens.len() + moved.len());
    let mut i = 0;
    while i < tokens.len() {
        if let [Token::Atom(base), Token::BranchOpen, ..] = &tokens[i..] {
            let close = tokens[i + 2..].iter().position(|t| *t == Token::BranchClose);
            if let (false, Some(len)) = (base.has_ring(), close) {
                rotated.extend(moved.iter().cloned());
                rotated.extend([Token::Atom(base.clone()), Token::BranchOpen, Token::BranchClose]);
                i += len + 3;
                continue;
            }
        }
        rotated.push(tokens[i].clone());
        i += 1;
    }
    rotated
}

/// Drops the `=` of every `C=C`, `C=N`, `N=C` and `N=N` bond: they are
/// written as single bonds. The left atom must be a bare `C` or `N`.
fn fold_double_bonds(tokens: Vec<Token>) -> Vec<Token> {
    let mut folded = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if let [Token::Atom(a), Token::Double, next @ Token::Atom(b), ..] = &tokens[i..] {
            if matches!(a.symbol(), "C" | "N") && b.symbol().starts_with(['C', 'N']) {
                folded.extend([tokens[i].clone(), next.clone()]);
                i += 3;
                continue;
            }
        }
        folded.push(tokens[i].clone());
        i += 1;
    }
    folded
}

/// Drops a `=` that opens a side-branch towards a carbon: `(=C` becomes `(C`.
fn strip_branch_bonds(tokens: Vec<Token>) -> Vec<Token> {
    let keep: Vec<bool> = (0..tokens.len())
        .map(|i| {
            !(tokens[i] == Token::Double
                && i > 0
                && tokens[i - 1] == Token::BranchOpen
                && is_atom_where(tokens.get(i + 1), |s| s.starts_with('C')))
        })
        .collect();
    tokens.into_iter().zip(keep).filter_map(|(t, keep)| keep.then_some(t)).collect()
}

/// Converts one group, already in its final direction, into FSMILES.
///
/// # Arguments
///
/// * `group` - The group to encode.
/// * `ring_size` - Its ring size, 0 for acyclic fragments.
pub fn transform(group: &Group, ring_size: usize) -> FsmilesGroup {
    let tokens = rotate_branches(group.tokens().to_vec());
    let saturated = Group::new(tokens.clone()).is_saturated();
    let tokens = strip_branch_bonds(fold_double_bonds(tokens));

    let open_end = matches!(tokens.last(), Some(Token::Atom(atom)) if atom.has_ring());

    let mut encoded = Vec::with_capacity(tokens.len() + 1);
    for (i, token) in tokens.iter().enumerate() {
        match (token, tokens.get(i + 1)) {
            (Token::Atom(atom), _) => encoded.push(FsmilesToken::atom(atom, ring_size)),
            (Token::Double, Some(Token::Atom(_))) => encoded.push(FsmilesToken::Bond { ring_size }),
            (Token::Double, Some(Token::BranchClose)) | (Token::BranchClose, _) => {}
            (Token::Double, _) => encoded.push(FsmilesToken::Double),
            (Token::BranchOpen, _) => encoded.push(FsmilesToken::Branch),
        }
    }
    if open_end {
        encoded.push(FsmilesToken::Wildcard);
    }

    let fsmiles = FsmilesGroup {
        tokens: encoded,
        aromatic: !saturated && ring_size > 0,
    };
    trace!("Transformed {} (ring size {}) into {}", render(group.tokens()), ring_size, fsmiles);
    fsmiles
}

impl Group {
    pub fn to_fsmiles(&self) -> FsmilesGroup {
        transform(self, self.ring_size())
    }
}

/// The tokens framing an FSMILES sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinels {
    pub start: String,
    pub sep: String,
    pub end: String,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            start: "'start_0'".to_string(),
            sep: "'sep_0'".to_string(),
            end: "'end_0'".to_string(),
        }
    }
}

/// Joins encoded groups: the start sentinel, every group followed by a
/// separator, then the end sentinel.
pub fn assemble(groups: &[FsmilesGroup], sentinels: &Sentinels) -> String {
    let mut fsmiles = sentinels.start.clone();
    for group in groups {
        fsmiles += &group.to_string();
        fsmiles += &sentinels.sep;
    }
    fsmiles += &sentinels.end;
    fsmiles
}
