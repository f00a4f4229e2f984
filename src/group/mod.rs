// src/group/mod.rs

use crate::{render, tokenize, Atom, SmilesError, Token};
use std::fmt::{Display, Formatter, Result as FmtResult};

mod segment;
pub use segment::*;

mod classify;
mod reverse;

/// A ring or an acyclic fragment cut out of a SMILES string.
///
/// Groups are plain token runs: a ring starts and ends with an atom carrying
/// the same ring-closure label, a fragment is whatever lies between rings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Group {
    tokens: Vec<Token>,
}

impl Group {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Parse a single group from its SMILES text.
    pub fn parse(text: &str) -> Result<Self, SmilesError> {
        Ok(Self::new(tokenize(text)?))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.tokens.iter().filter_map(Token::as_atom)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms().count()
    }

    /// The ring-closure digits of the leading atom, or `""` when the group
    /// does not start with an atom.
    pub fn leading_ring(&self) -> &str {
        self.tokens
            .first()
            .and_then(Token::as_atom)
            .map(Atom::ring)
            .unwrap_or("")
    }

    /// Position of the outermost side-branch: the first `(` and the last `)`.
    pub fn branch_span(&self) -> Option<(usize, usize)> {
        let open = self.tokens.iter().position(|t| *t == Token::BranchOpen)?;
        let close = self.tokens.iter().rposition(|t| *t == Token::BranchClose)?;
        (open < close).then_some((open, close))
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", render(&self.tokens))
    }
}
