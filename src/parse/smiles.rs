// src/parse/smiles.rs

use nom::{
    branch::alt,
    character::complete::{char, digit0, satisfy},
    combinator::{map, opt, recognize, value},
    multi::many0,
    sequence::pair,
    IResult,
};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmilesError {
    #[error("Empty SMILES string")]
    Empty,
    #[error("Unsupported character '{1}' at position {0}")]
    UnsupportedCharacter(usize, char),
    #[error("Ring {0} is opened but never closed")]
    UnclosedRing(u8),
    #[error("Ring {0} closes on atom {1}, which carries another ring closure")]
    SharedClosure(u8, String),
    #[error("More than {0} ring closures")]
    TooManyRings(u8),
    #[error("Cannot reverse group {0}: side-branches must not nest or repeat")]
    NestedBranch(String),
}

/// An atom symbol together with the ring-closure digits written after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    symbol: String,
    ring: String,
}

impl Atom {
    pub fn new(symbol: impl Into<String>, ring: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ring: ring.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The ring-closure digits, e.g. `"1"` for `C1`. Empty for chain atoms.
    pub fn ring(&self) -> &str {
        &self.ring
    }

    pub fn has_ring(&self) -> bool {
        !self.ring.is_empty()
    }

    /// Does this atom open (or close) the ring labelled `label`?
    pub fn opens(&self, label: &str) -> bool {
        !label.is_empty() && self.ring.starts_with(label)
    }

    pub fn set_ring(&mut self, label: &str) {
        self.ring = label.to_string();
    }

    pub fn without_ring(&self) -> Self {
        Self::new(self.symbol.clone(), "")
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}", self.symbol, self.ring)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Atom(Atom),
    /// The `=` bond marker.
    Double,
    BranchOpen,
    BranchClose,
}

impl Token {
    pub fn atom(symbol: &str, ring: &str) -> Self {
        Token::Atom(Atom::new(symbol, ring))
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Token::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Token::Atom(_))
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Token::BranchOpen | Token::BranchClose)
    }

    pub fn opens(&self, label: &str) -> bool {
        self.as_atom().is_some_and(|atom| atom.opens(label))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Token::Atom(atom) => write!(f, "{}", atom),
            Token::Double => write!(f, "="),
            Token::BranchOpen => write!(f, "("),
            Token::BranchClose => write!(f, ")"),
        }
    }
}

/// Write a token list back out as SMILES text.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

type Res<'a, T> = IResult<&'a str, T>;

fn parse_atom(input: &str) -> Res<Token> {
    let symbol = recognize(pair(
        satisfy(|c| c.is_ascii_uppercase()),
        opt(satisfy(|c| c.is_ascii_lowercase())),
    ));
    map(pair(symbol, digit0), |(symbol, ring): (&str, &str)| {
        Token::atom(symbol, ring)
    })(input)
}

fn parse_token(input: &str) -> Res<Token> {
    alt((
        parse_atom,
        value(Token::Double, char('=')),
        value(Token::BranchOpen, char('(')),
        value(Token::BranchClose, char(')')),
    ))(input)
}

/// Splits SMILES text into tokens.
///
/// Only plain atoms (`C`, `Cl`, `N1`, ...), `=` and parentheses are understood.
/// Everything else is reported with its position.
pub fn tokenize(smiles: &str) -> Result<Vec<Token>, SmilesError> {
    let (rest, tokens) = match many0(parse_token)(smiles) {
        Ok(parsed) => parsed,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => (e.input, Vec::new()),
        Err(nom::Err::Incomplete(_)) => (smiles, Vec::new()),
    };
    match rest.chars().next() {
        Some(c) => Err(SmilesError::UnsupportedCharacter(smiles.len() - rest.len(), c)),
        None => Ok(tokens),
    }
}
