// src/group/classify.rs

use crate::{Group, Token};

/// Drops every `(` ... `)` span, pairing each `(` with the first `)` after it.
fn strip_branches(tokens: &[Token]) -> Vec<&Token> {
    let mut kept = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == Token::BranchOpen {
            if let Some(len) = tokens[i + 1..].iter().position(|t| *t == Token::BranchClose) {
                i += len + 2;
                continue;
            }
        }
        kept.push(&tokens[i]);
        i += 1;
    }
    kept
}

const BOND_OR_BRANCH: &[u8] = b"=()";

fn is_branch(c: u8) -> bool {
    c == b'(' || c == b')'
}

/// Can this character follow a carbon (and its ring digits) in a single-bonded run?
fn ends_single_bond(c: u8) -> bool {
    !BOND_OR_BRANCH.contains(&c) && !c.is_ascii_digit()
}

/// Looks for a carbon that has neither a `=` nor a branch boundary directly on
/// either side, looking through at most one parenthesis on each side.
fn has_single_bonded_carbon(text: &[u8]) -> bool {
    text.iter().enumerate().filter(|&(_, &c)| c == b'C').any(|(i, _)| {
        let preceded = match i {
            0 => false,
            1 => !BOND_OR_BRANCH.contains(&text[0]),
            _ => {
                !BOND_OR_BRANCH.contains(&text[i - 1])
                    || (is_branch(text[i - 1]) && !BOND_OR_BRANCH.contains(&text[i - 2]))
            }
        };
        if !preceded {
            return false;
        }

        let next = i + 1 + text[i + 1..].iter().take_while(|c| c.is_ascii_digit()).count();
        match text.get(next) {
            Some(&c) if ends_single_bond(c) => true,
            Some(&c) if is_branch(c) => text.get(next + 1).is_some_and(|&c| ends_single_bond(c)),
            _ => false,
        }
    })
}

impl Group {
    /// Number of ring atoms, or 0 for an acyclic fragment.
    ///
    /// A group is a ring when its leading ring label shows up on at least two
    /// atoms. The ring runs up to the last of them; atoms in side-branches
    /// are not counted.
    pub fn ring_size(&self) -> usize {
        let label = self.leading_ring();
        if label.is_empty() {
            return 0;
        }

        let tokens = self.tokens();
        let openers: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.opens(label))
            .map(|(i, _)| i)
            .collect();

        match openers.as_slice() {
            [_, .., last] => strip_branches(&tokens[..=*last])
                .into_iter()
                .filter(|t| t.is_atom())
                .count(),
            _ => 0,
        }
    }

    pub fn is_ring(&self) -> bool {
        self.ring_size() > 0
    }

    /// Is this group single-bonded, as opposed to aromatic or double-bonded?
    ///
    /// This is a local pattern test on the text, not a bond-order
    /// computation: the group counts as saturated as soon as one carbon sits
    /// between two plain neighbours.
    pub fn is_saturated(&self) -> bool {
        has_single_bonded_carbon(self.to_string().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(text: &str) -> Group {
        Group::parse(text).expect("Failed to parse group")
    }

    #[test]
    fn test_ring_size() {
        assert_eq!(group("C1CCCCC1").ring_size(), 6);
        assert_eq!(group("C1=CC=CC=C1").ring_size(), 6);
        assert_eq!(group("C1CC1").ring_size(), 3);
        assert_eq!(group("CCO").ring_size(), 0);
        assert_eq!(group("CC(C)C").ring_size(), 0);
    }

    #[test]
    fn test_ring_size_skips_branches() {
        assert_eq!(group("C1CC(C)CC1").ring_size(), 5);
        assert_eq!(group("C1CCC(CC1)").ring_size(), 6);
        assert_eq!(group("C1=CC=C(C=C1)").ring_size(), 6);
        // Only the span up to the closing `)` of the first `(` is dropped.
        assert_eq!(group("C1CC(C(C)C)CC1").ring_size(), 6);
    }

    #[test]
    fn test_ring_size_needs_two_labels() {
        assert_eq!(group("C1CCCC").ring_size(), 0);
        assert_eq!(group("CC1CCC1").ring_size(), 0);
    }

    #[test]
    fn test_saturation() {
        assert!(group("C1CCCCC1").is_saturated());
        assert!(group("CCCC").is_saturated());
        assert!(group("C1CC1").is_saturated());
        assert!(group("C(C)C").is_saturated());
        assert!(group("NC(N)N").is_saturated());

        assert!(!group("C1=CC=CC=C1").is_saturated());
        assert!(!group("C=C").is_saturated());
        assert!(!group("C=O").is_saturated());
        assert!(!group("OC=C").is_saturated());
        // Two carbons give the pattern nothing to look at on either side.
        assert!(!group("CC").is_saturated());
    }
}
