// src/group/reverse.rs

use crate::{Group, SmilesError, Token};
use tracing::*;

/// Rewrites every non-overlapping `atom = atom` into `atom atom =`, so a
/// double bond trails the atom it was written in front of.
fn trail_double_bonds(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if let [a, Token::Double, b, ..] = &tokens[i..] {
            if a.is_atom() && b.is_atom() {
                result.extend([a.clone(), b.clone(), Token::Double]);
                i += 3;
                continue;
            }
        }
        result.push(tokens[i].clone());
        i += 1;
    }
    result
}

/// Can `tokens` be read as exactly `units` atoms, each with at most one `=`
/// in front of it and one behind it?
fn splits_into_units(tokens: &[Token], units: usize) -> bool {
    let atoms: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_atom())
        .map(|(i, _)| i)
        .collect();

    match (atoms.first(), atoms.last()) {
        _ if atoms.len() != units => false,
        (Some(&first), Some(&last)) => {
            first <= 1
                && tokens.len() - 1 - last <= 1
                && atoms.windows(2).all(|pair| pair[1] - pair[0] - 1 <= 2)
        }
        _ => tokens.is_empty(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chain {
    /// The main chain of a group that has no side-branch.
    Whole,
    /// The main chain of a group whose side-branch is reversed separately.
    Main,
    Branch,
}

fn reverse_chain(group: &Group, chain: &[Token], label: &str, kind: Chain) -> Result<Vec<Token>, SmilesError> {
    if chain.iter().any(Token::is_branch) {
        return Err(SmilesError::NestedBranch(group.to_string()));
    }

    let mut reversed: Vec<Token> = chain
        .iter()
        .rev()
        .map(|t| match t {
            Token::Atom(atom) => Token::Atom(atom.without_ring()),
            other => other.clone(),
        })
        .collect();

    if kind != Chain::Branch {
        if let Some(Token::Atom(first)) = reversed.first_mut() {
            first.set_ring(label);
        }
    }

    if kind != Chain::Main {
        let n = reversed.len();
        let last = match reversed.as_slice() {
            [.., Token::Atom(_)] => Some(n - 1),
            [.., Token::Atom(_), Token::Double] => Some(n - 2),
            _ => None,
        };
        if let Some(Token::Atom(atom)) = last.map(|i| &mut reversed[i]) {
            if !atom.has_ring() {
                atom.set_ring(label);
            }
        }
    }

    Ok(reversed)
}

impl Group {
    /// Re-reads a ring group from its other end, before [`Group::reversed`].
    ///
    /// Parentheses are dropped and the tokens reversed, with double bonds
    /// moved behind their atom. The trailing atoms that do not belong to the
    /// main ring path (everything except the old side-branch and the two ring
    /// ends) are then wrapped back into a side-branch.
    pub fn relabeled(&self) -> Group {
        let branch_atoms = self
            .branch_span()
            .map(|(open, close)| {
                self.tokens()[open..=close]
                    .iter()
                    .filter(|t| t.is_atom())
                    .count()
            })
            .unwrap_or(0);

        let mut body: Vec<Token> = self
            .tokens()
            .iter()
            .filter(|t| !t.is_branch())
            .rev()
            .cloned()
            .collect();
        body = trail_double_bonds(body);

        let Some(units) = self.atom_count().checked_sub(branch_atoms + 2) else {
            return Group::new(body);
        };
        if let Some(start) = (0..=body.len()).find(|&p| splits_into_units(&body[p..], units)) {
            body.insert(start, Token::BranchOpen);
            body.push(Token::BranchClose);
        }
        Group::new(body)
    }

    /// The same group read from its other end.
    ///
    /// The side-branch, if any, is reversed on its own and appended after the
    /// reversed main chain. The leading ring label moves to the new first
    /// atom; the new last atom gets it too when there is no side-branch,
    /// otherwise the last atom of the side-branch does.
    ///
    /// # Returns
    ///
    /// * `Result<Group, SmilesError>` - Fails if either chain still contains parentheses.
    pub fn reversed(&self) -> Result<Group, SmilesError> {
        let label = self.leading_ring();
        let tokens = self.tokens();

        let reversed = match self.branch_span() {
            Some((open, close)) => {
                let branch = reverse_chain(self, &tokens[open + 1..close], label, Chain::Branch)?;
                let main: Vec<Token> = tokens[..open].iter().chain(&tokens[close + 1..]).cloned().collect();

                let mut reversed = reverse_chain(self, &main, label, Chain::Main)?;
                reversed.push(Token::BranchOpen);
                reversed.extend(branch);
                reversed.push(Token::BranchClose);
                reversed
            }
            None => reverse_chain(self, tokens, label, Chain::Whole)?,
        };

        Ok(Group::new(reversed))
    }

    /// Turns a group around for the rearranged sequence: rings are relabeled
    /// first, then every group is reversed.
    pub fn flipped(&self) -> Result<Group, SmilesError> {
        let flipped = if self.is_ring() {
            self.relabeled().reversed()?
        } else {
            self.reversed()?
        };
        trace!("Flipped {} into {}", self, flipped);
        Ok(flipped)
    }
}
