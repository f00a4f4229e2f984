// src/group/segment.rs

use crate::{render, tokenize, Atom, Group, SmilesError, Token};
use tracing::*;

/// Ring-closure labels are single digits.
pub const MAX_RING_INDEX: u8 = 9;

/// One cut made by the segmenter.
enum Cut<'a> {
    /// A complete ring and whatever follows it.
    Ring(&'a [Token], &'a [Token]),
    /// A fragment ending right before the atom that opens the next ring.
    Fragment(&'a [Token], &'a [Token]),
    /// Nothing opens the current ring index any more, so the rest is one group.
    Tail(&'a [Token]),
}

fn cut(rest: &[Token], ring_index: u8) -> Result<Cut<'_>, SmilesError> {
    if ring_index > MAX_RING_INDEX {
        // Past the last label, only a ring-free remainder can be cut.
        if rest.iter().filter_map(Token::as_atom).any(Atom::has_ring) {
            return Err(SmilesError::TooManyRings(MAX_RING_INDEX));
        }
        return Ok(Cut::Tail(rest));
    }

    let label = ring_index.to_string();

    if rest[0].opens(&label) {
        let close = rest[1..]
            .iter()
            .rposition(|t| t.opens(&label))
            .map(|i| i + 1)
            .ok_or(SmilesError::UnclosedRing(ring_index))?;

        if let Some(atom) = rest[close].as_atom() {
            if atom.ring() != label {
                return Err(SmilesError::SharedClosure(ring_index, atom.to_string()));
            }
        }

        let mut end = close + 1;
        if rest.get(end) == Some(&Token::BranchClose) {
            end += 1;
        }
        return Ok(Cut::Ring(&rest[..end], &rest[end..]));
    }

    Ok(match rest.iter().position(|t| t.opens(&label)) {
        Some(start) => Cut::Fragment(&rest[..start], &rest[start..]),
        None => Cut::Tail(rest),
    })
}

/// Cuts a SMILES string into its rings and acyclic fragments, left to right.
///
/// The ring index starts at 1 and only moves on once the ring it labels has
/// been cut out, so every ring is looked up by the label it is expected to
/// carry.
///
/// # Arguments
///
/// * `smiles` - The SMILES string to segment.
///
/// # Returns
///
/// * `Result<Vec<Group>, SmilesError>` - The groups, whose concatenated text is `smiles`.
pub fn segment(smiles: &str) -> Result<Vec<Group>, SmilesError> {
    let tokens = tokenize(smiles)?;
    if tokens.is_empty() {
        return Err(SmilesError::Empty);
    }

    let mut groups = Vec::new();
    let mut rest = tokens.as_slice();
    let mut ring_index = 1;
    while !rest.is_empty() {
        match cut(rest, ring_index)? {
            Cut::Ring(ring, remainder) => {
                trace!("Ring {}: {}", ring_index, render(ring));
                groups.push(Group::new(ring.to_vec()));
                rest = remainder;
                ring_index += 1;
            }
            Cut::Fragment(fragment, remainder) => {
                trace!("Fragment: {}", render(fragment));
                groups.push(Group::new(fragment.to_vec()));
                rest = remainder;
            }
            Cut::Tail(tail) => {
                trace!("Tail: {}", render(tail));
                groups.push(Group::new(tail.to_vec()));
                break;
            }
        }
    }

    debug!("Segmented {} into {} groups", smiles, groups.len());
    Ok(groups)
}
