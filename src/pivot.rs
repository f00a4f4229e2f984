// src/pivot.rs

use crate::{Group, SmilesError};
use tracing::*;

/// Finds the first acyclic group that is neither the first nor the last one.
///
/// This "hinge" is where the molecule is read outwards from. Returns `None`
/// when every interior group is a ring.
pub fn find_pivot(groups: &[Group]) -> Option<usize> {
    let last = groups.len().checked_sub(1)?;
    (1..last).find(|&i| !groups[i].is_ring())
}

/// Reorders the groups so the sequence starts from the pivot.
///
/// If the pivot lies past the middle, the groups up to and including the
/// pivot are flipped in reverse order and put back in place of that prefix.
/// Otherwise the sequence restarts at the pivot and the groups before it are
/// appended, flipped, from the pivot outwards.
///
/// # Arguments
///
/// * `groups` - The segmented groups, in SMILES order.
/// * `pivot` - The pivot index from [`find_pivot`].
///
/// # Returns
///
/// * `Result<Vec<Group>, SmilesError>` - The rearranged groups, or the first group that could not be flipped.
pub fn rearrange(groups: Vec<Group>, pivot: Option<usize>) -> Result<Vec<Group>, SmilesError> {
    let Some(pivot) = pivot.filter(|&p| p > 0 && p < groups.len()) else {
        return Ok(groups);
    };

    let flip_back = |end: usize| -> Result<Vec<Group>, SmilesError> {
        groups[..=end].iter().rev().map(Group::flipped).collect()
    };

    let rearranged = if pivot > groups.len() / 2 {
        debug!("Pivot {} is past the middle of {} groups", pivot, groups.len());
        let mut rearranged = flip_back(pivot)?;
        rearranged.extend_from_slice(&groups[pivot + 1..]);
        rearranged
    } else {
        debug!("Restarting {} groups at pivot {}", groups.len(), pivot);
        let mut rearranged = groups[pivot..].to_vec();
        rearranged.extend(flip_back(pivot - 1)?);
        rearranged
    };

    Ok(rearranged)
}
