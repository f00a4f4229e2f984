//! Pulls the SMILES data item out of an SDF record.

use crate::FsmilesError;
use nom::{
    bytes::complete::{tag, take_till},
    sequence::terminated,
    IResult,
};
use std::path::Path;
use tracing::*;

/// The PubChem data item holding the canonical (OpenEye) SMILES string.
pub const PUBCHEM_SMILES_TAG: &str = "PUBCHEM_OPENEYE_CAN_SMILES";

/// A data item value is one line followed by the blank line ending the item.
fn data_value(input: &str) -> IResult<&str, &str> {
    terminated(take_till(|c| c == '\n'), tag("\n\n"))(input)
}

/// Finds the value of the `<tag>` data item in SDF text.
///
/// The first `<tag>` header whose value line is followed by a blank line
/// wins. Windows line endings are accepted.
pub fn find_smiles_in_sdf(content: &str, tag: &str) -> Result<String, FsmilesError> {
    let content = content.replace("\r\n", "\n");
    let header = format!("<{tag}>\n");

    let mut search = content.as_str();
    while let Some(start) = search.find(&header) {
        if let Ok((_, value)) = data_value(&search[start + header.len()..]) {
            debug!("Found <{}> data item: {}", tag, value);
            return Ok(value.to_string());
        }
        search = &search[start + 1..];
    }

    warn!("SMILES tag <{}> not found", tag);
    Err(FsmilesError::NotFound {
        tag: tag.to_string(),
    })
}

/// Reads an SDF file and returns the SMILES string stored under `tag`.
pub fn read_smiles_from_sdf(path: impl AsRef<Path>, tag: &str) -> Result<String, FsmilesError> {
    let path = path.as_ref();
    trace!("Reading SDF file {}", path.display());
    let content = std::fs::read_to_string(path)?;
    find_smiles_in_sdf(&content, tag)
}
