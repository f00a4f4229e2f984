use crate::SmilesError;
use thiserror::Error;

/// Everything that can go wrong between an SDF file and an FSMILES string.
#[derive(Error, Debug)]
pub enum FsmilesError {
    #[error("SMILES tag <{tag}> not found in the SDF content")]
    NotFound { tag: String },
    #[error("Malformed SMILES input: {0}")]
    MalformedInput(#[from] SmilesError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
