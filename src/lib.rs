//! Converts SMILES strings into FSMILES, a fragment-oriented token sequence
//! for molecular language models.
//!
//! A molecule is cut into rings and the acyclic fragments between them,
//! reordered around an acyclic "hinge" fragment, and each group is rewritten
//! with ring-size annotations and attachment-point wildcards.

use std::str::FromStr;
use tracing::{debug, info, instrument, Level};

mod error;
pub use error::*;

mod parse;
pub use parse::*;

mod group;
pub use group::*;

mod pivot;
pub use pivot::*;

mod encode;
pub use encode::*;

/// Install a global `tracing` subscriber printing events up to `level`
/// (`"trace"`, `"debug"`, `"info"`, `"warn"` or `"error"`).
///
/// Unknown levels fall back to `warn`. Calling this more than once is harmless:
/// only the first call installs a subscriber.
pub fn init_logging(level: &str) {
    let level = Level::from_str(level).unwrap_or(Level::WARN);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Converts a SMILES string to FSMILES with the default sentinels.
///
/// ```
/// let fsmiles = fsmiles::convert("CCO").unwrap();
/// assert_eq!(fsmiles, "'start_0'C_0C_0O_0'sep_0''end_0'");
/// ```
pub fn convert(smiles: &str) -> Result<String, FsmilesError> {
    convert_with(smiles, &Sentinels::default())
}

/// Converts a SMILES string to FSMILES, framing it with `sentinels`.
///
/// # Arguments
///
/// * `smiles` - A SMILES string without stereo, charges, isotopes or aromatic lowercase atoms.
/// * `sentinels` - The start, separator and end tokens.
///
/// # Returns
///
/// * `Result<String, FsmilesError>` - The FSMILES string, or `MalformedInput` for SMILES this converter does not handle.
#[instrument(skip(sentinels))]
pub fn convert_with(smiles: &str, sentinels: &Sentinels) -> Result<String, FsmilesError> {
    let groups = segment(smiles)?;
    let pivot = find_pivot(&groups);
    debug!("Pivot: {:?}", pivot);

    let groups = rearrange(groups, pivot)?;
    let encoded: Vec<FsmilesGroup> = groups.iter().map(Group::to_fsmiles).collect();

    let fsmiles = assemble(&encoded, sentinels);
    info!("Converted {} into {}", smiles, fsmiles);
    Ok(fsmiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acyclic() {
        assert_eq!(convert("CCO").unwrap(), "'start_0'C_0C_0O_0'sep_0''end_0'");
        assert_eq!(convert("CCl").unwrap(), "'start_0'C_0Cl_0'sep_0''end_0'");
    }

    #[test]
    fn test_methylcyclohexane() {
        assert_eq!(
            convert("CC1CCCCC1").unwrap(),
            "'start_0'C_0'sep_0'C_61_0C_6C_6C_6C_6C_61_0[*]_0'sep_0''end_0'"
        );
    }

    #[test]
    fn test_cresol() {
        assert_eq!(
            convert("CC1=CC=C(C=C1)O").unwrap(),
            "'start_0'C_0'sep_0'c_61_0c_6c_6c_6([*])_0c_6c_61_0'sep_0'O_0'sep_0''end_0'"
        );
    }

    #[test]
    fn test_salicylaldehyde() {
        assert_eq!(
            convert("OC1=CC=CC=C1C=O").unwrap(),
            "'start_0'O_0'sep_0'c_61_0c_6c_6c_6c_6c_61_0[*]_0'sep_0'C_0=_0O_0'sep_0''end_0'"
        );
    }

    #[test]
    fn test_pivot_restarts_sequence() {
        assert_eq!(
            convert("C1CCCCC1CC2CCCCC2").unwrap(),
            "'start_0'C_0'sep_0'C_61_0C_6C_6C_6C_6C_61_0[*]_0'sep_0'C_61_0C_6([*])_0C_6C_6C_6C_61_0'sep_0''end_0'"
        );
        assert_eq!(
            convert("C1CC1CCOCC2CC2").unwrap(),
            "'start_0'C_0C_0O_0C_0'sep_0'C_31_0C_3C_31_0[*]_0'sep_0'C_31_0C_3([*])_0C_31_0'sep_0''end_0'"
        );
        assert_eq!(
            convert("C1CCC(CC1)NC2=CC=CC=C2").unwrap(),
            "'start_0'N_0'sep_0'c_61_0c_6c_6c_6c_6c_61_0[*]_0'sep_0'C_61_0C_6C_6C_6([*])_0C_6C_61_0'sep_0''end_0'"
        );
    }

    #[test]
    fn test_pivot_past_middle() {
        assert_eq!(
            convert("C1CC1C2CC2C3CC3CC4CC4").unwrap(),
            "'start_0'C_0'sep_0'C_31_0C_3([*])_0C_31_0'sep_0'C_31_0C_3([*])_0C_31_0'sep_0'C_31_0C_3([*])_0C_31_0'sep_0'C_31_0C_3C_31_0[*]_0'sep_0''end_0'"
        );
    }

    #[test]
    fn test_nine_rings() {
        let fsmiles = convert("C1CC1C2CC2C3CC3C4CC4C5CC5C6CC6C7CC7C8CC8C9CC9C").unwrap();
        let rings = "C_31_0C_3C_31_0[*]_0'sep_0'".repeat(9);
        assert_eq!(fsmiles, format!("'start_0'{rings}C_0'sep_0''end_0'"));
    }

    #[test]
    fn test_phenylalanine() {
        assert_eq!(
            convert("C1=CC=C(C=C1)CC(C(=O)O)N").unwrap(),
            "'start_0'c_61_0c_6c_6c_6([*])_0c_6c_61_0'sep_0'C_0C_0([*])_0C_0([*])_0=_0O_0O_0N_0'sep_0''end_0'"
        );
    }

    #[test]
    fn test_custom_sentinels() {
        let sentinels = Sentinels {
            start: "<bos>".to_string(),
            sep: " ".to_string(),
            end: "<eos>".to_string(),
        };
        assert_eq!(
            convert_with("CC1CCCCC1", &sentinels).unwrap(),
            "<bos>C_0 C_61_0C_6C_6C_6C_6C_61_0[*]_0 <eos>"
        );
    }

    #[test]
    fn test_malformed_input() {
        init_logging("trace");
        for smiles in ["", "C#N", "[NH4+]", "c1ccccc1", "C1CCC", "C1CCCC12", "C(C)C(C)C1CC1CC2CC2"] {
            let result = convert(smiles);
            assert!(
                matches!(result, Err(FsmilesError::MalformedInput(_))),
                "{smiles}: {result:?}"
            );
        }
    }
}
