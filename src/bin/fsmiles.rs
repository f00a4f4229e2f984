use anyhow::{Context, Result};
use clap::Parser;
use fsmiles::*;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(about = "Convert the SMILES stored in an SDF file into FSMILES")]
struct Cli {
    /// The SDF file to read the SMILES from.
    sdf_filepath: PathBuf,

    /// Where to write the FSMILES string. Overwritten if it exists.
    fsmiles_filepath: PathBuf,

    /// The SDF data tag holding the SMILES.
    #[arg(short, long, default_value = PUBCHEM_SMILES_TAG)]
    tag: String,

    /// trace, debug, info, warn or error.
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

/// Reads, converts and writes. The output file is only touched once the
/// conversion has succeeded.
fn run(cli: &Cli) -> Result<()> {
    let smiles = read_smiles_from_sdf(&cli.sdf_filepath, &cli.tag)
        .with_context(|| format!("Failed to read SMILES from {}", cli.sdf_filepath.display()))?;
    info!("Read SMILES {} from {}", smiles, cli.sdf_filepath.display());

    let fsmiles = convert(&smiles).with_context(|| format!("Failed to convert {}", smiles))?;

    std::fs::write(&cli.fsmiles_filepath, &fsmiles)
        .with_context(|| format!("Failed to write {}", cli.fsmiles_filepath.display()))?;
    info!("Wrote FSMILES to {}", cli.fsmiles_filepath.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    /// A fresh scratch directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fsmiles-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("Failed to create scratch directory");
        dir
    }

    fn cli_for(dir: &Path, sdf: &str) -> Cli {
        let sdf_filepath = dir.join("input.sdf");
        fs::write(&sdf_filepath, sdf).expect("Failed to write SDF");
        Cli {
            sdf_filepath,
            fsmiles_filepath: dir.join("output.fsmiles"),
            tag: PUBCHEM_SMILES_TAG.to_string(),
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn test_run_writes_fsmiles() {
        let dir = scratch_dir("phenol");
        let cli = cli_for(&dir, "996\nM  END\n> <PUBCHEM_OPENEYE_CAN_SMILES>\nC1=CC=C(C=C1)O\n\n$$$$\n");

        run(&cli).expect("Failed to convert phenol");
        let written = fs::read_to_string(&cli.fsmiles_filepath).expect("Failed to read output");
        assert_eq!(
            written,
            "'start_0'c_61_0c_6c_6c_6([*])_0c_6c_61_0'sep_0'O_0'sep_0''end_0'"
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_tag_writes_nothing() {
        let dir = scratch_dir("missing-tag");
        let cli = cli_for(&dir, "996\nM  END\n> <PUBCHEM_COMPOUND_CID>\n996\n\n$$$$\n");

        assert!(run(&cli).is_err());
        assert!(!cli.fsmiles_filepath.exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_smiles_writes_nothing() {
        let dir = scratch_dir("malformed");
        let cli = cli_for(&dir, "> <PUBCHEM_OPENEYE_CAN_SMILES>\nC#N\n\n$$$$\n");

        assert!(run(&cli).is_err());
        assert!(!cli.fsmiles_filepath.exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
