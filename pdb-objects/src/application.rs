use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::parsers::{read_pdb_file, ErrorPolicy, PdbFile, ReadError, ReadOptions, RecordKind};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// The PDB file to read.
    #[clap(value_parser)]
    pub input: PathBuf,
    /// Only keep these record types; repeat the option to keep several.
    #[clap(long = "only", value_enum)]
    pub only: Vec<RecordKind>,
    /// Log and skip the malformed records instead of failing.
    #[clap(long, value_parser, default_value_t = false)]
    pub skip_malformed: bool,
    /// Print the records as JSON instead of a summary.
    #[clap(long, value_parser, default_value_t = false)]
    pub json: bool,
    /// Display debug messages.
    #[clap(short, long, value_parser, default_value_t = false)]
    pub verbose: bool,
    /// Display every message, including the trace for each record.
    #[clap(long, value_parser, default_value_t = false)]
    pub trace: bool,
}

impl Cli {
    pub fn read_options(&self) -> ReadOptions {
        let mut options = ReadOptions::new();
        if !self.only.is_empty() {
            options = options.with_record_kinds(self.only.iter().copied());
        }
        if self.skip_malformed {
            options = options.with_error_policy(ErrorPolicy::Skip);
        }
        options
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cannot read the input file: {0}")]
    CannotReadInputFile(#[from] ReadError),
    #[error("Cannot serialize the records.")]
    CannotSerialize(#[from] serde_json::Error),
    #[error("Cannot write the output.")]
    CannotWriteOutput(#[from] std::io::Error),
}

/// Record counts of a file, as printed by the command line.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub atoms: usize,
    pub hetero_atoms: usize,
    pub residues: usize,
    pub chains: usize,
    pub helices: usize,
    pub sheets: usize,
    pub terminators: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn from_pdb(pdb: &PdbFile) -> Self {
        let hetero_atoms = pdb.atoms().filter(|atom| atom.hetero).count();
        Self {
            atoms: pdb.atoms().count() - hetero_atoms,
            hetero_atoms,
            residues: pdb.residues().len(),
            chains: pdb.chains().len(),
            helices: pdb.helices().count(),
            sheets: pdb.sheets().count(),
            terminators: pdb.ters().count(),
            skipped: pdb.skipped().len(),
        }
    }
}

fn write_summary<W: Write>(pdb: &PdbFile, output: &mut W) -> Result<(), AppError> {
    let summary = Summary::from_pdb(pdb);
    writeln!(output, "ATOM records:    {}", summary.atoms)?;
    writeln!(output, "HETATM records:  {}", summary.hetero_atoms)?;
    writeln!(output, "Residues:        {}", summary.residues)?;
    writeln!(output, "Chains:          {}", summary.chains)?;
    for chain in pdb.chains() {
        let terminator = match chain.terminator().and_then(|ter| ter.serial) {
            Some(serial) => format!("TER {serial}"),
            None => String::from("no TER"),
        };
        writeln!(
            output,
            "  {:<3} {} residues, {terminator}",
            chain.id(),
            chain.len()
        )?;
    }
    writeln!(output, "HELIX records:   {}", summary.helices)?;
    writeln!(output, "SHEET records:   {}", summary.sheets)?;
    writeln!(output, "TER records:     {}", summary.terminators)?;
    if summary.skipped > 0 {
        writeln!(output, "Skipped lines:   {}", summary.skipped)?;
    }
    Ok(())
}

pub fn main_to_wrap<W: Write>(cli: Cli, output: &mut W) -> Result<(), AppError> {
    debug!("{cli:?}");
    let pdb = read_pdb_file(&cli.input, &cli.read_options())?;
    info!(
        "Read {} records from {}.",
        pdb.len(),
        cli.input.display()
    );
    for error in pdb.skipped() {
        warn!("Skipped: {error}");
    }

    if cli.json {
        serde_json::to_writer_pretty(&mut *output, pdb.records())?;
        writeln!(output)?;
    } else {
        write_summary(&pdb, output)?;
    }
    Ok(())
}
