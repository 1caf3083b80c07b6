use std::io;
use thiserror::Error;

use crate::parsers::fields::Field;
use crate::parsers::records::RecordKind;
use crate::parsers::residues::ResidueKey;

/// What went wrong when reading a line of a recognised record type?
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Expected a {expected} record, found {found:?}.")]
    WrongRecordType {
        expected: &'static str,
        found: String,
    },
    #[error("The {field} field is not a valid number: {content:?}.")]
    InvalidNumber { field: Field, content: String },
    #[error("The {0} field is required but blank.")]
    MissingField(Field),
}

impl FormatError {
    pub(crate) fn wrong_record_type(expected: &[RecordKind], found: &str) -> Self {
        let expected = match expected {
            [RecordKind::Atom, RecordKind::HetAtom] => "ATOM or HETATM",
            [kind, ..] => kind.keyword(),
            [] => "known",
        };
        Self::WrongRecordType {
            expected,
            found: found.trim_end().to_string(),
        }
    }
}

/// Failure while reading a whole PDB file.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Line {line}: {source}")]
    Format {
        /// 1-based line number in the input.
        line: usize,
        source: FormatError,
    },
    #[error("Error while reading the file: {0}")]
    IOError(#[from] io::Error),
}

/// A residue does not contain an atom with the requested name.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("No atom named {name:?} in residue {residue}.")]
pub struct LookupError {
    pub name: String,
    pub residue: ResidueKey,
}

/// Atoms that cannot be assembled into a residue.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResidueError {
    #[error("A residue needs at least one atom.")]
    Empty,
    #[error("Atom of residue {found} cannot be added to residue {expected}.")]
    MixedKeys {
        expected: ResidueKey,
        found: ResidueKey,
    },
}
