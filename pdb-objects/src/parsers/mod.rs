pub type Position = [f64; 3];

pub mod chains;
pub mod chemistry;
pub mod errors;
pub mod fields;
pub mod pdb;
pub mod records;
pub mod residues;
pub mod structure;

pub use chains::Chain;
pub use errors::{FormatError, LookupError, ReadError, ResidueError};
pub use pdb::{
    read_atom, read_helix, read_pdb, read_pdb_file, read_pdb_str, read_pdb_with, read_record,
    read_sheet, read_ter, ErrorPolicy, ReadOptions,
};
pub use records::{Atom, AtomId, Helix, PdbRecord, RecordKind, Registration, ResidueId, Sheet, Ter};
pub use residues::{group_residues, Residue, ResidueKey};
pub use structure::{PdbEntry, PdbFile};
