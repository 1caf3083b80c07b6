//! Object-oriented processing of records from Protein Data Bank (PDB) files.
//!
//! Supported record types are `ATOM`, `HETATM`, `TER`, `HELIX` and `SHEET`.
//! Every other record type is skipped.
//!
//! ```no_run
//! use pdb_objects::parsers::{read_pdb_file, ReadOptions};
//!
//! let pdb = read_pdb_file("1crn.pdb", &ReadOptions::default()).unwrap();
//! for residue in pdb.residues() {
//!     if let Some(alpha) = residue.find_atom("CA") {
//!         println!("{} {:?}", residue.name(), alpha.position());
//!     }
//! }
//! ```
pub mod test_utils;

pub mod application;
pub mod parsers;
