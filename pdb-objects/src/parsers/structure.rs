use std::collections::HashMap;

use crate::parsers::chains::{group_chains, Chain};
use crate::parsers::errors::ReadError;
use crate::parsers::records::{Atom, Helix, PdbRecord, Sheet, Ter};
use crate::parsers::residues::{group_residues, Residue, ResidueKey};

/// A record of a file, with the atoms gathered in their residue.
#[derive(Debug, Clone, PartialEq)]
pub enum PdbEntry<'a> {
    Residue(Residue<'a>),
    Helix(&'a Helix),
    Sheet(&'a Sheet),
    Ter(&'a Ter),
}

/// The records read from a PDB file, in file order.
#[derive(Debug, Default)]
pub struct PdbFile {
    records: Vec<PdbRecord>,
    skipped: Vec<ReadError>,
}

impl PdbFile {
    pub(crate) fn new(records: Vec<PdbRecord>, skipped: Vec<ReadError>) -> Self {
        Self { records, skipped }
    }

    pub fn records(&self) -> &[PdbRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The malformed lines that were skipped while reading.
    pub fn skipped(&self) -> &[ReadError] {
        &self.skipped
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.records.iter().filter_map(PdbRecord::as_atom)
    }

    pub fn helices(&self) -> impl Iterator<Item = &Helix> {
        self.records.iter().filter_map(|record| match record {
            PdbRecord::Helix(helix) => Some(helix),
            _ => None,
        })
    }

    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.records.iter().filter_map(|record| match record {
            PdbRecord::Sheet(sheet) => Some(sheet),
            _ => None,
        })
    }

    pub fn ters(&self) -> impl Iterator<Item = &Ter> {
        self.records.iter().filter_map(|record| match record {
            PdbRecord::Ter(ter) => Some(ter),
            _ => None,
        })
    }

    /// Helices ordered by serial number.
    pub fn helices_sorted(&self) -> Vec<&Helix> {
        let mut helices: Vec<&Helix> = self.helices().collect();
        helices.sort_by_key(|helix| helix.serial);
        helices
    }

    /// Strands ordered by sheet identifier, then strand number.
    pub fn sheets_sorted(&self) -> Vec<&Sheet> {
        let mut sheets: Vec<&Sheet> = self.sheets().collect();
        sheets.sort_by(|a, b| (&a.sheet_id, a.strand).cmp(&(&b.sheet_id, b.strand)));
        sheets
    }

    pub fn residues(&self) -> Vec<Residue<'_>> {
        group_residues(self.atoms())
    }

    pub fn chains(&self) -> Vec<Chain<'_>> {
        group_chains(self.residues(), self.ters())
    }

    /// The records in file order, with each residue standing in for its atoms.
    ///
    /// A residue takes the place of its first atom.
    pub fn entries(&self) -> Vec<PdbEntry<'_>> {
        let mut entries = Vec::new();
        let mut residue_positions: HashMap<ResidueKey, usize> = HashMap::new();
        for record in &self.records {
            match record {
                PdbRecord::Atom(atom) => {
                    let key = atom.residue_key();
                    if let Some(&position) = residue_positions.get(&key) {
                        if let PdbEntry::Residue(residue) = &mut entries[position] {
                            residue.push(atom);
                        }
                    } else {
                        residue_positions.insert(key, entries.len());
                        entries.push(PdbEntry::Residue(Residue::start(atom)));
                    }
                }
                PdbRecord::Helix(helix) => entries.push(PdbEntry::Helix(helix)),
                PdbRecord::Sheet(sheet) => entries.push(PdbEntry::Sheet(sheet)),
                PdbRecord::Ter(ter) => entries.push(PdbEntry::Ter(ter)),
            }
        }
        entries
    }
}

impl From<Vec<PdbRecord>> for PdbFile {
    fn from(records: Vec<PdbRecord>) -> Self {
        Self::new(records, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::pdb::read_pdb_str;
    use crate::parsers::records::RecordKind;
    use rstest::{fixture, rstest};

    const SMALL: &str = "\
HEADER    TEST
HELIX    2   2 VAL A    2  GLY A    3  1                                   2
HELIX    1   1 MET A    1  VAL A    2  1                                   2
SHEET    2   S 2 GLY A   3  GLY A   3  1
SHEET    1   S 2 MET A   1  MET A   1  0
ATOM      1  N   MET A   1      20.154  29.699   5.276  1.00 49.05           N
ATOM      2  N   VAL A   2      22.154  28.699   5.276  1.00 49.05           N
ATOM      3  CA  MET A   1      21.618  29.660   5.168  1.00 49.05           C
ATOM      4  N   GLY A   3      23.154  27.699   5.276  1.00 49.05           N
TER       5      GLY A   3
END
";

    #[fixture]
    fn small() -> PdbFile {
        read_pdb_str(SMALL).unwrap()
    }

    #[rstest]
    fn test_records(small: PdbFile) {
        let kinds: Vec<RecordKind> = small.records().iter().map(PdbRecord::kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecordKind::Helix,
                RecordKind::Helix,
                RecordKind::Sheet,
                RecordKind::Sheet,
                RecordKind::Atom,
                RecordKind::Atom,
                RecordKind::Atom,
                RecordKind::Atom,
                RecordKind::Ter,
            ]
        );
        assert_eq!(small.atoms().count(), 4);
        assert_eq!(small.ters().count(), 1);
        assert!(small.skipped().is_empty());
    }

    #[rstest]
    fn test_entries(small: PdbFile) {
        let entries = small.entries();
        assert_eq!(entries.len(), 8);
        let residues: Vec<(&str, usize)> = entries
            .iter()
            .filter_map(|entry| match entry {
                PdbEntry::Residue(residue) => Some((residue.name(), residue.len())),
                _ => None,
            })
            .collect();
        assert_eq!(residues, vec![("MET", 2), ("VAL", 1), ("GLY", 1)]);
        assert!(matches!(entries[7], PdbEntry::Ter(_)));
    }

    #[rstest]
    fn test_residues_match_entries(small: PdbFile) {
        let residues = small.residues();
        let from_entries: Vec<Residue> = small
            .entries()
            .into_iter()
            .filter_map(|entry| match entry {
                PdbEntry::Residue(residue) => Some(residue),
                _ => None,
            })
            .collect();
        assert_eq!(residues, from_entries);
    }

    #[rstest]
    fn test_sorted_secondary_structure(small: PdbFile) {
        let helices: Vec<Option<u32>> = small
            .helices_sorted()
            .iter()
            .map(|helix| helix.serial)
            .collect();
        assert_eq!(helices, vec![Some(1), Some(2)]);

        let strands: Vec<Option<u32>> = small
            .sheets_sorted()
            .iter()
            .map(|sheet| sheet.strand)
            .collect();
        assert_eq!(strands, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_from_records() {
        let pdb = PdbFile::from(Vec::new());
        assert!(pdb.is_empty());
        assert!(pdb.residues().is_empty());
        assert!(pdb.chains().is_empty());
    }
}
