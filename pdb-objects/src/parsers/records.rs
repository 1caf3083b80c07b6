use std::fmt;

use serde::Serialize;

use crate::parsers::chemistry::lookup_element_symbol;
use crate::parsers::residues::ResidueKey;
use crate::parsers::Position;

/// The record types this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum RecordKind {
    Atom,
    HetAtom,
    Ter,
    Helix,
    Sheet,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Atom,
        RecordKind::HetAtom,
        RecordKind::Ter,
        RecordKind::Helix,
        RecordKind::Sheet,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Atom => "ATOM",
            Self::HetAtom => "HETATM",
            Self::Ter => "TER",
            Self::Helix => "HELIX",
            Self::Sheet => "SHEET",
        }
    }

    /// Identify the content of columns 1-6 of a line.
    ///
    /// Trailing spaces are ignored and the comparison is case insensitive.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim_end();
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A residue as referred to by a record: by name and location, without its atoms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResidueId {
    pub name: String,
    pub chain_id: String,
    pub seq_num: Option<i32>,
    pub insertion_code: String,
}

impl ResidueId {
    pub fn key(&self) -> ResidueKey {
        ResidueKey {
            chain_id: self.chain_id.clone(),
            seq_num: self.seq_num,
            insertion_code: self.insertion_code.clone(),
        }
    }
}

/// An atom as referred to by a record, e.g. a hydrogen bond partner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AtomId {
    pub name: String,
    pub residue: ResidueId,
}

/// A parsed ATOM or HETATM line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atom {
    /// `true` when read from a HETATM line.
    pub hetero: bool,
    pub serial: Option<u32>,
    pub name: String,
    pub alt_location: String,
    pub residue_name: String,
    pub chain_id: String,
    pub seq_num: Option<i32>,
    pub insertion_code: String,
    /// Coordinates in Ångström.
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub occupancy: Option<f64>,
    pub temp_factor: Option<f64>,
    pub segment: String,
    pub element: String,
    pub charge: String,
}

impl Atom {
    pub fn kind(&self) -> RecordKind {
        if self.hetero {
            RecordKind::HetAtom
        } else {
            RecordKind::Atom
        }
    }

    pub fn record_type(&self) -> &'static str {
        self.kind().keyword()
    }

    pub fn position(&self) -> Position {
        [self.x, self.y, self.z]
    }

    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey {
            chain_id: self.chain_id.clone(),
            seq_num: self.seq_num,
            insertion_code: self.insertion_code.clone(),
        }
    }

    pub fn residue_id(&self) -> ResidueId {
        ResidueId {
            name: self.residue_name.clone(),
            chain_id: self.chain_id.clone(),
            seq_num: self.seq_num,
            insertion_code: self.insertion_code.clone(),
        }
    }

    /// Occupancy, with the PDB default of 1 when the column is blank.
    pub fn occupancy_or_default(&self) -> f64 {
        self.occupancy.unwrap_or(1.0)
    }

    /// Is the atom (probably) of the given element?
    ///
    /// The element column is used when present. Otherwise, the guess relies
    /// on the atom name, which cannot tell a C-alpha from a calcium.
    pub fn is_element(&self, symbol: &str) -> bool {
        let symbol = symbol.trim();
        if self.element.is_empty() {
            self.name
                .to_ascii_uppercase()
                .starts_with(&symbol.to_ascii_uppercase())
        } else {
            self.element.eq_ignore_ascii_case(symbol)
        }
    }

    /// Atomic number from the element column, if it holds a known symbol.
    pub fn atomic_number(&self) -> Option<usize> {
        lookup_element_symbol(&self.element)
    }
}

/// A parsed HELIX line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Helix {
    pub serial: Option<u32>,
    pub helix_id: String,
    pub initial: ResidueId,
    pub terminal: ResidueId,
    /// Helix class, 1 (right-handed alpha) to 10 (polyproline).
    pub helix_class: Option<u32>,
    pub comment: String,
    pub length: Option<u32>,
}

/// Hydrogen bond registration between a strand and the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Atom in the current strand.
    pub current: AtomId,
    /// Atom in the previous strand.
    pub previous: AtomId,
}

/// A parsed SHEET line, describing one strand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub strand: Option<u32>,
    pub sheet_id: String,
    pub num_strands: Option<u32>,
    pub initial: ResidueId,
    pub terminal: ResidueId,
    /// 0 for the first strand, 1 if parallel to the previous one, -1 if anti-parallel.
    pub sense: Option<i32>,
    pub registration: Option<Registration>,
}

/// A parsed TER line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ter {
    pub serial: Option<u32>,
    pub residue: ResidueId,
}

/// One parsed line of a PDB file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record")]
pub enum PdbRecord {
    Atom(Atom),
    Helix(Helix),
    Sheet(Sheet),
    Ter(Ter),
}

impl PdbRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Atom(atom) => atom.kind(),
            Self::Helix(_) => RecordKind::Helix,
            Self::Sheet(_) => RecordKind::Sheet,
            Self::Ter(_) => RecordKind::Ter,
        }
    }

    pub fn record_type(&self) -> &'static str {
        self.kind().keyword()
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(atom) => Some(atom),
            _ => None,
        }
    }
}

impl From<Atom> for PdbRecord {
    fn from(value: Atom) -> Self {
        Self::Atom(value)
    }
}

impl From<Helix> for PdbRecord {
    fn from(value: Helix) -> Self {
        Self::Helix(value)
    }
}

impl From<Sheet> for PdbRecord {
    fn from(value: Sheet) -> Self {
        Self::Sheet(value)
    }
}

impl From<Ter> for PdbRecord {
    fn from(value: Ter) -> Self {
        Self::Ter(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn calcium() -> Atom {
        Atom {
            hetero: true,
            serial: Some(1),
            name: String::from("CA"),
            alt_location: String::new(),
            residue_name: String::from("CA"),
            chain_id: String::from("A"),
            seq_num: Some(101),
            insertion_code: String::new(),
            x: 1.0,
            y: 2.0,
            z: 3.0,
            occupancy: None,
            temp_factor: Some(10.0),
            segment: String::new(),
            element: String::from("CA"),
            charge: String::from("2+"),
        }
    }

    #[rstest]
    #[case("ATOM  ", Some(RecordKind::Atom))]
    #[case("HETATM", Some(RecordKind::HetAtom))]
    #[case("TER   ", Some(RecordKind::Ter))]
    #[case("helix ", Some(RecordKind::Helix))]
    #[case("SHEET", Some(RecordKind::Sheet))]
    #[case("REMARK", None)]
    #[case("  ATOM", None)]
    fn test_kind_from_keyword(#[case] keyword: &str, #[case] expected: Option<RecordKind>) {
        assert_eq!(RecordKind::from_keyword(keyword), expected);
    }

    #[rstest]
    fn test_atom_helpers(calcium: Atom) {
        assert_eq!(calcium.record_type(), "HETATM");
        assert_eq!(calcium.position(), [1.0, 2.0, 3.0]);
        assert_eq!(calcium.occupancy_or_default(), 1.0);
        assert_eq!(calcium.atomic_number(), Some(20));
        assert!(calcium.is_element("Ca"));
        assert!(!calcium.is_element("C"));
    }

    #[rstest]
    fn test_is_element_falls_back_to_name(mut calcium: Atom) {
        calcium.element = String::new();
        // Without the element column, the name is ambiguous.
        assert!(calcium.is_element("C"));
        assert_eq!(calcium.atomic_number(), None);
    }

    #[rstest]
    fn test_residue_id_shares_key_with_atom(calcium: Atom) {
        assert_eq!(calcium.residue_id().key(), calcium.residue_key());
        assert_eq!(calcium.residue_id().name, "CA");
    }

    #[rstest]
    fn test_record_kind(calcium: Atom) {
        let record = PdbRecord::from(calcium);
        assert_eq!(record.kind(), RecordKind::HetAtom);
        assert!(record.as_atom().is_some());
    }
}
