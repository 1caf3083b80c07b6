use log::{debug, trace, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::parsers::errors::*;
use crate::parsers::fields::{Field, FieldDecoder};
use crate::parsers::records::*;
use crate::parsers::structure::PdbFile;

/// Column maps from the PDB format, version 3.3.
mod columns {
    use crate::parsers::fields::Field;

    pub const KEYWORD: Field = Field::new("record name", 1, 6);

    pub mod atom {
        use super::Field;
        pub const SERIAL: Field = Field::new("serial", 7, 11);
        pub const NAME: Field = Field::new("name", 13, 16);
        pub const ALT_LOC: Field = Field::column("altLoc", 17);
        pub const RES_NAME: Field = Field::new("resName", 18, 20);
        pub const CHAIN_ID: Field = Field::column("chainID", 22);
        pub const RES_SEQ: Field = Field::new("resSeq", 23, 26);
        pub const I_CODE: Field = Field::column("iCode", 27);
        pub const X: Field = Field::new("x", 31, 38);
        pub const Y: Field = Field::new("y", 39, 46);
        pub const Z: Field = Field::new("z", 47, 54);
        pub const OCCUPANCY: Field = Field::new("occupancy", 55, 60);
        pub const TEMP_FACTOR: Field = Field::new("tempFactor", 61, 66);
        pub const SEGMENT: Field = Field::new("segID", 73, 76);
        pub const ELEMENT: Field = Field::new("element", 77, 78);
        pub const CHARGE: Field = Field::new("charge", 79, 80);
    }

    pub mod ter {
        use super::Field;
        pub const SERIAL: Field = Field::new("serial", 7, 11);
        pub const RES_NAME: Field = Field::new("resName", 18, 20);
        pub const CHAIN_ID: Field = Field::column("chainID", 22);
        pub const RES_SEQ: Field = Field::new("resSeq", 23, 26);
        pub const I_CODE: Field = Field::column("iCode", 27);
    }

    pub mod helix {
        use super::Field;
        pub const SERIAL: Field = Field::new("serNum", 8, 10);
        pub const HELIX_ID: Field = Field::new("helixID", 12, 14);
        pub const INIT_RES_NAME: Field = Field::new("initResName", 16, 18);
        pub const INIT_CHAIN_ID: Field = Field::column("initChainID", 20);
        pub const INIT_SEQ_NUM: Field = Field::new("initSeqNum", 22, 25);
        pub const INIT_I_CODE: Field = Field::column("initICode", 26);
        pub const END_RES_NAME: Field = Field::new("endResName", 28, 30);
        pub const END_CHAIN_ID: Field = Field::column("endChainID", 32);
        pub const END_SEQ_NUM: Field = Field::new("endSeqNum", 34, 37);
        pub const END_I_CODE: Field = Field::column("endICode", 38);
        pub const HELIX_CLASS: Field = Field::new("helixClass", 39, 40);
        pub const COMMENT: Field = Field::new("comment", 41, 70);
        pub const LENGTH: Field = Field::new("length", 72, 76);
    }

    pub mod sheet {
        use super::Field;
        pub const STRAND: Field = Field::new("strand", 8, 10);
        pub const SHEET_ID: Field = Field::new("sheetID", 12, 14);
        pub const NUM_STRANDS: Field = Field::new("numStrands", 15, 16);
        pub const INIT_RES_NAME: Field = Field::new("initResName", 18, 20);
        pub const INIT_CHAIN_ID: Field = Field::column("initChainID", 22);
        pub const INIT_SEQ_NUM: Field = Field::new("initSeqNum", 23, 26);
        pub const INIT_I_CODE: Field = Field::column("initICode", 27);
        pub const END_RES_NAME: Field = Field::new("endResName", 29, 31);
        pub const END_CHAIN_ID: Field = Field::column("endChainID", 33);
        pub const END_SEQ_NUM: Field = Field::new("endSeqNum", 34, 37);
        pub const END_I_CODE: Field = Field::column("endICode", 38);
        pub const SENSE: Field = Field::new("sense", 39, 40);
        pub const CUR_ATOM: Field = Field::new("curAtom", 42, 45);
        pub const CUR_RES_NAME: Field = Field::new("curResName", 46, 48);
        pub const CUR_CHAIN_ID: Field = Field::column("curChainId", 50);
        pub const CUR_RES_SEQ: Field = Field::new("curResSeq", 51, 54);
        pub const CUR_I_CODE: Field = Field::column("curICode", 55);
        pub const PREV_ATOM: Field = Field::new("prevAtom", 57, 60);
        pub const PREV_RES_NAME: Field = Field::new("prevResName", 61, 63);
        pub const PREV_CHAIN_ID: Field = Field::column("prevChainId", 65);
        pub const PREV_RES_SEQ: Field = Field::new("prevResSeq", 66, 69);
        pub const PREV_I_CODE: Field = Field::column("prevICode", 70);
    }
}

/// Columns describing a residue: name, chain, sequence number, insertion code.
struct ResidueFields {
    name: Field,
    chain_id: Field,
    seq_num: Field,
    insertion_code: Field,
}

impl ResidueFields {
    fn decode(&self, decoder: &FieldDecoder) -> Result<ResidueId, FormatError> {
        Ok(ResidueId {
            name: decoder.text(self.name),
            chain_id: decoder.text(self.chain_id),
            seq_num: decoder.integer(self.seq_num)?,
            insertion_code: decoder.text(self.insertion_code),
        })
    }
}

/// The keyword in columns 1-6, if the line is long enough to have one.
fn keyword(line: &str) -> Option<&str> {
    line.get(columns::KEYWORD.range())
}

fn expect_kind(line: &str, expected: &[RecordKind]) -> Result<RecordKind, FormatError> {
    let found = keyword(line).unwrap_or(line);
    RecordKind::from_keyword(found)
        .filter(|kind| expected.contains(kind))
        .ok_or_else(|| FormatError::wrong_record_type(expected, found))
}

/// Read an ATOM or HETATM line.
pub fn read_atom(line: &str) -> Result<Atom, FormatError> {
    use columns::atom::*;
    let kind = expect_kind(line, &[RecordKind::Atom, RecordKind::HetAtom])?;
    let decoder = FieldDecoder::new(line);
    Ok(Atom {
        hetero: kind == RecordKind::HetAtom,
        serial: decoder.integer(SERIAL)?,
        name: decoder.text(NAME),
        alt_location: decoder.text(ALT_LOC),
        residue_name: decoder.text(RES_NAME),
        chain_id: decoder.text(CHAIN_ID),
        seq_num: decoder.integer(RES_SEQ)?,
        insertion_code: decoder.text(I_CODE),
        x: decoder.required_float(X)?,
        y: decoder.required_float(Y)?,
        z: decoder.required_float(Z)?,
        occupancy: decoder.float(OCCUPANCY)?,
        temp_factor: decoder.float(TEMP_FACTOR)?,
        segment: decoder.text(SEGMENT),
        element: decoder.text(ELEMENT),
        charge: decoder.text(CHARGE),
    })
}

/// Read a TER line.
pub fn read_ter(line: &str) -> Result<Ter, FormatError> {
    use columns::ter::*;
    expect_kind(line, &[RecordKind::Ter])?;
    let decoder = FieldDecoder::new(line);
    let residue = ResidueFields {
        name: RES_NAME,
        chain_id: CHAIN_ID,
        seq_num: RES_SEQ,
        insertion_code: I_CODE,
    };
    Ok(Ter {
        serial: decoder.integer(SERIAL)?,
        residue: residue.decode(&decoder)?,
    })
}

/// Read a HELIX line.
pub fn read_helix(line: &str) -> Result<Helix, FormatError> {
    use columns::helix::*;
    expect_kind(line, &[RecordKind::Helix])?;
    let decoder = FieldDecoder::new(line);
    let initial = ResidueFields {
        name: INIT_RES_NAME,
        chain_id: INIT_CHAIN_ID,
        seq_num: INIT_SEQ_NUM,
        insertion_code: INIT_I_CODE,
    };
    let terminal = ResidueFields {
        name: END_RES_NAME,
        chain_id: END_CHAIN_ID,
        seq_num: END_SEQ_NUM,
        insertion_code: END_I_CODE,
    };
    Ok(Helix {
        serial: decoder.integer(SERIAL)?,
        helix_id: decoder.text(HELIX_ID),
        initial: initial.decode(&decoder)?,
        terminal: terminal.decode(&decoder)?,
        helix_class: decoder.integer(HELIX_CLASS)?,
        comment: decoder.text(COMMENT),
        length: decoder.integer(LENGTH)?,
    })
}

/// Read a SHEET line.
///
/// The registration is only set when at least one of its atom names is
/// given; the first strand of a sheet usually has none.
pub fn read_sheet(line: &str) -> Result<Sheet, FormatError> {
    use columns::sheet::*;
    expect_kind(line, &[RecordKind::Sheet])?;
    let decoder = FieldDecoder::new(line);
    let initial = ResidueFields {
        name: INIT_RES_NAME,
        chain_id: INIT_CHAIN_ID,
        seq_num: INIT_SEQ_NUM,
        insertion_code: INIT_I_CODE,
    };
    let terminal = ResidueFields {
        name: END_RES_NAME,
        chain_id: END_CHAIN_ID,
        seq_num: END_SEQ_NUM,
        insertion_code: END_I_CODE,
    };
    let current = ResidueFields {
        name: CUR_RES_NAME,
        chain_id: CUR_CHAIN_ID,
        seq_num: CUR_RES_SEQ,
        insertion_code: CUR_I_CODE,
    };
    let previous = ResidueFields {
        name: PREV_RES_NAME,
        chain_id: PREV_CHAIN_ID,
        seq_num: PREV_RES_SEQ,
        insertion_code: PREV_I_CODE,
    };

    let current = AtomId {
        name: decoder.text(CUR_ATOM),
        residue: current.decode(&decoder)?,
    };
    let previous = AtomId {
        name: decoder.text(PREV_ATOM),
        residue: previous.decode(&decoder)?,
    };
    let registration = if current.name.is_empty() && previous.name.is_empty() {
        None
    } else {
        Some(Registration { current, previous })
    };

    Ok(Sheet {
        strand: decoder.integer(STRAND)?,
        sheet_id: decoder.text(SHEET_ID),
        num_strands: decoder.integer(NUM_STRANDS)?,
        initial: initial.decode(&decoder)?,
        terminal: terminal.decode(&decoder)?,
        sense: decoder.integer(SENSE)?,
        registration,
    })
}

/// Convert a line in PDB format to the matching record.
///
/// Lines shorter than 6 columns and record types other than ATOM, HETATM,
/// TER, HELIX, and SHEET give `Ok(None)`.
pub fn read_record(line: &str) -> Result<Option<PdbRecord>, FormatError> {
    let Some(keyword) = keyword(line) else {
        return Ok(None);
    };
    let Some(kind) = RecordKind::from_keyword(keyword) else {
        trace!("Ignoring a {} record", keyword.trim_end());
        return Ok(None);
    };
    trace!("Reading a {kind} record");
    let record = match kind {
        RecordKind::Atom | RecordKind::HetAtom => read_atom(line)?.into(),
        RecordKind::Ter => read_ter(line)?.into(),
        RecordKind::Helix => read_helix(line)?.into(),
        RecordKind::Sheet => read_sheet(line)?.into(),
    };
    Ok(Some(record))
}

/// What to do with a line that claims a known record type but cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first malformed line.
    #[default]
    Abort,
    /// Log the malformed line, remember the error, and keep going.
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Record kinds to keep; `None` keeps all of them.
    pub record_kinds: Option<Vec<RecordKind>>,
    pub error_policy: ErrorPolicy,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record_kinds(mut self, kinds: impl IntoIterator<Item = RecordKind>) -> Self {
        self.record_kinds = Some(kinds.into_iter().collect());
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn keeps(&self, kind: RecordKind) -> bool {
        self.record_kinds
            .as_ref()
            .map_or(true, |kinds| kinds.contains(&kind))
    }
}

/// Read a whole PDB file, stopping at the first malformed line.
pub fn read_pdb<F>(input: F) -> Result<PdbFile, ReadError>
where
    F: BufRead,
{
    read_pdb_with(input, &ReadOptions::default())
}

pub fn read_pdb_with<F>(input: F, options: &ReadOptions) -> Result<PdbFile, ReadError>
where
    F: BufRead,
{
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    let mut ignored_lines = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let lineno = index + 1;
        // Filtered out kinds are never decoded, so they cannot be malformed.
        let kind = keyword(&line).and_then(RecordKind::from_keyword);
        if kind.map_or(false, |kind| !options.keeps(kind)) {
            ignored_lines += 1;
            continue;
        }
        match read_record(&line) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => ignored_lines += 1,
            Err(source) => {
                let error = ReadError::Format {
                    line: lineno,
                    source,
                };
                match options.error_policy {
                    ErrorPolicy::Abort => return Err(error),
                    ErrorPolicy::Skip => {
                        warn!("Skipping malformed record. {error}");
                        skipped.push(error);
                    }
                }
            }
        }
    }
    debug!(
        "Read {} records, ignored {ignored_lines} lines, skipped {} malformed lines",
        records.len(),
        skipped.len(),
    );
    Ok(PdbFile::new(records, skipped))
}

pub fn read_pdb_file<P>(path: P, options: &ReadOptions) -> Result<PdbFile, ReadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!("Reading PDB file {}", path.display());
    let file = File::open(path)?;
    read_pdb_with(BufReader::new(file), options)
}

pub fn read_pdb_str(content: &str) -> Result<PdbFile, ReadError> {
    read_pdb(content.as_bytes())
}
