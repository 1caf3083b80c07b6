use indexmap::IndexMap;

use crate::parsers::records::Ter;
use crate::parsers::residues::Residue;

/// The residues sharing a chain identifier, and the TER record closing them.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain<'a> {
    id: String,
    residues: Vec<Residue<'a>>,
    terminator: Option<&'a Ter>,
}

impl<'a> Chain<'a> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn residues(&self) -> &[Residue<'a>] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// The TER record of the chain, if the file has one.
    pub fn terminator(&self) -> Option<&'a Ter> {
        self.terminator
    }

    pub fn residue(&self, seq_num: i32, insertion_code: &str) -> Option<&Residue<'a>> {
        self.residues.iter().find(|residue| {
            residue.seq_num() == Some(seq_num) && residue.insertion_code() == insertion_code
        })
    }
}

/// Split residues by chain identifier, in order of first appearance.
///
/// Each chain takes the first TER record with a matching chain identifier.
pub fn group_chains<'a, I, T>(residues: I, terminators: T) -> Vec<Chain<'a>>
where
    I: IntoIterator<Item = Residue<'a>>,
    T: IntoIterator<Item = &'a Ter>,
{
    let mut chains: IndexMap<String, Vec<Residue<'a>>> = IndexMap::new();
    for residue in residues {
        chains
            .entry(residue.chain_id().to_string())
            .or_default()
            .push(residue);
    }

    let terminators: Vec<&'a Ter> = terminators.into_iter().collect();
    chains
        .into_iter()
        .map(|(id, residues)| {
            let terminator = terminators
                .iter()
                .copied()
                .find(|ter| ter.residue.chain_id == id);
            Chain {
                id,
                residues,
                terminator,
            }
        })
        .collect()
}
