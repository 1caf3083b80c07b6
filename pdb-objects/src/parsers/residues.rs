use std::fmt;

use indexmap::IndexMap;
use log::warn;
use serde::Serialize;

use crate::parsers::chemistry::{is_nucleic_residue, is_protein_residue};
use crate::parsers::errors::{LookupError, ResidueError};
use crate::parsers::records::{Atom, ResidueId};

/// What identifies a residue: chain, sequence number, and insertion code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResidueKey {
    pub chain_id: String,
    pub seq_num: Option<i32>,
    pub insertion_code: String,
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain = if self.chain_id.is_empty() {
            "_"
        } else {
            &self.chain_id
        };
        match self.seq_num {
            Some(seq_num) => write!(f, "{chain}:{seq_num}{}", self.insertion_code),
            None => write!(f, "{chain}:?{}", self.insertion_code),
        }
    }
}

/// A group of atoms sharing a [`ResidueKey`], in the order they were read.
///
/// The residue borrows its atoms; it never is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue<'a> {
    key: ResidueKey,
    name: &'a str,
    atoms: Vec<&'a Atom>,
}

impl<'a> Residue<'a> {
    pub(crate) fn start(atom: &'a Atom) -> Self {
        Self {
            key: atom.residue_key(),
            name: &atom.residue_name,
            atoms: vec![atom],
        }
    }

    pub(crate) fn push(&mut self, atom: &'a Atom) {
        if atom.residue_name != self.name {
            warn!(
                "Atom {} of residue {} is named {} instead of {}; keeping {}.",
                atom.name, self.key, atom.residue_name, self.name, self.name,
            );
        }
        self.atoms.push(atom);
    }

    /// Build a residue from atoms already known to belong together.
    pub fn try_from_atoms(atoms: Vec<&'a Atom>) -> Result<Self, ResidueError> {
        let mut atoms = atoms.into_iter();
        let first = atoms.next().ok_or(ResidueError::Empty)?;
        let mut residue = Self::start(first);
        for atom in atoms {
            let found = atom.residue_key();
            if found != residue.key {
                return Err(ResidueError::MixedKeys {
                    expected: residue.key,
                    found,
                });
            }
            residue.push(atom);
        }
        Ok(residue)
    }

    /// The residue name of the first atom.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn key(&self) -> &ResidueKey {
        &self.key
    }

    pub fn chain_id(&self) -> &str {
        &self.key.chain_id
    }

    pub fn seq_num(&self) -> Option<i32> {
        self.key.seq_num
    }

    pub fn insertion_code(&self) -> &str {
        &self.key.insertion_code
    }

    pub fn id(&self) -> ResidueId {
        ResidueId {
            name: self.name.to_string(),
            chain_id: self.key.chain_id.clone(),
            seq_num: self.key.seq_num,
            insertion_code: self.key.insertion_code.clone(),
        }
    }

    pub fn atoms(&self) -> &[&'a Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// First atom with the given name, spaces around the name are ignored.
    pub fn find_atom(&self, name: &str) -> Option<&'a Atom> {
        let name = name.trim();
        self.atoms.iter().copied().find(|atom| atom.name == name)
    }

    pub fn atom(&self, name: &str) -> Result<&'a Atom, LookupError> {
        self.find_atom(name).ok_or_else(|| LookupError {
            name: name.trim().to_string(),
            residue: self.key.clone(),
        })
    }

    /// Is the atom part of this residue?
    pub fn contains(&self, atom: &Atom) -> bool {
        self.atoms.iter().any(|member| std::ptr::eq(*member, atom))
    }

    /// Do all the atoms agree on the residue name?
    pub fn has_consistent_names(&self) -> bool {
        self.atoms
            .iter()
            .all(|atom| atom.residue_name == self.name)
    }

    pub fn is_protein(&self) -> bool {
        is_protein_residue(self.name)
    }

    pub fn is_nucleic(&self) -> bool {
        is_nucleic_residue(self.name)
    }
}

/// Group atoms into residues.
///
/// Atoms of a residue do not need to be contiguous. Residues come in the
/// order of their first atom, and atoms keep their relative order.
pub fn group_residues<'a, I>(atoms: I) -> Vec<Residue<'a>>
where
    I: IntoIterator<Item = &'a Atom>,
{
    let mut residues: IndexMap<ResidueKey, Residue<'a>> = IndexMap::new();
    for atom in atoms {
        let key = atom.residue_key();
        match residues.get_mut(&key) {
            Some(residue) => residue.push(atom),
            None => {
                residues.insert(key, Residue::start(atom));
            }
        }
    }
    residues.into_values().collect()
}
