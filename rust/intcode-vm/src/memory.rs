//! VM memory: a flat buffer of words.
//!
//! Fixed memory is sized up front by the host and rejects any address outside
//! the buffer. Growable memory reads unwritten addresses as zero and extends
//! itself on writes.

use intcode_core::{Program, Word};

use crate::error::VmError;

/// Upper bound on growable memory, in words.
pub const MAX_GROWABLE_LEN: usize = 1 << 26;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<Word>,
    growable: bool,
}

impl Memory {
    /// Fixed memory of `len` zeroed words.
    pub fn with_len(len: usize) -> Self {
        Self {
            cells: vec![0; len],
            growable: false,
        }
    }

    /// Empty memory that grows on demand.
    pub fn growable() -> Self {
        Self {
            cells: Vec::new(),
            growable: true,
        }
    }

    /// Fixed memory initialized from `cells`.
    pub fn from_words(cells: Vec<Word>) -> Self {
        Self {
            cells,
            growable: false,
        }
    }

    pub fn set_growable(&mut self, growable: bool) {
        self.growable = growable;
    }

    pub fn is_growable(&self) -> bool {
        self.growable
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.cells
    }

    pub fn into_words(self) -> Vec<Word> {
        self.cells
    }

    /// Copy `program` into the start of memory, extending the buffer if it
    /// is shorter than the program. The rest of the buffer is left as is.
    pub fn load(&mut self, program: &Program) {
        let words = program.words();
        if self.cells.len() < words.len() {
            self.cells.resize(words.len(), 0);
        }
        self.cells[..words.len()].copy_from_slice(words);
    }

    /// Read the word at a program-counter index.
    pub fn get(&self, index: usize) -> Result<Word, VmError> {
        match self.cells.get(index) {
            Some(&word) => Ok(word),
            None if self.growable => Ok(0),
            None => Err(VmError::AddressOutOfBounds {
                address: index,
                len: self.cells.len(),
            }),
        }
    }

    /// Read the word at a computed address.
    pub fn read(&self, address: Word) -> Result<Word, VmError> {
        self.get(to_index(address)?)
    }

    /// Write `value` at a computed address.
    pub fn write(&mut self, address: Word, value: Word) -> Result<(), VmError> {
        let index = to_index(address)?;
        if index >= self.cells.len() {
            if !self.growable || index >= MAX_GROWABLE_LEN {
                return Err(VmError::AddressOutOfBounds {
                    address: index,
                    len: self.cells.len(),
                });
            }
            self.cells.resize(index + 1, 0);
        }
        self.cells[index] = value;
        Ok(())
    }
}

impl From<Vec<Word>> for Memory {
    fn from(cells: Vec<Word>) -> Self {
        Self::from_words(cells)
    }
}

pub(crate) fn to_index(address: Word) -> Result<usize, VmError> {
    if address < 0 {
        return Err(VmError::NegativeAddress(address));
    }
    usize::try_from(address).map_err(|_| VmError::AddressOverflow)
}
