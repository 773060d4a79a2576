//! Program images and their comma-separated text form.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::Word;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid integer {token:?} at index {index}: {source}")]
pub struct ProgramParseError {
    pub index: usize,
    pub token: String,
    #[source]
    pub source: ParseIntError,
}

/// An immutable program image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    words: Vec<Word>,
}

impl Program {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Parse `1,2,3,...`. Whitespace and newlines around tokens are ignored.
    pub fn parse(input: &str) -> Result<Self, ProgramParseError> {
        let words = input
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token.parse::<Word>().map_err(|source| ProgramParseError {
                    index,
                    token: token.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(len = words.len(), "parsed program");
        Ok(Self { words })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn into_words(self) -> Vec<Word> {
        self.words
    }
}

impl From<Vec<Word>> for Program {
    fn from(words: Vec<Word>) -> Self {
        Self::new(words)
    }
}

impl From<&[Word]> for Program {
    fn from(words: &[Word]) -> Self {
        Self::new(words.to_vec())
    }
}

impl AsRef<[Word]> for Program {
    fn as_ref(&self) -> &[Word] {
        &self.words
    }
}

impl FromStr for Program {
    type Err = ProgramParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", word)?;
        }
        Ok(())
    }
}
