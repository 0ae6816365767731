//! Sequence values and the header-stripping sequence reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::AlignerError;

const HEADER_MARKER: char = '>';
const COMMENT_MARKER: char = ';';

/// An immutable run of symbols. Symbols are raw bytes; no alphabet is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    data: Vec<u8>,
}

impl Sequence {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<Vec<u8>> for Sequence {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Concatenates every non-header line of `reader` into one sequence.
///
/// Lines starting with `>` or `;` are dropped, the rest are trimmed. Several
/// records in one input therefore end up joined together.
pub fn parse_sequence<R: BufRead>(reader: R) -> std::io::Result<Sequence> {
    let mut data = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.starts_with(HEADER_MARKER) || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        data.extend_from_slice(line.as_bytes());
    }
    Ok(Sequence::from(data))
}

/// Reads a FASTA-style file into a single [`Sequence`].
pub fn read_sequence<P: AsRef<Path>>(path: P) -> Result<Sequence, AlignerError> {
    let path = path.as_ref();
    let io_err = |source| AlignerError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let sequence = parse_sequence(BufReader::new(file)).map_err(io_err)?;
    debug!("Read {} symbols from {}", sequence.len(), path.display());
    Ok(sequence)
}
