//! Reading placement files.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::record::{parse_line, Record};
use crate::error::{Error, FormatErrorKind, Result};

/// Read every record of a placement file, in file order.
///
/// The first malformed line aborts the read; nothing is skipped.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| Error::NotFound { path: path.to_path_buf(), source })?;

    let records = parse_records(BufReader::new(file), path)?;
    debug!(path = %path.display(), records = records.len(), "read placement file");
    Ok(records)
}

/// Parse records from any buffered reader. `origin` is only used in error messages.
pub fn parse_records(reader: impl BufRead, origin: &Path) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| match source.kind() {
            io::ErrorKind::InvalidData => Error::Format {
                path: origin.to_path_buf(),
                line: index + 1,
                kind: FormatErrorKind::InvalidUtf8,
            },
            _ => Error::NotFound { path: origin.to_path_buf(), source },
        })?;
        match parse_line(&line) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(kind) => {
                return Err(Error::Format { path: origin.to_path_buf(), line: index + 1, kind });
            }
        }
    }

    Ok(records)
}
