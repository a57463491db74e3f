//! Result files
//!
//! A result file holds `3.` followed by the digits, a blank line, and a
//! short trailer:
//!
//! ```text
//! 3.1415926535
//!
//! Computed by SuperPi 4.0.0
//! Digits: 10
//! Algorithm: Gauss-Legendre
//! Date: 2026-10-14
//! ```
//!
//! Files are written to a temporary file in the target directory and renamed
//! into place once complete, so an interrupted or failed write never leaves a
//! partial result behind.

use chrono::NaiveDate;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use superpi_engine::{ALGORITHM_NAME, DigitString};
use tempfile::NamedTempFile;
use tracing::debug;

/// Extension of every result file
pub const EXTENSION: &str = "txt";

/// `<prefix>_<digits>.txt`
pub fn file_name(prefix: &str, digits: u64) -> String {
    format!("{}_{}.{}", prefix, digits, EXTENSION)
}

/// Trailer lines written after the digits
pub fn trailer(digits: u64, date: NaiveDate) -> String {
    format!(
        "Computed by SuperPi {}\nDigits: {}\nAlgorithm: {}\nDate: {}\n",
        env!("CARGO_PKG_VERSION"),
        digits,
        ALGORITHM_NAME,
        date.format("%Y-%m-%d")
    )
}

/// Write the complete file contents to `out`.
pub fn write_contents(
    out: &mut dyn Write,
    digits: &DigitString,
    date: NaiveDate,
) -> io::Result<()> {
    out.write_all(b"3.")?;
    out.write_all(digits.as_str().as_bytes())?;
    out.write_all(b"\n\n")?;
    out.write_all(trailer(digits.len() as u64, date).as_bytes())?;
    Ok(())
}

/// Persist `digits` as `<dir>/<prefix>_<n>.txt`, creating `dir` if needed.
///
/// Returns the path of the written file. An existing file of the same name is
/// replaced.
pub fn write_result(
    dir: &Path,
    prefix: &str,
    digits: &DigitString,
    date: NaiveDate,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(prefix, digits.len() as u64));

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_contents(&mut writer, digits, date)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(&path).map_err(|e| e.error)?;

    debug!(path = %path.display(), digits = digits.len(), "result file written");
    Ok(path)
}
