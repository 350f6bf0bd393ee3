//! Reader for the line-oriented region format.
//!
//! ```text
//! cities
//! n0
//! n1
//! n2
//! streets
//! n0 n2 4
//! n2 n1 3
//! ```
//!
//! A line starting with `cities` or `streets` opens the corresponding section; every other
//! non-blank line is an entry of the section currently open. Sections may be reopened. Street
//! endpoints are resolved once the whole input has been read, so their order relative to the city
//! declarations does not matter.
use std::fs::File;
use std::io::{
    self,
    BufRead,
    BufReader,
};
use std::num::ParseIntError;
use std::path::Path;

use nav_core::{
    City,
    Length,
    Region,
    RegionError,
    Street,
};
use thiserror::Error;
use tracing::{
    debug,
    info,
    instrument,
};

/// Prefix of the line that opens the city section.
pub const CITIES_HEADER: &str = "cities";

/// Prefix of the line that opens the street section.
pub const STREETS_HEADER: &str = "streets";

/// Failures while turning region text into a [`Region`].
///
/// [`InputError::Io`] means the input could not be read at all; every other variant means it was
/// read but is not a valid region.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input could not be opened or read.
    #[error("failed to read region input")]
    Io(#[from] io::Error),

    /// An entry appeared before any section header.
    #[error("line {line}: entry outside of a `cities` or `streets` section")]
    OutsideSection {
        /// 1-based line number.
        line: usize,
    },

    /// A city line holds more than a single name.
    #[error("line {line}: city name {name:?} contains whitespace")]
    CityName {
        /// 1-based line number.
        line: usize,
        /// The rejected name.
        name: String,
    },

    /// A street line does not have exactly three fields.
    #[error("line {line}: expected `<from> <to> <length>`, found {found} field(s)")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Number of whitespace-separated fields on the line.
        found: usize,
    },

    /// A street length is not a non-negative integer that fits a [`Length`].
    #[error("line {line}: invalid street length {value:?}")]
    InvalidLength {
        /// 1-based line number.
        line: usize,
        /// The rejected field.
        value: String,
        /// Why it did not parse.
        #[source]
        source: ParseIntError,
    },

    /// The entries parsed but do not form a consistent region.
    #[error(transparent)]
    Region(#[from] RegionError),
}

impl InputError {
    /// Whether the input was readable but malformed, as opposed to unreadable.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// Which kind of entry the current line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    /// No header seen yet.
    Preamble,
    /// Lines are city names.
    Cities,
    /// Lines are streets.
    Streets,
}

/// Parse one street line (already trimmed).
fn parse_street(line: usize, text: &str) -> Result<Street, InputError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [from, to, length] = fields[..] else {
        return Err(InputError::FieldCount { line, found: fields.len() });
    };

    let length: Length = length
        .parse()
        .map_err(|source| InputError::InvalidLength { line, value: length.to_owned(), source })?;

    Ok(Street::new(from, to, length))
}

/// Parse a region from any buffered reader.
///
/// # Errors
///
/// [`InputError::Io`] if reading fails, any other variant if the text is not a valid region.
#[instrument(skip(reader))]
pub fn parse_region(reader: impl BufRead) -> Result<Region, InputError> {
    let mut section = Section::Preamble;
    let mut cities = Vec::new();
    let mut streets = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let text = line.trim();

        if text.is_empty() {
            continue;
        }
        if text.starts_with(CITIES_HEADER) {
            debug!(line = line_no, "entering city section");
            section = Section::Cities;
            continue;
        }
        if text.starts_with(STREETS_HEADER) {
            debug!(line = line_no, "entering street section");
            section = Section::Streets;
            continue;
        }

        match section {
            Section::Preamble => return Err(InputError::OutsideSection { line: line_no }),
            Section::Cities => {
                if text.contains(char::is_whitespace) {
                    return Err(InputError::CityName { line: line_no, name: text.to_owned() });
                }
                cities.push(City::new(text));
            },
            Section::Streets => streets.push(parse_street(line_no, text)?),
        }
    }

    let region = Region::new(cities, streets)?;
    info!(cities = region.len(), streets = region.streets().len(), "region parsed");
    Ok(region)
}

/// Parse a region from an in-memory string.
///
/// # Errors
///
/// See [`parse_region`].
pub fn parse_str(text: &str) -> Result<Region, InputError> {
    parse_region(text.as_bytes())
}

/// Read and parse the region file at `path`.
///
/// # Errors
///
/// See [`parse_region`]; a missing or unreadable file is [`InputError::Io`].
#[instrument]
pub fn read_region(path: &Path) -> Result<Region, InputError> {
    let file = File::open(path)?;
    parse_region(BufReader::new(file))
}
