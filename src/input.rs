//! Location lists typed by the user or loaded from a file.

use std::path::Path;

use tracing::debug;

use crate::error::InputError;

/// Most locations one trip may contain.
pub const MAX_LOCATIONS: usize = 10;

/// Column holding place names in a location file.
pub const DESTINATION_COLUMN: &str = "Destination";

/// Trims names and drops blank entries.
pub fn normalize_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rejects an empty list or one longer than `max`.
pub fn check_count(count: usize, max: usize) -> Result<(), InputError> {
    if count == 0 {
        return Err(InputError::NoLocations);
    }
    if count > max {
        return Err(InputError::TooManyLocations { count, max });
    }
    Ok(())
}

/// Reads place names from the `Destination` column of a CSV file.
///
/// The header match ignores case; blank cells are skipped.
pub fn load_destinations(path: &Path) -> Result<Vec<String>, InputError> {
    let csv_error = |source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let column = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .position(|header| header.eq_ignore_ascii_case(DESTINATION_COLUMN))
        .ok_or_else(|| InputError::MissingColumn {
            path: path.to_path_buf(),
            column: DESTINATION_COLUMN,
        })?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if let Some(name) = record.get(column).filter(|name| !name.is_empty()) {
            names.push(name.to_string());
        }
    }

    debug!(path = %path.display(), count = names.len(), "loaded destinations");
    Ok(names)
}
