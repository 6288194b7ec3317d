//! Human-readable chart labels derived from result file paths

use std::path::Path;

/// Suffixes benchmark producers append to result files, longest first
pub const KNOWN_SUFFIXES: &[&str] = &["_results.csv", ".csv"];

/// Turn `./decoder/bit_packed_18_bit_results.csv` into `bit packed 18 bit`
///
/// Directory components are dropped, the first matching known suffix is
/// removed, and underscores become spaces.
pub fn clean_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let stem = KNOWN_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(name.as_str());

    stem.replace('_', " ")
}
