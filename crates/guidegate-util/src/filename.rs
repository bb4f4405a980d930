use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::percent::percent_decode;

/// Longest filename accepted, matching common filesystem limits.
pub const MAX_FILENAME_LEN: usize = 255;

/// Substrings rejected even when the character allow-list would let them
/// through. Checked case-insensitively, in this order.
const DANGEROUS_PATTERNS: &[&str] = &[
    "..", "~/", "/", "\\", ":", "*", "?", "\"", "<", ">", "|",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilenameError {
    #[error("invalid filename encoding")]
    InvalidEncoding,
    #[error("control character U+{code:04X} detected in filename")]
    ControlCharacter { code: u32 },
    #[error("filename contains invalid characters")]
    InvalidCharacters,
    #[error("filename too long ({len} bytes)")]
    TooLong { len: usize },
    #[error("dangerous pattern detected in filename: {pattern}")]
    DangerousPattern { pattern: &'static str },
    #[error("invalid filename after sanitization")]
    InvalidAfterSanitization,
}

/// A filename that passed every check in [`validate_filename`].
///
/// Non-empty, made only of `[A-Za-z0-9._-]`, at most 255 bytes, never `.`
/// or `..`, and free of path separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedFilename(String);

impl SanitizedFilename {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The suffix starting at the last `.`, dot included, or `""` when there
    /// is none. A bare dotfile such as `.pdf` has the extension `.pdf`.
    pub fn extension(&self) -> &str {
        extension_of(&self.0)
    }
}

impl fmt::Display for SanitizedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for SanitizedFilename {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

pub(crate) fn extension_of(name: &str) -> &str {
    name.rfind('.').map(|i| &name[i..]).unwrap_or("")
}

fn check_control_chars(name: &str) -> Result<(), FilenameError> {
    match name
        .chars()
        .find(|&c| c == '\0' || (c < '\x20' && !matches!(c, '\t' | '\n' | '\r')))
    {
        Some(c) => Err(FilenameError::ControlCharacter { code: c as u32 }),
        None => Ok(()),
    }
}

fn check_allowed_chars(name: &str) -> Result<(), FilenameError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if name.is_empty() || !name.chars().all(allowed) {
        return Err(FilenameError::InvalidCharacters);
    }
    Ok(())
}

fn check_length(name: &str) -> Result<(), FilenameError> {
    if name.len() > MAX_FILENAME_LEN {
        return Err(FilenameError::TooLong { len: name.len() });
    }
    Ok(())
}

// Redundant with the allow-list today. Kept so that widening the allow-list
// cannot reopen traversal.
fn check_dangerous_patterns(name: &str) -> Result<(), FilenameError> {
    let lower = name.to_lowercase();
    match DANGEROUS_PATTERNS.iter().find(|p| lower.contains(*p)) {
        Some(pattern) => Err(FilenameError::DangerousPattern { pattern: *pattern }),
        None => Ok(()),
    }
}

fn base_name(name: &str) -> Result<&str, FilenameError> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if base.is_empty() || base == "." || base == ".." {
        return Err(FilenameError::InvalidAfterSanitization);
    }
    Ok(base)
}

/// Validate an untrusted filename.
///
/// The input is percent-decoded once, then checked for control characters,
/// the `[A-Za-z0-9._-]` allow-list, length, dangerous substrings and finally
/// reduced to its base name. The first failing check is returned.
pub fn validate_filename(raw: &str) -> Result<SanitizedFilename, FilenameError> {
    let decoded = percent_decode(raw).map_err(|_| FilenameError::InvalidEncoding)?;

    check_control_chars(&decoded)?;
    check_allowed_chars(&decoded)?;
    check_length(&decoded)?;
    check_dangerous_patterns(&decoded)?;
    let base = base_name(&decoded)?;

    Ok(SanitizedFilename(base.to_string()))
}
