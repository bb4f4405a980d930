//! Resolution of a sanitized filename against a base directory.
//!
//! The containment check compares canonical, symlink-resolved paths. A
//! symlink inside the base directory that points elsewhere is rejected even
//! though its unresolved path looks contained.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::filename::{extension_of, SanitizedFilename};

/// Document extensions that may be served, lower-case with leading dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".txt", ".md"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("file type not allowed: {ext:?}")]
    ExtensionNotAllowed { ext: String },
    #[error("hidden files not allowed")]
    HiddenFileRejected,
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("access denied: {} is outside the base directory", path.display())]
    AccessDenied { path: PathBuf },
}

pub fn is_allowed_extension(name: &str) -> bool {
    let ext = extension_of(name).to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}

/// Join `filename` onto `base` and prove the result is an existing regular
/// file inside `base`. Returns the canonical absolute path.
pub fn resolve_within(filename: &SanitizedFilename, base: &Path) -> Result<PathBuf, PathError> {
    let name = filename.as_str();

    if !is_allowed_extension(name) {
        return Err(PathError::ExtensionNotAllowed {
            ext: filename.extension().to_ascii_lowercase(),
        });
    }

    if name.starts_with('.') && filename.extension().is_empty() {
        return Err(PathError::HiddenFileRejected);
    }

    let candidate = base.join(filename);

    // `metadata` follows symlinks, so a link to a directory is not a file.
    match std::fs::metadata(&candidate) {
        Ok(meta) if meta.is_file() => {}
        _ => return Err(PathError::NotFound { path: candidate }),
    }

    let canonical_base = base
        .canonicalize()
        .map_err(|_| PathError::AccessDenied { path: candidate.clone() })?;
    let canonical = candidate
        .canonicalize()
        .map_err(|_| PathError::NotFound { path: candidate.clone() })?;

    // Component-wise: `/data/guides` does not contain `/data/guides-old/x`.
    if canonical != canonical_base && !canonical.starts_with(&canonical_base) {
        return Err(PathError::AccessDenied { path: canonical });
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filename::validate_filename;
    use std::fs;

    fn name(raw: &str) -> SanitizedFilename {
        validate_filename(raw).unwrap()
    }

    #[test]
    fn extension_allow_list_is_case_insensitive() {
        assert!(is_allowed_extension("guide.pdf"));
        assert!(is_allowed_extension("guide.PDF"));
        assert!(is_allowed_extension("notes.Md"));
        assert!(is_allowed_extension("manual.docx"));
        assert!(!is_allowed_extension("notes.exe"));
        assert!(!is_allowed_extension("guide.pdf.exe"));
        assert!(!is_allowed_extension("README"));
    }

    #[test]
    fn resolves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("user-guide.pdf"), b"%PDF-1.4").unwrap();

        let resolved = resolve_within(&name("user-guide.pdf"), dir.path()).unwrap();
        assert_eq!(
            resolved,
            dir.path().canonicalize().unwrap().join("user-guide.pdf")
        );
        assert!(resolved.is_absolute());
    }

    #[test]
    fn resolves_through_relative_base() {
        let dir = tempfile::tempdir_in(".").unwrap();
        fs::write(dir.path().join("guide.txt"), b"hello").unwrap();
        let relative = Path::new(".").join(dir.path().file_name().unwrap());

        let resolved = resolve_within(&name("guide.txt"), &relative).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("guide.txt"));
    }

    #[test]
    fn rejects_disallowed_extension_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.exe"), b"MZ").unwrap();

        assert_eq!(
            resolve_within(&name("notes.exe"), dir.path()),
            Err(PathError::ExtensionNotAllowed { ext: ".exe".into() })
        );
        assert_eq!(
            resolve_within(&name("Setup.EXE"), Path::new("/nonexistent")),
            Err(PathError::ExtensionNotAllowed { ext: ".exe".into() })
        );
        assert_eq!(
            resolve_within(&name("README"), dir.path()),
            Err(PathError::ExtensionNotAllowed { ext: String::new() })
        );
    }

    #[test]
    fn dotfile_with_allowed_suffix_is_served() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".md"), b"# notes").unwrap();

        assert!(resolve_within(&name(".md"), dir.path()).is_ok());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_within(&name("absent.pdf"), dir.path()).unwrap_err();
        assert!(matches!(err, PathError::NotFound { .. }));
    }

    #[test]
    fn directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("folder.pdf")).unwrap();

        let err = resolve_within(&name("folder.pdf"), dir.path()).unwrap_err();
        assert!(matches!(err, PathError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escaping_base_is_denied() {
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.pdf");
        fs::write(&secret, b"%PDF-secret").unwrap();

        let base = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(&secret, base.path().join("link.pdf")).unwrap();

        // The unresolved path sits under the base directory...
        let unresolved = base.path().join("link.pdf");
        assert!(unresolved.starts_with(base.path()));

        // ...but its target does not.
        let err = resolve_within(&name("link.pdf"), base.path()).unwrap_err();
        assert!(matches!(err, PathError::AccessDenied { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_within_base_is_followed() {
        let base = tempfile::tempdir().unwrap();
        fs::write(base.path().join("v2.pdf"), b"%PDF-2").unwrap();
        std::os::unix::fs::symlink(base.path().join("v2.pdf"), base.path().join("latest.pdf"))
            .unwrap();

        let resolved = resolve_within(&name("latest.pdf"), base.path()).unwrap();
        assert_eq!(resolved, base.path().canonicalize().unwrap().join("v2.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_base_directory_is_resolved_before_comparison() {
        let real = tempfile::tempdir().unwrap();
        fs::write(real.path().join("guide.pdf"), b"%PDF").unwrap();

        let holder = tempfile::tempdir().unwrap();
        let alias = holder.path().join("guides");
        std::os::unix::fs::symlink(real.path(), &alias).unwrap();

        let resolved = resolve_within(&name("guide.pdf"), &alias).unwrap();
        assert_eq!(resolved, real.path().canonicalize().unwrap().join("guide.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn sibling_with_shared_prefix_is_denied() {
        let root = tempfile::tempdir().unwrap();
        let base = root.path().join("guides");
        let sibling = root.path().join("guides-old");
        fs::create_dir(&base).unwrap();
        fs::create_dir(&sibling).unwrap();
        fs::write(sibling.join("old.pdf"), b"%PDF-old").unwrap();
        std::os::unix::fs::symlink(sibling.join("old.pdf"), base.join("old.pdf")).unwrap();

        let err = resolve_within(&name("old.pdf"), &base).unwrap_err();
        assert!(matches!(err, PathError::AccessDenied { .. }));
    }
}
