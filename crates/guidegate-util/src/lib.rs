pub mod content;
pub mod filename;
pub mod path_guard;
pub mod percent;

pub use filename::{validate_filename, FilenameError, SanitizedFilename};
pub use path_guard::{resolve_within, PathError};
