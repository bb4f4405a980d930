use crate::filename::extension_of;

/// Content type for a served document, keyed on its lower-cased extension.
pub fn content_type_for(name: &str) -> &'static str {
    match extension_of(name).to_ascii_lowercase().as_str() {
        ".pdf" => "application/pdf",
        ".doc" => "application/msword",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".txt" => "text/plain",
        ".md" => "text/markdown",
        _ => "application/octet-stream",
    }
}

/// Escape a value for use inside a quoted header parameter.
pub fn escape_header_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn attachment_disposition(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", escape_header_value(filename))
}
