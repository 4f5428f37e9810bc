/// MIME types the extraction service accepts.
pub const SUPPORTED_MIME_TYPES: [&str; 9] = [
    "application/pdf",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "text/plain",
    "message/rfc822",
];

const EMAIL_EXTENSIONS: [&str; 2] = [".eml", ".msg"];

/// Returns true if a file with the given name and MIME type can be submitted for extraction. E-mail files are
/// recognised by extension, since their MIME type is frequently missing.
pub fn is_supported_upload(filename: &str, mime_type: &str) -> bool {
    let mime = mime_type.trim().to_ascii_lowercase();
    let name = filename.to_ascii_lowercase();
    SUPPORTED_MIME_TYPES.contains(&mime.as_str()) || EMAIL_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
