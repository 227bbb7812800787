//! Output file naming conventions.
//!
//! Pure string functions. These define the names of every artifact written
//! to the output directory.

/// File name of the summary report.
pub const SUMMARY_REPORT: &str = "Resumen_Notas.pdf";

/// Extension of rendered student documents.
pub const DOCUMENT_EXTENSION: &str = "docx";

/// `Notas_de_<student_name>.docx`, with the name made filesystem-safe.
pub fn student_document(student_name: &str) -> String {
    format!(
        "Notas_de_{}.{DOCUMENT_EXTENSION}",
        sanitize_component(student_name)
    )
}

/// Insert `_<n>` before the extension: `Notas_de_Ana.docx` → `Notas_de_Ana_2.docx`.
pub fn with_suffix(file_name: &str, n: usize) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{n}.{ext}"),
        None => format!("{file_name}_{n}"),
    }
}

/// Replace characters that cannot appear in a single path component on
/// common filesystems. Leading/trailing whitespace is dropped.
pub fn sanitize_component(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
