/// Spreadsheet column headers the loader requires.
pub mod column {
    pub const STUDENT_NAME: &str = "Nombre del Alumno";
    pub const MATH: &str = "Mat";
    pub const PHYSICS: &str = "Fis";
    pub const CHEMISTRY: &str = "Qui";
}

/// Template variable names bound into every rendered document.
pub mod placeholder {
    pub const STUDENT_NAME: &str = "nombre_alumno";
    pub const MATH: &str = "nota_mat";
    pub const PHYSICS: &str = "nota_fis";
    pub const CHEMISTRY: &str = "nota_qui";
    pub const DATE: &str = "fecha";

    // Static sender identity; blank when no sender is configured.
    pub const SENDER_NAME: &str = "nombre";
    pub const SENDER_PHONE: &str = "telefono";
    pub const SENDER_EMAIL: &str = "correo";
}

/// Required columns in the order they are reported when missing.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    column::STUDENT_NAME,
    column::MATH,
    column::PHYSICS,
    column::CHEMISTRY,
];

/// Return the required columns absent from `headers`, in declaration order.
///
/// Headers are compared after trimming surrounding whitespace.
pub fn missing_columns<S: AsRef<str>>(headers: &[S]) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h.as_ref().trim() == *required))
        .collect()
}
