use serde::{Deserialize, Serialize};

/// Static identity of whoever sends the documents, bound into templates
/// as `nombre`, `telefono`, `correo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderIdentity {
    pub name: String,
    pub phone: String,
    pub email: String,
}
