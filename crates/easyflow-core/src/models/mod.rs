pub mod artifact;
pub mod chapter;
pub mod context;
pub mod row;
pub mod scalar;
pub mod sender;
