pub mod alignment;
pub mod correction;
pub mod error;
pub mod metadata;
pub mod position;
pub mod preflight;
pub mod validation;
pub mod variant_type;
