//! Eliminación de la protección de solo lectura en documentos Office basados en ZIP.

mod archive;
mod detect;
mod strip;
mod verify;
mod xml;

pub use detect::{COMPOUND_FILE_MAGIC, is_compound_file};
pub use strip::{StripReport, StripRequest, strip_protection};
pub use verify::verify_protection_removed;
pub use xml::{PasswordAttribute, PasswordField, ProtectionElement};
