//! Quita la protección de solo lectura de documentos Office Open XML.

pub mod cli;
pub mod error;
pub mod profile;
pub mod protection;
pub mod ui;

pub use error::{Result, StripError};
