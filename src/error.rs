use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fallos terminales al quitar la protección de un documento.
#[derive(Debug, Error)]
pub enum StripError {
    #[error("El archivo de entrada no existe: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("El archivo de entrada no es un docx, pptx o xlsx: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error(
        "Formato binario compuesto no soportado. Puede tratarse de una versión heredada o de un documento completamente cifrado."
    )]
    LegacyFormat,

    #[error("No se encontró protección por contraseña en el archivo.")]
    ProtectionNotFound,

    #[error("No se pudo extraer el archivo de entrada: {0}")]
    InvalidArchive(#[from] zip::result::ZipError),

    #[error("No se pudo leer {part}: {source}")]
    MalformedXml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Error leyendo el archivo de entrada: {0}")]
    Read(#[source] io::Error),

    #[error("No se pudo escribir {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No se pudo generar el ZIP {}: {source}", path.display())]
    WriteArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Error escribiendo XML sin protección: {0}")]
    Serialize(String),

    #[error("La verificación indicó que {part} conserva la protección")]
    VerificationFailed { part: String },
}

impl StripError {
    /// Código de salida del proceso asociado a cada fallo.
    pub fn exit_code(&self) -> i32 {
        match self {
            StripError::InputNotFound(_) => 1,
            StripError::UnsupportedExtension(_) => 2,
            StripError::LegacyFormat => 3,
            StripError::ProtectionNotFound => 4,
            StripError::InvalidArchive(_) | StripError::MalformedXml { .. } | StripError::Read(_) => {
                5
            }
            StripError::Write { .. }
            | StripError::WriteArchive { .. }
            | StripError::Serialize(_)
            | StripError::VerificationFailed { .. } => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, StripError>;
