use std::path::{Path, PathBuf};

use clap::Parser;

use crate::protection::StripRequest;

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Elimina la restricción de solo lectura con contraseña de un archivo docx/pptx/xlsx."
)]
pub struct Args {
    /// Archivo docx/pptx/xlsx de entrada.
    #[arg(long)]
    pub file: PathBuf,

    /// Archivo de salida. Por defecto `{archivo}-writable.{extensión}`.
    #[arg(long)]
    pub out: Option<String>,
}

impl Args {
    pub fn into_request(self) -> StripRequest {
        let output = match self.out {
            Some(out) if !out.is_empty() => PathBuf::from(out),
            _ => default_output_path(&self.file),
        };

        StripRequest {
            input: self.file,
            output,
        }
    }
}

/// Nombre de salida por defecto, relativo al directorio de trabajo.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    match input.extension() {
        Some(extension) => PathBuf::from(format!(
            "{}-writable.{}",
            stem,
            extension.to_string_lossy()
        )),
        None => PathBuf::from(format!("{}-writable", stem)),
    }
}
