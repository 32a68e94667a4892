use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::ZipArchive;

use crate::error::{Result, StripError};
use crate::profile::{DocumentProfile, profile_for_path};
use crate::ui;

use super::archive::{read_entry, rewrite_archive};
use super::detect::is_compound_file;
use super::verify::verify_protection_removed;
use super::xml::{ProtectionElement, strip_settings_part};

/// Documento de entrada y ruta donde se deja la copia editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripRequest {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Resumen de una limpieza completada.
#[derive(Debug)]
pub struct StripReport {
    pub output: PathBuf,
    pub profile: &'static DocumentProfile,
    pub removed: Vec<ProtectionElement>,
}

/// Genera una copia del documento sin la protección de solo lectura.
///
/// Si no se encuentra ninguna protección no se crea ningún archivo. El ZIP de
/// salida se escribe primero en un temporal junto al destino y solo se mueve a
/// `request.output` cuando la verificación confirma que la protección ya no está.
/// Ante cualquier fallo el temporal se borra al soltarse.
pub fn strip_protection(request: &StripRequest) -> Result<StripReport> {
    let input = &request.input;
    if !input.is_file() {
        return Err(StripError::InputNotFound(input.clone()));
    }

    if is_compound_file(input)? {
        return Err(StripError::LegacyFormat);
    }

    let profile =
        profile_for_path(input).ok_or_else(|| StripError::UnsupportedExtension(input.clone()))?;
    ui::info(&format!("Procesando archivo de {}...", profile.name));

    let source_file = File::open(input).map_err(StripError::Read)?;
    let mut archive = ZipArchive::new(source_file)?;

    let part = profile.settings_part();
    let Some(contents) = read_entry(&mut archive, &part)? else {
        ui::warning(&format!("El documento no contiene {part}"));
        return Err(StripError::ProtectionNotFound);
    };

    let stripped = strip_settings_part(&part, &contents, profile)?;
    if stripped.removed.is_empty() {
        return Err(StripError::ProtectionNotFound);
    }

    for element in &stripped.removed {
        ui::info(&format!(
            "Eliminando protección por contraseña ({})",
            element.tag
        ));
        for (label, name, value) in element.details() {
            ui::info(&format!("\t{label} ({name}): {value}"));
        }
    }

    let write_error = |source: std::io::Error| StripError::Write {
        path: request.output.clone(),
        source,
    };

    let parent = match request.output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;

    rewrite_archive(
        &mut archive,
        temp.as_file_mut(),
        &request.output,
        &part,
        &stripped.contents,
    )?;
    if !verify_protection_removed(temp.path(), profile)? {
        return Err(StripError::VerificationFailed { part });
    }

    temp.persist(&request.output)
        .map_err(|persist| write_error(persist.error))?;

    Ok(StripReport {
        output: request.output.clone(),
        profile,
        removed: stripped.removed,
    })
}
