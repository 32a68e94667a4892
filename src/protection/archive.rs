use std::io::{Read, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{Result, StripError};

/// Lee el contenido descomprimido de una entrada, o `None` si el ZIP no la contiene.
pub(crate) fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(StripError::InvalidArchive(e)),
    };

    let mut contents = Vec::new();
    file.read_to_end(&mut contents).map_err(StripError::Read)?;
    Ok(Some(contents))
}

/// Reescribe el ZIP en `target_file` sustituyendo solo el contenido de `target`.
///
/// El resto de entradas se copian en crudo (sin recomprimir) y en el mismo orden.
/// El comentario global del archivo se conserva. `output_path` solo se usa en
/// los mensajes de error.
pub(crate) fn rewrite_archive<R: Read + Seek, W: Write + Seek>(
    archive: &mut ZipArchive<R>,
    target_file: W,
    output_path: &Path,
    target: &str,
    replacement: &[u8],
) -> Result<()> {
    let write_error = |source: zip::result::ZipError| StripError::WriteArchive {
        path: output_path.to_path_buf(),
        source,
    };

    let mut writer = ZipWriter::new(target_file);
    writer.set_raw_comment(archive.comment().to_vec().into());

    for i in 0..archive.len() {
        let file = archive.by_index_raw(i)?;

        if file.name() != target {
            writer.raw_copy_file(file).map_err(write_error)?;
            continue;
        }

        let name = file.name().to_string();
        let mut options = FileOptions::<'_, ()>::default().compression_method(file.compression());
        if let Some(mode) = file.unix_mode() {
            options = options.unix_permissions(mode);
        }
        if let Some(time) = file.last_modified() {
            options = options.last_modified_time(time);
        }

        writer.start_file(name, options).map_err(write_error)?;
        writer
            .write_all(replacement)
            .map_err(|source| StripError::Write {
                path: output_path.to_path_buf(),
                source,
            })?;
    }

    writer.finish().map_err(write_error)?;

    Ok(())
}
