use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, StripError};

/// Firma de los archivos en formato binario compuesto (OLE2 / CFB).
pub const COMPOUND_FILE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Comprueba si los primeros bytes de `path` corresponden a un documento binario heredado.
pub fn is_compound_file(path: &Path) -> Result<bool> {
    let file = File::open(path).map_err(StripError::Read)?;
    let mut header = Vec::with_capacity(COMPOUND_FILE_MAGIC.len());
    file.take(COMPOUND_FILE_MAGIC.len() as u64)
        .read_to_end(&mut header)
        .map_err(StripError::Read)?;

    Ok(header == COMPOUND_FILE_MAGIC)
}
