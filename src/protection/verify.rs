use std::fs::File;
use std::path::Path;
use xmltree::{Element, XMLNode};
use zip::ZipArchive;

use crate::error::{Result, StripError};
use crate::profile::DocumentProfile;

use super::archive::read_entry;

/// Comprueba que el documento generado ya no conserva nodos de protección.
pub fn verify_protection_removed(path: &Path, profile: &DocumentProfile) -> Result<bool> {
    let file = File::open(path).map_err(StripError::Read)?;
    let mut archive = ZipArchive::new(file)?;

    let part = profile.settings_part();
    let Some(contents) = read_entry(&mut archive, &part)? else {
        return Ok(true);
    };

    let root = Element::parse(std::io::Cursor::new(&contents[..])).map_err(|e| {
        StripError::Serialize(format!("{part} no es XML válido tras la limpieza: {e}"))
    })?;

    Ok(!has_protection_descendant(&root, profile))
}

fn has_protection_descendant(element: &Element, profile: &DocumentProfile) -> bool {
    element.children.iter().any(|node| match node {
        XMLNode::Element(child) => {
            profile.is_protection_tag(&child.name) || has_protection_descendant(child, profile)
        }
        _ => false,
    })
}
