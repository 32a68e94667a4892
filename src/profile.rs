//! Perfiles estáticos de los formatos Office soportados.

use std::path::Path;

/// Describe dónde vive la protección dentro de un tipo de documento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentProfile {
    pub name: &'static str,
    pub extension: &'static str,
    pub path: &'static str,
    pub xml: &'static str,
    pub nodes: &'static [&'static str],
}

impl DocumentProfile {
    /// Nombre completo de la parte XML dentro del ZIP (ej. `word/settings.xml`).
    pub fn settings_part(&self) -> String {
        format!("{}{}", self.path, self.xml)
    }

    /// Indica si la etiqueta local corresponde a un nodo de protección.
    pub fn is_protection_tag(&self, local_name: &str) -> bool {
        self.nodes.iter().any(|node| local_name.contains(node))
    }
}

pub const WORD: DocumentProfile = DocumentProfile {
    name: "Microsoft Word",
    extension: ".docx",
    path: "word/",
    xml: "settings.xml",
    nodes: &["writeProtection", "documentProtection"],
};

pub const POWERPOINT: DocumentProfile = DocumentProfile {
    name: "Microsoft PowerPoint",
    extension: ".pptx",
    path: "ppt/",
    xml: "presentation.xml",
    nodes: &["modifyVerifier"],
};

pub const EXCEL: DocumentProfile = DocumentProfile {
    name: "Microsoft Excel",
    extension: ".xlsx",
    path: "xl/",
    xml: "workbook.xml",
    nodes: &["fileSharing", "workbookProtection"],
};

pub static PROFILES: [DocumentProfile; 3] = [WORD, POWERPOINT, EXCEL];

/// Busca el perfil que corresponde a una extensión, con o sin punto inicial.
pub fn profile_for_extension(extension: &str) -> Option<&'static DocumentProfile> {
    let wanted = extension.trim_start_matches('.');
    PROFILES.iter().find(|profile| {
        profile
            .extension
            .trim_start_matches('.')
            .eq_ignore_ascii_case(wanted)
    })
}

/// Despacha el perfil en función de la extensión del archivo.
pub fn profile_for_path(path: &Path) -> Option<&'static DocumentProfile> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(profile_for_extension)
}
