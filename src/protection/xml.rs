use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Result, StripError};
use crate::profile::DocumentProfile;

/// Dato de la contraseña que puede aparecer como atributo del nodo de protección.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordField {
    AlgorithmName,
    Hash,
    Salt,
}

impl PasswordField {
    const ALL: [PasswordField; 3] = [
        PasswordField::AlgorithmName,
        PasswordField::Hash,
        PasswordField::Salt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PasswordField::AlgorithmName => "Algoritmo",
            PasswordField::Hash => "Hash",
            PasswordField::Salt => "Salt",
        }
    }

    /// Fragmento que debe contener el nombre del atributo, ya en minúsculas.
    fn needle(self) -> &'static str {
        match self {
            PasswordField::AlgorithmName => "algorithmname",
            PasswordField::Hash => "hash",
            PasswordField::Salt => "salt",
        }
    }
}

/// Atributo de contraseña tal como aparece en el nodo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordAttribute {
    pub field: PasswordField,
    pub name: String,
    pub value: String,
}

/// Nodo de protección retirado del XML, con los datos de la contraseña si existen.
///
/// Un mismo nodo puede llevar varios hashes (ej. `workbookHashValue` y
/// `revisionsHashValue` en Excel); se conservan todos en orden de aparición.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectionElement {
    pub tag: String,
    pub attributes: Vec<PasswordAttribute>,
}

impl ProtectionElement {
    fn from_start(start: &BytesStart<'_>) -> std::result::Result<Self, quick_xml::Error> {
        let mut found = ProtectionElement {
            tag: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Default::default()
        };

        for attr in start.attributes() {
            let attr = attr?;
            let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let lowered = name.to_lowercase();
            let value = attr.unescape_value()?;
            for field in PasswordField::ALL {
                if lowered.contains(field.needle()) {
                    found.attributes.push(PasswordAttribute {
                        field,
                        name: name.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }

        Ok(found)
    }

    /// Valores encontrados para un dato concreto, en orden de aparición.
    pub fn values(&self, field: PasswordField) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|attr| attr.field == field)
            .map(|attr| attr.value.as_str())
            .collect()
    }

    /// Líneas etiqueta/atributo/valor listas para mostrar, agrupadas por dato.
    pub fn details(&self) -> Vec<(&'static str, &str, &str)> {
        PasswordField::ALL
            .into_iter()
            .flat_map(move |field| {
                self.attributes
                    .iter()
                    .filter(move |attr| attr.field == field)
                    .map(move |attr| (field.label(), attr.name.as_str(), attr.value.as_str()))
            })
            .collect()
    }
}

/// Resultado de procesar la parte XML de configuración.
#[derive(Debug)]
pub(crate) struct StrippedPart {
    pub(crate) contents: Vec<u8>,
    pub(crate) removed: Vec<ProtectionElement>,
}

/// Elimina los nodos de protección de la parte `part` en una sola pasada.
///
/// El resto de eventos se copia tal cual, de modo que prefijos, declaración y
/// espacios en blanco no cambian. La raíz nunca se elimina y los descendientes
/// de un nodo retirado se van con él.
pub(crate) fn strip_settings_part(
    part: &str,
    contents: &[u8],
    profile: &DocumentProfile,
) -> Result<StrippedPart> {
    let malformed = |source: quick_xml::Error| StripError::MalformedXml {
        part: part.to_string(),
        source,
    };
    let serialize = |e: &dyn std::fmt::Display| StripError::Serialize(e.to_string());

    let mut reader = Reader::from_reader(contents);
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new(Vec::with_capacity(contents.len()));

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut removed = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(malformed)? {
            Event::Start(e) if depth > 0 && is_protection(&e, profile) => {
                removed.push(ProtectionElement::from_start(&e).map_err(malformed)?);
                skip_subtree(&mut reader).map_err(malformed)?;
            }
            Event::Empty(e) if depth > 0 && is_protection(&e, profile) => {
                removed.push(ProtectionElement::from_start(&e).map_err(malformed)?);
            }
            Event::Start(e) => {
                depth += 1;
                writer
                    .write_event(Event::Start(e))
                    .map_err(|e| serialize(&e))?;
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                writer
                    .write_event(Event::End(e))
                    .map_err(|e| serialize(&e))?;
            }
            Event::Eof if depth > 0 => return Err(malformed(unclosed_tag())),
            Event::Eof => break,
            ev => writer.write_event(ev).map_err(|e| serialize(&e))?,
        }
        buf.clear();
    }

    if removed.is_empty() {
        return Ok(StrippedPart {
            contents: contents.to_vec(),
            removed,
        });
    }

    Ok(StrippedPart {
        contents: writer.into_inner(),
        removed,
    })
}

fn is_protection(start: &BytesStart<'_>, profile: &DocumentProfile) -> bool {
    let name = start.local_name();
    std::str::from_utf8(name.as_ref()).is_ok_and(|name| profile.is_protection_tag(name))
}

fn unclosed_tag() -> quick_xml::Error {
    quick_xml::Error::Syntax(quick_xml::errors::SyntaxError::UnclosedTag)
}

/// Consume eventos hasta cerrar el elemento que se acaba de abrir.
fn skip_subtree(reader: &mut Reader<&[u8]>) -> std::result::Result<(), quick_xml::Error> {
    let mut buf = Vec::new();
    let mut depth = 1usize;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err(unclosed_tag()),
            _ => {}
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{EXCEL, POWERPOINT, WORD};

    const SETTINGS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:zoom w:percent="100"/>
    <w:documentProtection w:edit="readOnly" w:enforcement="1" w:algorithmName="SHA-512" w:hashValue="aGFzaA==" w:saltValue="c2FsdA==" w:spinCount="100000"/>
    <w:defaultTabStop w:val="708"/>
</w:settings>
"#;

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn removes_document_protection_and_reports_attributes() -> Result<()> {
        let stripped = strip_settings_part("word/settings.xml", SETTINGS_XML.as_bytes(), &WORD)?;

        assert_eq!(stripped.removed.len(), 1);
        let found = &stripped.removed[0];
        assert_eq!(found.tag, "documentProtection");
        assert_eq!(found.values(PasswordField::AlgorithmName), vec!["SHA-512"]);
        assert_eq!(found.values(PasswordField::Hash), vec!["aGFzaA=="]);
        assert_eq!(found.values(PasswordField::Salt), vec!["c2FsdA=="]);
        assert_eq!(
            found.details(),
            vec![
                ("Algoritmo", "algorithmName", "SHA-512"),
                ("Hash", "hashValue", "aGFzaA=="),
                ("Salt", "saltValue", "c2FsdA=="),
            ]
        );

        let text = as_text(&stripped.contents);
        assert!(!text.contains("documentProtection"));
        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(text.contains(r#"<w:zoom w:percent="100"/>"#));
        assert!(text.contains(r#"<w:defaultTabStop w:val="708"/>"#));
        Ok(())
    }

    #[test]
    fn nested_and_non_empty_matches_are_removed_once() -> Result<()> {
        let xml = r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><outer><inner><workbookProtection lockStructure="1"><extra/></workbookProtection></inner></outer><fileSharing readOnlyRecommended="1" userName="x"/></workbook>"#;

        let stripped = strip_settings_part("xl/workbook.xml", xml.as_bytes(), &EXCEL)?;

        let tags: Vec<&str> = stripped.removed.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["workbookProtection", "fileSharing"]);
        assert_eq!(
            as_text(&stripped.contents),
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><outer><inner></inner></outer></workbook>"#
        );
        Ok(())
    }

    #[test]
    fn modify_verifier_attributes_are_reported() -> Result<()> {
        let xml = r#"<p:presentation xmlns:p="urn:p"><p:modifyVerifier p:cryptAlgorithmSid="4" p:hashData="SGFzaA==" p:saltData="U2FsdA=="/></p:presentation>"#;

        let stripped = strip_settings_part("ppt/presentation.xml", xml.as_bytes(), &POWERPOINT)?;

        assert_eq!(stripped.removed.len(), 1);
        let found = &stripped.removed[0];
        assert!(found.values(PasswordField::AlgorithmName).is_empty());
        assert_eq!(found.values(PasswordField::Hash), vec!["SGFzaA=="]);
        assert_eq!(found.values(PasswordField::Salt), vec!["U2FsdA=="]);
        assert_eq!(as_text(&stripped.contents), r#"<p:presentation xmlns:p="urn:p"></p:presentation>"#);
        Ok(())
    }

    #[test]
    fn every_matching_attribute_is_reported() -> Result<()> {
        let xml = r#"<workbook><workbookProtection workbookAlgorithmName="SHA-512" workbookHashValue="d2I=" workbookSaltValue="c2Fs" revisionsAlgorithmName="SHA-256" revisionsHashValue="cmV2" revisionsSaltValue="cnM=" lockStructure="1"/></workbook>"#;

        let stripped = strip_settings_part("xl/workbook.xml", xml.as_bytes(), &EXCEL)?;

        let found = &stripped.removed[0];
        assert_eq!(
            found.values(PasswordField::AlgorithmName),
            vec!["SHA-512", "SHA-256"]
        );
        assert_eq!(found.values(PasswordField::Hash), vec!["d2I=", "cmV2"]);
        assert_eq!(found.values(PasswordField::Salt), vec!["c2Fs", "cnM="]);
        assert_eq!(found.details().len(), 6);
        assert_eq!(found.details()[1], ("Algoritmo", "revisionsAlgorithmName", "SHA-256"));
        Ok(())
    }

    #[test]
    fn root_element_is_never_removed() -> Result<()> {
        let xml = b"<documentProtection><zoom/></documentProtection>";

        let stripped = strip_settings_part("word/settings.xml", xml, &WORD)?;

        assert!(stripped.removed.is_empty());
        assert_eq!(stripped.contents, xml.to_vec());
        Ok(())
    }

    #[test]
    fn untouched_part_keeps_original_bytes() -> Result<()> {
        let xml = b"<w:settings xmlns:w=\"urn:w\">\n  <w:zoom/>\n</w:settings>";
        let stripped = strip_settings_part("word/settings.xml", xml, &WORD)?;

        assert!(stripped.removed.is_empty());
        assert_eq!(stripped.contents, xml.to_vec());
        Ok(())
    }

    #[test]
    fn unclosed_protection_is_reported_with_part_name() {
        let error = strip_settings_part(
            "xl/workbook.xml",
            b"<workbook><workbookProtection lockStructure=\"1\">",
            &EXCEL,
        )
        .expect_err("xml inválido");

        assert!(
            matches!(error, StripError::MalformedXml { ref part, .. } if part == "xl/workbook.xml")
        );
        assert_eq!(error.exit_code(), 5);
    }

    #[test]
    fn unclosed_root_is_reported_before_any_output() {
        let error = strip_settings_part(
            "word/settings.xml",
            b"<w:settings xmlns:w=\"urn:w\"><w:documentProtection w:hash=\"x\"/><w:zoom/>",
            &WORD,
        )
        .expect_err("la raíz nunca se cierra");

        assert!(
            matches!(error, StripError::MalformedXml { ref part, .. } if part == "word/settings.xml")
        );
        assert_eq!(error.exit_code(), 5);
    }
}
