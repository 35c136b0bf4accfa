//! MXL file handler — reads compressed MusicXML (.mxl) archives.
//!
//! An .mxl file is a ZIP archive containing:
//!   - META-INF/container.xml  — declares the root MusicXML file path
//!   - <rootfile>.xml          — the actual MusicXML content

use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::model::Score;
use crate::parser;

/// Read and parse a .mxl file from raw bytes.
pub fn parse_mxl(data: &[u8]) -> Result<Score, String> {
    let xml = extract_musicxml(data)?;
    parser::parse_musicxml(&xml)
}

/// Extract the MusicXML content string from .mxl bytes.
pub fn extract_musicxml(data: &[u8]) -> Result<String, String> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| format!("Failed to open MXL archive: {e}"))?;

    let root_path = locate_root_file(&mut archive)?;

    let mut root_file = archive
        .by_name(&root_path)
        .map_err(|e| format!("Root file '{root_path}' not found in archive: {e}"))?;

    let mut xml = String::new();
    root_file
        .read_to_string(&mut xml)
        .map_err(|e| format!("Failed to read '{root_path}': {e}"))?;

    Ok(xml)
}

/// Find the root MusicXML file inside the archive.
///
/// Prefers the path declared in META-INF/container.xml; if that file is
/// absent, falls back to the first .xml/.musicxml entry outside META-INF.
fn locate_root_file(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<String, String> {
    let container_xml = match archive.by_name("META-INF/container.xml") {
        Ok(mut file) => {
            let mut xml = String::new();
            file.read_to_string(&mut xml)
                .map_err(|e| format!("Failed to read container.xml: {e}"))?;
            Some(xml)
        }
        Err(_) => None,
    }; // mutable borrow of archive is released here

    if let Some(xml) = container_xml {
        let doc = roxmltree::Document::parse(&xml)
            .map_err(|e| format!("Failed to parse container.xml: {e}"))?;

        for node in doc.descendants() {
            if node.tag_name().name() == "rootfile" {
                if let Some(path) = node.attribute("full-path") {
                    return Ok(path.to_string());
                }
            }
        }

        return Err("No rootfile found in container.xml".to_string());
    }

    let names: Vec<String> = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .collect();

    for name in &names {
        if !name.starts_with("META-INF/")
            && (name.ends_with(".xml") || name.ends_with(".musicxml"))
        {
            return Ok(name.clone());
        }
    }

    Err(format!(
        "No MusicXML file found in archive. Files: {:?}",
        names
    ))
}
