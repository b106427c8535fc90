//! Reads the acquisition parameters TIA embeds in `.emi` files.
//!
//! An `.emi` is mostly opaque binary, but somewhere in it is an
//! XML block of the form
//!
//! ```xml
//! <ObjectInfo>
//!   ...
//!   <ExperimentalDescription>
//!     <Data><Label>High tension</Label><Value>300</Value>...</Data>
//!     ...
//!   </ExperimentalDescription>
//! </ObjectInfo>
//! ```
//!
//! Every `Data` element below `ObjectInfo` becomes one entry of
//! the record, no matter how deeply it is nested.

use std::path::Path;

use crate::metadata::{ExtractionFailure, MetadataRecord};

pub const OBJECT_INFO_START : &str = "<ObjectInfo>";
pub const OBJECT_INFO_END : &str = "</ObjectInfo>";

/// Label used when a `Data` element has no `Label` child
pub const UNKNOWN_LABEL : &str = "Unknown";
/// Value used when a `Data` element has no `Value` child
pub const MISSING_VALUE : &str = "N/A";

/// Reads the whole `.emi` at `path` and parses its `ObjectInfo` block.
///
/// ## Errors
///
/// * `ExtractionFailure::Unreadable` - the file could not be read
///
/// * `ExtractionFailure::MarkersMissing` - no complete `ObjectInfo` block
///
/// * `ExtractionFailure::MalformedXml` - the block is not well-formed
pub fn read_emi_metadata(path : &Path) -> Result<MetadataRecord, ExtractionFailure> {
    let bytes = std::fs::read(path).map_err(|source| {
        ExtractionFailure::Unreadable { path : path.to_path_buf(), source }
    })?;
    parse_emi_bytes(&bytes)
}

/// Same as `read_emi_metadata`, but on bytes already in memory.
/// Deterministic: the same bytes always give the same record.
pub fn parse_emi_bytes(bytes : &[u8]) -> Result<MetadataRecord, ExtractionFailure> {
    let text = decode_dropping_invalid(bytes);
    let block = object_info_block(&text).ok_or(ExtractionFailure::MarkersMissing)?;
    parse_object_info(block)
}

/// UTF-8 decoding that silently drops invalid sequences
/// (no replacement characters are inserted).
fn decode_dropping_invalid(bytes : &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Slices from the first start marker through the first end
/// marker following it, markers included.
fn object_info_block(text : &str) -> Option<&str> {
    let start = text.find(OBJECT_INFO_START)?;
    let body = start + OBJECT_INFO_START.len();
    let end = body + text[body..].find(OBJECT_INFO_END)? + OBJECT_INFO_END.len();
    Some(&text[start..end])
}

fn parse_object_info(block : &str) -> Result<MetadataRecord, ExtractionFailure> {
    let doc = roxmltree::Document::parse(block)
        .map_err(|err| ExtractionFailure::MalformedXml(err.to_string()))?;
    let root = doc.root_element();

    let mut record = MetadataRecord::new();
    root.descendants()
        .filter(|node| *node != root && node.has_tag_name("Data"))
        .for_each(|data| {
            let label = child_text(&data, "Label").unwrap_or(UNKNOWN_LABEL);
            let value = child_text(&data, "Value").unwrap_or(MISSING_VALUE);
            record.insert(label, value);
        });
    Ok(record)
}

/// `None` if there's no such child; an empty child gives `Some("")`.
fn child_text<'a>(node : &roxmltree::Node<'a, '_>, name : &str) -> Option<&'a str> {
    node.children()
        .find(|child| child.has_tag_name(name))
        .map(|child| child.text().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wraps `xml` in some binary junk the way TIA does
    fn emi_bytes(xml : &str) -> Vec<u8> {
        let mut bytes = vec![0x4A, 0x00, 0xFF, 0xFE, 0x80, 0x01];
        bytes.extend_from_slice(b"\x00\x00ObjectInfo\x00");
        bytes.extend_from_slice(xml.as_bytes());
        bytes.extend_from_slice(&[0x00, 0xC3, 0x28, 0x9F, 0x00]);
        bytes
    }

    const OBJECT_INFO : &str = "<ObjectInfo><ExperimentalDescription>\
        <Data><Label>High tension</Label><Value>300</Value><Unit>kV</Unit></Data>\
        <Data><Label>Mode</Label><Value>TEM Imaging</Value></Data>\
        <Data><Value>orphan</Value></Data>\
        <Data><Label>Spot size</Label></Data>\
        </ExperimentalDescription></ObjectInfo>";

    #[test]
    fn extracts_labels_in_order() {
        let record = parse_emi_bytes(&emi_bytes(OBJECT_INFO)).unwrap();
        let entries : Vec<(&str, &str)> = record.iter().collect();
        assert_eq!(entries, vec![
            ("High tension", "300"),
            ("Mode", "TEM Imaging"),
            ("Unknown", "orphan"),
            ("Spot size", "N/A"),
        ]);
    }

    #[test]
    fn duplicate_labels_keep_last_value() {
        let xml = "<ObjectInfo>\
            <Data><Label>Mode</Label><Value>TEM</Value></Data>\
            <Data><Label>Defocus</Label><Value>0</Value></Data>\
            <Data><Label>Mode</Label><Value>STEM</Value></Data>\
            </ObjectInfo>";
        let record = parse_emi_bytes(xml.as_bytes()).unwrap();
        assert_eq!(record.labels().collect::<Vec<_>>(), vec!["Mode", "Defocus"]);
        assert_eq!(record.get("Mode"), Some("STEM"));
    }

    #[test]
    fn empty_children_are_empty_strings() {
        let xml = "<ObjectInfo><Data><Label>Note</Label><Value/></Data></ObjectInfo>";
        let record = parse_emi_bytes(xml.as_bytes()).unwrap();
        assert_eq!(record.get("Note"), Some(""));

        let xml = "<ObjectInfo><Data><Label/><Value>42</Value></Data>\
            <Data><Label></Label><Value></Value></Data></ObjectInfo>";
        let record = parse_emi_bytes(xml.as_bytes()).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get(""), Some(""));
        assert_eq!(record.get(UNKNOWN_LABEL), None);
    }

    #[test]
    fn invalid_utf8_is_dropped() {
        let mut bytes = b"<ObjectInfo><Data><Label>Gun</Label><Value>F".to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice(b"EG</Value></Data></ObjectInfo>");
        let record = parse_emi_bytes(&bytes).unwrap();
        assert_eq!(record.get("Gun"), Some("FEG"));
    }

    #[test]
    fn missing_markers() {
        assert!(matches!(
            parse_emi_bytes(b"no xml at all"),
            Err(ExtractionFailure::MarkersMissing)
        ));
        assert!(matches!(
            parse_emi_bytes(b"<ObjectInfo><Data/>"),
            Err(ExtractionFailure::MarkersMissing)
        ));
        // End marker before the start marker doesn't count
        assert!(matches!(
            parse_emi_bytes(b"</ObjectInfo> junk <ObjectInfo>"),
            Err(ExtractionFailure::MarkersMissing)
        ));
    }

    #[test]
    fn malformed_xml_is_not_partial() {
        let xml = "<ObjectInfo><Data><Label>A</Label><Value>1</Value></Data>\
            <Data><Label>B</Label><Value>2</Data></ObjectInfo>";
        assert!(matches!(
            parse_emi_bytes(xml.as_bytes()),
            Err(ExtractionFailure::MalformedXml(_))
        ));
    }

    #[test]
    fn idempotent() {
        let bytes = emi_bytes(OBJECT_INFO);
        let first = parse_emi_bytes(&bytes).unwrap();
        let second = parse_emi_bytes(&bytes).unwrap();
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn unreadable_file() {
        let missing = Path::new("/definitely/not/here.emi");
        assert!(matches!(
            read_emi_metadata(missing),
            Err(ExtractionFailure::Unreadable { .. })
        ));
    }
}
