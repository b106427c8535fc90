//! Synthetic `.emi` and `.ser` files for the integration tests.

use std::path::{Path, PathBuf};

/// An `ObjectInfo` block with one `Data` element per `(label, value)`
pub fn object_info(entries : &[(&str, &str)]) -> String {
    let data : String = entries.iter()
        .map(|(label, value)| format!(
            "<Data><Label>{}</Label><Value>{}</Value></Data>", label, value
        ))
        .collect();
    format!(
        "<ObjectInfo><ExperimentalConditions/><ExperimentalDescription>{}</ExperimentalDescription></ObjectInfo>",
        data
    )
}

/// Writes an `.emi`: binary junk, the XML, more binary junk.
pub fn write_emi(dir : &Path, name : &str, xml : &str) -> PathBuf {
    let mut bytes = vec![0x4A, 0x00, 0x00, 0x00, 0xFF, 0xD8, 0x9C];
    bytes.extend_from_slice(xml.as_bytes());
    bytes.extend_from_slice(&[0x00, 0xFE, 0xFF, 0x00]);
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Writes a version `0x0220` image series holding one `u16`
/// image of `columns` x `rows` pixels, calibrated in metres.
pub fn write_ser(
    dir : &Path,
    name : &str,
    columns : u32,
    rows : u32,
    delta_x : f64,
    delta_y : f64,
) -> PathBuf {
    let mut b = Vec::new();
    b.extend_from_slice(&0x4949u16.to_le_bytes());
    b.extend_from_slice(&0x0197u16.to_le_bytes());
    b.extend_from_slice(&0x0220u16.to_le_bytes());
    b.extend_from_slice(&0x4122u32.to_le_bytes());
    b.extend_from_slice(&0x4152u32.to_le_bytes());
    b.extend_from_slice(&1u32.to_le_bytes());
    b.extend_from_slice(&1u32.to_le_bytes());
    let offset_slot = b.len();
    b.extend_from_slice(&0u64.to_le_bytes());
    b.extend_from_slice(&1u32.to_le_bytes());

    // dimension array
    b.extend_from_slice(&1u32.to_le_bytes());
    b.extend_from_slice(&0.0f64.to_le_bytes());
    b.extend_from_slice(&1.0f64.to_le_bytes());
    b.extend_from_slice(&0u32.to_le_bytes());
    b.extend_from_slice(&6u32.to_le_bytes());
    b.extend_from_slice(b"Number");
    b.extend_from_slice(&0u32.to_le_bytes());

    // offset arrays: one data offset, one tag offset
    let offset_array = b.len() as u64;
    b[offset_slot..offset_slot + 8].copy_from_slice(&offset_array.to_le_bytes());
    let data_offset = offset_array + 16;
    b.extend_from_slice(&data_offset.to_le_bytes());
    b.extend_from_slice(&0u64.to_le_bytes());

    // element header and pixels
    b.extend_from_slice(&0.0f64.to_le_bytes());
    b.extend_from_slice(&delta_x.to_le_bytes());
    b.extend_from_slice(&0u32.to_le_bytes());
    b.extend_from_slice(&0.0f64.to_le_bytes());
    b.extend_from_slice(&delta_y.to_le_bytes());
    b.extend_from_slice(&0u32.to_le_bytes());
    b.extend_from_slice(&2u16.to_le_bytes());
    b.extend_from_slice(&columns.to_le_bytes());
    b.extend_from_slice(&rows.to_le_bytes());
    b.extend(std::iter::repeat(0u8).take((columns * rows * 2) as usize));

    let path = dir.join(name);
    std::fs::write(&path, b).unwrap();
    path
}
