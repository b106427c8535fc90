//! Lib
//!
//! Pairs FEI/TIA acquisitions -- an `.emi` holding the acquisition
//! parameters as XML and a `.ser` holding the data -- and turns each
//! pair into one `Label: Value` text report.

use std::path::Path;

mod batch;
mod file_data;
mod matcher;
mod metadata;

pub mod ser;

pub mod config;
pub mod logging;

pub use batch::{
    run_batch,
    report_path,
    write_report,
    BatchRequest,
    BatchReport,
    BatchError,
    ValidationError,
    MetadataView,
    WrittenReport,
    SkippedPair,
    REPORT_SUFFIX,
};
pub use file_data::{FileRef, FileKind, SERIES_SUFFIX};
pub use matcher::{match_pairs, MatchedPair};
pub use metadata::{
    read_emi_metadata,
    read_image_metadata,
    parse_emi_bytes,
    image_record,
    format_pixel_size,
    MetadataRecord,
    ExtractionFailure,
    ImageLoader,
    ImageInfo,
    AxisCalibration,
    IMAGE_SIZE_X,
    IMAGE_SIZE_Y,
    PIXEL_SIZE_X,
    PIXEL_SIZE_Y,
};
pub use ser::SerLoader;

/// `extract_emi_metadata(path)` reads the `<ObjectInfo>` block of an
/// `.emi` file into a `MetadataRecord`. Any failure (unreadable file,
/// no block, malformed XML) gives an empty record -- use
/// `read_emi_metadata` to find out which.
///
/// ## Arguments
///
/// * `path` - Path to the `.emi` file
///
/// ## Example
///
/// ```rust, ignore
/// let record = feimeta::extract_emi_metadata("sample01.emi");
/// println!("{}", record);
/// ```
pub fn extract_emi_metadata<P : AsRef<Path>>(path : P) -> MetadataRecord {
    read_emi_metadata(path.as_ref()).unwrap_or_else(|err| {
        tracing::debug!("{}: {}", path.as_ref().display(), err);
        MetadataRecord::new()
    })
}

/// `extract_ser_metadata(path)` reads image size and pixel size from
/// a `.ser` file's calibration, without reading any pixel data. Any
/// failure gives an empty record -- use `read_image_metadata` with a
/// `SerLoader` to find out which.
///
/// ## Arguments
///
/// * `path` - Path to the `.ser` file
///
/// ## Example
///
/// ```rust, ignore
/// let record = feimeta::extract_ser_metadata("sample01_1.ser");
/// assert_eq!(record.len(), 4);
/// ```
pub fn extract_ser_metadata<P : AsRef<Path>>(path : P) -> MetadataRecord {
    read_image_metadata(&SerLoader, path.as_ref()).unwrap_or_else(|err| {
        tracing::debug!("{}: {}", path.as_ref().display(), err);
        MetadataRecord::new()
    })
}

/// `match_files(emis, sers)` pairs every `.emi` with the first `.ser`
/// sharing its stem (ignoring a trailing `_1` on the `.ser`).
///
/// ## Errors
///
/// * `BatchError::NoMatch` - not a single pair was found
///
/// ## Example
///
/// ```
/// let pairs = feimeta::match_files(
///     &["sample01.emi", "sample02.emi"],
///     &["sample01_1.ser"],
/// ).unwrap();
/// assert_eq!(pairs.len(), 1);
/// assert!(feimeta::match_files(&["sample01.emi"], &["sample02.ser"]).is_err());
/// ```
pub fn match_files<M, I>(metadata : &[M], images : &[I]) -> Result<Vec<MatchedPair>, BatchError>
where M : AsRef<Path>, I : AsRef<Path> {
    let metadata : Vec<FileRef> = metadata.iter().map(FileRef::metadata).collect();
    let images : Vec<FileRef> = images.iter().map(FileRef::image).collect();
    let pairs = match_pairs(&metadata, &images);
    if pairs.is_empty() {
        return Err(BatchError::NoMatch);
    }
    Ok(pairs)
}
