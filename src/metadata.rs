//! The `MetadataRecord` collects the acquisition parameters
//! scattered across an `.emi`/`.ser` pair into one ordered,
//! human-readable list. Most of it comes from the XML block
//! in the `.emi`; image size and pixel size come from the
//! calibration stored with the `.ser` data.

mod emi;
mod image;
mod record;

use std::path::PathBuf;

pub use record::MetadataRecord;
pub use emi::{read_emi_metadata, parse_emi_bytes};
pub use image::{
    read_image_metadata,
    image_record,
    format_pixel_size,
    ImageLoader,
    ImageInfo,
    AxisCalibration,
    IMAGE_SIZE_X,
    IMAGE_SIZE_Y,
    PIXEL_SIZE_X,
    PIXEL_SIZE_Y,
};

/// Why a single file produced no metadata. The batch swallows
/// these (the file just contributes nothing), but single-file
/// callers can tell the cases apart.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionFailure {
    #[error("could not read {}: {source}", .path.display())]
    Unreadable {
        path : PathBuf,
        source : std::io::Error,
    },
    #[error("no complete <ObjectInfo> block")]
    MarkersMissing,
    #[error("<ObjectInfo> block has no Data entries")]
    NoEntries,
    #[error("malformed <ObjectInfo> XML: {0}")]
    MalformedXml(String),
    #[error("unsupported image container: {0}")]
    UnsupportedFormat(String),
    #[error("no calibration for axis {0}")]
    MissingCalibration(usize),
}
