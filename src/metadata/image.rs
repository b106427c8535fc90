use std::path::Path;

use crate::metadata::{ExtractionFailure, MetadataRecord};

pub const IMAGE_SIZE_X : &str = "Image Size (X)";
pub const IMAGE_SIZE_Y : &str = "Image Size (Y)";
pub const PIXEL_SIZE_X : &str = "Pixel Size (X)";
pub const PIXEL_SIZE_Y : &str = "Pixel Size (Y)";

/// Unit printed when the image container doesn't report one
pub const DEFAULT_UNIT : &str = "units";

/// Scale and physical unit of one array axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisCalibration {
    pub scale : f64,
    pub units : Option<String>,
}

/// What an `ImageLoader` knows about an image container without
/// touching its pixel data.
///
/// `shape` is `(rows, columns)`, and `axes[i]` calibrates array
/// dimension `i` -- so `axes[0]` runs along Y and `axes[1]` along X.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub shape : (u64, u64),
    pub axes : Vec<AxisCalibration>,
}

/// Anything that can describe the shape and calibration of
/// an image container. `SerLoader` is the implementation used
/// for TIA `.ser` files.
pub trait ImageLoader {
    fn load(&self, path : &Path) -> Result<ImageInfo, ExtractionFailure>;
}

/// Asks `loader` about `path` and builds the four image fields.
pub fn read_image_metadata<L : ImageLoader + ?Sized>(
    loader : &L,
    path : &Path,
) -> Result<MetadataRecord, ExtractionFailure> {
    let info = loader.load(path)?;
    image_record(&info)
}

/// Builds the record
///
/// * `Image Size (X)` - number of columns
/// * `Image Size (Y)` - number of rows
/// * `Pixel Size (X)` - scale of axis 1
/// * `Pixel Size (Y)` - scale of axis 0
///
/// ## Errors
///
/// * `ExtractionFailure::MissingCalibration` - fewer than two axes
pub fn image_record(info : &ImageInfo) -> Result<MetadataRecord, ExtractionFailure> {
    let (rows, columns) = info.shape;
    let y_axis = info.axes.first().ok_or(ExtractionFailure::MissingCalibration(0))?;
    let x_axis = info.axes.get(1).ok_or(ExtractionFailure::MissingCalibration(1))?;

    let mut record = MetadataRecord::new();
    record.insert(IMAGE_SIZE_X, columns.to_string());
    record.insert(IMAGE_SIZE_Y, rows.to_string());
    record.insert(PIXEL_SIZE_X, format_pixel_size(x_axis.scale, x_axis.units.as_deref()));
    record.insert(PIXEL_SIZE_Y, format_pixel_size(y_axis.scale, y_axis.units.as_deref()));
    Ok(record)
}

/// Three decimals, a space, and the unit (or `"units"`).
///
/// ## Example
///
/// ```
/// use feimeta::format_pixel_size;
///
/// assert_eq!(format_pixel_size(0.4567, Some("nm")), "0.457 nm");
/// assert_eq!(format_pixel_size(2.0, None), "2.000 units");
/// ```
pub fn format_pixel_size(scale : f64, units : Option<&str>) -> String {
    let units = units.filter(|u| !u.is_empty()).unwrap_or(DEFAULT_UNIT);
    format!("{:.3} {}", scale, units)
}
