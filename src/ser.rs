//! This module contains the TIA series (`.ser`) reader -- headers
//! and calibrations only. It never reads pixel data, so opening a
//! multi-gigabyte series costs a handful of small reads.
//!
//! Layout of a series file:
//!
//! ```text
//! series header | dimension arrays | ... | data offsets | tag offsets
//!                                          |
//!                                          v
//!                           element header | element array
//! ```

mod element;
mod header;
mod units;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use binrw::{
    io::{Read, Seek, SeekFrom},
    BinRead,
};

pub use element::{ElementHeader, ElementDataType, ImageElementHeader, SpectrumElementHeader};
pub use header::{SerHeader, DimensionArray, IMAGE_DATA_TYPE, SPECTRUM_DATA_TYPE};
pub use units::compact_length;

use header::offset_field;
use crate::metadata::{AxisCalibration, ExtractionFailure, ImageInfo, ImageLoader};

/// Errors from parsing a series file
#[derive(Debug, thiserror::Error)]
pub enum SerError {
    #[error("{0}")]
    Format(#[from] binrw::Error),
    #[error("series has no valid elements")]
    NoElements,
    #[error("spectrum series has no dimension array")]
    NoDimensions,
}

/// The series header and the header of its first element.
#[derive(Debug)]
pub struct SerSeries {
    pub header : SerHeader,
    pub first_element : ElementHeader,
}

impl SerSeries {
    /// Parses the series header, follows the offset array to the
    /// first element and parses its header. The reader is left
    /// just past the first element's header.
    ///
    /// ## Arguments
    ///
    /// * `reader` - A reader pointing to the start of a `.ser` file
    ///
    /// ## Example
    ///
    /// ```rust, ignore
    /// let mut f = std::fs::File::open("file_1.ser")?;
    /// let series = SerSeries::from_reader(&mut f)?;
    /// println!("{:?}", series.first_element);
    /// ```
    pub fn from_reader<R : Read + Seek>(reader : &mut R) -> Result<Self, SerError> {
        let header = SerHeader::read(reader)?;
        if header.valid_number_elements == 0 {
            return Err(SerError::NoElements);
        }

        reader.seek(SeekFrom::Start(header.offset_array_offset))
            .map_err(binrw::Error::Io)?;
        let first_offset = offset_field(reader, binrw::Endian::Little, (header.series_version,))?;

        reader.seek(SeekFrom::Start(first_offset))
            .map_err(binrw::Error::Io)?;
        let first_element = ElementHeader::read_args(reader, (header.data_type_id,))?;

        Ok(SerSeries { header, first_element })
    }

    /// Opens `path` and reads its headers. The file is closed on return.
    pub fn open(path : &Path) -> Result<Self, ExtractionFailure> {
        let file = File::open(path).map_err(|source| {
            ExtractionFailure::Unreadable { path : path.to_path_buf(), source }
        })?;
        let mut reader = BufReader::new(file);
        SerSeries::from_reader(&mut reader)
            .map_err(|err| ExtractionFailure::UnsupportedFormat(err.to_string()))
    }

    /// Shape `(rows, columns)` of one element, with axis 0
    /// calibrated along rows and axis 1 along columns.
    ///
    /// Images report their pixel calibration in compact length
    /// units. Spectrum series report one row per spectrum, with
    /// the first dimension array calibrating the rows.
    pub fn image_info(&self) -> Result<ImageInfo, SerError> {
        match &self.first_element {
            ElementHeader::Image(image) => {
                let (scale_y, units_y) = compact_length(image.calibration_delta_y, image.array_size_y);
                let (scale_x, units_x) = compact_length(image.calibration_delta_x, image.array_size_x);
                Ok(ImageInfo {
                    shape : (image.array_size_y.into(), image.array_size_x.into()),
                    axes : vec![
                        AxisCalibration { scale : scale_y, units : Some(units_y.to_string()) },
                        AxisCalibration { scale : scale_x, units : Some(units_x.to_string()) },
                    ],
                })
            },
            ElementHeader::Spectrum(spectrum) => {
                let rows = self.header.dimensions.first().ok_or(SerError::NoDimensions)?;
                Ok(ImageInfo {
                    shape : (rows.dimension_size.into(), spectrum.array_length.into()),
                    axes : vec![
                        AxisCalibration { scale : rows.calibration_delta, units : rows.units() },
                        AxisCalibration { scale : spectrum.calibration_delta, units : None },
                    ],
                })
            },
        }
    }
}

/// `ImageLoader` for TIA `.ser` files
#[derive(Debug, Default, Clone, Copy)]
pub struct SerLoader;

impl ImageLoader for SerLoader {
    fn load(&self, path : &Path) -> Result<ImageInfo, ExtractionFailure> {
        SerSeries::open(path)?
            .image_info()
            .map_err(|err| match err {
                SerError::NoDimensions => ExtractionFailure::MissingCalibration(0),
                other => ExtractionFailure::UnsupportedFormat(other.to_string()),
            })
    }
}
