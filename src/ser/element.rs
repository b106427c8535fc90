//! Per-element headers. Each element of a series starts with its
//! own calibration followed by the array dimensions, and then the
//! raw array -- which is never read here.

use binrw::BinRead;

use crate::ser::header::{IMAGE_DATA_TYPE, SPECTRUM_DATA_TYPE};

/// Pixel type of an element's array
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq)]
#[br(repr = u16)]
pub enum ElementDataType {
    U8 = 1,
    U16 = 2,
    U32 = 3,
    I8 = 4,
    I16 = 5,
    I32 = 6,
    F32 = 7,
    F64 = 8,
    Complex64 = 9,
    Complex128 = 10,
}

/// `DataTypeID == 0x4122`
#[derive(BinRead, Debug, Clone, PartialEq)]
#[br(little)]
pub struct ImageElementHeader {
    pub calibration_offset_x : f64,
    /// Metres per pixel along X
    pub calibration_delta_x : f64,
    pub calibration_element_x : u32,
    pub calibration_offset_y : f64,
    /// Metres per pixel along Y
    pub calibration_delta_y : f64,
    pub calibration_element_y : u32,
    pub data_type : ElementDataType,
    pub array_size_x : u32,
    pub array_size_y : u32,
}

/// `DataTypeID == 0x4120`
#[derive(BinRead, Debug, Clone, PartialEq)]
#[br(little)]
pub struct SpectrumElementHeader {
    pub calibration_offset : f64,
    pub calibration_delta : f64,
    pub calibration_element : u32,
    pub data_type : ElementDataType,
    pub array_length : u32,
}

/// The header of one element, shaped by the series' `DataTypeID`.
#[derive(BinRead, Debug, Clone, PartialEq)]
#[br(little, import(data_type_id : u32))]
pub enum ElementHeader {
    #[br(pre_assert(data_type_id == IMAGE_DATA_TYPE))]
    Image(ImageElementHeader),
    #[br(pre_assert(data_type_id == SPECTRUM_DATA_TYPE))]
    Spectrum(SpectrumElementHeader),
}

impl ElementHeader {
    pub fn data_type(&self) -> ElementDataType {
        match self {
            ElementHeader::Image(image) => image.data_type,
            ElementHeader::Spectrum(spectrum) => spectrum.data_type,
        }
    }
}
