//! The fixed series header at the start of every `.ser` file,
//! followed by one dimension array per navigation dimension.
//!
//! All TIA files are written little endian ("II"); big endian
//! series are rejected by the magic.

use binrw::{BinRead, BinResult};

/// `SeriesID` of a TIA series file
pub const SERIES_ID : u16 = 0x0197;
/// Series versions below this store 32-bit offsets
pub const SERIES_VERSION_64 : u16 = 0x0220;

/// `DataTypeID` -- each element is a 1D array (spectrum)
pub const SPECTRUM_DATA_TYPE : u32 = 0x4120;
/// `DataTypeID` -- each element is a 2D array (image)
pub const IMAGE_DATA_TYPE : u32 = 0x4122;

/// Reads an offset field, 4 bytes wide before version `0x0220`
/// and 8 bytes wide from then on.
#[binrw::parser(reader, endian)]
pub(crate) fn offset_field(version : u16) -> BinResult<u64> {
    if version >= SERIES_VERSION_64 {
        u64::read_options(reader, endian, ())
    } else {
        u32::read_options(reader, endian, ()).map(u64::from)
    }
}

/// The series header. Everything needed to find the first
/// element lives here.
#[derive(BinRead, Debug)]
#[br(little, magic = 0x4949u16)]
pub struct SerHeader {
    #[br(assert(series_id == SERIES_ID, "not a TIA series (id {:#06x})", series_id))]
    pub series_id : u16,

    pub series_version : u16,

    #[br(assert(
        data_type_id == SPECTRUM_DATA_TYPE || data_type_id == IMAGE_DATA_TYPE,
        "unknown element data type {:#06x}", data_type_id
    ))]
    pub data_type_id : u32,

    pub tag_type_id : u32,
    pub total_number_elements : u32,
    pub valid_number_elements : u32,

    #[br(parse_with = offset_field, args(series_version))]
    pub offset_array_offset : u64,

    pub number_dimensions : u32,

    #[br(count = number_dimensions)]
    pub dimensions : Vec<DimensionArray>,
}

impl SerHeader {
    pub fn is_image_series(&self) -> bool {
        self.data_type_id == IMAGE_DATA_TYPE
    }
}

/// Calibration of one navigation dimension of the series
/// (e.g. the time axis of a spectrum series, or a scan axis).
#[binrw::binread]
#[derive(Debug)]
#[br(little)]
pub struct DimensionArray {
    pub dimension_size : u32,
    pub calibration_offset : f64,
    pub calibration_delta : f64,
    pub calibration_element : u32,

    #[br(temp)]
    description_length : u32,
    #[br(count = description_length)]
    description : Vec<u8>,

    #[br(temp)]
    units_length : u32,
    #[br(count = units_length)]
    units : Vec<u8>,
}

impl DimensionArray {
    pub fn description(&self) -> String {
        latin1(&self.description)
    }

    /// `None` if the file stores an empty unit string
    pub fn units(&self) -> Option<String> {
        Some(latin1(&self.units)).filter(|units| !units.is_empty())
    }
}

/// TIA writes single-byte strings; map each byte to its code point.
fn latin1(bytes : &[u8]) -> String {
    bytes.iter()
        .map(|&b| b as char)
        .collect::<String>()
        .trim_end_matches('\0')
        .to_string()
}
