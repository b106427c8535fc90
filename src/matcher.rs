//! Pairs `.emi` files with their `.ser` partners by stem.

use crate::file_data::FileRef;

/// One metadata container and the image container it was matched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPair {
    pub metadata : FileRef,
    pub image : FileRef,
}

/// Matches every metadata container to the first image container
/// (in the order given) sharing its normalized stem. Metadata
/// containers without a partner are dropped; later image containers
/// with an already-matched stem are ignored for that metadata file.
///
/// An empty return value is the caller's problem -- the batch turns
/// it into `BatchError::NoMatch`.
///
/// ## Arguments
///
/// * `metadata` - `.emi` references, in selection order
///
/// * `images` - `.ser` references, in selection order
///
/// ## Example
///
/// ```
/// use feimeta::{FileRef, match_pairs};
///
/// let emis = vec![FileRef::metadata("sample01.emi")];
/// let sers = vec![FileRef::image("sample02.ser"), FileRef::image("sample01_1.ser")];
/// let pairs = match_pairs(&emis, &sers);
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].image.stem(), "sample01");
/// ```
pub fn match_pairs(metadata : &[FileRef], images : &[FileRef]) -> Vec<MatchedPair> {
    metadata.iter().filter_map(|emi| {
        let found = images.iter().find(|ser| ser.stem() == emi.stem());
        if found.is_none() {
            tracing::debug!("no image container for {}", emi.path().display());
        }
        found.map(|ser| MatchedPair {
            metadata : emi.clone(),
            image : ser.clone(),
        })
    }).collect()
}
