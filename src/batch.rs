//! Runs a whole selection of `.emi`/`.ser` files: validate,
//! match, extract, merge, show, write.
//!
//! Only bad input (`ValidationError`), an empty match
//! (`BatchError::NoMatch`) or a failed report write stop a batch.
//! Files that can't be parsed just contribute nothing.

use std::path::{Path, PathBuf};

use crate::file_data::FileRef;
use crate::matcher::{match_pairs, MatchedPair};
use crate::metadata::{
    read_emi_metadata,
    read_image_metadata,
    ExtractionFailure,
    ImageLoader,
    MetadataRecord,
};

/// Appended to the `.emi` stem to name its report
pub const REPORT_SUFFIX : &str = "_metadata.txt";

/// Problems with what the user selected, caught before any file is read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no EMI files selected")]
    NoMetadataFiles,
    #[error("no SER files selected")]
    NoImageFiles,
    #[error("no output directory selected")]
    MissingOutputDir,
    #[error("output directory {} is not a directory", .0.display())]
    OutputDirNotFound(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no matching EMI and SER files found")]
    NoMatch,
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path : PathBuf,
        source : std::io::Error,
    },
}

/// Everything a batch needs, fixed up front.
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    pub metadata_files : Vec<PathBuf>,
    pub image_files : Vec<PathBuf>,
    pub output_dir : Option<PathBuf>,
}

impl BatchRequest {
    /// Checks the selections are non-empty and the output
    /// directory exists, in that order. Returns the output directory.
    pub fn validate(&self) -> Result<&Path, ValidationError> {
        if self.metadata_files.is_empty() {
            return Err(ValidationError::NoMetadataFiles);
        }
        if self.image_files.is_empty() {
            return Err(ValidationError::NoImageFiles);
        }
        let output_dir = self.output_dir.as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(ValidationError::MissingOutputDir)?;
        if !output_dir.is_dir() {
            return Err(ValidationError::OutputDirNotFound(output_dir.to_path_buf()));
        }
        Ok(output_dir)
    }

    pub fn pairs(&self) -> Vec<MatchedPair> {
        let metadata : Vec<FileRef> = self.metadata_files.iter().map(FileRef::metadata).collect();
        let images : Vec<FileRef> = self.image_files.iter().map(FileRef::image).collect();
        match_pairs(&metadata, &images)
    }
}

/// Receives each merged record as soon as it is ready, before it
/// is written. Closures taking `(&MatchedPair, &MetadataRecord)`
/// work as views.
pub trait MetadataView {
    fn show(&mut self, pair : &MatchedPair, record : &MetadataRecord);
}

impl<F : FnMut(&MatchedPair, &MetadataRecord)> MetadataView for F {
    fn show(&mut self, pair : &MatchedPair, record : &MetadataRecord) {
        self(pair, record)
    }
}

/// A report that made it to disk
#[derive(Debug)]
pub struct WrittenReport {
    pub pair : MatchedPair,
    pub path : PathBuf,
    pub record : MetadataRecord,
    /// Why the image fields are missing, if they are
    pub image_failure : Option<ExtractionFailure>,
}

/// A pair whose `.emi` gave no metadata, so nothing was written
#[derive(Debug)]
pub struct SkippedPair {
    pub pair : MatchedPair,
    pub reason : ExtractionFailure,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub written : Vec<WrittenReport>,
    pub skipped : Vec<SkippedPair>,
}

/// Where the report for `metadata` goes.
///
/// ## Example
///
/// ```
/// use std::path::Path;
/// use feimeta::{FileRef, report_path};
///
/// let path = report_path(Path::new("/out"), &FileRef::metadata("scan_A.emi"));
/// assert_eq!(path, Path::new("/out/scan_A_metadata.txt"));
/// ```
pub fn report_path(output_dir : &Path, metadata : &FileRef) -> PathBuf {
    output_dir.join(format!("{}{}", metadata.stem(), REPORT_SUFFIX))
}

/// Writes one `Label: Value` line per entry, replacing any existing file.
pub fn write_report(path : &Path, record : &MetadataRecord) -> Result<(), BatchError> {
    std::fs::write(path, record.to_string())
        .map_err(|source| BatchError::Io { path : path.to_path_buf(), source })
}

/// Runs one batch.
///
/// For every matched pair, in `.emi` selection order: the `.emi`
/// XML is extracted; pairs where that comes back empty are skipped.
/// Otherwise the `.ser` fields are merged over it (image fields win
/// on clashes), the record goes to `view` and is written to
/// `<output_dir>/<emi stem>_metadata.txt`.
///
/// ## Arguments
///
/// * `request` - The selections and output directory
///
/// * `loader` - Reads image container calibration (`SerLoader` for real files)
///
/// * `view` - Displays each merged record
///
/// ## Example
///
/// ```rust, ignore
/// let request = BatchRequest {
///     metadata_files : vec!["a.emi".into()],
///     image_files : vec!["a_1.ser".into()],
///     output_dir : Some("/out".into()),
/// };
/// let report = run_batch(&request, &SerLoader, &mut |_pair : &MatchedPair, record : &MetadataRecord| {
///     print!("{}", record)
/// })?;
/// ```
pub fn run_batch<L, V>(
    request : &BatchRequest,
    loader : &L,
    view : &mut V,
) -> Result<BatchReport, BatchError>
where L : ImageLoader + ?Sized, V : MetadataView + ?Sized {
    let output_dir = request.validate()?;

    let pairs = request.pairs();
    if pairs.is_empty() {
        return Err(BatchError::NoMatch);
    }
    tracing::info!("matched {} of {} EMI files", pairs.len(), request.metadata_files.len());

    let mut report = BatchReport::default();
    for pair in pairs {
        let mut record = match read_emi_metadata(pair.metadata.path()) {
            Ok(record) if !record.is_empty() => record,
            Ok(_) => {
                skip(&mut report, pair, ExtractionFailure::NoEntries);
                continue;
            },
            Err(reason) => {
                skip(&mut report, pair, reason);
                continue;
            },
        };

        let image_failure = match read_image_metadata(loader, pair.image.path()) {
            Ok(image) => {
                record.merge(image);
                None
            },
            Err(reason) => {
                tracing::debug!("no image metadata from {}: {}", pair.image.path().display(), reason);
                Some(reason)
            },
        };

        view.show(&pair, &record);

        let path = report_path(output_dir, &pair.metadata);
        write_report(&path, &record)?;
        tracing::info!("wrote {}", path.display());

        report.written.push(WrittenReport { pair, path, record, image_failure });
    }
    Ok(report)
}

fn skip(report : &mut BatchReport, pair : MatchedPair, reason : ExtractionFailure) {
    tracing::debug!("skipping {}: {}", pair.metadata.path().display(), reason);
    report.skipped.push(SkippedPair { pair, reason });
}
