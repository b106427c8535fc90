use std::path::{Path, PathBuf};

/// Extension of the TIA metadata container
pub const EMI_EXTENSION : &str = ".emi";
/// Extension of the TIA series (image) container
pub const SER_EXTENSION : &str = ".ser";
/// TIA appends `_1` to the first `.ser` of a multi-part
/// acquisition. It is the only suffix stripped when matching.
pub const SERIES_SUFFIX : &str = "_1";

/// Which side of an acquisition a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.emi` -- a binary blob with an embedded XML block
    Metadata,
    /// `.ser` -- the pixel array and its calibration
    Image,
}

impl FileKind {
    /// Guesses the kind of a file from its extension. Extensions are
    /// case-sensitive, the same as stem stripping, so `x.SER` is `None`.
    pub fn from_path(path : &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "emi" => Some(FileKind::Metadata),
            "ser" => Some(FileKind::Image),
            _ => None,
        }
    }
}

/// A path to either an `.emi` or a `.ser` file, together
/// with the stem used to match the two against each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    path : PathBuf,
    kind : FileKind,
    stem : String,
}

impl FileRef {
    /// Builds a `FileRef` for a metadata container. The stem is the
    /// file name with a trailing `.emi` removed.
    ///
    /// ## Example
    ///
    /// ```
    /// use feimeta::FileRef;
    ///
    /// let emi = FileRef::metadata("/data/sample01.emi");
    /// assert_eq!(emi.stem(), "sample01");
    /// ```
    pub fn metadata<P : AsRef<Path>>(path : P) -> Self {
        let path = path.as_ref().to_path_buf();
        let stem = strip_suffix(&file_name(&path), EMI_EXTENSION).to_string();
        FileRef { path, kind : FileKind::Metadata, stem }
    }

    /// Builds a `FileRef` for an image container. The stem is the
    /// file name with a trailing `.ser` removed, and then a single
    /// trailing `_1` removed if one is there.
    ///
    /// ## Example
    ///
    /// ```
    /// use feimeta::FileRef;
    ///
    /// let ser = FileRef::image("/data/sample01_1.ser");
    /// assert_eq!(ser.stem(), "sample01");
    /// ```
    pub fn image<P : AsRef<Path>>(path : P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = file_name(&path);
        let stem = strip_suffix(
            strip_suffix(&name, SER_EXTENSION),
            SERIES_SUFFIX
        ).to_string();
        FileRef { path, kind : FileKind::Image, stem }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Normalized stem used for matching
    pub fn stem(&self) -> &str {
        &self.stem
    }
}

fn file_name(path : &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn strip_suffix<'a>(name : &'a str, suffix : &str) -> &'a str {
    name.strip_suffix(suffix).unwrap_or(name)
}
