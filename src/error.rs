use crate::{Transform, Version, point::Format};
use thiserror::Error;

/// Crate-specific error enum.
///
/// Validation errors are returned before any state is changed, so the object that produced one
/// can keep being used.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The header block could not be interpreted as a LAS header.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The point data format id is not one of the classic formats (0 through 3).
    #[error("unsupported point format: {0}")]
    UnsupportedPointFormat(u8),

    /// The las version is not 1.0 through 1.4.
    #[error("unsupported las version: {0}")]
    UnsupportedVersion(Version),

    /// The data are (or should be) compressed, but no codec is available.
    #[error("the point data are compressed, but no codec is available")]
    CompressionUnsupported,

    /// A value is out of range for the field it was meant for.
    #[error("invalid value for {name}: {reason}")]
    InvalidArgument {
        /// The name of the field.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The vlr payload does not fit in the 16-bit record length field.
    #[error("the vlr payload is {0} bytes, which is too large for a vlr")]
    RecordTooLarge(usize),

    /// The index is beyond the end of the collection.
    #[error("index {index} is out of range (length {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: u64,
        /// The length of the collection.
        len: u64,
    },

    /// The point's optional attributes don't match the point format.
    #[error("the point's attributes do not match {0}")]
    SchemaMismatch(Format),

    /// The coordinate can't be stored as an `i32` with this transform.
    #[error("{value} cannot be encoded with transform {transform}")]
    InvalidCoordinate {
        /// The world coordinate.
        value: f64,
        /// The transform.
        transform: Transform,
    },

    /// A fixed-width string field is not valid UTF-8.
    #[error("the {name} field is not valid utf-8")]
    NotUtf8 {
        /// The name of the field.
        name: &'static str,
        /// The underlying error.
        #[source]
        source: std::str::Utf8Error,
    },

    /// The optional point field is not defined for this point.
    #[error("the {0} field is not defined for this point")]
    FieldNotApplicable(&'static str),

    /// The reader has been closed.
    #[error("the reader is closed")]
    ReaderClosed,

    /// The writer has been closed.
    #[error("the writer is closed")]
    WriterClosed,

    /// Too many points for this version of las.
    #[error("too many points for version {version}: {n}")]
    TooManyPoints {
        /// The number of points.
        n: u64,
        /// The las version.
        version: Version,
    },

    /// The codec returned a different number of bytes than the points require.
    #[error("the codec decoded {actual} bytes, but the points require {expected}")]
    DecodedLength {
        /// The number of bytes the points require.
        expected: usize,
        /// The number of bytes that were decoded.
        actual: usize,
    },

    /// An I/O error from the underlying stream.
    #[error("i/o error while {operation}: {source}")]
    Io {
        /// What was being done when the error happened.
        operation: &'static str,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// [laz::LasZipError]
    #[cfg(feature = "laz")]
    #[error(transparent)]
    Laz(#[from] laz::LasZipError),
}

impl Error {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl ToString) -> Error {
        Error::InvalidArgument {
            name,
            reason: reason.to_string(),
        }
    }
}

/// Attaches the name of the operation to an I/O error.
pub(crate) trait IoContext<T> {
    fn context(self, operation: &'static str) -> crate::Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn context(self, operation: &'static str) -> crate::Result<T> {
        self.map_err(|source| Error::Io { operation, source })
    }
}
