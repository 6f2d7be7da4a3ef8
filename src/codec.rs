//! Compressed point streams.
//!
//! Compression is delegated to a [Codec]. The codec describes itself with a vlr that's embedded in
//! the header, and it converts between a compressed byte stream and the uncompressed point
//! records, which are laid out exactly as they would be in an uncompressed file.
//!
//! ```
//! use std::sync::Arc;
//! use lasio::{Header, Result, Vlr, codec::Codec, point::Format};
//!
//! /// Stores the records as-is.
//! #[derive(Debug)]
//! struct Identity;
//!
//! impl Codec for Identity {
//!     fn is_codec_vlr(&self, vlr: &Vlr) -> bool {
//!         vlr.is("identity", 1)
//!     }
//!
//!     fn vlr(&self, _: &Format) -> Result<Vlr> {
//!         Ok(Vlr { user_id: "identity".to_string(), record_id: 1, ..Default::default() })
//!     }
//!
//!     fn decode_stream(&self, _: &Header, bytes: &[u8]) -> Result<Vec<u8>> {
//!         Ok(bytes.to_vec())
//!     }
//!
//!     fn encode_stream(&self, _: &Header, records: &[u8]) -> Result<Vec<u8>> {
//!         Ok(records.to_vec())
//!     }
//! }
//!
//! let options = lasio::ReaderOptions::default().with_codec(Arc::new(Identity));
//! ```

use crate::{Header, Result, Vlr, point::Format};
use std::{fmt::Debug, sync::Arc};

/// Converts between compressed point data and raw point records.
pub trait Codec: Debug + Send + Sync {
    /// Returns true if this vlr describes this codec's compressed data.
    fn is_codec_vlr(&self, vlr: &Vlr) -> bool;

    /// Returns the vlr that describes compressed data of the given point format.
    fn vlr(&self, format: &Format) -> Result<Vlr>;

    /// Decodes all of the compressed point data.
    ///
    /// `bytes` are everything from the start of the point data to the end of the las data. The
    /// returned bytes must be `number_of_points * point_format.len()` raw records.
    fn decode_stream(&self, header: &Header, bytes: &[u8]) -> Result<Vec<u8>>;

    /// Encodes raw point records.
    ///
    /// The returned bytes are written right after the header and vlrs.
    fn encode_stream(&self, header: &Header, records: &[u8]) -> Result<Vec<u8>>;
}

/// Returns the codec used when none is configured.
pub(crate) fn default_codec() -> Option<Arc<dyn Codec>> {
    #[cfg(feature = "laz")]
    {
        Some(Arc::new(crate::laz::LasZip))
    }
    #[cfg(not(feature = "laz"))]
    {
        None
    }
}

/// Replaces any of the codec's vlrs in the header with a fresh one for the header's point format.
pub(crate) fn apply_vlr(codec: &dyn Codec, header: &mut Header) -> Result<()> {
    let vlr = codec.vlr(header.point_format())?;
    vlr.validate()?;
    let removed = header
        .vlrs_mut()
        .remove_where(|existing| codec.is_codec_vlr(existing));
    if removed > 0 {
        log::debug!("replacing {} codec vlr(s)", removed);
    }
    header.vlrs_mut().push(vlr)
}
