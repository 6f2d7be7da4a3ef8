//! Utility functions and a codec for working with laszip compressed data.

use crate::{Error, Header, Result, Vlr, codec::Codec, error::IoContext, point::Format};
use laz::{LasZipCompressor, LasZipDecompressor, LazItemRecordBuilder, LazItemType, LazVlr};
use std::io::Cursor;

/// Returns true if this [Vlr] is the laszip Vlr.
///
/// # Examples
///
/// ```
/// use lasio::{Vlr, laz};
///
/// let mut vlr = Vlr::default();
/// assert!(!laz::is_laszip_vlr(&vlr));
/// vlr.user_id = "laszip encoded".to_string();
/// vlr.record_id = 22204;
/// assert!(laz::is_laszip_vlr(&vlr));
/// ```
pub fn is_laszip_vlr(vlr: &Vlr) -> bool {
    vlr.is(LazVlr::USER_ID, LazVlr::RECORD_ID)
}

/// Compresses and decompresses point data with laszip.
///
/// This is the default codec when the `laz` feature is enabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct LasZip;

impl LasZip {
    fn laz_vlr(&self, header: &Header) -> Result<LazVlr> {
        let vlr = header
            .vlrs()
            .iter()
            .find(|vlr| is_laszip_vlr(vlr))
            .ok_or(Error::CompressionUnsupported)?;
        LazVlr::from_buffer(&vlr.data).map_err(Error::from)
    }
}

impl Codec for LasZip {
    fn is_codec_vlr(&self, vlr: &Vlr) -> bool {
        is_laszip_vlr(vlr)
    }

    fn vlr(&self, format: &Format) -> Result<Vlr> {
        let mut laz_items = LazItemRecordBuilder::new();
        let _ = laz_items.add_item(LazItemType::Point10);
        if format.has_gps_time {
            let _ = laz_items.add_item(LazItemType::GpsTime);
        }
        if format.has_color {
            let _ = laz_items.add_item(LazItemType::RGB12);
        }
        if format.extra_bytes > 0 {
            let _ = laz_items.add_item(LazItemType::Byte(format.extra_bytes));
        }
        let laz_vlr = LazVlr::from_laz_items(laz_items.build());
        let mut cursor = Cursor::new(Vec::<u8>::new());
        laz_vlr
            .write_to(&mut cursor)
            .context("writing the laszip vlr")?;
        Ok(Vlr {
            user_id: LazVlr::USER_ID.to_owned(),
            record_id: LazVlr::RECORD_ID,
            description: LazVlr::DESCRIPTION.to_owned(),
            data: cursor.into_inner(),
            ..Default::default()
        })
    }

    fn decode_stream(&self, header: &Header, bytes: &[u8]) -> Result<Vec<u8>> {
        // Chunk table offsets are absolute, so the stream has to sit where it did in the file.
        let offset = header.offset_to_point_data();
        let mut data = vec![0; offset as usize];
        data.extend_from_slice(bytes);
        let mut cursor = Cursor::new(data);
        cursor.set_position(offset);
        let mut decompressor = LasZipDecompressor::new(cursor, self.laz_vlr(header)?)?;
        let len = header
            .number_of_points()
            .checked_mul(u64::from(header.point_format().len()))
            .and_then(|len| usize::try_from(len).ok())
            .ok_or(Error::TooManyPoints {
                n: header.number_of_points(),
                version: header.version(),
            })?;
        let mut records = vec![0; len];
        decompressor
            .decompress_many(&mut records)
            .context("decompressing points")?;
        Ok(records)
    }

    fn encode_stream(&self, header: &Header, records: &[u8]) -> Result<Vec<u8>> {
        let offset = header.offset_to_point_data();
        let mut cursor = Cursor::new(vec![0; offset as usize]);
        cursor.set_position(offset);
        let mut compressor = LasZipCompressor::new(cursor, self.laz_vlr(header)?)?;
        compressor
            .compress_many(records)
            .context("compressing points")?;
        compressor.done().context("finishing the laszip chunk table")?;
        let mut data = compressor.into_inner().into_inner();
        Ok(data.split_off(offset as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vlr() {
        let format = Format::new(3).unwrap();
        let vlr = LasZip.vlr(&format).unwrap();
        assert!(LasZip.is_codec_vlr(&vlr));
        assert_eq!("laszip encoded", vlr.user_id);
        assert_eq!(22204, vlr.record_id);
        assert!(LazVlr::from_buffer(&vlr.data).is_ok());
    }

    #[test]
    fn missing_vlr() {
        let header = Header::default();
        assert!(matches!(
            LasZip.decode_stream(&header, &[]).unwrap_err(),
            Error::CompressionUnsupported
        ));
    }
}
