use crate::{Error, Header, Result, codec::Codec, error::IoContext};
use log::debug;
use std::io::{Cursor, Read};

/// Decodes everything after the header into raw point records.
pub(crate) fn decode<R: Read>(
    mut read: R,
    header: &Header,
    codec: &dyn Codec,
) -> Result<Cursor<Vec<u8>>> {
    let mut bytes = Vec::new();
    let _ = read
        .read_to_end(&mut bytes)
        .context("reading compressed points")?;
    let records = codec.decode_stream(header, &bytes)?;
    let expected = header
        .number_of_points()
        .checked_mul(u64::from(header.point_format().len()))
        .and_then(|len| usize::try_from(len).ok())
        .ok_or(Error::TooManyPoints {
            n: header.number_of_points(),
            version: header.version(),
        })?;
    if records.len() != expected {
        return Err(Error::DecodedLength {
            expected,
            actual: records.len(),
        });
    }
    debug!(
        "decoded {} compressed bytes into {} point records",
        bytes.len(),
        header.number_of_points()
    );
    Ok(Cursor::new(records))
}
