use super::WritePoint;
use crate::{Header, Result, codec::Codec, error::IoContext};
use log::debug;
use std::{
    io::{Seek, Write},
    sync::Arc,
};

/// Buffers raw records until the writer closes, then encodes them all at once.
pub(crate) struct PointWriter<W: Write + Seek> {
    write: W,
    codec: Arc<dyn Codec>,
    records: Vec<u8>,
}

impl<W: Write + Seek> PointWriter<W> {
    pub(crate) fn new(write: W, codec: Arc<dyn Codec>) -> PointWriter<W> {
        PointWriter {
            write,
            codec,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Seek + Send> WritePoint<W> for PointWriter<W> {
    fn write_record(&mut self, record: &[u8]) -> Result<()> {
        self.records.extend_from_slice(record);
        Ok(())
    }

    fn done(&mut self, header: &Header) -> Result<()> {
        let encoded = self.codec.encode_stream(header, &self.records)?;
        self.write
            .write_all(&encoded)
            .context("writing compressed points")?;
        debug!(
            "encoded {} bytes of point records into {} bytes",
            self.records.len(),
            encoded.len()
        );
        self.records.clear();
        Ok(())
    }

    fn into_inner(self: Box<Self>) -> W {
        self.write
    }

    fn get_mut(&mut self) -> &mut W {
        &mut self.write
    }
}
