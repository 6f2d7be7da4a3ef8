use super::WritePoint;
use crate::{Header, Result, error::IoContext};
use std::io::{Seek, Write};

pub(crate) struct PointWriter<W: Write + Seek> {
    write: W,
}

impl<W: Write + Seek> PointWriter<W> {
    pub(crate) fn new(write: W) -> PointWriter<W> {
        PointWriter { write }
    }
}

impl<W: Write + Seek + Send> WritePoint<W> for PointWriter<W> {
    fn write_record(&mut self, record: &[u8]) -> Result<()> {
        self.write.write_all(record).context("writing a point")
    }

    fn done(&mut self, _: &Header) -> Result<()> {
        Ok(())
    }

    fn into_inner(self: Box<Self>) -> W {
        self.write
    }

    fn get_mut(&mut self) -> &mut W {
        &mut self.write
    }
}
