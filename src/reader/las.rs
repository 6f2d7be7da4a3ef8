use super::ReadPoints;
use crate::{Error, Point, Result, Transform, Vector, error::IoContext, point::Format, raw};
use std::io::{Read, Seek, SeekFrom};

/// The header's point count can't be trusted for allocation.
const MAX_RESERVE: u64 = 1 << 16;

pub(crate) struct PointReader<R: Read + Seek> {
    read: R,
    format: Format,
    transforms: Vector<Transform>,
    number_of_points: u64,
    index: u64,
    start: u64,
}

impl<R: Read + Seek> PointReader<R> {
    pub(crate) fn new(
        mut read: R,
        format: Format,
        transforms: Vector<Transform>,
        number_of_points: u64,
    ) -> Result<PointReader<R>> {
        Ok(PointReader {
            start: read
                .stream_position()
                .context("finding the start of the points")?,
            read,
            format,
            transforms,
            number_of_points,
            index: 0,
        })
    }
}

impl<R: Read + Seek + Send> ReadPoints for PointReader<R> {
    fn read_point(&mut self) -> Result<Option<Point>> {
        if self.index < self.number_of_points {
            let raw_point =
                raw::Point::read_from(&mut self.read, &self.format).context("reading a point")?;
            self.index += 1;
            Point::new(raw_point, &self.transforms).map(Some)
        } else {
            Ok(None)
        }
    }

    fn read_points(&mut self, n: u64, points: &mut Vec<Point>) -> Result<u64> {
        let n = (self.number_of_points - self.index).min(n);
        if let Ok(n) = usize::try_from(n.min(MAX_RESERVE)) {
            points.reserve(n);
        }
        let mut count = 0;
        while count < n {
            match self.read_point()? {
                Some(point) => points.push(point),
                None => break,
            }
            count += 1;
        }
        Ok(count)
    }

    fn seek(&mut self, index: u64) -> Result<()> {
        let position = index
            .checked_mul(u64::from(self.format.len()))
            .and_then(|offset| offset.checked_add(self.start))
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.number_of_points,
            })?;
        let _ = self
            .read
            .seek(SeekFrom::Start(position))
            .context("seeking to a point")?;
        self.index = index;
        Ok(())
    }

    fn number_of_points(&self) -> u64 {
        self.number_of_points
    }
}
