//! Write las points.
//!
//! A `Writer` uses a `Header` for its configuration:
//!
//! ```
//! use std::io::Cursor;
//! use lasio::{Header, Version, Writer};
//! let mut header = Header::default();
//! header.set_version(Version::new(1, 4)).unwrap();
//! let writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
//! ```
//!
//! The set of optional fields on the point format and the points must match exactly:
//!
//! ```
//! use std::io::Cursor;
//! use lasio::{Color, Header, Point, Writer, point::Format};
//!
//! let mut header = Header::default();
//! header.set_point_format(Format::new(1).unwrap()).unwrap();
//! let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
//!
//! let mut point = Point::default(); // default points don't have any optional attributes
//! assert!(writer.write_point(point.clone()).is_err());
//!
//! point.gps_time = Some(42.); // point format 1 requires gps time
//! writer.write_point(point.clone()).unwrap();
//!
//! point.color = Some(Color::new(1, 2, 3));
//! assert!(writer.write_point(point).is_err()); // the point's color would be lost
//! ```
//!
//! The header's point counts and bounds are computed from the written points and rewritten when
//! the writer is closed, either explicitly or when it's dropped.

mod compressed;
mod las;

use crate::{
    Bounds, Error, Header, Point, Result, Vector,
    codec::{self, Codec},
    error::IoContext,
    feature::LargeFiles,
    raw,
};
use log::{debug, error};
use std::{
    fs::File,
    io::{BufWriter, Seek, SeekFrom, Write},
    path::Path,
    sync::Arc,
};

trait WritePoint<W: Write>: Send {
    fn write_record(&mut self, record: &[u8]) -> Result<()>;
    fn done(&mut self, header: &Header) -> Result<()>;
    //https://users.rust-lang.org/t/is-there-a-way-to-move-a-trait-object/707
    fn into_inner(self: Box<Self>) -> W;
    fn get_mut(&mut self) -> &mut W;
}

/// Options for [Writer].
///
/// The only option is the [Codec] used for compressed point data.
#[derive(Clone, Debug)]
pub struct WriterOptions {
    codec: Option<Arc<dyn Codec>>,
}

impl WriterOptions {
    /// Uses this codec for compressed point data.
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Doesn't use any codec, so compressed point data can't be written.
    pub fn without_codec(mut self) -> Self {
        self.codec = None;
        self
    }

    /// Returns the codec, if any.
    pub fn codec(&self) -> Option<&Arc<dyn Codec>> {
        self.codec.as_ref()
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            codec: codec::default_codec(),
        }
    }
}

/// Writes las data.
///
/// The header is written as soon as the writer is created, and again with the final point counts
/// and bounds when the writer closes.
#[allow(missing_debug_implementations)]
pub struct Writer<W: 'static + Write + Seek + Send> {
    bounds: Bounds,
    header: Header,
    number_of_points: u64,
    number_of_points_by_return: [u64; 5],
    point_writer: Option<Box<dyn WritePoint<W>>>,
    record: Vec<u8>,
    start: u64,
}

impl<W: 'static + Write + Seek + Send> Writer<W> {
    /// Creates a new writer with default options.
    ///
    /// The header that is passed in will have its point counts and bounds reset.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::Writer;
    /// let writer = Writer::new(Cursor::new(Vec::new()), Default::default());
    /// ```
    pub fn new(write: W, header: Header) -> Result<Writer<W>> {
        Writer::with_options(write, header, WriterOptions::default())
    }

    /// Creates a new writer with custom options.
    ///
    /// If the header is compressed, the codec's vlr is added to it, replacing any earlier vlr of
    /// the same codec.
    pub fn with_options(mut write: W, mut header: Header, options: WriterOptions) -> Result<Self> {
        let start = write
            .stream_position()
            .context("finding the start of the las data")?;
        header.finalize(0, [0; 5], Bounds::zero());
        let codec = if header.is_compressed() {
            let codec = options.codec.ok_or(Error::CompressionUnsupported)?;
            codec::apply_vlr(codec.as_ref(), &mut header)?;
            Some(codec)
        } else {
            if let Some(codec) = options.codec {
                let removed = header
                    .vlrs_mut()
                    .remove_where(|vlr| codec.is_codec_vlr(vlr));
                if removed > 0 {
                    debug!("dropped {} codec vlr(s) from uncompressed data", removed);
                }
            }
            None
        };
        header.write_to(&mut write)?;
        let point_writer: Box<dyn WritePoint<W>> = match codec {
            Some(codec) => Box::new(compressed::PointWriter::new(write, codec)),
            None => Box::new(las::PointWriter::new(write)),
        };
        Ok(Writer {
            bounds: Bounds::default(),
            header,
            number_of_points: 0,
            number_of_points_by_return: [0; 5],
            point_writer: Some(point_writer),
            record: Vec::new(),
            start,
        })
    }

    /// Returns this writer's header.
    ///
    /// Until the writer is closed, the point counts and bounds are zero.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Writes a point.
    ///
    /// Nothing is written, and nothing is counted, if the point doesn't fit the header.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::{Point, Writer};
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// writer.write_point(Point::default()).unwrap();
    /// assert!(writer.write_point(Point { x: 1e30, ..Default::default() }).is_err());
    /// ```
    pub fn write_point(&mut self, point: Point) -> Result<()> {
        if self.point_writer.is_none() {
            return Err(Error::WriterClosed);
        }
        self.check_capacity(1)?;
        let raw_point = point.to_raw(self.header.transforms(), self.header.point_format())?;
        self.write_raw_point(&raw_point)
    }

    /// Writes points.
    ///
    /// Every point is checked before any of them are written.
    pub fn write_points(&mut self, points: &[Point]) -> Result<()> {
        if self.point_writer.is_none() {
            return Err(Error::WriterClosed);
        }
        self.check_capacity(points.len() as u64)?;
        let raw_points = points
            .iter()
            .map(|point| point.to_raw(self.header.transforms(), self.header.point_format()))
            .collect::<Result<Vec<_>>>()?;
        for raw_point in &raw_points {
            self.write_raw_point(raw_point)?;
        }
        Ok(())
    }

    /// Closes this writer and releases its stream.
    ///
    /// Any buffered points are encoded, then the header is rewritten with the final counts and
    /// bounds. Closing a closed writer does nothing. If closing fails, the writer is closed
    /// anyway.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::{Point, Writer};
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// writer.close().unwrap();
    /// writer.close().unwrap();
    /// assert!(writer.write_point(Point::default()).is_err());
    /// ```
    pub fn close(&mut self) -> Result<()> {
        self.finish().map(|_| ())
    }

    /// Returns true if this writer has been closed.
    pub fn is_closed(&self) -> bool {
        self.point_writer.is_none()
    }

    /// Closes this writer and returns its stream, positioned at the start of the las data.
    ///
    /// Fails with [Error::WriterClosed] if the writer was already closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::Writer;
    /// let writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// let cursor = writer.into_inner().unwrap();
    /// assert_eq!(0, cursor.position());
    /// ```
    pub fn into_inner(mut self) -> Result<W> {
        self.finish()?.ok_or(Error::WriterClosed)
    }

    fn check_capacity(&self, n: u64) -> Result<()> {
        let total = self.number_of_points.saturating_add(n);
        if !self.header.version().supports::<LargeFiles>() && total > u64::from(u32::MAX) {
            Err(Error::TooManyPoints {
                n: total,
                version: self.header.version(),
            })
        } else {
            Ok(())
        }
    }

    fn write_raw_point(&mut self, raw_point: &raw::Point) -> Result<()> {
        let point_writer = self.point_writer.as_mut().ok_or(Error::WriterClosed)?;
        self.record.clear();
        raw_point
            .write_to(&mut self.record, self.header.point_format())
            .context("encoding a point")?;
        point_writer.write_record(&self.record)?;

        self.number_of_points += 1;
        let return_number = raw_point.flags & 0b0000_0111;
        if (1..=5).contains(&return_number) {
            self.number_of_points_by_return[usize::from(return_number - 1)] += 1;
        }
        let transforms = self.header.transforms();
        self.bounds.grow(Vector {
            x: transforms.x.direct(raw_point.x),
            y: transforms.y.direct(raw_point.y),
            z: transforms.z.direct(raw_point.z),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<Option<W>> {
        let mut point_writer = match self.point_writer.take() {
            Some(point_writer) => point_writer,
            None => return Ok(None),
        };
        self.header.finalize(
            self.number_of_points,
            self.number_of_points_by_return,
            self.bounds,
        );
        point_writer.done(&self.header)?;
        let write = point_writer.get_mut();
        let _ = write
            .seek(SeekFrom::Start(self.start))
            .context("seeking to the header")?;
        self.header.write_to(&mut *write)?;
        write.flush().context("flushing the las data")?;
        let _ = write
            .seek(SeekFrom::Start(self.start))
            .context("seeking to the header")?;
        debug!(
            "finalized las {} data with {} points",
            self.header.version(),
            self.number_of_points
        );
        Ok(Some(point_writer.into_inner()))
    }
}

impl Writer<BufWriter<File>> {
    /// Creates a new writer for a path.
    ///
    /// The file is created, or truncated if it exists, and wrapped in a `BufWriter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Writer;
    /// let file = tempfile::NamedTempFile::new().unwrap();
    /// let writer = Writer::from_path(file.path(), Default::default());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P, header: Header) -> Result<Writer<BufWriter<File>>> {
        Writer::with_options_from_path(path, header, WriterOptions::default())
    }

    /// Creates a new writer for a path with custom options.
    pub fn with_options_from_path<P: AsRef<Path>>(
        path: P,
        header: Header,
        options: WriterOptions,
    ) -> Result<Writer<BufWriter<File>>> {
        let file = File::create(path).context("creating a las file")?;
        Writer::with_options(BufWriter::new(file), header, options)
    }
}

impl<W: 'static + Write + Seek + Send> Drop for Writer<W> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            error!("error when closing the writer on drop: {}", err);
        }
    }
}
