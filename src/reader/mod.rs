//! Read las points.
//!
//! If you're reading any significant number of points, you'll want to make sure you're using a
//! `BufRead` instead of just a `Read`. `Reader::from_path` does this for you:
//!
//! ```no_run
//! use lasio::Reader;
//! let reader = Reader::from_path("points.las").unwrap();
//! ```
//!
//! Use `Reader::read_point` to read one point, and `Reader::points` to get an iterator over
//! `Result<Point>`:
//!
//! ```
//! use std::io::Cursor;
//! use lasio::{Header, Point, Reader, Writer};
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
//! writer.write_point(Point::default()).unwrap();
//! writer.write_point(Point { x: 1., ..Default::default() }).unwrap();
//! let cursor = writer.into_inner().unwrap();
//!
//! let mut reader = Reader::new(cursor).unwrap();
//! let first_point = reader.read_point().unwrap().unwrap();
//! let the_rest = reader.points().map(|r| r.unwrap()).collect::<Vec<_>>();
//! assert_eq!(1, the_rest.len());
//! ```
//!
//! # Compression
//!
//! Compressed point data are decoded by a [Codec]. With the `laz` feature enabled, laszip is
//! the default:
//!
//! ```toml
//! [dependencies]
//! lasio = { version = "*", features = ["laz"] }
//! ```
//!
//! Without a codec, opening compressed data fails with [Error::CompressionUnsupported].

mod compressed;
mod las;

use crate::{Error, Header, Point, Result, codec::Codec, error::IoContext};
use log::debug;
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
    sync::Arc,
};

trait ReadPoints: Send {
    fn read_point(&mut self) -> Result<Option<Point>>;
    fn read_points(&mut self, n: u64, points: &mut Vec<Point>) -> Result<u64>;
    fn seek(&mut self, index: u64) -> Result<()>;
    fn number_of_points(&self) -> u64;
}

/// An iterator over of the points in a `Reader`.
///
/// This struct is generally created by calling `points()` on `Reader`. Iteration stops after the
/// first error.
#[allow(missing_debug_implementations)]
pub struct PointIterator<'a> {
    reader: &'a mut Reader,
    failed: bool,
}

impl Iterator for PointIterator<'_> {
    type Item = Result<Point>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.reader.read_point().transpose();
        self.failed = matches!(next, Some(Err(_)));
        next
    }
}

/// Options for [Reader].
///
/// The only option is the [Codec] used for compressed point data.
#[derive(Clone, Debug)]
pub struct ReaderOptions {
    codec: Option<Arc<dyn Codec>>,
}

impl ReaderOptions {
    /// Uses this codec for compressed point data.
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Doesn't use any codec, so compressed point data can't be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::ReaderOptions;
    /// let options = ReaderOptions::default().without_codec();
    /// assert!(options.codec().is_none());
    /// ```
    pub fn without_codec(mut self) -> Self {
        self.codec = None;
        self
    }

    /// Returns the codec, if any.
    pub fn codec(&self) -> Option<&Arc<dyn Codec>> {
        self.codec.as_ref()
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            codec: crate::codec::default_codec(),
        }
    }
}

/// Reads las data.
///
/// A reader is either open or closed. Once closed, the header is still available but every
/// point operation fails with [Error::ReaderClosed].
#[allow(missing_debug_implementations)]
pub struct Reader {
    header: Header,
    point_reader: Option<Box<dyn ReadPoints>>,
}

impl Reader {
    /// Creates a new reader with default options.
    ///
    /// This does *not* wrap the `Read` in a `BufRead`, so if you're concerned about performance
    /// you should do that wrapping yourself (or use `from_path`).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::{Header, Reader, Writer};
    /// let cursor = Writer::new(Cursor::new(Vec::new()), Header::default())
    ///     .unwrap()
    ///     .into_inner()
    ///     .unwrap();
    /// let reader = Reader::new(cursor).unwrap();
    /// ```
    pub fn new<R: Read + Seek + Send + 'static>(read: R) -> Result<Reader> {
        Reader::with_options(read, ReaderOptions::default())
    }

    /// Creates a new reader with custom options.
    ///
    /// The header and vlrs are read right away. The stream's current position is taken as the
    /// start of the las data.
    pub fn with_options<R: Read + Seek + Send + 'static>(
        mut read: R,
        options: ReaderOptions,
    ) -> Result<Reader> {
        let header = Header::read_from(&mut read)?;
        let format = *header.point_format();
        let transforms = *header.transforms();
        let number_of_points = header.number_of_points();
        let point_reader: Box<dyn ReadPoints> = if header.is_compressed() {
            let codec = options.codec.ok_or(Error::CompressionUnsupported)?;
            let records = compressed::decode(read, &header, codec.as_ref())?;
            Box::new(las::PointReader::new(
                records,
                format,
                transforms,
                number_of_points,
            )?)
        } else {
            Box::new(las::PointReader::new(
                read,
                format,
                transforms,
                number_of_points,
            )?)
        };
        debug!(
            "opened las {} data with {} points in {}",
            header.version(),
            number_of_points,
            format
        );
        Ok(Reader {
            header,
            point_reader: Some(point_reader),
        })
    }

    /// Creates a new reader from a path.
    ///
    /// The underlying `File` is wrapped in a `BufReader` for performance reasons.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader> {
        Reader::with_options_from_path(path, ReaderOptions::default())
    }

    /// Creates a new reader from a path with custom options.
    pub fn with_options_from_path<P: AsRef<Path>>(
        path: P,
        options: ReaderOptions,
    ) -> Result<Reader> {
        let file = File::open(path).context("opening a las file")?;
        Reader::with_options(BufReader::new(file), options)
    }

    /// Returns a reference to this reader's header.
    ///
    /// The header is available even after the reader is closed.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads the next point, or `None` when all points have been read.
    pub fn read_point(&mut self) -> Result<Option<Point>> {
        self.point_reader()?.read_point()
    }

    /// Reads the point at `index`, zero-indexed.
    ///
    /// Afterwards, `read_point` returns the point at `index + 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::{Header, Point, Reader, Writer};
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
    /// for i in 0..3 {
    ///     writer.write_point(Point { x: f64::from(i), ..Default::default() }).unwrap();
    /// }
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// assert_eq!(1., reader.read_point_at(1).unwrap().x);
    /// assert_eq!(2., reader.read_point().unwrap().unwrap().x);
    /// assert!(reader.read_point_at(3).is_err());
    /// ```
    pub fn read_point_at(&mut self, index: u64) -> Result<Point> {
        let point_reader = self.point_reader()?;
        let len = point_reader.number_of_points();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        point_reader.seek(index)?;
        point_reader
            .read_point()?
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Reads up to `n` points into a vector.
    pub fn read_points(&mut self, n: u64) -> Result<Vec<Point>> {
        let mut points = Vec::new();
        let _ = self.read_points_into(n, &mut points)?;
        Ok(points)
    }

    /// Reads up to `n` points into a provided vector, returning the number of points read.
    pub fn read_points_into(&mut self, n: u64, points: &mut Vec<Point>) -> Result<u64> {
        self.point_reader()?.read_points(n, points)
    }

    /// Reads all remaining points into a vector, returning the number of points read.
    pub fn read_all_points_into(&mut self, points: &mut Vec<Point>) -> Result<u64> {
        let point_reader = self.point_reader()?;
        let n = point_reader.number_of_points();
        point_reader.read_points(n, points)
    }

    /// Seeks to the given point number, zero-indexed.
    ///
    /// Seeking to `number_of_points` positions the reader at the end.
    pub fn seek(&mut self, index: u64) -> Result<()> {
        let point_reader = self.point_reader()?;
        let len = point_reader.number_of_points();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        point_reader.seek(index)
    }

    /// Returns an iterator over this reader's remaining points.
    pub fn points(&mut self) -> PointIterator<'_> {
        PointIterator {
            reader: self,
            failed: false,
        }
    }

    /// Closes this reader and releases its stream.
    ///
    /// Closing a closed reader does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::{Error, Header, Reader, Writer};
    /// let cursor = Writer::new(Cursor::new(Vec::new()), Header::default())
    ///     .unwrap()
    ///     .into_inner()
    ///     .unwrap();
    /// let mut reader = Reader::new(cursor).unwrap();
    /// reader.close();
    /// reader.close();
    /// assert!(matches!(reader.read_point(), Err(Error::ReaderClosed)));
    /// ```
    pub fn close(&mut self) {
        if self.point_reader.take().is_some() {
            debug!("closed reader");
        }
    }

    /// Returns true if this reader has been closed.
    pub fn is_closed(&self) -> bool {
        self.point_reader.is_none()
    }

    fn point_reader(&mut self) -> Result<&mut Box<dyn ReadPoints>> {
        self.point_reader.as_mut().ok_or(Error::ReaderClosed)
    }
}
