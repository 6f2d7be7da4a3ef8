//! Read and write [ASPRS LAS](https://www.asprs.org/committee-general/laser-las-file-format-exchange-activities.html)
//! point cloud data.
//!
//! # Reading
//!
//! Create a [Reader] from anything that implements [Read](std::io::Read) and
//! [Seek](std::io::Seek), or from a path with [Reader::from_path]:
//!
//! ```no_run
//! use lasio::Reader;
//! let mut reader = Reader::from_path("points.las").unwrap();
//! ```
//!
//! Iterate over the points with [Reader::points], or read them one at a time:
//!
//! ```
//! use std::io::Cursor;
//! use lasio::{Header, Point, Reader, Writer};
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
//! writer.write_point(Point::default()).unwrap();
//! let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
//!
//! let point = reader.read_point().unwrap().unwrap();
//! assert!(reader.read_point().unwrap().is_none());
//! for point in reader.points() {
//!     let _ = point.unwrap();
//! }
//! ```
//!
//! Jump to a point by index with [Reader::seek], or read one directly with
//! [Reader::read_point_at].
//!
//! # Writing
//!
//! A [Writer] is configured by a [Header]. The point counts and bounds in the header are computed
//! from the written points and rewritten when the writer is closed:
//!
//! ```
//! use std::io::Cursor;
//! use lasio::{Header, Point, Reader, Version, Writer, point::Format};
//!
//! let mut header = Header::default();
//! header.set_version(Version::new(1, 4)).unwrap();
//! header.set_point_format(Format::new(1).unwrap()).unwrap();
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
//! let point = Point {
//!     x: 1.,
//!     y: 2.,
//!     z: 3.,
//!     gps_time: Some(42.),
//!     ..Default::default()
//! };
//! writer.write_point(point).unwrap();
//! let cursor = writer.into_inner().unwrap();
//!
//! let reader = Reader::new(cursor).unwrap();
//! assert_eq!(1, reader.header().number_of_points());
//! assert_eq!(1., reader.header().bounds().min.x);
//! ```
//!
//! # Compression
//!
//! Compressed point data are handled by a [Codec](codec::Codec). Enable the `laz` feature to use
//! [laz](https://crates.io/crates/laz) as the default codec, or bring your own via
//! [ReaderOptions] and [WriterOptions].

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
pub mod feature;
pub mod header;
#[cfg(feature = "laz")]
#[cfg_attr(docsrs, doc(cfg(feature = "laz")))]
pub mod laz;
pub mod point;
pub mod raw;
pub mod reader;
pub mod vlr;
pub mod writer;

mod bounds;
mod color;
mod error;
mod transform;
mod utils;
mod vector;
mod version;

pub use crate::{
    bounds::Bounds,
    color::Color,
    error::Error,
    feature::Feature,
    header::Header,
    point::Point,
    reader::{Reader, ReaderOptions},
    transform::Transform,
    vector::Vector,
    version::Version,
    vlr::Vlr,
    writer::{Writer, WriterOptions},
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
