//! Raw structures that map directly onto structures as defined in the las format specifications.
//!
//! In general, these structures are "dumb", meaning that they do the least amount of validity
//! checking, and their read and write methods only ever fail on I/O. For example:
//!
//! ```
//! let raw_header = lasio::raw::Header::default();
//! assert_eq!(0, raw_header.number_of_point_records);
//!
//! let header = lasio::Header::default();
//! assert_eq!(lasio::Version::new(1, 2), header.version());
//! ```
//!
//! In general, users should prefer to use the non-raw versions, e.g. `lasio::Header` over
//! `lasio::raw::Header`, in order to ensure that they are following The Rules.

pub mod header;
pub mod point;
pub mod vlr;

pub use self::header::Header;
pub use self::point::Point;
pub use self::vlr::Vlr;

/// The file magic number used for all las files.
pub const LASF: [u8; 4] = *b"LASF";

/// The point data start signature that some las 1.0 writers put right before the points.
pub const POINT_DATA_START_SIGNATURE: [u8; 2] = [0xDD, 0xCC];
