//! Attributed three-dimensional points.

mod classification;
mod format;
mod scan_angle_rank;
mod scan_direction;

pub use self::classification::{Class, Classification};
pub use self::format::Format;
pub use self::scan_angle_rank::ScanAngleRank;
pub use self::scan_direction::ScanDirection;

use crate::{Color, Error, Result, Transform, Vector, raw};

const RETURN_NUMBER_MASK: u8 = 0b0000_0111;
const NUMBER_OF_RETURNS_MASK: u8 = 0b0011_1000;
const NUMBER_OF_RETURNS_SHIFT: u8 = 3;
const SCAN_DIRECTION_MASK: u8 = 0b0100_0000;
const EDGE_OF_FLIGHT_LINE_MASK: u8 = 0b1000_0000;
const MAX_RETURN: u8 = 7;

/// A point is the basic unit of information in las data.
///
/// Coordinates are world coordinates; they're quantized through the header's transforms only
/// when written.
///
/// # Examples
///
/// ```
/// use lasio::{Point, point::Class};
/// let mut point = Point { x: 1., y: 2., z: 3., ..Default::default() };
/// point.classification.set_class(Class::Ground).unwrap();
/// assert_eq!("Ground", point.classification.name());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// The x coordinate, as a float.
    pub x: f64,

    /// The y coordinate, as a float.
    pub y: f64,

    /// The z coordinate, as a float.
    pub z: f64,

    /// The integer representation of the pulse return magnitude.
    pub intensity: u16,

    /// The pulse return number for a given output pulse, at most seven.
    pub return_number: u8,

    /// The total number of returns for a given pulse, at most seven.
    pub number_of_returns: u8,

    /// The direction at which the scanner mirror was traveling at the time of the output pulse.
    pub scan_direction: ScanDirection,

    /// True if the point is at the end of a scan.
    pub is_edge_of_flight_line: bool,

    /// The class of the point, plus the synthetic, key-point, and withheld flags.
    pub classification: Classification,

    /// The angle at which the laser point was output from the system, including aircraft roll.
    pub scan_angle_rank: ScanAngleRank,

    /// Used at the user's discretion.
    pub user_data: u8,

    /// The file from which this point originated.
    pub point_source_id: u16,

    /// The time at which the point was acquired.
    ///
    /// Present iff the point format has gps time.
    pub gps_time: Option<f64>,

    /// This point's color.
    ///
    /// Present iff the point format has color.
    pub color: Option<Color>,

    /// Bytes after the standard fields, for formats with extra bytes.
    pub extra_bytes: Vec<u8>,
}

impl Point {
    /// Creates a point from a raw point.
    ///
    /// Fails if the raw scan angle rank is outside [-90, 90].
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Point, Transform, Vector, raw};
    /// let raw_point = raw::Point { x: 1, ..Default::default() };
    /// let point = Point::new(raw_point, &Vector::splat(Transform::default())).unwrap();
    /// assert_eq!(0.01, point.x);
    /// ```
    pub fn new(raw_point: raw::Point, transforms: &Vector<Transform>) -> Result<Point> {
        Ok(Point {
            x: transforms.x.direct(raw_point.x),
            y: transforms.y.direct(raw_point.y),
            z: transforms.z.direct(raw_point.z),
            intensity: raw_point.intensity,
            return_number: raw_point.flags & RETURN_NUMBER_MASK,
            number_of_returns: (raw_point.flags & NUMBER_OF_RETURNS_MASK)
                >> NUMBER_OF_RETURNS_SHIFT,
            scan_direction: ScanDirection::from(raw_point.flags & SCAN_DIRECTION_MASK != 0),
            is_edge_of_flight_line: raw_point.flags & EDGE_OF_FLIGHT_LINE_MASK != 0,
            classification: Classification::new(raw_point.classification),
            scan_angle_rank: ScanAngleRank::new(raw_point.scan_angle_rank)?,
            user_data: raw_point.user_data,
            point_source_id: raw_point.point_source_id,
            gps_time: raw_point.gps_time,
            color: raw_point.color,
            extra_bytes: raw_point.extra_bytes,
        })
    }

    /// Converts this point into a raw point for the given format.
    ///
    /// Fails if the point doesn't match the format, if a return field doesn't fit in three bits,
    /// or if a coordinate can't be represented by its transform.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Point, Transform, Vector, point::Format};
    /// let point = Point { x: 0.01, ..Default::default() };
    /// let raw_point = point
    ///     .to_raw(&Vector::splat(Transform::default()), &Format::new(0).unwrap())
    ///     .unwrap();
    /// assert_eq!(1, raw_point.x);
    /// ```
    pub fn to_raw(&self, transforms: &Vector<Transform>, format: &Format) -> Result<raw::Point> {
        if !self.matches(format) {
            return Err(Error::SchemaMismatch(*format));
        }
        check_return("return_number", self.return_number)?;
        check_return("number_of_returns", self.number_of_returns)?;
        let x = transforms.x.inverse(self.x)?;
        let y = transforms.y.inverse(self.y)?;
        let z = transforms.z.inverse(self.z)?;
        Ok(raw::Point {
            x,
            y,
            z,
            intensity: self.intensity,
            flags: self.flags(),
            classification: u8::from(self.classification),
            scan_angle_rank: self.scan_angle_rank.value(),
            user_data: self.user_data,
            point_source_id: self.point_source_id,
            gps_time: self.gps_time,
            color: self.color,
            extra_bytes: self.extra_bytes.clone(),
        })
    }

    /// Returns true if this point's optional fields agree with the format.
    ///
    /// Extra bytes may be shorter than the format's count, in which case they're zero-padded on
    /// write.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Point, point::Format};
    /// let point = Point { gps_time: Some(1.), ..Default::default() };
    /// assert!(point.matches(&Format::new(1).unwrap()));
    /// assert!(!point.matches(&Format::new(0).unwrap()));
    /// ```
    pub fn matches(&self, format: &Format) -> bool {
        self.gps_time.is_some() == format.has_gps_time
            && self.color.is_some() == format.has_color
            && self.extra_bytes.len() <= usize::from(format.extra_bytes)
    }

    /// Returns the gps time, or an error if this point doesn't have one.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Point;
    /// assert!(Point::default().require_gps_time().is_err());
    /// let point = Point { gps_time: Some(42.), ..Default::default() };
    /// assert_eq!(42., point.require_gps_time().unwrap());
    /// ```
    pub fn require_gps_time(&self) -> Result<f64> {
        self.gps_time.ok_or(Error::FieldNotApplicable("gps_time"))
    }

    /// Returns the color, or an error if this point doesn't have one.
    pub fn require_color(&self) -> Result<Color> {
        self.color.ok_or(Error::FieldNotApplicable("color"))
    }

    /// Returns this point's coordinates.
    pub fn coordinates(&self) -> Vector<f64> {
        Vector {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    fn flags(&self) -> u8 {
        let mut flags = (self.return_number & RETURN_NUMBER_MASK)
            | ((self.number_of_returns << NUMBER_OF_RETURNS_SHIFT) & NUMBER_OF_RETURNS_MASK);
        if bool::from(self.scan_direction) {
            flags |= SCAN_DIRECTION_MASK;
        }
        if self.is_edge_of_flight_line {
            flags |= EDGE_OF_FLIGHT_LINE_MASK;
        }
        flags
    }
}

fn check_return(name: &'static str, n: u8) -> Result<()> {
    if n > MAX_RETURN {
        Err(Error::invalid_argument(
            name,
            format!("{} doesn't fit in three bits", n),
        ))
    } else {
        Ok(())
    }
}
