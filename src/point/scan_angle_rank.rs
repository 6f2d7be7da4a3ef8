use crate::{Error, Result};

const LIMIT: i8 = 90;

/// The angle, rounded to the nearest integer, at which the laser pulse was output.
///
/// Zero is nadir, -90 is the left side of the aircraft. Values outside [-90, 90] can't be
/// constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScanAngleRank(i8);

impl ScanAngleRank {
    /// Creates a new scan angle rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::point::ScanAngleRank;
    /// assert_eq!(-90, ScanAngleRank::new(-90).unwrap().value());
    /// assert!(ScanAngleRank::new(91).is_err());
    /// ```
    pub fn new(value: i8) -> Result<ScanAngleRank> {
        if (-LIMIT..=LIMIT).contains(&value) {
            Ok(ScanAngleRank(value))
        } else {
            Err(Error::invalid_argument(
                "scan_angle_rank",
                format!("{} is outside of [-90, 90]", value),
            ))
        }
    }

    /// Returns the angle in degrees.
    pub fn value(&self) -> i8 {
        self.0
    }
}

impl TryFrom<i8> for ScanAngleRank {
    type Error = Error;

    fn try_from(value: i8) -> Result<ScanAngleRank> {
        ScanAngleRank::new(value)
    }
}

impl From<ScanAngleRank> for i8 {
    fn from(scan_angle_rank: ScanAngleRank) -> i8 {
        scan_angle_rank.0
    }
}
