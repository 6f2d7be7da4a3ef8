use crate::{Error, Result};
use std::fmt;

const BASE_LEN: u16 = 20;
const GPS_TIME_LEN: u16 = 8;
const COLOR_LEN: u16 = 6;

/// Point formats are defined by ASPRS.
///
/// The classic formats 0 through 3 are built from the same twenty-byte core, optionally followed
/// by gps time and color. Any bytes a file declares beyond that are carried as extra bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Format {
    /// Does this point format include gps time?
    pub has_gps_time: bool,

    /// Does this point format include red, green, and blue colors?
    pub has_color: bool,

    /// The number of bytes at the end of each record that aren't part of any standard field.
    pub extra_bytes: u16,
}

impl Format {
    /// Creates a new point format from a u8.
    ///
    /// The compression bit must already be stripped.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::point::Format;
    /// let format = Format::new(3).unwrap();
    /// assert!(format.has_gps_time);
    /// assert!(format.has_color);
    /// assert!(Format::new(4).is_err());
    /// ```
    pub fn new(n: u8) -> Result<Format> {
        let (has_gps_time, has_color) = match n {
            0 => (false, false),
            1 => (true, false),
            2 => (false, true),
            3 => (true, true),
            _ => return Err(Error::UnsupportedPointFormat(n)),
        };
        Ok(Format {
            has_gps_time,
            has_color,
            extra_bytes: 0,
        })
    }

    /// Returns this point format's length, including any extra bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::point::Format;
    /// let mut format = Format::new(1).unwrap();
    /// assert_eq!(28, format.len());
    /// format.extra_bytes = 2;
    /// assert_eq!(30, format.len());
    /// ```
    ///
    /// Only a format that passes [Format::validate] has a length that fits in a u16; for any
    /// other format this saturates. Headers only hold valid formats.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u16 {
        self.checked_len().unwrap_or(u16::MAX)
    }

    /// Returns this point format's length, or `None` if the extra bytes overflow a u16.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::point::Format;
    /// let mut format = Format::new(0).unwrap();
    /// format.extra_bytes = u16::MAX - 20;
    /// assert_eq!(Some(u16::MAX), format.checked_len());
    /// format.extra_bytes += 1;
    /// assert_eq!(None, format.checked_len());
    /// ```
    pub fn checked_len(&self) -> Option<u16> {
        self.standard_len().checked_add(self.extra_bytes)
    }

    /// Checks that the record length can be declared in a header.
    pub fn validate(&self) -> Result<()> {
        if self.checked_len().is_none() {
            Err(Error::invalid_argument(
                "extra_bytes",
                format!(
                    "{} extra bytes make a {} record longer than {} bytes",
                    self.extra_bytes,
                    self,
                    u16::MAX
                ),
            ))
        } else {
            Ok(())
        }
    }

    /// Returns the length of the standard fields only.
    pub fn standard_len(&self) -> u16 {
        let mut len = BASE_LEN;
        if self.has_gps_time {
            len += GPS_TIME_LEN;
        }
        if self.has_color {
            len += COLOR_LEN;
        }
        len
    }

    /// Converts this point format into its numeric id.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::point::Format;
    /// assert_eq!(2, Format::new(2).unwrap().to_u8());
    /// ```
    pub fn to_u8(&self) -> u8 {
        match (self.has_gps_time, self.has_color) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        }
    }

    /// Sets the extra bytes so that this format's length is `len`.
    ///
    /// Fails if `len` is shorter than the standard fields.
    pub(crate) fn with_record_length(mut self, len: u16) -> Result<Format> {
        if len < self.standard_len() {
            return Err(Error::MalformedHeader(format!(
                "point record length {} is shorter than the {} bytes of point format {}",
                len,
                self.standard_len(),
                self.to_u8()
            )));
        }
        self.extra_bytes = len - self.standard_len();
        Ok(self)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point format {}", self.to_u8())?;
        if self.extra_bytes > 0 {
            write!(f, " with {} extra bytes", self.extra_bytes)?;
        }
        Ok(())
    }
}
