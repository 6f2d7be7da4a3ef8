//! Raw point records.

use crate::{Color, point::Format};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Result, Write};

/// A raw point record for point formats 0 through 3.
///
/// Bit fields are kept packed: see [crate::Point] for the unpacked view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// The X, Y, and Z values are stored as long integers.
    ///
    /// They're used in conjunction with the scale and offset values of the header to determine
    /// the coordinate of each point.
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
    #[allow(missing_docs)]
    pub z: i32,

    /// The integer representation of the pulse return magnitude.
    pub intensity: u16,

    /// Return number (bits 0-2), number of returns (bits 3-5), scan direction (bit 6), and edge
    /// of flight line (bit 7).
    pub flags: u8,

    /// Class (bits 0-4), synthetic (bit 5), key-point (bit 6), and withheld (bit 7).
    pub classification: u8,

    /// The rounded angle at which the laser pulse was output, including the roll of the aircraft.
    pub scan_angle_rank: i8,

    /// May be used at the user's discretion.
    pub user_data: u8,

    /// The file from which this point originated.
    pub point_source_id: u16,

    /// The time at which the point was acquired.
    pub gps_time: Option<f64>,

    /// The red, green, and blue values associated with this point.
    pub color: Option<Color>,

    /// Any bytes after the standard fields.
    pub extra_bytes: Vec<u8>,
}

impl Point {
    /// Reads a raw point.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::{point::Format, raw::Point};
    /// let format = Format::new(1).unwrap();
    /// let mut cursor = Cursor::new(vec![0; 28]);
    /// let point = Point::read_from(&mut cursor, &format).unwrap();
    /// assert_eq!(Some(0.), point.gps_time);
    /// ```
    pub fn read_from<R: Read>(mut read: R, format: &Format) -> Result<Point> {
        let x = read.read_i32::<LittleEndian>()?;
        let y = read.read_i32::<LittleEndian>()?;
        let z = read.read_i32::<LittleEndian>()?;
        let intensity = read.read_u16::<LittleEndian>()?;
        let flags = read.read_u8()?;
        let classification = read.read_u8()?;
        let scan_angle_rank = read.read_i8()?;
        let user_data = read.read_u8()?;
        let point_source_id = read.read_u16::<LittleEndian>()?;
        let gps_time = if format.has_gps_time {
            Some(read.read_f64::<LittleEndian>()?)
        } else {
            None
        };
        let color = if format.has_color {
            let red = read.read_u16::<LittleEndian>()?;
            let green = read.read_u16::<LittleEndian>()?;
            let blue = read.read_u16::<LittleEndian>()?;
            Some(Color::new(red, green, blue))
        } else {
            None
        };
        let mut extra_bytes = vec![0; usize::from(format.extra_bytes)];
        read.read_exact(&mut extra_bytes)?;
        Ok(Point {
            x,
            y,
            z,
            intensity,
            flags,
            classification,
            scan_angle_rank,
            user_data,
            point_source_id,
            gps_time,
            color,
            extra_bytes,
        })
    }

    /// Writes a raw point.
    ///
    /// Exactly `format.len()` bytes are written: missing optional fields are zeroed, and extra
    /// bytes are truncated or zero-padded to the format's count.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::{point::Format, raw::Point};
    /// let mut cursor = Cursor::new(Vec::new());
    /// Point::default().write_to(&mut cursor, &Format::new(3).unwrap()).unwrap();
    /// assert_eq!(34, cursor.into_inner().len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W, format: &Format) -> Result<()> {
        write.write_i32::<LittleEndian>(self.x)?;
        write.write_i32::<LittleEndian>(self.y)?;
        write.write_i32::<LittleEndian>(self.z)?;
        write.write_u16::<LittleEndian>(self.intensity)?;
        write.write_u8(self.flags)?;
        write.write_u8(self.classification)?;
        write.write_i8(self.scan_angle_rank)?;
        write.write_u8(self.user_data)?;
        write.write_u16::<LittleEndian>(self.point_source_id)?;
        if format.has_gps_time {
            write.write_f64::<LittleEndian>(self.gps_time.unwrap_or(0.))?;
        }
        if format.has_color {
            let color = self.color.unwrap_or_default();
            write.write_u16::<LittleEndian>(color.red)?;
            write.write_u16::<LittleEndian>(color.green)?;
            write.write_u16::<LittleEndian>(color.blue)?;
        }
        let mut extra_bytes = self.extra_bytes.clone();
        extra_bytes.resize(usize::from(format.extra_bytes), 0);
        write.write_all(&extra_bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn layout() {
        let point = Point {
            x: 1,
            y: -1,
            z: 0x01020304,
            intensity: 0xAABB,
            flags: 0b1101_0010,
            classification: 2,
            scan_angle_rank: -3,
            user_data: 4,
            point_source_id: 5,
            gps_time: None,
            color: None,
            extra_bytes: Vec::new(),
        };
        let mut cursor = Cursor::new(Vec::new());
        point.write_to(&mut cursor, &Format::new(0).unwrap()).unwrap();
        assert_eq!(
            vec![
                1, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 4, 3, 2, 1, 0xBB, 0xAA, 0b1101_0010, 2, 0xFD,
                4, 5, 0
            ],
            cursor.into_inner()
        );
    }

    #[test]
    fn extra_bytes() {
        let mut format = Format::new(2).unwrap();
        format.extra_bytes = 3;
        let point = Point {
            color: Some(Color::new(1, 2, 3)),
            extra_bytes: vec![7, 8, 9],
            ..Default::default()
        };
        let mut cursor = Cursor::new(Vec::new());
        point.write_to(&mut cursor, &format).unwrap();
        assert_eq!(29, cursor.get_ref().len());
        cursor.set_position(0);
        assert_eq!(point, Point::read_from(cursor, &format).unwrap());
    }

    #[test]
    fn missing_fields_are_zeroed() {
        let mut cursor = Cursor::new(Vec::new());
        Point::default()
            .write_to(&mut cursor, &Format::new(3).unwrap())
            .unwrap();
        assert_eq!(vec![0; 34], cursor.into_inner());
    }

    #[test]
    fn short_record() {
        let cursor = Cursor::new(vec![0; 27]);
        assert!(Point::read_from(cursor, &Format::new(1).unwrap()).is_err());
    }
}
