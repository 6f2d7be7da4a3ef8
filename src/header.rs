//! A `Header` describes the configuration and properties of las data.
//!
//! # Reading
//!
//! A `Reader` uses a `Header` to expose metadata:
//!
//! ```no_run
//! use lasio::Reader;
//! let reader = Reader::from_path("points.las").unwrap();
//! let header = reader.header();
//! println!("The file has {} points.", header.number_of_points());
//! ```
//!
//! # Writing
//!
//! A `Writer` uses a `Header` to configure how it will write points. To create a las file, use a
//! `Header` from another file, or use `Header::default()`, and set it up with the validated
//! setters:
//!
//! ```
//! use lasio::{Header, Version, point::Format};
//! let mut header = Header::default();
//! header.set_version(Version::new(1, 4)).unwrap();
//! header.set_point_format(Format::new(3).unwrap()).unwrap();
//! assert!(header.set_system_identifier("this is a very long system identifier").is_err());
//! ```
//!
//! # Into raw bytes
//!
//! A `Header` has an `into_raw` method, which converts it to a `raw::Header`. This method
//! validates the header, e.g. that the point counts fit the version:
//!
//! ```
//! use lasio::Header;
//! let raw_header = Header::default().into_raw().unwrap();
//! assert_eq!(*b"LASF", raw_header.file_signature);
//! ```

use crate::{
    Bounds, Error, Result, Transform, Vector, Version, Vlr,
    error::IoContext,
    feature::{Evlrs, FileSourceId, LargeFiles, Waveforms},
    point::Format,
    raw::{
        self, POINT_DATA_START_SIGNATURE,
        header::{Evlr, IS_COMPRESSED_MASK, LargeFile},
    },
    utils,
    vlr::VlrStore,
};
use chrono::{Datelike, NaiveDate, Utc};
use log::warn;
use std::io::{ErrorKind, Read, Write};
use uuid::Uuid;

const SYSTEM_IDENTIFIER_LEN: usize = 32;
const GENERATING_SOFTWARE_LEN: usize = 32;
const MAX_DAY_OF_YEAR: u16 = 366;
const MAX_YEAR: u16 = 9999;

/// The user id of the vlr that holds a well known text coordinate system.
pub const PROJECTION_USER_ID: &str = "LASF_Projection";

/// The record id of the vlr that holds a well known text coordinate system.
pub const WKT_RECORD_ID: u16 = 2112;

/// Metadata describing the layout, source, and interpretation of the points.
///
/// Fields are private so that every change goes through a validating setter. A failed setter
/// leaves the header untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    bounds: Bounds,
    compressed: bool,
    file_creation_day_of_year: u16,
    file_creation_year: u16,
    file_source_id: u16,
    format: Format,
    generating_software: String,
    global_encoding: u16,
    guid: Uuid,
    number_of_points: u64,
    number_of_points_by_return: [u64; 5],
    padding: Vec<u8>,
    system_identifier: String,
    transforms: Vector<Transform>,
    version: Version,
    vlr_padding: Vec<u8>,
    vlrs: VlrStore,
}

impl Header {
    /// Reads a header and its vlrs from a `Read`.
    ///
    /// On success, the read is positioned at the first point record.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::Header;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Header::default().write_to(&mut cursor).unwrap();
    /// cursor.set_position(0);
    /// let header = Header::read_from(&mut cursor).unwrap();
    /// assert_eq!(227, cursor.position());
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<Header> {
        let raw_header = raw::Header::read_from(&mut read).context("reading the header")?;
        let offset_to_point_data = u64::from(raw_header.offset_to_point_data);
        let number_of_vlrs = raw_header.number_of_variable_length_records;
        let mut header = Header::try_from(raw_header)?;

        let mut position = u64::from(header.header_size());
        for i in 0..number_of_vlrs {
            if position + raw::vlr::HEADER_SIZE as u64 > offset_to_point_data {
                warn!(
                    "the header declares {} vlrs but only {} fit before the point data",
                    number_of_vlrs, i
                );
                break;
            }
            let raw_vlr = raw::Vlr::read_from(&mut read).context("reading a vlr")?;
            position += raw_vlr.len() as u64;
            header.vlrs.push(Vlr::new(raw_vlr)?)?;
        }
        if position > offset_to_point_data {
            return Err(Error::MalformedHeader(format!(
                "the vlrs end at byte {}, after the point data offset {}",
                position, offset_to_point_data
            )));
        }

        let expected = offset_to_point_data - position;
        let mut vlr_padding = Vec::new();
        let _ = read
            .by_ref()
            .take(expected)
            .read_to_end(&mut vlr_padding)
            .context("reading the bytes between the vlrs and the points")?;
        if vlr_padding.len() as u64 != expected {
            return Err(Error::Io {
                operation: "reading the bytes between the vlrs and the points",
                source: ErrorKind::UnexpectedEof.into(),
            });
        }
        if vlr_padding.ends_with(&POINT_DATA_START_SIGNATURE) {
            warn!("found the las 1.0 point data start signature, keeping it as padding");
        }
        header.vlr_padding = vlr_padding;
        Ok(header)
    }

    /// Writes this header and its vlrs to a `Write`.
    ///
    /// Exactly `offset_to_point_data()` bytes are written.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasio::Header;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Header::default().write_to(&mut cursor).unwrap();
    /// assert_eq!(227, cursor.into_inner().len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.into_raw()?
            .write_to(&mut write)
            .context("writing the header")?;
        for vlr in &self.vlrs {
            vlr.clone()
                .into_raw()?
                .write_to(&mut write)
                .context("writing a vlr")?;
        }
        write
            .write_all(&self.vlr_padding)
            .context("writing the bytes between the vlrs and the points")?;
        Ok(())
    }

    /// Converts this header into a raw header.
    ///
    /// Fails if the point counts don't fit the version, or if the vlrs push the point data past
    /// what a 32-bit offset can address.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Header;
    /// let raw_header = Header::default().into_raw().unwrap();
    /// assert_eq!(227, raw_header.header_size);
    /// ```
    pub fn into_raw(&self) -> Result<raw::Header> {
        if self.file_source_id != 0 && !self.version.supports::<FileSourceId>() {
            return Err(Error::invalid_argument(
                "file_source_id",
                format!("las {} reserves the file source id", self.version),
            ));
        }
        let large_files = self.version.supports::<LargeFiles>();
        let number_of_point_records = match u32::try_from(self.number_of_points) {
            Ok(n) => n,
            Err(_) if large_files => 0,
            Err(_) => {
                return Err(Error::TooManyPoints {
                    n: self.number_of_points,
                    version: self.version,
                });
            }
        };
        let mut number_of_points_by_return = [0; 5];
        for (legacy, &n) in number_of_points_by_return
            .iter_mut()
            .zip(&self.number_of_points_by_return)
        {
            *legacy = match u32::try_from(n) {
                Ok(n) => n,
                Err(_) if large_files => 0,
                Err(_) => {
                    return Err(Error::TooManyPoints {
                        n,
                        version: self.version,
                    });
                }
            };
        }
        let offset_to_point_data = u32::try_from(self.offset_to_point_data()).map_err(|_| {
            Error::invalid_argument(
                "vlrs",
                format!(
                    "the point data would start at byte {}",
                    self.offset_to_point_data()
                ),
            )
        })?;
        let mut point_data_record_format = self.format.to_u8();
        if self.compressed {
            point_data_record_format |= IS_COMPRESSED_MASK;
        }
        Ok(raw::Header {
            file_signature: raw::LASF,
            file_source_id: self.file_source_id,
            global_encoding: self.global_encoding,
            guid: self.guid.to_bytes_le(),
            version: self.version,
            system_identifier: utils::to_las_bytes("system_identifier", &self.system_identifier)?,
            generating_software: utils::to_las_bytes(
                "generating_software",
                &self.generating_software,
            )?,
            file_creation_day_of_year: self.file_creation_day_of_year,
            file_creation_year: self.file_creation_year,
            header_size: self.header_size(),
            offset_to_point_data,
            number_of_variable_length_records: self.vlrs.len() as u32,
            point_data_record_format,
            point_data_record_length: self.format.len(),
            number_of_point_records,
            number_of_points_by_return,
            x_scale_factor: self.transforms.x.scale,
            y_scale_factor: self.transforms.y.scale,
            z_scale_factor: self.transforms.z.scale,
            x_offset: self.transforms.x.offset,
            y_offset: self.transforms.y.offset,
            z_offset: self.transforms.z.offset,
            max_x: self.bounds.max.x,
            min_x: self.bounds.min.x,
            max_y: self.bounds.max.y,
            min_y: self.bounds.min.y,
            max_z: self.bounds.max.z,
            min_z: self.bounds.min.z,
            start_of_waveform_data_packet_record: if self.version.supports::<Waveforms>() {
                Some(0)
            } else {
                None
            },
            evlr: if self.version.supports::<Evlrs>() {
                Some(Evlr::default())
            } else {
                None
            },
            large_file: if large_files {
                let mut large_file = LargeFile {
                    number_of_point_records: self.number_of_points,
                    ..Default::default()
                };
                large_file.number_of_points_by_return[..5]
                    .copy_from_slice(&self.number_of_points_by_return);
                Some(large_file)
            } else {
                None
            },
            padding: self.padding.clone(),
        })
    }

    /// Overwrites the point counts and the bounds.
    ///
    /// A writer calls this once, when it closes. If there aren't any points the bounds are all
    /// zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Bounds, Header};
    /// let mut header = Header::default();
    /// header.finalize(0, [0; 5], Bounds::default());
    /// assert_eq!(Bounds::zero(), header.bounds());
    /// ```
    pub fn finalize(
        &mut self,
        number_of_points: u64,
        number_of_points_by_return: [u64; 5],
        bounds: Bounds,
    ) {
        self.number_of_points = number_of_points;
        self.number_of_points_by_return = number_of_points_by_return;
        self.bounds = if number_of_points == 0 || bounds.is_empty() {
            Bounds::zero()
        } else {
            bounds
        };
    }

    /// Returns the size of the header block, including any padding.
    ///
    /// The setters keep this within a u16.
    pub fn header_size(&self) -> u16 {
        header_size(self.version, self.padding.len()).unwrap_or(u16::MAX)
    }

    /// Returns the number of bytes the vlrs take up.
    pub fn vlr_block_size(&self) -> usize {
        self.vlrs.block_size()
    }

    /// Returns the byte offset from the start of the las data to the first point record.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Header, Vlr};
    /// let mut header = Header::default();
    /// header.vlrs_mut().push(Vlr { data: vec![0; 10], ..Default::default() }).unwrap();
    /// assert_eq!(227 + 64, header.offset_to_point_data());
    /// ```
    pub fn offset_to_point_data(&self) -> u64 {
        u64::from(self.header_size()) + self.vlr_block_size() as u64 + self.vlr_padding.len() as u64
    }

    /// Returns the file source id.
    pub fn file_source_id(&self) -> u16 {
        self.file_source_id
    }

    /// Sets the file source id.
    ///
    /// Las 1.0 reserves this field, so a nonzero id can't be written as las 1.0.
    pub fn set_file_source_id(&mut self, file_source_id: u16) {
        self.file_source_id = file_source_id;
    }

    /// Returns the global encoding bit field.
    pub fn global_encoding(&self) -> u16 {
        self.global_encoding
    }

    /// Sets the global encoding bit field.
    pub fn set_global_encoding(&mut self, global_encoding: u16) {
        self.global_encoding = global_encoding;
    }

    /// Returns the project id.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Header;
    /// assert!(Header::default().guid().is_nil());
    /// ```
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    /// Sets the project id.
    pub fn set_guid(&mut self, guid: Uuid) {
        self.guid = guid;
    }

    /// Returns the las version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Sets the las version.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Header, Version};
    /// let mut header = Header::default();
    /// header.set_version(Version::new(1, 3)).unwrap();
    /// assert_eq!(235, header.header_size());
    /// assert!(header.set_version(Version::new(2, 0)).is_err());
    /// assert_eq!(Version::new(1, 3), header.version());
    /// ```
    ///
    /// Fails if the header's padding wouldn't fit in the new version's header.
    pub fn set_version(&mut self, version: Version) -> Result<()> {
        if !version.is_supported() {
            return Err(Error::invalid_argument(
                "version",
                format!("las {} is not supported", version),
            ));
        }
        if header_size(version, self.padding.len()).is_none() {
            return Err(Error::invalid_argument(
                "version",
                format!(
                    "{} bytes of padding don't fit in a las {} header",
                    self.padding.len(),
                    version
                ),
            ));
        }
        self.version = version;
        Ok(())
    }

    /// Returns the system identifier.
    pub fn system_identifier(&self) -> &str {
        &self.system_identifier
    }

    /// Returns the system identifier right-padded with spaces to thirty-two bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Header;
    /// let mut header = Header::default();
    /// header.set_system_identifier("lasio").unwrap();
    /// assert_eq!(32, header.padded_system_identifier().len());
    /// assert!(header.padded_system_identifier().starts_with("lasio "));
    /// ```
    pub fn padded_system_identifier(&self) -> String {
        utils::pad_with_spaces(&self.system_identifier, SYSTEM_IDENTIFIER_LEN)
    }

    /// Sets the system identifier, which can be at most thirty-two bytes.
    pub fn set_system_identifier(&mut self, system_identifier: &str) -> Result<()> {
        utils::check_las_string(
            "system_identifier",
            system_identifier,
            SYSTEM_IDENTIFIER_LEN,
        )?;
        self.system_identifier = system_identifier.to_string();
        Ok(())
    }

    /// Returns the generating software.
    pub fn generating_software(&self) -> &str {
        &self.generating_software
    }

    /// Returns the generating software right-padded with spaces to thirty-two bytes.
    pub fn padded_generating_software(&self) -> String {
        utils::pad_with_spaces(&self.generating_software, GENERATING_SOFTWARE_LEN)
    }

    /// Sets the generating software, which can be at most thirty-two bytes.
    pub fn set_generating_software(&mut self, generating_software: &str) -> Result<()> {
        utils::check_las_string(
            "generating_software",
            generating_software,
            GENERATING_SOFTWARE_LEN,
        )?;
        self.generating_software = generating_software.to_string();
        Ok(())
    }

    /// Returns the day of the year the file was created, where January 1 is day one.
    pub fn file_creation_day_of_year(&self) -> u16 {
        self.file_creation_day_of_year
    }

    /// Sets the creation day of year, which must be at most 366.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Header;
    /// let mut header = Header::default();
    /// header.set_file_creation_day_of_year(42).unwrap();
    /// assert!(header.set_file_creation_day_of_year(367).is_err());
    /// assert_eq!(42, header.file_creation_day_of_year());
    /// ```
    pub fn set_file_creation_day_of_year(&mut self, day_of_year: u16) -> Result<()> {
        if day_of_year > MAX_DAY_OF_YEAR {
            return Err(Error::invalid_argument(
                "file_creation_day_of_year",
                format!("{} is after day {}", day_of_year, MAX_DAY_OF_YEAR),
            ));
        }
        self.file_creation_day_of_year = day_of_year;
        Ok(())
    }

    /// Returns the year the file was created.
    pub fn file_creation_year(&self) -> u16 {
        self.file_creation_year
    }

    /// Sets the creation year, which must have at most four digits.
    pub fn set_file_creation_year(&mut self, year: u16) -> Result<()> {
        if year > MAX_YEAR {
            return Err(Error::invalid_argument(
                "file_creation_year",
                format!("{} has more than four digits", year),
            ));
        }
        self.file_creation_year = year;
        Ok(())
    }

    /// Returns the creation date, if the day of year and year make a real date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use lasio::Header;
    /// let mut header = Header::default();
    /// header.set_file_creation_year(2024).unwrap();
    /// header.set_file_creation_day_of_year(60).unwrap();
    /// assert_eq!(NaiveDate::from_ymd_opt(2024, 2, 29), header.date());
    /// header.set_file_creation_day_of_year(0).unwrap();
    /// assert_eq!(None, header.date());
    /// ```
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(
            i32::from(self.file_creation_year),
            u32::from(self.file_creation_day_of_year),
        )
    }

    /// Sets the creation day of year and year from a date.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<()> {
        let year = u16::try_from(date.year())
            .ok()
            .filter(|&year| year <= MAX_YEAR)
            .ok_or_else(|| {
                Error::invalid_argument(
                    "date",
                    format!("the year of {} doesn't fit in four digits", date),
                )
            })?;
        self.file_creation_year = year;
        self.file_creation_day_of_year = date.ordinal() as u16;
        Ok(())
    }

    /// Returns the point format.
    pub fn point_format(&self) -> &Format {
        &self.format
    }

    /// Sets the point format.
    ///
    /// Fails if the extra bytes push the record length past what the header can declare.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Header, point::Format};
    /// let mut header = Header::default();
    /// let mut format = Format::new(3).unwrap();
    /// header.set_point_format(format).unwrap();
    /// format.extra_bytes = u16::MAX;
    /// assert!(header.set_point_format(format).is_err());
    /// assert_eq!(34, header.point_format().len());
    /// ```
    pub fn set_point_format(&mut self, format: Format) -> Result<()> {
        format.validate()?;
        self.format = format;
        Ok(())
    }

    /// Returns true if the point data are compressed.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Sets whether the point data are compressed.
    pub fn set_compressed(&mut self, compressed: bool) {
        self.compressed = compressed;
    }

    /// Returns the number of points.
    pub fn number_of_points(&self) -> u64 {
        self.number_of_points
    }

    /// Returns the number of points for returns one through five.
    pub fn number_of_points_by_return(&self) -> [u64; 5] {
        self.number_of_points_by_return
    }

    /// Returns the scale and offset of each axis.
    pub fn transforms(&self) -> &Vector<Transform> {
        &self.transforms
    }

    /// Sets the transforms.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Header, Transform, Vector};
    /// let mut header = Header::default();
    /// let mut transforms = Vector::splat(Transform { scale: 0.001, offset: 0. });
    /// header.set_transforms(transforms).unwrap();
    /// transforms.z.scale = 0.;
    /// assert!(header.set_transforms(transforms).is_err());
    /// assert_eq!(0.001, header.transforms().z.scale);
    /// ```
    pub fn set_transforms(&mut self, transforms: Vector<Transform>) -> Result<()> {
        transforms.x.validate()?;
        transforms.y.validate()?;
        transforms.z.validate()?;
        self.transforms = transforms;
        Ok(())
    }

    /// Returns the bounds of the points.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the vlrs.
    pub fn vlrs(&self) -> &VlrStore {
        &self.vlrs
    }

    /// Returns a mutable reference to the vlrs.
    pub fn vlrs_mut(&mut self) -> &mut VlrStore {
        &mut self.vlrs
    }

    /// Returns the bytes between the last defined header field and the first vlr.
    pub fn padding(&self) -> &[u8] {
        &self.padding
    }

    /// Sets the bytes between the last defined header field and the first vlr.
    pub fn set_padding(&mut self, padding: Vec<u8>) -> Result<()> {
        if header_size(self.version, padding.len()).is_none() {
            return Err(Error::invalid_argument(
                "padding",
                format!("{} bytes of padding don't fit in the header", padding.len()),
            ));
        }
        self.padding = padding;
        Ok(())
    }

    /// Returns the bytes between the last vlr and the first point.
    pub fn vlr_padding(&self) -> &[u8] {
        &self.vlr_padding
    }

    /// Sets the bytes between the last vlr and the first point.
    pub fn set_vlr_padding(&mut self, vlr_padding: Vec<u8>) {
        self.vlr_padding = vlr_padding;
    }

    /// Returns the well known text coordinate system, if there is one.
    ///
    /// The text isn't parsed. A coordinate system vlr that isn't UTF-8 counts as none.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Header;
    /// let mut header = Header::default();
    /// assert_eq!(None, header.spatial_reference());
    /// header.set_spatial_reference("GEOGCS[\"WGS 84\"]").unwrap();
    /// assert_eq!(Some("GEOGCS[\"WGS 84\"]".to_string()), header.spatial_reference());
    /// ```
    pub fn spatial_reference(&self) -> Option<String> {
        self.vlrs
            .find(PROJECTION_USER_ID, WKT_RECORD_ID)
            .and_then(|vlr| utils::las_string("wkt", &vlr.data).ok())
    }

    /// Sets the well known text coordinate system, replacing any existing one.
    pub fn set_spatial_reference(&mut self, wkt: &str) -> Result<()> {
        let mut data = wkt.as_bytes().to_vec();
        data.push(0);
        let vlr = Vlr {
            user_id: PROJECTION_USER_ID.to_string(),
            record_id: WKT_RECORD_ID,
            description: "OGC Coordinate System WKT".to_string(),
            data,
            ..Default::default()
        };
        vlr.validate()?;
        let _ = self.vlrs.remove_matching(PROJECTION_USER_ID, WKT_RECORD_ID);
        self.vlrs.push(vlr)
    }
}

impl TryFrom<raw::Header> for Header {
    type Error = Error;

    fn try_from(raw_header: raw::Header) -> Result<Header> {
        if raw_header.file_signature != raw::LASF {
            return Err(Error::MalformedHeader(format!(
                "the file signature is {:?}, not LASF",
                raw_header.file_signature
            )));
        }
        let version = raw_header.version;
        if !version.is_supported() {
            return Err(Error::UnsupportedVersion(version));
        }
        if raw_header.header_size < version.header_size() {
            return Err(Error::MalformedHeader(format!(
                "the header size {} is smaller than the {} bytes of las {}",
                raw_header.header_size,
                version.header_size(),
                version
            )));
        }
        if raw_header.offset_to_point_data < u32::from(raw_header.header_size) {
            return Err(Error::MalformedHeader(format!(
                "the offset to point data {} is inside the {} byte header",
                raw_header.offset_to_point_data, raw_header.header_size
            )));
        }
        let format = Format::new(raw_header.point_data_record_format & !IS_COMPRESSED_MASK)?
            .with_record_length(raw_header.point_data_record_length)?;
        let transforms = Vector {
            x: Transform {
                scale: raw_header.x_scale_factor,
                offset: raw_header.x_offset,
            },
            y: Transform {
                scale: raw_header.y_scale_factor,
                offset: raw_header.y_offset,
            },
            z: Transform {
                scale: raw_header.z_scale_factor,
                offset: raw_header.z_offset,
            },
        };
        for transform in [&transforms.x, &transforms.y, &transforms.z] {
            transform
                .validate()
                .map_err(|err| Error::MalformedHeader(err.to_string()))?;
        }
        if raw_header
            .start_of_waveform_data_packet_record
            .is_some_and(|start| start != 0)
        {
            warn!("ignoring the waveform data packet record, waveforms aren't supported");
        }
        if let Some(evlr) = raw_header.evlr.filter(|evlr| evlr.number_of_evlrs > 0) {
            warn!(
                "ignoring {} extended vlrs, they aren't supported",
                evlr.number_of_evlrs
            );
        }
        let mut file_source_id = raw_header.file_source_id;
        if file_source_id != 0 && !version.supports::<FileSourceId>() {
            warn!(
                "ignoring file source id {} in the reserved field of las {}",
                file_source_id, version
            );
            file_source_id = 0;
        }
        let (number_of_points, number_of_points_by_return) = counts(&raw_header);
        Ok(Header {
            bounds: Bounds {
                min: Vector {
                    x: raw_header.min_x,
                    y: raw_header.min_y,
                    z: raw_header.min_z,
                },
                max: Vector {
                    x: raw_header.max_x,
                    y: raw_header.max_y,
                    z: raw_header.max_z,
                },
            },
            compressed: raw_header.is_compressed(),
            file_creation_day_of_year: raw_header.file_creation_day_of_year,
            file_creation_year: raw_header.file_creation_year,
            file_source_id,
            format,
            generating_software: utils::las_string(
                "generating_software",
                &raw_header.generating_software,
            )?,
            global_encoding: raw_header.global_encoding,
            guid: Uuid::from_bytes_le(raw_header.guid),
            number_of_points,
            number_of_points_by_return,
            padding: raw_header.padding,
            system_identifier: utils::las_string(
                "system_identifier",
                &raw_header.system_identifier,
            )?,
            transforms,
            version,
            vlr_padding: Vec::new(),
            vlrs: VlrStore::default(),
        })
    }
}

fn header_size(version: Version, padding: usize) -> Option<u16> {
    u16::try_from(usize::from(version.header_size()).checked_add(padding)?).ok()
}

fn counts(raw_header: &raw::Header) -> (u64, [u64; 5]) {
    let number_of_points = if raw_header.number_of_point_records > 0 {
        u64::from(raw_header.number_of_point_records)
    } else {
        raw_header
            .large_file
            .map(|large_file| large_file.number_of_point_records)
            .unwrap_or(0)
    };
    let mut number_of_points_by_return = raw_header.number_of_points_by_return.map(u64::from);
    if number_of_points_by_return.iter().all(|&n| n == 0) {
        if let Some(large_file) = raw_header.large_file {
            number_of_points_by_return.copy_from_slice(&large_file.number_of_points_by_return[..5]);
        }
    }
    (number_of_points, number_of_points_by_return)
}

impl Default for Header {
    fn default() -> Header {
        let today = Utc::now().date_naive();
        Header {
            bounds: Bounds::zero(),
            compressed: false,
            file_creation_day_of_year: today.ordinal() as u16,
            file_creation_year: u16::try_from(today.year()).unwrap_or(0),
            file_source_id: 0,
            format: Format::default(),
            generating_software: format!("lasio {}", env!("CARGO_PKG_VERSION")),
            global_encoding: 0,
            guid: Uuid::nil(),
            number_of_points: 0,
            number_of_points_by_return: [0; 5],
            padding: Vec::new(),
            system_identifier: "lasio".to_string(),
            transforms: Vector::splat(Transform::default()),
            version: Version::new(1, 2),
            vlr_padding: Vec::new(),
            vlrs: VlrStore::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(header: &Header) -> Header {
        let mut cursor = Cursor::new(Vec::new());
        header.write_to(&mut cursor).unwrap();
        assert_eq!(header.offset_to_point_data(), cursor.get_ref().len() as u64);
        cursor.set_position(0);
        Header::read_from(cursor).unwrap()
    }

    fn raw_bytes(raw_header: &raw::Header) -> Cursor<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        raw_header.write_to(&mut cursor).unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn default() {
        let header = Header::default();
        assert_eq!(Version::new(1, 2), header.version());
        assert_eq!(0, header.point_format().to_u8());
        assert_eq!(0.01, header.transforms().x.scale);
        assert_eq!("lasio", header.system_identifier());
        assert!(header.generating_software().starts_with("lasio "));
        assert_eq!(Some(Utc::now().date_naive()), header.date());
        assert!(!header.is_compressed());
    }

    #[test]
    fn guid_byte_order() {
        let mut header = Header::default();
        let guid = Uuid::parse_str("d59b08e7-79ee-47e4-aae1-2b8de4b87331").unwrap();
        header.set_guid(guid);
        let raw_header = header.into_raw().unwrap();
        assert_eq!([0xe7, 0x08, 0x9b, 0xd5, 0xee, 0x79], raw_header.guid[..6]);
        let header = roundtrip(&header);
        assert_eq!(
            "d59b08e7-79ee-47e4-aae1-2b8de4b87331",
            header.guid().to_string()
        );
    }

    #[test]
    fn bad_signature() {
        let raw_header = raw::Header {
            file_signature: *b"LASG",
            ..Default::default()
        };
        assert!(matches!(
            Header::read_from(raw_bytes(&raw_header)).unwrap_err(),
            Error::MalformedHeader(_)
        ));
    }

    #[test]
    fn unsupported_version() {
        let raw_header = raw::Header {
            version: Version::new(1, 5),
            ..Default::default()
        };
        assert!(matches!(
            Header::read_from(raw_bytes(&raw_header)).unwrap_err(),
            Error::UnsupportedVersion(_)
        ));
    }

    #[test]
    fn header_size_too_small() {
        let raw_header = raw::Header {
            header_size: 226,
            ..Default::default()
        };
        assert!(matches!(
            Header::try_from(raw_header).unwrap_err(),
            Error::MalformedHeader(_)
        ));
    }

    #[test]
    fn offset_to_point_data_too_small() {
        let raw_header = raw::Header {
            offset_to_point_data: 200,
            ..Default::default()
        };
        assert!(matches!(
            Header::try_from(raw_header).unwrap_err(),
            Error::MalformedHeader(_)
        ));
    }

    #[test]
    fn unsupported_point_format() {
        let raw_header = raw::Header {
            point_data_record_format: 6,
            ..Default::default()
        };
        assert!(matches!(
            Header::try_from(raw_header).unwrap_err(),
            Error::UnsupportedPointFormat(6)
        ));
    }

    #[test]
    fn record_length_too_short() {
        let raw_header = raw::Header {
            point_data_record_format: 1,
            point_data_record_length: 20,
            ..Default::default()
        };
        assert!(matches!(
            Header::try_from(raw_header).unwrap_err(),
            Error::MalformedHeader(_)
        ));
    }

    #[test]
    fn zero_scale() {
        let raw_header = raw::Header {
            y_scale_factor: 0.,
            ..Default::default()
        };
        assert!(matches!(
            Header::try_from(raw_header).unwrap_err(),
            Error::MalformedHeader(_)
        ));
    }

    #[test]
    fn compressed_bit() {
        let raw_header = raw::Header {
            point_data_record_format: 0x83,
            point_data_record_length: 34,
            ..Default::default()
        };
        let header = Header::try_from(raw_header).unwrap();
        assert!(header.is_compressed());
        assert_eq!(3, header.point_format().to_u8());
        assert_eq!(0x83, header.into_raw().unwrap().point_data_record_format);
    }

    #[test]
    fn extra_bytes() {
        let raw_header = raw::Header {
            point_data_record_length: 24,
            ..Default::default()
        };
        let header = Header::try_from(raw_header).unwrap();
        assert_eq!(4, header.point_format().extra_bytes);
        assert_eq!(24, header.into_raw().unwrap().point_data_record_length);
    }

    #[test]
    fn padding_is_preserved() {
        let mut header = Header::default();
        header.set_padding(vec![1, 2, 3]).unwrap();
        header.set_vlr_padding(vec![0xDD, 0xCC]);
        header.vlrs_mut().push(Vlr::default()).unwrap();
        let header = roundtrip(&header);
        assert_eq!(&[1, 2, 3], header.padding());
        assert_eq!(&[0xDD, 0xCC], header.vlr_padding());
        assert_eq!(227 + 3 + 54 + 2, header.offset_to_point_data());
    }

    #[test]
    fn vlrs_roundtrip() {
        let mut header = Header::default();
        for record_id in 0..3 {
            header
                .vlrs_mut()
                .push(Vlr {
                    user_id: "lasio".to_string(),
                    record_id,
                    description: format!("vlr {}", record_id),
                    data: vec![record_id as u8; usize::from(record_id)],
                    ..Default::default()
                })
                .unwrap();
        }
        let read = roundtrip(&header);
        assert_eq!(header.vlrs(), read.vlrs());
        assert_eq!(vec![2, 2], read.vlrs().get(2).unwrap().data);
    }

    #[test]
    fn vlr_count_larger_than_block() {
        let mut header = Header::default();
        header.vlrs_mut().push(Vlr::default()).unwrap();
        let mut raw_header = header.into_raw().unwrap();
        raw_header.number_of_variable_length_records = 2;
        let mut cursor = Cursor::new(Vec::new());
        raw_header.write_to(&mut cursor).unwrap();
        Vlr::default()
            .into_raw()
            .unwrap()
            .write_to(&mut cursor)
            .unwrap();
        cursor.set_position(0);
        let header = Header::read_from(cursor).unwrap();
        assert_eq!(1, header.vlrs().len());
    }

    #[test]
    fn vlrs_past_point_data() {
        let mut header = Header::default();
        header
            .vlrs_mut()
            .push(Vlr {
                data: vec![0; 10],
                ..Default::default()
            })
            .unwrap();
        let mut raw_header = header.into_raw().unwrap();
        raw_header.offset_to_point_data -= 5;
        let mut cursor = Cursor::new(Vec::new());
        raw_header.write_to(&mut cursor).unwrap();
        header
            .vlrs()
            .get(0)
            .unwrap()
            .clone()
            .into_raw()
            .unwrap()
            .write_to(&mut cursor)
            .unwrap();
        cursor.set_position(0);
        assert!(matches!(
            Header::read_from(cursor).unwrap_err(),
            Error::MalformedHeader(_)
        ));
    }

    #[test]
    fn setters_leave_header_untouched() {
        let mut header = Header::default();
        header.set_system_identifier("scanner").unwrap();
        assert!(header.set_system_identifier(&"x".repeat(33)).is_err());
        assert_eq!("scanner", header.system_identifier());
        header.set_generating_software("lasio").unwrap();
        assert!(header.set_generating_software("a\0b").is_err());
        assert_eq!("lasio", header.generating_software());
        header.set_file_creation_year(2017).unwrap();
        assert!(header.set_file_creation_year(10000).is_err());
        assert_eq!(2017, header.file_creation_year());
        assert!(header.set_version(Version::new(1, 5)).is_err());
        assert_eq!(Version::new(1, 2), header.version());
        let date = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        assert!(header.set_date(date).is_err());
        assert_eq!(2017, header.file_creation_year());
    }

    #[test]
    fn set_date() {
        let mut header = Header::default();
        header
            .set_date(NaiveDate::from_ymd_opt(2017, 12, 31).unwrap())
            .unwrap();
        assert_eq!(365, header.file_creation_day_of_year());
        assert_eq!(2017, header.file_creation_year());
    }

    #[test]
    fn padded_generating_software() {
        let mut header = Header::default();
        header.set_generating_software("lasio").unwrap();
        assert_eq!(
            format!("lasio{}", " ".repeat(27)),
            header.padded_generating_software()
        );
    }

    #[test]
    fn finalize() {
        let mut header = Header::default();
        let mut bounds = Bounds::default();
        bounds.grow(Vector {
            x: 1.,
            y: 2.,
            z: 3.,
        });
        header.finalize(1, [1, 0, 0, 0, 0], bounds);
        assert_eq!(1, header.number_of_points());
        assert_eq!(bounds, header.bounds());
        let raw_header = header.into_raw().unwrap();
        assert_eq!(1, raw_header.number_of_point_records);
        assert_eq!([1, 0, 0, 0, 0], raw_header.number_of_points_by_return);
        assert_eq!(3., raw_header.max_z);
    }

    #[test]
    fn too_many_points() {
        let mut header = Header::default();
        let n = u64::from(u32::MAX) + 1;
        header.finalize(n, [n, 0, 0, 0, 0], Bounds::zero());
        assert!(matches!(
            header.into_raw().unwrap_err(),
            Error::TooManyPoints { .. }
        ));
        header.set_version(Version::new(1, 4)).unwrap();
        let raw_header = header.into_raw().unwrap();
        assert_eq!(0, raw_header.number_of_point_records);
        assert_eq!(n, raw_header.large_file.unwrap().number_of_point_records);
        let header = Header::try_from(raw_header).unwrap();
        assert_eq!(n, header.number_of_points());
        assert_eq!(n, header.number_of_points_by_return()[0]);
    }

    #[test]
    fn spatial_reference_replaces() {
        let mut header = Header::default();
        header.set_spatial_reference("first").unwrap();
        header.set_spatial_reference("second").unwrap();
        assert_eq!(1, header.vlrs().len());
        assert_eq!(Some("second".to_string()), roundtrip(&header).spatial_reference());
    }

    macro_rules! version {
        ($name:ident, $minor:expr, $size:expr) => {
            mod $name {
                use super::*;

                #[test]
                fn roundtrip_version() {
                    let mut header = Header::default();
                    header.set_version(Version::new(1, $minor)).unwrap();
                    header.set_point_format(Format::new(1).unwrap()).unwrap();
                    if $minor > 0 {
                        header.set_file_source_id(42);
                    }
                    header.finalize(10, [6, 4, 0, 0, 0], Bounds::zero());
                    assert_eq!($size, header.header_size());
                    let read = roundtrip(&header);
                    assert_eq!(header, read);
                }
            }
        };
    }

    version!(las_1_0, 0, 227);
    version!(las_1_1, 1, 227);
    version!(las_1_2, 2, 227);
    version!(las_1_3, 3, 235);
    version!(las_1_4, 4, 375);
}
