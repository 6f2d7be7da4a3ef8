//! Variable length records are used to store additional metadata not defined in the header.
//!
//! They're stored right after the header, before the point records, and hold arbitrary data:
//!
//! ```
//! use lasio::{Vlr, vlr::VlrStore};
//! let vlr = Vlr {
//!     user_id: "lasio".to_string(),
//!     record_id: 42,
//!     description: "Some really important data".to_string(),
//!     data: vec![1, 2, 3],
//!     ..Default::default()
//! };
//! let mut vlrs = VlrStore::default();
//! vlrs.push(vlr).unwrap();
//! assert_eq!(57, vlrs.block_size());
//! ```

use crate::{Error, Result, raw, utils};

const USER_ID_LEN: usize = 16;
const DESCRIPTION_LEN: usize = 32;

/// A variable length record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlr {
    /// Two bytes that come before the user id, usually zero.
    pub reserved: u16,

    /// The user that created this record.
    ///
    /// This value is often an official, "registered" user_id, such as "LASF_Spec" or
    /// "LASF_Projection". At most sixteen bytes.
    pub user_id: String,

    /// This value specifies the type of record, and depends on the user id.
    pub record_id: u16,

    /// Textual description of these data, at most thirty-two bytes.
    pub description: String,

    /// The data themselves.
    pub data: Vec<u8>,
}

impl Vlr {
    /// Creates a vlr from a raw vlr.
    ///
    /// Fails if the user id or the description isn't UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Vlr, raw};
    /// let vlr = Vlr::new(raw::Vlr::default()).unwrap();
    /// assert_eq!("", vlr.user_id);
    /// let raw_vlr = raw::Vlr { description: [0xE9; 32], ..Default::default() };
    /// assert!(Vlr::new(raw_vlr).is_err());
    /// ```
    pub fn new(raw_vlr: raw::Vlr) -> Result<Vlr> {
        Ok(Vlr {
            reserved: raw_vlr.reserved,
            user_id: utils::las_string("user_id", &raw_vlr.user_id)?,
            record_id: raw_vlr.record_id,
            description: utils::las_string("description", &raw_vlr.description)?,
            data: raw_vlr.data,
        })
    }

    /// Converts this vlr to a raw vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Vlr;
    /// let raw_vlr = Vlr::default().into_raw().unwrap();
    /// assert_eq!(0, raw_vlr.record_length_after_header);
    /// ```
    pub fn into_raw(self) -> Result<raw::Vlr> {
        self.validate()?;
        let record_length_after_header = self.record_length_after_header()?;
        Ok(raw::Vlr {
            reserved: self.reserved,
            user_id: utils::to_las_bytes("user_id", &self.user_id)?,
            record_id: self.record_id,
            record_length_after_header,
            description: utils::to_las_bytes("description", &self.description)?,
            data: self.data,
        })
    }

    /// Checks that this vlr can be written.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Vlr;
    /// let mut vlr = Vlr::default();
    /// assert!(vlr.validate().is_ok());
    /// vlr.data = vec![0; 65536];
    /// assert!(vlr.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        utils::check_las_string("user_id", &self.user_id, USER_ID_LEN)?;
        utils::check_las_string("description", &self.description, DESCRIPTION_LEN)?;
        let _ = self.record_length_after_header()?;
        Ok(())
    }

    /// Returns the number of bytes of data.
    pub fn record_length(&self) -> usize {
        self.data.len()
    }

    /// Returns the total number of bytes of this vlr, header and data.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Vlr;
    /// let vlr = Vlr { data: vec![0; 10], ..Default::default() };
    /// assert_eq!(64, vlr.len());
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        raw::vlr::HEADER_SIZE + self.data.len()
    }

    /// Returns the user id right-padded with spaces to sixteen bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Vlr;
    /// let vlr = Vlr { user_id: "LASF_Spec".to_string(), ..Default::default() };
    /// assert_eq!("LASF_Spec       ", vlr.padded_user_id());
    /// ```
    pub fn padded_user_id(&self) -> String {
        utils::pad_with_spaces(&self.user_id, USER_ID_LEN)
    }

    /// Returns the description right-padded with spaces to thirty-two bytes.
    pub fn padded_description(&self) -> String {
        utils::pad_with_spaces(&self.description, DESCRIPTION_LEN)
    }

    /// Returns true if this vlr has the given user id and record id.
    pub fn is(&self, user_id: &str, record_id: u16) -> bool {
        self.user_id == user_id && self.record_id == record_id
    }

    fn record_length_after_header(&self) -> Result<u16> {
        u16::try_from(self.data.len()).map_err(|_| Error::RecordTooLarge(self.data.len()))
    }
}

/// An ordered collection of vlrs.
///
/// Duplicates are allowed. Every vlr is validated when it's pushed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VlrStore {
    vlrs: Vec<Vlr>,
}

impl VlrStore {
    /// Adds a vlr to the end of this store.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Vlr, vlr::VlrStore};
    /// let mut vlrs = VlrStore::default();
    /// vlrs.push(Vlr::default()).unwrap();
    /// assert_eq!(1, vlrs.len());
    /// let too_big = Vlr { data: vec![0; 70000], ..Default::default() };
    /// assert!(vlrs.push(too_big).is_err());
    /// assert_eq!(1, vlrs.len());
    /// ```
    pub fn push(&mut self, vlr: Vlr) -> Result<()> {
        vlr.validate()?;
        self.vlrs.push(vlr);
        Ok(())
    }

    /// Returns the vlr at `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::vlr::VlrStore;
    /// assert!(VlrStore::default().get(0).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&Vlr> {
        self.vlrs.get(index).ok_or(Error::IndexOutOfRange {
            index: index as u64,
            len: self.vlrs.len() as u64,
        })
    }

    /// Removes and returns the vlr at `index`, shifting all later vlrs down by one.
    pub fn remove(&mut self, index: usize) -> Result<Vlr> {
        if index < self.vlrs.len() {
            Ok(self.vlrs.remove(index))
        } else {
            Err(Error::IndexOutOfRange {
                index: index as u64,
                len: self.vlrs.len() as u64,
            })
        }
    }

    /// Removes every vlr with the given user id and record id, returning how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Vlr, vlr::VlrStore};
    /// let mut vlrs = VlrStore::default();
    /// let vlr = Vlr { user_id: "a".to_string(), record_id: 1, ..Default::default() };
    /// vlrs.push(vlr.clone()).unwrap();
    /// vlrs.push(vlr).unwrap();
    /// assert_eq!(2, vlrs.remove_matching("a", 1));
    /// assert!(vlrs.is_empty());
    /// ```
    pub fn remove_matching(&mut self, user_id: &str, record_id: u16) -> usize {
        self.remove_where(|vlr| vlr.is(user_id, record_id))
    }

    /// Returns the first vlr with the given user id and record id.
    pub fn find(&self, user_id: &str, record_id: u16) -> Option<&Vlr> {
        self.vlrs.iter().find(|vlr| vlr.is(user_id, record_id))
    }

    /// Returns an iterator over the vlrs, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vlr> {
        self.vlrs.iter()
    }

    /// Returns the number of vlrs.
    pub fn len(&self) -> usize {
        self.vlrs.len()
    }

    /// Returns true if there aren't any vlrs.
    pub fn is_empty(&self) -> bool {
        self.vlrs.is_empty()
    }

    /// Returns the number of bytes these vlrs take up in a file.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Vlr, vlr::VlrStore};
    /// let mut vlrs = VlrStore::default();
    /// vlrs.push(Vlr { data: vec![0; 6], ..Default::default() }).unwrap();
    /// vlrs.push(Vlr::default()).unwrap();
    /// assert_eq!(114, vlrs.block_size());
    /// ```
    pub fn block_size(&self) -> usize {
        self.vlrs.iter().map(Vlr::len).sum()
    }

    /// Removes all vlrs.
    pub fn clear(&mut self) {
        self.vlrs.clear();
    }

    pub(crate) fn remove_where<F: FnMut(&Vlr) -> bool>(&mut self, mut f: F) -> usize {
        let before = self.vlrs.len();
        self.vlrs.retain(|vlr| !f(vlr));
        before - self.vlrs.len()
    }
}

impl<'a> IntoIterator for &'a VlrStore {
    type Item = &'a Vlr;
    type IntoIter = std::slice::Iter<'a, Vlr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_long_user_id() {
        let vlr = Vlr {
            user_id: "this is more than sixteen bytes".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            vlr.clone().into_raw().unwrap_err(),
            Error::InvalidArgument {
                name: "user_id",
                ..
            }
        ));
        let mut vlrs = VlrStore::default();
        assert!(vlrs.push(vlr).is_err());
        assert!(vlrs.is_empty());
    }

    #[test]
    fn too_long_description() {
        let vlr = Vlr {
            description: "x".repeat(33),
            ..Default::default()
        };
        assert!(vlr.validate().is_err());
    }

    #[test]
    fn max_record_length() {
        let mut vlrs = VlrStore::default();
        vlrs.push(Vlr {
            data: vec![0; 65535],
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(
            vlrs.push(Vlr {
                data: vec![0; 65536],
                ..Default::default()
            })
            .unwrap_err(),
            Error::RecordTooLarge(65536)
        ));
    }

    #[test]
    fn raw_roundtrip() {
        let vlr = Vlr {
            reserved: 0xAABB,
            user_id: "LASF_Projection".to_string(),
            record_id: 2112,
            description: "OGC WKT".to_string(),
            data: b"GEOGCS[]".to_vec(),
        };
        let raw_vlr = vlr.clone().into_raw().unwrap();
        assert_eq!(8, raw_vlr.record_length_after_header);
        assert_eq!(vlr, Vlr::new(raw_vlr).unwrap());
    }

    #[test]
    fn padded() {
        let vlr = Vlr {
            user_id: "LASF_Projection".to_string(),
            description: "GeoKeyDirectoryTag (mandatory)".to_string(),
            ..Default::default()
        };
        assert_eq!("LASF_Projection ", vlr.padded_user_id());
        assert_eq!(
            "GeoKeyDirectoryTag (mandatory)  ",
            vlr.padded_description()
        );
    }

    #[test]
    fn store_get_remove() {
        let mut vlrs = VlrStore::default();
        for record_id in 0..3 {
            vlrs.push(Vlr {
                record_id,
                ..Default::default()
            })
            .unwrap();
        }
        assert_eq!(1, vlrs.get(1).unwrap().record_id);
        assert!(matches!(
            vlrs.get(3).unwrap_err(),
            Error::IndexOutOfRange { index: 3, len: 3 }
        ));
        assert_eq!(1, vlrs.remove(1).unwrap().record_id);
        assert_eq!(2, vlrs.get(1).unwrap().record_id);
        assert!(vlrs.remove(2).is_err());
        assert_eq!(vec![0, 2], vlrs.iter().map(|vlr| vlr.record_id).collect::<Vec<_>>());
    }
}
