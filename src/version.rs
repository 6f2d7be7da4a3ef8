use crate::feature::{Evlrs, Feature, LargeFiles, Waveforms};
use std::fmt;

/// LAS version.
///
/// Defaults to 1.2, the most widely supported version.
///
/// ```
/// use lasio::Version;
/// assert_eq!(Version::new(1, 2), Version::default());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version.
    ///
    /// Always 1.
    pub major: u8,

    /// The minor version, 0 through 4.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// Doesn't do any checking that its an actual las version.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Version;
    /// let version = Version::new(1, 2);
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Is this a version of las that can be read and written?
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Version;
    /// assert!(Version::new(1, 4).is_supported());
    /// assert!(!Version::new(1, 5).is_supported());
    /// assert!(!Version::new(2, 0).is_supported());
    /// ```
    pub fn is_supported(&self) -> bool {
        self.major == 1 && self.minor <= 4
    }

    /// Returns this version's minimum header size, in bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Version;
    /// assert_eq!(227, Version::new(1, 2).header_size());
    /// assert_eq!(235, Version::new(1, 3).header_size());
    /// assert_eq!(375, Version::new(1, 4).header_size());
    /// ```
    pub fn header_size(&self) -> u16 {
        let mut header_size = 227;
        if self.supports::<Waveforms>() {
            header_size += 8;
        }
        if self.supports::<Evlrs>() {
            header_size += 12;
        }
        if self.supports::<LargeFiles>() {
            header_size += 128;
        }
        header_size
    }

    /// Checks whether this version supports the feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Version;
    /// use lasio::feature::LargeFiles;
    /// assert!(!Version::new(1, 2).supports::<LargeFiles>());
    /// assert!(Version::new(1, 4).supports::<LargeFiles>());
    /// ```
    pub fn supports<F: Feature>(&self) -> bool {
        F::is_supported_by(*self)
    }
}

impl Default for Version {
    fn default() -> Version {
        Version::new(1, 2)
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version::new(major, minor)
    }
}

impl PartialEq<(u8, u8)> for Version {
    fn eq(&self, &(major, minor): &(u8, u8)) -> bool {
        self.major == major && self.minor == minor
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        assert!(Version::new(1, 2) < Version::new(1, 4));
        assert!(Version::new(1, 0) < Version::new(1, 1));
    }

    #[test]
    fn header_sizes() {
        for minor in 0..3 {
            assert_eq!(227, Version::new(1, minor).header_size());
        }
    }

    #[test]
    fn display() {
        assert_eq!("1.3", Version::new(1, 3).to_string());
    }

    #[test]
    fn tuple() {
        assert_eq!(Version::new(1, 4), (1, 4));
        assert_eq!(Version::new(1, 4), Version::from((1, 4)));
    }
}
