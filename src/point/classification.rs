use crate::{Error, Result};
use std::fmt;

const CLASS_MASK: u8 = 0b0001_1111;
const SYNTHETIC_MASK: u8 = 0b0010_0000;
const KEY_POINT_MASK: u8 = 0b0100_0000;
const WITHHELD_MASK: u8 = 0b1000_0000;

/// ASPRS classification table for point formats 0 through 3.
///
/// Codes 10, 11, and 13 through 31 are reserved. Only five bits are available for the class, so
/// codes above 31 don't exist. [Class::new] is the checked constructor: a hand-built
/// `Reserved` holding any other code is rejected wherever the class is encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Class {
    #[default]
    CreatedNeverClassified,
    Unclassified,
    Ground,
    LowVegetation,
    MediumVegetation,
    HighVegetation,
    Building,
    LowPoint,
    ModelKeyPoint,
    Water,
    OverlapPoints,
    Reserved(u8),
}

impl Class {
    /// Creates a class from its code.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::point::Class;
    /// assert_eq!(Class::Ground, Class::new(2).unwrap());
    /// assert_eq!(Class::Reserved(10), Class::new(10).unwrap());
    /// assert!(Class::new(32).is_err());
    /// ```
    pub fn new(code: u8) -> Result<Class> {
        if code > CLASS_MASK {
            Err(Error::invalid_argument(
                "class",
                format!("{} doesn't fit in five bits", code),
            ))
        } else {
            Ok(Class::from_five_bits(code))
        }
    }

    fn from_five_bits(code: u8) -> Class {
        match code & CLASS_MASK {
            0 => Class::CreatedNeverClassified,
            1 => Class::Unclassified,
            2 => Class::Ground,
            3 => Class::LowVegetation,
            4 => Class::MediumVegetation,
            5 => Class::HighVegetation,
            6 => Class::Building,
            7 => Class::LowPoint,
            8 => Class::ModelKeyPoint,
            9 => Class::Water,
            12 => Class::OverlapPoints,
            reserved => Class::Reserved(reserved),
        }
    }

    /// Returns the human-readable name of this class.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::point::Class;
    /// assert_eq!("Low Point (noise)", Class::LowPoint.name());
    /// assert_eq!("Reserved", Class::Reserved(20).name());
    /// ```
    pub fn name(&self) -> &'static str {
        match *self {
            Class::CreatedNeverClassified => "Created, never classified",
            Class::Unclassified => "Unclassified",
            Class::Ground => "Ground",
            Class::LowVegetation => "Low Vegetation",
            Class::MediumVegetation => "Medium Vegetation",
            Class::HighVegetation => "High Vegetation",
            Class::Building => "Building",
            Class::LowPoint => "Low Point (noise)",
            Class::ModelKeyPoint => "Model Key-point (mass point)",
            Class::Water => "Water",
            Class::OverlapPoints => "Overlap Points",
            Class::Reserved(_) => "Reserved",
        }
    }
}

impl TryFrom<Class> for u8 {
    type Error = Error;

    fn try_from(class: Class) -> Result<u8> {
        Ok(match class {
            Class::CreatedNeverClassified => 0,
            Class::Unclassified => 1,
            Class::Ground => 2,
            Class::LowVegetation => 3,
            Class::MediumVegetation => 4,
            Class::HighVegetation => 5,
            Class::Building => 6,
            Class::LowPoint => 7,
            Class::ModelKeyPoint => 8,
            Class::Water => 9,
            Class::OverlapPoints => 12,
            Class::Reserved(code) => {
                if Class::new(code)? != class {
                    return Err(Error::invalid_argument(
                        "class",
                        format!("{} is not a reserved code", code),
                    ));
                }
                code
            }
        })
    }
}

impl TryFrom<u8> for Class {
    type Error = Error;

    fn try_from(code: u8) -> Result<Class> {
        Class::new(code)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The full classification byte of a point: the class plus three flags.
///
/// # Examples
///
/// ```
/// use lasio::point::{Class, Classification};
/// let mut classification = Classification::try_from(Class::Ground).unwrap();
/// classification.set_withheld(true);
/// assert_eq!(0b1000_0010, u8::from(classification));
/// assert_eq!(Class::Ground, classification.class());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Classification(u8);

impl Classification {
    /// Wraps a classification byte as read from a point record.
    pub fn new(byte: u8) -> Classification {
        Classification(byte)
    }

    /// Returns this classification's class.
    pub fn class(&self) -> Class {
        Class::from_five_bits(self.0)
    }

    /// Sets the class, keeping the flags.
    ///
    /// Fails, leaving the classification untouched, for a `Reserved` class that doesn't hold a
    /// reserved code.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::point::{Class, Classification};
    /// let mut classification = Classification::default();
    /// classification.set_class(Class::Reserved(10)).unwrap();
    /// assert!(classification.set_class(Class::Reserved(2)).is_err());
    /// assert!(classification.set_class(Class::Reserved(40)).is_err());
    /// assert_eq!(Class::Reserved(10), classification.class());
    /// ```
    pub fn set_class(&mut self, class: Class) -> Result<()> {
        let code = u8::try_from(class)?;
        self.0 = (self.0 & !CLASS_MASK) | code;
        Ok(())
    }

    /// Returns the name of this classification's class.
    pub fn name(&self) -> &'static str {
        self.class().name()
    }

    /// Was this point created by a technique other than lidar collection?
    pub fn is_synthetic(&self) -> bool {
        self.0 & SYNTHETIC_MASK == SYNTHETIC_MASK
    }

    #[allow(missing_docs)]
    pub fn set_synthetic(&mut self, synthetic: bool) {
        self.set_flag(SYNTHETIC_MASK, synthetic);
    }

    /// Is this point a model key-point that a thinning algorithm should keep?
    pub fn is_key_point(&self) -> bool {
        self.0 & KEY_POINT_MASK == KEY_POINT_MASK
    }

    #[allow(missing_docs)]
    pub fn set_key_point(&mut self, key_point: bool) {
        self.set_flag(KEY_POINT_MASK, key_point);
    }

    /// Should this point be left out of processing?
    pub fn is_withheld(&self) -> bool {
        self.0 & WITHHELD_MASK == WITHHELD_MASK
    }

    #[allow(missing_docs)]
    pub fn set_withheld(&mut self, withheld: bool) {
        self.set_flag(WITHHELD_MASK, withheld);
    }

    fn set_flag(&mut self, mask: u8, value: bool) {
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }
}

impl TryFrom<Class> for Classification {
    type Error = Error;

    fn try_from(class: Class) -> Result<Classification> {
        u8::try_from(class).map(Classification)
    }
}

impl From<Classification> for u8 {
    fn from(classification: Classification) -> u8 {
        classification.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let expected = [
            (0, "Created, never classified"),
            (1, "Unclassified"),
            (2, "Ground"),
            (3, "Low Vegetation"),
            (4, "Medium Vegetation"),
            (5, "High Vegetation"),
            (6, "Building"),
            (7, "Low Point (noise)"),
            (8, "Model Key-point (mass point)"),
            (9, "Water"),
            (12, "Overlap Points"),
        ];
        for (code, name) in expected {
            assert_eq!(name, Class::new(code).unwrap().name());
        }
    }

    #[test]
    fn reserved() {
        for code in [10, 11, 13, 14, 20, 31] {
            let class = Class::new(code).unwrap();
            assert_eq!(Class::Reserved(code), class);
            assert_eq!("Reserved", class.name());
            assert_eq!(code, u8::try_from(class).unwrap());
        }
    }

    #[test]
    fn too_big() {
        assert!(matches!(
            Class::new(32).unwrap_err(),
            Error::InvalidArgument { name: "class", .. }
        ));
        assert!(Class::try_from(255).is_err());
    }

    #[test]
    fn flags() {
        let mut classification = Classification::new(0b1110_0001);
        assert_eq!(Class::Unclassified, classification.class());
        assert!(classification.is_synthetic());
        assert!(classification.is_key_point());
        assert!(classification.is_withheld());
        classification.set_key_point(false);
        assert!(!classification.is_key_point());
        assert_eq!(0b1010_0001, u8::from(classification));
    }

    #[test]
    fn hand_built_reserved() {
        let mut classification = Classification::new(0b0010_0010);
        for code in [2, 12, 40] {
            assert!(matches!(
                classification.set_class(Class::Reserved(code)).unwrap_err(),
                Error::InvalidArgument { name: "class", .. }
            ));
        }
        assert_eq!(0b0010_0010, u8::from(classification));
        assert!(Classification::try_from(Class::Reserved(9)).is_err());
    }

    #[test]
    fn set_class_keeps_flags() {
        let mut classification = Classification::new(0b0010_0010);
        classification.set_class(Class::Water).unwrap();
        assert_eq!(Class::Water, classification.class());
        assert!(classification.is_synthetic());
        assert_eq!("Water", classification.name());
    }
}
