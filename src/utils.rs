//! Conversions between rust strings and the fixed-width, nul-filled string fields of las.

use crate::{Error, Result};
use std::str;

/// Interprets a fixed-width field as a string.
///
/// Everything from the first nul onwards is dropped. Invalid UTF-8 is an error, since a replaced
/// string could no longer be written back into its field.
pub(crate) fn las_string(name: &'static str, bytes: &[u8]) -> Result<String> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    str::from_utf8(&bytes[..end])
        .map(str::to_owned)
        .map_err(|source| Error::NotUtf8 { name, source })
}

/// Checks that a string fits in a fixed-width field of `width` bytes.
pub(crate) fn check_las_string(name: &'static str, s: &str, width: usize) -> Result<()> {
    if s.len() > width {
        Err(Error::invalid_argument(
            name,
            format!("'{}' is {} bytes, the limit is {}", s, s.len(), width),
        ))
    } else if s.as_bytes().contains(&0) {
        Err(Error::invalid_argument(name, "strings can't contain nul bytes"))
    } else {
        Ok(())
    }
}

/// Copies a string into a nul-filled, fixed-width field.
pub(crate) fn to_las_bytes<const N: usize>(name: &'static str, s: &str) -> Result<[u8; N]> {
    check_las_string(name, s, N)?;
    let mut bytes = [0; N];
    bytes[..s.len()].copy_from_slice(s.as_bytes());
    Ok(bytes)
}

/// Right-pads a string with spaces to `width` bytes.
pub(crate) fn pad_with_spaces(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn las_string_nul_filled() {
        assert_eq!("LiDAR", las_string("test", &[76, 105, 68, 65, 82, 0, 0]).unwrap());
    }

    #[test]
    fn las_string_garbage_after_nul() {
        assert_eq!("L", las_string("test", &[76, 0, 33]).unwrap());
    }

    #[test]
    fn las_string_full_width() {
        assert_eq!("LAS", las_string("test", b"LAS").unwrap());
    }

    #[test]
    fn las_string_empty() {
        assert_eq!("", las_string("test", &[0; 32]).unwrap());
    }

    #[test]
    fn las_string_not_utf8() {
        assert!(matches!(
            las_string("test", &[0xE9; 4]).unwrap_err(),
            Error::NotUtf8 { name: "test", .. }
        ));
        assert_eq!("L", las_string("test", &[76, 0, 0xE9]).unwrap());
    }

    #[test]
    fn to_las_bytes_fill() {
        let bytes: [u8; 4] = to_las_bytes("test", "B").unwrap();
        assert_eq!([66, 0, 0, 0], bytes);
    }

    #[test]
    fn to_las_bytes_exact() {
        let bytes: [u8; 2] = to_las_bytes("test", "Be").unwrap();
        assert_eq!(*b"Be", bytes);
    }

    #[test]
    fn to_las_bytes_too_long() {
        assert!(to_las_bytes::<1>("test", "Be").is_err());
    }

    #[test]
    fn to_las_bytes_interior_nul() {
        assert!(to_las_bytes::<4>("test", "a\0b").is_err());
    }

    #[test]
    fn padding() {
        assert_eq!("ab  ", pad_with_spaces("ab", 4));
        assert_eq!("abcd", pad_with_spaces("abcd", 4));
    }
}
