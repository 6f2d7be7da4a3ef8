use crate::{Error, Result};
use std::fmt;

/// A scale and an offset that transforms xyz coordinates.
///
/// Stored integers relate to world coordinates by `world = stored * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// The scale.
    pub scale: f64,
    /// The offset.
    pub offset: f64,
}

impl Transform {
    /// Applies this transform to an i32, returning a float.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Transform;
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(3., transform.direct(1));
    /// ```
    pub fn direct(&self, n: i32) -> f64 {
        self.scale * f64::from(n) + self.offset
    }

    /// Applies the inverse transform, and rounds the result.
    ///
    /// Returns an error if the resultant value can't be represented as an i32.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Transform;
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(1, transform.inverse(2.9).unwrap());
    /// assert!(transform.inverse(1e12).is_err());
    /// ```
    pub fn inverse(&self, n: f64) -> Result<i32> {
        let stored = ((n - self.offset) / self.scale).round();
        num_traits::cast::<f64, i32>(stored).ok_or(Error::InvalidCoordinate {
            value: n,
            transform: *self,
        })
    }

    /// Checks that this transform can be used to encode coordinates.
    ///
    /// The scale must be finite and nonzero, and the offset must be finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::Transform;
    /// assert!(Transform::default().validate().is_ok());
    /// assert!(Transform { scale: 0., offset: 0. }.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale == 0. {
            Err(Error::invalid_argument(
                "scale",
                format!("{} is not a finite nonzero number", self.scale),
            ))
        } else if !self.offset.is_finite() {
            Err(Error::invalid_argument(
                "offset",
                format!("{} is not finite", self.offset),
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform {
            scale: 0.01,
            offset: 0.,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{} * x + {}`", self.scale, self.offset)
    }
}
