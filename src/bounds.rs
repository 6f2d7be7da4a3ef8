use crate::Vector;

/// Minimum and maximum bounds in three dimensions.
///
/// The default bounds are "inverted" (infinite minimums, negative infinite maximums), so that
/// growing them by a single coordinate collapses them onto that coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// The minimum values.
    pub min: Vector<f64>,

    /// The maximum values.
    pub max: Vector<f64>,
}

impl Bounds {
    /// Grows the bounds to encompass this coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Bounds, Vector};
    /// let mut bounds = Bounds::default();
    /// bounds.grow(Vector { x: 1., y: 2., z: 3. });
    /// assert_eq!(1., bounds.min.x);
    /// assert_eq!(1., bounds.max.x);
    /// ```
    pub fn grow(&mut self, xyz: Vector<f64>) {
        if xyz.x < self.min.x {
            self.min.x = xyz.x;
        }
        if xyz.y < self.min.y {
            self.min.y = xyz.y;
        }
        if xyz.z < self.min.z {
            self.min.z = xyz.z;
        }
        if xyz.x > self.max.x {
            self.max.x = xyz.x;
        }
        if xyz.y > self.max.y {
            self.max.y = xyz.y;
        }
        if xyz.z > self.max.z {
            self.max.z = xyz.z;
        }
    }

    /// Returns true if these bounds haven't grown around anything yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasio::{Bounds, Vector};
    /// let mut bounds = Bounds::default();
    /// assert!(bounds.is_empty());
    /// bounds.grow(Vector::default());
    /// assert!(!bounds.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns bounds with every extent set to zero.
    ///
    /// This is what gets written for a file without any points.
    pub fn zero() -> Bounds {
        Bounds {
            min: Vector::default(),
            max: Vector::default(),
        }
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds {
            min: Vector::splat(f64::INFINITY),
            max: Vector::splat(f64::NEG_INFINITY),
        }
    }
}
