//! Plain value math for rectangles and 2-D vectors.
//!
//! Everything here is `Copy` and immutable: every transformation returns a
//! new value.  Coordinates are `f64` and carry no unit; the same types are
//! used for normalized grid space, percent space and desktop pixels.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 2-D vector (or point).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector pointing the same way, or `None` for a zero-length (or
    /// non-finite) vector, which has no defined direction.
    pub fn normalized(self) -> Option<Vector> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        Some(self / len)
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Per-axis product.
    pub fn multiply(self, other: Vector) -> Vector {
        Vector::new(self.x * other.x, self.y * other.y)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;
    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

/// An axis-aligned rectangle given by its four edges.
///
/// `left <= right` and `top <= bottom` always hold: [`Rect::new`] orders the
/// coordinates of each pair.  The y axis grows downwards, so "up" is towards
/// smaller `top` values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Build a rect from its top-left corner and size.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Top-left corner.
    pub fn origin(&self) -> Vector {
        Vector::new(self.left, self.top)
    }

    pub fn size(&self) -> Vector {
        Vector::new(self.width(), self.height())
    }

    pub fn center(&self) -> Vector {
        Vector::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Grow every edge outwards by `margin`.
    pub fn expand(&self, margin: f64) -> Rect {
        Rect::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }

    pub fn translate(&self, offset: Vector) -> Rect {
        Rect::new(
            self.left + offset.x,
            self.top + offset.y,
            self.right + offset.x,
            self.bottom + offset.y,
        )
    }

    /// Multiply every coordinate by `factor`.
    pub fn scale(&self, factor: f64) -> Rect {
        Rect::new(
            self.left * factor,
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
        )
    }

    /// Divide x coordinates by `width` and y coordinates by `height`.
    pub fn shrink(&self, width: f64, height: f64) -> Rect {
        Rect::new(
            self.left / width,
            self.top / height,
            self.right / width,
            self.bottom / height,
        )
    }

    /// Multiply x coordinates by `width` and y coordinates by `height`.
    pub fn extend(&self, width: f64, height: f64) -> Rect {
        Rect::new(
            self.left * width,
            self.top * height,
            self.right * width,
            self.bottom * height,
        )
    }

    /// Area shared with `other`, `0.0` when they do not overlap.
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = self.right.min(other.right) - self.left.max(other.left);
        let h = self.bottom.min(other.bottom) - self.top.max(other.top);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }

    /// Edge-wise comparison with tolerance `eps`.
    pub fn approx_eq(&self, other: &Rect, eps: f64) -> bool {
        (self.left - other.left).abs() <= eps
            && (self.top - other.top).abs() <= eps
            && (self.right - other.right).abs() <= eps
            && (self.bottom - other.bottom).abs() <= eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_mean_of_corners() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 20.0),
            Rect::new(-5.0, 3.0, 7.5, 4.0),
            Rect::new(100.0, 200.0, 1920.0, 1080.0),
        ];
        for r in rects {
            let c = r.center();
            assert_eq!(c.x, (r.left + r.right) / 2.0);
            assert_eq!(c.y, (r.top + r.bottom) / 2.0);
        }
    }

    #[test]
    fn new_orders_edges() {
        let r = Rect::new(10.0, 8.0, 2.0, 4.0);
        assert_eq!(r, Rect::new(2.0, 4.0, 10.0, 8.0));
        assert!(r.width() >= 0.0 && r.height() >= 0.0);
    }

    #[test]
    fn size_and_origin() {
        let r = Rect::from_origin_size(5.0, 6.0, 30.0, 40.0);
        assert_eq!(r.origin(), Vector::new(5.0, 6.0));
        assert_eq!(r.size(), Vector::new(30.0, 40.0));
        assert_eq!(r.right, 35.0);
        assert_eq!(r.bottom, 46.0);
    }

    #[test]
    fn normalized_zero_vector_is_none() {
        assert!(Vector::ZERO.normalized().is_none());
        let n = Vector::new(3.0, 4.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn vector_arithmetic() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, -1.0);
        assert_eq!(a + b, Vector::new(4.0, 1.0));
        assert_eq!(a - b, Vector::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0));
        assert_eq!(a.multiply(b), Vector::new(3.0, -2.0));
        assert_eq!(a.dot(b), 1.0);
        assert_eq!(-a, Vector::new(-1.0, -2.0));
    }

    #[test]
    fn shrink_and_extend_are_inverse() {
        let r = Rect::new(192.0, 108.0, 960.0, 1080.0);
        let back = r.shrink(1920.0, 1080.0).extend(1920.0, 1080.0);
        assert!(back.approx_eq(&r, 1e-9));
    }

    #[test]
    fn overlap_area_of_disjoint_rects_is_zero() {
        let a = Rect::new(0.0, 0.0, 50.0, 100.0);
        let b = Rect::new(50.0, 0.0, 100.0, 100.0);
        assert_eq!(a.overlap_area(&b), 0.0);
        let c = Rect::new(10.0, 10.0, 40.0, 90.0);
        assert_eq!(a.overlap_area(&c), 30.0 * 80.0);
    }

    #[test]
    fn expand_grows_all_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0).expand(0.5);
        assert_eq!(r, Rect::new(9.5, 9.5, 20.5, 20.5));
    }
}
