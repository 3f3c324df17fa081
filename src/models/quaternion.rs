use std::ops::Mul;
use approx::{AbsDiffEq, RelativeEq};
use crate::models::Vector3;

/// Quaternion representation for 3D rotations to avoid gimbal lock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::identity()
    }
}

impl Quaternion {
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Quaternion { w, x, y, z }
    }

    /// Creates a new identity quaternion (no rotation)
    pub const fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Creates a quaternion from axis-angle representation
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let magnitude = axis.magnitude();
        if magnitude < 1e-10 {
            return Quaternion::identity();
        }

        let half_angle = angle / 2.0;
        let sin_half = half_angle.sin();
        let n = axis * (1.0 / magnitude);

        Quaternion {
            w: half_angle.cos(),
            x: n.x * sin_half,
            y: n.y * sin_half,
            z: n.z * sin_half,
        }
    }

    /// Returns the length/magnitude of the quaternion
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Rescales the quaternion to unit norm in place.
    ///
    /// A quaternion with a squared norm of exactly zero carries no rotation
    /// information and becomes the identity.
    pub fn normalize(&mut self) {
        let d = self.magnitude_squared();
        if d == 0.0 {
            *self = Quaternion::identity();
            return;
        }
        let d = 1.0 / d.sqrt();
        self.w *= d;
        self.x *= d;
        self.y *= d;
        self.z *= d;
    }

    /// Returns a normalized version of the quaternion
    pub fn normalized(&self) -> Self {
        let mut q = *self;
        q.normalize();
        q
    }

    /// Multiplies two quaternions (composition of rotations)
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    /// Negates the vector part in place. For a unit quaternion this is its inverse.
    pub fn invert(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
    }

    /// Returns the conjugate of the quaternion
    pub fn conjugate(&self) -> Quaternion {
        Quaternion {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Rotates a vector by this (unit) quaternion.
    ///
    /// Uses `v + w·t + q×t` with `t = 2·(q×v)`, which avoids building the
    /// conjugate and two full quaternion products.
    ///
    /// # Example
    /// ```
    /// use rs_rigid::models::{Quaternion, Vector3};
    /// use std::f32::consts::FRAC_PI_2;
    ///
    /// let q = Quaternion::from_axis_angle(Vector3::new(0.0, 0.0, 1.0), FRAC_PI_2);
    /// let v = q.rotate(Vector3::new(1.0, 0.0, 0.0));
    /// assert!(v.x.abs() < 1e-6);
    /// assert!((v.y - 1.0).abs() < 1e-6);
    /// ```
    pub fn rotate(&self, v: Vector3) -> Vector3 {
        let qv = Vector3::new(self.x, self.y, self.z);
        let t = qv.cross(&v) * 2.0;
        v + t * self.w + qv.cross(&t)
    }

    /// Rotates a vector by the inverse of this (unit) quaternion.
    pub fn rotate_inverse(&self, v: Vector3) -> Vector3 {
        self.conjugate().rotate(v)
    }

    /// Advances the orientation by an angular velocity over `scale` seconds.
    ///
    /// The update is first order: `(0, v·scale) * self` is halved and added to
    /// the components directly, so the result is no longer unit length and
    /// must be followed by `normalize()`.
    pub fn add_scaled_vector(&mut self, v: Vector3, scale: f32) {
        let spin = Quaternion::new(0.0, v.x * scale, v.y * scale, v.z * scale);
        let q = spin.multiply(self);
        self.w += q.w * 0.5;
        self.x += q.x * 0.5;
        self.y += q.y * 0.5;
        self.z += q.z * 0.5;
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, other: Quaternion) -> Quaternion {
        self.multiply(&other)
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        f32::abs_diff_eq(&self.w, &other.w, epsilon)
            && f32::abs_diff_eq(&self.x, &other.x, epsilon)
            && f32::abs_diff_eq(&self.y, &other.y, epsilon)
            && f32::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        f32::relative_eq(&self.w, &other.w, epsilon, max_relative)
            && f32::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && f32::relative_eq(&self.y, &other.y, epsilon, max_relative)
            && f32::relative_eq(&self.z, &other.z, epsilon, max_relative)
    }
}
