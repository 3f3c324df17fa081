use std::ops::Mul;
use crate::models::{Quaternion, Vector3};

/// Row-major 3x3 matrix, used for inertia tensors and rotation matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub data: [f32; 9],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Matrix3::identity()
    }
}

impl Matrix3 {
    pub const fn identity() -> Self {
        Matrix3 {
            data: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    pub const fn zero() -> Self {
        Matrix3 { data: [0.0; 9] }
    }

    pub fn from_diagonal(a: f32, b: f32, c: f32) -> Self {
        let mut m = Matrix3::identity();
        m.set_diagonal(a, b, c);
        m
    }

    /// Builds the rotation matrix equivalent to a unit quaternion.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let xx = q.x * q.x;
        let xy = q.x * q.y;
        let xz = q.x * q.z;
        let xw = q.x * q.w;
        let yy = q.y * q.y;
        let yz = q.y * q.z;
        let yw = q.y * q.w;
        let zz = q.z * q.z;
        let zw = q.z * q.w;

        Matrix3 {
            data: [
                1.0 - 2.0 * (yy + zz),
                2.0 * (xy - zw),
                2.0 * (xz + yw),
                2.0 * (xy + zw),
                1.0 - 2.0 * (xx + zz),
                2.0 * (yz - xw),
                2.0 * (xz - yw),
                2.0 * (yz + xw),
                1.0 - 2.0 * (xx + yy),
            ],
        }
    }

    pub fn set_identity(&mut self) {
        *self = Matrix3::identity();
    }

    /// Sets the matrix to a diagonal matrix with the given entries.
    pub fn set_diagonal(&mut self, a: f32, b: f32, c: f32) {
        self.set_identity();
        self.data[0] = a;
        self.data[4] = b;
        self.data[8] = c;
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.data;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    pub fn transpose(&self) -> Matrix3 {
        let d = &self.data;
        Matrix3 {
            data: [d[0], d[3], d[6], d[1], d[4], d[7], d[2], d[5], d[8]],
        }
    }

    /// Sets this matrix to the inverse of `m` using the adjugate over the determinant.
    ///
    /// If `m` is singular (determinant exactly zero) this matrix is left unchanged.
    pub fn set_inverse(&mut self, m: &Matrix3) {
        let det = m.determinant();
        if det == 0.0 {
            return;
        }
        let inv = 1.0 / det;
        let m = &m.data;

        self.data = [
            (m[4] * m[8] - m[5] * m[7]) * inv,
            -(m[1] * m[8] - m[2] * m[7]) * inv,
            (m[1] * m[5] - m[2] * m[4]) * inv,
            -(m[3] * m[8] - m[5] * m[6]) * inv,
            (m[0] * m[8] - m[2] * m[6]) * inv,
            -(m[0] * m[5] - m[2] * m[3]) * inv,
            (m[3] * m[7] - m[4] * m[6]) * inv,
            -(m[0] * m[7] - m[1] * m[6]) * inv,
            (m[0] * m[4] - m[1] * m[3]) * inv,
        ];
    }

    /// Inverts the matrix in place (no-op if singular).
    pub fn invert(&mut self) {
        let copy = *self;
        self.set_inverse(&copy);
    }

    /// Returns the inverse, or an unchanged copy if the matrix is singular.
    pub fn inverse(&self) -> Matrix3 {
        let mut m = *self;
        m.invert();
        m
    }

    pub fn transform(&self, v: Vector3) -> Vector3 {
        let d = &self.data;
        Vector3::new(
            d[0] * v.x + d[1] * v.y + d[2] * v.z,
            d[3] * v.x + d[4] * v.y + d[5] * v.z,
            d[6] * v.x + d[7] * v.y + d[8] * v.z,
        )
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.transform(v)
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, o: Matrix3) -> Matrix3 {
        let a = &self.data;
        let b = &o.data;
        let mut r = [0.0_f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                r[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Matrix3 { data: r }
    }
}
