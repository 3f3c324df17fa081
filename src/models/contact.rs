use crate::models::{RigidBody, Vector3};

/// A single overlap produced by the narrow phase.
///
/// Bodies are referenced by their index in the world. `b == None` means the
/// contact is against the static ground plane. The normal points from B toward
/// A (world-up for floor contacts) and the penetration is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: usize,
    pub b: Option<usize>,
    pub point: Vector3,
    pub normal: Vector3,
    pub penetration: f32,
}

impl Contact {
    pub fn new(a: usize, b: Option<usize>, point: Vector3, normal: Vector3, penetration: f32) -> Self {
        Contact { a, b, point, normal, penetration }
    }

    /// Swaps the two bodies and negates the normal so it still points from B to A.
    /// Floor contacts have nothing to swap and are returned unchanged.
    ///
    /// # Example
    /// ```
    /// use rs_rigid::models::{Contact, Vector3};
    ///
    /// let c = Contact::new(0, Some(3), Vector3::zero(), Vector3::new(1.0, 0.0, 0.0), 0.1);
    /// let f = c.flipped();
    /// assert_eq!((f.a, f.b), (3, Some(0)));
    /// assert_eq!(f.normal, Vector3::new(-1.0, 0.0, 0.0));
    /// ```
    pub fn flipped(self) -> Contact {
        match self.b {
            Some(b) => Contact {
                a: b,
                b: Some(self.a),
                normal: -self.normal,
                ..self
            },
            None => self,
        }
    }
}

/// A body borrowed together with its index, handed to the narrow-phase tests
/// so they can label the contacts they produce.
#[derive(Debug, Clone, Copy)]
pub struct BodyRef<'a> {
    pub index: usize,
    pub body: &'a RigidBody,
}

impl<'a> BodyRef<'a> {
    pub fn new(index: usize, body: &'a RigidBody) -> Self {
        BodyRef { index, body }
    }
}
