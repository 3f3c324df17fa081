use crate::models::{box_corners, cylinder_sample_points, BodyRef, Contact, Shape, Vector3};

/// Radial distances below this are treated as lying on a cylinder's axis.
const AXIS_EPSILON: f32 = 1e-4;

/// Accumulates below-plane sample points into a single floor contact.
struct FloorAccumulator {
    deepest: f32,
    sum: Vector3,
    count: usize,
}

impl FloorAccumulator {
    fn new() -> Self {
        FloorAccumulator { deepest: 0.0, sum: Vector3::zero(), count: 0 }
    }

    fn add(&mut self, point: Vector3, plane_y: f32) {
        if point.y < plane_y {
            self.deepest = self.deepest.max(plane_y - point.y);
            self.sum += point;
            self.count += 1;
        }
    }

    fn into_contact(self, index: usize) -> Option<Contact> {
        if self.count == 0 || self.deepest <= 0.0 {
            return None;
        }
        let point = self.sum * (1.0 / self.count as f32);
        Some(Contact::new(index, None, point, Vector3::up(), self.deepest))
    }
}

/// Tests a sphere against the ground plane at height `plane_y`.
///
/// # Example
/// ```
/// use rs_rigid::interactions::check_sphere_plane;
/// use rs_rigid::models::{BodyRef, RigidBody, Shape, Vector3};
/// use rs_rigid::utils::DEFAULT_SIMULATION_CONFIG;
///
/// let body = RigidBody::new(Shape::new_sphere(1.0), Vector3::new(0.0, 0.9, 0.0), 1.0, &DEFAULT_SIMULATION_CONFIG);
/// let contact = check_sphere_plane(BodyRef::new(0, &body), 1.0, 0.0).unwrap();
/// assert!((contact.penetration - 0.1).abs() < 1e-5);
/// assert_eq!(contact.b, None);
/// ```
pub fn check_sphere_plane(sphere: BodyRef, radius: f32, plane_y: f32) -> Option<Contact> {
    let distance = sphere.body.position.y - plane_y;
    if distance >= radius {
        return None;
    }
    let point = sphere.body.position - Vector3::up() * radius;
    Some(Contact::new(sphere.index, None, point, Vector3::up(), radius - distance))
}

/// Tests the eight corners of a box against the ground plane.
///
/// Penetration is that of the deepest corner and the contact point is the
/// mean of all corners below the plane.
pub fn check_box_plane(cuboid: BodyRef, half_extents: Vector3, plane_y: f32) -> Option<Contact> {
    let mut acc = FloorAccumulator::new();
    for corner in box_corners(half_extents) {
        acc.add(cuboid.body.to_world(corner), plane_y);
    }
    acc.into_contact(cuboid.index)
}

/// Tests a cylinder against the ground plane by sampling its rims and cap centers.
pub fn check_cylinder_plane(cylinder: BodyRef, radius: f32, half_height: f32, plane_y: f32) -> Option<Contact> {
    let mut acc = FloorAccumulator::new();
    for sample in cylinder_sample_points(radius, half_height) {
        acc.add(cylinder.body.to_world(sample), plane_y);
    }
    acc.into_contact(cylinder.index)
}

/// Tests two spheres. The normal points from B to A and the contact point is
/// A's surface point along that normal. Coincident centers produce no contact
/// since no separating direction exists.
pub fn check_sphere_sphere(a: BodyRef, radius_a: f32, b: BodyRef, radius_b: f32) -> Option<Contact> {
    let mid_line = a.body.position - b.body.position;
    let distance = mid_line.magnitude();
    let radius_sum = radius_a + radius_b;

    if distance <= 0.0 || distance >= radius_sum {
        return None;
    }

    let normal = mid_line * (1.0 / distance);
    let point = a.body.position + normal * radius_a;
    Some(Contact::new(a.index, Some(b.index), point, normal, radius_sum - distance))
}

/// Axis-aligned overlap test between two boxes. Orientation is ignored.
///
/// The contact is built on the axis of least overlap, with the normal along
/// that axis pointing toward A.
pub fn check_box_box(a: BodyRef, half_a: Vector3, b: BodyRef, half_b: Vector3) -> Option<Contact> {
    let pa = a.body.position;
    let pb = b.body.position;

    let x_overlap = (half_a.x + half_b.x) - (pa.x - pb.x).abs();
    if x_overlap <= 0.0 {
        return None;
    }
    let y_overlap = (half_a.y + half_b.y) - (pa.y - pb.y).abs();
    if y_overlap <= 0.0 {
        return None;
    }
    let z_overlap = (half_a.z + half_b.z) - (pa.z - pb.z).abs();
    if z_overlap <= 0.0 {
        return None;
    }

    let sign = |da: f32, db: f32| if da > db { 1.0 } else { -1.0 };

    let (normal, point, penetration) = if x_overlap < y_overlap && x_overlap < z_overlap {
        (
            Vector3::new(sign(pa.x, pb.x), 0.0, 0.0),
            Vector3::new((pa.x + pb.x) * 0.5, pa.y, pa.z),
            x_overlap,
        )
    } else if y_overlap < z_overlap {
        (
            Vector3::new(0.0, sign(pa.y, pb.y), 0.0),
            Vector3::new(pa.x, (pa.y + pb.y) * 0.5, pa.z),
            y_overlap,
        )
    } else {
        (
            Vector3::new(0.0, 0.0, sign(pa.z, pb.z)),
            Vector3::new(pa.x, pa.y, (pa.z + pb.z) * 0.5),
            z_overlap,
        )
    };

    Some(Contact::new(a.index, Some(b.index), point, normal, penetration))
}

/// Tests a sphere against an oriented box using the closest point on the box.
///
/// A sphere whose center lies inside the box has no closest surface direction
/// and produces no contact.
pub fn check_sphere_box(sphere: BodyRef, radius: f32, cuboid: BodyRef, half_extents: Vector3) -> Option<Contact> {
    let local_center = cuboid.body.to_local(sphere.body.position);
    let closest = Vector3::new(
        local_center.x.clamp(-half_extents.x, half_extents.x),
        local_center.y.clamp(-half_extents.y, half_extents.y),
        local_center.z.clamp(-half_extents.z, half_extents.z),
    );

    let offset = local_center - closest;
    let distance = offset.magnitude();
    if distance <= 0.0 || distance >= radius {
        return None;
    }

    let normal = cuboid.body.orientation.rotate(offset * (1.0 / distance));
    let point = cuboid.body.to_world(closest);
    Some(Contact::new(sphere.index, Some(cuboid.index), point, normal, radius - distance))
}

/// Box against sphere: the sphere-box test with the bodies swapped.
pub fn check_box_sphere(cuboid: BodyRef, half_extents: Vector3, sphere: BodyRef, radius: f32) -> Option<Contact> {
    check_sphere_box(sphere, radius, cuboid, half_extents).map(Contact::flipped)
}

/// Tests a sphere against a cylinder using the closest point on the cylinder surface.
///
/// When the sphere center lies inside the cylinder the nearest face is used and
/// the normal points out through that face with penetration `radius + distance`,
/// instead of the closest-point-to-center direction used outside.
/// A center lying exactly on the surface takes that face's normal.
pub fn check_sphere_cylinder(
    sphere: BodyRef,
    radius: f32,
    cylinder: BodyRef,
    cyl_radius: f32,
    half_height: f32,
) -> Option<Contact> {
    let local = cylinder.body.to_local(sphere.body.position);
    let radial = Vector3::new(local.x, 0.0, local.z);
    let radial_distance = radial.magnitude();

    let inside = radial_distance < cyl_radius && local.y.abs() < half_height;

    if inside {
        let to_side = cyl_radius - radial_distance;
        let to_top = half_height - local.y;
        let to_bottom = local.y + half_height;

        let closest_local = if to_side < to_top && to_side < to_bottom {
            let dir = if radial_distance > AXIS_EPSILON {
                radial * (1.0 / radial_distance)
            } else {
                Vector3::new(1.0, 0.0, 0.0)
            };
            Vector3::new(dir.x * cyl_radius, local.y, dir.z * cyl_radius)
        } else if to_top < to_bottom {
            Vector3::new(local.x, half_height, local.z)
        } else {
            Vector3::new(local.x, -half_height, local.z)
        };

        let closest = cylinder.body.to_world(closest_local);
        let outward = closest - sphere.body.position;
        let distance = outward.magnitude();
        let normal = if distance > 0.0 { outward * (1.0 / distance) } else { Vector3::up() };
        return Some(Contact::new(sphere.index, Some(cylinder.index), closest, normal, radius + distance));
    }

    let clamped_y = local.y.clamp(-half_height, half_height);
    let closest_local = if radial_distance > cyl_radius {
        let edge = radial * (cyl_radius / radial_distance);
        Vector3::new(edge.x, clamped_y, edge.z)
    } else {
        Vector3::new(local.x, clamped_y, local.z)
    };

    let closest = cylinder.body.to_world(closest_local);
    let diff = sphere.body.position - closest;
    let distance = diff.magnitude();
    if distance >= radius {
        return None;
    }

    let normal = if distance > 0.0 {
        diff * (1.0 / distance)
    } else if local.y.abs() < half_height && radial_distance > AXIS_EPSILON {
        cylinder.body.orientation.rotate(radial * (1.0 / radial_distance))
    } else if local.y < 0.0 {
        cylinder.body.orientation.rotate(-Vector3::up())
    } else {
        cylinder.body.orientation.rotate(Vector3::up())
    };
    Some(Contact::new(sphere.index, Some(cylinder.index), closest, normal, radius - distance))
}

/// Tests the cylinder's surface samples against an oriented box.
///
/// Each sample strictly inside the box penetrates by its distance to the
/// nearest face; the sample with the largest such distance controls the contact.
pub fn check_cylinder_box(
    cylinder: BodyRef,
    radius: f32,
    half_height: f32,
    cuboid: BodyRef,
    half_extents: Vector3,
) -> Option<Contact> {
    let mut best: Option<(f32, Vector3, Vector3)> = None;

    for sample in cylinder_sample_points(radius, half_height) {
        let world = cylinder.body.to_world(sample);
        let local = cuboid.body.to_local(world);

        let dx = half_extents.x - local.x.abs();
        let dy = half_extents.y - local.y.abs();
        let dz = half_extents.z - local.z.abs();
        if dx <= 0.0 || dy <= 0.0 || dz <= 0.0 {
            continue;
        }

        let penetration = dx.min(dy).min(dz);
        if best.is_some_and(|(deepest, _, _)| penetration <= deepest) {
            continue;
        }

        let local_normal = if penetration == dx {
            Vector3::new(local.x.signum(), 0.0, 0.0)
        } else if penetration == dy {
            Vector3::new(0.0, local.y.signum(), 0.0)
        } else {
            Vector3::new(0.0, 0.0, local.z.signum())
        };
        best = Some((penetration, world, cuboid.body.orientation.rotate(local_normal)));
    }

    best.map(|(penetration, point, normal)| {
        Contact::new(cylinder.index, Some(cuboid.index), point, normal, penetration)
    })
}

/// Deepest sample of `sampled` inside `container`, as (penetration, world point,
/// outward normal in the container's frame).
fn deepest_cylinder_sample(
    sampled: BodyRef,
    sampled_radius: f32,
    sampled_half_height: f32,
    container: BodyRef,
    radius: f32,
    half_height: f32,
) -> Option<(f32, Vector3, Vector3)> {
    let mut best: Option<(f32, Vector3, Vector3)> = None;

    for sample in cylinder_sample_points(sampled_radius, sampled_half_height) {
        let world = sampled.body.to_world(sample);
        let local = container.body.to_local(world);

        if local.y.abs() >= half_height {
            continue;
        }
        let distance = (local.x * local.x + local.z * local.z).sqrt();
        if distance >= radius {
            continue;
        }

        let pen_radial = radius - distance;
        let pen_cap = half_height - local.y.abs();
        let penetration = pen_radial.min(pen_cap);
        if best.is_some_and(|(deepest, _, _)| penetration <= deepest) {
            continue;
        }

        let local_normal = if penetration == pen_cap || distance <= AXIS_EPSILON {
            Vector3::new(0.0, local.y.signum(), 0.0)
        } else {
            Vector3::new(local.x / distance, 0.0, local.z / distance)
        };
        best = Some((penetration, world, container.body.orientation.rotate(local_normal)));
    }

    best
}

/// Tests two cylinders by sampling each against the other and keeping the
/// deepest penetration.
pub fn check_cylinder_cylinder(
    a: BodyRef,
    radius_a: f32,
    half_height_a: f32,
    b: BodyRef,
    radius_b: f32,
    half_height_b: f32,
) -> Option<Contact> {
    let a_in_b = deepest_cylinder_sample(a, radius_a, half_height_a, b, radius_b, half_height_b);
    // Normals from this pass point out of A, i.e. toward B, so they are negated.
    let b_in_a = deepest_cylinder_sample(b, radius_b, half_height_b, a, radius_a, half_height_a)
        .map(|(penetration, point, normal)| (penetration, point, -normal));

    let best = match (a_in_b, b_in_a) {
        (Some(x), Some(y)) => Some(if y.0 > x.0 { y } else { x }),
        (x, y) => x.or(y),
    };

    best.map(|(penetration, point, normal)| Contact::new(a.index, Some(b.index), point, normal, penetration))
}

/// Tests a body against the ground plane, choosing the routine by shape.
pub fn check_floor(body: BodyRef, plane_y: f32) -> Option<Contact> {
    match *body.body.shape() {
        Shape::Sphere { radius } => check_sphere_plane(body, radius, plane_y),
        Shape::Box { half_extents } => check_box_plane(body, half_extents, plane_y),
        Shape::Cylinder { radius, half_height } => check_cylinder_plane(body, radius, half_height, plane_y),
    }
}

/// Tests two bodies, choosing the routine by their pair of shapes.
///
/// Each unordered shape pair has one routine; the mirrored order runs it with
/// the arguments swapped and flips the result so `a` stays body A.
///
/// # Example
/// ```
/// use rs_rigid::interactions::check_pair;
/// use rs_rigid::models::{BodyRef, RigidBody, Shape, Vector3};
/// use rs_rigid::utils::DEFAULT_SIMULATION_CONFIG;
///
/// let config = DEFAULT_SIMULATION_CONFIG;
/// let cuboid = RigidBody::new(Shape::new_cuboid(2.0, 2.0, 2.0), Vector3::zero(), 1.0, &config);
/// let sphere = RigidBody::new(Shape::new_sphere(1.0), Vector3::new(1.5, 0.0, 0.0), 1.0, &config);
///
/// let contact = check_pair(BodyRef::new(0, &cuboid), BodyRef::new(1, &sphere)).unwrap();
/// assert_eq!((contact.a, contact.b), (0, Some(1)));
/// assert!((contact.normal.x + 1.0).abs() < 1e-6);
/// ```
pub fn check_pair(a: BodyRef, b: BodyRef) -> Option<Contact> {
    match (*a.body.shape(), *b.body.shape()) {
        (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => check_sphere_sphere(a, ra, b, rb),
        (Shape::Box { half_extents: ha }, Shape::Box { half_extents: hb }) => check_box_box(a, ha, b, hb),
        (Shape::Sphere { radius }, Shape::Box { half_extents }) => check_sphere_box(a, radius, b, half_extents),
        (Shape::Box { half_extents }, Shape::Sphere { radius }) => check_box_sphere(a, half_extents, b, radius),
        (Shape::Sphere { radius }, Shape::Cylinder { radius: cr, half_height }) => {
            check_sphere_cylinder(a, radius, b, cr, half_height)
        }
        (Shape::Cylinder { radius, half_height }, Shape::Box { half_extents }) => {
            check_cylinder_box(a, radius, half_height, b, half_extents)
        }
        (
            Shape::Cylinder { radius: ra, half_height: ha },
            Shape::Cylinder { radius: rb, half_height: hb },
        ) => check_cylinder_cylinder(a, ra, ha, b, rb, hb),
        (Shape::Cylinder { .. }, Shape::Sphere { .. }) | (Shape::Box { .. }, Shape::Cylinder { .. }) => {
            check_pair(b, a).map(Contact::flipped)
        }
    }
}
