use crate::models::{pair_mut, Contact, RigidBody, Vector3};
use crate::utils::ContactSettings;

/// Rotational contribution of one body to the effective mass along `direction`.
fn angular_factor(body: &RigidBody, r: Vector3, direction: Vector3) -> f32 {
    if !body.has_finite_mass() {
        return 0.0;
    }
    let rotated = body.inverse_inertia_tensor_world * r.cross(&direction);
    rotated.cross(&r).dot(&direction)
}

/// Applies `impulse` at offset `r` from the body's center of mass.
fn apply_impulse(body: &mut RigidBody, r: Vector3, impulse: Vector3) {
    if !body.has_finite_mass() {
        return;
    }
    body.velocity += impulse * body.inverse_mass;
    body.angular_velocity += body.inverse_inertia_tensor_world * r.cross(&impulse);
}

fn relative_velocity(a: &RigidBody, r_a: Vector3, b: Option<&RigidBody>, r_b: Vector3) -> Vector3 {
    let vel_b = b.map_or(Vector3::zero(), |b| b.point_velocity(r_b));
    a.point_velocity(r_a) - vel_b
}

/// Coulomb coefficient of a contact: the movable body's friction, or the
/// average when both bodies can move.
fn combined_friction(a: &RigidBody, b: Option<&RigidBody>) -> f32 {
    match b {
        Some(b) if a.has_finite_mass() && b.has_finite_mass() => (a.friction + b.friction) * 0.5,
        Some(b) if !a.has_finite_mass() => b.friction,
        _ => a.friction,
    }
}

/// Resolves one contact between `a` and `b` (`None` for the ground plane).
///
/// Applies a restitution impulse along the normal, then a friction impulse
/// along the tangential slip direction clamped to the Coulomb cone, then
/// pushes the bodies apart by a fraction of the penetration beyond the slop.
/// A separating contact is left entirely alone.
///
/// # Example
/// ```
/// use rs_rigid::interactions::resolve;
/// use rs_rigid::models::{Contact, RigidBody, Shape, Vector3};
/// use rs_rigid::utils::{ContactSettings, DEFAULT_SIMULATION_CONFIG};
///
/// let mut ball = RigidBody::new(Shape::new_sphere(1.0), Vector3::new(0.0, 0.9, 0.0), 1.0, &DEFAULT_SIMULATION_CONFIG);
/// ball.velocity = Vector3::new(0.0, -1.0, 0.0);
/// let contact = Contact::new(0, None, Vector3::new(0.0, -0.1, 0.0), Vector3::up(), 0.1);
///
/// resolve(&mut ball, None, &contact, &ContactSettings::default());
/// assert!(ball.velocity.y.abs() < 1e-6);
/// assert!(ball.position.y > 0.9);
/// ```
pub fn resolve(a: &mut RigidBody, mut b: Option<&mut RigidBody>, contact: &Contact, settings: &ContactSettings) {
    let normal = contact.normal;
    let r_a = contact.point - a.position;
    let r_b = b.as_deref().map_or(Vector3::zero(), |b| contact.point - b.position);

    let v_rel = relative_velocity(a, r_a, b.as_deref(), r_b);
    let velocity_along_normal = v_rel.dot(&normal);
    if velocity_along_normal > 0.0 {
        return;
    }

    let inverse_mass_sum = a.inverse_mass + b.as_deref().map_or(0.0, |b| b.inverse_mass);
    if inverse_mass_sum <= 0.0 {
        return;
    }

    // Normal impulse
    let normal_mass = inverse_mass_sum
        + angular_factor(a, r_a, normal)
        + b.as_deref().map_or(0.0, |b| angular_factor(b, r_b, normal));

    let mut restitution = b.as_deref().map_or(a.restitution, |b| a.restitution.min(b.restitution));
    if velocity_along_normal > -settings.restitution_velocity_threshold {
        restitution = 0.0;
    }

    let jn = -(1.0 + restitution) * velocity_along_normal / normal_mass;
    let impulse = normal * jn;
    apply_impulse(a, r_a, impulse);
    if let Some(b) = b.as_deref_mut() {
        apply_impulse(b, r_b, -impulse);
    }

    // Friction
    let v_rel = relative_velocity(a, r_a, b.as_deref(), r_b);
    let tangent = v_rel - normal * v_rel.dot(&normal);
    let tangent_speed = tangent.magnitude();
    if tangent_speed > settings.friction_velocity_epsilon {
        let tangent = tangent * (1.0 / tangent_speed);
        let tangent_mass = inverse_mass_sum
            + angular_factor(a, r_a, tangent)
            + b.as_deref().map_or(0.0, |b| angular_factor(b, r_b, tangent));

        let max_friction = combined_friction(a, b.as_deref()) * jn;
        let jf = (-v_rel.dot(&tangent) / tangent_mass).max(-max_friction).min(max_friction);

        let friction_impulse = tangent * jf;
        apply_impulse(a, r_a, friction_impulse);
        if let Some(b) = b.as_deref_mut() {
            apply_impulse(b, r_b, -friction_impulse);
        }
    }

    // Positional correction
    let magnitude = (contact.penetration - settings.penetration_slop).max(0.0) / inverse_mass_sum
        * settings.correction_percent;
    let correction = normal * magnitude;
    a.position += correction * a.inverse_mass;
    if let Some(b) = b {
        b.position -= correction * b.inverse_mass;
    }
}

/// Resolves a contact whose bodies are given by index into `bodies`.
///
/// Contacts that name a missing body or the same body twice are ignored.
pub fn resolve_contact(bodies: &mut [RigidBody], contact: &Contact, settings: &ContactSettings) {
    match contact.b {
        None => {
            if let Some(a) = bodies.get_mut(contact.a) {
                resolve(a, None, contact, settings);
            }
        }
        Some(b) => {
            if let Some((a, b)) = pair_mut(bodies, contact.a, b) {
                resolve(a, Some(b), contact, settings);
            }
        }
    }
}
