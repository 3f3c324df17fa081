// rs_rigid_wasm/src/lib.rs
// JavaScript bindings for the rigid-body world. Only forwards calls and marshals transforms.

use wasm_bindgen::prelude::*;
use js_sys::{Object, Reflect};
use rs_rigid::utils::PhysicsError;
use rs_rigid::world::World;

fn to_js_error(e: PhysicsError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Logs a rejected call to the browser console instead of throwing.
fn warn_rejected(method: &str, e: PhysicsError) {
    web_sys::console::warn_1(&JsValue::from_str(&format!("{}: {}", method, e)));
}

fn set_field(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

fn js_index(index: i32) -> Option<usize> {
    usize::try_from(index).ok()
}

#[wasm_bindgen(js_name = PhysicsWorld)]
pub struct WasmWorld {
    world: World,
}

#[wasm_bindgen(js_class = PhysicsWorld)]
impl WasmWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { world: World::new() }
    }

    #[wasm_bindgen(js_name = addSphere)]
    pub fn add_sphere(&mut self, x: f32, y: f32, z: f32, radius: f32, mass: f32) -> Result<usize, JsValue> {
        self.world.add_sphere((x, y, z), radius, mass).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = addBox)]
    #[allow(clippy::too_many_arguments)]
    pub fn add_box(&mut self, x: f32, y: f32, z: f32, w: f32, h: f32, d: f32, mass: f32) -> Result<usize, JsValue> {
        self.world.add_box((x, y, z), (w, h, d), mass).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = addCylinder)]
    pub fn add_cylinder(&mut self, x: f32, y: f32, z: f32, radius: f32, height: f32, mass: f32) -> Result<usize, JsValue> {
        self.world.add_cylinder((x, y, z), radius, height, mass).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setGravity)]
    pub fn set_gravity(&mut self, gy: f32) {
        if let Err(e) = self.world.set_gravity(gy) {
            warn_rejected("setGravity", e);
        }
    }

    #[wasm_bindgen(js_name = setRestitution)]
    pub fn set_restitution(&mut self, r: f32) {
        if let Err(e) = self.world.set_restitution(r) {
            warn_rejected("setRestitution", e);
        }
    }

    #[wasm_bindgen(js_name = setFriction)]
    pub fn set_friction(&mut self, f: f32) {
        if let Err(e) = self.world.set_friction(f) {
            warn_rejected("setFriction", e);
        }
    }

    #[wasm_bindgen(js_name = setVelocity)]
    pub fn set_velocity(&mut self, index: i32, vx: f32, vy: f32, vz: f32) {
        if let Some(index) = js_index(index) {
            if let Err(e) = self.world.set_velocity(index, (vx, vy, vz)) {
                warn_rejected("setVelocity", e);
            }
        }
    }

    #[wasm_bindgen(js_name = applyForce)]
    pub fn apply_force(&mut self, index: i32, fx: f32, fy: f32, fz: f32) {
        if let Some(index) = js_index(index) {
            if let Err(e) = self.world.apply_force(index, (fx, fy, fz)) {
                warn_rejected("applyForce", e);
            }
        }
    }

    #[wasm_bindgen(js_name = applyTorque)]
    pub fn apply_torque(&mut self, index: i32, tx: f32, ty: f32, tz: f32) {
        if let Some(index) = js_index(index) {
            if let Err(e) = self.world.apply_torque(index, (tx, ty, tz)) {
                warn_rejected("applyTorque", e);
            }
        }
    }

    pub fn step(&mut self, dt: f32) {
        if let Err(e) = self.world.step(dt) {
            warn_rejected("step", e);
        }
    }

    pub fn reset(&mut self) {
        self.world.reset();
    }

    #[wasm_bindgen(js_name = getBodyCount)]
    pub fn body_count(&self) -> usize {
        self.world.body_count()
    }

    /// Returns `{ pos: {x, y, z}, rot: {w, x, y, z}, isAwake }`, or `null` for an unknown index.
    #[wasm_bindgen(js_name = getBodyPosition)]
    pub fn body_position(&self, index: i32) -> Result<JsValue, JsValue> {
        let Some(transform) = js_index(index).and_then(|i| self.world.body_transform(i)) else {
            return Ok(JsValue::NULL);
        };

        let pos = Object::new();
        set_field(&pos, "x", &transform.position.x.into())?;
        set_field(&pos, "y", &transform.position.y.into())?;
        set_field(&pos, "z", &transform.position.z.into())?;

        let rot = Object::new();
        set_field(&rot, "w", &transform.orientation.w.into())?;
        set_field(&rot, "x", &transform.orientation.x.into())?;
        set_field(&rot, "y", &transform.orientation.y.into())?;
        set_field(&rot, "z", &transform.orientation.z.into())?;

        let result = Object::new();
        set_field(&result, "pos", &pos)?;
        set_field(&result, "rot", &rot)?;
        set_field(&result, "isAwake", &JsValue::from_bool(transform.is_awake))?;
        Ok(result.into())
    }
}

impl Default for WasmWorld {
    fn default() -> Self {
        Self::new()
    }
}
