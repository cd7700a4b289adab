//! Camera-relative angular projection.
//!
//! Screen position is derived from viewing angles rather than a projection
//! matrix: the horizontal and vertical angles toward a point, measured against
//! the camera orientation, are divided by the per-pixel angular resolution the
//! field of view spreads across the framebuffer. The result is real-valued and
//! unclipped; callers hand it to the rasterizer, which drops whatever falls
//! outside the grid.

use core::f32::consts::PI;

use crate::{Camera, ScreenPoint, Vector3};

/// Per-frame projection state derived from a camera and framebuffer size.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Yaw in radians, wrapped into (-pi, pi].
    yaw: f32,
    /// Pitch in radians, not wrapped.
    pitch: f32,
    pitch_degrees: f32,
    angle_per_px_h: f32,
    angle_per_px_v: f32,
    half_width: f32,
    half_height: f32,
}

impl Projection {
    pub fn new(camera: &Camera, width: usize, height: usize) -> Self {
        let yaw_degrees = wrap_degrees(camera.rotation.z);
        Self {
            yaw: yaw_degrees * (PI / 180.0),
            pitch: camera.rotation.y * (PI / 180.0),
            pitch_degrees: camera.rotation.y,
            angle_per_px_h: camera.fov_horizontal * PI / (width as f32 * 180.0),
            angle_per_px_v: camera.fov_vertical * PI / (height as f32 * 180.0),
            half_width: (width / 2) as f32,
            half_height: (height / 2) as f32,
        }
    }

    /// View direction used by the behind-camera test.
    ///
    /// The z component is `tan(pitch)` while the pitch stays clear of
    /// vertical, and saturates to +-10000 at and beyond 90 degrees to keep it
    /// finite and strongly signed when the camera looks straight up or down.
    pub fn forward(&self) -> Vector3 {
        let z = if self.pitch_degrees > -90.0 && self.pitch_degrees < 90.0 {
            libm::tanf(self.pitch)
        } else {
            libm::copysignf(10000.0, self.pitch_degrees)
        };
        Vector3::new(libm::cosf(self.yaw), libm::sinf(self.yaw), z)
    }

    /// Projects a camera-relative offset onto the screen plane.
    ///
    /// A point the camera sits on horizontally (zero x and y offset) projects
    /// to the screen center column; the all-zero offset also projects to the
    /// center row. Coordinates may be negative or exceed the framebuffer.
    pub fn to_screen(&self, delta: Vector3) -> ScreenPoint {
        let mut horizontal = if delta.x == 0.0 && delta.y == 0.0 {
            0.0
        } else {
            libm::atan2f(delta.y, delta.x) - self.yaw
        };
        // One wrap step is enough: yaw and atan2 are both within (-pi, pi].
        if horizontal <= -PI {
            horizontal += 2.0 * PI;
        } else if horizontal > PI {
            horizontal -= 2.0 * PI;
        }
        let x = self.half_width - horizontal / self.angle_per_px_h;

        let vertical = if delta.x == 0.0 && delta.y == 0.0 && delta.z == 0.0 {
            0.0
        } else {
            let ground = libm::sqrtf(delta.x * delta.x + delta.y * delta.y);
            libm::atan2f(delta.z, ground) - self.pitch
        };
        let y = self.half_height - vertical / self.angle_per_px_v;

        ScreenPoint::new(x, y)
    }
}

/// Folds an angle in degrees into (-180, 180], mirrored around zero so the
/// sign of the input survives the fold.
fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = libm::fmodf(libm::fabsf(angle) + 180.0, 360.0) - 180.0;
    if angle < 0.0 {
        -wrapped
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera(yaw: f32, pitch: f32) -> Camera {
        Camera {
            location: Vector3::zeros(),
            rotation: Vector3::new(0.0, pitch, yaw),
            fov_horizontal: 90.0,
            fov_vertical: 90.0,
        }
    }

    #[test]
    fn straight_ahead_hits_screen_center() {
        let proj = Projection::new(&camera(0.0, 0.0), 4, 4);
        let p = proj.to_screen(Vector3::new(5.0, 0.0, 0.0));
        assert_eq!(p, ScreenPoint::new(2.0, 2.0));
    }

    #[test]
    fn zero_offset_is_degenerate_center() {
        let proj = Projection::new(&camera(0.0, 0.0), 4, 4);
        assert_eq!(proj.to_screen(Vector3::zeros()), ScreenPoint::new(2.0, 2.0));
    }

    #[test]
    fn quarter_fov_maps_to_screen_edge() {
        // 90 degree fov over 4 columns: pi/8 per pixel. A 45 degree offset is
        // two columns left of center.
        let proj = Projection::new(&camera(0.0, 0.0), 4, 4);
        let p = proj.to_screen(Vector3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn yaw_wraps_past_half_turn() {
        let a = Projection::new(&camera(181.0, 0.0), 4, 4);
        let b = Projection::new(&camera(-179.0, 0.0), 4, 4);
        let delta = Vector3::new(-1.0, -0.2, 0.1);
        assert_eq!(a.to_screen(delta), b.to_screen(delta));
        assert_eq!(a.forward(), b.forward());
    }

    #[test]
    fn forward_follows_yaw() {
        let f = Projection::new(&camera(90.0, 0.0), 4, 4).forward();
        assert_relative_eq!(f.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(f.y, 1.0, epsilon = 1e-6);
        assert_eq!(f.z, 0.0);
    }

    #[test]
    fn forward_pitch_saturates_at_vertical() {
        assert_eq!(Projection::new(&camera(0.0, 90.0), 4, 4).forward().z, 10000.0);
        assert_eq!(
            Projection::new(&camera(0.0, -90.0), 4, 4).forward().z,
            -10000.0
        );
        assert_eq!(
            Projection::new(&camera(0.0, 135.0), 4, 4).forward().z,
            10000.0
        );
    }

    #[test]
    fn forward_pitch_uses_tangent_below_vertical() {
        let f = Projection::new(&camera(0.0, 45.0), 4, 4).forward();
        assert_relative_eq!(f.z, 1.0, epsilon = 1e-6);
    }
}
