//! # blockrend
//!
//! `blockrend` is a `no_std` compatible 3D rendering core for character
//! terminals reached over serial links. A frame passes through these stages:
//!
//! - Camera-relative angular projection of world triangles into screen space.
//! - Rejection of triangles entirely behind the camera.
//! - Back-to-front depth sort on centroid distance, so nearer triangles paint
//!   over farther ones.
//! - Exact scanline rasterization into a color-indexed framebuffer.
//! - Escape-coded streaming of the framebuffer over a byte channel, with
//!   color reselection suppressed across runs of same-colored cells.
//!
//! There is no depth buffer and no plane clipping beyond the behind-camera
//! rejection; occlusion comes purely from paint order. That keeps the working
//! memory at one palette cell per screen position plus a per-frame list of
//! visible triangles, which is what makes the renderer usable on small
//! embedded targets.
//!
//! Entrypoint to rendering is the [`Renderer`] struct; [`display_frame`]
//! streams a finished framebuffer through a [`SerialTx`] channel.
//!
//! ## Example
//!
//! ```
//! use blockrend::{Camera, Framebuffer, Renderer, TermColor, Triangle, Vector3, World};
//!
//! let world = World {
//!     background: TermColor::Black,
//!     triangles: vec![Triangle {
//!         p1: Vector3::new(4.0, -1.0, -1.0),
//!         p2: Vector3::new(4.0, 1.0, -1.0),
//!         p3: Vector3::new(4.0, 0.0, 1.0),
//!         color: TermColor::Green,
//!     }],
//! };
//! let camera = Camera {
//!     location: Vector3::zeros(),
//!     rotation: Vector3::zeros(),
//!     fov_horizontal: 90.0,
//!     fov_vertical: 90.0,
//! };
//!
//! let mut frame = Framebuffer::new(16, 16);
//! let mut renderer = Renderer::new();
//! renderer.render_frame(&world, &camera, &mut frame);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use nalgebra as na;

pub mod color;
pub mod framebuffer;
pub mod project;
mod raster;
pub mod term;

pub use color::TermColor;
pub use framebuffer::Framebuffer;
pub use project::Projection;
pub use term::{display_frame, SerialTx};

pub type Vector3 = na::Vector3<f32>;

/// Screen-space position after projection, prior to integer rounding and
/// bounds clipping. May be negative or exceed the framebuffer.
pub type ScreenPoint = na::Vector2<f32>;

/// One world-space triangle and its fill color.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde-all", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    pub p1: Vector3,
    pub p2: Vector3,
    pub p3: Vector3,
    pub color: TermColor,
}

/// Scene input for a frame. The render call only reads it; the caller keeps
/// ownership across frames.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde-all", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    pub triangles: Vec<Triangle>,
    pub background: TermColor,
}

/// Camera pose and field of view.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde-all", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub location: Vector3,
    /// Rotation in degrees: yaw about the vertical axis in `.z`, pitch in
    /// `.y`. The `.x` component is unused. Yaw may be any angle and is
    /// wrapped; pitch within 90 degrees of level is assumed.
    pub rotation: Vector3,
    /// Horizontal field of view in degrees.
    pub fov_horizontal: f32,
    /// Vertical field of view in degrees.
    pub fov_vertical: f32,
}

#[derive(Debug, Clone)]
struct VisibleTriangle {
    /// Vertex offsets from the camera location.
    deltas: [Vector3; 3],
    color: TermColor,
    /// Squared camera-to-centroid distance, the depth sort key.
    distance_sq: f32,
}

/// Immediate mode renderer.
///
/// Holds the per-frame working list of visible triangles so repeated frames
/// reuse one allocation. The typical loop renders with
/// [`Renderer::render_frame`] and then hands the framebuffer to
/// [`display_frame`].
#[derive(Debug, Default)]
pub struct Renderer {
    visible: Vec<VisibleTriangle>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders one frame of the world into the framebuffer.
    ///
    /// The framebuffer is fully cleared to the world background first, then
    /// every triangle with at least one vertex strictly in front of the
    /// camera is projected and painted, farthest first. The world and camera
    /// are never modified.
    pub fn render_frame(&mut self, world: &World, camera: &Camera, frame: &mut Framebuffer) {
        let projection = Projection::new(camera, frame.width(), frame.height());
        let forward = projection.forward();

        frame.clear(world.background);

        self.visible.clear();
        for triangle in &world.triangles {
            let deltas = [
                triangle.p1 - camera.location,
                triangle.p2 - camera.location,
                triangle.p3 - camera.location,
            ];

            // No partial clipping: one vertex in front keeps the whole
            // triangle, all three behind drops it.
            if deltas.iter().all(|d| d.dot(&forward) <= 0.0) {
                continue;
            }

            let centroid = (triangle.p1 + triangle.p2 + triangle.p3) / 3.0;
            self.visible.push(VisibleTriangle {
                deltas,
                color: triangle.color,
                distance_sq: (centroid - camera.location).norm_squared(),
            });
        }

        // Painter's order: farthest first, nearer triangles overwrite. The
        // sort is stable, so equally distant triangles keep world order.
        self.visible.sort_by(|a, b| {
            b.distance_sq
                .partial_cmp(&a.distance_sq)
                .unwrap_or(Ordering::Equal)
        });

        log::debug!(
            "rendering {} of {} triangles",
            self.visible.len(),
            world.triangles.len()
        );

        for triangle in &self.visible {
            let points = triangle.deltas.map(|d| projection.to_screen(d));
            raster::fill_triangle(frame, points, triangle.color);
        }
    }
}
