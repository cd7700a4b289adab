//! Camera orbiting a four-face pyramid, streamed to stdout.
//!
//! Run with `cargo run --example pyramid --features demo-bin`. The terminal
//! plays the role of the serial display device: stdout never reports busy or
//! full, so the encoder's backpressure polls pass straight through.

use std::io::{stdout, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use blockrend::{
    display_frame, Camera, Framebuffer, Renderer, SerialTx, TermColor, Triangle, Vector3, World,
};
use crossterm::{cursor, style, terminal, QueueableCommand};

struct StdoutTx {
    out: Stdout,
}

impl SerialTx for StdoutTx {
    fn is_transmitting(&self) -> bool {
        false
    }

    fn has_space(&self) -> bool {
        true
    }

    fn transmit(&mut self, byte: u8) {
        let _ = self.out.write_all(&[byte]);
    }
}

fn triangle(p1: [f32; 3], p2: [f32; 3], p3: [f32; 3], color: TermColor) -> Triangle {
    Triangle {
        p1: Vector3::from(p1),
        p2: Vector3::from(p2),
        p3: Vector3::from(p3),
        color,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Restore the terminal on ctrl-c instead of dying mid-frame.
    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGTERM, stop.clone())?;
    signal_hook::flag::register(signal_hook::consts::SIGINT, stop.clone())?;

    let mut out = stdout();
    out.queue(cursor::Hide)?;
    out.queue(style::SetBackgroundColor(TermColor::Black.into()))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.flush()?;

    let world = World {
        background: TermColor::Blue,
        triangles: vec![
            triangle([0.0, 0.0, 3.0], [-1.0, -1.0, 0.0], [-1.0, 1.0, 0.0], TermColor::Red),
            triangle([0.0, 0.0, 3.0], [-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], TermColor::Magenta),
            triangle([0.0, 0.0, 3.0], [-1.0, 1.0, 0.0], [1.0, 1.0, 0.0], TermColor::Cyan),
            triangle([0.0, 0.0, 3.0], [1.0, 1.0, 0.0], [1.0, -1.0, 0.0], TermColor::Green),
        ],
    };

    let mut camera = Camera {
        location: Vector3::new(0.0, 0.0, 5.0),
        rotation: Vector3::new(0.0, -50.0, 0.0),
        fov_horizontal: 100.0,
        fov_vertical: 75.0,
    };

    let mut frame = Framebuffer::new(80, 24);
    let mut renderer = Renderer::new();
    let mut port = StdoutTx { out: stdout() };

    log::info!("orbiting {} triangles", world.triangles.len());

    let mut orbit = 180.0f32;
    while !stop.load(Ordering::SeqCst) {
        camera.rotation.z = orbit;
        camera.location.x = 3.0 * -orbit.to_radians().cos();
        camera.location.y = 3.0 * (-orbit).to_radians().sin();

        renderer.render_frame(&world, &camera, &mut frame);
        display_frame(&mut port, &frame);
        port.out.flush()?;

        orbit -= 1.0;
        if orbit < -179.0 {
            orbit = 180.0;
        }
        thread::sleep(Duration::from_millis(33));
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::Show)?;
    out.flush()?;
    println!();

    Ok(())
}
