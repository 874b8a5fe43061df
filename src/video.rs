//! Display backend and frame pacing seams
//!
//! The PPU emits pixels and frame boundaries through the [`Video`] trait and
//! paces itself through [`FramePacer`], so the rendering core never touches
//! a window or a clock directly. Production builds plug in SDL2 and a
//! wall-clock pacer; headless and deterministic test builds use the null
//! implementations.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use log::error;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;

use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Display backend interface.
///
/// The PPU calls `pre_render`/`set_pixel`/`post_render` once per visible
/// scanline and `render_sync` once per frame at vblank start.
pub trait Video {
    fn pre_render(&mut self);
    fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8);
    fn post_render(&mut self);
    fn render_sync(&mut self);
}

/// Frame pacing capability, invoked once per frame at vblank start.
///
/// Pacing only affects real-time behavior, never emulation correctness, so
/// it is injected rather than baked into the tick function.
pub trait FramePacer {
    /// Block until the target frame interval has elapsed
    fn pace(&mut self);
}

/// Discards all output; for headless runs and tests
pub struct NullVideo;

impl Video for NullVideo {
    fn pre_render(&mut self) {}
    fn set_pixel(&mut self, _x: u32, _y: u32, _r: u8, _g: u8, _b: u8) {}
    fn post_render(&mut self) {}
    fn render_sync(&mut self) {}
}

/// Never blocks; for headless runs and tests
pub struct NullPacer;

impl FramePacer for NullPacer {
    fn pace(&mut self) {}
}

/// Wall-clock pacer holding the emulation to a fixed frame interval
pub struct WallClockPacer {
    frame_interval: Duration,
    last_frame: Instant,
}

impl WallClockPacer {
    pub fn new(frame_interval: Duration) -> Self {
        WallClockPacer {
            frame_interval,
            last_frame: Instant::now(),
        }
    }

    /// NTSC frame rate (60Hz)
    pub fn ntsc() -> Self {
        Self::new(Duration::from_nanos(16_666_667))
    }
}

impl FramePacer for WallClockPacer {
    fn pace(&mut self) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.frame_interval {
            std::thread::sleep(self.frame_interval - elapsed);
        }
        self.last_frame = Instant::now();
    }
}

/// SDL2-backed display: pixels accumulate in an RGB24 framebuffer and the
/// whole frame is pushed to a streaming texture at `render_sync`.
pub struct Sdl2Video {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    framebuffer: Vec<u8>,
}

impl Sdl2Video {
    /// Create a window scaled up from the native PPU resolution
    pub fn new(title: &str, scale: u32) -> Result<Self> {
        let sdl_context =
            sdl2::init().map_err(|e| anyhow!("Failed to initialize SDL2: {}", e))?;

        let video_subsystem = sdl_context
            .video()
            .map_err(|e| anyhow!("Failed to initialize SDL2 video subsystem: {}", e))?;

        let window = video_subsystem
            .window(title, SCREEN_WIDTH * scale, SCREEN_HEIGHT * scale)
            .position_centered()
            .build()
            .map_err(|e| anyhow!("Failed to create window: {}", e))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| anyhow!("Failed to create canvas: {}", e))?;

        let event_pump = sdl_context
            .event_pump()
            .map_err(|e| anyhow!("Failed to get event pump: {}", e))?;

        Ok(Sdl2Video {
            canvas,
            event_pump,
            framebuffer: vec![0; (SCREEN_WIDTH * SCREEN_HEIGHT * 3) as usize],
        })
    }
}

impl Video for Sdl2Video {
    fn pre_render(&mut self) {}

    fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return;
        }
        let index = ((y * SCREEN_WIDTH + x) * 3) as usize;
        self.framebuffer[index] = r;
        self.framebuffer[index + 1] = g;
        self.framebuffer[index + 2] = b;
    }

    fn post_render(&mut self) {}

    fn render_sync(&mut self) {
        // Keep the window responsive; input itself is not our concern
        for _event in self.event_pump.poll_iter() {}

        let texture_creator = self.canvas.texture_creator();
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, SCREEN_WIDTH, SCREEN_HEIGHT)
            .with_context(|| "Failed to create texture");

        let mut texture = match texture {
            Ok(texture) => texture,
            Err(e) => {
                error!("Dropping frame: {e}");
                return;
            }
        };

        if let Err(e) = texture.update(None, &self.framebuffer, SCREEN_WIDTH as usize * 3) {
            error!("Dropping frame: {e}");
            return;
        }

        self.canvas.clear();
        if let Err(e) = self.canvas.copy(&texture, None, None) {
            error!("Dropping frame: {e}");
            return;
        }
        self.canvas.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_pacer_blocks_to_the_frame_interval() {
        let mut pacer = WallClockPacer::new(Duration::from_millis(5));
        let start = Instant::now();
        pacer.pace();
        pacer.pace();
        // Two frames must take at least one full interval from construction
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
