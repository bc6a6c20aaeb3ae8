use winit::{dpi::PhysicalSize, event::WindowEvent};

use super::pointer_rig::PointerSample;

/// Tracks the cursor and exposes it as a normalized [`PointerSample`]
///
/// The sample is centred on the window with +x to the right and +y up. Leaving the
/// window keeps the last sample, so the camera stays where the pointer left it.
pub struct PointerTracker {
    size: PhysicalSize<u32>,
    sample: PointerSample,
}

impl PointerTracker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: PhysicalSize::new(width, height),
            sample: PointerSample::CENTER,
        }
    }

    /// Feeds a window event; returns true if the sample changed
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => self.set_cursor(position.x, position.y),
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
                false
            }
            _ => false,
        }
    }

    /// Updates the sample from a cursor position in physical pixels
    pub fn set_cursor(&mut self, x: f64, y: f64) -> bool {
        if self.size.width == 0 || self.size.height == 0 {
            return false;
        }

        let sample = PointerSample::new(
            (x / self.size.width as f64 * 2.0 - 1.0) as f32,
            -(y / self.size.height as f64 * 2.0 - 1.0) as f32,
        );
        let changed = sample != self.sample;
        self.sample = sample;
        changed
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = PhysicalSize::new(width, height);
    }

    pub fn sample(&self) -> PointerSample {
        self.sample
    }
}
