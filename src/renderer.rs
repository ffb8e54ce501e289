mod egui_pass;
mod window_surface;

pub use window_surface::{SurfaceFrame, WindowSurface};

use anyhow::Result;
use egui_wgpu::{Renderer as EguiRenderer, ScreenDescriptor};

pub(crate) const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.05, g: 0.06, b: 0.1, a: 1.0 };

/// Clears the frame and paints the tessellated overlay on top.
pub fn render_overlay(
    surface: &WindowSurface,
    painter: &mut EguiRenderer,
    paint_jobs: &[egui::ClippedPrimitive],
    screen: &ScreenDescriptor,
    frame: SurfaceFrame,
) -> Result<()> {
    let (device, queue) = surface.device_and_queue()?;
    egui_pass::render(device, queue, painter, paint_jobs, screen, frame)
}
