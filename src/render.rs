use crate::items::Color;

/// Draw target for the frame pass. Drawing must not touch simulation state.
pub trait Renderer {
    /// Draws a filled disc.
    fn draw_particle(&mut self, position: [f64; 2], radius: f64, color: Color);
}
