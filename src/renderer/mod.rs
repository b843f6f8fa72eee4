//! Frame rendering
//!
//! One pass per tick in a fixed order: clear, draw every live entity from
//! the lowest layer up, present.

use crate::platform::{Display, SurfaceHandle};
use crate::sim::draw::colors;
use crate::sim::{Shape, World};

/// Draw the world onto `surface` and present it
pub fn render_frame<D: Display>(display: &mut D, surface: SurfaceHandle, world: &World) {
    display.clear(surface, colors::BACKGROUND);
    for command in world.render_intents() {
        match command.shape {
            Shape::Rect => display.draw_rect(surface, &command.rect, command.color),
            Shape::Ellipse => display.draw_ellipse(surface, &command.rect, command.color),
        }
    }
    display.present(surface);
}
