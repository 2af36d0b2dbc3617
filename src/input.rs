//! Pointer input for the orbit camera and the repulsion pointer.
//!
//! `PointerInput` folds raw winit events into per-frame state: the cursor
//! position (pixels and NDC), the drag delta while the orbit button is held,
//! and the scroll delta.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::camera::screen_to_ndc;

/// Cursor and button state tracking.
#[derive(Debug, Default)]
pub struct PointerInput {
    position: Vec2,
    ndc: Vec2,
    /// The cursor moved since the last `begin_frame`.
    moved: bool,
    dragging: bool,
    drag_delta: Vec2,
    scroll_delta: f32,
    window_size: Vec2,
}

impl PointerInput {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: Vec2::new(width as f32, height as f32),
            ..Default::default()
        }
    }

    /// Cursor position in physical pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Cursor position in normalized device coordinates (-1 to 1, Y up).
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Cursor movement while dragging, since the last frame.
    pub fn drag_delta(&self) -> Vec2 {
        self.drag_delta
    }

    /// Positive values scroll up/forward.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Clear per-frame state. Call after the frame consumed it.
    pub fn begin_frame(&mut self) {
        self.moved = false;
        self.drag_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = Vec2::new(width as f32, height as f32);
        self.ndc = self.compute_ndc();
    }

    fn compute_ndc(&self) -> Vec2 {
        if self.window_size.x > 0.0 && self.window_size.y > 0.0 {
            screen_to_ndc(self.position, self.window_size)
        } else {
            self.ndc
        }
    }

    /// Move the cursor to `position` (physical pixels).
    pub fn cursor_moved(&mut self, position: Vec2) {
        if self.dragging {
            self.drag_delta += position - self.position;
        }
        self.position = position;
        self.ndc = self.compute_ndc();
        self.moved = true;
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
            }
            WindowEvent::Resized(size) => {
                self.set_window_size(size.width, size.height);
            }
            _ => {}
        }
    }
}
