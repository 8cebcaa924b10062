use ratatui::style::Color;

// Canvas, in logical units. y grows downward.
pub const CANVAS_WIDTH: f32 = 600.0;
pub const CANVAS_HEIGHT: f32 = 400.0;
pub const CANVAS_COLOR: Color = Color::Cyan;

pub const BIRD_X: f32 = 50.0;
pub const BIRD_WIDTH: f32 = 30.0;
pub const BIRD_HEIGHT: f32 = 30.0;
pub const BIRD_ACCELERATION: f32 = -800.0;
pub const BIRD_TERMINAL_VELOCITY: f32 = -1000.0;
pub const BIRD_FLAP_VELOCITY: f32 = -300.0;
pub const BIRD_COLOR: Color = Color::Rgb(0x60, 0x26, 0x1e);

pub const PIPE_COUNT: usize = 4;
pub const PIPE_WIDTH: f32 = 50.0;
pub const PIPE_GAP_LENGTH: f32 = 125.0;
pub const PIPE_VELOCITY: f32 = 125.0;
pub const PIPE_COLOR: Color = Color::Green;
pub const GAP_BETWEEN_PIPES: f32 = 200.0;
pub const GAP_MIN: u16 = 200;
pub const GAP_MAX: u16 = 350;
pub const FIRST_PIPE_X: f32 = 600.0;

pub const SCORE_COLOR: Color = Color::White;

/// Fixed starting x of the pipe in slot `index`.
pub fn pipe_slot(index: usize) -> f32 {
    FIRST_PIPE_X + GAP_BETWEEN_PIPES * index as f32
}
