use std::time::Instant;

use rand::Rng;
use tracing::trace;

use crate::{
    constants::game,
    pages::game::{
        clock::delta_time,
        surface::{Bounds, ShapeId, Surface},
    },
};

/// Draws a gap position uniformly from the closed gap range.
pub fn random_gap<R: Rng>(rng: &mut R) -> u16 {
    rng.gen_range(game::GAP_MIN..=game::GAP_MAX)
}

/// A top and a bottom segment with an opening between them.
///
/// `gap_position` is the height of the opening's lower edge above the canvas bottom.
#[derive(Debug)]
pub struct Pipe {
    width: f32,
    velocity: f32,
    x: f32,
    gap_position: u16,
    scored: bool,
    top: ShapeId,
    bottom: ShapeId,
    last_time: Instant,
}

impl Pipe {
    pub fn new<S: Surface>(surface: &mut S, gap_position: u16, x: f32, now: Instant) -> Self {
        let (top, bottom) = Self::segments(x, gap_position);
        let bottom = surface.create_rect(bottom, game::PIPE_COLOR);
        let top = surface.create_rect(top, game::PIPE_COLOR);
        Pipe {
            width: game::PIPE_WIDTH,
            velocity: game::PIPE_VELOCITY,
            x,
            gap_position,
            scored: false,
            top,
            bottom,
            last_time: now,
        }
    }

    /// Top and bottom segment rectangles for a pipe whose left edge is at `x`.
    pub fn segments(x: f32, gap_position: u16) -> (Bounds, Bounds) {
        let gap_top = game::CANVAS_HEIGHT - gap_position as f32;
        let top = Bounds::new(x, 0.0, x + game::PIPE_WIDTH, gap_top);
        let bottom = Bounds::new(x, gap_top + game::PIPE_GAP_LENGTH, x + game::PIPE_WIDTH, game::CANVAS_HEIGHT);
        (top, bottom)
    }

    pub fn advance<S: Surface>(&mut self, dt: f32, surface: &mut S) {
        let dx = -self.velocity * dt;
        self.x += dx;
        surface.move_shape(self.bottom, dx, 0.0);
        surface.move_shape(self.top, dx, 0.0);
    }

    pub fn update<S: Surface>(&mut self, now: Instant, surface: &mut S) {
        let dt = delta_time(self.last_time, now);
        self.last_time = now;
        self.advance(dt, surface);
    }

    pub fn rebase(&mut self, now: Instant) {
        self.last_time = now;
    }

    /// True the first time the pipe's edge has moved past `actor_x` since it last spawned.
    pub fn check_score(&mut self, actor_x: f32) -> bool {
        if self.x < actor_x && !self.scored {
            self.scored = true;
            return true;
        }
        false
    }

    /// Respawns the pipe one spacing behind `rightmost_x` once it has fully left the canvas.
    pub fn check_recycle<S: Surface, R: Rng>(&mut self, rightmost_x: f32, rng: &mut R, surface: &mut S) -> bool {
        if self.x >= -self.width {
            return false;
        }

        self.gap_position = random_gap(rng);
        self.x = rightmost_x + game::GAP_BETWEEN_PIPES;
        self.scored = false;
        self.redraw(surface);
        trace!(x = self.x, gap_position = self.gap_position, "pipe recycled");
        true
    }

    pub fn reset<S: Surface>(&mut self, gap_position: u16, x: f32, surface: &mut S, now: Instant) {
        self.scored = false;
        self.gap_position = gap_position;
        self.x = x;
        self.last_time = now;
        self.redraw(surface);
    }

    fn redraw<S: Surface>(&mut self, surface: &mut S) {
        surface.delete(self.bottom);
        surface.delete(self.top);

        let (top, bottom) = Self::segments(self.x, self.gap_position);
        self.bottom = surface.create_rect(bottom, game::PIPE_COLOR);
        self.top = surface.create_rect(top, game::PIPE_COLOR);
    }

    pub fn collides_with<S: Surface>(&self, bounds: &Bounds, surface: &S) -> bool {
        let hits = surface.overlapping(*bounds);
        hits.contains(&self.top) || hits.contains(&self.bottom)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    #[cfg(test)]
    pub fn gap_position(&self) -> u16 {
        self.gap_position
    }

    #[cfg(test)]
    pub fn scored(&self) -> bool {
        self.scored
    }

    #[cfg(test)]
    pub fn shapes(&self) -> (ShapeId, ShapeId) {
        (self.top, self.bottom)
    }
}
