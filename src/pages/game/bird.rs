use std::time::Instant;

use crate::{
    constants::game,
    pages::game::{
        clock::delta_time,
        surface::{Bounds, ShapeId, Surface},
    },
};

#[derive(Debug)]
pub struct Bird {
    width: f32,
    height: f32,
    x: f32,
    y: f32,
    velocity: f32,
    acceleration: f32,
    terminal_velocity: f32,
    flap_velocity: f32,
    shape: ShapeId,
    last_time: Instant,
}

impl Bird {
    pub fn new<S: Surface>(surface: &mut S, x: f32, now: Instant) -> Self {
        let y = Self::start_y();
        let shape = surface.create_rect(
            Bounds::new(x, y, x + game::BIRD_WIDTH, y + game::BIRD_HEIGHT),
            game::BIRD_COLOR,
        );
        Bird {
            width: game::BIRD_WIDTH,
            height: game::BIRD_HEIGHT,
            x,
            y,
            velocity: 0.0,
            acceleration: game::BIRD_ACCELERATION,
            terminal_velocity: game::BIRD_TERMINAL_VELOCITY,
            flap_velocity: game::BIRD_FLAP_VELOCITY,
            shape,
            last_time: now,
        }
    }

    /// Top edge that centers the bird vertically on the canvas.
    fn start_y() -> f32 {
        game::CANVAS_HEIGHT / 2.0 - game::BIRD_HEIGHT / 2.0
    }

    /// Moves by the current velocity, then lets gravity act on it.
    pub fn integrate<S: Surface>(&mut self, dt: f32, surface: &mut S) {
        let dy = self.velocity * dt;
        self.y += dy;
        surface.move_shape(self.shape, 0.0, dy);

        self.velocity = (self.velocity - self.acceleration * dt).max(self.terminal_velocity);
    }

    pub fn update<S: Surface>(&mut self, now: Instant, surface: &mut S) {
        let dt = delta_time(self.last_time, now);
        self.last_time = now;
        self.integrate(dt, surface);
    }

    /// Measures the next update from `now`, dropping any time spent paused.
    pub fn rebase(&mut self, now: Instant) {
        self.last_time = now;
    }

    pub fn flap(&mut self) {
        self.velocity = self.flap_velocity;
    }

    pub fn bounding_box(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn reset<S: Surface>(&mut self, surface: &mut S, now: Instant) {
        self.last_time = now;
        self.velocity = 0.0;
        self.y = Self::start_y();

        surface.delete(self.shape);
        self.shape = surface.create_rect(self.bounding_box(), game::BIRD_COLOR);
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    #[cfg(test)]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    #[cfg(test)]
    pub fn set_top<S: Surface>(&mut self, y: f32, surface: &mut S) {
        surface.move_shape(self.shape, 0.0, y - self.y);
        self.y = y;
    }
}
