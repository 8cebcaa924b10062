use rand::rngs::StdRng;
use strum::Display;
use tracing::{debug, info};

use crate::{
    constants::game,
    pages::game::{
        bird::Bird,
        clock::Clock,
        pipe::{random_gap, Pipe},
        surface::{ShapeId, Surface},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionState {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Collision {
    Pipe,
    Ground,
    Ceiling,
}

/// Receives the end of every session.
pub trait SessionListener {
    fn notify_game_over(&mut self, score: u32);
}

/// One bird, a fixed ring of pipes and the score, drawn on a [`Surface`].
pub struct Game<S: Surface> {
    surface: S,
    clock: Box<dyn Clock>,
    rng: StdRng,
    bird: Bird,
    pipes: Vec<Pipe>,
    score: u32,
    score_text: ShapeId,
    state: SessionState,
    listener: Option<Box<dyn SessionListener>>,
}

impl<S: Surface> Game<S> {
    pub fn new(mut surface: S, clock: Box<dyn Clock>, mut rng: StdRng) -> Self {
        let now = clock.now();
        let score_text =
            surface.create_text(game::CANVAS_WIDTH / 2.0, game::CANVAS_HEIGHT / 2.0, "0", game::SCORE_COLOR);
        let bird = Bird::new(&mut surface, game::BIRD_X, now);
        let pipes = (0..game::PIPE_COUNT)
            .map(|index| {
                let gap_position = random_gap(&mut rng);
                Pipe::new(&mut surface, gap_position, game::pipe_slot(index), now)
            })
            .collect();

        Game {
            surface,
            clock,
            rng,
            bird,
            pipes,
            score: 0,
            score_text,
            state: SessionState::Stopped,
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn SessionListener>) {
        self.listener = Some(listener);
    }

    /// Resets everything to the opening layout and starts a session.
    pub fn start(&mut self) {
        let now = self.clock.now();

        self.score = 0;
        self.surface.set_text(self.score_text, &self.score.to_string());
        self.bird.reset(&mut self.surface, now);
        for (index, pipe) in self.pipes.iter_mut().enumerate() {
            let gap_position = random_gap(&mut self.rng);
            pipe.reset(gap_position, game::pipe_slot(index), &mut self.surface, now);
        }
        self.state = SessionState::Running;

        info!("Session started");
    }

    /// One simulation step. Does nothing while stopped.
    pub fn tick(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        let now = self.clock.now();

        self.bird.update(now, &mut self.surface);
        if let Some(collision) = self.check_collision() {
            info!("Session ended by {collision} collision with score {}", self.score);
            self.end();
            return;
        }

        let bird_x = self.bird.x();
        for index in 0..self.pipes.len() {
            let pipe = &mut self.pipes[index];
            pipe.update(now, &mut self.surface);
            if pipe.check_score(bird_x) {
                self.add_score();
            }
        }
        // Recycle after every pipe has moved so the spacing stays exact.
        for index in 0..self.pipes.len() {
            let rightmost_x = self.rightmost_pipe_x();
            self.pipes[index].check_recycle(rightmost_x, &mut self.rng, &mut self.surface);
        }
    }

    /// Continues after a pause without counting the paused time.
    pub fn resume(&mut self) {
        let now = self.clock.now();
        self.bird.rebase(now);
        for pipe in self.pipes.iter_mut() {
            pipe.rebase(now);
        }
        debug!("Session clocks rebased");
    }

    /// Flap, whatever the input was.
    pub fn activate(&mut self) {
        self.bird.flap();
    }

    pub fn add_score(&mut self) {
        self.score += 1;
        self.surface.set_text(self.score_text, &self.score.to_string());
        debug!("Score {}", self.score);
    }

    pub fn end(&mut self) {
        self.state = SessionState::Stopped;
        if let Some(listener) = self.listener.as_mut() {
            listener.notify_game_over(self.score);
        }
    }

    /// Pipes first, then the ground, then the ceiling.
    pub fn check_collision(&self) -> Option<Collision> {
        let bounds = self.surface.coords(self.bird.shape()).unwrap_or_else(|| self.bird.bounding_box());
        if self.pipes.iter().any(|pipe| pipe.collides_with(&bounds, &self.surface)) {
            Some(Collision::Pipe)
        } else if bounds.bottom >= game::CANVAS_HEIGHT {
            Some(Collision::Ground)
        } else if bounds.bottom <= self.bird.height() {
            // Bottom within one body height of the top, i.e. the top edge reached the ceiling.
            Some(Collision::Ceiling)
        } else {
            None
        }
    }

    fn rightmost_pipe_x(&self) -> f32 {
        self.pipes.iter().map(Pipe::x).fold(f32::MIN, f32::max)
    }

    #[cfg(test)]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    #[cfg(test)]
    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    #[cfg(test)]
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
