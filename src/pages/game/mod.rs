mod bird;
pub mod clock;
mod pipe;
mod simulation;
pub mod surface;

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{layout::Rect, widgets::Clear, Frame};
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use super::{Page, PageId};
use crate::{
    action::{act, Action, Command, GameAction},
    components::canvas::CanvasView,
    pages::game::{
        clock::{Clock, SystemClock},
        simulation::{Game, SessionListener},
        surface::Canvas,
    },
};

/// Forwards the end of a session onto the action bus.
struct ActionNotifier(UnboundedSender<Action>);

impl SessionListener for ActionNotifier {
    fn notify_game_over(&mut self, score: u32) {
        if let Err(e) = self.0.send(act!(Command::GameOver(score))) {
            error!("Failed to report game over: {e}");
        }
    }
}

pub struct GamePage {
    game: Game<Canvas>,
}

impl GamePage {
    /// Pipe gaps are drawn from `seed` when given, so runs can be replayed.
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_clock(seed, Box::new(SystemClock))
    }

    pub fn with_clock(seed: Option<u64>, clock: Box<dyn Clock>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GamePage { game: Game::new(Canvas::new(), clock, rng) }
    }

    pub fn game(&self) -> &Game<Canvas> {
        &self.game
    }
}

fn flap() -> Option<Action> {
    Some(act!(Command::Game(GameAction::Flap)))
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.game.set_listener(Box::new(ActionNotifier(tx)));
        Ok(())
    }

    // Every key press flaps.
    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(if key.kind == KeyEventKind::Press { flap() } else { None })
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(if let MouseEventKind::Down(_) = mouse.kind { flap() } else { None })
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::StartGame => self.game.start(),
            Command::Tick => self.game.tick(),
            Command::Game(GameAction::Flap) => self.game.activate(),
            // Time spent suspended or behind the help overlay does not count.
            Command::Resume | Command::ToggleShowHelp => self.game.resume(),
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        f.render_widget(Clear, rect);
        f.render_widget(CanvasView::new(self.game().surface()), rect);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton};
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;
    use crate::pages::game::{clock::testing::ManualClock, simulation::SessionState};

    #[test]
    fn test_any_press_flaps() {
        let mut page = GamePage::new(Some(1));
        assert_eq!(page.handle_key_events(KeyEvent::from(KeyCode::Char('x'))).unwrap(), flap());
        assert_eq!(page.handle_key_events(KeyEvent::from(KeyCode::Enter)).unwrap(), flap());

        let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(page.handle_key_events(release).unwrap(), None);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(page.handle_mouse_events(click).unwrap(), flap());
        let moved = MouseEvent { kind: MouseEventKind::Moved, ..click };
        assert_eq!(page.handle_mouse_events(moved).unwrap(), None);
    }

    #[test]
    fn test_start_and_flap() {
        let mut page = GamePage::new(Some(1));
        page.update(act!(Command::StartGame)).unwrap();
        assert_eq!(page.game().state(), SessionState::Running);

        page.update(flap().unwrap()).unwrap();
        assert_eq!(page.game().bird().velocity(), -300.0);
    }

    #[test]
    fn test_game_over_sent_on_bus() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let clock = ManualClock::new();
        let mut page = GamePage::with_clock(Some(1), Box::new(clock.clone()));
        page.register_action_handler(tx).unwrap();
        page.update(act!(Command::StartGame)).unwrap();

        // The bird falls to the ground well before the first pipe arrives.
        for _ in 0..200 {
            clock.advance(0.01);
            page.update(act!(Command::Tick)).unwrap();
        }

        assert!(!page.game().is_running());
        assert_eq!(rx.try_recv().ok(), Some(act!(Command::GameOver(0))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_resume_does_not_count_paused_time() {
        let clock = ManualClock::new();
        let mut page = GamePage::with_clock(Some(1), Box::new(clock.clone()));
        page.update(act!(Command::StartGame)).unwrap();

        clock.advance(30.0);
        page.update(act!(Command::Resume)).unwrap();
        page.update(act!(Command::Tick)).unwrap();
        assert!(page.game().is_running());
        assert_eq!(page.game().bird().bounding_box().top, 185.0);

        clock.advance(30.0);
        page.update(act!(Command::ToggleShowHelp)).unwrap();
        page.update(act!(Command::Tick)).unwrap();
        assert!(page.game().is_running());
    }
}
