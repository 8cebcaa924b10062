use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Margin},
    prelude::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
    action::{act, Action, Command},
    components::help::Help,
    config::Config,
    constants::{HEIGHT, WIDTH},
    pages::{game::GamePage, home::HomePageBuilder, over::OverPageBuilder, Page, PageId},
    tui,
};

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    show_help: bool,
    pages: Vec<Box<dyn Page>>,
    active_page: PageId,
}

impl App {
    pub fn new(tick_rate: f64, frame_rate: f64, seed: Option<u64>) -> Result<Self> {
        let config = Config::new()?;
        Self::with_config(config, tick_rate, frame_rate, seed)
    }

    fn with_config(config: Config, tick_rate: f64, frame_rate: f64, seed: Option<u64>) -> Result<Self> {
        let home_page = HomePageBuilder::default().build()?;
        let game_page = GamePage::new(seed);
        let over_page = OverPageBuilder::default().build()?;

        Ok(Self {
            tick_rate,
            frame_rate,
            should_quit: false,
            should_suspend: false,
            show_help: false,
            config,
            pages: vec![Box::new(home_page), Box::new(game_page), Box::new(over_page)],
            active_page: PageId::Home,
        })
    }

    fn get_active_page(&mut self) -> Result<&mut Box<dyn Page>> {
        let id = self.active_page;
        self.pages
            .iter_mut()
            .find(|page| page.id() == id)
            .ok_or_else(|| color_eyre::eyre::eyre!("No page registered for {id}"))
    }

    /// Page a session transition leads to, if `command` is one.
    fn route(command: &Command) -> Option<PageId> {
        match command {
            Command::StartGame => Some(PageId::Game),
            Command::GameOver(_) => Some(PageId::Over),
            Command::ShowHome => Some(PageId::Home),
            _ => None,
        }
    }

    /// Global bindings win over the active page's.
    fn lookup_key(&self, key: &KeyEvent) -> Option<Action> {
        let page_keymap = self.config.keybindings.pages.get(&self.active_page);
        self.config
            .keybindings
            .global
            .lookup(key)
            .or_else(|| page_keymap.and_then(|keymap| keymap.lookup(key)))
            .cloned()
    }

    fn new_tui(&self) -> Result<tui::Tui> {
        let mut tui = tui::Tui::new()?;
        tui.tick_rate(self.tick_rate);
        tui.frame_rate(self.frame_rate);
        tui.mouse(true);
        Ok(tui)
    }

    fn register_pages(&mut self, action_tx: &UnboundedSender<Action>) -> Result<()> {
        for page in self.pages.iter_mut() {
            page.register_action_handler(action_tx.clone())?;
            page.init()?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: tui::Event, action_tx: &UnboundedSender<Action>) -> Result<()> {
        match &event {
            tui::Event::Error => error!("Failed to read terminal input"),
            tui::Event::Tick => action_tx.send(act!(Command::Tick))?,
            tui::Event::Render => action_tx.send(act!(Command::Render))?,
            tui::Event::Resize(x, y) => action_tx.send(act!(Command::Resize(*x, *y)))?,
            tui::Event::Key(key) => {
                // A bound key is consumed by its binding and never reaches the page.
                if let Some(action) = self.lookup_key(key) {
                    debug!("Got action: {action:?}");
                    action_tx.send(action)?;
                    return Ok(());
                }
            },
            tui::Event::Mouse(_) => {},
        }
        if !self.show_help {
            if let Some(action) = self.get_active_page()?.handle_events(Some(event))? {
                action_tx.send(action)?;
            }
        }
        Ok(())
    }

    /// Applies app-level effects of `action`, then hands it to the active page.
    fn dispatch(&mut self, action: Action, action_tx: &UnboundedSender<Action>) -> Result<()> {
        match &action.command {
            Command::Tick | Command::Render => {},
            command => debug!("{command:?}"),
        }
        match &action.command {
            Command::Quit => self.should_quit = true,
            Command::Suspend => self.should_suspend = true,
            Command::Resume => self.should_suspend = false,
            Command::ToggleShowHelp => self.show_help = !self.show_help,
            Command::Error(message) => error!("{message}"),
            command => {
                if let Some(page) = Self::route(command) {
                    info!("Switching to {page} page");
                    self.active_page = page;
                    self.show_help = false;
                }
            },
        }
        // The overlay pauses the page underneath.
        if self.show_help && action.command == Command::Tick {
            return Ok(());
        }
        if let Some(action) = self.get_active_page()?.update(action)? {
            action_tx.send(action)?
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = self.new_tui()?;
        tui.enter()?;

        self.register_pages(&action_tx)?;

        loop {
            if let Some(e) = tui.next().await {
                self.handle_event(e, &action_tx)?;
            }

            while let Ok(action) = action_rx.try_recv() {
                match action.command {
                    Command::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.render(&mut tui, &action_tx)?;
                    },
                    Command::Render => self.render(&mut tui, &action_tx)?,
                    _ => {},
                }
                self.dispatch(action, &action_tx)?;
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(act!(Command::Resume))?;
                tui.resume()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        let active_page = self.active_page;
        let help = self.show_help.then(|| self.help());
        tui.draw(|f| {
            let area = f.area();

            let [_, area, _] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(HEIGHT), Constraint::Fill(1)]).areas(area);
            let [_, area, _] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(WIDTH), Constraint::Fill(1)]).areas(area);

            let border = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(Color::Black));
            f.render_widget(border, area);

            let area = area.inner(Margin { horizontal: 1, vertical: 1 });

            if let Some(page) = self.pages.iter_mut().find(|page| page.id() == active_page) {
                if let Err(e) = page.draw(f, area) {
                    report_draw_error(action_tx, e);
                }
            }

            if let Some(help) = help {
                f.render_widget(help, area);
            }
        })?;

        Ok(())
    }

    fn help(&self) -> Help {
        let page_keymap = self.config.keybindings.pages.get(&self.active_page).cloned().unwrap_or_default();
        Help::new(vec![
            ("System".to_string(), self.config.keybindings.global.clone()),
            (self.active_page.to_string(), page_keymap),
        ])
    }
}

fn report_draw_error(action_tx: &UnboundedSender<Action>, e: color_eyre::eyre::Report) {
    if action_tx.send(act!(Command::Error(format!("Failed to draw: {e:?}")))).is_err() {
        error!("Failed to draw: {e:?}");
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::action::{HomeAction, OverAction};

    fn app() -> App {
        App::with_config(Config::embedded().unwrap(), 100.0, 60.0, Some(7)).unwrap()
    }

    fn drain(app: &mut App, tx: &UnboundedSender<Action>, rx: &mut mpsc::UnboundedReceiver<Action>) {
        while let Ok(action) = rx.try_recv() {
            app.dispatch(action, tx).unwrap();
        }
    }

    #[test]
    fn test_route() {
        assert_eq!(App::route(&Command::StartGame), Some(PageId::Game));
        assert_eq!(App::route(&Command::GameOver(3)), Some(PageId::Over));
        assert_eq!(App::route(&Command::ShowHome), Some(PageId::Home));
        assert_eq!(App::route(&Command::Tick), None);
    }

    #[test]
    fn test_menu_flow() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app();
        app.register_pages(&tx).unwrap();

        tx.send(act!(Command::Home(HomeAction::Select))).unwrap();
        drain(&mut app, &tx, &mut rx);
        assert_eq!(app.active_page, PageId::Game);

        tx.send(act!(Command::GameOver(4))).unwrap();
        drain(&mut app, &tx, &mut rx);
        assert_eq!(app.active_page, PageId::Over);

        tx.send(act!(Command::Over(OverAction::Down))).unwrap();
        tx.send(act!(Command::Over(OverAction::Select))).unwrap();
        drain(&mut app, &tx, &mut rx);
        assert_eq!(app.active_page, PageId::Home);

        tx.send(act!(Command::Home(HomeAction::Down))).unwrap();
        tx.send(act!(Command::Home(HomeAction::Select))).unwrap();
        drain(&mut app, &tx, &mut rx);
        assert!(app.should_quit);
    }

    #[test]
    fn test_global_keys_win() {
        let app = app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.lookup_key(&ctrl_c), Some(act!(Command::Quit)));
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(app.lookup_key(&question), Some(act!(Command::ToggleShowHelp)));
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.lookup_key(&enter), Some(act!(Command::Home(HomeAction::Select))));
    }

    #[test]
    fn test_help_blocks_page_input() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app();
        app.register_pages(&tx).unwrap();
        app.active_page = PageId::Game;

        app.dispatch(act!(Command::ToggleShowHelp), &tx).unwrap();
        app.handle_event(tui::Event::Key(KeyEvent::from(KeyCode::Char('x'))), &tx).unwrap();
        assert!(rx.try_recv().is_err());

        app.dispatch(act!(Command::ToggleShowHelp), &tx).unwrap();
        app.handle_event(tui::Event::Key(KeyEvent::from(KeyCode::Char('x'))), &tx).unwrap();
        assert_eq!(rx.try_recv().ok(), Some(act!(Command::Game(crate::action::GameAction::Flap))));
    }

    #[test]
    fn test_flap_key_keeps_game_over_on_screen() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app();
        app.register_pages(&tx).unwrap();

        tx.send(act!(Command::StartGame)).unwrap();
        tx.send(act!(Command::GameOver(5))).unwrap();
        drain(&mut app, &tx, &mut rx);
        assert_eq!(app.active_page, PageId::Over);

        app.handle_event(tui::Event::Key(KeyEvent::from(KeyCode::Char(' '))), &tx).unwrap();
        drain(&mut app, &tx, &mut rx);
        assert_eq!(app.active_page, PageId::Over);

        app.handle_event(tui::Event::Key(KeyEvent::from(KeyCode::Enter)), &tx).unwrap();
        drain(&mut app, &tx, &mut rx);
        assert_eq!(app.active_page, PageId::Game);
    }

    #[test]
    fn test_bound_key_does_not_reach_page() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app();
        app.register_pages(&tx).unwrap();
        app.active_page = PageId::Game;

        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        app.handle_event(tui::Event::Key(question), &tx).unwrap();
        assert_eq!(rx.try_recv().ok(), Some(act!(Command::ToggleShowHelp)));
        assert!(rx.try_recv().is_err());
    }
}
