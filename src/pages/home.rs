use color_eyre::eyre::Result;
use derive_builder::Builder;
use ratatui::{prelude::*, widgets::*};
use tracing::debug;

use super::{Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, HomeAction},
    components::options::OptionList,
    constants::{menu::HOME_OPTIONS, TITLE_TEXT},
};

#[derive(Builder)]
pub struct HomePage {
    #[builder(default)]
    selected_option_index: usize,
}

impl HomePage {
    pub fn selected(&self) -> usize {
        self.selected_option_index
    }

    pub fn up(&mut self) {
        self.selected_option_index = self.selected_option_index.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected_option_index + 1 < HOME_OPTIONS.len() {
            self.selected_option_index += 1;
        }
    }

    /// Command for the highlighted entry.
    fn select(&self) -> Command {
        match self.selected_option_index {
            0 => Command::StartGame,
            _ => Command::Quit,
        }
    }
}

impl Page for HomePage {
    fn id(&self) -> PageId {
        PageId::Home
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::ShowHome => self.selected_option_index = 0,
            Command::Home(_) if action.state == ActionState::End => {},
            Command::Home(HomeAction::Up) => self.up(),
            Command::Home(HomeAction::Down) => self.down(),
            Command::Home(HomeAction::Select) => {
                let command = self.select();
                debug!("Home selected {command}");
                return Ok(Some(act!(command)));
            },
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        f.render_widget(Clear, rect);

        let title_lines: Vec<&str> = TITLE_TEXT.lines().filter(|s| !s.is_empty()).collect();
        let options = OptionList::new(&HOME_OPTIONS, self.selected());

        let [title_area, option_area] =
            Layout::vertical([Constraint::Length(title_lines.len() as u16), Constraint::Length(options.height())])
                .flex(layout::Flex::SpaceAround)
                .areas(rect);

        let lines: Vec<Line> = title_lines.into_iter().map(Line::from).collect();
        let paragraph = Paragraph::new(lines).style(Style::default().fg(Color::Yellow)).alignment(Alignment::Center);
        f.render_widget(paragraph, title_area);
        f.render_widget(options, option_area);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page() -> HomePage {
        HomePageBuilder::default().build().unwrap()
    }

    fn home(state: ActionState, command: HomeAction) -> Action {
        act!(Command::Home(command), state)
    }

    #[test]
    fn test_selection_clamped() {
        let mut page = page();
        page.update(home(ActionState::Start, HomeAction::Up)).unwrap();
        assert_eq!(page.selected(), 0);
        page.update(home(ActionState::Start, HomeAction::Down)).unwrap();
        page.update(home(ActionState::Repeat, HomeAction::Down)).unwrap();
        assert_eq!(page.selected(), 1);
    }

    #[test]
    fn test_release_ignored() {
        let mut page = page();
        page.update(home(ActionState::End, HomeAction::Down)).unwrap();
        assert_eq!(page.selected(), 0);
    }

    #[test]
    fn test_select_emits_command() {
        let mut page = page();
        let action = page.update(home(ActionState::Start, HomeAction::Select)).unwrap();
        assert_eq!(action, Some(act!(Command::StartGame)));

        page.down();
        let action = page.update(home(ActionState::Start, HomeAction::Select)).unwrap();
        assert_eq!(action, Some(act!(Command::Quit)));
    }

    #[test]
    fn test_show_home_resets_selection() {
        let mut page = page();
        page.down();
        page.update(act!(Command::ShowHome)).unwrap();
        assert_eq!(page.selected(), 0);
    }
}
