use color_eyre::eyre::Result;
use derive_builder::Builder;
use ratatui::{prelude::*, widgets::*};

use super::{Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, OverAction},
    components::options::OptionList,
    constants::{menu::OVER_OPTIONS, GAME_OVER_TEXT},
};

/// Shown after a session ends, with the final score.
#[derive(Builder)]
pub struct OverPage {
    #[builder(default)]
    score: u32,
    #[builder(default)]
    selected_option_index: usize,
}

impl OverPage {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected(&self) -> usize {
        self.selected_option_index
    }

    pub fn up(&mut self) {
        self.selected_option_index = self.selected_option_index.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected_option_index + 1 < OVER_OPTIONS.len() {
            self.selected_option_index += 1;
        }
    }

    fn select(&self) -> Command {
        match self.selected_option_index {
            0 => Command::StartGame,
            _ => Command::ShowHome,
        }
    }
}

impl Page for OverPage {
    fn id(&self) -> PageId {
        PageId::Over
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::GameOver(score) => {
                self.score = score;
                self.selected_option_index = 0;
            },
            Command::Over(_) if action.state == ActionState::End => {},
            Command::Over(OverAction::Up) => self.up(),
            Command::Over(OverAction::Down) => self.down(),
            Command::Over(OverAction::Select) => return Ok(Some(act!(self.select()))),
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        f.render_widget(Clear, rect);

        let title_lines: Vec<&str> = GAME_OVER_TEXT.lines().filter(|s| !s.is_empty()).collect();
        let options = OptionList::new(&OVER_OPTIONS, self.selected());

        let [title_area, score_area, option_area] = Layout::vertical([
            Constraint::Length(title_lines.len() as u16),
            Constraint::Length(1),
            Constraint::Length(options.height()),
        ])
        .flex(layout::Flex::SpaceAround)
        .areas(rect);

        let lines: Vec<Line> = title_lines.into_iter().map(Line::from).collect();
        f.render_widget(
            Paragraph::new(lines).style(Style::default().fg(Color::Red)).alignment(Alignment::Center),
            title_area,
        );
        f.render_widget(
            Paragraph::new(format!("Score: {}", self.score())).bold().alignment(Alignment::Center),
            score_area,
        );
        f.render_widget(options, option_area);

        Ok(())
    }
}
