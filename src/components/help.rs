use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Padding, Row, Table, Widget},
};

use crate::{
    action::ActionState,
    config::{key_event_to_string, PageKeyBindings},
};

const COLUMN_SPACING: u16 = 5;
const MARGIN_VERTICAL: u16 = 1;
const MARGIN_HORIZONTAL: u16 = 2;

/// Overlay listing key bindings, one bordered table per group.
#[derive(Debug)]
pub struct Help {
    groups: Vec<(String, Vec<(String, String)>)>,
}

impl Help {
    /// Hold bindings are listed once, under their press event.
    pub fn new(groups: Vec<(String, PageKeyBindings)>) -> Self {
        let groups = groups
            .into_iter()
            .map(|(name, keybindings)| {
                let mut rows: Vec<(String, String)> = keybindings
                    .0
                    .into_iter()
                    .filter(|(_, action)| action.state == ActionState::Start)
                    .map(|(event, action)| (key_event_to_string(&event), action.command.string()))
                    .collect();
                rows.sort();
                (name, rows)
            })
            .filter(|(_, rows)| !rows.is_empty())
            .collect();

        Self { groups }
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(String, Vec<(String, String)>)] {
        &self.groups
    }

    fn column_widths(&self) -> (u16, u16) {
        let rows = self.groups.iter().flat_map(|(_, rows)| rows.iter());
        rows.fold((3, 7), |(key, command), (k, c)| (key.max(k.len() as u16), command.max(c.len() as u16)))
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (key_width, command_width) = self.column_widths();
        // columns, spacing, padding and border
        let width = key_width + command_width + COLUMN_SPACING + MARGIN_HORIZONTAL * 2 + 2;
        let heights = self
            .groups
            .iter()
            // rows, header with its margin, padding and border
            .map(|(_, rows)| Constraint::Length(rows.len() as u16 + 2 + MARGIN_VERTICAL * 2 + 2));

        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
        let areas = Layout::vertical(heights).flex(Flex::Center).split(area);

        for ((name, rows), area) in self.groups.into_iter().zip(areas.iter()) {
            let rows: Vec<Row> = rows.into_iter().map(|(key, command)| Row::new(vec![key, command])).collect();
            let table = Table::new(rows, [Constraint::Length(key_width), Constraint::Min(command_width)])
                .column_spacing(COLUMN_SPACING)
                .header(Row::new(vec!["Key", "Command"]).style(Style::new().bold()).bottom_margin(1))
                .block(
                    Block::new()
                        .title(name)
                        .title_alignment(Alignment::Center)
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::new().bold().fg(Color::Cyan))
                        .padding(Padding::symmetric(MARGIN_HORIZONTAL, MARGIN_VERTICAL)),
                );

            Clear.render(*area, buf);
            Widget::render(table, *area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::Config, pages::PageId};

    #[test]
    fn test_help_lists_press_bindings_only() {
        let config = Config::embedded().unwrap();
        let help = Help::new(vec![
            ("System".to_string(), config.keybindings.global),
            ("Home".to_string(), config.keybindings.pages.get(&PageId::Home).unwrap().clone()),
        ]);

        let (name, rows) = &help.groups()[1];
        assert_eq!(name, "Home");
        // enter, space, up, down, k, j
        assert_eq!(rows.len(), 6);
        assert!(rows.contains(&("Enter".to_string(), "Select".to_string())));
        assert!(rows.contains(&("Up".to_string(), "Up".to_string())));
    }

    #[test]
    fn test_empty_groups_dropped() {
        let help = Help::new(vec![("Game".to_string(), PageKeyBindings::default())]);
        assert!(help.groups().is_empty());
    }

    #[test]
    fn test_render_shows_group_title() {
        let mut bindings = PageKeyBindings::default();
        bindings.insert(
            crossterm::event::KeyEvent::from(crossterm::event::KeyCode::Char('q')),
            crate::action::act!(crate::action::Command::Quit),
        );
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        Help::new(vec![("System".to_string(), bindings)]).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("System"));
        assert!(text.contains("Quit"));
    }
}
