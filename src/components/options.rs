use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::constants::menu::OPTION_PADDING;

/// Vertical menu with a blank line between entries and the selected entry highlighted.
pub struct OptionList<'a> {
    options: &'a [&'a str],
    selected: usize,
}

impl<'a> OptionList<'a> {
    pub fn new(options: &'a [&'a str], selected: usize) -> Self {
        Self { options, selected }
    }

    pub fn height(&self) -> u16 {
        (self.options.len() as u16 * 2).saturating_sub(1)
    }

    pub fn width(&self) -> u16 {
        self.longest() as u16 + (OPTION_PADDING as u16 * 2)
    }

    fn longest(&self) -> usize {
        self.options.iter().map(|title| title.chars().count()).max().unwrap_or(0)
    }
}

impl Widget for OptionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Constraint::Length(self.width())]).flex(Flex::Center).areas(area);
        let longest = self.longest();

        let mut lines = Vec::with_capacity(self.options.len() * 2);
        for (index, title) in self.options.iter().enumerate() {
            if index > 0 {
                lines.push(Line::from(""));
            }
            let back_pad = longest - title.chars().count() + OPTION_PADDING;
            let padded = format!("{}{title}{}", " ".repeat(OPTION_PADDING), " ".repeat(back_pad));
            let style = if index == self.selected { Style::default().bg(Color::Cyan) } else { Style::default() };
            lines.push(Line::from(padded).style(style));
        }

        Paragraph::new(lines).style(Style::default().fg(Color::White)).alignment(Alignment::Left).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_layout_size() {
        let options = OptionList::new(&["Restart", "Back To Menu"], 0);
        assert_eq!(options.height(), 3);
        assert_eq!(options.width(), 16);
    }

    #[test]
    fn test_selected_highlighted() {
        let area = Rect::new(0, 0, 14, 3);
        let mut buf = Buffer::empty(area);
        OptionList::new(&["Start game", "Quit"], 1).render(area, &mut buf);

        assert_eq!(buf[(2, 0)].symbol(), "S");
        assert_eq!(buf[(2, 0)].bg, Color::Reset);
        assert_eq!(buf[(2, 2)].symbol(), "Q");
        assert_eq!(buf[(2, 2)].bg, Color::Cyan);
        assert_eq!(buf[(13, 2)].bg, Color::Cyan);
    }
}
