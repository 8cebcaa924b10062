mod game;
mod home;
mod over;

use serde::{Deserialize, Serialize};
use strum::Display;

pub use crate::action::{game::GameAction, home::HomeAction, over::OverAction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize, Default)]
pub enum ActionState {
    #[default]
    Start,
    Repeat,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Deserialize)]
pub enum Command {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    ToggleShowHelp,
    // Session transitions
    StartGame,
    GameOver(u32),
    ShowHome,
    // Page actions
    Home(HomeAction),
    Game(GameAction),
    Over(OverAction),
}

impl Command {
    /// Human readable name, page actions are shown without their page prefix.
    pub fn string(&self) -> String {
        match self {
            Command::Home(action) => action.to_string(),
            Command::Game(action) => action.to_string(),
            Command::Over(action) => action.to_string(),
            command => command.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Action {
    pub command: Command,
    #[serde(default)]
    pub state: ActionState,
}

macro_rules! act {
    ($command:expr) => {
        $crate::action::Action { command: $command, state: $crate::action::ActionState::default() }
    };
    ($command:expr, $state:expr) => {
        $crate::action::Action { command: $command, state: $state }
    };
}

pub(crate) use act;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_act_defaults_to_start() {
        let action = act!(Command::StartGame);
        assert_eq!(action.state, ActionState::Start);
        assert_eq!(act!(Command::Quit, ActionState::End).state, ActionState::End);
    }

    #[test]
    fn test_command_string() {
        assert_eq!(Command::Home(HomeAction::Select).string(), "Select");
        assert_eq!(Command::Game(GameAction::Flap).string(), "Flap");
        assert_eq!(Command::ToggleShowHelp.string(), "ToggleShowHelp");
    }

    #[test]
    fn test_command_from_yaml() {
        let command: Command = serde_yaml::from_str("Quit").unwrap();
        assert_eq!(command, Command::Quit);
        let action: HomeAction = serde_yaml::from_str("Down").unwrap();
        assert_eq!(action, HomeAction::Down);
    }
}
