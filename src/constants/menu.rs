pub const HOME_OPTIONS: [&str; 2] = ["Start game", "Quit"];
pub const OVER_OPTIONS: [&str; 2] = ["Restart", "Back To Menu"];

pub const OPTION_PADDING: usize = 2;
