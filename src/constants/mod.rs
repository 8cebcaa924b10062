pub mod game;
pub mod menu;

/// Size of the framed play area in terminal cells.
pub const WIDTH: u16 = 98;
pub const HEIGHT: u16 = 34;

pub const TITLE_TEXT: &str = r#"
 _____ _                           ____  _         _
|  ___| | __ _ _ __  _ __  _   _  | __ )(_)_ __ __| |
| |_  | |/ _` | '_ \| '_ \| | | | |  _ \| | '__/ _` |
|  _| | | (_| | |_) | |_) | |_| | | |_) | | | | (_| |
|_|   |_|\__,_| .__/| .__/ \__, | |____/|_|_|  \__,_|
              |_|   |_|    |___/
"#;

pub const GAME_OVER_TEXT: &str = r#"
  ____                         ___
 / ___| __ _ _ __ ___   ___   / _ \__   _____ _ __
| |  _ / _` | '_ ` _ \ / _ \ | | | \ \ / / _ \ '__|
| |_| | (_| | | | | | |  __/ | |_| |\ V /  __/ |
 \____|\__,_|_| |_| |_|\___|  \___/  \_/ \___|_|
"#;
