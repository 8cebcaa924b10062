use std::{collections::HashMap, fmt::Debug, str::FromStr};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{
    de::{Deserializer, Error as _},
    Deserialize,
};

use crate::{
    action::{Action, ActionState, Command, GameAction, HomeAction, OverAction},
    pages::PageId,
};

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
}

impl Config {
    /// User configuration layered over the embedded defaults.
    pub fn new() -> Result<Self> {
        let default_config = Self::embedded()?;
        let config_dir = crate::utils::get_config_dir();
        let mut builder = config::Config::builder();

        let config_files = [
            ("config.yaml", config::FileFormat::Yaml),
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!("No configuration file found in {}, using default key bindings", config_dir.display());
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.keybindings.merge_defaults(default_config.keybindings);

        Ok(cfg)
    }

    /// Only the bindings compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Ok(serde_yaml::from_str(CONFIG)?)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawPageKeyBindings {
    pub click: Option<HashMap<String, String>>,
    pub hold: Option<HashMap<String, String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawKeyBindings {
    #[serde(default)]
    pub global: RawPageKeyBindings,
    #[serde(default)]
    pub pages: HashMap<String, RawPageKeyBindings>,
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct PageKeyBindings(pub HashMap<KeyEvent, Action>);

impl PageKeyBindings {
    /// Looks up `key`, falling back to the binding without shift for characters,
    /// since terminals report `?` as shift-`?`.
    pub fn lookup(&self, key: &KeyEvent) -> Option<&Action> {
        self.get(key).or_else(|| match key.code {
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::SHIFT) => {
                let mut unshifted = *key;
                unshifted.modifiers.remove(KeyModifiers::SHIFT);
                self.get(&unshifted)
            },
            _ => None,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct KeyBindings {
    pub global: PageKeyBindings,
    pub pages: HashMap<PageId, PageKeyBindings>,
}

impl KeyBindings {
    /// Fills in every default binding the user did not override.
    fn merge_defaults(&mut self, defaults: KeyBindings) {
        for (page, default_bindings) in defaults.pages {
            let user_bindings = self.pages.entry(page).or_default();
            for (key, action) in default_bindings.0 {
                user_bindings.entry(key).or_insert(action);
            }
        }
        for (key, action) in defaults.global.0 {
            self.global.entry(key).or_insert(action);
        }
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_keybindings = RawKeyBindings::deserialize(deserializer)?;

        let global = parse_page_keybindings::<Command>(&raw_keybindings.global)
            .map_err(D::Error::custom)?
            .into_iter()
            .map(|(event, (command, state))| (event, Action { command, state }))
            .collect();

        let mut pages = HashMap::new();
        for (page, raw_page_keybindings) in raw_keybindings.pages.iter() {
            let page_id = PageId::from_str(page).map_err(|_| D::Error::custom(format!("Unknown page `{page}`")))?;
            let bindings = match_page_keybindings(page_id, raw_page_keybindings).map_err(D::Error::custom)?;
            pages.insert(page_id, bindings);
        }

        Ok(KeyBindings { global: PageKeyBindings(global), pages })
    }
}

macro_rules! parse_and_map_actions {
    ( $( ( $page_id_variant:path, $action_type:ty, $action_variant:path ) ),* ) => {
        fn match_page_keybindings(page_id: PageId, raw: &RawPageKeyBindings) -> Result<PageKeyBindings, String> {
            let map = match page_id {
                $(
                    $page_id_variant => {
                        parse_page_keybindings::<$action_type>(raw)?
                            .into_iter()
                            .map(|(event, (command, state))| (event, Action { command: $action_variant(command), state }))
                            .collect()
                    },
                )*
            };

            Ok(PageKeyBindings(map))
        }
    };
}

parse_and_map_actions![
    (PageId::Home, HomeAction, Command::Home),
    (PageId::Game, GameAction, Command::Game),
    (PageId::Over, OverAction, Command::Over)
];

fn parse_binding_pairs<T>(map: &Option<HashMap<String, String>>) -> Result<HashMap<KeyEvent, T>, String>
where
    T: for<'a> Deserialize<'a>,
{
    let Some(inner_map) = map else {
        return Ok(HashMap::new());
    };
    inner_map
        .iter()
        .map(|(key_str, action_str)| {
            let action: T =
                serde_plain::from_str(action_str).map_err(|e| format!("Unknown action `{action_str}`: {e}"))?;
            Ok((parse_key_event(key_str)?, action))
        })
        .collect()
}

fn parse_page_keybindings<T>(raw: &RawPageKeyBindings) -> Result<HashMap<KeyEvent, (T, ActionState)>, String>
where
    T: for<'a> Deserialize<'a> + Clone + Debug,
{
    let click_keybindings = parse_binding_pairs(&raw.click)?;
    let hold_keybindings = parse_binding_pairs(&raw.hold)?;

    Ok(merge_keybinding_maps(click_keybindings, hold_keybindings))
}

/// Click bindings fire once. Hold bindings fire on press, repeat and release.
fn merge_keybinding_maps<A: Clone>(
    click: HashMap<KeyEvent, A>,
    hold: HashMap<KeyEvent, A>,
) -> HashMap<KeyEvent, (A, ActionState)> {
    let mut merged: HashMap<KeyEvent, (A, ActionState)> =
        click.into_iter().map(|(event, command)| (event, (command, ActionState::default()))).collect();
    for (mut key_event, action) in hold {
        merged.insert(key_event, (action.clone(), ActionState::Start));
        key_event.kind = KeyEventKind::Release;
        merged.insert(key_event, (action.clone(), ActionState::End));
        key_event.kind = KeyEventKind::Repeat;
        merged.insert(key_event, (action, ActionState::Repeat));
    }

    merged
}

pub fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    if raw.chars().filter(|c| *c == '>').count() != raw.chars().filter(|c| *c == '<').count() {
        return Err(format!("Unable to parse `{}`", raw));
    }
    let raw = if !raw.contains("><") {
        let raw = raw.strip_prefix('<').unwrap_or(raw);
        raw.strip_prefix('>').unwrap_or(raw)
    } else {
        raw
    };
    let raw = raw.trim_start_matches('<').trim_end_matches('>');

    let raw_lower = raw.to_ascii_lowercase();
    let (remaining, modifiers) = extract_modifiers(&raw_lower);
    parse_key_code_with_modifiers(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        match current {
            rest if rest.starts_with("ctrl-") => {
                modifiers.insert(KeyModifiers::CONTROL);
                current = &rest[5..];
            },
            rest if rest.starts_with("alt-") => {
                modifiers.insert(KeyModifiers::ALT);
                current = &rest[4..];
            },
            rest if rest.starts_with("shift-") => {
                modifiers.insert(KeyModifiers::SHIFT);
                current = &rest[6..];
            },
            _ => break,
        };
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, mut modifiers: KeyModifiers) -> Result<KeyEvent, String> {
    let c = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        },
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        "hyphen" | "minus" => KeyCode::Char('-'),
        "tab" => KeyCode::Tab,
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(format!("Unable to parse {raw}")),
        },
        c if c.chars().count() == 1 => {
            let mut c = c.chars().next().unwrap_or_default();
            if modifiers.contains(KeyModifiers::SHIFT) {
                c = c.to_ascii_uppercase();
            }
            KeyCode::Char(c)
        },
        _ => return Err(format!("Unable to parse {raw}")),
    };
    Ok(KeyEvent::new(c, modifiers))
}

pub fn key_event_to_string(key_event: &KeyEvent) -> String {
    let char;
    let key_code = match key_event.code {
        KeyCode::Backspace => "Backspace",
        KeyCode::Enter => "Enter",
        KeyCode::Left => "Left",
        KeyCode::Right => "Right",
        KeyCode::Up => "Up",
        KeyCode::Down => "Down",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Tab => "Tab",
        KeyCode::BackTab => "BackTab",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::F(c) => {
            char = format!("F{c}");
            &char
        },
        KeyCode::Char(' ') => "Space",
        KeyCode::Char(c) => {
            char = c.to_string();
            &char
        },
        KeyCode::Esc => "Esc",
        _ => "",
    };

    let mut modifiers = Vec::with_capacity(3);

    if key_event.modifiers.intersects(KeyModifiers::CONTROL) {
        modifiers.push("Ctrl");
    }

    if key_event.modifiers.intersects(KeyModifiers::SHIFT) {
        modifiers.push("Shift");
    }

    if key_event.modifiers.intersects(KeyModifiers::ALT) {
        modifiers.push("Alt");
    }

    let mut key = modifiers.join("-");

    if !key.is_empty() {
        key.push('-');
    }
    key.push_str(key_code);

    key
}
