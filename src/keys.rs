//! Key name resolution for key-combination lines.
//!
//! A token resolves in two ordered steps: the alias table first (`CTRL`,
//! `DOWNARROW`, `WINDOWS`, ...), then the canonical [`Keycode`] identifiers
//! (`A`, `F5`, `LEFT_ARROW`, ...). Tokens are uppercased before either lookup.

use crate::keycode::Keycode;

/// The DuckyScript alias table.
pub const DUCKY_ALIASES: &[(&str, Keycode)] = &[
    ("WINDOWS", Keycode::LeftGui),
    ("GUI", Keycode::LeftGui),
    ("APP", Keycode::Application),
    ("MENU", Keycode::Application),
    ("SHIFT", Keycode::LeftShift),
    ("ALT", Keycode::LeftAlt),
    ("CONTROL", Keycode::LeftControl),
    ("CTRL", Keycode::LeftControl),
    ("DOWNARROW", Keycode::DownArrow),
    ("DOWN", Keycode::DownArrow),
    ("LEFTARROW", Keycode::LeftArrow),
    ("LEFT", Keycode::LeftArrow),
    ("RIGHTARROW", Keycode::RightArrow),
    ("RIGHT", Keycode::RightArrow),
    ("UPARROW", Keycode::UpArrow),
    ("UP", Keycode::UpArrow),
    ("BREAK", Keycode::Pause),
    ("PAUSE", Keycode::Pause),
    ("CAPSLOCK", Keycode::CapsLock),
    ("DELETE", Keycode::Delete),
    ("END", Keycode::End),
    ("ESC", Keycode::Escape),
    ("ESCAPE", Keycode::Escape),
    ("HOME", Keycode::Home),
    ("INSERT", Keycode::Insert),
    ("NUMLOCK", Keycode::KeypadNumlock),
    ("PAGEUP", Keycode::PageUp),
    ("PAGEDOWN", Keycode::PageDown),
    ("PRINTSCREEN", Keycode::PrintScreen),
    ("ENTER", Keycode::Enter),
    ("SCROLLLOCK", Keycode::ScrollLock),
    ("SPACE", Keycode::Spacebar),
    ("TAB", Keycode::Tab),
    ("BACKSPACE", Keycode::Backspace),
];

/// The keys a single key-combination line resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCombination {
    /// Resolved keys, in the order they appeared on the line.
    pub keys: Vec<Keycode>,
    /// Uppercased tokens that matched neither table.
    pub unknown: Vec<String>,
}

impl KeyCombination {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Resolves script tokens to key codes. Built once and shared read-only.
#[derive(Debug, Clone)]
pub struct KeyResolver {
    aliases: Vec<(String, Keycode)>,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self {
            aliases: DUCKY_ALIASES
                .iter()
                .map(|(name, key)| ((*name).to_string(), *key))
                .collect(),
        }
    }
}

impl KeyResolver {
    /// Start from the DuckyScript table and add (or override) entries.
    pub fn with_aliases<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (S, Keycode)>,
        S: Into<String>,
    {
        let mut resolver = Self::default();
        for (name, key) in aliases {
            let name = name.into().to_uppercase();
            match resolver.aliases.iter_mut().find(|(n, _)| *n == name) {
                Some(entry) => entry.1 = key,
                None => resolver.aliases.push((name, key)),
            }
        }
        resolver
    }

    /// Resolve one token, or `None` when it names no key.
    pub fn resolve(&self, token: &str) -> Option<Keycode> {
        let token = token.to_uppercase();
        self.aliases
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, key)| *key)
            .or_else(|| Keycode::from_name(&token))
    }

    /// Resolve every whitespace-separated token on a line.
    pub fn resolve_line(&self, line: &str) -> KeyCombination {
        let mut combo = KeyCombination::default();
        for token in line.split_whitespace() {
            match self.resolve(token) {
                Some(key) => combo.keys.push(key),
                None => combo.unknown.push(token.to_uppercase()),
            }
        }
        combo
    }

    /// A name that resolves back to `key`: its first alias, else its canonical name.
    pub fn name_of(&self, key: Keycode) -> &str {
        self.aliases
            .iter()
            .find(|(_, k)| *k == key)
            .map(|(name, _)| name.as_str())
            .unwrap_or_else(|| key.name())
    }
}
