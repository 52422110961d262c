//! Key combination definitions and parsing
//!
//! Turns shortcut strings of the form `mod1+mod2+...+key` into a
//! structured [`KeyCombo`] carrying the Win32 modifier bits and
//! virtual-key code needed for registration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::HotkeyError;

/// Modifier flag values understood by `RegisterHotKey`
pub mod flags {
    /// MOD_ALT
    pub const ALT: u32 = 0x0001;
    /// MOD_CONTROL
    pub const CONTROL: u32 = 0x0002;
    /// MOD_SHIFT
    pub const SHIFT: u32 = 0x0004;
    /// MOD_WIN
    pub const WIN: u32 = 0x0008;
}

/// One of the four recognized modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Alt,
    Ctrl,
    Shift,
    Win,
}

impl Modifier {
    /// All modifiers, in canonical (sorted) order
    pub const ALL: [Modifier; 4] = [Modifier::Alt, Modifier::Ctrl, Modifier::Shift, Modifier::Win];

    /// Resolve an already lower-cased token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "alt" => Some(Self::Alt),
            "ctrl" => Some(Self::Ctrl),
            "shift" => Some(Self::Shift),
            "win" => Some(Self::Win),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Alt => "alt",
            Self::Ctrl => "ctrl",
            Self::Shift => "shift",
            Self::Win => "win",
        }
    }

    pub fn flag(self) -> u32 {
        match self {
            Self::Alt => flags::ALT,
            Self::Ctrl => flags::CONTROL,
            Self::Shift => flags::SHIFT,
            Self::Win => flags::WIN,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tracks which modifier keys are part of a combination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub win: bool,
}

impl ModifierSet {
    /// Bitwise OR of the flags of every contained modifier
    pub fn flags(&self) -> u32 {
        self.iter().fold(0, |bits, m| bits | m.flag())
    }

    pub fn insert(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Alt => self.alt = true,
            Modifier::Ctrl => self.ctrl = true,
            Modifier::Shift => self.shift = true,
            Modifier::Win => self.win = true,
        }
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Alt => self.alt,
            Modifier::Ctrl => self.ctrl,
            Modifier::Shift => self.shift,
            Modifier::Win => self.win,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.alt && !self.ctrl && !self.shift && !self.win
    }

    /// Iterate the contained modifiers in canonical order
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = Self::default();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

/// The non-modifier key of a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Return,
    Escape,
    /// ASCII digit `'0'..='9'`
    Digit(char),
    /// ASCII lower-case letter `'a'..='z'`
    Letter(char),
}

impl Key {
    /// Resolve an already lower-cased token against the key table
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "space" => Some(Self::Space),
            "return" | "enter" => Some(Self::Return),
            "escape" | "esc" => Some(Self::Escape),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c @ '0'..='9'), None) => Some(Self::Digit(c)),
                    (Some(c @ 'a'..='z'), None) => Some(Self::Letter(c)),
                    _ => None,
                }
            }
        }
    }

    /// Inverse of [`Key::vk_code`]
    pub fn from_vk_code(vk: u32) -> Option<Self> {
        match vk {
            0x20 => Some(Self::Space),
            0x0D => Some(Self::Return),
            0x1B => Some(Self::Escape),
            0x30..=0x39 => char::from_u32(vk).map(Self::Digit),
            0x41..=0x5A => char::from_u32(vk).map(|c| Self::Letter(c.to_ascii_lowercase())),
            _ => None,
        }
    }

    /// Windows virtual-key code
    pub fn vk_code(&self) -> u32 {
        match self {
            Self::Space => 0x20,
            Self::Return => 0x0D,
            Self::Escape => 0x1B,
            // VK codes for digits and letters are their upper-case ASCII values
            Self::Digit(c) | Self::Letter(c) => c.to_ascii_uppercase() as u32,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space => f.write_str("space"),
            Self::Return => f.write_str("return"),
            Self::Escape => f.write_str("escape"),
            Self::Digit(c) | Self::Letter(c) => write!(f, "{c}"),
        }
    }
}

/// A parsed shortcut: a modifier set plus exactly one trailing key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    modifiers: ModifierSet,
    key: Key,
}

impl KeyCombo {
    pub fn new(modifiers: ModifierSet, key: Key) -> Self {
        Self { modifiers, key }
    }

    /// Parse a `mod1+mod2+...+key` string.
    ///
    /// Matching is case-insensitive. Tokens are not trimmed, so
    /// `"ctrl + c"` is rejected.
    pub fn parse(spec: &str) -> Result<Self, HotkeyError> {
        let invalid = |reason: String| HotkeyError::InvalidCombo {
            spec: spec.to_string(),
            reason,
        };

        if spec.is_empty() {
            return Err(invalid("empty key combination".to_string()));
        }

        let lowered = spec.to_lowercase();
        let tokens: Vec<&str> = lowered.split('+').collect();
        let (last, leading) = tokens
            .split_last()
            .ok_or_else(|| invalid("empty key combination".to_string()))?;

        let mut modifiers = ModifierSet::default();
        for token in leading {
            let modifier = Modifier::from_token(token)
                .ok_or_else(|| invalid(format!("'{token}' is not a modifier")))?;
            modifiers.insert(modifier);
        }

        let key = Key::from_token(last).ok_or_else(|| invalid(format!("unknown key '{last}'")))?;

        Ok(Self { modifiers, key })
    }

    pub fn modifiers(&self) -> ModifierSet {
        self.modifiers
    }

    pub fn key(&self) -> Key {
        self.key
    }

    /// The combination as an unordered set of canonical token names
    pub fn tokens(&self) -> BTreeSet<String> {
        self.modifiers
            .iter()
            .map(|m| m.name().to_string())
            .chain(std::iter::once(self.key.to_string()))
            .collect()
    }
}

impl FromStr for KeyCombo {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical form: lower-case, sorted modifiers, key last
impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.modifiers.iter() {
            write!(f, "{modifier}+")?;
        }
        write!(f, "{}", self.key)
    }
}
