//! Exit combination matching against live key-down events

use std::collections::BTreeSet;

use crate::host::KeyDown;

use super::keys::{Key, KeyCombo, Modifier};

/// Compares key-down events against the exit combination.
///
/// The comparison is set equality between `{text} ∪ modifiers` and the
/// combo's tokens, so extra held modifiers prevent a match.
#[derive(Debug, Clone)]
pub struct ExitInterceptor {
    tokens: BTreeSet<String>,
}

impl ExitInterceptor {
    pub fn new(combo: KeyCombo) -> Self {
        Self {
            tokens: combo.tokens(),
        }
    }

    pub fn matches(&self, event: &KeyDown) -> bool {
        let text = event.text.to_lowercase();
        let key = Key::from_token(&text).map_or(text, |k| k.to_string());

        let observed: BTreeSet<String> = event
            .modifiers
            .iter()
            .map(|m| {
                let m = m.to_lowercase();
                Modifier::from_token(&m).map_or(m, |m| m.name().to_string())
            })
            .chain(std::iter::once(key))
            .collect();

        observed == self.tokens
    }
}
