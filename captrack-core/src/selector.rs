//! Dropdown models for playback speed and caption language.

use crate::language::LanguageSet;

/// Speeds offered by the speed dropdown.
pub const SPEED_PRESETS: &[f32] = &[0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Default speed preset (1x).
const DEFAULT_SPEED_INDEX: usize = 2;

/// A labelled dropdown option.
#[derive(Clone, Debug, PartialEq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

/// Ordered options with one selected entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Selector<T> {
    choices: Vec<Choice<T>>,
    selected: usize,
}

impl<T> Selector<T> {
    /// Returns `None` when `choices` is empty or `selected` is out of range.
    pub fn new(choices: Vec<Choice<T>>, selected: usize) -> Option<Self> {
        (selected < choices.len()).then_some(Self { choices, selected })
    }

    pub fn choices(&self) -> &[Choice<T>] {
        &self.choices
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|c| c.label.as_str())
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &Choice<T> {
        &self.choices[self.selected]
    }

    pub fn value(&self) -> &T {
        &self.selected().value
    }

    /// Select by index. Returns `true` when the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.choices.len() || index == self.selected {
            return false;
        }
        self.selected = index;
        true
    }

    /// Select the first option whose label matches, ignoring ASCII case.
    pub fn select_label(&mut self, label: &str) -> Option<bool> {
        let index = self
            .choices
            .iter()
            .position(|c| c.label.eq_ignore_ascii_case(label.trim()))?;
        Some(self.select(index))
    }
}

/// Speed dropdown, `1x` selected.
pub fn speed_selector() -> Selector<f32> {
    let choices = SPEED_PRESETS
        .iter()
        .map(|&value| Choice {
            label: speed_label(value),
            value,
        })
        .collect();

    Selector {
        choices,
        selected: DEFAULT_SPEED_INDEX,
    }
}

/// Language dropdown for a language set, original language selected.
pub fn language_selector(languages: &LanguageSet) -> Selector<String> {
    let choices = languages
        .iter()
        .map(|name| Choice {
            label: name.to_string(),
            value: name.to_string(),
        })
        .collect();

    Selector {
        choices,
        selected: 0,
    }
}

/// Format a speed as `1x`, `1.5x`, `0.75x`.
pub fn speed_label(speed: f32) -> String {
    format!("{speed}x")
}

/// Parse `1.5`, `1.5x` or `1.5X`.
pub fn parse_speed(text: &str) -> Option<f32> {
    let text = text.trim();
    let number = text
        .strip_suffix(['x', 'X'])
        .unwrap_or(text);
    number
        .parse::<f32>()
        .ok()
        .filter(|s| s.is_finite() && *s > 0.0)
}
