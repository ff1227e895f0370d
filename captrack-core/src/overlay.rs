//! Caption overlay presentation.

use crate::index::CaptionIndex;

/// Placeholder shown when no caption index has been loaded.
pub const NOT_AVAILABLE: &str = "not available";

/// What the overlay should show for a playback second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Caption<'a> {
    /// A caption covers this second
    Text(&'a str),
    /// An index exists but nothing covers this second
    Absent,
    /// No index is loaded for the current clip/language
    Unavailable,
}

impl<'a> Caption<'a> {
    /// Text to render: the caption, an empty string, or [`NOT_AVAILABLE`].
    pub fn as_display(&self) -> &'a str {
        match *self {
            Caption::Text(text) => text,
            Caption::Absent => "",
            Caption::Unavailable => NOT_AVAILABLE,
        }
    }
}

/// Owns the active caption index and answers per-frame queries.
#[derive(Clone, Debug, Default)]
pub struct CaptionOverlay {
    index: Option<CaptionIndex>,
}

impl CaptionOverlay {
    pub fn new(index: Option<CaptionIndex>) -> Self {
        Self { index }
    }

    /// Swap in a freshly built index, dropping the previous one.
    pub fn replace(&mut self, index: CaptionIndex) {
        self.index = Some(index);
    }

    /// Forget the current index; queries report [`Caption::Unavailable`].
    pub fn clear(&mut self) {
        self.index = None;
    }

    /// Replace or clear in one step.
    pub fn set(&mut self, index: Option<CaptionIndex>) {
        self.index = index;
    }

    pub fn index(&self) -> Option<&CaptionIndex> {
        self.index.as_ref()
    }

    pub fn caption_at(&self, second: u64) -> Caption<'_> {
        match &self.index {
            None => Caption::Unavailable,
            Some(index) => index.lookup(second).map_or(Caption::Absent, Caption::Text),
        }
    }
}
