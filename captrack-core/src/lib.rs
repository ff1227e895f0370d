//! captrack-core: framework-agnostic logic behind a captioned media player.
//!
//! The crate holds everything a UI layer needs to show timed captions and a
//! scrubbable progress bar, without depending on any particular toolkit.
//!
//! # Architecture
//!
//! - [`transcript`]: the `start::end::text` line format shared with the offline pipeline
//! - [`index`]: expands transcript entries into a dense per-second [`index::CaptionIndex`]
//! - [`progress`]: pointer ↔ normalized position ↔ fill offset arithmetic
//! - [`scrub`]: scrub-bar interaction state and hover animation
//! - [`player`]: playback clock with explicit event listeners
//! - [`overlay`]: caption presentation (text, absent, or not available)
//! - [`selector`]: dropdown models for playback speed and caption language
//! - [`language`] / [`layout`]: ordered language configuration and on-disk layout
//!
//! # Quick Start
//!
//! ```
//! use captrack_core::index::CaptionIndex;
//! use captrack_core::overlay::CaptionOverlay;
//!
//! let build = CaptionIndex::build(["0.00::2.00::Hello", "2.00::4.00::World"]);
//! assert!(build.skipped.is_empty());
//!
//! let mut overlay = CaptionOverlay::default();
//! assert_eq!(overlay.caption_at(0).as_display(), "not available");
//!
//! overlay.replace(build.index);
//! assert_eq!(overlay.caption_at(1).as_display(), "Hello");
//! assert_eq!(overlay.caption_at(9).as_display(), "");
//! ```

pub mod error;
pub mod index;
pub mod language;
pub mod layout;
pub mod overlay;
pub mod player;
pub mod progress;
pub mod scrub;
pub mod selector;
pub mod transcript;
