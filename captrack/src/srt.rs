//! SRT subtitle conversion utilities.
//!
//! Converts timed transcript entries into SRT subtitle format.

use captrack_core::transcript::TranscriptEntry;
use srtlib::{Subtitle, Timestamp};

/// Convert transcript entries to SRT subtitles, numbered from 1.
pub fn to_subtitles(entries: &[TranscriptEntry]) -> Vec<Subtitle> {
    entries
        .iter()
        .zip(1..)
        .map(|(e, i)| create_subtitle(e, i))
        .collect()
}

fn create_subtitle(entry: &TranscriptEntry, index: usize) -> Subtitle {
    Subtitle::new(
        index,
        secs_to_timestamp(entry.start),
        secs_to_timestamp(entry.end),
        entry.text.clone(),
    )
}

/// Convert seconds to SRT Timestamp
fn secs_to_timestamp(secs: f64) -> Timestamp {
    Timestamp::from_milliseconds((secs * 1000.0).round() as u32)
}

/// Format subtitles as SRT file content.
pub fn display_subtitles(subtitles: &[Subtitle]) -> String {
    subtitles
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Display preview of subtitles (first and last entries).
pub fn preview_subtitles(subtitles: &[Subtitle], head_count: usize, tail_count: usize) -> String {
    let total = subtitles.len();

    if total <= head_count + tail_count {
        return display_subtitles(subtitles);
    }

    let mut out = Vec::new();
    out.extend(subtitles[..head_count].iter().map(|s| s.to_string()));
    out.push("...".to_string());
    out.extend(subtitles[total - tail_count..].iter().map(|s| s.to_string()));
    out.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<TranscriptEntry> {
        vec![
            TranscriptEntry::new("Hello world.", 0.0, 1.1),
            TranscriptEntry::new("How are you?", 1.5, 3.1),
        ]
    }

    #[test]
    fn converts_entries_to_subtitles() {
        let subtitles = to_subtitles(&entries());

        assert_eq!(subtitles.len(), 2);
        assert_eq!(subtitles[0].num, 1);
        assert_eq!(subtitles[1].text, "How are you?");
    }

    #[test]
    fn formats_srt_timestamps() {
        let srt = display_subtitles(&to_subtitles(&entries()));

        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:01,100\nHello world."));
        assert!(srt.contains("2\n00:00:01,500 --> 00:00:03,100\nHow are you?"));
    }

    #[test]
    fn handles_empty_entries() {
        assert!(to_subtitles(&[]).is_empty());
        assert_eq!(display_subtitles(&[]), "");
    }

    #[test]
    fn preview_elides_middle() {
        let entries: Vec<_> = (0..10)
            .map(|i| TranscriptEntry::new(format!("line {i}"), i as f64, i as f64 + 1.0))
            .collect();
        let preview = preview_subtitles(&to_subtitles(&entries), 2, 1);

        assert!(preview.contains("line 1"));
        assert!(preview.contains("\n\n...\n\n"));
        assert!(preview.contains("line 9"));
        assert!(!preview.contains("line 5"));
    }
}
