//! Transcript line format.
//!
//! One entry per line, three fields separated by `::`:
//!
//! ```text
//! <start_seconds>::<end_seconds>::<caption text>
//! ```
//!
//! Writers emit two decimal places; readers accept any decimal precision.
//! Caption text cannot contain the delimiter, so [`TranscriptEntry::new`]
//! folds `::` and line breaks out of the text before it is stored.

use crate::error::LineError;
use serde::Serialize;
use std::fmt;

/// Field delimiter.
pub const DELIMITER: &str = "::";

/// Longest clip a transcript may describe (24 hours).
///
/// Bounds the per-second expansion in [`crate::index::CaptionIndex::build`].
pub const MAX_TRANSCRIPT_SECS: f64 = 86_400.0;

/// One timed caption record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranscriptEntry {
    /// Start time in seconds (inclusive)
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
    /// Display text, possibly empty
    pub text: String,
}

impl TranscriptEntry {
    /// Create an entry, sanitizing text so it serializes to a single valid line.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: sanitize_text(&text.into()),
            start,
            end,
        }
    }

    /// Parse a single transcript line.
    ///
    /// The caption text is taken verbatim; only a trailing `\r` is dropped so
    /// CRLF files read the same as LF files.
    pub fn parse(line: &str) -> Result<Self, LineError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let fields: Vec<&str> = line.split(DELIMITER).collect();

        let &[start, end, text] = fields.as_slice() else {
            return Err(LineError::FieldCount(fields.len()));
        };

        let start = parse_secs("start", start)?;
        let end = parse_secs("end", end)?;

        if start < 0.0 {
            return Err(LineError::NegativeStart(start));
        }
        if end < start {
            return Err(LineError::Reversed { start, end });
        }
        if end > MAX_TRANSCRIPT_SECS {
            return Err(LineError::OutOfRange {
                end,
                max: MAX_TRANSCRIPT_SECS,
            });
        }

        Ok(Self {
            start,
            end,
            text: text.to_string(),
        })
    }

    /// Whole seconds covered by this entry: `floor(start)..floor(end)`.
    pub fn seconds(&self) -> std::ops::Range<u64> {
        self.start.floor() as u64..self.end.floor() as u64
    }
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}{DELIMITER}{:.2}{DELIMITER}{}",
            self.start, self.end, self.text
        )
    }
}

/// Parse every non-blank line, pairing each result with its 1-based line number.
pub fn parse_lines<I, S>(lines: I) -> impl Iterator<Item = (usize, Result<TranscriptEntry, LineError>)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .zip(1..)
        .filter(|(raw, _)| !raw.as_ref().trim().is_empty())
        .map(|(raw, line)| (line, TranscriptEntry::parse(raw.as_ref())))
}

/// Parse a time field, rejecting anything that is not a finite number.
fn parse_secs(field: &'static str, value: &str) -> Result<f64, LineError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite())
        .ok_or_else(|| LineError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Collapse line breaks and the field delimiter out of caption text.
fn sanitize_text(text: &str) -> String {
    let single_line = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = single_line;
    while out.contains(DELIMITER) {
        out = out.replace(DELIMITER, ":");
    }
    out.trim().to_string()
}

/// Ordered transcript entries for one clip and language.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Transcript {
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Build a transcript from `(text, start, end)` segments.
    pub fn from_segments<S, I>(segments: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64, f64)>,
    {
        let entries = segments
            .into_iter()
            .map(|(text, start, end)| TranscriptEntry::new(text, start, end))
            .collect();
        Self { entries }
    }

    /// A transcript holding one untimed block stretched over `duration` seconds.
    pub fn untimed(text: impl Into<String>, duration: f64) -> Self {
        Self {
            entries: vec![TranscriptEntry::new(text, 0.0, duration.max(0.0))],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries whose serialized line would not parse back, returning
    /// the rejected lines' errors.
    pub fn retain_valid(&mut self) -> Vec<LineError> {
        let mut rejected = Vec::new();
        self.entries
            .retain(|entry| match TranscriptEntry::parse(&entry.to_string()) {
                Ok(_) => true,
                Err(err) => {
                    rejected.push(err);
                    false
                }
            });
        rejected
    }

    /// Serialize to the line format, one entry per line with a trailing newline.
    pub fn to_blob(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{e}\n"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_valid_drops_unparsable_entries() {
        let mut transcript = Transcript::from_segments([
            ("ok", 0.0, 1.0),
            ("backwards", 5.0, 2.0),
            ("early", -1.0, 1.0),
            ("late", 3599.0, 4000.0),
        ]);

        let rejected = transcript.retain_valid();

        assert_eq!(transcript.to_blob(), "0.00::1.00::ok\n");
        assert!(matches!(
            rejected.as_slice(),
            [
                LineError::Reversed { .. },
                LineError::NegativeStart(_),
                LineError::OutOfRange { .. }
            ]
        ));
    }

    #[test]
    fn parses_well_formed_line() {
        let entry = TranscriptEntry::parse("1.50::3.25::Hello there").unwrap();

        assert_eq!(entry.start, 1.5);
        assert_eq!(entry.end, 3.25);
        assert_eq!(entry.text, "Hello there");
    }

    #[test]
    fn accepts_any_precision_and_padding() {
        let entry = TranscriptEntry::parse(" 2 :: 4.123456 ::x").unwrap();

        assert_eq!(entry.start, 2.0);
        assert!((entry.end - 4.123456).abs() < 1e-5);
        assert_eq!(entry.text, "x");
    }

    #[test]
    fn keeps_empty_text_and_strips_carriage_return() {
        let entry = TranscriptEntry::parse("0.00::1.00::\r").unwrap();
        assert_eq!(entry.text, "");
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            TranscriptEntry::parse("0.00::2.00"),
            Err(LineError::FieldCount(2))
        );
        assert_eq!(
            TranscriptEntry::parse("0.00::2.00::a::b"),
            Err(LineError::FieldCount(4))
        );
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(matches!(
            TranscriptEntry::parse("abc::2.00::x"),
            Err(LineError::InvalidNumber { field: "start", .. })
        ));
        assert!(matches!(
            TranscriptEntry::parse("0.00::NaN::x"),
            Err(LineError::InvalidNumber { field: "end", .. })
        ));
        assert!(matches!(
            TranscriptEntry::parse("-1.00::2.00::x"),
            Err(LineError::NegativeStart(_))
        ));
        assert!(matches!(
            TranscriptEntry::parse("5.00::2.00::x"),
            Err(LineError::Reversed { .. })
        ));
        assert!(matches!(
            TranscriptEntry::parse("0.00::1e9::x"),
            Err(LineError::OutOfRange { .. })
        ));
    }

    #[test]
    fn covered_seconds_are_half_open() {
        let entry = TranscriptEntry::new("x", 0.5, 2.3);
        assert_eq!(entry.seconds(), 0..2);

        let empty = TranscriptEntry::new("x", 3.0, 3.0);
        assert!(empty.seconds().is_empty());
    }

    #[test]
    fn sanitizes_text_on_construction() {
        let entry = TranscriptEntry::new("Note::: see\nbelow ", 0.0, 1.0);

        assert_eq!(entry.text, "Note: see below");
        assert!(TranscriptEntry::parse(&entry.to_string()).is_ok());
    }

    #[test]
    fn serializes_with_two_decimals() {
        let transcript = Transcript::from_segments([("A", 0.0, 2.0), ("B", 2.0, 5.5)]);

        assert_eq!(transcript.to_blob(), "0.00::2.00::A\n2.00::5.50::B\n");
    }

    #[test]
    fn parse_lines_numbers_from_one_and_skips_blanks() {
        let parsed: Vec<_> = parse_lines(["0::1::a", "", "bad", "  ", "2::3::b"])
            .map(|(line, r)| (line, r.is_ok()))
            .collect();

        assert_eq!(parsed, [(1, true), (3, false), (5, true)]);
    }

    #[test]
    fn untimed_block_spans_duration() {
        let transcript = Transcript::untimed("everything", 12.5);

        match &transcript.entries[..] {
            [entry] => {
                assert_eq!(entry.start, 0.0);
                assert_eq!(entry.end, 12.5);
            }
            _ => panic!("expected 1 entry, got {}", transcript.entries.len()),
        }
    }
}
