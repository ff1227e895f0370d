//! Per-second caption index.
//!
//! Expands sparse `[start, end)` transcript entries into a dense map from whole
//! playback seconds to caption text, so a per-frame lookup is a single map lookup.

use crate::error::LineError;
use crate::transcript::{TranscriptEntry, parse_lines};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Mapping from integer playback second to caption text.
///
/// Built once per clip/language selection and replaced wholesale afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CaptionIndex {
    seconds: BTreeMap<u64, String>,
}

/// A transcript line that was skipped during a build.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the input
    pub line: usize,
    #[serde(serialize_with = "serialize_display")]
    pub reason: LineError,
}

/// Consecutive seconds claimed by an earlier line that a later line also covers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overlap {
    /// First contested second
    pub from: u64,
    /// One past the last contested second
    pub to: u64,
    /// Line that owns these seconds
    pub kept_line: usize,
    /// Line whose caption was not stored for these seconds
    pub dropped_line: usize,
}

impl Overlap {
    /// Number of contested seconds in this run.
    pub fn seconds(&self) -> u64 {
        self.to - self.from
    }
}

/// Result of [`CaptionIndex::build`]: the index plus everything worth reporting.
#[derive(Clone, Debug, Default, Serialize)]
pub struct IndexBuild {
    pub index: CaptionIndex,
    pub skipped: Vec<SkippedLine>,
    pub overlaps: Vec<Overlap>,
}

impl CaptionIndex {
    /// Build an index from raw transcript lines.
    ///
    /// Malformed lines are skipped and reported; blank lines are ignored.
    /// When entries overlap, the earlier line keeps the contested seconds.
    pub fn build<I, S>(lines: I) -> IndexBuild
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skipped = Vec::new();
        let mut entries = Vec::new();

        for (line, parsed) in parse_lines(lines) {
            match parsed {
                Ok(entry) => entries.push((line, entry)),
                Err(reason) => {
                    tracing::warn!(line, %reason, "skipping malformed transcript line");
                    skipped.push(SkippedLine { line, reason });
                }
            }
        }

        let (index, overlaps) = Self::from_entries(&entries);

        tracing::debug!(
            entries = entries.len(),
            seconds = index.len(),
            skipped = skipped.len(),
            overlaps = overlaps.len(),
            "caption index built"
        );

        IndexBuild {
            index,
            skipped,
            overlaps,
        }
    }

    /// Build from a whole transcript text, one entry per line.
    pub fn build_from_str(text: &str) -> IndexBuild {
        Self::build(text.lines())
    }

    /// Expand parsed entries with insert-if-absent semantics.
    ///
    /// Contested seconds are merged into runs per (kept, dropped) line pair.
    fn from_entries(entries: &[(usize, TranscriptEntry)]) -> (Self, Vec<Overlap>) {
        let mut seconds = BTreeMap::new();
        let mut owners = BTreeMap::new();
        let mut overlaps: Vec<Overlap> = Vec::new();

        for (line, entry) in entries {
            for second in entry.seconds() {
                match seconds.entry(second) {
                    Entry::Vacant(slot) => {
                        slot.insert(entry.text.clone());
                        owners.insert(second, *line);
                    }
                    Entry::Occupied(_) => {
                        let kept_line = owners[&second];
                        match overlaps.last_mut() {
                            Some(run)
                                if run.dropped_line == *line
                                    && run.kept_line == kept_line
                                    && run.to == second =>
                            {
                                run.to += 1
                            }
                            _ => overlaps.push(Overlap {
                                from: second,
                                to: second + 1,
                                kept_line,
                                dropped_line: *line,
                            }),
                        }
                    }
                }
            }
        }

        if !overlaps.is_empty() {
            tracing::warn!(
                runs = overlaps.len(),
                seconds = overlaps.iter().map(Overlap::seconds).sum::<u64>(),
                "overlapping transcript entries; earlier lines keep their captions"
            );
        }

        (Self { seconds }, overlaps)
    }

    /// Caption text for a playback second, if any entry covers it.
    pub fn lookup(&self, second: u64) -> Option<&str> {
        self.seconds.get(&second).map(String::as_str)
    }

    /// Number of covered seconds.
    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    /// Covered seconds in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.seconds.iter().map(|(s, t)| (*s, t.as_str()))
    }

    /// Collapse consecutive seconds with identical text into `(start, end, text)` runs.
    ///
    /// `end` is exclusive. Used when re-exporting an index as subtitles.
    pub fn runs(&self) -> Vec<(u64, u64, &str)> {
        let mut runs: Vec<(u64, u64, &str)> = Vec::new();

        for (second, text) in self.iter() {
            match runs.last_mut() {
                Some((_, end, last)) if *end == second && *last == text => *end += 1,
                _ => runs.push((second, second + 1, text)),
            }
        }

        runs
    }
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: serde::Serializer,
{
    serializer.collect_str(value)
}
