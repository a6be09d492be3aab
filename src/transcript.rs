//! # Transcript Module
//!
//! Streams Claude Code JSONL transcripts into [`TranscriptRecord`]s and isolates
//! the most recent turn.
//!
//! Transcripts are append-only and may be cut mid-line while Claude Code is
//! still writing, so undecodable lines are skipped rather than treated as errors.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::{debug, trace};

use crate::models::TranscriptRecord;
use crate::validate::SanitizedPath;

/// Lazy line-by-line reader over a transcript.
pub struct TranscriptReader<R> {
    lines: io::Split<R>,
    line_no: usize,
    skipped: usize,
}

impl<R: BufRead> TranscriptReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Number of non-blank lines that failed to decode so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for TranscriptReader<R> {
    type Item = TranscriptRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(l) => l,
                Err(e) => {
                    debug!(line = self.line_no + 1, error = %e, "transcript read stopped");
                    return None;
                }
            };
            self.line_no += 1;
            let t = line.trim_ascii();
            if t.is_empty() {
                continue;
            }
            match serde_json::from_slice::<TranscriptRecord>(t) {
                Ok(record) => return Some(record),
                Err(e) => {
                    self.skipped += 1;
                    trace!(line = self.line_no, error = %e, "skipping undecodable transcript line");
                }
            }
        }
    }
}

/// Open the transcript for reading.
///
/// `Ok(None)` means there is no transcript at that path yet, which is a normal
/// state for a fresh session.
pub fn open_transcript(path: &SanitizedPath) -> Result<Option<TranscriptReader<BufReader<File>>>> {
    match File::open(path.as_path()) {
        Ok(file) => Ok(Some(TranscriptReader::new(BufReader::new(file)))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("open {}", path.as_path().display())),
    }
}

/// Assistant records of the latest turn, most recent first.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Turn {
    records: Vec<TranscriptRecord>,
}

impl Turn {
    pub fn records(&self) -> &[TranscriptRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Collect the assistant records that follow the last user record.
///
/// Walking forward and dropping the buffer at every user record yields the same
/// set as scanning backwards to the nearest user record, without holding the
/// whole transcript in memory. With no user record at all, every assistant
/// record belongs to the turn.
pub fn extract_turn<I>(records: I) -> Turn
where
    I: IntoIterator<Item = TranscriptRecord>,
{
    let mut pending = Vec::new();
    for record in records {
        if record.is_user() {
            pending.clear();
        } else if record.is_assistant() {
            pending.push(record);
        }
    }
    pending.reverse();
    Turn { records: pending }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn assistant(model: &str) -> String {
        format!(
            r#"{{"type":"assistant","message":{{"role":"assistant","model":"{model}","usage":{{"input_tokens":1}},"content":[]}}}}"#
        )
    }

    const USER: &str = r#"{"type":"user","message":{"role":"user","content":"go"}}"#;

    fn models(turn: &Turn) -> Vec<String> {
        turn.records()
            .iter()
            .map(|r| r.message.as_ref().unwrap().model.clone().unwrap())
            .collect()
    }

    #[test]
    fn reader_skips_blank_and_corrupt_lines() {
        let data = format!(
            "{}\n\n   \nnot json\n{}\n{{\"type\":\"assistant\",\"mess",
            assistant("a"),
            assistant("b")
        );
        let mut reader = TranscriptReader::new(Cursor::new(data));
        let records: Vec<_> = reader.by_ref().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(reader.skipped(), 2);
    }

    #[test]
    fn reader_tolerates_invalid_utf8_line() {
        let mut data = assistant("a").into_bytes();
        data.extend_from_slice(b"\n\xff\xfe\n");
        data.extend_from_slice(assistant("b").as_bytes());
        let records: Vec<_> = TranscriptReader::new(Cursor::new(data)).collect();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn reader_handles_crlf() {
        let data = format!("{}\r\n{}\r\n", assistant("a"), USER);
        let records: Vec<_> = TranscriptReader::new(Cursor::new(data)).collect();
        assert_eq!(records.len(), 2);
        assert!(records[1].is_user());
    }

    #[test]
    fn turn_stops_at_last_user_record() {
        let data = [
            USER.to_string(),
            assistant("old"),
            USER.to_string(),
            assistant("first"),
            r#"{"type":"system","content":"noise"}"#.to_string(),
            assistant("second"),
        ]
        .join("\n");
        let turn = extract_turn(TranscriptReader::new(Cursor::new(data)));
        assert_eq!(turn.len(), 2);
        assert_eq!(models(&turn), vec!["second", "first"]);
    }

    #[test]
    fn turn_without_user_record_spans_whole_history() {
        let data = [assistant("a"), assistant("b"), assistant("c")].join("\n");
        let turn = extract_turn(TranscriptReader::new(Cursor::new(data)));
        assert_eq!(models(&turn), vec!["c", "b", "a"]);
    }

    #[test]
    fn turn_is_empty_when_user_record_is_last() {
        let data = [assistant("a"), USER.to_string()].join("\n");
        let turn = extract_turn(TranscriptReader::new(Cursor::new(data)));
        assert!(turn.is_empty());
    }

    #[test]
    fn extraction_is_repeatable() {
        let data = [USER.to_string(), assistant("x"), assistant("y")].join("\n");
        let first = extract_turn(TranscriptReader::new(Cursor::new(data.clone())));
        let second = extract_turn(TranscriptReader::new(Cursor::new(data)));
        assert_eq!(first, second);
    }
}
