/*! Raw record sources.

Scrapers are collaborators: each one appends line-delimited JSON records
to its own file, one object per line. The merge pipeline only ever reads
`text` and `url` and ignores every other field. Readers are restartable:
a line offset from a checkpoint skips already-processed records without
reparsing them.
!*/
use std::fs::File;
use std::hash::Hasher;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use twox_hash::XxHash64;

use crate::error::Error;

/// One raw scraped record. Producers may attach author/engagement
/// metadata; it is accepted and dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RawRecord {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            source: None,
        }
    }

    /// Stable identifier of a raw record within a named source, used by
    /// the checkpoint's recently-processed guard.
    pub fn id(&self, source: &str) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(source.as_bytes());
        hasher.write(self.url.as_bytes());
        hasher.write(self.text.as_bytes());
        hasher.finish()
    }
}

/// Streaming reader over one source's JSONL file.
///
/// Yields `Err` for unparseable lines (counted upstream, never fatal)
/// and skips blank lines. `offset()` reports consumed lines, blank and
/// malformed included, so a resumed reader lands exactly where the
/// previous run stopped.
pub struct JsonlReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    offset: u64,
}

impl JsonlReader {
    pub fn new(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            offset: 0,
        })
    }

    /// Open and consume `skip` lines, resuming from a checkpoint offset.
    pub fn with_offset(path: &Path, skip: u64) -> Result<Self, Error> {
        let mut reader = Self::new(path)?;
        while reader.offset < skip {
            match reader.lines.next() {
                Some(Ok(_)) => reader.offset += 1,
                Some(Err(e)) => return Err(e.into()),
                None => break,
            }
        }
        Ok(reader)
    }

    /// Lines consumed so far. Only meaningful at a batch boundary.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for JsonlReader {
    type Item = Result<RawRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(l) => l,
                Err(e) => {
                    self.offset += 1;
                    return Some(Err(e.into()));
                }
            };
            self.offset += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(serde_json::from_str::<RawRecord>(trimmed).map_err(Error::from));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn fixture(lines: &[&str]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("youtube.jsonl");
        let mut f = File::create(&path).unwrap();
        for line in lines {
            writeln!(f, "{}", line).unwrap();
        }
        (dir, path)
    }

    #[test]
    fn reads_records_and_ignores_unknown_fields() {
        let (_dir, path) = fixture(&[
            r#"{"text": "salam khoya", "url": "https://a/1", "author": "x", "likes": 12}"#,
            r#"{"text": "labas 3lik", "url": "https://a/2"}"#,
        ]);
        let records: Vec<RawRecord> = JsonlReader::new(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "salam khoya");
        assert_eq!(records[1].url, "https://a/2");
    }

    #[test]
    fn malformed_lines_are_yielded_as_errors() {
        let (_dir, path) = fixture(&[
            r#"{"text": "ok line", "url": "u"}"#,
            r#"{"text": truncated"#,
            "",
            r#"{"text": "second ok", "url": "u2"}"#,
        ]);
        let items: Vec<_> = JsonlReader::new(&path).unwrap().collect();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
        assert!(items[2].is_ok());
    }

    #[test]
    fn offset_counts_blank_and_malformed_lines() {
        let (_dir, path) = fixture(&[
            r#"{"text": "a", "url": "1"}"#,
            "",
            "not json",
            r#"{"text": "b", "url": "2"}"#,
        ]);
        let mut reader = JsonlReader::new(&path).unwrap();
        while reader.next().is_some() {}
        assert_eq!(reader.offset(), 4);
    }

    #[test]
    fn resume_from_offset() {
        let (_dir, path) = fixture(&[
            r#"{"text": "a", "url": "1"}"#,
            r#"{"text": "b", "url": "2"}"#,
            r#"{"text": "c", "url": "3"}"#,
        ]);
        let mut full = JsonlReader::new(&path).unwrap();
        full.next().unwrap().unwrap();
        full.next().unwrap().unwrap();
        let offset = full.offset();

        let rest: Vec<RawRecord> = JsonlReader::with_offset(&path, offset)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].text, "c");
    }

    #[test]
    fn record_id_depends_on_source_and_content() {
        let r = RawRecord::new("salam", "https://a/1");
        assert_eq!(r.id("youtube"), r.id("youtube"));
        assert_ne!(r.id("youtube"), r.id("tiktok"));
        assert_ne!(r.id("youtube"), RawRecord::new("salam2", "https://a/1").id("youtube"));
    }
}
