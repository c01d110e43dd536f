//! Merged corpus file handling.
//!
//! The output is a single CSV with two columns `text,url`, a header row
//! and a UTF-8 byte-order mark so spreadsheet tools open the Arabic text
//! correctly. Appends never repeat the BOM or the header, which is what
//! makes resumed runs write a well-formed file.
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use log::info;
use runiq::filters::{DigestFilter, Filter};
use serde::{Deserialize, Serialize};

use crate::error::Error;

const BOM: &[u8] = b"\xef\xbb\xbf";

/// Final unit of the merged corpus. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub text: String,
    pub url: String,
}

impl CorpusRecord {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Append-only corpus writer.
pub struct CorpusWriter {
    writer: csv::Writer<File>,
}

impl CorpusWriter {
    /// Open `path` for appending, creating it (BOM + header) when new
    /// or empty.
    pub fn append(path: &Path) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let empty = file.metadata()?.len() == 0;
        if empty {
            file.write_all(BOM)?;
        }
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if empty {
            writer.write_record(["text", "url"])?;
        }
        Ok(Self { writer })
    }

    pub fn write(&mut self, record: &CorpusRecord) -> Result<(), Error> {
        self.writer.serialize(record)?;
        Ok(())
    }

    /// Flush buffered rows. Called before every checkpoint write so the
    /// checkpoint never claims more rows than the file holds.
    pub fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

fn open_corpus_reader(path: &Path) -> Result<csv::Reader<BufReader<File>>, Error> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut start = [0u8; 3];
    let n = reader.read(&mut start)?;
    if &start[..n] != BOM {
        // no BOM: hand the consumed bytes back by reopening
        let file = File::open(path)?;
        reader = BufReader::new(file);
    }

    Ok(ReaderBuilder::new().has_headers(true).from_reader(reader))
}

/// Stream every row of an existing corpus through `f`, returning the row
/// count. Missing file counts as an empty corpus.
pub fn scan<F>(path: &Path, mut f: F) -> Result<u64, Error>
where
    F: FnMut(&CorpusRecord),
{
    if !path.exists() {
        return Ok(0);
    }
    let mut reader = open_corpus_reader(path)?;
    let mut rows = 0u64;
    for result in reader.deserialize::<CorpusRecord>() {
        let record = result?;
        f(&record);
        rows += 1;
    }
    Ok(rows)
}

/// Exact, case-sensitive text deduplication from `src` into `dst`,
/// keeping the first occurrence of each text.
pub fn dedup_file(src: &Path, dst: &Path) -> Result<(u64, u64), Error> {
    let mut filter = DigestFilter::default();
    let mut writer = CorpusWriter::append(dst)?;
    let mut kept = 0u64;
    let mut removed = 0u64;
    let mut write_error: Option<Error> = None;

    scan(src, |record| {
        if write_error.is_some() {
            return;
        }
        if filter.detect(record.text.as_bytes()) {
            match writer.write(record) {
                Ok(()) => kept += 1,
                Err(e) => write_error = Some(e),
            }
        } else {
            removed += 1;
        }
    })?;
    if let Some(e) = write_error {
        return Err(e);
    }
    writer.flush()?;
    Ok((kept, removed))
}

/// In-place second-pass deduplication, the safety net against digest
/// sample misses across resumed runs. Writes to a sibling temp file and
/// renames over the original.
pub fn dedup_in_place(path: &Path) -> Result<u64, Error> {
    if !path.exists() {
        return Ok(0);
    }
    let tmp = path.with_extension("dedup.tmp");
    if tmp.exists() {
        std::fs::remove_file(&tmp)?;
    }
    let (kept, removed) = dedup_file(path, &tmp)?;
    std::fs::rename(&tmp, path)?;
    if removed > 0 {
        info!("second-pass dedup removed {} rows, kept {}", removed, kept);
    }
    Ok(removed)
}
