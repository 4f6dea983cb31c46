use crate::data::{Error, Record, STORE_HEADER};
use std::{
    fs::{File, OpenOptions},
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// The CSV file holding every `Record`, in insertion order. Nothing is
/// cached: each call goes back to the file, and the process is assumed to be
/// the only one touching it.
#[derive(Debug, Clone)]
pub(crate) struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with its header row if it doesn't exist yet.
    /// Calling it on an existing store does nothing.
    pub fn ensure_initialized(&self) -> Result<(), anyhow::Error> {
        if self.path.exists() {
            return Ok(());
        }
        let file = File::create(&self.path)?;
        write_records(file, &[])?;
        info!(path = %self.path.display(), "created fitness data file");
        Ok(())
    }

    /// Adds one row at the end of the file. The record is written as is, it
    /// is up to the caller to have validated it.
    pub fn append(&self, record: &Record) -> Result<(), anyhow::Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        // a missing or truncated file still gets its header first
        let fresh = file.metadata()?.len() == 0;
        if !fresh && !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if fresh {
            wtr.write_record(STORE_HEADER)?;
        }
        wtr.serialize(record)?;
        wtr.flush()?;
        debug!(date = %record.date, steps = record.steps, "appended record");
        Ok(())
    }

    /// Reads back every row. A missing file is `Error::StoreNotFound`, a
    /// header-only (or zero-byte) file is just an empty log.
    pub fn load_all(&self) -> Result<Vec<Record>, anyhow::Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::StoreNotFound(self.path.clone()).into())
            }
            Err(e) => return Err(e.into()),
        };
        let records = read_records(file)?;
        debug!(count = records.len(), "loaded records");
        Ok(records)
    }

    /// Replaces the whole file with `records`. The new content goes to a
    /// temporary file next to the store which is then renamed over it, so a
    /// failure halfway leaves the previous content untouched.
    pub fn rewrite(&self, records: &[Record]) -> Result<(), anyhow::Error> {
        self.replace_with(|file| write_records(file, records))?;
        info!(count = records.len(), "rewrote fitness data file");
        Ok(())
    }

    /// Fills a temporary file with `write` and renames it over the store.
    /// The temporary file is removed on any failure.
    fn replace_with(
        &self,
        write: impl FnOnce(&mut File) -> Result<(), anyhow::Error>,
    ) -> Result<(), anyhow::Error> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        write(tmp.as_file_mut())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// CSV importer for `Record`s; any row that doesn't deserialize aborts the
/// whole read with `Error::MalformedRow`.
pub(crate) fn read_records<R: std::io::Read>(reader: R) -> Result<Vec<Record>, anyhow::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: Record = result.map_err(|e| Error::MalformedRow {
            line: e.position().map_or(0, |pos| pos.line()),
            reason: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// CSV exporter for `Record`s. The header is always written, even when there
/// is no record to follow it.
pub(crate) fn write_records<W: std::io::Write>(
    writer: W,
    records: &[Record],
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(STORE_HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
