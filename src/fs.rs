use std::convert::TryFrom;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, TimeZone};
use log::debug;

use crate::cli::LsOptions;
use crate::error::{Error, Result};
use crate::format;
use crate::output;

#[derive(Debug, Clone)]
pub struct FsEntry {
    pub name: OsString,
    pub size: u64,
    pub is_dir: bool,
    pub mode: String,
    pub modified: DateTime<Local>,
}

/// Converts `time` to local time. Anything chrono cannot represent becomes the epoch.
fn local_time(time: SystemTime) -> DateTime<Local> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(d) => (i64::try_from(d.as_secs()).ok(), d.subsec_nanos()),
        Err(e) => {
            let d = e.duration();
            let secs = i64::try_from(d.as_secs()).ok().map(|s| -s);
            if d.subsec_nanos() == 0 {
                (secs, 0)
            } else {
                (secs.and_then(|s| s.checked_sub(1)), 1_000_000_000 - d.subsec_nanos())
            }
        }
    };

    secs.and_then(|s| Local.timestamp_opt(s, nanos).single())
        .unwrap_or_else(|| DateTime::from(UNIX_EPOCH))
}

impl FsEntry {
    /// Returns `None` when the entry vanished between the directory read and the stat.
    fn from_dir_entry(dir: &Path, dir_entry: &fs::DirEntry) -> Result<Option<FsEntry>> {
        let name = dir_entry.file_name();
        let meta = match dir_entry.metadata() {
            Ok(meta) => meta,
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} disappeared before stat, skipping", dir.join(&name).display());
                return Ok(None);
            }
            Err(e) => return Err(Error::from_read(&dir.join(&name), e)),
        };

        // unreadable mtimes fall back to the epoch
        let modified = local_time(meta.modified().unwrap_or(UNIX_EPOCH));

        Ok(Some(FsEntry {
            name,
            size: meta.len(),
            is_dir: meta.is_dir(),
            mode: format::permissions_string(&meta),
            modified,
        }))
    }
}

/// Reads every entry of `dir` in the order the OS returns them.
pub fn read_directory(dir: &Path) -> Result<Vec<FsEntry>> {
    let read_dir = fs::read_dir(dir).map_err(|e| Error::from_read(dir, e))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|e| Error::from_read(dir, e))?;
        if let Some(entry) = FsEntry::from_dir_entry(dir, &dir_entry)? {
            entries.push(entry);
        }
    }

    debug!("read {} entries from {}", entries.len(), dir.display());

    Ok(entries)
}

pub fn ls_print_directory<W: Write>(opts: &LsOptions, out: W) -> Result<()> {
    debug!("listing {} ({:?} sizes)", opts.path.display(), opts.size_format);

    let entries = read_directory(&opts.path)?;
    let now = Local::now();

    let rows: Vec<output::Row> = entries
        .iter()
        .map(|entry| format::format_row(entry, opts.size_format, &now))
        .collect();

    output::write_rows(out, &rows)
}
