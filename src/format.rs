use std::fs;
use std::os::unix::fs::{FileTypeExt, PermissionsExt};

use chrono::{DateTime, Datelike, Local};

use crate::fs::FsEntry;
use crate::output::Row;

/*
Date columns follow ls: recent entries show the time of day, anything from
another calendar year shows the year instead.

    01 Jan 2024     modified in a different year
    03 Mar 15:04    modified this year

Human sizes use 1024 steps: 999B, 1.0K, 1.5K, 12.3M, 2.0G
*/

const UNITS: [&str; 7] = ["B", "K", "M", "G", "T", "P", "E"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeFormat {
    Machine,
    Human,
}

fn extract_bits_from_right(value: u32, start_pos: u32, end_pos: u32) -> u32 {
    let mask = (1 << (end_pos - start_pos)) - 1;
    (value >> start_pos) & mask
}

fn perm_mode_string(value: u32) -> String {
    let mut acc = String::new();

    acc.push(if value & 4 == 4 { 'r' } else { '-' });
    acc.push(if value & 2 == 2 { 'w' } else { '-' });
    acc.push(if value & 1 == 1 { 'x' } else { '-' });

    acc
}

fn file_type_string(file_type: fs::FileType) -> String {
    String::from(
        if file_type.is_file() {
            "-"
        } else if file_type.is_dir() {
            "d"
        } else if file_type.is_symlink() {
            "l"
        } else if file_type.is_block_device() {
            "b"
        } else if file_type.is_char_device() {
            "c"
        } else if file_type.is_fifo() {
            "p"
        } else if file_type.is_socket() {
            "s"
        } else {
            "?"
        }
    )
}

fn rwx_string(mode: u32) -> String {
    let mut acc = String::new();
    let wmode = extract_bits_from_right(mode, 0, 3);
    let gmode = extract_bits_from_right(mode, 3, 6);
    let umode = extract_bits_from_right(mode, 6, 9);

    acc.push_str(&perm_mode_string(umode));
    acc.push_str(&perm_mode_string(gmode));
    acc.push_str(&perm_mode_string(wmode));

    acc
}

/// Builds the ten character mode text for `meta`, e.g. `drwxr-xr-x`.
pub fn permissions_string(meta: &fs::Metadata) -> String {
    let mut acc = file_type_string(meta.file_type());
    acc.push_str(&rwx_string(meta.permissions().mode()));
    acc
}

fn human_size_string(len: u64) -> String {
    if len < 1024 {
        return format!("{}B", len);
    }

    let mut value = len as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1}{}", value, UNITS[unit])
}

pub fn size_string(entry: &FsEntry, size_format: SizeFormat) -> String {
    if entry.is_dir {
        return String::from("-");
    }

    match size_format {
        SizeFormat::Machine => format!("{}", entry.size),
        SizeFormat::Human => human_size_string(entry.size),
    }
}

pub fn timestamp(modified: &DateTime<Local>, now: &DateTime<Local>) -> String {
    let format = if modified.year() != now.year() {
        "%m %b %Y"
    } else {
        "%m %b %H:%M"
    };

    modified.format(format).to_string()
}

pub fn mode_string(entry: &FsEntry) -> String {
    entry.mode.clone()
}

pub fn format_row(entry: &FsEntry, size_format: SizeFormat, now: &DateTime<Local>) -> Row {
    Row {
        mode: mode_string(entry),
        size: size_string(entry, size_format),
        date: timestamp(&entry.modified, now),
        name: entry.name.clone(),
    }
}
