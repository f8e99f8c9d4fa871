use std::ffi::OsString;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;

use crate::error::{Error, Result};

/// Separator between a padded column and the next one.
const PADDING: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub mode: String,
    pub size: String,
    pub date: String,
    pub name: OsString,
}

impl Row {
    fn padded_fields(&self) -> [&str; 3] {
        [self.mode.as_str(), self.size.as_str(), self.date.as_str()]
    }
}

fn width(field: &str) -> usize {
    field.chars().count()
}

fn column_widths(rows: &[Row]) -> [usize; 3] {
    let mut widths = [0; 3];

    for row in rows {
        for (w, field) in widths.iter_mut().zip(row.padded_fields().iter()) {
            *w = (*w).max(width(field));
        }
    }

    widths
}

/// Renders `rows` as left-aligned columns. The name column is never padded
/// and keeps the file name's raw bytes.
pub fn render(rows: &[Row]) -> Vec<u8> {
    let widths = column_widths(rows);
    let mut acc = Vec::new();

    for row in rows {
        for (w, field) in widths.iter().zip(row.padded_fields().iter()) {
            acc.extend_from_slice(field.as_bytes());
            acc.extend_from_slice(" ".repeat(w - width(field) + PADDING).as_bytes());
        }
        acc.extend_from_slice(row.name.as_bytes());
        acc.push(b'\n');
    }

    acc
}

pub fn write_rows<W: Write>(mut out: W, rows: &[Row]) -> Result<()> {
    let rendered = render(rows);

    out.write_all(&rendered).map_err(Error::Write)?;
    out.flush().map_err(Error::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn row(mode: &str, size: &str, date: &str, name: &str) -> Row {
        Row {
            mode: mode.to_string(),
            size: size.to_string(),
            date: date.to_string(),
            name: OsString::from(name),
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_render_aligns_columns() {
        let rows = vec![
            row("-rw-r--r--", "7", "03 Mar 15:04", "abc"),
            row("drwxr-xr-x", "-", "01 Jan 2023", "a-much-longer-name-of-30-chars"),
            row("-rw-------", "1234567", "11 Nov 09:30", "x"),
        ];

        let rendered = String::from_utf8(render(&rows)).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "-rw-r--r-- 7       03 Mar 15:04 abc");
        assert_eq!(lines[1], "drwxr-xr-x -       01 Jan 2023  a-much-longer-name-of-30-chars");
        assert_eq!(lines[2], "-rw------- 1234567 11 Nov 09:30 x");

        for line in &lines {
            assert_eq!(&line[18..19], " ");
            assert_ne!(&line[19..20], " ");
        }
        let name_offsets: Vec<usize> = rows
            .iter()
            .zip(lines.iter())
            .map(|(r, l)| l.rfind(r.name.to_str().unwrap()).unwrap())
            .collect();
        assert!(name_offsets.iter().all(|&o| o == 32));
    }

    #[test]
    fn test_render_counts_characters_not_bytes() {
        let rows = vec![row("-", "1", "d", "x"), row("-", "ü", "d", "y")];

        assert_eq!(render(&rows), "- 1 d x\n- ü d y\n".as_bytes());
    }

    #[test]
    fn test_render_empty() {
        assert!(render(&[]).is_empty());
    }

    #[test]
    fn test_write_rows_keeps_order() {
        let rows = vec![row("-", "2", "d", "second"), row("-", "1", "d", "first")];
        let mut out = Vec::new();

        write_rows(&mut out, &rows).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "- 2 d second\n- 1 d first\n");
    }

    #[test]
    fn test_render_keeps_non_utf8_names() {
        use std::os::unix::ffi::OsStringExt;

        let mut rows = vec![row("-", "1", "d", "x")];
        rows[0].name = OsString::from_vec(vec![b'f', 0xff, b'o']);

        assert_eq!(render(&rows), b"- 1 d f\xffo\n".to_vec());
    }

    #[test]
    fn test_write_rows_reports_broken_output() {
        let rows = vec![row("-", "1", "d", "x")];

        let result = write_rows(BrokenPipe, &rows);

        assert!(matches!(result, Err(Error::Write(_))));
    }
}
