/* pkg-registration
 * Copyright (C) 2024 Frederic Henrichs <frederic@tinkerforge.com>
 *
 * This library is free software; you can redistribute it and/or
 * modify it under the terms of the GNU Lesser General Public
 * License as published by the Free Software Foundation; either
 * version 2 of the License, or (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public
 * License along with this library; if not, write to the
 * Free Software Foundation, Inc., 59 Temple Place - Suite 330,
 * Boston, MA 02111-1307, USA.
 */

use std::{
    fs::OpenOptions,
    io::ErrorKind,
    path::PathBuf,
};

use crate::{Error, HeaderStyle, Sheet};

/// A sheet stored as a CSV file. The file is created on the first append.
#[derive(Debug, Clone)]
pub struct CsvSheet {
    path: PathBuf,
}

impl CsvSheet {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Sheet for CsvSheet {
    // Only the file size is looked at, existing rows are never decoded.
    fn is_empty(&self) -> Result<bool, Error> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(true),
            Err(err) => Err(err.into()),
        }
    }

    fn append_row(&mut self, row: &[String]) -> Result<(), Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;

        Ok(())
    }

    fn style_header(&mut self, style: &HeaderStyle) -> Result<(), Error> {
        log::debug!("CSV sheets carry no formatting, ignoring {style:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = CsvSheet::open(dir.path().join("missing.csv"));
        assert!(sheet.is_empty().unwrap());
    }

    #[test]
    fn test_zero_byte_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        std::fs::write(&path, b"").unwrap();
        assert!(CsvSheet::open(&path).is_empty().unwrap());
    }

    #[test]
    fn test_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        let mut sheet = CsvSheet::open(&path);

        sheet.append_row(&row(&["Nama", "Tempat, Tanggal Lahir (TTL)"])).unwrap();
        sheet.append_row(&row(&["Budi", "Jakarta, 15 Januari 2005"])).unwrap();
        sheet.append_row(&row(&["Siti", ""])).unwrap();
        assert!(!sheet.is_empty().unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            [
                "Nama,\"Tempat, Tanggal Lahir (TTL)\"",
                "Budi,\"Jakarta, 15 Januari 2005\"",
                "Siti,",
            ]
        );

        // a fresh handle sees the same file
        assert!(!CsvSheet::open(&path).is_empty().unwrap());
    }

    #[test]
    fn test_non_utf8_rows_do_not_block_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        std::fs::write(&path, b"Waktu Daftar\n\xff\xfe,x\n").unwrap();

        let mut sheet = CsvSheet::open(&path);
        assert!(!sheet.is_empty().unwrap());
        sheet.append_row(&row(&["Budi", "TKJ"])).unwrap();

        let content = std::fs::read(&path).unwrap();
        assert!(content.ends_with(b"\xff\xfe,x\nBudi,TKJ\n"));
    }

    #[test]
    fn test_leading_quote_survives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        let mut sheet = CsvSheet::open(&path);
        sheet.append_row(&row(&["'081234567890"])).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "'081234567890");
    }
}
