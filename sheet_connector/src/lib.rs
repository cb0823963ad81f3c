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

mod csv_sheet;
mod error;
mod memory_sheet;

pub use csv_sheet::CsvSheet;
pub use error::Error;
pub use memory_sheet::MemorySheet;

/// Visual formatting applied once to the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStyle {
    pub background: &'static str,
    pub font_color: &'static str,
    pub bold: bool,
    pub centered: bool,
}

/// An append-only table of text rows.
///
/// Rows are never read back or rewritten; the only query is whether the sheet
/// holds anything yet, which tells a writer if the header still has to be written.
pub trait Sheet: Send {
    fn is_empty(&self) -> Result<bool, Error>;

    fn append_row(&mut self, row: &[String]) -> Result<(), Error>;

    /// Formats the first row. Sheets without formatting support may ignore this.
    fn style_header(&mut self, style: &HeaderStyle) -> Result<(), Error>;
}

/**
 * Open the sheet configured by `SHEET_PATH`.
 */
pub fn get_sheet() -> CsvSheet {
    dotenvy::dotenv().ok();
    let path = std::env::var("SHEET_PATH").unwrap_or_else(|_| "registrations.csv".to_string());
    log::info!("Appending registrations to {path}");
    CsvSheet::open(path)
}

pub fn test_sheet() -> MemorySheet {
    MemorySheet::default()
}
