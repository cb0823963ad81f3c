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

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Error, HeaderStyle, Sheet};

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Vec<String>>,
    header_style: Option<HeaderStyle>,
}

/// A sheet kept in memory. Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    inner: Arc<Mutex<Inner>>,
    read_only: bool,
}

impl MemorySheet {
    /// A sheet that rejects every write.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Default::default()
        }
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.lock().rows.clone()
    }

    pub fn header_style(&self) -> Option<HeaderStyle> {
        self.lock().header_style
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Sheet for MemorySheet {
    fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.lock().rows.is_empty())
    }

    fn append_row(&mut self, row: &[String]) -> Result<(), Error> {
        if self.read_only {
            return Err(Error::ReadOnly);
        }
        self.lock().rows.push(row.to_vec());
        Ok(())
    }

    fn style_header(&mut self, style: &HeaderStyle) -> Result<(), Error> {
        if self.read_only {
            return Err(Error::ReadOnly);
        }
        self.lock().header_style = Some(*style);
        Ok(())
    }
}
