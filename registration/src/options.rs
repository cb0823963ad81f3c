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

/// A labelled group of selectable values. Values double as labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionGroup {
    pub label: &'static str,
    pub options: &'static [&'static str],
}

pub const KELAS_OPTIONS: [OptionGroup; 2] = [
    OptionGroup {
        label: "Kelas X",
        options: &["X-1", "X-2", "X-3", "X-4", "X-5", "X-6"],
    },
    OptionGroup {
        label: "Kelas XI",
        options: &["XI-1", "XI-2", "XI-3", "XI-4", "XI-5", "XI-6"],
    },
];

pub const JURUSAN_OPTIONS: [&str; 6] = ["TKR", "TSM", "DKV", "TKJ", "BISDIG", "DPB"];

pub fn is_kelas(value: &str) -> bool {
    KELAS_OPTIONS
        .iter()
        .any(|group| group.options.contains(&value))
}

pub fn is_jurusan(value: &str) -> bool {
    JURUSAN_OPTIONS.contains(&value)
}
