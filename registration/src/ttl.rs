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

use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

pub const PLACE_PLACEHOLDER: &str = "[Tempat]";
pub const DATE_PLACEHOLDER: &str = "[DD/MM/YYYY]";

/// Builds the combined place and date of birth ("TTL") string, e.g.
/// `Jakarta, 15 Januari 2005`.
///
/// This is the only implementation: the form preview and the stored sheet row
/// both go through it, so what the user sees is what gets written.
pub fn format_ttl(place: &str, date: &str) -> String {
    if place.is_empty() && date.is_empty() {
        return String::new();
    }

    let mut ttl = if place.is_empty() {
        PLACE_PLACEHOLDER.to_string()
    } else {
        place.to_string()
    };

    ttl.push_str(", ");
    if date.is_empty() {
        ttl.push_str(DATE_PLACEHOLDER);
    } else {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(date) => ttl.push_str(&format_date(date)),
            Err(_err) => {
                log::debug!("Keeping unparsable date of birth {date:?} as entered");
                ttl.push_str(date);
            }
        }
    }

    ttl
}

fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}
