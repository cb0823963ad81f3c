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

use chrono::NaiveDateTime;
use registration::format_ttl;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A registration as posted by the form.
///
/// Every key is optional. Anything missing or falsy (`null`, `false`, `0`, `""`)
/// ends up as an empty cell.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationPayload {
    #[serde(deserialize_with = "lenient_text")]
    pub nama: String,
    #[serde(deserialize_with = "lenient_text")]
    pub kelas_ruang: String,
    #[serde(deserialize_with = "lenient_text")]
    pub jurusan: String,
    #[serde(deserialize_with = "lenient_text")]
    pub nik: String,
    #[serde(deserialize_with = "lenient_text")]
    pub nisn: String,
    #[serde(deserialize_with = "lenient_text")]
    pub tempat_lahir: String,
    /// ISO date, `YYYY-MM-DD`
    #[serde(deserialize_with = "lenient_text")]
    pub tanggal_lahir: String,
    #[serde(deserialize_with = "lenient_text")]
    pub email: String,
    /// Usually prefixed with `'` by the form.
    #[serde(deserialize_with = "lenient_text")]
    pub nomor_hp: String,
    #[serde(deserialize_with = "lenient_text")]
    pub alamat: String,
}

impl RegistrationPayload {
    /// The sheet row for this registration, with place and date of birth merged
    /// into one cell.
    pub fn to_row(&self, registered_at: &str) -> Vec<String> {
        vec![
            registered_at.to_string(),
            self.nama.clone(),
            self.kelas_ruang.clone(),
            self.jurusan.clone(),
            self.nik.clone(),
            self.nisn.clone(),
            format_ttl(&self.tempat_lahir, &self.tanggal_lahir),
            self.email.clone(),
            self.nomor_hp.clone(),
            self.alamat.clone(),
        ]
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s,
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        other => other.to_string(),
    };

    Ok(text)
}

/// Registration time in the Indonesian locale layout, e.g. `5/1/2025, 09.03.07`.
pub fn registration_timestamp(now: NaiveDateTime) -> String {
    now.format("%-d/%-m/%Y, %H.%M.%S").to_string()
}
