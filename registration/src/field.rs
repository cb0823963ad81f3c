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

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const NIK_LEN: usize = 16;
pub const NISN_LEN: usize = 10;

/// The ten inputs of the registration form.
///
/// Serialized with the camelCase keys used on the wire (`kelasRuang`, `nomorHp`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Nama,
    KelasRuang,
    Jurusan,
    Nik,
    Nisn,
    TempatLahir,
    TanggalLahir,
    Email,
    NomorHp,
    Alamat,
}

/// How raw input for a field is processed before it lands in the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    TitleCase,
    Select,
    /// Digits only, truncated to the given length.
    Digits(usize),
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Nama,
        Field::KelasRuang,
        Field::Jurusan,
        Field::Nik,
        Field::Nisn,
        Field::TempatLahir,
        Field::TanggalLahir,
        Field::Email,
        Field::NomorHp,
        Field::Alamat,
    ];

    /// JSON key of the field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Nama => "nama",
            Self::KelasRuang => "kelasRuang",
            Self::Jurusan => "jurusan",
            Self::Nik => "nik",
            Self::Nisn => "nisn",
            Self::TempatLahir => "tempatLahir",
            Self::TanggalLahir => "tanggalLahir",
            Self::Email => "email",
            Self::NomorHp => "nomorHp",
            Self::Alamat => "alamat",
        }
    }

    /// Name of the matching struct member on `RegistrationRecord`.
    pub fn ident(self) -> &'static str {
        match self {
            Self::Nama => "nama",
            Self::KelasRuang => "kelas_ruang",
            Self::Jurusan => "jurusan",
            Self::Nik => "nik",
            Self::Nisn => "nisn",
            Self::TempatLahir => "tempat_lahir",
            Self::TanggalLahir => "tanggal_lahir",
            Self::Email => "email",
            Self::NomorHp => "nomor_hp",
            Self::Alamat => "alamat",
        }
    }

    /// Looks a field up by either its JSON key or its struct member name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == name || f.ident() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Nama => "Nama Lengkap",
            Self::KelasRuang => "Kelas/Ruang",
            Self::Jurusan => "Jurusan",
            Self::Nik => "NIK",
            Self::Nisn => "NISN",
            Self::TempatLahir => "Tempat Lahir",
            Self::TanggalLahir => "Tanggal Lahir",
            Self::Email => "Email",
            Self::NomorHp => "Nomor HP",
            Self::Alamat => "Alamat Lengkap",
        }
    }

    pub fn kind(self) -> InputKind {
        match self {
            Self::Nama | Self::TempatLahir => InputKind::TitleCase,
            Self::KelasRuang | Self::Jurusan => InputKind::Select,
            Self::Nik => InputKind::Digits(NIK_LEN),
            Self::Nisn => InputKind::Digits(NISN_LEN),
            Self::TanggalLahir | Self::Email | Self::NomorHp | Self::Alamat => InputKind::Text,
        }
    }

    /// Checks a single value and returns the message shown next to the input,
    /// or `None` when the value is acceptable.
    pub fn validate(self, value: &str) -> Option<&'static str> {
        let trimmed = value.trim();
        match self {
            Self::Nama => {
                if trimmed.is_empty() {
                    return Some("Nama Lengkap wajib diisi");
                }
                if trimmed.chars().count() < 3 {
                    return Some("Nama Lengkap minimal 3 karakter");
                }
            }
            Self::Nik => {
                if value.is_empty() {
                    return Some("NIK wajib diisi");
                }
                if !is_digits_of_len(value, NIK_LEN) {
                    return Some("NIK harus 16 digit");
                }
            }
            Self::Nisn => {
                if value.is_empty() {
                    return Some("NISN wajib diisi");
                }
                if !is_digits_of_len(value, NISN_LEN) {
                    return Some("NISN harus 10 digit");
                }
            }
            Self::Email => {
                if trimmed.is_empty() {
                    return Some("Email wajib diisi");
                }
                if !EMAIL_REGEX.is_match(value) {
                    return Some("Format email tidak valid");
                }
            }
            Self::NomorHp => {
                if trimmed.is_empty() {
                    return Some("Nomor HP wajib diisi");
                }
                if trimmed.chars().count() < 11 {
                    return Some("Nomor HP minimal 11 digit");
                }
            }
            Self::TempatLahir => {
                if trimmed.is_empty() {
                    return Some("Tempat Lahir wajib diisi");
                }
            }
            Self::TanggalLahir => {
                if value.is_empty() {
                    return Some("Tanggal Lahir wajib diisi");
                }
            }
            Self::Alamat => {
                if trimmed.is_empty() {
                    return Some("Alamat Lengkap wajib diisi");
                }
                if trimmed.chars().count() < 10 {
                    return Some("Alamat Lengkap minimal 10 karakter");
                }
            }
            Self::KelasRuang => {
                if value.is_empty() {
                    return Some("Kelas/Ruang wajib dipilih");
                }
            }
            Self::Jurusan => {
                if value.is_empty() {
                    return Some("Jurusan wajib dipilih");
                }
            }
        }

        None
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

fn is_digits_of_len(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Keeps only ASCII digits and cuts the result to `len` characters.
pub fn apply_digit_mask(value: &str, len: usize) -> String {
    value.chars().filter(char::is_ascii_digit).take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nik_length() {
        assert_eq!(Field::Nik.validate("123456789012345"), Some("NIK harus 16 digit"));
        assert_eq!(Field::Nik.validate("1234567890123456"), None);
        assert_eq!(Field::Nik.validate(""), Some("NIK wajib diisi"));
        assert_eq!(Field::Nik.validate("12345678901234a6"), Some("NIK harus 16 digit"));
    }

    #[test]
    fn test_nisn_length() {
        assert_eq!(Field::Nisn.validate("123456789"), Some("NISN harus 10 digit"));
        assert_eq!(Field::Nisn.validate("1234567890"), None);
        assert_eq!(Field::Nisn.validate("12345678901"), Some("NISN harus 10 digit"));
    }

    #[test]
    fn test_email_shape() {
        assert_eq!(Field::Email.validate("a@b.c"), None);
        assert_eq!(Field::Email.validate("a@b"), Some("Format email tidak valid"));
        assert_eq!(Field::Email.validate("a.b.com"), Some("Format email tidak valid"));
        assert_eq!(Field::Email.validate("a b@c.d"), Some("Format email tidak valid"));
        assert_eq!(Field::Email.validate("   "), Some("Email wajib diisi"));
    }

    #[test]
    fn test_trimmed_lengths() {
        assert_eq!(Field::Nama.validate("  ab  "), Some("Nama Lengkap minimal 3 karakter"));
        assert_eq!(Field::Nama.validate("Abi"), None);
        assert_eq!(Field::NomorHp.validate(" 0812345678 "), Some("Nomor HP minimal 11 digit"));
        assert_eq!(Field::NomorHp.validate("08123456789"), None);
        assert_eq!(Field::Alamat.validate("Jl. Mawar"), Some("Alamat Lengkap minimal 10 karakter"));
        assert_eq!(Field::Alamat.validate("Jl. Mawar 1"), None);
    }

    #[test]
    fn test_every_field_requires_a_value() {
        for field in Field::ALL {
            assert!(field.validate("").is_some(), "{field} accepted an empty value");
        }
    }

    #[test]
    fn test_field_names() {
        assert_eq!(Field::from_name("nomorHp"), Some(Field::NomorHp));
        assert_eq!(Field::from_name("nomor_hp"), Some(Field::NomorHp));
        assert_eq!("tempatLahir".parse::<Field>().unwrap(), Field::TempatLahir);
        assert!("umur".parse::<Field>().is_err());
        assert_eq!(serde_json::to_string(&Field::KelasRuang).unwrap(), "\"kelasRuang\"");
    }

    #[test]
    fn test_digit_mask() {
        assert_eq!(apply_digit_mask("12a34-56", NIK_LEN), "123456");
        assert_eq!(apply_digit_mask("123456789012345678", NIK_LEN), "1234567890123456");
        assert_eq!(apply_digit_mask("12345678901", NISN_LEN), "1234567890");
    }
}
