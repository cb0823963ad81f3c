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

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::field::Field;

/// Prefixed to the phone number before it is sent, so spreadsheet software keeps
/// the leading zero.
pub const PHONE_MARKER: char = '\'';

/// One registration as entered in the form. Every value is kept as text; the date
/// of birth is an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    #[validate(custom(function = "validate_nama"))]
    pub nama: String,
    #[validate(custom(function = "validate_kelas_ruang"))]
    pub kelas_ruang: String,
    #[validate(custom(function = "validate_jurusan"))]
    pub jurusan: String,
    #[validate(custom(function = "validate_nik"))]
    pub nik: String,
    #[validate(custom(function = "validate_nisn"))]
    pub nisn: String,
    #[validate(custom(function = "validate_tempat_lahir"))]
    pub tempat_lahir: String,
    #[validate(custom(function = "validate_tanggal_lahir"))]
    pub tanggal_lahir: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(custom(function = "validate_nomor_hp"))]
    pub nomor_hp: String,
    #[validate(custom(function = "validate_alamat"))]
    pub alamat: String,
}

impl RegistrationRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Nama => &self.nama,
            Field::KelasRuang => &self.kelas_ruang,
            Field::Jurusan => &self.jurusan,
            Field::Nik => &self.nik,
            Field::Nisn => &self.nisn,
            Field::TempatLahir => &self.tempat_lahir,
            Field::TanggalLahir => &self.tanggal_lahir,
            Field::Email => &self.email,
            Field::NomorHp => &self.nomor_hp,
            Field::Alamat => &self.alamat,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Nama => &mut self.nama,
            Field::KelasRuang => &mut self.kelas_ruang,
            Field::Jurusan => &mut self.jurusan,
            Field::Nik => &mut self.nik,
            Field::Nisn => &mut self.nisn,
            Field::TempatLahir => &mut self.tempat_lahir,
            Field::TanggalLahir => &mut self.tanggal_lahir,
            Field::Email => &mut self.email,
            Field::NomorHp => &mut self.nomor_hp,
            Field::Alamat => &mut self.alamat,
        };
        *slot = value;
    }

    /// Copy of the record as it goes over the wire.
    pub fn with_protected_phone(&self) -> Self {
        Self {
            nomor_hp: format!("{PHONE_MARKER}{}", self.nomor_hp),
            ..self.clone()
        }
    }
}

fn check(field: Field, value: &str) -> Result<(), ValidationError> {
    match field.validate(value) {
        Some(message) => Err(ValidationError::new(field.key()).with_message(message.into())),
        None => Ok(()),
    }
}

fn validate_nama(value: &str) -> Result<(), ValidationError> {
    check(Field::Nama, value)
}

fn validate_kelas_ruang(value: &str) -> Result<(), ValidationError> {
    check(Field::KelasRuang, value)
}

fn validate_jurusan(value: &str) -> Result<(), ValidationError> {
    check(Field::Jurusan, value)
}

fn validate_nik(value: &str) -> Result<(), ValidationError> {
    check(Field::Nik, value)
}

fn validate_nisn(value: &str) -> Result<(), ValidationError> {
    check(Field::Nisn, value)
}

fn validate_tempat_lahir(value: &str) -> Result<(), ValidationError> {
    check(Field::TempatLahir, value)
}

fn validate_tanggal_lahir(value: &str) -> Result<(), ValidationError> {
    check(Field::TanggalLahir, value)
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    check(Field::Email, value)
}

fn validate_nomor_hp(value: &str) -> Result<(), ValidationError> {
    check(Field::NomorHp, value)
}

fn validate_alamat(value: &str) -> Result<(), ValidationError> {
    check(Field::Alamat, value)
}
