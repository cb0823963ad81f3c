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

use actix_web::{post, web, HttpResponse};
use sheet_connector::{HeaderStyle, Sheet};

use crate::{
    error::Error,
    models::{
        registration_payload::{registration_timestamp, RegistrationPayload},
        registration_response::RegistrationResponse,
    },
    utils::{lock_sheet, read_body, web_block_unpacked},
    AppState,
};

/// Largest accepted request body. Anything bigger is answered with `success: false`.
pub const MAX_BODY_SIZE: usize = 256 * 1024;

pub const HEADERS: [&str; 10] = [
    "Waktu Daftar",
    "Nama Lengkap",
    "Kelas/Ruang",
    "Jurusan",
    "NIK",
    "NISN",
    "Tempat, Tanggal Lahir (TTL)",
    "Email",
    "Nomor HP",
    "Alamat",
];

pub const HEADER_STYLE: HeaderStyle = HeaderStyle {
    background: "#10b981",
    font_color: "#ffffff",
    bold: true,
    centered: true,
};

/**
 * Write the header if the sheet is still empty, then append the registration.
 * Callers must hold the sheet lock for the whole call.
 */
pub fn append_registration(
    sheet: &mut dyn Sheet,
    payload: &RegistrationPayload,
    registered_at: &str,
) -> Result<(), sheet_connector::Error> {
    if sheet.is_empty()? {
        let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        sheet.append_row(&headers)?;
        sheet.style_header(&HEADER_STYLE)?;
        log::info!("Initialized sheet header");
    }

    sheet.append_row(&payload.to_row(registered_at))?;

    Ok(())
}

#[utoipa::path(
    request_body = RegistrationPayload,
    responses(
        (status = 200, description = "The registration was appended (`success: true`) or could not be stored (`success: false`).", body = RegistrationResponse)
    )
)]
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Payload,
) -> Result<HttpResponse, Error> {
    let body = match read_body(body, MAX_BODY_SIZE).await {
        Ok(body) => body,
        Err(err) => {
            log::error!("Could not read registration body: {err}");
            return Err(err);
        }
    };

    let payload: RegistrationPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            log::error!("Rejected registration body: {err}");
            return Err(err.into());
        }
    };

    let registered_at = registration_timestamp(chrono::Local::now().naive_local());
    let result = web_block_unpacked(move || {
        let mut sheet = lock_sheet(&state)?;
        append_registration(&mut **sheet, &payload, &registered_at)?;
        Ok(())
    })
    .await;

    if let Err(err) = result {
        log::error!("Error storing registration: {err}");
        return Err(err);
    }

    log::info!("Stored registration");
    Ok(HttpResponse::Ok().json(RegistrationResponse::success()))
}
