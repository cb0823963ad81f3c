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

use actix_web::{error, http::StatusCode, HttpResponse};
use derive_more::{Display, Error, From};

use crate::models::registration_response::RegistrationResponse;

#[derive(Debug, Display, Error, From)]
pub enum Error {
    #[display("An internal error occured. Please try again later")]
    #[from(skip)]
    InternalError,
    #[display("The sheet is unavailable")]
    #[from(skip)]
    SheetUnavailable,
    #[display("Request body exceeds {_0} bytes")]
    #[from(skip)]
    PayloadTooLarge(#[error(not(source))] usize),
    #[display("Could not read request body: {_0}")]
    Payload(actix_web::error::PayloadError),
    #[display("{_0}")]
    InvalidPayload(serde_json::Error),
    #[display("{_0}")]
    Sheet(sheet_connector::Error),
}

impl error::ResponseError for Error {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(RegistrationResponse::failure(self))
    }

    // Failures are reported in the body, callers only ever see a well-formed 200.
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }
}
