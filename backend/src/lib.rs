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

use std::sync::Mutex;

use sheet_connector::Sheet;

pub mod error;
pub mod models;
pub mod routes;
pub mod utils;

pub struct AppState {
    pub sheet: Mutex<Box<dyn Sheet>>,
}

impl AppState {
    pub fn new(sheet: impl Sheet + 'static) -> Self {
        Self {
            sheet: Mutex::new(Box::new(sheet)),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use actix_web::web::{self, ServiceConfig};
    use super::*;

    pub fn configure_with(sheet: impl Sheet + 'static) -> impl FnOnce(&mut ServiceConfig) {
        move |cfg| {
            let state = web::Data::new(AppState::new(sheet));
            cfg.app_data(state);
        }
    }

    pub fn configure(cfg: &mut ServiceConfig) {
        configure_with(sheet_connector::test_sheet())(cfg)
    }

    #[actix_web::test]
    async fn test_configure() {
        use actix_web::{test, App};

        let app = App::new()
            .configure(configure)
            .service(routes::register::register);
        let app = test::init_service(app).await;
        let req = test::TestRequest::post()
            .uri("/register")
            .set_payload("{}")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
