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

use std::io::BufReader;

use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
pub use backend::*;
use rustls::ServerConfig;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};

#[cfg(not(debug_assertions))]
use simplelog::WriteLogger;

fn load_rustls_config() -> Option<ServerConfig> {
    let cert_path = std::env::var("TLS_CERT_PATH").ok()?;
    let key_path = std::env::var("TLS_KEY_PATH").ok()?;

    let cert_file = &mut BufReader::new(std::fs::File::open(&cert_path).ok()?);
    let key_file = &mut BufReader::new(std::fs::File::open(&key_path).ok()?);

    let cert_chain: Vec<_> = rustls_pemfile::certs(cert_file)
        .filter_map(|c| c.ok())
        .collect();
    let key = rustls_pemfile::private_key(key_file).ok()??;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(cert_chain, key)
        .ok()?;

    Some(config)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|builder| builder)
        .build();

    #[cfg(not(debug_assertions))]
    let write_logger = {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        std::fs::create_dir_all(&log_dir)?;
        WriteLogger::new(
            LevelFilter::Info,
            log_config.clone(),
            std::fs::File::create(format!(
                "{log_dir}/backend-{}.log",
                chrono::Local::now().format("%Y-%m-%d-%H")
            ))?,
        )
    };

    #[cfg(debug_assertions)]
    CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Debug,
        log_config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .map_err(std::io::Error::other)?;

    #[cfg(not(debug_assertions))]
    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            log_config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        write_logger,
    ])
    .map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState::new(sheet_connector::get_sheet()));

    let server = HttpServer::new(move || {
        let cors = actix_cors::Cors::permissive();
        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .app_data(state.clone())
            .service(web::scope("/api").configure(routes::configure))
    });

    let addr = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8081".to_string());

    match load_rustls_config() {
        Some(tls_config) => {
            log::info!("Listening on https://{addr}");
            server.bind_rustls_0_23(&addr, tls_config)?.run().await?;
        }
        None => {
            log::info!("No TLS certificate configured, listening on http://{addr}");
            server.bind(&addr)?.run().await?;
        }
    }

    Ok(())
}
