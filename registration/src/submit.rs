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

use std::future::Future;

use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8081/api/register";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint_url: String,
}

impl ClientConfig {
    /**
     * Reads the endpoint from `REGISTRATION_ENDPOINT`, falling back to the local backend.
     */
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let endpoint_url =
            std::env::var("REGISTRATION_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        Self { endpoint_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Sends a serialized registration somewhere. One call per user-initiated submit.
pub trait Transport {
    fn post_json(&self, url: &str, body: String) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Body returned by the ingestion endpoint.
#[derive(Debug, Deserialize)]
pub struct EndpointStatus {
    pub success: bool,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    inspect_response: bool,
}

impl HttpTransport {
    /// Fire-and-forget: the response is dropped without being read, only a failed
    /// request counts as an error.
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            inspect_response: false,
        })
    }

    /// Reads the endpoint's `{ success, message }` answer and reports
    /// `success: false` or a non-2xx status as an error.
    pub fn inspecting() -> anyhow::Result<Self> {
        Ok(Self {
            inspect_response: true,
            ..Self::new()?
        })
    }
}

impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: String) -> anyhow::Result<()> {
        log::debug!("POST: {url}");
        let resp = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        if !self.inspect_response {
            return Ok(());
        }

        if !resp.status().is_success() {
            return Err(anyhow::anyhow!(
                "registration endpoint answered with {}",
                resp.status()
            ));
        }

        let status: EndpointStatus = resp.json().await?;
        if !status.success {
            return Err(anyhow::Error::msg(status.message));
        }

        Ok(())
    }
}
