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

use std::sync::MutexGuard;

use actix_web::web;
use futures_util::StreamExt;
use sheet_connector::Sheet;

use crate::{error::Error, AppState};

pub fn lock_sheet(state: &AppState) -> Result<MutexGuard<'_, Box<dyn Sheet>>, Error> {
    match state.sheet.lock() {
        Ok(sheet) => Ok(sheet),
        Err(_err) => Err(Error::SheetUnavailable),
    }
}

/**
 * Collect a request body, giving up as soon as it grows past `limit` bytes.
 */
pub async fn read_body(mut payload: web::Payload, limit: usize) -> Result<web::BytesMut, Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > limit {
            return Err(Error::PayloadTooLarge(limit));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

pub async fn web_block_unpacked<F, R>(f: F) -> Result<R, Error>
where
    F: FnOnce() -> Result<R, Error> + Send + 'static,
    R: Send + 'static,
{
    match web::block(f).await {
        Ok(res) => res,
        Err(_err) => Err(Error::InternalError),
    }
}

#[cfg(test)]
mod tests {
    use sheet_connector::MemorySheet;

    use super::*;

    #[actix_web::test]
    async fn test_web_block_unpacked() {
        assert_eq!(web_block_unpacked(|| Ok(3)).await.unwrap(), 3);
        let err = web_block_unpacked(|| -> Result<(), Error> { Err(Error::SheetUnavailable) })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SheetUnavailable));
    }

    #[test]
    fn test_poisoned_sheet() {
        let state = std::sync::Arc::new(AppState::new(MemorySheet::default()));
        let cpy = state.clone();
        let _ = std::thread::spawn(move || {
            let _guard = cpy.sheet.lock().unwrap();
            panic!("poison");
        })
        .join();

        assert!(matches!(lock_sheet(&state), Err(Error::SheetUnavailable)));
    }
}
