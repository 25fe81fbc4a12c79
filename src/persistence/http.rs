//! REST backend
//!
//! Blocking reqwest client (no async runtime required; the sheet runtime
//! already calls backends from worker threads).
//!
//! Endpoints, relative to the configured base URL:
//! - `GET    {base}`       → `[Item]`
//! - `POST   {base}`       `{name, value}` → `Item`
//! - `PUT    {base}/{id}`  `{name, value}` → `Item`
//! - `DELETE {base}/{id}`

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Serialize;

use super::{PersistError, Persistence};
use crate::model::item::{Item, ItemId};

#[derive(Serialize)]
struct ItemBody<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpStore {
    http: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PersistError> {
        let http = Client::builder()
            .user_agent(format!("itemsheet/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| PersistError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &ItemId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Turn non-2xx responses into errors
    fn check(response: Response, id: Option<&ItemId>) -> Result<Response, PersistError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(PersistError::NotFound(id.clone()));
            }
        }
        let body = response.text().unwrap_or_default();
        Err(PersistError::Http {
            status: status.as_u16(),
            body,
        })
    }

    fn parse_item(response: Response) -> Result<Item, PersistError> {
        response
            .json::<Item>()
            .map_err(|e| PersistError::Parse(e.to_string()))
    }
}

impl Persistence for HttpStore {
    fn list(&self) -> Result<Vec<Item>, PersistError> {
        let response = self
            .http
            .get(&self.base_url)
            .send()
            .map_err(|e| PersistError::Network(e.to_string()))?;
        Self::check(response, None)?
            .json::<Vec<Item>>()
            .map_err(|e| PersistError::Parse(e.to_string()))
    }

    fn create(&self, name: &str, value: &str) -> Result<Item, PersistError> {
        let response = self
            .http
            .post(&self.base_url)
            .json(&ItemBody { name, value })
            .send()
            .map_err(|e| PersistError::Network(e.to_string()))?;
        Self::parse_item(Self::check(response, None)?)
    }

    fn update(&self, id: &ItemId, name: &str, value: &str) -> Result<Item, PersistError> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(&ItemBody { name, value })
            .send()
            .map_err(|e| PersistError::Network(e.to_string()))?;
        Self::parse_item(Self::check(response, Some(id))?)
    }

    fn remove(&self, id: &ItemId) -> Result<(), PersistError> {
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .map_err(|e| PersistError::Network(e.to_string()))?;
        Self::check(response, Some(id))?;
        Ok(())
    }
}
