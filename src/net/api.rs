//! REST access layer for the invoice API.
//!
//! ARCHITECTURE
//! ============
//! All network I/O funnels through one [`ApiClient`]. Each call passes two
//! interceptors in fixed order:
//!
//! 1. request: read the persisted `token` and, when present, send it as
//!    `Authorization: Bearer <token>`;
//! 2. response: on 401, clear the persisted `token` and `user` entries and
//!    broadcast a [`SessionExpired`] event before failing the call.
//!
//! The 401 path is independent of the session store. The transport never
//! navigates anywhere itself; hosts subscribe with
//! [`ApiClient::subscribe_expired`] and route to [`LOGIN_ROUTE`].
//!
//! ERROR HANDLING
//! ==============
//! Every other non-2xx status, transport failure or undecodable body is
//! returned to the caller as an [`ApiError`]. There are no retries.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

use super::error::ApiError;
use super::types::{
    DashboardMetrics, Invoice, InvoiceQuery, InvoiceStats, InvoiceUpdate, LoginRequest, RegisterRequest, Supplier,
    SupplierCreate, SupplierQuery, SupplierUpdate, Token, UserRecord,
};
use crate::config::ClientConfig;
use crate::storage::{KeyValueStore, SESSION_KEYS, TOKEN_KEY};

/// Route hosts navigate to after the session expires.
pub const LOGIN_ROUTE: &str = "/login";

/// Upload extensions the server accepts, lowercase, without the dot.
pub const ALLOWED_UPLOAD_EXTENSIONS: [&str; 5] = ["pdf", "xml", "png", "jpg", "jpeg"];

const EXPIRED_CHANNEL_CAPACITY: usize = 16;

const AUTH_LOGIN_PATH: &str = "/api/v1/auth/login";
const AUTH_REGISTER_PATH: &str = "/api/v1/auth/register";
const AUTH_ME_PATH: &str = "/api/v1/auth/me";
const INVOICES_PATH: &str = "/api/v1/invoices/";
const INVOICE_UPLOAD_PATH: &str = "/api/v1/invoices/upload";
const INVOICE_STATS_PATH: &str = "/api/v1/invoices/stats/overview";
const DASHBOARD_METRICS_PATH: &str = "/api/v1/invoices/dashboard/metrics";
const SUPPLIERS_PATH: &str = "/api/v1/suppliers/";

fn invoice_path(id: i64) -> String {
    format!("/api/v1/invoices/{id}")
}

fn invoice_approve_path(id: i64) -> String {
    format!("/api/v1/invoices/{id}/approve")
}

fn invoice_reject_path(id: i64) -> String {
    format!("/api/v1/invoices/{id}/reject")
}

fn supplier_path(id: i64) -> String {
    format!("/api/v1/suppliers/{id}")
}

/// Emitted once per 401 response, after persisted session state is cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionExpired {
    /// Where the host should navigate (always [`LOGIN_ROUTE`]).
    pub redirect_to: &'static str,
    /// API path whose response triggered the expiry.
    pub path: String,
}

// =============================================================================
// CLIENT
// =============================================================================

/// The single configured HTTP client for the invoice API.
///
/// Cheap to clone; clones share the connection pool, the storage handle and
/// the session-expired channel.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn KeyValueStore>,
    expired: broadcast::Sender<SessionExpired>,
}

impl ApiClient {
    /// Build a client for `config.base_url` reading tokens from `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        let (expired, _) = broadcast::channel(EXPIRED_CHANNEL_CAPACITY);

        Ok(Self { http, base_url: config.base_url.clone(), storage, expired })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Subscribe to [`SessionExpired`] events. Only events sent after the
    /// call are received.
    #[must_use]
    pub fn subscribe_expired(&self) -> broadcast::Receiver<SessionExpired> {
        self.expired.subscribe()
    }

    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    #[must_use]
    pub fn invoices(&self) -> InvoicesApi<'_> {
        InvoicesApi { client: self }
    }

    #[must_use]
    pub fn suppliers(&self) -> SuppliersApi<'_> {
        SuppliersApi { client: self }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request interceptor.
    fn attach_token(&self, request: RequestBuilder) -> RequestBuilder {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(error) => {
                tracing::warn!(%error, "token unreadable; sending request without credentials");
                request
            }
        }
    }

    /// Response interceptor.
    async fn inspect(&self, method: &Method, path: &str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api response");

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session(path);
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        Ok(response)
    }

    fn expire_session(&self, path: &str) {
        tracing::warn!(path, "API answered 401; clearing persisted session");
        if let Err(error) = self.storage.remove_many(&SESSION_KEYS) {
            tracing::error!(%error, "failed to clear persisted session");
        }
        // No subscribers is not an error: the storage side effect already happened.
        let _ = self.expired.send(SessionExpired { redirect_to: LOGIN_ROUTE, path: path.to_owned() });
    }

    async fn send<F>(&self, method: Method, path: &str, build: F) -> Result<Response, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let request = build(self.http.request(method.clone(), self.url(path)));
        let request = self.attach_token(request);
        let response = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        self.inspect(&method, path, response).await
    }

    async fn json<T, F>(&self, method: Method, path: &str, build: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let response = self.send(method, path, build).await?;
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        decode(&text)
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

fn check_upload_extension(file_name: &Path) -> Result<(), ApiError> {
    let extension = file_name
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ALLOWED_UPLOAD_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(());
    }
    let extension = if extension.is_empty() { extension } else { format!(".{extension}") };
    Err(ApiError::UnsupportedFileType { extension })
}

// =============================================================================
// AUTH
// =============================================================================

/// `/api/v1/auth/*` endpoints.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl AuthApi<'_> {
    /// `POST /api/v1/auth/login`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn login(&self, username: &str, password: &str) -> Result<Token, ApiError> {
        let body = LoginRequest { username: username.to_owned(), password: password.to_owned() };
        self.client.json(Method::POST, AUTH_LOGIN_PATH, |req| req.json(&body)).await
    }

    /// `POST /api/v1/auth/register`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn register(&self, user: &RegisterRequest) -> Result<UserRecord, ApiError> {
        self.client.json(Method::POST, AUTH_REGISTER_PATH, |req| req.json(user)).await
    }

    /// `GET /api/v1/auth/me`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn current_user(&self) -> Result<UserRecord, ApiError> {
        self.client.json(Method::GET, AUTH_ME_PATH, |req| req).await
    }
}

// =============================================================================
// INVOICES
// =============================================================================

/// `/api/v1/invoices/*` endpoints.
pub struct InvoicesApi<'a> {
    client: &'a ApiClient,
}

impl InvoicesApi<'_> {
    /// `GET /api/v1/invoices/` with optional `skip`, `limit`, `status`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn list(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, ApiError> {
        self.client.json(Method::GET, INVOICES_PATH, |req| req.query(query)).await
    }

    /// `GET /api/v1/invoices/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn get(&self, id: i64) -> Result<Invoice, ApiError> {
        self.client.json(Method::GET, &invoice_path(id), |req| req).await
    }

    /// Upload a document from disk as multipart field `file`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnsupportedFileType`] before any I/O when the
    /// extension is not accepted, [`ApiError::UploadRead`] when the file
    /// cannot be read, otherwise the usual request errors.
    pub async fn upload(&self, path: &Path) -> Result<Invoice, ApiError> {
        check_upload_extension(path)?;
        let file_name = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_owned();
        let bytes = tokio::fs::read(path).await.map_err(|e| ApiError::UploadRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.upload_bytes(&file_name, bytes).await
    }

    /// `POST /api/v1/invoices/upload` with in-memory document bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnsupportedFileType`] for unaccepted extensions,
    /// otherwise the usual request errors.
    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> Result<Invoice, ApiError> {
        check_upload_extension(Path::new(file_name))?;
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_owned()));
        self.client.json(Method::POST, INVOICE_UPLOAD_PATH, |req| req.multipart(form)).await
    }

    /// `PUT /api/v1/invoices/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn update(&self, id: i64, update: &InvoiceUpdate) -> Result<Invoice, ApiError> {
        self.client.json(Method::PUT, &invoice_path(id), |req| req.json(update)).await
    }

    /// `POST /api/v1/invoices/{id}/approve`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn approve(&self, id: i64) -> Result<Invoice, ApiError> {
        self.client.json(Method::POST, &invoice_approve_path(id), |req| req).await
    }

    /// `POST /api/v1/invoices/{id}/reject?reason=...`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn reject(&self, id: i64, reason: &str) -> Result<Invoice, ApiError> {
        self.client
            .json(Method::POST, &invoice_reject_path(id), |req| req.query(&[("reason", reason)]))
            .await
    }

    /// `GET /api/v1/invoices/stats/overview`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn stats(&self) -> Result<InvoiceStats, ApiError> {
        self.client.json(Method::GET, INVOICE_STATS_PATH, |req| req).await
    }

    /// `GET /api/v1/invoices/dashboard/metrics`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        self.client.json(Method::GET, DASHBOARD_METRICS_PATH, |req| req).await
    }
}

// =============================================================================
// SUPPLIERS
// =============================================================================

/// `/api/v1/suppliers/*` endpoints.
pub struct SuppliersApi<'a> {
    client: &'a ApiClient,
}

impl SuppliersApi<'_> {
    /// `GET /api/v1/suppliers/`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn list(&self, query: &SupplierQuery) -> Result<Vec<Supplier>, ApiError> {
        self.client.json(Method::GET, SUPPLIERS_PATH, |req| req.query(query)).await
    }

    /// `GET /api/v1/suppliers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn get(&self, id: i64) -> Result<Supplier, ApiError> {
        self.client.json(Method::GET, &supplier_path(id), |req| req).await
    }

    /// `POST /api/v1/suppliers/`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn create(&self, supplier: &SupplierCreate) -> Result<Supplier, ApiError> {
        self.client.json(Method::POST, SUPPLIERS_PATH, |req| req.json(supplier)).await
    }

    /// `PUT /api/v1/suppliers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or bad body.
    pub async fn update(&self, id: i64, update: &SupplierUpdate) -> Result<Supplier, ApiError> {
        self.client.json(Method::PUT, &supplier_path(id), |req| req.json(update)).await
    }

    /// `DELETE /api/v1/suppliers/{id}`. The server answers 204 with no body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.send(Method::DELETE, &supplier_path(id), |req| req).await?;
        Ok(())
    }
}
