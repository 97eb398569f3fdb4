use crate::core::record::{
    RecordKind, TransactionProvider, TransactionRecord, coerce_amount, parse_timestamp,
};
use crate::providers::util::with_retry;
use crate::store::TokenStore;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// HTTP client for the expense tracker backend.
///
/// One client serves every screen, parameterized by the configured base URL.
/// The auth token is read from the store on each request so a login or logout
/// in between takes effect without rebuilding the client.
pub struct ExpenseApiClient {
    base_url: String,
    token_store: Arc<dyn TokenStore>,
}

/// Token and display name returned by login/signup.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    #[serde(rename = "_id")]
    id: String,
    category: Option<String>,
    title: Option<String>,
    #[serde(default)]
    amount: serde_json::Value,
    date: Option<String>,
}

impl RawTransaction {
    fn into_record(self) -> TransactionRecord {
        let category = self
            .category
            .or(self.title)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "General Transaction".to_string());

        TransactionRecord {
            id: self.id,
            category,
            amount: coerce_amount(&self.amount),
            date: self.date.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Record lists arrive either as a bare array or wrapped in an envelope with
/// the list under `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Bare(Vec<RawTransaction>),
    Enveloped {
        data: Vec<RawTransaction>,
        message: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct NewTransaction<'a> {
    category: &'a str,
    amount: f64,
    date: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: Option<String>,
}

fn list_path(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Income => "/income/getincome",
        RecordKind::Expense => "/expense/getexpense",
    }
}

fn add_path(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Income => "/income/addincome",
        RecordKind::Expense => "/expense/addexpense",
    }
}

fn delete_path(kind: RecordKind, id: &str) -> String {
    match kind {
        RecordKind::Income => format!("/income/deleteincome/{id}"),
        RecordKind::Expense => format!("/expense/deleteexpense/{id}"),
    }
}

/// Turns a non-success response into an error, preferring the backend's own
/// message when the body carries one.
async fn response_error(action: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let message = response
        .json::<MessageResponse>()
        .await
        .ok()
        .and_then(|m| m.message);
    match message {
        Some(message) => anyhow!("{} failed: {} ({})", action, message, status),
        None => anyhow!("{} failed with HTTP {}", action, status),
    }
}

impl ExpenseApiClient {
    pub fn new(base_url: &str, token_store: Arc<dyn TokenStore>) -> Self {
        ExpenseApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_store,
        }
    }

    fn auth_token(&self) -> Result<String> {
        self.token_store
            .load()?
            .ok_or_else(|| anyhow!("Not logged in. Run `xpt login` first."))
    }

    #[instrument(
        name = "AddTransaction",
        skip(self),
        fields(kind = %kind, category = %category)
    )]
    pub async fn add_record(
        &self,
        kind: RecordKind,
        category: &str,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Result<String> {
        let token = self.auth_token()?;
        let url = format!("{}{}", self.base_url, add_path(kind));
        debug!("Posting new {} record to {}", kind, url);

        let client = reqwest::Client::builder().user_agent("xpt/1.0").build()?;
        let response = client
            .post(&url)
            .bearer_auth(&token)
            .json(&NewTransaction {
                category,
                amount,
                date: date.to_rfc3339(),
            })
            .send()
            .await
            .with_context(|| format!("Failed to send add request for {kind}"))?;

        if !response.status().is_success() {
            return Err(response_error("Add", response).await);
        }

        let body = response.json::<MessageResponse>().await.ok();
        Ok(body
            .and_then(|m| m.message)
            .unwrap_or_else(|| format!("{kind} added successfully")))
    }

    #[instrument(name = "DeleteTransaction", skip(self), fields(kind = %kind, id = %id))]
    pub async fn delete_record(&self, kind: RecordKind, id: &str) -> Result<String> {
        let token = self.auth_token()?;
        let url = format!("{}{}", self.base_url, delete_path(kind, id));
        debug!("Deleting {} record at {}", kind, url);

        let client = reqwest::Client::builder().user_agent("xpt/1.0").build()?;
        let response = client
            .delete(&url)
            .bearer_auth(&token)
            .send()
            .await
            .with_context(|| format!("Failed to send delete request for {kind} id: {id}"))?;

        if !response.status().is_success() {
            return Err(response_error("Delete", response).await);
        }

        let body = response.json::<MessageResponse>().await.ok();
        Ok(body
            .and_then(|m| m.message)
            .unwrap_or_else(|| format!("{kind} deleted successfully")))
    }

    #[instrument(name = "Login", skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/auth/login", self.base_url);
        debug!("Logging in via {}", url);

        let client = reqwest::Client::builder().user_agent("xpt/1.0").build()?;
        let response = client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .context("Failed to send login request")?;

        if !response.status().is_success() {
            return Err(response_error("Login", response).await);
        }

        let auth = response
            .json::<AuthResponse>()
            .await
            .context("Failed to parse login response")?;
        Ok(AuthSession {
            token: auth.token,
            user_name: auth.user.and_then(|u| u.name),
        })
    }

    #[instrument(name = "Signup", skip(self, password), fields(email = %email))]
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/auth/signup", self.base_url);
        debug!("Signing up via {}", url);

        let client = reqwest::Client::builder().user_agent("xpt/1.0").build()?;
        let response = client
            .post(&url)
            .json(&SignupRequest {
                name,
                email,
                password,
            })
            .send()
            .await
            .context("Failed to send signup request")?;

        if !response.status().is_success() {
            return Err(response_error("Signup", response).await);
        }

        let auth = response
            .json::<AuthResponse>()
            .await
            .context("Failed to parse signup response")?;
        Ok(AuthSession {
            token: auth.token,
            user_name: auth.user.and_then(|u| u.name),
        })
    }
}

#[async_trait]
impl TransactionProvider for ExpenseApiClient {
    #[instrument(name = "TransactionFetch", skip(self), fields(kind = %kind))]
    async fn fetch(&self, kind: RecordKind) -> Result<Vec<TransactionRecord>> {
        let token = self.auth_token()?;
        let url = format!("{}{}", self.base_url, list_path(kind));
        debug!("Requesting {} records from {}", kind, url);

        let client = reqwest::Client::builder().user_agent("xpt/1.0").build()?;
        let response = with_retry(
            || async { client.get(&url).bearer_auth(&token).send().await },
            3,
            500,
        )
        .await
        .with_context(|| format!("Failed to send request for {kind} records"))?;

        if !response.status().is_success() {
            return Err(response_error("Fetch", response).await);
        }

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for {kind} records"))?;

        // Check for empty or non-JSON responses before parsing
        if response_text.trim().is_empty() {
            return Err(anyhow!("Received empty response for {} records", kind));
        }

        let parsed: ListResponse = serde_json::from_str(&response_text).with_context(|| {
            format!("Failed to parse {kind} records. Response: '{response_text}'")
        })?;
        let raw = match parsed {
            ListResponse::Bare(records) => records,
            ListResponse::Enveloped { data, message } => {
                if let Some(message) = message {
                    debug!("Backend message: {}", message);
                }
                data
            }
        };

        debug!("Fetched {} {} records", raw.len(), kind);
        Ok(raw.into_iter().map(RawTransaction::into_record).collect())
    }
}
