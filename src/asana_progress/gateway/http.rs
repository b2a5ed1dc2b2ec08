//! Blocking HTTP client for the Asana REST API.
//!
//! Responses are wrapped in a `data` envelope. Collections are paginated: each page
//! carries `next_page.offset` until the last one, which carries `next_page: null`.
//! Errors come back as `{"errors": [{"message": ...}]}`.

use super::{Gateway, WORKSPACE_FIELDS};
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::model::{Project, StatusUpdate, Task, User, Workspace};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

type Query = Vec<(&'static str, String)>;

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct Page<T> {
    data: Vec<T>,
    #[serde(default)]
    next_page: Option<NextPage>,
}

#[derive(Deserialize)]
struct NextPage {
    offset: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct HttpGateway {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl HttpGateway {
    pub fn new(config: &TrackerConfig, token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            TrackerError::Connectivity("access token contains invalid characters".into())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("asana-progress/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TrackerError::Connectivity(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// Lazily walks every page of a collection endpoint.
    pub fn pages<T: DeserializeOwned>(&self, path: &str, fields: &[&str]) -> Pages<'_, T> {
        self.pages_with(path, fields, Vec::new())
    }

    fn pages_with<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[&str],
        mut query: Query,
    ) -> Pages<'_, T> {
        query.push(("opt_fields", fields.join(",")));
        query.push(("limit", self.page_size.to_string()));
        Pages {
            gateway: self,
            path: path.to_string(),
            query,
            buffer: Vec::new().into_iter(),
            next_offset: None,
            done: false,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| TrackerError::api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TrackerError::api_status(
                status.as_u16(),
                upstream_message(status, &body),
            ));
        }

        response
            .json::<T>()
            .map_err(|e| TrackerError::api(format!("invalid response from {}: {}", path, e)))
    }
}

/// The upstream `errors[].message` text, else the status reason.
fn upstream_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; "),
        _ => match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => format!("HTTP {}", status.as_u16()),
        },
    }
}

/// Iterator over the records of a paginated collection.
///
/// Pages are fetched on demand. After a failed page the iterator yields the error
/// once and then ends.
pub struct Pages<'a, T> {
    gateway: &'a HttpGateway,
    path: String,
    query: Query,
    buffer: std::vec::IntoIter<T>,
    next_offset: Option<String>,
    done: bool,
}

impl<T: DeserializeOwned> Iterator for Pages<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }

            let mut query = self.query.clone();
            if let Some(offset) = self.next_offset.take() {
                query.push(("offset", offset));
            }

            match self.gateway.get_json::<Page<T>>(&self.path, &query) {
                Ok(page) => {
                    debug!(path = %self.path, records = page.data.len(), "page");
                    self.next_offset = page.next_page.map(|next| next.offset);
                    self.done = self.next_offset.is_none();
                    self.buffer = page.data.into_iter();
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl Gateway for HttpGateway {
    fn me(&self) -> Result<User> {
        let query = [("opt_fields", "name,email".to_string())];
        let envelope: Envelope<User> = self.get_json("users/me", &query)?;
        Ok(envelope.data)
    }

    fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        self.pages("workspaces", WORKSPACE_FIELDS).collect()
    }

    fn list_projects(&self, workspace_gid: &str, fields: &[&str]) -> Result<Vec<Project>> {
        self.pages_with(
            "projects",
            fields,
            vec![("workspace", workspace_gid.to_string())],
        )
        .collect()
    }

    fn list_tasks(&self, project_gid: &str, fields: &[&str]) -> Result<Vec<Task>> {
        self.pages(&format!("projects/{}/tasks", project_gid), fields)
            .collect()
    }

    fn list_status_updates(
        &self,
        project_gid: &str,
        fields: &[&str],
    ) -> Result<Vec<StatusUpdate>> {
        self.pages(&format!("projects/{}/project_statuses", project_gid), fields)
            .collect()
    }
}
