// API client module: a small blocking HTTP client for the ClickUp REST
// API. Every call is a single synchronous request; failures come back as
// `Error` categories and are never retried here.

use crate::error::{Error, Result};
use crate::model::{
    Folder, Space, Task, TaskDraft, TaskFilters, TaskList, TaskPatch, User, Workspace,
};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com/api/v2";
const BASE_URL_ENV: &str = "CLICKUP_API_URL";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Holds a reqwest blocking client with the token baked into its default
/// headers, and the base URL every path is appended to.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the public API, or for `CLICKUP_API_URL` when
    /// that variable is set.
    pub fn new(api_token: &str) -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::with_base_url(api_token, &base_url)
    }

    pub fn with_base_url(api_token: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .default_headers(auth_headers(api_token)?)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue one request and return the decoded JSON body. Non-2xx statuses
    /// are turned into their error category before the body is parsed.
    pub fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        log::debug!("{method} {path}");
        let res = req.send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                Error::ConnectionFailure(e)
            } else {
                Error::Http(e)
            }
        })?;

        let status = res.status();
        log::debug!("{method} {path} -> {status}");
        if !status.is_success() {
            let text = res.text().unwrap_or_else(|_| "".into());
            return Err(status_error(status, path, text));
        }

        let text = res.text()?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.request::<Value>(Method::GET, path, query, None)
    }

    /// The account behind the token, unwrapped from its `user` envelope.
    pub fn get_user(&self) -> Result<User> {
        let mut data = self.get("/user", &[])?;
        match data.get_mut("user").map(Value::take) {
            Some(user) if user.is_object() => Ok(serde_json::from_value(user)?),
            _ => Err(Error::UserUnavailable),
        }
    }

    pub fn get_teams(&self) -> Result<Vec<Workspace>> {
        extract_array(self.get("/team", &[])?, "teams")
    }

    pub fn list_spaces(&self, team_id: &str) -> Result<Vec<Space>> {
        extract_array(self.get(&format!("/team/{team_id}/space"), &[])?, "spaces")
    }

    pub fn list_folders(&self, space_id: &str) -> Result<Vec<Folder>> {
        extract_array(self.get(&format!("/space/{space_id}/folder"), &[])?, "folders")
    }

    pub fn list_lists(&self, folder_id: &str) -> Result<Vec<TaskList>> {
        extract_array(self.get(&format!("/folder/{folder_id}/list"), &[])?, "lists")
    }

    pub fn list_folderless_lists(&self, space_id: &str) -> Result<Vec<TaskList>> {
        extract_array(self.get(&format!("/space/{space_id}/list"), &[])?, "lists")
    }

    pub fn list_tasks(&self, list_id: &str, filters: &TaskFilters) -> Result<Vec<Task>> {
        let path = format!("/list/{list_id}/task");
        extract_array(self.get(&path, &filters.query_pairs())?, "tasks")
    }

    /// Open tasks across the whole workspace, typically narrowed to one
    /// assignee.
    pub fn get_workspace_tasks(&self, team_id: &str, filters: &TaskFilters) -> Result<Vec<Task>> {
        let path = format!("/team/{team_id}/task");
        extract_array(self.get(&path, &filters.query_pairs())?, "tasks")
    }

    pub fn get_task(&self, task_id: &str) -> Result<Task> {
        let data = self.get(&format!("/task/{task_id}"), &[])?;
        Ok(serde_json::from_value(data)?)
    }

    pub fn create_task(&self, list_id: &str, draft: &TaskDraft) -> Result<Task> {
        let path = format!("/list/{list_id}/task");
        let data = self.request(Method::POST, &path, &[], Some(draft))?;
        Ok(serde_json::from_value(data)?)
    }

    pub fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task> {
        let path = format!("/task/{task_id}");
        let data = self.request(Method::PUT, &path, &[], Some(patch))?;
        Ok(serde_json::from_value(data)?)
    }

    pub fn delete_task(&self, task_id: &str) -> Result<()> {
        self.request::<Value>(Method::DELETE, &format!("/task/{task_id}"), &[], None)?;
        Ok(())
    }
}

/// The token goes in as-is; ClickUp personal tokens are not Bearer tokens.
fn auth_headers(api_token: &str) -> Result<HeaderMap> {
    let mut value = HeaderValue::from_str(api_token)
        .map_err(|_| Error::Validation("API token contains invalid characters.".into()))?;
    value.set_sensitive(true);
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Map a failed status to its error category.
pub fn status_error(status: StatusCode, path: &str, body: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => Error::AuthFailure,
        StatusCode::NOT_FOUND => Error::NotFound {
            path: path.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
        other => Error::Api {
            status: other.as_u16(),
            body,
        },
    }
}

/// Pull `field` out of the envelope and decode each element. A missing
/// field reads as an empty list.
fn extract_array<T: DeserializeOwned>(mut data: Value, field: &str) -> Result<Vec<T>> {
    match data.get_mut(field).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(items) => Ok(serde_json::from_value(items)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "/team", String::new()),
            Error::AuthFailure
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "/task/x", String::new()),
            Error::NotFound { path } if path == "/task/x"
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "/team", String::new()),
            Error::RateLimited
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "/team", "bad".into()),
            Error::Api { status: 400, body } if body == "bad"
        ));
    }

    #[test]
    fn missing_array_is_empty() {
        let spaces: Vec<Space> = extract_array(json!({}), "spaces").unwrap();
        assert!(spaces.is_empty());
        let spaces: Vec<Space> = extract_array(json!({"spaces": null}), "spaces").unwrap();
        assert!(spaces.is_empty());
    }

    #[test]
    fn extracts_named_array() {
        let spaces: Vec<Space> = extract_array(
            json!({"spaces": [{"id": "1", "name": "Eng"}, {"id": "2", "name": "Ops"}]}),
            "spaces",
        )
        .unwrap();
        assert_eq!(spaces.len(), 2);
        assert_eq!(spaces[1].name, "Ops");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        assert!(ApiClient::with_base_url("pk\nbad", DEFAULT_BASE_URL).is_err());
    }
}
