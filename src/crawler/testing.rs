//! In-memory transport used by the unit tests

use crate::crawler::fetcher::{RequestMethod, Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct FakeResource {
    status_code: u16,
    content_type: String,
    body: String,
}

/// A transport that serves canned responses and records every request
///
/// Unknown URLs fail with a connection error.
#[derive(Debug, Default)]
pub struct FakeTransport {
    resources: HashMap<String, FakeResource>,
    redirects: HashMap<String, String>,
    method_status: HashMap<(String, RequestMethod), u16>,
    requests: Mutex<Vec<(RequestMethod, String)>>,
    probes: Mutex<Vec<(RequestMethod, String)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves an HTML page
    pub fn page(self, url: &str, body: &str) -> Self {
        self.resource(url, 200, "text/html; charset=utf-8", body)
    }

    /// Serves a non-HTML resource
    pub fn asset(self, url: &str, content_type: &str) -> Self {
        self.resource(url, 200, content_type, "")
    }

    /// Serves an empty HTML response with the given status
    pub fn status(self, url: &str, status_code: u16) -> Self {
        self.resource(url, status_code, "text/html", "")
    }

    /// Answers `url` with the resource at `target`, reporting `target` as final URL
    pub fn redirect(mut self, url: &str, target: &str) -> Self {
        self.redirects.insert(url.to_string(), target.to_string());
        self
    }

    /// Overrides the status for one method only
    pub fn method_status(mut self, url: &str, method: RequestMethod, status_code: u16) -> Self {
        self.method_status
            .insert((url.to_string(), method), status_code);
        self
    }

    pub fn resource(mut self, url: &str, status_code: u16, content_type: &str, body: &str) -> Self {
        self.resources.insert(
            url.to_string(),
            FakeResource {
                status_code,
                content_type: content_type.to_string(),
                body: body.to_string(),
            },
        );
        self
    }

    /// All requests issued so far, in order
    pub fn requests(&self) -> Vec<(RequestMethod, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// URLs requested with `method`, in order
    pub fn requested(&self, method: RequestMethod) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|(m, _)| *m == method)
            .map(|(_, url)| url)
            .collect()
    }

    /// URLs requested with `method` through the headers-only path, in order
    pub fn probed(&self, method: RequestMethod) -> Vec<String> {
        self.probes
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| *m == method)
            .map(|(_, url)| url.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn request(
        &self,
        url: &str,
        method: RequestMethod,
    ) -> Result<TransportResponse, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((method, url.to_string()));

        let final_url = self
            .redirects
            .get(url)
            .cloned()
            .unwrap_or_else(|| url.to_string());

        let resource = self
            .resources
            .get(&final_url)
            .ok_or_else(|| TransportError::Connect {
                url: url.to_string(),
                error: "connection refused".to_string(),
            })?;

        let status_code = self
            .method_status
            .get(&(url.to_string(), method))
            .copied()
            .unwrap_or(resource.status_code);

        let body = match method {
            RequestMethod::Get => resource.body.clone(),
            RequestMethod::Head => String::new(),
        };

        Ok(TransportResponse {
            final_url,
            status_code,
            content_type: resource.content_type.clone(),
            body,
        })
    }

    async fn probe(
        &self,
        url: &str,
        method: RequestMethod,
    ) -> Result<TransportResponse, TransportError> {
        self.probes
            .lock()
            .unwrap()
            .push((method, url.to_string()));

        let mut response = self.request(url, method).await?;
        response.body.clear();
        Ok(response)
    }
}
