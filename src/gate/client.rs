use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use super::contract::{Gate, GateError, Override, OverrideRequest};

pub struct GateClient {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    http: Client,
}

impl GateClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
            http: Client::new(),
        }
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.timeout(self.timeout);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl Gate for GateClient {
    async fn create_override(&self, request: &OverrideRequest) -> Result<Override, GateError> {
        let resp = self
            .authed(self.http.post(format!("{}/api/overrides", self.base_url)))
            .json(request)
            .send()
            .await
            .map_err(|e| GateError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(GateError::Rejected(status));
        }

        resp.json::<Override>()
            .await
            .map_err(|e| GateError::Decode(e.to_string()))
    }

    async fn remove_override(&self, id: &str) -> Result<(), GateError> {
        let resp = self
            .authed(
                self.http
                    .delete(format!("{}/api/overrides/{}", self.base_url, id)),
            )
            .send()
            .await
            .map_err(|e| GateError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(GateError::Rejected(status));
        }
        Ok(())
    }

    async fn list_overrides(&self) -> Result<Vec<Override>, GateError> {
        let resp = self
            .authed(self.http.get(format!("{}/api/overrides", self.base_url)))
            .send()
            .await
            .map_err(|e| GateError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(GateError::Rejected(status));
        }

        resp.json::<Vec<Override>>()
            .await
            .map_err(|e| GateError::Decode(e.to_string()))
    }
}
