use anyhow::{Context, Result};
use serde_json::Value;

/// Thin HTTP wrapper over the record API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    pub async fn modules(&self) -> Result<Value> {
        self.send(self.http.get(self.api_url("modules"))).await
    }

    pub async fn list_records(&self, module: &str, refresh: bool) -> Result<Value> {
        let mut request = self.http.get(self.api_url(&format!("{module}/records")));
        if refresh {
            request = request.query(&[("refresh", "true")]);
        }
        self.send(request).await
    }

    pub async fn create_record(&self, module: &str, values: &Value) -> Result<Value> {
        let request = self
            .http
            .post(self.api_url(&format!("{module}/records")))
            .json(values);
        self.send(request).await
    }

    pub async fn update_record(&self, module: &str, id: &str, values: &Value) -> Result<Value> {
        let request = self
            .http
            .put(self.api_url(&format!("{module}/records/{id}")))
            .json(values);
        self.send(request).await
    }

    pub async fn delete_record(&self, module: &str, id: &str) -> Result<()> {
        let request = self
            .http
            .delete(self.api_url(&format!("{module}/records/{id}")));
        self.send(request).await.map(|_| ())
    }

    pub async fn activity(&self, params: &[(String, String)]) -> Result<Value> {
        self.send(self.http.get(self.api_url("activity")).query(params))
            .await
    }

    pub async fn health(&self) -> Result<(u16, String)> {
        let response = self
            .http
            .get(self.api_url("health"))
            .send()
            .await
            .context("could not reach the server")?;
        let code = response.status().as_u16();
        Ok((code, response.text().await.unwrap_or_default()))
    }

    /// Sends the request and decodes the body. Error responses surface
    /// the server's message; empty success bodies become null.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request.send().await.context("could not reach the server")?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            // Prefer the "error" field from the server's JSON body.
            if let Ok(json) = serde_json::from_str::<Value>(&body)
                && let Some(message) = json.get("error").and_then(Value::as_str)
            {
                anyhow::bail!("HTTP {status}: {message}");
            }
            anyhow::bail!("HTTP {status}: {body}");
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).context("response body was not valid JSON")
    }
}
