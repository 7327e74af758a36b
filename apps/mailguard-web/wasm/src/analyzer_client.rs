//! Analyzer API client for the browser
//!
//! Speaks the analyzer service's own contract: `POST {base}/analyze`,
//! `GET {base}/rules`, `GET {base}/health`. The base URL is injected at
//! construction so deployments can point the client at the analyzer
//! directly or at a proxy without touching this code.

use shared_types::{AnalyzeResponse, RuleSummary};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

#[wasm_bindgen]
pub struct AnalyzerClient {
    api_base: String,
}

#[wasm_bindgen]
impl AnalyzerClient {
    #[wasm_bindgen(constructor)]
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    #[wasm_bindgen(getter, js_name = apiBase)]
    pub fn api_base(&self) -> String {
        self.api_base.clone()
    }

    /// Submit a request payload and return the verdict JSON.
    ///
    /// The payload is shape-checked into the typed response before being
    /// handed back, so malformed analyzer output fails here rather than
    /// deep inside the page.
    pub async fn analyze(&self, request_json: &str) -> Result<String, JsValue> {
        let url = format!("{}/analyze", self.api_base);
        let body = self.fetch_text(&url, Some(request_json)).await?;

        let verdict: AnalyzeResponse = serde_json::from_str(&body)
            .map_err(|e| JsValue::from_str(&format!("Unexpected analyzer response: {}", e)))?;
        serde_json::to_string(&verdict).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Fetch the analyzer's rule catalog as JSON.
    pub async fn rules(&self) -> Result<String, JsValue> {
        let url = format!("{}/rules", self.api_base);
        let body = self.fetch_text(&url, None).await?;

        let rules: Vec<RuleSummary> = serde_json::from_str(&body)
            .map_err(|e| JsValue::from_str(&format!("Unexpected rule catalog: {}", e)))?;
        serde_json::to_string(&rules).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// True when the analyzer answers its health check.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.api_base);
        self.fetch_text(&url, None).await.is_ok()
    }

    async fn fetch_text(&self, url: &str, post_body: Option<&str>) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        opts.set_mode(RequestMode::Cors);
        match post_body {
            Some(body) => {
                opts.set_method("POST");
                opts.set_body(&JsValue::from_str(body));
            }
            None => opts.set_method("GET"),
        }

        let request = Request::new_with_str_and_init(url, &opts)?;
        if post_body.is_some() {
            request.headers().set("Content-Type", "application/json")?;
        }

        let window = web_sys::window().ok_or("No window")?;
        let response = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;

        if !response.ok() {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Analyzer call failed: {} {}",
                response.status(),
                url
            )));
            return Err(JsValue::from_str(&format!(
                "Request failed with status {}",
                response.status()
            )));
        }

        let text = JsFuture::from(response.text()?).await?;
        text.as_string()
            .ok_or_else(|| JsValue::from_str("Response body was not text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = AnalyzerClient::new("https://analyzer.example/api/");
        assert_eq!(client.api_base(), "https://analyzer.example/api");
    }
}
