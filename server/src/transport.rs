//! Executes core-built requests with reqwest.
//!
//! This is the "host" half of the host-does-IO split: `nutrition_core`
//! decides what to send and how to read the answer, this module only moves
//! bytes. Errors are stripped of their URL because the URL carries the API
//! key.

use nutrition_core::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("nutrition-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    pub async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
        let mut builder = match req.method {
            HttpMethod::Get => self.http.get(&req.url),
        };
        builder = builder.query(&req.query);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = req.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(reqwest::Error::without_url)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
