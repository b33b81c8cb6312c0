//! HTTP transport over fetch

use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::RequestCredentials;

use crate::signup::client::OutboundRequest;
use crate::signup::error::TransportError;
use crate::signup::ports::HttpTransport;

#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
  async fn post_json(&self, request: &OutboundRequest) -> Result<u16, TransportError> {
    let mut builder = Request::post(&request.url).header("Content-Type", "application/json");
    if request.include_credentials {
      builder = builder.credentials(RequestCredentials::Include);
    }

    let req = builder
      .body(request.body.clone())
      .map_err(|e| TransportError::Request(e.to_string()))?;
    let resp = req
      .send()
      .await
      .map_err(|e| TransportError::Network(e.to_string()))?;
    Ok(resp.status())
  }
}
