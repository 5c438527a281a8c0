//! Implements HttpTransport with reqwest.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{COOKIE, SET_COOKIE};
use tracing::debug;
use url::Url;

use crate::domain::DomainError;
use crate::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// reqwest-backed transport with a finite per-request timeout.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        if timeout.is_zero() {
            return Err(DomainError::Config("request timeout must be non-zero".into()));
        }
        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::Config(format!("invalid base url {base_url}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    fn build_url(&self, request: &HttpRequest) -> Result<Url, DomainError> {
        let mut url = self
            .base_url
            .join(&request.path)
            .map_err(|e| DomainError::Transport(format!("invalid path {}: {e}", request.path)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

/// `name=value` from one `Set-Cookie` header, attributes dropped.
fn parse_set_cookie(header: &str) -> Option<(String, String)> {
    let pair = header.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

fn cookie_header(cookies: &[(String, String)]) -> String {
    cookies
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, DomainError> {
        let url = self.build_url(&request)?;
        debug!(path = %request.path, "sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.cookies.is_empty() {
            builder = builder.header(COOKIE, cookie_header(&request.cookies));
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::Transport(format!("request timed out: {e}"))
            } else {
                DomainError::Transport(format!("request failed: {e}"))
            }
        })?;

        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(parse_set_cookie)
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("failed to read body: {e}")))?;

        Ok(HttpResponse {
            status,
            body,
            set_cookies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tiktok::client::encode_query;

    fn request(query: Vec<(&str, &str)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: "/api/recommend/item_list/".into(),
            query: query
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: vec![],
            cookies: vec![],
        }
    }

    #[test]
    fn test_wire_query_matches_signed_query() {
        let transport =
            ReqwestTransport::new("https://www.tiktok.com", Duration::from_secs(5)).unwrap();
        let req = request(vec![
            ("browser_version", "5.0 (Macintosh; Intel Mac OS X 10_15_7)"),
            ("priority_region", ""),
            ("msToken", "a/b+c=="),
            ("X-Bogus", "DFSzswVOhS2ANyy3tmWx-e9WX7rw"),
        ]);
        let url = transport.build_url(&req).unwrap();
        assert_eq!(url.path(), "/api/recommend/item_list/");
        assert_eq!(url.query(), Some(encode_query(&req.query).as_str()));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(matches!(
            ReqwestTransport::new("https://www.tiktok.com", Duration::ZERO),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_parse_set_cookie() {
        assert_eq!(
            parse_set_cookie("msToken=abc123; Path=/; Domain=.tiktok.com; Secure"),
            Some(("msToken".to_string(), "abc123".to_string()))
        );
        assert_eq!(parse_set_cookie("garbage"), None);
        assert_eq!(
            cookie_header(&[("a".into(), "1".into()), ("b".into(), "2".into())]),
            "a=1; b=2"
        );
    }
}
