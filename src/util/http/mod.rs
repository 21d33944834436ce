use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use once_cell::sync::{Lazy, OnceCell};
use reqwest::{header, Client, Method, Response};

use crate::logging::Logger;

pub mod throttle;
pub mod user_agent;

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("http"));

/// Returns the reqwest client singleton instance or creates one if it doesn't exist.
fn get_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        // 已安裝過時會回傳 Err，可忽略
        let _ = rustls::crypto::ring::default_provider().install_default();

        Client::builder()
            // ===== 壓縮 =====
            // 只開 gzip 與 deflate，由 reqwest 送出 Accept-Encoding 並負責解壓縮
            .gzip(true)
            .deflate(true)
            // ===== 超時設置 =====
            .connect_timeout(Duration::from_secs(8))
            .timeout(Duration::from_secs(15))
            // ===== TCP 優化 =====
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            // ===== 連接池 =====
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            // ===== Cookie 和重定向 =====
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .referer(true)
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
    })
}

/// Builds the headers a desktop browser sends when it navigates to a page.
///
/// `Accept-Encoding` is left to the client, which advertises `gzip, deflate`
/// and decodes the body accordingly.
pub fn browser_headers(user_agent: &str) -> Result<header::HeaderMap> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::USER_AGENT, header::HeaderValue::from_str(user_agent)?);
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(header::CONNECTION, header::HeaderValue::from_static("keep-alive"));

    Ok(headers)
}

pub async fn get_response(url: &str, headers: Option<header::HeaderMap>) -> Result<Response> {
    send(Method::GET, url, headers).await
}

/// Performs an HTTP GET request and returns the response as text.
///
/// A non-success status is an error, the body of an error page is never returned.
pub async fn get(url: &str, headers: Option<header::HeaderMap>) -> Result<String> {
    get_response(url, headers)
        .await?
        .text()
        .await
        .map_err(|e| anyhow!("Error parsing response text: {:?}", e))
}

/// Sends a single request. There is no retry here, the caller decides what a
/// failure means.
async fn send(method: Method, url: &str, headers: Option<header::HeaderMap>) -> Result<Response> {
    let visit_log = format!("{method}:{url}");
    let client = get_client()?;
    let mut rb = client.request(method, url);

    if let Some(h) = headers {
        rb = rb.headers(h);
    }

    let start = Instant::now();
    let res = rb.send().await;
    let elapsed = start.elapsed().as_millis();

    match res.and_then(|response| response.error_for_status()) {
        Ok(response) => {
            LOGGER.info(format!("{} {} {} ms", visit_log, response.status(), elapsed));
            Ok(response)
        }
        Err(why) => {
            LOGGER.error(format!("{} failed because {:?}. {} ms", visit_log, why, elapsed));
            Err(anyhow!("Failed to send request to {} because {}", url, why))
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::{Method::GET, MockServer};

    use super::*;

    #[test]
    fn test_browser_headers() {
        let headers = browser_headers("Mozilla/5.0 (X11; Linux x86_64)").unwrap();

        assert_eq!(headers[header::USER_AGENT], "Mozilla/5.0 (X11; Linux x86_64)");
        assert_eq!(headers[header::ACCEPT_LANGUAGE], "en-US,en;q=0.5");
        assert_eq!(headers[header::CONNECTION], "keep-alive");
        assert!(headers[header::ACCEPT]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }

    #[test]
    fn test_browser_headers_rejects_invalid_agent() {
        assert!(browser_headers("bad\nagent").is_err());
    }

    #[tokio::test]
    async fn test_get() {
        let server = MockServer::start_async().await;
        let page = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/quote/IBM/")
                    .header("accept-language", "en-US,en;q=0.5")
                    .header_exists("user-agent");
                then.status(200).body("<html><h1>IBM</h1></html>");
            })
            .await;

        let headers = browser_headers(&user_agent::gen_random_ua()).unwrap();
        let text = get(&server.url("/quote/IBM/"), Some(headers)).await.unwrap();

        page.assert_async().await;
        assert!(text.contains("<h1>IBM</h1>"));
    }

    #[tokio::test]
    async fn test_get_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/quote/GE/");
                then.status(503).body("<html>try again later</html>");
            })
            .await;

        let result = get(&server.url("/quote/GE/"), None).await;

        assert!(result.is_err());
    }
}
