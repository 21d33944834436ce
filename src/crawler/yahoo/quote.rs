use anyhow::Result;
use async_trait::async_trait;
use concat_string::concat_string;

use crate::{
    crawler::{yahoo::Yahoo, QuoteSource},
    logging,
    util,
};

#[async_trait]
impl QuoteSource for Yahoo {
    fn url(&self, ticker: &str) -> String {
        concat_string!(self.base_url, "/quote/", ticker, "/")
    }

    async fn fetch(&self, ticker: &str) -> Result<String> {
        let url = self.url(ticker);
        let headers = util::http::browser_headers(&self.user_agent)?;

        self.throttle
            .run(|| async {
                logging::info_console(format!("Visiting {}", url));
                util::http::get(&url, Some(headers)).await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use httpmock::{Method::GET, MockServer};

    use super::*;

    const UA: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.6778.85 Safari/537.36";

    #[test]
    fn test_url() {
        let yahoo = Yahoo::new("https://finance.yahoo.com/", UA, Duration::ZERO);
        assert_eq!(yahoo.url("MSFT"), "https://finance.yahoo.com/quote/MSFT/");

        let yahoo = Yahoo::new("", UA, Duration::ZERO);
        assert_eq!(yahoo.url("V"), "https://finance.yahoo.com/quote/V/");
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let server = MockServer::start_async().await;
        let page = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/quote/MSFT/")
                    .header("user-agent", UA)
                    .header(
                        "accept",
                        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
                    )
                    .header("accept-language", "en-US,en;q=0.5")
                    .header_exists("accept-encoding");
                then.status(200).body("<html><body><h1>Microsoft</h1></body></html>");
            })
            .await;

        let yahoo = Yahoo::new(&server.base_url(), UA, Duration::ZERO);
        let text = yahoo.fetch("MSFT").await.unwrap();

        page.assert_async().await;
        assert!(text.contains("Microsoft"));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/quote/NOPE/");
                then.status(404);
            })
            .await;

        let yahoo = Yahoo::new(&server.base_url(), UA, Duration::ZERO);

        assert!(yahoo.fetch("NOPE").await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_is_rate_limited() {
        let server = MockServer::start_async().await;
        for ticker in ["IBM", "GE", "V"] {
            server
                .mock_async(|when, then| {
                    when.method(GET).path(format!("/quote/{}/", ticker));
                    then.status(200).body("<html></html>");
                })
                .await;
        }

        let yahoo = Yahoo::new(&server.base_url(), UA, Duration::from_millis(150));
        let begin = Instant::now();
        for ticker in ["IBM", "GE", "V"] {
            yahoo.fetch(ticker).await.unwrap();
        }

        assert!(begin.elapsed() >= Duration::from_millis(300));
    }
}
