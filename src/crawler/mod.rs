use anyhow::Result;
use async_trait::async_trait;

/// 雅虎財經（美股）
pub mod yahoo;

/// A site that serves one quote page per ticker symbol.
#[async_trait]
pub trait QuoteSource {
    /// The page address for `ticker`, used for progress reporting.
    fn url(&self, ticker: &str) -> String;

    /// Downloads the quote page of `ticker` and returns its markup.
    async fn fetch(&self, ticker: &str) -> Result<String>;
}
