use anyhow::Result;

use crate::{
    config,
    crawler::{
        yahoo::{
            extract::{self, Brand, QuoteDocument},
            price::Disambiguator,
            Yahoo,
        },
        QuoteSource,
    },
    event::quote::aggregate::{Aggregator, ResultSet},
    logging,
};

pub mod aggregate;

/// 依設定採集所有股票的報價
pub async fn execute(settings: &config::Quote) -> ResultSet {
    let yahoo = Yahoo::from_settings(settings);
    let disambiguator = Disambiguator::from_settings(settings);
    let brand = Brand {
        name: settings.brand_name.clone(),
        keyword: settings.brand_keyword.clone(),
    };

    let result = collect(&yahoo, &settings.tickers, &disambiguator, &brand).await;
    logging::info_console(format!("Found {} stocks", result.count()));
    if !result.failures().is_empty() {
        logging::warn_file_async(format!(
            "Failed to fetch {} of {} tickers: {}",
            result.failures().len(),
            settings.tickers.len(),
            result.failures().join(",")
        ));
    }

    result
}

/// Visits every ticker in order, one request at a time, and returns once all of
/// them have been visited. A failed fetch is reported and skipped.
pub async fn collect<S>(
    source: &S,
    tickers: &[String],
    disambiguator: &Disambiguator,
    brand: &Brand,
) -> ResultSet
where
    S: QuoteSource + ?Sized,
{
    let mut aggregator = Aggregator::new();

    for ticker in tickers {
        match source.fetch(ticker).await {
            Ok(text) => {
                if let Err(why) = scrape(&mut aggregator, ticker, &text, disambiguator, brand) {
                    logging::error_file_async(format!(
                        "Failed to scrape the quote of {} because {:?}",
                        ticker, why
                    ));
                }
            }
            Err(why) => aggregator.fail(ticker, &why),
        }
    }

    aggregator.finish()
}

/// 解析一頁報價並交給 aggregator，頁面在此函式結束時釋放
fn scrape(
    aggregator: &mut Aggregator,
    ticker: &str,
    text: &str,
    disambiguator: &Disambiguator,
    brand: &Brand,
) -> Result<()> {
    let document = QuoteDocument::parse(text);
    let extraction = extract::extract(&document, brand)?;
    let price = disambiguator.disambiguate(ticker, &extraction.candidates);

    if !aggregator.record(extraction.company, price, extraction.change) {
        logging::debug_file_async(format!(
            "Dropped {} because the page has no company name or no plausible price",
            ticker
        ));
    }

    Ok(())
}
