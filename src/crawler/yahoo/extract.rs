use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

use crate::crawler::yahoo::price::PriceCandidates;

const HEADING: &str = "h1";
const STREAMING_PRICE: &str = "fin-streamer[data-field='regularMarketPrice']";
const STATIC_PRICE: &str = "span[data-field='regularMarketPrice']";
const STREAMING_CHANGE: &str = "fin-streamer[data-field='regularMarketChangePercent']";

/// 一頁報價頁的解析結果，只在單次解析期間存在
pub struct QuoteDocument {
    html: Html,
}

impl QuoteDocument {
    pub fn parse(text: &str) -> Self {
        QuoteDocument {
            html: Html::parse_document(text),
        }
    }

    fn texts<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = String> + 'a {
        self.html.select(selector).map(trimmed_text)
    }
}

/// 網站自身的名稱，頁首的標題會用到它
#[derive(Debug, Clone)]
pub struct Brand {
    /// 完全相同時排除
    pub name: String,
    /// 包含此字串時排除，空字串表示不檢查
    pub keyword: String,
}

impl Brand {
    fn is_brand(&self, heading: &str) -> bool {
        heading == self.name || (!self.keyword.is_empty() && heading.contains(&self.keyword))
    }
}

/// What the page says, before any judgement about which price is real.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub company: String,
    pub candidates: PriceCandidates,
    pub change: String,
}

/// Pulls the company heading, every price candidate and the percent change out of
/// a quote page. Nothing is parsed as a number here.
pub fn extract(document: &QuoteDocument, brand: &Brand) -> Result<Extraction> {
    let heading = parse_selector(HEADING)?;
    let streaming_price = parse_selector(STREAMING_PRICE)?;
    let static_price = parse_selector(STATIC_PRICE)?;
    let streaming_change = parse_selector(STREAMING_CHANGE)?;

    let company = document
        .texts(&heading)
        .find(|text| !text.is_empty() && !brand.is_brand(text))
        .unwrap_or_default();

    let candidates = PriceCandidates {
        streaming: document.texts(&streaming_price).collect(),
        static_field: document.texts(&static_price).find(|text| !text.is_empty()),
    };

    let change = document
        .texts(&streaming_change)
        .find(|text| !text.is_empty())
        .unwrap_or_default();

    Ok(Extraction {
        company,
        candidates,
        change,
    })
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|why| anyhow!("Failed to Selector::parse({}) because: {:?}", selector, why))
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
