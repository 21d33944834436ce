use std::collections::HashMap;

use rust_decimal::Decimal;
use strum::IntoEnumIterator;

use crate::{config, logging, util::text};

/// Every price-looking value found on one quote page, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceCandidates {
    /// 串流價格欄位 (`fin-streamer`) 的文字
    pub streaming: Vec<String>,
    /// 第一個非空的靜態價格欄位 (`span`) 文字
    pub static_field: Option<String>,
}

/// 包含兩端的價格區間
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub low: Decimal,
    pub high: Decimal,
}

impl PriceBand {
    pub fn new(low: Decimal, high: Decimal) -> Self {
        PriceBand { low, high }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        self.low <= price && price <= self.high
    }
}

impl From<config::Band> for PriceBand {
    fn from(band: config::Band) -> Self {
        PriceBand::new(band.low, band.high)
    }
}

/// The ranked steps of the price policy. Declaration order is evaluation order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::EnumIter, strum::Display)]
pub enum Tier {
    /// 個股專屬的價格區間
    SymbolBand,
    /// 一般大型股的價格區間
    GeneralBand,
    /// 靜態價格欄位，原樣採用
    StaticField,
    /// 極寬的合理區間，最後手段
    WideBand,
}

/// A price picked from the candidates, together with the tier that picked it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub tier: Tier,
    pub price: String,
}

/// Chooses the one current price among the candidates of a quote page.
///
/// Tiers run in order and the first tier that yields a value wins. Inside a tier
/// the earliest candidate in document order wins. The chosen string is returned
/// exactly as it appeared on the page.
#[derive(Debug, Clone)]
pub struct Disambiguator {
    bands: HashMap<String, PriceBand>,
    general: PriceBand,
    wide: PriceBand,
}

impl Disambiguator {
    pub fn new(bands: HashMap<String, PriceBand>, general: PriceBand, wide: PriceBand) -> Self {
        Disambiguator {
            bands,
            general,
            wide,
        }
    }

    pub fn from_settings(settings: &config::Quote) -> Self {
        let bands = settings
            .bands
            .iter()
            .map(|(ticker, band)| (ticker.to_uppercase(), PriceBand::from(*band)))
            .collect();

        Self::new(
            bands,
            settings.general_band.into(),
            settings.wide_band.into(),
        )
    }

    pub fn resolve(&self, ticker: &str, candidates: &PriceCandidates) -> Option<Resolution> {
        Tier::iter().find_map(|tier| {
            self.select(tier, ticker, candidates)
                .map(|price| Resolution { tier, price })
        })
    }

    /// The price string for `ticker`, or `None` when every tier came up empty.
    pub fn disambiguate(&self, ticker: &str, candidates: &PriceCandidates) -> Option<String> {
        match self.resolve(ticker, candidates) {
            Some(resolution) => {
                logging::debug_file_async(format!(
                    "{} price {} resolved by {}",
                    ticker, resolution.price, resolution.tier
                ));
                Some(resolution.price)
            }
            None => {
                logging::debug_file_async(format!(
                    "{} price unresolved from {:?}",
                    ticker, candidates
                ));
                None
            }
        }
    }

    /// Runs a single tier on its own.
    pub fn select(&self, tier: Tier, ticker: &str, candidates: &PriceCandidates) -> Option<String> {
        match tier {
            Tier::SymbolBand => {
                let band = self.bands.get(&ticker.to_uppercase())?;
                first_in_band(&candidates.streaming, band)
            }
            Tier::GeneralBand => first_in_band(&candidates.streaming, &self.general),
            Tier::StaticField => candidates
                .static_field
                .as_ref()
                .filter(|price| !price.is_empty())
                .cloned(),
            Tier::WideBand => candidates
                .streaming
                .iter()
                .find(|raw| {
                    parse_price(raw).is_some_and(|p| p > Decimal::ZERO && self.wide.contains(p))
                })
                .cloned(),
        }
    }
}

fn first_in_band(candidates: &[String], band: &PriceBand) -> Option<String> {
    candidates
        .iter()
        .find(|raw| parse_price(raw).is_some_and(|p| band.contains(p)))
        .cloned()
}

/// 只去掉千分位逗號；含空白或 `_` 的字串與其他無法解析的字串一樣視為不符合
fn parse_price(raw: &str) -> Option<Decimal> {
    text::parse_decimal(raw, None).ok()
}
