use std::{collections::HashMap, env, path::PathBuf};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct App {
    #[serde(default)]
    pub quote: Quote,
}

const QUOTE_BASE_URL: &str = "QUOTE_BASE_URL";
const QUOTE_TICKERS: &str = "QUOTE_TICKERS";
const QUOTE_REQUEST_INTERVAL_SECS: &str = "QUOTE_REQUEST_INTERVAL_SECS";
const QUOTE_OUTPUT_FILE: &str = "QUOTE_OUTPUT_FILE";
const QUOTE_USER_AGENT: &str = "QUOTE_USER_AGENT";

/// 報價採集設定
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Quote {
    /// 報價網站的根網址，頁面網址為 `<base_url>/quote/<ticker>/`
    pub base_url: String,
    /// 依序採集的股票代號
    pub tickers: Vec<String>,
    /// 兩次請求開始之間的最小間隔（秒）
    pub request_interval_secs: u64,
    pub output_file: String,
    /// 空字串時自動產生瀏覽器 UA
    pub user_agent: String,
    /// 網站自身的標題，不可當作公司名稱
    pub brand_name: String,
    pub brand_keyword: String,
    /// 個股的合理價格區間
    pub bands: HashMap<String, Band>,
    pub general_band: Band,
    pub wide_band: Band,
}

/// An inclusive price interval as written in the config file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: Decimal,
    pub high: Decimal,
}

impl Band {
    pub fn new(low: Decimal, high: Decimal) -> Self {
        Band { low, high }
    }
}

impl Default for Quote {
    fn default() -> Self {
        let tickers = [
            "MSFT", "IBM", "GE", "UNP", "COST", "MCD", "V", "WMT", "DIS", "MMM", "INTC", "AXP",
            "AAPL", "BA", "CSCO", "GS", "JPM", "CRM",
        ];
        let mut bands = HashMap::new();
        bands.insert("MSFT".to_string(), Band::new(dec!(300), dec!(600)));
        bands.insert("AAPL".to_string(), Band::new(dec!(150), dec!(300)));

        Quote {
            base_url: "https://finance.yahoo.com".to_string(),
            tickers: tickers.iter().map(|t| t.to_string()).collect(),
            request_interval_secs: 3,
            output_file: "stocks.csv".to_string(),
            user_agent: String::new(),
            brand_name: "Yahoo Finance".to_string(),
            brand_keyword: "Yahoo".to_string(),
            bands,
            general_band: Band::new(dec!(20), dec!(800)),
            wide_band: Band::new(dec!(1), dec!(10000)),
        }
    }
}

pub static SETTINGS: Lazy<App> = Lazy::new(|| match App::get() {
    Ok(app) => app,
    Err(why) => {
        logging::error_file_async(format!(
            "I can't read the config context because {:?}",
            why
        ));
        App::default().override_with_env().normalize()
    }
});

impl App {
    fn get() -> Result<Self> {
        let config_path = config_path();
        let config = if config_path.exists() {
            config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize::<App>()?
        } else {
            App::default()
        };

        Ok(config.override_with_env().normalize())
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(mut self) -> Self {
        if let Ok(base_url) = env::var(QUOTE_BASE_URL) {
            self.quote.base_url = base_url;
        }

        if let Ok(tickers) = env::var(QUOTE_TICKERS) {
            self.quote.tickers = parse_tickers(&tickers);
        }

        if let Ok(secs) = env::var(QUOTE_REQUEST_INTERVAL_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(secs) => self.quote.request_interval_secs = secs,
                Err(why) => logging::warn_file_async(format!(
                    "Failed to parse {}({}) because {:?}",
                    QUOTE_REQUEST_INTERVAL_SECS, secs, why
                )),
            }
        }

        if let Ok(output_file) = env::var(QUOTE_OUTPUT_FILE) {
            self.quote.output_file = output_file;
        }

        if let Ok(user_agent) = env::var(QUOTE_USER_AGENT) {
            self.quote.user_agent = user_agent;
        }

        self
    }

    /// 代號一律去空白並轉大寫，網址去掉結尾的 `/`
    fn normalize(mut self) -> Self {
        self.quote.tickers = self
            .quote
            .tickers
            .iter()
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        self.quote.bands = self
            .quote
            .bands
            .into_iter()
            .map(|(ticker, band)| (ticker.trim().to_uppercase(), band))
            .collect();
        self.quote.base_url = self.quote.base_url.trim_end_matches('/').to_string();

        self
    }
}

/// 解析以逗號分隔的股票代號清單
pub fn parse_tickers(s: &str) -> Vec<String> {
    s.split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quote() {
        let quote = Quote::default();

        assert_eq!(quote.tickers.len(), 18);
        assert_eq!(quote.tickers.first().map(String::as_str), Some("MSFT"));
        assert_eq!(quote.tickers.last().map(String::as_str), Some("CRM"));
        assert_eq!(quote.request_interval_secs, 3);
        assert_eq!(quote.bands["MSFT"], Band::new(dec!(300), dec!(600)));
        assert_eq!(quote.bands["AAPL"], Band::new(dec!(150), dec!(300)));
        assert_eq!(quote.general_band, Band::new(dec!(20), dec!(800)));
        assert_eq!(quote.wide_band, Band::new(dec!(1), dec!(10000)));
    }

    #[test]
    fn test_parse_tickers() {
        assert_eq!(parse_tickers(" msft, IBM,, ge ,"), vec!["MSFT", "IBM", "GE"]);
        assert!(parse_tickers("").is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "quote": {
                "tickers": ["nvda", " tsla "],
                "base_url": "http://localhost:8080/",
                "bands": { "nvda": { "low": 50, "high": 2000.5 } }
            }
        }"#;
        let app = serde_json::from_str::<App>(json).unwrap().normalize();

        assert_eq!(app.quote.tickers, vec!["NVDA", "TSLA"]);
        assert_eq!(app.quote.base_url, "http://localhost:8080");
        assert_eq!(app.quote.bands["NVDA"], Band::new(dec!(50), dec!(2000.5)));
        assert_eq!(app.quote.output_file, "stocks.csv");
        assert_eq!(app.quote.general_band, Band::new(dec!(20), dec!(800)));
    }
}
