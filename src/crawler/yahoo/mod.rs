//! # Yahoo 財經（美股）採集模組
//!
//! 從 `finance.yahoo.com` 的個股報價頁抓取公司名稱、目前股價與漲跌幅。
//!
//! ## 流程
//!
//! - **抓取 (`quote`)**：依序、限速地下載 `<base>/quote/<ticker>/`。
//! - **解析 (`extract`)**：以 CSS Selector 取出標題、價格候選值與漲跌幅，不做任何數值判斷。
//! - **判定 (`price`)**：頁面上有多個價格欄位，依價格區間規則挑出唯一的目前股價。

use std::time::Duration;

use crate::{
    config,
    util::http::{throttle::Throttle, user_agent},
};

/// 頁面結構解析子模組
pub mod extract;
/// 目前股價判定子模組
pub mod price;
/// 報價頁下載子模組
pub mod quote;

/// Yahoo 財經的主機域名
const HOST: &str = "finance.yahoo.com";

/// Yahoo 財經採集器
///
/// 所有請求共用同一個 [`Throttle`]，同一時間只會有一個請求。
pub struct Yahoo {
    base_url: String,
    user_agent: String,
    throttle: Throttle,
}

impl Yahoo {
    pub fn new(base_url: &str, user_agent: &str, interval: Duration) -> Self {
        let base_url = if base_url.is_empty() {
            format!("https://{}", HOST)
        } else {
            base_url.trim_end_matches('/').to_string()
        };
        let user_agent = if user_agent.is_empty() {
            user_agent::gen_random_ua()
        } else {
            user_agent.to_string()
        };

        Yahoo {
            base_url,
            user_agent,
            throttle: Throttle::new(interval),
        }
    }

    pub fn from_settings(settings: &config::Quote) -> Self {
        Self::new(
            &settings.base_url,
            &settings.user_agent,
            Duration::from_secs(settings.request_interval_secs),
        )
    }
}
