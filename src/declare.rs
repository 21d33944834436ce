/// 一檔股票的報價紀錄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRecord {
    /// 公司名稱
    pub company: String,
    /// 目前股價，保留頁面上的原始字串（含千分位）
    pub price: String,
    /// 漲跌幅，可能為空字串
    pub change: String,
}

impl StockRecord {
    /// Only a record with both a company and a price is worth keeping.
    pub fn new(company: String, price: String, change: String) -> Option<Self> {
        if company.is_empty() || price.is_empty() {
            return None;
        }

        Some(StockRecord {
            company,
            price,
            change,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let record = StockRecord::new(
            "Microsoft Corporation (MSFT)".to_string(),
            "310.50".to_string(),
            String::new(),
        );
        assert_eq!(record.map(|r| r.price), Some("310.50".to_string()));

        assert!(StockRecord::new(String::new(), "1.00".to_string(), "+1%".to_string()).is_none());
        assert!(StockRecord::new("IBM".to_string(), String::new(), "+1%".to_string()).is_none());
    }
}
