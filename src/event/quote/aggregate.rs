use crate::{declare::StockRecord, logging};

/// The accepted records of one run, in ticker visit order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultSet {
    records: Vec<StockRecord>,
    failures: Vec<String>,
}

impl ResultSet {
    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// 抓取失敗的股票代號
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// 依序累積每檔股票的結果
#[derive(Debug, Default)]
pub struct Aggregator {
    result: ResultSet,
}

impl Aggregator {
    pub fn new() -> Self {
        Default::default()
    }

    /// Keeps the ticker's record when both company and price are present.
    /// Anything less is dropped without a word, absence is the signal.
    pub fn record(&mut self, company: String, price: Option<String>, change: String) -> bool {
        let Some(record) = StockRecord::new(company, price.unwrap_or_default(), change) else {
            return false;
        };

        logging::info_console(format!("Company: {}", record.company));
        logging::info_console(format!("Price: {}", record.price));
        logging::info_console(format!("Change: {}", record.change));
        self.result.records.push(record);

        true
    }

    /// 記錄抓取失敗的股票，不中斷後續的採集
    pub fn fail(&mut self, ticker: &str, why: &anyhow::Error) {
        logging::error_console(format!("Something went wrong: {} {:?}", ticker, why));
        logging::error_file_async(format!("Failed to fetch the quote of {} because {:?}", ticker, why));
        self.result.failures.push(ticker.to_string());
    }

    pub fn finish(self) -> ResultSet {
        self.result
    }
}
