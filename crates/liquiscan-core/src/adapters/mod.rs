mod yahoo;

pub use yahoo::YahooHistoryAdapter;
