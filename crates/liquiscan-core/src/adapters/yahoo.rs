//! Yahoo Finance daily history adapter.
//!
//! Uses the unauthenticated v8 chart endpoint with explicit `period1` /
//! `period2` bounds. One request per call; the scheduler owns retry and
//! pacing policy.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::OffsetDateTime;

use crate::fetcher::{FetchError, HistorySource};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{Bar, DateRange, PriceSeries, Symbol};

const CHART_BASE: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance history source.
#[derive(Clone)]
pub struct YahooHistoryAdapter {
    http_client: Arc<dyn HttpClient>,
}

impl Default for YahooHistoryAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(ReqwestHttpClient::new()),
        }
    }
}

impl YahooHistoryAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    fn chart_url(symbol: &Symbol, range: DateRange) -> String {
        format!(
            "{CHART_BASE}/{}?period1={}&period2={}&interval=1d&events=div%2Csplit",
            urlencoding::encode(symbol.as_str()),
            range.start_epoch(),
            range.end_epoch(),
        )
    }

    async fn fetch_chart(
        &self,
        symbol: &Symbol,
        range: DateRange,
    ) -> Result<PriceSeries, FetchError> {
        let request = HttpRequest::get(Self::chart_url(symbol, range))
            .with_header("referer", "https://finance.yahoo.com/");

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.timed_out() {
                FetchError::timeout(format!("yahoo chart request timed out: {error}"))
            } else {
                FetchError::unavailable(format!("yahoo transport error: {error}"))
            }
        })?;

        match response.status {
            429 => return Err(FetchError::rate_limited("yahoo returned status 429")),
            // Yahoo answers 404 for unknown or delisted symbols with an
            // error payload; "no data" there is an empty series, not a failure.
            404 => {
                if is_no_data_payload(&response.body) {
                    return Ok(PriceSeries::empty());
                }
                return Err(FetchError::invalid_request(format!(
                    "yahoo does not recognize symbol {symbol}"
                )));
            }
            status if !response.is_success() => {
                return Err(FetchError::unavailable(format!(
                    "yahoo returned status {status}"
                )));
            }
            _ => {}
        }

        parse_chart_body(&response.body)
    }
}

impl HistorySource for YahooHistoryAdapter {
    fn daily_bars<'a>(
        &'a self,
        symbol: &'a Symbol,
        range: DateRange,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, FetchError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_chart(symbol, range).await })
    }
}

fn is_no_data_payload(body: &str) -> bool {
    let Ok(parsed) = serde_json::from_str::<ChartResponse>(body) else {
        return false;
    };
    parsed
        .chart
        .error
        .map(|error| {
            let description = error.description.to_ascii_lowercase();
            description.contains("no data found") || description.contains("delisted")
        })
        .unwrap_or(false)
}

fn parse_chart_body(body: &str) -> Result<PriceSeries, FetchError> {
    let parsed: ChartResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = &parsed.chart.error {
        return Err(FetchError::unavailable(format!(
            "yahoo chart error {}: {}",
            error.code, error.description
        )));
    }

    let Some(result) = parsed.chart.result.into_iter().flatten().next() else {
        return Ok(PriceSeries::empty());
    };

    // A result with no timestamps means no trading days in range.
    let Some(timestamps) = result.timestamp else {
        return Ok(PriceSeries::empty());
    };

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::malformed("yahoo chart has no quote indicator"))?;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = OffsetDateTime::from_unix_timestamp(ts)
            .map_err(|e| FetchError::malformed(format!("invalid chart timestamp {ts}: {e}")))?
            .date();

        // Null entries mark non-trading gaps; skip them.
        if let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(i),
            quote.high.get(i),
            quote.low.get(i),
            quote.close.get(i),
        ) {
            let volume = quote
                .volume
                .get(i)
                .copied()
                .flatten()
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(0);

            if let Ok(bar) = Bar::new(date, *open, *high, *low, *close, volume) {
                bars.push(bar);
            }
        }
    }

    PriceSeries::new(bars)
        .map_err(|e| FetchError::malformed(format!("yahoo chart bars out of order: {e}")))
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use std::sync::Mutex;
    use time::macros::date;

    struct CannedHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl CannedHttpClient {
        fn with_body(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: HttpError) -> Self {
            Self {
                response: Err(error),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl HttpClient for CannedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn test_range() -> DateRange {
        DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 05)).expect("valid range")
    }

    const CHART_BODY: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1704153600, 1704240000, 1704326400],
                "indicators": {
                    "quote": [{
                        "open":   [10.0, null, 10.6],
                        "high":   [10.5, null, 11.0],
                        "low":    [9.5,  null, 10.2],
                        "close":  [10.2, null, 10.8],
                        "volume": [1000, null, 1200]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[tokio::test]
    async fn parses_chart_and_skips_null_gaps() {
        let client = Arc::new(CannedHttpClient::with_body(200, CHART_BODY));
        let adapter = YahooHistoryAdapter::with_http_client(client.clone());
        let symbol = Symbol::parse("AAPL").expect("valid symbol");

        let series = adapter
            .daily_bars(&symbol, test_range())
            .await
            .expect("chart should parse");

        assert_eq!(series.len(), 2);
        assert_eq!(series.bars()[0].date, date!(2024 - 01 - 02));
        assert_eq!(series.bars()[1].close, 10.8);

        let requests = client.requests.lock().expect("not poisoned");
        assert!(requests[0].url.contains("period1=1704067200"));
        assert!(requests[0].url.contains("interval=1d"));
    }

    #[tokio::test]
    async fn missing_timestamps_mean_empty_series() {
        let body = r#"{"chart":{"result":[{"timestamp":null,"indicators":{"quote":[{"open":[],"high":[],"low":[],"close":[],"volume":[]}]}}],"error":null}}"#;
        let client = Arc::new(CannedHttpClient::with_body(200, body));
        let adapter = YahooHistoryAdapter::with_http_client(client);
        let symbol = Symbol::parse("GONE").expect("valid symbol");

        let series = adapter
            .daily_bars(&symbol, test_range())
            .await
            .expect("no data is not an error");
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn delisted_404_is_empty_not_failure() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let client = Arc::new(CannedHttpClient::with_body(404, body));
        let adapter = YahooHistoryAdapter::with_http_client(client);
        let symbol = Symbol::parse("OLDCO").expect("valid symbol");

        let series = adapter
            .daily_bars(&symbol, test_range())
            .await
            .expect("delisted symbol yields empty series");
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn transport_timeout_maps_to_timeout_kind() {
        let client = Arc::new(CannedHttpClient::failing(HttpError::timeout("slow")));
        let adapter = YahooHistoryAdapter::with_http_client(client);
        let symbol = Symbol::parse("AAPL").expect("valid symbol");

        let error = adapter
            .daily_bars(&symbol, test_range())
            .await
            .expect_err("must fail");
        assert_eq!(error.kind(), crate::FetchErrorKind::Timeout);
    }

    #[tokio::test]
    async fn rate_limit_status_maps_to_rate_limited() {
        let client = Arc::new(CannedHttpClient::with_body(429, ""));
        let adapter = YahooHistoryAdapter::with_http_client(client);
        let symbol = Symbol::parse("AAPL").expect("valid symbol");

        let error = adapter
            .daily_bars(&symbol, test_range())
            .await
            .expect_err("must fail");
        assert_eq!(error.kind(), crate::FetchErrorKind::RateLimited);
    }

    #[tokio::test]
    async fn garbage_body_is_malformed() {
        let client = Arc::new(CannedHttpClient::with_body(200, "<html>oops</html>"));
        let adapter = YahooHistoryAdapter::with_http_client(client);
        let symbol = Symbol::parse("AAPL").expect("valid symbol");

        let error = adapter
            .daily_bars(&symbol, test_range())
            .await
            .expect_err("must fail");
        assert_eq!(error.kind(), crate::FetchErrorKind::Malformed);
    }
}
