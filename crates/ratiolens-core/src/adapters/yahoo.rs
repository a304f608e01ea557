use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::metric_source::{FetchError, MetricSource};
use crate::{ProviderId, RawSnapshot, TickerSymbol};

const QUOTE_SUMMARY_MODULES: &str =
    "price,summaryDetail,financialData,defaultKeyStatistics,balanceSheetHistory";

/// Yahoo Finance metric source.
///
/// With a real transport it queries the quoteSummary endpoint; with a mock
/// transport it serves deterministic fake snapshots so tests and `--mock`
/// runs stay offline.
#[derive(Clone)]
pub struct YahooMetricSource {
    http_client: Arc<dyn HttpClient>,
    use_real_api: bool,
}

impl Default for YahooMetricSource {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            use_real_api: false,
        }
    }
}

impl YahooMetricSource {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            use_real_api,
        }
    }
}

impl MetricSource for YahooMetricSource {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn fetch<'a>(
        &'a self,
        symbol: &'a TickerSymbol,
    ) -> Pin<Box<dyn Future<Output = Result<RawSnapshot, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            if self.use_real_api {
                self.fetch_real(symbol).await
            } else {
                self.fetch_fake(symbol).await
            }
        })
    }
}

impl YahooMetricSource {
    async fn fetch_real(&self, symbol: &TickerSymbol) -> Result<RawSnapshot, FetchError> {
        let endpoint = format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{}?modules={}",
            urlencoding::encode(symbol.as_str()),
            QUOTE_SUMMARY_MODULES,
        );

        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(10_000);

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                FetchError::unavailable(format!("yahoo transport error: {}", error.message()))
            } else {
                FetchError::internal(format!("yahoo transport error: {}", error.message()))
            }
        })?;

        match response.status {
            404 => return Err(FetchError::invalid_symbol(symbol)),
            429 => return Err(FetchError::rate_limited("yahoo returned status 429")),
            status if !response.is_success() => {
                return Err(FetchError::unavailable(format!(
                    "yahoo returned status {status}"
                )));
            }
            _ => {}
        }

        parse_quote_summary(&response.body, symbol)
    }

    async fn fetch_fake(&self, symbol: &TickerSymbol) -> Result<RawSnapshot, FetchError> {
        let request = HttpRequest::get(format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{}",
            urlencoding::encode(symbol.as_str()),
        ));

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| FetchError::unavailable(error.message().to_owned()))?;
        if !response.is_success() {
            return Err(FetchError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        Ok(fake_snapshot(symbol))
    }
}

/// Parse a quoteSummary body into a snapshot.
fn parse_quote_summary(
    body: &str,
    symbol: &TickerSymbol,
) -> Result<RawSnapshot, FetchError> {
    let response: QuoteSummaryResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::internal(format!("failed to parse yahoo response: {e}")))?;

    if let Some(error) = &response.quote_summary.error {
        if !error.is_empty() {
            return Err(FetchError::unavailable(format!("yahoo API error: {error}")));
        }
    }

    let Some(result) = response.quote_summary.result.into_iter().next() else {
        return Err(FetchError::missing_data(format!(
            "no quote summary result for '{symbol}'"
        )));
    };

    let price = result.price;
    let detail = result.summary_detail;
    let financial = result.financial_data;
    let statistics = result.default_key_statistics;
    let balance = result
        .balance_sheet_history
        .and_then(|history| history.balance_sheet_statements.into_iter().next());

    Ok(RawSnapshot {
        short_name: price.as_ref().and_then(|module| module.short_name.clone()),
        long_name: price.as_ref().and_then(|module| module.long_name.clone()),
        current_price: raw_of(financial.as_ref().and_then(|m| m.current_price.as_ref())),
        forward_pe: raw_of(detail.as_ref().and_then(|m| m.forward_pe.as_ref())).or_else(|| {
            raw_of(statistics.as_ref().and_then(|m| m.forward_pe.as_ref()))
        }),
        trailing_pe: raw_of(detail.as_ref().and_then(|m| m.trailing_pe.as_ref())),
        price_to_book: raw_of(statistics.as_ref().and_then(|m| m.price_to_book.as_ref())),
        return_on_equity: raw_of(financial.as_ref().and_then(|m| m.return_on_equity.as_ref())),
        return_on_assets: raw_of(financial.as_ref().and_then(|m| m.return_on_assets.as_ref())),
        operating_margins: raw_of(financial.as_ref().and_then(|m| m.operating_margins.as_ref())),
        total_stockholder_equity: raw_of(
            balance
                .as_ref()
                .and_then(|m| m.total_stockholder_equity.as_ref()),
        ),
        total_debt: raw_of(financial.as_ref().and_then(|m| m.total_debt.as_ref())),
        total_assets: raw_of(balance.as_ref().and_then(|m| m.total_assets.as_ref())),
        dividend_yield: raw_of(detail.as_ref().and_then(|m| m.dividend_yield.as_ref())),
        debt_to_equity: raw_of(financial.as_ref().and_then(|m| m.debt_to_equity.as_ref())),
    })
}

fn raw_of(value: Option<&YahooRawValue>) -> Option<f64> {
    value.and_then(YahooRawValue::to_option)
}

// Yahoo quoteSummary response structures.

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryData,
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryData {
    #[serde(default)]
    result: Vec<QuoteSummaryResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(rename = "summaryDetail", default)]
    summary_detail: Option<SummaryDetailModule>,
    #[serde(rename = "financialData", default)]
    financial_data: Option<FinancialDataModule>,
    #[serde(rename = "defaultKeyStatistics", default)]
    default_key_statistics: Option<DefaultKeyStatisticsModule>,
    #[serde(rename = "balanceSheetHistory", default)]
    balance_sheet_history: Option<BalanceSheetHistoryModule>,
}

#[derive(Debug, Clone, Deserialize)]
struct PriceModule {
    #[serde(rename = "shortName", default)]
    short_name: Option<String>,
    #[serde(rename = "longName", default)]
    long_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SummaryDetailModule {
    #[serde(rename = "forwardPE", default)]
    forward_pe: Option<YahooRawValue>,
    #[serde(rename = "trailingPE", default)]
    trailing_pe: Option<YahooRawValue>,
    #[serde(rename = "dividendYield", default)]
    dividend_yield: Option<YahooRawValue>,
}

#[derive(Debug, Clone, Deserialize)]
struct FinancialDataModule {
    #[serde(rename = "currentPrice", default)]
    current_price: Option<YahooRawValue>,
    #[serde(rename = "returnOnEquity", default)]
    return_on_equity: Option<YahooRawValue>,
    #[serde(rename = "returnOnAssets", default)]
    return_on_assets: Option<YahooRawValue>,
    #[serde(rename = "operatingMargins", default)]
    operating_margins: Option<YahooRawValue>,
    #[serde(rename = "totalDebt", default)]
    total_debt: Option<YahooRawValue>,
    #[serde(rename = "debtToEquity", default)]
    debt_to_equity: Option<YahooRawValue>,
}

#[derive(Debug, Clone, Deserialize)]
struct DefaultKeyStatisticsModule {
    #[serde(rename = "forwardPE", default)]
    forward_pe: Option<YahooRawValue>,
    #[serde(rename = "priceToBook", default)]
    price_to_book: Option<YahooRawValue>,
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceSheetHistoryModule {
    #[serde(rename = "balanceSheetStatements", default)]
    balance_sheet_statements: Vec<BalanceSheetStatement>,
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceSheetStatement {
    #[serde(rename = "totalStockholderEquity", default)]
    total_stockholder_equity: Option<YahooRawValue>,
    #[serde(rename = "totalAssets", default)]
    total_assets: Option<YahooRawValue>,
}

/// Yahoo wraps numeric values in `{raw, fmt}` objects; only `raw` matters.
#[derive(Debug, Clone, Deserialize)]
struct YahooRawValue {
    #[serde(default)]
    raw: Option<f64>,
}

impl YahooRawValue {
    fn to_option(&self) -> Option<f64> {
        self.raw.filter(|v| !v.is_nan())
    }
}

fn fake_snapshot(symbol: &TickerSymbol) -> RawSnapshot {
    let seed = symbol_seed(symbol);
    let equity = 1.0e12 + (seed % 9_000) as f64 * 1.0e9;

    RawSnapshot {
        short_name: Some(format!("{} Holdings", symbol.as_str())),
        long_name: Some(format!("{} Holdings Corp.", symbol.as_str())),
        current_price: Some(90.0 + (seed % 500) as f64 / 10.0),
        forward_pe: Some(12.0 + (seed % 180) as f64 / 10.0),
        trailing_pe: Some(13.3 + (seed % 180) as f64 / 10.0),
        price_to_book: Some(0.8 + (seed % 40) as f64 / 10.0),
        return_on_equity: Some(0.06 + (seed % 12) as f64 / 100.0),
        return_on_assets: Some(0.03 + (seed % 6) as f64 / 100.0),
        operating_margins: Some(0.08 + (seed % 20) as f64 / 100.0),
        total_stockholder_equity: Some(equity),
        total_debt: Some(equity * 0.6),
        total_assets: Some(equity * 2.2),
        dividend_yield: Some(0.005 + (seed % 50) as f64 / 10_000.0),
        debt_to_equity: Some(60.0 + (seed % 90) as f64),
    }
}

fn symbol_seed(symbol: &TickerSymbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}
