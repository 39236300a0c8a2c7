use super::ui;
use crate::core::snapshot::describe_age;
use crate::core::{ConversionRequest, Error, RateFetcher, RateSnapshot, conversions};
use crate::store::RateStore;
use anyhow::Result;
use chrono::Utc;
use indicatif::ProgressBar;
use std::io::Write;
use tracing::{debug, info, warn};

/// How a conversion run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Converted,
    /// Neither the rate service nor the cache produced usable rates.
    NoRates,
    InvalidArguments,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Converted)
    }
}

/// Fetches a fresh snapshot and stores it.
///
/// A body that does not decode as a snapshot is not stored, so the cache keeps the
/// last good snapshot.
async fn refresh(
    fetcher: &dyn RateFetcher,
    store: &dyn RateStore,
    progress: &ProgressBar,
) -> crate::core::Result<()> {
    progress.set_message("Fetching latest exchange rates...");
    let fetched = fetcher.fetch().await;
    progress.finish_and_clear();

    let bytes = fetched?;
    RateSnapshot::from_slice(&bytes)?;
    store.persist(&bytes)
}

/// Runs one conversion: refresh the cache if possible, load it, validate `args`
/// and write the result (or the failure with usage help) to `out`.
///
/// Rates are always read back from the store, also right after a successful
/// refresh, so online and offline runs take the same path.
pub async fn run<W: Write>(
    args: &[String],
    fetcher: &dyn RateFetcher,
    store: &dyn RateStore,
    progress: ProgressBar,
    out: &mut W,
) -> Result<Outcome> {
    let refresh_error = refresh(fetcher, store, &progress).await.err();
    if let Some(e) = &refresh_error {
        warn!(error = %e, "Rate refresh failed, falling back to cached rates");
    }

    let snapshot = match store.load() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "No usable cached rates");
            if let Some(refresh_error) = &refresh_error {
                writeln!(out, "{}", offline_notice(refresh_error, None))?;
            }
            return report_failure(&e, &[], out);
        }
    };
    debug!(timestamp = %snapshot.timestamp, currencies = snapshot.rates.len(), "Loaded rates");

    if let Some(refresh_error) = &refresh_error {
        let age = snapshot.age(Utc::now()).map(describe_age);
        writeln!(out, "{}", offline_notice(refresh_error, age.as_deref()))?;
    }

    let supported = snapshot.supported_currencies();
    let request = match ConversionRequest::parse(args, &supported) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejected arguments");
            return report_failure(&e, &supported, out);
        }
    };
    info!(
        amount = request.amount,
        from = %request.from,
        targets = ?request.targets,
        "Converting"
    );

    writeln!(
        out,
        "\n{}\n",
        ui::style_text(&snapshot.header(), ui::StyleType::Title)
    )?;
    for row in conversions(&snapshot, &request) {
        writeln!(out, "{row}")?;
    }

    Ok(Outcome::Converted)
}

/// Writes a fatal error followed by usage help.
///
/// Argument errors list the `supported` codes so the user can correct the input;
/// anything else means there were no rates to convert with.
fn report_failure<W: Write>(error: &Error, supported: &[String], out: &mut W) -> Result<Outcome> {
    if error.is_validation() {
        writeln!(
            out,
            "{}",
            ui::style_text(&error.to_string(), ui::StyleType::Error)
        )?;
        writeln!(out, "{}", ui::usage(supported))?;
        return Ok(Outcome::InvalidArguments);
    }

    writeln!(
        out,
        "{}",
        ui::style_text(
            &format!("No exchange rates available: {error}"),
            ui::StyleType::Error
        )
    )?;
    writeln!(
        out,
        "An internet connection is needed to fetch them at least once.\n"
    )?;
    writeln!(out, "{}", ui::usage(&[]))?;
    Ok(Outcome::NoRates)
}

fn offline_notice(error: &Error, age: Option<&str>) -> String {
    let age = age
        .map(|a| format!(" Cached rates are {a} old."))
        .unwrap_or_default();
    ui::style_text(
        &format!("Could not refresh exchange rates ({error}). Using cached rates (offline mode).{age}"),
        ui::StyleType::Warning,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRateStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SNAPSHOT: &str = r#"{
        "result": "success",
        "time_last_update_utc": "Fri, 17 Oct 2025 00:02:31 +0000",
        "base_code": "USD",
        "rates": {"USD": 1.0, "EUR": 0.9, "GBP": 0.8}
    }"#;

    const NEWER_SNAPSHOT: &str = r#"{
        "time_last_update_utc": "Sat, 18 Oct 2025 00:02:31 +0000",
        "rates": {"USD": 1.0, "EUR": 0.5, "GBP": 0.8}
    }"#;

    enum Response {
        Body(&'static str),
        Status(u16),
    }

    struct MockFetcher {
        response: Response,
        calls: AtomicUsize,
    }

    impl MockFetcher {
        fn body(body: &'static str) -> Self {
            Self {
                response: Response::Body(body),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                response: Response::Status(status),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RateFetcher for MockFetcher {
        async fn fetch(&self) -> crate::core::Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.response {
                Response::Body(body) => Ok(body.as_bytes().to_vec()),
                Response::Status(status) => Err(Error::HttpStatus(status)),
            }
        }
    }

    async fn run_args(
        args: &[&str],
        fetcher: &MockFetcher,
        store: &MemoryRateStore,
    ) -> (Outcome, String) {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let mut out = Vec::new();
        let outcome = run(&args, fetcher, store, ProgressBar::hidden(), &mut out)
            .await
            .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test_log::test(tokio::test)]
    async fn test_converts_to_requested_targets() {
        let fetcher = MockFetcher::body(SNAPSHOT);
        let store = MemoryRateStore::new();

        let (outcome, output) = run_args(&["100", "USD", "EUR"], &fetcher, &store).await;

        assert_eq!(outcome, Outcome::Converted);
        assert!(output.contains("Fri, 17 Oct 2025 00:02:31 +0000"));
        assert!(output.contains("USD: 100.00\nEUR: 90.00\n"));
        assert!(!output.contains("GBP"));
        assert_eq!(store.bytes().as_deref(), Some(SNAPSHOT.as_bytes()));
    }

    #[test_log::test(tokio::test)]
    async fn test_converts_to_all_sorted() {
        let fetcher = MockFetcher::body(SNAPSHOT);
        let store = MemoryRateStore::new();

        let (outcome, output) = run_args(&["100", "usd"], &fetcher, &store).await;

        assert_eq!(outcome, Outcome::Converted);
        assert!(output.contains("EUR: 90.00\nGBP: 80.00\nUSD: 100.00\n"));
    }

    #[test_log::test(tokio::test)]
    async fn test_fresh_rates_replace_cache() {
        let fetcher = MockFetcher::body(NEWER_SNAPSHOT);
        let store = MemoryRateStore::with_bytes(SNAPSHOT);

        let (outcome, output) = run_args(&["10", "USD", "EUR"], &fetcher, &store).await;

        assert_eq!(outcome, Outcome::Converted);
        assert!(output.contains("EUR: 5.00"));
        assert!(!output.contains("offline mode"));
    }

    #[test_log::test(tokio::test)]
    async fn test_offline_mode_uses_cached_rates() {
        let fetcher = MockFetcher::failing(503);
        let store = MemoryRateStore::with_bytes(SNAPSHOT);

        let (outcome, output) = run_args(&["100", "USD", "EUR"], &fetcher, &store).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome, Outcome::Converted);
        assert!(output.contains("offline mode"));
        assert!(output.contains("API returned status code 503"));
        assert!(output.contains("old."));
        assert!(output.contains("USD: 100.00\nEUR: 90.00\n"));
    }

    #[test_log::test(tokio::test)]
    async fn test_unusable_body_does_not_overwrite_cache() {
        let error_body = r#"{"result": "error", "error-type": "unsupported-code"}"#;
        let fetcher = MockFetcher::body(error_body);
        let store = MemoryRateStore::with_bytes(SNAPSHOT);

        let (outcome, output) = run_args(&["100", "USD", "GBP"], &fetcher, &store).await;

        assert_eq!(outcome, Outcome::Converted);
        assert!(output.contains("offline mode"));
        assert!(output.contains("GBP: 80.00"));
        assert_eq!(store.bytes().as_deref(), Some(SNAPSHOT.as_bytes()));
    }

    #[test_log::test(tokio::test)]
    async fn test_no_rates_anywhere() {
        let fetcher = MockFetcher::failing(500);
        let store = MemoryRateStore::new();

        let (outcome, output) = run_args(&["100", "USD"], &fetcher, &store).await;

        assert_eq!(outcome, Outcome::NoRates);
        assert!(!outcome.is_success());
        assert!(output.contains("offline mode"));
        assert!(output.contains("No exchange rates available"));
        assert!(output.contains("Usage:"));
        assert!(!output.contains("USD: "));
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_arguments_print_usage() {
        let fetcher = MockFetcher::body(SNAPSHOT);
        let store = MemoryRateStore::new();

        let (outcome, output) = run_args(&["100", "USD", "XXX"], &fetcher, &store).await;
        assert_eq!(outcome, Outcome::InvalidArguments);
        assert!(output.contains("Currency XXX not supported"));
        assert!(output.contains("Supported currencies: "));
        assert!(output.contains("EUR GBP USD"));

        let (outcome, output) = run_args(&["abc", "USD"], &fetcher, &store).await;
        assert_eq!(outcome, Outcome::InvalidArguments);
        assert!(output.contains("Invalid currency amount 'abc'"));

        let (outcome, output) = run_args(&["100"], &fetcher, &store).await;
        assert_eq!(outcome, Outcome::InvalidArguments);
        assert!(output.contains("Not enough arguments"));
        assert!(output.contains("Usage:"));
    }

    #[test]
    fn test_report_failure_picks_report_by_error_kind() {
        let supported = vec!["EUR".to_string(), "USD".to_string()];

        let mut out = Vec::new();
        let outcome = report_failure(
            &Error::UnsupportedCurrency("XXX".to_string()),
            &supported,
            &mut out,
        )
        .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(outcome, Outcome::InvalidArguments);
        assert!(output.contains("Currency XXX not supported"));
        assert!(output.contains("EUR USD"));
        assert!(!output.contains("No exchange rates available"));

        let mut out = Vec::new();
        let outcome = report_failure(
            &Error::Decode("rate table is empty".to_string()),
            &supported,
            &mut out,
        )
        .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(outcome, Outcome::NoRates);
        assert!(output.contains("No exchange rates available: Invalid exchange rate data"));
        assert!(output.contains("Usage:"));
        assert!(!output.contains("Supported currencies"));
    }

    #[test_log::test(tokio::test)]
    async fn test_header_shows_base_and_next_update() {
        let body = r#"{
            "time_last_update_utc": "Fri, 17 Oct 2025 00:02:31 +0000",
            "time_next_update_utc": "Sat, 18 Oct 2025 00:15:21 +0000",
            "base_code": "USD",
            "rates": {"USD": 1.0, "EUR": 0.9}
        }"#;
        let fetcher = MockFetcher::body(body);
        let store = MemoryRateStore::new();

        let (outcome, output) = run_args(&["1", "EUR"], &fetcher, &store).await;

        assert_eq!(outcome, Outcome::Converted);
        assert!(output.contains("Base currency: USD, Next update: Sat, 18 Oct 2025 00:15:21 +0000"));
    }

    #[test]
    fn test_offline_notice_mentions_age_when_known() {
        let notice = offline_notice(&Error::HttpStatus(502), Some("2 days"));
        assert!(notice.contains("API returned status code 502"));
        assert!(notice.contains("Cached rates are 2 days old."));

        let notice = offline_notice(&Error::HttpStatus(502), None);
        assert!(!notice.contains("Cached rates are"));
    }
}
