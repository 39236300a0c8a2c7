//! Cross-rate conversion over a base-denominated rate table.

use super::request::ConversionRequest;
use super::snapshot::RateSnapshot;

/// Converts `amount` between two currencies given their rates against the same base.
pub fn convert(amount: f64, from_rate: f64, to_rate: f64) -> f64 {
    amount * to_rate / from_rate
}

/// One line of conversion output.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub currency: String,
    pub amount: f64,
}

impl std::fmt::Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.2}", self.currency, self.amount)
    }
}

/// Computes the rows to display for a validated request.
///
/// With no explicit targets every supported currency is listed in sorted order.
/// Otherwise the source amount comes first, followed by each target in input order.
/// Codes missing from the snapshot are skipped; a request validated against the
/// same snapshot never has any.
pub fn conversions(snapshot: &RateSnapshot, request: &ConversionRequest) -> Vec<Conversion> {
    let Some(from_rate) = snapshot.rate(&request.from) else {
        return Vec::new();
    };

    let to = |code: &str| {
        snapshot.rate(code).map(|rate| Conversion {
            currency: code.to_string(),
            amount: convert(request.amount, from_rate, rate),
        })
    };

    if request.converts_to_all() {
        snapshot.rates.keys().filter_map(|code| to(code)).collect()
    } else {
        std::iter::once(Conversion {
            currency: request.from.clone(),
            amount: request.amount,
        })
        .chain(request.targets.iter().filter_map(|code| to(code)))
        .collect()
    }
}
