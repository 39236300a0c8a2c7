use super::error::{Error, Result};

/// A validated conversion asked for on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    /// Requested targets in input order. Empty means every supported currency.
    pub targets: Vec<String>,
}

impl ConversionRequest {
    /// Validates positional arguments `<amount> <currency_from> [<currency_to> ...]`
    /// against the currencies the snapshot supports.
    pub fn parse<S: AsRef<str>>(args: &[S], supported: &[String]) -> Result<Self> {
        let [raw_amount, raw_from, raw_targets @ ..] = args else {
            return Err(Error::ArgumentCount(args.len()));
        };

        let amount = parse_amount(raw_amount.as_ref())?;
        let from = supported_code(raw_from.as_ref(), supported)?;
        let targets = raw_targets
            .iter()
            .map(|t| supported_code(t.as_ref(), supported))
            .collect::<Result<Vec<_>>>()?;

        Ok(ConversionRequest {
            amount,
            from,
            targets,
        })
    }

    pub fn converts_to_all(&self) -> bool {
        self.targets.is_empty()
    }
}

fn parse_amount(input: &str) -> Result<f64> {
    let amount: f64 = input.trim().parse().map_err(|e: std::num::ParseFloatError| {
        Error::AmountParse {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })?;

    if !amount.is_finite() {
        return Err(Error::AmountParse {
            input: input.to_string(),
            reason: "amount must be a finite number".to_string(),
        });
    }
    if amount < 0.0 {
        return Err(Error::AmountParse {
            input: input.to_string(),
            reason: "amount must not be negative".to_string(),
        });
    }
    Ok(amount)
}

fn supported_code(input: &str, supported: &[String]) -> Result<String> {
    let code = input.trim().to_ascii_uppercase();
    if supported.contains(&code) {
        Ok(code)
    } else {
        Err(Error::UnsupportedCurrency(code))
    }
}
