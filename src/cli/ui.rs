use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Error,
    Warning,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold(),
        StyleType::Error => style(text).red(),
        StyleType::Warning => style(text).yellow(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a spinner on stderr, or a hidden one when `visible` is false.
pub fn new_spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Usage text, listing the supported currency codes when there are any.
pub fn usage(supported: &[String]) -> String {
    let mut text = String::from(
        "Usage:\texrate <amount> <currency_from> [<currency_to> ...]\n\
         Examples:\n\
         \texrate 10 USD\n\
         \texrate 150 BYN KZT\n\
         \texrate 4900 KZT USD RUB BYN",
    );
    if !supported.is_empty() {
        text.push_str(&format!(
            "\nSupported currencies: {}",
            style_text(&supported.join(" "), StyleType::Subtle)
        ));
    }
    text
}
