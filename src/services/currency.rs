//! Currency conversion service
//!
//! Converts amounts between currencies through a fixed table of
//! units-per-USD rates, and renders amounts for display. Conversion is
//! lenient: a code missing from the table converts at rate 1.

use std::collections::HashMap;

use crate::models::CurrencyCode;

/// A supported currency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    /// Units of this currency per one USD
    pub rate: f64,
}

/// Currencies known to the default rate table
pub const CURRENCIES: [CurrencyInfo; 10] = [
    CurrencyInfo { code: "USD", symbol: "$", name: "US Dollar", rate: 1.0 },
    CurrencyInfo { code: "EUR", symbol: "€", name: "Euro", rate: 0.92 },
    CurrencyInfo { code: "GBP", symbol: "£", name: "British Pound", rate: 0.79 },
    CurrencyInfo { code: "INR", symbol: "₹", name: "Indian Rupee", rate: 83.12 },
    CurrencyInfo { code: "JPY", symbol: "¥", name: "Japanese Yen", rate: 149.50 },
    CurrencyInfo { code: "CAD", symbol: "C$", name: "Canadian Dollar", rate: 1.36 },
    CurrencyInfo { code: "AUD", symbol: "A$", name: "Australian Dollar", rate: 1.53 },
    CurrencyInfo { code: "CHF", symbol: "Fr", name: "Swiss Franc", rate: 0.89 },
    CurrencyInfo { code: "CNY", symbol: "¥", name: "Chinese Yuan", rate: 7.24 },
    CurrencyInfo { code: "MXN", symbol: "$", name: "Mexican Peso", rate: 17.15 },
];

/// Look up a supported currency by code
pub fn currency_info(code: &str) -> Option<&'static CurrencyInfo> {
    CURRENCIES.iter().find(|c| c.code == code)
}

/// Number of decimal places shown for a currency
pub fn minor_units_for(code: &str) -> usize {
    match code {
        "JPY" => 0,
        _ => 2,
    }
}

/// Cross-rate converter over a fixed rate table
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    rates: HashMap<String, f64>,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self {
            rates: CURRENCIES
                .iter()
                .map(|c| (c.code.to_string(), c.rate))
                .collect(),
        }
    }
}

impl CurrencyConverter {
    /// Converter over the built-in rate table
    pub fn new() -> Self {
        Self::default()
    }

    /// Units per base unit for a code; unknown codes are 1
    pub fn rate(&self, code: &CurrencyCode) -> f64 {
        self.rates.get(code.as_str()).copied().unwrap_or(1.0)
    }

    /// Whether the rate table knows a code
    pub fn is_supported(&self, code: &CurrencyCode) -> bool {
        self.rates.contains_key(code.as_str())
    }

    /// Convert `amount` from one currency into another
    ///
    /// Same-code conversion returns `amount` untouched.
    pub fn convert(&self, amount: f64, from: &CurrencyCode, to: &CurrencyCode) -> f64 {
        if from == to {
            return amount;
        }
        amount * (self.rate(to) / self.rate(from))
    }

    /// Display an amount, e.g. "$1,234.56", "-€12.00" or "¥1,235"
    pub fn format(&self, amount: f64, code: &CurrencyCode) -> String {
        format_with_precision(amount, code, minor_units_for(code.as_str()))
    }

    /// Display an amount with no decimal places
    pub fn format_compact(&self, amount: f64, code: &CurrencyCode) -> String {
        format_with_precision(amount, code, 0)
    }
}

fn format_with_precision(amount: f64, code: &CurrencyCode, precision: usize) -> String {
    let body = format_number(amount.abs(), precision);
    // "-0.00" would otherwise render for tiny negatives
    let negative = amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match currency_info(code.as_str()) {
        Some(info) => format!("{}{}{}", sign, info.symbol, body),
        None => format!("{}{} {}", sign, code.as_str(), body),
    }
}

/// Format a non-negative number with comma grouping
fn format_number(value: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, value);
    match body.split_once('.') {
        Some((int_part, frac)) => format!("{}.{}", group_digits(int_part), frac),
        None => group_digits(&body),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
