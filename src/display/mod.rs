//! Display formatting for terminal output
//!
//! Renders budget documents as tables for the CLI.

pub mod budget;
pub mod settings;

pub use budget::{format_month, format_overview};
pub use settings::{format_income_list, format_settings};

/// Format an amount with the budget's precision and currency code
pub fn format_amount(amount: f64, fraction_digits: u8, currency: &str) -> String {
    format!("{:.*} {}", fraction_digits as usize, amount, currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(950.0, 2, "EUR"), "950.00 EUR");
        assert_eq!(format_amount(-12.5, 0, "USD"), "-12 USD");
        assert_eq!(format_amount(1.0, 3, "EUR"), "1.000 EUR");
    }
}
