//! Settings and income category formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::settings::format_start_date;
use crate::models::{BudgetState, Settings};

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Available in")]
    available_in: String,
}

/// Income categories in list order
pub fn format_income_list(settings: &Settings) -> String {
    if settings.income_categories.is_empty() {
        return "No income categories.".to_string();
    }

    let rows: Vec<IncomeRow> = settings
        .income_categories
        .iter()
        .enumerate()
        .map(|(i, category)| IncomeRow {
            position: i + 1,
            id: category
                .id
                .clone()
                .unwrap_or_else(|| "(unassigned)".to_string()),
            available_in: match category.available_in {
                0 => "same month".to_string(),
                1 => "next month".to_string(),
                n => format!("{:+} months", n),
            },
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}

/// Summary of the document header and settings
pub fn format_settings(state: &BudgetState) -> String {
    let settings = &state.settings;
    let mut output = String::new();

    let name = state.display_name();
    output.push_str(&format!(
        "Budget:          {}\n",
        if name.is_empty() { "(unnamed)" } else { name }
    ));
    output.push_str(&format!("  Version:       {}\n", state.version));
    output.push_str(&format!("  Currency:      {}\n", settings.currency));
    output.push_str(&format!("  Precision:     {}\n", settings.fraction_digits));
    output.push_str(&format!(
        "  Start date:    {}\n",
        format_start_date(settings.start_date)
    ));

    if settings.accounts.is_empty() {
        output.push_str("  Accounts:      (none)\n");
    } else {
        output.push_str(&format!("  Accounts:      {}\n", settings.accounts.join(", ")));
    }

    if !settings.collapsed_categories.is_empty() {
        let collapsed: Vec<&str> = settings
            .collapsed_categories
            .iter()
            .map(String::as_str)
            .collect();
        output.push_str(&format!("  Collapsed:     {}\n", collapsed.join(", ")));
    }

    if let Some(amounts) = &state.start_amount {
        for amount in amounts {
            output.push_str(&format!("  Opening:       {} {}\n", amount.0, amount.1));
        }
    }

    output.push_str(&format!(
        "  Income:        {} categor{}\n",
        settings.income_categories.len(),
        if settings.income_categories.len() == 1 { "y" } else { "ies" }
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomeCategory;
    use chrono::NaiveDate;

    fn initial() -> BudgetState {
        BudgetState::initial(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
    }

    #[test]
    fn test_format_income_list() {
        let mut settings = Settings::initial(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        settings.income_categories = vec![
            IncomeCategory::new("salary", 1),
            IncomeCategory::unassigned(),
            IncomeCategory::new("bonus", 3),
        ];

        let output = format_income_list(&settings);
        assert!(output.contains("salary"));
        assert!(output.contains("next month"));
        assert!(output.contains("(unassigned)"));
        assert!(output.contains("same month"));
        assert!(output.contains("+3 months"));
    }

    #[test]
    fn test_format_empty_income_list() {
        assert_eq!(
            format_income_list(&initial().settings),
            "No income categories."
        );
    }

    #[test]
    fn test_format_settings() {
        let output = format_settings(&initial());
        assert!(output.contains("(unnamed)"));
        assert!(output.contains("EUR"));
        assert!(output.contains("2024-02-01"));
        assert!(output.contains("Accounts:      (none)"));
        assert!(output.contains("0 categories"));
    }
}
