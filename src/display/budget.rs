//! Month and overview tables

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::format_amount;
use crate::models::{BudgetState, MonthKey};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    id: String,
    #[tabled(rename = "Assigned")]
    assigned: String,
    #[tabled(rename = "Rollover")]
    rollover: &'static str,
    #[tabled(rename = "Collapsed")]
    collapsed: &'static str,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Categories")]
    categories: usize,
    #[tabled(rename = "Assigned")]
    assigned: String,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        ""
    }
}

/// Allocations of one month as a table
pub fn format_month(state: &BudgetState, key: &MonthKey) -> String {
    let Some(month) = state.month(key) else {
        return format!("No allocations for {}.", key);
    };

    let settings = &state.settings;
    let amount = |value: f64| format_amount(value, settings.fraction_digits, &settings.currency);

    let rows: Vec<CategoryRow> = month
        .categories
        .iter()
        .map(|(id, category)| CategoryRow {
            id: id.clone(),
            assigned: amount(category.amount()),
            rollover: yes_no(category.rolls_over()),
            collapsed: yes_no(settings.is_collapsed(id)),
        })
        .collect();

    let mut output = format!("Budget for {}\n", key);
    output.push_str(
        &Table::new(rows)
            .with(Style::psql())
            .with(Modify::new(Columns::single(1)).with(Alignment::right()))
            .to_string(),
    );
    output.push_str(&format!("\nTotal assigned: {}", amount(month.total_assigned())));
    output
}

/// One line per budgeted month
pub fn format_overview(state: &BudgetState) -> String {
    let mut output = String::new();
    let name = state.display_name();
    if !name.is_empty() {
        output.push_str(&format!("{}\n", name));
    }

    if state.budgets.is_empty() {
        output.push_str("No months budgeted yet.");
        return output;
    }

    let settings = &state.settings;
    let rows: Vec<MonthRow> = state
        .budgets
        .iter()
        .map(|(key, month)| MonthRow {
            month: key.to_string(),
            categories: month.categories.len(),
            assigned: format_amount(
                month.total_assigned(),
                settings.fraction_digits,
                &settings.currency,
            ),
        })
        .collect();

    output.push_str(
        &Table::new(rows)
            .with(Style::psql())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string(),
    );
    output
}
