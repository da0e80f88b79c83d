//! Schema validation for budget documents
//!
//! Turns an untyped JSON value into a [`BudgetState`], reporting every
//! mismatch at once. Decoding also normalizes the document:
//!
//! - `null` month entries (holes) are dropped
//! - default category fields (`amount: 0`, `rollover: false`) are pruned, and
//!   categories and months left empty are dropped
//! - numeric income category ids become their decimal string (`3` → `"3"`)
//!
//! Unknown fields are ignored by [`decode`] so older readers accept newer
//! files. [`decode_strict`] reports them instead, for fixtures.

mod violation;

pub use violation::{ValidationError, Violation};

use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::{
    BudgetState, Budgets, Category, Currency, IncomeCategory, MonthKey, MonthlyBudget, Settings,
    StartAmount,
};

const ROOT_FIELDS: &[&str] = &["name", "version", "startAmount", "budgets", "settings"];
const SETTINGS_FIELDS: &[&str] = &[
    "accounts",
    "currency",
    "incomeCategories",
    "fractionDigits",
    "startDate",
    "collapsedCategories",
];
const MONTH_FIELDS: &[&str] = &["categories"];
const CATEGORY_FIELDS: &[&str] = &["amount", "rollover"];
const INCOME_FIELDS: &[&str] = &["id", "availableIn"];

/// Decode a budget document, ignoring unknown fields
pub fn decode(raw: &Value) -> Result<BudgetState, ValidationError> {
    Decoder::new(false).decode(raw)
}

/// Decode a budget document, reporting unknown fields as violations
pub fn decode_strict(raw: &Value) -> Result<BudgetState, ValidationError> {
    Decoder::new(true).decode(raw)
}

/// Accumulates violations while walking a document
struct Decoder {
    strict: bool,
    violations: Vec<Violation>,
}

impl Decoder {
    fn new(strict: bool) -> Self {
        Self {
            strict,
            violations: Vec::new(),
        }
    }

    fn decode(mut self, raw: &Value) -> Result<BudgetState, ValidationError> {
        let path = "budget";
        let Some(root) = self.object(Some(raw), path) else {
            return Err(ValidationError::new(self.violations));
        };
        self.check_fields(root, ROOT_FIELDS, path);

        let name = self.optional(root, "name", path, |d, v, p| d.string(Some(v), p));
        let version = self.string(root.get("version"), &join(path, "version"));
        let start_amount = self.optional(root, "startAmount", path, |d, v, p| {
            d.array(Some(v), p, |d, item, p| d.start_amount(item, p))
        });
        let budgets = self.budgets(root.get("budgets"), &join(path, "budgets"));
        let settings = self.settings(root.get("settings"), &join(path, "settings"));

        if !self.violations.is_empty() {
            return Err(ValidationError::new(self.violations));
        }

        match (version, budgets, settings) {
            (Some(version), Some(budgets), Some(settings)) => Ok(BudgetState {
                name: name.flatten(),
                version,
                start_amount: start_amount.flatten(),
                budgets: Arc::new(budgets),
                settings: Arc::new(settings),
            }),
            // a missing piece always records a violation above
            _ => Err(ValidationError::new(self.violations)),
        }
    }

    fn budgets(&mut self, value: Option<&Value>, path: &str) -> Option<Budgets> {
        let object = self.object(value, path)?;
        let mut budgets = Budgets::new();
        let mut ok = true;

        for (key, entry) in object {
            let entry_path = join(path, key);
            let month = match key.parse::<MonthKey>() {
                Ok(month) => Some(month),
                Err(_) => {
                    self.violations.push(Violation::new(
                        &entry_path,
                        "month key (YYYY-MM)",
                        format!("\"{}\"", key),
                    ));
                    ok = false;
                    None
                }
            };
            if entry.is_null() {
                continue;
            }
            match (month, self.monthly_budget(entry, &entry_path)) {
                (Some(month), Some(monthly)) if !monthly.is_empty() => {
                    budgets.insert(month, Arc::new(monthly));
                }
                (_, None) => ok = false,
                _ => {}
            }
        }

        ok.then_some(budgets)
    }

    fn monthly_budget(&mut self, value: &Value, path: &str) -> Option<MonthlyBudget> {
        let object = self.object(Some(value), path)?;
        self.check_fields(object, MONTH_FIELDS, path);

        let path = join(path, "categories");
        let categories = self.object(object.get("categories"), &path)?;
        let mut monthly = MonthlyBudget::default();
        let mut ok = true;

        for (id, entry) in categories {
            match self.category(entry, &join(&path, id)) {
                Some(category) => {
                    if let Some(category) = category.pruned() {
                        monthly.categories.insert(id.clone(), category);
                    }
                }
                None => ok = false,
            }
        }

        ok.then_some(monthly)
    }

    fn category(&mut self, value: &Value, path: &str) -> Option<Category> {
        let object = self.object(Some(value), path)?;
        self.check_fields(object, CATEGORY_FIELDS, path);

        let before = self.violations.len();
        let amount = self.optional(object, "amount", path, |d, v, p| d.number(Some(v), p));
        let rollover = self.optional(object, "rollover", path, |d, v, p| d.boolean(Some(v), p));
        if self.violations.len() > before {
            return None;
        }

        Some(Category {
            amount: amount.flatten(),
            rollover: rollover.flatten(),
        })
    }

    fn settings(&mut self, value: Option<&Value>, path: &str) -> Option<Settings> {
        let object = self.object(value, path)?;
        self.check_fields(object, SETTINGS_FIELDS, path);

        let accounts = self.array(object.get("accounts"), &join(path, "accounts"), |d, v, p| {
            d.string(Some(v), p)
        });
        let currency = self.string(object.get("currency"), &join(path, "currency"));
        let income_categories = self.array(
            object.get("incomeCategories"),
            &join(path, "incomeCategories"),
            |d, v, p| d.income_category(v, p),
        );
        let fraction_digits = self.integer::<u8>(
            object.get("fractionDigits"),
            &join(path, "fractionDigits"),
            "integer (0-255)",
        );
        let start_date =
            self.integer::<i64>(object.get("startDate"), &join(path, "startDate"), "integer");
        let collapsed = self.optional(object, "collapsedCategories", path, |d, v, p| {
            d.array(Some(v), p, |d, v, p| d.string(Some(v), p))
        });

        Some(Settings {
            accounts: accounts?,
            currency: currency?,
            income_categories: income_categories?,
            fraction_digits: fraction_digits?,
            start_date: start_date?,
            collapsed_categories: match collapsed {
                Some(Some(ids)) => ids.into_iter().collect(),
                Some(None) => return None,
                None => BTreeSet::new(),
            },
        })
    }

    fn income_category(&mut self, value: &Value, path: &str) -> Option<IncomeCategory> {
        let object = self.object(Some(value), path)?;
        self.check_fields(object, INCOME_FIELDS, path);

        let id_path = join(path, "id");
        let id = match object.get("id") {
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(Value::Number(n)) => Some(Some(n.to_string())),
            other => {
                self.violations
                    .push(Violation::mismatch(&id_path, "string | number | null", other));
                None
            }
        };
        let available_in =
            self.integer::<i32>(object.get("availableIn"), &join(path, "availableIn"), "integer");

        Some(IncomeCategory {
            id: id?,
            available_in: available_in?,
        })
    }

    fn start_amount(&mut self, value: &Value, path: &str) -> Option<StartAmount> {
        match value.as_array().map(Vec::as_slice) {
            Some([amount, currency]) => {
                let amount = self.number(Some(amount), &join(path, "0"));
                let currency_path = join(path, "1");
                let currency = match currency.as_str().and_then(Currency::from_code) {
                    Some(c) => Some(c),
                    None => {
                        self.violations.push(Violation::mismatch(
                            &currency_path,
                            "\"EUR\" | \"USD\"",
                            Some(currency),
                        ));
                        None
                    }
                };
                Some(StartAmount(amount?, currency?))
            }
            _ => {
                self.violations.push(Violation::mismatch(
                    path,
                    "[number, \"EUR\" | \"USD\"]",
                    Some(value),
                ));
                None
            }
        }
    }

    // Primitive helpers. Each records a violation on mismatch.

    fn object<'v>(&mut self, value: Option<&'v Value>, path: &str) -> Option<&'v Map<String, Value>> {
        match value {
            Some(Value::Object(map)) => Some(map),
            other => {
                self.violations.push(Violation::mismatch(path, "object", other));
                None
            }
        }
    }

    fn string(&mut self, value: Option<&Value>, path: &str) -> Option<String> {
        match value {
            Some(Value::String(s)) => Some(s.clone()),
            other => {
                self.violations.push(Violation::mismatch(path, "string", other));
                None
            }
        }
    }

    fn number(&mut self, value: Option<&Value>, path: &str) -> Option<f64> {
        match value.and_then(Value::as_f64) {
            Some(n) => Some(n),
            None => {
                self.violations.push(Violation::mismatch(path, "number", value));
                None
            }
        }
    }

    fn boolean(&mut self, value: Option<&Value>, path: &str) -> Option<bool> {
        match value {
            Some(Value::Bool(b)) => Some(*b),
            other => {
                self.violations.push(Violation::mismatch(path, "boolean", other));
                None
            }
        }
    }

    /// Whole number that fits `T`; integral floats such as `2.0` are accepted
    fn integer<T: TryFrom<i64>>(
        &mut self,
        value: Option<&Value>,
        path: &str,
        expected: &str,
    ) -> Option<T> {
        let whole = value.and_then(|v| {
            v.as_i64().or_else(|| {
                v.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
        });
        match whole.and_then(|n| T::try_from(n).ok()) {
            Some(n) => Some(n),
            None => {
                self.violations.push(Violation::mismatch(path, expected, value));
                None
            }
        }
    }

    /// Decode every element, reporting all bad elements before giving up
    fn array<T>(
        &mut self,
        value: Option<&Value>,
        path: &str,
        mut element: impl FnMut(&mut Self, &Value, &str) -> Option<T>,
    ) -> Option<Vec<T>> {
        let items = match value {
            Some(Value::Array(items)) => items,
            other => {
                self.violations.push(Violation::mismatch(path, "array", other));
                return None;
            }
        };

        let mut decoded = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            match element(self, item, &join(path, &i.to_string())) {
                Some(v) => decoded.push(v),
                None => ok = false,
            }
        }
        ok.then_some(decoded)
    }

    /// Decode a field that may be absent
    ///
    /// Returns `None` when absent, `Some(None)` when present but invalid.
    fn optional<T>(
        &mut self,
        object: &Map<String, Value>,
        field: &str,
        path: &str,
        decode: impl FnOnce(&mut Self, &Value, &str) -> Option<T>,
    ) -> Option<Option<T>> {
        object
            .get(field)
            .map(|value| decode(self, value, &join(path, field)))
    }

    fn check_fields(&mut self, object: &Map<String, Value>, known: &[&str], path: &str) {
        if !self.strict {
            return;
        }
        for (key, value) in object {
            if !known.contains(&key.as_str()) {
                self.violations
                    .push(Violation::unknown_field(&join(path, key), value));
            }
        }
    }
}

fn join(path: &str, segment: &str) -> String {
    format!("{}/{}", path, segment)
}
