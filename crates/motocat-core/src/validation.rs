//! Form validation and sanitization.
//!
//! Every rule is checked in a single pass; a rejected form reports all of its
//! field errors at once together with the sanitized input for redisplay. The
//! validated input types can only be built through these checks, so a value
//! of `CategoryInput`, `BrandInput` or `MotorcycleInput` always satisfies the
//! field rules.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sanitize::escape_html;

/// `NUMERIC(10, 2)` holds at most eight integer digits.
fn price_limit() -> Decimal {
    Decimal::new(100_000_000, 0)
}

/// Raw form submission: field name to submitted value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput(BTreeMap<String, String>);

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors from one submission plus the sanitized input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvalidForm {
    pub errors: Vec<FieldError>,
    pub input: FormInput,
}

impl InvalidForm {
    /// Returns true when `field` has at least one error.
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl fmt::Display for InvalidForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.errors.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Any,
    Positive,
    NonNegative,
}

/// Accumulates field errors and the sanitized echo of the form.
struct FormChecker<'a> {
    form: &'a FormInput,
    sanitized: FormInput,
    errors: Vec<FieldError>,
}

impl<'a> FormChecker<'a> {
    fn new(form: &'a FormInput) -> Self {
        Self {
            form,
            sanitized: FormInput::new(),
            errors: Vec::new(),
        }
    }

    fn reject(&mut self, field: &str, message: String) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message,
        });
    }

    /// Trimmed value, recorded for redisplay. Blank counts as absent.
    fn trimmed(&mut self, field: &str) -> Option<&'a str> {
        let value = self.form.get(field)?.trim();
        self.sanitized.insert(field, escape_html(value));
        (!value.is_empty()).then_some(value)
    }

    fn text(&mut self, field: &str, label: &str) -> Option<String> {
        match self.trimmed(field) {
            Some(value) => Some(escape_html(value)),
            None => {
                self.reject(field, format!("{label} cannot be empty."));
                None
            }
        }
    }

    fn optional_text(&mut self, field: &str) -> Option<String> {
        self.trimmed(field).map(escape_html)
    }

    fn optional_url(&mut self, field: &str) -> Option<String> {
        self.trimmed(field).map(str::to_string)
    }

    fn integer(&mut self, field: &str, label: &str, bound: Bound) -> Option<i32> {
        match self.trimmed(field) {
            Some(raw) => self.parse_integer(field, label, raw, bound),
            None => {
                self.reject(field, format!("{label} cannot be empty."));
                None
            }
        }
    }

    fn optional_integer(&mut self, field: &str, label: &str, bound: Bound) -> Option<i32> {
        let raw = self.trimmed(field)?;
        self.parse_integer(field, label, raw, bound)
    }

    fn parse_integer(&mut self, field: &str, label: &str, raw: &str, bound: Bound) -> Option<i32> {
        let Ok(value) = raw.parse::<i32>() else {
            self.reject(field, format!("{label} must be a whole number."));
            return None;
        };
        match bound {
            Bound::Positive if value <= 0 => {
                self.reject(field, format!("{label} must be greater than zero."));
                None
            }
            Bound::NonNegative if value < 0 => {
                self.reject(field, format!("{label} cannot be negative."));
                None
            }
            _ => Some(value),
        }
    }

    fn price(&mut self, field: &str, label: &str) -> Option<Decimal> {
        let Some(raw) = self.trimmed(field) else {
            self.reject(field, format!("{label} cannot be empty."));
            return None;
        };
        let Ok(value) = raw.parse::<Decimal>() else {
            self.reject(field, format!("{label} must be a number."));
            return None;
        };
        // NUMERIC(10,2) rounds halves away from zero.
        let value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if value < Decimal::ZERO {
            self.reject(field, format!("{label} cannot be negative."));
            return None;
        }
        let limit = price_limit();
        if value >= limit {
            self.reject(field, format!("{label} must be below {limit}."));
            return None;
        }
        Some(value)
    }

    fn finish<T>(self, value: Option<T>) -> Result<T> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(InvalidForm {
                errors: self.errors,
                input: self.sanitized,
            }
            .into()),
        }
    }
}

/// Validated category fields (`name`, `description`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    name: String,
    description: String,
}

impl CategoryInput {
    pub fn from_form(form: &FormInput) -> Result<Self> {
        let mut check = FormChecker::new(form);
        let name = check.text("name", "Category name");
        let description = check.text("description", "Category description");
        check.finish(
            name.zip(description)
                .map(|(name, description)| Self { name, description }),
        )
    }

    pub fn new(name: &str, description: &str) -> Result<Self> {
        Self::from_form(
            &FormInput::new()
                .with("name", name)
                .with("description", description),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Validated brand fields (`name`, `country_of_origin`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandInput {
    name: String,
    country_of_origin: String,
}

impl BrandInput {
    pub fn from_form(form: &FormInput) -> Result<Self> {
        let mut check = FormChecker::new(form);
        let name = check.text("name", "Brand name");
        let country_of_origin = check.text("country_of_origin", "Country of origin");
        check.finish(
            name.zip(country_of_origin)
                .map(|(name, country_of_origin)| Self {
                    name,
                    country_of_origin,
                }),
        )
    }

    pub fn new(name: &str, country_of_origin: &str) -> Result<Self> {
        Self::from_form(
            &FormInput::new()
                .with("name", name)
                .with("country_of_origin", country_of_origin),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country_of_origin(&self) -> &str {
        &self.country_of_origin
    }
}

/// Validated motorcycle fields.
///
/// `stock_quantity`, `description` and `image_url` are optional: on create a
/// missing stock quantity stores 0, on update missing values keep what is
/// already stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotorcycleInput {
    model_name: String,
    brand_id: i32,
    category_id: i32,
    year: i32,
    engine_cc: i32,
    price: Decimal,
    stock_quantity: Option<i32>,
    description: Option<String>,
    image_url: Option<String>,
}

impl MotorcycleInput {
    pub fn from_form(form: &FormInput) -> Result<Self> {
        let mut check = FormChecker::new(form);
        let model_name = check.text("model_name", "Model name");
        let brand_id = check.integer("brand_id", "Brand", Bound::Positive);
        let category_id = check.integer("category_id", "Category", Bound::Positive);
        let year = check.integer("year", "Year", Bound::Any);
        let engine_cc = check.integer("engine_cc", "Engine displacement", Bound::Positive);
        let price = check.price("price", "Price");
        let stock_quantity =
            check.optional_integer("stock_quantity", "Stock quantity", Bound::NonNegative);
        let description = check.optional_text("description");
        let image_url = check.optional_url("image_url");

        let input = (|| {
            Some(Self {
                model_name: model_name?,
                brand_id: brand_id?,
                category_id: category_id?,
                year: year?,
                engine_cc: engine_cc?,
                price: price?,
                stock_quantity,
                description,
                image_url,
            })
        })();
        check.finish(input)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn brand_id(&self) -> i32 {
        self.brand_id
    }

    pub fn category_id(&self) -> i32 {
        self.category_id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn engine_cc(&self) -> i32 {
        self.engine_cc
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock_quantity(&self) -> Option<i32> {
        self.stock_quantity
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}
