//! Form parsing, validation and rendering.
//!
//! Submitted forms arrive as [`FormData`]. Handlers run a [`Validator`] over
//! it, collecting at most one message per field; a failed submission is
//! re-rendered from the same `FormData` and [`FieldErrors`], so the person
//! sees what they typed next to what was wrong with it.

use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use ims_core::{Choice, Email, EmailError, Price};

/// Wire format of date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum length of a new password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Submitted Data
// =============================================================================

/// Raw submitted form values, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FormData(HashMap<String, String>);

impl FormData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used to prefill edit forms.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    /// Raw value, untrimmed.
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Trimmed value; empty when the field was not submitted.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.raw(name).map_or("", str::trim)
    }

    /// Whether a checkbox named `name` was ticked.
    #[must_use]
    pub fn checked(&self, name: &str) -> bool {
        matches!(self.value(name), "on" | "true" | "1")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Format a date the way date inputs expect it.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// =============================================================================
// Validation
// =============================================================================

/// Validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Record `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Reads typed values out of a [`FormData`], recording a message for each
/// field that fails.
///
/// Every typed accessor returns `None` exactly when it recorded an error.
#[derive(Debug)]
pub struct Validator<'f> {
    form: &'f FormData,
    errors: FieldErrors,
}

impl<'f> Validator<'f> {
    #[must_use]
    pub fn new(form: &'f FormData) -> Self {
        Self {
            form,
            errors: FieldErrors::default(),
        }
    }

    /// Trimmed text, possibly empty.
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        self.form.value(name).to_string()
    }

    /// Record a custom error.
    pub fn reject(&mut self, name: &str, message: impl Into<String>) {
        self.errors.add(name, message);
    }

    /// Non-empty text.
    pub fn required(&mut self, name: &str, label: &str) -> Option<String> {
        let value = self.form.value(name);
        if value.is_empty() {
            self.reject(name, format!("{label} is required"));
            return None;
        }
        Some(value.to_string())
    }

    /// Text of at least `min` characters.
    pub fn min_length(&mut self, name: &str, label: &str, min: usize) -> Option<String> {
        let value = self.required(name, label)?;
        if value.chars().count() < min {
            self.reject(name, format!("{label} must be at least {min} characters"));
            return None;
        }
        Some(value)
    }

    /// A well-formed email address.
    pub fn email(&mut self, name: &str) -> Option<Email> {
        match Email::parse(self.form.value(name)) {
            Ok(email) => Some(email),
            Err(EmailError::Empty) => {
                self.reject(name, "Email is required");
                None
            }
            Err(e) => {
                self.reject(name, capitalize(&e.to_string()));
                None
            }
        }
    }

    fn parse<T: FromStr>(&mut self, name: &str, label: &str, kind: &str) -> Option<T> {
        let value = self.form.value(name);
        if value.is_empty() {
            self.reject(name, format!("{label} is required"));
            return None;
        }
        value.parse().ok().or_else(|| {
            self.reject(name, format!("{label} must be {kind}"));
            None
        })
    }

    /// Dollar amount from zero up to [`Price::MAX`], in whole cents.
    pub fn price(&mut self, name: &str, label: &str) -> Option<Price> {
        let amount: Decimal = self.parse(name, label, "a number")?;
        if amount.is_sign_negative() && !amount.is_zero() {
            self.reject(name, format!("{label} cannot be negative"));
            return None;
        }
        if amount > Price::MAX.amount() {
            self.reject(name, format!("{label} must be at most {}", Price::MAX));
            return None;
        }
        if amount.normalize().scale() > 2 {
            self.reject(name, format!("{label} must have at most 2 decimal places"));
            return None;
        }
        Some(Price::new(amount))
    }

    /// Whole number within `range`.
    pub fn integer(&mut self, name: &str, label: &str, range: RangeInclusive<u32>) -> Option<u32> {
        let value: i64 = self.parse(name, label, "a whole number")?;
        let (min, max) = (i64::from(*range.start()), i64::from(*range.end()));
        if value < min {
            self.reject(name, format!("{label} must be at least {min}"));
            return None;
        }
        if value > max {
            self.reject(name, format!("{label} must be at most {max}"));
            return None;
        }
        u32::try_from(value).ok()
    }

    /// Required `YYYY-MM-DD` date.
    pub fn date(&mut self, name: &str, label: &str) -> Option<NaiveDate> {
        let value = self.form.value(name);
        if value.is_empty() {
            self.reject(name, format!("{label} is required"));
            return None;
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT).ok().or_else(|| {
            self.reject(name, format!("{label} must be a date (YYYY-MM-DD)"));
            None
        })
    }

    /// Optional `YYYY-MM-DD` date; the outer `None` means invalid input.
    pub fn optional_date(&mut self, name: &str, label: &str) -> Option<Option<NaiveDate>> {
        if self.form.value(name).is_empty() {
            return Some(None);
        }
        self.date(name, label).map(Some)
    }

    /// One of a closed set of values.
    pub fn choice<C: Choice>(&mut self, name: &str, label: &str) -> Option<C> {
        let value = self.form.value(name);
        C::from_form_value(value).or_else(|| {
            self.reject(name, format!("Select a valid {}", label.to_lowercase()));
            None
        })
    }

    /// One of the `(value, label)` pairs in `options`.
    pub fn option(&mut self, name: &str, label: &str, options: &[(&str, &str)]) -> Option<String> {
        let value = self.form.value(name);
        if options.iter().any(|(v, _)| *v == value) {
            Some(value.to_string())
        } else {
            self.reject(name, format!("Select a valid {}", label.to_lowercase()));
            None
        }
    }

    /// Whether nothing has failed so far.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    /// `Ok` if every field passed.
    ///
    /// # Errors
    ///
    /// Returns the collected messages when any field failed.
    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

// =============================================================================
// Rendering
// =============================================================================

/// `(value, label)` pairs offered by a select input.
pub type SelectOptions = fn() -> Vec<(&'static str, &'static str)>;

/// Options of a [`Choice`] type, for [`InputKind::Select`].
#[must_use]
pub fn choice_options<C: Choice>() -> Vec<(&'static str, &'static str)> {
    C::ALL.iter().map(|c| (c.as_str(), c.label())).collect()
}

/// Kind of input control.
#[derive(Debug, Clone, Copy)]
pub enum InputKind {
    Text,
    Email,
    Password,
    Tel,
    /// Number input with a `step` attribute, e.g. `"1"` or `"0.01"`.
    Number { min: &'static str, step: &'static str },
    Date,
    Select(SelectOptions),
}

impl InputKind {
    const fn input_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Tel => "tel",
            Self::Number { .. } => "number",
            Self::Date => "date",
            Self::Select(_) => "select",
        }
    }
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
}

impl FieldSpec {
    #[must_use]
    pub const fn required(name: &'static str, label: &'static str, input: InputKind) -> Self {
        Self {
            name,
            label,
            input,
            required: true,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, label: &'static str, input: InputKind) -> Self {
        Self {
            name,
            label,
            input,
            required: false,
        }
    }

    /// Render this field with the submitted value and its error, if any.
    #[must_use]
    pub fn view(&self, form: &FormData, errors: &FieldErrors) -> FieldView {
        // Password inputs are never echoed back.
        let value = match self.input {
            InputKind::Password => String::new(),
            _ => form.raw(self.name).unwrap_or_default().to_string(),
        };
        let options = match self.input {
            InputKind::Select(options) => options()
                .into_iter()
                .map(|(v, label)| OptionView {
                    value: v,
                    label,
                    selected: v == value,
                })
                .collect(),
            _ => Vec::new(),
        };
        let (min, step) = match self.input {
            InputKind::Number { min, step } => (min, step),
            _ => ("", ""),
        };

        FieldView {
            name: self.name,
            label: self.label,
            input_type: self.input.input_type(),
            is_select: matches!(self.input, InputKind::Select(_)),
            required: self.required,
            value,
            error: errors.get(self.name).map(ToString::to_string),
            options,
            min,
            step,
        }
    }
}

/// Render a list of fields.
#[must_use]
pub fn field_views(specs: &[FieldSpec], form: &FormData, errors: &FieldErrors) -> Vec<FieldView> {
    specs.iter().map(|spec| spec.view(form, errors)).collect()
}

/// A rendered form field.
#[derive(Debug, Clone)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub is_select: bool,
    pub required: bool,
    pub value: String,
    pub error: Option<String>,
    pub options: Vec<OptionView>,
    pub min: &'static str,
    pub step: &'static str,
}

/// A rendered `<option>`.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ims_core::OrderStatus;

    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_required_trims_and_rejects_blank() {
        let data = form(&[("name", "  Desk Lamp "), ("category", "   ")]);
        let mut v = Validator::new(&data);
        assert_eq!(v.required("name", "Name").as_deref(), Some("Desk Lamp"));
        assert_eq!(v.required("category", "Category"), None);
        assert_eq!(v.required("missing", "Missing"), None);

        let errors = v.into_errors();
        assert_eq!(errors.get("category"), Some("Category is required"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_price_must_be_non_negative_number() {
        let data = form(&[("a", "1299.99"), ("b", "-1"), ("c", "abc"), ("d", "0")]);
        let mut v = Validator::new(&data);
        assert_eq!(v.price("a", "Price"), Some(Price::from_cents(129_999)));
        assert_eq!(v.price("b", "Price"), None);
        assert_eq!(v.price("c", "Price"), None);
        assert_eq!(v.price("d", "Price"), Some(Price::ZERO));

        let errors = v.into_errors();
        assert_eq!(errors.get("b"), Some("Price cannot be negative"));
        assert_eq!(errors.get("c"), Some("Price must be a number"));
    }

    #[test]
    fn test_price_is_bounded_to_cents() {
        let data = form(&[
            ("max", "999999999.99"),
            ("huge", "79228162514264337593543950335"),
            ("fraction", "10.005"),
            ("padded", "10.500"),
        ]);
        let mut v = Validator::new(&data);
        assert_eq!(v.price("max", "Price"), Some(Price::MAX));
        assert_eq!(v.price("huge", "Price"), None);
        assert_eq!(v.price("fraction", "Price"), None);
        assert_eq!(v.price("padded", "Price"), Some(Price::from_cents(1_050)));

        let errors = v.into_errors();
        assert_eq!(errors.get("huge"), Some("Price must be at most $999,999,999.99"));
        assert_eq!(
            errors.get("fraction"),
            Some("Price must have at most 2 decimal places")
        );
    }

    #[test]
    fn test_integer_range() {
        let data = form(&[("items", "0"), ("stock", "12"), ("x", "1.5"), ("t", "1001")]);
        let mut v = Validator::new(&data);
        assert_eq!(v.integer("items", "Items", 1..=u32::MAX), None);
        assert_eq!(v.integer("stock", "Stock", 0..=u32::MAX), Some(12));
        assert_eq!(v.integer("x", "X", 0..=10), None);
        assert_eq!(v.integer("t", "Threshold", 1..=1000), None);

        let errors = v.into_errors();
        assert_eq!(errors.get("items"), Some("Items must be at least 1"));
        assert_eq!(errors.get("x"), Some("X must be a whole number"));
        assert_eq!(errors.get("t"), Some("Threshold must be at most 1000"));
    }

    #[test]
    fn test_dates() {
        let data = form(&[("d", "2023-09-15"), ("bad", "09/15/2023"), ("empty", "")]);
        let mut v = Validator::new(&data);
        assert_eq!(v.date("d", "Date"), NaiveDate::from_ymd_opt(2023, 9, 15));
        assert_eq!(v.date("bad", "Date"), None);
        assert_eq!(v.optional_date("empty", "Shipped"), Some(None));
        assert!(!v.is_valid());
    }

    #[test]
    fn test_choice_and_email() {
        let data = form(&[("status", "Shipped"), ("email", "not-an-email"), ("other", "pending")]);
        let mut v = Validator::new(&data);
        assert_eq!(v.choice::<OrderStatus>("status", "Status"), Some(OrderStatus::Shipped));
        assert_eq!(v.choice::<OrderStatus>("other", "Status"), None);
        assert!(v.email("email").is_none());

        let errors = v.into_errors();
        assert_eq!(errors.get("other"), Some("Select a valid status"));
        assert_eq!(errors.get("email"), Some("Enter a valid email address"));
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = FieldErrors::default();
        errors.add("name", "first");
        errors.add("name", "second");
        assert_eq!(errors.get("name"), Some("first"));
    }

    #[test]
    fn test_field_view_keeps_input_and_hides_passwords() {
        let data = form(&[("status", "Processing"), ("password", "secret123")]);
        let mut errors = FieldErrors::default();
        errors.add("status", "boom");

        let status = FieldSpec::required(
            "status",
            "Status",
            InputKind::Select(choice_options::<OrderStatus>),
        )
        .view(&data, &errors);
        assert!(status.is_select);
        assert_eq!(status.error.as_deref(), Some("boom"));
        let selected: Vec<_> = status.options.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, ["Processing"]);

        let password = FieldSpec::required("password", "Password", InputKind::Password)
            .view(&data, &FieldErrors::default());
        assert_eq!(password.value, "");
        assert_eq!(password.input_type, "password");
    }
}
