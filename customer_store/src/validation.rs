//! Customer validation
//!
//! Every rule runs independently and all failures are collected, so a caller
//! can report every problem with a form at once.

use crate::customer::{Customer, Gender};
use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Minimal allowed customer age
pub const MIN_CUSTOMER_AGE: u32 = 18;
/// Maximal allowed customer age
pub const MAX_CUSTOMER_AGE: u32 = 60;

pub const MAX_FIRST_NAME_LENGTH: usize = 100;
pub const MAX_LAST_NAME_LENGTH: usize = 100;
pub const MAX_ADDRESS_LENGTH: usize = 200;
pub const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap_or_else(|e| panic!("email pattern must compile: {}", e))
});

/// A single field-level validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("{field} is too long: maximum allowed length is {max_length}")]
    TooLong {
        field: &'static str,
        max_length: usize,
    },

    #[error("email has invalid format")]
    InvalidEmail,

    #[error("gender {0:?} is not recognized")]
    InvalidGender(String),

    #[error("age is undefined")]
    AgeUndefined,

    #[error("customer is too young")]
    TooYoung,

    #[error("customer is too old")]
    TooOld,
}

/// All validation failures of one customer, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn contains(&self, error: &FieldError) -> bool {
        self.0.contains(error)
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Validate the customer against today's date (UTC)
pub fn validate(customer: &Customer) -> Result<(), ValidationErrors> {
    validate_at(customer, Utc::now().date_naive())
}

/// Validate the customer, computing its age as of `today`
pub fn validate_at(customer: &Customer, today: NaiveDate) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_string(&mut errors, "first name", &customer.first_name, MAX_FIRST_NAME_LENGTH);
    check_string(&mut errors, "last name", &customer.last_name, MAX_LAST_NAME_LENGTH);
    check_email(&mut errors, &customer.email);
    check_string(&mut errors, "address", &customer.address, MAX_ADDRESS_LENGTH);
    check_birth_date(&mut errors, customer.birth_date, today);
    check_gender(&mut errors, customer.gender);

    errors.into_result()
}

/// Check an email address against the accepted syntax only
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_FORMAT.is_match(email)
}

/// Whole calendar years between `birth_date` and `today`.
///
/// A year is only counted once its anniversary is reached. A Feb 29 birthday
/// has its anniversary on Feb 28 in common years.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < anniversary_in(birth_date, today.year()) {
        age -= 1;
    }
    age
}

fn anniversary_in(birth_date: NaiveDate, year: i32) -> (u32, u32) {
    let (month, day) = (birth_date.month(), birth_date.day());
    if (month, day) == (2, 29) && NaiveDate::from_ymd_opt(year, 2, 29).is_none() {
        (2, 28)
    } else {
        (month, day)
    }
}

fn check_string(errors: &mut ValidationErrors, field: &'static str, value: &str, max_length: usize) {
    if value.is_empty() {
        errors.push(FieldError::Empty { field });
    } else if value.chars().count() > max_length {
        errors.push(FieldError::TooLong { field, max_length });
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    check_string(errors, "email", email, MAX_EMAIL_LENGTH);
    // An empty address already produced its error above
    if !email.is_empty() && !is_valid_email(email) {
        errors.push(FieldError::InvalidEmail);
    }
}

fn check_birth_date(errors: &mut ValidationErrors, birth_date: Option<NaiveDate>, today: NaiveDate) {
    let Some(birth_date) = birth_date else {
        errors.push(FieldError::AgeUndefined);
        return;
    };

    let age = age_on(birth_date, today);
    if age < MIN_CUSTOMER_AGE as i32 {
        errors.push(FieldError::TooYoung);
    } else if age > MAX_CUSTOMER_AGE as i32 {
        errors.push(FieldError::TooOld);
    }
}

fn check_gender(errors: &mut ValidationErrors, gender: Gender) {
    if gender == Gender::Unspecified {
        errors.push(FieldError::Empty { field: "gender" });
    }
}
