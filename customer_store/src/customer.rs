//! Customer model
//!
//! The single entity managed by the store, plus its gender enumeration.

use crate::validation::FieldError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use std::fmt;
use std::str::FromStr;

/// Customer gender.
///
/// `Unspecified` is the empty value a fresh form starts with; it never passes
/// validation and is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gender {
    #[default]
    Unspecified,
    Male,
    Female,
}

impl Gender {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Gender::Unspecified => "",
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Genders accepted by the storage constraint
    pub const PERSISTED: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn is_persistable(&self) -> bool {
        Self::PERSISTED.contains(self)
    }
}

impl FromStr for Gender {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Gender::Unspecified),
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(FieldError::InvalidGender(other.to_string())),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basic info for a customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    /// Assigned by the store on creation
    pub id: i32,
    /// Version stamp compared on update
    pub revision: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
    pub email: String,
    pub address: String,
}

impl Customer {
    /// Copy of this customer carrying the identity and revision of `stored`
    pub fn with_identity_of(mut self, stored: &Customer) -> Self {
        self.id = stored.id;
        self.revision = stored.revision;
        self
    }
}

impl<'r> FromRow<'r, PgRow> for Customer {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let gender: String = row.try_get("gender")?;
        let gender = gender.parse::<Gender>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "gender".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            revision: row.try_get("revision")?,
            first_name: row.try_get("firstname")?,
            last_name: row.try_get("lastname")?,
            birth_date: row.try_get("birthdate")?,
            gender,
            email: row.try_get("email")?,
            address: row.try_get("address")?,
        })
    }
}
