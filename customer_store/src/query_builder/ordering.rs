//! Sort order and the whitelist of sortable customer fields

use crate::customer::Customer;
use crate::errors::StoreError;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Customer fields a listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    FirstName,
    LastName,
    BirthDate,
    Gender,
    Email,
    Address,
}

impl OrderField {
    pub const ALL: [OrderField; 6] = [
        OrderField::FirstName,
        OrderField::LastName,
        OrderField::BirthDate,
        OrderField::Gender,
        OrderField::Email,
        OrderField::Address,
    ];

    /// Column name, which is also the accepted (case-insensitive) field name
    pub fn column(&self) -> &'static str {
        match self {
            OrderField::FirstName => "firstname",
            OrderField::LastName => "lastname",
            OrderField::BirthDate => "birthdate",
            OrderField::Gender => "gender",
            OrderField::Email => "email",
            OrderField::Address => "address",
        }
    }

    /// Byte-wise comparison on this field, as a C-collated column orders it
    pub fn compare(&self, a: &Customer, b: &Customer) -> Ordering {
        match self {
            OrderField::FirstName => a.first_name.cmp(&b.first_name),
            OrderField::LastName => a.last_name.cmp(&b.last_name),
            OrderField::BirthDate => a.birth_date.cmp(&b.birth_date),
            OrderField::Gender => a.gender.as_str().cmp(b.gender.as_str()),
            OrderField::Email => a.email.cmp(&b.email),
            OrderField::Address => a.address.cmp(&b.address),
        }
    }
}

impl FromStr for OrderField {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.column().eq_ignore_ascii_case(s))
            .ok_or_else(|| StoreError::UnknownOrderField(s.to_string()))
    }
}
