//! Random test data
//!
//! Generates customers that pass validation, with life-like names, emails,
//! addresses and an age inside the accepted range.

use chrono::{Days, Months, NaiveDate, Utc};
use customer_store::validation::{MAX_CUSTOMER_AGE, MIN_CUSTOMER_AGE};
use customer_store::{Customer, Gender};
use rand::Rng;

const FEMALE_FIRST_NAMES: &[&str] = &[
    "Anna", "Beatrice", "Clara", "Diana", "Elena", "Fiona", "Grace", "Helen", "Irene", "Julia",
    "Katherine", "Laura", "Maria", "Nora", "Olivia", "Paula", "Rachel", "Sophia", "Teresa", "Vera",
];

const MALE_FIRST_NAMES: &[&str] = &[
    "Adam", "Bruno", "Charles", "Daniel", "Edward", "Frank", "George", "Henry", "Isaac", "James",
    "Kevin", "Lucas", "Martin", "Nathan", "Oscar", "Peter", "Robert", "Samuel", "Thomas", "Victor",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Baker", "Carter", "Dawson", "Ellis", "Fisher", "Garcia", "Harris", "Jensen",
    "Keller", "Lawson", "Miller", "Nolan", "Owens", "Parker", "Quinn", "Reed", "Stewart",
    "Turner", "Walker",
];

const STREETS: &[&str] = &[
    "Maple", "Oak", "Cedar", "Elm", "Pine", "Birch", "Willow", "Lake", "Hill", "Park",
];

const STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Road", "Lane", "Drive", "Court"];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "mail.example.net"];

fn pick<'a, R: Rng>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values[rng.random_range(0..values.len())]
}

fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MIN)
}

/// Birth date whose age on `today` lies within the accepted range
pub fn random_birth_date<R: Rng>(rng: &mut R, today: NaiveDate) -> NaiveDate {
    let oldest = years_before(today, MAX_CUSTOMER_AGE);
    let youngest = years_before(today, MIN_CUSTOMER_AGE);
    let span = (youngest - oldest).num_days().max(0) as u64;

    oldest
        .checked_add_days(Days::new(rng.random_range(0..=span)))
        .unwrap_or(youngest)
}

/// A valid customer with random life-like data
pub fn random_customer() -> Customer {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();

    let (gender, first_name) = if rng.random_bool(0.5) {
        (Gender::Female, pick(&mut rng, FEMALE_FIRST_NAMES))
    } else {
        (Gender::Male, pick(&mut rng, MALE_FIRST_NAMES))
    };
    let last_name = pick(&mut rng, LAST_NAMES);

    let email = format!(
        "{}.{}{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        rng.random_range(1..10_000),
        pick(&mut rng, EMAIL_DOMAINS)
    );
    let address = format!(
        "{} {} {}",
        rng.random_range(1..=9_999),
        pick(&mut rng, STREETS),
        pick(&mut rng, STREET_SUFFIXES)
    );

    Customer {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birth_date: Some(random_birth_date(&mut rng, today)),
        gender,
        email,
        address,
        ..Customer::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use customer_store::validation::{age_on, validate};

    #[test]
    fn test_random_customers_are_valid() {
        for _ in 0..200 {
            let customer = random_customer();
            assert!(validate(&customer).is_ok(), "invalid: {:?}", customer);
            assert!(customer.gender.is_persistable());
        }
    }

    #[test]
    fn test_birth_dates_stay_in_range() {
        let mut rng = rand::rng();
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        for _ in 0..500 {
            let age = age_on(random_birth_date(&mut rng, today), today);
            assert!((18..=60).contains(&age), "age {} out of range", age);
        }
    }
}
