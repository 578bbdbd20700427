//! Integration tests for the PostgreSQL customer store
//!
//! Each test prepares its own randomly named database on the server named by
//! `DATABASE_URL` and drops it afterwards. Without `DATABASE_URL` the tests
//! return early.

use customers::migration::drop_database;
use customers::prelude::*;
use customers::testing::random_customer;
use std::collections::HashSet;
use std::time::Duration;

const SEEDED: usize = 20;

struct TestDb {
    config: DatabaseConfig,
    customers: Customers,
}

impl TestDb {
    fn store(&self) -> PgCustomerStore {
        self.customers.store()
    }

    async fn teardown(self) {
        self.customers.close().await;
        drop_database(&self.config, &self.config.database)
            .await
            .expect("Failed to drop test database");
    }
}

async fn setup() -> Option<TestDb> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL is not set, skipping");
        return None;
    };

    let config = DatabaseConfig::from_url(&database_url)
        .expect("DATABASE_URL must be a postgres URL")
        .with_database(format!("customers_test_{:08x}", rand::random::<u32>()));

    let customers = Customers::prepare(config.clone())
        .await
        .expect("Failed to prepare test database");
    Some(TestDb { config, customers })
}

async fn seed(store: &PgCustomerStore, n: usize) -> Vec<Customer> {
    let mut created = Vec::with_capacity(n);
    for _ in 0..n {
        created.push(store.create(random_customer()).await.unwrap());
    }
    created
}

fn named(first_name: &str, last_name: &str) -> Customer {
    Customer {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        ..random_customer()
    }
}

fn ids(customers: &[Customer]) -> Vec<i32> {
    customers.iter().map(|c| c.id).collect()
}

fn sorted_by_id(mut customers: Vec<Customer>) -> Vec<Customer> {
    customers.sort_by_key(|c| c.id);
    customers
}

fn sort_key(customer: &Customer, field: OrderField) -> String {
    match field {
        OrderField::FirstName => customer.first_name.clone(),
        OrderField::LastName => customer.last_name.clone(),
        OrderField::BirthDate => format!("{:?}", customer.birth_date),
        OrderField::Gender => customer.gender.to_string(),
        OrderField::Email => customer.email.clone(),
        OrderField::Address => customer.address.clone(),
    }
}

/// Equal keys form one contiguous run, ordered by ascending id
fn assert_ties_by_id(listed: &[Customer], field: OrderField) {
    let mut finished = HashSet::new();
    for pair in listed.windows(2) {
        let (a, b) = (sort_key(&pair[0], field), sort_key(&pair[1], field));
        if a == b {
            assert!(pair[0].id < pair[1].id, "tie on {:?} not ordered by id", field);
        } else {
            assert!(finished.insert(a.clone()), "{:?} value {} is not contiguous", field, a);
            assert!(!finished.contains(&b), "{:?} value {} is not contiguous", field, b);
        }
    }
}

#[tokio::test]
async fn test_create_and_get() {
    let Some(db) = setup().await else { return };
    let store = db.store();

    let input = random_customer();
    let created = store.create(input.clone()).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.revision, 1);
    assert_eq!(created.first_name, input.first_name);
    assert_eq!(created.birth_date, input.birth_date);

    let fetched = store.get(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let second = store.create(random_customer()).await.unwrap();
    assert_ne!(second.id, created.id);

    db.teardown().await;
}

#[tokio::test]
async fn test_get_missing() {
    let Some(db) = setup().await else { return };

    let err = db.store().get(424242).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(424242)));

    db.teardown().await;
}

#[tokio::test]
async fn test_unspecified_gender_violates_constraint() {
    let Some(db) = setup().await else { return };
    let store = db.store();

    let customer = Customer {
        gender: Gender::Unspecified,
        ..random_customer()
    };
    let err = store.create(customer).await.unwrap_err();
    assert!(matches!(err, StoreError::Storage { .. }));
    assert_eq!(store.count(&CustomerListFilter::new()).await.unwrap(), 0);

    db.teardown().await;
}

#[tokio::test]
async fn test_list_and_count() {
    let Some(db) = setup().await else { return };
    let store = db.store();
    let created = seed(&store, SEEDED).await;

    let listed = store
        .list(&CustomerListFilter::new(), &CustomerViewOptions::new())
        .await
        .unwrap();
    assert_eq!(sorted_by_id(listed), sorted_by_id(created));
    assert_eq!(
        store.count(&CustomerListFilter::new()).await.unwrap(),
        SEEDED as i64
    );

    db.teardown().await;
}

#[tokio::test]
async fn test_sort_by_every_field() {
    let Some(db) = setup().await else { return };
    let store = db.store();
    let created = seed(&store, SEEDED).await;
    let expected_ids = ids(&sorted_by_id(created));

    for field in OrderField::ALL {
        for desc in [false, true] {
            let options = CustomerViewOptions::new().order_by(field.column(), desc);
            let listed = store.list(&CustomerListFilter::new(), &options).await.unwrap();

            assert_eq!(ids(&sorted_by_id(listed.clone())), expected_ids);
            assert_ties_by_id(&listed, field);

            if field == OrderField::BirthDate {
                for pair in listed.windows(2) {
                    let (a, b) = (pair[0].birth_date, pair[1].birth_date);
                    assert!(if desc { a >= b } else { a <= b });
                }
            }
        }
    }

    db.teardown().await;
}

#[tokio::test]
async fn test_unknown_order_field_touches_nothing() {
    let Some(db) = setup().await else { return };
    let store = db.store();
    seed(&store, 3).await;

    let options = CustomerViewOptions::new().order_by("password", false);
    let err = store.list(&CustomerListFilter::new(), &options).await.unwrap_err();
    assert_eq!(err.to_string(), "unknown field to order by: \"password\"");
    assert_eq!(store.count(&CustomerListFilter::new()).await.unwrap(), 3);

    db.teardown().await;
}

#[tokio::test]
async fn test_pagination() {
    let Some(db) = setup().await else { return };
    let store = db.store();
    seed(&store, SEEDED).await;

    let ordered = CustomerViewOptions::new().order_by("lastname", false);
    let full = store.list(&CustomerListFilter::new(), &ordered).await.unwrap();
    assert_eq!(full.len(), SEEDED);

    for (offset, limit) in [(0u64, 5u64), (5, 5), (18, 5), (25, 5), (7, 0)] {
        let page = store
            .list(&CustomerListFilter::new(), &ordered.clone().page(offset, limit))
            .await
            .unwrap();

        let start = (offset as usize).min(full.len());
        let end = if limit == 0 {
            full.len()
        } else {
            (start + limit as usize).min(full.len())
        };
        assert_eq!(page, full[start..end].to_vec(), "offset {} limit {}", offset, limit);
    }

    db.teardown().await;
}

#[tokio::test]
async fn test_delete() {
    let Some(db) = setup().await else { return };
    let store = db.store();
    let created = seed(&store, 2).await;

    store.delete(created[0].id).await.unwrap();
    assert!(store.get(created[0].id).await.unwrap_err().is_not_found());
    assert_eq!(store.get(created[1].id).await.unwrap(), created[1]);

    // Deleting again, or deleting a row that never existed, still succeeds
    store.delete(created[0].id).await.unwrap();
    store.delete(987654).await.unwrap();
    assert_eq!(store.count(&CustomerListFilter::new()).await.unwrap(), 1);

    db.teardown().await;
}

#[tokio::test]
async fn test_update() {
    let Some(db) = setup().await else { return };
    let store = db.store();
    let original = store.create(random_customer()).await.unwrap();

    let replacement = random_customer().with_identity_of(&original);
    let updated = store.update(replacement.clone()).await.unwrap();
    assert_eq!(updated.id, original.id);
    assert_ne!(updated.revision, original.revision);
    assert_eq!(updated.first_name, replacement.first_name);
    assert_eq!(updated.birth_date, replacement.birth_date);
    assert_eq!(store.get(original.id).await.unwrap(), updated);

    // The replacement still carries the revision it was read at
    let stale = store.update(replacement).await.unwrap_err();
    assert!(matches!(stale, StoreError::Changed));
    assert_eq!(store.get(original.id).await.unwrap(), updated);

    let ghost = Customer {
        id: 555555,
        ..random_customer()
    };
    assert!(store.update(ghost).await.unwrap_err().is_not_found());

    db.teardown().await;
}

#[tokio::test]
async fn test_concurrent_updates_have_one_winner() {
    let Some(db) = setup().await else { return };
    let store = db.store();
    let original = store.create(random_customer()).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        let edit = random_customer().with_identity_of(&original);
        handles.push(tokio::spawn(async move { store.update(edit).await }));
    }

    let mut winners = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(updated) => winners.push(updated),
            Err(err) => assert!(matches!(err, StoreError::Changed), "unexpected error: {}", err),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(store.get(original.id).await.unwrap(), winners[0]);

    db.teardown().await;
}

#[tokio::test]
async fn test_operation_deadline_rolls_back() {
    let Some(db) = setup().await else { return };
    let store = db.store();
    let original = store.create(random_customer()).await.unwrap();

    // Hold the row lock from another transaction so the update cannot finish
    let mut blocker = db.customers.pool().begin().await.unwrap();
    sqlx::query("SELECT id FROM customers WHERE id = $1 FOR UPDATE")
        .bind(original.id)
        .fetch_one(&mut *blocker)
        .await
        .unwrap();

    let hasty = db.store().with_operation_timeout(Duration::from_millis(100));
    assert_eq!(hasty.operation_timeout(), Some(Duration::from_millis(100)));
    let err = hasty
        .update(random_customer().with_identity_of(&original))
        .await
        .unwrap_err();
    assert!(
        matches!(err, StoreError::Timeout { operation: "update customer" }),
        "unexpected error: {}",
        err
    );

    blocker.commit().await.unwrap();
    assert_eq!(store.get(original.id).await.unwrap(), original);

    // The abandoned update left the revision alone
    let edit = random_customer().with_identity_of(&original);
    let updated = store.update(edit.clone()).await.unwrap();
    assert_eq!(updated.first_name, edit.first_name);
    assert_ne!(updated.revision, original.revision);
    assert_eq!(store.get(original.id).await.unwrap(), updated);

    db.teardown().await;
}

#[tokio::test]
async fn test_filter_and_count() {
    let Some(db) = setup().await else { return };
    let store = db.store();
    for (first, last) in [
        ("John", "Doe"),
        ("joanna", "Smith"),
        ("Bojo", "Jones"),
        ("Jo", "Smithers"),
        ("A_b", "Park"),
        ("Acb", "Park"),
    ] {
        store.create(named(first, last)).await.unwrap();
    }

    let cases = [
        (CustomerListFilter::new().first_name("jO"), vec!["John", "joanna", "Jo"]),
        (CustomerListFilter::new().last_name("smith"), vec!["joanna", "Jo"]),
        (
            CustomerListFilter::new().first_name("jo").last_name("SMITHE"),
            vec!["Jo"],
        ),
        (CustomerListFilter::new().first_name("a_"), vec!["A_b"]),
        (CustomerListFilter::new().first_name("zz"), vec![]),
    ];

    for (filter, expected) in cases {
        let listed = store.list(&filter, &CustomerViewOptions::new()).await.unwrap();
        let mut names: Vec<_> = listed.iter().map(|c| c.first_name.clone()).collect();
        let mut expected: Vec<String> = expected.into_iter().map(String::from).collect();
        names.sort();
        expected.sort();
        assert_eq!(names, expected, "filter {:?}", filter);
        assert_eq!(store.count(&filter).await.unwrap(), listed.len() as i64);
    }

    db.teardown().await;
}

#[tokio::test]
async fn test_health_check_and_migrate_are_repeatable() {
    let Some(db) = setup().await else { return };

    db.customers.health_check().await.unwrap();
    db.customers.migrate().await.unwrap();
    db.store().create(random_customer()).await.unwrap();
    db.customers.migrate().await.unwrap();
    assert_eq!(
        db.store().count(&CustomerListFilter::new()).await.unwrap(),
        1
    );

    db.teardown().await;
}
