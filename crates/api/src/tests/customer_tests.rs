// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::{CreateOrderRequest, UpdateCustomerRequest};
use crate::tests::helpers::{add_book, create_admin, create_customer, test_persistence};
use crate::{
    ApiError, create_order, delete_customer, get_customer, list_customers, update_customer,
};

fn update_request(email: &str, city: &str) -> UpdateCustomerRequest {
    UpdateCustomerRequest {
        email: email.to_string(),
        given_name: String::from("John"),
        surname: String::from("Smith"),
        country: String::from("United States"),
        city: city.to_string(),
        street: String::from("Broadway"),
        house_number: String::from("123"),
        phone: String::from("2125551234"),
        birth_date: String::from("1985-05-15"),
    }
}

#[test]
fn test_customer_list_contains_only_customers() {
    let mut persistence = test_persistence();
    let admin = create_admin(&mut persistence, "admin@example.com");
    create_customer(&mut persistence, "alice@example.com");
    create_customer(&mut persistence, "bob@example.com");

    let customers = list_customers(&mut persistence, &admin).expect("list should succeed");
    assert_eq!(customers.len(), 2);
    assert!(customers.iter().all(|c| c.email != "admin@example.com"));
}

#[test]
fn test_customer_may_update_own_profile() {
    let mut persistence = test_persistence();
    let alice = create_customer(&mut persistence, "alice@example.com");
    let alice_id = alice.user_id().unwrap();

    let updated = update_customer(
        &mut persistence,
        &alice,
        alice_id,
        &update_request("alice@example.com", "Boston"),
    )
    .expect("self update should succeed");
    assert_eq!(updated.city, "Boston");
}

#[test]
fn test_profile_update_normalizes_email() {
    let mut persistence = test_persistence();
    let alice = create_customer(&mut persistence, "alice@example.com");
    let alice_id = alice.user_id().unwrap();

    let updated = update_customer(
        &mut persistence,
        &alice,
        alice_id,
        &update_request("ALICE.NEW@Example.COM", "New York"),
    )
    .expect("self update should succeed");
    assert_eq!(updated.email, "alice.new@example.com");
}

#[test]
fn test_profile_update_rejects_taken_email() {
    let mut persistence = test_persistence();
    create_customer(&mut persistence, "taken@example.com");
    let alice = create_customer(&mut persistence, "alice@example.com");
    let alice_id = alice.user_id().unwrap();

    let result = update_customer(
        &mut persistence,
        &alice,
        alice_id,
        &update_request("taken@example.com", "New York"),
    );
    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_admin_may_update_any_profile() {
    let mut persistence = test_persistence();
    let admin = create_admin(&mut persistence, "admin@example.com");
    let alice = create_customer(&mut persistence, "alice@example.com");
    let alice_id = alice.user_id().unwrap();

    let updated = update_customer(
        &mut persistence,
        &admin,
        alice_id,
        &update_request("alice@example.com", "Chicago"),
    )
    .expect("admin update should succeed");
    assert_eq!(updated.city, "Chicago");
}

#[test]
fn test_delete_customer_is_admin_only_and_blocked_by_orders() {
    let mut persistence = test_persistence();
    let admin = create_admin(&mut persistence, "admin@example.com");
    let alice = create_customer(&mut persistence, "alice@example.com");
    let alice_id = alice.user_id().unwrap();

    assert!(matches!(
        delete_customer(&mut persistence, &alice, alice_id),
        Err(ApiError::Forbidden { .. })
    ));

    let book = add_book(&mut persistence, &admin, "Anchor", "12.99", "9780000000018");
    create_order(
        &mut persistence,
        &alice,
        &CreateOrderRequest {
            book_ids: vec![book.id],
            customer_id: None,
        },
    )
    .expect("order creation should succeed");

    // Orders pin their customer record.
    assert!(matches!(
        delete_customer(&mut persistence, &admin, alice_id),
        Err(ApiError::Conflict { .. })
    ));
}

#[test]
fn test_delete_customer_without_orders_succeeds() {
    let mut persistence = test_persistence();
    let admin = create_admin(&mut persistence, "admin@example.com");
    let alice = create_customer(&mut persistence, "alice@example.com");
    let alice_id = alice.user_id().unwrap();

    delete_customer(&mut persistence, &admin, alice_id).expect("delete should succeed");

    let result = get_customer(&mut persistence, &admin, alice_id);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
