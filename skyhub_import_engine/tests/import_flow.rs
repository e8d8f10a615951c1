//! End-to-end pipeline tests against the SQLite reference backend.
mod support;

use skyhub_import_engine::{
    db_types::{Gender, NewAddress, NewCustomer, NewCustomerAddress, OrderStatusType},
    events::{EventHandlers, EventHooks, EventProducers},
    marketplace_objects::{
        MarketplaceAddress,
        MarketplaceCustomer,
        MarketplaceItem,
        MarketplaceOrder,
        MarketplaceStatus,
    },
    traits::{CustomerManagement, OrderManagement},
    OrderImportApi,
    OrderImportError,
    SqliteDatabase,
    StoreScope,
};
use soi_common::Money;
use support::{prepare_test_env, random_db_path};

async fn test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

fn shipping_address() -> MarketplaceAddress {
    MarketplaceAddress {
        street: "Rua das Laranjeiras".to_string(),
        number: Some("42".to_string()),
        neighborhood: Some("Centro".to_string()),
        complement: None,
        reference: None,
        city: "São Paulo".to_string(),
        region: Some("SP".to_string()),
        postcode: "01000-000".to_string(),
        country: None,
        phone: Some("11 99999-0000".to_string()),
    }
}

fn payload(code: &str) -> MarketplaceOrder {
    MarketplaceOrder {
        code: code.parse().unwrap(),
        channel: "AMERICANAS".to_string(),
        placed_at: Some("2024-05-01T10:00:00-03:00".to_string()),
        status: MarketplaceStatus { code: "payment_approved".to_string(), kind: "APPROVED".parse().unwrap() },
        customer: MarketplaceCustomer {
            name: "Maria da Silva Santos".to_string(),
            email: "maria.santos@example.com".to_string(),
            date_of_birth: None,
            gender: Some("female".to_string()),
            vat_number: Some("12345678909".to_string()),
            phones: vec!["11 99999-0000".to_string(), "11 3333-2222".to_string()],
        },
        billing_address: None,
        shipping_address: Some(shipping_address()),
        items: vec![
            MarketplaceItem {
                id: Some("SKU-100-RED".to_string()),
                product_id: "SKU-100".to_string(),
                qty: 2.0,
                original_price: 100.0,
                special_price: Some(80.0),
            },
            MarketplaceItem {
                id: None,
                product_id: "SKU-404".to_string(),
                qty: 1.0,
                original_price: 10.0,
                special_price: None,
            },
        ],
        shipping_carrier: Some("Correios".to_string()),
        shipping_method: Some("SEDEX".to_string()),
        shipping_cost: 10.0,
        discount: 5.0,
        interest: 0.0,
    }
}

#[tokio::test]
async fn importing_the_same_code_twice_creates_one_order() {
    let db = test_db().await;
    db.register_catalog_product("SKU-100", "Parent product").await.unwrap();
    db.register_catalog_product("SKU-100-RED", "Red variant").await.unwrap();
    let api = OrderImportApi::new(db.clone(), EventProducers::default());
    let scope = StoreScope::default();

    let first = api.import_order(&scope, payload("AM-001")).await.unwrap();
    assert!(first.is_new());
    let second = api.import_order(&scope, payload("AM-001")).await.unwrap();
    assert!(!second.is_new());
    assert_eq!(first.order().id, second.order().id);

    // The second call must not have re-run the creation path: same customer, same increment id.
    let stored = db.fetch_order_by_marketplace_code(&"AM-001".parse().unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.increment_id.as_deref(), Some("AM-001"));
    assert_eq!(stored.marketplace_channel.as_deref(), Some("AMERICANAS"));
    assert!(stored.from_marketplace);
}

#[tokio::test]
async fn unmatched_items_are_dropped_and_totals_reflect_it() {
    let db = test_db().await;
    db.register_catalog_product("SKU-100", "Parent product").await.unwrap();
    let api = OrderImportApi::new(db.clone(), EventProducers::default());

    let outcome = api.import_order(&StoreScope::default(), payload("AM-002")).await.unwrap();
    let order = outcome.order();
    // SKU-404 has no catalog match: only SKU-100 contributes, 2 x 80.00 at the special price.
    assert_eq!(order.subtotal, Money::from_float(160.0));
    // 160.00 + 10.00 shipping - 5.00 discount
    assert_eq!(order.grand_total, Money::from_float(165.0));
}

#[tokio::test]
async fn order_with_no_matching_items_is_not_created() {
    let db = test_db().await;
    let api = OrderImportApi::new(db.clone(), EventProducers::default());

    let err = api.import_order(&StoreScope::default(), payload("AM-003")).await.unwrap_err();
    assert!(matches!(err, OrderImportError::EmptyProductSet(code) if code.as_str() == "AM-003"));
    let stored = db.fetch_order_by_marketplace_code(&"AM-003".parse().unwrap()).await.unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn failed_import_raises_the_integration_event() {
    let db = test_db().await;
    let (tx, mut rx) = tokio::sync::mpsc::channel(8);
    let mut hooks = EventHooks::default();
    hooks.on_import_failed(move |event| {
        let tx = tx.clone();
        Box::pin(async move {
            let _ = tx.send(event).await;
        })
    });
    let handlers = EventHandlers::new(8, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let api = OrderImportApi::new(db, producers);

    // No catalog products are registered, so creation fails with an empty product set.
    let _ = api.import_order(&StoreScope::default(), payload("AM-004")).await.unwrap_err();
    let event = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for the import failed event")
        .expect("event channel closed");
    assert_eq!(event.code.as_str(), "AM-004");
    // The event carries the verbatim payload for diagnostics and replay.
    assert_eq!(event.payload["customer"]["email"], "maria.santos@example.com");
}

#[tokio::test]
async fn billing_address_falls_back_to_shipping() {
    let db = test_db().await;
    db.register_catalog_product("SKU-100", "Parent product").await.unwrap();
    let api = OrderImportApi::new(db.clone(), EventProducers::default());

    let outcome = api.import_order(&StoreScope::default(), payload("AM-005")).await.unwrap();
    let order = outcome.order();
    assert_eq!(order.billing_address, order.shipping_address);
    let billing: NewAddress = serde_json::from_str(&order.billing_address).unwrap();
    // Two street lines by default: street, then number + neighborhood merged.
    assert_eq!(billing.street, vec!["Rua das Laranjeiras".to_string(), "42 Centro".to_string()]);
    assert_eq!(billing.country_id, "BR");
    assert_eq!(billing.firstname, "Maria");
    assert_eq!(billing.lastname, "Santos");
}

#[tokio::test]
async fn new_customer_is_created_once_and_reused() {
    let db = test_db().await;
    db.register_catalog_product("SKU-100", "Parent product").await.unwrap();
    let api = OrderImportApi::new(db.clone(), EventProducers::default());
    let scope = StoreScope::default();

    let first = api.import_order(&scope, payload("AM-006")).await.unwrap();
    let second = api.import_order(&scope, payload("AM-007")).await.unwrap();
    assert_eq!(first.order().customer_id, second.order().customer_id);

    let customer =
        db.fetch_customer_by_email("maria.santos@example.com", scope.website_id).await.unwrap().unwrap();
    assert_eq!(customer.firstname, "Maria");
    assert_eq!(customer.middlename.as_deref(), Some("da Silva"));
    assert_eq!(customer.lastname, "Santos");
    assert_eq!(customer.gender, Some(Gender::Female));
    // Only the first phone number is taken.
    assert_eq!(customer.telephone.as_deref(), Some("11 99999-0000"));
    // The payload only carried a shipping address, so one record exists, default for the shipping role only.
    assert_eq!(customer.addresses.len(), 1);
    let address_id = customer.addresses[0].id;
    assert_eq!(customer.default_billing, None);
    assert_eq!(customer.default_shipping, Some(address_id));
}

#[tokio::test]
async fn existing_customer_defaults_override_payload_addresses() {
    let db = test_db().await;
    db.register_catalog_product("SKU-100", "Parent product").await.unwrap();
    let scope = StoreScope::default();

    let stored_address = |street: &str, billing: bool, shipping: bool| NewCustomerAddress {
        address: NewAddress {
            firstname: "Maria".to_string(),
            lastname: "Santos".to_string(),
            telephone: None,
            street: vec![street.to_string()],
            city: "Campinas".to_string(),
            region: Some("SP".to_string()),
            postcode: "13000-000".to_string(),
            country_id: "BR".to_string(),
        },
        is_default_billing: billing,
        is_default_shipping: shipping,
    };
    db.insert_customer(NewCustomer {
        website_id: scope.website_id,
        store_id: scope.store_id,
        email: "maria.santos@example.com".to_string(),
        firstname: "Maria".to_string(),
        middlename: None,
        lastname: "Santos".to_string(),
        addresses: vec![stored_address("Rua A", false, true), stored_address("Rua B", true, false)],
        ..Default::default()
    })
    .await
    .unwrap();

    let api = OrderImportApi::new(db.clone(), EventProducers::default());
    let outcome = api.import_order(&scope, payload("AM-008")).await.unwrap();
    let order = outcome.order();
    let billing: NewAddress = serde_json::from_str(&order.billing_address).unwrap();
    let shipping: NewAddress = serde_json::from_str(&order.shipping_address).unwrap();
    // Both defaults matched during the scan: billing from Rua B, shipping from Rua A. The marketplace shipping
    // address is ignored for existing customers.
    assert_eq!(billing.street, vec!["Rua B".to_string()]);
    assert_eq!(shipping.street, vec!["Rua A".to_string()]);
}

#[tokio::test]
async fn marketplace_status_is_applied_after_creation() {
    let db = test_db().await;
    db.register_catalog_product("SKU-100", "Parent product").await.unwrap();
    let api = OrderImportApi::new(db.clone(), EventProducers::default());

    let outcome = api.import_order(&StoreScope::default(), payload("AM-009")).await.unwrap();
    let stored = db.fetch_order_by_id(outcome.order().id).await.unwrap().unwrap();
    // The payload carried APPROVED, which maps to Processing.
    assert_eq!(stored.status, OrderStatusType::Processing);
}

#[tokio::test]
async fn duplicate_inserts_surface_typed_errors() {
    let db = test_db().await;
    db.register_catalog_product("SKU-100", "Parent product").await.unwrap();
    let api = OrderImportApi::new(db.clone(), EventProducers::default());
    let scope = StoreScope::default();
    api.import_order(&scope, payload("AM-011")).await.unwrap();

    let customer = NewCustomer {
        website_id: scope.website_id,
        store_id: scope.store_id,
        email: "maria.santos@example.com".to_string(),
        firstname: "Maria".to_string(),
        lastname: "Santos".to_string(),
        ..Default::default()
    };
    let err = db.insert_customer(customer).await.unwrap_err();
    assert!(matches!(
        err,
        skyhub_import_engine::traits::CustomerApiError::CustomerAlreadyExists(email, website)
            if email == "maria.santos@example.com" && website == scope.website_id
    ));
}

#[tokio::test]
async fn zero_quantity_defaults_to_one() {
    let db = test_db().await;
    db.register_catalog_product("SKU-100", "Parent product").await.unwrap();
    let api = OrderImportApi::new(db.clone(), EventProducers::default());

    let mut order = payload("AM-010");
    order.items.truncate(1);
    order.items[0].qty = 0.0;
    order.items[0].special_price = None;
    let outcome = api.import_order(&StoreScope::default(), order).await.unwrap();
    assert_eq!(outcome.order().subtotal, Money::from_float(100.0));
}
