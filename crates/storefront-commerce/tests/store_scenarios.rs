//! End-to-end behaviour of the commerce store over different ports.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use storefront_commerce::prelude::*;
use storefront_storage::{FileStorage, MemoryStorage, StorageError, StoragePort, StorageResult};

/// Port whose reads and writes can be switched to fail.
#[derive(Default)]
struct FlakyStorage {
    inner: MemoryStorage,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStorage {
    fn unavailable() -> StorageError {
        StorageError::Unavailable("quota exceeded".to_string())
    }
}

impl StoragePort for FlakyStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.remove(key)
    }
}

fn product(id: &str, price: f64) -> ProductRef {
    ProductRef::new(id, format!("Product {}", id), price)
}

#[test]
fn cart_scenario_totals_350() {
    let store = CommerceStore::new(MemoryStorage::new());

    store.add_to_cart(&product("A", 100.0));
    store.add_to_cart(&product("B", 50.0));
    store.update_quantity(&ProductId::new("A"), 3);

    let cart = store.read_cart();
    let summary: Vec<(&str, u32, f64)> = cart
        .iter()
        .map(|l| (l.id().as_str(), l.quantity, l.product.price))
        .collect();
    assert_eq!(summary, vec![("A", 3, 100.0), ("B", 1, 50.0)]);

    let total: f64 = cart
        .iter()
        .map(|l| l.product.price * f64::from(l.quantity))
        .sum();
    assert_eq!(total, 350.0);
    assert_eq!(store.cart_totals().unwrap().subtotal.amount_cents, 35000);
}

#[test]
fn wishlist_toggle_scenario() {
    let store = CommerceStore::new(MemoryStorage::new());
    let x = ProductRef::new("X", "", 0.0);

    store.toggle_wishlist(&x);
    let ids: Vec<String> = store
        .read_wishlist()
        .into_iter()
        .map(|p| p.id.into_inner())
        .collect();
    assert_eq!(ids, vec!["X"]);

    store.toggle_wishlist(&x);
    assert!(store.read_wishlist().is_empty());
}

#[test]
fn clear_non_empty_cart() {
    let store = CommerceStore::new(MemoryStorage::new());
    store.add_to_cart(&product("A", 100.0));
    store.add_to_cart(&product("B", 50.0));

    store.clear_cart();
    assert!(store.read_cart().is_empty());
}

#[test]
fn throwing_reads_yield_empty_cart() {
    let storage = FlakyStorage::default();
    let store = CommerceStore::new(&storage);
    store.write_cart(&[CartLine::new(product("A", 100.0), 2)]);

    storage.fail_reads.store(true, Ordering::SeqCst);
    assert!(store.read_cart().is_empty());
    assert!(store.read_wishlist().is_empty());
    assert_eq!(store.cart_item_count(), 0);

    storage.fail_reads.store(false, Ordering::SeqCst);
    assert_eq!(store.read_cart().len(), 1);
}

#[test]
fn throwing_writes_do_not_panic_or_notify() {
    let storage = FlakyStorage::default();
    let store = CommerceStore::new(&storage);
    let notified = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&notified);
    store.subscribe(move |_| *counter.lock().unwrap() += 1);

    storage.fail_writes.store(true, Ordering::SeqCst);
    let cart = store.add_to_cart(&product("A", 100.0));
    let wishlist = store.toggle_wishlist(&product("A", 100.0));
    store.clear_cart();

    // operations still report the state they computed
    assert_eq!(cart.len(), 1);
    assert_eq!(wishlist.len(), 1);
    // nothing was persisted and nobody was told
    assert!(storage.inner.is_empty());
    assert_eq!(*notified.lock().unwrap(), 0);
}

#[test]
fn file_storage_persists_across_store_instances() {
    let tmp = tempfile::tempdir().unwrap();

    {
        let store = CommerceStore::new(FileStorage::open(tmp.path()).unwrap());
        store.add_to_cart(&product("A", 100.0).with_category("Mugs"));
        store.toggle_wishlist(&product("B", 50.0));
    }

    let store = CommerceStore::new(FileStorage::open(tmp.path()).unwrap());
    let cart = store.read_cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].product.category.as_deref(), Some("Mugs"));
    assert!(store.is_wishlisted(&ProductId::new("B")));

    let raw = std::fs::read_to_string(tmp.path().join("rc_cart.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["id"], "A");
    assert_eq!(value[0]["quantity"], 1);
}

#[test]
fn reads_cart_written_by_the_web_storefront() {
    let storage = MemoryStorage::new();
    storage
        .set(
            "rc_cart",
            r#"[{"id":"9f1c","name":"Brass Diya","price":249,"image_url":"products/diya.jpg","description":"Hand made","category":"Decor","stock":12,"quantity":2}]"#,
        )
        .unwrap();
    let store = CommerceStore::new(&storage);

    let cart = store.add_to_cart(&ProductRef::new("9f1c", "Brass Diya", 249.0));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 3);
    assert_eq!(cart[0].product.extra["stock"], 12);

    let raw = storage.get("rc_cart").unwrap().unwrap();
    assert!(raw.contains(r#""stock":12"#));
}

#[test]
fn reads_web_rows_with_null_columns() {
    let storage = MemoryStorage::new();
    storage
        .set(
            "rc_cart",
            r#"[{"id":"A","name":"Brass Diya","price":249,"image_url":null,"description":null,"category":null,"quantity":2}]"#,
        )
        .unwrap();
    let store = CommerceStore::new(&storage);

    let cart = store.read_cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 2);
    assert_eq!(cart[0].product.image_url, "");
    assert_eq!(cart[0].product.description, "");
    assert!(cart[0].product.category.is_none());

    let cart = store.add_to_cart(&product("B", 50.0));
    assert_eq!(cart.len(), 2);
    assert_eq!(cart[0].id().as_str(), "A");
    assert_eq!(cart[0].quantity, 2);
}

#[test]
fn reads_web_rows_with_image_column() {
    let storage = MemoryStorage::new();
    storage
        .set(
            "wishlist",
            r#"[{"id":"A","name":"Brass Diya","price":249,"image":"products/diya.jpg"}]"#,
        )
        .unwrap();
    let store = CommerceStore::new(&storage);

    let entries = store.read_wishlist();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].image_url, "products/diya.jpg");
}

#[test]
fn stock_quantity_column_survives_wishlist_to_cart() {
    let store = CommerceStore::new(MemoryStorage::new());
    let row: ProductRef =
        serde_json::from_str(r#"{"id":"A","name":"Mug","price":100,"quantity":7}"#).unwrap();

    store.toggle_wishlist(&row);
    let saved = store.read_wishlist();
    assert_eq!(saved[0].extra["quantity"], 7);

    store.add_to_cart(&saved[0]);
    let cart = store.read_cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 1);

    let cart = store.add_to_cart(&saved[0]);
    assert_eq!(cart[0].quantity, 2);
    assert_eq!(store.read_cart()[0].quantity, 2);
}

#[test]
fn one_malformed_row_does_not_hide_the_rest() {
    let storage = MemoryStorage::new();
    storage
        .set(
            "rc_cart",
            r#"[{"id":"A","name":"Mug","price":100,"quantity":3},{"id":"B","name":"Bowl","price":"fifty","quantity":1},{"id":"C","name":"Cup","price":10,"quantity":1}]"#,
        )
        .unwrap();
    let store = CommerceStore::new(&storage);

    let ids: Vec<String> = store.read_cart().iter().map(|l| l.id().to_string()).collect();
    assert_eq!(ids, vec!["A", "C"]);
    assert_eq!(store.cart_totals().unwrap().subtotal.to_decimal(), 310.0);
}

#[test]
fn checkout_reads_cart_once() {
    let store = CommerceStore::new(MemoryStorage::new());
    store.add_to_cart(&product("A", 100.0));
    store.update_quantity(&ProductId::new("A"), 2);

    let number = OrderNumber::sequential(
        chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        ["18102026-1"],
    );
    let config = CheckoutConfig {
        whatsapp_number: "919876543210".to_string(),
    };
    let handoff = prepare_handoff(
        &store.read_cart(),
        number,
        &config,
        Currency::INR,
        chrono::Utc::now(),
    )
    .unwrap();

    assert_eq!(handoff.summary.order_number.to_string(), "18102026-2");
    assert_eq!(handoff.summary.total, Money::new(20000, Currency::INR));
    assert!(handoff.whatsapp_url.starts_with("https://wa.me/919876543210?text="));
}
