//! PostgreSQL store tests
//!
//! These run against the database named by `CART_TEST_DATABASE_URL` and are
//! skipped when it is unset.

use cart_service::cart::models::{Cart, CartItem};
use cart_service::store::{CartStore, PgStore};
use uuid::Uuid;

async fn connect() -> Option<PgStore> {
    let url = std::env::var("CART_TEST_DATABASE_URL").ok()?;
    Some(PgStore::connect(&url, 2).await.unwrap())
}

/// User ids unique to one test run so parallel runs do not collide
fn user(label: &str) -> String {
    format!("{}-{}", label, Uuid::new_v4().simple())
}

#[tokio::test]
async fn test_save_then_find_active_round_trips_items() {
    let Some(store) = connect().await else {
        return;
    };
    let user_id = user("pg-roundtrip");
    let mut cart = Cart::new_active(user_id.clone());
    cart.items = vec![CartItem::new("P1", 2), CartItem::new("P2", 1)];

    store.save(&cart).await.unwrap();
    let found = store.find_active(&user_id).await.unwrap().unwrap();

    assert_eq!(found.id, cart.id);
    assert_eq!(found.items, cart.items);
    assert!(found.is_active());
}

#[tokio::test]
async fn test_save_replaces_existing_document() {
    let Some(store) = connect().await else {
        return;
    };
    let user_id = user("pg-replace");
    let mut cart = Cart::new_active(user_id.clone());
    store.save(&cart).await.unwrap();

    cart.items.push(CartItem::new("P1", 3));
    store.save(&cart).await.unwrap();

    let all = store.find_all().await.unwrap();
    let mine: Vec<&Cart> = all.iter().filter(|c| c.user_id == user_id).collect();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].items, vec![CartItem::new("P1", 3)]);
}

#[tokio::test]
async fn test_find_active_prefers_oldest_duplicate() {
    let Some(store) = connect().await else {
        return;
    };
    let user_id = user("pg-duplicate");
    let first = Cart::new_active(user_id.clone());
    let second = Cart::new_active(user_id.clone());
    store.save(&first).await.unwrap();
    store.save(&second).await.unwrap();

    let found = store.find_active(&user_id).await.unwrap().unwrap();

    assert_eq!(found.id, first.id);
    assert!(store.find_active(&user("pg-nobody")).await.unwrap().is_none());
}
