//! Integration tests for the full checkout flow.
//!
//! The client crate drives a real server end to end: the cart lives in a
//! memory store, the session comes from a real login, and the resulting
//! order, line items and payment record land in `SQLite`.
//!
//! Run with: cargo test -p zidar-integration-tests

use zidar_client::api::ShopApi;
use zidar_client::{
    CardDetails, CartManager, CartStore, CheckoutError, CheckoutForm, MemoryCartStore, Session,
    place_order,
};
use zidar_core::{ArticleId, DeliveryType, OrderStatus, PaymentMethod, TransactionStatus};
use zidar_integration_tests::TestServer;

async fn signed_in(ts: &TestServer) -> (ShopApi, Session, String) {
    ts.register_account("amar@primjer.ba", "gradnja-2024").await;
    let api = ShopApi::new(&ts.base_url);
    let login = api
        .login("amar@primjer.ba", "gradnja-2024")
        .await
        .expect("login failed");
    let session = Session::from_login(&login).expect("token decode failed");
    let token = session.token().to_owned();
    (api, session, token)
}

async fn cart_with(
    api: &ShopApi,
    article_id: i64,
    quantity: u32,
) -> CartManager<MemoryCartStore> {
    let article = api
        .get_article(ArticleId::new(article_id))
        .await
        .expect("article fetch failed");
    let mut cart = CartManager::load(MemoryCartStore::new());
    cart.add(&article, quantity).expect("cart add failed");
    cart
}

fn form(payment_method: PaymentMethod) -> CheckoutForm {
    CheckoutForm {
        payment_method,
        delivery_type: DeliveryType::Standard,
        delivery_address: "Zmaja od Bosne 8, Sarajevo".to_owned(),
        card: CardDetails::default(),
    }
}

// ============================================================================
// Happy Path
// ============================================================================

#[tokio::test]
async fn test_checkout_places_order_items_and_transaction() {
    let ts = TestServer::spawn().await;
    let (api, session, token) = signed_in(&ts).await;
    let (_, article_id) = ts.create_catalog(&token, 100.0, 50).await;

    // 2 x 100.00 reaches free shipping: total is 200 + 34 tax.
    let mut cart = cart_with(&api, article_id, 2).await;
    let placed = place_order(
        &api,
        Some(&session),
        &mut cart,
        &form(PaymentMethod::CashOnDelivery),
    )
    .await
    .expect("checkout failed");

    assert_eq!(placed.order.status, OrderStatus::Processing);
    assert!((placed.order.total - 234.0).abs() < f64::EPSILON);
    assert_eq!(placed.transaction.order_id, placed.order.id);
    assert!((placed.transaction.amount - 234.0).abs() < f64::EPSILON);
    // Cash on delivery starts out unpaid.
    assert_eq!(placed.transaction.status, TransactionStatus::Pending);

    assert_eq!(ts.shop_count("narudzbe").await, 1);
    assert_eq!(ts.shop_count("stavke_narudzbe").await, 1);
    assert_eq!(ts.shop_count("transakcije").await, 1);

    let quantity = sqlx::query_scalar::<_, i64>("SELECT kolicina FROM stavke_narudzbe")
        .fetch_one(&ts.shop_pool)
        .await
        .expect("item query failed");
    assert_eq!(quantity, 2);
    let unit_price = sqlx::query_scalar::<_, f64>("SELECT cijena_po_komadu FROM stavke_narudzbe")
        .fetch_one(&ts.shop_pool)
        .await
        .expect("item query failed");
    assert!((unit_price - 100.0).abs() < f64::EPSILON);

    // The cart is emptied and its persisted key removed.
    assert!(cart.is_empty());
    assert!(cart.store().get().is_none());

    // Checkout records the order but never touches article stock.
    let article = api
        .get_article(ArticleId::new(article_id))
        .await
        .expect("article fetch failed");
    assert_eq!(article.stock, 50);
}

#[tokio::test]
async fn test_bank_transfer_checkout_is_paid_with_shipping_fee() {
    let ts = TestServer::spawn().await;
    let (api, session, token) = signed_in(&ts).await;
    let (_, article_id) = ts.create_catalog(&token, 100.0, 50).await;

    // 1 x 100.00 stays below the threshold: 100 + 10 shipping + 17 tax.
    let mut cart = cart_with(&api, article_id, 1).await;
    let placed = place_order(
        &api,
        Some(&session),
        &mut cart,
        &form(PaymentMethod::BankTransfer),
    )
    .await
    .expect("checkout failed");

    assert!((placed.order.total - 127.0).abs() < f64::EPSILON);
    assert_eq!(placed.transaction.status, TransactionStatus::Paid);

    let status = sqlx::query_scalar::<_, String>("SELECT status FROM transakcije")
        .fetch_one(&ts.shop_pool)
        .await
        .expect("transaction query failed");
    assert_eq!(status, "placena");
}

// ============================================================================
// Preconditions
// ============================================================================

#[tokio::test]
async fn test_failed_preconditions_send_nothing() {
    let ts = TestServer::spawn().await;
    let (api, session, token) = signed_in(&ts).await;
    let (_, article_id) = ts.create_catalog(&token, 100.0, 50).await;

    // Card payment with an empty card form.
    let mut cart = cart_with(&api, article_id, 2).await;
    let result = place_order(&api, Some(&session), &mut cart, &form(PaymentMethod::Card)).await;
    assert!(matches!(result, Err(CheckoutError::IncompleteCardDetails)));

    // Empty cart.
    let mut empty = CartManager::load(MemoryCartStore::new());
    let result = place_order(
        &api,
        Some(&session),
        &mut empty,
        &form(PaymentMethod::CashOnDelivery),
    )
    .await;
    assert!(matches!(result, Err(CheckoutError::EmptyCart)));

    assert_eq!(ts.shop_count("narudzbe").await, 0);
    assert_eq!(ts.shop_count("stavke_narudzbe").await, 0);
    assert_eq!(ts.shop_count("transakcije").await, 0);
    assert!(!cart.is_empty());
}

// ============================================================================
// Server Failures
// ============================================================================

#[tokio::test]
async fn test_rejected_order_leaves_cart_intact() {
    let ts = TestServer::spawn().await;
    let (api, session, token) = signed_in(&ts).await;
    let (_, article_id) = ts.create_catalog(&token, 100.0, 50).await;
    let mut cart = cart_with(&api, article_id, 2).await;

    // Make the order insert fail at the database layer.
    sqlx::raw_sql("DROP TABLE narudzbe")
        .execute(&ts.shop_pool)
        .await
        .expect("drop failed");

    let result = place_order(
        &api,
        Some(&session),
        &mut cart,
        &form(PaymentMethod::CashOnDelivery),
    )
    .await;

    let error = result.expect_err("checkout should fail");
    assert!(matches!(error, CheckoutError::Api(_)));
    // The server's message reaches the shopper unchanged.
    assert_eq!(error.user_message(), "Greška na serveru");

    assert_eq!(ts.shop_count("stavke_narudzbe").await, 0);
    assert_eq!(ts.shop_count("transakcije").await, 0);
    assert!(!cart.is_empty());
}

#[tokio::test]
async fn test_item_failure_skips_transaction_and_keeps_cart() {
    let ts = TestServer::spawn().await;
    let (api, session, token) = signed_in(&ts).await;
    let (_, article_id) = ts.create_catalog(&token, 100.0, 50).await;
    let mut cart = cart_with(&api, article_id, 2).await;

    // The order header lands, every line item fails.
    sqlx::raw_sql("DROP TABLE stavke_narudzbe")
        .execute(&ts.shop_pool)
        .await
        .expect("drop failed");

    let result = place_order(
        &api,
        Some(&session),
        &mut cart,
        &form(PaymentMethod::CashOnDelivery),
    )
    .await;
    assert!(matches!(result, Err(CheckoutError::Api(_))));

    // The created order stays behind (there is no rollback), but no payment
    // is recorded and the cart survives for a retry.
    assert_eq!(ts.shop_count("narudzbe").await, 1);
    assert_eq!(ts.shop_count("transakcije").await, 0);
    assert!(!cart.is_empty());
}
