//! Checkout orchestration.
//!
//! [`place_order`] turns the current cart into a persisted order: it
//! validates the shopper's input, creates the order, fans out the line
//! items concurrently and records the payment transaction, then empties
//! the cart. Failures leave the cart untouched so the shopper can retry;
//! already-created rows on the server are not rolled back.

use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use thiserror::Error;

use zidar_core::{DeliveryType, OrderStatus, PaymentMethod, price_to_f64};

use crate::api::{
    ApiError, Order, OrderItem, OrderItemRequest, OrderRequest, ShopApi, Transaction,
    TransactionRequest,
};
use crate::cart::CartManager;
use crate::session::Session;
use crate::store::CartStore;

/// Simulated card processing time before the confirmation is shown.
const CARD_PROCESSING_DELAY: Duration = Duration::from_millis(1500);

/// Card form fields, only consulted for [`PaymentMethod::Card`].
#[derive(Debug, Clone, Default)]
pub struct CardDetails {
    pub number: String,
    pub holder: String,
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    /// Whether every field has non-blank content.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !(self.number.trim().is_empty()
            || self.holder.trim().is_empty()
            || self.expiry.trim().is_empty()
            || self.cvv.trim().is_empty())
    }
}

/// What the shopper picked on the checkout page.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    pub delivery_address: String,
    pub card: CardDetails,
}

/// The records created by a successful checkout.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub transaction: Transaction,
}

/// Why a checkout did not complete. [`CheckoutError::user_message`] is the
/// notification text shown to the shopper.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("cart is empty")]
    EmptyCart,
    #[error("card details are incomplete")]
    IncompleteCardDetails,
    #[error("delivery address is missing")]
    MissingAddress,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CheckoutError {
    /// Bosnian notification text for this error. Server-provided messages
    /// are passed through; transport failures get a generic retry prompt.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotSignedIn => "Morate biti prijavljeni da biste naručili".to_owned(),
            Self::EmptyCart => "Vaša korpa je prazna".to_owned(),
            Self::IncompleteCardDetails => "Unesite sve podatke o kartici".to_owned(),
            Self::MissingAddress => "Unesite adresu dostave".to_owned(),
            Self::MissingField(field) => format!("Nedostaje obavezno polje: {field}"),
            Self::Api(error) => error.server_message().map_or_else(
                || "Narudžba nije uspjela. Pokušajte ponovo.".to_owned(),
                ToOwned::to_owned,
            ),
        }
    }
}

/// Place an order from the current cart.
///
/// Preconditions are checked in a fixed sequence before anything is sent:
/// a signed-in, unexpired session, a non-empty cart, complete card details
/// for card payments, then a non-blank delivery address. The first failed
/// check is the whole result.
///
/// On success the cart is emptied. Any failure after the order row exists
/// leaves the created rows in place and the cart intact.
///
/// # Errors
///
/// Returns the first failed precondition, or [`CheckoutError::Api`] when a
/// request is rejected or the server is unreachable.
pub async fn place_order<S: CartStore>(
    api: &ShopApi,
    session: Option<&Session>,
    cart: &mut CartManager<S>,
    form: &CheckoutForm,
) -> Result<PlacedOrder, CheckoutError> {
    match submit(api, session, cart, form).await {
        Ok(placed) => Ok(placed),
        Err(error) => {
            tracing::warn!(%error, "checkout failed");
            Err(error)
        }
    }
}

async fn submit<S: CartStore>(
    api: &ShopApi,
    session: Option<&Session>,
    cart: &mut CartManager<S>,
    form: &CheckoutForm,
) -> Result<PlacedOrder, CheckoutError> {
    let session = session.ok_or(CheckoutError::NotSignedIn)?;
    if session.is_expired(Utc::now()) {
        return Err(CheckoutError::NotSignedIn);
    }
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if form.payment_method == PaymentMethod::Card && !form.card.is_complete() {
        return Err(CheckoutError::IncompleteCardDetails);
    }
    if form.delivery_address.trim().is_empty() {
        return Err(CheckoutError::MissingAddress);
    }

    let totals = cart.totals(form.delivery_type);
    let total = price_to_f64(totals.total_rounded());

    let order_request = OrderRequest {
        korisnik_id: session.user_id(),
        datum_narudzbe: Utc::now(),
        ukupna_cijena: total,
        status: OrderStatus::Processing,
        nacin_placanja: form.payment_method,
        tip_dostave: form.delivery_type,
        adresa_dostave: form.delivery_address.trim().to_owned(),
    };
    validate_order_request(&order_request)?;
    let order = api.create_order(session.token(), &order_request).await?;

    let item_requests: Vec<OrderItemRequest> = cart
        .entries()
        .iter()
        .map(|entry| OrderItemRequest {
            narudzba_id: order.id,
            artikl_id: entry.id,
            kolicina: i64::from(entry.quantity),
            cijena_po_komadu: entry.price,
        })
        .collect();
    let results = join_all(
        item_requests
            .iter()
            .map(|item| api.create_order_item(session.token(), item)),
    )
    .await;
    results
        .into_iter()
        .collect::<Result<Vec<OrderItem>, ApiError>>()?;

    let transaction_request = TransactionRequest {
        narudzba_id: order.id,
        iznos: total,
        status: form.payment_method.initial_transaction_status(),
        datum_transakcije: Utc::now(),
    };
    let transaction = api
        .create_transaction(session.token(), &transaction_request)
        .await?;

    if form.payment_method == PaymentMethod::Card {
        tokio::time::sleep(CARD_PROCESSING_DELAY).await;
    }

    cart.clear();
    tracing::info!(order_id = %order.id, total, "checkout complete");
    Ok(PlacedOrder { order, transaction })
}

// The server answers these with a field-named 400; catching them locally
// avoids a request that cannot succeed.
fn validate_order_request(order: &OrderRequest) -> Result<(), CheckoutError> {
    if order.korisnik_id.as_i64() <= 0 {
        return Err(CheckoutError::MissingField("korisnik_id"));
    }
    if !order.ukupna_cijena.is_finite() || order.ukupna_cijena <= 0.0 {
        return Err(CheckoutError::MissingField("ukupna_cijena"));
    }
    if order.adresa_dostave.trim().is_empty() {
        return Err(CheckoutError::MissingField("adresa_dostave"));
    }
    Ok(())
}
