//! Integration tests for the REST API.
//!
//! Each test spawns its own server with fresh in-memory databases via
//! [`TestServer::spawn`], so tests are independent and need no external
//! setup.
//!
//! Run with: cargo test -p zidar-integration-tests

use reqwest::StatusCode;
use serde_json::{Value, json};

use zidar_integration_tests::TestServer;

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let ts = TestServer::spawn().await;

    let response = ts
        .client
        .get(ts.url("/health"))
        .send()
        .await
        .expect("health request failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.expect("no body"), "ok");

    let response = ts
        .client
        .get(ts.url("/health/ready"))
        .send()
        .await
        .expect("readiness request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Registration & Login
// ============================================================================

#[tokio::test]
async fn test_registration_and_login_roundtrip() {
    let ts = TestServer::spawn().await;

    let response = ts
        .client
        .post(ts.url("/korisnici"))
        .json(&json!({
            "ime": "Amar",
            "prezime": "Begić",
            "email": "amar@primjer.ba",
            "sifra": "gradnja-2024",
            "telefon": "+387 61 111 222",
            "adresa": "Zmaja od Bosne 8, Sarajevo",
        }))
        .send()
        .await
        .expect("registration failed");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["ime"], "Amar");
    assert_eq!(body["tip_korisnika"], "fizicko_lice");
    // The password hash must never appear in a response.
    assert!(body.get("sifra").is_none());

    let response = ts
        .client
        .post(ts.url("/login"))
        .json(&json!({"email": "amar@primjer.ba", "sifra": "pogresna-sifra"}))
        .send()
        .await
        .expect("login failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Neispravan email ili šifra");

    let response = ts
        .client
        .post(ts.url("/login"))
        .json(&json!({"email": "amar@primjer.ba", "sifra": "gradnja-2024"}))
        .send()
        .await
        .expect("login failed");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["token"].as_str().expect("no token").split('.').count(), 3);
    assert_eq!(body["user"]["username"], "Amar Begić");
    assert_eq!(body["user"]["uloga"], "fizicko_lice");
}

#[tokio::test]
async fn test_registration_validation() {
    let ts = TestServer::spawn().await;

    // Missing field names the field.
    let response = ts
        .client
        .post(ts.url("/korisnici"))
        .json(&json!({
            "ime": "Amar",
            "prezime": "Begić",
            "sifra": "gradnja-2024",
            "telefon": "+387 61 111 222",
            "adresa": "Zmaja od Bosne 8",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Nedostaje obavezno polje: email");

    // Short password.
    let response = ts
        .client
        .post(ts.url("/korisnici"))
        .json(&json!({
            "ime": "Amar",
            "prezime": "Begić",
            "email": "kratka@primjer.ba",
            "sifra": "abc",
            "telefon": "+387 61 111 222",
            "adresa": "Zmaja od Bosne 8",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Šifra mora imati najmanje 6 znakova");

    // Unknown account kind token.
    let response = ts
        .client
        .post(ts.url("/korisnici"))
        .json(&json!({
            "ime": "Amar",
            "prezime": "Begić",
            "email": "tip@primjer.ba",
            "sifra": "gradnja-2024",
            "telefon": "+387 61 111 222",
            "adresa": "Zmaja od Bosne 8",
            "tip_korisnika": "nepoznato",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Neispravna vrijednost polja: tip_korisnika");

    // Duplicate email.
    ts.register_account("dupla@primjer.ba", "gradnja-2024").await;
    let response = ts
        .client
        .post(ts.url("/korisnici"))
        .json(&json!({
            "ime": "Amar",
            "prezime": "Begić",
            "email": "dupla@primjer.ba",
            "sifra": "gradnja-2024",
            "telefon": "+387 61 111 222",
            "adresa": "Zmaja od Bosne 8",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Korisnik sa ovim emailom već postoji");
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn test_catalog_writes_require_token() {
    let ts = TestServer::spawn().await;

    // Reads are open.
    let response = ts
        .client
        .get(ts.url("/artikli"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    // Writes are not.
    let response = ts
        .client
        .post(ts.url("/artikli"))
        .json(&json!({"naziv": "Cement"}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Nedostaje token za prijavu");

    let response = ts
        .client
        .post(ts.url("/kategorije"))
        .bearer_auth("nije.pravi.token")
        .json(&json!({"naziv": "Cement", "opis": "Vezivni materijali"}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Neispravan token");

    // Order reads need a token as well.
    let response = ts
        .client
        .get(ts.url("/narudzbe"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Catalog CRUD
// ============================================================================

#[tokio::test]
async fn test_catalog_crud_and_category_filter() {
    let ts = TestServer::spawn().await;
    ts.register_account("amar@primjer.ba", "gradnja-2024").await;
    let token = ts.login_token("amar@primjer.ba", "gradnja-2024").await;

    let (category_id, article_id) = ts.create_catalog(&token, 12.5, 120).await;

    // A second category with its own article.
    let response = ts
        .client
        .post(ts.url("/kategorije"))
        .bearer_auth(&token)
        .json(&json!({"naziv": "Alati", "opis": "Ručni alati"}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);
    let other_category: Value = response.json().await.expect("body not JSON");
    let response = ts
        .client
        .post(ts.url("/artikli"))
        .bearer_auth(&token)
        .json(&json!({
            "naziv": "Zidarska mistrija",
            "opis": "Nehrđajuća mistrija 180mm",
            "cijena": 14.0,
            "kolicina_na_stanju": 35,
            "kategorija_id": other_category["id"],
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);

    // Unfiltered list sees both, the category filter narrows to one.
    let all: Vec<Value> = ts
        .client
        .get(ts.url("/artikli"))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body not JSON");
    assert_eq!(all.len(), 2);

    let filtered: Vec<Value> = ts
        .client
        .get(ts.url("/artikli"))
        .query(&[("kategorija_id", category_id)])
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body not JSON");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.first().expect("empty list")["naziv"], "Cement 25kg");

    // Full replace via PUT.
    let response = ts
        .client
        .put(ts.url(&format!("/artikli/{article_id}")))
        .bearer_auth(&token)
        .json(&json!({
            "naziv": "Cement 25kg",
            "opis": "Portland cement CEM II 42.5N",
            "cijena": 13.9,
            "kolicina_na_stanju": 100,
            "kategorija_id": category_id,
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["izmijenjeno"], 1);

    let article: Value = ts
        .client
        .get(ts.url(&format!("/artikli/{article_id}")))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body not JSON");
    assert_eq!(article["cijena"], 13.9);

    // Delete, then the id is gone.
    let response = ts
        .client
        .delete(ts.url(&format!("/artikli/{article_id}")))
        .bearer_auth(&token)
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["obrisano"], 1);

    let response = ts
        .client
        .get(ts.url(&format!("/artikli/{article_id}")))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Artikl nije pronađen");
}

#[tokio::test]
async fn test_unknown_ids_are_404_not_500() {
    let ts = TestServer::spawn().await;
    ts.register_account("amar@primjer.ba", "gradnja-2024").await;
    let token = ts.login_token("amar@primjer.ba", "gradnja-2024").await;

    let response = ts
        .client
        .get(ts.url("/kategorije/9999"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Kategorija nije pronađena");

    // An update that matches zero rows reports 404, not success or 500.
    let response = ts
        .client
        .put(ts.url("/kategorije/9999"))
        .bearer_auth(&token)
        .json(&json!({"naziv": "Alati", "opis": "Ručni alati"}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ts
        .client
        .delete(ts.url("/narudzbe/9999"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Orders, Items, Transactions
// ============================================================================

#[tokio::test]
async fn test_order_endpoints() {
    let ts = TestServer::spawn().await;
    let user_id = ts.register_account("amar@primjer.ba", "gradnja-2024").await;
    let token = ts.login_token("amar@primjer.ba", "gradnja-2024").await;
    let (_, article_id) = ts.create_catalog(&token, 100.0, 50).await;

    // Order header: date and status omitted, the server fills them in.
    let response = ts
        .client
        .post(ts.url("/narudzbe"))
        .bearer_auth(&token)
        .json(&json!({
            "korisnik_id": user_id,
            "ukupna_cijena": 234.0,
            "nacin_placanja": "pouzece",
            "tip_dostave": "standardna",
            "adresa_dostave": "Zmaja od Bosne 8, Sarajevo",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);
    let order: Value = response.json().await.expect("body not JSON");
    assert_eq!(order["status"], "u_obradi");
    assert!(order["datum_narudzbe"].is_string());
    let order_id = order["id"].as_i64().expect("order has no id");

    // Missing required field is a named 400.
    let response = ts
        .client
        .post(ts.url("/narudzbe"))
        .bearer_auth(&token)
        .json(&json!({
            "korisnik_id": user_id,
            "ukupna_cijena": 234.0,
            "tip_dostave": "standardna",
            "adresa_dostave": "Zmaja od Bosne 8",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Nedostaje obavezno polje: nacin_placanja");

    // Line item, then filter by order.
    let response = ts
        .client
        .post(ts.url("/stavkenarudzbe"))
        .bearer_auth(&token)
        .json(&json!({
            "narudzba_id": order_id,
            "artikl_id": article_id,
            "kolicina": 2,
            "cijena_po_komadu": 100.0,
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);

    let items: Vec<Value> = ts
        .client
        .get(ts.url("/stavkenarudzbe"))
        .bearer_auth(&token)
        .query(&[("narudzba_id", order_id)])
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body not JSON");
    assert_eq!(items.len(), 1);
    assert_eq!(items.first().expect("empty list")["kolicina"], 2);

    // Payment record accepts the historical `datum` alias.
    let response = ts
        .client
        .post(ts.url("/transakcije"))
        .bearer_auth(&token)
        .json(&json!({
            "narudzba_id": order_id,
            "iznos": 234.0,
            "status": "na_cekanju",
            "datum": "2026-08-01T10:00:00Z",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);
    let transaction: Value = response.json().await.expect("body not JSON");
    assert_eq!(transaction["status"], "na_cekanju");
    assert_eq!(transaction["datum_transakcije"], "2026-08-01T10:00:00Z");

    // Replacing the order flips its status.
    let response = ts
        .client
        .put(ts.url(&format!("/narudzbe/{order_id}")))
        .bearer_auth(&token)
        .json(&json!({
            "korisnik_id": user_id,
            "ukupna_cijena": 234.0,
            "status": "poslana",
            "nacin_placanja": "pouzece",
            "tip_dostave": "standardna",
            "adresa_dostave": "Zmaja od Bosne 8, Sarajevo",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let order: Value = ts
        .client
        .get(ts.url(&format!("/narudzbe/{order_id}")))
        .bearer_auth(&token)
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body not JSON");
    assert_eq!(order["status"], "poslana");
}

// ============================================================================
// Events API
// ============================================================================

#[tokio::test]
async fn test_events_api_is_open_and_crud_works() {
    let ts = TestServer::spawn().await;

    // No token anywhere in this flow.
    let response = ts
        .client
        .post(ts.url("/lokacije"))
        .json(&json!({
            "naziv": "Dom mladih",
            "adresa": "Terezije bb",
            "grad": "Sarajevo",
            "kapacitet": 800,
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);
    let location: Value = response.json().await.expect("body not JSON");

    let response = ts
        .client
        .post(ts.url("/dogadjaji"))
        .json(&json!({
            "naziv": "Sajam građevinarstva",
            "opis": "Godišnji sajam materijala i opreme",
            "datum": "2026-10-01T09:00:00Z",
            "lokacija_id": location["id"],
            "organizator": "Zidar d.o.o.",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);
    let event: Value = response.json().await.expect("body not JSON");

    let response = ts
        .client
        .post(ts.url("/karte"))
        .json(&json!({
            "dogadjaj_id": event["id"],
            "tip": "regularna",
            "cijena": 5.0,
            "kolicina": 500,
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);

    // Comment timestamp defaults to now when omitted.
    let response = ts
        .client
        .post(ts.url("/komentari"))
        .json(&json!({
            "dogadjaj_id": event["id"],
            "autor": "Amar",
            "sadrzaj": "Vidimo se na sajmu!",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);
    let comment: Value = response.json().await.expect("body not JSON");
    assert!(comment["datum"].is_string());

    let events: Vec<Value> = ts
        .client
        .get(ts.url("/dogadjaji"))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body not JSON");
    assert_eq!(events.len(), 1);

    let response = ts
        .client
        .delete(ts.url(&format!(
            "/komentari/{}",
            comment["id"].as_i64().expect("comment has no id")
        )))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["obrisano"], 1);

    let response = ts
        .client
        .get(ts.url("/karte/9999"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("body not JSON");
    assert_eq!(body["greska"], "Karta nije pronađena");
}
