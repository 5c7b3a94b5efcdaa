//! Repository properties against a live Postgres instance.
//!
//! These tests need a database with `schema.sql` loaded and `DATABASE_URL`
//! pointing at it, so they are ignored by default:
//!
//!     cargo test -p common -- --ignored

use std::env;

use common::db;
use common::models::{Client, ClientStatus, ClientType};
use dotenv::dotenv;
use sqlx::{Pool, Postgres};

async fn connect() -> Pool<Postgres> {
    dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    db::establish_connection(&database_url)
        .await
        .expect("failed to connect to test database")
}

fn sample_client() -> Client {
    Client {
        client_id: 0,
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: Some("jane@doe.dev".to_string()),
        phone: Some("555-0100".to_string()),
        company_name: Some("Acme".to_string()),
        client_type: Some(ClientType::Individual.to_string()),
        registration_date: None,
        status: Some(ClientStatus::New.to_string()),
        notes: None,
    }
}

#[tokio::test]
#[ignore]
async fn add_then_list_contains_the_record_with_a_fresh_id() {
    let pool = connect().await;

    let before = db::get_all_clients(&pool).await.unwrap();
    let created = db::add_client(&pool, &sample_client()).await.unwrap();

    assert!(created.client_id > 0);
    assert!(before.iter().all(|c| c.client_id != created.client_id));

    let after = db::get_all_clients(&pool).await.unwrap();
    let found = after
        .iter()
        .find(|c| c.client_id == created.client_id)
        .expect("added client missing from list");
    assert_eq!(*found, created);

    db::delete_client(&pool, created.client_id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn add_preserves_every_field_except_the_id() {
    let pool = connect().await;

    let candidate = sample_client();
    let created = db::add_client(&pool, &candidate).await.unwrap();

    assert_eq!(created.first_name, candidate.first_name);
    assert_eq!(created.last_name, candidate.last_name);
    assert_eq!(created.email, candidate.email);
    assert_eq!(created.phone, candidate.phone);
    assert_eq!(created.company_name, candidate.company_name);
    assert_eq!(created.client_type, candidate.client_type);
    assert_eq!(created.registration_date, candidate.registration_date);
    assert_eq!(created.status, candidate.status);
    assert_eq!(created.notes, candidate.notes);

    db::delete_client(&pool, created.client_id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn update_overwrites_all_mutable_fields() {
    let pool = connect().await;

    let created = db::add_client(&pool, &sample_client()).await.unwrap();

    let mut modified = created.clone();
    modified.first_name = "Janet".to_string();
    modified.email = None;
    modified.status = Some(ClientStatus::Active.to_string());
    modified.notes = Some("renewed contract".to_string());

    let updated = db::update_client(&pool, &modified)
        .await
        .unwrap()
        .expect("existing row should be updated");
    assert_eq!(updated, modified);

    let listed = db::get_all_clients(&pool).await.unwrap();
    let found = listed
        .iter()
        .find(|c| c.client_id == created.client_id)
        .unwrap();
    assert_eq!(*found, modified);

    db::delete_client(&pool, created.client_id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn update_of_an_absent_id_returns_none_and_creates_no_row() {
    let pool = connect().await;

    // Burn an id so we hold one that is guaranteed absent.
    let created = db::add_client(&pool, &sample_client()).await.unwrap();
    db::delete_client(&pool, created.client_id).await.unwrap();

    let mut ghost = sample_client();
    ghost.client_id = created.client_id;
    ghost.first_name = "X".to_string();

    let updated = db::update_client(&pool, &ghost).await.unwrap();
    assert!(updated.is_none());

    let listed = db::get_all_clients(&pool).await.unwrap();
    assert!(listed.iter().all(|c| c.client_id != created.client_id));
}

#[tokio::test]
#[ignore]
async fn delete_is_permanent_and_a_second_delete_finds_nothing() {
    let pool = connect().await;

    let created = db::add_client(&pool, &sample_client()).await.unwrap();

    let deleted = db::delete_client(&pool, created.client_id)
        .await
        .unwrap()
        .expect("existing row should be deleted");
    assert_eq!(deleted, created);

    let listed = db::get_all_clients(&pool).await.unwrap();
    assert!(listed.iter().all(|c| c.client_id != created.client_id));

    let second = db::delete_client(&pool, created.client_id).await.unwrap();
    assert!(second.is_none());

    let unchanged = db::get_all_clients(&pool).await.unwrap();
    assert_eq!(unchanged.len(), listed.len());
}
