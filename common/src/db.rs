use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::models::Client;

pub async fn establish_connection(database_url: &str) -> anyhow::Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

pub async fn get_all_clients(pool: &Pool<Postgres>) -> anyhow::Result<Vec<Client>> {
    let clients: Vec<Client> = sqlx::query_as("SELECT * FROM clients")
        .fetch_all(pool)
        .await?;

    Ok(clients)
}

/// Inserts a new row, ignoring any caller-supplied id, and returns the
/// persisted record with its store-assigned id.
pub async fn add_client(pool: &Pool<Postgres>, client: &Client) -> anyhow::Result<Client> {
    let created: Client = sqlx::query_as(
        "INSERT INTO clients
            (first_name, last_name, email, phone, company_name, client_type,
             registration_date, status, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(&client.first_name)
    .bind(&client.last_name)
    .bind(&client.email)
    .bind(&client.phone)
    .bind(&client.company_name)
    .bind(&client.client_type)
    .bind(client.registration_date)
    .bind(&client.status)
    .bind(&client.notes)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Overwrites every mutable field of the row keyed by `client_id`. Returns
/// `None` when no such row exists; no row is created in that case.
pub async fn update_client(
    pool: &Pool<Postgres>,
    client: &Client,
) -> anyhow::Result<Option<Client>> {
    let updated: Option<Client> = sqlx::query_as(
        "UPDATE clients
         SET first_name = $1, last_name = $2, email = $3, phone = $4,
             company_name = $5, client_type = $6, registration_date = $7,
             status = $8, notes = $9
         WHERE client_id = $10
         RETURNING *",
    )
    .bind(&client.first_name)
    .bind(&client.last_name)
    .bind(&client.email)
    .bind(&client.phone)
    .bind(&client.company_name)
    .bind(&client.client_type)
    .bind(client.registration_date)
    .bind(&client.status)
    .bind(&client.notes)
    .bind(client.client_id)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Removes the row keyed by `client_id` permanently and returns its prior
/// state, or `None` when the id is absent.
pub async fn delete_client(
    pool: &Pool<Postgres>,
    client_id: i32,
) -> anyhow::Result<Option<Client>> {
    let deleted: Option<Client> =
        sqlx::query_as("DELETE FROM clients WHERE client_id = $1 RETURNING *")
            .bind(client_id)
            .fetch_optional(pool)
            .await?;

    Ok(deleted)
}
