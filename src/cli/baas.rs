use std::future::Future;

use serde_json::Value;

use crate::{baas::BaasClient, error, error::ApiError, success, warning};

/// Optional email/password pair used to sign in for one command.
pub type Credentials = Option<(String, String)>;

pub async fn baas_sign_up(email: String, password: String) {
    let client = client();
    match client.auth().sign_up(&email, &password).await {
        Ok(_) => success!("Signed up {}.", email),
        Err(e) => error!("Sign-up failed: {}", e),
    }
}

pub async fn baas_select(table: String, columns: String, credentials: Credentials) {
    let client = client();
    let query = client.from(&table);
    let result = signed_in(&client, credentials, query.select(&columns)).await;

    match result {
        Ok(rows) => print_rows(&rows),
        Err(e) => error!("Select on {} failed: {}", table, e),
    }
}

pub async fn baas_insert(table: String, values: String, credentials: Credentials) {
    let values: Value = match serde_json::from_str(&values) {
        Ok(values) => values,
        Err(e) => error!("Rows must be a JSON object or array: {}", e),
    };

    let client = client();
    let query = client.from(&table);
    let result = signed_in(&client, credentials, query.insert(values)).await;

    match result {
        Ok(rows) => {
            success!("Inserted {} row(s) into {}.", rows.len(), table);
            print_rows(&rows);
        }
        Err(e) => error!("Insert into {} failed: {}", table, e),
    }
}

fn client() -> BaasClient {
    match BaasClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    }
}

/// Runs `work`, signed in with `credentials` when given and signed out afterwards.
async fn signed_in<T>(
    client: &BaasClient,
    credentials: Credentials,
    work: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    let Some((email, password)) = credentials else {
        return work.await;
    };

    client.auth().sign_in_with_password(&email, &password).await?;
    let result = work.await;
    if let Err(e) = client.auth().sign_out().await {
        warning!("Sign-out failed: {}", e);
    }
    result
}

fn print_rows(rows: &[Value]) {
    match serde_json::to_string_pretty(rows) {
        Ok(json) => println!("{}", json),
        Err(e) => warning!("Cannot format rows: {}", e),
    }
}
