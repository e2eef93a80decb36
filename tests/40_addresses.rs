mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_and_list_address() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_username, token) = common::register_and_login(&client, &server.base_url, "addr").await?;
    let contact_id = common::create_contact(
        &client,
        &server.base_url,
        &token,
        "monkey",
        "luffy",
        "luffy@gmail.com",
        "3123214",
    )
    .await?;

    let res = client
        .post(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, contact_id
        ))
        .header("X-API-TOKEN", &token)
        .json(&json!({
            "street": "jalan kebon jeruk",
            "city": "tangerang",
            "province": "banten",
            "country": "indonesia",
            "postalCode": "15111",
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let address_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["city"], "tangerang");
    assert_eq!(body["data"]["country"], "indonesia");

    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, contact_id
        ))
        .header("X-API-TOKEN", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], address_id.as_str());
    Ok(())
}

#[tokio::test]
async fn address_requires_existing_owned_contact() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_username, token) = common::register_and_login(&client, &server.base_url, "noc").await?;

    let res = client
        .post(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, "missing-contact"
        ))
        .header("X-API-TOKEN", &token)
        .json(&json!({ "country": "indonesia" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["errors"], "contact not found");

    // A contact owned by someone else reads the same as a missing one
    let (_owner, owner_token) =
        common::register_and_login(&client, &server.base_url, "addrowner").await?;
    let foreign_contact = common::create_contact(
        &client,
        &server.base_url,
        &owner_token,
        "nico",
        "robin",
        "robin@gmail.com",
        "777",
    )
    .await?;

    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, foreign_contact
        ))
        .header("X-API-TOKEN", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn address_create_requires_country() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_username, token) = common::register_and_login(&client, &server.base_url, "reqc").await?;
    let contact_id = common::create_contact(
        &client,
        &server.base_url,
        &token,
        "monkey",
        "luffy",
        "luffy@gmail.com",
        "3123214",
    )
    .await?;

    let res = client
        .post(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, contact_id
        ))
        .header("X-API-TOKEN", &token)
        .json(&json!({ "city": "tangerang" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["errors"], "country: must not be blank");
    Ok(())
}

#[tokio::test]
async fn update_address_partial_except_country() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_username, token) = common::register_and_login(&client, &server.base_url, "upd").await?;
    let contact_id = common::create_contact(
        &client,
        &server.base_url,
        &token,
        "monkey",
        "luffy",
        "luffy@gmail.com",
        "3123214",
    )
    .await?;

    let res = client
        .post(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, contact_id
        ))
        .header("X-API-TOKEN", &token)
        .json(&json!({
            "street": "jalan kebon jeruk",
            "city": "tangerang",
            "province": "banten",
            "country": "indonesia",
            "postalCode": "15111",
        }))
        .send()
        .await?;
    let body: Value = res.json().await?;
    let address_id = body["data"]["id"].as_str().unwrap().to_string();

    // Supply only city and country; street, province, postalCode stay
    let res = client
        .put(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, contact_id, address_id
        ))
        .header("X-API-TOKEN", &token)
        .json(&json!({ "city": "jakarta", "country": "id" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["city"], "jakarta");
    assert_eq!(body["data"]["street"], "jalan kebon jeruk");
    assert_eq!(body["data"]["province"], "banten");
    assert_eq!(body["data"]["postalCode"], "15111");
    // Country is always taken from the request, never preserved
    assert_eq!(body["data"]["country"], "id");

    // Update without country fails validation rather than clearing it
    let res = client
        .put(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, contact_id, address_id
        ))
        .header("X-API-TOKEN", &token)
        .json(&json!({ "city": "bandung" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn remove_address() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_username, token) = common::register_and_login(&client, &server.base_url, "rm").await?;
    let contact_id = common::create_contact(
        &client,
        &server.base_url,
        &token,
        "monkey",
        "luffy",
        "luffy@gmail.com",
        "3123214",
    )
    .await?;

    let res = client
        .post(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, contact_id
        ))
        .header("X-API-TOKEN", &token)
        .json(&json!({ "country": "indonesia" }))
        .send()
        .await?;
    let body: Value = res.json().await?;
    let address_id = body["data"]["id"].as_str().unwrap().to_string();

    let res = client
        .delete(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, contact_id, address_id
        ))
        .header("X-API-TOKEN", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"], "Ok");

    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, contact_id, address_id
        ))
        .header("X-API-TOKEN", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["errors"], "address not found");

    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, contact_id
        ))
        .header("X-API-TOKEN", &token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    Ok(())
}
