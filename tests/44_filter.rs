mod common;

use anyhow::Result;
use reqwest::StatusCode;

// Full filter/sort/pagination engine over the public listing surface.
// Fixture: twelve records match bedrooms >= 4 and price in [500, 2000],
// with areas 10, 20, ..., 120 (width i, length 10).

async fn fetch(server: &common::TestServer, query: &str) -> Result<serde_json::Value> {
    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/api/properties?{}", server.base_url, query))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "unexpected status {}", res.status());
    Ok(res.json::<serde_json::Value>().await?)
}

fn ids(payload: &serde_json::Value) -> Vec<String> {
    payload["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn bedrooms_price_and_area_sort_compose() -> Result<()> {
    let server = common::spawn_app().await?;
    let payload = fetch(
        &server,
        "bedrooms=bedrooms-gte-4&priceRange=500,2000&sortKey=area&sortValue=desc&currentPage=1&pageSize=5",
    )
    .await?;

    assert_eq!(payload["data"]["totalRecords"], 12);
    assert_eq!(payload["data"]["pagination"]["totalPage"], 3);
    assert_eq!(payload["data"]["pagination"]["currentPage"], 1);
    assert_eq!(payload["data"]["pagination"]["skip"], 0);
    // Five largest areas, descending.
    assert_eq!(ids(&payload), ["m12", "m11", "m10", "m09", "m08"]);
    Ok(())
}

#[tokio::test]
async fn last_page_holds_the_remainder() -> Result<()> {
    let server = common::spawn_app().await?;
    let payload = fetch(
        &server,
        "bedrooms=bedrooms-gte-4&priceRange=500,2000&sortKey=area&sortValue=desc&currentPage=3&pageSize=5",
    )
    .await?;

    assert_eq!(payload["data"]["pagination"]["skip"], 10);
    assert_eq!(ids(&payload), ["m02", "m01"]);
    Ok(())
}

#[tokio::test]
async fn absent_filters_constrain_nothing() -> Result<()> {
    let server = common::spawn_app().await?;
    let payload = fetch(&server, "pageSize=100").await?;

    // Everything active and live: 12 matchers plus the bed/price near-misses.
    // The inactive and soft-deleted records never appear publicly.
    assert_eq!(payload["data"]["totalRecords"], 14);
    let ids = ids(&payload);
    assert!(!ids.contains(&"x-inactive".to_string()));
    assert!(!ids.contains(&"x-deleted".to_string()));
    Ok(())
}

#[tokio::test]
async fn default_page_size_applies_when_unspecified() -> Result<()> {
    let server = common::spawn_app().await?;
    let payload = fetch(&server, "").await?;

    assert_eq!(payload["data"]["items"].as_array().unwrap().len(), 4);
    assert_eq!(payload["data"]["pagination"]["limitItems"], 4);
    assert_eq!(payload["data"]["pagination"]["totalPage"], 4);
    Ok(())
}

#[tokio::test]
async fn malformed_parameters_degrade_to_no_constraint() -> Result<()> {
    let server = common::spawn_app().await?;
    let payload = fetch(
        &server,
        "bedrooms=garbage&priceRange=cheap,expensive&currentPage=first&pageSize=100",
    )
    .await?;
    assert_eq!(payload["data"]["totalRecords"], 14);
    assert_eq!(payload["data"]["pagination"]["currentPage"], 1);
    Ok(())
}

#[tokio::test]
async fn open_ended_price_range_is_a_lower_bound() -> Result<()> {
    let server = common::spawn_app().await?;
    let payload = fetch(&server, "priceRange=4000").await?;
    assert_eq!(ids(&payload), ["x-price"]);
    Ok(())
}

#[tokio::test]
async fn area_range_boundary_is_inclusive() -> Result<()> {
    let server = common::spawn_app().await?;

    // m05 has width 5, length 10: area exactly 50.
    let payload = fetch(&server, "areaRange=45,50").await?;
    assert_eq!(ids(&payload), ["m05"]);

    let payload = fetch(&server, "areaRange=45,49").await?;
    assert_eq!(payload["data"]["totalRecords"], 0);
    Ok(())
}

#[tokio::test]
async fn exact_room_token_filters_by_equality() -> Result<()> {
    let server = common::spawn_app().await?;
    let payload = fetch(&server, "bedrooms=bedrooms-3&pageSize=100").await?;
    assert_eq!(ids(&payload), ["x-bed"]);
    Ok(())
}

#[tokio::test]
async fn keyword_searches_title_and_slug() -> Result<()> {
    let server = common::spawn_app().await?;

    let payload = fetch(&server, "keyword=PENTHOUSE").await?;
    assert_eq!(ids(&payload), ["x-price"]);

    // Slug-only hit: slugs are lowercase-hyphenated titles.
    let payload = fetch(&server, "keyword=two-bed").await?;
    assert_eq!(ids(&payload), ["x-bed"]);
    Ok(())
}

#[tokio::test]
async fn field_sort_orders_by_stored_values() -> Result<()> {
    let server = common::spawn_app().await?;
    let payload = fetch(&server, "sortKey=price&sortValue=asc&pageSize=3").await?;
    assert_eq!(ids(&payload), ["m01", "m02", "m03"]);
    Ok(())
}

#[tokio::test]
async fn admin_listing_runs_the_same_engine_with_flags() -> Result<()> {
    let server = common::spawn_app().await?;
    let client = reqwest::Client::new();
    let cookie = common::admin_cookie(
        &client,
        &server.base_url,
        common::ADMIN_EMAIL,
        common::ADMIN_PASSWORD,
    )
    .await?;

    let res = client
        .get(format!(
            "{}/admin/properties?bedrooms=bedrooms-gte-4&priceRange=500,2000&sortKey=area&sortValue=desc&pageSize=5",
            server.base_url
        ))
        .header("Cookie", &cookie)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["data"]["totalRecords"], 12);
    assert_eq!(payload["data"]["pagination"]["totalPage"], 3);
    assert_eq!(payload["data"]["permissions"]["propertiesView"], true);
    Ok(())
}
