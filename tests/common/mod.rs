#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};

use estate_api::auth::password_digest;
use estate_api::config::{
    AdminAuthConfig, AppConfig, ClientAuthConfig, Environment, PaginationConfig, ServerConfig,
};
use estate_api::models::{self, AdminAccount, ClientAccount, Property, PropertyDetails, Role};
use estate_api::state::AppState;
use estate_api::store::{collections, MemoryStore};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-pass";
pub const VIEWER_EMAIL: &str = "viewer@example.com";
pub const VIEWER_PASSWORD: &str = "viewer-pass";
pub const CLIENT_EMAIL: &str = "client@example.com";
pub const CLIENT_PASSWORD: &str = "client-pass";

pub const ADMIN_SECRET: &str = "test-admin-secret";
pub const CLIENT_ACCESS_SECRET: &str = "test-client-secret";
pub const CLIENT_REFRESH_SECRET: &str = "test-client-refresh-secret";
pub const COOKIE_NAME: &str = "token";

pub struct TestServer {
    pub base_url: String,
}

/// Spawn the app in-process on an unused port, backed by a freshly seeded
/// in-memory store. Each test gets its own server so state never leaks.
pub async fn spawn_app() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;

    let store = Arc::new(MemoryStore::new());
    seed(&store)?;

    let state = AppState::new(test_config(port), store);
    let app = estate_api::app(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    Ok(TestServer { base_url: format!("http://127.0.0.1:{port}") })
}

/// Log in as an administrator and return the raw session cookie pair
/// (`token=...`) for a Cookie header.
pub async fn admin_cookie(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    password: &str,
) -> Result<String> {
    let res = client
        .post(format!("{base_url}/admin/auth/login"))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status().is_success(), "login failed: {}", res.status());
    let set_cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .context("login response carried no Set-Cookie")?
        .to_str()?;
    let pair = set_cookie.split(';').next().context("empty Set-Cookie")?;
    Ok(pair.to_string())
}

/// Log in as the seeded client and return (access token, refresh token).
pub async fn client_tokens(client: &reqwest::Client, base_url: &str) -> Result<(String, String)> {
    let res = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&serde_json::json!({ "email": CLIENT_EMAIL, "password": CLIENT_PASSWORD }))
        .send()
        .await?;
    anyhow::ensure!(res.status().is_success(), "client login failed: {}", res.status());
    let payload = res.json::<serde_json::Value>().await?;
    let token = payload["data"]["token"].as_str().context("no token")?.to_string();
    let refresh = payload["data"]["refreshToken"].as_str().context("no refreshToken")?.to_string();
    Ok((token, refresh))
}

fn test_config(port: u16) -> AppConfig {
    AppConfig {
        environment: Environment::Development,
        server: ServerConfig { port },
        pagination: PaginationConfig { default_limit: 4 },
        admin_auth: AdminAuthConfig {
            token_secret: ADMIN_SECRET.to_string(),
            token_ttl_hours: 1,
            cookie_name: COOKIE_NAME.to_string(),
            cookie_secure: false,
        },
        client_auth: ClientAuthConfig {
            access_secret: CLIENT_ACCESS_SECRET.to_string(),
            access_ttl_minutes: 30,
            refresh_secret: CLIENT_REFRESH_SECRET.to_string(),
            refresh_ttl_days: 7,
        },
    }
}

/// Twelve listings matching the canonical end-to-end scenario
/// (bedrooms >= 4, price within [500, 2000]) with strictly distinct areas,
/// plus near-misses on every axis and one soft-deleted record.
fn seed(store: &MemoryStore) -> Result<()> {
    let mut properties = Vec::new();

    for i in 1..=12u32 {
        properties.push(property(
            &format!("m{i:02}"),
            &format!("Matching Villa {i}"),
            "active",
            4 + (i as i64 % 3),
            2,
            500.0 + f64::from(i) * 100.0,
            f64::from(i),
            10.0,
        ));
    }
    // Near-misses: wrong bedrooms, price, status, or already deleted.
    properties.push(property("x-bed", "Two Bed Flat", "active", 3, 1, 1000.0, 6.0, 10.0));
    properties.push(property("x-price", "Penthouse", "active", 5, 3, 5000.0, 20.0, 10.0));
    properties.push(property("x-inactive", "Hidden Villa", "inactive", 5, 2, 1000.0, 7.0, 10.0));
    let mut deleted = property("x-deleted", "Gone Villa", "active", 5, 2, 1000.0, 8.0, 10.0);
    deleted.deleted = true;
    properties.push(deleted);

    let docs = properties
        .iter()
        .map(models::to_document)
        .collect::<Result<Vec<_>, _>>()?;
    store.seed(collections::PROPERTIES, docs);

    let roles = vec![
        Role {
            id: "role-manager".to_string(),
            title: "Manager".to_string(),
            description: "Full property management".to_string(),
            permissions: vec![
                "properties-view".to_string(),
                "properties-create".to_string(),
                // Mixed separators on purpose; both normalize the same way.
                "properties_edit".to_string(),
                "properties_delete".to_string(),
                "roles-view".to_string(),
                "accounts-view".to_string(),
            ],
            deleted: false,
        },
        Role {
            id: "role-viewer".to_string(),
            title: "Viewer".to_string(),
            description: "Read-only access".to_string(),
            permissions: vec!["properties-view".to_string()],
            deleted: false,
        },
    ];
    let docs = roles.iter().map(models::to_document).collect::<Result<Vec<_>, _>>()?;
    store.seed(collections::ROLES, docs);

    let admins = vec![
        AdminAccount {
            id: "admin-1".to_string(),
            full_name: "Ada Manager".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password: password_digest(ADMIN_PASSWORD),
            status: "active".to_string(),
            role_id: "role-manager".to_string(),
            deleted: false,
        },
        AdminAccount {
            id: "admin-2".to_string(),
            full_name: "Vic Viewer".to_string(),
            email: VIEWER_EMAIL.to_string(),
            password: password_digest(VIEWER_PASSWORD),
            status: "active".to_string(),
            role_id: "role-viewer".to_string(),
            deleted: false,
        },
    ];
    let docs = admins.iter().map(models::to_document).collect::<Result<Vec<_>, _>>()?;
    store.seed(collections::ADMIN_ACCOUNTS, docs);

    let clients = vec![ClientAccount {
        id: "client-1".to_string(),
        full_name: "Cleo Client".to_string(),
        email: CLIENT_EMAIL.to_string(),
        password: password_digest(CLIENT_PASSWORD),
        status: "active".to_string(),
        favorites: vec![],
        posts: vec![],
        refresh_token: None,
        deleted: false,
    }];
    let docs = clients.iter().map(models::to_document).collect::<Result<Vec<_>, _>>()?;
    store.seed(collections::CLIENT_ACCOUNTS, docs);

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn property(
    id: &str,
    title: &str,
    status: &str,
    bedrooms: i64,
    bathrooms: i64,
    price: f64,
    width: f64,
    length: f64,
) -> Property {
    Property {
        id: id.to_string(),
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        status: status.to_string(),
        listing_type: "forSale".to_string(),
        price,
        bedrooms,
        bathrooms,
        property_details: PropertyDetails {
            property_category: "villa".to_string(),
            house_direction: "east".to_string(),
            width,
            length,
        },
        deleted: false,
        deleted_at: None,
        created_at: chrono::Utc::now(),
    }
}
