//! In-memory mock backend for the catalog core.
//!
//! Serves `/products` (CRUD, PUT is full replace — the client performs the
//! partial merge), `/users` (credential lookup via query parameters), and
//! `/upload` (image-host stand-in returning a hosted URL). The store starts
//! with two seeded users so login flows are testable without a setup step:
//! `admin`/`admin123` (role `admin`) and `guest`/`guest123` (role `user`).

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub status: String,
    #[serde(rename = "type")]
    pub category: String,
    pub brand: String,
    pub product_image: String,
    pub brand_image: String,
}

/// Create/replace payload: everything except the id. A replace body may
/// still carry an `id` field; it is ignored in favor of the path id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub status: String,
    #[serde(rename = "type")]
    pub category: String,
    pub brand: String,
    pub product_image: String,
    pub brand_image: String,
}

impl ProductBody {
    fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            price: self.price,
            status: self.status,
            category: self.category,
            brand: self.brand,
            product_image: self.product_image,
            brand_image: self.brand_image,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub key: Option<String>,
    #[allow(dead_code)]
    pub expiration: Option<u64>,
}

#[derive(Default)]
pub struct Store {
    products: HashMap<String, Product>,
    users: Vec<User>,
}

pub type Db = Arc<RwLock<Store>>;

fn seeded_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
            role: "admin".to_string(),
        },
        User {
            id: "2".to_string(),
            username: "guest".to_string(),
            password: "guest123".to_string(),
            role: "user".to_string(),
        },
    ]
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store {
        products: HashMap::new(),
        users: seeded_users(),
    }));
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(replace_product).delete(delete_product),
        )
        .route("/users", get(list_users))
        .route("/upload", post(upload_image))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let store = db.read().await;
    Json(store.products.values().cloned().collect())
}

async fn create_product(
    State(db): State<Db>,
    Json(body): Json<ProductBody>,
) -> (StatusCode, Json<Product>) {
    let product = body.into_product(Uuid::new_v4().to_string());
    db.write()
        .await
        .products
        .insert(product.id.clone(), product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Product>, StatusCode> {
    let store = db.read().await;
    store
        .products
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn replace_product(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(body): Json<ProductBody>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = db.write().await;
    if !store.products.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let product = body.into_product(id.clone());
    store.products.insert(id, product.clone());
    Ok(Json(product))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .products
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_users(
    State(db): State<Db>,
    Query(query): Query<UserQuery>,
) -> Json<Vec<User>> {
    let store = db.read().await;
    let users = store
        .users
        .iter()
        .filter(|user| matches_user(user, &query))
        .cloned()
        .collect();
    Json(users)
}

fn matches_user(user: &User, query: &UserQuery) -> bool {
    if let Some(username) = &query.username {
        if user.username != *username {
            return false;
        }
    }
    if let Some(password) = &query.password {
        if user.password != *password {
            return false;
        }
    }
    true
}

async fn upload_image(
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if query.key.as_deref().unwrap_or_default().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() == Some("image") {
            let payload = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            if payload.is_empty() {
                return Err(StatusCode::BAD_REQUEST);
            }
            let url = format!("https://images.example.com/{}", Uuid::new_v4());
            return Ok(Json(
                serde_json::json!({ "success": true, "data": { "display_url": url } }),
            ));
        }
    }
    Err(StatusCode::BAD_REQUEST)
}
