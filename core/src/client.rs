//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only the resolved URLs from [`ApiConfig`] and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The transport executes the round-trip
//! in between, keeping this layer deterministic and free of I/O.

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Product, ProductDraft, RawProduct, User};

/// Synchronous, stateless request builder / response parser for the
/// catalog backend.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    products_url: String,
    users_url: String,
}

impl CatalogClient {
    pub fn new(config: &ApiConfig) -> Self {
        let base = config.base_url.trim_end_matches('/');
        Self {
            products_url: format!("{base}{}", config.products_path),
            users_url: format!("{base}{}", config.users_path),
        }
    }

    pub fn build_list_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.products_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_product(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{id}", self.products_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_product(&self, draft: &ProductDraft) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.products_url.clone(),
            headers: vec![json_content_type()],
            body: Some(body),
        })
    }

    /// PUT the full record. The partial-merge semantics live in the
    /// repository layer; by the time a request is built the record is
    /// already merged.
    pub fn build_replace_product(&self, product: &Product) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(product).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/{}", self.products_url, product.id),
            headers: vec![json_content_type()],
            body: Some(body),
        })
    }

    pub fn build_delete_product(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.products_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_login(&self, username: &str, password: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}?username={username}&password={password}", self.users_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        check_status(&response, 200)?;
        let raw: Vec<RawProduct> = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(raw.into_iter().map(Product::from_raw).collect())
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response, 200)?;
        parse_product(&response.body)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response, 201)?;
        parse_product(&response.body)
    }

    pub fn parse_replace_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response, 200)?;
        parse_product(&response.body)
    }

    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }

    /// A login succeeds only when exactly one record matches the
    /// credentials; zero or several matches both mean "no user".
    pub fn parse_login(&self, response: HttpResponse) -> Result<Option<User>, ApiError> {
        check_status(&response, 200)?;
        let mut users: Vec<User> = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        if users.len() == 1 {
            Ok(Some(users.remove(0)))
        } else {
            Ok(None)
        }
    }
}

fn parse_product(body: &str) -> Result<Product, ApiError> {
    let raw: RawProduct =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Ok(Product::from_raw(raw))
}

fn json_content_type() -> (String, String) {
    ("content-type".to_string(), "application/json".to_string())
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageRef, ProductCategory, ProductStatus};

    fn client() -> CatalogClient {
        CatalogClient::new(&ApiConfig::default())
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Widget".to_string(),
            quantity: 5,
            price: 9.99,
            status: ProductStatus::Available,
            category: ProductCategory::Gold,
            brand: "Acme".to_string(),
            product_image: ImageRef::new("https://img/p"),
            brand_image: ImageRef::new("https://img/b"),
        }
    }

    const PRODUCT_JSON: &str = r#"{"id":"7","name":"Widget","quantity":5,"price":9.99,
        "status":"Available","type":"Gold","brand":"Acme",
        "productImage":"https://img/p","brandImage":"https://img/b"}"#;

    #[test]
    fn build_list_products_produces_correct_request() {
        let req = client().build_list_products();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/products");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_product_produces_correct_request() {
        let req = client().build_get_product("7");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/products/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_product_produces_correct_request() {
        let req = client().build_create_product(&draft()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/products");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Widget");
        assert_eq!(body["status"], "Available");
        assert_eq!(body["type"], "Gold");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_replace_product_targets_the_record_url() {
        let product = Product::from_raw(serde_json::from_str(PRODUCT_JSON).unwrap());
        let req = client().build_replace_product(&product).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/products/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], "7");
        assert_eq!(body["brandImage"], "https://img/b");
    }

    #[test]
    fn build_delete_product_produces_correct_request() {
        let req = client().build_delete_product("7");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/products/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_login_carries_credentials_as_query() {
        let req = client().build_login("admin", "secret");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:3000/users?username=admin&password=secret"
        );
    }

    #[test]
    fn parse_list_products_normalizes_each_record() {
        let body = format!("[{PRODUCT_JSON}]").replace("\"Available\"", "\"available\"");
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body,
        };
        let products = client().parse_list_products(response).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].status, ProductStatus::SoldOut);
    }

    #[test]
    fn parse_get_product_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: String::new(),
        };
        let err = client().parse_get_product(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_product_success() {
        let response = HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: PRODUCT_JSON.to_string(),
        };
        let product = client().parse_create_product(response).unwrap();
        assert_eq!(product.id, "7");
        assert_eq!(product.status, ProductStatus::Available);
    }

    #[test]
    fn parse_create_product_wrong_status() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_create_product(response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_delete_product_success() {
        let response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(client().parse_delete_product(response).is_ok());
    }

    #[test]
    fn parse_login_single_match() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"[{"id":"1","username":"admin","password":"secret","role":"admin"}]"#
                .to_string(),
        };
        let user = client().parse_login(response).unwrap().unwrap();
        assert_eq!(user.username, "admin");
    }

    #[test]
    fn parse_login_no_match_is_none() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "[]".to_string(),
        };
        assert!(client().parse_login(response).unwrap().is_none());
    }

    #[test]
    fn parse_login_ambiguous_match_is_none() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"[{"id":"1","username":"a","password":"p","role":"user"},
                      {"id":"2","username":"a","password":"p","role":"user"}]"#
                .to_string(),
        };
        assert!(client().parse_login(response).unwrap().is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ApiConfig {
            base_url: "http://localhost:3000/".to_string(),
            ..ApiConfig::default()
        };
        let client = CatalogClient::new(&config);
        let req = client.build_list_products();
        assert_eq!(req.path, "http://localhost:3000/products");
    }

    #[test]
    fn parse_list_products_bad_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        let err = client().parse_list_products(response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
