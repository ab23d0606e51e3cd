//! Domain types for the product catalog.
//!
//! # Design
//! The wire format keeps the backend's camelCase field names (`productImage`,
//! `type`, …). `RawProduct` is the untyped wire record; [`Product::from_raw`]
//! is the single normalization point that turns it into the typed domain
//! record. Nothing else in the crate interprets raw status or category
//! strings.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Availability of a product.
///
/// The wire strings are `"Available"` and `"Sold out"`. Normalization is
/// deliberately strict: only the exact literal `"Available"` maps to
/// `Available`, every other string (including `"available"` or garbage)
/// maps to `SoldOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    Available,
    SoldOut,
}

impl ProductStatus {
    pub fn from_raw(raw: &str) -> Self {
        if raw == "Available" {
            ProductStatus::Available
        } else {
            ProductStatus::SoldOut
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Available => "Available",
            ProductStatus::SoldOut => "Sold out",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProductStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ProductStatus::from_raw(&raw))
    }
}

/// Product category. The set is open: labels the catalog does not know
/// about are preserved verbatim in `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductCategory {
    Bravo,
    Alfa,
    Gold,
    Premium,
    Other(String),
}

impl ProductCategory {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Bravo" => ProductCategory::Bravo,
            "Alfa" => ProductCategory::Alfa,
            "Gold" => ProductCategory::Gold,
            "Premium" => ProductCategory::Premium,
            other => ProductCategory::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProductCategory::Bravo => "Bravo",
            ProductCategory::Alfa => "Alfa",
            ProductCategory::Gold => "Gold",
            ProductCategory::Premium => "Premium",
            ProductCategory::Other(label) => label,
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProductCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ProductCategory::from_raw(&raw))
    }
}

/// Reference to an image: either an already-hosted absolute URL or a
/// pending-upload payload (e.g. a base64 data string) that still needs to
/// go through the image host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        ImageRef(value.into())
    }

    /// Hosted refs start with `https://`; everything else is pending.
    pub fn is_uploaded(&self) -> bool {
        self.0.starts_with("https://")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Untyped wire record as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub status: String,
    #[serde(rename = "type")]
    pub category: String,
    pub brand: String,
    pub product_image: ImageRef,
    pub brand_image: ImageRef,
}

/// A catalog product. Identifiers are opaque strings assigned by the
/// backend on create.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub status: ProductStatus,
    #[serde(rename = "type")]
    pub category: ProductCategory,
    pub brand: String,
    pub product_image: ImageRef,
    pub brand_image: ImageRef,
}

impl Product {
    /// Map an untyped wire record into the typed domain record.
    ///
    /// This is the only place raw status/category strings are interpreted.
    pub fn from_raw(raw: RawProduct) -> Self {
        Product {
            id: raw.id,
            name: raw.name,
            quantity: raw.quantity,
            price: raw.price,
            status: ProductStatus::from_raw(&raw.status),
            category: ProductCategory::from_raw(&raw.category),
            brand: raw.brand,
            product_image: raw.product_image,
            brand_image: raw.brand_image,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Available
    }

    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Format the price with a currency prefix, e.g. `$9.99`.
    pub fn format_price(&self, currency: &str) -> String {
        format!("{currency}{:.2}", self.price)
    }
}

/// Create payload: every product field except the backend-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub status: ProductStatus,
    #[serde(rename = "type")]
    pub category: ProductCategory,
    pub brand: String,
    pub product_image: ImageRef,
    pub brand_image: ImageRef,
}

impl ProductDraft {
    /// Check the draft before it goes anywhere near the network.
    ///
    /// Failures carry the distinguishable validation marker so callers can
    /// skip the blocking error notification for them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.brand.trim().is_empty() {
            return Err(ValidationError::MissingField("brand"));
        }
        if self.quantity == 0 {
            return Err(ValidationError::NonPositive("quantity"));
        }
        if self.price <= 0.0 {
            return Err(ValidationError::NonPositive("price"));
        }
        if self.product_image.is_empty() {
            return Err(ValidationError::MissingImage("productImage"));
        }
        if self.brand_image.is_empty() {
            return Err(ValidationError::MissingImage("brandImage"));
        }
        Ok(())
    }
}

/// Partial update: only `Some` fields overwrite the stored record.
///
/// The repository fetches the current record, applies this patch over it,
/// and persists the merged result — the backend PUT is a full replace.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
    pub status: Option<ProductStatus>,
    pub category: Option<ProductCategory>,
    pub brand: Option<String>,
    pub product_image: Option<ImageRef>,
    pub brand_image: Option<ImageRef>,
}

impl ProductPatch {
    /// Shallow-merge this patch over `current`. Fields absent from the
    /// patch keep their stored values.
    pub fn apply(&self, current: &mut Product) {
        if let Some(name) = &self.name {
            current.name = name.clone();
        }
        if let Some(quantity) = self.quantity {
            current.quantity = quantity;
        }
        if let Some(price) = self.price {
            current.price = price;
        }
        if let Some(status) = self.status {
            current.status = status;
        }
        if let Some(category) = &self.category {
            current.category = category.clone();
        }
        if let Some(brand) = &self.brand {
            current.brand = brand.clone();
        }
        if let Some(product_image) = &self.product_image {
            current.product_image = product_image.clone();
        }
        if let Some(brand_image) = &self.brand_image {
            current.brand_image = brand_image.clone();
        }
    }
}

/// Client-side filter criteria. `None` means "all" for every criterion;
/// the empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the name.
    pub name: Option<String>,
    /// Exact status match.
    pub status: Option<ProductStatus>,
    /// Exact category match.
    pub category: Option<ProductCategory>,
    /// Case-insensitive substring match on the brand.
    pub brand: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = &self.name {
            if !contains_ignore_case(&product.name, name) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if product.status != status {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if product.category != *category {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !contains_ignore_case(&product.brand, brand) {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A backend user record, as stored under `/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: String,
}
