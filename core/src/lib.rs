//! Synchronous data-access core for the product catalog.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). I/O is abstracted behind the
//! [`HttpTransport`] trait; the repository layer composes the client with a
//! transport to provide whole CRUD operations, client-side filtering, and
//! partial-merge updates.
//!
//! # Design
//! - `CatalogClient` is stateless — it holds only the resolved URLs.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `Product::from_raw` is the single normalization point for untyped wire
//!   records; unrecognized status strings map to sold-out.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod images;
pub mod repository;
pub mod session;
pub mod types;

pub use client::CatalogClient;
pub use config::{ApiConfig, ImageHostConfig};
pub use error::{ApiError, RepositoryError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use images::ImageUploader;
pub use repository::{ProductRepository, UserRepository};
pub use session::{MemoryStore, Session, SessionStore, CURRENT_USER_KEY};
pub use types::{
    ImageRef, Product, ProductCategory, ProductDraft, ProductFilter, ProductPatch, ProductStatus,
    RawProduct, User,
};
