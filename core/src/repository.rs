//! Repository layer: whole CRUD operations composed from the client and a
//! transport.
//!
//! # Design
//! Each method is one user-visible operation. Lower-layer failures are
//! wrapped in a method-specific [`RepositoryError`] variant so the caller
//! always sees which operation failed; validation failures keep their
//! distinguishable marker through the wrapping.
//!
//! `update` implements partial-merge semantics client-side: fetch the
//! current record, apply the patch over it, PUT the merged record.
//! Last-writer-wins, no optimistic concurrency token. `filter` fetches the
//! full list and applies the predicate chain in memory — the backend offers
//! no query pushdown for these criteria.

use tracing::debug;

use crate::client::CatalogClient;
use crate::error::{ApiError, RepositoryError};
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::{Product, ProductDraft, ProductFilter, ProductPatch, User};

/// CRUD + filter access to the `/products` resource.
pub struct ProductRepository<T: HttpTransport> {
    client: CatalogClient,
    transport: T,
}

impl<T: HttpTransport> ProductRepository<T> {
    pub fn new(client: CatalogClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        debug!("listing products");
        self.try_list().map_err(RepositoryError::ListFailed)
    }

    pub fn get(&self, id: &str) -> Result<Product, RepositoryError> {
        debug!(id, "fetching product");
        self.try_get(id).map_err(|source| RepositoryError::FetchFailed {
            id: id.to_string(),
            source,
        })
    }

    pub fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        debug!(name = %draft.name, "creating product");
        self.try_create(draft).map_err(RepositoryError::CreateFailed)
    }

    pub fn update(&self, id: &str, patch: &ProductPatch) -> Result<Product, RepositoryError> {
        debug!(id, "updating product");
        self.try_update(id, patch)
            .map_err(|source| RepositoryError::UpdateFailed {
                id: id.to_string(),
                source,
            })
    }

    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        debug!(id, "deleting product");
        self.try_delete(id)
            .map_err(|source| RepositoryError::DeleteFailed {
                id: id.to_string(),
                source,
            })
    }

    /// Fetch everything, keep what matches. An empty filter returns the
    /// full list unchanged in order.
    pub fn filter(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let products = self.list()?;
        Ok(products.into_iter().filter(|p| filter.matches(p)).collect())
    }

    fn try_list(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.execute(self.client.build_list_products())?;
        self.client.parse_list_products(response)
    }

    fn try_get(&self, id: &str) -> Result<Product, ApiError> {
        let response = self.execute(self.client.build_get_product(id))?;
        self.client.parse_get_product(response)
    }

    fn try_create(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        draft.validate()?;
        let response = self.execute(self.client.build_create_product(draft)?)?;
        self.client.parse_create_product(response)
    }

    fn try_update(&self, id: &str, patch: &ProductPatch) -> Result<Product, ApiError> {
        let mut current = self.try_get(id)?;
        patch.apply(&mut current);
        let response = self.execute(self.client.build_replace_product(&current)?)?;
        self.client.parse_replace_product(response)
    }

    fn try_delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.execute(self.client.build_delete_product(id))?;
        self.client.parse_delete_product(response)
    }

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Ok(self.transport.execute(request)?)
    }
}

/// Login access to the `/users` resource.
pub struct UserRepository<T: HttpTransport> {
    client: CatalogClient,
    transport: T,
}

impl<T: HttpTransport> UserRepository<T> {
    pub fn new(client: CatalogClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// `Ok(None)` means the credentials matched zero or several records;
    /// only an exact single match logs in.
    pub fn login(&self, username: &str, password: &str) -> Result<Option<User>, RepositoryError> {
        debug!(username, "attempting login");
        let request = self.client.build_login(username, password);
        let response = self
            .transport
            .execute(request)
            .map_err(|e| RepositoryError::LoginFailed(e.into()))?;
        self.client
            .parse_login(response)
            .map_err(RepositoryError::LoginFailed)
    }
}
