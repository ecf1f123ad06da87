use async_trait::async_trait;

use crate::api::error::ServiceError;
use crate::api::models::{ContactInput, ContactRecord};

/// Remote CRUD operations on contact records.
///
/// Futures are not required to be `Send`: callers drive them from the
/// single UI thread.
#[async_trait(?Send)]
pub trait ContactService {
    /// The full current record set, in backend order.
    async fn fetch_all(&self) -> Result<Vec<ContactRecord>, ServiceError>;

    /// The backend assigns `id` and `created_at`. Writes resolve to `None`
    /// when the backend acknowledges without echoing the record.
    async fn create(&self, input: &ContactInput) -> Result<Option<ContactRecord>, ServiceError>;

    async fn update(&self, id: i64, input: &ContactInput) -> Result<Option<ContactRecord>, ServiceError>;

    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}
