//! Transactional access to the catalog collections
//!
//! Every write goes through a [`CatalogTx`] obtained from [`Catalog::begin`]
//! and finished with [`end_transaction`]. Plain reads used by the listing
//! endpoints live on [`Catalog`] itself.

use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::{
    models::{
        CastAssignment, Clip, CrewAssignment, MediaKind, MediaRef, Movie, Person, Review, Role,
        User,
    },
    utils::AppError,
};

pub mod memory;
pub mod mongo;

pub use memory::{FailPoint, MemoryCatalog};
pub use mongo::MongoCatalog;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint of the store rejected the write
    #[error("duplicate entry: {0}")]
    Duplicate(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Opens a transaction, it must be finished with [`end_transaction`]
    async fn begin(&self) -> StoreResult<Box<dyn CatalogTx>>;

    async fn find_movie(&self, id: &str) -> StoreResult<Option<Movie>>;
    async fn list_movies(&self) -> StoreResult<Vec<Movie>>;

    async fn find_person(&self, id: &str) -> StoreResult<Option<Person>>;
    /// Case-insensitive exact match on the name
    async fn find_person_by_name(&self, name: &str) -> StoreResult<Option<Person>>;
    async fn find_persons(&self, ids: &[String]) -> StoreResult<Vec<Person>>;
    /// Persons holding any of `roles` (all persons when `None`), sorted by name
    async fn list_persons(&self, roles: Option<&[Role]>) -> StoreResult<Vec<Person>>;

    async fn list_cast(&self, movie_id: &str) -> StoreResult<Vec<CastAssignment>>;
    async fn list_crew(&self, movie_id: &str) -> StoreResult<Vec<CrewAssignment>>;
    async fn list_clips(&self, parent: &MediaRef) -> StoreResult<Vec<Clip>>;
}

/// Operations available inside a transaction
///
/// Writes become visible to other callers only after `commit`, reads
/// see the writes already done through the same transaction.
#[async_trait]
pub trait CatalogTx: Send {
    async fn exists(&mut self, kind: MediaKind, id: &str) -> StoreResult<bool>;

    async fn find_movie(&mut self, id: &str) -> StoreResult<Option<Movie>>;
    async fn insert_movie(&mut self, movie: &Movie) -> StoreResult<()>;

    async fn find_person(&mut self, id: &str) -> StoreResult<Option<Person>>;
    async fn find_person_by_name(&mut self, name: &str) -> StoreResult<Option<Person>>;
    async fn insert_person(&mut self, person: &Person) -> StoreResult<()>;
    /// Replaces the role set, returns the updated person
    async fn set_person_roles(
        &mut self,
        id: &str,
        roles: &BTreeSet<Role>,
        updated_ts: u64,
    ) -> StoreResult<Option<Person>>;

    async fn find_cast(
        &mut self,
        movie_id: &str,
        person_id: &str,
    ) -> StoreResult<Option<CastAssignment>>;
    async fn insert_cast(&mut self, cast: &CastAssignment) -> StoreResult<()>;

    async fn find_crew(
        &mut self,
        movie_id: &str,
        person_id: &str,
        job_title: &str,
    ) -> StoreResult<Option<CrewAssignment>>;
    async fn insert_crew(&mut self, crew: &CrewAssignment) -> StoreResult<()>;

    async fn insert_clips(&mut self, clips: &[Clip]) -> StoreResult<()>;

    async fn find_user(&mut self, id: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&mut self, email: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_username(&mut self, username: &str) -> StoreResult<Option<User>>;
    async fn insert_user(&mut self, user: &User) -> StoreResult<()>;

    async fn insert_review(&mut self, review: &Review) -> StoreResult<()>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
    async fn abort(self: Box<Self>) -> StoreResult<()>;
}

/// Commits the transaction when `result` is a success, aborts it otherwise
///
/// A failed abort is only logged, the caller gets the original error.
pub async fn end_transaction<T>(
    tx: Box<dyn CatalogTx>,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    match result {
        Ok(val) => {
            tx.commit().await?;
            Ok(val)
        }
        Err(err) => {
            if let Err(abort_err) = tx.abort().await {
                tracing::error!("Not able to abort transaction: {:?}", abort_err);
            }
            Err(err)
        }
    }
}

/// Turns a uniqueness violation into a `Conflict` carrying `message`
pub fn conflict_on_duplicate(err: StoreError, message: &str) -> AppError {
    match err {
        StoreError::Duplicate(_) => AppError::Conflict(message.to_owned()),
        err => err.into(),
    }
}
