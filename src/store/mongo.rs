use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Document},
    options::{
        Collation, CollationStrength, FindOneAndUpdateOptions, FindOneOptions, FindOptions,
        IndexOptions, ReturnDocument,
    },
    ClientSession, IndexModel,
};
use std::{collections::BTreeSet, sync::Arc};

use super::{Catalog, CatalogTx, StoreError, StoreResult};
use crate::{
    constants::*,
    database::{is_duplicate_key_error, is_write_conflict_error, AppDatabase},
    models::*,
};

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key_error(&err) {
            return Self::Duplicate(err.to_string());
        }
        Self::Backend(err.into())
    }
}

/// A write conflict on a uniquely indexed insert means another transaction
/// is inserting the same key, so it is reported as a duplicate.
fn unique_insert_error(err: mongodb::error::Error) -> StoreError {
    if is_write_conflict_error(&err) {
        return StoreError::Duplicate(err.to_string());
    }
    err.into()
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Backend(err.into())
    }
}

/// Person names compare case-insensitively
fn name_collation() -> Collation {
    Collation::builder()
        .locale("en".to_string())
        .strength(Some(CollationStrength::Secondary))
        .build()
}

fn unique_index(keys: Document, name: &str, collation: Option<Collation>) -> IndexModel {
    let options = IndexOptions::builder()
        .name(Some(name.to_string()))
        .unique(Some(true))
        .collation(collation)
        .build();
    IndexModel::builder().keys(keys).options(Some(options)).build()
}

fn by_name_options() -> FindOneOptions {
    let mut options = FindOneOptions::default();
    options.collation = Some(name_collation());
    options
}

/// Only the `_id` is fetched by existence checks
fn id_only_options() -> FindOneOptions {
    let mut options = FindOneOptions::default();
    options.projection = Some(doc! {"_id": 1});
    options
}

pub struct MongoCatalog {
    db: Arc<AppDatabase>,
}

impl MongoCatalog {
    pub fn new(db: Arc<AppDatabase>) -> Self {
        Self { db }
    }

    /// Creates the unique indexes backing the catalog invariants
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let person_name = unique_index(doc! {"name": 1}, "uniq_name", Some(name_collation()));
        self.db
            .create_indexes(DB_NAME, COLL_PERSONS, vec![person_name])
            .await?;
        let cast = unique_index(doc! {"movieId": 1, "personId": 1}, "uniq_movie_person", None);
        self.db
            .create_indexes(DB_NAME, COLL_MOVIE_CASTS, vec![cast])
            .await?;
        let crew = unique_index(
            doc! {"movieId": 1, "personId": 1, "jobTitle": 1},
            "uniq_movie_person_job",
            None,
        );
        self.db
            .create_indexes(DB_NAME, COLL_MOVIE_CREWS, vec![crew])
            .await?;
        let email = unique_index(doc! {"email": 1}, "uniq_email", None);
        let username = unique_index(doc! {"username": 1}, "uniq_username", None);
        self.db
            .create_indexes(DB_NAME, COLL_USERS, vec![email, username])
            .await?;
        tracing::debug!("catalog indexes are in place");
        Ok(())
    }
}

#[async_trait]
impl Catalog for MongoCatalog {
    async fn begin(&self) -> StoreResult<Box<dyn CatalogTx>> {
        let mut session = self.db.start_session().await?;
        session.start_transaction(None).await?;
        let tx = MongoTx {
            db: self.db.clone(),
            session,
        };
        Ok(Box::new(tx))
    }

    async fn find_movie(&self, id: &str) -> StoreResult<Option<Movie>> {
        let filter = doc! {"_id": id};
        let movie = self
            .db
            .find_one::<Movie>(DB_NAME, COLL_MOVIES, Some(filter), None)
            .await?;
        Ok(movie)
    }

    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        let mut options = FindOptions::default();
        options.sort = Some(doc! {"createdTs": -1});
        let movies = self
            .db
            .find::<Movie>(DB_NAME, COLL_MOVIES, None, Some(options))
            .await?;
        Ok(movies)
    }

    async fn find_person(&self, id: &str) -> StoreResult<Option<Person>> {
        let filter = doc! {"_id": id};
        let person = self
            .db
            .find_one::<Person>(DB_NAME, COLL_PERSONS, Some(filter), None)
            .await?;
        Ok(person)
    }

    async fn find_person_by_name(&self, name: &str) -> StoreResult<Option<Person>> {
        let filter = doc! {"name": name};
        let person = self
            .db
            .find_one::<Person>(DB_NAME, COLL_PERSONS, Some(filter), Some(by_name_options()))
            .await?;
        Ok(person)
    }

    async fn find_persons(&self, ids: &[String]) -> StoreResult<Vec<Person>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let filter = doc! {"_id": {"$in": ids.to_vec()}};
        let persons = self
            .db
            .find::<Person>(DB_NAME, COLL_PERSONS, Some(filter), None)
            .await?;
        Ok(persons)
    }

    async fn list_persons(&self, roles: Option<&[Role]>) -> StoreResult<Vec<Person>> {
        let filter = match roles {
            Some(roles) => {
                let roles = to_bson(roles)?;
                Some(doc! {"job": {"$in": roles}})
            }
            None => None,
        };
        let mut options = FindOptions::default();
        options.sort = Some(doc! {"name": 1});
        options.collation = Some(name_collation());
        let persons = self
            .db
            .find::<Person>(DB_NAME, COLL_PERSONS, filter, Some(options))
            .await?;
        Ok(persons)
    }

    async fn list_cast(&self, movie_id: &str) -> StoreResult<Vec<CastAssignment>> {
        let filter = doc! {"movieId": movie_id};
        let cast = self
            .db
            .find::<CastAssignment>(DB_NAME, COLL_MOVIE_CASTS, Some(filter), None)
            .await?;
        Ok(cast)
    }

    async fn list_crew(&self, movie_id: &str) -> StoreResult<Vec<CrewAssignment>> {
        let filter = doc! {"movieId": movie_id};
        let crew = self
            .db
            .find::<CrewAssignment>(DB_NAME, COLL_MOVIE_CREWS, Some(filter), None)
            .await?;
        Ok(crew)
    }

    async fn list_clips(&self, parent: &MediaRef) -> StoreResult<Vec<Clip>> {
        let filter = doc! {
            "type": parent.kind.to_string(),
            "referenceId": parent.reference_id.as_str(),
        };
        let clips = self
            .db
            .find::<Clip>(DB_NAME, COLL_CLIPS, Some(filter), None)
            .await?;
        Ok(clips)
    }
}

pub struct MongoTx {
    db: Arc<AppDatabase>,
    session: ClientSession,
}

impl MongoTx {
    async fn find_by<T>(
        &mut self,
        coll: &str,
        filter: Document,
        options: Option<FindOneOptions>,
    ) -> StoreResult<Option<T>>
    where
        T: serde::de::DeserializeOwned + Unpin + Send + Sync + 'static,
    {
        let val = self
            .db
            .find_one_with_session::<T>(DB_NAME, coll, Some(filter), options, &mut self.session)
            .await?;
        Ok(val)
    }

    async fn insert<T>(&mut self, coll: &str, doc: &T) -> StoreResult<()>
    where
        T: serde::Serialize + Sync,
    {
        self.db
            .insert_one_with_session::<T>(DB_NAME, coll, doc, None, &mut self.session)
            .await?;
        Ok(())
    }

    /// Inserts into a collection guarded by a unique index
    async fn insert_unique<T>(&mut self, coll: &str, doc: &T) -> StoreResult<()>
    where
        T: serde::Serialize + Sync,
    {
        self.db
            .insert_one_with_session::<T>(DB_NAME, coll, doc, None, &mut self.session)
            .await
            .map_err(unique_insert_error)?;
        Ok(())
    }
}

#[async_trait]
impl CatalogTx for MongoTx {
    async fn exists(&mut self, kind: MediaKind, id: &str) -> StoreResult<bool> {
        let coll = match kind {
            MediaKind::MOVIE => COLL_MOVIES,
            MediaKind::SERIES => COLL_SERIES,
            MediaKind::SEASON => COLL_SEASONS,
        };
        let filter = doc! {"_id": id};
        let found = self
            .find_by::<Document>(coll, filter, Some(id_only_options()))
            .await?;
        Ok(found.is_some())
    }

    async fn find_movie(&mut self, id: &str) -> StoreResult<Option<Movie>> {
        self.find_by::<Movie>(COLL_MOVIES, doc! {"_id": id}, None).await
    }

    async fn insert_movie(&mut self, movie: &Movie) -> StoreResult<()> {
        self.insert(COLL_MOVIES, movie).await
    }

    async fn find_person(&mut self, id: &str) -> StoreResult<Option<Person>> {
        self.find_by::<Person>(COLL_PERSONS, doc! {"_id": id}, None).await
    }

    async fn find_person_by_name(&mut self, name: &str) -> StoreResult<Option<Person>> {
        self.find_by::<Person>(COLL_PERSONS, doc! {"name": name}, Some(by_name_options()))
            .await
    }

    async fn insert_person(&mut self, person: &Person) -> StoreResult<()> {
        self.insert_unique(COLL_PERSONS, person).await
    }

    async fn set_person_roles(
        &mut self,
        id: &str,
        roles: &BTreeSet<Role>,
        updated_ts: u64,
    ) -> StoreResult<Option<Person>> {
        let filter = doc! {"_id": id};
        let roles = to_bson(roles)?;
        let update = doc! {"$set": {"job": roles, "updatedTs": updated_ts as i64}};
        let mut options = FindOneAndUpdateOptions::default();
        options.return_document = Some(ReturnDocument::After);
        let person = self
            .db
            .find_one_and_update_with_session::<Person>(
                DB_NAME,
                COLL_PERSONS,
                filter,
                update,
                Some(options),
                &mut self.session,
            )
            .await?;
        Ok(person)
    }

    async fn find_cast(
        &mut self,
        movie_id: &str,
        person_id: &str,
    ) -> StoreResult<Option<CastAssignment>> {
        let filter = doc! {"movieId": movie_id, "personId": person_id};
        self.find_by::<CastAssignment>(COLL_MOVIE_CASTS, filter, None)
            .await
    }

    async fn insert_cast(&mut self, cast: &CastAssignment) -> StoreResult<()> {
        self.insert_unique(COLL_MOVIE_CASTS, cast).await
    }

    async fn find_crew(
        &mut self,
        movie_id: &str,
        person_id: &str,
        job_title: &str,
    ) -> StoreResult<Option<CrewAssignment>> {
        let filter = doc! {"movieId": movie_id, "personId": person_id, "jobTitle": job_title};
        self.find_by::<CrewAssignment>(COLL_MOVIE_CREWS, filter, None)
            .await
    }

    async fn insert_crew(&mut self, crew: &CrewAssignment) -> StoreResult<()> {
        self.insert_unique(COLL_MOVIE_CREWS, crew).await
    }

    async fn insert_clips(&mut self, clips: &[Clip]) -> StoreResult<()> {
        if clips.is_empty() {
            return Ok(());
        }
        self.db
            .insert_many_with_session::<Clip>(DB_NAME, COLL_CLIPS, clips, None, &mut self.session)
            .await?;
        Ok(())
    }

    async fn find_user(&mut self, id: &str) -> StoreResult<Option<User>> {
        self.find_by::<User>(COLL_USERS, doc! {"_id": id}, None).await
    }

    async fn find_user_by_email(&mut self, email: &str) -> StoreResult<Option<User>> {
        self.find_by::<User>(COLL_USERS, doc! {"email": email}, None)
            .await
    }

    async fn find_user_by_username(&mut self, username: &str) -> StoreResult<Option<User>> {
        self.find_by::<User>(COLL_USERS, doc! {"username": username}, None)
            .await
    }

    async fn insert_user(&mut self, user: &User) -> StoreResult<()> {
        self.insert(COLL_USERS, user).await
    }

    async fn insert_review(&mut self, review: &Review) -> StoreResult<()> {
        self.insert(COLL_REVIEWS, review).await
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MongoTx { mut session, .. } = *self;
        session.commit_transaction().await?;
        Ok(())
    }

    async fn abort(self: Box<Self>) -> StoreResult<()> {
        let MongoTx { mut session, .. } = *self;
        session.abort_transaction().await?;
        Ok(())
    }
}
