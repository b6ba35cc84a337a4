use anyhow::anyhow;
use futures::stream::StreamExt;
use mongodb::bson::Document;
use mongodb::error::{ErrorKind, Result as MongoResult, WriteFailure};
use mongodb::options::{
    FindOneAndUpdateOptions, FindOneOptions, FindOptions, InsertManyOptions, InsertOneOptions,
};
use mongodb::{options::ClientOptions, Client, ClientSession, IndexModel};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::{config::AppConfig, constants::*};

pub struct AppDatabase(Client);

impl AppDatabase {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let uri = config
            .mongodb_uri
            .as_deref()
            .ok_or(anyhow!("MONGODB_URI not found in .env file"))?;
        let timeout = Duration::from_secs(MONGO_CONN_TIMEOUT);
        // create the mongodb client options
        let mut client_options = ClientOptions::parse(uri).await?;
        client_options.max_pool_size = Some(config.mongodb_max_pool);
        client_options.min_pool_size = Some(config.mongodb_min_pool);
        client_options.connect_timeout = Some(timeout);
        // create the client and return Result object
        let client = Client::with_options(client_options)?;
        Ok(Self(client))
    }

    pub async fn start_session(&self) -> MongoResult<ClientSession> {
        self.0.start_session(None).await
    }

    pub async fn create_indexes(
        &self,
        db: &str,
        coll: &str,
        indexes: Vec<IndexModel>,
    ) -> MongoResult<()> {
        let coll = self.0.database(db).collection::<Document>(coll);
        coll.create_indexes(indexes, None).await?;
        Ok(())
    }

    pub async fn find_one<T>(
        &self,
        db: &str,
        coll: &str,
        filter: Option<Document>,
        options: Option<FindOneOptions>,
    ) -> MongoResult<Option<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync + 'static,
    {
        let coll = self.0.database(db).collection::<T>(coll);
        coll.find_one(filter, options).await
    }

    pub async fn find<T>(
        &self,
        db: &str,
        coll: &str,
        filter: Option<Document>,
        options: Option<FindOptions>,
    ) -> MongoResult<Vec<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync + 'static,
    {
        let coll = self.0.database(db).collection::<T>(coll);
        let mut cursor = coll.find(filter, options).await?;
        let mut data = vec![];
        while let Some(doc) = cursor.next().await {
            data.push(doc?);
        }
        Ok(data)
    }

    pub async fn find_one_with_session<T>(
        &self,
        db: &str,
        coll: &str,
        filter: Option<Document>,
        options: Option<FindOneOptions>,
        session: &mut ClientSession,
    ) -> MongoResult<Option<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync + 'static,
    {
        let coll = self.0.database(db).collection::<T>(coll);
        coll.find_one_with_session(filter, options, session).await
    }

    pub async fn insert_one_with_session<T>(
        &self,
        db: &str,
        coll: &str,
        doc: &T,
        options: Option<InsertOneOptions>,
        session: &mut ClientSession,
    ) -> MongoResult<()>
    where
        T: Serialize,
    {
        let coll = self.0.database(db).collection::<T>(coll);
        coll.insert_one_with_session(doc, options, session).await?;
        Ok(())
    }

    pub async fn insert_many_with_session<T>(
        &self,
        db: &str,
        coll: &str,
        docs: &[T],
        options: Option<InsertManyOptions>,
        session: &mut ClientSession,
    ) -> MongoResult<()>
    where
        T: Serialize,
    {
        let coll = self.0.database(db).collection::<T>(coll);
        coll.insert_many_with_session(docs, options, session)
            .await?;
        Ok(())
    }

    pub async fn find_one_and_update_with_session<T>(
        &self,
        db: &str,
        coll: &str,
        filter: Document,
        update: Document,
        options: Option<FindOneAndUpdateOptions>,
        session: &mut ClientSession,
    ) -> MongoResult<Option<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync + 'static,
    {
        let coll = self.0.database(db).collection::<T>(coll);
        coll.find_one_and_update_with_session(filter, update, options, session)
            .await
    }
}

/// `true` when the server rejected a write because of a unique index
pub fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_err)) => {
            write_err.code == MONGO_DUPLICATE_KEY_CODE
        }
        ErrorKind::BulkWrite(failure) => failure
            .write_errors
            .as_ref()
            .map_or(false, |errs| {
                errs.iter().any(|e| e.code == MONGO_DUPLICATE_KEY_CODE)
            }),
        ErrorKind::Command(cmd_err) => cmd_err.code == MONGO_DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// `true` when a transaction lost a race with a concurrent write on the same document
pub fn is_write_conflict_error(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_err)) => {
            write_err.code == MONGO_WRITE_CONFLICT_CODE
        }
        ErrorKind::Command(cmd_err) => cmd_err.code == MONGO_WRITE_CONFLICT_CODE,
        _ => false,
    }
}
