use std::collections::BTreeSet;

use crate::{
    models::{NewPerson, Person, Role},
    store::{conflict_on_duplicate, end_transaction, Catalog, CatalogTx},
    utils::{get_epoch_ts, AppError},
};

const DUPLICATE_NAME: &str = "Person already exists with same name";

/// Case-insensitive exact match on the name
pub async fn lookup_by_name(
    catalog: &dyn Catalog,
    name: &str,
) -> Result<Option<Person>, AppError> {
    let person = catalog.find_person_by_name(name.trim()).await?;
    Ok(person)
}

/// Registers a new person, or when `existing_person_id` is given merges
/// `new_person.roles` into the roles of that person
///
/// The merge path writes nothing but the role set. Exactly one row is
/// created or updated.
pub async fn create_or_merge_roles(
    catalog: &dyn Catalog,
    new_person: NewPerson,
    existing_person_id: Option<&str>,
) -> Result<Person, AppError> {
    if existing_person_id.is_none() {
        validate_new_person(&new_person)?;
    }
    let mut tx = catalog.begin().await?;
    let result = match existing_person_id {
        Some(id) => merge_roles(tx.as_mut(), id, &new_person.roles).await,
        None => register(tx.as_mut(), new_person).await,
    };
    end_transaction(tx, result).await
}

/// Inserts every person whose name is not taken yet, in one transaction
///
/// Names already stored, or repeated earlier in the same batch, are
/// skipped. Returns the number of persons created.
pub async fn create_many(
    catalog: &dyn Catalog,
    persons: Vec<NewPerson>,
) -> Result<u64, AppError> {
    for person in &persons {
        validate_new_person(person)?;
    }
    let mut tx = catalog.begin().await?;
    let result = insert_missing(tx.as_mut(), persons).await;
    end_transaction(tx, result).await
}

fn validate_new_person(person: &NewPerson) -> Result<(), AppError> {
    if person.name.trim().is_empty() {
        return Err(AppError::BadRequestErr("Name is required".into()));
    }
    if person.roles.is_empty() {
        let err = format!("At least one job is required for `{}`", person.name.trim());
        return Err(AppError::BadRequestErr(err));
    }
    Ok(())
}

async fn merge_roles(
    tx: &mut dyn CatalogTx,
    id: &str,
    roles: &BTreeSet<Role>,
) -> Result<Person, AppError> {
    let person = tx
        .find_person(id)
        .await?
        .ok_or(AppError::NotFound("Person not found".into()))?;
    let merged: BTreeSet<Role> = person.roles.union(roles).copied().collect();
    let person = tx
        .set_person_roles(&person.id, &merged, get_epoch_ts())
        .await?
        .ok_or(AppError::NotFound("Person not found".into()))?;
    tracing::debug!("roles of `{}` are now {:?}", person.name, person.roles);
    Ok(person)
}

async fn register(tx: &mut dyn CatalogTx, new_person: NewPerson) -> Result<Person, AppError> {
    if let Some(existing) = tx.find_person_by_name(new_person.name.trim()).await? {
        let err = format!("{DUPLICATE_NAME}: {}", existing.name);
        return Err(AppError::Conflict(err));
    }
    let person = new_person.into_person();
    tx.insert_person(&person)
        .await
        .map_err(|err| conflict_on_duplicate(err, DUPLICATE_NAME))?;
    Ok(person)
}

async fn insert_missing(tx: &mut dyn CatalogTx, persons: Vec<NewPerson>) -> Result<u64, AppError> {
    let mut count = 0;
    for new_person in persons {
        if tx.find_person_by_name(new_person.name.trim()).await?.is_some() {
            tracing::debug!("skipping existing person `{}`", new_person.name);
            continue;
        }
        tx.insert_person(&new_person.into_person()).await?;
        count += 1;
    }
    Ok(count)
}
