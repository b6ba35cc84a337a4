use anyhow::anyhow;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    app::AppState,
    models::*,
    store::{conflict_on_duplicate, end_transaction, Catalog, CatalogTx},
    utils::{get_epoch_ts, new_id, AppError, ValidatedBody},
};

/// Hashing is CPU bound, it runs off the async workers
async fn hash_password(password: String) -> anyhow::Result<String> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|err| anyhow!("password hashing task failed: {err}"))??;
    Ok(hash)
}

/// email and username are unique among users
async fn insert_uniq_user(tx: &mut dyn CatalogTx, user: &User) -> Result<(), AppError> {
    if tx.find_user_by_email(&user.email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }
    if tx.find_user_by_username(&user.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".into()));
    }
    tx.insert_user(user)
        .await
        .map_err(|err| conflict_on_duplicate(err, "User already exists"))?;
    Ok(())
}

pub async fn create_user(
    catalog: &dyn Catalog,
    body: CreateUserReqBody,
) -> Result<User, AppError> {
    let user = User {
        id: new_id(),
        name: body.name.trim().to_owned(),
        username: body.username.trim().to_owned(),
        email: body.email.trim().to_lowercase(),
        password_hash: hash_password(body.password).await?,
        created_ts: Some(get_epoch_ts()),
    };
    let mut tx = catalog.begin().await?;
    let result = insert_uniq_user(tx.as_mut(), &user).await;
    end_transaction(tx, result).await?;
    Ok(user)
}

/// Create user
///
/// Registers a user account, the password is stored as a bcrypt hash
#[utoipa::path(
    post,
    path = "/api/v1/user",
    request_body = CreateUserReqBody,
    responses(
        (status = StatusCode::CREATED, description = "User created", body = UserResponse),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse),
        (status = StatusCode::CONFLICT, description = "Email or username in use", body = GenericResponse)
    ),
    tag = "User API"
)]
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    ValidatedBody(body): ValidatedBody<CreateUserReqBody>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = create_user(state.catalog.as_ref(), body).await?;
    tracing::debug!("user created: {}", user.id);
    let res = UserResponse {
        success: true,
        data: user.to_user_resp_data(),
    };
    Ok((StatusCode::CREATED, Json(res)))
}
