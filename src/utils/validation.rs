use axum::{
    async_trait,
    extract::FromRequest,
    http::Request,
    Json, RequestExt,
};
use validator::Validate;

use super::AppError;

/// JSON body extractor which also runs the `validator` rules
///
/// Malformed JSON and failed validations are both rejected with a 400.
pub struct ValidatedBody<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for ValidatedBody<T>
where
    B: Send + 'static,
    S: Send + Sync,
    T: Validate + 'static,
    Json<T>: FromRequest<(), B>,
    <Json<T> as FromRequest<(), B>>::Rejection: std::fmt::Display,
{
    type Rejection = AppError;

    async fn from_request(req: Request<B>, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = req.extract::<Json<T>, _>().await.map_err(|err| {
            let msg = format!("Invalid JSON body: {err}");
            AppError::BadRequestErr(msg)
        })?;
        data.validate().map_err(|err| {
            let msg = format!("Invalid JSON body: {err}");
            AppError::BadRequestErr(msg)
        })?;
        Ok(Self(data))
    }
}
