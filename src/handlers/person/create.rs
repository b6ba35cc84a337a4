use axum::{extract::State, Json};
use std::{collections::BTreeSet, sync::Arc};

use super::helper::create_or_merge_roles;
use crate::{
    app::AppState,
    models::*,
    utils::{non_blank, parse_optional_date, AppError, ValidatedBody},
};

impl CreatePersonReqBody {
    /// `personId` of the person to merge into, when `isUpdate` is set
    fn merge_target(&self) -> Result<Option<String>, AppError> {
        if !self.is_update.unwrap_or_default() {
            return Ok(None);
        }
        match non_blank(self.person_id.as_deref()) {
            Some(id) => Ok(Some(id.to_owned())),
            None => {
                let err = "personId is required when isUpdate is set";
                Err(AppError::BadRequestErr(err.into()))
            }
        }
    }

    fn into_new_person(self) -> Result<NewPerson, AppError> {
        let roles: BTreeSet<Role> = self.job.map(Into::into).unwrap_or_default();
        let new_person = NewPerson {
            name: self.name.unwrap_or_default(),
            roles,
            description: self.description,
            dob: parse_optional_date(self.dob.as_deref(), "dob")?,
            death_date: parse_optional_date(self.death_date.as_deref(), "deathDate")?,
            profile_photo: self.profile_photo,
            image_urls: self.image_urls.unwrap_or_default(),
        };
        Ok(new_person)
    }
}

/// Create person
///
/// Creates a cast or crew member. With `isUpdate` the given `job` roles are
/// merged into the person `personId` instead and nothing else is changed.
#[utoipa::path(
    post,
    path = "/api/v1/person",
    request_body = CreatePersonReqBody,
    responses(
        (status = StatusCode::OK, description = "Person created or roles merged", body = PersonResponse),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse),
        (status = StatusCode::NOT_FOUND, description = "personId not found", body = GenericResponse),
        (status = StatusCode::CONFLICT, description = "Name already taken", body = GenericResponse)
    ),
    tag = "Person API"
)]
pub async fn create_person_handler(
    State(state): State<Arc<AppState>>,
    ValidatedBody(body): ValidatedBody<CreatePersonReqBody>,
) -> Result<Json<PersonResponse>, AppError> {
    let merge_target = body.merge_target()?;
    let new_person = body.into_new_person()?;
    let person =
        create_or_merge_roles(state.catalog.as_ref(), new_person, merge_target.as_deref()).await?;
    let res = PersonResponse {
        success: true,
        person,
    };
    Ok(Json(res))
}
