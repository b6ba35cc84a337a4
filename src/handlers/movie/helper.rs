use anyhow::anyhow;

use crate::{
    constants::*,
    models::*,
    store::{end_transaction, Catalog, CatalogTx, StoreError, StoreResult},
    utils::{
        get_epoch_ts, lenient_u32, new_id, non_blank, parse_date, to_embed_url, AppError,
    },
};

/// Movie persisted by [`create_movie`] and the nested entries it left out
#[derive(Debug)]
pub struct CreatedMovie {
    pub movie: Movie,
    pub skipped: Vec<SkippedEntry>,
}

/// Creates a movie together with its cast, crew and clips in one transaction
///
/// Required fields and bounds are checked before anything is written.
/// Nested entries that are incomplete, point at an unknown person or repeat
/// an assignment are skipped and reported back. Any storage fault rolls the
/// whole movie back.
pub async fn create_movie(
    catalog: &dyn Catalog,
    body: CreateMovieReqBody,
) -> Result<CreatedMovie, AppError> {
    let movie = build_movie(&body)?;
    let mut tx = catalog.begin().await?;
    let result = persist_movie_graph(tx.as_mut(), &movie, &body)
        .await
        .map_err(persistence_fault);
    let skipped = end_transaction(tx, result).await?;
    tracing::debug!(
        "movie `{}` created, {} nested entries skipped",
        movie.title,
        skipped.len()
    );
    Ok(CreatedMovie { movie, skipped })
}

/// Inside the movie transaction every store error is a persistence fault
fn persistence_fault(err: StoreError) -> AppError {
    match err {
        StoreError::Duplicate(msg) => AppError::AnyError(anyhow!("unexpected duplicate: {msg}")),
        StoreError::Backend(err) => AppError::AnyError(err),
    }
}

fn build_movie(body: &CreateMovieReqBody) -> Result<Movie, AppError> {
    let title = non_blank(body.title.as_deref());
    let description = non_blank(body.description.as_deref());
    let release_date = non_blank(body.release_date.as_deref());
    let (Some(title), Some(description), Some(release_date)) = (title, description, release_date)
    else {
        let err = "Missing required fields: title, description, or releaseDate";
        return Err(AppError::BadRequestErr(err.into()));
    };
    let release_date = parse_date(release_date, "releaseDate")?;
    if let Some(rating) = body.rating {
        if !(MOVIE_RATING_MIN..=MOVIE_RATING_MAX).contains(&rating) {
            let err = format!("rating must be between {MOVIE_RATING_MIN} and {MOVIE_RATING_MAX}");
            return Err(AppError::BadRequestErr(err));
        }
    }
    if body.duration == Some(0) {
        let err = "duration must be a positive number of seconds";
        return Err(AppError::BadRequestErr(err.into()));
    }
    let trailer_link = non_blank(body.trailer_link.as_deref()).unwrap_or_default();
    let movie = Movie {
        id: new_id(),
        title: title.to_owned(),
        description: description.to_owned(),
        release_date,
        rating: body.rating,
        duration: body.duration,
        genres: dedup_genres(body.genres.clone().unwrap_or_default()),
        tags: uniq_tags(body.tags.as_deref().unwrap_or_default()),
        trailer_link: to_embed_url(trailer_link),
        v_poster: non_blank(body.v_poster.as_deref()).map(str::to_owned),
        h_poster: non_blank(body.h_poster.as_deref()).map(str::to_owned),
        movie_link: non_blank(body.movie_link.as_deref()).map(str::to_owned),
        created_ts: Some(get_epoch_ts()),
    };
    Ok(movie)
}

/// Trimmed, non blank, first occurrence wins
fn uniq_tags(tags: &[String]) -> Vec<String> {
    let mut uniq: Vec<String> = vec![];
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !uniq.iter().any(|t| t == tag) {
            uniq.push(tag.to_owned());
        }
    }
    uniq
}

fn skipped(section: &str, index: usize, reason: &str) -> SkippedEntry {
    tracing::debug!("skipping {section}[{index}]: {reason}");
    SkippedEntry {
        section: section.to_owned(),
        index,
        reason: reason.to_owned(),
    }
}

async fn persist_movie_graph(
    tx: &mut dyn CatalogTx,
    movie: &Movie,
    body: &CreateMovieReqBody,
) -> StoreResult<Vec<SkippedEntry>> {
    tx.insert_movie(movie).await?;
    let mut skipped_entries = vec![];
    for (index, entry) in body.cast.iter().flatten().enumerate() {
        if let Some(reason) = link_cast_entry(tx, &movie.id, entry).await? {
            skipped_entries.push(skipped("cast", index, reason));
        }
    }
    for (index, entry) in body.crew.iter().flatten().enumerate() {
        if let Some(reason) = link_crew_entry(tx, &movie.id, entry).await? {
            skipped_entries.push(skipped("crew", index, reason));
        }
    }
    let mut clips = vec![];
    for (index, entry) in body.clips.iter().flatten().enumerate() {
        let title = non_blank(entry.title.as_deref());
        let clip_link = non_blank(entry.clip_link.as_deref());
        let (Some(title), Some(clip_link)) = (title, clip_link) else {
            skipped_entries.push(skipped("clips", index, "title and clipLink are required"));
            continue;
        };
        let duration = lenient_u32(entry.duration.as_ref());
        let parent = MediaRef::movie(&movie.id);
        clips.push(Clip::new(parent, title, &to_embed_url(clip_link), duration));
    }
    tx.insert_clips(&clips).await?;
    Ok(skipped_entries)
}

/// Returns why the entry was skipped, `None` once it is inserted
async fn link_cast_entry(
    tx: &mut dyn CatalogTx,
    movie_id: &str,
    entry: &CastEntryReq,
) -> StoreResult<Option<&'static str>> {
    let person_id = non_blank(entry.actor_id.as_deref());
    let character_name = non_blank(entry.character_name.as_deref());
    let (Some(person_id), Some(character_name)) = (person_id, character_name) else {
        return Ok(Some("actorId and characterName are required"));
    };
    if tx.find_person(person_id).await?.is_none() {
        return Ok(Some("person not found"));
    }
    if tx.find_cast(movie_id, person_id).await?.is_some() {
        return Ok(Some("person is already in the cast of this movie"));
    }
    let assignment = CastAssignment::new(movie_id, person_id, character_name);
    tx.insert_cast(&assignment).await?;
    Ok(None)
}

/// Returns why the entry was skipped, `None` once it is inserted
async fn link_crew_entry(
    tx: &mut dyn CatalogTx,
    movie_id: &str,
    entry: &CrewEntryReq,
) -> StoreResult<Option<&'static str>> {
    let person_id = non_blank(entry.crew_id.as_deref());
    let job_title = non_blank(entry.job_title.as_deref());
    let (Some(person_id), Some(job_title)) = (person_id, job_title) else {
        return Ok(Some("crewId and jobTitle are required"));
    };
    if tx.find_person(person_id).await?.is_none() {
        return Ok(Some("person not found"));
    }
    if tx.find_crew(movie_id, person_id, job_title).await?.is_some() {
        return Ok(Some("person already holds this job on this movie"));
    }
    let assignment = CrewAssignment::new(movie_id, person_id, job_title);
    tx.insert_crew(&assignment).await?;
    Ok(None)
}
