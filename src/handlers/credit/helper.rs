use crate::{
    models::{CastAssignment, CastCredit, CrewAssignment, CrewCredit, Movie, Person},
    store::{conflict_on_duplicate, end_transaction, Catalog, CatalogTx},
    utils::AppError,
};

const CAST_TAKEN: &str = "This cast member is already assigned to this movie";
const CREW_TAKEN: &str = "This crew member already holds this job on this movie";

/// Assigns a person to a movie as a character
///
/// Checked in order: the movie exists, the person exists, the person does
/// not play in this movie yet. A second identical call is a `Conflict`.
pub async fn add_cast(
    catalog: &dyn Catalog,
    movie_id: &str,
    person_id: &str,
    character_name: &str,
) -> Result<CastCredit, AppError> {
    let mut tx = catalog.begin().await?;
    let result = link_cast(tx.as_mut(), movie_id, person_id, character_name).await;
    end_transaction(tx, result).await
}

/// Assigns a person to a movie with a job title
///
/// Same checks as [`add_cast`], duplicates are looked up on the
/// `(movie, person, job title)` triple.
pub async fn add_crew(
    catalog: &dyn Catalog,
    movie_id: &str,
    person_id: &str,
    job_title: &str,
) -> Result<CrewCredit, AppError> {
    let mut tx = catalog.begin().await?;
    let result = link_crew(tx.as_mut(), movie_id, person_id, job_title).await;
    end_transaction(tx, result).await
}

async fn movie_and_person(
    tx: &mut dyn CatalogTx,
    movie_id: &str,
    person_id: &str,
    person_label: &str,
) -> Result<(Movie, Person), AppError> {
    let movie = tx
        .find_movie(movie_id)
        .await?
        .ok_or(AppError::NotFound("Movie not found".into()))?;
    let person = tx
        .find_person(person_id)
        .await?
        .ok_or(AppError::NotFound(format!("{person_label} not found")))?;
    Ok((movie, person))
}

async fn link_cast(
    tx: &mut dyn CatalogTx,
    movie_id: &str,
    person_id: &str,
    character_name: &str,
) -> Result<CastCredit, AppError> {
    let (movie, person) = movie_and_person(tx, movie_id, person_id, "Cast member").await?;
    if tx.find_cast(movie_id, person_id).await?.is_some() {
        return Err(AppError::Conflict(CAST_TAKEN.into()));
    }
    let assignment = CastAssignment::new(&movie.id, &person.id, character_name.trim());
    tx.insert_cast(&assignment)
        .await
        .map_err(|err| conflict_on_duplicate(err, CAST_TAKEN))?;
    let credit = CastCredit {
        assignment,
        movie_title: movie.title,
        person_name: person.name,
    };
    Ok(credit)
}

async fn link_crew(
    tx: &mut dyn CatalogTx,
    movie_id: &str,
    person_id: &str,
    job_title: &str,
) -> Result<CrewCredit, AppError> {
    let job_title = job_title.trim();
    let (movie, person) = movie_and_person(tx, movie_id, person_id, "Crew member").await?;
    if tx.find_crew(movie_id, person_id, job_title).await?.is_some() {
        return Err(AppError::Conflict(CREW_TAKEN.into()));
    }
    let assignment = CrewAssignment::new(&movie.id, &person.id, job_title);
    tx.insert_crew(&assignment)
        .await
        .map_err(|err| conflict_on_duplicate(err, CREW_TAKEN))?;
    let credit = CrewCredit {
        assignment,
        movie_title: movie.title,
        person_name: person.name,
    };
    Ok(credit)
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        models::{NewPerson, Role},
        store::{FailPoint, MemoryCatalog},
        utils::new_id,
    };

    pub fn sample_movie(title: &str) -> Movie {
        Movie {
            id: new_id(),
            title: title.to_owned(),
            description: "On Arrakis".to_owned(),
            release_date: Utc::now(),
            rating: Some(8.0),
            duration: Some(9360),
            genres: vec![],
            tags: vec![],
            trailer_link: String::new(),
            v_poster: None,
            h_poster: None,
            movie_link: None,
            created_ts: None,
        }
    }

    /// Stores a movie and a person, returns their ids
    pub async fn seed_movie_and_person(catalog: &MemoryCatalog, role: Role) -> (String, String) {
        let movie = sample_movie("Dune");
        let person = NewPerson {
            name: "Denis Villeneuve".to_owned(),
            roles: [role].into_iter().collect(),
            ..Default::default()
        }
        .into_person();
        let mut tx = catalog.begin().await.unwrap();
        tx.insert_movie(&movie).await.unwrap();
        tx.insert_person(&person).await.unwrap();
        tx.commit().await.unwrap();
        (movie.id, person.id)
    }

    #[tokio::test]
    async fn test_add_cast_joins_names() {
        let catalog = MemoryCatalog::new();
        let (movie_id, person_id) = seed_movie_and_person(&catalog, Role::ACTOR).await;
        let credit = add_cast(&catalog, &movie_id, &person_id, "Paul").await.unwrap();
        assert_eq!(credit.movie_title, "Dune");
        assert_eq!(credit.person_name, "Denis Villeneuve");
        assert_eq!(credit.assignment.character_name, "Paul");
        assert_eq!(catalog.list_cast(&movie_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_cast_twice_is_a_conflict() {
        let catalog = MemoryCatalog::new();
        let (movie_id, person_id) = seed_movie_and_person(&catalog, Role::ACTOR).await;
        add_cast(&catalog, &movie_id, &person_id, "Paul").await.unwrap();
        let res = add_cast(&catalog, &movie_id, &person_id, "Muad'Dib").await;
        assert!(matches!(res, Err(AppError::Conflict(_))));
        assert_eq!(catalog.list_cast(&movie_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_crew_conflicts_only_on_same_job() {
        let catalog = MemoryCatalog::new();
        let (movie_id, person_id) = seed_movie_and_person(&catalog, Role::DIRECTOR).await;
        assert!(add_crew(&catalog, &movie_id, &person_id, "Director").await.is_ok());
        let res = add_crew(&catalog, &movie_id, &person_id, "Director").await;
        assert!(matches!(res, Err(AppError::Conflict(_))));
        assert!(add_crew(&catalog, &movie_id, &person_id, "Writer").await.is_ok());
        assert_eq!(catalog.list_crew(&movie_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_credit_caught_by_store_when_lookup_misses() {
        let catalog = MemoryCatalog::new();
        let (movie_id, person_id) = seed_movie_and_person(&catalog, Role::ACTOR).await;
        add_cast(&catalog, &movie_id, &person_id, "Paul").await.unwrap();
        add_crew(&catalog, &movie_id, &person_id, "Director").await.unwrap();
        catalog.stale_reads();

        match add_cast(&catalog, &movie_id, &person_id, "Muad'Dib").await {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, CAST_TAKEN),
            other => panic!("unexpected result {:?}", other),
        }
        match add_crew(&catalog, &movie_id, &person_id, "Director").await {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, CREW_TAKEN),
            other => panic!("unexpected result {:?}", other),
        }
        let counts = catalog.row_counts().await;
        assert_eq!((counts.casts, counts.crews), (1, 1));
    }

    #[tokio::test]
    async fn test_link_checks_movie_before_person() {
        let catalog = MemoryCatalog::new();
        let (movie_id, person_id) = seed_movie_and_person(&catalog, Role::ACTOR).await;
        match add_cast(&catalog, "no-movie", "no-person", "Paul").await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Movie not found"),
            other => panic!("unexpected result {:?}", other),
        }
        match add_crew(&catalog, &movie_id, "no-person", "Director").await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Crew member not found"),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(add_cast(&catalog, &movie_id, &person_id, "Paul").await.is_ok());
    }

    #[tokio::test]
    async fn test_link_store_fault_rolls_back() {
        let catalog = MemoryCatalog::new();
        let (movie_id, person_id) = seed_movie_and_person(&catalog, Role::ACTOR).await;
        catalog.fail_at(FailPoint::InsertCast);
        let res = add_cast(&catalog, &movie_id, &person_id, "Paul").await;
        assert!(matches!(res, Err(AppError::AnyError(_))));
        assert_eq!(catalog.row_counts().await.casts, 0);
    }
}
