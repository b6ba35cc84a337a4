use anyhow::anyhow;
use async_trait::async_trait;
use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{Catalog, CatalogTx, StoreError, StoreResult};
use crate::models::*;

/// Write step at which the next transaction fails with a storage error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    InsertMovie,
    InsertPerson,
    InsertCast,
    InsertCrew,
    InsertClips,
    Commit,
}

/// Number of stored rows per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
    pub movies: usize,
    pub persons: usize,
    pub casts: usize,
    pub crews: usize,
    pub clips: usize,
    pub users: usize,
    pub reviews: usize,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    movies: Vec<Movie>,
    persons: Vec<Person>,
    casts: Vec<CastAssignment>,
    crews: Vec<CrewAssignment>,
    clips: Vec<Clip>,
    series: Vec<Series>,
    seasons: Vec<Season>,
    users: Vec<User>,
    reviews: Vec<Review>,
}

impl MemoryState {
    fn person_by_name(&self, name: &str) -> Option<&Person> {
        let name = name.to_lowercase();
        self.persons.iter().find(|p| p.name.to_lowercase() == name)
    }

    fn cast_row(&self, movie_id: &str, person_id: &str) -> Option<&CastAssignment> {
        self.casts
            .iter()
            .find(|c| c.movie_id == movie_id && c.person_id == person_id)
    }

    fn crew_row(&self, movie_id: &str, person_id: &str, job_title: &str) -> Option<&CrewAssignment> {
        self.crews.iter().find(|c| {
            c.movie_id == movie_id && c.person_id == person_id && c.job_title == job_title
        })
    }
}

/// Process local catalog used by tests and by `CATALOG_STORE=memory`
///
/// Transactions are serialized: a transaction holds the state lock
/// from `begin` until `commit` or `abort` and works on a private copy
/// that replaces the shared state on commit. Reads on the catalog
/// itself wait for any open transaction to finish.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    state: Arc<Mutex<MemoryState>>,
    fail_point: Arc<std::sync::Mutex<Option<FailPoint>>>,
    stale_reads: Arc<AtomicBool>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next transaction reaching `point` fail
    pub fn fail_at(&self, point: FailPoint) {
        if let Ok(mut fail_point) = self.fail_point.lock() {
            *fail_point = Some(point);
        }
    }

    /// Name, cast and crew lookups of later transactions miss the rows
    /// already stored, as when another writer commits between a lookup
    /// and the insert. Inserts still enforce uniqueness.
    pub fn stale_reads(&self) {
        self.stale_reads.store(true, Ordering::SeqCst);
    }

    pub async fn seed_series(&self, series: Series) {
        self.state.lock().await.series.push(series);
    }

    pub async fn seed_season(&self, season: Season) {
        self.state.lock().await.seasons.push(season);
    }

    pub async fn row_counts(&self) -> RowCounts {
        let state = self.state.lock().await;
        RowCounts {
            movies: state.movies.len(),
            persons: state.persons.len(),
            casts: state.casts.len(),
            crews: state.crews.len(),
            clips: state.clips.len(),
            users: state.users.len(),
            reviews: state.reviews.len(),
        }
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn begin(&self) -> StoreResult<Box<dyn CatalogTx>> {
        let guard = self.state.clone().lock_owned().await;
        let work = (*guard).clone();
        let tx = MemoryTx {
            fail_point: self.fail_point.clone(),
            stale_reads: self.stale_reads.load(Ordering::SeqCst),
            guard,
            work,
        };
        Ok(Box::new(tx))
    }

    async fn find_movie(&self, id: &str) -> StoreResult<Option<Movie>> {
        let state = self.state.lock().await;
        Ok(state.movies.iter().find(|m| m.id == id).cloned())
    }

    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        let state = self.state.lock().await;
        Ok(state.movies.iter().rev().cloned().collect())
    }

    async fn find_person(&self, id: &str) -> StoreResult<Option<Person>> {
        let state = self.state.lock().await;
        Ok(state.persons.iter().find(|p| p.id == id).cloned())
    }

    async fn find_person_by_name(&self, name: &str) -> StoreResult<Option<Person>> {
        let state = self.state.lock().await;
        Ok(state.person_by_name(name).cloned())
    }

    async fn find_persons(&self, ids: &[String]) -> StoreResult<Vec<Person>> {
        let state = self.state.lock().await;
        let persons = state
            .persons
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect();
        Ok(persons)
    }

    async fn list_persons(&self, roles: Option<&[Role]>) -> StoreResult<Vec<Person>> {
        let state = self.state.lock().await;
        let mut persons: Vec<Person> = state
            .persons
            .iter()
            .filter(|p| roles.map_or(true, |roles| p.has_any_role(roles)))
            .cloned()
            .collect();
        persons.sort_by_key(|p| p.name.to_lowercase());
        Ok(persons)
    }

    async fn list_cast(&self, movie_id: &str) -> StoreResult<Vec<CastAssignment>> {
        let state = self.state.lock().await;
        let cast = state
            .casts
            .iter()
            .filter(|c| c.movie_id == movie_id)
            .cloned()
            .collect();
        Ok(cast)
    }

    async fn list_crew(&self, movie_id: &str) -> StoreResult<Vec<CrewAssignment>> {
        let state = self.state.lock().await;
        let crew = state
            .crews
            .iter()
            .filter(|c| c.movie_id == movie_id)
            .cloned()
            .collect();
        Ok(crew)
    }

    async fn list_clips(&self, parent: &MediaRef) -> StoreResult<Vec<Clip>> {
        let state = self.state.lock().await;
        let clips = state
            .clips
            .iter()
            .filter(|c| &c.parent == parent)
            .cloned()
            .collect();
        Ok(clips)
    }
}

pub struct MemoryTx {
    fail_point: Arc<std::sync::Mutex<Option<FailPoint>>>,
    stale_reads: bool,
    guard: OwnedMutexGuard<MemoryState>,
    work: MemoryState,
}

impl MemoryTx {
    fn check(&self, point: FailPoint) -> StoreResult<()> {
        let mut fail_point = self
            .fail_point
            .lock()
            .map_err(|_| anyhow!("fail point lock poisoned"))?;
        if *fail_point == Some(point) {
            *fail_point = None;
            let err = anyhow!("storage failure at {:?}", point);
            return Err(StoreError::Backend(err));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogTx for MemoryTx {
    async fn exists(&mut self, kind: MediaKind, id: &str) -> StoreResult<bool> {
        let found = match kind {
            MediaKind::MOVIE => self.work.movies.iter().any(|m| m.id == id),
            MediaKind::SERIES => self.work.series.iter().any(|s| s.id == id),
            MediaKind::SEASON => self.work.seasons.iter().any(|s| s.id == id),
        };
        Ok(found)
    }

    async fn find_movie(&mut self, id: &str) -> StoreResult<Option<Movie>> {
        Ok(self.work.movies.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_movie(&mut self, movie: &Movie) -> StoreResult<()> {
        self.check(FailPoint::InsertMovie)?;
        if self.work.movies.iter().any(|m| m.id == movie.id) {
            return Err(StoreError::Duplicate(format!("movie `{}`", movie.id)));
        }
        self.work.movies.push(movie.clone());
        Ok(())
    }

    async fn find_person(&mut self, id: &str) -> StoreResult<Option<Person>> {
        Ok(self.work.persons.iter().find(|p| p.id == id).cloned())
    }

    async fn find_person_by_name(&mut self, name: &str) -> StoreResult<Option<Person>> {
        if self.stale_reads {
            return Ok(None);
        }
        Ok(self.work.person_by_name(name).cloned())
    }

    async fn insert_person(&mut self, person: &Person) -> StoreResult<()> {
        self.check(FailPoint::InsertPerson)?;
        if self.work.person_by_name(&person.name).is_some() {
            return Err(StoreError::Duplicate(format!("person `{}`", person.name)));
        }
        self.work.persons.push(person.clone());
        Ok(())
    }

    async fn set_person_roles(
        &mut self,
        id: &str,
        roles: &BTreeSet<Role>,
        updated_ts: u64,
    ) -> StoreResult<Option<Person>> {
        let person = self.work.persons.iter_mut().find(|p| p.id == id);
        let Some(person) = person else {
            return Ok(None);
        };
        person.roles = roles.clone();
        person.updated_ts = Some(updated_ts);
        Ok(Some(person.clone()))
    }

    async fn find_cast(
        &mut self,
        movie_id: &str,
        person_id: &str,
    ) -> StoreResult<Option<CastAssignment>> {
        if self.stale_reads {
            return Ok(None);
        }
        Ok(self.work.cast_row(movie_id, person_id).cloned())
    }

    async fn insert_cast(&mut self, cast: &CastAssignment) -> StoreResult<()> {
        self.check(FailPoint::InsertCast)?;
        if self.work.cast_row(&cast.movie_id, &cast.person_id).is_some() {
            let msg = format!("cast `{}` on movie `{}`", cast.person_id, cast.movie_id);
            return Err(StoreError::Duplicate(msg));
        }
        self.work.casts.push(cast.clone());
        Ok(())
    }

    async fn find_crew(
        &mut self,
        movie_id: &str,
        person_id: &str,
        job_title: &str,
    ) -> StoreResult<Option<CrewAssignment>> {
        if self.stale_reads {
            return Ok(None);
        }
        Ok(self.work.crew_row(movie_id, person_id, job_title).cloned())
    }

    async fn insert_crew(&mut self, crew: &CrewAssignment) -> StoreResult<()> {
        self.check(FailPoint::InsertCrew)?;
        let existing = self
            .work
            .crew_row(&crew.movie_id, &crew.person_id, &crew.job_title);
        if existing.is_some() {
            let msg = format!(
                "crew `{}` as `{}` on movie `{}`",
                crew.person_id, crew.job_title, crew.movie_id
            );
            return Err(StoreError::Duplicate(msg));
        }
        self.work.crews.push(crew.clone());
        Ok(())
    }

    async fn insert_clips(&mut self, clips: &[Clip]) -> StoreResult<()> {
        if clips.is_empty() {
            return Ok(());
        }
        self.check(FailPoint::InsertClips)?;
        self.work.clips.extend_from_slice(clips);
        Ok(())
    }

    async fn find_user(&mut self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.work.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&mut self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.work.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_username(&mut self, username: &str) -> StoreResult<Option<User>> {
        let user = self.work.users.iter().find(|u| u.username == username);
        Ok(user.cloned())
    }

    async fn insert_user(&mut self, user: &User) -> StoreResult<()> {
        let taken = self
            .work
            .users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username);
        if taken {
            return Err(StoreError::Duplicate(format!("user `{}`", user.username)));
        }
        self.work.users.push(user.clone());
        Ok(())
    }

    async fn insert_review(&mut self, review: &Review) -> StoreResult<()> {
        self.work.reviews.push(review.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.check(FailPoint::Commit)?;
        let MemoryTx {
            mut guard, work, ..
        } = *self;
        *guard = work;
        Ok(())
    }

    async fn abort(self: Box<Self>) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::utils::new_id;

    fn person(name: &str, roles: &[Role]) -> Person {
        Person {
            id: new_id(),
            name: name.to_owned(),
            roles: roles.iter().copied().collect(),
            description: None,
            dob: None,
            death_date: None,
            profile_photo: None,
            image_urls: vec![],
            created_ts: None,
            updated_ts: None,
        }
    }

    fn movie(title: &str) -> Movie {
        Movie {
            id: new_id(),
            title: title.to_owned(),
            description: "desc".to_owned(),
            release_date: Utc::now(),
            rating: None,
            duration: None,
            genres: vec![],
            tags: vec![],
            trailer_link: String::new(),
            v_poster: None,
            h_poster: None,
            movie_link: None,
            created_ts: None,
        }
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let catalog = MemoryCatalog::new();
        let mut tx = catalog.begin().await.unwrap();
        let actor = person("Zendaya", &[Role::ACTOR]);
        tx.insert_person(&actor).await.unwrap();
        // visible inside the transaction
        assert!(tx.find_person(&actor.id).await.unwrap().is_some());
        tx.commit().await.unwrap();
        let found = catalog.find_person(&actor.id).await.unwrap();
        assert_eq!(found, Some(actor));
    }

    #[tokio::test]
    async fn test_abort_discards_writes() {
        let catalog = MemoryCatalog::new();
        let mut tx = catalog.begin().await.unwrap();
        tx.insert_movie(&movie("Dune")).await.unwrap();
        tx.abort().await.unwrap();
        assert_eq!(catalog.row_counts().await, RowCounts::default());
    }

    #[tokio::test]
    async fn test_fail_point_fires_once() {
        let catalog = MemoryCatalog::new();
        catalog.fail_at(FailPoint::InsertMovie);
        let mut tx = catalog.begin().await.unwrap();
        let err = tx.insert_movie(&movie("Dune")).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        tx.abort().await.unwrap();

        let mut tx = catalog.begin().await.unwrap();
        tx.insert_movie(&movie("Dune")).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(catalog.row_counts().await.movies, 1);
    }

    #[tokio::test]
    async fn test_person_names_unique_ignoring_case() {
        let catalog = MemoryCatalog::new();
        let mut tx = catalog.begin().await.unwrap();
        tx.insert_person(&person("Zendaya", &[Role::ACTOR])).await.unwrap();
        let err = tx
            .insert_person(&person("ZENDAYA", &[Role::PRODUCER]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        let found = tx.find_person_by_name("zendaya").await.unwrap();
        assert_eq!(found.map(|p| p.name), Some("Zendaya".to_owned()));
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_stale_reads_still_reject_duplicates() {
        let catalog = MemoryCatalog::new();
        let mut tx = catalog.begin().await.unwrap();
        tx.insert_person(&person("Zendaya", &[Role::ACTOR])).await.unwrap();
        tx.commit().await.unwrap();

        catalog.stale_reads();
        let mut tx = catalog.begin().await.unwrap();
        assert!(tx.find_person_by_name("zendaya").await.unwrap().is_none());
        let err = tx
            .insert_person(&person("zendaya", &[Role::ACTOR]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        tx.abort().await.unwrap();
        assert_eq!(catalog.row_counts().await.persons, 1);
    }

    #[tokio::test]
    async fn test_list_persons_by_role_sorted() {
        let catalog = MemoryCatalog::new();
        let mut tx = catalog.begin().await.unwrap();
        tx.insert_person(&person("zendaya", &[Role::ACTOR])).await.unwrap();
        tx.insert_person(&person("Denis Villeneuve", &[Role::DIRECTOR]))
            .await
            .unwrap();
        tx.insert_person(&person("Austin Butler", &[Role::ACTOR]))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let actors = catalog.list_persons(Some(&[Role::ACTOR][..])).await.unwrap();
        let names: Vec<_> = actors.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Austin Butler", "zendaya"]);
        let crew = catalog.list_persons(Some(&CREW_ROLES[..])).await.unwrap();
        assert_eq!(crew.len(), 1);
        assert_eq!(catalog.list_persons(None).await.unwrap().len(), 3);
    }
}
