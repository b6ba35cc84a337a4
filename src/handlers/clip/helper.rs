use std::str::FromStr;

use crate::{
    models::{Clip, MediaKind, MediaRef},
    store::{end_transaction, Catalog, CatalogTx},
    utils::{non_blank, to_embed_url, AppError},
};

/// Parses the `type` of a clip or review target, unknown kinds are rejected
pub fn parse_media_kind(kind: &str) -> Result<MediaKind, AppError> {
    MediaKind::from_str(kind.trim()).map_err(AppError::BadRequestErr)
}

/// `true` when the movie, series or season `id` is stored
///
/// An unknown `kind` is a validation error, never a plain `false`.
pub async fn reference_exists(
    tx: &mut dyn CatalogTx,
    kind: &str,
    id: &str,
) -> Result<bool, AppError> {
    let kind = parse_media_kind(kind)?;
    let found = tx.exists(kind, id).await?;
    Ok(found)
}

/// Stores a clip under an existing movie, series or season
pub async fn create_clip(
    catalog: &dyn Catalog,
    parent: MediaRef,
    title: &str,
    clip_link: &str,
    duration: Option<u32>,
) -> Result<Clip, AppError> {
    let (Some(title), Some(clip_link)) = (non_blank(Some(title)), non_blank(Some(clip_link))) else {
        return Err(AppError::BadRequestErr("title and clipLink are required".into()));
    };
    let clip = Clip::new(parent, title, &to_embed_url(clip_link), duration);
    let mut tx = catalog.begin().await?;
    let result = insert_clip(tx.as_mut(), clip).await;
    end_transaction(tx, result).await
}

async fn insert_clip(tx: &mut dyn CatalogTx, clip: Clip) -> Result<Clip, AppError> {
    let parent = &clip.parent;
    let kind = parent.kind.to_string();
    if !reference_exists(tx, &kind, &parent.reference_id).await? {
        let err = format!("{kind} with ID {} does not exist", parent.reference_id);
        return Err(AppError::NotFound(err));
    }
    tx.insert_clips(std::slice::from_ref(&clip)).await?;
    Ok(clip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handlers::credit::helper::tests::sample_movie,
        models::{Season, Series},
        store::MemoryCatalog,
    };

    #[tokio::test]
    async fn test_reference_exists_dispatches_on_kind() {
        let catalog = MemoryCatalog::new();
        let movie = sample_movie("Dune");
        catalog
            .seed_series(Series {
                id: "series-1".to_owned(),
                title: "Dune: Prophecy".to_owned(),
            })
            .await;
        catalog
            .seed_season(Season {
                id: "season-1".to_owned(),
                series_id: "series-1".to_owned(),
                season_number: 1,
                title: "Season 1".to_owned(),
            })
            .await;
        let mut tx = catalog.begin().await.unwrap();
        tx.insert_movie(&movie).await.unwrap();

        assert!(reference_exists(tx.as_mut(), "MOVIE", &movie.id).await.unwrap());
        assert!(reference_exists(tx.as_mut(), "SERIES", "series-1").await.unwrap());
        assert!(reference_exists(tx.as_mut(), "SEASON", "season-1").await.unwrap());
        // ids do not leak across kinds
        assert!(!reference_exists(tx.as_mut(), "SEASON", "series-1").await.unwrap());
        assert!(!reference_exists(tx.as_mut(), "MOVIE", "season-1").await.unwrap());
        // unknown kind fails closed
        let res = reference_exists(tx.as_mut(), "EPISODE", &movie.id).await;
        assert!(matches!(res, Err(AppError::BadRequestErr(_))));
        tx.abort().await.unwrap();
    }

    #[tokio::test]
    async fn test_create_clip_normalizes_link() {
        let catalog = MemoryCatalog::new();
        let movie = sample_movie("Dune");
        let mut tx = catalog.begin().await.unwrap();
        tx.insert_movie(&movie).await.unwrap();
        tx.commit().await.unwrap();

        let parent = MediaRef::movie(&movie.id);
        let link = "https://www.youtube.com/watch?v=n9xhJrPXop4";
        let clip = create_clip(&catalog, parent.clone(), "Trailer 2", link, None)
            .await
            .unwrap();
        assert_eq!(clip.clip_link, "https://www.youtube.com/embed/n9xhJrPXop4");
        assert_eq!(clip.duration, 0);
        assert_eq!(catalog.list_clips(&parent).await.unwrap(), vec![clip]);
    }

    #[tokio::test]
    async fn test_create_clip_rejects_blank_fields() {
        let catalog = MemoryCatalog::new();
        let movie = sample_movie("Dune");
        let mut tx = catalog.begin().await.unwrap();
        tx.insert_movie(&movie).await.unwrap();
        tx.commit().await.unwrap();

        let parent = MediaRef::movie(&movie.id);
        let link = "https://youtu.be/abc12345678";
        for (title, clip_link) in [("   ", link), ("Teaser", " \t "), ("", "")] {
            let res = create_clip(&catalog, parent.clone(), title, clip_link, None).await;
            match res {
                Err(AppError::BadRequestErr(msg)) => {
                    assert_eq!(msg, "title and clipLink are required")
                }
                other => panic!("unexpected result {:?}", other),
            }
        }
        assert_eq!(catalog.row_counts().await.clips, 0);
    }

    #[tokio::test]
    async fn test_create_clip_missing_parent() {
        let catalog = MemoryCatalog::new();
        let parent = MediaRef::new(MediaKind::SEASON, "nope");
        let res = create_clip(&catalog, parent, "Teaser", "https://youtu.be/abc12345678", Some(30))
            .await;
        match res {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "SEASON with ID nope does not exist"),
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(catalog.row_counts().await.clips, 0);
    }
}
