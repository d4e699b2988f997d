//! Genre management integration tests

use assert_matches::assert_matches;
use chrono::Duration;
use EventHub::models::CreateEventRequest;
use EventHub::services::Actor;
use EventHub::utils::{EntityKind, EventHubError};

use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_tagging_updates_both_sides() {
    let ctx = setup_integration_test();
    let admin = ctx.admin().await;
    let genre = ctx.create_genre("Lindy Hop").await;
    let event = ctx.create_event("Friday social").await;
    let genres = &ctx.services.genre_service;
    let events = &ctx.services.event_service;

    genres.add_event(&admin, genre.id, event.id).await.unwrap();
    assert_eq!(genres.events_of(genre.id).await.unwrap(), vec![event.clone()]);
    assert_eq!(events.genres_of(event.id).await.unwrap(), vec![genre.clone()]);

    genres.remove_event(&admin, genre.id, event.id).await.unwrap();
    assert!(genres.events_of(genre.id).await.unwrap().is_empty());
    assert!(events.genres_of(event.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_genre_detaches_every_event() {
    let ctx = setup_integration_test();
    let admin = ctx.admin().await;
    let genre = ctx.create_genre("Balboa").await;
    let kept = ctx.create_genre("Blues").await;
    let genres = &ctx.services.genre_service;
    let events = &ctx.services.event_service;

    let mut tagged = Vec::new();
    for title in ["Bal night", "Bal workshop", "Bal festival"] {
        let event = ctx.create_event(title).await;
        genres.add_event(&admin, genre.id, event.id).await.unwrap();
        genres.add_event(&admin, kept.id, event.id).await.unwrap();
        tagged.push(event.id);
    }

    let detached = genres.delete(&admin, genre.id).await.unwrap();
    assert_eq!(detached, tagged);
    assert!(genres.find(genre.id).await.is_none());
    for event_id in tagged {
        let remaining = events.genres_of(event_id).await.unwrap();
        assert_eq!(remaining, vec![kept.clone()]);
    }
    assert_eq!(ctx.stats().await.genre_links, 3);
}

#[tokio::test]
async fn test_duplicates_are_conflicts() {
    let ctx = setup_integration_test();
    let admin = ctx.admin().await;
    let genre = ctx.create_genre("Shag").await;
    let other = ctx.create_genre("Charleston").await;
    let event = ctx.create_event("Shag weekend").await;
    let genres = &ctx.services.genre_service;

    genres.add_event(&admin, genre.id, event.id).await.unwrap();
    assert_matches!(
        genres.add_event(&admin, genre.id, event.id).await,
        Err(EventHubError::Conflict(_))
    );
    assert_eq!(genres.events_of(genre.id).await.unwrap().len(), 1);

    assert_matches!(genres.create(&admin, "Shag").await, Err(EventHubError::Conflict(_)));
    assert_matches!(
        genres.rename(&admin, other.id, "Shag").await,
        Err(EventHubError::Conflict(_))
    );
    // Names are case-sensitive
    assert!(genres.create(&admin, "shag").await.is_ok());
}

#[tokio::test]
async fn test_rename_and_lookup() {
    let ctx = setup_integration_test();
    let admin = ctx.admin().await;
    let genre = ctx.create_genre("Solo Jazz").await;
    let genres = &ctx.services.genre_service;

    assert_eq!(genres.find_by_name("Solo Jazz").await, Some(genre.clone()));
    let renamed = genres.rename(&admin, genre.id, "Authentic Jazz").await.unwrap();
    assert_eq!(renamed.id, genre.id);
    assert!(genres.find_by_name("Solo Jazz").await.is_none());
    assert_eq!(genres.find_by_name("Authentic Jazz").await, Some(renamed));
    assert_eq!(genres.list().await.len(), 1);
}

#[tokio::test]
async fn test_names_are_stored_as_given_apart_from_outer_whitespace() {
    let ctx = setup_integration_test();
    let admin = ctx.admin().await;
    let genres = &ctx.services.genre_service;

    let spaced = genres.create(&admin, "Jazz  Funk").await.unwrap();
    assert_eq!(spaced.name, "Jazz  Funk");
    assert_eq!(genres.find_by_name("Jazz  Funk").await, Some(spaced.clone()));
    assert!(genres.find_by_name("Jazz Funk").await.is_none());

    let padded = genres.create(&admin, "  Blues ").await.unwrap();
    assert_eq!(padded.name, "Blues");
    assert_eq!(genres.find_by_name("Blues").await, Some(padded));

    assert_matches!(
        genres.create(&admin, " Jazz  Funk ").await,
        Err(EventHubError::Conflict(_))
    );
}

#[tokio::test]
async fn test_genre_management_is_admin_only() {
    let ctx = setup_integration_test();
    let user = ctx.create_user("curious").await;
    let genre = ctx.create_genre("Tap").await;
    let event = ctx.create_event("Tap jam").await;
    let genres = &ctx.services.genre_service;

    assert_matches!(genres.create(&user, "Boogie").await, Err(EventHubError::Forbidden { .. }));
    assert_matches!(
        genres.create(&Actor::Anonymous, "Boogie").await,
        Err(EventHubError::Unauthorized(_))
    );
    assert_matches!(
        genres.add_event(&user, genre.id, event.id).await,
        Err(EventHubError::Forbidden { .. })
    );
    assert_matches!(genres.delete(&user, genre.id).await, Err(EventHubError::Forbidden { .. }));
    assert!(genres.find(genre.id).await.is_some());
}

#[tokio::test]
async fn test_missing_links_and_entities() {
    let ctx = setup_integration_test();
    let admin = ctx.admin().await;
    let genre = ctx.create_genre("Swing").await;
    let event = ctx.create_event("Untagged").await;
    let genres = &ctx.services.genre_service;

    assert_matches!(
        genres.remove_event(&admin, genre.id, event.id).await,
        Err(EventHubError::NotFound { entity: EntityKind::Genre, .. })
    );
    assert_matches!(
        genres.add_event(&admin, genre.id, 77).await,
        Err(EventHubError::NotFound { entity: EntityKind::Event, .. })
    );
    assert_matches!(
        genres.delete(&admin, 77).await,
        Err(EventHubError::NotFound { entity: EntityKind::Genre, .. })
    );
    assert_matches!(genres.create(&admin, "   ").await, Err(EventHubError::Invalid { .. }));
}

#[tokio::test]
async fn test_upcoming_events_by_genres() {
    let ctx = setup_integration_test();
    let admin = ctx.admin().await;
    let lindy = ctx.create_genre("Lindy").await;
    let blues = ctx.create_genre("Blues").await;
    let events = &ctx.services.event_service;
    let genres = &ctx.services.genre_service;

    let later = events
        .save(CreateEventRequest {
            title: "Later".to_string(),
            event_date: ctx.now() + Duration::days(30),
            club_id: None,
            finished: false,
        })
        .await
        .unwrap();
    let sooner = events
        .save(CreateEventRequest {
            title: "Sooner".to_string(),
            event_date: ctx.now() + Duration::days(2),
            club_id: None,
            finished: false,
        })
        .await
        .unwrap();
    let past = events
        .save(CreateEventRequest {
            title: "Past".to_string(),
            event_date: ctx.now() - Duration::days(2),
            club_id: None,
            finished: false,
        })
        .await
        .unwrap();
    let finished = events
        .save(CreateEventRequest {
            title: "Finished".to_string(),
            event_date: ctx.now() + Duration::days(3),
            club_id: None,
            finished: true,
        })
        .await
        .unwrap();

    genres.add_event(&admin, lindy.id, later.id).await.unwrap();
    genres.add_event(&admin, blues.id, sooner.id).await.unwrap();
    genres.add_event(&admin, lindy.id, past.id).await.unwrap();
    genres.add_event(&admin, lindy.id, finished.id).await.unwrap();

    let upcoming: Vec<_> = events
        .upcoming_by_genres(&[lindy.id, blues.id], ctx.now())
        .await
        .into_iter()
        .map(|event| event.title)
        .collect();
    assert_eq!(upcoming, vec!["Sooner", "Later"]);

    let lindy_only = events.upcoming_by_genres(&[lindy.id], ctx.now()).await;
    assert_eq!(lindy_only, vec![later]);
}
