//! Favorite ledger integration tests

use assert_matches::assert_matches;
use EventHub::models::FavoriteId;
use EventHub::services::Actor;
use EventHub::utils::{EntityKind, EventHubError};

use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_favorite_twice_is_conflict() {
    let ctx = setup_integration_test();
    let user = ctx.create_user("fan").await;
    let user_id = user.user_id().unwrap();
    let event = ctx.create_event("Herrang week").await;
    let favorites = &ctx.services.favorite_service;

    let favorite = favorites.add_favorite(&user, user_id, event.id).await.unwrap();
    assert_eq!(favorite.id, FavoriteId::new(user_id, event.id));
    assert_eq!(favorite.created_at, ctx.now());

    let listed = favorites.list_favorite_events(user_id).await.unwrap();
    assert!(listed.iter().any(|e| e.id == event.id));

    assert_matches!(
        favorites.add_favorite(&user, user_id, event.id).await,
        Err(EventHubError::Conflict(_))
    );
    assert_eq!(favorites.list_favorites(user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_anonymous_remove_leaves_ledger_unchanged() {
    let ctx = setup_integration_test();
    let user = ctx.create_user("keeper").await;
    let user_id = user.user_id().unwrap();
    let event = ctx.create_event("Swing out festival").await;
    let favorites = &ctx.services.favorite_service;
    favorites.add_favorite(&user, user_id, event.id).await.unwrap();
    let before = ctx.stats().await;

    let key = FavoriteId::new(user_id, event.id);
    assert_matches!(
        favorites.remove_favorite(&Actor::Anonymous, key).await,
        Err(EventHubError::Unauthorized(_))
    );

    assert!(favorites.exists(key).await);
    assert_eq!(ctx.stats().await, before);
}

#[tokio::test]
async fn test_users_manage_only_their_own_favorites() {
    let ctx = setup_integration_test();
    let owner = ctx.create_user("owner").await;
    let owner_id = owner.user_id().unwrap();
    let intruder = ctx.create_user("intruder").await;
    let admin = ctx.admin().await;
    let event = ctx.create_event("Camp Hollywood").await;
    let favorites = &ctx.services.favorite_service;

    assert_matches!(
        favorites.add_favorite(&intruder, owner_id, event.id).await,
        Err(EventHubError::Forbidden { .. })
    );

    favorites.add_favorite(&admin, owner_id, event.id).await.unwrap();
    let key = FavoriteId::new(owner_id, event.id);
    assert_matches!(
        favorites.remove_favorite(&intruder, key).await,
        Err(EventHubError::Forbidden { .. })
    );
    assert!(favorites.exists(key).await);

    favorites.remove_favorite(&owner, key).await.unwrap();
    assert!(!favorites.exists(key).await);
    assert!(favorites.find(key).await.is_none());
}

#[tokio::test]
async fn test_favorite_requires_existing_user_and_event() {
    let ctx = setup_integration_test();
    let user = ctx.create_user("lonely").await;
    let user_id = user.user_id().unwrap();
    let admin = ctx.admin().await;
    let event = ctx.create_event("Frankie 100").await;
    let favorites = &ctx.services.favorite_service;

    assert_matches!(
        favorites.add_favorite(&user, user_id, 404).await,
        Err(EventHubError::NotFound { entity: EntityKind::Event, .. })
    );
    assert_matches!(
        favorites.add_favorite(&admin, 404, event.id).await,
        Err(EventHubError::NotFound { entity: EntityKind::User, .. })
    );
    assert_matches!(
        favorites.remove_favorite(&user, FavoriteId::new(user_id, event.id)).await,
        Err(EventHubError::NotFound { entity: EntityKind::Favorite, .. })
    );
    assert_eq!(ctx.stats().await.favorites, 0);
}

#[tokio::test]
async fn test_favorite_events_keep_insertion_order() {
    let ctx = setup_integration_test();
    let user = ctx.create_user("collector").await;
    let user_id = user.user_id().unwrap();
    let favorites = &ctx.services.favorite_service;

    let first = ctx.create_event("First").await;
    let second = ctx.create_event("Second").await;
    let third = ctx.create_event("Third").await;

    for event in [&third, &first, &second] {
        favorites.add_favorite(&user, user_id, event.id).await.unwrap();
        ctx.advance_seconds(5);
    }

    let ids: Vec<_> = favorites
        .list_favorite_events(user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|event| event.id)
        .collect();
    assert_eq!(ids, vec![third.id, first.id, second.id]);
}
