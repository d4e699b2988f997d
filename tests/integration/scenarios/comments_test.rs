//! Comment scenario integration tests

use assert_matches::assert_matches;
use EventHub::models::CommentOrder;
use EventHub::services::Actor;
use EventHub::utils::{EntityKind, EventHubError};

use crate::helpers::comment_text;
use crate::integration::setup_integration_test;

fn texts(comments: &[EventHub::models::Comment]) -> Vec<&str> {
    comments.iter().map(|comment| comment.text()).collect()
}

#[tokio::test]
async fn test_comments_ordered_from_first_and_from_last() {
    let ctx = setup_integration_test();
    let first = ctx.create_user("first").await;
    let second = ctx.create_user("second").await;
    let event = ctx.create_event("Lindy night").await;
    let comments = &ctx.services.comment_service;

    comments.create(&first, event.id, "nice event").await.unwrap();
    ctx.advance_seconds(1);
    comments.create(&second, event.id, "wow").await.unwrap();

    let from_first = comments.list_by_event(event.id, CommentOrder::FromFirst).await.unwrap();
    assert_eq!(texts(&from_first), vec!["nice event", "wow"]);

    let from_last = comments.list_by_event(event.id, CommentOrder::FromLast).await.unwrap();
    assert_eq!(texts(&from_last), vec!["wow", "nice event"]);

    let creation = comments.list_by_event(event.id, CommentOrder::Creation).await.unwrap();
    assert_eq!(texts(&creation), vec!["nice event", "wow"]);
}

#[tokio::test]
async fn test_same_timestamp_ties_break_by_id() {
    let ctx = setup_integration_test();
    let user = ctx.create_user("tied").await;
    let event = ctx.create_event("Shag workshop").await;
    let comments = &ctx.services.comment_service;

    let a = comments.create(&user, event.id, "a").await.unwrap();
    let b = comments.create(&user, event.id, "b").await.unwrap();
    assert_eq!(a.created(), b.created());

    let from_first = comments.list_by_event(event.id, CommentOrder::FromFirst).await.unwrap();
    assert_eq!(from_first.iter().map(|c| c.id()).collect::<Vec<_>>(), vec![a.id(), b.id()]);

    let from_last = comments.list_by_event(event.id, CommentOrder::FromLast).await.unwrap();
    assert_eq!(from_last.iter().map(|c| c.id()).collect::<Vec<_>>(), vec![b.id(), a.id()]);
}

#[tokio::test]
async fn test_comment_lives_in_both_collections_until_removed() {
    let ctx = setup_integration_test();
    let user = ctx.create_user("writer").await;
    let user_id = user.user_id().unwrap();
    let event = ctx.create_event("Balboa weekend").await;
    let comments = &ctx.services.comment_service;

    let comment = comments.create(&user, event.id, &comment_text()).await.unwrap();
    assert_eq!(comment.user_id().unwrap(), user_id);
    assert_eq!(comment.event_id().unwrap(), event.id);

    let by_event = comments.list_by_event(event.id, CommentOrder::Creation).await.unwrap();
    let by_user = comments.list_by_user(user_id).await.unwrap();
    assert_eq!(by_event, vec![comment.clone()]);
    assert_eq!(by_user, vec![comment.clone()]);

    let removed = comments.remove(&user, event.id, comment.id()).await.unwrap();
    assert!(removed.is_detached());
    assert_matches!(removed.user_id(), Err(EventHubError::Detached { .. }));
    assert_matches!(removed.event_id(), Err(EventHubError::Detached { .. }));

    assert!(comments.list_by_event(event.id, CommentOrder::Creation).await.unwrap().is_empty());
    assert!(comments.list_by_user(user_id).await.unwrap().is_empty());
    assert!(comments.find(comment.id()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_rejections_leave_no_comment() {
    let ctx = setup_integration_test();
    let user = ctx.create_user("picky").await;
    let event = ctx.create_event("Blues social").await;
    let comments = &ctx.services.comment_service;

    assert_matches!(
        comments.create(&Actor::Anonymous, 999, "hello").await,
        Err(EventHubError::Unauthorized(_))
    );
    assert_matches!(
        comments.create(&user, 999, "hello").await,
        Err(EventHubError::NotFound { entity: EntityKind::Event, .. })
    );
    assert_matches!(
        comments.create(&user, event.id, "   \n\t").await,
        Err(EventHubError::Invalid { .. })
    );
    let too_long = "x".repeat(ctx.settings.comments.max_length + 1);
    assert_matches!(
        comments.create(&user, event.id, &too_long).await,
        Err(EventHubError::Invalid { .. })
    );

    assert_eq!(ctx.stats().await.comments, 0);
}

#[tokio::test]
async fn test_only_the_author_may_edit() {
    let ctx = setup_integration_test();
    let author = ctx.create_user("author").await;
    let other = ctx.create_user("other").await;
    let admin = ctx.admin().await;
    let event = ctx.create_event("Solo jazz jam").await;
    let comments = &ctx.services.comment_service;

    let comment = comments.create(&author, event.id, "original").await.unwrap();

    assert_matches!(
        comments.edit(&other, event.id, comment.id(), "hijacked").await,
        Err(EventHubError::Forbidden { .. })
    );
    assert_matches!(
        comments.edit(&admin, event.id, comment.id(), "moderated").await,
        Err(EventHubError::Forbidden { .. })
    );
    assert_matches!(
        comments.edit(&Actor::Anonymous, event.id, comment.id(), "anon").await,
        Err(EventHubError::Unauthorized(_))
    );

    let edited = comments.edit(&author, event.id, comment.id(), "edited").await.unwrap();
    assert_eq!(edited.text(), "edited");
    assert_eq!(edited.created(), comment.created());

    let stored = comments.find(comment.id()).await.unwrap().unwrap();
    assert_eq!(stored.text(), "edited");
}

#[tokio::test]
async fn test_admin_may_remove_any_comment() {
    let ctx = setup_integration_test();
    let author = ctx.create_user("chatty").await;
    let other = ctx.create_user("bystander").await;
    let admin = ctx.admin().await;
    let event = ctx.create_event("Collegiate shag night").await;
    let comments = &ctx.services.comment_service;

    let comment = comments.create(&author, event.id, "spam spam").await.unwrap();

    assert_matches!(
        comments.remove(&other, event.id, comment.id()).await,
        Err(EventHubError::Forbidden { .. })
    );
    assert!(comments.remove(&admin, event.id, comment.id()).await.is_ok());
    assert_eq!(ctx.stats().await.comments, 0);
}

#[tokio::test]
async fn test_comment_addressed_through_wrong_event_is_not_found() {
    let ctx = setup_integration_test();
    let author = ctx.create_user("misaddressed").await;
    let event = ctx.create_event("Charleston class").await;
    let elsewhere = ctx.create_event("Tap class").await;
    let comments = &ctx.services.comment_service;

    let comment = comments.create(&author, event.id, "see you").await.unwrap();

    assert_matches!(
        comments.edit(&author, elsewhere.id, comment.id(), "moved").await,
        Err(EventHubError::NotFound { entity: EntityKind::Comment, .. })
    );
    assert_matches!(
        comments.remove(&author, elsewhere.id, comment.id()).await,
        Err(EventHubError::NotFound { entity: EntityKind::Comment, .. })
    );
    assert_matches!(
        comments.remove(&author, event.id, comment.id() + 100).await,
        Err(EventHubError::NotFound { entity: EntityKind::Comment, .. })
    );
    assert_eq!(comments.find(comment.id()).await.unwrap().unwrap().text(), "see you");
}

#[tokio::test]
async fn test_listing_comments_of_missing_event_is_not_found() {
    let ctx = setup_integration_test();
    assert_matches!(
        ctx.services.comment_service.list_by_event(42, CommentOrder::FromFirst).await,
        Err(EventHubError::NotFound { entity: EntityKind::Event, .. })
    );
}
