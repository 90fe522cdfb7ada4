//! Core Flow Integration Tests
//!
//! Purpose: Verify the complete flow from a user gesture to the recomposed feed
//! Dependencies: none (in-memory store)
//!
//! Test Coverage:
//! 1. Sign-up, log-in and the session pointer
//! 2. Post creation, editing, deletion and likes
//! 3. Comments, including the silent empty-comment path
//! 4. Feed composition from the follow graph, hashtags and search
//! 5. Live feed views rebuilding on every broadcast
//!
//! Run: cargo test --test core_flow_test

mod test_harness;

use content_service::{extract_hashtags, ContentError, SortMode};
use feed_service::FeedQuery;
use kv_store::{KeyValueStore, StoreKey};
use test_harness::TestEnvironment;

#[test]
fn test_created_post_is_searchable_with_empty_counters() {
    let env = TestEnvironment::new();
    let ada = env.register("Ada");
    env.login(&ada);
    let me = env.me();

    let post = env
        .app
        .posts
        .create_post(me.as_ref(), "hello world", Some("https://example.com/pic.png"))
        .unwrap();

    let all = env.app.posts.search_posts("").unwrap();
    let matching: Vec<_> = all.iter().filter(|p| p.id == post.id).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].likes, 0);
    assert!(matching[0].liked_by.is_empty());
    assert!(matching[0].comments.is_empty());
    assert_eq!(matching[0].author, "Ada");
    assert_eq!(env.broadcasts(), 1);
}

#[test]
fn test_hashtag_extracted_from_stored_post() {
    let env = TestEnvironment::new();
    let ada = env.register("Ada");
    env.login(&ada);

    assert!(env.app.posts.all_posts().unwrap().is_empty());
    env.app
        .posts
        .create_post(env.me().as_ref(), "hello #test", None)
        .unwrap();

    let stored = &env.app.posts.all_posts().unwrap()[0];
    assert_eq!(extract_hashtags(&stored.text), vec!["test"]);
}

#[test]
fn test_double_like_restores_prior_state() {
    let env = TestEnvironment::new();
    let ada = env.register("Ada");
    let bob = env.register("Bob");

    let post = env.app.posts.create_post(Some(&ada), "like me", None).unwrap();
    env.app.posts.toggle_like(Some(&ada), &post.id).unwrap();
    let before = env.app.posts.get_post(&post.id).unwrap().unwrap();

    env.app.posts.toggle_like(Some(&bob), &post.id).unwrap();
    let liked = env.app.posts.get_post(&post.id).unwrap().unwrap();
    assert_eq!(liked.likes, 2);
    env.app.posts.toggle_like(Some(&bob), &post.id).unwrap();

    let after = env.app.posts.get_post(&post.id).unwrap().unwrap();
    assert_eq!(after.liked_by, before.liked_by);
    assert_eq!(after.likes, before.likes);
}

#[test]
fn test_non_author_delete_leaves_store_untouched() {
    let env = TestEnvironment::new();
    let ada = env.register("Ada");
    let bob = env.register("Bob");
    let post = env.app.posts.create_post(Some(&ada), "mine", None).unwrap();

    let before = env.app.store.get_raw(StoreKey::Posts).unwrap();
    let broadcasts = env.broadcasts();

    let err = env.app.posts.delete_post(Some(&bob), &post.id).unwrap_err();
    assert!(matches!(err, ContentError::Forbidden(_)));

    let after = env.app.store.get_raw(StoreKey::Posts).unwrap();
    assert_eq!(before, after);
    assert_eq!(env.broadcasts(), broadcasts);
}

#[test]
fn test_global_feed_when_nobody_follows_anyone() {
    let env = TestEnvironment::new();
    let a = env.register("Alice");
    let b = env.register("Bob");

    env.login(&a);
    let post = env.app.posts.create_post(env.me().as_ref(), "from A", None).unwrap();

    let feed_a = env.app.feed.compose(&FeedQuery::default()).unwrap();
    assert!(feed_a.iter().any(|p| p.id == post.id));

    env.login(&b);
    let feed_b = env.app.feed.compose(&FeedQuery::default()).unwrap();
    assert!(feed_b.iter().any(|p| p.id == post.id));
}

#[test]
fn test_follow_graph_restricts_feed() {
    let env = TestEnvironment::new();
    let a = env.register("Alice");
    let b = env.register("Bob");
    let c = env.register("Carol");

    let pa = env.app.posts.create_post(Some(&a), "by A", None).unwrap();
    let pb = env.app.posts.create_post(Some(&b), "by B", None).unwrap();
    env.app.posts.create_post(Some(&c), "by C", None).unwrap();

    env.login(&a);
    assert!(env.app.users.follow(&a.id, &b.id).unwrap());
    assert_eq!(env.me().unwrap().following, vec![b.id.clone()]);
    assert_eq!(env.reload(&b).followers, vec![a.id.clone()]);

    let feed = env.app.feed.compose(&FeedQuery::default()).unwrap();
    let ids: Vec<_> = feed.iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec![pb.id.clone(), pa.id.clone()]);

    // Unfollowing everyone falls back to the global feed
    env.app.users.unfollow(&a.id, &b.id).unwrap();
    assert_eq!(env.app.feed.compose(&FeedQuery::default()).unwrap().len(), 3);

    let profile = env.app.feed.profile_posts(&b.id).unwrap();
    assert_eq!(profile.len(), 1);
    assert_eq!(profile[0].id, pb.id);
}

#[test]
fn test_empty_comment_is_silent() {
    let env = TestEnvironment::new();
    let ada = env.register("Ada");
    env.login(&ada);
    let me = env.me();
    let post = env.app.posts.create_post(me.as_ref(), "post", None).unwrap();
    let broadcasts = env.broadcasts();

    let result = env.app.posts.add_comment(me.as_ref(), &post.id, "   ").unwrap();
    assert!(result.is_none());
    assert!(env.app.posts.get_post(&post.id).unwrap().unwrap().comments.is_empty());
    assert_eq!(env.broadcasts(), broadcasts);
}

#[test]
fn test_comment_lifecycle() {
    let env = TestEnvironment::new();
    let ada = env.register("Ada");
    let bob = env.register("Bob");
    let post = env.app.posts.create_post(Some(&ada), "post", None).unwrap();

    let comment = env
        .app
        .posts
        .add_comment(Some(&bob), &post.id, "first!")
        .unwrap()
        .unwrap();
    assert!(matches!(
        env.app.posts.delete_comment(Some(&ada), &post.id, &comment.id),
        Err(ContentError::Forbidden(_))
    ));

    env.app
        .posts
        .delete_comment(Some(&bob), &post.id, &comment.id)
        .unwrap();
    // Deleting again is a silent no-op
    let broadcasts = env.broadcasts();
    env.app
        .posts
        .delete_comment(Some(&bob), &post.id, &comment.id)
        .unwrap();
    assert_eq!(env.broadcasts(), broadcasts);
}

#[test]
fn test_unauthenticated_mutations_rejected() {
    let env = TestEnvironment::new();
    let ada = env.register("Ada");
    let post = env.app.posts.create_post(Some(&ada), "post", None).unwrap();
    env.logout();
    let me = env.me();
    assert!(me.is_none());

    assert!(matches!(
        env.app.posts.create_post(me.as_ref(), "x", None),
        Err(ContentError::Unauthenticated)
    ));
    assert!(matches!(
        env.app.posts.toggle_like(me.as_ref(), &post.id),
        Err(ContentError::Unauthenticated)
    ));
    assert!(matches!(
        env.app.posts.add_comment(me.as_ref(), &post.id, "   "),
        Err(ContentError::Unauthenticated)
    ));
    assert_eq!(env.broadcasts(), 1);
}

#[test]
fn test_live_view_follows_mutations_and_queries() {
    let env = TestEnvironment::new();
    let ada = env.register("Ada");
    let bob = env.register("Bob");
    env.login(&ada);

    let view = env.app.open_feed_view(env.app.default_query()).unwrap();
    assert!(view.snapshot().is_empty());

    let p1 = env.app.posts.create_post(Some(&ada), "morning #coffee", None).unwrap();
    let p2 = env.app.posts.create_post(Some(&bob), "lunch", None).unwrap();
    env.app.posts.toggle_like(Some(&bob), &p1.id).unwrap();
    assert_eq!(view.post_ids(), vec![p2.id.clone(), p1.id.clone()]);

    let card = &view.snapshot()[1];
    assert!(card.is_author);
    assert!(!card.is_liked);
    assert_eq!(card.post.likes, 1);
    assert_eq!(card.age, "just now");

    view.set_query(FeedQuery::from_query_string("?sort=mostLiked"))
        .unwrap();
    assert_eq!(view.query().sort, SortMode::MostLiked);
    assert_eq!(view.post_ids(), vec![p1.id.clone(), p2.id.clone()]);

    view.set_query(FeedQuery::from_query_string("?hashtag=coffee"))
        .unwrap();
    assert_eq!(view.post_ids(), vec![p1.id.clone()]);

    // Deleting the post empties the hashtag view
    env.app.posts.delete_post(env.me().as_ref(), &p1.id).unwrap();
    assert!(view.snapshot().is_empty());
}

#[test]
fn test_trending_over_app() {
    let env = TestEnvironment::new();
    let ada = env.register("Ada");
    for text in ["#rust #wasm", "#rust", "#go", "#a #b #c"] {
        env.app.posts.create_post(Some(&ada), text, None).unwrap();
    }

    let trending = env.app.trending().unwrap();
    assert_eq!(trending.len(), 5);
    assert_eq!(trending[0].tag, "rust");
    assert_eq!(trending[0].count, 2);
}

#[test]
fn test_profile_update_reaches_session_but_not_old_posts() {
    let env = TestEnvironment::new();
    let ada = env.register("Ada");
    env.login(&ada);
    let post = env.app.posts.create_post(env.me().as_ref(), "before rename", None).unwrap();

    let update = identity_service::ProfileUpdate {
        name: Some("Ada Lovelace".into()),
        ..Default::default()
    };
    env.app.users.update_user_profile(&ada.id, &update).unwrap();
    assert_eq!(env.me().unwrap().name, "Ada Lovelace");

    // Author names are captured when the post is written
    assert_eq!(env.app.posts.get_post(&post.id).unwrap().unwrap().author, "Ada");
    let next = env.app.posts.create_post(env.me().as_ref(), "after rename", None).unwrap();
    assert_eq!(next.author, "Ada Lovelace");
}
