use claim::{assert_none, assert_ok};
use subscriber_store::domain::SubscriberUpdate;

use crate::helpers::{email, fake_email, timestamp, TestApp};

#[tokio::test]
async fn upsert_inserts_unseen_email() {
    let test_app = TestApp::spawn_app().await;
    let email = fake_email();
    let update = SubscriberUpdate::confirmed(email.clone(), timestamp(1_700_000_000));

    assert_ok!(test_app.store().upsert_subscriber(&update).await);

    let subscriber = test_app
        .store()
        .fetch_subscriber(&email)
        .await
        .unwrap()
        .expect("Upsert did not insert the subscriber.");

    assert_eq!(subscriber.confirmed_at, Some(timestamp(1_700_000_000)));
    assert!(!subscriber.opted_out);
    assert!(subscriber.status().is_confirmed());
}

#[tokio::test]
async fn upsert_updates_existing_row_in_place() {
    let test_app = TestApp::spawn_app().await;
    let email = fake_email();

    test_app.store().create_subscriber(&email).await.unwrap();
    let created = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    let update = SubscriberUpdate::confirmed(email.clone(), timestamp(1_700_000_000));
    test_app.store().upsert_subscriber(&update).await.unwrap();

    let updated = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.confirmed_at, Some(timestamp(1_700_000_000)));
    assert_eq!(test_app.count_subscribers(&email).await, 1);
}

#[tokio::test]
async fn upsert_twice_with_same_values_is_idempotent() {
    let test_app = TestApp::spawn_app().await;
    let email = fake_email();
    let update = SubscriberUpdate::new(email.clone(), Some(timestamp(1_650_000_000)), true);

    assert_ok!(test_app.store().upsert_subscriber(&update).await);
    let first = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert_ok!(test_app.store().upsert_subscriber(&update).await);
    let second = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(test_app.count_subscribers(&email).await, 1);
}

#[tokio::test]
async fn upsert_overwrites_both_fields() {
    let test_app = TestApp::spawn_app().await;
    let email = fake_email();

    let opted_out = SubscriberUpdate::opted_out(email.clone(), Some(timestamp(1_700_000_000)));
    test_app.store().upsert_subscriber(&opted_out).await.unwrap();

    // An explicit upsert is the one path allowed to bring a subscriber back
    let resubscribed = SubscriberUpdate::new(email.clone(), None, false);
    test_app.store().upsert_subscriber(&resubscribed).await.unwrap();

    let subscriber = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert_none!(subscriber.confirmed_at);
    assert!(!subscriber.opted_out);
    assert!(subscriber.status().is_pending());
}

#[tokio::test]
async fn subscriber_lifecycle_from_signup_to_opt_out() {
    let test_app = TestApp::spawn_app().await;
    let email = email("a@x.com");
    let confirmed_at = timestamp(1_700_000_000);

    test_app.store().create_subscriber(&email).await.unwrap();
    let pending = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert_eq!(pending.email, email);
    assert_none!(pending.confirmed_at);
    assert!(!pending.opted_out);

    let confirmation = SubscriberUpdate::confirmed(email.clone(), confirmed_at);
    test_app.store().upsert_subscriber(&confirmation).await.unwrap();
    let confirmed = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert_eq!(confirmed.confirmed_at, Some(confirmed_at));
    assert!(!confirmed.opted_out);

    test_app.store().opt_out_subscriber(&email).await.unwrap();
    let unsubscribed = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert!(unsubscribed.opted_out);
    assert_eq!(unsubscribed.confirmed_at, Some(confirmed_at));
    assert!(unsubscribed.status().is_unsubscribed());
}
