use claim::{assert_none, assert_ok};

use crate::helpers::{fake_email, timestamp, TestApp};
use subscriber_store::domain::SubscriberUpdate;

#[tokio::test]
async fn opt_out_marks_subscriber_as_opted_out() {
    let test_app = TestApp::spawn_app().await;
    let email = fake_email();

    test_app.store().create_subscriber(&email).await.unwrap();

    assert_ok!(test_app.store().opt_out_subscriber(&email).await);

    let subscriber = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert!(subscriber.opted_out);
    assert_none!(subscriber.confirmed_at);
    // Soft-delete: the row is still there
    assert_eq!(test_app.count_subscribers(&email).await, 1);
}

#[tokio::test]
async fn opt_out_keeps_confirmation_timestamp() {
    let test_app = TestApp::spawn_app().await;
    let email = fake_email();
    let update = SubscriberUpdate::confirmed(email.clone(), timestamp(1_700_000_000));

    test_app.store().upsert_subscriber(&update).await.unwrap();
    test_app.store().opt_out_subscriber(&email).await.unwrap();

    let subscriber = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert!(subscriber.opted_out);
    assert_eq!(subscriber.confirmed_at, Some(timestamp(1_700_000_000)));
}

#[tokio::test]
async fn opt_out_is_repeatable() {
    let test_app = TestApp::spawn_app().await;
    let email = fake_email();

    test_app.store().create_subscriber(&email).await.unwrap();

    assert_ok!(test_app.store().opt_out_subscriber(&email).await);
    assert_ok!(test_app.store().opt_out_subscriber(&email).await);

    let subscriber = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert!(subscriber.opted_out);
}

#[tokio::test]
async fn opt_out_of_unknown_email_is_a_no_op() {
    let test_app = TestApp::spawn_app().await;
    let email = fake_email();

    assert_ok!(test_app.store().opt_out_subscriber(&email).await);

    let subscriber = test_app.store().fetch_subscriber(&email).await.unwrap();

    assert_none!(subscriber);
    assert_eq!(test_app.count_subscribers(&email).await, 0);
}

#[tokio::test]
async fn opted_out_subscriber_stays_opted_out_until_explicit_upsert() {
    let test_app = TestApp::spawn_app().await;
    let email = fake_email();

    test_app.store().create_subscriber(&email).await.unwrap();
    test_app.store().opt_out_subscriber(&email).await.unwrap();

    // A late confirmation carrying the opted out flag keeps the subscriber unsubscribed
    let late_confirmation =
        SubscriberUpdate::opted_out(email.clone(), Some(timestamp(1_700_000_000)));
    test_app.store().upsert_subscriber(&late_confirmation).await.unwrap();

    let subscriber = test_app.store().fetch_subscriber(&email).await.unwrap().unwrap();

    assert!(subscriber.opted_out);
    assert_eq!(subscriber.confirmed_at, Some(timestamp(1_700_000_000)));
}
