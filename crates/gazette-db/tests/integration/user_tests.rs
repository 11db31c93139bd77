use gazette_core::AppError;

use crate::integration::common::setup_test_db;

#[tokio::test]
async fn create_and_login() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    let created = repo.create("editor@example.com", "s3cret-pass").await.unwrap();
    assert_eq!(created.email, "editor@example.com");
    assert!(created.last_login.is_none());

    let user = repo
        .login("editor@example.com", "s3cret-pass")
        .await
        .unwrap()
        .expect("credentials should match");
    assert_eq!(user.email, "editor@example.com");
    assert!(user.last_login.is_some());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_return_none() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();
    repo.create("editor@example.com", "s3cret-pass").await.unwrap();

    assert!(repo.login("editor@example.com", "nope").await.unwrap().is_none());
    assert!(repo.login("ghost@example.com", "s3cret-pass").await.unwrap().is_none());

    let user = repo.find("editor@example.com").await.unwrap().unwrap();
    assert!(user.last_login.is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();
    repo.create("editor@example.com", "first").await.unwrap();

    let err = repo.create("editor@example.com", "second").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn empty_credentials_are_rejected() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    let err = repo.create("", "s3cret-pass").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    let err = repo.create("editor@example.com", "").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(repo.list().await.unwrap().is_empty());
}
