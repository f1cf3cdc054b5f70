use crate::common;

use serial_test::serial;
use warden::domain::users::{NewUser, UniqueField, UpdateUser, UserRepository};
use warden::infrastructure::repositories::users::PostgresUserRepository;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        name: None,
        password_hash: "hash".to_string(),
    }
}

#[tokio::test]
#[serial]
async fn test_postgres_user_repo_create_and_find() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresUserRepository::new(pool.clone());

    let created = repo
        .create(new_user("repo_alice", "repo_alice@example.com"))
        .await
        .expect("Failed to create user");
    assert_eq!(created.id, 1);
    assert!(created.refresh_token_hash.is_none());

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "repo_alice");

    let by_username = repo.find_by_username("repo_alice").await.unwrap().unwrap();
    assert_eq!(by_username.id, created.id);

    assert!(repo.find_by_username("missing").await.unwrap().is_none());
    assert!(repo.find_by_id(9999).await.unwrap().is_none());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_user_repo_exists_by_field() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresUserRepository::new(pool.clone());
    let user = repo
        .create(new_user("taken", "taken@example.com"))
        .await
        .unwrap();

    assert!(
        repo.exists_by_field(UniqueField::Username, "taken", None)
            .await
            .unwrap()
    );
    assert!(
        repo.exists_by_field(UniqueField::Email, "taken@example.com", None)
            .await
            .unwrap()
    );
    assert!(
        !repo
            .exists_by_field(UniqueField::Username, "free", None)
            .await
            .unwrap()
    );
    // The owner's own value does not count
    assert!(
        !repo
            .exists_by_field(UniqueField::Username, "taken", Some(user.id))
            .await
            .unwrap()
    );

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_unique_constraint_backstops_race() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresUserRepository::new(pool.clone());
    repo.create(new_user("dup", "dup1@example.com")).await.unwrap();

    assert!(repo.create(new_user("dup", "dup2@example.com")).await.is_err());
    assert!(repo.create(new_user("dup2", "dup1@example.com")).await.is_err());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_refresh_token_hash_lifecycle() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresUserRepository::new(pool.clone());
    let user = repo
        .create(new_user("session", "session@example.com"))
        .await
        .unwrap();

    repo.update_refresh_token_hash(user.id, "first").await.unwrap();
    repo.update_refresh_token_hash(user.id, "second").await.unwrap();
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.refresh_token_hash.as_deref(), Some("second"));

    repo.clear_refresh_token_hash(user.id).await.unwrap();
    repo.clear_refresh_token_hash(user.id).await.unwrap();
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.refresh_token_hash.is_none());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_update_and_delete() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresUserRepository::new(pool.clone());
    let user = repo
        .create(new_user("before", "before@example.com"))
        .await
        .unwrap();

    let updated = repo
        .update(
            user.id,
            UpdateUser {
                name: Some(Some("After".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("After"));
    assert_eq!(updated.username, "before");

    let cleared = repo
        .update(
            user.id,
            UpdateUser {
                name: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(cleared.name.is_none());

    assert!(
        repo.update(9999, UpdateUser::default())
            .await
            .unwrap()
            .is_none()
    );

    assert!(repo.delete(user.id).await.unwrap());
    assert!(!repo.delete(user.id).await.unwrap());

    repo.ping().await.unwrap();

    common::cleanup_test_db(&pool).await;
}
