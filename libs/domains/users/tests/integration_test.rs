//! Integration tests for the MongoDB user repository
//!
//! Run against a real MongoDB via testcontainers:
//! - Documents round-trip through the `users` collection
//! - Unique indexes reject duplicate usernames and emails
//! - Delete returns the removed document
//!
//! Ignored by default since they need Docker:
//! `cargo test -p domain_users --test integration_test -- --ignored`

use domain_users::*;
use ::mongodb::bson::oid::ObjectId;
use test_utils::{TestDataBuilder, TestMongo, assertions::*};

async fn repository(mongo: &TestMongo) -> MongoUserRepository {
    let repo = MongoUserRepository::new(mongo.database());
    repo.create_indexes().await.unwrap();
    repo
}

fn new_user(builder: &TestDataBuilder, suffix: &str) -> NewUser {
    NewUser {
        username: builder.username(suffix),
        email: builder.email(suffix),
        password: "$2b$04$0123456789012345678901u3n0CUDWKu.1Q6PsQ7SD8T6Q5DwEhVlC".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_user() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let builder = TestDataBuilder::from_test_name("mongo_create_and_find");

    let created = repo.create(new_user(&builder, "main")).await.unwrap();
    assert_object_id(&created.id.to_hex(), "created id");

    let by_id = assert_some(repo.find_by_id(created.id).await.unwrap(), "by id");
    assert_eq!(by_id, created);

    let by_username = repo
        .find_by_username(&builder.username("main"))
        .await
        .unwrap();
    assert_eq!(by_username.map(|u| u.id), Some(created.id));

    let by_email = repo.find_by_email(&builder.email("main")).await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(created.id));

    assert!(repo.find_by_id(ObjectId::new()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_indexes_reject_duplicates() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let builder = TestDataBuilder::from_test_name("mongo_unique");

    repo.create(new_user(&builder, "a")).await.unwrap();

    let same_username = NewUser {
        email: builder.email("b"),
        ..new_user(&builder, "a")
    };
    let err = repo.create(same_username).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(UniqueField::Username)));

    let same_email = NewUser {
        username: builder.username("b"),
        ..new_user(&builder, "a")
    };
    let err = repo.create(same_email).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(UniqueField::Email)));

    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_indexes_is_idempotent() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    repo.create_indexes().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_delete() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let builder = TestDataBuilder::from_test_name("mongo_update_delete");

    let mut user = repo.create(new_user(&builder, "main")).await.unwrap();
    let other = repo.create(new_user(&builder, "other")).await.unwrap();

    user.username = builder.username("renamed");
    assert!(repo.update(user.clone()).await.unwrap());
    let stored = assert_some(repo.find_by_id(user.id).await.unwrap(), "updated");
    assert_eq!(stored.username, builder.username("renamed"));
    assert_eq!(stored.password, user.password);

    user.email = other.email.clone();
    let err = repo.update(user.clone()).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(UniqueField::Email)));

    let ghost = new_user(&builder, "ghost").into_user(ObjectId::new());
    assert!(!repo.update(ghost).await.unwrap());

    let removed = assert_some(repo.delete(other.id).await.unwrap(), "removed");
    assert_eq!(removed.id, other.id);
    assert!(repo.delete(other.id).await.unwrap().is_none());

    let remaining: Vec<_> = repo.list().await.unwrap().into_iter().map(|u| u.id).collect();
    assert_eq!(remaining, vec![user.id]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_register_and_authenticate_against_mongo() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let service = UserService::with_hasher(repo, PasswordHasher::new(4));

    service
        .register(RegisterRequest {
            username: Some("ana".into()),
            email: Some("ana@x.com".into()),
            password: Some("p1".into()),
            confirm_password: Some("p1".into()),
        })
        .await
        .unwrap();

    let stored = service.list_users().await.unwrap();
    assert_bcrypt_hash(&stored[0].password, "stored password");

    let username = service
        .authenticate(LoginRequest {
            username: Some("ana".into()),
            password: Some("p1".into()),
        })
        .await
        .unwrap();
    assert_eq!(username, "ana");
}
