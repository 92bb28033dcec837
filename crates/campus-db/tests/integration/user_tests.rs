use campus_core::AppError;
use campus_core::user::{NewProfile, NewUser, ProfileUpdate, Role, UserUpdate};
use campus_db::{ProfileRepository, UserRepository};

use crate::integration::common::setup_test_db;

fn new_user(name: &str, email: &str, role: Role) -> NewUser {
    NewUser {
        name: name.into(),
        email: email.into(),
        role,
    }
}

#[tokio::test]
async fn create_user_and_fetch_by_id() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    let created = repo
        .create(&new_user("Alice Morgan", "alice@campus.io", Role::Teacher))
        .await
        .unwrap();

    let fetched = repo.get(created.id).await.unwrap().expect("user exists");
    assert_eq!(fetched.name, "Alice Morgan");
    assert_eq!(fetched.email, "alice@campus.io");
    assert_eq!(fetched.role, Role::Teacher);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    repo.create(&new_user("Alice", "alice@campus.io", Role::Teacher))
        .await
        .unwrap();
    let err = repo
        .create(&new_user("Other Alice", "alice@campus.io", Role::Student))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn update_applies_only_given_fields() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    let user = repo
        .create(&new_user("Bob", "bob@campus.io", Role::Student))
        .await
        .unwrap();

    let updated = repo
        .update(
            user.id,
            &UserUpdate {
                name: Some("Bob Keller".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Bob Keller");
    assert_eq!(updated.email, "bob@campus.io");
    assert_eq!(updated.role, Role::Student);
}

#[tokio::test]
async fn update_with_identical_values_is_a_noop() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    let user = repo
        .create(&new_user("Bob", "bob@campus.io", Role::Student))
        .await
        .unwrap();

    let unchanged = repo
        .update(
            user.id,
            &UserUpdate {
                name: Some("Bob".into()),
                email: Some("bob@campus.io".into()),
                role: Some(Role::Student),
            },
        )
        .await
        .unwrap();

    assert_eq!(unchanged.name, user.name);
    assert_eq!(unchanged.email, user.email);
}

#[tokio::test]
async fn update_to_taken_email_is_a_conflict() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    repo.create(&new_user("Alice", "alice@campus.io", Role::Teacher))
        .await
        .unwrap();
    let bob = repo
        .create(&new_user("Bob", "bob@campus.io", Role::Student))
        .await
        .unwrap();

    let err = repo
        .update(
            bob.id,
            &UserUpdate {
                email: Some("alice@campus.io".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn delete_user_removes_row() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    let user = repo
        .create(&new_user("Carol", "carol@campus.io", Role::Student))
        .await
        .unwrap();

    repo.delete(user.id).await.unwrap();
    assert!(repo.get(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_user_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    let err = repo.delete(4242).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn profile_roundtrip_for_user() {
    let (pool, _container) = setup_test_db().await;
    let users = UserRepository::new(pool.clone());
    let profiles = ProfileRepository::new(pool);

    let user = users
        .create(&new_user("Alice", "alice@campus.io", Role::Teacher))
        .await
        .unwrap();

    let profile = profiles
        .create(&NewProfile {
            user_id: user.id,
            bio: Some("Systems programmer".into()),
            avatar_url: None,
            contact_info: Some("@alice".into()),
        })
        .await
        .unwrap();

    assert_eq!(profile.user.id, user.id);
    assert_eq!(profile.bio.as_deref(), Some("Systems programmer"));

    let updated = profiles
        .update(
            profile.id,
            &ProfileUpdate {
                bio: Some("Teaches Rust".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.bio.as_deref(), Some("Teaches Rust"));
    assert_eq!(updated.contact_info.as_deref(), Some("@alice"));
}

#[tokio::test]
async fn second_profile_for_same_user_is_a_conflict() {
    let (pool, _container) = setup_test_db().await;
    let users = UserRepository::new(pool.clone());
    let profiles = ProfileRepository::new(pool);

    let user = users
        .create(&new_user("Alice", "alice@campus.io", Role::Teacher))
        .await
        .unwrap();

    let new_profile = NewProfile {
        user_id: user.id,
        bio: None,
        avatar_url: None,
        contact_info: None,
    };
    profiles.create(&new_profile).await.unwrap();
    let err = profiles.create(&new_profile).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn profile_for_missing_user_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let profiles = ProfileRepository::new(pool);

    let err = profiles
        .create(&NewProfile {
            user_id: 99,
            bio: None,
            avatar_url: None,
            contact_info: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}
