use campus_core::AppError;
use campus_core::course::NewCourse;
use campus_core::review::{NewReview, ReviewUpdate};
use campus_core::user::{NewUser, Role};
use campus_db::{CategoryRepository, CourseRepository, ReviewRepository, UserRepository};
use sqlx::PgPool;

use crate::integration::common::setup_test_db;

/// Seeds a course with its teacher plus one student; returns
/// (course_id, student_id).
async fn seed_course_and_student(pool: &PgPool) -> (i64, i64) {
    let users = UserRepository::new(pool.clone());
    let teacher = users
        .create(&NewUser {
            name: "Nadia Petrova".into(),
            email: "nadia@campus.io".into(),
            role: Role::Teacher,
        })
        .await
        .unwrap();
    let student = users
        .create(&NewUser {
            name: "Omar Haddad".into(),
            email: "omar@campus.io".into(),
            role: Role::Student,
        })
        .await
        .unwrap();
    let category = CategoryRepository::new(pool.clone())
        .create("Design")
        .await
        .unwrap();
    let course = CourseRepository::new(pool.clone())
        .create(&NewCourse {
            title: "Typography".into(),
            description: None,
            teacher_id: teacher.id,
            category_id: category.id,
            start_date: None,
            duration: None,
        })
        .await
        .unwrap();
    (course.id, student.id)
}

#[tokio::test]
async fn create_review_and_fetch_with_summaries() {
    let (pool, _container) = setup_test_db().await;
    let (course_id, student_id) = seed_course_and_student(&pool).await;
    let repo = ReviewRepository::new(pool);

    let review = repo
        .create(&NewReview {
            course_id,
            student_id,
            rating: 4,
            comment: Some("Clear and well paced".into()),
        })
        .await
        .unwrap();

    let fetched = repo.get(review.id).await.unwrap().expect("review exists");
    assert_eq!(fetched.rating, 4);
    assert_eq!(fetched.comment.as_deref(), Some("Clear and well paced"));
    assert_eq!(fetched.course.title, "Typography");
    assert_eq!(fetched.student.name, "Omar Haddad");
}

#[tokio::test]
async fn review_for_missing_course_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let (_course_id, student_id) = seed_course_and_student(&pool).await;
    let repo = ReviewRepository::new(pool);

    let err = repo
        .create(&NewReview {
            course_id: 404,
            student_id,
            rating: 3,
            comment: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_review_rating_and_comment() {
    let (pool, _container) = setup_test_db().await;
    let (course_id, student_id) = seed_course_and_student(&pool).await;
    let repo = ReviewRepository::new(pool);
    let review = repo
        .create(&NewReview {
            course_id,
            student_id,
            rating: 2,
            comment: None,
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            review.id,
            &ReviewUpdate {
                rating: Some(5),
                comment: Some("Got much better toward the end".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.rating, 5);
    assert_eq!(
        updated.comment.as_deref(),
        Some("Got much better toward the end")
    );
    assert_eq!(updated.course.id, course_id);
}

#[tokio::test]
async fn update_missing_review_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let repo = ReviewRepository::new(pool);

    let err = repo
        .update(
            999,
            &ReviewUpdate {
                rating: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_review_removes_it_from_listing() {
    let (pool, _container) = setup_test_db().await;
    let (course_id, student_id) = seed_course_and_student(&pool).await;
    let repo = ReviewRepository::new(pool);
    let review = repo
        .create(&NewReview {
            course_id,
            student_id,
            rating: 3,
            comment: None,
        })
        .await
        .unwrap();

    repo.delete(review.id).await.unwrap();

    assert!(repo.get(review.id).await.unwrap().is_none());
    assert!(repo.list().await.unwrap().is_empty());
}
