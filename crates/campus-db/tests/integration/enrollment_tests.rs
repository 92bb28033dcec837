use campus_core::AppError;
use campus_core::course::NewCourse;
use campus_core::enrollment::EnrollmentStatus;
use campus_core::user::{NewUser, Role};
use campus_db::{CategoryRepository, CourseRepository, EnrollmentRepository, UserRepository};
use sqlx::PgPool;

use crate::integration::common::setup_test_db;

/// Creates a teacher, a category, a course and one student; returns
/// (student_id, course_id).
async fn seed_course_and_student(pool: &PgPool) -> (i64, i64) {
    let users = UserRepository::new(pool.clone());
    let teacher = users
        .create(&NewUser {
            name: "Alice Morgan".into(),
            email: "alice@campus.io".into(),
            role: Role::Teacher,
        })
        .await
        .unwrap();
    let student = users
        .create(&NewUser {
            name: "Bob Keller".into(),
            email: "bob@campus.io".into(),
            role: Role::Student,
        })
        .await
        .unwrap();
    let category = CategoryRepository::new(pool.clone())
        .create("Programming")
        .await
        .unwrap();
    let course = CourseRepository::new(pool.clone())
        .create(&NewCourse {
            title: "Rust Fundamentals".into(),
            description: None,
            teacher_id: teacher.id,
            category_id: category.id,
            start_date: None,
            duration: None,
        })
        .await
        .unwrap();
    (student.id, course.id)
}

#[tokio::test]
async fn enroll_and_fetch_enrollment() {
    let (pool, _container) = setup_test_db().await;
    let (student_id, course_id) = seed_course_and_student(&pool).await;
    let repo = EnrollmentRepository::new(pool);

    let enrollment = repo.enroll(student_id, course_id).await.unwrap();
    assert_eq!(enrollment.user.id, student_id);
    assert_eq!(enrollment.course.id, course_id);
    assert_eq!(enrollment.status, EnrollmentStatus::Active);

    let fetched = repo
        .get(enrollment.id)
        .await
        .unwrap()
        .expect("enrollment exists");
    assert_eq!(fetched.course.title, "Rust Fundamentals");
}

#[tokio::test]
async fn double_enroll_is_a_conflict() {
    let (pool, _container) = setup_test_db().await;
    let (student_id, course_id) = seed_course_and_student(&pool).await;
    let repo = EnrollmentRepository::new(pool);

    repo.enroll(student_id, course_id).await.unwrap();
    let err = repo.enroll(student_id, course_id).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn unenroll_removes_enrollment() {
    let (pool, _container) = setup_test_db().await;
    let (student_id, course_id) = seed_course_and_student(&pool).await;
    let repo = EnrollmentRepository::new(pool);

    repo.enroll(student_id, course_id).await.unwrap();
    repo.unenroll(student_id, course_id).await.unwrap();

    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn unenroll_without_enrollment_is_a_conflict() {
    let (pool, _container) = setup_test_db().await;
    let (student_id, course_id) = seed_course_and_student(&pool).await;

    let err = EnrollmentRepository::new(pool)
        .unenroll(student_id, course_id)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn enrolled_courses_and_students_are_listed() {
    let (pool, _container) = setup_test_db().await;
    let (student_id, course_id) = seed_course_and_student(&pool).await;
    EnrollmentRepository::new(pool.clone())
        .enroll(student_id, course_id)
        .await
        .unwrap();
    let courses = CourseRepository::new(pool);

    let enrolled = courses.list_by_student(student_id).await.unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].id, course_id);

    let students = courses.enrolled_students(course_id).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].name, "Bob Keller");
}

#[tokio::test]
async fn enroll_in_missing_course_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let (student_id, _course_id) = seed_course_and_student(&pool).await;

    let err = EnrollmentRepository::new(pool)
        .enroll(student_id, 555)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}
