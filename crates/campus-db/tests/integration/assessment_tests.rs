use campus_core::AppError;
use campus_core::assessment::{AssignmentUpdate, NewAssignment, NewSubmission, SubmissionUpdate};
use campus_core::content::{NewLesson, NewModule};
use campus_core::course::NewCourse;
use campus_core::user::{NewUser, Role};
use campus_db::{
    AssignmentRepository, CategoryRepository, CourseRepository, LessonRepository,
    ModuleRepository, SubmissionRepository, UserRepository,
};
use sqlx::PgPool;

use crate::integration::common::setup_test_db;

/// Builds the chain teacher -> course -> module -> lesson plus one student;
/// returns (lesson_id, student_id).
async fn seed_lesson_and_student(pool: &PgPool) -> (i64, i64) {
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
    let module = ModuleRepository::new(pool.clone())
        .create(&NewModule {
            title: "Ownership".into(),
            order_index: 1,
            course_id: course.id,
        })
        .await
        .unwrap();
    let lesson = LessonRepository::new(pool.clone())
        .create(&NewLesson {
            title: "Moves and borrows".into(),
            content: "Every value has a single owner.".into(),
            module_id: module.id,
        })
        .await
        .unwrap();
    (lesson.id, student.id)
}

fn new_assignment(lesson_id: i64) -> NewAssignment {
    NewAssignment {
        title: "Borrow checker exercise".into(),
        description: Some("Fix the lifetimes".into()),
        due_date: None,
        max_score: Some(100),
        lesson_id,
    }
}

#[tokio::test]
async fn create_assignment_under_lesson() {
    let (pool, _container) = setup_test_db().await;
    let (lesson_id, _student_id) = seed_lesson_and_student(&pool).await;
    let repo = AssignmentRepository::new(pool);

    let assignment = repo.create(&new_assignment(lesson_id)).await.unwrap();

    let fetched = repo
        .get(assignment.id)
        .await
        .unwrap()
        .expect("assignment exists");
    assert_eq!(fetched.title, "Borrow checker exercise");
    assert_eq!(fetched.max_score, Some(100));
    assert_eq!(fetched.lesson.id, lesson_id);
    assert_eq!(fetched.lesson.title, "Moves and borrows");
}

#[tokio::test]
async fn assignment_for_missing_lesson_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let repo = AssignmentRepository::new(pool);

    let err = repo.create(&new_assignment(404)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_assignment_max_score() {
    let (pool, _container) = setup_test_db().await;
    let (lesson_id, _student_id) = seed_lesson_and_student(&pool).await;
    let repo = AssignmentRepository::new(pool);

    let assignment = repo.create(&new_assignment(lesson_id)).await.unwrap();
    let updated = repo
        .update(
            assignment.id,
            &AssignmentUpdate {
                max_score: Some(50),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.max_score, Some(50));
    assert_eq!(updated.title, "Borrow checker exercise");
}

#[tokio::test]
async fn submit_and_grade_assignment() {
    let (pool, _container) = setup_test_db().await;
    let (lesson_id, student_id) = seed_lesson_and_student(&pool).await;
    let assignment = AssignmentRepository::new(pool.clone())
        .create(&new_assignment(lesson_id))
        .await
        .unwrap();
    let repo = SubmissionRepository::new(pool);

    let submission = repo
        .create(&NewSubmission {
            content: "fn main() {}".into(),
            score: None,
            feedback: None,
            assignment_id: assignment.id,
            student_id,
        })
        .await
        .unwrap();
    assert!(submission.score.is_none());
    assert_eq!(submission.student.name, "Bob Keller");

    let graded = repo
        .update(
            submission.id,
            &SubmissionUpdate {
                score: Some(95),
                feedback: Some("Nice work".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(graded.score, Some(95));
    assert_eq!(graded.feedback.as_deref(), Some("Nice work"));
}

#[tokio::test]
async fn second_submission_for_same_assignment_is_a_conflict() {
    let (pool, _container) = setup_test_db().await;
    let (lesson_id, student_id) = seed_lesson_and_student(&pool).await;
    let assignment = AssignmentRepository::new(pool.clone())
        .create(&new_assignment(lesson_id))
        .await
        .unwrap();
    let repo = SubmissionRepository::new(pool);

    let new_submission = NewSubmission {
        content: "first try".into(),
        score: None,
        feedback: None,
        assignment_id: assignment.id,
        student_id,
    };
    repo.create(&new_submission).await.unwrap();
    let err = repo.create(&new_submission).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn submissions_are_filtered_by_assignment_and_student() {
    let (pool, _container) = setup_test_db().await;
    let (lesson_id, student_id) = seed_lesson_and_student(&pool).await;
    let assignments = AssignmentRepository::new(pool.clone());
    let first = assignments.create(&new_assignment(lesson_id)).await.unwrap();
    let second = assignments
        .create(&NewAssignment {
            title: "Lifetime quiz".into(),
            description: None,
            due_date: None,
            max_score: None,
            lesson_id,
        })
        .await
        .unwrap();
    let repo = SubmissionRepository::new(pool);

    for assignment_id in [first.id, second.id] {
        repo.create(&NewSubmission {
            content: "answer".into(),
            score: None,
            feedback: None,
            assignment_id,
            student_id,
        })
        .await
        .unwrap();
    }

    let for_first = repo.list_by_assignment(first.id).await.unwrap();
    assert_eq!(for_first.len(), 1);
    assert_eq!(for_first[0].assignment.id, first.id);

    let for_student = repo.list_by_student(student_id).await.unwrap();
    assert_eq!(for_student.len(), 2);
}
