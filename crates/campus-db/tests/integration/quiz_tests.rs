use std::collections::HashMap;

use campus_core::AppError;
use campus_core::content::NewModule;
use campus_core::course::NewCourse;
use campus_core::quiz::{
    AnswerOptionUpdate, NewAnswerOption, NewQuestion, NewQuiz, QuestionType,
};
use campus_core::user::{NewUser, Role};
use campus_db::{
    AnswerOptionRepository, CategoryRepository, CourseRepository, ModuleRepository,
    QuestionRepository, QuizRepository, QuizSubmissionRepository, UserRepository,
};
use sqlx::PgPool;

use crate::integration::common::setup_test_db;

/// Builds teacher -> course -> module plus one student; returns
/// (course_id, module_id, student_id).
async fn seed_module_and_student(pool: &PgPool) -> (i64, i64, i64) {
    let users = UserRepository::new(pool.clone());
    let teacher = users
        .create(&NewUser {
            name: "Elena Ruiz".into(),
            email: "elena@campus.io".into(),
            role: Role::Teacher,
        })
        .await
        .unwrap();
    let student = users
        .create(&NewUser {
            name: "Tom Adler".into(),
            email: "tom@campus.io".into(),
            role: Role::Student,
        })
        .await
        .unwrap();
    let category = CategoryRepository::new(pool.clone())
        .create("Databases")
        .await
        .unwrap();
    let course = CourseRepository::new(pool.clone())
        .create(&NewCourse {
            title: "SQL Basics".into(),
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
            title: "Joins".into(),
            order_index: 1,
            course_id: course.id,
        })
        .await
        .unwrap();
    (course.id, module.id, student.id)
}

async fn seed_quiz(pool: &PgPool, module_id: i64) -> i64 {
    QuizRepository::new(pool.clone())
        .create(&NewQuiz {
            title: "Join types".into(),
            time_limit: Some(15),
            module_id,
        })
        .await
        .unwrap()
        .id
}

fn new_question(quiz_id: i64, text: &str, correct: &str, wrong: &str) -> NewQuestion {
    NewQuestion {
        text: text.into(),
        question_type: QuestionType::SingleChoice,
        quiz_id,
        options: vec![
            NewAnswerOption {
                text: correct.into(),
                is_correct: true,
            },
            NewAnswerOption {
                text: wrong.into(),
                is_correct: false,
            },
        ],
    }
}

#[tokio::test]
async fn create_quiz_and_fetch_with_questions() {
    let (pool, _container) = setup_test_db().await;
    let (_course_id, module_id, _student_id) = seed_module_and_student(&pool).await;
    let quiz_id = seed_quiz(&pool, module_id).await;
    QuestionRepository::new(pool.clone())
        .create(&new_question(
            quiz_id,
            "Which join keeps unmatched left rows?",
            "LEFT JOIN",
            "INNER JOIN",
        ))
        .await
        .unwrap();

    let quiz = QuizRepository::new(pool)
        .get(quiz_id)
        .await
        .unwrap()
        .expect("quiz exists");

    assert_eq!(quiz.title, "Join types");
    assert_eq!(quiz.time_limit, Some(15));
    assert_eq!(quiz.module.title, "Joins");
    assert_eq!(quiz.questions.len(), 1);
    assert_eq!(quiz.questions[0].options.len(), 2);
    assert_eq!(quiz.questions[0].question_type, QuestionType::SingleChoice);
}

#[tokio::test]
async fn question_without_options_is_invalid() {
    let (pool, _container) = setup_test_db().await;
    let (_course_id, module_id, _student_id) = seed_module_and_student(&pool).await;
    let quiz_id = seed_quiz(&pool, module_id).await;

    let err = QuestionRepository::new(pool)
        .create(&NewQuestion {
            text: "Orphan question".into(),
            question_type: QuestionType::SingleChoice,
            quiz_id,
            options: vec![],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn taking_a_quiz_scores_one_point_per_correct_answer() {
    let (pool, _container) = setup_test_db().await;
    let (_course_id, module_id, student_id) = seed_module_and_student(&pool).await;
    let quiz_id = seed_quiz(&pool, module_id).await;
    let questions = QuestionRepository::new(pool.clone());
    let first = questions
        .create(&new_question(quiz_id, "Q1", "right", "wrong"))
        .await
        .unwrap();
    let second = questions
        .create(&new_question(quiz_id, "Q2", "right", "wrong"))
        .await
        .unwrap();

    let correct = first.options.iter().find(|o| o.is_correct).unwrap();
    let wrong = second.options.iter().find(|o| !o.is_correct).unwrap();
    let answers = HashMap::from([(first.id, correct.id), (second.id, wrong.id)]);

    let submission = QuizRepository::new(pool.clone())
        .take(quiz_id, student_id, &answers)
        .await
        .unwrap();

    assert_eq!(submission.score, 1);
    assert_eq!(submission.quiz.id, quiz_id);
    assert_eq!(submission.student.name, "Tom Adler");

    let recorded = QuizSubmissionRepository::new(pool)
        .list_by_student(student_id)
        .await
        .unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].score, 1);
}

#[tokio::test]
async fn answer_from_another_question_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let (_course_id, module_id, student_id) = seed_module_and_student(&pool).await;
    let quiz_id = seed_quiz(&pool, module_id).await;
    let questions = QuestionRepository::new(pool.clone());
    let first = questions
        .create(&new_question(quiz_id, "Q1", "right", "wrong"))
        .await
        .unwrap();
    let second = questions
        .create(&new_question(quiz_id, "Q2", "right", "wrong"))
        .await
        .unwrap();

    // Option belongs to the second question, submitted for the first.
    let foreign_option = second.options[0].id;
    let answers = HashMap::from([(first.id, foreign_option)]);

    let err = QuizRepository::new(pool)
        .take(quiz_id, student_id, &answers)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn taking_a_quiz_without_questions_is_a_conflict() {
    let (pool, _container) = setup_test_db().await;
    let (_course_id, module_id, student_id) = seed_module_and_student(&pool).await;
    let quiz_id = seed_quiz(&pool, module_id).await;

    let err = QuizRepository::new(pool)
        .take(quiz_id, student_id, &HashMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn quiz_submissions_are_listed_by_module_and_course() {
    let (pool, _container) = setup_test_db().await;
    let (course_id, module_id, student_id) = seed_module_and_student(&pool).await;
    let quiz_id = seed_quiz(&pool, module_id).await;
    let repo = QuizSubmissionRepository::new(pool);

    let submission = repo.create(quiz_id, student_id, 7).await.unwrap();
    assert_eq!(submission.score, 7);

    let by_module = repo.list_by_module(module_id).await.unwrap();
    assert_eq!(by_module.len(), 1);
    assert_eq!(by_module[0].id, submission.id);

    let by_course = repo.list_by_course(course_id).await.unwrap();
    assert_eq!(by_course.len(), 1);

    let other_module = repo.list_by_module(module_id + 1).await.unwrap();
    assert!(other_module.is_empty());
}

#[tokio::test]
async fn flipping_the_correct_option_changes_grading() {
    let (pool, _container) = setup_test_db().await;
    let (_course_id, module_id, student_id) = seed_module_and_student(&pool).await;
    let quiz_id = seed_quiz(&pool, module_id).await;
    let question = QuestionRepository::new(pool.clone())
        .create(&new_question(quiz_id, "Q1", "right", "wrong"))
        .await
        .unwrap();

    let previously_wrong = question.options.iter().find(|o| !o.is_correct).unwrap();
    AnswerOptionRepository::new(pool.clone())
        .update(
            previously_wrong.id,
            &AnswerOptionUpdate {
                is_correct: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let answers = HashMap::from([(question.id, previously_wrong.id)]);
    let submission = QuizRepository::new(pool)
        .take(quiz_id, student_id, &answers)
        .await
        .unwrap();

    assert_eq!(submission.score, 1);
}

#[tokio::test]
async fn deleting_a_quiz_removes_its_questions() {
    let (pool, _container) = setup_test_db().await;
    let (_course_id, module_id, _student_id) = seed_module_and_student(&pool).await;
    let quiz_id = seed_quiz(&pool, module_id).await;
    let question = QuestionRepository::new(pool.clone())
        .create(&new_question(quiz_id, "Q1", "right", "wrong"))
        .await
        .unwrap();

    QuizRepository::new(pool.clone()).delete(quiz_id).await.unwrap();

    let gone = QuestionRepository::new(pool).get(question.id).await.unwrap();
    assert!(gone.is_none());
}
