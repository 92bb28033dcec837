use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus API",
        version = "0.1.0",
        description = "Course management platform with users, courses, lessons, quizzes and enrollments."
    ),
    paths(
        crate::routes::users::create_user,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::profiles::create_profile,
        crate::routes::profiles::get_profile,
        crate::routes::profiles::update_profile,
        crate::routes::catalog::create_category,
        crate::routes::catalog::list_categories,
        crate::routes::catalog::get_category,
        crate::routes::catalog::update_category,
        crate::routes::catalog::delete_category,
        crate::routes::catalog::create_tag,
        crate::routes::catalog::list_tags,
        crate::routes::catalog::get_tag,
        crate::routes::catalog::update_tag,
        crate::routes::catalog::delete_tag,
        crate::routes::courses::create_course,
        crate::routes::courses::list_courses,
        crate::routes::courses::get_course,
        crate::routes::courses::courses_by_user,
        crate::routes::courses::course_students,
        crate::routes::courses::update_course,
        crate::routes::courses::delete_course,
        crate::routes::enrollments::enroll,
        crate::routes::enrollments::unenroll,
        crate::routes::enrollments::list_enrollments,
        crate::routes::enrollments::get_enrollment,
        crate::routes::reviews::create_review,
        crate::routes::reviews::create_review_for_course,
        crate::routes::reviews::list_reviews,
        crate::routes::reviews::get_review,
        crate::routes::reviews::update_review,
        crate::routes::reviews::delete_review,
        crate::routes::content::create_module,
        crate::routes::content::list_modules,
        crate::routes::content::get_module,
        crate::routes::content::update_module,
        crate::routes::content::delete_module,
        crate::routes::content::create_lesson,
        crate::routes::content::list_lessons,
        crate::routes::content::get_lesson,
        crate::routes::content::update_lesson,
        crate::routes::content::delete_lesson,
        crate::routes::assessments::create_assignment,
        crate::routes::assessments::list_assignments,
        crate::routes::assessments::get_assignment,
        crate::routes::assessments::update_assignment,
        crate::routes::assessments::delete_assignment,
        crate::routes::assessments::create_submission,
        crate::routes::assessments::submit_assignment,
        crate::routes::assessments::submissions_by_assignment,
        crate::routes::assessments::submissions_by_student,
        crate::routes::assessments::list_submissions,
        crate::routes::assessments::get_submission,
        crate::routes::assessments::update_submission,
        crate::routes::assessments::delete_submission,
        crate::routes::quizzes::create_quiz,
        crate::routes::quizzes::take_quiz,
        crate::routes::quizzes::list_quizzes,
        crate::routes::quizzes::get_quiz,
        crate::routes::quizzes::update_quiz,
        crate::routes::quizzes::delete_quiz,
        crate::routes::quizzes::create_question,
        crate::routes::quizzes::list_questions,
        crate::routes::quizzes::get_question,
        crate::routes::quizzes::update_question,
        crate::routes::quizzes::delete_question,
        crate::routes::quizzes::create_answer_option,
        crate::routes::quizzes::list_answer_options,
        crate::routes::quizzes::get_answer_option,
        crate::routes::quizzes::update_answer_option,
        crate::routes::quizzes::delete_answer_option,
        crate::routes::quiz_submissions::submit_quiz,
        crate::routes::quiz_submissions::create_quiz_submission,
        crate::routes::quiz_submissions::list_quiz_submissions,
        crate::routes::quiz_submissions::get_quiz_submission,
        crate::routes::quiz_submissions::quiz_submissions_by_student,
        crate::routes::quiz_submissions::quiz_submissions_by_module,
        crate::routes::quiz_submissions::quiz_submissions_by_course,
        crate::routes::quiz_submissions::update_quiz_submission,
        crate::routes::quiz_submissions::delete_quiz_submission,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::users::UserRequest,
        crate::dto::users::UserUpdateRequest,
        crate::dto::users::UserResponse,
        crate::dto::profiles::ProfileRequest,
        crate::dto::profiles::ProfileUpdateRequest,
        crate::dto::profiles::ProfileResponse,
        crate::dto::catalog::CategoryRequest,
        crate::dto::catalog::CategoryResponse,
        crate::dto::catalog::TagRequest,
        crate::dto::catalog::TagResponse,
        crate::dto::courses::CourseRequest,
        crate::dto::courses::CourseUpdateRequest,
        crate::dto::courses::CourseResponse,
        crate::dto::enrollments::EnrollmentResponse,
        crate::dto::reviews::CourseReviewRequest,
        crate::dto::reviews::CourseReviewUpdateRequest,
        crate::dto::reviews::CourseReviewResponse,
        crate::dto::content::ModuleRequest,
        crate::dto::content::ModuleUpdateRequest,
        crate::dto::content::ModuleResponse,
        crate::dto::content::LessonRequest,
        crate::dto::content::LessonUpdateRequest,
        crate::dto::content::LessonResponse,
        crate::dto::assessments::AssignmentRequest,
        crate::dto::assessments::AssignmentUpdateRequest,
        crate::dto::assessments::AssignmentResponse,
        crate::dto::assessments::SubmissionRequest,
        crate::dto::assessments::SubmissionContentRequest,
        crate::dto::assessments::SubmissionUpdateRequest,
        crate::dto::assessments::SubmissionResponse,
        crate::dto::quizzes::QuizRequest,
        crate::dto::quizzes::QuizUpdateRequest,
        crate::dto::quizzes::QuizResponse,
        crate::dto::quizzes::QuestionRequest,
        crate::dto::quizzes::QuestionOptionRequest,
        crate::dto::quizzes::QuestionUpdateRequest,
        crate::dto::quizzes::QuestionResponse,
        crate::dto::quizzes::AnswerOptionRequest,
        crate::dto::quizzes::AnswerOptionUpdateRequest,
        crate::dto::quizzes::AnswerOptionResponse,
        crate::dto::quizzes::QuizSubmissionRequest,
        crate::dto::quizzes::QuizSubmissionUpdateRequest,
        crate::dto::quizzes::QuizSubmissionResponse,
        crate::dto::UserInfo,
        crate::dto::CategoryInfo,
        crate::dto::CourseInfo,
        crate::dto::ModuleInfo,
        crate::dto::LessonInfo,
        crate::dto::AssignmentInfo,
        crate::dto::QuizInfo,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "users", description = "User accounts"),
        (name = "profiles", description = "User profiles"),
        (name = "categories", description = "Course categories"),
        (name = "tags", description = "Course tags"),
        (name = "courses", description = "Courses and their rosters"),
        (name = "enrollments", description = "Course enrollment"),
        (name = "course-reviews", description = "Student course reviews"),
        (name = "modules", description = "Course modules"),
        (name = "lessons", description = "Module lessons"),
        (name = "assignments", description = "Lesson assignments"),
        (name = "submissions", description = "Assignment submissions"),
        (name = "quizzes", description = "Quizzes and grading"),
        (name = "questions", description = "Quiz questions"),
        (name = "answer-options", description = "Question answer options"),
        (name = "quiz-submissions", description = "Recorded quiz attempts"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
