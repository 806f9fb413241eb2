// tests/common/mod.rs
//
// In-process stand-in for the upstream REST backend plus helpers that spawn
// the gateway in front of it.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use megastar::{
    config::Config,
    models::{
        account::Account,
        exam::{Exam, ExamType, ExamUpdatePayload},
        question::{Answer, Difficulty, Question, QuestionInput},
        result::{ExamAttempt, StudentAnswer},
    },
    routes,
    state::AppState,
};
use serde_json::json;

pub const GOOD_TOKEN: &str = "good-token";
pub const MATH: i64 = 1;
pub const PHYSICS: i64 = 2;

#[derive(Default)]
pub struct Fixtures {
    pub questions: Vec<Question>,
    pub exams: HashMap<i64, Exam>,
    pub attempts: HashMap<i64, ExamAttempt>,
    pub accounts: HashMap<String, Account>,
    pub exam_puts: Vec<(i64, ExamUpdatePayload)>,
    pub seen_auth: Vec<Option<String>>,
}

pub type SharedFixtures = Arc<Mutex<Fixtures>>;

/// Question `id` with answers `id*10+1` (correct) and `id*10+2`.
pub fn question(id: i64, subject_id: Option<i64>) -> Question {
    Question {
        id,
        text: format!("Question {}", id),
        image_url: None,
        audio_url: None,
        passage: None,
        difficulty: Some(if id % 2 == 0 { Difficulty::Hard } else { Difficulty::Easy }),
        subject_id,
        answers: vec![
            Answer {
                id: id * 10 + 1,
                text: format!("Right {}", id),
                is_correct: true,
            },
            Answer {
                id: id * 10 + 2,
                text: format!("Wrong {}", id),
                is_correct: false,
            },
        ],
    }
}

pub fn exam(id: i64, subject_id: Option<i64>, total_questions: u32, question_ids: Vec<i64>) -> Exam {
    Exam {
        id,
        name: format!("Exam {}", id),
        duration_minutes: 60,
        exam_type: ExamType::Practice,
        total_questions,
        subject_id,
        question_ids,
    }
}

pub fn answer(question_id: i64, selected_answer_id: Option<i64>) -> StudentAnswer {
    StudentAnswer {
        question_id,
        selected_answer_id,
        is_correct: None,
        marked_for_review: false,
    }
}

/// Ten Math questions (1-10), three Physics questions (11-13) and one
/// question without a subject (14).
pub fn seeded() -> Fixtures {
    let mut fixtures = Fixtures::default();
    fixtures
        .questions
        .extend((1..=10).map(|id| question(id, Some(MATH))));
    fixtures
        .questions
        .extend((11..=13).map(|id| question(id, Some(PHYSICS))));
    fixtures.questions.push(question(14, None));
    fixtures
}

fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": format!("{} not found", what) }))).into_response()
}

fn record_auth(fixtures: &SharedFixtures, headers: &HeaderMap) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    fixtures.lock().unwrap().seen_auth.push(auth);
}

async fn list_questions(State(f): State<SharedFixtures>, headers: HeaderMap) -> Response {
    record_auth(&f, &headers);
    Json(f.lock().unwrap().questions.clone()).into_response()
}

/// Subject id the fake upstream answers with 404 on the by-subject route.
pub const RETIRED_SUBJECT: i64 = 404;

async fn questions_by_subject(State(f): State<SharedFixtures>, Path(subject_id): Path<i64>) -> Response {
    if subject_id == RETIRED_SUBJECT {
        return not_found("Subject");
    }
    let pool: Vec<Question> = f
        .lock()
        .unwrap()
        .questions
        .iter()
        .filter(|q| q.subject_id == Some(subject_id))
        .cloned()
        .collect();
    Json(pool).into_response()
}

async fn get_question(State(f): State<SharedFixtures>, Path(id): Path<i64>) -> Response {
    match f.lock().unwrap().questions.iter().find(|q| q.id == id) {
        Some(q) => Json(q.clone()).into_response(),
        None => not_found("Question"),
    }
}

fn from_input(id: i64, input: QuestionInput) -> Question {
    Question {
        id,
        text: input.text,
        image_url: input.image_url,
        audio_url: input.audio_url,
        passage: input.passage,
        difficulty: Some(input.difficulty),
        subject_id: Some(input.subject_id),
        answers: input
            .answers
            .into_iter()
            .enumerate()
            .map(|(i, a)| Answer {
                id: id * 10 + i as i64 + 1,
                text: a.text,
                is_correct: a.is_correct,
            })
            .collect(),
    }
}

async fn create_question(State(f): State<SharedFixtures>, Json(input): Json<QuestionInput>) -> Response {
    let mut fixtures = f.lock().unwrap();
    let id = fixtures.questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
    let question = from_input(id, input);
    fixtures.questions.push(question.clone());
    (StatusCode::CREATED, Json(question)).into_response()
}

async fn update_question(
    State(f): State<SharedFixtures>,
    Path(id): Path<i64>,
    Json(input): Json<QuestionInput>,
) -> Response {
    let mut fixtures = f.lock().unwrap();
    match fixtures.questions.iter_mut().find(|q| q.id == id) {
        Some(slot) => {
            *slot = from_input(id, input);
            Json(slot.clone()).into_response()
        }
        None => not_found("Question"),
    }
}

async fn delete_question(State(f): State<SharedFixtures>, Path(id): Path<i64>) -> Response {
    let mut fixtures = f.lock().unwrap();
    let before = fixtures.questions.len();
    fixtures.questions.retain(|q| q.id != id);
    if fixtures.questions.len() == before {
        return not_found("Question");
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Exam id that makes the fake upstream fail with a 500.
pub const BROKEN_EXAM: i64 = 500;

async fn get_exam(State(f): State<SharedFixtures>, Path(id): Path<i64>) -> Response {
    if id == BROKEN_EXAM {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database exploded").into_response();
    }
    match f.lock().unwrap().exams.get(&id) {
        Some(exam) => Json(exam.clone()).into_response(),
        None => not_found("Exam"),
    }
}

async fn update_exam(
    State(f): State<SharedFixtures>,
    Path(id): Path<i64>,
    Json(payload): Json<ExamUpdatePayload>,
) -> Response {
    let mut fixtures = f.lock().unwrap();
    fixtures.exam_puts.push((id, payload.clone()));
    match fixtures.exams.get_mut(&id) {
        Some(exam) => {
            exam.name = payload.name;
            exam.duration_minutes = payload.duration_minutes;
            exam.exam_type = payload.exam_type;
            exam.total_questions = payload.total_questions;
            exam.subject_id = payload.subject_id;
            exam.question_ids = payload.question_ids;
            Json(exam.clone()).into_response()
        }
        None => not_found("Exam"),
    }
}

async fn get_attempt(State(f): State<SharedFixtures>, Path(id): Path<i64>) -> Response {
    match f.lock().unwrap().attempts.get(&id) {
        Some(attempt) => Json(attempt.clone()).into_response(),
        None => not_found("Result"),
    }
}

async fn me(State(f): State<SharedFixtures>, headers: HeaderMap) -> Response {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let fixtures = f.lock().unwrap();
    match token.and_then(|t| fixtures.accounts.get(t)) {
        Some(account) => Json(account.clone()).into_response(),
        None => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Token expired" }))).into_response(),
    }
}

/// Spawns the fake upstream under `/v1` and returns its base URL.
pub async fn spawn_upstream(fixtures: Fixtures) -> (String, SharedFixtures) {
    let shared: SharedFixtures = Arc::new(Mutex::new(fixtures));

    let api = Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/by-subject/{id}", get(questions_by_subject))
        .route(
            "/questions/{id}",
            get(get_question).put(update_question).delete(delete_question),
        )
        .route("/exams/{id}", get(get_exam).put(update_exam))
        .route("/results/{id}", get(get_attempt))
        .route("/auth/me", get(me))
        .with_state(shared.clone());

    let app = Router::new().nest("/v1", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{}/v1", port), shared)
}

/// Spawns the gateway pointed at `upstream` and returns its address.
pub async fn spawn_app(upstream: &str) -> String {
    let mut config = Config::for_upstream(upstream).expect("valid upstream url");
    config.fallback_label = "Unknown".to_string();

    let state = AppState::initialize(config).expect("Failed to build app state");
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Upstream seeded with `fixtures` and a gateway in front of it.
pub async fn spawn_stack(fixtures: Fixtures) -> (String, SharedFixtures) {
    let (upstream, shared) = spawn_upstream(fixtures).await;
    let address = spawn_app(&upstream).await;
    (address, shared)
}
