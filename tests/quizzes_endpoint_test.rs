use axum::http::{header, StatusCode};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use trivia_api::api;
use trivia_api::db::init_db;
use trivia_api::{CategoryId, NewQuestion, QuestionId, Repository};

struct TestApp {
    app: axum::Router,
    repo: Arc<Repository>,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path, 2).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));
    let app = api::create_router(api::AppState::new(repo.clone()));

    TestApp {
        app,
        repo,
        _temp: temp_dir,
    }
}

async fn play(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/quizzes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn add_question(repo: &Repository, text: &str, category: CategoryId) -> QuestionId {
    repo.insert_question(&NewQuestion {
        question: Some(text.to_string()),
        answer: Some("answer".to_string()),
        category: Some(category),
        difficulty: Some(1),
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_single_question_scenario() {
    let test_app = setup_test_app().await;
    let science = test_app.repo.insert_category("Science").await.unwrap();
    let id = test_app
        .repo
        .insert_question(&NewQuestion {
            question: Some("What orbits Earth?".to_string()),
            answer: Some("Moon".to_string()),
            category: Some(science),
            difficulty: Some(1),
        })
        .await
        .unwrap();

    let req = axum::http::Request::builder()
        .uri(format!("/categories/{}/questions", science))
        .body(axum::body::Body::empty())
        .unwrap();
    let resp = test_app.app.clone().oneshot(req).await.unwrap();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let listing: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(listing["totalQuestions"], 1);

    let (status, json) = play(
        test_app.app.clone(),
        json!({"quiz_category": science.as_i64(), "previous_questions": [id.as_i64()]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["question"].is_null());

    let (status, json) = play(
        test_app.app,
        json!({"quiz_category": science.as_i64(), "previous_questions": []}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["question"]["id"], id.as_i64());
    assert_eq!(json["question"]["answer"], "Moon");
}

#[tokio::test]
async fn test_quiz_walks_category_without_repeats() {
    let test_app = setup_test_app().await;
    let science = test_app.repo.insert_category("Science").await.unwrap();
    let art = test_app.repo.insert_category("Art").await.unwrap();

    let mut science_ids = HashSet::new();
    for i in 0..5 {
        science_ids.insert(add_question(&test_app.repo, &format!("S{}", i), science).await.as_i64());
    }
    add_question(&test_app.repo, "A0", art).await;

    let mut previous: Vec<i64> = Vec::new();
    for _ in 0..5 {
        let (status, json) = play(
            test_app.app.clone(),
            json!({"quiz_category": science.as_i64(), "previous_questions": previous}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let id = json["question"]["id"].as_i64().expect("question expected");
        assert!(science_ids.contains(&id));
        assert!(!previous.contains(&id));
        previous.push(id);
    }

    let (_, json) = play(
        test_app.app,
        json!({"quiz_category": science.as_i64(), "previous_questions": previous}),
    )
    .await;
    assert!(json["question"].is_null());
}

#[tokio::test]
async fn test_all_categories_quiz() {
    let test_app = setup_test_app().await;
    let science = test_app.repo.insert_category("Science").await.unwrap();
    let art = test_app.repo.insert_category("Art").await.unwrap();
    let s = add_question(&test_app.repo, "S", science).await;
    let a = add_question(&test_app.repo, "A", art).await;

    for category in [json!(0), json!("all"), json!({"type": "click", "id": 0})] {
        let (status, json) = play(
            test_app.app.clone(),
            json!({"quiz_category": category, "previous_questions": [s.as_i64()]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["question"]["id"], a.as_i64());
    }

    let (status, json) = play(test_app.app, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["question"].is_object());
}

#[tokio::test]
async fn test_category_picker_object() {
    let test_app = setup_test_app().await;
    let science = test_app.repo.insert_category("Science").await.unwrap();
    let art = test_app.repo.insert_category("Art").await.unwrap();
    add_question(&test_app.repo, "S", science).await;
    let a = add_question(&test_app.repo, "A", art).await;

    let (status, json) = play(
        test_app.app,
        json!({"quiz_category": {"type": "Art", "id": art.to_string()}, "previous_questions": []}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["question"]["id"], a.as_i64());
}

#[tokio::test]
async fn test_invalid_quiz_input_is_422() {
    let test_app = setup_test_app().await;

    let (status, json) = play(
        test_app.app.clone(),
        json!({"quiz_category": "science", "previous_questions": []}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], 422);

    let (status, _) = play(
        test_app.app,
        json!({"quiz_category": 1, "previous_questions": ["one"]}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_whole_number_float_category() {
    let test_app = setup_test_app().await;
    let science = test_app.repo.insert_category("Science").await.unwrap();
    let art = test_app.repo.insert_category("Art").await.unwrap();
    add_question(&test_app.repo, "S", science).await;
    let a = add_question(&test_app.repo, "A", art).await;

    let (status, json) = play(
        test_app.app,
        json!({"quiz_category": art.as_i64() as f64, "previous_questions": []}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["question"]["id"], a.as_i64());
}
