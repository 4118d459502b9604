// tests/attempt_tests.rs

mod common;

use common::{login, register_user, spawn_app};

async fn create_quiz(client: &reqwest::Client, address: &str, token: &str, title: &str) -> i64 {
    let response = client
        .post(format!("{}/teacher/quiz", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({"title": title}))
        .send()
        .await
        .expect("Create quiz failed");
    assert_eq!(response.status().as_u16(), 201);

    response.json::<serde_json::Value>().await.unwrap()["quiz_id"]
        .as_i64()
        .unwrap()
}

async fn add_question(
    client: &reqwest::Client,
    address: &str,
    token: &str,
    quiz_id: i64,
    text: &str,
    correct: &str,
) -> u16 {
    client
        .post(format!("{}/teacher/question", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "quiz_id": quiz_id,
            "question": text,
            "option_a": "Alpha",
            "option_b": "Bravo",
            "option_c": "Charlie",
            "option_d": "Delta",
            "correct_option": correct
        }))
        .send()
        .await
        .expect("Add question failed")
        .status()
        .as_u16()
}

#[tokio::test]
async fn taking_view_never_exposes_answer_key() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let (email, password) = register_user(&client, &address, "Ms Owner", "teacher").await;
    let token = login(&client, &address, &email, &password).await;
    let quiz_id = create_quiz(&client, &address, &token, "Geography").await;
    assert_eq!(add_question(&client, &address, &token, quiz_id, "Capital of France?", "A").await, 201);
    assert_eq!(add_question(&client, &address, &token, quiz_id, "Largest ocean?", "B").await, 201);

    // Public taking view: no correct_option anywhere
    let questions: Vec<serde_json::Value> = client
        .get(format!("{}/quiz/{}/questions", address, quiz_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(questions.len(), 2);
    for q in &questions {
        assert!(q["question"].is_string());
        assert!(q["option_a"].is_string());
        assert!(q.get("correct_option").is_none());
    }

    // Authoring view: answer key included for the owner
    let questions: Vec<serde_json::Value> = client
        .get(format!("{}/teacher/quiz/{}/questions", address, quiz_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(questions[0]["correct_option"], "A");
    assert_eq!(questions[1]["correct_option"], "B");
}

#[tokio::test]
async fn authoring_is_owner_only() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let (owner_email, owner_password) = register_user(&client, &address, "Owner", "teacher").await;
    let (other_email, other_password) = register_user(&client, &address, "Other", "teacher").await;
    let owner_token = login(&client, &address, &owner_email, &owner_password).await;
    let other_token = login(&client, &address, &other_email, &other_password).await;

    let quiz_id = create_quiz(&client, &address, &owner_token, "History").await;

    // A different teacher can neither add questions nor read the key
    assert_eq!(
        add_question(&client, &address, &other_token, quiz_id, "Intruder?", "A").await,
        403
    );
    let response = client
        .get(format!("{}/teacher/quiz/{}/questions", address, quiz_id))
        .header("Authorization", format!("Bearer {}", other_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    // Unknown quiz is a 404, not a 403
    assert_eq!(
        add_question(&client, &address, &owner_token, 9999, "Ghost?", "A").await,
        404
    );

    // Answer key outside A-D is rejected up front
    assert_eq!(
        add_question(&client, &address, &owner_token, quiz_id, "Bad key?", "E").await,
        400
    );
}

#[tokio::test]
async fn attempt_scores_and_locks() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let (teacher_email, teacher_password) =
        register_user(&client, &address, "Quizmaster", "teacher").await;
    let teacher_token = login(&client, &address, &teacher_email, &teacher_password).await;
    let quiz_id = create_quiz(&client, &address, &teacher_token, "Math").await;
    add_question(&client, &address, &teacher_token, quiz_id, "1+1?", "A").await;
    add_question(&client, &address, &teacher_token, quiz_id, "2+2?", "B").await;

    let questions: Vec<serde_json::Value> = client
        .get(format!("{}/quiz/{}/questions", address, quiz_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let q1 = questions[0]["id"].as_i64().unwrap();
    let q2 = questions[1]["id"].as_i64().unwrap();

    let (student_email, student_password) =
        register_user(&client, &address, "Sam", "student").await;
    let student_token = login(&client, &address, &student_email, &student_password).await;

    // One right, one wrong
    let response = client
        .post(format!("{}/student/attempt/{}", address, quiz_id))
        .header("Authorization", format!("Bearer {}", student_token))
        .json(&serde_json::json!({"answers": [
            {"question_id": q1, "selected_option": "A"},
            {"question_id": q2, "selected_option": "C"}
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["marks"], 1);

    // Raw selections were recorded, right or wrong
    let answer_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM answers WHERE quiz_id = ?")
            .bind(quiz_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(answer_count, 2);

    // Second attempt is refused and leaves exactly one result row
    let response = client
        .post(format!("{}/student/attempt/{}", address, quiz_id))
        .header("Authorization", format!("Bearer {}", student_token))
        .json(&serde_json::json!({"answers": [
            {"question_id": q1, "selected_option": "A"}
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    let result_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM results WHERE quiz_id = ?")
            .bind(quiz_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(result_count, 1);

    // The student sees their own result
    let results: Vec<serde_json::Value> = client
        .get(format!("{}/results/{}", address, claims_id(&pool, &student_email).await))
        .header("Authorization", format!("Bearer {}", student_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["quiz_id"], quiz_id);
    assert_eq!(results[0]["marks"], 1);
}

#[tokio::test]
async fn attempt_skips_unknown_questions_silently() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let (teacher_email, teacher_password) =
        register_user(&client, &address, "Quizmaster", "teacher").await;
    let teacher_token = login(&client, &address, &teacher_email, &teacher_password).await;
    let quiz_id = create_quiz(&client, &address, &teacher_token, "Science").await;
    add_question(&client, &address, &teacher_token, quiz_id, "H2O?", "D").await;

    let questions: Vec<serde_json::Value> = client
        .get(format!("{}/quiz/{}/questions", address, quiz_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let q1 = questions[0]["id"].as_i64().unwrap();

    let (student_email, student_password) =
        register_user(&client, &address, "Sky", "student").await;
    let student_token = login(&client, &address, &student_email, &student_password).await;

    let response = client
        .post(format!("{}/student/attempt/{}", address, quiz_id))
        .header("Authorization", format!("Bearer {}", student_token))
        .json(&serde_json::json!({"answers": [
            {"question_id": q1, "selected_option": "D"},
            {"question_id": 424242, "selected_option": "D"}
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["marks"], 1);

    // The unknown question's answer row is still recorded
    let answer_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM answers WHERE quiz_id = ?")
            .bind(quiz_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(answer_count, 2);
}

#[tokio::test]
async fn students_cannot_read_other_students_results() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let (a_email, a_password) = register_user(&client, &address, "Ada", "student").await;
    let (b_email, b_password) = register_user(&client, &address, "Bob", "student").await;
    let a_token = login(&client, &address, &a_email, &a_password).await;
    let _ = login(&client, &address, &b_email, &b_password).await;

    let b_id = claims_id(&pool, &b_email).await;

    let response = client
        .get(format!("{}/results/{}", address, b_id))
        .header("Authorization", format!("Bearer {}", a_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn quiz_listing_aggregates_and_survives_teacher_deletion() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let (teacher_email, teacher_password) =
        register_user(&client, &address, "Ghost Teacher", "teacher").await;
    let teacher_token = login(&client, &address, &teacher_email, &teacher_password).await;
    let quiz_id = create_quiz(&client, &address, &teacher_token, "Orphaned Quiz").await;
    add_question(&client, &address, &teacher_token, quiz_id, "Q1?", "A").await;
    add_question(&client, &address, &teacher_token, quiz_id, "Q2?", "B").await;

    let listing: Vec<serde_json::Value> = client
        .get(format!("{}/quizzes", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["title"], "Orphaned Quiz");
    assert_eq!(listing[0]["teacher"], "Ghost Teacher");
    assert_eq!(listing[0]["questions"], 2);

    // Delete the teacher, then list again: teacher is null, not an error
    let (admin_email, admin_password) = register_user(&client, &address, "Root", "admin").await;
    let admin_token = login(&client, &address, &admin_email, &admin_password).await;
    let teacher_id = claims_id(&pool, &teacher_email).await;

    let response = client
        .delete(format!("{}/admin/user/{}", address, teacher_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let listing: Vec<serde_json::Value> = client
        .get(format!("{}/quizzes", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing.len(), 1);
    assert!(listing[0]["teacher"].is_null());
    assert_eq!(listing[0]["questions"], 2);
}

/// Looks up a user's ID by email straight from the database.
async fn claims_id(pool: &sqlx::SqlitePool, email: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}
