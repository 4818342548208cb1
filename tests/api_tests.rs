// tests/api_tests.rs

use std::collections::HashSet;

use reqwest::{Client, StatusCode, header::LOCATION, redirect::Policy};
use schoollearn::{config::Config, routes, services::accounts::seed_defaults, state::AppState};
use serde_json::{Value, json};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. Each test gets its own data directory
    let data_dir = std::env::temp_dir().join(format!("schoollearn-api-{}", uuid::Uuid::new_v4()));

    // 2. Create test configuration and state
    let config = Config {
        data_dir,
        session_secret: "test_secret_for_integration_tests".to_string(),
        session_ttl_secs: 600,
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        admin_emails: HashSet::new(),
        default_admin_email: "admin@schoollearn.com".to_string(),
        default_admin_password: "Admin@123".to_string(),
        demo_user_email: None,
        demo_user_password: None,
        admin_view_only: false,
    };

    let state = AppState::new(config.clone());
    seed_defaults(state.users.as_ref(), &config)
        .await
        .expect("Failed to seed default accounts");

    // 3. Create the router with the app state
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 5. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// A browser-like client: keeps cookies and does not follow redirects.
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .unwrap()
}

fn unique_email() -> String {
    format!("s_{}@example.com", &uuid::Uuid::new_v4().simple().to_string()[..8])
}

async fn register(client: &Client, address: &str, email: &str) -> reqwest::Response {
    client
        .post(format!("{}/register", address))
        .form(&[
            ("fullName", "Test Student"),
            ("email", email),
            ("grade", "10th"),
            ("school", "Riverside"),
            ("password", "password123"),
            ("confirmPassword", "password123"),
        ])
        .send()
        .await
        .expect("Failed to execute request")
}

fn location(response: &reqwest::Response) -> &str {
    response.headers()[LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let response = client()
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn anonymous_requests_are_turned_away() {
    let address = spawn_app().await;
    let client = client();

    let api = client
        .get(format!("{}/api/student/analytics", address))
        .send()
        .await
        .unwrap();
    assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
    let body: Value = api.json().await.unwrap();
    assert!(body["error"].is_string());

    let progress = client
        .post(format!("{}/api/quiz/progress", address))
        .json(&json!({ "subject": "math", "score": 1, "total_questions": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(progress.status(), StatusCode::UNAUTHORIZED);

    let page = client.get(format!("{}/profile", address)).send().await.unwrap();
    assert!(page.status().is_redirection());
    assert_eq!(location(&page), "/student-login");
}

#[tokio::test]
async fn register_progress_and_analytics_flow() {
    let address = spawn_app().await;
    let client = client();

    // 1. Register signs the student in
    let response = register(&client, &address, &unique_email()).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/profile");

    // 2. The profile page shows the one-shot flash and zeroed analytics
    let profile: Value = client
        .get(format!("{}/profile", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["flash"]["message"], "Registration successful.");
    assert_eq!(profile["user"]["role"], "student");
    assert_eq!(profile["analytics"]["total_quizzes"], 0);
    assert_eq!(profile["result_analytics"]["total_records"], 0);

    let again: Value = client
        .get(format!("{}/profile", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(again["flash"].is_null());

    // 3. Save a quiz attempt using the subject alias
    let saved = client
        .post(format!("{}/api/quiz/progress", address))
        .json(&json!({ "subject": "Mathematics", "score": 8, "total_questions": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(saved.status(), StatusCode::CREATED);
    let saved: Value = saved.json().await.unwrap();
    assert_eq!(saved["message"], "Quiz progress saved");
    assert_eq!(saved["attempt"]["subject"], "math");
    assert_eq!(saved["attempt"]["percentage"], json!(80.0));

    // 4. Analytics reflect the attempt
    let analytics: Value = client
        .get(format!("{}/api/student/analytics", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(analytics["total_quizzes"], 1);
    assert_eq!(analytics["avg_score"], json!(80.0));
    assert_eq!(
        analytics["subject_performance"],
        json!([{ "subject": "Mathematics", "attempts": 1, "average": 80.0, "best": 80.0 }])
    );
    assert_eq!(analytics["recent_attempts"][0]["subject_title"], "Mathematics");
}

#[tokio::test]
async fn registration_rejects_bad_input() {
    let address = spawn_app().await;
    let client = client();

    let mismatch = client
        .post(format!("{}/register", address))
        .form(&[
            ("fullName", "Test"),
            ("email", "mismatch@example.com"),
            ("password", "one"),
            ("confirmPassword", "two"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);
    let body: Value = mismatch.json().await.unwrap();
    assert_eq!(body["flash"]["message"], "Passwords do not match.");

    let missing = client
        .post(format!("{}/register", address))
        .form(&[("email", "missing@example.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let email = unique_email();
    register(&Client::new(), &address, &email).await;
    let duplicate = register(&client, &address, &email.to_uppercase()).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    let body: Value = duplicate.json().await.unwrap();
    assert_eq!(
        body["flash"]["message"],
        "An account with this email already exists."
    );
}

#[tokio::test]
async fn login_forms_check_the_account_role() {
    let address = spawn_app().await;
    let email = unique_email();
    register(&client(), &address, &email).await;

    let bad = client()
        .post(format!("{}/student-login", address))
        .form(&[("email", email.as_str()), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
    let body: Value = bad.json().await.unwrap();
    assert_eq!(body["flash"]["message"], "Invalid email or password.");
    assert_eq!(body["login_mode"], "student");

    let admin_on_student_form = client()
        .post(format!("{}/login", address))
        .form(&[("email", "admin@schoollearn.com"), ("password", "Admin@123")])
        .send()
        .await
        .unwrap();
    assert_eq!(admin_on_student_form.status(), StatusCode::FORBIDDEN);
    let body: Value = admin_on_student_form.json().await.unwrap();
    assert_eq!(body["flash"]["message"], "This account is admin. Use Admin Login.");

    let student_on_admin_form = client()
        .post(format!("{}/admin-login", address))
        .form(&[("email", email.as_str()), ("password", "password123")])
        .send()
        .await
        .unwrap();
    assert_eq!(student_on_admin_form.status(), StatusCode::FORBIDDEN);
    let body: Value = student_on_admin_form.json().await.unwrap();
    assert_eq!(body["flash"]["message"], "Admin account required.");

    let student = client()
        .post(format!("{}/student-login", address))
        .form(&[("email", email.to_uppercase().as_str()), ("password", "password123")])
        .send()
        .await
        .unwrap();
    assert!(student.status().is_redirection());
    assert_eq!(location(&student), "/profile");

    let admin = client()
        .post(format!("{}/admin-login", address))
        .form(&[("email", "admin@schoollearn.com"), ("password", "Admin@123")])
        .send()
        .await
        .unwrap();
    assert!(admin.status().is_redirection());
    assert_eq!(location(&admin), "/admin");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let address = spawn_app().await;
    let client = client();
    register(&client, &address, &unique_email()).await;

    let before = client
        .get(format!("{}/api/student/results", address))
        .send()
        .await
        .unwrap();
    assert_eq!(before.status(), StatusCode::OK);

    let logout = client.get(format!("{}/logout", address)).send().await.unwrap();
    assert!(logout.status().is_redirection());
    assert_eq!(location(&logout), "/");

    let home: Value = client
        .get(format!("{}/", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(home["flash"]["message"], "You have been logged out.");
    assert!(home["user"].is_null());

    let after = client
        .get(format!("{}/api/student/results", address))
        .send()
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn progress_rejects_invalid_payloads() {
    let address = spawn_app().await;
    let client = client();
    register(&client, &address, &unique_email()).await;

    let cases = [
        (json!({ "subject": "history", "score": 1, "total_questions": 2 }), "Invalid subject"),
        (json!({ "subject": "math", "score": 1, "total_questions": 0 }), "total_questions must be greater than 0"),
        (json!({ "subject": "math", "score": "abc", "total_questions": 5 }), "Invalid score payload"),
        (json!({ "subject": "math" }), "total_questions must be greater than 0"),
    ];

    for (payload, message) in cases {
        let response = client
            .post(format!("{}/api/quiz/progress", address))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], message);
    }

    let not_json = client
        .post(format!("{}/api/quiz/progress", address))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);

    // Out-of-range scores are clamped, not rejected
    let clamped: Value = client
        .post(format!("{}/api/quiz/progress", address))
        .json(&json!({ "subject": "social_science", "score": 12, "total_questions": "10" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(clamped["attempt"]["score"], 10);
    assert_eq!(clamped["attempt"]["subject"], "social-science");
}

#[tokio::test]
async fn question_api_serves_merged_banks() {
    let address = spawn_app().await;
    let client = client();

    let unknown = client
        .get(format!("{}/api/questions/history", address))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

    let questions: Vec<Value> = client
        .get(format!("{}/api/questions/Computer", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(questions.len(), 20);
    assert_eq!(questions[0]["_qid"], "base-0");
    assert_eq!(questions[0]["_source"], "base");
    assert_eq!(questions[0]["options"].as_array().unwrap().len(), 4);

    let sample: Vec<Value> = client
        .get(format!("{}/api/questions/computer?count=3", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sample.len(), 3);

    for bad in ["abc", "-1", "2.5"] {
        let response = client
            .get(format!("{}/api/questions/computer?count={}", address, bad))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "count must be a non-negative integer");
    }
}

#[tokio::test]
async fn quiz_pages() {
    let address = spawn_app().await;
    let client = client();

    let unknown = client.get(format!("{}/quiz/history", address)).send().await.unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let page: Value = client
        .get(format!("{}/quiz/mathematics", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["subject"], "math");
    assert_eq!(page["subject_title"], "Mathematics");

    let home: Value = client
        .get(format!("{}/", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(home["subjects"].as_array().unwrap().len(), 6);
    assert_eq!(home["subjects"][5]["key"], "social-science");
    assert_eq!(home["subjects"][5]["enabled"], true);
}
