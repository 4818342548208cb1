// tests/admin_tests.rs

use std::collections::HashSet;

use reqwest::{Client, StatusCode, header::LOCATION, redirect::Policy};
use schoollearn::{config::Config, routes, services::accounts::seed_defaults, state::AppState};
use serde_json::{Value, json};

async fn spawn_app() -> String {
    let data_dir =
        std::env::temp_dir().join(format!("schoollearn-admin-{}", uuid::Uuid::new_v4()));

    let config = Config {
        data_dir,
        session_secret: "admin_test_secret".to_string(),
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
    seed_defaults(state.users.as_ref(), &config).await.unwrap();

    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .unwrap()
}

async fn admin_client(address: &str) -> Client {
    let client = browser();
    let response = client
        .post(format!("{}/admin-login", address))
        .form(&[("email", "admin@schoollearn.com"), ("password", "Admin@123")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    client
}

/// Registers a student and returns their signed-in client and email.
async fn student_client(address: &str) -> (Client, String) {
    let client = browser();
    let email = format!("s_{}@example.com", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    let response = client
        .post(format!("{}/register", address))
        .form(&[
            ("fullName", "Kiran Shah"),
            ("email", email.as_str()),
            ("password", "password123"),
            ("confirmPassword", "password123"),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    (client, email)
}

async fn get_json(client: &Client, url: String) -> Value {
    client.get(url).send().await.unwrap().json().await.unwrap()
}

/// Posts an admin form and returns the redirect target.
async fn post_form(client: &Client, url: String, form: &[(&str, &str)]) -> String {
    let response = client.post(url).form(form).send().await.unwrap();
    assert!(response.status().is_redirection(), "{}", response.status());
    response.headers()[LOCATION].to_str().unwrap().to_string()
}

/// Id of the account with `email`, read from the dashboard.
async fn user_id(admin: &Client, address: &str, email: &str) -> String {
    let dashboard = get_json(admin, format!("{}/admin", address)).await;
    dashboard["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == email)
        .map(|u| u["id"].as_str().unwrap().to_string())
        .unwrap()
}

#[tokio::test]
async fn students_cannot_reach_admin_routes() {
    let address = spawn_app().await;
    let (student, _) = student_client(&address).await;

    let page = student.get(format!("{}/admin", address)).send().await.unwrap();
    assert!(page.status().is_redirection());
    assert_eq!(page.headers()[LOCATION], "/");

    let home = get_json(&student, format!("{}/", address)).await;
    assert_eq!(home["flash"]["message"], "Admin access only.");

    let api = student
        .get(format!("{}/api/admin/analytics", address))
        .send()
        .await
        .unwrap();
    assert_eq!(api.status(), StatusCode::FORBIDDEN);

    let anonymous = browser()
        .get(format!("{}/api/admin/analytics", address))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_lists_banks_and_users() {
    let address = spawn_app().await;
    let admin = admin_client(&address).await;

    let dashboard = get_json(&admin, format!("{}/admin?subject=Social_Science", address)).await;
    assert_eq!(dashboard["flash"]["message"], "Admin login successful.");
    assert_eq!(dashboard["selected_subject"], "social-science");
    assert_eq!(dashboard["quiz_counts"].as_array().unwrap().len(), 6);
    assert_eq!(dashboard["quiz_status"]["math"], true);
    assert_eq!(dashboard["users"][0]["email"], "admin@schoollearn.com");
    assert_eq!(dashboard["result_analytics"]["total_records"], 0);

    let fallback = get_json(&admin, format!("{}/admin?subject=history", address)).await;
    assert_eq!(fallback["selected_subject"], "math");
}

#[tokio::test]
async fn custom_questions_can_be_added_and_deleted() {
    let address = spawn_app().await;
    let admin = admin_client(&address).await;
    let questions_url = format!("{}/api/questions/science", address);
    let base_count = get_json(&admin, questions_url.clone()).await.as_array().unwrap().len();

    // 1. Add a custom science question
    let target = post_form(
        &admin,
        format!("{}/admin/questions/add", address),
        &[
            ("subject", "science"),
            ("question", "Which planet is closest to the Sun?"),
            ("option_a", "Mercury"),
            ("option_b", "Venus"),
            ("option_c", "Earth"),
            ("option_d", "Mars"),
            ("answer", "0"),
            ("explanation", "Mercury orbits closest."),
        ],
    )
    .await;
    assert_eq!(target, "/admin?subject=science");

    let questions = get_json(&admin, questions_url.clone()).await;
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), base_count + 1);
    let added = questions.last().unwrap();
    assert_eq!(added["_source"], "custom");
    assert_eq!(added["question"], "Which planet is closest to the Sun?");
    let qid = added["_qid"].as_str().unwrap().to_string();

    // 2. Invalid answers are reported, nothing is stored
    post_form(
        &admin,
        format!("{}/admin/questions/add", address),
        &[
            ("subject", "science"),
            ("question", "Q"),
            ("option_a", "a"),
            ("option_b", "b"),
            ("option_c", "c"),
            ("option_d", "d"),
            ("answer", "7"),
        ],
    )
    .await;
    let dashboard = get_json(&admin, format!("{}/admin?subject=science", address)).await;
    assert_eq!(dashboard["flash"]["message"], "Select a valid correct option.");
    assert_eq!(
        dashboard["selected_subject_questions"].as_array().unwrap().len(),
        base_count + 1
    );

    // 3. Delete it again
    post_form(
        &admin,
        format!("{}/admin/questions/delete", address),
        &[("subject", "science"), ("qid", qid.as_str()), ("source", "custom")],
    )
    .await;
    let questions = get_json(&admin, questions_url.clone()).await;
    assert_eq!(questions.as_array().unwrap().len(), base_count);
    assert!(questions.as_array().unwrap().iter().all(|q| q["_qid"] != json!(qid)));

    // 4. Soft-delete a base question twice
    post_form(
        &admin,
        format!("{}/admin/questions/delete", address),
        &[("subject", "science"), ("qid", "base-0"), ("source", "base")],
    )
    .await;
    post_form(
        &admin,
        format!("{}/admin/questions/delete", address),
        &[("subject", "science"), ("qid", "base-0"), ("source", "base")],
    )
    .await;
    let dashboard = get_json(&admin, format!("{}/admin?subject=science", address)).await;
    assert_eq!(dashboard["flash"]["message"], "Question not found.");
    let questions = get_json(&admin, questions_url).await;
    assert_eq!(questions.as_array().unwrap().len(), base_count - 1);
    assert_eq!(questions[0]["_qid"], "base-1");
}

#[tokio::test]
async fn disabled_quiz_is_closed_to_students() {
    let address = spawn_app().await;
    let admin = admin_client(&address).await;
    let visitor = browser();

    post_form(
        &admin,
        format!("{}/admin/quiz/mathematics/toggle", address),
        &[("enabled", "0")],
    )
    .await;
    let dashboard = get_json(&admin, format!("{}/admin", address)).await;
    assert_eq!(dashboard["flash"]["message"], "Quiz status for Mathematics updated.");
    assert_eq!(dashboard["quiz_status"]["math"], false);

    let api = visitor
        .get(format!("{}/api/questions/math", address))
        .send()
        .await
        .unwrap();
    assert_eq!(api.status(), StatusCode::FORBIDDEN);
    let body: Value = api.json().await.unwrap();
    assert_eq!(body["error"], "This quiz is disabled by admin");

    let page = visitor.get(format!("{}/quiz/math", address)).send().await.unwrap();
    assert!(page.status().is_redirection());
    assert_eq!(page.headers()[LOCATION], "/");
    let home = get_json(&visitor, format!("{}/", address)).await;
    assert_eq!(home["flash"]["message"], "This quiz is currently disabled by admin.");
    assert_eq!(home["subjects"][1]["enabled"], false);

    // Admins can still manage the bank while it is closed
    let bank = get_json(&admin, format!("{}/admin?subject=math", address)).await;
    assert!(!bank["selected_subject_questions"].as_array().unwrap().is_empty());

    post_form(
        &admin,
        format!("{}/admin/quiz/math/toggle", address),
        &[("enabled", "1")],
    )
    .await;
    let api = visitor
        .get(format!("{}/api/questions/math", address))
        .send()
        .await
        .unwrap();
    assert_eq!(api.status(), StatusCode::OK);
}

#[tokio::test]
async fn admins_cannot_remove_or_demote_themselves() {
    let address = spawn_app().await;
    let admin = admin_client(&address).await;
    let admin_id = user_id(&admin, &address, "admin@schoollearn.com").await;

    post_form(&admin, format!("{}/admin/users/{}/delete", address, admin_id), &[]).await;
    let dashboard = get_json(&admin, format!("{}/admin", address)).await;
    assert_eq!(dashboard["flash"]["message"], "You cannot delete your own admin account.");

    post_form(
        &admin,
        format!("{}/admin/users/{}/toggle-admin", address, admin_id),
        &[],
    )
    .await;
    let dashboard = get_json(&admin, format!("{}/admin", address)).await;
    assert_eq!(dashboard["flash"]["message"], "You cannot change your own admin role.");
    assert_eq!(dashboard["users"][0]["is_admin"], true);

    post_form(&admin, format!("{}/admin/users/999/delete", address), &[]).await;
    let dashboard = get_json(&admin, format!("{}/admin", address)).await;
    assert_eq!(dashboard["flash"]["message"], "User not found.");
}

#[tokio::test]
async fn role_changes_and_deletions_apply_immediately() {
    let address = spawn_app().await;
    let admin = admin_client(&address).await;
    let (student, email) = student_client(&address).await;
    let id = user_id(&admin, &address, &email).await;

    // Promotion takes effect on the student's existing session
    post_form(&admin, format!("{}/admin/users/{}/toggle-admin", address, id), &[]).await;
    let page = student.get(format!("{}/admin", address)).send().await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);

    post_form(&admin, format!("{}/admin/users/{}/toggle-admin", address, id), &[]).await;
    let page = student.get(format!("{}/admin", address)).send().await.unwrap();
    assert!(page.status().is_redirection());

    // Deleting the account invalidates its session
    post_form(&admin, format!("{}/admin/users/{}/delete", address, id), &[]).await;
    let dashboard = get_json(&admin, format!("{}/admin", address)).await;
    assert_eq!(dashboard["flash"]["message"], "User deleted.");

    let api = student
        .get(format!("{}/api/student/analytics", address))
        .send()
        .await
        .unwrap();
    assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn uploaded_marks_feed_both_result_views() {
    let address = spawn_app().await;
    let admin = admin_client(&address).await;
    let (student, email) = student_client(&address).await;
    let upload_url = format!("{}/admin/marks/upload", address);

    let target = post_form(
        &admin,
        upload_url.clone(),
        &[
            ("student_email", email.to_uppercase().as_str()),
            ("exam_name", "Unit Test 1"),
            ("subject", "Science"),
            ("exam_date", "2025-03-14"),
            ("score", "45"),
            ("total", "60"),
        ],
    )
    .await;
    assert_eq!(target, "/admin");
    let dashboard = get_json(&admin, format!("{}/admin", address)).await;
    assert_eq!(dashboard["flash"]["message"], "Marks uploaded successfully.");

    let rejected = [
        (
            vec![("student_email", email.as_str()), ("exam_name", "X"), ("score", "70"), ("total", "60")],
            "Score must be between 0 and total marks.",
        ),
        (
            vec![("student_email", email.as_str()), ("exam_name", "X"), ("score", "ten"), ("total", "60")],
            "Score and total must be numeric.",
        ),
        (
            vec![("student_email", "nobody@example.com"), ("exam_name", "X"), ("score", "1"), ("total", "2")],
            "Student not found for provided email.",
        ),
        (
            vec![("student_email", "admin@schoollearn.com"), ("exam_name", "X"), ("score", "1"), ("total", "2")],
            "Marks can only be uploaded for student accounts.",
        ),
    ];
    for (form, message) in rejected {
        post_form(&admin, upload_url.clone(), &form).await;
        let dashboard = get_json(&admin, format!("{}/admin", address)).await;
        assert_eq!(dashboard["flash"]["message"], message);
    }

    let results = get_json(&student, format!("{}/api/student/results", address)).await;
    assert_eq!(results["total_records"], 1);
    assert_eq!(results["best_percentage"], json!(75.0));
    assert_eq!(results["recent_results"][0]["subject"], "Science");
    assert_eq!(results["recent_results"][0]["recorded_at_display"], "2025-03-14 00:00 UTC");

    let analytics = get_json(&admin, format!("{}/api/admin/analytics", address)).await;
    assert_eq!(analytics["total_records"], 1);
    assert_eq!(analytics["unique_students"], 1);
    assert_eq!(analytics["overall_average"], json!(75.0));
    assert_eq!(analytics["recent_entries"][0]["uploaded_by"], "admin@schoollearn.com");
}
