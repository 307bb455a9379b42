//! HTTP contract tests for the Todoist task source.

use gtd_clients::{RemoteError, TaskSource, TodoistClient};
use gtd_core::entities::MoveAck;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer) -> TodoistClient {
    TodoistClient::new("secret-token")
        .unwrap()
        .with_base_urls(format!("{}/rest/v2", server.uri()), format!("{}/sync/v9", server.uri()))
}

#[tokio::test]
async fn list_projects_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v2/projects"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "name": "Inbox", "url": "https://todoist.com/showProject?id=1"},
            {"id": "2", "name": "Work", "url": "https://todoist.com/showProject?id=2"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client(&server).list_projects().await.unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].name, "Work");
}

#[tokio::test]
async fn list_tasks_filters_by_project_server_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v2/tasks"))
        .and(query_param("project_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "10", "project_id": "2", "content": "Draft", "labels": ["next_action"],
             "created_at": "2024-01-01T00:00:00.000000Z", "priority": 2}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = client(&server).list_tasks(Some("2")).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].priority, 2);
}

#[tokio::test]
async fn non_success_status_is_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v2/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let err = client(&server).list_tasks(None).await.unwrap_err();
    assert!(matches!(err, RemoteError::Status { status: 401, .. }));
}

#[tokio::test]
async fn malformed_payload_is_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v2/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"projects": []})))
        .mount(&server)
        .await;

    let err = client(&server).list_projects().await.unwrap_err();
    assert!(matches!(err, RemoteError::Malformed(_)));
}

#[tokio::test]
async fn move_posts_a_single_item_move_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sync/v9/sync"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("commands="))
        .and(body_string_contains("item_move"))
        .respond_with(|request: &Request| {
            let body = String::from_utf8_lossy(&request.body).into_owned();
            let encoded = body.trim_start_matches("commands=");
            let decoded = urlencoding::decode(encoded).unwrap().into_owned();
            let commands: serde_json::Value = serde_json::from_str(&decoded).unwrap();
            let uuid = commands[0]["uuid"].as_str().unwrap().to_string();
            assert_eq!(commands[0]["args"]["id"], "10");
            assert_eq!(commands[0]["args"]["project_id"], "99");
            ResponseTemplate::new(200).set_body_json(json!({"sync_status": {uuid: "ok"}}))
        })
        .expect(1)
        .mount(&server)
        .await;

    let ack = client(&server).move_task("10", "99", false).await.unwrap();
    assert!(matches!(ack, MoveAck::Applied { .. }));
}

#[tokio::test]
async fn move_without_sync_status_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sync/v9/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"full_sync": false})))
        .mount(&server)
        .await;

    let err = client(&server).move_task("10", "99", false).await.unwrap_err();
    assert!(matches!(err, RemoteError::Malformed(_)));
}

#[tokio::test]
async fn dry_run_move_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let ack = client(&server).move_task("10", "99", true).await.unwrap();
    assert!(matches!(ack, MoveAck::DryRun { .. }));
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v2/projects"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&server)
        .await;

    let err = client(&server).list_projects().await.unwrap_err();
    assert!(matches!(
        err,
        RemoteError::RateLimited {
            retry_after_secs: 12
        }
    ));
}
