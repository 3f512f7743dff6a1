mod common;

use axum::http::StatusCode;
use sea_orm::EntityTrait;
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/v1/projects")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "name": "My New Project"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "My New Project");
    assert!(body["id"].as_str().is_some());
    assert_eq!(body["owner_id"].as_str().unwrap(), auth.user_id.to_string());
    // Description defaults to empty, not null
    assert_eq!(body["description"].as_str().unwrap(), "");
}

#[tokio::test]
async fn test_create_project_creates_owner_membership() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/v1/projects")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "name": "Membership Check",
            "description": "Exactly one owner row"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    let project_id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();

    // Immediately after creation there is exactly one membership: the owner
    let members = factory.list_members(project_id).await;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, auth.user_id);
    assert_eq!(members[0].role.as_str(), "owner");
}

#[tokio::test]
async fn test_create_project_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/projects")
        .json(&json!({
            "name": "My Project"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_projects_empty() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .get("/api/v1/projects")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_projects_newest_first() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    factory
        .create_project_with_name(auth.user_id, "First")
        .await;
    factory
        .create_project_with_name(auth.user_id, "Second")
        .await;
    factory
        .create_project_with_name(auth.user_id, "Third")
        .await;

    let response = app
        .server
        .get("/api/v1/projects")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let projects = body.as_array().unwrap();
    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0]["name"].as_str().unwrap(), "Third");
    assert_eq!(projects[1]["name"].as_str().unwrap(), "Second");
    assert_eq!(projects[2]["name"].as_str().unwrap(), "First");
}

#[tokio::test]
async fn test_list_projects_includes_joined() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let owner = factory.create_user().await;
    let project = factory.create_project(owner.user_id).await;

    // A user added as plain member sees the project in their listing
    let member = factory
        .create_member(project.id, taskflow::models::ProjectRole::Member)
        .await;

    let response = app
        .server
        .get("/api/v1/projects")
        .add_header("Authorization", member.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let projects = body.as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"].as_str().unwrap(), project.id.to_string());
}

#[tokio::test]
async fn test_list_projects_only_membered() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth1 = factory.create_user().await;
    factory.create_project(auth1.user_id).await;
    factory.create_project(auth1.user_id).await;

    let auth2 = factory.create_user().await;
    factory.create_project(auth2.user_id).await;

    let response = app
        .server
        .get("/api/v1/projects")
        .add_header("Authorization", auth1.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_project_with_members() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project(auth.user_id).await;

    let response = app
        .server
        .get(&format!("/api/v1/projects/{}", project.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["id"].as_str().unwrap(), project.id.to_string());
    assert_eq!(body["name"].as_str().unwrap(), project.name);

    let members = body["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["role"].as_str().unwrap(), "owner");
    assert_eq!(
        members[0]["user_id"].as_str().unwrap(),
        auth.user_id.to_string()
    );
}

#[tokio::test]
async fn test_get_project_not_found() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let fake_id = Uuid::new_v4();
    let response = app
        .server
        .get(&format!("/api/v1/projects/{}", fake_id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_project_as_stranger_forbidden() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth1 = factory.create_user().await;
    let project = factory.create_project(auth1.user_id).await;

    // Authenticated non-member: the project exists, so this is 403 not 404
    let auth2 = factory.create_user().await;
    let response = app
        .server
        .get(&format!("/api/v1/projects/{}", project.id))
        .add_header("Authorization", auth2.auth_header())
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project(auth.user_id).await;

    let response = app
        .server
        .put(&format!("/api/v1/projects/{}", project.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "name": "Updated Project Name",
            "description": "Updated description"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Updated Project Name");
    assert_eq!(body["description"].as_str().unwrap(), "Updated description");
}

#[tokio::test]
async fn test_update_project_partial() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory
        .create_project_with_name(auth.user_id, "Original Name")
        .await;

    // Update only description; the absent name field stays untouched
    let response = app
        .server
        .put(&format!("/api/v1/projects/{}", project.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "description": "New description only"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Original Name");
    assert_eq!(
        body["description"].as_str().unwrap(),
        "New description only"
    );
}

#[tokio::test]
async fn test_delete_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project(auth.user_id).await;

    let response = app
        .server
        .delete(&format!("/api/v1/projects/{}", project.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    // Verify it's deleted
    let get_response = app
        .server
        .get(&format!("/api/v1/projects/{}", project.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    get_response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_project_cascades() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let project = factory.create_project(auth.user_id).await;
    let task = factory.create_task(project.id).await;
    let comment = factory.create_comment(task.id, auth.user_id, "gone soon").await;

    let response = app
        .server
        .delete(&format!("/api/v1/projects/{}", project.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    // Check the store directly, not just the API surface
    let task_row = taskflow::entity::Task::find_by_id(task.id)
        .one(&app.state.db)
        .await
        .unwrap();
    assert!(task_row.is_none());

    let comment_row = taskflow::entity::Comment::find_by_id(comment.id)
        .one(&app.state.db)
        .await
        .unwrap();
    assert!(comment_row.is_none());

    let members = factory.list_members(project.id).await;
    assert!(members.is_empty());
}

#[tokio::test]
async fn test_delete_project_not_found() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let fake_id = Uuid::new_v4();
    let response = app
        .server
        .delete(&format!("/api/v1/projects/{}", fake_id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
