use beesight_client::{ApiClient, ClientConfig, ClientError};
use beesight_types::{AppForm, KeyValue, LicenseForm, ListQuery, ProjectForm, UserForm};
use httpmock::prelude::*;
use serde_json::json;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&ClientConfig {
        base_url: server.url("/api"),
        ..Default::default()
    })
    .unwrap()
    .with_token("tok-123")
}

fn pagination(current: u32, last: u32) -> serde_json::Value {
    let next = (current < last).then(|| format!("http://backend/api/projects?page={}", current + 1));
    let prev = (current > 1).then(|| format!("http://backend/api/projects?page={}", current - 1));
    let to = if current == last { 12 } else { current * 10 };
    json!({
        "total": 12,
        "per_page": 10,
        "current_page": current,
        "last_page": last,
        "next_page_url": next,
        "prev_page_url": prev,
        "from": (current - 1) * 10 + 1,
        "to": to,
        "links": [
            {"url": null, "label": "&laquo; Previous", "active": false},
            {"url": "http://backend/api/projects?page=1", "label": "1", "active": current == 1},
            {"url": "http://backend/api/projects?page=2", "label": "2", "active": current == 2},
            {"url": null, "label": "Next &raquo;", "active": false}
        ]
    })
}

#[tokio::test]
async fn login_posts_credentials_without_bearer() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/api/login")
            .json_body(json!({"login_id": "admin", "password": "secret"}));
        then.status(200).json_body(json!({"token": "jwt-abc"}));
    });

    let anonymous = ApiClient::new(&ClientConfig {
        base_url: server.url("/api"),
        ..Default::default()
    })
    .unwrap();
    let response = anonymous.auth().login("admin", "secret").await.unwrap();

    login.assert();
    assert_eq!(response.token, "jwt-abc");
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let server = MockServer::start();
    let user = server.mock(|when, then| {
        when.method(GET)
            .path("/api/user")
            .header("authorization", "Bearer tok-123");
        then.status(200)
            .json_body(json!({"id": 1, "login_id": "admin", "name": "Admin"}));
    });

    let current = client(&server).auth().current_user().await.unwrap();

    user.assert();
    assert_eq!(current.id, "1");
    assert_eq!(current.display_name(), "Admin");
}

#[tokio::test]
async fn unauthorized_maps_to_dedicated_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/projects");
        then.status(401).json_body(json!({"message": "Unauthenticated."}));
    });

    let err = client(&server)
        .projects()
        .list(&ListQuery::page(1))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn project_page_carries_pagination() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/api/projects")
            .query_param("page", "2");
        then.status(200).json_body(json!({
            "success": true,
            "data": [
                {"project_id": 11, "name": "Shop A", "api_key": "k1", "status": "active",
                 "activated_count": 2, "terminal_limit": 5, "open_at": "2025-01-01",
                 "close_at": "2025-12-31", "description": null},
                {"project_id": 12, "name": "Shop B", "api_key": "k2", "status": "closed",
                 "activated_count": 0, "terminal_limit": 1, "open_at": "2025-01-01",
                 "close_at": "2025-06-30", "description": "demo"}
            ],
            "pagination": pagination(2, 2)
        }));
    });

    let page = client(&server)
        .projects()
        .list(&ListQuery::page(2))
        .await
        .unwrap();

    list.assert();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].description, "demo");
    let pagination = page.pagination.unwrap();
    assert_eq!(pagination.next_page(), None);
    assert_eq!(pagination.prev_page(), Some(1));
    assert_eq!(pagination.buttons().len(), 2);
}

#[tokio::test]
async fn dashboard_search_sends_search_and_limit() {
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/api/projects")
            .query_param("search", "shop")
            .query_param("limit", "5");
        then.status(200).json_body(json!({"success": true, "data": []}));
    });

    let query = ListQuery::default().with_search("shop").with_limit(5);
    let page = client(&server).projects().list(&query).await.unwrap();

    search.assert();
    assert!(page.items.is_empty());
    assert!(page.pagination.is_none());
}

#[tokio::test]
async fn success_false_is_rejected_with_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/api/projects/9");
        then.status(200)
            .json_body(json!({"success": false, "message": "Project has terminals"}));
    });

    let err = client(&server).projects().delete(9).await.unwrap_err();

    assert!(matches!(err, ClientError::Rejected { .. }));
    assert_eq!(err.user_message("Delete failed"), "Project has terminals");
}

#[tokio::test]
async fn validation_errors_survive_422() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/licenses");
        then.status(422).json_body(json!({
            "success": false,
            "message": "The given data was invalid.",
            "errors": {"name": ["The name field is required."], "limit": ["Must be numeric."]}
        }));
    });

    let form = LicenseForm {
        license_key: vec![KeyValue {
            key: "serial".into(),
            value: "X".into(),
        }],
        ..Default::default()
    };
    let err = client(&server).licenses().create(&form).await.unwrap_err();

    match &err {
        ClientError::Status { status, .. } => assert_eq!(*status, 422),
        other => panic!("unexpected error {other:?}"),
    }
    let errors = err.field_errors().unwrap();
    assert_eq!(errors.first("name"), Some("The name field is required."));
    assert_eq!(err.user_message("Create failed"), "The given data was invalid.");
}

#[tokio::test]
async fn unprocessable_with_empty_error_list_keeps_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/licenses");
        then.status(422).json_body(json!({
            "success": false,
            "message": "License name already exists.",
            "errors": []
        }));
    });

    let err = client(&server).licenses().create(&LicenseForm::default()).await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 422, .. }));
    assert!(err.field_errors().is_none());
    assert_eq!(err.user_message("Create failed"), "License name already exists.");
}

#[tokio::test]
async fn listing_with_empty_error_list_succeeds() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/projects");
        then.status(200).json_body(json!({
            "success": true,
            "message": "ok",
            "data": [{"project_id": 4, "name": "Alpha"}],
            "errors": []
        }));
    });

    let page = client(&server).projects().list(&ListQuery::page(1)).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Alpha");
}

#[tokio::test]
async fn status_without_envelope_uses_fallback() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/apps");
        then.status(500).body("<html>oops</html>");
    });

    let err = client(&server).apps().list().await.unwrap_err();

    assert_eq!(err.user_message("Could not load apps"), "Could not load apps (status: 500)");
}

#[tokio::test]
async fn project_update_sends_type_field() {
    let server = MockServer::start();
    let update = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/projects/3")
            .json_body_partial(r#"{"type": "2", "terminal_limit": 4}"#);
        then.status(200)
            .json_body(json!({"success": true, "message": "updated"}));
    });

    let form = ProjectForm {
        kind: "2".into(),
        terminal_limit: 4,
        ..Default::default()
    };
    let message = client(&server).projects().update(3, &form).await.unwrap();

    update.assert();
    assert_eq!(message.as_deref(), Some("updated"));
}

#[tokio::test]
async fn detail_endpoints_decode() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/projects/5");
        then.status(200).json_body(json!({
            "success": true,
            "data": {"id": 5, "name": "Shop", "type": 1, "terminal_limit": 3,
                     "open_at": "2025-01-01 00:00:00", "close_at": "2025-12-31 00:00:00"}
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/projects/5/terminals")
            .query_param("page", "1");
        then.status(200).json_body(json!({
            "success": true,
            "data": [{"terminal_id": "T-1", "name": "iPad", "alias": null, "project_name": "Shop",
                      "serial_no": "SN1", "os": "iOS", "os_ver": "17.2", "description": null,
                      "app": {"app_id": 2, "name": "Viewer", "description": null}}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/projects/5/auth/histories")
            .query_param("page", "1");
        then.status(200).json_body(json!({
            "success": true,
            "data": [{"auth_history_id": "h1", "project_id": 5, "project_name": "Shop",
                      "action": "activate", "result": "success", "app_name": "Viewer",
                      "app_version": "1.0", "authenticate_at": "2025-02-01 10:00:00"}],
            "pagination": pagination(1, 1)
        }));
    });

    let api = client(&server);
    let detail = api.projects().get(5).await.unwrap();
    let terminals = api.projects().terminals(5, 1).await.unwrap();
    let histories = api.projects().auth_histories(5, 1).await.unwrap();

    assert_eq!(detail.key(), Some(5));
    assert_eq!(detail.kind, "1");
    assert_eq!(terminals.items[0].app.as_ref().unwrap().name, "Viewer");
    assert_eq!(histories.items[0].app_label(), "Viewer v1.0");
}

#[tokio::test]
async fn missing_detail_data_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/apps/4");
        then.status(200).json_body(json!({"success": true}));
    });

    let err = client(&server).apps().get(4).await.unwrap_err();

    assert!(matches!(err, ClientError::MissingData));
}

#[tokio::test]
async fn app_and_user_writes() {
    let server = MockServer::start();
    let create_app = server.mock(|when, then| {
        when.method(POST)
            .path("/api/apps")
            .json_body(json!({"name": "Viewer", "version": "1.0", "status": "active",
                              "description": "", "license_ids": [4, 6]}));
        then.status(201)
            .json_body(json!({"success": true, "message": "created"}));
    });
    let create_user = server.mock(|when, then| {
        when.method(POST)
            .path("/api/users")
            .json_body(json!({"name": "Kim", "login_id": "kim", "password": "pw"}));
        then.status(200).json_body(json!({"success": true}));
    });

    let api = client(&server);
    let app = AppForm {
        name: "Viewer".into(),
        version: "1.0".into(),
        license_ids: vec![4, 6],
        ..Default::default()
    };
    let user = UserForm {
        name: "Kim".into(),
        login_id: "kim".into(),
        password: "pw".into(),
    };

    assert_eq!(api.apps().create(&app).await.unwrap().as_deref(), Some("created"));
    assert_eq!(api.users().create(&user).await.unwrap(), None);
    create_app.assert();
    create_user.assert();
}

#[tokio::test]
async fn latest_histories_are_truncated() {
    let server = MockServer::start();
    let rows: Vec<_> = (0..8)
        .map(|i| json!({"auth_history_id": format!("h{i}"), "project_id": 1, "action": "activate"}))
        .collect();
    let latest = server.mock(|when, then| {
        when.method(GET)
            .path("/api/auth/histories")
            .query_param("limit", "5");
        then.status(200)
            .json_body(json!({"success": true, "data": rows}));
    });

    let records = client(&server).histories().latest(5).await.unwrap();

    latest.assert();
    assert_eq!(records.len(), 5);
    assert_eq!(records[4].auth_history_id, "h4");
}
