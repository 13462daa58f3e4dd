use axum::http::{Method, StatusCode};
use cfgplane::domain::Configuration;

use crate::support::{read_json, read_text, send_request, setup_test_app, TestApp};

const BODY: &str = "{\"no_op\":\"X\", \"watch\":[\"a\",\"b\"]}\n";

const CREATE_PATH: &str = "/api/v1/client/cluster/1/configuration/create";

async fn create_configuration(app: &TestApp, cluster: i64, body: &str) -> Vec<Configuration> {
    let path = format!(
        "/api/v1/client/cluster/{cluster}/configuration/create?{}",
        "username=tester&reason=testing&description=initial"
    );
    let response = send_request(app, Method::POST, &path, Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    read_json(response).await
}

async fn list_all(app: &TestApp) -> Vec<Configuration> {
    let response = send_request(app, Method::GET, "/api/v1/client/configuration", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    read_json(response).await
}

#[tokio::test]
async fn create_configuration_returns_inactive_entry_with_metadata() {
    let app = setup_test_app().await;

    let configurations = create_configuration(&app, 1, BODY).await;
    assert_eq!(configurations.len(), 1);

    let created = &configurations[0];
    assert_eq!(created.cluster_id.value(), 1);
    assert_eq!(created.username, "tester");
    assert_eq!(created.reason, "testing");
    assert_eq!(created.description, "initial");
    assert!(!created.active);

    let response =
        send_request(&app, Method::GET, "/api/v1/client/cluster/1/configuration", None).await;
    let listed: Vec<Configuration> = read_json(response).await;
    assert_eq!(listed, configurations);

    let calls = app.audit.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "NewClusterConfiguration");
    assert_eq!(calls[0].1, "tester");
}

#[tokio::test]
async fn configuration_body_round_trips_byte_for_byte() {
    let app = setup_test_app().await;
    let id = create_configuration(&app, 2, BODY).await[0].id;

    let response =
        send_request(&app, Method::GET, &format!("/api/v1/client/configuration/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, BODY);
}

#[tokio::test]
async fn create_configuration_validates_parameters_in_order() {
    let app = setup_test_app().await;

    let cases = [
        (
            format!("{CREATE_PATH}?reason=r&description=d"),
            Some(BODY),
            "User name needs to be specified",
        ),
        (
            format!("{CREATE_PATH}?username=&reason=r&description=d"),
            Some(BODY),
            "User name needs to be specified",
        ),
        (
            format!("{CREATE_PATH}?username=u&description=d"),
            Some(BODY),
            "Reason needs to be specified",
        ),
        (
            format!("{CREATE_PATH}?username=u&reason=r"),
            Some(BODY),
            "Description needs to be specified",
        ),
        (
            format!("{CREATE_PATH}?username=u&reason=r&description=d"),
            None,
            "Configuration needs to be provided in the request body",
        ),
        (CREATE_PATH.to_string(), None, "User name needs to be specified"),
    ];

    for (path, body, message) in cases {
        let response = send_request(&app, Method::POST, &path, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(read_text(response).await, message, "{path}");
    }

    assert!(list_all(&app).await.is_empty());
    assert!(app.audit.calls().is_empty());
}

#[tokio::test]
async fn create_configuration_for_unknown_cluster_fails() {
    let app = setup_test_app().await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/v1/client/cluster/99/configuration/create?username=u&reason=r&description=d",
        Some(BODY),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(list_all(&app).await.is_empty());
    assert!(app.audit.calls().is_empty());

    let response = send_request(
        &app,
        Method::POST,
        "/api/v1/client/cluster/abc/configuration/create?username=u&reason=r&description=d",
        Some(BODY),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.audit.calls().is_empty());
}

#[tokio::test]
async fn list_configurations_for_unknown_cluster_fails() {
    let app = setup_test_app().await;

    let response =
        send_request(&app, Method::GET, "/api/v1/client/cluster/77/configuration", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn enable_and_disable_are_idempotent() {
    let app = setup_test_app().await;
    let id = create_configuration(&app, 3, BODY).await[0].id;
    let enable = format!("/api/v1/client/configuration/{id}/enable?username=admin");
    let disable = format!("/api/v1/client/configuration/{id}/disable");

    for _ in 0..2 {
        let response = send_request(&app, Method::PUT, &enable, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_text(response).await, "enabled");
        assert!(list_all(&app).await[0].active);
    }

    for _ in 0..2 {
        let response = send_request(&app, Method::PUT, &disable, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_text(response).await, "disabled");
        assert!(!list_all(&app).await[0].active);
    }

    let actions: Vec<(String, String)> =
        app.audit.calls().into_iter().skip(1).map(|(action, actor, _)| (action, actor)).collect();
    assert_eq!(
        actions,
        vec![
            ("EnableClusterConfiguration".to_string(), "admin".to_string()),
            ("EnableClusterConfiguration".to_string(), "admin".to_string()),
            ("DisableClusterConfiguration".to_string(), "anonymous".to_string()),
            ("DisableClusterConfiguration".to_string(), "anonymous".to_string()),
        ]
    );
}

#[tokio::test]
async fn enable_unknown_configuration_fails() {
    let app = setup_test_app().await;

    let response =
        send_request(&app, Method::PUT, "/api/v1/client/configuration/1234/enable", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        send_request(&app, Method::PUT, "/api/v1/client/configuration/one/disable", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_text(response).await.starts_with("Invalid configuration ID 'one'"));
}

#[tokio::test]
async fn delete_configuration() {
    let app = setup_test_app().await;
    let id = create_configuration(&app, 0, BODY).await[0].id;
    let path = format!("/api/v1/client/configuration/{id}");

    let response = send_request(&app, Method::DELETE, &path, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, "Deleted");
    assert!(list_all(&app).await.is_empty());

    let response = send_request(&app, Method::DELETE, &path, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_request(&app, Method::GET, &path, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let calls = app.audit.calls();
    let expected = (
        "DeleteClusterConfigurationById".to_string(),
        "anonymous".to_string(),
        id.to_string(),
    );
    assert_eq!(calls[1], expected);
}

#[tokio::test]
async fn cluster_wide_enable_and_disable() {
    let app = setup_test_app().await;
    create_configuration(&app, 4, "first").await;
    create_configuration(&app, 4, "second").await;
    create_configuration(&app, 0, "other").await;

    let response = send_request(
        &app,
        Method::PUT,
        "/api/v1/client/cluster/4/configuration/enable?username=ops&reason=rollout",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let enabled: Vec<Configuration> = read_json(response).await;
    assert_eq!(enabled.len(), 2);
    assert!(enabled.iter().all(|c| c.active && c.username == "ops" && c.reason == "rollout"));

    let response = send_request(
        &app,
        Method::PUT,
        "/api/v1/client/cluster/4/configuration/disable?username=ops&reason=rollback",
        None,
    )
    .await;
    let disabled: Vec<Configuration> = read_json(response).await;
    assert!(disabled.iter().all(|c| !c.active && c.reason == "rollback"));

    let other = list_all(&app).await.into_iter().find(|c| c.body == "other").expect("other");
    assert!(!other.active);

    let calls = app.audit.calls();
    let audited = |action: &str| (action.to_string(), "ops".to_string(), "4".to_string());
    assert_eq!(calls[3], audited("EnableClusterConfiguration"));
    assert_eq!(calls[4], audited("DisableClusterConfiguration"));
}

#[tokio::test]
async fn cluster_wide_changes_require_username_and_reason() {
    let app = setup_test_app().await;
    create_configuration(&app, 2, BODY).await;

    let enable = "/api/v1/client/cluster/2/configuration/enable";
    let disable = "/api/v1/client/cluster/2/configuration/disable";
    for (path, message) in [
        (format!("{enable}?reason=r"), "User name needs to be specified"),
        (format!("{disable}?username=u"), "Reason needs to be specified"),
        (format!("{enable}?username=&reason=r"), "User name needs to be specified"),
    ] {
        let response = send_request(&app, Method::PUT, &path, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(read_text(response).await, message, "{path}");
    }

    let stored = list_all(&app).await;
    assert!(!stored[0].active);
    assert_eq!(stored[0].username, "tester");
    assert_eq!(app.audit.calls().len(), 1);
}

#[tokio::test]
async fn deleting_cluster_removes_its_configurations() {
    let app = setup_test_app().await;
    create_configuration(&app, 1, "gone").await;
    create_configuration(&app, 2, "kept").await;

    let response = send_request(&app, Method::DELETE, "/api/v1/client/cluster/1", None).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let remaining = list_all(&app).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].body, "kept");
}
