use axum::http::{Method, StatusCode};
use cfgplane::domain::Cluster;

use crate::support::{read_json, read_text, send_request, setup_test_app};

fn cluster(id: i64) -> Cluster {
    Cluster::new(id, format!("cluster{id}"))
}

fn seeded() -> Vec<Cluster> {
    (0..=4).map(cluster).collect()
}

#[tokio::test]
async fn list_clusters_returns_seeded_clusters() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/api/v1/client/cluster", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let clusters: Vec<Cluster> = read_json(response).await;
    assert_eq!(clusters, seeded());
}

#[tokio::test]
async fn create_cluster_appends_exactly_once() {
    let app = setup_test_app().await;

    let response =
        send_request(&app, Method::POST, "/api/v1/client/cluster/5/cluster5", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Cluster = read_json(response).await;
    assert_eq!(created, cluster(5));

    let response = send_request(&app, Method::GET, "/api/v1/client/cluster", None).await;
    let clusters: Vec<Cluster> = read_json(response).await;

    let mut expected = seeded();
    expected.push(cluster(5));
    assert_eq!(clusters, expected);
}

#[tokio::test]
async fn create_cluster_named_configuration() {
    let app = setup_test_app().await;

    let response =
        send_request(&app, Method::POST, "/api/v1/client/cluster/7/configuration", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Cluster = read_json(response).await;
    assert_eq!(created, Cluster::new(7_i64, "configuration"));

    let response =
        send_request(&app, Method::GET, "/api/v1/client/cluster/7/configuration", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let configurations: Vec<serde_json::Value> = read_json(response).await;
    assert!(configurations.is_empty());

    let response =
        send_request(&app, Method::POST, "/api/v1/client/cluster/y/configuration", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_cluster_rejects_duplicates_and_bad_ids() {
    let app = setup_test_app().await;

    let response =
        send_request(&app, Method::POST, "/api/v1/client/cluster/1/another", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        send_request(&app, Method::POST, "/api/v1/client/cluster/9/cluster2", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_request(&app, Method::POST, "/api/v1/client/cluster/x/named", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_text(response).await.starts_with("Invalid cluster ID 'x'"));

    let response = send_request(&app, Method::GET, "/api/v1/client/cluster", None).await;
    let clusters: Vec<Cluster> = read_json(response).await;
    assert_eq!(clusters, seeded());
}

#[tokio::test]
async fn delete_cluster_removes_only_that_entry() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::DELETE, "/api/v1/client/cluster/4", None).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = send_request(&app, Method::GET, "/api/v1/client/cluster", None).await;
    let clusters: Vec<Cluster> = read_json(response).await;
    assert_eq!(clusters, seeded()[..4].to_vec());
}

#[tokio::test]
async fn delete_unknown_cluster_is_accepted_and_changes_nothing() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::DELETE, "/api/v1/client/cluster/40", None).await;
    assert!(response.status().is_success());

    let response = send_request(&app, Method::GET, "/api/v1/client/cluster", None).await;
    let clusters: Vec<Cluster> = read_json(response).await;
    assert_eq!(clusters, seeded());
}

#[tokio::test]
async fn delete_cluster_with_bad_id_is_rejected() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::DELETE, "/api/v1/client/cluster/four", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_and_search_cluster() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/api/v1/client/cluster/3", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json::<Cluster>(response).await, cluster(3));

    let response = send_request(&app, Method::GET, "/api/v1/client/cluster/33", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        send_request(&app, Method::GET, "/api/v1/client/cluster/search?name=cluster2", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json::<Cluster>(response).await, cluster(2));

    let response =
        send_request(&app, Method::GET, "/api/v1/client/cluster/search?id=1", None).await;
    assert_eq!(read_json::<Cluster>(response).await, cluster(1));

    let response = send_request(&app, Method::GET, "/api/v1/client/cluster/search", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        send_request(&app, Method::GET, "/api/v1/client/cluster/search?name=nope", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
