//! The REST client against an in-process stand-in for the agents API.
//!
//! The server serves a two-page flow listing, one flow resource and a set
//! of failing resources, and rejects any request without the expected
//! bearer token.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cx_agents::{AgentsApi, RestAgentsClient};
use cx_domain::config::ApiConfig;
use cx_domain::error::Error;
use serde_json::json;
use tokio::net::TcpListener;

const AGENT: &str = "projects/acme/locations/global/agents/a1";
const TOKEN: &str = "test-token";

// ── Stand-in server ─────────────────────────────────────────────────────

async fn serve_v3(
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let expected = format!("Bearer {TOKEN}");
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "missing or bad token").into_response();
    }

    let path = path.trim_start_matches('/');
    if path == format!("{AGENT}/flows") {
        if query.get("pageSize").map(String::as_str) != Some("2") {
            return (StatusCode::BAD_REQUEST, "unexpected pageSize").into_response();
        }
        return match query.get("pageToken").map(String::as_str) {
            None => Json(json!({
                "flows": [
                    { "name": format!("{AGENT}/flows/start"), "displayName": "Default Start Flow" },
                    { "name": format!("{AGENT}/flows/billing"), "displayName": "Billing" }
                ],
                "nextPageToken": "page-2"
            }))
            .into_response(),
            Some("page-2") => Json(json!({
                "flows": [{ "name": format!("{AGENT}/flows/help"), "displayName": "Help" }],
                "nextPageToken": ""
            }))
            .into_response(),
            Some(_) => (StatusCode::BAD_REQUEST, "unknown pageToken").into_response(),
        };
    }

    match path.rsplit('/').next() {
        Some("start") => Json(json!({
            "name": format!("{AGENT}/flows/start"),
            "displayName": "Default Start Flow",
            "transitionRoutes": [{ "condition": "true", "targetPage": format!("{AGENT}/flows/start/pages/end") }]
        }))
        .into_response(),
        Some("locked") => (StatusCode::FORBIDDEN, "permission denied").into_response(),
        Some("broken") => (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded").into_response(),
        _ => (StatusCode::NOT_FOUND, "no such resource").into_response(),
    }
}

async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/v3/*path", get(serve_v3));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, token: &str) -> RestAgentsClient {
    RestAgentsClient::new(&ApiConfig {
        base_url: Some(format!("http://{addr}")),
        access_token: Some(token.into()),
        page_size: 2,
        timeout_ms: 5_000,
        ..ApiConfig::default()
    })
    .unwrap()
}

// ── Tests ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_flows_follows_next_page_token() {
    let addr = start_server().await;
    let api = client(addr, TOKEN);

    let flows = tokio::time::timeout(Duration::from_secs(5), api.list_flows(AGENT))
        .await
        .expect("pagination did not terminate")
        .unwrap();

    let names: Vec<&str> = flows.iter().map(|f| f.display_name.as_str()).collect();
    assert_eq!(names, vec!["Default Start Flow", "Billing", "Help"]);
}

#[tokio::test]
async fn get_flow_decodes_resource() {
    let addr = start_server().await;
    let api = client(addr, TOKEN);

    let flow = api.get_flow(&format!("{AGENT}/flows/start")).await.unwrap();
    assert_eq!(flow.display_name, "Default Start Flow");
    assert_eq!(
        flow.transition_routes[0].target.page_id(),
        Some(format!("{AGENT}/flows/start/pages/end").as_str())
    );
}

#[tokio::test]
async fn error_statuses_map_to_domain_errors() {
    let addr = start_server().await;
    let api = client(addr, TOKEN);

    let missing = api.get_flow(&format!("{AGENT}/flows/missing")).await;
    assert!(matches!(missing, Err(Error::NotFound(_))), "{missing:?}");

    let locked = api.get_page(&format!("{AGENT}/flows/start/pages/locked")).await;
    assert!(matches!(locked, Err(Error::Auth(_))), "{locked:?}");

    match api.get_flow(&format!("{AGENT}/flows/broken")).await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("backend exploded"), "{message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn bad_token_is_auth_error() {
    let addr = start_server().await;
    let api = client(addr, "wrong-token");

    let err = api.list_flows(AGENT).await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)), "{err:?}");
}
