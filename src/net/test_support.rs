//! In-process HTTP fixtures shared by the `net` tests.

use std::sync::Arc;

use axum::Router;

use super::redirect::RecordingNavigator;
use super::request::ApiClient;
use crate::config::ClientConfig;

pub(crate) const CURRENT_PATH: &str = "/quizzes";

/// Serve `router` on an ephemeral local port and return its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub(crate) fn client_at(base_url: &str) -> (ApiClient, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let config = ClientConfig::new(base_url)
        .unwrap()
        .with_current_path(CURRENT_PATH)
        .unwrap();
    let client = ApiClient::new(&config, navigator.clone()).unwrap();
    (client, navigator)
}

pub(crate) async fn client_for(router: Router) -> (ApiClient, Arc<RecordingNavigator>) {
    let base_url = serve(router).await;
    client_at(&base_url)
}

/// A client pointed at a port nothing listens on.
pub(crate) async fn unreachable_client() -> (ApiClient, Arc<RecordingNavigator>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    client_at(&format!("http://{addr}"))
}
