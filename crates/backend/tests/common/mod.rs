use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use mimamori_backend::BackendClient;

/// Requests seen by a mock backend: `(path_and_query, body)`.
pub type Seen = Arc<Mutex<Vec<(String, String)>>>;

/// Serve `router` on an ephemeral localhost port and return its address.
pub async fn spawn_backend(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Client pointed at a mock backend (with a trailing slash, which must be tolerated).
pub fn client_for(addr: SocketAddr) -> BackendClient {
    BackendClient::new(&format!("http://{addr}/"), Duration::from_secs(5)).unwrap()
}

/// Client pointed at a port nothing listens on.
pub async fn unreachable_client() -> BackendClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    BackendClient::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap()
}
