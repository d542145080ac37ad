//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use route_tree::{HttpServer, ServerConfig};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Create empty marker files (and their parent directories) under `root`.
pub fn write_tree(root: &Path, markers: &[&str]) {
    for marker in markers {
        let path = root.join(marker);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }
}

/// Serve `router` on an ephemeral port. Dropping the sender stops the server.
pub async fn serve(router: Router) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = HttpServer::new(&ServerConfig::default(), router);
    tokio::spawn(async move {
        let _ = server
            .run(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    (addr, tx)
}

pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}
