use axum::{Json, Router};
use route_tree::{mount_routes, HandlerRegistry, HttpServer, ServerConfig};
use serde_json::json;

#[tokio::main]
async fn main() {
    let config = ServerConfig::default();
    route_tree::observability::logging::init(&config.observability);

    // A throwaway routes tree: the directories are the API shape.
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    for marker in ["api/hello/get.rs", "api/world/get.rs", "api/world/post.rs"] {
        let path = root.join(marker);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    let registry = HandlerRegistry::new()
        .handler("api/hello/get", || async { "Hello from the route tree!" })
        .handler("api/world/get", || async {
            Json(json!({ "greeting": "world" }))
        })
        .handler("api/world/post", || async { "created" });

    let mounted = mount_routes(root, Router::new(), &registry).await.unwrap();
    println!(
        "Mounted {} nodes with {} handlers",
        mounted.report.nodes_mounted, mounted.report.handlers_bound
    );

    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    println!(
        "Blog API is listening on http://{}",
        listener.local_addr().unwrap()
    );

    let server = HttpServer::new(&config, mounted.router);
    server
        .run(listener, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .unwrap();
}
