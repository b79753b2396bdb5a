use actix_cors::Cors;
use actix_web::{
    get, post, web, App, HttpResponse, HttpServer, Responder, Result as ActixResult,
};
use forgecore::{compile, EditableNode, GraphEdge};
use forgeregistry::{NodeRegistry, RegistryConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across handlers
struct AppState {
    registry: Arc<NodeRegistry>,
    workflows_dir: PathBuf,
}

/// Request body for graph compilation
#[derive(Debug, Deserialize)]
struct CompileRequest {
    #[serde(default)]
    nodes: Vec<EditableNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
}

/// Error response
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Health check endpoint
#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "forgeserver"
    }))
}

/// Current node catalog. Executors are not serializable and are dropped
/// from the payload.
#[get("/api/node-definitions")]
async fn node_definitions(data: web::Data<AppState>) -> ActixResult<impl Responder> {
    let catalog = data.registry.current_catalog().await;
    Ok(HttpResponse::Ok().json(&*catalog))
}

/// Rebuild the node catalog from all providers
#[post("/api/node-definitions/reload")]
async fn reload_definitions(data: web::Data<AppState>) -> ActixResult<impl Responder> {
    let catalog = data.registry.reload().await;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "loaded": catalog.len() })))
}

/// Compile an editor graph into its execution-ready form
#[post("/api/compile")]
async fn compile_graph(req: web::Json<CompileRequest>) -> ActixResult<impl Responder> {
    let req = req.into_inner();
    let graph = compile(&req.nodes, &req.edges);
    Ok(HttpResponse::Ok().json(graph))
}

/// List saved workflow names
#[get("/api/workflows")]
async fn list_workflows(data: web::Data<AppState>) -> ActixResult<impl Responder> {
    let mut names = Vec::new();
    if let Ok(mut entries) = tokio::fs::read_dir(&data.workflows_dir).await {
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
    }
    names.sort();
    Ok(HttpResponse::Ok().json(names))
}

/// Read a saved workflow
#[get("/api/workflows/{name}")]
async fn get_workflow(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    let name = sanitize_name(&path.into_inner());
    let file_path = data.workflows_dir.join(format!("{}.json", name));

    match tokio::fs::read(&file_path).await {
        Ok(raw) => match serde_json::from_slice::<serde_json::Value>(&raw) {
            Ok(workflow) => Ok(HttpResponse::Ok().json(workflow)),
            Err(e) => {
                warn!("Corrupt workflow file {:?}: {}", file_path, e);
                Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                    error: format!("Workflow '{}' is not valid JSON", name),
                }))
            }
        },
        Err(_) => Ok(HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
        })),
    }
}

/// Save a workflow under a sanitized name, wrapped in a version envelope
#[post("/api/workflows/{name}")]
async fn save_workflow(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<serde_json::Map<String, serde_json::Value>>,
) -> ActixResult<impl Responder> {
    let name = sanitize_name(&path.into_inner());
    let file_path = data.workflows_dir.join(format!("{}.json", name));

    let mut payload = serde_json::Map::new();
    payload.insert("version".to_string(), serde_json::json!(1.0));
    payload.insert(
        "timestamp".to_string(),
        serde_json::json!(chrono::Utc::now().to_rfc3339()),
    );
    payload.extend(body.into_inner());

    let raw = serde_json::to_vec_pretty(&payload).map_err(actix_web::error::ErrorInternalServerError)?;
    tokio::fs::write(&file_path, raw)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    info!("Saved workflow '{}'", name);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true, "name": name })))
}

/// Keep workflow names filesystem-safe: anything outside
/// [a-zA-Z0-9_- ] becomes an underscore.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting NodeForge server");

    let mut registry = NodeRegistry::new(RegistryConfig::from_env());
    for provider in forgenodes::builtin_providers() {
        registry.register_provider(provider);
    }
    let registry = Arc::new(registry);

    let catalog = registry.reload().await;
    info!("Node catalog ready: {} definitions", catalog.len());

    let workflows_dir = std::env::var("FORGE_WORKFLOWS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("workflows"));
    tokio::fs::create_dir_all(&workflows_dir).await?;

    let app_state = web::Data::new(AppState {
        registry,
        workflows_dir,
    });

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:4000".to_string());
    info!("Server starting on http://{}", bind_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(app_state.clone())
            .wrap(cors)
            .wrap(actix_web::middleware::Logger::default())
            .service(health_check)
            .service(node_definitions)
            .service(reload_definitions)
            .service(compile_graph)
            .service(list_workflows)
            .service(get_workflow)
            .service(save_workflow)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
