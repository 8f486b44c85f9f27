//! JSON-over-HTTP surface for the client service.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::db::ClientStore;
use crate::error::ServiceError;
use crate::models::{Client, ClientFields, ClientId};
use crate::service::ClientService;

pub const CREATED: &str = "Cliente registrado com sucesso";
pub const UPDATED: &str = "Cliente atualizado com sucesso";
pub const REMOVED: &str = "Cliente excluido com sucesso";

type SharedService<S> = Arc<ClientService<S>>;

/// Request body for create and update
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClientPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub plan: Option<String>,
    pub goal: Option<String>,
}

impl ClientPayload {
    pub fn into_fields(self) -> ClientFields {
        [self.name, self.email, self.phone, self.address, self.plan, self.goal]
    }
}

pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::Validation(e) => {
                warn!(errors = ?e.errors, "rejected client data");
                let body = json!({ "message": e.to_string(), "errors": e.errors });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ServiceError::Store(e) => {
                error!(error = %e, "store failure");
                let body = json!({ "message": e.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

pub fn router<S: ClientStore + 'static>(service: SharedService<S>) -> Router {
    Router::new()
        .route("/", get(list_clients::<S>).post(create_client::<S>))
        .route("/:id", put(update_client::<S>).delete(remove_client::<S>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve `app` on `listener` until Ctrl-C
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

async fn list_clients<S: ClientStore>(
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = service.list().await?;
    Ok(Json(clients))
}

async fn create_client<S: ClientStore>(
    State(service): State<SharedService<S>>,
    Json(payload): Json<ClientPayload>,
) -> Result<Json<&'static str>, ApiError> {
    service.create(payload.into_fields()).await?;
    Ok(Json(CREATED))
}

async fn update_client<S: ClientStore>(
    State(service): State<SharedService<S>>,
    Path(id): Path<ClientId>,
    Json(payload): Json<ClientPayload>,
) -> Result<Json<&'static str>, ApiError> {
    service.update(payload.into_fields(), id).await?;
    Ok(Json(UPDATED))
}

async fn remove_client<S: ClientStore>(
    State(service): State<SharedService<S>>,
    Path(id): Path<ClientId>,
) -> Result<Json<&'static str>, ApiError> {
    service.delete(id).await?;
    Ok(Json(REMOVED))
}
