//! Saved build configuration handlers. Public surface: the configurator
//! works for guests, so no authentication is required here.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use rigmart_entity::configuration::{Configuration, CreateConfiguration};

use crate::dto::request::{ConfigurationListQuery, CreateConfigurationRequest, validate};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /configurations
pub async fn list_configurations(
    State(state): State<AppState>,
    Query(query): Query<ConfigurationListQuery>,
) -> ApiResult<Json<Vec<Configuration>>> {
    let configurations = state
        .configuration_service
        .list(query.user_id.as_deref())
        .await?;
    Ok(Json(configurations))
}

/// POST /configurations
pub async fn create_configuration(
    State(state): State<AppState>,
    Json(req): Json<CreateConfigurationRequest>,
) -> ApiResult<Json<Configuration>> {
    validate(&req)?;
    let data = CreateConfiguration {
        name: req.name,
        components: req.components,
        notes: req.notes,
        total_price: req.total_price,
        user_id: req.user_id,
    };
    let configuration = state.configuration_service.create(data).await?;
    Ok(Json(configuration))
}

/// DELETE /configurations/{id}
pub async fn delete_configuration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ConfigurationListQuery>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .configuration_service
        .delete(id, query.user_id.as_deref())
        .await?;
    Ok(Json(MessageResponse::new("Configuration deleted")))
}
