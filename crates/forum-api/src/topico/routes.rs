use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use forum_db::models::AtualizacaoTopico;
use serde::Deserialize;

use crate::{
    ApiState,
    error::ApiError,
    validation::{Locale, ValidatedForm},
};

use super::{
    dto::{DetalhesDoTopicoDto, TopicoDto},
    form::{AtualizacaoTopicoForm, TopicoForm},
};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topicos", get(list_topicos).post(create_topico))
        .route(
            "/topicos/{id}",
            get(get_topico).put(update_topico).delete(delete_topico),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListaParams {
    nome_curso: Option<String>,
}

/// List topics, optionally only those of one course
async fn list_topicos(
    State(state): State<ApiState>,
    Query(params): Query<ListaParams>,
) -> Result<Json<Vec<TopicoDto>>, ApiError> {
    let topicos = match params.nome_curso.as_deref() {
        None => state.topicos.find_all().await?,
        Some(nome_curso) => state.topicos.find_by_curso_nome(nome_curso).await?,
    };

    Ok(Json(TopicoDto::converter(&topicos)))
}

/// Create a topic under an existing course
async fn create_topico(
    State(state): State<ApiState>,
    locale: Locale,
    payload: Result<Json<TopicoForm>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(form) = payload?;
    form.validate_form(locale)?;

    let novo = form.converter(state.cursos.as_ref(), locale).await?;
    let topico = state.topicos.save(novo).await?;

    tracing::info!(topico_id = topico.id, curso = %topico.curso.nome, "Topic created");

    let location = format!("/topicos/{}", topico.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TopicoDto::from(&topico)),
    ))
}

/// Get a topic with its replies
async fn get_topico(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<DetalhesDoTopicoDto>, ApiError> {
    let topico = state.topicos.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let respostas = state.topicos.find_respostas(id).await?;

    Ok(Json(DetalhesDoTopicoDto::new(topico, respostas)))
}

/// Overwrite title and message of a topic
async fn update_topico(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    locale: Locale,
    payload: Result<Json<AtualizacaoTopicoForm>, JsonRejection>,
) -> Result<Json<TopicoDto>, ApiError> {
    let Json(form) = payload?;
    form.validate_form(locale)?;

    let topico = state
        .topicos
        .update(id, AtualizacaoTopico::from(form))
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(topico_id = id, "Topic updated");

    Ok(Json(TopicoDto::from(&topico)))
}

/// Delete a topic and its replies
async fn delete_topico(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.topicos.delete_by_id(id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(topico_id = id, "Topic deleted");
    Ok(StatusCode::OK)
}
