use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use common::pagination::Pagination;
use service::student::{NewStudent, Student};

use crate::{errors::JsonApiError, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// 1-based page index
    pub page: Option<u32>,
    /// items per page (1..=100)
    pub per_page: Option<u32>,
}

impl From<ListQuery> for Pagination {
    fn from(q: ListQuery) -> Self {
        let d = Pagination::default();
        Pagination { page: q.page.unwrap_or(d.page), per_page: q.per_page.unwrap_or(d.per_page) }
    }
}

#[utoipa::path(
    get, path = "/api/v1/students", tag = "students",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::StudentDoc]),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<Student>>, JsonApiError> {
    let list = state.students.list_students(q.into()).await?;
    info!(count = list.len(), "list students");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/v1/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<Student>, JsonApiError> {
    Ok(Json(state.students.get_student(id).await?))
}

#[utoipa::path(
    post, path = "/api/v1/students", tag = "students",
    request_body = crate::openapi::NewStudentDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::StudentDoc),
        (status = 400, description = "Invalid input or email already registered", body = crate::openapi::ErrorBodyDoc),
        (status = 502, description = "Joke or booking service failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<NewStudent>) -> Result<(StatusCode, Json<Student>), JsonApiError> {
    info!(email = %input.email, "student_create_request");
    let created = state.students.add_student(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    delete, path = "/api/v1/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    state.students.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
