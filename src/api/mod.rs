use axum::Json;
use axum::extract::Path;
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::models::*;
use crate::services::EnrollOutcome;
use crate::state::AppState;

const DEFAULT_PRIORITY: u8 = 1;

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub student_id: String,
    pub course_code: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
}

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub result: EnrollOutcome,
}

#[derive(Debug, Deserialize)]
pub struct DropRequest {
    pub student_id: String,
    pub course_code: String,
}

#[derive(Debug, Serialize)]
pub struct DropResponse {
    pub dropped: bool,
    pub promoted: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/students", get(list_students).post(create_student))
        .route("/students/{id}", get(get_student))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{code}", get(get_course))
        .route("/courses/{code}/roster", get(get_roster))
        .route("/enrollments", post(enroll))
        .route("/enrollments/drop", post(drop_enrollment))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn list_students(State(state): State<AppState>) -> Json<Vec<Student>> {
    let engine = state.engine.read().await;
    Json(engine.students().cloned().collect())
}

async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<NewStudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let id = req.id.trim();
    let name = req.name.trim();
    if id.is_empty() || name.is_empty() {
        return Err(AppError::BadRequest("id and name are required".to_string()));
    }

    let mut engine = state.engine.write().await;
    if !engine.add_student(id, name) {
        return Err(AppError::Conflict(format!("student {} already exists", id)));
    }
    let student = engine.student(id).cloned().ok_or(AppError::InternalServerError)?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let engine = state.engine.read().await;
    let student = engine.student(&id).cloned().ok_or(AppError::NotFound)?;
    Ok(Json(student))
}

async fn list_courses(State(state): State<AppState>) -> Json<Vec<CourseSummary>> {
    let engine = state.engine.read().await;
    Json(engine.courses().map(CourseSummary::from).collect())
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<NewCourseRequest>,
) -> Result<(StatusCode, Json<CourseDetail>), AppError> {
    let code = req.code.trim();
    let title = req.title.trim();
    if code.is_empty() || title.is_empty() {
        return Err(AppError::BadRequest("code and title are required".to_string()));
    }
    let meeting_times = req
        .meeting_times
        .into_iter()
        .map(TimeSlot::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let mut engine = state.engine.write().await;
    if !engine.add_course(code, title, req.capacity, meeting_times)? {
        return Err(AppError::Conflict(format!("course {} already exists", code)));
    }
    let course = engine.course(code).ok_or(AppError::InternalServerError)?;
    Ok((StatusCode::CREATED, Json(CourseDetail::from(course))))
}

async fn get_course(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CourseDetail>, AppError> {
    let engine = state.engine.read().await;
    let course = engine.course(&code).ok_or(AppError::NotFound)?;
    Ok(Json(CourseDetail::from(course)))
}

async fn get_roster(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<String, AppError> {
    let engine = state.engine.read().await;
    engine.get_roster(&code).ok_or(AppError::NotFound)
}

async fn enroll(
    State(state): State<AppState>,
    Json(req): Json<EnrollRequest>,
) -> Json<EnrollResponse> {
    let mut engine = state.engine.write().await;
    let result = engine.enroll(req.student_id.trim(), req.course_code.trim(), req.priority);
    info!("enroll {} -> {}: {}", req.student_id, req.course_code, result);
    Json(EnrollResponse { result })
}

async fn drop_enrollment(
    State(state): State<AppState>,
    Json(req): Json<DropRequest>,
) -> Json<DropResponse> {
    let mut engine = state.engine.write().await;
    let response = match engine.drop_with_promotions(req.student_id.trim(), req.course_code.trim()) {
        Some(promoted) => DropResponse {
            dropped: true,
            promoted,
        },
        None => DropResponse {
            dropped: false,
            promoted: Vec::new(),
        },
    };
    Json(response)
}
