use rocket::http::Status;
use rocket::{Request, State};
use rocket::response::status::Custom;
use rocket::serde::{Deserialize, Serialize, json::Json};
use sqlx::{Pool, Sqlite};
use validator::Validate;

use crate::db::{
    check_in_athlete, create_athlete, create_schedule, get_all_athletes, get_all_groups,
    get_all_schedules, unassign_schedule_group, update_athlete, update_group,
};
use crate::error::AppError;
use crate::models::{Athlete, Group, Schedule};
use crate::validation::AppErrorExt;
use crate::validation::JsonValidateExt;
use crate::validation::ValidationResponse;

#[derive(Deserialize, Validate)]
pub struct CreateAthleteRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    name: String,
    group: String,
    status: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateAthleteRequest {
    id: i64,
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    name: String,
    group: String,
    status: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateGroupRequest {
    id: i64,
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    name: String,
    color: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateScheduleRequest {
    group: String,
    day: String,
    time: String,
    #[validate(range(min = 1, message = "Duration must be at least one minute"))]
    duration: i64,
}

#[derive(Deserialize)]
pub struct CheckInRequest {
    #[serde(rename = "athleteId")]
    athlete_id: i64,
}

#[derive(Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub error: String,
}

// The resource is selected with a `path` query parameter rather than a
// URI segment; the routes carry explicit ranks because their query
// segments overlap.

#[get("/?path=athletes", rank = 1)]
pub async fn api_get_athletes(db: &State<Pool<Sqlite>>) -> Result<Json<Vec<Athlete>>, AppError> {
    let athletes = get_all_athletes(db).await?;

    Ok(Json(athletes))
}

#[get("/?path=groups", rank = 2)]
pub async fn api_get_groups(db: &State<Pool<Sqlite>>) -> Result<Json<Vec<Group>>, AppError> {
    let groups = get_all_groups(db).await?;

    Ok(Json(groups))
}

#[get("/?path=schedules", rank = 3)]
pub async fn api_get_schedules(db: &State<Pool<Sqlite>>) -> Result<Json<Vec<Schedule>>, AppError> {
    let schedules = get_all_schedules(db).await?;

    Ok(Json(schedules))
}

#[post("/?path=athletes", data = "<athlete>", rank = 1)]
pub async fn api_create_athlete(
    athlete: Json<CreateAthleteRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<Athlete>>, Custom<Json<ValidationResponse>>> {
    let validated = athlete.validate_custom()?;
    let status = validated.status.as_deref().unwrap_or("active");

    let created = create_athlete(db, &validated.name, &validated.group, status)
        .await
        .validate_custom()?;

    Ok(Custom(Status::Created, Json(created)))
}

#[post("/?path=schedules", data = "<schedule>", rank = 2)]
pub async fn api_create_schedule(
    schedule: Json<CreateScheduleRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<Schedule>>, Custom<Json<ValidationResponse>>> {
    let validated = schedule.validate_custom()?;

    let created = create_schedule(
        db,
        &validated.group,
        &validated.day,
        &validated.time,
        validated.duration,
    )
    .await
    .validate_custom()?;

    Ok(Custom(Status::Created, Json(created)))
}

#[post("/?path=checkin", data = "<checkin>", rank = 3)]
pub async fn api_check_in(
    checkin: Json<CheckInRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<SuccessResponse>, AppError> {
    check_in_athlete(db, checkin.athlete_id).await?;

    Ok(Json(SuccessResponse { success: true }))
}

#[put("/?path=athletes", data = "<athlete>", rank = 1)]
pub async fn api_update_athlete(
    athlete: Json<UpdateAthleteRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Athlete>, Custom<Json<ValidationResponse>>> {
    let validated = athlete.validate_custom()?;

    let updated = update_athlete(
        db,
        validated.id,
        &validated.name,
        &validated.group,
        &validated.status,
    )
    .await
    .validate_custom()?;

    Ok(Json(updated))
}

#[put("/?path=groups", data = "<group>", rank = 2)]
pub async fn api_update_group(
    group: Json<UpdateGroupRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Group>, Custom<Json<ValidationResponse>>> {
    let validated = group.validate_custom()?;

    let updated = update_group(db, validated.id, &validated.name, &validated.color)
        .await
        .validate_custom()?;

    Ok(Json(updated))
}

#[delete("/?path=schedules&<id>")]
pub async fn api_delete_schedule(
    id: i64,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<SuccessResponse>, AppError> {
    unassign_schedule_group(db, id).await?;

    Ok(Json(SuccessResponse { success: true }))
}

#[options("/<_..>")]
pub fn api_preflight() -> Status {
    Status::Ok
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Custom<Json<NotFoundResponse>> {
    Custom(
        Status::NotFound,
        Json(NotFoundResponse {
            error: "Not found".to_string(),
        }),
    )
}
