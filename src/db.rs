use sqlx::{Pool, Sqlite, Transaction};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::{Athlete, DbAthlete, DbGroup, DbSchedule, Group, Schedule};

#[instrument]
pub async fn get_all_athletes(pool: &Pool<Sqlite>) -> Result<Vec<Athlete>, AppError> {
    info!("Getting all athletes");
    let rows = sqlx::query_as::<_, DbAthlete>(
        "SELECT id, name, group_name, attendance, status, last_visit
         FROM athletes
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Athlete::from).collect())
}

#[instrument]
pub async fn get_all_groups(pool: &Pool<Sqlite>) -> Result<Vec<Group>, AppError> {
    info!("Getting all groups");
    let rows = sqlx::query_as::<_, DbGroup>(
        "SELECT g.id, g.name, g.color, COUNT(a.id) AS count
         FROM groups g
         LEFT JOIN athletes a ON a.group_name = g.name
         GROUP BY g.id, g.name, g.color
         ORDER BY g.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Group::from).collect())
}

#[instrument]
pub async fn get_all_schedules(pool: &Pool<Sqlite>) -> Result<Vec<Schedule>, AppError> {
    info!("Getting all schedules");
    let rows = sqlx::query_as::<_, DbSchedule>(
        "SELECT id, group_name, day, time, duration
         FROM schedules
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Schedule::from).collect())
}

/// Athletes and schedules reference groups by name, not by foreign key.
/// Assignments are checked here so a typo can't silently create a
/// dangling membership.
async fn require_group(tx: &mut Transaction<'_, Sqlite>, name: &str) -> Result<(), AppError> {
    let existing = sqlx::query("SELECT id FROM groups WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;

    if existing.is_none() {
        return Err(AppError::UnknownGroup(name.to_string()));
    }

    Ok(())
}

#[instrument]
pub async fn create_athlete(
    pool: &Pool<Sqlite>,
    name: &str,
    group_name: &str,
    status: &str,
) -> Result<Athlete, AppError> {
    info!("Creating athlete");
    let mut tx = pool.begin().await?;

    require_group(&mut tx, group_name).await?;

    let row = sqlx::query_as::<_, DbAthlete>(
        "INSERT INTO athletes (name, group_name, status, attendance, last_visit)
         VALUES (?, ?, ?, 0, 'Never')
         RETURNING id, name, group_name, attendance, status, last_visit",
    )
    .bind(name)
    .bind(group_name)
    .bind(status)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Athlete::from(row))
}

#[instrument]
pub async fn update_athlete(
    pool: &Pool<Sqlite>,
    id: i64,
    name: &str,
    group_name: &str,
    status: &str,
) -> Result<Athlete, AppError> {
    info!("Updating athlete");
    let mut tx = pool.begin().await?;

    require_group(&mut tx, group_name).await?;

    // Full overwrite of the client-settable fields; attendance and
    // last_visit stay server-owned
    let row = sqlx::query_as::<_, DbAthlete>(
        "UPDATE athletes
         SET name = ?, group_name = ?, status = ?
         WHERE id = ?
         RETURNING id, name, group_name, attendance, status, last_visit",
    )
    .bind(name)
    .bind(group_name)
    .bind(status)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    match row {
        Some(athlete) => {
            tx.commit().await?;
            Ok(Athlete::from(athlete))
        }
        _ => Err(AppError::NotFound(format!(
            "Athlete with id {} not found in database",
            id
        ))),
    }
}

#[instrument]
pub async fn check_in_athlete(pool: &Pool<Sqlite>, athlete_id: i64) -> Result<(), AppError> {
    info!("Checking in athlete");
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        "UPDATE athletes
         SET last_visit = 'Today'
         WHERE id = ?
         RETURNING id",
    )
    .bind(athlete_id)
    .fetch_optional(&mut *tx)
    .await?;

    match row {
        Some(_) => {
            tx.commit().await?;
            Ok(())
        }
        _ => Err(AppError::NotFound(format!(
            "Athlete with id {} not found in database",
            athlete_id
        ))),
    }
}

#[instrument]
pub async fn update_group(
    pool: &Pool<Sqlite>,
    id: i64,
    name: &str,
    color: &str,
) -> Result<Group, AppError> {
    info!("Updating group");

    #[derive(sqlx::FromRow)]
    struct NameRow {
        name: String,
    }

    let mut tx = pool.begin().await?;

    let previous = sqlx::query_as::<_, NameRow>("SELECT name FROM groups WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    let previous_name = match previous {
        Some(row) => row.name,
        _ => {
            return Err(AppError::NotFound(format!(
                "Group with id {} not found in database",
                id
            )));
        }
    };

    sqlx::query("UPDATE groups SET name = ?, color = ? WHERE id = ?")
        .bind(name)
        .bind(color)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    // Membership is linked by name, so a rename has to follow the
    // denormalized copies or every member silently falls out of the group
    if previous_name != name {
        sqlx::query("UPDATE athletes SET group_name = ? WHERE group_name = ?")
            .bind(name)
            .bind(&previous_name)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE schedules SET group_name = ? WHERE group_name = ?")
            .bind(name)
            .bind(&previous_name)
            .execute(&mut *tx)
            .await?;
    }

    let row = sqlx::query_as::<_, DbGroup>(
        "SELECT g.id, g.name, g.color, COUNT(a.id) AS count
         FROM groups g
         LEFT JOIN athletes a ON a.group_name = g.name
         WHERE g.id = ?
         GROUP BY g.id, g.name, g.color",
    )
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Group::from(row))
}

#[instrument]
pub async fn create_schedule(
    pool: &Pool<Sqlite>,
    group_name: &str,
    day: &str,
    time: &str,
    duration: i64,
) -> Result<Schedule, AppError> {
    info!("Creating schedule");
    let mut tx = pool.begin().await?;

    require_group(&mut tx, group_name).await?;

    let row = sqlx::query_as::<_, DbSchedule>(
        "INSERT INTO schedules (group_name, day, time, duration)
         VALUES (?, ?, ?, ?)
         RETURNING id, group_name, day, time, duration",
    )
    .bind(group_name)
    .bind(day)
    .bind(time)
    .bind(duration)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Schedule::from(row))
}

/// Soft delete: the schedule row stays listable, only its group
/// association is removed.
#[instrument]
pub async fn unassign_schedule_group(pool: &Pool<Sqlite>, id: i64) -> Result<(), AppError> {
    info!("Unassigning schedule group");
    let mut tx = pool.begin().await?;

    let result = sqlx::query("UPDATE schedules SET group_name = NULL WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Schedule with id {} not found in database",
            id
        )));
    }

    tx.commit().await?;

    Ok(())
}
