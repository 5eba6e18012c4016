use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Athlete {
    pub id: i64,
    pub name: String,
    #[serde(rename = "group")]
    pub group_name: String,
    pub attendance: i64,
    pub status: String,
    #[serde(rename = "lastVisit")]
    pub last_visit: String,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbAthlete {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub group_name: Option<String>,
    pub attendance: Option<i64>,
    pub status: Option<String>,
    pub last_visit: Option<String>,
}

impl From<DbAthlete> for Athlete {
    fn from(athlete: DbAthlete) -> Self {
        Self {
            id: athlete.id.unwrap_or_default(),
            name: athlete.name.unwrap_or_default(),
            group_name: athlete.group_name.unwrap_or_default(),
            attendance: athlete.attendance.unwrap_or_default(),
            status: athlete.status.unwrap_or_default(),
            last_visit: athlete.last_visit.unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub count: i64, // Derived from athlete group membership, never stored
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbGroup {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub count: Option<i64>,
}

impl From<DbGroup> for Group {
    fn from(group: DbGroup) -> Self {
        Self {
            id: group.id.unwrap_or_default(),
            name: group.name.unwrap_or_default(),
            color: group.color.unwrap_or_default(),
            count: group.count.unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Schedule {
    pub id: i64,
    #[serde(rename = "group")]
    pub group_name: Option<String>,
    pub day: String,
    pub time: String,
    pub duration: i64,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbSchedule {
    pub id: Option<i64>,
    pub group_name: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
    pub duration: Option<i64>,
}

impl From<DbSchedule> for Schedule {
    fn from(schedule: DbSchedule) -> Self {
        Self {
            id: schedule.id.unwrap_or_default(),
            // Nullable on purpose: a soft-deleted schedule keeps its row with no group
            group_name: schedule.group_name,
            day: schedule.day.unwrap_or_default(),
            time: schedule.time.unwrap_or_default(),
            duration: schedule.duration.unwrap_or_default(),
        }
    }
}
