#[cfg(test)]
pub mod test_db {
    use crate::database::apply_schema;
    use crate::db::{create_athlete, create_schedule};
    use crate::error::AppError;
    use sqlx::{Pool, Sqlite, SqlitePool};
    use std::collections::HashMap;
    use std::sync::Once;

    static INIT: Once = Once::new();

    #[derive(Default)]
    pub struct TestDbBuilder {
        groups: Vec<TestGroup>,
        athletes: Vec<TestAthlete>,
        schedules: Vec<TestSchedule>,
    }

    pub struct TestGroup {
        pub name: String,
        pub color: String,
    }

    pub struct TestAthlete {
        pub name: String,
        pub group_name: String,
        pub status: String,
    }

    pub struct TestSchedule {
        pub group_name: String,
        pub day: String,
        pub time: String,
        pub duration: i64,
    }

    impl TestDbBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn group(mut self, name: &str, color: &str) -> Self {
            self.groups.push(TestGroup {
                name: name.to_string(),
                color: color.to_string(),
            });
            self
        }

        pub fn athlete(mut self, name: &str, group_name: &str) -> Self {
            self.athletes.push(TestAthlete {
                name: name.to_string(),
                group_name: group_name.to_string(),
                status: "active".to_string(),
            });
            self
        }

        pub fn athlete_with_status(mut self, name: &str, group_name: &str, status: &str) -> Self {
            self.athletes.push(TestAthlete {
                name: name.to_string(),
                group_name: group_name.to_string(),
                status: status.to_string(),
            });
            self
        }

        pub fn schedule(mut self, group_name: &str, day: &str, time: &str, duration: i64) -> Self {
            self.schedules.push(TestSchedule {
                group_name: group_name.to_string(),
                day: day.to_string(),
                time: time.to_string(),
                duration,
            });
            self
        }

        pub async fn build(self) -> Result<TestDb, AppError> {
            INIT.call_once(|| {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter("info")
                    .with_test_writer()
                    .try_init();
            });

            let pool = SqlitePool::connect("sqlite::memory:").await?;

            apply_schema(&pool).await?;

            let mut group_id_map: HashMap<String, i64> = HashMap::new();
            let mut athlete_id_map: HashMap<String, i64> = HashMap::new();
            let mut schedule_ids: Vec<i64> = Vec::new();

            // Groups are seeded directly; there is no API operation that
            // creates them.
            for group in &self.groups {
                let result = sqlx::query("INSERT INTO groups (name, color) VALUES (?, ?)")
                    .bind(&group.name)
                    .bind(&group.color)
                    .execute(&pool)
                    .await?;
                group_id_map.insert(group.name.clone(), result.last_insert_rowid());
            }

            for athlete in &self.athletes {
                let created =
                    create_athlete(&pool, &athlete.name, &athlete.group_name, &athlete.status)
                        .await?;
                athlete_id_map.insert(athlete.name.clone(), created.id);
            }

            for schedule in &self.schedules {
                let created = create_schedule(
                    &pool,
                    &schedule.group_name,
                    &schedule.day,
                    &schedule.time,
                    schedule.duration,
                )
                .await?;
                schedule_ids.push(created.id);
            }

            Ok(TestDb {
                pool,
                group_id_map,
                athlete_id_map,
                schedule_ids,
            })
        }
    }

    pub struct TestDb {
        pub pool: Pool<Sqlite>,
        pub group_id_map: HashMap<String, i64>,
        pub athlete_id_map: HashMap<String, i64>,
        pub schedule_ids: Vec<i64>,
    }

    impl TestDb {
        pub fn group_id(&self, name: &str) -> Option<i64> {
            self.group_id_map.get(name).copied()
        }

        pub fn athlete_id(&self, name: &str) -> Option<i64> {
            self.athlete_id_map.get(name).copied()
        }

        pub fn first_schedule_id(&self) -> Option<i64> {
            self.schedule_ids.first().copied()
        }

        /// Seeds a stored attendance count directly; there is no API
        /// operation that writes it.
        pub async fn set_attendance(&self, athlete_id: i64, attendance: i64) -> Result<(), sqlx::Error> {
            sqlx::query("UPDATE athletes SET attendance = ? WHERE id = ?")
                .bind(attendance)
                .bind(athlete_id)
                .execute(&self.pool)
                .await?;

            Ok(())
        }
    }
}

#[cfg(test)]
pub mod test_utils {
    pub use super::test_db::{TestDb, TestDbBuilder};
    use crate::init_rocket;
    use rocket::local::asynchronous::Client;

    pub async fn create_standard_test_db() -> TestDb {
        TestDbBuilder::new()
            .group("Boxers", "bg-primary")
            .group("Wrestlers", "bg-secondary")
            .group("Crossfit", "bg-accent")
            .athlete("Alexei Smirnov", "Boxers")
            .athlete("Maria Petrova", "Wrestlers")
            .athlete_with_status("Dmitri Kozlov", "Boxers", "injured")
            .schedule("Boxers", "Monday", "18:00", 60)
            .schedule("Wrestlers", "Tuesday", "19:30", 90)
            .build()
            .await
            .expect("Failed to build test database")
    }

    pub async fn setup_test_client(test_db: TestDb) -> (Client, TestDb) {
        let client = Client::tracked(init_rocket(test_db.pool.clone()).await)
            .await
            .expect("Failed to build test client");

        (client, test_db)
    }
}
