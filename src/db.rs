#[cfg(feature = "ssr")]
mod db_impl {
    use crate::models::review::{Jurisdiction, Review};
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::{Connection, Error};
    use std::sync::Arc;
    use tokio::sync::Mutex;


    /// Server-side backing for the `reviews` collection.
    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            logging::log!("Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    state TEXT NOT NULL,
                    location TEXT NOT NULL,
                    workplace_name TEXT NOT NULL,
                    job_title TEXT NOT NULL,
                    last_year_worked INTEGER NOT NULL,
                    comment TEXT NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                );",
            )
            .map_err(|e| {
                eprintln!("Failed creating reviews table: {}", e);
                e
            })?;
            Ok(())
        }

        pub async fn insert_review(&self, id: &str, review: &Review) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO reviews
                    (id, state, location, workplace_name, job_title, last_year_worked, comment)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    id,
                    review.state.code(),
                    review.location,
                    review.workplace_name,
                    review.job_title,
                    review.last_year_worked,
                    review.comment,
                ],
            )?;
            logging::log!("Review inserted: {}", id);
            Ok(())
        }

        // Retrieval order is the store's own (rowid / insertion order); no
        // ordering is promised to clients.
        pub async fn get_reviews(&self) -> Result<Vec<Review>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT state, location, workplace_name, job_title, last_year_worked, comment
                 FROM reviews
                 ORDER BY rowid ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                let code: String = row.get(0)?;
                let state = Jurisdiction::from_code(&code).ok_or_else(|| {
                    Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Text,
                        format!("unknown jurisdiction code '{}'", code).into(),
                    )
                })?;
                Ok(Review {
                    state,
                    location: row.get(1)?,
                    workplace_name: row.get(2)?,
                    job_title: row.get(3)?,
                    last_year_worked: row.get(4)?,
                    comment: row.get(5)?,
                })
            })?;
            let mut result = Vec::new();
            for review in rows {
                result.push(review?);
            }
            log!("Fetched {} reviews from the database", result.len());
            Ok(result)
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
