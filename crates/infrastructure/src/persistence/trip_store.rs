//! SQLite-based trip persistence

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{TripPatch, TripStorePort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::{Trip, TripDraft};
use domain::value_objects::Cep;
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

const TRIP_COLUMNS: &str = "id, nome, origem_cep, destino_cep, distancia_km, created_at, updated_at";

/// SQLite-based trip store
#[derive(Debug, Clone)]
pub struct SqliteTripStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteTripStore {
    /// Create a new SQLite trip store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn internal(e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Internal(e.to_string())
}

fn row_to_trip(row: &Row<'_>) -> Result<Trip, rusqlite::Error> {
    let origem: String = row.get(2)?;
    let destino: String = row.get(3)?;
    let created_at: String = row.get(5)?;
    let updated_at: Option<String> = row.get(6)?;

    Ok(Trip {
        id: row.get(0)?,
        nome: row.get(1)?,
        origem_cep: parse_cep(2, &origem)?,
        destino_cep: parse_cep(3, &destino)?,
        distancia_km: row.get(4)?,
        created_at: parse_timestamp(5, &created_at)?,
        updated_at: updated_at
            .map(|raw| parse_timestamp(6, &raw))
            .transpose()?,
    })
}

fn parse_cep(idx: usize, raw: &str) -> Result<Cep, rusqlite::Error> {
    Cep::parse(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_timestamp(idx: usize, raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[async_trait]
impl TripStorePort for SqliteTripStore {
    #[instrument(skip(self, draft), fields(nome = %draft.nome))]
    async fn insert(&self, draft: &TripDraft) -> Result<Trip, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let draft = draft.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let created_at = Utc::now();

            conn.execute(
                "INSERT INTO trips (nome, origem_cep, destino_cep, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    draft.nome,
                    draft.origem_cep.as_str(),
                    draft.destino_cep.as_str(),
                    created_at.to_rfc3339(),
                ],
            )
            .map_err(internal)?;

            let id = conn.last_insert_rowid();
            debug!(trip_id = id, "Inserted trip");

            Ok(Trip {
                id,
                nome: draft.nome,
                origem_cep: draft.origem_cep,
                destino_cep: draft.destino_cep,
                distancia_km: None,
                created_at,
                updated_at: None,
            })
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Trip>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(&format!("SELECT {TRIP_COLUMNS} FROM trips ORDER BY id"))
                .map_err(internal)?;

            let trips = stmt
                .query_map([], row_to_trip)
                .map_err(internal)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(internal)?;

            Ok(trips)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Option<Trip>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            conn.query_row(
                &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"),
                [id],
                row_to_trip,
            )
            .optional()
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: i64, patch: &TripPatch) -> Result<Option<Trip>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let patch = patch.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;

            let affected = conn
                .execute(
                    "UPDATE trips SET
                        nome = COALESCE(?1, nome),
                        origem_cep = COALESCE(?2, origem_cep),
                        destino_cep = COALESCE(?3, destino_cep),
                        updated_at = ?4
                     WHERE id = ?5",
                    params![
                        patch.nome,
                        patch.origem_cep.as_ref().map(Cep::as_str),
                        patch.destino_cep.as_ref().map(Cep::as_str),
                        Utc::now().to_rfc3339(),
                        id,
                    ],
                )
                .map_err(internal)?;

            if affected == 0 {
                return Ok(None);
            }
            debug!(trip_id = id, "Updated trip");

            conn.query_row(
                &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"),
                [id],
                row_to_trip,
            )
            .optional()
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let affected = conn
                .execute("DELETE FROM trips WHERE id = ?1", [id])
                .map_err(internal)?;
            if affected > 0 {
                debug!(trip_id = id, "Deleted trip");
            }
            Ok(affected > 0)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self))]
    async fn set_distance(&self, id: i64, km: f64) -> Result<Option<Trip>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;

            let affected = conn
                .execute(
                    "UPDATE trips SET distancia_km = ?1, updated_at = ?2 WHERE id = ?3",
                    params![km, Utc::now().to_rfc3339(), id],
                )
                .map_err(internal)?;

            if affected == 0 {
                return Ok(None);
            }
            debug!(trip_id = id, distancia_km = km, "Stored trip distance");

            conn.query_row(
                &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"),
                [id],
                row_to_trip,
            )
            .optional()
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }
}
