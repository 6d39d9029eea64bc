//! Repository for the `animes` table.
//!
//! Every operation except insert filters by `(id, user_id)` so a request
//! can never see or touch another user's rows. A foreign or unknown id
//! simply matches nothing.

use sqlx::PgPool;

use animotheque_core::types::DbId;

use crate::models::anime::{Anime, AnimeFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, last_episode, episode, watch_date, \
                        status, sortie, image, created_at, updated_at";

/// Provides owner-scoped CRUD operations for anime entries.
pub struct AnimeRepo;

impl AnimeRepo {
    /// Insert a new entry for `owner`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner: DbId,
        fields: &AnimeFields,
    ) -> Result<Anime, sqlx::Error> {
        let query = format!(
            "INSERT INTO animes (user_id, title, last_episode, episode, watch_date, status, sortie, image)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Anime>(&query)
            .bind(owner)
            .bind(&fields.title)
            .bind(&fields.last_episode)
            .bind(fields.episode)
            .bind(&fields.watch_date)
            .bind(&fields.status)
            .bind(&fields.sortie)
            .bind(&fields.image)
            .fetch_one(pool)
            .await
    }

    /// List all entries owned by `owner`, in insertion order.
    pub async fn list_by_owner(pool: &PgPool, owner: DbId) -> Result<Vec<Anime>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animes WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Anime>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// Full replace of the mutable field set, scoped to `(id, owner)`.
    ///
    /// Returns `None` when no owned row matches -- an entry belonging to
    /// another user is indistinguishable from a missing one.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner: DbId,
        fields: &AnimeFields,
    ) -> Result<Option<Anime>, sqlx::Error> {
        let query = format!(
            "UPDATE animes SET
                title = $3,
                last_episode = $4,
                episode = $5,
                watch_date = $6,
                status = $7,
                sortie = $8,
                image = $9,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Anime>(&query)
            .bind(id)
            .bind(owner)
            .bind(&fields.title)
            .bind(&fields.last_episode)
            .bind(fields.episode)
            .bind(&fields.watch_date)
            .bind(&fields.status)
            .bind(&fields.sortie)
            .bind(&fields.image)
            .fetch_optional(pool)
            .await
    }

    /// Delete the entry `(id, owner)`. Returns the number of rows removed.
    ///
    /// Deleting a missing or foreign entry affects zero rows and is not an
    /// error; the API treats both outcomes as success.
    pub async fn delete(pool: &PgPool, id: DbId, owner: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM animes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
