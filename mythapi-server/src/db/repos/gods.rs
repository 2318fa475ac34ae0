//! God repository
//!
//! - get_all / get_by_name: one query for gods, one for their aliases
//! - add_or_update: single transaction, rolled back on the first invalid entry
//! - delete: relies on ON DELETE CASCADE for aliases

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Any, AnyConnection, AnyPool};

use super::{DbError, GodRepository};
use crate::models::{positive_id, Alias, God, GodInput, GodName, ValidationError};

const SELECT_GODS: &str = "SELECT id, name, description, mythology_id FROM gods";
const SELECT_ALIASES: &str = "SELECT id, god_id, name FROM aliases";

/// SQL-backed god repository
#[derive(Clone)]
pub struct SqlGodRepo {
    pool: AnyPool,
}

impl SqlGodRepo {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

/// `$start, $start+1, ...` for an IN list of `count` binds.
fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distribute aliases onto their gods. Aliases keep their query order.
pub(crate) fn attach_aliases(gods: &mut [God], aliases: Vec<Alias>) {
    let mut by_god: HashMap<i64, Vec<Alias>> = HashMap::new();
    for alias in aliases {
        by_god.entry(alias.god_id).or_default().push(alias);
    }
    for god in gods.iter_mut() {
        if let Some(aliases) = by_god.get(&god.id) {
            god.aliases = aliases.clone();
        }
    }
}

pub(crate) async fn all_aliases(conn: &mut AnyConnection) -> Result<Vec<Alias>, sqlx::Error> {
    sqlx::query_as::<Any, Alias>(&format!("{} ORDER BY id", SELECT_ALIASES))
        .fetch_all(&mut *conn)
        .await
}

/// Aliases of the given gods, in one query.
pub(crate) async fn aliases_for(
    conn: &mut AnyConnection,
    god_ids: &[i64],
) -> Result<Vec<Alias>, sqlx::Error> {
    if god_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "{} WHERE god_id IN ({}) ORDER BY id",
        SELECT_ALIASES,
        placeholders(1, god_ids.len())
    );
    let mut query = sqlx::query_as::<Any, Alias>(&sql);
    for id in god_ids {
        query = query.bind(*id);
    }
    query.fetch_all(&mut *conn).await
}

/// Load aliases for `gods` and attach them.
pub(crate) async fn with_aliases(
    conn: &mut AnyConnection,
    mut gods: Vec<God>,
) -> Result<Vec<God>, sqlx::Error> {
    let mut ids: Vec<i64> = gods.iter().map(|g| g.id).collect();
    ids.sort_unstable();
    ids.dedup();

    let aliases = aliases_for(conn, &ids).await?;
    attach_aliases(&mut gods, aliases);
    Ok(gods)
}

async fn god_exists(conn: &mut AnyConnection, id: i64) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_as::<Any, (i64,)>("SELECT id FROM gods WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

async fn mythology_exists(conn: &mut AnyConnection, id: i64) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_as::<Any, (i64,)>("SELECT id FROM mythologies WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

/// Lowest id among gods with exactly this name.
async fn first_god_named(conn: &mut AnyConnection, name: &str) -> Result<Option<i64>, sqlx::Error> {
    let row = sqlx::query_as::<Any, (i64,)>(
        "SELECT id FROM gods WHERE name = $1 ORDER BY id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row.map(|(id,)| id))
}

/// Resolve which existing god an input updates, if any.
///
/// A supplied id wins when it exists; otherwise the name decides.
/// Non-positive ids are treated as absent.
async fn upsert_target(
    conn: &mut AnyConnection,
    input: &GodInput,
    name: &GodName,
) -> Result<Option<i64>, sqlx::Error> {
    if let Some(id) = input.id.filter(|id| *id > 0) {
        if god_exists(conn, id).await? {
            return Ok(Some(id));
        }
    }
    first_god_named(conn, name.as_str()).await
}

/// Fetch gods by id, returned in the order of `ids` (repeats allowed).
async fn gods_in_order(conn: &mut AnyConnection, ids: &[i64]) -> Result<Vec<God>, sqlx::Error> {
    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let sql = format!(
        "{} WHERE id IN ({})",
        SELECT_GODS,
        placeholders(1, unique.len())
    );
    let mut query = sqlx::query_as::<Any, God>(&sql);
    for id in &unique {
        query = query.bind(*id);
    }
    let found = query.fetch_all(&mut *conn).await?;
    let found = with_aliases(conn, found).await?;

    let by_id: HashMap<i64, God> = found.into_iter().map(|g| (g.id, g)).collect();
    Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
}

#[async_trait]
impl GodRepository for SqlGodRepo {
    async fn get_all(&self) -> Result<Vec<God>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let mut gods = sqlx::query_as::<Any, God>(&format!("{} ORDER BY id", SELECT_GODS))
            .fetch_all(&mut *conn)
            .await?;
        let aliases = all_aliases(&mut conn).await?;
        attach_aliases(&mut gods, aliases);

        Ok(gods)
    }

    async fn get_by_id(&self, id: i64) -> Result<God, DbError> {
        let mut conn = self.pool.acquire().await?;

        let mut god = sqlx::query_as::<Any, God>(&format!("{} WHERE id = $1", SELECT_GODS))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| DbError::not_found("god", id))?;
        god.aliases = aliases_for(&mut conn, &[id]).await?;

        Ok(god)
    }

    async fn get_by_name(
        &self,
        name: &GodName,
        include_aliases: bool,
    ) -> Result<Vec<God>, DbError> {
        let mut conn = self.pool.acquire().await?;

        if !include_aliases {
            let gods = sqlx::query_as::<Any, God>(&format!(
                "{} WHERE name = $1 ORDER BY id",
                SELECT_GODS
            ))
            .bind(name.as_str())
            .fetch_all(&mut *conn)
            .await?;
            return Ok(gods);
        }

        let gods = sqlx::query_as::<Any, God>(
            r#"
            SELECT g.id, g.name, g.description, g.mythology_id
            FROM gods g
            WHERE g.name = $1
               OR EXISTS (
                   SELECT 1 FROM aliases a
                   WHERE a.god_id = g.id AND a.name = $2
               )
            ORDER BY g.id
            "#,
        )
        .bind(name.as_str())
        .bind(name.as_str())
        .fetch_all(&mut *conn)
        .await?;

        Ok(with_aliases(&mut conn, gods).await?)
    }

    async fn add_or_update(&self, inputs: Vec<GodInput>) -> Result<Vec<God>, DbError> {
        if inputs.is_empty() {
            return Err(ValidationError::Empty { field: "gods" }.into());
        }

        // Any early return drops the transaction, which rolls back the batch
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(inputs.len());

        for input in &inputs {
            let name = input.god_name()?;
            let mythology_id = positive_id("mythologyId", input.mythology_id)?;
            if !mythology_exists(&mut tx, mythology_id).await? {
                return Err(ValidationError::UnknownReference {
                    field: "mythologyId",
                    id: mythology_id,
                }
                .into());
            }

            let id = match upsert_target(&mut tx, input, &name).await? {
                Some(id) => {
                    sqlx::query(
                        "UPDATE gods SET name = $1, description = $2, mythology_id = $3 WHERE id = $4",
                    )
                    .bind(name.as_str())
                    .bind(input.description.as_str())
                    .bind(mythology_id)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                    tracing::debug!(id, name = name.as_str(), "updated god");
                    id
                }
                None => {
                    let (id,) = sqlx::query_as::<Any, (i64,)>(
                        "INSERT INTO gods (name, description, mythology_id) VALUES ($1, $2, $3) RETURNING id",
                    )
                    .bind(name.as_str())
                    .bind(input.description.as_str())
                    .bind(mythology_id)
                    .fetch_one(&mut *tx)
                    .await?;
                    tracing::debug!(id, name = name.as_str(), "inserted god");
                    id
                }
            };
            ids.push(id);
        }

        let gods = gods_in_order(&mut tx, &ids).await?;
        tx.commit().await?;

        tracing::info!(count = gods.len(), "upserted gods");
        Ok(gods)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM gods WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("god", id));
        }

        tracing::info!(id, "deleted god");
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM gods").execute(&self.pool).await?;

        tracing::info!(count = result.rows_affected(), "deleted all gods");
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn god(id: i64) -> God {
        God {
            id,
            name: format!("god-{}", id),
            description: String::new(),
            mythology_id: 1,
            aliases: vec![],
        }
    }

    fn alias(id: i64, god_id: i64, name: &str) -> Alias {
        Alias {
            id,
            god_id,
            name: name.into(),
        }
    }

    #[test]
    fn placeholder_list() {
        assert_eq!(placeholders(1, 3), "$1, $2, $3");
        assert_eq!(placeholders(4, 1), "$4");
    }

    #[test]
    fn aliases_land_on_their_god() {
        let mut gods = vec![god(1), god(2), god(3)];
        attach_aliases(
            &mut gods,
            vec![alias(1, 1, "Woden"), alias(2, 3, "Lopt"), alias(3, 1, "Wotan")],
        );

        let names = |g: &God| g.aliases.iter().map(|a| a.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&gods[0]), ["Woden", "Wotan"]);
        assert!(gods[1].aliases.is_empty());
        assert_eq!(names(&gods[2]), ["Lopt"]);
    }

    #[test]
    fn repeated_gods_all_receive_aliases() {
        let mut gods = vec![god(7), god(7)];
        attach_aliases(&mut gods, vec![alias(1, 7, "Phoebus")]);
        assert_eq!(gods[0].aliases.len(), 1);
        assert_eq!(gods[1].aliases.len(), 1);
    }
}
