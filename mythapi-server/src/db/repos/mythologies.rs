//! Mythology repository
//!
//! Mythologies are read-only after seeding. Reads load the whole aggregate
//! (mythology, gods, aliases) with one query per table.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Any, AnyPool};

use super::gods::{all_aliases, attach_aliases, with_aliases};
use super::{DbError, MythologyRepository};
use crate::models::{God, Mythology};

/// SQL-backed mythology repository
#[derive(Clone)]
pub struct SqlMythologyRepo {
    pool: AnyPool,
}

impl SqlMythologyRepo {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

/// Group gods under their mythology, keeping god order.
fn attach_gods(mythologies: &mut [Mythology], gods: Vec<God>) {
    let mut by_mythology: HashMap<i64, Vec<God>> = HashMap::new();
    for god in gods {
        by_mythology.entry(god.mythology_id).or_default().push(god);
    }
    for mythology in mythologies.iter_mut() {
        if let Some(gods) = by_mythology.remove(&mythology.id) {
            mythology.gods = gods;
        }
    }
}

#[async_trait]
impl MythologyRepository for SqlMythologyRepo {
    async fn get_all(&self) -> Result<Vec<Mythology>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let mut mythologies =
            sqlx::query_as::<Any, Mythology>("SELECT id, name FROM mythologies ORDER BY id")
                .fetch_all(&mut *conn)
                .await?;
        let mut gods = sqlx::query_as::<Any, God>(
            "SELECT id, name, description, mythology_id FROM gods ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;
        let aliases = all_aliases(&mut conn).await?;

        attach_aliases(&mut gods, aliases);
        attach_gods(&mut mythologies, gods);
        Ok(mythologies)
    }

    async fn get_by_id(&self, id: i64) -> Result<Mythology, DbError> {
        let mut conn = self.pool.acquire().await?;

        let mut mythology =
            sqlx::query_as::<Any, Mythology>("SELECT id, name FROM mythologies WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or_else(|| DbError::not_found("mythology", id))?;

        let gods = sqlx::query_as::<Any, God>(
            "SELECT id, name, description, mythology_id FROM gods WHERE mythology_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;
        mythology.gods = with_aliases(&mut conn, gods).await?;

        Ok(mythology)
    }

    async fn count(&self) -> Result<i64, DbError> {
        let (count,) = sqlx::query_as::<Any, (i64,)>("SELECT COUNT(*) FROM mythologies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gods_grouped_by_mythology() {
        let mut mythologies = vec![
            Mythology {
                id: 1,
                name: "Norse".into(),
                gods: vec![],
            },
            Mythology {
                id: 2,
                name: "Greek".into(),
                gods: vec![],
            },
        ];
        let god = |id, mythology_id| God {
            id,
            name: format!("god-{}", id),
            description: String::new(),
            mythology_id,
            aliases: vec![],
        };

        attach_gods(&mut mythologies, vec![god(1, 2), god(2, 1), god(3, 2)]);

        assert_eq!(mythologies[0].gods.len(), 1);
        let greek: Vec<i64> = mythologies[1].gods.iter().map(|g| g.id).collect();
        assert_eq!(greek, [1, 3]);
    }
}
