//! Reference data: the Norse, Greek and Roman pantheons
//!
//! Seeding is a check-then-act against the store itself: the data is
//! inserted only while the mythology table is empty, inside one transaction.

use sqlx::{Any, AnyPool};

struct SeedGod {
    name: &'static str,
    description: &'static str,
    aliases: &'static [&'static str],
}

struct SeedMythology {
    name: &'static str,
    gods: &'static [SeedGod],
}

const fn god(
    name: &'static str,
    description: &'static str,
    aliases: &'static [&'static str],
) -> SeedGod {
    SeedGod {
        name,
        description,
        aliases,
    }
}

const REFERENCE_DATA: &[SeedMythology] = &[
    SeedMythology {
        name: "Norse",
        gods: &[
            god(
                "Odin",
                "Odin is the chief god in Norse mythology.",
                &[
                    "Woden", "Wotan", "Allfather", "Ygg", "Bolverk", "Grimnir", "Oski", "Omi",
                    "Biflindi", "Sigfodr", "Hnikudr", "Harbard",
                ],
            ),
            god(
                "Thor",
                "Thor is the god of thunder in Norse mythology.",
                &["Donar", "Thunor"],
            ),
            god(
                "Loki",
                "Loki is the god of mischief in Norse mythology.",
                &["Lopt"],
            ),
            god(
                "Frigg",
                "Frigg is the goddess of marriage in Norse mythology.",
                &["Frigga"],
            ),
            god(
                "Baldur",
                "Baldur is the god of light in Norse mythology.",
                &["Balder"],
            ),
            god("Tyr", "Tyr is the god of war in Norse mythology.", &["Tiw"]),
        ],
    },
    SeedMythology {
        name: "Greek",
        gods: &[
            god(
                "Zeus",
                "Zeus is the chief god in Greek mythology.",
                &["Jupiter"],
            ),
            god(
                "Poseidon",
                "Poseidon is the god of the sea in Greek mythology.",
                &["Neptune"],
            ),
            god(
                "Hades",
                "Hades is the god of the underworld in Greek mythology.",
                &["Pluto"],
            ),
            god(
                "Athena",
                "Athena is the goddess of wisdom in Greek mythology.",
                &[],
            ),
            god(
                "Apollo",
                "Apollo is the god of the sun in Greek mythology.",
                &["Phoebus"],
            ),
            god(
                "Artemis",
                "Artemis is the goddess of the hunt in Greek mythology.",
                &["Diana"],
            ),
            god("Ares", "Ares is the god of war in Greek mythology.", &["Mars"]),
        ],
    },
    SeedMythology {
        name: "Roman",
        gods: &[
            god(
                "Jupiter",
                "Jupiter is the chief god in Roman mythology.",
                &["Zeus"],
            ),
            god(
                "Neptune",
                "Neptune is the god of the sea in Roman mythology.",
                &["Poseidon"],
            ),
            god(
                "Pluto",
                "Pluto is the god of the underworld in Roman mythology.",
                &["Hades"],
            ),
            god(
                "Minerva",
                "Minerva is the goddess of wisdom in Roman mythology.",
                &["Athena"],
            ),
            god(
                "Apollo",
                "Apollo is the god of the sun in Roman mythology.",
                &["Phoebus"],
            ),
            god(
                "Diana",
                "Diana is the goddess of the hunt in Roman mythology.",
                &["Artemis"],
            ),
            god("Mars", "Mars is the god of war in Roman mythology.", &["Ares"]),
        ],
    },
];

/// Result of a seeding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Reference data was inserted
    Seeded {
        mythologies: usize,
        gods: usize,
        aliases: usize,
    },
    /// Mythologies already existed; nothing was written
    AlreadyPresent,
}

/// Insert the reference pantheons if the store holds no mythology yet.
pub async fn seed_reference_data(pool: &AnyPool) -> Result<SeedOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (existing,) = sqlx::query_as::<Any, (i64,)>("SELECT COUNT(*) FROM mythologies")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::debug!(existing, "mythologies present, skipping seed");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let (mut gods, mut aliases) = (0, 0);
    for mythology in REFERENCE_DATA {
        let (mythology_id,) = sqlx::query_as::<Any, (i64,)>(
            "INSERT INTO mythologies (name) VALUES ($1) RETURNING id",
        )
        .bind(mythology.name)
        .fetch_one(&mut *tx)
        .await?;

        for seed in mythology.gods {
            let (god_id,) = sqlx::query_as::<Any, (i64,)>(
                "INSERT INTO gods (name, description, mythology_id) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(seed.name)
            .bind(seed.description)
            .bind(mythology_id)
            .fetch_one(&mut *tx)
            .await?;
            gods += 1;

            for alias in seed.aliases {
                sqlx::query("INSERT INTO aliases (god_id, name) VALUES ($1, $2)")
                    .bind(god_id)
                    .bind(*alias)
                    .execute(&mut *tx)
                    .await?;
                aliases += 1;
            }
        }
    }

    tx.commit().await?;

    let outcome = SeedOutcome::Seeded {
        mythologies: REFERENCE_DATA.len(),
        gods,
        aliases,
    };
    tracing::info!(?outcome, "Seeded reference mythologies");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::{create_pool, Dialect, StorageBackend};
    use crate::db::schema::migrate;

    #[test]
    fn reference_data_shape() {
        let names: Vec<_> = REFERENCE_DATA.iter().map(|m| m.name).collect();
        assert_eq!(names, ["Norse", "Greek", "Roman"]);

        let odin = &REFERENCE_DATA[0].gods[0];
        assert_eq!(odin.name, "Odin");
        assert!(odin.aliases.contains(&"Woden"));
        assert!(odin.aliases.contains(&"Allfather"));
    }

    #[tokio::test]
    async fn seeds_once() {
        let pool = create_pool(&StorageBackend::Memory).await.unwrap();
        migrate(&pool, Dialect::Sqlite).await.unwrap();

        let first = seed_reference_data(&pool).await.unwrap();
        assert_eq!(
            first,
            SeedOutcome::Seeded {
                mythologies: 3,
                gods: 20,
                aliases: 31,
            }
        );

        let second = seed_reference_data(&pool).await.unwrap();
        assert_eq!(second, SeedOutcome::AlreadyPresent);

        let (gods,) = sqlx::query_as::<Any, (i64,)>("SELECT COUNT(*) FROM gods")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(gods, 20);
    }
}
