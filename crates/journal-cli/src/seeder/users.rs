//! Fake user generation and batched insertion.

use fake::Fake;
use fake::faker::internet::en::Username;
use fake::faker::name::en::{FirstName, LastName};
use journal_core::{Role, UserId};
use journal_db::DbPool;
use rayon::prelude::*;
use sqlx::{QueryBuilder, Sqlite};

use super::models::UserSeed;

// 5 params per user
const BATCH_SIZE: usize = 500;

pub fn generate_users(role: Role, count: usize) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let handle: String = Username().fake();

            UserSeed {
                email: format!("{}+{}{}@example.com", handle.to_lowercase(), role, idx),
                patronymic: (idx % 2 == 0).then(|| format!("{}ovich", LastName().fake::<String>())),
                first_name,
                last_name,
                role,
            }
        })
        .collect()
}

/// Inserts users in one transaction and returns their ids.
pub async fn insert_users(db: &DbPool, users: &[UserSeed]) -> Result<Vec<UserId>, sqlx::Error> {
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO users (last_name, first_name, patronymic, email, role) ");
        query.push_values(chunk, |mut row, user| {
            row.push_bind(&user.last_name)
                .push_bind(&user.first_name)
                .push_bind(&user.patronymic)
                .push_bind(&user.email)
                .push_bind(user.role);
        });
        query.push(" RETURNING id");

        let chunk_ids: Vec<UserId> = query.build_query_scalar().fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;
    Ok(ids)
}
