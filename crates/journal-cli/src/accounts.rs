//! Single-row provisioning used by `create-user` and `create-discipline`.

use journal_core::{DisciplineId, UserId};
use journal_db::DbPool;
use journal_models::NewUser;

pub async fn create_user(db: &DbPool, user: &NewUser) -> Result<UserId, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO users (last_name, first_name, patronymic, email, role)
           VALUES (?, ?, ?, ?, ?)"#,
    )
    .bind(&user.last_name)
    .bind(&user.first_name)
    .bind(&user.patronymic)
    .bind(&user.email)
    .bind(user.role)
    .execute(db)
    .await?;

    Ok(UserId::new(result.last_insert_rowid()))
}

pub async fn create_discipline(db: &DbPool, name: &str) -> Result<DisciplineId, sqlx::Error> {
    let result = sqlx::query("INSERT INTO disciplines (name) VALUES (?)")
        .bind(name)
        .execute(db)
        .await?;

    Ok(DisciplineId::new(result.last_insert_rowid()))
}
