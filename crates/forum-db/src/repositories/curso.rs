use sqlx::{Executor, Postgres};

use crate::models::Curso;

pub async fn find_by_nome<'e, E>(executor: E, nome: &str) -> Result<Option<Curso>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, nome, categoria
            FROM cursos
            WHERE nome = $1
        "#,
    )
    .bind(nome)
    .fetch_optional(executor)
    .await
}

pub async fn insert<'e, E>(executor: E, nome: &str, categoria: &str) -> Result<Curso, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO cursos (nome, categoria)
            VALUES ($1, $2)
            RETURNING id, nome, categoria
        "#,
    )
    .bind(nome)
    .bind(categoria)
    .fetch_one(executor)
    .await
}
