use sqlx::{Executor, Postgres};

use crate::models::Resposta;

pub async fn list_by_topico<'e, E>(executor: E, topico_id: i64) -> Result<Vec<Resposta>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, topico_id, mensagem, autor, solucao, data_criacao
            FROM respostas
            WHERE topico_id = $1
            ORDER BY data_criacao, id
        "#,
    )
    .bind(topico_id)
    .fetch_all(executor)
    .await
}

/// Seeding helper; replies are read-only through the HTTP API
pub async fn insert<'e, E>(
    executor: E,
    topico_id: i64,
    mensagem: &str,
    autor: &str,
) -> Result<Resposta, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO respostas (topico_id, mensagem, autor)
            VALUES ($1, $2, $3)
            RETURNING id, topico_id, mensagem, autor, solucao, data_criacao
        "#,
    )
    .bind(topico_id)
    .bind(mensagem)
    .bind(autor)
    .fetch_one(executor)
    .await
}
