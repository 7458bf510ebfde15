use sqlx::{Executor, Postgres};

use crate::models::{StatusTopico, Topico, TopicoRow};

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Topico>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let rows: Vec<TopicoRow> = sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                t.id,
                t.titulo,
                t.mensagem,
                t.data_criacao,
                t.status,
                c.id as curso_id,
                c.nome as curso_nome,
                c.categoria as curso_categoria
            FROM topicos t
            JOIN cursos c ON c.id = t.curso_id
            ORDER BY t.id
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(Topico::from).collect())
}

pub async fn list_by_curso_nome<'e, E>(executor: E, nome_curso: &str) -> Result<Vec<Topico>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let rows: Vec<TopicoRow> = sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                t.id,
                t.titulo,
                t.mensagem,
                t.data_criacao,
                t.status,
                c.id as curso_id,
                c.nome as curso_nome,
                c.categoria as curso_categoria
            FROM topicos t
            JOIN cursos c ON c.id = t.curso_id
            WHERE c.nome = $1
            ORDER BY t.id
        "#,
    )
    .bind(nome_curso)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(Topico::from).collect())
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Topico>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let row: Option<TopicoRow> = sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                t.id,
                t.titulo,
                t.mensagem,
                t.data_criacao,
                t.status,
                c.id as curso_id,
                c.nome as curso_nome,
                c.categoria as curso_categoria
            FROM topicos t
            JOIN cursos c ON c.id = t.curso_id
            WHERE t.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(Topico::from))
}

/// Lock the topic row until the surrounding transaction ends.
/// Returns `false` when the topic does not exist.
pub async fn lock_by_id<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let locked: Option<i64> = sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT id
            FROM topicos
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(locked.is_some())
}

pub async fn insert<'e, E>(
    executor: E,
    titulo: &str,
    mensagem: &str,
    curso_id: i64,
) -> Result<Topico, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let row: TopicoRow = sqlx::query_as(
        // language=PostgreSQL
        r#"
            WITH t AS (
                INSERT INTO topicos (titulo, mensagem, status, curso_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, titulo, mensagem, data_criacao, status, curso_id
            )
            SELECT
                t.id,
                t.titulo,
                t.mensagem,
                t.data_criacao,
                t.status,
                c.id as curso_id,
                c.nome as curso_nome,
                c.categoria as curso_categoria
            FROM t
            JOIN cursos c ON c.id = t.curso_id
        "#,
    )
    .bind(titulo)
    .bind(mensagem)
    .bind(StatusTopico::NaoRespondido)
    .bind(curso_id)
    .fetch_one(executor)
    .await?;

    Ok(row.into())
}

pub async fn update<'e, E>(
    executor: E,
    id: i64,
    titulo: &str,
    mensagem: &str,
) -> Result<Option<Topico>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let row: Option<TopicoRow> = sqlx::query_as(
        // language=PostgreSQL
        r#"
            WITH t AS (
                UPDATE topicos
                SET titulo = $2, mensagem = $3
                WHERE id = $1
                RETURNING id, titulo, mensagem, data_criacao, status, curso_id
            )
            SELECT
                t.id,
                t.titulo,
                t.mensagem,
                t.data_criacao,
                t.status,
                c.id as curso_id,
                c.nome as curso_nome,
                c.categoria as curso_categoria
            FROM t
            JOIN cursos c ON c.id = t.curso_id
        "#,
    )
    .bind(id)
    .bind(titulo)
    .bind(mensagem)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(Topico::from))
}

/// Returns `true` when a row was removed. Replies go with it (`ON DELETE CASCADE`).
pub async fn delete_by_id<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM topicos
            WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
