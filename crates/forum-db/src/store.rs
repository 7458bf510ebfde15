//! Data-access interfaces used by the HTTP layer, and their PostgreSQL implementations.
//!
//! Every mutating call on the PostgreSQL side runs in its own transaction. The
//! transaction is committed on success; on any early return it is dropped, which
//! rolls it back.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::{
    models::{AtualizacaoTopico, Curso, NovoCurso, NovoTopico, Resposta, Topico},
    repositories::{curso, resposta, topico},
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Course data access
#[async_trait]
pub trait CursoRepository: Send + Sync {
    /// Exact, case-sensitive match on the course name
    async fn find_by_nome(&self, nome: &str) -> Result<Option<Curso>, StoreError>;

    /// Seeding helper; courses are not created through the HTTP API
    async fn save(&self, novo: NovoCurso) -> Result<Curso, StoreError>;
}

/// Topic data access
#[async_trait]
pub trait TopicoRepository: Send + Sync {
    /// All topics in storage order (ascending id)
    async fn find_all(&self) -> Result<Vec<Topico>, StoreError>;

    /// Topics whose course name equals `nome_curso` exactly, in storage order
    async fn find_by_curso_nome(&self, nome_curso: &str) -> Result<Vec<Topico>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Topico>, StoreError>;

    /// Replies of a topic, oldest first
    async fn find_respostas(&self, topico_id: i64) -> Result<Vec<Resposta>, StoreError>;

    /// Persist a new topic; id, creation time and initial status are assigned here
    async fn save(&self, novo: NovoTopico) -> Result<Topico, StoreError>;

    /// Overwrite title and message. `None` when the topic does not exist.
    async fn update(
        &self,
        id: i64,
        atualizacao: AtualizacaoTopico,
    ) -> Result<Option<Topico>, StoreError>;

    /// `false` when the topic does not exist
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Cheap round-trip used by the readiness probe
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgCursoRepository {
    pool: PgPool,
}

impl PgCursoRepository {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CursoRepository for PgCursoRepository {
    async fn find_by_nome(&self, nome: &str) -> Result<Option<Curso>, StoreError> {
        Ok(curso::find_by_nome(&self.pool, nome).await?)
    }

    async fn save(&self, novo: NovoCurso) -> Result<Curso, StoreError> {
        let mut tx = self.pool.begin().await?;
        let curso = curso::insert(&mut *tx, &novo.nome, &novo.categoria).await?;
        tx.commit().await?;

        tracing::debug!(curso_id = curso.id, "course saved");
        Ok(curso)
    }
}

#[derive(Debug, Clone)]
pub struct PgTopicoRepository {
    pool: PgPool,
}

impl PgTopicoRepository {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicoRepository for PgTopicoRepository {
    async fn find_all(&self) -> Result<Vec<Topico>, StoreError> {
        Ok(topico::list_all(&self.pool).await?)
    }

    async fn find_by_curso_nome(&self, nome_curso: &str) -> Result<Vec<Topico>, StoreError> {
        Ok(topico::list_by_curso_nome(&self.pool, nome_curso).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Topico>, StoreError> {
        Ok(topico::find_by_id(&self.pool, id).await?)
    }

    async fn find_respostas(&self, topico_id: i64) -> Result<Vec<Resposta>, StoreError> {
        Ok(resposta::list_by_topico(&self.pool, topico_id).await?)
    }

    async fn save(&self, novo: NovoTopico) -> Result<Topico, StoreError> {
        let mut tx = self.pool.begin().await?;
        let topico = topico::insert(&mut *tx, &novo.titulo, &novo.mensagem, novo.curso.id).await?;
        tx.commit().await?;

        tracing::debug!(topico_id = topico.id, "topic saved");
        Ok(topico)
    }

    async fn update(
        &self,
        id: i64,
        atualizacao: AtualizacaoTopico,
    ) -> Result<Option<Topico>, StoreError> {
        let mut tx = self.pool.begin().await?;

        if !topico::lock_by_id(&mut *tx, id).await? {
            return Ok(None);
        }

        let topico =
            topico::update(&mut *tx, id, &atualizacao.titulo, &atualizacao.mensagem).await?;
        tx.commit().await?;

        Ok(topico)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        if !topico::lock_by_id(&mut *tx, id).await? {
            return Ok(false);
        }

        let deleted = topico::delete_by_id(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
