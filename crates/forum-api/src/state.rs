use std::sync::Arc;

use forum_db::{CursoRepository, PgCursoRepository, PgTopicoRepository, TopicoRepository};
use sqlx::PgPool;

use crate::{ApiConfig, config::Environment};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct ApiState {
    pub topicos: Arc<dyn TopicoRepository>,
    pub cursos: Arc<dyn CursoRepository>,
    pub environment: Environment,
}

impl ApiState {
    /// State backed by PostgreSQL
    pub fn new(config: &ApiConfig, pool: PgPool) -> Self {
        Self::with_repositories(
            Arc::new(PgTopicoRepository::new(pool.clone())),
            Arc::new(PgCursoRepository::new(pool)),
            config.env.clone(),
        )
    }

    /// State backed by arbitrary repository implementations
    pub fn with_repositories(
        topicos: Arc<dyn TopicoRepository>,
        cursos: Arc<dyn CursoRepository>,
        environment: Environment,
    ) -> Self {
        Self {
            topicos,
            cursos,
            environment,
        }
    }
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
