use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Course model - topics are filed under exactly one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Curso {
    /// Unique course identifier
    pub id: i64,
    /// Course name (unique, used to resolve the course of a new topic)
    pub nome: String,
    /// Course category
    pub categoria: String,
}

/// Topic lifecycle, stored as the `status_topico` enum type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "status_topico", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTopico {
    #[default]
    NaoRespondido,
    NaoSolucionado,
    Solucionado,
    Fechado,
}

/// Topic model - a forum post together with the course it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topico {
    /// Unique topic identifier
    pub id: i64,
    pub titulo: String,
    pub mensagem: String,
    /// Assigned by the database on insert
    pub data_criacao: DateTime<Utc>,
    pub status: StatusTopico,
    pub curso: Curso,
}

/// Flat row shape of a topic joined with its course
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopicoRow {
    pub id: i64,
    pub titulo: String,
    pub mensagem: String,
    pub data_criacao: DateTime<Utc>,
    pub status: StatusTopico,
    pub curso_id: i64,
    pub curso_nome: String,
    pub curso_categoria: String,
}

impl From<TopicoRow> for Topico {
    fn from(row: TopicoRow) -> Self {
        Self {
            id: row.id,
            titulo: row.titulo,
            mensagem: row.mensagem,
            data_criacao: row.data_criacao,
            status: row.status,
            curso: Curso {
                id: row.curso_id,
                nome: row.curso_nome,
                categoria: row.curso_categoria,
            },
        }
    }
}

/// Reply to a topic (read-only through the API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resposta {
    pub id: i64,
    pub topico_id: i64,
    pub mensagem: String,
    /// Display name of the author
    pub autor: String,
    /// Whether this reply was marked as the solution
    pub solucao: bool,
    pub data_criacao: DateTime<Utc>,
}

/// Insert struct for a topic whose course is already resolved
#[derive(Debug, Clone)]
pub struct NovoTopico {
    pub titulo: String,
    pub mensagem: String,
    pub curso: Curso,
}

/// Fields of a topic that can be overwritten after creation
#[derive(Debug, Clone)]
pub struct AtualizacaoTopico {
    pub titulo: String,
    pub mensagem: String,
}

/// Insert struct for a course
#[derive(Debug, Clone)]
pub struct NovoCurso {
    pub nome: String,
    pub categoria: String,
}
