use chrono::{DateTime, Utc};
use forum_db::models::{Resposta, StatusTopico, Topico};
use serde::{Deserialize, Serialize};

/// Topic summary, used by the listing and as the body of create/update responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicoDto {
    pub id: i64,
    pub titulo: String,
    pub data_criacao: DateTime<Utc>,
}

impl From<&Topico> for TopicoDto {
    fn from(topico: &Topico) -> Self {
        Self {
            id: topico.id,
            titulo: topico.titulo.clone(),
            data_criacao: topico.data_criacao,
        }
    }
}

impl TopicoDto {
    pub fn converter(topicos: &[Topico]) -> Vec<Self> {
        topicos.iter().map(Self::from).collect()
    }
}

/// Reply as shown inside a topic's detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespostaDto {
    pub id: i64,
    pub mensagem: String,
    pub data_criacao: DateTime<Utc>,
    pub nome_autor: String,
}

impl From<Resposta> for RespostaDto {
    fn from(resposta: Resposta) -> Self {
        Self {
            id: resposta.id,
            mensagem: resposta.mensagem,
            data_criacao: resposta.data_criacao,
            nome_autor: resposta.autor,
        }
    }
}

/// Full projection returned by `GET /topicos/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetalhesDoTopicoDto {
    pub id: i64,
    pub titulo: String,
    pub mensagem: String,
    pub data_criacao: DateTime<Utc>,
    pub status: StatusTopico,
    pub nome_curso: String,
    pub respostas: Vec<RespostaDto>,
}

impl DetalhesDoTopicoDto {
    pub fn new(topico: Topico, respostas: Vec<Resposta>) -> Self {
        Self {
            id: topico.id,
            titulo: topico.titulo,
            mensagem: topico.mensagem,
            data_criacao: topico.data_criacao,
            status: topico.status,
            nome_curso: topico.curso.nome,
            respostas: respostas.into_iter().map(RespostaDto::from).collect(),
        }
    }
}
