use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use chrono::{Duration, TimeZone, Utc};
use forum_api::{ApiState, config::Environment, router};
use forum_db::{
    CursoRepository, StoreError, TopicoRepository,
    models::{
        AtualizacaoTopico, Curso, NovoCurso, NovoTopico, Resposta, StatusTopico, Topico,
    },
};
use http_body_util::BodyExt;
use serde::Deserialize;
use tower::ServiceExt;

#[derive(Debug, Default)]
struct Tables {
    cursos: Vec<Curso>,
    topicos: Vec<Topico>,
    respostas: Vec<Resposta>,
    next_id: i64,
}

impl Tables {
    const fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Store kept in memory so the HTTP layer can be exercised without PostgreSQL.
///
/// Ids come from one shared sequence and creation times advance one minute per
/// insert, so ordering assertions are deterministic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    fn now(tables: &Tables) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::minutes(tables.next_id)
    }

    pub fn seed_curso(&self, nome: &str, categoria: &str) -> Curso {
        let mut tables = self.tables.lock().unwrap();
        let curso = Curso {
            id: tables.next_id(),
            nome: nome.to_string(),
            categoria: categoria.to_string(),
        };
        tables.cursos.push(curso.clone());
        curso
    }

    /// Insert a topic directly, creating its course when missing
    pub fn seed_topico(&self, titulo: &str, mensagem: &str, nome_curso: &str) -> Topico {
        let existing = self
            .tables
            .lock()
            .unwrap()
            .cursos
            .iter()
            .find(|c| c.nome == nome_curso)
            .cloned();
        let curso = existing.unwrap_or_else(|| self.seed_curso(nome_curso, "Geral"));

        let mut tables = self.tables.lock().unwrap();
        let topico = Topico {
            id: tables.next_id(),
            titulo: titulo.to_string(),
            mensagem: mensagem.to_string(),
            data_criacao: Self::now(&tables),
            status: StatusTopico::NaoRespondido,
            curso,
        };
        tables.topicos.push(topico.clone());
        topico
    }

    pub fn seed_resposta(&self, topico_id: i64, mensagem: &str, autor: &str) -> Resposta {
        let mut tables = self.tables.lock().unwrap();
        let resposta = Resposta {
            id: tables.next_id(),
            topico_id,
            mensagem: mensagem.to_string(),
            autor: autor.to_string(),
            solucao: false,
            data_criacao: Self::now(&tables),
        };
        tables.respostas.push(resposta.clone());
        resposta
    }

    pub fn topico_count(&self) -> usize {
        self.tables.lock().unwrap().topicos.len()
    }

    pub fn resposta_count(&self) -> usize {
        self.tables.lock().unwrap().respostas.len()
    }

    pub fn topico(&self, id: i64) -> Option<Topico> {
        self.tables
            .lock()
            .unwrap()
            .topicos
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }
}

#[async_trait]
impl CursoRepository for InMemoryStore {
    async fn find_by_nome(&self, nome: &str) -> Result<Option<Curso>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.cursos.iter().find(|c| c.nome == nome).cloned())
    }

    async fn save(&self, novo: NovoCurso) -> Result<Curso, StoreError> {
        self.check_available()?;
        Ok(self.seed_curso(&novo.nome, &novo.categoria))
    }
}

#[async_trait]
impl TopicoRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Topico>, StoreError> {
        self.check_available()?;
        Ok(self.tables.lock().unwrap().topicos.clone())
    }

    async fn find_by_curso_nome(&self, nome_curso: &str) -> Result<Vec<Topico>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .topicos
            .iter()
            .filter(|t| t.curso.nome == nome_curso)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Topico>, StoreError> {
        self.check_available()?;
        Ok(self.topico(id))
    }

    async fn find_respostas(&self, topico_id: i64) -> Result<Vec<Resposta>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .respostas
            .iter()
            .filter(|r| r.topico_id == topico_id)
            .cloned()
            .collect())
    }

    async fn save(&self, novo: NovoTopico) -> Result<Topico, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.lock().unwrap();
        let topico = Topico {
            id: tables.next_id(),
            titulo: novo.titulo,
            mensagem: novo.mensagem,
            data_criacao: Self::now(&tables),
            status: StatusTopico::default(),
            curso: novo.curso,
        };
        tables.topicos.push(topico.clone());
        Ok(topico)
    }

    async fn update(
        &self,
        id: i64,
        atualizacao: AtualizacaoTopico,
    ) -> Result<Option<Topico>, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.topicos.iter_mut().find(|t| t.id == id).map(|topico| {
            topico.titulo = atualizacao.titulo;
            topico.mensagem = atualizacao.mensagem;
            topico.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.topicos.len();
        tables.topicos.retain(|t| t.id != id);
        if tables.topicos.len() == before {
            return Ok(false);
        }
        tables.respostas.retain(|r| r.topico_id != id);
        Ok(true)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

/// App wired to an in-memory store, returned alongside the store for inspection
pub fn test_app() -> (TestClient, Arc<InMemoryStore>) {
    let store = InMemoryStore::new();
    let state = ApiState::with_repositories(
        store.clone(),
        store.clone(),
        Environment::Development,
    );
    let app = router::router().with_state(state);
    (TestClient::new(app), store)
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub const fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.send_json("POST", uri, body, None).await
    }

    pub async fn put_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.send_json("PUT", uri, body, None).await
    }

    /// Send a JSON body with an explicit `Accept-Language`
    pub async fn send_json<T: serde::Serialize>(
        &self,
        method: &str,
        uri: &str,
        body: &T,
        accept_language: Option<&str>,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");
        self.send_raw(method, uri, json_body, accept_language).await
    }

    /// Send a body with an explicit `Content-Type`
    pub async fn post_with_content_type(
        &self,
        uri: &str,
        body: String,
        content_type: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body))
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send an arbitrary body labelled as JSON
    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        body: String,
        accept_language: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(language) = accept_language {
            builder = builder.header("accept-language", language);
        }
        let request = builder
            .body(Body::from(body))
            .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}
