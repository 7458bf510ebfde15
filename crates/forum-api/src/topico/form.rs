use std::{borrow::Cow, collections::HashMap};

use forum_db::{
    CursoRepository,
    models::{AtualizacaoTopico, NovoTopico},
};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::{
    error::ApiError,
    validation::{ErroDeFormularioDto, Locale, ValidatedForm, messages},
};

/// Body of `POST /topicos`
///
/// Fields are optional so that absent and `null` values surface as
/// `required` failures instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TopicoForm {
    #[validate(required, length(min = 5))]
    pub titulo: Option<String>,
    #[validate(required, length(min = 1, code = "not_empty"))]
    pub mensagem: Option<String>,
    #[validate(required, length(min = 1, code = "not_empty"))]
    pub nome_curso: Option<String>,
}

impl ValidatedForm for TopicoForm {
    const NAME: &'static str = "topico";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("titulo", "titulo"),
        ("mensagem", "mensagem"),
        ("nome_curso", "nomeCurso"),
    ];
}

impl TopicoForm {
    /// Resolve the course by name and build the insert struct.
    ///
    /// Call after [`ValidatedForm::validate_form`]. An unknown course is a
    /// validation failure on `nomeCurso`.
    pub async fn converter(
        self,
        cursos: &dyn CursoRepository,
        locale: Locale,
    ) -> Result<NovoTopico, ApiError> {
        let nome_curso = self.nome_curso.unwrap_or_default();

        let Some(curso) = cursos.find_by_nome(&nome_curso).await? else {
            tracing::debug!(nome_curso = %nome_curso, "Course not found for new topic");
            let params = HashMap::from([(Cow::Borrowed("value"), Value::String(nome_curso))]);
            return Err(ApiError::Validation(vec![ErroDeFormularioDto::from_code(
                "nomeCurso",
                messages::CURSO_NAO_ENCONTRADO,
                &params,
                locale,
            )]));
        };

        Ok(NovoTopico {
            titulo: self.titulo.unwrap_or_default(),
            mensagem: self.mensagem.unwrap_or_default(),
            curso,
        })
    }
}

/// Body of `PUT /topicos/{id}`; the course cannot be changed
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AtualizacaoTopicoForm {
    #[validate(required, length(min = 5))]
    pub titulo: Option<String>,
    #[validate(required, length(min = 1, code = "not_empty"))]
    pub mensagem: Option<String>,
}

impl ValidatedForm for AtualizacaoTopicoForm {
    const NAME: &'static str = "atualizacao_topico";
    const FIELDS: &'static [(&'static str, &'static str)] =
        &[("titulo", "titulo"), ("mensagem", "mensagem")];
}

impl From<AtualizacaoTopicoForm> for AtualizacaoTopico {
    fn from(form: AtualizacaoTopicoForm) -> Self {
        Self {
            titulo: form.titulo.unwrap_or_default(),
            mensagem: form.mensagem.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campos(result: Result<(), ApiError>) -> Vec<String> {
        match result {
            Err(ApiError::Validation(erros)) => erros.into_iter().map(|e| e.campo).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_topico_form() {
        let form: TopicoForm = serde_json::from_str(
            r#"{"titulo":"Dúvida","mensagem":"Erro ao compilar","nomeCurso":"Spring Boot"}"#,
        )
        .unwrap();
        assert!(form.validate_form(Locale::PtBr).is_ok());
    }

    #[test]
    fn test_short_titulo() {
        let form = TopicoForm {
            titulo: Some("abcd".to_string()),
            mensagem: Some("mensagem".to_string()),
            nome_curso: Some("Java".to_string()),
        };
        assert_eq!(campos(form.validate_form(Locale::PtBr)), vec!["titulo"]);
    }

    #[test]
    fn test_titulo_length_counts_characters() {
        // Five characters, more than five bytes
        let form = TopicoForm {
            titulo: Some("ações".to_string()),
            mensagem: Some("m".to_string()),
            nome_curso: Some("Java".to_string()),
        };
        assert!(form.validate_form(Locale::PtBr).is_ok());
    }

    #[test]
    fn test_empty_body_reports_every_field_in_order() {
        let form: TopicoForm = serde_json::from_str("{}").unwrap();
        assert_eq!(
            campos(form.validate_form(Locale::PtBr)),
            vec!["titulo", "mensagem", "nomeCurso"]
        );
    }

    #[test]
    fn test_empty_strings() {
        let form = TopicoForm {
            titulo: Some(String::new()),
            mensagem: Some(String::new()),
            nome_curso: Some(String::new()),
        };
        let Err(ApiError::Validation(erros)) = form.validate_form(Locale::En) else {
            panic!("expected validation error");
        };
        assert_eq!(
            erros,
            vec![
                ErroDeFormularioDto::new("titulo", "length must be at least 5 characters"),
                ErroDeFormularioDto::new("mensagem", "must not be empty"),
                ErroDeFormularioDto::new("nomeCurso", "must not be empty"),
            ]
        );
    }

    #[test]
    fn test_atualizacao_form() {
        let form: AtualizacaoTopicoForm =
            serde_json::from_str(r#"{"titulo":"Novo título","mensagem":null}"#).unwrap();
        assert_eq!(campos(form.validate_form(Locale::PtBr)), vec!["mensagem"]);

        let form = AtualizacaoTopicoForm {
            titulo: Some("Novo título".to_string()),
            mensagem: Some("Nova mensagem".to_string()),
        };
        assert!(form.validate_form(Locale::PtBr).is_ok());
        let atualizacao = AtualizacaoTopico::from(form);
        assert_eq!(atualizacao.titulo, "Novo título");
        assert_eq!(atualizacao.mensagem, "Nova mensagem");
    }
}
