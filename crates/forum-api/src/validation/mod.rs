//! Request validation and the uniform field-error response.
//!
//! Handlers call [`ValidatedForm::validate_form`] on every inbound form before
//! touching storage. Failures become [`ApiError::Validation`], which renders as
//! `400 Bad Request` with a JSON array of [`ErroDeFormularioDto`].

mod locale;
pub mod messages;

pub use locale::Locale;

use std::{borrow::Cow, collections::HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{error::ApiError, metrics};

/// One invalid field: its wire name and the localized reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErroDeFormularioDto {
    pub campo: String,
    pub erro: String,
}

impl ErroDeFormularioDto {
    pub fn new(campo: impl Into<String>, erro: impl Into<String>) -> Self {
        Self {
            campo: campo.into(),
            erro: erro.into(),
        }
    }

    /// Build a field error outside the derive-based checks (e.g. lookups)
    pub fn from_code(
        campo: &str,
        code: &str,
        params: &HashMap<Cow<'static, str>, Value>,
        locale: Locale,
    ) -> Self {
        Self::new(campo, messages::resolve(code, params, locale))
    }
}

/// An inbound payload checked with `validator` before conversion
pub trait ValidatedForm: Validate {
    /// Form name, used as a metrics label
    const NAME: &'static str;

    /// `(struct field, wire field)` pairs, in declaration order
    const FIELDS: &'static [(&'static str, &'static str)];

    fn validate_form(&self, locale: Locale) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let erros = field_errors(&errors, Self::FIELDS, locale);
            metrics::record_validation_failure(Self::NAME, erros.len());
            ApiError::Validation(erros)
        })
    }
}

/// Flatten `errors` into wire field errors ordered by `fields`.
///
/// Fields missing from `fields` keep their struct name and sort last.
pub fn field_errors(
    errors: &ValidationErrors,
    fields: &[(&str, &str)],
    locale: Locale,
) -> Vec<ErroDeFormularioDto> {
    let mut collected: Vec<(usize, ErroDeFormularioDto)> = Vec::new();

    for (field, failures) in errors.field_errors() {
        let field: &str = field.as_ref();
        let (position, campo) = fields
            .iter()
            .position(|(name, wire)| *name == field || *wire == field)
            .map_or((fields.len(), field), |i| (i, fields[i].1));

        collected.extend(
            failures
                .iter()
                .map(|failure| (position, localize(campo, failure, locale))),
        );
    }

    // Stable: failures of one field keep the order the validator produced
    collected.sort_by_key(|(position, _)| *position);
    collected.into_iter().map(|(_, erro)| erro).collect()
}

fn localize(campo: &str, failure: &ValidationError, locale: Locale) -> ErroDeFormularioDto {
    ErroDeFormularioDto::from_code(campo, &failure.code, &failure.params, locale)
}
