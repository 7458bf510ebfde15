//! Localized text for validation failures.
//!
//! Templates are looked up by validation code and may reference the parameters
//! carried by the failure as `{name}` (e.g. `{min}` for length checks).

use std::{borrow::Cow, collections::HashMap};

use serde_json::Value;

use super::Locale;

/// Code for a field that is absent or `null`
pub const REQUIRED: &str = "required";
/// Code for a field that is present but empty
pub const NOT_EMPTY: &str = "not_empty";
/// Code emitted by the `length` validator
pub const LENGTH: &str = "length";
/// Code for a course name that matches no course
pub const CURSO_NAO_ENCONTRADO: &str = "curso_nao_encontrado";

fn template(code: &str, locale: Locale) -> &'static str {
    match (code, locale) {
        (REQUIRED, Locale::PtBr) => "não deve ser nulo",
        (REQUIRED, Locale::En) => "must not be null",
        (NOT_EMPTY, Locale::PtBr) => "não deve estar vazio",
        (NOT_EMPTY, Locale::En) => "must not be empty",
        (LENGTH, Locale::PtBr) => "tamanho deve ser de no mínimo {min} caracteres",
        (LENGTH, Locale::En) => "length must be at least {min} characters",
        (CURSO_NAO_ENCONTRADO, Locale::PtBr) => "curso '{value}' não encontrado",
        (CURSO_NAO_ENCONTRADO, Locale::En) => "course '{value}' not found",
        (_, Locale::PtBr) => "valor inválido",
        (_, Locale::En) => "invalid value",
    }
}

/// Resolve the message for `code` in `locale`, filling in `params`
pub fn resolve(code: &str, params: &HashMap<Cow<'static, str>, Value>, locale: Locale) -> String {
    params
        .iter()
        .fold(template(code, locale).to_string(), |text, (name, value)| {
            let placeholder = format!("{{{name}}}");
            if !text.contains(&placeholder) {
                return text;
            }
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            text.replace(&placeholder, &rendered)
        })
}
