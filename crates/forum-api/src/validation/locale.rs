use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Languages error messages are available in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// Brazilian Portuguese, used when the caller asks for nothing we support
    #[default]
    PtBr,
    En,
}

impl Locale {
    /// Pick the preferred supported language from an `Accept-Language` value.
    ///
    /// # Examples
    /// ```
    /// use forum_api::validation::Locale;
    ///
    /// assert_eq!(Locale::from_accept_language("en-US,en;q=0.9"), Locale::En);
    /// assert_eq!(Locale::from_accept_language("de, en;q=0.5"), Locale::En);
    /// assert_eq!(Locale::from_accept_language("de"), Locale::PtBr);
    /// ```
    pub fn from_accept_language(value: &str) -> Self {
        let mut ranges: Vec<(&str, f32)> = value
            .split(',')
            .filter_map(|part| {
                let mut pieces = part.split(';');
                let tag = pieces.next()?.trim();
                if tag.is_empty() {
                    return None;
                }
                let quality = pieces
                    .find_map(|p| p.trim().strip_prefix("q="))
                    .and_then(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                Some((tag, quality))
            })
            .collect();

        // Stable sort keeps header order between equal weights
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges
            .into_iter()
            .filter(|(_, quality)| *quality > 0.0)
            .find_map(|(tag, _)| Self::from_tag(tag))
            .unwrap_or_default()
    }

    fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?.to_lowercase();
        match primary.as_str() {
            "pt" => Some(Self::PtBr),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .map(Self::from_accept_language)
            .unwrap_or_default())
    }
}
