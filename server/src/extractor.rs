//! Bearer-Token-Extraktion und -Verifikation
//!
//! Der Extractor verifiziert den JWT aus dem Authorization-Header und
//! stellt die Claims dem Handler zur Verfuegung. Jeder Fehlgrund
//! (fehlender Header, Signatur, Issuer, Audience, Ablauf, Algorithmus)
//! ergibt dieselbe 401-Antwort – nach aussen wird nicht unterschieden.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::Response,
};

use pharmalager_auth::Claims;

use crate::handlers::fehler_antwort;
use crate::AppState;

/// Extrahiert den Bearer-Token aus dem Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Verifizierte Claims des anfragenden Benutzers
pub struct AuthAnspruch(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthAnspruch {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Response> {
        let token = bearer_token(&parts.headers).ok_or_else(nicht_authentifiziert)?;

        let claims = state
            .jwt
            .verifizieren(token)
            .map_err(|_| nicht_authentifiziert())?;

        Ok(Self(claims))
    }
}

fn nicht_authentifiziert() -> Response {
    fehler_antwort(StatusCode::UNAUTHORIZED, "Nicht authentifiziert")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_extrahieren() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_static("Bearer kopf.rumpf.signatur"),
        );
        assert_eq!(bearer_token(&headers), Some("kopf.rumpf.signatur"));
    }

    #[test]
    fn bearer_token_fehlt() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn anderes_schema_ignoriert() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }
}
