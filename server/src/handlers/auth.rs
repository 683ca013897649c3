//! REST-Handler fuer die Auth-Endpunkte
//!
//! Uebersetzt zwischen Wire-Typen und AuthService und bildet die
//! Fehlertaxonomie auf HTTP-Status ab. Rohe Datenbank- oder interne
//! Fehler verlassen den Server nie.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use pharmalager_auth::{AuthError, RegistrierungsDaten};
use pharmalager_db::models::BenutzerRecord;
use pharmalager_protocol::{ApiFehler, AuthAntwort, LoginRequest, RegistrierenRequest};

use crate::extractor::AuthAnspruch;
use crate::AppState;

/// `POST /v1/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegistrierenRequest>,
) -> Response {
    let daten = RegistrierungsDaten {
        full_name: body.full_name,
        email: body.email,
        passwort: body.password,
        phone: body.phone,
        rolle: body.role,
    };

    match state.auth.registrieren(daten).await {
        Ok((benutzer, token)) => {
            (StatusCode::CREATED, Json(auth_antwort(benutzer, token))).into_response()
        }
        Err(e) => fehler_in_antwort(e),
    }
}

/// `POST /v1/auth/login`
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    match state.auth.anmelden(&body.email, &body.password).await {
        Ok((benutzer, token)) => {
            (StatusCode::OK, Json(auth_antwort(benutzer, token))).into_response()
        }
        Err(e) => fehler_in_antwort(e),
    }
}

/// `GET /v1/auth/me` – Identitaet aus den verifizierten Claims
pub async fn me(AuthAnspruch(claims): AuthAnspruch) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "userId": claims.sub,
            "email": claims.email,
            "role": claims.role,
        })),
    )
        .into_response()
}

fn auth_antwort(benutzer: BenutzerRecord, token: String) -> AuthAntwort {
    AuthAntwort {
        token,
        user_id: pharmalager_core::UserId(benutzer.id),
        email: benutzer.email,
        full_name: benutzer.full_name,
        phone: benutzer.phone,
        role: benutzer.rolle,
    }
}

/// Bildet AuthError auf HTTP ab
fn fehler_in_antwort(fehler: AuthError) -> Response {
    match fehler {
        AuthError::Validierung(felder) => {
            let felder = felder
                .into_iter()
                .map(|f| pharmalager_protocol::FeldFehler {
                    field: f.feld,
                    message: f.meldung,
                })
                .collect();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiFehler::mit_feldern(422, "Eingabe ungueltig", felder)),
            )
                .into_response()
        }
        AuthError::EmailVergeben(_) => (
            StatusCode::CONFLICT,
            Json(ApiFehler::neu(409, "E-Mail bereits vergeben")),
        )
            .into_response(),
        AuthError::UngueltigeAnmeldedaten => (
            StatusCode::UNAUTHORIZED,
            Json(ApiFehler::neu(401, "E-Mail oder Passwort falsch")),
        )
            .into_response(),
        AuthError::TokenUngueltig => (
            StatusCode::UNAUTHORIZED,
            Json(ApiFehler::neu(401, "Nicht authentifiziert")),
        )
            .into_response(),
        andere => {
            tracing::error!(fehler = %andere, "Interner Fehler im Auth-Handler");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiFehler::neu(500, "Interner Serverfehler")),
            )
                .into_response()
        }
    }
}
