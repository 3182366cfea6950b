//! Tipos de error para la capa HTTP.
//!
//! Define [`ApiError`] con una variante por categoría de fallo. Usa
//! `thiserror` para derivar `Display` y `Error` a partir de los atributos
//! `#[error(...)]`. El ejecutor de peticiones es la única capa que consulta
//! [`ApiError::is_retryable`]; toda capa superior trata un error como final.

use std::collections::BTreeMap;

use thiserror::Error;

/// Mensaje con el que se reformula una violación de unicidad del servidor.
pub const DUPLICATE_ENROLLMENT_MESSAGE: &str =
    "the student already has an enrollment for this academic period and year";

// Fragmentos conocidos en cuerpos 500 que delatan la restricción de unicidad.
const UNIQUE_CONSTRAINT_SIGNATURES: &[&str] = &[
    "unique constraint",
    "duplicate key",
    "uq_enrollment_student_period",
];

/// Errores que puede producir una llamada a los servicios remotos.
///
/// Las variantes siguen la taxonomía del sistema:
/// - [`Timeout`](ApiError::Timeout) y [`Transport`](ApiError::Transport) —
///   fallos transitorios, reintentables.
/// - [`NotFound`](ApiError::NotFound) — 404, nunca se reintenta; en una
///   transición de estado indica que el registro remoto ya no existe.
/// - [`Validation`](ApiError::Validation) — 400 con mapa de errores por campo.
/// - [`Conflict`](ApiError::Conflict) — 500 cuyo cuerpo coincide con una
///   firma de restricción de unicidad; se reformula como matrícula duplicada.
/// - [`Server`](ApiError::Server) — otros 5xx, reintentables hasta agotar
///   el presupuesto de intentos.
/// - [`Unexpected`](ApiError::Unexpected) — otros 4xx (401, 409, ...),
///   nunca reintentados.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Un intento superó el timeout configurado y fue cancelado.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Fallo de red subyacente (DNS, conexión rechazada, cuerpo truncado).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// El recurso no existe en el servidor.
    #[error("resource not found: {path}")]
    NotFound { path: String },

    /// El servidor rechazó la petición con errores por campo.
    #[error("validation rejected by server on {} field(s)", field_errors.len())]
    Validation {
        field_errors: BTreeMap<String, String>,
    },

    /// Violación de unicidad, reformulada para el usuario.
    #[error("{message}")]
    Conflict { message: String },

    /// Error del servidor sin clasificación más específica.
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Respuesta cliente-error fuera de la taxonomía (401, 409, ...).
    #[error("unexpected response (status {status}): {message}")]
    Unexpected { status: u16, message: String },
}

impl ApiError {
    /// Solo los fallos transitorios y los 5xx genéricos se reintentan.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout { .. } | ApiError::Transport(_) | ApiError::Server { .. }
        )
    }

    /// ¿Coincide el cuerpo de un 5xx con una firma de unicidad conocida?
    pub(crate) fn is_unique_constraint(body: &str) -> bool {
        let folded = body.to_lowercase();
        UNIQUE_CONSTRAINT_SIGNATURES
            .iter()
            .any(|sig| folded.contains(sig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ApiError::Timeout { timeout_ms: 10_000 }.is_retryable());
        assert!(
            ApiError::Server {
                status: 503,
                message: "unavailable".into()
            }
            .is_retryable()
        );
        assert!(!ApiError::NotFound { path: "/enrollments/9".into() }.is_retryable());
        assert!(
            !ApiError::Validation {
                field_errors: BTreeMap::new()
            }
            .is_retryable()
        );
        assert!(
            !ApiError::Conflict {
                message: DUPLICATE_ENROLLMENT_MESSAGE.into()
            }
            .is_retryable()
        );
        assert!(
            !ApiError::Unexpected {
                status: 401,
                message: "unauthorized".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn unique_constraint_signature_matching() {
        assert!(ApiError::is_unique_constraint(
            "ERROR: duplicate key value violates unique constraint \"uq_enrollment_student_period\""
        ));
        assert!(ApiError::is_unique_constraint(
            "could not execute statement; Unique Constraint violated"
        ));
        assert!(!ApiError::is_unique_constraint("internal server error"));
    }

    #[test]
    fn validation_display_counts_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("studentId".to_string(), "required".to_string());
        fields.insert("shift".to_string(), "required".to_string());
        let err = ApiError::Validation { field_errors: fields };
        assert_eq!(err.to_string(), "validation rejected by server on 2 field(s)");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
