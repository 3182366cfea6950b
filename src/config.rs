//! Configuración cargada desde `matricula.toml`.
//!
//! La struct [`MatriculaConfig`] reúne las URLs base de los tres servicios y
//! los parámetros de la política de reintentos. Los valores ausentes en el
//! archivo usan defaults sensatos. Las variables de entorno
//! `MATRICULA_ENROLLMENT_URL`, `MATRICULA_STUDENT_URL` y
//! `MATRICULA_INSTITUTION_URL` tienen precedencia sobre el archivo.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

use crate::api::RetryPolicy;

/// Configuración de nivel superior cargada de `matricula.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatriculaConfig {
    /// URL base del servicio de matrículas (también sirve los periodos).
    #[serde(default = "default_enrollment_url")]
    pub enrollment_url: String,

    /// URL base del servicio de estudiantes.
    #[serde(default = "default_student_url")]
    pub student_url: String,

    /// URL base del servicio de instituciones (también sirve las aulas).
    #[serde(default = "default_institution_url")]
    pub institution_url: String,

    /// Intentos totales por llamada, incluido el primero.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Timeout por intento, en segundos.
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,

    /// Retardo base en milisegundos para el backoff exponencial.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_enrollment_url() -> String {
    "http://localhost:8081/api".to_string()
}

fn default_student_url() -> String {
    "http://localhost:8082/api".to_string()
}

fn default_institution_url() -> String {
    "http://localhost:8083/api".to_string()
}

// Tres intentos por llamada.
fn default_max_attempts() -> u32 {
    3
}

// Diez segundos por intento.
fn default_attempt_timeout_secs() -> u64 {
    10
}

// Un segundo de retardo base.
fn default_base_delay_ms() -> u64 {
    1000
}

impl Default for MatriculaConfig {
    fn default() -> Self {
        Self {
            enrollment_url: default_enrollment_url(),
            student_url: default_student_url(),
            institution_url: default_institution_url(),
            max_attempts: default_max_attempts(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl MatriculaConfig {
    /// Carga la configuración de `matricula.toml` en el directorio actual.
    /// Usa los valores por defecto si el archivo no existe.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("matricula.toml"))
    }

    /// Carga la configuración desde una ruta concreta.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<MatriculaConfig>(&contents)?
        } else {
            Self::default()
        };

        // Las variables de entorno tienen precedencia sobre el archivo.
        for (var, slot) in [
            ("MATRICULA_ENROLLMENT_URL", &mut config.enrollment_url),
            ("MATRICULA_STUDENT_URL", &mut config.student_url),
            ("MATRICULA_INSTITUTION_URL", &mut config.institution_url),
        ] {
            if let Ok(value) = std::env::var(var)
                && !value.is_empty()
            {
                *slot = value;
            }
        }

        Ok(config)
    }

    /// La política de reintentos compartida por todos los clientes.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay_ms: self.base_delay_ms,
            attempt_timeout: Duration::from_secs(self.attempt_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = MatriculaConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.attempt_timeout_secs, 10);
        assert_eq!(config.base_delay_ms, 1000);
        assert!(config.enrollment_url.starts_with("http://localhost"));
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            enrollment_url = "https://matricula.example.edu/api"
            max_attempts = 5
        "#;
        let config: MatriculaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.enrollment_url, "https://matricula.example.edu/api");
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.attempt_timeout_secs, 10);
        assert_eq!(config.base_delay_ms, 1000);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matricula.toml");
        std::fs::write(
            &path,
            "student_url = \"https://students.example.edu\"\nbase_delay_ms = 250\n",
        )
        .unwrap();

        let config = MatriculaConfig::load_from(&path).unwrap();
        assert_eq!(config.student_url, "https://students.example.edu");
        assert_eq!(config.base_delay_ms, 250);
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        let config = MatriculaConfig::load_from(Path::new("/nonexistent/matricula.toml")).unwrap();
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn retry_policy_from_config() {
        let config = MatriculaConfig {
            max_attempts: 4,
            attempt_timeout_secs: 2,
            ..Default::default()
        };
        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.attempt_timeout, Duration::from_secs(2));
    }
}
