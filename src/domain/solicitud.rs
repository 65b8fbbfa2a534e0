//! Solicitud (employee request) wire types.
//!
//! Field names follow the backend API exactly (`titulo`, `categoria`,
//! `fecha`, `documentoId`, ...), so these types serialize straight into the
//! JSON bodies the server expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a user in the approval chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Empleado,
    Supervisor,
    Hr,
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rol::Empleado => write!(f, "empleado"),
            Rol::Supervisor => write!(f, "supervisor"),
            Rol::Hr => write!(f, "hr"),
        }
    }
}

impl FromStr for Rol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "empleado" => Ok(Rol::Empleado),
            "supervisor" => Ok(Rol::Supervisor),
            "hr" => Ok(Rol::Hr),
            _ => Err(format!("Invalid rol: {}", s)),
        }
    }
}

/// Review state of a solicitud.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Estado {
    #[default]
    Pendiente,
    Aprobado,
    Rechazado,
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estado::Pendiente => write!(f, "pendiente"),
            Estado::Aprobado => write!(f, "aprobado"),
            Estado::Rechazado => write!(f, "rechazado"),
        }
    }
}

impl FromStr for Estado {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pendiente" => Ok(Estado::Pendiente),
            "aprobado" => Ok(Estado::Aprobado),
            "rechazado" => Ok(Estado::Rechazado),
            _ => Err(format!("Invalid estado: {}", s)),
        }
    }
}

/// Closed set of request categories offered by the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Categoria {
    Vacaciones,
    Licencia,
    Permiso,
}

impl fmt::Display for Categoria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Categoria::Vacaciones => write!(f, "Vacaciones"),
            Categoria::Licencia => write!(f, "Licencia"),
            Categoria::Permiso => write!(f, "Permiso"),
        }
    }
}

impl FromStr for Categoria {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Vacaciones" => Ok(Categoria::Vacaciones),
            "Licencia" => Ok(Categoria::Licencia),
            "Permiso" => Ok(Categoria::Permiso),
            _ => Err(format!("Invalid categoria: {}", s)),
        }
    }
}

/// A user referenced by a solicitud (employee, supervisor, or HR contact).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    pub nombre: String,
    pub correo: String,
    pub rol: Rol,
}

impl Usuario {
    pub fn new(nombre: impl Into<String>, correo: impl Into<String>, rol: Rol) -> Self {
        Self {
            nombre: nombre.into(),
            correo: correo.into(),
            rol,
        }
    }
}

/// Server-assigned identifier for a solicitud.
///
/// Only obtained from the create-solicitud response; there is no client-side
/// id generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolicitudId(pub String);

impl fmt::Display for SolicitudId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SolicitudId {
    fn from(id: String) -> Self {
        SolicitudId(id)
    }
}

impl std::ops::Deref for SolicitudId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Payload for creating a new solicitud.
///
/// `documento_id` stays empty here; the document is attached in a second
/// step once the server has assigned an id to this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolicitudCreate {
    pub titulo: String,
    pub categoria: Categoria,
    pub descripcion: String,
    /// Submission instant, ISO-8601 on the wire.
    pub fecha: DateTime<Utc>,
    pub empleado: Usuario,
    pub supervisor: Usuario,
    pub hr: Usuario,
    #[serde(rename = "documentoId")]
    pub documento_id: String,
}

/// A persisted solicitud as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solicitud {
    pub id: SolicitudId,
    pub titulo: String,
    pub categoria: Categoria,
    pub descripcion: String,
    pub fecha: DateTime<Utc>,
    pub empleado: Usuario,
    pub supervisor: Usuario,
    pub hr: Usuario,
    #[serde(rename = "documentoId")]
    pub documento_id: String,
    #[serde(default)]
    pub estado: Estado,
}

impl Solicitud {
    /// True once a document has been attached.
    pub fn has_documento(&self) -> bool {
        !self.documento_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn usuario(rol: Rol) -> Usuario {
        Usuario::new("Pedro Pérez", "pedro@example.com", rol)
    }

    #[test]
    fn test_solicitud_create_wire_format() {
        let payload = SolicitudCreate {
            titulo: "Vacaciones julio".to_string(),
            categoria: Categoria::Vacaciones,
            descripcion: "Dos semanas".to_string(),
            fecha: Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap(),
            empleado: usuario(Rol::Empleado),
            supervisor: Usuario::new("Ana Gómez", "ana@example.com", Rol::Supervisor),
            hr: Usuario::new("Juan López", "juan@example.com", Rol::Hr),
            documento_id: String::new(),
        };

        let value: serde_json::Value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["titulo"], "Vacaciones julio");
        assert_eq!(value["categoria"], "Vacaciones");
        assert_eq!(value["documentoId"], "");
        assert_eq!(value["empleado"]["rol"], "empleado");
        assert_eq!(value["supervisor"]["nombre"], "Ana Gómez");
        // fecha must be ISO-8601
        assert!(value["fecha"].as_str().unwrap().starts_with("2024-07-01T09:00:00"));
    }

    #[test]
    fn test_solicitud_deserializes_without_estado() {
        let json = r#"{
            "id": "665f1c2e9b3e4a0001a1b2c3",
            "titulo": "Licencia médica",
            "categoria": "Licencia",
            "descripcion": "Tres días",
            "fecha": "2024-06-20T10:30:00Z",
            "empleado": {"nombre": "Pedro Pérez", "correo": "pedro@example.com", "rol": "empleado"},
            "supervisor": {"nombre": "Carlos Ruiz", "correo": "carlos@example.com", "rol": "supervisor"},
            "hr": {"nombre": "Juan López", "correo": "juan@example.com", "rol": "hr"},
            "documentoId": ""
        }"#;

        let solicitud: Solicitud = serde_json::from_str(json).unwrap();
        assert_eq!(solicitud.estado, Estado::Pendiente);
        assert!(!solicitud.has_documento());
        assert_eq!(solicitud.id.0, "665f1c2e9b3e4a0001a1b2c3");
    }

    #[test]
    fn test_estado_round_trip_strings() {
        for estado in [Estado::Pendiente, Estado::Aprobado, Estado::Rechazado] {
            assert_eq!(estado.to_string().parse::<Estado>().unwrap(), estado);
        }
        assert!("en_revision".parse::<Estado>().is_err());
    }

    #[test]
    fn test_categoria_matches_picker_values() {
        assert_eq!("Vacaciones".parse::<Categoria>().unwrap(), Categoria::Vacaciones);
        assert_eq!(
            serde_json::to_string(&Categoria::Licencia).unwrap(),
            "\"Licencia\""
        );
        assert!("Otro".parse::<Categoria>().is_err());
    }
}
