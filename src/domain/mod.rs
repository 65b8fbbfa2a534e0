//! Core domain types for the solicitudes workflow.
//!
//! This module contains pure wire/domain types with no transport
//! dependencies:
//! - Solicitudes (employee requests) and the users attached to them
//! - Documents and the attachment upload built from a created solicitud

pub mod documento;
pub mod solicitud;
