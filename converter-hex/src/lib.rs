//! # Converter Hex
//!
//! Application service layer and HTTP adapter for the converter service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (conversion and insert engines)
//! - `inbound/` - HTTP adapter (Axum server, request validation)
//! - `openapi/` - OpenAPI document served by the adapter
//!
//! The service is generic over `S: RateStore`, allowing
//! different store implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::ConverterService;
