//! Hillfog Core - wire/canonical translation for the Hillfog legacy backend
//!
//! This crate is pure and synchronous. It provides:
//! - Value mappers for legacy primitives (numeric strings, timestamps, Y/N flags, code tables)
//! - The shallow entity transformer (`oid` <-> `id`, `cdateString` <-> `createdDate`, ...)
//! - Canonical entity types consumed by the client facade
//! - Query parameters and the request payload models (flattened form, multipart)
//! - Error types

pub mod error;
pub mod form;
pub mod mapper;
pub mod model;
pub mod query;
pub mod transform;

/// Shallow key/value record, used for both wire and canonical shapes.
pub type Record = serde_json::Map<String, serde_json::Value>;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use form::{FilePart, FormPayload, MultipartPayload, Part};
pub use mapper::Frequency;
pub use model::{
    decode_tree, encode_tree, Audit, Employee, Entity, KeyResult, Kpi, MeasureData, MeasureDataQuery,
    Objective, Organization, Page, PdcaCycle, Perspective, Scorecard, ScorecardColor, User,
};
pub use query::{QueryParams, Sort, SortDirection};
pub use transform::{EntityTransformer, FieldRename};
