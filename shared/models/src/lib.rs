//! # Fabrica Core Domain Models
//!
//! This module contains the core domain models for the Fabrica MRP backend.
//! All models implement serialization/deserialization with serde; models
//! that cross the request boundary also carry validator rules.
//!
//! ## Key Models
//!
//! - **PartRecord**: One catalog row, keyed by part identifier
//! - **StructureLine**: One row of a structure definition (child, quantity,
//!   reference designator, description override)
//! - **BomNode**: One node of a resolved component hierarchy
//! - **CostReport**: The outcome of a cost request (last-known unit price
//!   and, for assemblies, the rolled-up aggregate)
//! - **PricePoint**: One recorded purchase price
//! - **AssemblyNaming**: The prefix convention classifying identifiers as
//!   assemblies

pub mod bom;
pub mod part;
pub mod pricing;
pub mod structure;

pub use bom::{BomNode, BomNodeKind, CostReport};
pub use part::{AssemblyNaming, PartRecord};
pub use pricing::PricePoint;
pub use structure::{normalize_quantity, QuantityRule, StructureLine};
