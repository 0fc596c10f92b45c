//! Umbra Core Types and Definitions
//!
//! This crate provides the foundational types shared by every Umbra crate:
//!
//! - **Identifiers**: Stable entity, member and relationship ids ([`identifier`] module)
//! - **Geometry**: Points, sizes and rectangles in diagram space ([`geometry`] module)
//! - **Semantic**: The class-diagram model values ([`semantic`] module)
//! - **Errors**: The validation / not-found taxonomy ([`error::ModelError`])

pub mod error;
pub mod geometry;
pub mod identifier;
pub mod semantic;
