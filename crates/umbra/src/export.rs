//! Export of a routed model to viewable formats.
//!
//! # Available Backends
//!
//! - [`svg`] - A static SVG preview via [`svg::render_preview`]
//!
//! Export reads the model, the shape geometry and the routes produced by a
//! [`RelationshipRouter`]; it never changes any of them.
//!
//! [`RelationshipRouter`]: crate::route::RelationshipRouter

/// SVG export backend.
pub mod svg;
