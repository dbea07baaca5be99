//! Signed distance functions on 2D finite-volume meshes.
//!
//! The zero level set of a cell-centred field is held fixed while every
//! other cell is replaced by its (first-order) distance to it, keeping sign,
//! using the fast marching method on unstructured meshes.

pub mod discretization;
pub mod levelset;
pub mod numerics;
pub mod processing;
