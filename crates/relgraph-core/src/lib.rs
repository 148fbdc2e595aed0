//! relgraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the relgraph layout
//! engine and its consumers. It includes:
//!
//! - **Relations**: The input forest record ([`relation::Relation`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)

pub mod color;
pub mod geometry;
pub mod relation;
