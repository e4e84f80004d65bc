//! Exploded-view core
//!
//! This crate contains the transform engine behind the catalog's exploded view:
//! - SceneGraph: arena of group and part nodes with generational handles
//! - SceneDescription: RON scene files standing in for the asset loader
//! - Part extraction: rest poses and explosion directions per part
//! - Pose updates: absolute re-posing of parts for an explosion factor
//! - ExplodedView: session owning the current part table across reloads

pub mod config;
pub mod constants;
pub mod explode;
pub mod material;
pub mod scene;

pub use config::*;
pub use constants::*;
pub use explode::*;
pub use material::*;
pub use scene::*;
