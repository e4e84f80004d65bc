//! Exploded-view engine
//!
//! Extraction runs once per scene load and produces a [`PartTable`]; pose
//! updates consume that table and an explosion factor and write part
//! positions back onto the scene.

mod extract;
mod pose;
mod session;
mod table;

pub use extract::{PartExtractor, extract_parts, random_direction};
pub use pose::apply_explosion;
pub use session::ExplodedView;
pub use table::{PartRecord, PartTable};
