pub mod examples;
pub mod field_tree;
pub mod flatten;
pub mod parameters;
pub mod spec_to_design;

pub use flatten::{Flattener, flatten};
pub use spec_to_design::{TransformOptions, transform, transform_with_options};
