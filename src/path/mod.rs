mod generic_path;
pub use generic_path::*;

/// The Type used for distances and Path costs
pub type Cost = f32;
