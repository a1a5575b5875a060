mod directions;
mod directory;

pub use directions::*;
pub use directory::*;
