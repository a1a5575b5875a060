mod directory;
mod route;

pub use directory::*;
pub use route::*;
