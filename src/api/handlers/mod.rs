mod projects;
mod system;


pub use projects::*;
pub use system::*;
