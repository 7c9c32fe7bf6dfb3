mod exercise;
mod ids;
mod rest;
mod session;

pub use exercise::*;
pub use ids::*;
pub use rest::*;
pub use session::*;
