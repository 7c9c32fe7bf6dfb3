mod catalog;
mod error;
pub mod models;
pub mod ports;
mod rest_ticker;
mod rest_timer;
mod session_engine;
pub mod services;

pub use catalog::*;
pub use error::*;
pub use rest_ticker::*;
pub use rest_timer::*;
pub use session_engine::*;
