mod gamification;
mod session_history;

pub use gamification::*;
pub use session_history::*;
