mod clock;
mod feedback;
mod gamification;
mod session_history;

pub use clock::*;
pub use feedback::*;
pub use gamification::*;
pub use session_history::*;
