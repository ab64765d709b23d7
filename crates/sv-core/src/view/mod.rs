//! Page state machines.
//!
//! Each page's fetch lifecycle is an explicit state with checked transitions.
//! Transitions borrow the current state and return the next one, so a
//! rejected transition leaves the caller's state untouched.

mod phase;
mod question_page;
mod recent;
mod search_page;
mod users;

pub use phase::{FetchPhase, QuestionPhase};
pub use question_page::QuestionPage;
pub use recent::{RECENT_LIMIT, RecentSearchesView};
pub use search_page::SearchPage;
pub use users::UserDirectory;
