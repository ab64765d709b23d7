//! Entity structs for the question/answer service.
//!
//! Field names follow the backend's JSON payloads. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for wire roundtrip and schema
//! validation.

mod answer;
mod question;
mod search;
mod user;

pub use answer::Answer;
pub use question::Question;
pub use search::{CachedSearch, RecentSearches, SearchEntry, SearchSource, StoredSearch};
pub use user::{NewUser, User, UserUpdate};
