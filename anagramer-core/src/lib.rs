pub mod anagram;
pub mod chat_state;
pub mod dictionary;
pub mod game_events;
pub mod game_state;
pub mod numbers;
pub mod scoring;

// Re-export main components
pub use anagram::*;
pub use chat_state::*;
pub use dictionary::*;
pub use game_events::*;
pub use game_state::*;
pub use numbers::*;
pub use scoring::*;
