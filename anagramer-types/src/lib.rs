pub mod chat;
pub mod errors;
pub mod game;
pub mod word;

// Re-export all types
pub use chat::*;
pub use errors::*;
pub use game::*;
pub use word::*;
