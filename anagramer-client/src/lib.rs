pub mod api;
pub mod chat;
pub mod config;
pub mod definitions;
pub mod dict_protocol;
pub mod error;
pub mod game_controller;
pub mod word_source;

pub use api::ApiClient;
pub use config::Config;
pub use definitions::{DefinitionCache, DefinitionSource};
pub use dict_protocol::DictClient;
pub use error::ClientError;
pub use game_controller::GameController;
pub use word_source::{LocalWordSource, RemoteWordSource, WordSource};
