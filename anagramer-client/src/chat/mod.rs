pub mod codec;
pub mod connection;
pub mod session;
pub mod typing;

pub use codec::decode_inbound;
pub use session::{ChatInbox, ChatSession, ChatTransport, SocketTransport};
pub use typing::TypingDebouncer;
