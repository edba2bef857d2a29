pub mod chat;
pub mod core;

pub use self::chat::OpenAiProvider;
pub use self::core::{Message, Role, completion};
