pub mod claude;

pub use self::claude::ClaudeProvider;
