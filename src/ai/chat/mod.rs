pub mod core;
pub mod models;

pub use self::core::{Chat, ChatBuilder, EditOutcome, SendOutcome};
pub use self::models::{MessageRecord, Sender, Snapshot, SnapshotHistory, Transcript};
