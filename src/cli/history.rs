use anyhow::Result;
use std::path::Path;

use crate::ai::chat::Sender;
use crate::chat::store::try_load_history;

pub fn run(path: &str) -> Result<()> {
    let history = try_load_history(Path::new(path))?;
    if history.is_empty() {
        println!("No snapshots in {}", path);
        return Ok(());
    }

    for snapshot in history.iter() {
        println!(
            "--- Snapshot {} ({} messages)",
            snapshot.chat_id,
            snapshot.chatlog.len()
        );
        for r in snapshot.chatlog.iter() {
            let who = match r.sender {
                Sender::User => "User",
                Sender::Bot => "Bot",
            };
            println!("[{}] {}: {}", r.id, who, r.content);
        }
    }

    Ok(())
}
