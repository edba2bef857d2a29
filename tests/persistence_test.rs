//! Integration tests for saving the snapshot history on close

mod test_utils;

#[cfg(test)]
mod tests {
    use std::fs;

    use chatlog::ai::chat::{Chat, Sender};
    use chatlog::chat::store::{load_history, save_history};

    use crate::test_utils::{ScriptedProvider, hi_hello_bye};

    /// Closing writes every edit snapshot plus a final one
    #[tokio::test]
    async fn it_saves_history_on_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_history.json");

        let provider = ScriptedProvider::new(vec![Ok("take care")]);
        let mut chat = Chat::builder(Box::new(provider), "test-model")
            .transcript(hi_hello_bye())
            .history_path(&path)
            .build();
        chat.edit(3, "see you").await.unwrap();

        let history = chat.close();
        assert_eq!(history.len(), 2);

        let loaded = load_history(&path);
        assert_eq!(loaded, history);
        assert_eq!(loaded.get(1).unwrap().chatlog, hi_hello_bye());

        let last = loaded.get(2).unwrap();
        assert_eq!(last.chat_id, 2);
        assert_eq!(last.chatlog.len(), 4);
        assert_eq!(last.chatlog[3].sender, Sender::Bot);
        assert_eq!(last.chatlog[3].content, "take care");
    }

    /// The file layout maps string snapshot ids to chat_id and chatlog
    #[tokio::test]
    async fn it_writes_expected_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_history.json");

        let provider = ScriptedProvider::new(vec![Ok("hello")]);
        let mut chat = Chat::builder(Box::new(provider), "test-model")
            .history_path(&path)
            .build();
        chat.send_user_message("hi").await;
        chat.close();

        let data: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            data,
            serde_json::json!({
                "1": {
                    "chat_id": 1,
                    "chatlog": [
                        {"msg_id": 1, "sender": "User", "content": "hi"},
                        {"msg_id": 2, "sender": "Bot", "content": "hello"}
                    ]
                }
            })
        );
    }

    /// Each close replaces the previous file
    #[tokio::test]
    async fn it_overwrites_previous_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_history.json");

        for reply in ["first", "second"] {
            let provider = ScriptedProvider::new(vec![Ok(reply)]);
            let mut chat = Chat::builder(Box::new(provider), "test-model")
                .history_path(&path)
                .build();
            chat.send_user_message("hi").await;
            chat.close();
        }

        let loaded = load_history(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(1).unwrap().chatlog[1].content, "second");
    }

    /// A save failure is logged and the history is still returned
    #[tokio::test]
    async fn it_survives_unwritable_history_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory can't be overwritten with a file
        let path = dir.path().to_path_buf();

        let provider = ScriptedProvider::new(vec![Ok("hello")]);
        let mut chat = Chat::builder(Box::new(provider), "test-model")
            .history_path(&path)
            .build();
        chat.send_user_message("hi").await;

        let history = chat.close();
        assert_eq!(history.len(), 1);
        assert!(save_history(&history, &path).is_err());
    }
}
