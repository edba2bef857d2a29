use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::chat::{Chat, EditOutcome, MessageRecord, Sender, SendOutcome};
use crate::core::AppConfig;

const HELP: &str = "Commands:
  /edit <id> <text>  replace one of your messages and continue from there
  /show              print the conversation so far
  /help              show this message
  /quit              save the history and exit";

#[derive(Debug, PartialEq)]
enum ReplCommand {
    Send(String),
    Edit { id: u64, text: String },
    Show,
    Help,
    Quit,
    Invalid(String),
}

impl ReplCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return ReplCommand::Send(line.to_string());
        };
        let (cmd, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        match cmd {
            "quit" | "exit" => ReplCommand::Quit,
            "show" => ReplCommand::Show,
            "help" => ReplCommand::Help,
            "edit" => {
                let args = args.trim_start();
                let (id, text) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
                match id.parse::<u64>() {
                    Ok(id) => ReplCommand::Edit {
                        id,
                        text: text.to_string(),
                    },
                    Err(_) => ReplCommand::Invalid(format!("Invalid message id: {:?}", id)),
                }
            }
            _ => ReplCommand::Invalid(format!("Unknown command: /{}", cmd)),
        }
    }
}

fn render(record: &MessageRecord, bot_label: &str) -> String {
    let who = match record.sender {
        Sender::User => "You",
        Sender::Bot => bot_label,
    };
    format!("[{}] {}: {}", record.id, who, record.content)
}

fn print_outcome(outcome: &SendOutcome, bot_label: &str) {
    match outcome {
        SendOutcome::Empty => println!("Nothing to send"),
        SendOutcome::NoReply { .. } => {}
        SendOutcome::Replied { bot, .. } => println!("{}", render(bot, bot_label)),
    }
}

pub async fn run(config: AppConfig) -> Result<()> {
    let provider = config.true_model.provider().build(&config)?;
    let mut chat = Chat::builder(provider, config.model_id())
        .history_path(&config.history_path)
        .label_turns(config.label_turns)
        .dispatch_delay(config.dispatch_delay)
        .build();

    // Only the given model name is ever shown to the user
    let bot_label = config.given_model.label();
    let mut rl = DefaultEditor::new()?;
    println!("Connected to \"{}\". Type /help for commands.", bot_label);

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                match ReplCommand::parse(&line) {
                    ReplCommand::Send(text) => {
                        if text.is_empty() {
                            continue;
                        }
                        println!("{} is working...", bot_label);
                        let outcome = chat.send_user_message(&text).await;
                        print_outcome(&outcome, bot_label);
                    }
                    ReplCommand::Edit { id, text } => match chat.edit(id, &text).await {
                        Ok(EditOutcome::Abandoned) => println!("Edit cancelled"),
                        Ok(EditOutcome::Replayed { removed, outcome }) => {
                            println!("Removed {} message(s)", removed.len());
                            if let SendOutcome::Replied { user, .. }
                            | SendOutcome::NoReply { user } = &outcome
                            {
                                println!("{}", render(user, bot_label));
                            }
                            print_outcome(&outcome, bot_label);
                        }
                        Err(e) => println!("Error: {}", e),
                    },
                    ReplCommand::Show => {
                        for r in chat.transcript().iter() {
                            println!("{}", render(r, bot_label));
                        }
                    }
                    ReplCommand::Help => println!("{}", HELP),
                    ReplCommand::Quit => break,
                    ReplCommand::Invalid(msg) => println!("{}\n{}", msg, HELP),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }

    chat.close();
    Ok(())
}
