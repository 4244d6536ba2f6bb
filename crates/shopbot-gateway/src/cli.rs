//! Interactive CLI mode
//!
//! A small REPL for exercising the shop assistant without a WhatsApp
//! instance. History accumulates across turns the same way a webhook
//! session would.

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{FileBackedHistory, Prompt, Reedline, Signal};

use shopbot_assistant::{ConversationState, ShopAssistant};
use shopbot_core::{CostLedger, Message};
use shopbot_momo::MomoClient;

/// Prompt with a colored marker
struct ColoredPrompt {
    style: Style,
}

impl ColoredPrompt {
    fn new() -> Self {
        Self {
            style: Color::Cyan.bold(),
        }
    }
}

impl Prompt for ColoredPrompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Owned(self.style.paint("you> ").to_string())
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_indicator(
        &self,
        _prompt_mode: reedline::PromptEditMode,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: reedline::PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }
}

fn print_welcome() {
    println!("=== Shop assistant test chat ===");
    println!("Type a message to talk to the assistant.");
    println!("  /clear      start a new conversation");
    println!("  /costs      show accumulated LLM spend");
    println!("  /momo <id>  look up a payment provider transaction");
    println!("  /help       show this help");
    println!("  /exit       quit");
    println!("================================");
}

async fn check_momo_transaction(momo: Option<&MomoClient>, id: &str) {
    let Some(momo) = momo else {
        println!("Payment client not configured (set the MTN_MOMO_* variables).");
        return;
    };

    match momo.check_transaction(id).await {
        Ok(tx) => {
            println!("Date:         {}", tx.date.as_deref().unwrap_or("-"));
            println!("Amount:       {}", tx.amount.as_deref().unwrap_or("-"));
            println!("Phone number: {}", tx.phone_number.as_deref().unwrap_or("-"));
        }
        Err(e) => eprintln!("{} {}", Color::Red.bold().paint("error:"), e),
    }
}

/// Run the interactive chat loop
pub async fn run_cli(
    assistant: Arc<ShopAssistant>,
    ledger: CostLedger,
    momo: Option<MomoClient>,
) -> anyhow::Result<()> {
    print_welcome();

    let mut line_editor = Reedline::create().with_history(Box::<FileBackedHistory>::default());
    let prompt = ColoredPrompt::new();
    let mut history: Vec<Message> = Vec::new();

    loop {
        match line_editor.read_line(&prompt)? {
            Signal::Success(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match line {
                    "/exit" | "/quit" => break,
                    "/help" => {
                        print_welcome();
                        continue;
                    }
                    "/clear" => {
                        history.clear();
                        println!("=== Starting new conversation ===");
                        continue;
                    }
                    "/costs" => {
                        let snapshot = ledger.snapshot().await;
                        if snapshot.is_empty() {
                            println!("No spend recorded yet.");
                        }
                        for (agent, total) in snapshot {
                            println!("{}: {:.6} USD", agent, total);
                        }
                        continue;
                    }
                    _ => {
                        if let Some(id) = line.strip_prefix("/momo ") {
                            check_momo_transaction(momo.as_ref(), id.trim()).await;
                            continue;
                        }
                    }
                }

                let mut state = ConversationState::with_history(history.clone());
                state.push_user(line);

                match assistant.invoke(&mut state).await {
                    Ok(reply) => {
                        history = state.messages;
                        println!("{} {}", Color::Green.bold().paint("bot>"), reply);
                    }
                    Err(e) => {
                        eprintln!("{} {}", Color::Red.bold().paint("error:"), e);
                    }
                }
            }
            Signal::CtrlC | Signal::CtrlD => break,
        }
    }

    println!("Goodbye!");
    Ok(())
}
