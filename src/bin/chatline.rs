//! Interactive terminal client for the chat assistant backend.
//!
//! This binary provides a REPL that creates a chat session on startup and
//! exchanges complete messages with the backend over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a backend on the default http://localhost:8000/api/v1
//! chatline
//!
//! # Point at another backend
//! chatline --api-url https://chat.example.com/api/v1
//! CHATLINE_API_URL=https://chat.example.com/api/v1 chatline
//!
//! # Disable colors (useful for piping output)
//! chatline --no-color
//! ```
//!
//! Set `RUST_LOG=chatline=debug` to see request logging on stderr.
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/new` - Start a new chat
//! - `/history` - Show the conversation so far
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use chatline::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatController, PlainTextRenderer, Renderer, SendOutcome,
    help_text, parse_command,
};
use chatline::{ChatClient, Gateway};

/// Main entry point for the chatline application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("chatline [OPTIONS]");
    let config = ChatConfig::from_args(args)?;
    init_logging();

    let client = ChatClient::with_options(&config.api_url, Some(config.timeout))?;
    let mut controller = ChatController::new(client);
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Chat (backend: {})", config.api_url);
    println!("Type /help for commands, /quit to exit\n");
    new_chat(&mut controller, &mut renderer).await;

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line.trim());

                if let Some(cmd) = parse_command(&line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::NewChat => {
                            new_chat(&mut controller, &mut renderer).await;
                        }
                        ChatCommand::History => {
                            for message in controller.messages() {
                                renderer.print_message(message);
                            }
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&controller);
                        }
                        ChatCommand::ShowConfig => {
                            print_config(&config);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                controller.set_input(line);
                renderer.start_busy();
                let outcome = controller.submit().await;
                renderer.finish_busy();
                render_replies(&mut controller, &mut renderer);
                if outcome == SendOutcome::Fallback
                    && let Some(err) = controller.last_error()
                {
                    tracing::debug!(error = %err, "reply replaced by fallback");
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn new_chat<G: Gateway>(controller: &mut ChatController<G>, renderer: &mut dyn Renderer) {
    renderer.start_busy();
    controller.create_session().await;
    renderer.finish_busy();
    for message in controller.take_unrendered() {
        renderer.print_message(&message);
    }
}

/// Prints what arrived since the last render.  The user's own line is
/// already on screen from the prompt.
fn render_replies<G: Gateway>(controller: &mut ChatController<G>, renderer: &mut dyn Renderer) {
    for message in controller.take_unrendered() {
        if !message.is_user {
            renderer.print_message(&message);
        }
    }
}

fn print_stats<G: Gateway>(controller: &ChatController<G>) {
    let stats = controller.stats();
    println!("    Session Statistics:");
    match stats.session_id.as_deref() {
        Some(id) if stats.degraded => println!("      Session: {id} (not connected)"),
        Some(id) => println!("      Session: {id}"),
        None => println!("      Session: (none)"),
    }
    println!("      Messages: {}", stats.message_count);
    println!(
        "      From you: {} / from assistant: {}",
        stats.user_messages, stats.assistant_messages
    );
    println!("      Failed exchanges: {}", stats.failed_exchanges);
    if let Some(err) = controller.last_error() {
        println!("      Last error: {}", err);
    }
}

fn print_config(config: &ChatConfig) {
    println!("    Current Configuration:");
    println!("      API URL: {}", config.api_url);
    println!("      Timeout: {}s", config.timeout.as_secs());
    println!(
        "      Color: {}",
        if config.use_color {
            "enabled"
        } else {
            "disabled"
        }
    );
}
