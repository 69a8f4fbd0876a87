//! Interactive REPL session.

use std::sync::Arc;

use mitsumori_server::infrastructure::dto::http::RoomViewDto;
use mitsumori_shared::time::get_unix_timestamp_millis;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{Mutex, mpsc};

use crate::{
    api::PokerApiClient,
    command::Command,
    error::ClientError,
    formatter::RoomFormatter,
    poller::{PollState, spawn_poller},
    ui::PROMPT,
};

/// REPL から操作するルームの状態
struct Session {
    api: Arc<PokerApiClient>,
    poll_state: Arc<Mutex<PollState>>,
    room_id: Option<String>,
}

impl Session {
    async fn execute(&mut self, command: Command) -> Result<(), ClientError> {
        let room_id = match (&self.room_id, command.needs_room()) {
            (Some(room_id), _) => room_id.clone(),
            (None, false) => String::new(),
            (None, true) => {
                return Err(ClientError::InvalidCommand(
                    "You are not in a room. Use 'create' or 'join <code>'.".to_string(),
                ));
            }
        };

        let view = match command {
            Command::Create => {
                let created = self.api.create_room().await?;
                println!("Created room {}. Share the code with your team.", created);
                let view = self.api.get_room(&created).await?;
                self.room_id = Some(created);
                view
            }
            Command::Join(code) => {
                let view = self.api.get_room(&code).await?;
                self.room_id = Some(code);
                view
            }
            Command::Vote(vote) => self.api.vote(&room_id, &vote).await?,
            Command::Unvote => self.api.unvote(&room_id).await?,
            Command::Voter(voter) => self.api.set_voter(&room_id, voter).await?,
            Command::Reveal => self.api.reveal(&room_id).await?,
            Command::Reset => self.api.reset(&room_id).await?,
            Command::Pack(pack) => self.api.change_card_pack(&room_id, &pack).await?,
            Command::Show => self.api.get_room(&room_id).await?,
            Command::Close => {
                self.api.close_room(&room_id).await?;
                println!("Room {} closed.", room_id);
                self.room_id = None;
                self.poll_state.lock().await.leave();
                return Ok(());
            }
            Command::Help => {
                print!("{}", RoomFormatter::format_help());
                return Ok(());
            }
            Command::Quit => return Ok(()),
        };

        self.show(view).await;
        Ok(())
    }

    async fn show(&self, view: RoomViewDto) {
        self.poll_state.lock().await.shown(&view.room_id, &view);
        print!(
            "{}",
            RoomFormatter::format_room(&view, get_unix_timestamp_millis())
        );
    }
}

/// Read lines with rustyline on a blocking thread and forward them
fn spawn_readline(input_tx: mpsc::UnboundedSender<String>) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });
}

/// Run the interactive session until `quit`, Ctrl+C or Ctrl+D
///
/// # Arguments
///
/// * `api` - API client (holds the session and admin cookies)
/// * `initial_view` - The room to show first, if already entered
pub async fn run_client_session(api: Arc<PokerApiClient>, initial_view: Option<RoomViewDto>) {
    let poll_state = Arc::new(Mutex::new(PollState::default()));
    let poller = spawn_poller(api.clone(), poll_state.clone());

    let mut session = Session {
        api,
        poll_state,
        room_id: None,
    };
    if let Some(view) = initial_view {
        session.room_id = Some(view.room_id.clone());
        session.show(view).await;
    }
    println!("\nType 'help' for commands. Press Ctrl+C to exit.\n");

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    spawn_readline(input_tx);

    while let Some(line) = input_rx.recv().await {
        let command = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(e) => {
                print!("{}", RoomFormatter::format_error(&e.to_string()));
                continue;
            }
        };

        if let Err(e) = session.execute(command).await {
            tracing::debug!("Command failed: {:?}", e);
            print!("{}", RoomFormatter::format_error(&e.to_string()));
        }
    }

    poller.abort();
    tracing::info!("Session ended");
}
