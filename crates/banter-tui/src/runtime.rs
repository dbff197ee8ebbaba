//! Async runtime.
//!
//! Event loop that drives terminal I/O and coordinates the engine with a
//! channel transport. Uses `tokio::select!` over terminal events, channel
//! signals, background-task completions, and a 100 ms tick that feeds the
//! engine's deadline slots.
//!
//! Two modes:
//! - Simulation mode: in-process server, no network (default)
//! - Remote mode: WebSocket connection to a real server

use std::{
    io::{self, Stdout, stdout},
    time::{Duration, Instant},
};

use banter_client::{Client, ClientAction, ClientEvent, EntryKind};
use banter_codec::{
    CodecError, ImageSource, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY,
};
use banter_proto::{InboundEvent, MessageKind, OutboundEvent};
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::warn;

use crate::{
    commands::{self, Command},
    input::{InputState, KeyInput},
    server::{self, ServerHandle},
    transport::{self, ChannelHandle, ChannelSignal},
    ui,
    view::{ImageLoad, Screen, ViewState},
};

/// Tick period feeding the engine's deadline slots.
const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Connection to a server (either in-process or WebSocket).
enum Connection {
    /// In-process simulated server.
    InProcess(ServerHandle),
    /// WebSocket connection to a remote server.
    WebSocket(ChannelHandle),
}

impl Connection {
    fn to_server(&self) -> &mpsc::Sender<OutboundEvent> {
        match self {
            Connection::InProcess(h) => &h.to_server,
            Connection::WebSocket(h) => &h.to_server,
        }
    }

    fn from_server(&mut self) -> &mut mpsc::Receiver<ChannelSignal> {
        match self {
            Connection::InProcess(h) => &mut h.from_server,
            Connection::WebSocket(h) => &mut h.from_server,
        }
    }

    fn stop(&self) {
        match self {
            Connection::InProcess(h) => h.stop(),
            Connection::WebSocket(h) => h.stop(),
        }
    }
}

/// Completions of background tasks, fed back into the event loop.
enum Completion {
    /// An `/image` file read finished.
    SourceLoaded {
        /// The source, or why it could not be read.
        result: Result<ImageSource, String>,
    },
    /// Image compression finished.
    Encoded {
        /// The data-URL payload or the codec failure.
        result: Result<String, CodecError>,
    },
    /// An inline image decode settled, successfully or not.
    InlineDecoded {
        /// Log index of the image entry.
        index: usize,
        /// The decode outcome.
        load: ImageLoad,
    },
}

/// Async runtime for the TUI.
///
/// Owns the terminal, the engine, the presentation state, and the
/// connection; translates between them in the main event loop.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    engine: Client,
    input: InputState,
    view: ViewState,
    connection: Connection,
    /// Closed transports stop being polled; the session stays disconnected
    /// until the process restarts.
    transport_closed: bool,
    completion_tx: mpsc::Sender<Completion>,
    completion_rx: mpsc::Receiver<Completion>,
}

impl Runtime {
    /// Create a runtime in simulation mode.
    pub fn new() -> Result<Self, RuntimeError> {
        Self::create(Connection::InProcess(server::spawn_server()))
    }

    /// Create a runtime connected to a remote WebSocket server.
    pub fn with_remote_server(url: String) -> Result<Self, RuntimeError> {
        Self::create(Connection::WebSocket(transport::spawn_websocket(url)))
    }

    fn create(connection: Connection) -> Result<Self, RuntimeError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let (completion_tx, completion_rx) = mpsc::channel(16);

        Ok(Self {
            terminal,
            engine: Client::new(),
            input: InputState::new(),
            view: ViewState::new(),
            connection,
            transport_closed: false,
            completion_tx,
            completion_rx,
        })
    }

    /// Run the main event loop until quit.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.render()?;

        let mut event_stream = EventStream::new();
        let mut tick_interval = tokio::time::interval(TICK_PERIOD);

        loop {
            let should_quit = tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_terminal_event(event).await?,
                    Some(Err(e)) => return Err(RuntimeError::Io(e)),
                    None => true,
                },

                signal = self.connection.from_server().recv(), if !self.transport_closed => {
                    match signal {
                        Some(signal) => self.handle_channel_signal(signal).await?,
                        None => {
                            // The transport exhausted its reconnect budget.
                            self.transport_closed = true;
                            let actions = self.engine.handle(ClientEvent::ChannelDown);
                            self.process_actions(actions).await?;
                            false
                        },
                    }
                },

                Some(completion) = self.completion_rx.recv() => {
                    self.handle_completion(completion).await?
                },

                _ = tick_interval.tick() => {
                    let actions = self.engine.handle(ClientEvent::Tick { now: Instant::now() });
                    self.process_actions(actions).await?;
                    false
                },
            };

            if should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle a terminal event. Returns `true` to quit.
    async fn handle_terminal_event(&mut self, event: Event) -> Result<bool, RuntimeError> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match convert_key(&key) {
                    Some(key) => self.handle_key(key).await,
                    None => Ok(false),
                }
            },
            Event::Resize(_, _) => {
                self.render()?;
                Ok(false)
            },
            _ => Ok(false),
        }
    }

    /// Handle one key. Returns `true` to quit.
    async fn handle_key(&mut self, key: KeyInput) -> Result<bool, RuntimeError> {
        // The preview overlay captures input: dismissal keys close it,
        // everything else is ignored while it is open.
        if self.view.preview().is_some() {
            if matches!(key, KeyInput::Esc | KeyInput::Enter) {
                self.view.close_preview();
                self.render()?;
            }
            return Ok(false);
        }

        match key {
            KeyInput::Esc => return Ok(true),
            KeyInput::Enter => return self.handle_submit().await,
            KeyInput::Tab => {
                self.view.toggle_roster();
                self.render()?;
            },
            KeyInput::Up => {
                self.view.scroll_up();
                self.render()?;
            },
            KeyInput::Down => {
                self.view.scroll_down();
                self.render()?;
            },
            KeyInput::Char(c) => {
                self.input.insert(c);
                self.keystroke_activity().await?;
                self.render()?;
            },
            KeyInput::NewLine => {
                // Enter with the line-break modifier inserts a newline and
                // counts as ordinary keystroke activity.
                self.input.insert('\n');
                self.keystroke_activity().await?;
                self.render()?;
            },
            KeyInput::Backspace
            | KeyInput::Delete
            | KeyInput::Left
            | KeyInput::Right
            | KeyInput::Home
            | KeyInput::End => {
                self.input.apply_edit(key);
                self.render()?;
            },
        }
        Ok(false)
    }

    /// Report compose keystroke activity to the engine (chat screen only;
    /// typing in the username prompt is not typing in the room).
    async fn keystroke_activity(&mut self) -> Result<(), RuntimeError> {
        if self.view.screen() == Screen::Chat {
            let actions = self.engine.handle(ClientEvent::Keystroke { now: Instant::now() });
            self.process_actions(actions).await?;
        }
        Ok(())
    }

    /// Handle Enter. Returns `true` to quit.
    async fn handle_submit(&mut self) -> Result<bool, RuntimeError> {
        match self.view.screen() {
            Screen::Join => {
                let username = self.input.buffer().to_string();
                let actions =
                    self.engine.handle(ClientEvent::SubmitJoin { username, now: Instant::now() });
                // The same buffer becomes the compose field after the
                // expansion; clear it only on an accepted join.
                if actions.iter().any(|a| matches!(a, ClientAction::Emit(_))) {
                    self.input.clear();
                }
                self.process_actions(actions).await?;
                Ok(false)
            },
            Screen::Chat => self.handle_command().await,
        }
    }

    /// Parse and execute a compose-field submission. Returns `true` to quit.
    async fn handle_command(&mut self) -> Result<bool, RuntimeError> {
        let text = self.input.buffer().to_string();
        match commands::parse(&text) {
            Command::Message { content } => {
                // The engine clears the compose field via ClearCompose only
                // on an accepted send; silent no-ops keep the text.
                let actions = self.engine.handle(ClientEvent::SubmitText { body: content });
                self.process_actions(actions).await?;
            },
            Command::Join { username } => {
                self.input.clear();
                let username = username
                    .or_else(|| self.engine.session().username().map(str::to_string));
                match username {
                    Some(username) => {
                        let actions = self
                            .engine
                            .handle(ClientEvent::SubmitJoin { username, now: Instant::now() });
                        self.process_actions(actions).await?;
                    },
                    None => {
                        self.view.set_alert("usage: /join <username>");
                        self.render()?;
                    },
                }
            },
            Command::Image { path } => {
                self.input.clear();
                self.start_source_load(path);
                self.render()?;
            },
            Command::Preview { index } => {
                self.input.clear();
                self.open_preview(index);
                self.render()?;
            },
            Command::Users => {
                self.input.clear();
                self.view.toggle_roster();
                self.render()?;
            },
            Command::Quit => return Ok(true),
            Command::Unknown { input } => {
                self.input.clear();
                self.view.set_alert(format!("unknown command: {input}"));
                self.render()?;
            },
            Command::InvalidArgs { error, .. } => {
                self.input.clear();
                self.view.set_alert(error);
                self.render()?;
            },
        }
        Ok(false)
    }

    /// Handle a transport signal. Returns `true` to quit.
    async fn handle_channel_signal(&mut self, signal: ChannelSignal) -> Result<bool, RuntimeError> {
        let event = match signal {
            ChannelSignal::Up => ClientEvent::ChannelUp,
            ChannelSignal::Down => ClientEvent::ChannelDown,
            ChannelSignal::Event(inbound) => ClientEvent::Server(inbound),
        };

        let image_arrived = matches!(
            &event,
            ClientEvent::Server(InboundEvent::ReceiveMessage(m)) if m.kind == MessageKind::Image
        );

        let actions = self.engine.handle(event);
        self.process_actions(actions).await?;

        if image_arrived {
            // The entry just appended is the image; decode its dimensions
            // off the loop for the second-phase scroll.
            let index = self.engine.log().len().saturating_sub(1);
            if let Some(entry) = self.engine.log().get(index) {
                if entry.kind == EntryKind::Image {
                    self.start_inline_decode(index, entry.body.clone());
                }
            }
        }
        Ok(false)
    }

    /// Handle a background-task completion. Returns `true` to quit.
    async fn handle_completion(&mut self, completion: Completion) -> Result<bool, RuntimeError> {
        match completion {
            Completion::SourceLoaded { result } => match result {
                Ok(source) => {
                    let actions = self.engine.handle(ClientEvent::AttachImage { source });
                    self.process_actions(actions).await?;
                },
                Err(reason) => {
                    self.view.set_alert(format!("could not read file: {reason}"));
                    self.render()?;
                },
            },
            Completion::Encoded { result } => {
                let actions = self.engine.handle(ClientEvent::ImageEncoded { result });
                self.process_actions(actions).await?;
            },
            Completion::InlineDecoded { index, load } => {
                self.view.record_image(index, load);
                let actions = self.engine.handle(ClientEvent::ImageLoadCompleted { index });
                self.process_actions(actions).await?;
            },
        }
        Ok(false)
    }

    /// Execute engine actions in order.
    async fn process_actions(&mut self, actions: Vec<ClientAction>) -> Result<(), RuntimeError> {
        for action in actions {
            match action {
                ClientAction::Emit(event) => self.send_event(event),
                ClientAction::Render => self.render()?,
                ClientAction::ScrollToLatest => self.view.pin_to_latest(),
                ClientAction::StartImageEncode { source } => self.start_encode(source),
                ClientAction::ExpandLayout => self.view.expand(),
                ClientAction::Alert { message } => self.view.set_alert(message),
                ClientAction::ClearCompose => self.input.clear(),
            }
        }
        Ok(())
    }

    /// Send an event to the server, dropping it if the channel is full or
    /// gone — there is no outbound queueing across outages.
    fn send_event(&mut self, event: OutboundEvent) {
        if let Err(e) = self.connection.to_server().try_send(event) {
            warn!(error = %e, "dropping outbound event");
        }
    }

    /// Read an `/image` file off the loop.
    fn start_source_load(&self, path: String) {
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let media_type = commands::media_type_for_path(&path).to_string();
            let filename = path.clone();
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => Ok(ImageSource { filename, media_type, bytes }),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(Completion::SourceLoaded { result }).await;
        });
    }

    /// Compress an image on a blocking worker.
    fn start_encode(&self, source: ImageSource) {
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = match tokio::task::spawn_blocking(move || {
                banter_codec::compress(&source, DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT, DEFAULT_QUALITY)
            })
            .await
            {
                Ok(result) => result,
                Err(e) => Err(CodecError::Encode { reason: e.to_string() }),
            };
            let _ = tx.send(Completion::Encoded { result }).await;
        });
    }

    /// Decode an inline image's dimensions on a blocking worker.
    fn start_inline_decode(&self, index: usize, body: String) {
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let load =
                match tokio::task::spawn_blocking(move || banter_codec::decode_data_url(&body))
                    .await
                {
                    Ok(Ok(inline)) => ImageLoad::Loaded(inline),
                    _ => ImageLoad::Failed,
                };
            let _ = tx.send(Completion::InlineDecoded { index, load }).await;
        });
    }

    /// Open the preview overlay for the n-th image message (1-based), or
    /// the newest one.
    fn open_preview(&mut self, index: Option<usize>) {
        let images: Vec<usize> = self
            .engine
            .log()
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.kind == EntryKind::Image)
            .map(|(i, _)| i)
            .collect();

        let target = match index {
            Some(n) => images.get(n - 1).copied(),
            None => images.last().copied(),
        };

        match target {
            Some(entry_index) => self.view.open_preview(entry_index),
            None => self.view.set_alert("no image to preview"),
        }
    }

    /// Render the UI.
    fn render(&mut self) -> Result<(), RuntimeError> {
        let Self { terminal, engine, input, view, .. } = self;
        terminal.draw(|frame| {
            ui::render(frame, engine, view, input);
        })?;
        Ok(())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.connection.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Convert a crossterm key event to a [`KeyInput`].
fn convert_key(key: &KeyEvent) -> Option<KeyInput> {
    use crossterm::event::KeyCode;

    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => Some(KeyInput::NewLine),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Tab => Some(KeyInput::Tab),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        _ => None,
    }
}
