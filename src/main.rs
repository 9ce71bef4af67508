use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use clap::{Parser, Subcommand};
use client::{ClientConfig, Connection, Dispatcher, ReconnectPolicy, Session, attach};
use tokio::sync::Notify;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] client::ConfigError),
    #[error("timed out waiting for the initial drawing")]
    Timeout,
    #[error("edit rejected: {0}")]
    Drawing(#[from] drawing::DrawingError),
    #[error("could not serialize drawing: {0}")]
    Json(#[from] serde_json::Error),
    #[error("signal handler failed: {0}")]
    Signal(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "scribblesync", about = "Headless client for a shared drawing session")]
struct Cli {
    #[arg(long, env = "SCRIBBLE_URL", default_value = "http://127.0.0.1:8079")]
    url: String,

    #[arg(long, env = "SCRIBBLE_USER")]
    user: String,

    #[arg(long, env = "SCRIBBLE_RECONNECT_MS", default_value_t = 1000)]
    reconnect_ms: u64,

    #[arg(long, help = "Double the reconnect delay after each failure, capped at this many ms")]
    backoff_max_ms: Option<u64>,

    #[arg(long, default_value_t = 10, help = "Seconds to wait for the initial drawing")]
    init_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stay in the session and log every change until Ctrl-C.
    Watch,
    /// Print the current drawing as JSON and exit.
    Dump,
    /// Add a layer to the drawing and exit.
    AddLayer { name: String },
}

impl Cli {
    fn config(&self) -> Result<ClientConfig, CliError> {
        let initial = Duration::from_millis(self.reconnect_ms);
        let policy = match self.backoff_max_ms {
            Some(max) => ReconnectPolicy::Exponential { initial, max: Duration::from_millis(max) },
            None => ReconnectPolicy::Fixed(initial),
        };
        Ok(ClientConfig::new(&self.url, &self.user)?.with_reconnect(policy))
    }
}

/// A running connection with a session kept in sync by it.
struct Client {
    connection: Connection,
    dispatcher: Arc<Dispatcher>,
    session: Arc<Mutex<Session>>,
    synced: Arc<Notify>,
}

impl Client {
    fn start(config: &ClientConfig) -> Self {
        let dispatcher = Arc::new(Dispatcher::new());
        let session = Arc::new(Mutex::new(Session::new(config.username())));
        attach(&session, &dispatcher);

        // Registered after the session, so the drawing is in place when this fires.
        let synced = Arc::new(Notify::new());
        let notify = Arc::clone(&synced);
        dispatcher.on_init(move |init| {
            info!(
                layers = init.drawing.layer_order().len(),
                users = init.users.len(),
                "drawing received"
            );
            notify.notify_one();
        });

        let connection = Connection::spawn(config, Arc::clone(&dispatcher));
        Self { connection, dispatcher, session, synced }
    }

    async fn wait_for_init(&self, timeout: Duration) -> Result<(), CliError> {
        tokio::time::timeout(timeout, self.synced.notified())
            .await
            .map_err(|_| CliError::Timeout)
    }

    fn with_session<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = cli.config()?;
    let init_timeout = Duration::from_secs(cli.init_timeout);
    let client = Client::start(&config);

    match cli.command {
        Command::Watch => watch(&client).await?,
        Command::Dump => {
            client.wait_for_init(init_timeout).await?;
            let json = client.with_session(|session| serde_json::to_string_pretty(session.drawing()))?;
            println!("{json}");
        }
        Command::AddLayer { name } => {
            client.wait_for_init(init_timeout).await?;
            client.with_session(|session| session.add_layer(&name, &client.connection))?;
            info!(layer = %name, "layer added");
        }
    }

    client.connection.shutdown().await;
    Ok(())
}

async fn watch(client: &Client) -> Result<(), CliError> {
    client.with_session(|session| {
        session.document_mut().subscribe(|change, drawing| {
            info!(?change, layers = drawing.layer_order().len(), "drawing changed");
        })
    });
    client.dispatcher.on_join(|username| info!(username, "user joined"));
    client.dispatcher.on_cursor_out(|out| {
        debug!(username = %out.username, on_canvas = out.cursor.is_some(), "cursor moved");
    });
    client.dispatcher.on_temp_draw(|temp| debug!(uuid = %temp.uuid, layer = %temp.layer, "preview segment"));

    info!("watching; press Ctrl-C to leave");
    tokio::signal::ctrl_c().await?;
    Ok(())
}
