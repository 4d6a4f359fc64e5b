use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use frames::{Event, VideoFrame};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use uuid::Uuid;


type RelayStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid relay URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("websocket error: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("frame codec failed: {0}")]
    Codec(#[from] frames::CodecError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read image header of {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("--fps must be a positive number, got {0}")]
    InvalidFps(f64),
}

impl From<tokio_tungstenite::tungstenite::Error> for CliError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Ws(Box::new(error))
    }
}

#[derive(Parser, Debug)]
#[command(name = "frame-cli", about = "Publish and watch video frames on the relay")]
struct Cli {
    #[arg(long, env = "RELAY_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the relay is up.
    Ping,
    /// Send image files to the relay as frame events.
    Publish(PublishArgs),
    /// Print frames relayed from other publishers.
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
struct PublishArgs {
    /// Image files, sent in order.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    #[arg(long, default_value_t = 10.0)]
    fps: f64,

    /// Loop over the files until interrupted.
    #[arg(long, default_value_t = false)]
    repeat: bool,

    /// Send JSON text messages instead of protobuf binary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct WatchArgs {
    /// Stop after this many frames.
    #[arg(long)]
    count: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Publish(args) => run_publish(&cli.base_url, args).await,
        Command::Watch(args) => run_watch(&cli.base_url, args).await,
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let status = reqwest::get(url).await?.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_publish(base_url: &str, args: PublishArgs) -> Result<(), CliError> {
    let period = frame_period(args.fps)?;
    let images = args
        .paths
        .iter()
        .map(|path| load_image(path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut stream = connect(base_url).await?;
    let mut ticker = tokio::time::interval(period);
    let mut sent = 0_usize;

    loop {
        for (bytes, width, height) in &images {
            ticker.tick().await;
            let frame = VideoFrame::new(Uuid::new_v4().to_string(), bytes.clone(), *width, *height);
            eprintln!("sent {}", describe_frame(&frame));
            stream.send(encode_message(Event::data(frame), args.json)?).await?;
            sent = sent.saturating_add(1);
        }
        if !args.repeat {
            break;
        }
    }

    stream.close(None).await?;
    eprintln!("published {sent} frame(s)");
    Ok(())
}

async fn run_watch(base_url: &str, args: WatchArgs) -> Result<(), CliError> {
    let mut stream = connect(base_url).await?;
    let mut seen = 0_usize;

    while args.count.is_none_or(|count| seen < count) {
        let Some(message) = stream.next().await else {
            return Err(CliError::WsClosed);
        };
        let decoded = match message? {
            Message::Binary(bytes) => frames::decode_event(&bytes),
            Message::Text(text) => frames::decode_event_json(text.as_str()),
            Message::Close(_) => return Err(CliError::WsClosed),
            _ => continue,
        };
        match decoded {
            Ok(event) => {
                println!("{}", describe_frame(&event.frame));
                seen = seen.saturating_add(1);
            }
            Err(error) => eprintln!("skipping malformed message: {error}"),
        }
    }
    Ok(())
}

async fn connect(base_url: &str) -> Result<RelayStream, CliError> {
    let (stream, _) = connect_async(ws_url(base_url)?).await?;
    Ok(stream)
}

fn ws_url(base_url: &str) -> Result<String, CliError> {
    let base = base_url.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("http://") {
        return Ok(format!("ws://{rest}/ws"));
    }
    if let Some(rest) = base.strip_prefix("https://") {
        return Ok(format!("wss://{rest}/ws"));
    }

    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}

fn frame_period(fps: f64) -> Result<Duration, CliError> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(CliError::InvalidFps(fps));
    }
    Duration::try_from_secs_f64(1.0 / fps).map_err(|_| CliError::InvalidFps(fps))
}

/// Read an image file and its pixel dimensions from the header.
fn load_image(path: &Path) -> Result<(Vec<u8>, u32, u32), CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    let (width, height) =
        image::image_dimensions(path).map_err(|source| CliError::Image { path: path.to_owned(), source })?;
    Ok((bytes, width, height))
}

fn encode_message(event: Event, json: bool) -> Result<Message, CliError> {
    if json {
        return Ok(Message::text(frames::encode_event_json(&event)?));
    }
    Ok(Message::Binary(frames::encode_event(&event).into()))
}

fn describe_frame(frame: &VideoFrame) -> String {
    format!("{} {}x{} {} bytes", frame.frame_id, frame.width, frame.height, frame.image.len())
}
