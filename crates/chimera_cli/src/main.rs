use anyhow::Context;
use chimera_core::{ChimeraConfig, Input, ProcessedContent, ProcessingResult};
use chimera_pipeline::Dispatcher;
use chimera_voice::mock::{ScriptedCapture, ScriptedStt, ScriptedSynthesizer};
use chimera_voice::VoiceStack;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "chimera.toml")]
    config: String,

    /// Process a single text prompt and exit
    #[arg(long)]
    text: Option<String>,

    /// Describe a local image file and exit
    #[arg(long)]
    image: Option<PathBuf>,

    /// Analyze a JSON object (inline, or @path to read a file) and exit
    #[arg(long)]
    data: Option<String>,

    /// Run one microphone turn and exit
    #[arg(long)]
    listen: bool,

    /// Bearer token for the completion service
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    // 1. Load configuration
    let config = ChimeraConfig::load_or_default(&args.config);

    // 2. Assemble the voice stack. Device-backed capture and playback are
    // wired in by embedding applications; the CLI ships with the scripted
    // collaborators, which keeps --listen runnable on headless machines.
    let voice = VoiceStack {
        capture: Box::new(ScriptedCapture::silent()),
        stt: Box::new(ScriptedStt::no_match()),
        tts: Box::new(ScriptedSynthesizer::with_settings(&config.voice)),
    };

    // 3. Build the dispatcher; fails fast without a credential.
    info!("Starting dispatcher against {}", config.completion.base_url);
    let dispatcher = Dispatcher::from_env(config, args.api_key, voice)?;

    // One-shot modes
    if let Some(text) = args.text {
        let result = dispatcher.process(Input::Text(text)).await?;
        print_result(&result);
        return Ok(());
    }
    if let Some(path) = args.image {
        let result = dispatcher.process(Input::FilePath(path)).await?;
        print_result(&result);
        return Ok(());
    }
    if let Some(data) = args.data {
        let record = parse_record(&data)?;
        let result = dispatcher.process(Input::StructuredRecord(record)).await?;
        print_result(&result);
        return Ok(());
    }
    if args.listen {
        let result = dispatcher.process(Input::MicrophoneCapture).await?;
        print_result(&result);
        return Ok(());
    }

    // Interactive loop
    println!("Chimera online. Type 'quit' to exit.");
    print!("> ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" {
            break;
        }
        if trimmed.is_empty() {
            print!("> ");
            io::stdout().flush()?;
            continue;
        }

        match dispatcher.process(Input::from(trimmed)).await {
            Ok(result) => {
                println!();
                print_result(&result);
                println!();
            }
            Err(e) => {
                error!("Error processing input: {}", e);
                println!("\n[Error]: {}\n", e);
            }
        }

        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}

/// Parse an inline JSON object, or read one from a file with `@path`.
fn parse_record(data: &str) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    let content = match data.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {path}"))?,
        None => data.to_string(),
    };
    serde_json::from_str(&content).context("Data must be a JSON object")
}

fn print_result(result: &ProcessingResult) {
    println!("Input Type: {}", result.input_type);
    match &result.processed_content {
        ProcessedContent::Text { text } => println!("Response: {text}"),
        ProcessedContent::VoiceExchange {
            transcribed_text,
            response,
        } => {
            println!("You said: {transcribed_text}");
            println!("Response: {response}");
        }
        ProcessedContent::Error { message } => println!("Response: {message}"),
    }
    println!("Model Used: {}", result.model_used);
    println!("Latency: {:.3}s", result.latency_seconds);
}
