use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rmcp::ServiceExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pcbuilder::{
    ChatController, Commands, Container, ContainerConfig, LlmProvider, PcBuilderMcpServer,
    RenderFormat, Router, SessionId,
};

#[derive(Parser)]
#[command(name = "pcbuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use the built-in parts catalog and mock prices instead of the APIs
    #[arg(long, global = true)]
    offline: bool,

    /// Language model API: anthropic or openai
    #[arg(long, global = true, default_value = "anthropic")]
    provider: String,

    /// Ask the model for a JSON parts list instead of "Category: model" lines
    #[arg(long, global = true)]
    structured_output: bool,

    /// Output format for builds: text, markdown or json
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Product lookups in flight at once
    #[arg(long, global = true, default_value = "4")]
    concurrency: usize,

    /// Read budget and use case with keyword rules only
    #[arg(long, global = true)]
    no_llm_analysis: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Keep the chat transcript readable: only warnings unless asked for more.
    let default_level = if cli.verbose {
        "debug"
    } else if matches!(cli.command, Commands::Chat { .. }) {
        "warn"
    } else {
        "info"
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        provider: LlmProvider::from_str(&cli.provider),
        offline: cli.offline,
        structured_output: cli.structured_output,
        render_format: RenderFormat::from_str(&cli.format),
        concurrency: cli.concurrency,
        llm_analysis: !cli.no_llm_analysis,
    })?;

    match cli.command {
        Commands::Mcp => {
            info!("Starting MCP server on stdio");
            let server = PcBuilderMcpServer::new(Arc::new(container));
            let service = server.serve(rmcp::transport::stdio()).await?;
            service.waiting().await?;
        }
        Commands::Chat { session } => {
            run_chat(&container, session).await?;
        }
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

async fn run_chat(container: &Container, session: Option<String>) -> Result<()> {
    let controller = ChatController::new(container);
    let session_id = session.map(SessionId::from).unwrap_or_default();

    println!("{}\n", controller.open(&session_id).await?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                println!("\n{}\n", controller.reset(&session_id).await?);
                continue;
            }
            _ => {}
        }

        let spinner = thinking_spinner();
        let reply = controller.send(&session_id, &line).await;
        spinner.finish_and_clear();

        match reply {
            Ok(reply) => println!("\n{}\n", reply.text()),
            Err(e) => {
                error!("Chat turn failed: {:#}", e);
                println!("\nSomething went wrong on my side. Please try again.\n");
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
