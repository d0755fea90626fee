use agentic_orchestrator::{
    config::{Config, ProviderKind},
    llm::{GeminiClient, OllamaClient},
    logger::{FileLogger, Logger, RemoteLogger},
    tools::load_tools,
    AgentUnit, ChatModelProvider, LlmProvider,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    info!(provider = ?config.provider, tools = ?config.tools, "Agentic orchestrator starting");

    // Create components
    let (llm, chat_model): (Arc<dyn LlmProvider>, Arc<dyn ChatModelProvider>) =
        match config.provider {
            ProviderKind::Gemini => {
                if config.gemini_api_key.is_empty() {
                    warn!("GEMINI_API_KEY not set - requests will be rejected");
                }
                let client = Arc::new(GeminiClient::with_model(
                    config.gemini_api_key.clone(),
                    config.gemini_model.clone(),
                ));
                (client.clone() as Arc<dyn LlmProvider>, client as Arc<dyn ChatModelProvider>)
            }
            ProviderKind::Ollama => {
                let client = Arc::new(OllamaClient::new(
                    config.ollama_base_url.clone(),
                    config.ollama_model.clone(),
                ));
                (client.clone() as Arc<dyn LlmProvider>, client as Arc<dyn ChatModelProvider>)
            }
        };

    let tools = load_tools(config.tools.iter().map(String::as_str))?;

    let mut agent = AgentUnit::new(llm, tools)
        .with_name("agentic")
        .with_chat_model(chat_model)
        .with_config(config.agent.clone());

    let logger: Option<Arc<dyn Logger>> = match (&config.log_endpoint, &config.log_file) {
        (Some(endpoint), _) => Some(Arc::new(RemoteLogger::new(endpoint.clone()))),
        (None, Some(path)) => Some(Arc::new(FileLogger::new(path))),
        (None, None) => None,
    };
    if let Some(logger) = logger {
        agent = agent.with_logger(logger);
    }

    // One-shot when input is given on the command line, otherwise a REPL
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let reply = agent.chat(&args.join(" ")).await?;
        println!("{}", reply);
        return Ok(());
    }

    println!("Type a message, or 'exit' to quit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            break;
        }

        match agent.chat(input).await {
            Ok(reply) => println!("{}", reply),
            Err(e) => {
                eprintln!("Turn failed: {}", e);
                return Err(Box::new(e) as Box<dyn std::error::Error>);
            }
        }
    }

    info!(turns = agent.memory().len().await, "Session ended");
    Ok(())
}
