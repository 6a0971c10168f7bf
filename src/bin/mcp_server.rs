//! Visual scraper MCP Server
//!
//! This binary provides a Model Context Protocol (MCP) server for example-driven scraping.
//! It exposes the scraping session as tools that AI assistants and other MCP clients can use.

use clap::{Parser, ValueEnum};
use rmcp::{ServiceExt, transport::stdio};
use visual_scraper::ScraperOptions;
use visual_scraper::matching::parse_threshold;
use visual_scraper::mcp::ScraperServer;
use visual_scraper::scrape::parse_display_len;

#[cfg(feature = "mcp-server")]
use rmcp::transport::{
    sse_server::{SseServer, SseServerConfig},
    streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
};

#[cfg(feature = "mcp-server")]
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// Server-Sent Events transport
    Sse,
    /// HTTP streamable transport
    Http,
}

fn threshold_arg(value: &str) -> Result<f64, String> {
    parse_threshold(value).map_err(|e| e.to_string())
}

fn display_len_arg(value: &str) -> Result<usize, String> {
    parse_display_len(value).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "visual-scraper")]
#[command(version)]
#[command(about = "Example-driven scraping MCP server", long_about = None)]
struct Cli {
    /// Similarity threshold used when a match request names none (0 to 1)
    #[arg(long, value_name = "DECIMAL", default_value = "0.67", value_parser = threshold_arg)]
    threshold: f64,

    /// Characters of element text shown before truncation
    #[arg(long, value_name = "CHARS", default_value = "50", value_parser = display_len_arg)]
    display_len: usize,

    /// Tags dropped from page snapshots (repeatable; default: script, style, noscript)
    #[arg(long = "ignore-tag", value_name = "TAG")]
    ignore_tags: Vec<String>,

    /// Start with selection mode disabled
    #[arg(long)]
    no_selection_mode: bool,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for SSE or HTTP transport (default: 3000)
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// SSE endpoint path (default: /sse)
    #[arg(long, default_value = "/sse")]
    sse_path: String,

    /// SSE POST path for messages (default: /message)
    #[arg(long, default_value = "/message")]
    sse_post_path: String,

    /// HTTP streamable endpoint path (default: /mcp)
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

impl Cli {
    fn options(&self) -> ScraperOptions {
        let mut options = ScraperOptions::new()
            .threshold(self.threshold)
            .display_text_len(self.display_len)
            .selection_mode(!self.no_selection_mode);
        if !self.ignore_tags.is_empty() {
            options = options.ignored_tags(self.ignore_tags.iter().map(|tag| tag.to_ascii_lowercase()));
        }
        options
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options();

    eprintln!("Visual scraper MCP Server v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Default threshold: {:.0}%", options.default_threshold * 100.0);
    eprintln!(
        "Selection mode: {}",
        if options.selection_mode {
            "enabled"
        } else {
            "disabled"
        }
    );

    // Route to appropriate transport
    match cli.transport {
        Transport::Stdio => {
            eprintln!("Transport: stdio");
            eprintln!("Ready to accept MCP connections via stdio");
            let service = ScraperServer::with_options(options);
            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            eprintln!("Server quit with reason: {:?}", quit_reason);
        }
        Transport::Sse => {
            eprintln!("Transport: SSE");
            eprintln!("Port: {}", cli.port);
            eprintln!("SSE path: {}", cli.sse_path);
            eprintln!("SSE POST path: {}", cli.sse_post_path);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let config = SseServerConfig {
                bind: bind_addr.parse()?,
                sse_path: cli.sse_path.clone(),
                post_path: cli.sse_post_path.clone(),
                ct: CancellationToken::new(),
                sse_keep_alive: None,
            };

            let (sse_server, router) = SseServer::new(config);

            eprintln!(
                "Ready to accept MCP connections at http://{}{}",
                bind_addr, cli.sse_path
            );

            // One session per connection
            let _cancellation_token =
                sse_server.with_service(move || ScraperServer::with_options(options.clone()));

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, router.into_make_service()).await?;
        }
        Transport::Http => {
            eprintln!("Transport: HTTP streamable");
            eprintln!("Port: {}", cli.port);
            eprintln!("HTTP path: {}", cli.http_path);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let service_factory = move || Ok(ScraperServer::with_options(options.clone()));

            let http_service = StreamableHttpService::new(
                service_factory,
                LocalSessionManager::default().into(),
                Default::default(),
            );

            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            eprintln!(
                "Ready to accept MCP connections at http://{}{}",
                bind_addr, cli.http_path
            );

            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
