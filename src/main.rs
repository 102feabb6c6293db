use ai_detect_common::parse_breakdown;
use ai_detect_rust::{browse, cli, client, config, display, error, scanner, session};
use clap::Parser;
use cli::{Cli, Commands};
use client::{AnalysisService, HttpService, JsonlHistory};
use config::Config;
use display::TerminalRenderer;
use error::Result;
use session::Session;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let server_url = config.resolve_server_url(cli.server.as_deref());
    debug!(%server_url, "サーバー設定");

    match cli.command {
        Commands::Analyze { file, json, no_history } => {
            let renderer = terminal_renderer(json, &server_url);
            let service = HttpService::new(&server_url, config.timeout_seconds)?;
            let mut session = Session::new(service, renderer)
                .with_history_limit(config.effective_history_limit(None));

            if !json {
                println!("🔍 ai-detect - 画像解析\n");
            }

            let selected = scanner::select_file(&file)?;

            // 1. 履歴（失敗しても解析は続行）
            if !no_history {
                if !json {
                    println!("[1/2] 履歴を読み込み中...");
                }
                if let Err(e) = session.load_history().await {
                    debug!(error = %e, "履歴なしで続行");
                }
            }

            // 2. アップロード・解析
            if !json {
                println!("\n[2/2] {} を解析中...", server_url);
            }
            session.preview(&selected);
            let record = session.submit(&selected).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                println!("\n✅ 解析完了");
            }
        }

        Commands::History { limit, select, file, json } => {
            let limit = config.effective_history_limit(limit);
            match file {
                Some(path) => {
                    let renderer = terminal_renderer(json, &server_url);
                    run_history(JsonlHistory::new(path), renderer, limit, select, json).await?;
                }
                None => {
                    let service = HttpService::new(&server_url, config.timeout_seconds)?;
                    let renderer = terminal_renderer(json, &server_url);
                    run_history(service, renderer, limit, select, json).await?;
                }
            }
        }

        Commands::Browse { file } => {
            let limit = config.effective_history_limit(None);
            match file {
                Some(path) => {
                    let renderer = terminal_renderer(false, &server_url);
                    let mut session =
                        Session::new(JsonlHistory::new(path), renderer).with_history_limit(limit);
                    browse::run_browse(&mut session).await?;
                }
                None => {
                    let service = HttpService::new(&server_url, config.timeout_seconds)?;
                    let mut session =
                        Session::new(service, terminal_renderer(false, &server_url))
                            .with_history_limit(limit);
                    browse::run_browse(&mut session).await?;
                }
            }
        }

        Commands::Report { input, json } => {
            let text = read_report(input)?;
            let breakdown = parse_breakdown(Some(&text));

            if json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                display::print_breakdown(&breakdown);
            }
        }

        Commands::Config { set_server, show } => {
            let mut config = config;

            if let Some(url) = set_server {
                config.set_server_url(url)?;
                println!("✔ サーバーURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  サーバー: {}", config.server_url);
                println!("  使用中のサーバー: {}", config.resolve_server_url(cli.server.as_deref()));
                println!("  履歴件数: {}", config.history_limit);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

/// 画像パスはサーバーURL基準で表示する
fn terminal_renderer(json: bool, server_url: &str) -> TerminalRenderer {
    let renderer = if json { TerminalRenderer::quiet() } else { TerminalRenderer::new() };
    renderer.with_base_url(server_url)
}

async fn run_history<S: AnalysisService>(
    service: S,
    renderer: TerminalRenderer,
    limit: usize,
    select: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut session = Session::new(service, renderer).with_history_limit(limit);

    session.load_history().await?;

    if let Some(index) = select {
        let record = session.replay(index)?;
        if json {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
    } else if json {
        println!("{}", serde_json::to_string_pretty(session.history().as_slice())?);
    }

    Ok(())
}

fn read_report(input: Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
