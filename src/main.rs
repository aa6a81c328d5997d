use std::io::{self, BufRead};
use std::path::PathBuf;

use eyre::{Result, bail};
use log::{info, warn};

mod cli;

use cli::Cli;
use ytsum::ApiKey;
use ytsum::config::{Config, config_path};
use ytsum::pipeline::Summarizer;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytsum.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytsum")
        .join("logs")
}

fn build_after_help() -> String {
    format!(
        "The API key is read from --api-key or OPENAI_API_KEY and is never stored.\n\nConfig: {}\nLogs are written to: {}",
        config_path().display(),
        log_dir().join("ytsum.log").display()
    )
}

fn missing_key_warning(credential: Option<&ApiKey>) -> Option<&'static str> {
    match credential {
        Some(_) => None,
        None => Some("Please enter your OpenAI API key (--api-key or OPENAI_API_KEY) to use this tool."),
    }
}

fn read_url(cli: &Cli) -> Result<String> {
    if let Some(ref url) = cli.url {
        return Ok(url.trim().to_string());
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            return Ok(line.to_string());
        }
    }

    bail!("no URL provided\n\nUsage: ytsum <URL>\n       echo <URL> | ytsum");
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring invalid config file: {e}");
        Config::default()
    });

    if cli.verbose {
        let path = config_path();
        if path.exists() {
            eprintln!("Config: {}", path.display());
        }
    }

    let credential = cli.api_key.as_deref().and_then(ApiKey::new);
    if let Some(warning) = missing_key_warning(credential.as_ref()) {
        warn!("No OpenAI API key supplied");
        eprintln!("Warning: {warning}");
    }

    let url = read_url(&cli)?;

    let summarizer = Summarizer::new(reqwest::Client::new(), config.endpoints.clone());

    if cli.verbose {
        eprintln!("Processing video...");
    }
    let report = summarizer.run(&url, credential.as_ref()).await?;

    println!("{}", ytsum::output::render_report(&report));

    if cli.show_transcript {
        println!("\n--- Full Transcript ---\n{}", report.transcript.as_str());
    }

    if !cli.no_download {
        let dir = cli
            .output_dir
            .clone()
            .or_else(|| config.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let artifacts = ytsum::output::write_artifacts(&dir, &report)?;
        if cli.verbose {
            eprintln!(
                "Summary written to: {}\nTranscript written to: {}",
                artifacts.summary.display(),
                artifacts.transcript.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_warning() {
        assert!(missing_key_warning(None).unwrap().contains("OPENAI_API_KEY"));
        let key = ApiKey::new("sk-test");
        assert!(missing_key_warning(key.as_ref()).is_none());
    }
}
