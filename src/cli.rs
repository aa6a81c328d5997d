use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytsum",
    about = "Summarize a YouTube video into a shareable article",
    version
)]
pub struct Cli {
    /// YouTube video URL (reads the first line of stdin if omitted)
    pub url: Option<String>,

    /// OpenAI API key used for summarization
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory for summary_<id>.md and transcript_<id>.txt
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print only; don't write the summary and transcript files
    #[arg(long)]
    pub no_download: bool,

    /// Also print the full transcript
    #[arg(short = 't', long)]
    pub show_transcript: bool,

    /// Show progress and output paths
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["ytsum", "https://youtu.be/abc123", "-o", "out", "-t", "--no-download"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://youtu.be/abc123"));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert!(cli.show_transcript);
        assert!(cli.no_download);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_api_key_flag() {
        let cli = Cli::try_parse_from(["ytsum", "--api-key", "sk-test", "https://youtu.be/abc123"]).unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("sk-test"));
    }
}
