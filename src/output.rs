use std::path::{Path, PathBuf};

use eyre::Result;
use log::debug;

use crate::VideoId;
use crate::pipeline::Report;

pub fn summary_file_name(video_id: &VideoId) -> String {
    format!("summary_{video_id}.md")
}

pub fn transcript_file_name(video_id: &VideoId) -> String {
    format!("transcript_{video_id}.txt")
}

/// Paths of the files written for one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub summary: PathBuf,
    pub transcript: PathBuf,
}

/// Write `summary_<id>.md` and `transcript_<id>.txt` into `dir`
pub fn write_artifacts(dir: &Path, report: &Report) -> Result<Artifacts> {
    std::fs::create_dir_all(dir)?;

    let summary = dir.join(summary_file_name(&report.video_id));
    std::fs::write(&summary, report.summary.as_str())?;
    debug!("Wrote summary: {}", summary.display());

    let transcript = dir.join(transcript_file_name(&report.video_id));
    std::fs::write(&transcript, report.transcript.as_str())?;
    debug!("Wrote transcript: {}", transcript.display());

    Ok(Artifacts { summary, transcript })
}

/// Render the report for the terminal: header, summary, share line
pub fn render_report(report: &Report) -> String {
    let meta = &report.metadata;
    format!(
        "# {}\nCreator: {}\nThumbnail: {}\nProcessed at: {}\n\n{}\n\n---\nVideo: [{}]({})",
        meta.title,
        meta.author,
        meta.thumbnail_url,
        report.processed_at.format("%Y-%m-%d %H:%M:%S"),
        report.summary.as_str(),
        meta.title,
        report.source_url,
    )
}
