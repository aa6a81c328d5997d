use thiserror::Error;

/// Which collaborator a fetch failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Metadata,
    Transcript,
}

impl std::fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchTarget::Metadata => write!(f, "metadata"),
            FetchTarget::Transcript => write!(f, "transcript"),
        }
    }
}

/// Every failure is terminal for the current run. The messages are what the
/// user sees; `reason` carries the underlying cause for the log file.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid YouTube URL. Please check the URL and try again.")]
    InvalidInput { input: String },

    #[error("{}", fetch_message(.what, .reason))]
    Fetch { what: FetchTarget, reason: String },

    #[error("{}", generation_message(.reason))]
    Generation { reason: GenerationFailure },
}

/// Why generation failed. The missing-credential case is distinguished only so
/// it can be reported before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    MissingCredential,
    Remote(String),
}

fn fetch_message(what: &FetchTarget, reason: &str) -> String {
    match what {
        FetchTarget::Metadata => format!("Error fetching video info: {reason}"),
        FetchTarget::Transcript => {
            "Could not fetch transcript. Please ensure the video has English subtitles.".to_string()
        }
    }
}

fn generation_message(reason: &GenerationFailure) -> String {
    match reason {
        GenerationFailure::MissingCredential => "Please provide a valid OpenAI API key.".to_string(),
        GenerationFailure::Remote(r) => format!("Error generating summary: {r}"),
    }
}

impl Error {
    pub(crate) fn fetch(what: FetchTarget, reason: impl std::fmt::Display) -> Self {
        Error::Fetch {
            what,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn generation(reason: impl std::fmt::Display) -> Self {
        Error::Generation {
            reason: GenerationFailure::Remote(reason.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
