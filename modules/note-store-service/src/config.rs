use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Startup parameters. Every option can also come from the environment
/// (a `.env` file is loaded first).
#[derive(Debug, Clone, Parser)]
#[command(name = "note-store-service", about = "Plain-text note store over HTTP")]
#[command(disable_help_flag = true)]
pub struct Config {
    /// Server address
    #[arg(short = 'h', long, env = "NOTE_STORE_HOST")]
    pub host: String,

    /// Server port
    #[arg(short = 'p', long, env = "NOTE_STORE_PORT")]
    pub port: u16,

    /// Directory where note files are stored
    #[arg(short = 'c', long = "cache", env = "NOTE_STORE_CACHE_DIR")]
    pub cache_dir: PathBuf,

    /// HTML form served at /UploadForm.html
    #[arg(
        short = 'f',
        long,
        env = "NOTE_STORE_UPLOAD_FORM",
        default_value = "UploadForm.html"
    )]
    pub upload_form: PathBuf,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
impl Config {
    pub fn for_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            cache_dir: cache_dir.into(),
            upload_form: PathBuf::from("UploadForm.html"),
            help: None,
        }
    }
}
