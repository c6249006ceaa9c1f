use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "twochoice", version, about = "Terminal client for two-choice polls")]
pub struct Cli {
    /// Base URL of the polling API [default: http://127.0.0.1:8000/api]
    #[arg(long, value_name = "url")]
    pub api_base: Option<String>,

    /// Config file [default: platform config dir]/twochoice/config.yaml
    #[arg(long, value_name = "path")]
    pub config: Option<String>,

    /// Name sent along with each vote
    #[arg(long, value_name = "name")]
    pub user_name: Option<String>,

    /// Log file [default: platform data dir]/twochoice/twochoice.log
    #[arg(long, value_name = "path")]
    pub log_file: Option<String>,

    /// Page to open on start
    #[arg(long, value_name = "page-id", default_value = "top-page")]
    pub page: String,

    /// Print vote history without entering TUI
    #[arg(long)]
    pub history: bool,

    /// Print all questions without entering TUI
    #[arg(long, conflicts_with = "history")]
    pub questions: bool,
}
