use clap::Parser;

#[derive(Parser)]
#[command(name = "parcelview")]
#[command(about = "Interactive TUI browser for property ownership records")]
pub struct Args {
    /// Base URL of the records API
    #[arg(long, env = "PARCELVIEW_API", default_value = "http://localhost:5000")]
    pub api_url: String,

    /// Jump straight to an owner's detail view
    #[arg(long)]
    pub owner: Option<u64>,

    /// Run a search on startup
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Ignore the saved session and start on the summary view
    #[arg(long, short = 'f')]
    pub fresh: bool,
}
