use crate::console::{run_score, run_take, ScoreArgs, TakeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use vark_quiz::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "VARK Quiz",
    about = "Serve or take the VARK learning-style questionnaire",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a comma-separated answer list such as V,V,A,K
    Score(ScoreArgs),
    /// Take the questionnaire interactively in the terminal
    Take(TakeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Take(args) => run_take(args).await,
    }
}
