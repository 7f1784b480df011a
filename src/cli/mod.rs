//! CLI module for Cody
//!
//! - `query [TEXT]`: classify and dispatch one query
//! - `interactive`: read-eval loop until `exit` / `quit`
//! - `zephyr ...`: structured toolchain commands

use anyhow::Result;
use clap::{Parser, Subcommand};
use cody_tools::DEFAULT_BOARD;
use std::io::Write;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

pub mod session;

pub use session::{build_session, format_dispatch, Reply, Session};

/// Cody command router CLI
#[derive(Parser, Debug)]
#[command(name = "cody")]
#[command(about = "Natural-language command router for Zephyr firmware workflows")]
#[command(version)]
pub struct Cli {
    /// Toolchain command tokens, dispatched without classification
    #[arg(long = "zephyr-cmd", num_args = 1.., allow_hyphen_values = true, hide = true)]
    pub zephyr_cmd: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify and run a single query
    Query {
        /// Query text (prompted for when omitted)
        input: Option<String>,
    },
    /// Interactive mode
    Interactive,
    /// Zephyr toolchain commands
    Zephyr {
        #[command(subcommand)]
        command: ZephyrCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ZephyrCommand {
    /// Check and install toolchain prerequisites
    Init {
        /// Project directory
        #[arg(long, default_value = ".")]
        path: String,
    },
    /// Clone a repository into the project directory
    Clone {
        /// Repository URL
        repo_url: String,
    },
    /// Check out a pull request
    Pr {
        /// Pull request number
        pr_number: u32,
    },
    /// Build firmware
    Compile {
        /// Target board
        #[arg(short, long, default_value = DEFAULT_BOARD)]
        board: String,
    },
    /// Run the test runner
    Test {
        /// Extra test runner arguments
        #[arg(short, long, allow_hyphen_values = true)]
        args: Option<String>,
    },
}

impl ZephyrCommand {
    /// Agent tokens for this command
    pub fn tokens(&self) -> Vec<String> {
        let parts: Vec<&str> = match self {
            Self::Init { path } => vec!["init", "--path", path.as_str()],
            Self::Clone { repo_url } => vec!["clone", repo_url.as_str()],
            Self::Pr { pr_number } => return vec!["pr".to_string(), pr_number.to_string()],
            Self::Compile { board } => vec!["compile", "-b", board.as_str()],
            Self::Test { args: Some(args) } => vec!["test", args.as_str()],
            Self::Test { args: None } => vec!["test"],
        };
        parts.into_iter().map(str::to_string).collect()
    }
}

/// Run the CLI command
///
/// One-shot failures and fatal interactive errors print their diagnostic
/// and yield a failing exit code.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config = crate::config::load_config()?;
    let mut session = build_session(&config)?;

    if !cli.zephyr_cmd.is_empty() {
        let outcome = session.toolchain(&cli.zephyr_cmd).await;
        return Ok(report(session.conclude(outcome)));
    }

    match cli.command {
        Some(Commands::Query { input }) => {
            let query = match input {
                Some(query) => query,
                None => read_line(session.texts().prompt_query).await?,
            };
            if query.trim().is_empty() {
                println!("{}", session.texts().empty_query);
                return Ok(ExitCode::SUCCESS);
            }
            let outcome = session.query(&query).await;
            Ok(report(session.conclude(outcome)))
        }
        Some(Commands::Interactive) => interactive(&mut session).await,
        Some(Commands::Zephyr { command }) => {
            let outcome = session.toolchain(&command.tokens()).await;
            Ok(report(session.conclude(outcome)))
        }
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report(reply: Reply) -> ExitCode {
    let code = if reply.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    };
    if let Reply::Output(line) | Reply::Error { message: line, .. } = reply {
        println!("{line}");
    }
    code
}

async fn interactive(session: &mut Session) -> Result<ExitCode> {
    println!("{}", session.texts().interactive_banner);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", session.texts().prompt_interactive);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match session.interact(&line).await {
            Reply::Exit => break,
            Reply::Empty => continue,
            Reply::Output(text) => println!("{text}"),
            Reply::Error { message, fatal } => {
                println!("{message}");
                if fatal {
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    Ok(lines.next_line().await?.unwrap_or_default())
}
