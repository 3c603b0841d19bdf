// src/cli/mod.rs — CLI definition (clap derive)

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cvscan", about = "CV analysis client", version)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    /// Act as this user id instead of anonymously (0)
    #[arg(long, global = true)]
    pub user_id: Option<i64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Launch the terminal UI (default)
    Ui,
    /// Check that the server is reachable
    Health,
    /// List uploaded CVs
    Cvs,
    /// List saved job descriptions
    Jobs,
    /// Show past analyses
    History,
    /// Show one analysis result
    Result {
        /// Result id (from `history`)
        id: i64,
    },
    /// Upload a CV file
    Upload {
        /// Path to the CV (.pdf, .docx, .txt)
        file: String,
    },
    /// Analyze a CV against a job description
    Analyze {
        /// CV id (from `cvs` or `upload`)
        #[arg(long)]
        cv: i64,
        /// File holding the job description, or "-" for stdin
        #[arg(long)]
        job: String,
    },
    /// Download the improved CV of a result
    Export {
        /// Result id
        id: i64,
        /// Export format (txt)
        #[arg(long)]
        format: Option<String>,
        /// Directory to save into (defaults to the download dir)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Log in and print the user id to pass as --user-id
    Login {
        #[arg(long)]
        email: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
    },
}
