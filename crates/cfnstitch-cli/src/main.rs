use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cfnstitch", version, about = "cfn-stitch CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge a template and everything it imports into one flat document
    Merge {
        /// Path to the root CloudFormation template file
        file: String,
        /// Output file (will print to stdout if not specified)
        #[arg(short, long, conflicts_with = "temp")]
        output: Option<String>,
        /// Write to a generated temporary file and print its path
        #[arg(long)]
        temp: bool,
    },
    /// Show a template's sections and import references
    Inspect {
        /// Path to a template file
        file: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Merge { file, output, temp } => {
            cfnstitch_core::cmd_merge(&file, output.as_deref(), temp)?
        }
        Command::Inspect { file } => cfnstitch_core::cmd_inspect(&file)?,
    }
    Ok(())
}
