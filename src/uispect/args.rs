use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uispect::clipboard::CopyField;

#[derive(Parser, Debug)]
#[command(name = "uispect", version)]
#[command(about = "Inspect, search and copy captured Android UI elements", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Records carry a `position` ("x:y") instead of `bounds`
    #[arg(long, global = true)]
    pub position: bool,

    /// Directory holding config.json
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List elements from one or more batch files
    #[command(alias = "ls")]
    List {
        /// Batch files (JSON record or array; "-" reads stdin)
        #[arg(short, long = "input", value_name = "FILE")]
        inputs: Vec<PathBuf>,

        /// Search text, id, description and widget type
        #[arg(short, long, default_value = "")]
        search: String,

        /// Rows to show expanded (positions in the listed view)
        #[arg(short, long, value_name = "N")]
        expand: Vec<usize>,
    },

    /// Copy a field of one element to the clipboard
    #[command(alias = "cp")]
    Copy {
        /// Row position in the listed view
        #[arg(id = "row", value_name = "POSITION")]
        position: usize,

        /// Field to copy: all, class, id, text, description, locator
        #[arg(short, long, default_value = "all")]
        field: CopyField,

        /// Batch files (JSON record or array; "-" reads stdin)
        #[arg(short, long = "input", value_name = "FILE")]
        inputs: Vec<PathBuf>,

        /// Search applied before picking the row
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Validate batch files without loading them
    Check {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Print the loaded elements in canonical form
    Export {
        /// Batch files (JSON record or array; "-" reads stdin)
        #[arg(short, long = "input", value_name = "FILE")]
        inputs: Vec<PathBuf>,
    },

    /// Interactive session fed by stdin (default)
    Session {
        /// Batch files loaded before the session starts (not "-": stdin carries commands)
        #[arg(short, long = "input", value_name = "FILE")]
        inputs: Vec<PathBuf>,
    },
}
