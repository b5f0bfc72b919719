use clap::Parser;
use std::path::PathBuf;

/// Rewrites a CUE sheet in canonical form
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(
    long_about = "Rewrites a CUE sheet in canonical form\n\nNote: unrecognized lines are dropped from the output, run inspect first to see them"
)]
pub struct FormatCommand {
    /// Input CUE sheet
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CUE sheet, printed to stdout when omitted
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Text encoding of the input, also used for the output (UTF-16 output is written as UTF-8)
    #[arg(long, short = 'e', value_name = "ENCODING")]
    pub encoding: Option<String>,

    /// Write CRLF line endings instead of LF
    #[arg(long, default_value_t = false)]
    pub crlf: bool,

    /// Force overwrite of the output file if it already exists
    #[arg(long, short = 'f', value_name = "FORCE", default_value_t = false)]
    pub force: bool,
}

/// Logs a summary of a CUE sheet
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct InspectCommand {
    /// Input CUE sheet
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Text encoding of the input
    #[arg(long, short = 'e', value_name = "ENCODING")]
    pub encoding: Option<String>,
}

/// Prints the parsed CUE sheet as JSON
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct DumpCommand {
    /// Input CUE sheet
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Text encoding of the input
    #[arg(long, short = 'e', value_name = "ENCODING")]
    pub encoding: Option<String>,
}
