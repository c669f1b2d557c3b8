use clap::{Parser, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "oxentail")]
/// Computes RDF entailments, telling apart the ones of background graphs from the ones of main graphs
pub struct Args {
    /// Reasoner to use
    ///
    /// The available reasoners are listed by --list-reasoners.
    #[arg(short, long, default_value = "rules")]
    pub reasoner: String,
    /// Reasoner profile
    ///
    /// By default, the default profile of the reasoner is used.
    /// The available profiles are listed by --list-profiles.
    #[arg(short, long)]
    pub profile: Option<String>,
    /// Splits the inferences of the background inputs from the inferences of the union of the main and background inputs
    ///
    /// The latter does not include the triples of the former.
    #[arg(short, long)]
    pub split: bool,
    /// Outputs only inferred triples
    #[arg(short = 'E', long)]
    pub no_echo: bool,
    /// Do not fetch the documents targeted by owl:imports
    #[arg(short = 'D', long)]
    pub no_dereference_imports: bool,
    /// Never fetch this URI when resolving imports
    #[arg(short = 'x', long, value_name = "URI", value_hint = ValueHint::Url)]
    pub exclude_uri: Vec<String>,
    /// Never fetch URIs fully matching this regular expression when resolving imports
    #[arg(short = 'X', long, value_name = "RX")]
    pub exclude_uri_rx: Vec<String>,
    /// Format of the inputs whose format can't be guessed
    ///
    /// It can be a name like "turtle", an extension like "nt" or a media type like "application/n-triples".
    /// By default, the format is guessed from the file extension or the returned media type.
    #[arg(short = 'l', long, value_name = "LANG")]
    pub input_language: Option<String>,
    /// Output format
    ///
    /// It can be a name like "turtle", an extension like "nt" or a media type like "application/n-triples".
    /// By default, it is guessed from the output file extension, then from the input language
    /// and the format of the first loaded file. Turtle is used as a fallback.
    #[arg(short = 'f', long, value_name = "FMT")]
    pub output_format: Option<String>,
    /// File to load into the background graph
    #[arg(short = 'b', long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub input_bg: Vec<PathBuf>,
    /// URI to load into the background graph
    #[arg(short = 'B', long, value_name = "URI", value_hint = ValueHint::Url)]
    pub input_bg_uri: Vec<String>,
    /// File to load into the main graph
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub input: Vec<PathBuf>,
    /// URI to load into the main graph
    #[arg(short = 'I', long, value_name = "URI", value_hint = ValueHint::Url)]
    pub input_uri: Vec<String>,
    /// Output file for the main triples, or all triples if --split is not given
    ///
    /// By default, stdout is used.
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Output file for the background triples
    ///
    /// If not given, the background triples are not written.
    #[arg(short = 'O', long, requires = "split", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output_bg: Option<PathBuf>,
    /// List all available reasoners and exit
    #[arg(short = 'R', long)]
    pub list_reasoners: bool,
    /// List the profiles of the selected reasoner and exit
    #[arg(short = 'P', long)]
    pub list_profiles: bool,
    /// List all supported input languages and exit
    #[arg(short = 'L', long)]
    pub list_input_languages: bool,
    /// List all supported output formats and exit
    #[arg(short = 'F', long)]
    pub list_output_formats: bool,
    /// Maximum number of reasoning iterations before failing
    #[arg(long, default_value_t = 100_000)]
    pub max_iterations: usize,
    /// Maximum duration of each closure computation, in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<f64>,
    /// Format of the logs written to stderr
    ///
    /// The log level is set with the RUST_LOG environment variable.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
    /// Files or URIs to load into the main graph
    #[arg(value_name = "INPUT", value_hint = ValueHint::AnyPath)]
    pub inputs: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
