//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "jam3a", about = "Darija corpus merge tool.")]
/// Holds every command that is callable by the `jam3a` command.
pub enum Jam3a {
    #[structopt(about = "Merge raw source files into the corpus")]
    Merge(Merge),
    #[structopt(about = "Explain classification decisions for a text file")]
    Explain(Explain),
    #[structopt(about = "Deduplicate an already generated corpus")]
    Dedup(Dedup),
}

#[derive(Debug, StructOpt)]
/// Merge command and parameters.
///
/// ```sh
/// jam3a-merge 0.3.0
/// Merge raw source files into the corpus
///
/// USAGE:
///     jam3a merge [FLAGS] [OPTIONS] <src> <dst>
///
/// ARGS:
///     <src>    source directory (contains <source>.jsonl files)
///     <dst>    merged corpus destination (csv)
/// ```
pub struct Merge {
    #[structopt(parse(from_os_str), help = "source directory (contains <source>.jsonl files)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "merged corpus destination (csv)")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "lid-path",
        help = "Path to the language identification model",
        default_value = "lid.176.ftz"
    )]
    pub lid_path: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "config",
        help = "JSON config overriding the defaults"
    )]
    pub config: Option<PathBuf>,
    #[structopt(
        long = "sources",
        help = "comma-separated source names, in merge order (overrides config)"
    )]
    pub sources: Option<String>,
    #[structopt(long = "synthetic", help = "append the generated supplementary batch")]
    pub synthetic: bool,
    #[structopt(long = "target-size", help = "stop the generated batch at this corpus size")]
    pub target_size: Option<usize>,
}

#[derive(Debug, StructOpt)]
/// Explain command and parameters.
pub struct Explain {
    #[structopt(parse(from_os_str), help = "text file, one candidate per line")]
    pub file: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "lid-path",
        help = "Path to the language identification model",
        default_value = "lid.176.ftz"
    )]
    pub lid_path: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "config",
        help = "JSON config overriding the defaults"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
/// Dedup command and parameters.
pub struct Dedup {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
}
