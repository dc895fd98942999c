use crate::output::Format;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group = ArgGroup::new("selector").required(true))]
pub struct Cli {
    /// print the full inventory document
    #[arg(short, long, action, group = "selector")]
    pub list: bool,

    /// print the named host's variables
    #[arg(long, value_name = "HOST", group = "selector")]
    pub host: Option<String>,

    /// print the named group's variables
    #[arg(short, long, value_name = "GROUP", group = "selector")]
    pub group: Option<String>,

    /// output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// write the output to FILE instead of stdout; the file extension must match the format
    #[arg(short, long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// skip loading and saving the inventory snapshot
    #[arg(long, action)]
    pub no_cache: bool,

    /// delete the inventory snapshot before running
    #[arg(long, action)]
    pub flush_cache: bool,

    /// number of device records to generate when the store is empty
    #[arg(short, long, default_value_t = 3)]
    pub devices: usize,

    /// keep only the named group (repeatable, case-insensitive)
    #[arg(long, value_name = "NAME")]
    pub filter_group: Vec<String>,

    /// drop hosts whose variable KEY matches REGEX case-insensitively (repeatable)
    #[arg(long, value_name = "KEY=REGEX", value_parser = parse_exclude_host)]
    pub exclude_host: Vec<(String, String)>,
}

fn parse_exclude_host(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, pattern)) if !key.is_empty() && !pattern.is_empty() => {
            Ok((key.to_string(), pattern.to_string()))
        }
        _ => Err(format!("expected KEY=REGEX, got '{raw}'")),
    }
}
