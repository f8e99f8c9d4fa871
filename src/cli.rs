use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::{App, AppSettings, Arg, ArgMatches};

use crate::format::SizeFormat;

#[derive(Debug)]
pub struct LsOptions {
    pub path: PathBuf,
    pub size_format: SizeFormat,
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("gs")
        .about("List files in a directory")
        .setting(AppSettings::DisableVersion)
        .help_message("display this help and exit")
        .arg(Arg::with_name("HUMAN_READABLE")
            .short("h")
            .long("human-readable")
            .help("print sizes like 1K 234M 2G etc."))
        .arg(Arg::with_name("PATH")
            .help("directory to list")
            .default_value("."))
}

fn to_options(matches: &ArgMatches) -> LsOptions {
    LsOptions {
        path: PathBuf::from(matches.value_of_os("PATH").unwrap_or_else(|| OsStr::new("."))),
        size_format: if matches.is_present("HUMAN_READABLE") {
            SizeFormat::Human
        } else {
            SizeFormat::Machine
        },
    }
}

pub fn parse_cli_from<I, T>(args: I) -> Result<LsOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = app().get_matches_from_safe(args)?;

    Ok(to_options(&matches))
}

/// Parses the process arguments, exiting on `--help` or a usage error.
pub fn parse_cli() -> LsOptions {
    parse_cli_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}
