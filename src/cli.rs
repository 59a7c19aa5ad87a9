//! Command-line handling. [`run`] parses the arguments into an [`AppSettings`] and runs it.

use crate::stand::StandType;
use crate::AppSettings;

use clap::{value_t, App, Arg, ArgMatches};
use std::num::NonZeroUsize;
use std::path::PathBuf;

pub fn run() {
    let matches = app().get_matches();
    settings_from(&matches).run()
}

fn app() -> App<'static, 'static> {
    App::new("treegen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Draws a random branching tree on a slotted stand, as a PNG preview and a DXF for laser cutting")
        .arg(
            Arg::with_name("standtype")
                .short("s")
                .long("standtype")
                .value_name("A|B")
                .takes_value(true)
                .possible_values(&StandType::NAMES)
                .help("Which base stand to draw [default: A]"),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("JSON file overriding the default tree dimensions"),
        )
        .arg(
            Arg::with_name("dxf")
                .short("o")
                .long("dxf")
                .value_name("FILE")
                .takes_value(true)
                .default_value("output.dxf")
                .help("Where to write the DXF for cutting"),
        )
        .arg(
            Arg::with_name("preview")
                .short("p")
                .long("preview")
                .value_name("FILE")
                .takes_value(true)
                .default_value("preview.png")
                .help("Where to write the PNG preview"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("N")
                .takes_value(true)
                .validator(|s| parse_check::<u64>(&s))
                .help("Seed for the random generator, to get the same tree again"),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .value_name("N")
                .takes_value(true)
                .validator(|s| parse_check::<NonZeroUsize>(&s))
                .help("Stop forking after this many levels of forks. Unlimited if not given."),
        )
}

fn parse_check<T: std::str::FromStr>(s: &str) -> Result<(), String>
where
    T::Err: std::fmt::Display,
{
    s.parse::<T>().map(|_| ()).map_err(|e| e.to_string())
}

fn settings_from(matches: &ArgMatches) -> AppSettings {
    // No clap default here: it would let a bare `-s` through as if it were `-s A`
    let stand = match matches.is_present("standtype") {
        true => value_t!(matches, "standtype", StandType).unwrap_or_else(|e| e.exit()),
        false => StandType::A,
    };

    let seed = match matches.is_present("seed") {
        true => Some(value_t!(matches, "seed", u64).unwrap_or_else(|e| e.exit())),
        false => None,
    };

    let max_depth = match matches.is_present("max-depth") {
        true => Some(value_t!(matches, "max-depth", NonZeroUsize).unwrap_or_else(|e| e.exit())),
        false => None,
    };

    // Both of these have defaults
    let path = |name: &str| PathBuf::from(matches.value_of(name).unwrap_or_default());

    AppSettings {
        stand,
        config: matches.value_of("config").map(PathBuf::from),
        dxf_path: path("dxf"),
        preview_path: path("preview"),
        seed,
        max_depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> clap::Result<AppSettings> {
        let mut argv = vec!["treegen"];
        argv.extend_from_slice(args);
        app()
            .get_matches_from_safe(argv)
            .map(|m| settings_from(&m))
    }

    #[test]
    fn defaults() {
        let settings = parse(&[]).unwrap();
        assert_eq!(settings.stand, StandType::A);
        assert_eq!(settings.dxf_path, PathBuf::from("output.dxf"));
        assert_eq!(settings.preview_path, PathBuf::from("preview.png"));
        assert_eq!(settings.config, None);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.max_depth, None);
    }

    #[test]
    fn stand_type_flags() {
        assert_eq!(parse(&["-s", "B"]).unwrap().stand, StandType::B);
        assert_eq!(parse(&["--standtype", "A"]).unwrap().stand, StandType::A);
        assert_eq!(parse(&["--standtype=B"]).unwrap().stand, StandType::B);
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        assert!(parse(&["-s", "C"]).is_err());
        assert!(parse(&["-s"]).is_err());
        assert!(parse(&["--standtype"]).is_err());
        assert!(parse(&["-s", "--seed", "3"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["--seed", "minus one"]).is_err());
        assert!(parse(&["--max-depth", "0"]).is_err());
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = parse(&["-h"]).err().unwrap();
        assert_eq!(err.kind, clap::ErrorKind::HelpDisplayed);
    }

    #[test]
    fn optional_values() {
        let settings = parse(&[
            "--seed",
            "42",
            "--max-depth",
            "5",
            "-c",
            "tree.json",
            "-o",
            "cut.dxf",
            "-p",
            "look.png",
        ])
        .unwrap();

        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.max_depth, NonZeroUsize::new(5));
        assert_eq!(settings.config, Some(PathBuf::from("tree.json")));
        assert_eq!(settings.dxf_path, PathBuf::from("cut.dxf"));
        assert_eq!(settings.preview_path, PathBuf::from("look.png"));
    }
}
