use anyhow::{Context, Result};
use minilang_config::{Config, OutputFormat};
use minilang_syntax::parse_with_title;
use minilang_syntax::render::{render_events, render_tree};
use std::path::PathBuf;
use std::{env, fs, process};

const EXIT_SYNTAX_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

struct Args {
    source_path: PathBuf,
    events: bool,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut source_path = None;
    let mut events = false;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--events" => events = true,
            flag if flag.starts_with("--") => return None,
            path if source_path.is_none() => source_path = Some(PathBuf::from(path)),
            _ => return None,
        }
    }

    source_path.map(|source_path| Args {
        source_path,
        events,
    })
}

fn load_config() -> Config {
    match Config::load() {
        Ok(Some(config)) => {
            log::debug!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            log::warn!("{e}; using defaults");
            Config::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("minilang");

    let Some(args) = parse_args(&args) else {
        eprintln!("Usage: {program_name} <source-file> [--events]");
        process::exit(EXIT_USAGE);
    };

    let config = load_config();
    let source = fs::read_to_string(&args.source_path)
        .with_context(|| format!("Failed to read {}", args.source_path.display()))?;

    log::info!("Analyzing {}", args.source_path.display());
    let parse = parse_with_title(&source, &config.title);

    let output = if args.events || config.format == OutputFormat::Events {
        render_events(&parse.events)
    } else {
        render_tree(&parse.tree, config.indent)
    };
    print!("{output}");

    if parse.error.is_some() {
        process::exit(EXIT_SYNTAX_ERROR);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_source_path() {
        let parsed = parse_args(&args(&["minilang", "prog.ml"])).unwrap();
        assert_eq!(parsed.source_path, PathBuf::from("prog.ml"));
        assert!(!parsed.events);
    }

    #[test]
    fn parses_events_flag_in_any_position() {
        assert!(parse_args(&args(&["minilang", "--events", "p"])).unwrap().events);
        assert!(parse_args(&args(&["minilang", "p", "--events"])).unwrap().events);
    }

    #[test]
    fn rejects_bad_usage() {
        assert!(parse_args(&args(&["minilang"])).is_none());
        assert!(parse_args(&args(&["minilang", "a", "b"])).is_none());
        assert!(parse_args(&args(&["minilang", "--verbose", "a"])).is_none());
    }
}
