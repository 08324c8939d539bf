use anyhow::Result;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;

use storygraph_core::EntityKind;
use storygraph_engine::{KindFilter, Mode};

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub snapshot: PathBuf,
    pub chapters: PathBuf,
    pub cursor: usize,
    // None means "use the configured default"
    pub mode: Option<Mode>,
    pub min_weight: Option<u32>,
    pub kinds: Option<KindFilter>,
    pub json: bool,
    pub save_defaults: bool,
}

pub fn parse_args() -> Result<CliArgs> {
    parse_args_from(std::env::args_os().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = OsString>,
{
    let mut snapshot = None;
    let mut chapters = None;
    let mut cursor = 0usize;
    let mut mode = None;
    let mut min_weight = None;
    let mut kinds = None;
    let mut json = false;
    let mut save_defaults = false;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--snapshot" {
            let Some(path) = args.next() else {
                anyhow::bail!("--snapshot expects a path");
            };
            snapshot = Some(PathBuf::from(path));
        } else if arg == "--chapters" {
            let Some(path) = args.next() else {
                anyhow::bail!("--chapters expects a path");
            };
            chapters = Some(PathBuf::from(path));
        } else if arg == "--cursor" {
            let Some(value) = args.next() else {
                anyhow::bail!("--cursor expects a chapter index");
            };
            cursor = value
                .to_string_lossy()
                .parse()
                .map_err(|_| anyhow::anyhow!("--cursor expects a non-negative integer"))?;
        } else if arg == "--mode" {
            let Some(value) = args.next() else {
                anyhow::bail!("--mode expects cumulative|focus");
            };
            mode = Some(parse_mode(&value.to_string_lossy())?);
        } else if arg == "--min-weight" {
            let Some(value) = args.next() else {
                anyhow::bail!("--min-weight expects a positive integer");
            };
            let parsed: u32 = value
                .to_string_lossy()
                .parse()
                .map_err(|_| anyhow::anyhow!("--min-weight expects a positive integer"))?;
            if parsed == 0 {
                anyhow::bail!("--min-weight expects a positive integer");
            }
            min_weight = Some(parsed);
        } else if arg == "--kinds" {
            let Some(value) = args.next() else {
                anyhow::bail!("--kinds expects all or a comma-separated kind list");
            };
            kinds = Some(parse_kinds(&value.to_string_lossy())?);
        } else if arg == "--json" {
            json = true;
        } else if arg == "--save-defaults" {
            save_defaults = true;
        } else {
            anyhow::bail!("unknown argument: {:?}", arg);
        }
    }

    let Some(snapshot) = snapshot else {
        anyhow::bail!("--snapshot is required");
    };
    let Some(chapters) = chapters else {
        anyhow::bail!("--chapters is required");
    };

    Ok(CliArgs {
        snapshot,
        chapters,
        cursor,
        mode,
        min_weight,
        kinds,
        json,
        save_defaults,
    })
}

pub fn parse_mode(input: &str) -> Result<Mode> {
    match input {
        "cumulative" => Ok(Mode::Cumulative),
        "focus" => Ok(Mode::Focus),
        _ => anyhow::bail!("invalid mode: {input} (expected cumulative|focus)"),
    }
}

pub fn parse_kinds(input: &str) -> Result<KindFilter> {
    if input == "all" {
        return Ok(KindFilter::All);
    }
    let mut kinds = HashSet::new();
    for name in input.split(',') {
        let name = name.trim();
        let Some(kind) = EntityKind::parse(name) else {
            anyhow::bail!("unknown entity kind: {name}");
        };
        kinds.insert(kind);
    }
    Ok(KindFilter::Only(kinds))
}
