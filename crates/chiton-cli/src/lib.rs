//! Runner behind the `chiton` binary: argument parsing, input loading,
//! solving part 1 / part 2 and checking the answers.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chiton_core::{Cell, DEFAULT_TILE_FACTOR, RiskMap};
use chiton_paths::PathNode;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "chiton")]
#[command(about = "Lowest total risk through a cave risk map", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Input file, one row of digits per line (`-` reads stdin)
    pub input: PathBuf,

    /// Which answer to compute
    #[arg(long, value_enum, default_value_t = Part::Both)]
    pub part: Part,

    /// Replication factor for the full cave in part 2
    #[arg(long, default_value_t = DEFAULT_TILE_FACTOR)]
    pub tile_factor: usize,

    /// Known answer for part 1
    #[arg(long)]
    pub expect_part1: Option<u32>,

    /// Known answer for part 2
    #[arg(long)]
    pub expect_part2: Option<u32>,

    /// Print the cells of the part 1 path
    #[arg(long)]
    pub show_path: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Part {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
    Both,
}

impl Part {
    fn includes(self, n: u8) -> bool {
        matches!((self, n), (Part::Both, _) | (Part::One, 1) | (Part::Two, 2))
    }
}

/// What a run should compute, independent of how it was requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub part: Part,
    pub tile_factor: usize,
    pub expect_part1: Option<u32>,
    pub expect_part2: Option<u32>,
    pub show_path: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            part: Part::Both,
            tile_factor: DEFAULT_TILE_FACTOR,
            expect_part1: None,
            expect_part2: None,
            show_path: false,
        }
    }
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            part: cli.part,
            tile_factor: cli.tile_factor,
            expect_part1: cli.expect_part1,
            expect_part2: cli.expect_part2,
            show_path: cli.show_path,
        }
    }
}

/// One computed answer.
#[derive(Clone, Debug)]
pub struct Answer {
    pub part: u8,
    pub value: u32,
    pub expected: Option<u32>,
    pub path: Option<Vec<PathNode>>,
}

impl Answer {
    /// True unless an expected value was given and differs.
    pub fn is_ok(&self) -> bool {
        self.expected.is_none_or(|e| e == self.value)
    }
}

/// Read the whole input, from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Compute the requested answers for `map`.
pub fn solve(map: &RiskMap, cfg: &RunConfig) -> Result<Vec<Answer>> {
    let mut answers = Vec::new();

    if cfg.part.includes(1) {
        let start = Instant::now();
        let (value, path) = if cfg.show_path {
            let path = chiton_paths::lowest_risk_path(map, Cell::ORIGIN, map.bottom_right())?;
            let value = path.last().map_or(0, |n| n.cost);
            (value, Some(path))
        } else {
            (chiton_paths::lowest_total_risk(map)?, None)
        };
        let elapsed = start.elapsed();
        log::info!("part 1 solved in {:.3?}", elapsed);
        answers.push(Answer {
            part: 1,
            value,
            expected: cfg.expect_part1,
            path,
        });
    }

    if cfg.part.includes(2) {
        let start = Instant::now();
        let big = map
            .tile(cfg.tile_factor)
            .context("failed to build the full cave")?;
        let value = chiton_paths::lowest_total_risk(&big)?;
        let elapsed = start.elapsed();
        log::info!("part 2 solved in {:.3?} ({} cave)", elapsed, big.extent());
        answers.push(Answer {
            part: 2,
            value,
            expected: cfg.expect_part2,
            path: None,
        });
    }

    Ok(answers)
}

/// Write answers in the plain-text report format.
pub fn render(answers: &[Answer], out: &mut impl Write) -> io::Result<()> {
    for a in answers {
        write!(out, "part {}: {}", a.part, a.value)?;
        match a.expected {
            Some(e) if e == a.value => write!(out, " ok")?,
            Some(e) => write!(out, " MISMATCH (expected {e})")?,
            None => {}
        }
        writeln!(out)?;
        if let Some(path) = &a.path {
            for node in path {
                writeln!(out, "  {} {}", node.cell, node.cost)?;
            }
        }
    }
    Ok(())
}
