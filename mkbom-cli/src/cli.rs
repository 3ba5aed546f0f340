//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mkbom_builder::BomConfig;

/// mkbom -- generate a Maven BOM from local repository directories.
///
/// Every `*.pom` descriptor found under the given directories becomes one
/// managed dependency of the generated BOM.
#[derive(Parser, Debug)]
#[command(name = "mkbom", about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// groupId of the generated BOM [default: group]
    #[arg(short = 'g', long = "groupId", value_name = "GROUP_ID")]
    pub group_id: Option<String>,

    /// artifactId of the generated BOM [default: bom]
    #[arg(short = 'a', long = "artifactId", value_name = "ARTIFACT_ID")]
    pub artifact_id: Option<String>,

    /// Version of the generated BOM [default: 1]
    #[arg(short = 'v', long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Name of the generated BOM; an empty value omits <name> [default: Bill of Materials]
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Output file; `-` writes to standard output [default: pom.xml]
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<String>,

    /// Suffix appended to every dependency version; empty disables it [default: redhat-1]
    #[arg(short = 'q', long = "qualifier", value_name = "QUALIFIER")]
    pub qualifier: Option<String>,

    /// Optional TOML file with default settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Repository directories to scan, in order.
    #[arg(required = true, value_name = "REPO_DIR")]
    pub roots: Vec<PathBuf>,
}

/// Supported log formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    Pretty,
    /// Machine-readable JSON lines.
    Json,
}

impl Cli {
    /// Apply the flags that were given on top of `config`.
    ///
    /// Flags left out keep whatever the config file, environment or defaults set.
    pub fn apply_to(self, config: &mut BomConfig) {
        if let Some(group_id) = self.group_id {
            config.group_id = group_id;
        }
        if let Some(artifact_id) = self.artifact_id {
            config.artifact_id = artifact_id;
        }
        if let Some(version) = self.version {
            config.version = version;
        }
        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(qualifier) = self.qualifier {
            config.qualifier = qualifier;
        }
        config.roots = self.roots;
    }
}
