//! CLI command definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// CLI arguments for cv-builder
#[derive(Parser, Debug)]
#[command(name = "cv-builder")]
#[command(author, version, about = "Build tailored CVs and website data from CSV sources")]
#[command(long_about = r#"
cv-builder turns CV tables (cv_data/*.csv) into a LaTeX CV and website JSON.

Rows are selected by tag (OR logic); rows tagged `always` are always kept.

Configuration files are loaded from (in priority order):
1. CV_BUILDER_* environment variables
2. --config <path>     Explicit config file
3. ./cv-builder.toml   Project-level config

Example:
  cv-builder latex -t ml -t python
  cv-builder website
  cv-builder validate
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the cv_data/ directory
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TagArgs {
    /// Tags to filter by (OR logic). Can be repeated or comma-separated.
    #[arg(short, long = "tags", value_name = "TAG")]
    pub tags: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the LaTeX CV with optional tag filtering
    Latex {
        #[command(flatten)]
        tags: TagArgs,

        /// Output .tex path
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Directory holding the LaTeX template
        #[arg(long, value_name = "DIR")]
        template_dir: Option<PathBuf>,

        /// Summary variant to use
        #[arg(short, long)]
        summary: Option<String>,
    },

    /// Generate JSON data files for the website
    Website {
        #[command(flatten)]
        tags: TagArgs,

        /// Output directory for JSON files
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Generate the LaTeX CV (filtered) and website data (unfiltered)
    All {
        #[command(flatten)]
        tags: TagArgs,

        /// LaTeX output path
        #[arg(long, value_name = "PATH")]
        latex_output: Option<PathBuf>,

        /// Website JSON output directory
        #[arg(long, value_name = "DIR")]
        website_output_dir: Option<PathBuf>,
    },

    /// List all tags used in the CV data
    Tags,

    /// Validate every CSV source and report all problems
    Validate,

    /// Build a PDF from a .tex file using Docker
    Build {
        /// The .tex file to compile
        tex_file: PathBuf,
    },

    /// Extract experiences from the website component and render them as LaTeX
    Extract {
        /// Component file to scrape (defaults to $WEBSITE_REPO_PATH/src/components/Experience.tsx)
        #[arg(long, value_name = "PATH")]
        component: Option<PathBuf>,

        /// Output .tex path
        #[arg(short, long, value_name = "PATH", default_value = "experience.tex")]
        output: PathBuf,
    },
}
