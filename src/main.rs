//! CLI entrypoint for cv-builder

mod cli;

use std::collections::BTreeSet;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cv_builder::config::BuilderConfig;
use cv_builder::external::{ExperienceExtractor, PdfBuilder};
use cv_builder::loader::{CvDataLoader, SourceCheck};
use cv_builder::render::latex::render_company_experiences;
use cv_builder::render::{write_versioned, GeneratedFile, LatexGenerator, WebsiteGenerator};
use cv_builder::selection::collect_all_tags;
use cv_builder::types::tags::split_tag_args;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = BuilderConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    info!(data_dir = %config.data_dir.display(), "configuration loaded");

    match cli.command {
        Command::Latex {
            tags,
            output,
            template_dir,
            summary,
        } => {
            if let Some(dir) = template_dir {
                config.template_dir = dir;
            }
            if let Some(path) = output {
                config.latex_output = path;
            }
            if let Some(variant) = summary {
                config.summary_variant = variant;
            }
            generate_latex(&config, &split_tag_args(&tags.tags))?;
        }
        Command::Website { tags, output_dir } => {
            if let Some(dir) = output_dir {
                config.website_output_dir = dir;
            }
            generate_website(&config, &split_tag_args(&tags.tags))?;
        }
        Command::All {
            tags,
            latex_output,
            website_output_dir,
        } => {
            if let Some(path) = latex_output {
                config.latex_output = path;
            }
            if let Some(dir) = website_output_dir {
                config.website_output_dir = dir;
            }
            generate_latex(&config, &split_tag_args(&tags.tags))?;
            println!();
            generate_website(&config, &[] as &[String])?;
        }
        Command::Tags => list_tags(&config)?,
        Command::Validate => return validate(&config),
        Command::Build { tex_file } => {
            println!("Building PDF from {}...", tex_file.display());
            let pdf = PdfBuilder::new(config.pdf.clone())
                .build(&tex_file)
                .context("Build failed")?;
            println!("Built: {}", pdf.display());
        }
        Command::Extract { component, output } => {
            if component.is_some() {
                config.extractor.component = component;
            }
            let experiences = ExperienceExtractor::new(config.extractor.clone())
                .extract()
                .context("Error extracting experiences")?;
            let latex = render_company_experiences(&experiences);
            let file = write_versioned(&output, latex.as_bytes())?;
            println!("LaTeX written to {}", file.path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn loader(config: &BuilderConfig) -> Result<CvDataLoader> {
    Ok(CvDataLoader::new(&config.data_dir)?)
}

fn print_file(file: &GeneratedFile) {
    let state = if file.unchanged { "unchanged" } else { "written" };
    println!(
        "  - {}: {} ({state}, {})",
        file.name,
        file.path.display(),
        file.version.short()
    );
}

fn generate_latex(config: &BuilderConfig, tags: &[String]) -> Result<()> {
    println!("Generating LaTeX CV...");
    if !tags.is_empty() {
        println!("  Tags: {}", tags.join(", "));
    }
    println!("  Data: {}", config.data_dir.display());
    println!("  Output: {}", config.latex_output.display());

    let generator = LatexGenerator::new(loader(config)?, &config.template_dir, &config.template_name);
    let file = generator.generate_to_file(&config.latex_output, tags, &config.summary_variant)?;

    println!("Generated:");
    print_file(&file);
    Ok(())
}

fn generate_website(config: &BuilderConfig, tags: &[String]) -> Result<()> {
    println!("Generating website data...");
    println!("  Data: {}", config.data_dir.display());
    println!("  Output: {}", config.website_output_dir.display());

    let generator = WebsiteGenerator::new(loader(config)?, &config.website_output_dir);
    let files = generator.generate_all(tags)?;

    println!("Generated {} files:", files.len());
    for file in &files {
        print_file(file);
    }
    Ok(())
}

fn list_tags(config: &BuilderConfig) -> Result<()> {
    let by_section = collect_all_tags(&loader(config)?)?;

    let width = by_section.keys().map(String::len).max().unwrap_or(0).max("Section".len());
    println!("{:<width$}  Tags", "Section");
    for (section, tags) in &by_section {
        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
        println!("{section:<width$}  {}", tags.join(", "));
    }

    let all: BTreeSet<&str> = by_section.values().flatten().map(String::as_str).collect();
    println!();
    println!("All unique tags ({}):", all.len());
    println!("{}", all.into_iter().collect::<Vec<_>>().join(", "));
    Ok(())
}

fn validate(config: &BuilderConfig) -> Result<ExitCode> {
    println!("Validating CV data in {}...\n", config.data_dir.display());

    let report = loader(config)?.validate_all();
    for (file, check) in &report.sources {
        match check {
            SourceCheck::Ok { rows } => println!("{file}: OK ({rows} rows)"),
            SourceCheck::Failed { issues } => {
                for issue in issues {
                    println!("{file}: {issue}");
                }
            }
        }
    }

    if report.is_ok() {
        println!("\nAll files validated successfully!");
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\nValidation failed with {} error(s) in {} file(s)",
            report.issue_count(),
            report.failed_sources().count()
        );
        Ok(ExitCode::FAILURE)
    }
}
