//! wxmd command-line front end.
//!
//! Converts one Markdown document (a file or stdin) into WeChat-ready HTML and
//! writes it to stdout or a file. Settings start from the layered `AppConfig`
//! and are overridden by flags.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use wxmd_convert::{Converter, PipelineConfig};
use wxmd_core::{AppConfig, ConvertOptions, PipelineMode};

/// Convert Markdown into inline-styled HTML for the WeChat editor.
#[derive(Debug, Parser)]
#[command(name = "wxmd", version, about)]
struct Cli {
    /// Markdown file to convert. Reads stdin when omitted or "-".
    input: Option<PathBuf>,

    /// Article title.
    #[arg(long)]
    title: Option<String>,

    /// Article author.
    #[arg(long)]
    author: Option<String>,

    /// Template file name inside the template directory.
    #[arg(long)]
    template: Option<String>,

    /// Directory templates are loaded from.
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Terminal stage of the pipeline.
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Fail when sanitization removes all content.
    #[arg(long)]
    strict: bool,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    InlineStyle,
    TemplateBound,
}

impl From<Mode> for PipelineMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::InlineStyle => PipelineMode::InlineStyle,
            Mode::TemplateBound => PipelineMode::TemplateBound,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    run(&cli, &config)
}

fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    let markdown = read_input(cli.input.as_deref())?;
    if markdown.len() > config.max_markdown_bytes {
        anyhow::bail!("input is {} bytes, limit is {}", markdown.len(), config.max_markdown_bytes);
    }

    let html = convert(cli, config, &markdown)?;

    match &cli.output {
        Some(path) => fs::write(path, &html).with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn convert(cli: &Cli, config: &AppConfig, markdown: &str) -> Result<String> {
    let converter = Converter::new(pipeline_config(cli, config));
    let options = ConvertOptions { title: cli.title.clone(), author: cli.author.clone(), template: cli.template.clone() };

    let result = converter.convert(markdown, &options)?;
    tracing::debug!("converted {} bytes into {} bytes of html", markdown.len(), result.html.len());
    Ok(result.html)
}

fn pipeline_config(cli: &Cli, config: &AppConfig) -> PipelineConfig {
    let mut pipeline = PipelineConfig::from(config);
    if let Some(mode) = cli.mode {
        pipeline.mode = mode.into();
    }
    if let Some(dir) = &cli.template_dir {
        pipeline.template_dir = dir.clone();
    }
    if cli.strict {
        pipeline.reject_unsafe = true;
    }
    pipeline
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wxmd").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_flags() {
        let cli = parse(&["post.md", "--title", "T", "--mode", "template-bound", "--strict", "-o", "out.html"]);
        assert_eq!(cli.input, Some(PathBuf::from("post.md")));
        assert_eq!(cli.title.as_deref(), Some("T"));
        assert_eq!(cli.mode, Some(Mode::TemplateBound));
        assert!(cli.strict);
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["wxmd", "--mode", "fancy"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&["--mode", "template-bound", "--template-dir", "/tmp/t", "--strict"]);
        let pipeline = pipeline_config(&cli, &AppConfig::default());
        assert_eq!(pipeline.mode, PipelineMode::TemplateBound);
        assert_eq!(pipeline.template_dir, PathBuf::from("/tmp/t"));
        assert!(pipeline.reject_unsafe);
    }

    #[test]
    fn test_config_used_without_flags() {
        let config = AppConfig { reject_unsafe: true, ..AppConfig::default() };
        let pipeline = pipeline_config(&parse(&[]), &config);
        assert_eq!(pipeline.mode, PipelineMode::InlineStyle);
        assert!(pipeline.reject_unsafe);
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("post.md");
        let output = dir.path().join("post.html");
        fs::write(&input, "# Hello World\n\nBody text.").unwrap();

        let cli = parse(&[input.to_str().unwrap(), "--output", output.to_str().unwrap()]);
        run(&cli, &AppConfig::default()).unwrap();

        let html = fs::read_to_string(&output).unwrap();
        assert!(html.starts_with("<section><h1"));
        assert!(html.contains("Body text."));
    }

    #[test]
    fn test_run_missing_input() {
        let cli = parse(&["/nonexistent/post.md"]);
        let err = run(&cli, &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_run_strict_rejects_script() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("evil.md");
        fs::write(&input, "<script>alert(1)</script>").unwrap();

        let cli = parse(&[input.to_str().unwrap(), "--strict"]);
        let err = run(&cli, &AppConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("XSS_DETECTED"));
    }
}
