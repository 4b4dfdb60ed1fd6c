use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use orgwiki_config::Config;
use orgwiki_render::{OutputFormat, RenderOptions, render};
use orgwiki_syntax::{ParseOutput, parse, parse_reader};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "orgwiki")]
#[command(version, about = "Render wiki markup as HTML or XML")]
struct Args {
    /// Markup file to render; reads standard input when omitted or `-`
    #[arg(conflicts_with = "page")]
    input: Option<PathBuf>,

    /// Render a page by title from the configured pages directory
    #[arg(short, long)]
    page: Option<String>,

    /// Output format [default: from config, else html]
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Put block elements on their own indented lines
    #[arg(long)]
    pretty: bool,

    /// Escape markup characters in text and attribute values
    #[arg(long)]
    escape: bool,

    /// Config file to use instead of ~/.config/orgwiki/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Xml,
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xml => OutputFormat::Xml,
            FormatArg::Html => OutputFormat::Html,
        }
    }
}

/// Where the markup comes from.
#[derive(Debug, PartialEq, Eq)]
enum Source {
    Stdin,
    File(PathBuf),
}

impl Args {
    fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    fn load_config(&self) -> Result<Config> {
        let config_path = self.config.clone().unwrap_or_else(Config::config_path);
        let config = Config::load_from_path(&config_path)?;
        if config.is_none() && self.config.is_some() {
            bail!("Config file '{}' does not exist", config_path.display());
        }
        Ok(config.unwrap_or_default())
    }

    /// Config defaults with command-line flags applied on top.
    fn render_options(&self, config: &Config) -> RenderOptions {
        let mut options = RenderOptions::from(config.render);
        if let Some(format) = self.format {
            options.format = format.into();
        }
        options.pretty |= self.pretty;
        options.escape_text |= self.escape;
        options
    }

    fn source(&self, config: &Config) -> Result<Source> {
        if let Some(title) = &self.page {
            let Some(path) = config.page_path(title) else {
                bail!("Cannot open page '{title}': no pages_path configured");
            };
            return Ok(Source::File(path));
        }
        Ok(match &self.input {
            Some(path) if path.as_path() != Path::new("-") => Source::File(path.clone()),
            _ => Source::Stdin,
        })
    }
}

fn read_source(source: &Source, stdin: impl Read) -> Result<ParseOutput> {
    match source {
        Source::Stdin => Ok(parse_reader(stdin)),
        Source::File(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            log::info!("Read {} bytes from {}", bytes.len(), path.display());
            Ok(parse(&bytes))
        }
    }
}

/// Parse the selected input and render it, logging any diagnostics.
fn run(args: &Args, stdin: impl Read) -> Result<String> {
    let config = args.load_config()?;
    let options = args.render_options(&config);
    let source = args.source(&config)?;
    log::debug!("Rendering {source:?} with {options:?}");

    let output = read_source(&source, stdin)?;
    for diagnostic in &output.diagnostics {
        log::warn!("{diagnostic}");
    }
    Ok(render(output.tree.as_ref(), &options))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose > 0 || std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(args.log_level());
    }
    logger.init();

    let rendered = run(&args, io::stdin().lock())?;

    let mut stdout = io::stdout().lock();
    if !rendered.is_empty() {
        writeln!(stdout, "{rendered}").context("Failed to write output")?;
    }
    Ok(())
}
