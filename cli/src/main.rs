//! unlines CLI - block building tool for flattened document lines

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unlines::{
    parse_file_with_options, BuildOptions, CachedBuilder, Document, ExtractionStats, JsonFormat,
    Line, PageSelection, RenderOptions, SourceRegistry,
};

#[derive(Parser)]
#[command(name = "unlines")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild headers, paragraphs, tables and lists from flattened text lines", long_about = None)]
struct Cli {
    /// Input line file (.txt or .json)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags shared by every command that builds blocks.
#[derive(clap::Args, Clone, Copy)]
struct BuildArgs {
    /// Drop blocks built from blank lines
    #[arg(long)]
    drop_empty: bool,

    /// Build regions on the current thread only
    #[arg(long, env = "UNLINES_SEQUENTIAL")]
    sequential: bool,
}

impl From<BuildArgs> for BuildOptions {
    fn from(args: BuildArgs) -> Self {
        BuildOptions::new()
            .with_parallel(!args.sequential)
            .with_drop_empty_blocks(args.drop_empty)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert line files to all formats (Markdown, text, JSON)
    Convert {
        /// Input line files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Region cache capacity shared across files (0 disables it)
        #[arg(long, default_value_t = unlines::parser::DEFAULT_CACHE_CAPACITY)]
        cache_size: usize,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Convert lines to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input line file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Repair irregular capitalization
        #[arg(long)]
        fix_case: bool,

        /// Skip spacing repair and Unicode normalization
        #[arg(long)]
        raw: bool,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "4")]
        max_heading: u8,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Convert lines to plain text
    Text {
        /// Input line file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Repair irregular capitalization
        #[arg(long)]
        fix_case: bool,

        /// Prefix each block with the header it falls under
        #[arg(long)]
        header_context: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Convert lines to block JSON
    #[command(alias = "blocks")]
    Json {
        /// Input line file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Dump the features of every classified line as JSON
    Lines {
        /// Input line file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input line file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            inputs,
            output,
            cache_size,
            build,
        }) => cmd_convert(&inputs, output.as_deref(), cache_size, build.into()),
        Some(Commands::Markdown {
            input,
            output,
            fix_case,
            raw,
            max_heading,
            pages,
            build,
        }) => cmd_markdown(
            &input,
            output.as_deref(),
            fix_case,
            raw,
            max_heading,
            pages.as_deref(),
            build.into(),
        ),
        Some(Commands::Text {
            input,
            output,
            fix_case,
            header_context,
            pages,
            build,
        }) => cmd_text(
            &input,
            output.as_deref(),
            fix_case,
            header_context,
            pages.as_deref(),
            build.into(),
        ),
        Some(Commands::Json {
            input,
            output,
            compact,
            build,
        }) => cmd_json(&input, output.as_deref(), compact, build.into()),
        Some(Commands::Lines {
            input,
            output,
            compact,
        }) => cmd_lines(&input, output.as_deref(), compact),
        Some(Commands::Info { input, build }) => cmd_info(&input, build.into()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(
                    &[input],
                    cli.output.as_deref(),
                    unlines::parser::DEFAULT_CACHE_CAPACITY,
                    BuildOptions::default(),
                )
            } else {
                println!("{}", "Usage: unlines <FILE> [OUTPUT]".yellow());
                println!("       unlines --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_pages(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?),
        None => Ok(PageSelection::All),
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    inputs: &[PathBuf],
    output: Option<&Path>,
    cache_size: usize,
    options: BuildOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = match (output, inputs) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, [single]) => {
            let stem = single.file_stem().unwrap_or_default().to_string_lossy();
            PathBuf::from(format!("{}_output", stem))
        }
        (None, _) => PathBuf::from("unlines_output"),
    };
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Running headers and footers repeat across files, so one cache serves them all
    let registry = SourceRegistry::with_defaults();
    let mut builder = CachedBuilder::new(options.with_cache_capacity(cache_size));
    let render_options = RenderOptions::default();
    let mut written = Vec::with_capacity(inputs.len());

    for input in inputs {
        pb.set_message(input.display().to_string());
        let regions = registry.read_path(input)?;
        let doc = builder.build_document(&regions);

        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let markdown = unlines::render::to_markdown(&doc, &render_options)?;
        fs::write(output_dir.join(format!("{}.md", stem)), &markdown)?;
        let text = unlines::render::to_text(&doc, &render_options)?;
        fs::write(output_dir.join(format!("{}.txt", stem)), &text)?;
        let json = unlines::render::to_json(&doc, JsonFormat::Pretty)?;
        fs::write(output_dir.join(format!("{}.json", stem)), &json)?;

        written.push(stem.into_owned());
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{} {}", "Output files in".green().bold(), output_dir.display());
    for (i, stem) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}.md, {}.txt, {}.json", branch.dimmed(), stem, stem, stem);
    }
    if let Some(cache) = builder.cache() {
        println!(
            "{}: {} hits, {} misses ({:.1}%)",
            "Region cache".bold(),
            cache.hits(),
            cache.misses(),
            cache.hit_rate() * 100.0
        );
    }

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    fix_case: bool,
    raw: bool,
    max_heading: u8,
    pages: Option<&str>,
    options: BuildOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = parse_pages(pages)?;
    let doc = parse_file_with_options(input, options)?;

    let mut render_options = RenderOptions::new();
    if raw {
        render_options = render_options.raw();
    }
    let render_options = render_options
        .with_fix_case(fix_case)
        .with_max_heading(max_heading)
        .with_pages(page_selection);

    let markdown = unlines::render::to_markdown(&doc, &render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    fix_case: bool,
    header_context: bool,
    pages: Option<&str>,
    options: BuildOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = parse_pages(pages)?;
    let doc = parse_file_with_options(input, options)?;

    let render_options = RenderOptions::new()
        .with_fix_case(fix_case)
        .with_header_context(header_context)
        .with_pages(page_selection);

    let text = unlines::render::to_text(&doc, &render_options)?;
    write_or_print(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: BuildOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unlines::render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_lines(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let regions = SourceRegistry::with_defaults().read_path(input)?;
    let lines: Vec<Line> = regions
        .iter()
        .flat_map(|region| region.lines.iter())
        .map(|input| Line::new(&input.text))
        .collect();

    let json = if compact {
        serde_json::to_string(&lines)?
    } else {
        serde_json::to_string_pretty(&lines)?
    };
    write_or_print(output, &json)
}

fn cmd_info(input: &Path, options: BuildOptions) -> Result<(), Box<dyn std::error::Error>> {
    let format = unlines::detect_format_from_path(input)?;
    let doc: Document = parse_file_with_options(input, options)?;
    let stats = ExtractionStats::from_document(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {}", "Regions".bold(), stats.region_count);
    println!("{}: {}", "Lines".bold(), stats.line_count);

    println!();
    println!("{}", "Block Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.block_count);
    println!("{}: {}", "Headers".bold(), stats.header_count);
    println!("{}: {}", "Paragraphs".bold(), stats.para_count);
    println!("{}: {}", "Table rows".bold(), stats.table_row_count);
    println!("{}: {}", "Numbered items".bold(), stats.numbered_item_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Empty blocks".bold(), stats.empty_block_count);
    println!("{}: {}", "Merged blocks".bold(), stats.merged_block_count);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sentences".bold(), stats.sentence_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unlines".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Block building tool for flattened document lines");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unlines".dimmed());
    println!("License: MIT");
}
