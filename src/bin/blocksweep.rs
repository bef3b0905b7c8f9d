use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blocksweep::{BlockSizeRange, ConvertOptions, ConverterRegistry, SweepConfig};

#[derive(Parser, Debug)]
#[command(name = "blocksweep", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an image with one or more converters.
    Convert(ConvertArgs),
    /// Print the names of all converters.
    List,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input PNG or JPEG.
    #[arg(long)]
    input: PathBuf,

    /// Output path (only with a single converter).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output directory; defaults to the input's directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Comma-separated converter names, or `all`.
    #[arg(long, value_delimiter = ',', default_value = "block_median")]
    converters: Vec<String>,

    /// Comma-separated converter names to skip (use with `--converters all`).
    #[arg(long, value_delimiter = ',')]
    except: Vec<String>,

    /// Block size for single-image converters.
    #[arg(long, default_value_t = 10)]
    block_size: i64,

    /// Mosaic tile size for `pixelated` and `websafe_pixelated`.
    #[arg(long, default_value_t = 16)]
    pixelate_block_size: u32,

    /// Resize every output to this width (requires --resize-height).
    #[arg(long)]
    resize_width: Option<u32>,

    /// Resize every output to this height (requires --resize-width).
    #[arg(long)]
    resize_height: Option<u32>,

    /// Overwrite existing outputs.
    #[arg(long, default_value_t = false)]
    force: bool,

    /// JSON sweep config; explicit animate flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads for animations.
    #[arg(long)]
    animate_threads: Option<usize>,

    /// First animation block size.
    #[arg(long)]
    animate_block_size_start: Option<i64>,

    /// Last animation block size (inclusive).
    #[arg(long)]
    animate_block_size_end: Option<i64>,

    /// Animation block size step.
    #[arg(long)]
    animate_block_size_step: Option<i64>,

    /// Order frames from larger block size to smaller; `--animate-reverse=false` overrides
    /// a config file.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    animate_reverse: Option<bool>,

    /// GIF palette quantization speed, 1 (best) to 30 (fastest).
    #[arg(long)]
    gif_speed: Option<i32>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::List => cmd_list(),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list() -> anyhow::Result<()> {
    let registry = ConverterRegistry::with_builtins();
    println!("Printing the names of all the converters...");
    for (i, name) in registry.names().iter().enumerate() {
        println!("  [{}] {name}", i + 1);
    }
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let input = args.input.clone();
    let opts = convert_options(args)?;

    let registry = ConverterRegistry::with_builtins();
    let outputs = blocksweep::convert(&input, &opts, &registry)
        .with_context(|| format!("converting '{}'", input.display()))?;
    for out in outputs {
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn convert_options(args: ConvertArgs) -> anyhow::Result<ConvertOptions> {
    let sweep = sweep_config(&args)?;
    let resize = match (args.resize_width, args.resize_height) {
        (Some(w), Some(h)) => Some((w, h)),
        (None, None) => None,
        _ => anyhow::bail!("--resize-width and --resize-height must be given together"),
    };
    let opts = ConvertOptions {
        converters: args.converters,
        except: args.except,
        block_size: args.block_size,
        pixelate_block_size: args.pixelate_block_size,
        resize,
        output_dir: args.output_dir,
        output_file: args.output,
        force: args.force,
        sweep,
    };
    opts.validate()?;
    Ok(opts)
}

fn sweep_config(args: &ConvertArgs) -> anyhow::Result<SweepConfig> {
    let mut cfg = match &args.config {
        Some(path) => SweepConfig::from_path(path)?,
        None => SweepConfig::default(),
    };

    let start = args.animate_block_size_start.unwrap_or(cfg.range.start());
    let end = args.animate_block_size_end.unwrap_or(cfg.range.end());
    let step = args.animate_block_size_step.unwrap_or(cfg.range.step());
    cfg.range = BlockSizeRange::new(start, end, step)?;

    if let Some(n) = args.animate_threads {
        cfg.workers = n;
    }
    if let Some(reverse) = args.animate_reverse {
        cfg.reverse = reverse;
    }
    if let Some(speed) = args.gif_speed {
        cfg.gif_speed = speed;
    }
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
#[path = "../../tests/unit/cli.rs"]
mod tests;
