use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bdfunc", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert every frame file in a directory and write the dispatcher.
    Build(BuildArgs),
    /// Print the undeduplicated command lines of a single frame file.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Settings file (`key: value` lines).
    #[arg(long, default_value = "setting.txt")]
    config: PathBuf,

    /// Directory containing `f<N>*.bdengine` frame files.
    #[arg(long = "input", default_value = ".")]
    input_dir: PathBuf,

    /// Result directory, used when the settings name no output directories.
    #[arg(long = "out", default_value = "result")]
    result_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Frame file to decode.
    path: PathBuf,

    /// Generation mode: 0 runs as the entity, 1 addresses it directly.
    #[arg(long, default_value_t = 0)]
    mode: u8,

    /// Interpolation duration; defaults to the file name's `i<N>` token.
    #[arg(long)]
    interpolation: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let settings = bdfunc::Settings::from_path(&args.config)
        .with_context(|| format!("load settings '{}'", args.config.display()))?;
    tracing::debug!(?settings, "settings loaded");

    let opts = bdfunc::BatchOpts {
        input_dir: args.input_dir,
        result_dir: args.result_dir,
    };
    let report = bdfunc::run_batch(&settings, &opts).context("convert frames")?;

    eprintln!(
        "wrote {} frame(s), {} line(s) ({} dropped, {} rewritten, {} skipped frame(s))",
        report.frames_written,
        report.lines_written,
        report.lines_dropped,
        report.lines_rewritten,
        report.frames_skipped
    );
    eprintln!("wrote {}", report.dispatcher_path.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mode = bdfunc::Mode::try_from(args.mode).map_err(anyhow::Error::msg)?;
    let file_interpolation = args
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(bdfunc::FrameName::parse)
        .and_then(|n| n.interpolation);

    let graph = bdfunc::load_frame(&args.path)?;
    let ctx = bdfunc::EmitContext {
        mode,
        interpolation: args.interpolation.or(file_interpolation),
    };
    for line in bdfunc::candidate_lines(&graph, &ctx) {
        println!("{line}");
    }
    Ok(())
}
