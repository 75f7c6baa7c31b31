use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "thumbkit", version)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a layout to PNG or JPEG (chosen by the output extension).
    Render(RenderArgs),
    /// Print the canonical form of a layout and what was repaired.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Layout JSON.
    #[arg(long)]
    layout: PathBuf,

    /// Subject image placed into image elements.
    #[arg(long)]
    subject: Option<PathBuf>,

    /// Make near-white subject pixels transparent before compositing.
    #[arg(long, default_value_t = false)]
    isolate_subject: bool,

    /// Output path (.png, .jpg or .jpeg).
    #[arg(long)]
    out: PathBuf,

    /// Extra font directory, searched first. May be repeated.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Skip the system font database.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,

    /// Border width in pixels drawn around the finished image.
    #[arg(long, default_value_t = 0)]
    border: u32,

    /// Border color.
    #[arg(long, default_value = "#000000")]
    border_color: String,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = 90)]
    jpeg_quality: u8,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Layout JSON.
    #[arg(long)]
    layout: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.layout)
        .with_context(|| format!("read layout '{}'", args.layout.display()))?;
    let layout = thumbkit::parse_layout(&json);

    let subject = match &args.subject {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read subject '{}'", path.display()))?;
            let img = thumbkit::decode_subject(&bytes)?;
            Some(if args.isolate_subject {
                thumbkit::prepare_subject(None, &img)
            } else {
                img
            })
        }
        None => None,
    };

    let format = thumbkit::ExportFormat::from_path(&args.out).with_context(|| {
        format!(
            "unsupported output extension '{}' (use .png, .jpg or .jpeg)",
            args.out.display()
        )
    })?;
    let settings = thumbkit::RenderSettings {
        font_dirs: args.font_dirs,
        system_fonts: !args.no_system_fonts,
        ..Default::default()
    };
    let renderer = thumbkit::ThumbnailRenderer::from_settings(settings);
    let (mut canvas, report) = renderer.render_with_report(&layout, subject.as_ref())?;
    for (index, reason) in report.skipped() {
        eprintln!("skipped element {index}: {reason}");
    }

    if args.border > 0 {
        let color = thumbkit::parse_hex(&args.border_color)
            .with_context(|| format!("invalid border color '{}'", args.border_color))?;
        thumbkit::add_border(&mut canvas, args.border, color);
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let opts = thumbkit::ExportOpts {
        format,
        jpeg_quality: args.jpeg_quality,
    };
    thumbkit::save(&canvas, &args.out, &opts)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.layout)
        .with_context(|| format!("read layout '{}'", args.layout.display()))?;
    let layout = match thumbkit::RawLayoutDocument::from_json_str(&json) {
        Ok(raw) => {
            let validated = thumbkit::validate_with_diagnostics(raw);
            for d in &validated.diagnostics {
                let tag = match d.severity {
                    thumbkit::Severity::Warning => "warning",
                    thumbkit::Severity::Info => "info",
                };
                eprintln!("{tag}: {d}");
            }
            validated.layout
        }
        Err(e) => {
            eprintln!("warning: {e}; using fallback layout");
            thumbkit::LayoutDocument::fallback()
        }
    };
    println!("{}", layout.to_json_pretty()?);
    Ok(())
}
