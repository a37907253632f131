use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "videogen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the template catalog.
    List,
    /// Print a template's default parameters as JSON.
    Defaults(TemplateArgs),
    /// Check a parameter file against a template's schema.
    Validate(ParamsArgs),
    /// Print the render tree of one frame as JSON.
    Eval(EvalArgs),
    /// Render a single frame as a PNG (or SVG).
    Frame(FrameArgs),
    /// Simulate generating the full video and print the artifact reference.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    /// Template id, e.g. `birthday`.
    #[arg(long)]
    template: String,
}

#[derive(Parser, Debug)]
struct ParamsArgs {
    /// Template id, e.g. `birthday`.
    #[arg(long)]
    template: String,

    /// Parameter JSON file; the template defaults when omitted.
    #[arg(long)]
    params: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    #[command(flatten)]
    input: ParamsArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: ParamsArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Write the SVG document instead of rasterizing it.
    #[arg(long)]
    svg: bool,

    /// Skip loading system fonts (text is not drawn).
    #[arg(long)]
    no_system_fonts: bool,

    /// Print diagnostics about font resolution (fontdb face count + text node count).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    input: ParamsArgs,

    /// Evaluate frames on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker count for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Defaults(args) => cmd_defaults(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Generate(args) => cmd_generate(args),
    }
}

fn read_params(args: &ParamsArgs) -> anyhow::Result<videogen::ParameterSet> {
    let Some(path) = &args.params else {
        return Ok(videogen::defaults(&args.template)?);
    };
    read_params_json(path)
}

fn read_params_json(path: &Path) -> anyhow::Result<videogen::ParameterSet> {
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let r = BufReader::new(f);
    let params: videogen::ParameterSet =
        serde_json::from_reader(r).with_context(|| "parse params JSON (expected an object)")?;
    Ok(params)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{s}");
    Ok(())
}

fn cmd_list() -> anyhow::Result<()> {
    for t in videogen::list() {
        println!(
            "{} {:<18} {:<10} {:>3}s  {:>9}  {}",
            t.icon(),
            t.id,
            t.name,
            t.duration_secs(),
            t.resolution(),
            t.price
        );
    }
    Ok(())
}

fn cmd_defaults(args: TemplateArgs) -> anyhow::Result<()> {
    let params = videogen::defaults(&args.template)?;
    print_json(&params)
}

fn cmd_validate(args: ParamsArgs) -> anyhow::Result<()> {
    let template = videogen::lookup(&args.template)?;
    let params = read_params(&args)?;
    match template.kind.schema().check(&params) {
        Ok(()) => {
            // Schema passed; typed conversion can still reject e.g. non-finite numbers.
            template.validate(&params)?;
            eprintln!("ok: parameters are valid for '{}'", template.id);
            Ok(())
        }
        Err(errs) => {
            for e in &errs.errors {
                eprintln!("  {e}");
            }
            anyhow::bail!("{} validation error(s) for '{}'", errs.errors.len(), template.id)
        }
    }
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let params = read_params(&args.input)?;
    let tree = videogen::evaluate(&args.input.template, videogen::FrameIndex(args.frame), &params)?;
    print_json(&tree)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let params = read_params(&args.input)?;
    let tree = videogen::evaluate(&args.input.template, videogen::FrameIndex(args.frame), &params)?;
    let svg = videogen::to_svg(&tree);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    if args.svg {
        std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
        eprintln!("wrote {}", args.out.display());
        return Ok(());
    }

    let rasterizer = videogen::Rasterizer::new(&videogen::RasterOpts {
        system_fonts: !args.no_system_fonts,
        ..Default::default()
    });
    if args.dump_fonts {
        dump_font_diagnostics(&rasterizer, &svg)?;
    }

    let frame = rasterizer.render_svg(&svg, tree.canvas.width, tree.canvas.height)?;
    let rgba = frame.to_straight_alpha();

    image::save_buffer_with_format(
        &args.out,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let params = read_params(&args.input)?;
    let threading = videogen::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
        static_frame_elision: false,
    };
    let artifact = videogen::generate(&args.input.template, &params, &threading)?;
    print_json(&artifact)
}

fn dump_font_diagnostics(rasterizer: &videogen::Rasterizer, svg: &str) -> anyhow::Result<()> {
    let tree = rasterizer.parse_svg(svg)?;
    eprintln!("font diagnostics:");
    eprintln!("  font_faces:   {}", rasterizer.font_faces());
    eprintln!("  text_nodes:   {}", count_svg_text_nodes(tree.root()));
    Ok(())
}

fn count_svg_text_nodes(group: &usvg::Group) -> usize {
    let mut n = 0usize;
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => n += count_svg_text_nodes(g.as_ref()),
            usvg::Node::Text(_) => n += 1,
            usvg::Node::Path(_) | usvg::Node::Image(_) => {}
        }
    }
    n
}
