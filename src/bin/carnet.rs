use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use carnet::{Editor, EditorConfig, FormInputs, ImageKind, LoadOutcome};

#[derive(Parser, Debug)]
#[command(name = "carnet", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a card and export it as PNG.
    Render(RenderArgs),
    /// Print the layout-default form fields as JSON.
    Defaults,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Output directory for the PNG.
    #[arg(long)]
    out: PathBuf,

    /// Editor config JSON (card size, fonts).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Background template image.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Photo, drawn clipped to a circle.
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Logo image.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Form field assignment, e.g. `--set name="Ana López" --set fontSize=20`.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Fill name, position, department and a generated ID with sample data first.
    #[arg(long, default_value_t = false)]
    example: bool,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => EditorConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => EditorConfig::default(),
    };
    let mut editor = Editor::new(config).context("create editor")?;

    if args.example {
        editor.load_example_data();
    }
    for (key, value) in &args.set {
        editor
            .set_field(key, value.as_str())
            .with_context(|| format!("set field '{key}'"))?;
    }

    let images = [
        (ImageKind::Template, &args.template),
        (ImageKind::Photo, &args.photo),
        (ImageKind::Logo, &args.logo),
    ];
    for (kind, path) in images {
        let Some(path) = path else {
            continue;
        };
        editor
            .load_image(kind, path)
            .with_context(|| format!("load {kind} '{}'", path.display()))?;
    }
    for outcome in editor.wait_for_loads() {
        if let LoadOutcome::Failed {
            kind,
            file_name,
            error,
        } = outcome
        {
            return Err(error).with_context(|| format!("decode {kind} '{file_name}'"));
        }
    }

    let path = editor
        .export(Some(&args.out))
        .with_context(|| format!("export card into '{}'", args.out.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&FormInputs::layout_defaults())
        .context("serialize default fields")?;
    println!("{json}");
    Ok(())
}
