use clap::{Parser, Subcommand};
use plaza_assets::{FontFace, load_phrases};
use plaza_render::{OrbitCamera, Renderer, SummaryRenderer};
use plaza_scene::{Scene, builder};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plaza-cli", about = "CLI tool for phrase plaza operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Validate a phrase data file and a typeface file
    Validate {
        /// Phrase data file ({title, votes} records)
        #[arg(long, default_value = "./assets/data/phrases.json")]
        phrases: String,
        /// Typeface JSON file
        #[arg(long, default_value = "./assets/data/typeface.json")]
        font: String,
    },
    /// Build the scene headlessly and print its layout
    Layout {
        /// Phrase data file ({title, votes} records)
        #[arg(long, default_value = "./assets/data/phrases.json")]
        phrases: String,
        /// Typeface JSON file
        #[arg(long, default_value = "./assets/data/typeface.json")]
        font: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("plaza-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", plaza_render::crate_info());
        }
        Commands::Validate { phrases, font } => {
            let entries = load_phrases(&phrases)?;
            println!("{}: {} phrase entries, all valid", phrases, entries.len());

            let face = FontFace::load(&font)?;
            println!(
                "{}: family {:?}, {} glyphs",
                font,
                face.family,
                face.glyph_count()
            );
            for entry in &entries {
                let width = face.measure(&entry.title, 30.0);
                println!("  {:<24} votes={:<8} width={width:.1}", entry.title, entry.vote_label());
            }
        }
        Commands::Layout { phrases, font } => {
            let entries = load_phrases(&phrases)?;
            let face = FontFace::load(&font)?;

            let mut scene = Scene::new();
            builder::setup_environment(&mut scene);
            builder::build_sky(&mut scene, None);
            builder::build_floor(&mut scene, None);
            builder::build_label_ring(&mut scene, &entries, &face)?;
            builder::build_signage(&mut scene, 400.0, 400.0, 12.0, None)?;

            let summary = SummaryRenderer::new().render(&scene, &OrbitCamera::default());
            print!("{summary}");
        }
    }

    Ok(())
}
