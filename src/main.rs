//! iconsprite CLI
//!
//! Usage:
//!   iconsprite [OPTIONS] [MANIFEST]
//!
//! Options:
//!   -d, --directory <DIR>   Base directory for relative SVG paths
//!   -s, --symbol <HANDLE>   Print one symbol's markup instead of the sheet
//!       --width <VALUE>     Display width for --symbol
//!       --height <VALUE>    Display height for --symbol
//!   -h, --help              Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use iconsprite::{AttributeMap, Sprite, SpriteConfig, SpriteManifest};

#[derive(Parser)]
#[command(name = "iconsprite")]
#[command(about = "Compose SVG icon files into a sanitized sprite sheet")]
struct Cli {
    /// Manifest file (reads from stdin if not provided)
    manifest: Option<PathBuf>,

    /// Base directory for relative SVG paths (defaults to the manifest's directory)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Print the markup for a single symbol instead of the sprite sheet
    #[arg(short, long)]
    symbol: Option<String>,

    /// Display width for --symbol
    #[arg(long)]
    width: Option<String>,

    /// Display height for --symbol
    #[arg(long)]
    height: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    // If no manifest and stdin is a terminal (interactive), show intro help
    if cli.manifest.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let manifest = match &cli.manifest {
        Some(path) => match SpriteManifest::from_file(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                eprintln!("Error loading manifest '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            match SpriteManifest::from_str(&buffer) {
                Ok(manifest) => manifest,
                Err(e) => {
                    eprintln!("Error parsing manifest: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    // Relative asset paths resolve against, in order: --directory, the
    // manifest's own [sprite] directory, the manifest file's parent.
    let directory = cli
        .directory
        .clone()
        .or_else(|| manifest.directory.clone())
        .or_else(|| {
            cli.manifest
                .as_ref()
                .and_then(|path| path.parent().map(PathBuf::from))
        })
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = SpriteConfig::new().with_svg_directory(directory);
    for (name, value) in &manifest.global_attributes {
        config = config.with_global_attribute(name.as_str(), value.as_str());
    }

    let mut sprite = Sprite::new(config);
    for asset in manifest.assets {
        let handle = asset.handle.clone();
        let gated = !asset.condition;
        if let Err(e) = sprite.add_asset(asset) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        if !gated && sprite.get_asset(&handle).is_none() {
            eprintln!("Warning: asset '{}' could not be loaded, skipping", handle);
        }
    }

    match &cli.symbol {
        Some(handle) => {
            let mut overrides = AttributeMap::new();
            if let Some(width) = &cli.width {
                overrides.insert("width".into(), width.clone());
            }
            if let Some(height) = &cli.height {
                overrides.insert("height".into(), height.clone());
            }
            let markup = sprite.render_symbol(handle, &overrides);
            if markup.is_empty() {
                eprintln!("Error: no symbol in the sprite for handle '{}'", handle);
                std::process::exit(1);
            }
            println!("{}", markup);
        }
        None => println!("{}", sprite.sheet()),
    }
}

fn print_intro() {
    println!(
        r#"iconsprite - compose SVG icon files into a sanitized sprite sheet

USAGE:
    iconsprite [OPTIONS] [MANIFEST]
    cat sprite.toml | iconsprite

OPTIONS:
    -d, --directory <DIR>   Base directory for relative SVG paths
    -s, --symbol <HANDLE>   Print one symbol's markup instead of the sheet
        --width <VALUE>     Display width for --symbol
        --height <VALUE>    Display height for --symbol
    -h, --help              Print help

MANIFEST:
    [sprite]
    directory = "icons"

    [sprite.global_attributes]
    class = "icon"

    [[asset]]
    handle = "menu"
    src = "menu.svg"

QUICK START:
    iconsprite sprite.toml > sprite.html
    iconsprite sprite.toml --symbol menu --height 16"#
    );
}
