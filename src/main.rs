use clap::{Parser, Subcommand};
use proxysheet::profile::{PaperSize, Profile};
use proxysheet::types::{CardBatch, Quality, RenderOptions};
use proxysheet::{build_document, output};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Release builds report the crate version; anything else reports the
/// commit hash baked in by the build script.
fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // One small leak, once per process, to hand clap a 'static str.
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "proxysheet")]
#[command(about = "Print-and-cut PDF sheets for card game proxies")]
#[command(long_about = "\
Print-and-cut PDF sheets for card game proxies

Card images are tiled onto letter or A4 sheets with Silhouette Type-1
registration marks, fronts and backs alternating so that flipping the
printed stack on its short edge lines every back up with its front.

Input structure:

  deck/
  ├── 001-lightning-bolt.jpg       # Fronts, placed in filename order
  ├── 002-counterspell.png
  └── backs/                       # Optional, matched to fronts by file stem
      └── 001-lightning-bolt.jpg   # Back for the card of the same name

Cards without a matching back use --generic-back, or print blank.

Print the PDF at 100% scale (no fit-to-page), then feed the sheet to the
cutter with the filled square toward the machine's top-left.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the print-and-cut PDF from a directory of card images
    Build(BuildArgs),
    /// Print the geometry of every paper profile
    Profiles,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Directory of front images (jpg, png, webp), placed in filename order
    fronts: PathBuf,

    /// Directory of back images, matched to fronts by file stem
    #[arg(long)]
    backs: Option<PathBuf>,

    /// Back image for any card without its own back
    #[arg(long)]
    generic_back: Option<PathBuf>,

    /// Paper size: letter or a4
    #[arg(long, default_value = "letter")]
    paper: PaperSize,

    /// Pixels of bleed past each card slot edge (0 disables)
    #[arg(long, default_value_t = 10)]
    bleed: u32,

    /// JPEG quality for page encoding (1-100)
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// Output PDF path
    #[arg(long, default_value = "proxies.pdf")]
    out: PathBuf,

    /// Also write the JSON render report next to the PDF
    #[arg(long)]
    report: bool,

    /// Worker threads for page rendering (default: all cores)
    #[arg(long)]
    threads: Option<usize>,
}

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Image files in `dir`, sorted by filename.
fn image_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_image(p))
        .collect();
    files.sort();
    Ok(files)
}

/// Assemble the card batch from the front directory and optional back sources.
fn collect_batch(args: &BuildArgs) -> Result<CardBatch, Box<dyn std::error::Error>> {
    let front_paths = image_files(&args.fronts)?;

    let mut back_by_stem: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    if let Some(backs_dir) = &args.backs {
        for path in image_files(backs_dir)? {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                back_by_stem.insert(stem.to_string(), std::fs::read(&path)?);
            }
        }
    }

    let mut fronts = Vec::with_capacity(front_paths.len());
    let mut backs = Vec::with_capacity(front_paths.len());
    for path in &front_paths {
        fronts.push(std::fs::read(path)?);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        backs.push(back_by_stem.get(stem).cloned());
    }

    let generic_back = match &args.generic_back {
        Some(path) => Some(std::fs::read(path)?),
        None => None,
    };

    Ok(CardBatch {
        fronts,
        backs,
        generic_back,
    })
}

fn init_thread_pool(threads: Option<usize>) {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => {
            init_thread_pool(args.threads);
            let batch = collect_batch(&args)?;
            let options = RenderOptions {
                bleed: args.bleed,
                quality: Quality::new(args.quality),
            };

            let built = build_document(&batch, args.paper, &options)?;
            std::fs::write(&args.out, &built.pdf)?;

            if args.report {
                let report_path = args.out.with_extension("report.json");
                std::fs::write(&report_path, built.report.to_json()?)?;
            }
            output::print_build_summary(&built.report, &args.out, built.pdf.len());
        }
        Command::Profiles => {
            let profiles = PaperSize::ALL
                .iter()
                .map(|&paper| Profile::new(paper))
                .collect::<Result<Vec<_>, _>>()?;
            output::print_profiles(profiles.iter());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_jpeg(path: &Path) {
        let img = image::RgbImage::from_pixel(20, 28, image::Rgb([90, 90, 120]));
        img.save(path).unwrap();
    }

    #[test]
    fn collect_batch_orders_fronts_and_matches_backs_by_stem() {
        let tmp = tempfile::TempDir::new().unwrap();
        let fronts = tmp.path().join("fronts");
        let backs = tmp.path().join("backs");
        std::fs::create_dir_all(&fronts).unwrap();
        std::fs::create_dir_all(&backs).unwrap();

        write_jpeg(&fronts.join("002-beta.jpg"));
        write_jpeg(&fronts.join("001-alpha.jpg"));
        write_jpeg(&backs.join("002-beta.jpg"));
        std::fs::write(fronts.join("notes.txt"), "ignored").unwrap();

        let args = BuildArgs {
            fronts,
            backs: Some(backs),
            generic_back: None,
            paper: PaperSize::Letter,
            bleed: 10,
            quality: 90,
            out: PathBuf::from("proxies.pdf"),
            report: false,
            threads: None,
        };
        let batch = collect_batch(&args).unwrap();

        assert_eq!(batch.len(), 2);
        // 001-alpha sorts first and has no back; 002-beta has one.
        assert!(batch.backs[0].is_none());
        assert!(batch.backs[1].is_some());
        assert!(batch.generic_back.is_none());
    }

    #[test]
    fn image_files_skips_non_images() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_jpeg(&tmp.path().join("card.jpg"));
        std::fs::write(tmp.path().join("card.pdf"), "not art").unwrap();
        std::fs::write(tmp.path().join("README.md"), "docs").unwrap();

        let files = image_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn cli_parses_build_flags() {
        let cli = Cli::parse_from([
            "proxysheet", "build", "deck", "--paper", "a4", "--bleed", "0", "--quality", "85",
        ]);
        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.paper, PaperSize::A4);
                assert_eq!(args.bleed, 0);
                assert_eq!(args.quality, 85);
                assert_eq!(args.out, PathBuf::from("proxies.pdf"));
            }
            _ => panic!("expected build subcommand"),
        }
    }
}
