use clap::{Parser, Subcommand};
use pinzoro_site::{assets, config, content, generate, output};
use std::path::PathBuf;

/// Shared flags for commands that read `public/`.
#[derive(clap::Args, Clone)]
struct PublicArgs {
    /// Directory of static files served at the asset root (images, icons)
    #[arg(long, default_value = "public")]
    public: PathBuf,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "pinzoro-site")]
#[command(about = "Static site generator for the PINZORO website")]
#[command(long_about = "\
Static site generator for the PINZORO website

Copy and the shop list are data; images follow a naming convention. The
generator renders the home and company pages with the interactive widgets
(carousels, shop pager, image viewer, QR popup) in their first-paint state
and ships a small runtime script that takes over in the browser.

Source structure:

  site/
  ├── config.toml      # Site metadata, breakpoints, timings, colors (optional)
  └── content.toml     # All page copy and the shop table (optional)

  public/
  ├── logo.png, favicon.ico, icon.jpg, back.jpg
  ├── staff/fun1.jpg … staff/fun4.jpg      # environment carousel
  ├── staff/staff1.jpg … staff/staff5.jpg  # staff carousel
  └── shop1.jpg, shop1_qr.png …            # one photo and QR code per shop

Missing config.toml or content.toml fall back to the stock files; run
'pinzoro-site gen-config' or 'pinzoro-site gen-content' to start from them.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding config.toml and content.toml
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site and copy public files into the output directory
    Build(PublicArgs),
    /// Validate config and content, and check that every convention image exists
    Check(PublicArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the stock content.toml
    GenContent,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => {
            println!("==> Loading {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let site_content = content::load_content(&cli.source)?;
            output::print_content_summary(&site_content);

            println!("==> Generating HTML → {}", cli.output.display());
            let report =
                generate::build_site(&site_config, &site_content, &args.public, &cli.output)?;
            output::print_build_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check(args) => {
            println!("==> Checking {}", cli.source.display());
            config::load_config(&cli.source)?;
            let site_content = content::load_content(&cli.source)?;
            output::print_content_summary(&site_content);
            println!("==> Content is valid");

            println!("==> Probing {}", args.public.display());
            let statuses = assets::probe_assets(&args.public, &site_content.asset_refs());
            output::print_check_output(&statuses);
            let failed = statuses.iter().filter(|s| !s.is_ok()).count();
            if failed > 0 {
                return Err(format!("{failed} expected assets missing or unreadable").into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenContent => {
            print!("{}", content::stock_content_toml());
        }
    }

    Ok(())
}
