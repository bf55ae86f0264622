//! pdfgate
//!
//! Signs and verifies PDF download URLs, runs the access chain against a
//! JSON fixture and resolves merge tags.
//!
//! Usage:
//!   pdfgate sign "https://example.org/?gpdf=1&pid=556690c67856b&lid=1"
//!   pdfgate check --fixture site.json --pdf 556690c67856b --entry 1 --user 3

use anyhow::Result;
use clap::{Parser, Subcommand};
use pdfgate_cli::{Fixture, check_access, form_tags, resolve_text, sign_url, signer_from_settings};
use pdfgate_mergetags::ResolveOptions;
use pdfgate_settings::Settings;
use pdfgate_signer::UrlSigner;
use pdfgate_types::{EntryId, FormId, UserId};
use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_CONFIG: &str = "pdfgate.toml";

#[derive(Parser, Debug)]
#[command(name = "pdfgate")]
#[command(about = "PDF access control and merge-tag tool")]
struct Args {
    /// Settings file (defaults to ./pdfgate.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append an expiry and signature to a URL
    Sign {
        url: String,
        /// Lifetime in seconds (defaults to the configured expiry)
        #[arg(long)]
        expires_in: Option<i64>,
    },
    /// Check a signed URL; exits 1 when it isn't valid
    Verify { url: String },
    /// Decide whether a requester may open an entry's PDF
    Check {
        #[arg(long)]
        fixture: PathBuf,
        #[arg(long)]
        pdf: String,
        #[arg(long)]
        entry: u64,
        /// Logged-in user id from the fixture; anonymous if omitted
        #[arg(long)]
        user: Option<u64>,
        #[arg(long)]
        ip: Option<IpAddr>,
        /// Full request URL, needed for signed-URL access
        #[arg(long)]
        url: Option<String>,
    },
    /// Replace merge tags in text with PDF URLs
    Resolve {
        #[arg(long)]
        fixture: PathBuf,
        #[arg(long)]
        entry: u64,
        /// Keep literal `&` in URLs instead of `&#038;`
        #[arg(long)]
        no_encode: bool,
        /// Drop the line break after tags that resolve to nothing
        #[arg(long)]
        strip_breaks: bool,
        text: String,
    },
    /// List the merge tags for a form as JSON
    Tags {
        #[arg(long)]
        fixture: PathBuf,
        #[arg(long)]
        form: u32,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let settings = match &args.config {
        Some(path) => Settings::read(path)?,
        None => Settings::load_from(DEFAULT_CONFIG),
    };
    debug!(?settings.site, ?settings.security, "settings loaded");

    match args.command {
        Command::Sign { url, expires_in } => {
            let signer = signer_from_settings(&settings)?;
            println!("{}", sign_url(&settings, &*signer, &url, expires_in)?);
        }
        Command::Verify { url } => {
            let signer = signer_from_settings(&settings)?;
            if signer.verify(&url) {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Check { fixture, pdf, entry, user, ip, url } => {
            let fixture = Fixture::load(&fixture)?;
            let signer = signer_from_settings(&settings)?;
            let ctx = fixture.context(user.map(UserId), ip, url.as_deref())?;
            match check_access(&settings, signer, &fixture, &pdf, EntryId(entry), &ctx) {
                Ok(authorized) => println!("allow: {}", authorized.pdf.name),
                Err(denied) => {
                    println!("deny: {}", denied.code());
                    if denied.needs_login() {
                        eprintln!("Log in to view this PDF.");
                    }
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Resolve { fixture, entry, no_encode, strip_breaks, text } => {
            let fixture = Fixture::load(&fixture)?;
            let options = ResolveOptions {
                encode: !no_encode,
                strip_trailing_break: strip_breaks,
            };
            println!("{}", resolve_text(&settings, &fixture, EntryId(entry), &text, options)?);
        }
        Command::Tags { fixture, form } => {
            let fixture = Fixture::load(&fixture)?;
            let tags = form_tags(&fixture, FormId(form))?;
            println!("{}", serde_json::to_string_pretty(&tags)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
