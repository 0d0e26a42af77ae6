use std::path::PathBuf;
#[cfg(feature = "server")]
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use certpress::{CertificateRequest, Compositor, CompositorConfig, FontPaths, SvgCompositor};

#[derive(Parser)]
#[command(
    name = "certpress",
    version,
    about = "Render certificate images from a template and a text overlay"
)]
struct Cli {
    /// Verbose logging (equivalent to RUST_LOG=certpress=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CompositorArgs {
    /// Background template PNG
    #[arg(long, default_value = "assets/template.png")]
    template: PathBuf,

    /// Calligraphic font for the headline name
    #[arg(long)]
    display_font: Option<PathBuf>,

    /// Handwriting font for the in-text name
    #[arg(long)]
    body_script_font: Option<PathBuf>,

    /// Script font for the signature line
    #[arg(long)]
    signature_font: Option<PathBuf>,

    /// Do not load system fonts for the generic fallback families
    #[arg(long)]
    no_system_fonts: bool,

    /// Maximum concurrent rasterizations
    #[arg(long, default_value_t = 1)]
    max_concurrent_renders: usize,
}

impl CompositorArgs {
    fn into_config(self) -> CompositorConfig {
        let defaults = CompositorConfig::default();
        CompositorConfig {
            template_path: self.template,
            font_paths: FontPaths {
                display: self.display_font.or(defaults.font_paths.display),
                body_script: self.body_script_font.or(defaults.font_paths.body_script),
                signature: self.signature_font.or(defaults.font_paths.signature),
            },
            load_system_fonts: !self.no_system_fonts,
            max_concurrent_renders: self.max_concurrent_renders,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Render a single certificate to a file
    Render {
        #[command(flatten)]
        compositor: CompositorArgs,

        /// Recipient name
        #[arg(long)]
        student_name: String,

        /// Issuing organization name
        #[arg(long)]
        ngo_name: String,

        /// Certificate body text
        #[arg(long)]
        contents: String,

        /// Displayable date text
        #[arg(long)]
        date: String,

        /// Signature text (optional)
        #[arg(long, default_value = "")]
        ngo_signature: String,

        /// Output file
        #[arg(short, long, default_value = "certificate.png")]
        out: PathBuf,
    },

    /// Serve the certificate endpoint over HTTP
    #[cfg(feature = "server")]
    Serve {
        #[command(flatten)]
        compositor: CompositorArgs,

        /// Bind address
        #[arg(long, default_value = "127.0.0.1:8087")]
        bind: String,

        /// Request worker threads (defaults to the CPU count)
        #[arg(long)]
        workers: Option<usize>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "certpress=debug,info"
    } else {
        "certpress=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render {
            compositor,
            student_name,
            ngo_name,
            contents,
            date,
            ngo_signature,
            out,
        } => {
            let compositor = SvgCompositor::new(compositor.into_config())
                .context("failed to set up compositor")?;
            let request = CertificateRequest {
                student_name,
                ngo_name,
                contents,
                date,
                ngo_signature,
            };
            let image = compositor
                .render(&request)
                .context("failed to render certificate")?;
            std::fs::write(&out, &image.png_data)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!(
                "wrote {} ({}x{}, {} bytes)",
                out.display(),
                image.width,
                image.height,
                image.png_data.len()
            );
        }

        #[cfg(feature = "server")]
        Command::Serve {
            compositor,
            bind,
            workers,
        } => {
            let config = certpress::server::ServerConfig {
                bind_addr: bind,
                worker_threads: workers.unwrap_or_else(num_cpus::get),
                ..Default::default()
            };
            let compositor = Arc::new(
                SvgCompositor::new(compositor.into_config())
                    .context("failed to set up compositor")?,
            );
            certpress::server::serve(config, compositor).context("server terminated")?;
        }
    }

    Ok(())
}
