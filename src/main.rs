use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use liveimu::app::{build_animator, run_dashboard, run_headless};
use liveimu::inlet::{self, InletConfig};
use liveimu::surface::RecordingSurface;
use liveimu::DashboardConfig;

#[derive(Parser)]
#[command(author, version, about = "Live IMU stream dashboard")]
struct Args {
    /// Load the dashboard layout from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Use the built-in synthetic IMU generator
    #[arg(long, conflicts_with_all = ["stdin", "file", "tcp"])]
    synthetic: bool,
    /// Read one sample per line from stdin
    #[arg(long, conflicts_with_all = ["file", "tcp"])]
    stdin: bool,
    /// Read one sample per line from a file
    #[arg(long, conflicts_with = "tcp")]
    file: Option<PathBuf>,
    /// Read one sample per line from a TCP connection (host:port)
    #[arg(long)]
    tcp: Option<String>,
    /// Pull samples on a background thread
    #[arg(long, default_value_t = false)]
    background: bool,
    /// Run without a window, logging a summary per tick
    #[arg(long, default_value_t = false)]
    headless: bool,
    /// Number of ticks in headless mode
    #[arg(long, default_value_t = 100)]
    ticks: u64,
    /// Print the effective configuration as YAML and exit
    #[arg(long, default_value_t = false)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if args.synthetic {
        cfg.inlet = InletConfig::default();
    } else if args.stdin {
        cfg.inlet = InletConfig::Stdin;
    } else if let Some(path) = args.file {
        cfg.inlet = InletConfig::File { path };
    } else if let Some(address) = args.tcp {
        cfg.inlet = InletConfig::Tcp { address };
    }
    cfg.background_inlet |= args.background;

    if args.print_config {
        print!("{}", cfg.to_yaml()?);
        return Ok(());
    }

    cfg.validate().context("invalid dashboard configuration")?;
    let inlet = inlet::open(&cfg.inlet, cfg.background_inlet)?;

    if args.headless {
        let mut animator = build_animator(&cfg, inlet, RecordingSurface::keep_last(1))?;
        run_headless(&mut animator, args.ticks, |a| {
            if let Some(frame) = a.surface().last_frame() {
                let latest: Vec<String> = frame
                    .iter()
                    .map(|l| {
                        let y = l.ydata();
                        let newest = match a.channels().first().map(|c| c.order()) {
                            Some(liveimu::SeriesOrder::NewestFirst) => y.first(),
                            _ => y.last(),
                        };
                        format!("{}={:.2}", l.style.label, newest.copied().unwrap_or(f64::NAN))
                    })
                    .collect();
                log::info!("tick {}: {}", a.ticks(), latest.join(" "));
            }
        })?;
        return Ok(());
    }

    run_dashboard(cfg, inlet)
}
