// Copyright (c) 2026 The pintan Developers

//! Command line utility for inspecting PIN/TAN bank parameters and replies

use clap::Parser;
use log::{debug, info, warn, LevelFilter};

use pintan_core::{
    flicker,
    passport::{Passport, TanMethod},
};
use pintan_proto::prelude::*;

mod helpers;
use helpers::*;

/// PIN/TAN command line utility
#[derive(Clone, PartialEq, Debug, Parser)]
struct Options {
    /// Passport configuration file (TOML)
    #[clap(long)]
    config: Option<String>,

    /// Subcommand to execute
    #[clap(subcommand)]
    cmd: Actions,

    /// Enable verbose logging
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, PartialEq, Debug, Parser)]
#[non_exhaustive]
enum Actions {
    /// List TAN methods announced in bank parameter data
    Methods {
        /// Bank parameter data file (`.json` or `key=value`)
        #[clap(long)]
        bpd: String,

        /// User parameter data file
        #[clap(long)]
        upd: Option<String>,
    },

    /// Select a TAN method interactively
    Select {
        /// Bank parameter data file
        #[clap(long)]
        bpd: String,

        /// Method ids the user is enrolled for
        #[clap(long)]
        enrolled: Vec<String>,
    },

    /// Print return codes from a reply data file
    Status {
        /// Reply data file
        #[clap(long)]
        reply: String,
    },

    /// Decode a challenge to a renderable flicker code
    Flicker {
        /// Challenge text (may embed the code between `CHLGUC` and `CHLGTEXT`)
        #[clap(long)]
        challenge: Option<String>,

        /// Optical challenge payload
        #[clap(long)]
        hhd_uc: Option<String>,
    },

    /// Compute the order hash of an encoded segment
    Hash {
        /// Order hash mode (`1`: RIPEMD-160, `2`: SHA-1)
        #[clap(long, default_value = "2")]
        mode: String,

        /// Encoded segment
        segment: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Options::parse();

    // Setup logging
    let _ = simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default());

    // Load passport configuration
    let config = read_config(args.config.as_deref()).await?;
    debug!("Using config: {:?}", config);

    debug!("Executing command: {:?}", args.cmd);

    match args.cmd {
        Actions::Methods { bpd, upd } => {
            let mut p = Passport::new(StdinDriver, config);
            p.set_bpd(read_data(&bpd).await?);
            if let Some(upd) = upd {
                p.set_upd(read_data(&upd).await?);
            }

            info!("TAN methods:");
            for m in p.catalog().iter() {
                print_method(m);
            }

            info!("one-step allowed: {}", p.is_one_step_allowed());

            match p.is_supported() {
                Ok(v) => info!("PIN/TAN supported: {}", v),
                Err(e) => warn!("support check failed: {}", e),
            }
        }
        Actions::Select { bpd, enrolled } => {
            let mut p = Passport::new(StdinDriver, config);
            p.set_bpd(read_data(&bpd).await?);
            p.set_enrolled(enrolled);

            let id = p.current_method(true)?;

            info!(
                "selected method: {} ({})",
                id,
                match p.is_auto_selected() {
                    true => "automatic",
                    false => "user choice",
                }
            );
        }
        Actions::Status { reply } => {
            let status = ReplyStatus::parse(read_data(&reply).await?);

            for rv in status.all() {
                info!("{} {}", rv.severity, rv);
            }

            match status.is_ok() {
                true => info!("reply ok"),
                false => warn!("reply carries errors"),
            }

            if let Some(rv) = status.auth_failure() {
                warn!("authentication failed: {}", rv);
            }
        }
        Actions::Flicker { challenge, hhd_uc } => {
            match flicker::decode(hhd_uc.as_deref(), challenge.as_deref()) {
                Some(code) => info!("flicker code: {}", code),
                None => warn!("no flicker code found"),
            }
        }
        Actions::Hash { mode, segment } => {
            let m = OrderHashMode::from_code(&mode)
                .ok_or_else(|| anyhow::anyhow!("unknown order hash mode: '{}'", mode))?;

            info!("{} order hash: {}", m, hex::encode(m.digest(segment.as_bytes())));
        }
    }

    Ok(())
}

fn print_method(m: &TanMethod) {
    info!(
        "  {}: {} (HKTAN{}, process {}, {})",
        m.id,
        m.name(),
        m.seg_version,
        m.variant(),
        m.input_info()
    );
}
