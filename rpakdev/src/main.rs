use rpak_core::pack::create::CreateOptions;
use rpak_core::{create, extract, list};

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about = "rpakdev CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a directory tree into a new archive
    Pack {
        source: PathBuf,
        out: PathBuf,

        /// Container format version (2 or 3)
        #[arg(long, default_value_t = 3)]
        version: u8,

        /// Index obfuscation key as hex, e.g. deadbeef
        #[arg(long, default_value = "deadbeef")]
        key: String,

        /// Write progress snapshots to this file
        #[arg(long)]
        progress: Option<PathBuf>,
    },

    /// Extract an archive to a destination directory
    Extract {
        archive: PathBuf,
        dest: PathBuf,

        /// Write progress snapshots to this file
        #[arg(long)]
        progress: Option<PathBuf>,
    },

    /// List archive contents
    List { archive: PathBuf },
}

fn parse_key(hex: &str) -> Result<u32, String> {
    let h = hex.trim_start_matches("0x");
    u32::from_str_radix(h, 16).map_err(|e| format!("bad key {hex:?}: {e}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let ok = match cli.command {
        Commands::Pack {
            source,
            out,
            version,
            key,
            progress,
        } => {
            let key = match parse_key(&key) {
                Ok(k) => k,
                Err(e) => {
                    eprintln!("{e}");
                    return ExitCode::FAILURE;
                }
            };
            let res = create(
                &source,
                &out,
                CreateOptions { version, key },
                progress.as_deref(),
            );
            if res.success {
                println!("{}", res.message);
            } else {
                eprintln!("{}", res.message);
            }
            res.success
        }

        Commands::Extract {
            archive,
            dest,
            progress,
        } => {
            let res = extract(&archive, &dest, progress.as_deref());
            if res.success {
                println!("{}", res.message);
            } else {
                eprintln!("{}", res.message);
            }
            res.success
        }

        Commands::List { archive } => {
            let res = list(&archive);
            for f in &res.files {
                println!("{f}");
            }
            if res.success {
                println!("{} (version {})", res.message, res.version);
            } else {
                eprintln!("{}", res.message);
            }
            res.success
        }
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
