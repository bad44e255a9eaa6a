//! pagerdb - inspect and edit page files from the command line

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use log::info;
use pagerdb::config::PagerConfig;
use pagerdb::storage::{PageId, Pager};
use std::path::PathBuf;

/// pagerdb - page-granular access to a file
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Page size in bytes (defaults to PAGERDB_PAGE_SIZE or 4096)
    #[arg(short, long, global = true)]
    page_size: Option<usize>,

    /// Open the file read-only
    #[arg(long, global = true)]
    read_only: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show page size, page count and store size
    Info { file: PathBuf },

    /// Append N pages and print the id of the first one
    Alloc { file: PathBuf, n: u64 },

    /// Release N pages from the end of the file
    Free { file: PathBuf, n: u64 },

    /// Hex dump one page
    Read {
        file: PathBuf,
        id: u64,

        /// Only dump the first LEN bytes
        #[arg(short, long)]
        len: Option<usize>,
    },

    /// Write TEXT at the start of a page
    Write {
        file: PathBuf,
        id: u64,
        text: String,
    },
}

impl Command {
    fn file(&self) -> &PathBuf {
        match self {
            Command::Info { file }
            | Command::Alloc { file, .. }
            | Command::Free { file, .. }
            | Command::Read { file, .. }
            | Command::Write { file, .. } => file,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = PagerConfig::from_env();
    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }
    if args.read_only {
        config = config.with_read_only(true);
    }

    let file = args.command.file();
    let mut pager = Pager::open(file, &config)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    info!("{}", pager);

    match &args.command {
        Command::Info { .. } => {
            println!("{}", pager);
            println!("store size: {} bytes", pager.store_size());
        }
        Command::Alloc { n, .. } => {
            let id = pager.alloc(*n).context("Failed to allocate pages")?;
            println!("{}", id);
        }
        Command::Free { n, .. } => {
            pager.free(*n).context("Failed to free pages")?;
            println!("{}", pager.count());
        }
        Command::Read { id, len, .. } => {
            let page = pager
                .read(PageId(*id))
                .with_context(|| format!("Failed to read page {}", id))?;
            let len = len.unwrap_or(page.len()).min(page.len());
            print!("{}", hex_dump(&page[..len]));
        }
        Command::Write { id, text, .. } => {
            pager
                .write(PageId(*id), text.as_bytes())
                .with_context(|| format!("Failed to write page {}", id))?;
        }
    }

    info!("{}", pager.stats());
    pager.close().context("Failed to close pager")?;
    Ok(())
}

fn hex_dump(data: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in data.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
            .collect();
        out.push_str(&format!("{:08x}  {:<47}  {}\n", i * 16, hex.join(" "), ascii));
    }
    out
}
