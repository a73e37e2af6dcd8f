use clap::Parser;

use crate::archive::{CompressionMode, RezipOptions};

#[derive(Parser, Debug)]
#[command(name = "rezip")]
#[command(version)]
#[command(about = "Read a ZIP archive from stdin and write it re-encoded to stdout", long_about = None)]
#[command(after_help = "Examples:\n  \
  rezip --store < in.zip > out.zip       store all entries uncompressed\n  \
  rezip -d < a.docx > a.norm.docx        reproducible output, metadata reset\n  \
  git config filter.rezip.clean \"rezip --store -d\"   use as a git clean filter")]
pub struct Cli {
    /// Store entries without compression (default: deflate)
    #[arg(long)]
    pub store: bool,

    /// Reset timestamps and attributes for byte-identical output
    #[arg(short = 'd', long)]
    pub deterministic: bool,

    /// List the re-encoded entries on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn compression(&self) -> CompressionMode {
        if self.store {
            CompressionMode::Store
        } else {
            CompressionMode::Deflate
        }
    }

    pub fn options(&self) -> RezipOptions {
        RezipOptions {
            compression: self.compression(),
            deterministic: self.deterministic,
        }
    }
}
