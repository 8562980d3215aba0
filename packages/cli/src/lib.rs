//! tagfs - read a provider metadata document as a file tree
//!
//! Loads a DigitalOcean v1 metadata document, mounts it, and prints the
//! content of each requested path, one after another.
//!
//! ```text
//! $ tagfs --input droplet.json /dns/nameservers
//! 2001:4860:4860::8844
//! 2001:4860:4860::8888
//! 8.8.8.8
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::debug;
use tagfs_metadata::digitalocean::{self, DigitalOceanMetadata, Droplet};
use tagfs_record::Record;
use tagfs_vfs::Mount;

/// tagfs - browse instance metadata as files
#[derive(Parser, Debug)]
#[command(name = "tagfs")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Metadata JSON document to mount
    #[arg(short, long, env = "TAGFS_INPUT")]
    pub input: PathBuf,

    /// Tag key naming the path segments
    #[arg(short, long, env = "TAGFS_TAG", default_value = digitalocean::TAG)]
    pub tag: String,

    /// Mount the whole provider tree, rooted above /metadata/v1
    #[arg(long)]
    pub provider_tree: bool,

    /// Print mode, size and name instead of content
    #[arg(short = 'l', long)]
    pub stat: bool,

    /// Paths to read
    #[arg(default_value = "/")]
    pub paths: Vec<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Metadata(#[from] tagfs_metadata::Error),

    #[error(transparent)]
    Open(#[from] tagfs_vfs::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Mount the document named by `args` and print every requested path to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), Error> {
    let json = fs::read(&args.input).map_err(|source| Error::Read {
        path: args.input.clone(),
        source,
    })?;
    let droplet = Droplet::from_json(&json)?;
    debug!("loaded droplet {} from {}", droplet.droplet_id, args.input.display());

    if args.provider_tree {
        let tree = DigitalOceanMetadata::new(droplet);
        print_paths(&Mount::new(tree, &args.tag), args, out)
    } else {
        print_paths(&Mount::new(droplet, &args.tag), args, out)
    }
}

fn print_paths<R: Record>(
    mount: &Mount<R>,
    args: &Args,
    out: &mut impl Write,
) -> Result<(), Error> {
    for path in &args.paths {
        let mut file = mount.open(path)?;
        if args.stat {
            let meta = file.metadata();
            writeln!(out, "{} {:>6} {}", meta.mode(), meta.len(), meta.name())?;
        } else {
            io::copy(&mut file, out)?;
            writeln!(out)?;
        }
        file.close()?;
    }
    Ok(())
}
