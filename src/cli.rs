//! Command line options of the `birthday-book` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::store::DEFAULT_PATH;

/// A birthday book kept in a binary search tree
#[derive(Parser, Debug)]
#[command(name = "birthday-book")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File the menu saves to and loads from
    #[arg(short, long, env = "BIRTHDAY_BOOK_FILE", default_value = DEFAULT_PATH)]
    pub file: PathBuf,

    /// Turn debugging information on (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,
}
