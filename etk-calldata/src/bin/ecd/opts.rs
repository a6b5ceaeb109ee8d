use etk_cli::io::InputSource;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[clap(name = "ecd", about = "Decode and verify contract call data")]
pub struct Opts {
    #[clap(flatten)]
    pub src: InputSource,

    #[clap(
        long = "overlay",
        short = 'o',
        env = "ETK_4BYTE_OVERLAY",
        help = "path to a JSON signature table consulted after the built-in one"
    )]
    pub overlay: Option<PathBuf>,

    #[clap(
        long = "verbose",
        short = 'v',
        help = "print the selector, signature, and each argument on its own line"
    )]
    pub verbose: bool,
}
