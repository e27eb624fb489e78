use std::env;

use anyhow::Result;
use tree_outline::{run, Options};

fn main() -> Result<()> {
    // RUST_LOG=info prints a summary of the replayed script
    env_logger::init();

    let options = Options::parse(env::args().skip(1))?;
    print!("{}", run(&options)?);

    Ok(())
}
