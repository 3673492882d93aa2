pub mod archive;
pub mod cli;
pub mod compression;
pub mod config;
pub mod remote;
pub mod sync;
pub mod timestamp;

#[cfg(test)]
mod test_utils;

fn main() {
    if let Err(err) = cli::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
