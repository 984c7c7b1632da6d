#![allow(clippy::multiple_crate_versions)]

//! Pinboard - masonry feed layout with viewport-driven incremental loading.
//!
//! This binary is the command-line front end of `pinboard_lib`.

fn main() {
    if let Err(err) = pinboard_lib::cli::run() {
        eprintln!("pinboard: {err}");
        std::process::exit(1);
    }
}
