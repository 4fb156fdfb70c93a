//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sgames_core` linkage and
//!   schema bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use sgames_core::db::migrations::latest_version;
use sgames_core::db::open_db_in_memory;

fn main() {
    println!("sgames_core version={}", sgames_core::core_version());
    match open_db_in_memory() {
        Ok(_) => println!("db=ok schema_version={}", latest_version()),
        Err(err) => {
            eprintln!("db=error {err}");
            std::process::exit(1);
        }
    }
}
