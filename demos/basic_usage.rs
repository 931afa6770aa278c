//! Basic lodge usage example
//!
//! Demonstrates module-bound macros, the global proxy and explicit loggers,
//! all configured from the environment.
//!
//! Run with: cargo run --example basic_usage
//! Try:      LOG_ENV=DEV LOG_LEVEL=DEBUG cargo run --example basic_usage

use lodge::prelude::*;
use lodge::{debug, exception, global, info, warn, LOG};

fn main() -> Result<()> {
    println!("=== Lodge - Basic Usage Example ===\n");

    println!("1. Macros log under this module's name:");
    debug!("Only shown when LOG_LEVEL=DEBUG or BASIC_USAGE_LOG_LEVEL=DEBUG");
    info!("Service starting on port {}", 8080);
    warn!("Cache directory missing, using defaults");

    println!("\n2. The global proxy logs under the source file's name:");
    LOG.info("Hello from the global proxy");

    println!("\n3. Explicit loggers read <NAME>_LOG_LEVEL:");
    let db = get_logger("basic_usage.db")?;
    db.info("Connected (hidden when BASIC_USAGE_DB_LOG_LEVEL=ERROR)");
    db.error("Query timed out");

    println!("\n4. Errors with their cause chain:");
    if let Err(err) = "eighty".parse::<u16>() {
        exception!(err, "Invalid port in config");
    }

    global().flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
