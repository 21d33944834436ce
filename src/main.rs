use anyhow::Result;

use crate::config::SETTINGS;

pub mod config;
pub mod crawler;
pub mod declare;
pub mod event;
pub mod export;
pub mod logging;
pub mod util;

#[cfg(all(target_os = "linux", target_env = "musl"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::info_file_async(format!("quote crawler starts with {:?}", SETTINGS.quote));

    let result = event::quote::execute(&SETTINGS.quote).await;

    if let Err(why) = export::write_csv(&SETTINGS.quote.output_file, result.records()) {
        let msg = format!("Failed to export the quotes because {:?}", why);
        logging::error_console(msg.clone());
        logging::error_file_async(msg);
        return Err(why);
    }

    logging::info_console(format!("Data written to {}", SETTINGS.quote.output_file));

    Ok(())
}
