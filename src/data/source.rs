use anyhow::{Result, anyhow};

use crate::models::PriceSeries;

#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;

pub trait SeriesSource: Send + Sync {
    // Either load a series for `contract` OR return an anyhow::Error
    fn load(&self, contract: &str) -> Result<PriceSeries>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Tries each source in order and returns the first series that loads.
pub fn load_with_fallback(
    sources: &[Box<dyn SeriesSource>],
    contract: &str,
) -> Result<(PriceSeries, &'static str)> {
    for source in sources {
        match source.load(contract) {
            Ok(series) => {
                let signature = source.signature();
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_series_source {
                    log::debug!(
                        "{}: {} bars from {}",
                        contract,
                        series.len(),
                        signature
                    );
                }
                return Ok((series, signature));
            }
            Err(e) => {
                log::info!("{}: {} unavailable: {:#}", contract, source.signature(), e);
                // Continue to the next source
            }
        }
    }
    Err(anyhow!("All series sources failed for {}", contract))
}
