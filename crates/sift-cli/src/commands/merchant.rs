//! Merchant extraction for a single narration

use anyhow::Result;
use sift_core::MerchantExtractor;

pub fn cmd_merchant(narration: &str) -> Result<()> {
    let found = MerchantExtractor::shared().explain(narration);

    println!("🏪 {}", found.merchant);
    println!("   Rule: {}", found.rule);

    Ok(())
}
