//! Configuration file loading.
//!
//! An optional TOML file overrides the catalog references and policies:
//!
//! ```toml
//! [catalog]
//! sku = "Gift Card"
//! netsuite_id = "2282"
//! non_taxable_tax_code = -7
//! offset_netsuite_id = "18973"
//!
//! [policy]
//! gift_payments = "emit_offset"
//! non_finite_tax = "non_taxable"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use orderline_model::CatalogConfig;
use orderline_normalization::{GiftPaymentPolicy, NonFiniteTaxPolicy, SynthesisContext};
use serde::{Deserialize, Serialize};

use crate::cli::NormalizeArgs;

/// Contents of a configuration file. Every table and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub catalog: CatalogConfig,
    pub policy: PolicyConfig,
}

/// Policy table of the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub gift_payments: GiftPaymentPolicy,
    pub non_finite_tax: NonFiniteTaxPolicy,
}

impl FileConfig {
    /// Build the synthesis context, applying command-line overrides.
    pub fn into_context(self, args: &NormalizeArgs, log_data: bool) -> SynthesisContext {
        let gift_payments = if args.emit_gift_offsets {
            GiftPaymentPolicy::EmitOffset
        } else {
            self.policy.gift_payments
        };
        let non_finite_tax = args
            .non_finite_tax
            .map_or(self.policy.non_finite_tax, NonFiniteTaxPolicy::from);

        SynthesisContext::new(self.catalog)
            .with_gift_payments(gift_payments)
            .with_non_finite_tax(non_finite_tax)
            .with_log_data(log_data)
    }
}

/// Load the configuration file, or defaults when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        tracing::debug!("No config file given, using defaults");
        return Ok(FileConfig::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("parse config file {}", path.display()))?;
    tracing::info!(path = %path.display(), catalog = %config.catalog, "Loaded config file");
    Ok(config)
}
