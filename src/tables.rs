//! Pricing tables: the catalog and discount rules as one unit.
//!
//! The compiled-in tables are used by default. Tables can also be exported to
//! and loaded from a JSON file, which is validated before use.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::catalog::PriceCatalog;
use crate::discount::DiscountRules;
use crate::error::QuoteError;

static BUILTIN: LazyLock<PricingTables> = LazyLock::new(PricingTables::builtin);

/// Shared, immutable copy of the compiled-in tables
pub fn builtin_tables() -> &'static PricingTables {
    &BUILTIN
}

/// Catalog and discount rules consulted by the price calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingTables {
    pub catalog: PriceCatalog,
    pub discounts: DiscountRules,
}

impl PricingTables {
    pub fn builtin() -> Self {
        Self {
            catalog: PriceCatalog::builtin(),
            discounts: DiscountRules::builtin(),
        }
    }

    /// Parse tables from JSON and validate them
    pub fn from_json_str(json: &str) -> crate::error::Result<Self> {
        let tables: Self = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Load tables from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read pricing tables from {:?}", path.as_ref()))?;

        let tables = Self::from_json_str(&content)
            .with_context(|| format!("Invalid pricing tables in {:?}", path.as_ref()))?;

        tracing::debug!(
            path = ?path.as_ref(),
            years = tables.catalog.entries().len(),
            rules = tables.discounts.rules().len(),
            "loaded pricing tables"
        );
        Ok(tables)
    }

    /// Save tables to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize pricing tables to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write pricing tables to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Check that the tables are consistent.
    ///
    /// # Errors
    ///
    /// - a year listed twice in the catalog
    /// - a discount rule without a name or without required services
    /// - a discount rule for a year the catalog does not price
    pub fn validate(&self) -> crate::error::Result<()> {
        let mut years = BTreeSet::new();
        for entry in self.catalog.entries() {
            if !years.insert(entry.year) {
                return Err(QuoteError::validation(format!(
                    "catalog lists year {} more than once",
                    entry.year
                )));
            }
        }

        for rule in self.discounts.rules() {
            if rule.name.trim().is_empty() {
                return Err(QuoteError::validation("discount rule name must not be empty"));
            }
            if rule.included_services.is_empty() {
                return Err(QuoteError::validation(format!(
                    "discount rule {} requires no services",
                    rule.name
                )));
            }
            if !years.contains(&rule.for_year) {
                return Err(QuoteError::validation(format!(
                    "discount rule {} is for year {} which has no catalog entry",
                    rule.name, rule.for_year
                )));
            }
        }

        for year in &years {
            if !self.discounts.rules().iter().any(|rule| rule.for_year == *year) {
                tracing::warn!(%year, "catalog year has no discount rules");
            }
        }

        Ok(())
    }
}

impl Default for PricingTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PriceList, ServicePrices};
    use crate::discount::DiscountRule;
    use crate::types::{CatalogYear, ServiceKind};
    use tempfile::TempDir;

    fn flat_prices(value: u32) -> ServicePrices {
        ServicePrices {
            photography: value,
            video_recording: value,
            bluray_package: value,
            two_day_event: value,
            wedding_session: value,
        }
    }

    #[test]
    fn test_builtin_tables_are_valid() {
        assert!(PricingTables::builtin().validate().is_ok());
        assert_eq!(builtin_tables(), &PricingTables::builtin());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tables.json");

        let tables = PricingTables::builtin();
        tables.save_to_file(&path).unwrap();

        let loaded = PricingTables::load_from_file(&path).unwrap();
        assert_eq!(loaded, tables);
    }

    #[test]
    fn test_load_missing_file_fails_with_context() {
        let dir = TempDir::new().unwrap();
        let err = PricingTables::load_from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read pricing tables"));
    }

    #[test]
    fn test_rejects_duplicate_catalog_year() {
        let tables = PricingTables {
            catalog: PriceCatalog::new(vec![
                PriceList { year: CatalogYear::Y2020, prices: flat_prices(1) },
                PriceList { year: CatalogYear::Y2020, prices: flat_prices(2) },
            ]),
            discounts: DiscountRules::default(),
        };
        let err = tables.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_rejects_rule_for_unpriced_year() {
        let tables = PricingTables {
            catalog: PriceCatalog::new(vec![PriceList {
                year: CatalogYear::Y2020,
                prices: flat_prices(100),
            }]),
            discounts: DiscountRules::new(vec![DiscountRule::new(
                "Late",
                &[ServiceKind::Photography],
                CatalogYear::Y2022,
                10,
            )]),
        };
        assert!(matches!(tables.validate(), Err(QuoteError::Validation(_))));
    }

    #[test]
    fn test_rejects_rule_without_services() {
        let mut tables = PricingTables::builtin();
        tables.discounts = DiscountRules::new(vec![DiscountRule::new(
            "Everything",
            &[],
            CatalogYear::Y2021,
            10,
        )]);
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_rejects_rule_without_name() {
        let mut tables = PricingTables::builtin();
        tables.discounts = DiscountRules::new(vec![DiscountRule::new(
            "  ",
            &[ServiceKind::Photography],
            CatalogYear::Y2021,
            10,
        )]);
        let err = tables.validate().unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));
    }

    #[test]
    fn test_year_without_rules_is_allowed() {
        let mut tables = PricingTables::builtin();
        tables.discounts = DiscountRules::default();
        assert!(tables.validate().is_ok());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "catalog": [
                { "year": 2021, "prices": {
                    "Photography": 10, "VideoRecording": 20, "BlurayPackage": 3,
                    "TwoDayEvent": 4, "WeddingSession": 6 } }
            ],
            "discounts": [
                { "name": "Pair", "includedServices": ["Photography", "VideoRecording"],
                  "forYear": 2021, "discountValue": 5 }
            ]
        }"#;
        let tables = PricingTables::from_json_str(json).unwrap();
        assert_eq!(tables.catalog.entries().len(), 1);
        assert_eq!(tables.discounts.rules()[0].discount_value, 5);
    }

    #[test]
    fn test_from_json_str_rejects_unknown_year() {
        let json = r#"{ "catalog": [ { "year": 2030, "prices": {
            "Photography": 1, "VideoRecording": 1, "BlurayPackage": 1,
            "TwoDayEvent": 1, "WeddingSession": 1 } } ], "discounts": [] }"#;
        assert!(matches!(
            PricingTables::from_json_str(json),
            Err(QuoteError::Json(_))
        ));
    }
}
