//! Price Calculator
//!
//! Turns a service selection and a catalog year into a `PriceQuote`:
//!
//! 1. An empty selection is free; no lookup happens.
//! 2. The pricing guard drops `BlurayPackage` when `VideoRecording` is missing.
//! 3. Base prices of the guarded selection are summed for the year.
//! 4. The best single discount for the guarded selection is subtracted.
//!
//! The guard is the enforcement point for "no Bluray without Video" on
//! selections that were built without going through `Select`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::selection::{update_selected_services, SelectionAction, ServiceSet};
use crate::tables::{builtin_tables, PricingTables};
use crate::types::{CatalogYear, ServiceKind};

/// Result of pricing one selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Sum of catalog prices before any discount
    pub base_price: u64,
    /// Base price minus the best discount; may be negative
    pub final_price: i64,
}

impl PriceQuote {
    /// Amount taken off the base price
    pub fn discount(&self) -> i64 {
        self.base_price as i64 - self.final_price
    }
}

/// Repair a selection before pricing.
///
/// `BlurayPackage` without `VideoRecording` is removed through the regular
/// `Deselect` transition, so the usual cascade rules apply.
pub fn service_guard(services: &ServiceSet) -> ServiceSet {
    if services.contains(ServiceKind::BlurayPackage)
        && !services.contains(ServiceKind::VideoRecording)
    {
        tracing::debug!("dropping BlurayPackage selected without VideoRecording");
        return update_selected_services(
            services,
            SelectionAction::deselect(ServiceKind::BlurayPackage),
        );
    }
    services.clone()
}

/// Stateless calculator over a borrowed set of pricing tables
#[derive(Debug, Clone, Copy)]
pub struct PriceCalculator<'a> {
    tables: &'a PricingTables,
}

impl Default for PriceCalculator<'static> {
    fn default() -> Self {
        Self::new(builtin_tables())
    }
}

impl<'a> PriceCalculator<'a> {
    pub fn new(tables: &'a PricingTables) -> Self {
        Self { tables }
    }

    /// Price `selected` in `year`.
    ///
    /// # Errors
    ///
    /// `UnknownCatalogYear` if the tables have no price list for `year`.
    pub fn calculate(&self, selected: &ServiceSet, year: CatalogYear) -> Result<PriceQuote> {
        if selected.is_empty() {
            return Ok(PriceQuote::default());
        }

        let services = service_guard(selected);
        let prices = self.tables.catalog.prices_for(year)?;

        let base_price: u64 = services
            .iter()
            .map(|service| u64::from(prices.price_of(service)))
            .sum();
        let final_price = self.tables.discounts.apply(base_price, &services, year);

        tracing::debug!(
            %year,
            services = %services,
            base_price,
            final_price,
            "calculated price"
        );

        Ok(PriceQuote {
            base_price,
            final_price,
        })
    }
}

/// Price `selected` in `year` against the compiled-in tables
pub fn calculate_price(selected: &ServiceSet, year: CatalogYear) -> Result<PriceQuote> {
    PriceCalculator::default().calculate(selected, year)
}
