//! Bundle Quote Library
//!
//! Prices a selection of photo and video services for a catalog year, applying
//! the single best combination discount, and keeps selections consistent
//! through pure select/deselect transitions.

pub mod catalog;
pub mod cli;
pub mod discount;
pub mod error;
pub mod pricing;
pub mod selection;
pub mod tables;
pub mod types;

// Re-export main types for convenience
pub use catalog::{PriceCatalog, PriceList, ServicePrices};
pub use discount::{DiscountRule, DiscountRules};
pub use error::{QuoteError, Result};
pub use pricing::{calculate_price, service_guard, PriceCalculator, PriceQuote};
pub use selection::{
    can_select, dependent_addon, update_selected_services, Selection, SelectionAction, ServiceSet,
};
pub use tables::{builtin_tables, PricingTables};
pub use types::{CatalogYear, ServiceKind};
