//! Combination discounts and best-discount selection
//!
//! A rule applies when the quote is for the rule's year and every service the
//! rule requires is selected. When several rules apply, the single largest
//! amount wins; discounts never stack and a more specific rule gets no
//! precedence over a larger one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::selection::ServiceSet;
use crate::types::{CatalogYear, ServiceKind};

/// A named, year-scoped combination discount.
///
/// The name is descriptive; the same combination usually appears once per year
/// under the same name with a year-specific amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRule {
    pub name: String,
    pub included_services: Vec<ServiceKind>,
    pub for_year: CatalogYear,
    pub discount_value: u32,
}

impl DiscountRule {
    pub fn new(
        name: impl Into<String>,
        included_services: &[ServiceKind],
        for_year: CatalogYear,
        discount_value: u32,
    ) -> Self {
        Self {
            name: name.into(),
            included_services: included_services.to_vec(),
            for_year,
            discount_value,
        }
    }

    pub fn can_apply(&self, services: &ServiceSet, year: CatalogYear) -> bool {
        self.for_year == year && services.is_superset_of(&self.included_services)
    }
}

/// The full list of discount rules across all years
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountRules {
    rules: Vec<DiscountRule>,
}

impl DiscountRules {
    pub fn new(rules: Vec<DiscountRule>) -> Self {
        Self { rules }
    }

    /// The compiled-in rule set
    pub fn builtin() -> Self {
        use CatalogYear::*;
        use ServiceKind::*;

        const PHOTO_VIDEO: &[ServiceKind] = &[Photography, VideoRecording];
        const WEDDING_PHOTO: &[ServiceKind] = &[Photography, WeddingSession];
        const WEDDING_VIDEO: &[ServiceKind] = &[VideoRecording, WeddingSession];
        const VIDEO_PHOTO_WEDDING: &[ServiceKind] = &[VideoRecording, Photography, WeddingSession];

        let table: [(&str, &[ServiceKind], [u32; 3]); 4] = [
            ("PhotographyVideoRecording", PHOTO_VIDEO, [1200, 1300, 1300]),
            ("WeddingAndPhotography", WEDDING_PHOTO, [300, 300, 600]),
            ("WeddingVideo", WEDDING_VIDEO, [300, 300, 300]),
            ("VideoPhotoWedding", VIDEO_PHOTO_WEDDING, [1500, 1600, 1900]),
        ];

        let rules = table
            .iter()
            .flat_map(|(name, services, amounts)| {
                [Y2020, Y2021, Y2022]
                    .into_iter()
                    .zip(amounts.iter())
                    .map(move |(year, amount)| DiscountRule::new(*name, services, year, *amount))
            })
            .collect();

        Self::new(rules)
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    /// Rules whose year matches and whose required services are all selected
    pub fn matching<'a>(
        &'a self,
        services: &'a ServiceSet,
        year: CatalogYear,
    ) -> impl Iterator<Item = &'a DiscountRule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.for_year == year)
            .filter(move |rule| rule.can_apply(services, year))
    }

    /// The single discount amount to subtract: the largest distinct amount
    /// among matching rules, or zero when nothing matches.
    pub fn best_discount(&self, services: &ServiceSet, year: CatalogYear) -> u32 {
        let amounts: BTreeSet<u32> = self
            .matching(services, year)
            .map(|rule| rule.discount_value)
            .collect();

        amounts.last().copied().unwrap_or(0)
    }

    /// Apply the best discount to `price`.
    ///
    /// The result is not clamped: a discount larger than the price yields a
    /// negative value.
    pub fn apply(&self, price: u64, services: &ServiceSet, year: CatalogYear) -> i64 {
        price as i64 - i64::from(self.best_discount(services, year))
    }
}
