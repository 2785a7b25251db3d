//! Price catalog: per-year base prices for every service kind.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::types::{CatalogYear, ServiceKind};

/// Base price of every service kind in one year.
///
/// One field per kind, so a catalog entry cannot leave a service unpriced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ServicePrices {
    pub photography: u32,
    pub video_recording: u32,
    pub bluray_package: u32,
    pub two_day_event: u32,
    pub wedding_session: u32,
}

impl ServicePrices {
    pub const fn price_of(&self, service: ServiceKind) -> u32 {
        match service {
            ServiceKind::Photography => self.photography,
            ServiceKind::VideoRecording => self.video_recording,
            ServiceKind::BlurayPackage => self.bluray_package,
            ServiceKind::TwoDayEvent => self.two_day_event,
            ServiceKind::WeddingSession => self.wedding_session,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    pub year: CatalogYear,
    pub prices: ServicePrices,
}

/// Year-indexed collection of price lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceCatalog {
    entries: Vec<PriceList>,
}

impl PriceCatalog {
    pub fn new(entries: Vec<PriceList>) -> Self {
        Self { entries }
    }

    /// The compiled-in catalog covering every supported year
    pub fn builtin() -> Self {
        let common = |photo_video: u32| ServicePrices {
            photography: photo_video,
            video_recording: photo_video,
            bluray_package: 300,
            two_day_event: 400,
            wedding_session: 600,
        };

        Self::new(vec![
            PriceList {
                year: CatalogYear::Y2020,
                prices: common(1700),
            },
            PriceList {
                year: CatalogYear::Y2021,
                prices: common(1800),
            },
            PriceList {
                year: CatalogYear::Y2022,
                prices: common(1900),
            },
        ])
    }

    pub fn entries(&self) -> &[PriceList] {
        &self.entries
    }

    /// Prices for `year`.
    ///
    /// # Errors
    ///
    /// `UnknownCatalogYear` if the catalog has no entry for the year. The
    /// built-in catalog covers every `CatalogYear`; a miss can only come from
    /// tables loaded from a file.
    pub fn prices_for(&self, year: CatalogYear) -> Result<&ServicePrices> {
        self.entries
            .iter()
            .find(|entry| entry.year == year)
            .map(|entry| &entry.prices)
            .ok_or(QuoteError::UnknownCatalogYear(year))
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
