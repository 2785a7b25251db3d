//! Closed domain enums for bundle pricing
//!
//! Service kinds and catalog years are fixed sets. Modelling them as enums
//! gives exhaustive matching in the catalog and discount lookups instead of
//! stringly-typed keys.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::QuoteError;

/// A selectable service offering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum ServiceKind {
    #[strum(serialize = "Photography")]
    Photography,
    #[strum(serialize = "VideoRecording")]
    VideoRecording,
    /// Packaged add-on, only meaningful together with `VideoRecording`
    #[strum(serialize = "BlurayPackage")]
    BlurayPackage,
    /// Enhancement justified by either `Photography` or `VideoRecording`
    #[strum(serialize = "TwoDayEvent")]
    TwoDayEvent,
    #[strum(serialize = "WeddingSession")]
    WeddingSession,
}

impl ServiceKind {
    /// The service this one cannot be selected without, if any
    pub const fn prerequisite(self) -> Option<ServiceKind> {
        match self {
            Self::BlurayPackage => Some(Self::VideoRecording),
            Self::Photography
            | Self::VideoRecording
            | Self::TwoDayEvent
            | Self::WeddingSession => None,
        }
    }
}

/// Pricing year
///
/// Each year carries its own base prices and discount amounts; there is no
/// fallback between years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(try_from = "u16", into = "u16")]
pub enum CatalogYear {
    #[strum(serialize = "2020")]
    Y2020,
    #[strum(serialize = "2021")]
    Y2021,
    #[strum(serialize = "2022")]
    Y2022,
}

impl CatalogYear {
    /// Calendar year number
    pub const fn number(self) -> u16 {
        match self {
            Self::Y2020 => 2020,
            Self::Y2021 => 2021,
            Self::Y2022 => 2022,
        }
    }
}

impl TryFrom<u16> for CatalogYear {
    type Error = QuoteError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2020 => Ok(Self::Y2020),
            2021 => Ok(Self::Y2021),
            2022 => Ok(Self::Y2022),
            other => Err(QuoteError::UnsupportedYear(other)),
        }
    }
}

impl From<CatalogYear> for u16 {
    fn from(year: CatalogYear) -> Self {
        year.number()
    }
}
