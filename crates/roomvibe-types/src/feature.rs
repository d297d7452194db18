//! Gated feature types

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Features that may sit behind a plan upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    /// Premium mockup rooms (100+)
    PremiumRooms,
    /// 3000px exports
    HighResExport,
    /// PDF visualizations
    PdfExport,
    /// Multi-art walls and gallery tooling
    GalleryTools,
    /// Virtual exhibitions
    Exhibitions,
    /// No cap on active exhibitions
    UnlimitedExhibitions,
    /// No monthly cap on PDF exports
    #[serde(rename = "unlimitedPDF")]
    UnlimitedPdf,
    /// Designer Studio
    DesignerTools,
    /// Full artwork catalogue
    ArtworkSelection,
    /// Watermark-free output
    WatermarkRemoval,
}

impl Feature {
    /// Every feature
    pub const ALL: [Feature; 10] = [
        Self::PremiumRooms,
        Self::HighResExport,
        Self::PdfExport,
        Self::GalleryTools,
        Self::Exhibitions,
        Self::UnlimitedExhibitions,
        Self::UnlimitedPdf,
        Self::DesignerTools,
        Self::ArtworkSelection,
        Self::WatermarkRemoval,
    ];

    /// Wire identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PremiumRooms => "premiumRooms",
            Self::HighResExport => "highResExport",
            Self::PdfExport => "pdfExport",
            Self::GalleryTools => "galleryTools",
            Self::Exhibitions => "exhibitions",
            Self::UnlimitedExhibitions => "unlimitedExhibitions",
            Self::UnlimitedPdf => "unlimitedPDF",
            Self::DesignerTools => "designerTools",
            Self::ArtworkSelection => "artworkSelection",
            Self::WatermarkRemoval => "watermarkRemoval",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Feature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| ParseError::Feature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_every_key() {
        for feature in Feature::ALL {
            assert_eq!(feature.as_str().parse::<Feature>(), Ok(feature));
        }
    }

    #[test]
    fn test_serde_matches_as_str() {
        for feature in Feature::ALL {
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(json, format!("\"{}\"", feature.as_str()));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("UNLIMITEDPDF".parse::<Feature>(), Ok(Feature::UnlimitedPdf));
        assert_eq!("pdfexport".parse::<Feature>(), Ok(Feature::PdfExport));
    }

    #[test]
    fn test_unknown_feature_rejected() {
        assert_eq!(
            "teleport".parse::<Feature>(),
            Err(ParseError::Feature("teleport".into()))
        );
    }
}
