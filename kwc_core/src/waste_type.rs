//! The closed set of waste streams and their display metadata.

use bitmask_enum::bitmask;

/// One of the six waste streams collected in the city.
///
/// The variant order is the fixed column order of the street data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WasteType {
    Mixed,
    Paper,
    Plastic,
    Glass,
    Bio,
    Barrel,
}

impl WasteType {
    /// All waste types, in street data column order.
    pub const ALL: [WasteType; 6] = [
        WasteType::Mixed,
        WasteType::Paper,
        WasteType::Plastic,
        WasteType::Glass,
        WasteType::Bio,
        WasteType::Barrel,
    ];

    /// Polish display label.
    pub fn label(self) -> &'static str {
        match self {
            WasteType::Mixed => "zmieszane",
            WasteType::Paper => "papier",
            WasteType::Plastic => "tworzywa sztuczne",
            WasteType::Glass => "szkło",
            WasteType::Bio => "bio",
            WasteType::Barrel => "beczka",
        }
    }

    /// Badge color of this waste type in the preview calendar.
    pub fn color_token(self) -> &'static str {
        match self {
            WasteType::Mixed => "#bfbfbf",
            WasteType::Paper => "#b8cce4",
            WasteType::Plastic => "#ffffcc",
            WasteType::Glass => "#d8e4bc",
            WasteType::Bio => "#e2c4a6",
            WasteType::Barrel => "#f2f2f2",
        }
    }

    /// Abbreviation used in compact calendar views.
    pub fn short_code(self) -> &'static str {
        match self {
            WasteType::Mixed => "z",
            WasteType::Paper => "p",
            WasteType::Plastic => "ts",
            WasteType::Glass => "s",
            WasteType::Bio => "b",
            WasteType::Barrel => "beczka",
        }
    }
}

#[bitmask]
#[bitmask_config(inverted_flags)]
pub enum WasteTypeBitmask {
    Mixed,
    Paper,
    Plastic,
    Glass,
    Bio,
    Barrel,
}

impl From<WasteType> for WasteTypeBitmask {
    fn from(value: WasteType) -> Self {
        match value {
            WasteType::Mixed => WasteTypeBitmask::Mixed,
            WasteType::Paper => WasteTypeBitmask::Paper,
            WasteType::Plastic => WasteTypeBitmask::Plastic,
            WasteType::Glass => WasteTypeBitmask::Glass,
            WasteType::Bio => WasteTypeBitmask::Bio,
            WasteType::Barrel => WasteTypeBitmask::Barrel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(WasteType::Mixed.label(), "zmieszane");
        assert_eq!(WasteType::Plastic.label(), "tworzywa sztuczne");
        assert_eq!(WasteType::Glass.label(), "szkło");
        assert_eq!(WasteType::Barrel.label(), "beczka");
    }

    #[test]
    fn test_display_metadata() {
        assert_eq!(WasteType::Paper.color_token(), "#b8cce4");
        assert_eq!(WasteType::Bio.color_token(), "#e2c4a6");
        assert_eq!(WasteType::Plastic.short_code(), "ts");
        assert_eq!(WasteType::Barrel.short_code(), "beczka");
    }

    #[test]
    fn test_all_follows_column_order() {
        assert_eq!(WasteType::ALL.len(), 6);
        assert_eq!(WasteType::ALL[0], WasteType::Mixed);
        assert_eq!(WasteType::ALL[5], WasteType::Barrel);
    }

    #[test]
    fn test_bitmask_from_waste_type() {
        assert_eq!(
            WasteTypeBitmask::from(WasteType::Paper),
            WasteTypeBitmask::Paper
        );
        let combined =
            WasteTypeBitmask::from(WasteType::Bio) | WasteTypeBitmask::from(WasteType::Glass);
        assert!(combined.contains(WasteTypeBitmask::Bio));
        assert!(combined.contains(WasteTypeBitmask::Glass));
        assert!(!combined.contains(WasteTypeBitmask::Mixed));
    }
}
