//! The per-address schedule record as delivered by the street data files.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::waste_type::WasteType;

/// Number of positional columns in one street data row.
pub const ROW_COLUMNS: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("schedule row has {0} columns, expected {ROW_COLUMNS}")]
    ColumnCount(usize),
}

/// One address's full schedule record for one year.
///
/// The six waste texts are raw strings in whatever convention the operator
/// used; an empty string means no separate collection of that type exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetSchedule {
    pub id: String,
    pub house_type: String,
    pub street: String,
    pub house_number: String,
    pub sector: String,
    pub operator: String,
    pub year: i32,
    pub waste: BTreeMap<WasteType, String>,
}

impl StreetSchedule {
    /// Build a schedule from one positional row of a street data file.
    ///
    /// Column order: house type, street, house number, sector, operator,
    /// then one schedule text per waste type in [`WasteType::ALL`] order.
    pub fn from_row(id: String, year: i32, row: &[String]) -> Result<Self, RowError> {
        if row.len() != ROW_COLUMNS {
            return Err(RowError::ColumnCount(row.len()));
        }
        let waste = WasteType::ALL
            .iter()
            .copied()
            .zip(row[5..].iter().cloned())
            .collect();
        Ok(Self {
            id,
            house_type: row[0].clone(),
            street: row[1].clone(),
            house_number: row[2].clone(),
            sector: row[3].clone(),
            operator: row[4].clone(),
            year,
            waste,
        })
    }

    /// Raw schedule text for one waste type, empty if the row had none.
    pub fn waste_text(&self, waste_type: WasteType) -> &str {
        self.waste
            .get(&waste_type)
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: [&str; 11]) -> Vec<String> {
        values.into_iter().map(String::from).collect()
    }

    #[test]
    fn test_from_row() {
        let schedule = StreetSchedule::from_row(
            "7".to_string(),
            2024,
            &row([
                "Zabudowa jednorodzinna",
                "Wielicka",
                "44",
                "S6",
                "MPO",
                "03.04,17.04",
                "poniedziałek",
                "",
                "wtorek",
                "środa",
                "",
            ]),
        )
        .unwrap();
        assert_eq!(schedule.id, "7");
        assert_eq!(schedule.street, "Wielicka");
        assert_eq!(schedule.house_number, "44");
        assert_eq!(schedule.sector, "S6");
        assert_eq!(schedule.operator, "MPO");
        assert_eq!(schedule.year, 2024);
        assert_eq!(schedule.waste_text(WasteType::Mixed), "03.04,17.04");
        assert_eq!(schedule.waste_text(WasteType::Paper), "poniedziałek");
        assert_eq!(schedule.waste_text(WasteType::Plastic), "");
        assert_eq!(schedule.waste_text(WasteType::Glass), "wtorek");
        assert_eq!(schedule.waste_text(WasteType::Bio), "środa");
        assert_eq!(schedule.waste_text(WasteType::Barrel), "");
    }

    #[test]
    fn test_from_row_rejects_short_rows() {
        let result = StreetSchedule::from_row(
            "0".to_string(),
            2024,
            &["a", "b", "c"].map(String::from),
        );
        assert_eq!(result, Err(RowError::ColumnCount(3)));
    }
}
