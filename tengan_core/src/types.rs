//! Core domain types for the ICL eye-drop schedule system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Medicine identifiers and catalog entries
//! - Surgery info and the persisted schedule state
//! - Derived schedule projections
//! - Precaution rows

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// Medicine Types
// ============================================================================

/// Identifier for one of the three protocol eye drops.
///
/// The declaration order is the day-1+ rotation order and is fixed by the
/// protocol, not configurable.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MedicineId {
    #[serde(rename = "DEX")]
    Dex,
    Moxi,
    Diclo,
}

impl std::fmt::Display for MedicineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MedicineId::Dex => write!(f, "DEX"),
            MedicineId::Moxi => write!(f, "Moxi"),
            MedicineId::Diclo => write!(f, "Diclo"),
        }
    }
}

/// A catalog entry for a single medicine (display metadata only)
#[derive(Clone, Debug)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub color: String,
    pub description: String,
}

// ============================================================================
// Surgery Info and Persisted State
// ============================================================================

/// Surgery date and the day-0 dosing start time.
///
/// An absent date means the user has not completed onboarding yet.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SurgeryInfo {
    pub date: Option<NaiveDate>,
    #[serde(with = "hhmm")]
    pub day0_start_time: Option<NaiveTime>,
}

/// The single persisted record for the whole system.
///
/// Serialized as camelCase JSON so the stored record matches the original
/// `{ surgeryInfo, lastDropTime, rotationIndex }` layout. `rotation_index`
/// is always in `{0, 1, 2}`; `last_drop_time` is absent only before the
/// first completed dose or after a data reset.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleState {
    pub surgery_info: SurgeryInfo,
    pub last_drop_time: Option<DateTime<Local>>,
    pub rotation_index: u8,
}

// ============================================================================
// Derived Schedule
// ============================================================================

/// Lifecycle stage derived from the surgery date and the current day
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleStatus {
    /// No surgery date set yet (or a future-dated surgery)
    Onboarding,
    /// The calendar day of surgery: all three drops hourly
    Day0,
    /// Any later day: single drop, hourly 3-cycle rotation
    Day1Plus,
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleStatus::Onboarding => write!(f, "onboarding"),
            ScheduleStatus::Day0 => write!(f, "day0"),
            ScheduleStatus::Day1Plus => write!(f, "day1+"),
        }
    }
}

/// Pure projection of (state, now): what is due and when.
///
/// Never persisted and never cached; recomputed on every access.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedSchedule {
    pub status: ScheduleStatus,
    pub days_post_op: i64,
    pub current_medicines: Vec<MedicineId>,
    pub next_drop_time: Option<DateTime<Local>>,
}

// ============================================================================
// Precaution Types
// ============================================================================

/// Whether an everyday activity is currently allowed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrecautionStatus {
    Ok,
    Caution,
    Ng,
}

/// One row of the lifestyle guidance table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecautionItem {
    pub label: &'static str,
    pub status: PrecautionStatus,
    pub note: &'static str,
}

/// Serde helper: `day0StartTime` is stored as `"HH:MM"`
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => ser.serialize_some(&t.format("%H:%M").to_string()),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(de)?;
        match raw {
            None => Ok(None),
            Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_medicine_id_serializes_to_original_identifiers() {
        assert_eq!(serde_json::to_string(&MedicineId::Dex).unwrap(), "\"DEX\"");
        assert_eq!(serde_json::to_string(&MedicineId::Moxi).unwrap(), "\"Moxi\"");
        assert_eq!(
            serde_json::to_string(&MedicineId::Diclo).unwrap(),
            "\"Diclo\""
        );
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let state = ScheduleState {
            surgery_info: SurgeryInfo {
                date: Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
                day0_start_time: Some(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
            },
            last_drop_time: None,
            rotation_index: 2,
        };

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"surgeryInfo\""));
        assert!(json.contains("\"day0StartTime\":\"10:00\""));
        assert!(json.contains("\"date\":\"2024-01-10\""));
        assert!(json.contains("\"lastDropTime\":null"));
        assert!(json.contains("\"rotationIndex\":2"));
    }

    #[test]
    fn test_start_time_accepts_seconds_suffix() {
        let json = r#"{"surgeryInfo":{"date":"2024-01-10","day0StartTime":"10:00:00"}}"#;
        let state: ScheduleState = serde_json::from_str(json).unwrap();
        assert_eq!(
            state.surgery_info.day0_start_time,
            Some(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let state: ScheduleState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, ScheduleState::default());
        assert_eq!(state.rotation_index, 0);
    }
}
