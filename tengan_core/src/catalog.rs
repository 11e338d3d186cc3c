//! The fixed three-medicine catalog.
//!
//! The ICL protocol uses exactly three eye drops, and their order here is
//! the day-1+ rotation sequence. This is a closed enumeration, not an
//! extensible registry.

use crate::types::{Medicine, MedicineId};
use once_cell::sync::Lazy;

/// Rotation order for day-1+ dosing: index 0 starts every morning.
pub const ROTATION_ORDER: [MedicineId; 3] =
    [MedicineId::Dex, MedicineId::Moxi, MedicineId::Diclo];

/// Cached catalog - built once and reused across all operations
static CATALOG: Lazy<Catalog> = Lazy::new(build_catalog);

/// Get a reference to the cached medicine catalog
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// The complete ordered catalog of protocol medicines
#[derive(Clone, Debug)]
pub struct Catalog {
    medicines: Vec<Medicine>,
}

impl Catalog {
    /// All medicines in rotation order
    pub fn all(&self) -> &[Medicine] {
        &self.medicines
    }

    /// Look up a medicine by id (total for the closed enum)
    pub fn get(&self, id: MedicineId) -> &Medicine {
        // ROTATION_ORDER and self.medicines share indices
        let idx = ROTATION_ORDER
            .iter()
            .position(|m| *m == id)
            .unwrap_or(0);
        &self.medicines[idx]
    }

    /// Medicine at a rotation index. Indices 0-2 map bijectively to
    /// {DEX, Moxi, Diclo}; out-of-range indices wrap.
    pub fn at(&self, index: u8) -> &Medicine {
        &self.medicines[index as usize % self.medicines.len()]
    }

    /// Validate the catalog for consistency with the rotation order
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.medicines.len() != ROTATION_ORDER.len() {
            errors.push(format!(
                "Catalog has {} medicines, expected {}",
                self.medicines.len(),
                ROTATION_ORDER.len()
            ));
        }

        for (idx, medicine) in self.medicines.iter().enumerate() {
            if Some(&medicine.id) != ROTATION_ORDER.get(idx) {
                errors.push(format!(
                    "Catalog index {} holds {:?}, rotation order expects {:?}",
                    idx,
                    medicine.id,
                    ROTATION_ORDER.get(idx)
                ));
            }
            if medicine.name.is_empty() {
                errors.push(format!("Medicine {:?} has empty name", medicine.id));
            }
            if medicine.description.is_empty() {
                errors.push(format!("Medicine {:?} has empty description", medicine.id));
            }
        }

        errors
    }
}

fn build_catalog() -> Catalog {
    Catalog {
        medicines: vec![
            Medicine {
                id: MedicineId::Dex,
                name: "DEX 0.1%".into(),
                color: "brown".into(),
                description: "炎症を抑える (茶色)".into(),
            },
            Medicine {
                id: MedicineId::Moxi,
                name: "モキシフロキサシン".into(),
                color: "pink".into(),
                description: "感染症予防 (ピンク)".into(),
            },
            Medicine {
                id: MedicineId::Diclo,
                name: "ジクロフェナクNa".into(),
                color: "blue".into(),
                description: "炎症・痛みを抑える (青)".into(),
            },
        ],
    }
}
