use serde::Serialize;

use crate::data::catalog::{normalize_room_id, RoomCatalog};

/// Baseline run time plus any identifiers the catalog did not know (counted as zero time).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoostlessTotal {
    pub time: f64,
    pub unresolved: Vec<String>,
}

pub fn boostless_total<S: AsRef<str>>(rooms: &[S], catalog: &RoomCatalog) -> BoostlessTotal {
    let mut total = BoostlessTotal {
        time: 0.0,
        unresolved: Vec::new(),
    };
    for id in rooms {
        match catalog.get(id.as_ref()) {
            Some(room) => total.time += room.boostless_time,
            None => {
                let id = normalize_room_id(id.as_ref());
                log::debug!("unknown room '{id}' counted as zero time");
                total.unresolved.push(id);
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::builtin_catalog;

    #[test]
    fn sums_boostless_times_case_insensitively() {
        let total = boostless_total(&["1A", "finish room"], builtin_catalog());
        assert!((total.time - 15.6).abs() < 1e-9);
        assert!(total.unresolved.is_empty());
    }

    #[test]
    fn unknown_rooms_count_as_zero_and_are_reported() {
        let total = boostless_total(&["1a", "Typo", "finish room"], builtin_catalog());
        assert!((total.time - 15.6).abs() < 1e-9);
        assert_eq!(total.unresolved, vec!["typo".to_string()]);
    }
}
