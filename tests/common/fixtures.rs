//! Canned data shared by the harnesses.

use super::builders::*;
use theory_core::{RecordCollection, RecordStore};

pub const DAY_SURGERY: &str = "RUG-DAY SURGERY/THEATRE 4";
pub const ESTATES: &str = "RUG-ESTATES OFFICES";

/// The two phlebotomy rooms from the walkthrough scenario, plus neighbours
/// that never match "ph".
pub fn phlebotomy_rooms() -> RecordCollection {
    RecordCollection::new(vec![
        location("RCB00025", "Phlebotomy Waiting Room", DAY_SURGERY, "RUG - DAY SURGERY"),
        location("RCB00027", "Phelobotomy", DAY_SURGERY, "RUG - DAY SURGERY"),
        location("RCB00030", "Store", DAY_SURGERY, "RUG - DAY SURGERY"),
        location("RVE00026", "Hard FM Store (RUG)", ESTATES, "RUG - ESTATES"),
    ])
}

/// A small store covering both buildings and a handful of disciplines.
pub fn sample_store() -> RecordStore {
    StoreBuilder::new()
        .reference("A12345")
        .location(location("RCB00025", "Phlebotomy Waiting Room", DAY_SURGERY, "RUG - DAY SURGERY"))
        .location(location("RCB00027", "Phelobotomy", DAY_SURGERY, "RUG - DAY SURGERY"))
        .location(location("RCB00037", "Store", DAY_SURGERY, "DAY SURGERY"))
        .location(location("RCB00043", "Store", DAY_SURGERY, "RUG - DAY SURGERY"))
        .location(location("RVE00026", "Hard FM Store (RUG)", ESTATES, "RUG - ESTATES"))
        .discipline("Electrical")
        .discipline("Plumbing")
        .discipline("Carpentry")
        .build()
}

/// The same shape as [`sample_store`], serialised in the record file format.
pub const SAMPLE_JSON: &str = r#"{
  "reference": "B20001",
  "locations": [
    { "name": "RVE00026 - Hard FM Store (RUG)",
      "details": { "code": "RVE00026", "room": "Hard FM Store (RUG)",
                   "building": "RUG-ESTATES OFFICES", "department": "RUG - ESTATES" } },
    { "name": "RCB00025 - Phlebotomy Waiting Room",
      "details": { "code": "RCB00025", "room": "Phlebotomy Waiting Room",
                   "building": "RUG-DAY SURGERY/THEATRE 4", "department": "RUG - DAY SURGERY" } }
  ],
  "disciplines": [
    { "name": "Plumbing", "details": { "discipline": "Plumbing" } }
  ]
}"#;
