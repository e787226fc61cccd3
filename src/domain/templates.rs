//! Schema-complete extraction templates, one per intent.
//!
//! Every template serializes with its full field set regardless of what the
//! model returned; reconciliation mutates a fresh clone in place and leaves
//! untouched fields at their defaults (empty string / empty list / zero).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fields::{assign_count, assign_list, assign_stars, assign_string, Slot};

/// Show-information filter criteria. All fields are list-shaped so a single
/// message can constrain several days, topics or cast members at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowInfo {
    pub name: Slot<Vec<String>>,
    pub day: Slot<Vec<String>>,
    pub topic: Slot<Vec<String>>,
    pub time: Slot<Vec<String>>,
    pub cast: Slot<Vec<String>>,
    pub room: Slot<Vec<String>>,
    pub duration: Slot<Vec<String>>,
    pub stars: Slot<Vec<String>>,
}

impl ShowInfo {
    /// Merges a parsed payload into this template. Unknown keys are ignored;
    /// bare scalars are wrapped into one-element lists.
    pub fn reconcile(&mut self, parsed: &Map<String, Value>) {
        for (key, raw) in parsed {
            match key.as_str() {
                "name" => assign_list(&mut self.name, raw),
                "day" => assign_list(&mut self.day, raw),
                "topic" => assign_list(&mut self.topic, raw),
                "time" => assign_list(&mut self.time, raw),
                "cast" => assign_list(&mut self.cast, raw),
                "room" => assign_list(&mut self.room, raw),
                "duration" => assign_list(&mut self.duration, raw),
                "stars" => assign_list(&mut self.stars, raw),
                _ => {}
            }
        }
    }
}

/// One attendee inside a booking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: Slot<String>,
    pub age: Slot<String>,
    pub seat: Slot<String>,
}

impl Person {
    fn reconcile(&mut self, parsed: &Map<String, Value>) {
        for (key, raw) in parsed {
            match key.as_str() {
                "name" => assign_string(&mut self.name, raw),
                "age" => assign_string(&mut self.age, raw),
                "seat" => assign_string(&mut self.seat, raw),
                _ => {}
            }
        }
    }
}

/// A single reservation: show details plus one attendee. Messages naming
/// several attendees yield one `Booking` per person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub show_name: Slot<String>,
    pub room: Slot<String>,
    pub day: Slot<String>,
    pub time: Slot<String>,
    pub person: Person,
}

impl Booking {
    pub fn reconcile(&mut self, parsed: &Map<String, Value>) {
        for (key, raw) in parsed {
            match key.as_str() {
                "show_name" => assign_string(&mut self.show_name, raw),
                "room" => assign_string(&mut self.room, raw),
                "day" => assign_string(&mut self.day, raw),
                "time" => assign_string(&mut self.time, raw),
                "person" => {
                    if let Value::Object(sub) = raw {
                        self.person.reconcile(sub);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Cancellation lookup credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cancellation {
    pub reservation_number: Slot<String>,
    pub passcode: Slot<String>,
}

impl Cancellation {
    pub fn reconcile(&mut self, parsed: &Map<String, Value>) {
        for (key, raw) in parsed {
            match key.as_str() {
                "reservation_number" => assign_string(&mut self.reservation_number, raw),
                "passcode" => assign_string(&mut self.passcode, raw),
                _ => {}
            }
        }
    }
}

/// Discount/offer inquiry details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub show_name: Slot<Vec<String>>,
    pub age: Slot<Vec<String>>,
    pub date: Slot<Vec<String>>,
    pub no_of_people: Slot<i64>,
}

impl Discount {
    pub fn reconcile(&mut self, parsed: &Map<String, Value>) {
        for (key, raw) in parsed {
            match key.as_str() {
                "show_name" => assign_list(&mut self.show_name, raw),
                "age" => assign_list(&mut self.age, raw),
                "date" => assign_list(&mut self.date, raw),
                "no_of_people" => assign_count(&mut self.no_of_people, raw),
                _ => {}
            }
        }
    }
}

/// Review submission: credentials, free text and a 1-5 star rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub reservation_number: Slot<String>,
    pub passcode: Slot<String>,
    pub review: Slot<String>,
    pub stars: Slot<i64>,
}

impl Review {
    pub fn reconcile(&mut self, parsed: &Map<String, Value>) {
        for (key, raw) in parsed {
            match key.as_str() {
                "reservation_number" => assign_string(&mut self.reservation_number, raw),
                "passcode" => assign_string(&mut self.passcode, raw),
                "review" => assign_string(&mut self.review, raw),
                "stars" => assign_stars(&mut self.stars, raw),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn show_info_serializes_every_field_by_default() {
        let value = serde_json::to_value(ShowInfo::default()).unwrap();
        let map = value.as_object().unwrap();
        for key in ["name", "day", "topic", "time", "cast", "room", "duration", "stars"] {
            assert!(map.contains_key(key), "missing field {key}");
            assert_eq!(map[key]["value"], json!([]));
        }
    }

    #[test]
    fn show_info_reconcile_wraps_scalars() {
        let mut template = ShowInfo::default();
        template.reconcile(&as_map(json!({"day": "Friday", "cast": ["A", "B"]})));
        assert_eq!(template.day.value, vec!["Friday"]);
        assert_eq!(template.cast.value, vec!["A", "B"]);
        assert!(template.topic.value.is_empty());
    }

    #[test]
    fn show_info_reconcile_ignores_unknown_keys() {
        let mut template = ShowInfo::default();
        template.reconcile(&as_map(json!({"director": "X", "day": "Monday"})));
        let value = serde_json::to_value(&template).unwrap();
        assert!(value.get("director").is_none());
        assert_eq!(template.day.value, vec!["Monday"]);
    }

    #[test]
    fn booking_reconciles_person_subfields() {
        let mut template = Booking::default();
        template.reconcile(&as_map(json!({
            "show_name": "Ο Μάγος του Οζ",
            "day": "Παρασκευή",
            "person": {"name": "Δήμος Στεργίου", "age": 35}
        })));
        assert_eq!(template.show_name.value, "Ο Μάγος του Οζ");
        assert_eq!(template.person.name.value, "Δήμος Στεργίου");
        assert_eq!(template.person.age.value, "35");
        // Missing sub-key keeps its default.
        assert_eq!(template.person.seat.value, "");
    }

    #[test]
    fn booking_accepts_value_holder_shape() {
        let mut template = Booking::default();
        template.reconcile(&as_map(json!({
            "show_name": {"value": "Hamlet"},
            "person": {"name": {"value": "Maria"}, "seat": {"value": "A12"}}
        })));
        assert_eq!(template.show_name.value, "Hamlet");
        assert_eq!(template.person.name.value, "Maria");
        assert_eq!(template.person.seat.value, "A12");
    }

    #[test]
    fn cancellation_keeps_defaults_for_missing_fields() {
        let mut template = Cancellation::default();
        template.reconcile(&as_map(json!({"reservation_number": "RSV42"})));
        assert_eq!(template.reservation_number.value, "RSV42");
        assert_eq!(template.passcode.value, "");
    }

    #[test]
    fn discount_count_recovers_from_text() {
        let mut template = Discount::default();
        template.reconcile(&as_map(json!({
            "no_of_people": "4 people",
            "age": "65+"
        })));
        assert_eq!(template.no_of_people.value, 4);
        assert_eq!(template.age.value, vec!["65+"]);
    }

    #[test]
    fn review_stars_single_digit() {
        let mut template = Review::default();
        template.reconcile(&as_map(json!({"stars": "55", "review": "τέλειο"})));
        assert_eq!(template.stars.value, 5);
        assert_eq!(template.review.value, "τέλειο");
    }

    #[test]
    fn templates_clone_independently() {
        let mut a = Review::default();
        let b = a.clone();
        a.reconcile(&as_map(json!({"stars": 4, "passcode": "1111"})));
        assert_eq!(a.stars.value, 4);
        assert_eq!(b.stars.value, 0);
        assert_eq!(b.passcode.value, "");
    }

    #[test]
    fn pvalues_survive_reconciliation() {
        let mut template = Booking {
            day: Slot::with_pvalues(String::new(), &["Monday", "Friday"]),
            ..Booking::default()
        };
        template.reconcile(&as_map(json!({"day": "Friday"})));
        assert_eq!(template.day.value, "Friday");
        assert_eq!(template.day.pvalues, vec!["Monday", "Friday"]);
    }
}
