//! The closed intent set a message can be classified into.
//!
//! Wire labels are the exact Greek literals used by the box-office protocol;
//! classification matches them by substring containment so a model reply
//! that wraps the label in extra words still resolves.

/// Category a user message belongs to.
///
/// Declaration order matters: [`Intent::detect`] checks labels in this order
/// and the first label contained in the normalized reply wins.
///
/// Deliberately not serde-serializable: the wire tokens are the Greek
/// literals from [`Intent::label`], which derived serialization would get
/// wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Reservation request (`ΚΡΑΤΗΣΗ`).
    Booking,
    /// Cancellation request (`ΑΚΥΡΩΣΗ`).
    Cancellation,
    /// Information request about shows, times, etc. (`ΠΛΗΡΟΦΟΡΙΕΣ`).
    ShowInfo,
    /// Review, comment or feedback (`ΑΞΙΟΛΟΓΗΣΕΙΣ & ΣΧΟΛΙΑ`).
    Review,
    /// Discounts, offers, promotions (`ΠΡΟΣΦΟΡΕΣ & ΕΚΠΤΩΣΕΙΣ`).
    Discount,
    /// Exit/quit request (`ΕΞΟΔΟΣ`). Acknowledged, never terminates the server.
    Exit,
}

impl Intent {
    /// All intents, in classification precedence order.
    pub const ALL: [Intent; 6] = [
        Intent::Booking,
        Intent::Cancellation,
        Intent::ShowInfo,
        Intent::Review,
        Intent::Discount,
        Intent::Exit,
    ];

    /// The safe default when classification is ambiguous or invalid.
    pub const DEFAULT: Intent = Intent::ShowInfo;

    /// The exact wire literal for this intent.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Booking => "ΚΡΑΤΗΣΗ",
            Intent::Cancellation => "ΑΚΥΡΩΣΗ",
            Intent::ShowInfo => "ΠΛΗΡΟΦΟΡΙΕΣ",
            Intent::Review => "ΑΞΙΟΛΟΓΗΣΕΙΣ & ΣΧΟΛΙΑ",
            Intent::Discount => "ΠΡΟΣΦΟΡΕΣ & ΕΚΠΤΩΣΕΙΣ",
            Intent::Exit => "ΕΞΟΔΟΣ",
        }
    }

    /// Parses an exact wire literal, as received in request envelopes.
    pub fn from_label(label: &str) -> Option<Intent> {
        Intent::ALL.iter().copied().find(|i| i.label() == label)
    }

    /// Finds the first intent whose label is contained in a normalized
    /// (trimmed, uppercased) model reply.
    ///
    /// Returns `None` when no label is present; callers fall back to
    /// [`Intent::DEFAULT`].
    pub fn detect(normalized_reply: &str) -> Option<Intent> {
        Intent::ALL
            .iter()
            .copied()
            .find(|i| normalized_reply.contains(i.label()))
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(Intent::from_label(intent.label()), Some(intent));
        }
    }

    #[test]
    fn from_label_rejects_unknown() {
        assert_eq!(Intent::from_label("ΤΙΠΟΤΑ"), None);
        assert_eq!(Intent::from_label(""), None);
        // Containment is not enough for wire categories
        assert_eq!(Intent::from_label("Η ΚΡΑΤΗΣΗ ΜΟΥ"), None);
    }

    #[test]
    fn detect_matches_exact_label() {
        assert_eq!(Intent::detect("ΚΡΑΤΗΣΗ"), Some(Intent::Booking));
        assert_eq!(Intent::detect("ΕΞΟΔΟΣ"), Some(Intent::Exit));
    }

    #[test]
    fn detect_tolerates_wrapping_words() {
        assert_eq!(
            Intent::detect("Η ΚΑΤΗΓΟΡΙΑ ΕΙΝΑΙ: ΑΚΥΡΩΣΗ."),
            Some(Intent::Cancellation)
        );
        assert_eq!(
            Intent::detect("ΠΡΟΣΦΟΡΕΣ & ΕΚΠΤΩΣΕΙΣ ΦΥΣΙΚΑ"),
            Some(Intent::Discount)
        );
    }

    #[test]
    fn detect_returns_none_for_garbage() {
        assert_eq!(Intent::detect("I HAVE NO IDEA"), None);
        assert_eq!(Intent::detect(""), None);
    }

    #[test]
    fn detect_prefers_declaration_order() {
        // Both labels present: first in ALL wins.
        assert_eq!(Intent::detect("ΚΡΑΤΗΣΗ Ή ΑΚΥΡΩΣΗ"), Some(Intent::Booking));
    }
}
