//! The universal consent schema.
//!
//! Every CMP cookie is normalized into a [`ConsentSchema`], made of four [`Consent`] values.
//!
use crate::vendors::VendorSignal;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// The state of consent for a single category.
///
/// With the `serde` feature enabled, values are serialized as `true`, `false` and `null`
/// respectively.
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Option<bool>", into = "Option<bool>")
)]
#[strum(serialize_all = "lowercase")]
pub enum Consent {
    Granted,
    Denied,
    /// No decodable consent signal was found.
    ///
    /// Consumers must not treat this as either granted or denied.
    #[default]
    Unknown,
}

impl Consent {
    /// Returns the consent as a boolean, or [`None`] if it is unknown.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Consent::Granted => Some(true),
            Consent::Denied => Some(false),
            Consent::Unknown => None,
        }
    }

    /// Returns `true` if consent was explicitly granted or denied.
    pub fn is_known(self) -> bool {
        self != Consent::Unknown
    }
}

impl From<bool> for Consent {
    fn from(granted: bool) -> Self {
        if granted {
            Consent::Granted
        } else {
            Consent::Denied
        }
    }
}

impl From<Option<bool>> for Consent {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Consent::Unknown, Consent::from)
    }
}

impl From<Consent> for Option<bool> {
    fn from(consent: Consent) -> Self {
        consent.as_bool()
    }
}

/// Consent normalized across all supported CMP vendors.
///
/// The default value has all categories unknown, except for [`necessary`](Self::necessary)
/// which is always considered granted.
///
/// # Example
///
/// ```
/// use cmp_consent::schema::{Consent, ConsentSchema};
///
/// let consent = ConsentSchema::default();
///
/// assert_eq!(consent.marketing, Consent::Unknown);
/// assert_eq!(consent.necessary, Consent::Granted);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsentSchema {
    pub marketing: Consent,
    pub analytics: Consent,
    pub functional: Consent,
    pub necessary: Consent,
}

impl Default for ConsentSchema {
    fn default() -> Self {
        Self {
            marketing: Consent::Unknown,
            analytics: Consent::Unknown,
            functional: Consent::Unknown,
            necessary: Consent::Granted,
        }
    }
}

impl ConsentSchema {
    /// Overwrites every category supplied by the signal, leaving the others untouched.
    pub fn apply(&mut self, signal: &VendorSignal) {
        let fields = [
            (&mut self.marketing, signal.marketing),
            (&mut self.analytics, signal.analytics),
            (&mut self.functional, signal.functional),
        ];

        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(true => Consent::Granted)]
    #[test_case(false => Consent::Denied)]
    fn from_bool(b: bool) -> Consent {
        Consent::from(b)
    }

    #[test_case(Consent::Granted => Some(true))]
    #[test_case(Consent::Denied => Some(false))]
    #[test_case(Consent::Unknown => None)]
    fn as_bool(c: Consent) -> Option<bool> {
        c.as_bool()
    }

    #[test_case(Consent::Granted => true)]
    #[test_case(Consent::Denied => true)]
    #[test_case(Consent::Unknown => false)]
    fn is_known(c: Consent) -> bool {
        c.is_known()
    }

    #[test_case(Consent::Granted => "granted")]
    #[test_case(Consent::Unknown => "unknown")]
    fn display(c: Consent) -> String {
        c.to_string()
    }

    #[test]
    fn apply_overwrites_supplied_fields_only() {
        let mut consent = ConsentSchema {
            marketing: Consent::Granted,
            analytics: Consent::Granted,
            functional: Consent::Granted,
            necessary: Consent::Granted,
        };

        consent.apply(&VendorSignal {
            marketing: Some(Consent::Unknown),
            analytics: Some(Consent::Denied),
            functional: None,
        });

        assert_eq!(
            consent,
            ConsentSchema {
                marketing: Consent::Unknown,
                analytics: Consent::Denied,
                functional: Consent::Granted,
                necessary: Consent::Granted,
            }
        );
    }

    #[test]
    fn apply_empty_signal() {
        let mut consent = ConsentSchema::default();
        consent.apply(&VendorSignal::default());
        assert_eq!(consent, ConsentSchema::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize_as_nullable_booleans() {
        let consent = ConsentSchema {
            analytics: Consent::Denied,
            ..ConsentSchema::default()
        };

        assert_eq!(
            serde_json::to_value(consent).unwrap(),
            serde_json::json!({
                "marketing": null,
                "analytics": false,
                "functional": null,
                "necessary": true,
            })
        );
    }
}
