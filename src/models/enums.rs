use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// Stored string values are part of the persisted format (Spanish, matching the
// original registry database) — do not rename without a migration path.

str_enum!(CaptureMethod {
    Image => "imagen",
    Audio => "audio",
});

str_enum!(ResidentRole {
    PrincipalSurgeon => "Cirujano Principal",
    Assistant1 => "Ayudante 1",
    Assistant2 => "Ayudante 2",
});

str_enum!(ResidencyYear {
    First => "1",
    Second => "2",
    Third => "3",
    Fourth => "4",
    Fifth => "5",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn capture_method_round_trips() {
        for method in [CaptureMethod::Image, CaptureMethod::Audio] {
            let parsed = CaptureMethod::from_str(method.as_str()).unwrap();
            assert_eq!(parsed, method);
        }
    }

    #[test]
    fn resident_role_uses_spanish_stored_values() {
        assert_eq!(ResidentRole::PrincipalSurgeon.as_str(), "Cirujano Principal");
        assert_eq!(ResidentRole::Assistant1.as_str(), "Ayudante 1");
        assert_eq!(ResidentRole::Assistant2.as_str(), "Ayudante 2");
    }

    #[test]
    fn residency_year_covers_one_through_five() {
        let years = [
            ResidencyYear::First,
            ResidencyYear::Second,
            ResidencyYear::Third,
            ResidencyYear::Fourth,
            ResidencyYear::Fifth,
        ];
        for (i, year) in years.iter().enumerate() {
            assert_eq!(year.as_str(), (i + 1).to_string());
        }
    }

    #[test]
    fn unknown_stored_value_is_invalid_enum() {
        let err = ResidentRole::from_str("Observador").unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }
}
