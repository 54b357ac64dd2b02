//! Fixed choice sets stored as short text codes.
//!
//! Each enum's codes match the `CHECK` constraint on the corresponding
//! database column.

use crate::validation::ValidationError;

/// Define a `Copy` enum whose variants map to a stored code.
macro_rules! define_code_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// The code stored in the database.
            pub fn code(self) -> &'static str {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            /// Look up a variant by its stored code (exact match).
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

pub(crate) use define_code_enum;

/// Parse an optional choice field. Blank input is treated as absent; an
/// unknown code is reported as [`ValidationError::InvalidChoice`].
pub(crate) fn parse_choice<T>(
    field: &'static str,
    raw: Option<&str>,
    from_code: fn(&str) -> Option<T>,
) -> Result<Option<T>, ValidationError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(code) => from_code(code)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidChoice {
                field,
                value: code.to_string(),
            }),
    }
}

define_code_enum! {
    /// Student gender.
    Gender {
        Male = "M",
        Female = "F",
        Other = "O",
    }
}

define_code_enum! {
    /// Student year level.
    YearLevel {
        Freshman = "1",
        Sophomore = "2",
        Junior = "3",
        Senior = "4",
        Graduate = "G",
    }
}

define_code_enum! {
    /// Enrollment lifecycle status.
    EnrollmentStatus {
        Enrolled = "E",
        Dropped = "D",
        Completed = "C",
        Withdrawn = "W",
    }
}

impl Default for EnrollmentStatus {
    fn default() -> Self {
        Self::Enrolled
    }
}
