//! Display and FromStr for fieldless enums with snake_case names
//!
//! ```rust
//! use qbis_domain::impl_snake_case_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Domain {
//!     SalaryTime,
//!     ProjectTime,
//! }
//!
//! impl_snake_case_conversions!(Domain {
//!     SalaryTime => "salary_time",
//!     ProjectTime => "project_time",
//! });
//!
//! assert_eq!(Domain::SalaryTime.to_string(), "salary_time");
//! assert_eq!("PROJECT_TIME".parse::<Domain>(), Ok(Domain::ProjectTime));
//! ```

/// Implements `Display` (the given name) and case-insensitive `FromStr`.
#[macro_export]
macro_rules! impl_snake_case_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
