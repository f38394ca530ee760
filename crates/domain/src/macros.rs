//! Macro for implementing Display and FromStr for small domain enums
//!
//! Used for configuration switches such as [`crate::SourceKind`] and for the
//! coordinator phase, where the string form appears in config files and logs.
//!
//! # Example
//!
//! ```rust
//! use messesinfo_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Feed {
//!     Daily,
//!     Weekly,
//! }
//!
//! impl_domain_status_conversions!(Feed {
//!     Daily => "daily",
//!     Weekly => "weekly",
//! });
//! ```

/// Implements Display and FromStr traits for unit-only enums
///
/// - Display writes the mapped lowercase string
/// - FromStr parses case-insensitively and reports the enum name on failure
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => ::std::write!(f, $str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => ::std::result::Result::Ok(Self::$variant),)+
                    _ => ::std::result::Result::Err(::std::format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
