//! Request, response and business types shared by routes, services and storage.

/// Declares a closed set of string values stored as text in the database.
///
/// Generates the serde and TypeScript derives plus `as_str`, `Display`
/// and `FromStr`, so values round-trip between JSON, SQL and query strings.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            ts_rs::TS,
        )]
        $(#[$meta])*
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!(
                        "Invalid {}: '{}'. Expected one of: {}",
                        stringify!($name),
                        s,
                        [$($value),+].join(", ")
                    )),
                }
            }
        }
    };
}

pub mod academics;
pub mod admissions;
pub mod assessments;
pub mod attendance;
pub mod auth;
pub mod blog;
pub mod common;
pub mod dashboard;
pub mod fees;
pub mod grades;
pub mod hr;
pub mod inventory;
pub mod messaging;
pub mod parents;
pub mod students;
pub mod system;
pub mod teachers;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery,
};

/// Process start time, used for uptime reporting.
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    string_enum! {
        pub enum Colour {
            Red => "red",
            DarkBlue => "dark_blue",
        }
    }

    #[test]
    fn test_string_enum_round_trip() {
        assert_eq!(Colour::DarkBlue.as_str(), "dark_blue");
        assert_eq!("red".parse::<Colour>(), Ok(Colour::Red));
        assert!("green".parse::<Colour>().is_err());
        assert_eq!(
            serde_json::to_string(&Colour::DarkBlue).expect("serializable"),
            "\"dark_blue\""
        );
        let parsed: Colour = serde_json::from_str("\"red\"").expect("valid variant");
        assert_eq!(parsed, Colour::Red);
        assert_eq!(Colour::ALL.len(), 2);
    }
}
