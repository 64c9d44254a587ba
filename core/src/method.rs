#![deny(missing_docs)]

//! # HTTP Methods
//!
//! The fixed set of verbs a path may declare in a contract surface.

use std::fmt;
use std::str::FromStr;

use crate::error::SuiteError;

/// One of the HTTP verbs a [`crate::MethodMap`] has a slot for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Number of supported methods.
    pub const COUNT: usize = 5;

    /// Every method, in the order the generator enumerates them.
    pub const ALL: [Method; Method::COUNT] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    /// Upper-case verb, as used in test entry labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Position of this method in [`Method::ALL`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = SuiteError;

    /// Case-insensitive, so OpenAPI path item keys (`get`, `post`) parse too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SuiteError::UnknownMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_upper_case() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_parse_openapi_keys() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("Patch".parse::<Method>().unwrap(), Method::Patch);
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
    }

    #[test]
    fn test_parse_unsupported_verb() {
        let err = "options".parse::<Method>().unwrap_err();
        assert!(matches!(err, SuiteError::UnknownMethod(ref s) if s == "options"));
    }

    #[test]
    fn test_index_matches_enumeration_order() {
        for (i, m) in Method::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn test_serializes_as_verb() {
        let json = serde_json::to_string(&Method::Put).unwrap();
        assert_eq!(json, "\"PUT\"");
    }
}
