//! JMA area catalog (`area.json`) and prefecture name resolution.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use super::error::ForecastError;

/// Prefecture-level office entry of the area catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "enName")]
    pub en_name: Option<String>,
    #[serde(default, rename = "officeName")]
    pub office_name: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

/// The `offices` subset of the catalog, kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AreaCatalog {
    #[serde(default, deserialize_with = "ordered_offices")]
    pub offices: Vec<(String, Office)>,
}

impl AreaCatalog {
    /// First office whose name contains `input` or is contained in it.
    pub fn resolve(&self, input: &str) -> Result<&str, ForecastError> {
        self.offices
            .iter()
            .find(|(_, office)| matches_name(input, &office.name))
            .map(|(code, _)| code.as_str())
            .ok_or_else(|| ForecastError::AreaNotFound { input: input.to_string() })
    }

    pub fn get(&self, code: &str) -> Option<&Office> {
        self.offices.iter().find(|(c, _)| c == code).map(|(_, o)| o)
    }

    pub fn len(&self) -> usize {
        self.offices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offices.is_empty()
    }
}

// Bidirectional containment. An empty string is a substring of everything,
// so an empty input matches the first office.
fn matches_name(input: &str, name: &str) -> bool {
    name.contains(input) || input.contains(name)
}

fn ordered_offices<'de, D>(de: D) -> Result<Vec<(String, Office)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedVisitor;

    impl<'de> Visitor<'de> for OrderedVisitor {
        type Value = Vec<(String, Office)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of area code to office")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((code, office)) = map.next_entry::<String, Office>()? {
                out.push((code, office));
            }
            Ok(out)
        }
    }

    de.deserialize_map(OrderedVisitor)
}
