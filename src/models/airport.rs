use serde::{Deserialize, Serialize};

crate::define_id_type!(AirportId);

/// An airfield the operator serves. Referenced elsewhere by its short code,
/// not by id, matching how dispatchers talk about positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: AirportId,
    /// IATA-style code, uppercased, at most four characters.
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
}

impl Airport {
    pub fn new(code: &str, name: &str, country: &str) -> Self {
        Self {
            id: AirportId::generate(),
            code: normalize_code(code),
            name: name.to_string(),
            country: country.to_string(),
        }
    }
}

/// Uppercase and clamp an airport code to four characters.
pub fn normalize_code(code: &str) -> String {
    let mut c = code.trim().to_ascii_uppercase();
    c.truncate(4);
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_normalized() {
        let ap = Airport::new(" fbm ", "Lubumbashi Intl", "DRC");
        assert_eq!(ap.code, "FBM");
    }

    #[test]
    fn test_code_is_clamped() {
        assert_eq!(normalize_code("abcdef"), "ABCD");
    }
}
