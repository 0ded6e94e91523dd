use serde::{Deserialize, Serialize};

/// A bookable trip as returned by `GET /viajes/disponibles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "categoria")]
    pub category: String,
    /// Destination as "City, Country" in one string.
    #[serde(rename = "ciudadDestino")]
    pub destination: String,
    #[serde(rename = "fechaIda")]
    pub departure_date: String,
    #[serde(rename = "precioBase")]
    pub base_price: f64,
    #[serde(rename = "imagen")]
    pub image_url: String,
}

impl Trip {
    /// Split the destination into city and country. The service packs both
    /// into one comma-separated field; a value without a comma is city-only.
    pub fn location(&self) -> (String, Option<String>) {
        match self.destination.split_once(',') {
            Some((city, country)) => {
                (city.trim().to_string(), Some(country.trim().to_string()))
            }
            None => (self.destination.trim().to_string(), None),
        }
    }

    pub fn display_price(&self) -> String {
        format!("From ${:.2}", self.base_price)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_format() {
        let trip: Trip = serde_json::from_str(
            r#"{
                "categoria": "Aventura",
                "ciudadDestino": "Cusco, Perú",
                "fechaIda": "2025-06-15",
                "precioBase": 349.5,
                "imagen": "https://example.com/cusco.jpeg"
            }"#,
        )
        .unwrap();
        assert!(trip.id.is_none());
        assert_eq!(trip.category, "Aventura");
        assert_eq!(trip.destination, "Cusco, Perú");
        assert_eq!(trip.base_price, 349.5);
    }

    #[test]
    fn test_location_splits_city_and_country() {
        let trip = Trip {
            id: None,
            category: "Playa".to_string(),
            destination: "Cancún , México".to_string(),
            departure_date: "2025-07-01".to_string(),
            base_price: 500.0,
            image_url: String::new(),
        };
        assert_eq!(
            trip.location(),
            ("Cancún".to_string(), Some("México".to_string()))
        );
    }

    #[test]
    fn test_location_without_country() {
        let trip = Trip {
            id: None,
            category: "Tour".to_string(),
            destination: "Lima".to_string(),
            departure_date: "2025-07-01".to_string(),
            base_price: 100.0,
            image_url: String::new(),
        };
        assert_eq!(trip.location(), ("Lima".to_string(), None));
    }

    #[test]
    fn test_display_price() {
        let trip = Trip {
            id: None,
            category: "Tour".to_string(),
            destination: "Lima".to_string(),
            departure_date: "2025-07-01".to_string(),
            base_price: 349.0,
            image_url: String::new(),
        };
        assert_eq!(trip.display_price(), "From $349.00");
    }
}
