//! Sneaker collection loading and startup validation.

use gloo_net::http::Request;
use serde::Deserialize;
use std::fmt;

const SNEAKERS_URL: &str = "info/sneakers-data.json";

/// The drop ships a fixed deck; anything else is a broken build.
pub const EXPECTED_SNEAKER_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sneaker {
    pub name: String,
    pub description: String,
    pub purchase_type: String,
    pub availability_type: String,
    pub images: Vec<String>,
    #[serde(rename = "InfoBox-bg", default)]
    pub info_box_bg: Option<String>,
}

#[derive(Debug)]
pub enum DataError {
    Network(String),
    Parse(String),
    Invalid(String),
}

impl DataError {
    fn network<E: fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Network(msg) => write!(f, "network error: {msg}"),
            DataError::Parse(msg) => write!(f, "malformed sneaker data: {msg}"),
            DataError::Invalid(msg) => write!(f, "invalid sneaker data: {msg}"),
        }
    }
}

pub async fn fetch_sneakers() -> Result<Vec<Sneaker>, DataError> {
    let response = Request::get(SNEAKERS_URL)
        .send()
        .await
        .map_err(DataError::network)?;

    if !response.ok() {
        return Err(DataError::Network(format!(
            "HTTP {} while fetching {}",
            response.status(),
            SNEAKERS_URL
        )));
    }

    let text = response.text().await.map_err(DataError::network)?;
    let sneakers: Vec<Sneaker> = serde_json::from_str(&text).map_err(DataError::parse)?;

    validate_sneakers(&sneakers)?;
    Ok(sneakers)
}

/// Startup integrity check. A wrong count or a record missing any required
/// field is fatal: the app refuses to render a partial deck.
pub fn validate_sneakers(sneakers: &[Sneaker]) -> Result<(), DataError> {
    if sneakers.len() != EXPECTED_SNEAKER_COUNT {
        return Err(DataError::Invalid(format!(
            "expected exactly {} sneakers, found {}",
            EXPECTED_SNEAKER_COUNT,
            sneakers.len()
        )));
    }

    for (index, sneaker) in sneakers.iter().enumerate() {
        let missing = sneaker.name.trim().is_empty()
            || sneaker.description.trim().is_empty()
            || sneaker.purchase_type.trim().is_empty()
            || sneaker.availability_type.trim().is_empty();
        if missing {
            return Err(DataError::Invalid(format!(
                "sneaker {index} is missing required fields"
            )));
        }
        if sneaker.images.is_empty() {
            return Err(DataError::Invalid(format!(
                "sneaker {index} has no image references"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> Sneaker {
        Sneaker {
            name: name.to_string(),
            description: "low-top classic".to_string(),
            purchase_type: "online".to_string(),
            availability_type: "en stock".to_string(),
            images: vec!["dunk-low.jpg".to_string()],
            info_box_bg: Some("bg-[#788d42]".to_string()),
        }
    }

    #[test]
    fn accepts_a_full_deck_of_four() {
        let deck: Vec<Sneaker> = ["a", "b", "c", "d"].iter().map(|n| sample(n)).collect();
        assert!(validate_sneakers(&deck).is_ok());
    }

    #[test]
    fn rejects_wrong_count() {
        let deck: Vec<Sneaker> = ["a", "b", "c"].iter().map(|n| sample(n)).collect();
        assert!(matches!(
            validate_sneakers(&deck),
            Err(DataError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        let mut deck: Vec<Sneaker> = ["a", "b", "c", "d"].iter().map(|n| sample(n)).collect();
        deck[2].description = "  ".to_string();
        assert!(matches!(
            validate_sneakers(&deck),
            Err(DataError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_empty_image_list() {
        let mut deck: Vec<Sneaker> = ["a", "b", "c", "d"].iter().map(|n| sample(n)).collect();
        deck[0].images.clear();
        assert!(matches!(
            validate_sneakers(&deck),
            Err(DataError::Invalid(_))
        ));
    }

    #[test]
    fn deserializes_the_info_box_token() {
        let json = r#"{
            "name": "Dunk Low",
            "description": "classic",
            "purchase_type": "online",
            "availability_type": "stock",
            "images": ["dunk.jpg"],
            "InfoBox-bg": "bg-[#788d42]"
        }"#;
        let sneaker: Sneaker = serde_json::from_str(json).expect("valid json");
        assert_eq!(sneaker.info_box_bg.as_deref(), Some("bg-[#788d42]"));

        let bare = r#"{
            "name": "Blazer",
            "description": "mid",
            "purchase_type": "online",
            "availability_type": "stock",
            "images": ["blazer.jpg"]
        }"#;
        let sneaker: Sneaker = serde_json::from_str(bare).expect("valid json");
        assert_eq!(sneaker.info_box_bg, None);
    }
}
