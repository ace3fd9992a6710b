use serde::{Deserialize, Serialize};

use crate::{messages::Locale, models::ServiceArea};

/// Result of classifying a postal code. This is also the JSON body of a
/// successful area-check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaCheckResponse {
    pub area: ServiceArea,
    pub is_valid: bool,
    #[serde(default)]
    pub message: String,
}

/// Classifies a 7-digit postal code by its first digit.
///
/// `1` is Tokyo, `5` is Kansai, anything else (including empty input) is out
/// of service and carries the localized rejection message.
pub fn resolve(
    postal_code: &str,
    locale: Locale,
) -> AreaCheckResponse {
    match postal_code.chars().next() {
        Some('1') => AreaCheckResponse {
            area: ServiceArea::Tokyo,
            is_valid: true,
            message: String::new(),
        },
        Some('5') => AreaCheckResponse {
            area: ServiceArea::Kansai,
            is_valid: true,
            message: String::new(),
        },
        _ => AreaCheckResponse {
            area: ServiceArea::OutOfService,
            is_valid: false,
            message: locale.messages().out_of_service_area.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_leading_digit_classifies_as_expected() {
        for digit in 0..=9 {
            let code = format!("{digit}234567");
            let response = resolve(&code, Locale::En);

            match digit {
                1 => {
                    assert_eq!(response.area, ServiceArea::Tokyo);
                    assert!(response.is_valid);
                }
                5 => {
                    assert_eq!(response.area, ServiceArea::Kansai);
                    assert!(response.is_valid);
                }
                _ => {
                    assert_eq!(response.area, ServiceArea::OutOfService);
                    assert!(!response.is_valid);
                    assert!(!response.message.is_empty());
                }
            }
        }
    }

    #[test]
    fn resolve_is_idempotent() {
        assert_eq!(resolve("9876543", Locale::Ja), resolve("9876543", Locale::Ja));
        assert_eq!(resolve("1300012", Locale::En), resolve("1300012", Locale::En));
    }

    #[test]
    fn out_of_service_message_is_localized() {
        assert_eq!(
            resolve("9876543", Locale::Ja).message,
            "サービスエリア対象外です。"
        );
        assert_eq!(
            resolve("9876543", Locale::En).message,
            "Service area not supported."
        );
    }

    #[test]
    fn response_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(resolve("5678901", Locale::En)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "area": "kansai", "isValid": true, "message": "" })
        );
    }
}
