use serde::{Deserialize, Serialize};

use crate::datetime::format_datetime;

// ============================================================================
// Provider Models (Amadeus Flight Offers Search)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOffer {
    pub price: RawPrice,
    #[serde(default)]
    pub itineraries: Vec<RawItinerary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrice {
    pub total: String,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItinerary {
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    pub departure: RawEndpoint,
    pub arrival: RawEndpoint,
    pub carrier_code: String,
    pub number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEndpoint {
    pub iata_code: String,
    pub at: String,
}

// ============================================================================
// Display Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedOffer {
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub segments: Vec<FormattedSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedSegment {
    pub from: String,
    pub departure: String,
    pub to: String,
    pub arrival: String,
    pub airline: String,
    pub number: String,
}

/// Flattens every itinerary of every offer into one segment list per offer.
///
/// Itinerary boundaries are not kept; segments stay in the order the provider sent them.
pub fn format_offers(raw_offers: &[RawOffer]) -> Vec<FormattedOffer> {
    raw_offers.iter().map(format_offer).collect()
}

fn format_offer(offer: &RawOffer) -> FormattedOffer {
    let segments = offer
        .itineraries
        .iter()
        .flat_map(|itinerary| itinerary.segments.iter())
        .map(format_segment)
        .collect();

    FormattedOffer {
        price: offer.price.total.clone(),
        currency: offer.price.currency.clone(),
        segments,
    }
}

fn format_segment(segment: &RawSegment) -> FormattedSegment {
    FormattedSegment {
        from: segment.departure.iata_code.clone(),
        departure: format_datetime(&segment.departure.at),
        to: segment.arrival.iata_code.clone(),
        arrival: format_datetime(&segment.arrival.at),
        airline: segment.carrier_code.clone(),
        number: segment.number.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ITINERARY_OFFER: &str = r#"
        {
            "type": "flight-offer",
            "id": "1",
            "itineraries": [
                {
                    "duration": "PT7H10M",
                    "segments": [
                        {
                            "departure": { "iataCode": "JFK", "terminal": "7", "at": "2024-06-01T18:30:00" },
                            "arrival": { "iataCode": "LHR", "at": "2024-06-02T06:40:00" },
                            "carrierCode": "BA",
                            "number": "178",
                            "aircraft": { "code": "777" }
                        }
                    ]
                },
                {
                    "duration": "PT8H05M",
                    "segments": [
                        {
                            "departure": { "iataCode": "LHR", "at": "2024-06-10T11:15:00" },
                            "arrival": { "iataCode": "JFK", "at": "2024-06-10T14:20:00" },
                            "carrierCode": "BA",
                            "number": "117"
                        }
                    ]
                }
            ],
            "price": { "currency": "EUR", "total": "642.18", "base": "380.00" }
        }
    "#;

    #[test]
    fn test_itineraries_flattened_in_order() {
        let offer: RawOffer = serde_json::from_str(TWO_ITINERARY_OFFER).expect("Failed to deserialize");
        let formatted = format_offers(&[offer]);

        assert_eq!(formatted.len(), 1);
        let offer = &formatted[0];
        assert_eq!(offer.price, "642.18");
        assert_eq!(offer.currency.as_deref(), Some("EUR"));
        assert_eq!(offer.segments.len(), 2);

        assert_eq!(
            offer.segments[0],
            FormattedSegment {
                from: "JFK".to_string(),
                departure: "Jun 01, 2024 18:30".to_string(),
                to: "LHR".to_string(),
                arrival: "Jun 02, 2024 06:40".to_string(),
                airline: "BA".to_string(),
                number: "178".to_string(),
            }
        );
        assert_eq!(offer.segments[1].from, "LHR");
        assert_eq!(offer.segments[1].number, "117");
    }

    #[test]
    fn test_empty_offer_list() {
        assert!(format_offers(&[]).is_empty());
    }

    #[test]
    fn test_missing_itineraries_yield_no_segments() {
        let offer: RawOffer =
            serde_json::from_str(r#"{ "price": { "total": "99.00" } }"#).expect("Failed to deserialize");
        let formatted = format_offers(&[offer]);
        assert_eq!(formatted[0].price, "99.00");
        assert!(formatted[0].currency.is_none());
        assert!(formatted[0].segments.is_empty());
    }

    #[test]
    fn test_bad_timestamp_does_not_fail_offer() {
        let offer: RawOffer = serde_json::from_str(
            r#"{
                "price": { "total": "120.00" },
                "itineraries": [{ "segments": [{
                    "departure": { "iataCode": "CDG", "at": "soon" },
                    "arrival": { "iataCode": "FCO", "at": "2024-05-01T10:05:00" },
                    "carrierCode": "AF",
                    "number": "1404"
                }]}]
            }"#,
        )
        .expect("Failed to deserialize");

        let segment = &format_offers(&[offer])[0].segments[0];
        assert_eq!(segment.departure, "soon");
        assert_eq!(segment.arrival, "May 01, 2024 10:05");
    }
}
