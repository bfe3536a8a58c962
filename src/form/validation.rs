use crate::form::attributes::AttributeKey;
use crate::form::payload::FormPayload;

pub const TITLE_REQUIRED: &str = "Title is mandatory. Please complete the required field.";
pub const DESCRIPTION_REQUIRED: &str =
    "Description is mandatory. Please complete the required field.";
pub const PRICE_REQUIRED: &str = "Price is mandatory. Please complete the required field.";
pub const PHOTOS_REQUIRED: &str = "This field is mandatory. Please upload at least one photo.";
pub const LOCATION_REQUIRED: &str = "This field is mandatory";

/// Reason the submit gate refused the payload. `Display` is the banner text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please add a title for your ad.")]
    MissingTitle,
    #[error("Please add a description for your ad.")]
    MissingDescription,
    #[error("Please set a price for your ad.")]
    MissingPrice,
    #[error("Please upload at least one photo.")]
    MissingPhotos,
    #[error("Please select a property type.")]
    MissingPropertyType,
    #[error("Please enter the Super Builtup area sqft.")]
    MissingSuperBuiltupArea,
    #[error("Please enter the Carpet Area sqft.")]
    MissingCarpetArea,
    #[error("Please select your location.")]
    MissingLocation,
}

/// Inline message for a required attribute, e.g. "Type is mandatory. ...".
pub fn attribute_required(key: AttributeKey) -> String {
    format!(
        "{} is mandatory. Please complete the required field.",
        key.label()
    )
}

/// Submit-time gate. Checks every required field regardless of touch state
/// and reports the first unmet condition.
pub fn validate_payload(payload: &FormPayload) -> Result<(), FormError> {
    if payload.title.is_empty() {
        return Err(FormError::MissingTitle);
    }
    if payload.description.is_empty() {
        return Err(FormError::MissingDescription);
    }
    if payload.price.is_empty() {
        return Err(FormError::MissingPrice);
    }
    if payload.photos.is_empty() {
        return Err(FormError::MissingPhotos);
    }
    let attributes = &payload.attributes;
    if attributes.value(AttributeKey::PropertyType).is_empty() {
        return Err(FormError::MissingPropertyType);
    }
    if attributes.value(AttributeKey::SuperBuiltupArea).is_empty() {
        return Err(FormError::MissingSuperBuiltupArea);
    }
    if attributes.value(AttributeKey::CarpetArea).is_empty() {
        return Err(FormError::MissingCarpetArea);
    }
    if payload.location.state.is_empty() || payload.location.city.is_empty() {
        return Err(FormError::MissingLocation);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{FormError, attribute_required, validate_payload};
    use crate::form::attributes::AttributeKey;
    use crate::form::location::Location;
    use crate::form::payload::FormPayload;
    use crate::form::photo::PhotoRef;
    use std::path::PathBuf;

    fn complete() -> FormPayload {
        let mut payload = FormPayload {
            title: "2BHK near metro".into(),
            description: "Sunny flat".into(),
            price: "1500000".into(),
            photos: vec![PhotoRef {
                source: PathBuf::from("a.jpg"),
                preview_url: "preview://1/a.jpg".into(),
            }],
            location: Location::new("Delhi", "Delhi", ""),
            ..FormPayload::default()
        };
        payload.attributes.set("propertyType", "Flats / Apartments");
        payload.attributes.set("superBuiltupArea", "900");
        payload.attributes.set("carpetArea", "750");
        payload
    }

    #[test]
    fn everything_empty_reports_the_title_first() {
        let err = validate_payload(&FormPayload::default()).unwrap_err();
        assert_eq!(err, FormError::MissingTitle);
        assert_eq!(err.to_string(), "Please add a title for your ad.");
    }

    #[test]
    fn complete_payload_passes_without_neighborhood() {
        assert_eq!(validate_payload(&complete()), Ok(()));
    }

    #[test]
    fn first_unmet_condition_wins_in_order() {
        let mut payload = complete();
        payload.attributes.set("carpetArea", "");
        payload.location = Location::default();
        assert_eq!(
            validate_payload(&payload),
            Err(FormError::MissingCarpetArea)
        );

        payload.photos.clear();
        assert_eq!(validate_payload(&payload), Err(FormError::MissingPhotos));
    }

    #[test]
    fn location_needs_state_and_city() {
        let mut payload = complete();
        payload.location = Location::new("Delhi", "", "");
        let err = validate_payload(&payload).unwrap_err();
        assert_eq!(err.to_string(), "Please select your location.");
    }

    #[test]
    fn attribute_messages_use_the_label() {
        assert_eq!(
            attribute_required(AttributeKey::PropertyType),
            "Type is mandatory. Please complete the required field."
        );
        assert_eq!(
            attribute_required(AttributeKey::CarpetArea),
            "Carpet Area sqft is mandatory. Please complete the required field."
        );
    }
}
