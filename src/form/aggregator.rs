use tracing::{debug, info, warn};

use crate::core::value::Value;
use crate::form::payload::{FormPayload, Section, SectionChange, UserDetails};
use crate::form::submit::Submission;
use crate::form::validation::{FormError, validate_payload};

/// Owns the combined payload. Sections only ever push values into it.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    payload: FormPayload,
    user: UserDetails,
    banner: Option<FormError>,
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> &FormPayload {
        &self.payload
    }

    pub fn user(&self) -> &UserDetails {
        &self.user
    }

    pub fn banner(&self) -> Option<FormError> {
        self.banner
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    /// Stores the latest value reported by a section. Returns `false` when the
    /// message does not fit the section and was dropped.
    pub fn apply(&mut self, change: SectionChange) -> bool {
        let SectionChange {
            section,
            field,
            value,
        } = change;
        let applied = match (section, field.as_deref(), value) {
            (Section::Category, None, Value::Text(id)) => {
                self.payload.category = id;
                true
            }
            (Section::Description, Some("title"), Value::Text(text)) => {
                self.payload.title = text;
                true
            }
            (Section::Description, Some("description"), Value::Text(text)) => {
                self.payload.description = text;
                true
            }
            (Section::Price, None, Value::Text(price)) => {
                self.payload.price = price;
                true
            }
            (Section::Photos, None, Value::Photos(photos)) => {
                self.payload.photos = photos;
                true
            }
            (Section::Photos, None, Value::None) => {
                self.payload.photos.clear();
                true
            }
            (Section::Attributes, Some(name), Value::Text(text)) => {
                self.payload.attributes.set(name, text);
                true
            }
            (Section::Location, None, Value::Location(location)) => {
                self.payload.location = location;
                true
            }
            (Section::User, Some("name"), Value::Text(name)) => {
                self.user.name = name;
                true
            }
            (Section::User, Some("phone"), Value::Text(phone)) => {
                self.user.phone = phone;
                true
            }
            (section, field, value) => {
                warn!(?section, ?field, ?value, "dropping mismatched section change");
                false
            }
        };
        if applied {
            debug!(?section, ?field, "section change applied");
        }
        applied
    }

    /// Runs the submit gate. On failure the reason becomes the banner.
    pub fn attempt_submit(&mut self) -> Result<Submission, FormError> {
        match validate_payload(&self.payload) {
            Ok(()) => {
                self.banner = None;
                info!("submit gate passed");
                Ok(Submission {
                    payload: self.payload.clone(),
                    seller: self.user.clone(),
                })
            }
            Err(err) => {
                info!(reason = %err, "submit refused");
                self.banner = Some(err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PostForm;
    use crate::core::value::Value;
    use crate::form::location::Location;
    use crate::form::payload::{Section, SectionChange};
    use crate::form::photo::PhotoRef;
    use crate::form::validation::FormError;
    use std::path::PathBuf;

    fn photo(name: &str) -> PhotoRef {
        PhotoRef {
            source: PathBuf::from(name),
            preview_url: format!("preview://1/{name}"),
        }
    }

    fn fill(form: &mut PostForm) {
        form.apply(SectionChange::field(Section::Description, "title", "Flat"));
        form.apply(SectionChange::field(Section::Description, "description", "Nice"));
        form.apply(SectionChange::whole(Section::Price, "100"));
        form.apply(SectionChange::whole(Section::Photos, vec![photo("a.jpg")]));
        form.apply(SectionChange::field(
            Section::Attributes,
            "propertyType",
            "Farm House",
        ));
        form.apply(SectionChange::field(Section::Attributes, "superBuiltupArea", "10"));
        form.apply(SectionChange::field(Section::Attributes, "carpetArea", "8"));
        form.apply(SectionChange::whole(
            Section::Location,
            Location::new("Delhi", "Delhi", "Rohini"),
        ));
    }

    #[test]
    fn latest_value_per_section_wins() {
        let mut form = PostForm::new();
        form.apply(SectionChange::whole(Section::Price, "12"));
        form.apply(SectionChange::whole(Section::Price, "125"));
        form.apply(SectionChange::field(Section::Attributes, "bhk", "2"));
        form.apply(SectionChange::field(Section::Attributes, "bhk", "4+"));

        assert_eq!(form.payload().price, "125");
        assert_eq!(form.payload().attributes.get("bhk"), "4+");
    }

    #[test]
    fn mismatched_changes_are_dropped() {
        let mut form = PostForm::new();
        assert!(!form.apply(SectionChange::whole(Section::Price, Location::default())));
        assert!(!form.apply(SectionChange::field(Section::Description, "body", "x")));
        assert!(form.payload().price.is_empty());
    }

    #[test]
    fn empty_form_banner_is_the_title_message() {
        let mut form = PostForm::new();
        assert_eq!(form.attempt_submit(), Err(FormError::MissingTitle));
        assert_eq!(
            form.banner().map(|err| err.to_string()).as_deref(),
            Some("Please add a title for your ad.")
        );
    }

    #[test]
    fn successful_submit_clears_banner_and_carries_seller() {
        let mut form = PostForm::new();
        form.attempt_submit().unwrap_err();
        fill(&mut form);
        form.apply(SectionChange::field(Section::User, "name", "Ravi"));
        form.apply(SectionChange::field(Section::User, "phone", "98"));

        let submission = form.attempt_submit().unwrap();

        assert!(form.banner().is_none());
        assert_eq!(submission.payload.location.neighborhood, "Rohini");
        assert_eq!(submission.seller.name, "Ravi");
    }

    #[test]
    fn clearing_photos_reopens_the_gate() {
        let mut form = PostForm::new();
        fill(&mut form);
        form.apply(SectionChange::new(Section::Photos, None, Value::None));
        assert_eq!(form.attempt_submit(), Err(FormError::MissingPhotos));
    }
}
