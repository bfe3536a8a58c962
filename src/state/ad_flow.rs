use std::sync::Arc;

use crate::config::AppConfig;
use crate::form::attributes::{AttributeKey, AttributeKind};
use crate::form::category::CATEGORIES;
use crate::form::location::LocationSelection;
use crate::form::payload::{ChangeTarget, Section};
use crate::form::preview::PreviewRegistry;
use crate::form::validation::{
    DESCRIPTION_REQUIRED, PRICE_REQUIRED, TITLE_REQUIRED, attribute_required,
};
use crate::state::step::Step;
use crate::ui::theme;
use crate::widgets::components::location::LocationSection;
use crate::widgets::components::photo_uploader::PhotoUploader;
use crate::widgets::inputs::button::ButtonInput;
use crate::widgets::inputs::choice::{ChoiceInput, ChoiceOption};
use crate::widgets::inputs::select::SelectInput;
use crate::widgets::inputs::text::TextInput;
use crate::widgets::node::Node;
use crate::widgets::outputs::text::Text;
use crate::widgets::validators::DIGITS_ONLY;

pub const TITLE_MAX_LEN: usize = 70;
pub const DESCRIPTION_MAX_LEN: usize = 4096;
pub const NAME_MAX_LEN: usize = 30;

pub const REVIEW_STEP_ID: &str = "review";
pub const SUBMIT_ID: &str = "submit";
pub const USER_NAME_ID: &str = "user.name";

const FIELD_HINT: &str = "Tab/Shift+Tab fields  •  PgDn/PgUp steps  •  Ctrl+S post  •  Esc quit";

/// Every screen of the ad form, in order.
pub fn build_steps(config: &AppConfig, previews: PreviewRegistry) -> Vec<Step> {
    vec![
        step_category(),
        step_details(),
        step_description(),
        step_price(),
        step_photos(previews),
        step_location(config),
        step_user(config),
        step_review(),
    ]
}

fn step_category() -> Step {
    let options = CATEGORIES
        .iter()
        .map(|category| ChoiceOption::new(category.id, category.name))
        .collect();
    Step::new(
        "category",
        "CHOOSE A CATEGORY",
        vec![Node::input(
            ChoiceInput::new("category", "Category", options)
                .with_change_target(ChangeTarget::whole(Section::Category)),
        )],
    )
    .with_hint("←/→ browse  •  Space select  •  Enter select and continue")
}

fn step_details() -> Step {
    let nodes = AttributeKey::ALL.into_iter().map(attribute_node).collect();
    Step::new("details", "INCLUDE SOME DETAILS", nodes).with_hint(FIELD_HINT)
}

pub(crate) fn attribute_node_id(key: AttributeKey) -> String {
    format!("attr.{}", key.name())
}

fn attribute_node(key: AttributeKey) -> Node {
    let id = attribute_node_id(key);
    let target = ChangeTarget::field(Section::Attributes, key.name());
    match key.kind() {
        AttributeKind::Choice => {
            let options = key.options().iter().copied().map(ChoiceOption::plain).collect();
            let mut input = ChoiceInput::new(id, key.label(), options).with_change_target(target);
            if key.is_required() {
                input = input.required(attribute_required(key));
            }
            Node::input(input)
        }
        AttributeKind::Dropdown => Node::input(
            SelectInput::new(
                id,
                key.label(),
                format!("Select {}", key.label()),
                key.options().iter().map(|option| option.to_string()).collect(),
            )
            .with_change_target(target),
        ),
        AttributeKind::Text => {
            let mut input = TextInput::new(id, key.label()).with_change_target(target);
            if let Some(max) = key.max_len() {
                input = input.with_max_len(max).with_counter();
            }
            if key.is_required() {
                input = input.required(attribute_required(key));
            }
            Node::input(input)
        }
    }
}

fn step_description() -> Step {
    Step::new(
        "description",
        "TITLE AND DESCRIPTION",
        vec![
            Node::input(
                TextInput::new("title", "Ad title")
                    .with_placeholder(
                        "Mention the key features of your item (e.g. brand, model, age, type)",
                    )
                    .with_max_len(TITLE_MAX_LEN)
                    .with_counter()
                    .with_change_target(ChangeTarget::field(Section::Description, "title"))
                    .required(TITLE_REQUIRED),
            ),
            Node::input(
                TextInput::new("description", "Description")
                    .with_placeholder("Include condition, features and reason for selling")
                    .with_max_len(DESCRIPTION_MAX_LEN)
                    .with_counter()
                    .with_change_target(ChangeTarget::field(Section::Description, "description"))
                    .required(DESCRIPTION_REQUIRED),
            ),
            Node::output(
                Text::new(
                    "description.tip",
                    "Avoid including your phone number, email or website links, they'll be automatically removed.",
                )
                .with_style(theme::muted()),
            ),
        ],
    )
    .with_hint(FIELD_HINT)
}

fn step_price() -> Step {
    Step::new(
        "price",
        "SET A PRICE",
        vec![Node::input(
            TextInput::new("price", "Price")
                .with_prefix("₹ ")
                .with_accept(&DIGITS_ONLY)
                .with_change_target(ChangeTarget::whole(Section::Price))
                .required(PRICE_REQUIRED),
        )],
    )
    .with_hint("Digits only  •  PgDn/PgUp steps  •  Ctrl+S post")
}

fn step_photos(previews: PreviewRegistry) -> Step {
    Step::new(
        "photos",
        "UPLOAD UP TO 20 PHOTOS",
        vec![Node::component(PhotoUploader::new(
            "photos", "Photos", previews,
        ))],
    )
    .with_hint("Enter add path  •  ↑/↓ pick  •  Shift+↑/↓ drag  •  Del remove")
}

fn step_location(config: &AppConfig) -> Step {
    let selection = LocationSelection::new(
        Arc::new(config.locations.clone()),
        config.current_location.clone(),
    );
    Step::new(
        "location",
        "CONFIRM YOUR LOCATION",
        vec![Node::component(LocationSection::new(
            "location", "Location", selection,
        ))],
    )
    .with_hint("←/→ change tab or option  •  ↑/↓ rows  •  Enter next")
}

fn step_user(config: &AppConfig) -> Step {
    Step::new(
        "user",
        "REVIEW YOUR DETAILS",
        vec![
            Node::input(
                TextInput::new(USER_NAME_ID, "Name")
                    .with_max_len(NAME_MAX_LEN)
                    .with_counter()
                    .with_default(config.seller_name.clone())
                    .with_change_target(ChangeTarget::field(Section::User, "name")),
            ),
            Node::output(
                Text::new("user.verify", "Let's verify your account").with_style(theme::heading()),
            ),
            Node::output(
                Text::new(
                    "user.verify.note",
                    "We will send you a confirmation code by sms on the next step.",
                )
                .with_style(theme::muted()),
            ),
            Node::input(
                TextInput::new("user.phone", "Mobile Phone Number")
                    .with_prefix("+91 ")
                    .with_accept(&DIGITS_ONLY)
                    .with_change_target(ChangeTarget::field(Section::User, "phone")),
            ),
        ],
    )
    .with_hint(FIELD_HINT)
}

fn step_review() -> Step {
    Step::new(
        REVIEW_STEP_ID,
        "POST YOUR AD",
        vec![Node::input(ButtonInput::new(SUBMIT_ID, "POST NOW"))],
    )
    .with_hint("Enter post  •  PgUp back  •  Esc quit")
}
