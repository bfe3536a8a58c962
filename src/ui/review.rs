use crate::form::aggregator::PostForm;
use crate::form::category;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme;

const NOT_SET: &str = "—";

/// Read-only recap of the payload shown above the post button.
pub fn summary_lines(form: &PostForm) -> Vec<SpanLine> {
    let payload = form.payload();
    let user = form.user();
    let mut lines = vec![vec![Span::styled("  Summary", theme::heading())]];

    let category = category::find(&payload.category)
        .map(|category| category.name.to_string())
        .unwrap_or_default();
    lines.push(row("Category", &category));
    lines.push(row("Title", &payload.title));
    lines.push(row("Price", &price(&payload.price)));

    let attributes: Vec<String> = payload
        .attributes
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!("{name}: {value}"))
        .collect();
    lines.push(row("Details", &attributes.join(", ")));

    let photos = match payload.photos.len() {
        0 => String::new(),
        1 => "1 photo".to_string(),
        n => format!("{n} photos"),
    };
    lines.push(row("Photos", &photos));

    let location = &payload.location;
    let place: Vec<&str> = [
        location.neighborhood.as_str(),
        location.city.as_str(),
        location.state.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect();
    lines.push(row("Location", &place.join(", ")));
    lines.push(row("Seller", &user.name));
    if !user.phone.is_empty() {
        lines.push(row("Phone", &format!("+91 {}", user.phone)));
    }
    lines.push(Vec::new());
    lines
}

fn price(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    format!("₹ {raw}")
}

fn row(label: &str, value: &str) -> SpanLine {
    let mut line = vec![Span::styled(format!("    {label:<10}"), theme::muted())];
    if value.is_empty() {
        line.push(Span::styled(NOT_SET, theme::muted()));
    } else {
        line.push(Span::new(value));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::summary_lines;
    use crate::form::aggregator::PostForm;
    use crate::form::location::Location;
    use crate::form::payload::{Section, SectionChange};
    use crate::ui::span::line_text;

    fn texts(form: &PostForm) -> Vec<String> {
        summary_lines(form).iter().map(line_text).collect()
    }

    #[test]
    fn empty_form_shows_placeholders() {
        let lines = texts(&PostForm::new());
        assert!(lines.iter().any(|line| line.contains("Title") && line.ends_with('—')));
        assert!(!lines.iter().any(|line| line.contains("Phone")));
    }

    #[test]
    fn filled_values_are_listed() {
        let mut form = PostForm::new();
        form.apply(SectionChange::whole(Section::Price, "4500"));
        form.apply(SectionChange::field(Section::Attributes, "bhk", "2"));
        form.apply(SectionChange::whole(
            Section::Location,
            Location::new("Delhi", "Delhi", "Rohini"),
        ));
        form.apply(SectionChange::field(Section::User, "phone", "98100"));

        let lines = texts(&form);
        assert!(lines.iter().any(|line| line.ends_with("₹ 4500")));
        assert!(lines.iter().any(|line| line.ends_with("bhk: 2")));
        assert!(lines.iter().any(|line| line.ends_with("Rohini, Delhi, Delhi")));
        assert!(lines.iter().any(|line| line.ends_with("+91 98100")));
    }
}
