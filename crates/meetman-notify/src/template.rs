//! Message-body templates with `$name` placeholders.
//!
//! Placeholders are extracted when a [`Template`] is constructed, so the
//! required value set is known up front and checked by tests against each
//! fixed template. Rendering with a value missing is a programming defect
//! and surfaces as [`NotifyError::Template`].

use crate::error::{NotifyError, Result};

/// Body sent to every attendee of a meeting.
pub const ATTENDEE_TEMPLATE: &str = "\
You have been invited by $organizer_email to a videoconference on $date.

To join the conference, please follow this link:
  $url
";

/// Body sent to the organizer, with their one-day conference credentials.
pub const ORGANIZER_TEMPLATE: &str = "\
You are the organizer of a videoconference on $date.

To start the conference, please follow this link:
  $url

Your conference login: $organizer_uid
Your password: $organizer_password
Meeting password: $meeting_password

The login is only valid on this date.
";

/// A parsed template: raw text plus the placeholder names it requires.
#[derive(Debug, Clone)]
pub struct Template {
    text: &'static str,
    placeholders: Vec<String>,
}

impl Template {
    pub fn new(text: &'static str) -> Self {
        let mut placeholders = Vec::new();
        let mut rest = text;
        while let Some(pos) = rest.find('$') {
            rest = &rest[pos + 1..];
            let end = rest
                .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                .unwrap_or(rest.len());
            if end > 0 {
                let name = &rest[..end];
                if !placeholders.iter().any(|p| p == name) {
                    placeholders.push(name.to_string());
                }
                rest = &rest[end..];
            }
        }
        Self { text, placeholders }
    }

    /// Placeholder names this template requires, in order of appearance.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Substitute every `$name` with its value from `values`.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text;
        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos + 1..];
            let end = rest
                .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                .unwrap_or(rest.len());
            if end == 0 {
                // A lone '$' is literal text.
                out.push('$');
                continue;
            }
            let name = &rest[..end];
            let value = values
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| *v)
                .ok_or_else(|| NotifyError::Template {
                    placeholder: name.to_string(),
                })?;
            out.push_str(value);
            rest = &rest[end..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_placeholders() {
        let t = Template::new("hello $name, meet at $url");
        let s = t
            .render(&[("name", "Alice"), ("url", "https://x.example")])
            .expect("render");
        assert_eq!(s, "hello Alice, meet at https://x.example");
    }

    #[test]
    fn missing_value_is_template_error() {
        let t = Template::new("hello $name");
        let err = t.render(&[]).unwrap_err();
        assert!(matches!(err, NotifyError::Template { placeholder } if placeholder == "name"));
    }

    #[test]
    fn repeated_placeholder_needs_one_value() {
        let t = Template::new("$url and again $url");
        assert_eq!(t.placeholders(), ["url"]);
        let s = t.render(&[("url", "x")]).expect("render");
        assert_eq!(s, "x and again x");
    }

    #[test]
    fn lone_dollar_is_literal() {
        let t = Template::new("price: 5$ total");
        assert!(t.placeholders().is_empty());
        assert_eq!(t.render(&[]).expect("render"), "price: 5$ total");
    }

    #[test]
    fn attendee_template_placeholder_set() {
        let t = Template::new(ATTENDEE_TEMPLATE);
        assert_eq!(t.placeholders(), ["organizer_email", "date", "url"]);
    }

    #[test]
    fn organizer_template_placeholder_set() {
        let t = Template::new(ORGANIZER_TEMPLATE);
        assert_eq!(
            t.placeholders(),
            [
                "date",
                "url",
                "organizer_uid",
                "organizer_password",
                "meeting_password"
            ]
        );
    }
}
