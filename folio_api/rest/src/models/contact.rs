use std::collections::HashMap;

use folio_models::contact::{
    ContactMessage, ContactMessageAuthor, ContactMessageAuthorEmail, ContactMessageAuthorName,
    ContactMessageContent,
};

/// Form fields of a contact request, independent of the body encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiContactForm(pub HashMap<String, String>);

impl ApiContactForm {
    fn take(&mut self, key: &str) -> String {
        self.0.remove(key).unwrap_or_default()
    }
}

impl FromIterator<(String, String)> for ApiContactForm {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// At least one of `name`, `email` and `message` is missing or blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingFields;

impl TryFrom<ApiContactForm> for ContactMessage {
    type Error = MissingFields;

    fn try_from(mut value: ApiContactForm) -> Result<Self, Self::Error> {
        let name = ContactMessageAuthorName::try_from(value.take("name"));
        let email = ContactMessageAuthorEmail::try_from(value.take("email"));
        let content = ContactMessageContent::try_from(value.take("message"));

        match (name, email, content) {
            (Ok(name), Ok(email), Ok(content)) => Ok(Self {
                author: ContactMessageAuthor { name, email },
                content,
            }),
            _ => Err(MissingFields),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> ApiContactForm {
        fields
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    #[test]
    fn complete() {
        let message = ContactMessage::try_from(form(&[
            ("name", " Alice "),
            ("email", "a@example.com"),
            ("message", "Hi\n"),
            ("extra", "ignored"),
        ]))
        .unwrap();

        assert_eq!(*message.author.name, "Alice");
        assert_eq!(*message.author.email, "a@example.com");
        assert_eq!(*message.content, "Hi");
    }

    #[test]
    fn missing_or_blank() {
        for fields in [
            &[][..],
            &[("name", "Alice"), ("email", "a@example.com")][..],
            &[("name", "Alice"), ("email", "   "), ("message", "Hi")][..],
            &[("name", ""), ("email", "a@example.com"), ("message", "Hi")][..],
            &[("Name", "Alice"), ("email", "a@example.com"), ("message", "Hi")][..],
        ] {
            assert_eq!(ContactMessage::try_from(form(fields)), Err(MissingFields));
        }
    }
}
