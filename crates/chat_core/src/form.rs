//! Form-data helpers for the message composer.

/// Ordered name/value pairs, as a browser would serialize a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    fields: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a field, replacing an earlier value of the same name in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for FormFields {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut form = FormFields::new();
        for (name, value) in iter {
            form.set(name, value);
        }
        form
    }
}

/// Collapses a serialized form into the request payload. Later duplicates win
/// and the `next` redirect field never leaves the client.
pub fn form_to_dict<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> FormFields {
    let mut dict: FormFields = fields.into_iter().collect();
    dict.remove("next");
    dict
}

/// True when the `body` field is missing or only whitespace.
pub fn is_blank_body(fields: &FormFields) -> bool {
    fields.get("body").is_none_or(|body| body.trim().is_empty())
}
