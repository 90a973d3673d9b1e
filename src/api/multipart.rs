use reqwest::multipart::{Form, Part};

use super::ApiError;
use crate::models::PhotoUpload;

/// One multipart field
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(PhotoUpload),
}

/// Ordered multipart fields, kept inspectable until they are turned into a
/// `reqwest` form at send time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    fields: Vec<(String, FormValue)>,
}

/// Drafts that are submitted as multipart form data
pub trait MultipartPayload {
    fn to_form_fields(&self) -> FormFields;
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl ToString) -> Self {
        self.fields
            .push((name.to_string(), FormValue::Text(value.to_string())));
        self
    }

    /// Append the field only when a value is present
    pub fn optional<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    /// Append `name[0]`, `name[1]`, ... for each value
    pub fn indexed<V: ToString>(mut self, name: &str, values: &[V]) -> Self {
        for (index, value) in values.iter().enumerate() {
            self.fields.push((
                format!("{}[{}]", name, index),
                FormValue::Text(value.to_string()),
            ));
        }
        self
    }

    /// Append the file only when one was picked
    pub fn file(mut self, name: &str, photo: Option<&PhotoUpload>) -> Self {
        if let Some(photo) = photo {
            self.fields
                .push((name.to_string(), FormValue::File(photo.clone())));
        }
        self
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, v)| match v {
            FormValue::Text(text) if n == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn get_file(&self, name: &str) -> Option<&PhotoUpload> {
        self.fields.iter().find_map(|(n, v)| match v {
            FormValue::File(photo) if n == name => Some(photo),
            _ => None,
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_form(self) -> Result<Form, ApiError> {
        let mut form = Form::new();

        for (name, value) in self.fields {
            form = match value {
                FormValue::Text(text) => form.text(name, text),
                FormValue::File(photo) => {
                    let part = Part::bytes(photo.bytes.to_vec())
                        .file_name(photo.file_name.clone())
                        .mime_str(photo.content_type.as_ref())
                        .map_err(|e| {
                            ApiError::BadRequest(format!(
                                "Invalid content type for {}: {}",
                                photo.file_name, e
                            ))
                        })?;
                    form.part(name, part)
                }
            };
        }

        Ok(form)
    }
}
