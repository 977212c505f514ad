use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;

use crate::services::validation::{self, FieldError};
use crate::services::{GymInput, ImageUpload};

/// Values submitted through the add form, kept as typed so the form can be
/// re-rendered unchanged when validation fails.
#[derive(Debug, Default)]
pub struct AddGymForm {
    pub name: String,
    pub location: String,
    pub price: String,
    pub opening: String,
    pub closing: String,
    pub review: String,
    pub website: String,
    pub csrf_token: String,
    pub image: Option<ImageUpload>,
}

impl AddGymForm {
    /// Reads every part of a multipart submission. Unknown parts are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "image" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                continue;
            }

            let value = field.text().await?;
            match name.as_str() {
                "name" => form.name = value,
                "location" => form.location = value,
                "price" => form.price = value,
                "opening" => form.opening = value,
                "closing" => form.closing = value,
                "review" => form.review = value,
                "website" => form.website = value,
                "csrf_token" => form.csrf_token = value,
                _ => {}
            }
        }

        Ok(form)
    }

    /// Runs every field check and returns all failures, CSRF first.
    #[must_use]
    pub fn validate(&self, expected_csrf: Option<&str>) -> Vec<FieldError> {
        let mut errors = Vec::new();

        match expected_csrf {
            None => errors.push(FieldError::new(
                "csrf_token",
                "The CSRF session token is missing.",
            )),
            Some(_) if self.csrf_token.is_empty() => {
                errors.push(FieldError::new("csrf_token", "The CSRF token is missing."));
            }
            Some(expected) if expected != self.csrf_token => {
                errors.push(FieldError::new("csrf_token", "The CSRF token is invalid."));
            }
            Some(_) => {}
        }

        let checks = [
            validation::require("name", Some(self.name.as_str())),
            validation::require("location", Some(self.location.as_str())),
            validation::require("opening", Some(self.opening.as_str())),
            validation::require("closing", Some(self.closing.as_str())),
            validation::rating("review", Some(self.review.as_str())),
        ];
        errors.extend(checks.into_iter().filter_map(Result::err));

        errors
    }

    /// Service input built from the text fields. The image is left in place
    /// for [`Self::take_image`].
    #[must_use]
    pub fn to_input(&self) -> GymInput {
        GymInput {
            name: Some(self.name.clone()),
            location: Some(self.location.clone()),
            monthly_sub_price: Some(self.price.clone()),
            opening_time: Some(self.opening.clone()),
            closing_time: Some(self.closing.clone()),
            review: Some(self.review.clone()),
            website_url: Some(self.website.clone()),
        }
    }

    /// Moves the uploaded image out; the text fields stay for re-rendering.
    pub fn take_image(&mut self) -> Option<ImageUpload> {
        self.image.take()
    }
}
