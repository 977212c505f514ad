//! Server-rendered HTML pages. Every piece of user-supplied text goes through
//! `html_escape` before it reaches the markup.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use super::form::AddGymForm;
use crate::models::gym::Gym;
use crate::services::FieldError;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:960px}\
table{border-collapse:collapse;width:100%}td,th{border:1px solid #ccc;padding:.4rem}\
.error{color:#b00020;font-size:.9rem}label{display:block;margin-top:.6rem}\
img{max-width:120px}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/gyms\">All gyms</a> | <a href=\"/add\">Add a gym</a></nav>\n\
         {body}\n</body>\n</html>\n",
        text(title)
    )
}

#[must_use]
pub fn home_page() -> String {
    layout(
        "Gym Registry",
        "<h1>Gym Registry</h1>\n\
         <p>Browse the <a href=\"/gyms\">registered gyms</a> or <a href=\"/add\">add a new one</a>.</p>\n\
         <h2>API</h2>\n<ul>\n\
         <li><code>GET /api/gym/random</code></li>\n\
         <li><code>GET /api/gym/all</code></li>\n\
         <li><code>GET /api/gym/search?loc=...</code></li>\n\
         <li><code>POST /api/gym/add</code></li>\n\
         <li><code>PATCH /api/gym/update-price/{id}?new_price=...</code></li>\n\
         <li><code>DELETE /api/gym/delete/{id}?api-key=...</code></li>\n\
         </ul>",
    )
}

/// The add form, pre-filled with `values` and annotated with `errors`.
#[must_use]
pub fn add_page(values: &AddGymForm, csrf_token: &str, errors: &[FieldError]) -> String {
    let mut body = String::from("<h1>Add a gym</h1>\n");

    let fields = [
        ("name", "Name", values.name.as_str()),
        ("location", "Location", values.location.as_str()),
        ("price", "Monthly subscription price", values.price.as_str()),
        ("opening", "Opening time", values.opening.as_str()),
        ("closing", "Closing time", values.closing.as_str()),
        ("review", "Review (0-5)", values.review.as_str()),
        ("website", "Website URL", values.website.as_str()),
    ];

    // Errors not tied to a visible input go above the form.
    let is_input = |field: &str| fields.iter().any(|(name, _, _)| *name == field);
    for err in errors.iter().filter(|e| !is_input(e.field)) {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", text(&err.message));
    }

    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"/add\" enctype=\"multipart/form-data\" novalidate>\n\
         <input type=\"hidden\" name=\"csrf_token\" value=\"{}\">",
        attr(csrf_token)
    );

    for (name, label, value) in fields {
        let _ = writeln!(
            body,
            "<label for=\"{name}\">{label}</label>\n\
             <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\">",
            attr(value)
        );
        for err in errors.iter().filter(|e| e.field == name) {
            let _ = writeln!(body, "<span class=\"error\">{}</span>", text(&err.message));
        }
    }

    body.push_str(
        "<label for=\"image\">Image (optional)</label>\n\
         <input type=\"file\" id=\"image\" name=\"image\" accept=\"image/*\">\n\
         <p><button type=\"submit\">Add gym</button></p>\n</form>",
    );

    layout("Add a gym", &body)
}

#[must_use]
pub fn gyms_page(gyms: &[Gym]) -> String {
    let mut body = String::from("<h1>All gyms</h1>\n");

    if gyms.is_empty() {
        body.push_str("<p>No gyms yet. <a href=\"/add\">Add the first one</a>.</p>");
        return layout("All gyms", &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>Name</th><th>Location</th><th>Price</th><th>Opening</th>\
         <th>Closing</th><th>Review</th><th>Website</th><th>Image</th></tr></thead>\n<tbody>\n",
    );

    for gym in gyms {
        let opt = |v: &Option<String>| text(v.as_deref().unwrap_or_default()).into_owned();

        let website = match gym.website_url.as_deref() {
            Some(url) if !url.is_empty() => {
                format!("<a href=\"{}\">Visit</a>", attr(url))
            }
            _ => String::new(),
        };

        let image = match gym.image_file.as_deref() {
            Some(file) => format!(
                "<a href=\"/uploads/{0}\"><img src=\"/uploads/{0}\" alt=\"{1}\"></a>",
                attr(file),
                attr(&gym.name)
            ),
            None => String::new(),
        };

        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{website}</td><td>{image}</td></tr>",
            text(&gym.name),
            text(&gym.location),
            text(&gym.monthly_sub_price),
            opt(&gym.opening_time),
            opt(&gym.closing_time),
            opt(&gym.review),
        );
    }

    body.push_str("</tbody>\n</table>");
    layout("All gyms", &body)
}

#[must_use]
pub fn error_page(message: &str) -> String {
    layout(
        "Something went wrong",
        &format!("<h1>Something went wrong</h1>\n<p>{}</p>", text(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gym(name: &str) -> Gym {
        Gym {
            id: 1,
            name: name.to_string(),
            location: "Austin".to_string(),
            monthly_sub_price: "$40".to_string(),
            opening_time: Some("06:00".to_string()),
            closing_time: None,
            review: Some("4".to_string()),
            website_url: Some("https://example.com/?a=1&b=2".to_string()),
            image_file: Some("front.jpg".to_string()),
        }
    }

    #[test]
    fn gyms_page_escapes_user_text() {
        let html = gyms_page(&[gym("<script>alert(1)</script>")]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("href=\"/uploads/front.jpg\""));
        assert!(html.contains("a=1&amp;b=2"));
    }

    #[test]
    fn empty_list_links_to_form() {
        assert!(gyms_page(&[]).contains("Add the first one"));
    }

    #[test]
    fn add_page_keeps_values_and_shows_errors() {
        let values = AddGymForm {
            name: "\"Quoted\" Gym".to_string(),
            ..AddGymForm::default()
        };
        let errors = [FieldError::new("location", "This field is required.")];

        let html = add_page(&values, "tok", &errors);
        assert!(html.contains("value=\"&quot;Quoted&quot; Gym\""));
        assert!(html.contains("name=\"csrf_token\" value=\"tok\""));
        assert!(html.contains("This field is required."));
    }
}
