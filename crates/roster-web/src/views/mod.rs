//! Server-side HTML rendering.
//!
//! Every page is wrapped in a shared layout whose `<body>` carries the view
//! name in `data-view`. All interpolated values pass through [`escape`].

mod users;

use roster_config::ViewConfig;
use std::fmt::Write;
use tracing::debug;

/// View names, one per page.
pub mod names {
    pub const USER_LIST: &str = "user-list";
    pub const REGISTER: &str = "register";
    pub const EDIT: &str = "edit";
    pub const CONFIRM_DELETE: &str = "confirm-delete";
    pub const SHOW: &str = "show";
    pub const ERROR: &str = "error";
}

/// Renders pages into complete HTML documents.
#[derive(Debug, Clone)]
pub struct ViewRenderer {
    title: String,
}

impl ViewRenderer {
    /// Creates a renderer from view configuration.
    #[must_use]
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            title: config.title.clone(),
        }
    }

    /// Wraps `body` in the shared layout.
    #[must_use]
    pub fn layout(&self, view: &str, heading: &str, body: &str) -> String {
        debug!(view, "Rendering view");

        let mut html = String::with_capacity(body.len() + 512);
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
             <meta charset=\"utf-8\">\n\
             <title>{title} | {heading}</title>\n\
             </head>\n<body data-view=\"{view}\">\n\
             <header><a href=\"/users\">{title}</a></header>\n\
             <main>\n<h1>{heading}</h1>\n{body}</main>\n</body>\n</html>\n",
            title = escape(&self.title),
            heading = escape(heading),
            view = escape(view),
        );
        html
    }

    /// Renders the error page.
    #[must_use]
    pub fn error(&self, status: u16, message: &str) -> String {
        let body = format!(
            "<p class=\"error\" data-status=\"{status}\">{}</p>\n\
             <p><a href=\"/users\">Back to users</a></p>\n",
            escape(message),
        );
        self.layout(names::ERROR, "Something went wrong", &body)
    }
}

impl Default for ViewRenderer {
    fn default() -> Self {
        Self::new(&ViewConfig::default())
    }
}

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
