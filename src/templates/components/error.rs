use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Basic HTML error page
pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        html! {
            main class="container" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to all lots" } }
            }
        },
    )
}
