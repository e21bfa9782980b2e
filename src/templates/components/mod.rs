use crate::colors::ColorBag;
use crate::domain::{StepState, TimelineStep};
use crate::templates::format::format_date;
use maud::{html, Markup};

pub mod error;

pub use error::error_page;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Badge whose color is reserved for `label` in this view's bag.
pub fn colored_badge(label: &str, bag: &mut ColorBag) -> Markup {
    let color = bag.reserve_color_for_id(label);
    html! {
        span class=(format!("badge badge-{color}")) { (label) }
    }
}

/// Table row that only renders when there is something to show.
pub fn optional_row(label: &str, data: Option<&str>) -> Markup {
    html! {
        @if let Some(data) = data.filter(|d| !d.trim().is_empty()) {
            tr {
                th { (label) }
                td { (data) }
            }
        }
    }
}

pub fn timeline(steps: &[TimelineStep]) -> Markup {
    html! {
        ol class="timeline" {
            @for step in steps {
                @let class = match step.state {
                    StepState::Done => "done",
                    StepState::Current => "current",
                    StepState::Upcoming => "upcoming",
                };
                li class=(class) data-field=(step.field) {
                    (step.label)
                    @if let Some(date) = &step.date {
                        br;
                        small { (format_date(date)) }
                    }
                }
            }
        }
    }
}
