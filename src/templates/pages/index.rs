// templates/pages/index.rs

use crate::colors::ColorBag;
use crate::domain::{derive_lot_status, Lot, LotStatus};
use crate::templates::{components::colored_badge, desktop_layout};
use maud::{html, Markup, PreEscaped};

// Cmd+K / Ctrl+K jumps to the search box.
const SEARCH_SHORTCUT: &str = r#"
document.addEventListener('keydown', function (e) {
  if ((e.metaKey || e.ctrlKey) && e.key.toLowerCase() === 'k') {
    e.preventDefault();
    var input = document.getElementById('search');
    if (input) { input.focus(); input.select(); }
  }
});
"#;

pub struct LotRow {
    pub id: String,
    pub number: Option<u32>,
    pub address: String,
    pub status: LotStatus,
    pub categories: Vec<String>,
}

impl LotRow {
    pub fn from_lot(lot: &Lot) -> Self {
        Self {
            id: lot.id.clone(),
            number: lot.number,
            address: lot.address.clone(),
            status: derive_lot_status(lot),
            categories: lot.categories().iter().map(|c| c.to_string()).collect(),
        }
    }
}

pub struct IndexVm {
    pub query: String,
    pub rows: Vec<LotRow>,
}

pub fn index_page(vm: &IndexVm, bag: &mut ColorBag) -> Markup {
    desktop_layout(
        "Summerdale Park building status",
        html! {
            header class="site-header" {
                h1 { "Explore Status updates for Summerdale community" }
                p { "A status page to help Summerdale Park home owners stay up to date with their homes." }
                form class="search" method="get" action="/" {
                    label class="sr-only" for="search" { "Search" }
                    input
                        type="search"
                        id="search"
                        name="q"
                        value=(vm.query)
                        placeholder="Search for a lot number"
                        autocomplete="off";
                    span { kbd { "cmd" } " " kbd { "k" } }
                }
            }

            main class="container" {
                div class="card" {
                    @if vm.rows.is_empty() {
                        p class="empty" { "No lots found." }
                    } @else {
                        table {
                            thead {
                                tr {
                                    th { "Lot #" }
                                    th { "Address" }
                                    th { "Status" }
                                    th { "Permits" }
                                }
                            }
                            tbody {
                                @for row in &vm.rows {
                                    tr {
                                        td {
                                            a href=(format!("/lot/{}", row.id)) {
                                                @match row.number {
                                                    Some(n) => (n),
                                                    None => "?",
                                                }
                                            }
                                        }
                                        td { (row.address) }
                                        td { (colored_badge(row.status.label(), bag)) }
                                        td {
                                            @for category in &row.categories {
                                                (colored_badge(category, bag))
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            script { (PreEscaped(SEARCH_SHORTCUT)) }
        },
    )
}
