use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1a202c; }
.site-header { background: #171923; color: #fff; padding: 4rem 1rem 2rem; text-align: center; }
.site-header p { color: #cbd5e0; }
.site-footer { background: #edf2f7; border-top: 1px solid #e2e8f0; padding: 1.5rem; text-align: center; }
.container { max-width: 1280px; margin: 0 auto; padding: 1rem; }
.card { border: 1px solid #e2e8f0; border-radius: 6px; padding: 1rem; margin-bottom: 1rem; }
.search { display: flex; gap: .5rem; max-width: 672px; margin: 1rem auto 0; }
.search input { flex: 1; font-size: 1.1rem; padding: .6rem; border-radius: 6px; border: 1px solid #cbd5e0; }
kbd { background: #edf2f7; color: #1a202c; border-radius: 4px; padding: 0 .3rem; font-size: .8rem; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: .5rem; border-bottom: 1px solid #edf2f7; }
.badge { display: inline-block; border-radius: 3px; padding: 0 .35rem; font-size: .75rem; font-weight: 700; text-transform: uppercase; margin-right: .25rem; }
.badge-red { background: #fed7d7; color: #822727; }
.badge-orange { background: #feebc8; color: #7b341e; }
.badge-yellow { background: #fefcbf; color: #744210; }
.badge-green { background: #c6f6d5; color: #22543d; }
.badge-teal { background: #b2f5ea; color: #234e52; }
.badge-blue { background: #bee3f8; color: #2a4365; }
.badge-cyan { background: #c4f1f9; color: #086f83; }
.badge-purple { background: #e9d8fd; color: #44337a; }
.badge-pink { background: #fed7e2; color: #702459; }
.badge-linkedin { background: #cce8f6; color: #004b71; }
.badge-facebook { background: #d1dbef; color: #223b67; }
.badge-whatsapp { background: #c8f6d8; color: #075e54; }
.badge-twitter { background: #c9e7fd; color: #0c4e7f; }
.badge-telegram { background: #d0ebf7; color: #005a82; }
.badge-gray { background: #edf2f7; color: #1a202c; }
.timeline { list-style: none; padding: 0; display: flex; flex-wrap: wrap; gap: .5rem; }
.timeline li { border-radius: 4px; padding: .25rem .5rem; border: 1px solid #e2e8f0; }
.timeline .done { color: #2f855a; }
.timeline .current { background: #2b6cb0; color: #fff; font-weight: 700; }
.timeline .upcoming { color: #a0aec0; border-style: dashed; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="description" content="A status page to help Summerdale Park home owners stay up to date with their homes.";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                (content)
                footer class="site-footer" {
                    p { "Created by Agnel Nieves and Bruno Albuquerque" }
                }
            }
        }
    }
}
