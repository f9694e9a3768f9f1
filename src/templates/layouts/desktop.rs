use maud::{html, Markup, PreEscaped, DOCTYPE};

// Self-contained styling; no static asset pipeline for a desktop tool.
const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2430; }
header { display: flex; align-items: center; justify-content: space-between;
         padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.15); }
header h3 { margin: 0; }
header a { color: #1f2430; text-decoration: none; }
nav ul { display: flex; gap: 1.25rem; list-style: none; margin: 0; padding: 0; }
nav a { color: #524ed2; }
main.container { max-width: 960px; margin: 1.5rem auto; padding: 0 1rem; }
section.card { border: 1px solid #e2e2ea; border-radius: 8px;
               padding: 1rem 1.25rem; margin-bottom: 1.25rem; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #e2e2ea; }
form.stacked label { display: block; margin: 0.6rem 0 0.2rem; font-weight: 600; }
form.stacked input, form.stacked select, form.stacked textarea { width: 100%;
    max-width: 24rem; padding: 0.35rem; }
button, input[type=submit] { background: #524ed2; color: white; border: none;
    border-radius: 4px; padding: 0.4rem 0.9rem; cursor: pointer; margin-top: 0.8rem; }
form.inline { display: inline; }
form.inline button { background: #b33; margin: 0; padding: 0.2rem 0.6rem; }
p.flash { background: #e8f7ee; border: 1px solid #9fd9b4; padding: 0.5rem 0.75rem;
          border-radius: 6px; }
span.muted { color: #667; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · SweepCRM" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { a href="/" { "SweepCRM" } }
                    nav {
                        ul {
                            li { a href="/" { "Dashboard" } }
                            li { a href="/customers" { "Customers" } }
                            li { a href="/properties" { "Properties" } }
                            li { a href="/reminders" { "Reminders" } }
                        }
                    }
                }
                main class="container" {
                    (content)
                }
            }
        }
    }
}
