use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::{
    catalog::{Catalog, Section},
    stock::{aggregate::Aggregate, count::CountKey},
};

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn section_href(name: &str) -> String {
    format!("/count/{}", utf8_percent_encode(name, NON_ALPHANUMERIC))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    )
}

pub fn index(catalog: &Catalog) -> String {
    let mut body = String::from("<h1>Cellar Run</h1>\n<ul>\n");
    for name in catalog.section_names() {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            section_href(name),
            escape(name)
        ));
    }
    body.push_str("</ul>\n");

    layout("Cellar Run", &body)
}

pub fn count(section: &Section) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<form method=\"post\" action=\"/process\">\n",
        escape(&section.name)
    );

    for backbar in &section.backbars {
        body.push_str(&format!(
            "<fieldset>\n<legend>{}</legend>\n",
            escape(&backbar.backbar)
        ));
        for spirit in &backbar.spirits {
            let key: String = (&CountKey::new(&section.name, &backbar.backbar, spirit)).into();
            body.push_str(&format!(
                "<label>{} <input type=\"number\" min=\"0\" inputmode=\"numeric\" name=\"{}\"></label><br>\n",
                escape(spirit),
                escape(&key)
            ));
        }
        body.push_str("</fieldset>\n");
    }

    body.push_str("<button type=\"submit\">Calculate</button>\n</form>\n");
    layout(&section.name, &body)
}

pub fn results(aggregate: &Aggregate, pdf_url: Option<&str>) -> String {
    let mut body = String::from("<h1>Cellar Run</h1>\n");

    if let Some(url) = pdf_url {
        body.push_str(&format!(
            "<p><a href=\"{}\">View PDF</a></p>\n",
            escape(url)
        ));
    }

    body.push_str("<h2>Per backbar</h2>\n");
    for (bar, spirits) in &aggregate.per_bar {
        body.push_str(&format!(
            "<h3>{} - Backbar {}</h3>\n<table>\n",
            escape(&bar.section),
            bar.bar_number
        ));
        for (spirit, need) in spirits {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{need}</td></tr>\n",
                escape(spirit)
            ));
        }
        body.push_str("</table>\n");
    }

    body.push_str("<h2>Per pair</h2>\n");
    for (pair, spirits) in &aggregate.paired {
        body.push_str(&format!(
            "<h3>{} - Backbars {}</h3>\n<table>\n",
            escape(&pair.section),
            escape(&pair.label())
        ));
        for (spirit, quantity) in spirits {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape(spirit),
                escape(&quantity.to_string())
            ));
        }
        body.push_str("</table>\n");
    }

    if aggregate.per_bar.is_empty() {
        body.push_str("<p>Nothing counted.</p>\n");
    }

    layout("Cellar Run", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock::{aggregate::aggregate, count::parse_submission};

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("Corky's <Apple> & \"co\""), "Corky&#39;s &lt;Apple&gt; &amp; &quot;co&quot;");
    }

    #[test]
    fn section_links_are_encoded() {
        assert_eq!(section_href("Top Bar"), "/count/Top%20Bar");
    }

    #[test]
    fn results_list_bars_and_pairs() {
        let form = vec![
            ("Top Bar__Backbar 5__Captain Morgans Spiced".to_string(), "2".to_string()),
            ("Top Bar__Backbar 6A__Captain Morgans Spiced".to_string(), "5".to_string()),
        ];
        let result = aggregate(&parse_submission(&form));
        let html = results(&result, Some("/pdf/cellar_run_20240309_070501.pdf"));

        assert!(html.contains("<h3>Top Bar - Backbar 5</h3>\n<table>\n<tr><td>Captain Morgans Spiced</td><td>8</td></tr>\n"));
        assert!(html.contains("<h3>Top Bar - Backbar 6</h3>"));
        assert!(html.contains("<h3>Top Bar - Backbars 5 &amp; 6</h3>"));
        assert!(html.contains("<td>1 box, 2 bottles</td>"));
        assert!(html.contains("href=\"/pdf/cellar_run_20240309_070501.pdf\""));
        assert!(!html.contains("Nothing counted."));
    }

    #[test]
    fn count_form_names_inputs_by_key() {
        let catalog = Catalog::from_json(
            r#"{"Bottom Bar": [{"backbar": "Backbar 4", "spirits": ["Corky's Apple"]}]}"#,
        )
        .unwrap();
        let html = count(catalog.section("Bottom Bar").unwrap());

        assert!(html.contains("name=\"Bottom Bar__Backbar 4__Corky&#39;s Apple\""));
        assert!(html.contains("action=\"/process\""));
    }
}
