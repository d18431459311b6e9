use finder_core::{FormattedOffer, SearchResults};

const STYLE: &str = "body{font-family:sans-serif;max-width:720px;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.75rem}\
.error{color:#b00020;font-weight:bold}\
.offer{border:1px solid #ddd;border-radius:6px;padding:.5rem 1rem;margin:.75rem 0}\
.price{font-size:1.2rem;font-weight:bold}";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

/// Search form, with an optional error banner above it.
pub fn index_page(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Flight Finder</h1>\n");
    if let Some(message) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(message)));
    }
    body.push_str(
        "<form method=\"post\" action=\"/\">\n\
         <label>From (IATA) <input name=\"origin\" maxlength=\"3\" placeholder=\"JFK\" required></label>\n\
         <label>To (IATA) <input name=\"destination\" maxlength=\"3\" placeholder=\"LHR\" required></label>\n\
         <label>Departure <input type=\"date\" name=\"departure_date\" required></label>\n\
         <label>Return (optional) <input type=\"date\" name=\"return_date\"></label>\n\
         <p><button type=\"submit\">Search</button></p>\n\
         </form>\n",
    );
    layout("Flight Finder", &body)
}

pub fn results_page(results: &SearchResults) -> String {
    let mut body = String::from("<h1>Flight Finder</h1>\n<h2>Outbound flights</h2>\n");
    push_offers(&mut body, &results.outbound);

    if !results.return_flights.is_empty() {
        body.push_str("<h2>Return flights</h2>\n");
        push_offers(&mut body, &results.return_flights);
    }

    body.push_str("<p><a href=\"/\">New search</a></p>\n");
    layout("Flight Finder - Results", &body)
}

fn push_offers(body: &mut String, offers: &[FormattedOffer]) {
    for offer in offers {
        let price = match &offer.currency {
            Some(currency) => format!("{} {}", offer.price, currency),
            None => offer.price.clone(),
        };
        body.push_str(&format!(
            "<div class=\"offer\">\n<p class=\"price\">{}</p>\n<ul>\n",
            escape(&price)
        ));
        for segment in &offer.segments {
            body.push_str(&format!(
                "<li>{} {} &rarr; {} {} &middot; {} {}</li>\n",
                escape(&segment.from),
                escape(&segment.departure),
                escape(&segment.to),
                escape(&segment.arrival),
                escape(&segment.airline),
                escape(&segment.number)
            ));
        }
        body.push_str("</ul>\n</div>\n");
    }
}
