//! Server-rendered pages.

use std::borrow::Cow;
use std::fmt::Write;

use axum::http::StatusCode;
use rust_decimal::Decimal;

use crate::models::Cart;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.3rem .5rem;text-align:left;vertical-align:top}\
td.num{text-align:right}\
img{width:48px;height:48px}";

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/home\">Home</a></nav>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

fn search_form(threshold: Option<Decimal>) -> String {
    let value = threshold.map(|t| t.to_string()).unwrap_or_default();
    format!(
        "<form method=\"post\" action=\"/searchCart\">\n\
         <label>Minimum total <input type=\"text\" name=\"total\" value=\"{value}\" required></label>\n\
         <button type=\"submit\">Search carts</button>\n</form>\n"
    )
}

/// Landing page listing the names of the attributes stored in the session.
pub fn home_page(attribute_names: &[String]) -> String {
    let mut body = String::from("<h1>Session</h1>\n");

    if attribute_names.is_empty() {
        body.push_str("<p id=\"no-attributes\">No session attributes.</p>\n");
    } else {
        body.push_str("<ul id=\"session-attributes\">\n");
        for name in attribute_names {
            let _ = writeln!(body, "<li>{}</li>", escape(name));
        }
        body.push_str("</ul>\n");
    }

    body.push_str(
        "<h2>Set a session attribute</h2>\n\
         <form method=\"post\" action=\"/setValue\">\n\
         <label>Key <input type=\"text\" name=\"key\"></label>\n\
         <label>Value <input type=\"text\" name=\"value\"></label>\n\
         <button type=\"submit\">Save</button>\n</form>\n\
         <h2>Find carts</h2>\n",
    );
    body.push_str(&search_form(None));

    layout("Home", &body)
}

/// Carts whose total is at least `threshold`, each with a discount form that
/// posts back to `/applyDiscount` and re-renders this page for the same threshold.
pub fn cart_page(threshold: Decimal, carts: &[Cart]) -> String {
    let mut body = String::from("<h1>Carts</h1>\n");
    body.push_str(&search_form(Some(threshold)));
    let _ = writeln!(
        body,
        "<p id=\"summary\">{} cart(s) with total &ge; {}</p>",
        carts.len(),
        threshold
    );

    if carts.is_empty() {
        return layout("Carts", &body);
    }

    body.push_str(
        "<table id=\"carts\">\n<thead><tr><th>Cart</th><th>User</th><th>Session</th>\
         <th>Products</th><th>Quantity</th><th>Subtotal</th><th>Discount</th><th>Total</th>\
         <th>Items</th><th>Apply discount</th></tr></thead>\n<tbody>\n",
    );
    for cart in carts {
        let _ = write!(
            body,
            "<tr data-cart-id=\"{id}\"><td>{id}</td><td>{user}</td><td>{session}</td>\
             <td class=\"num\">{products}</td><td class=\"num\">{quantity}</td>\
             <td class=\"num subtotal\">{subtotal}</td><td class=\"num\">{discount}</td><td class=\"num total\">{total}</td><td>",
            id = escape(&cart.id),
            user = escape(&cart.user_id),
            session = escape(&cart.session_id),
            products = cart.total_products,
            quantity = cart.total_quantity,
            subtotal = cart.line_items_total(),
            discount = cart.discount,
            total = cart.total,
        );
        product_table(&mut body, cart);
        let _ = writeln!(
            body,
            "</td><td><form method=\"post\" action=\"/applyDiscount\">\
             <input type=\"hidden\" name=\"cartId\" value=\"{id}\">\
             <input type=\"hidden\" name=\"total\" value=\"{threshold}\">\
             <input type=\"text\" name=\"discount\" size=\"6\" required>\
             <button type=\"submit\">Apply</button></form></td></tr>",
            id = escape(&cart.id),
        );
    }
    body.push_str("</tbody>\n</table>\n");

    layout("Carts", &body)
}

fn product_table(body: &mut String, cart: &Cart) {
    body.push_str(
        "<table class=\"products\"><tr><th></th><th>Title</th><th>Description</th>\
         <th>Price</th><th>Qty</th><th>Total</th></tr>",
    );
    for product in &cart.products {
        let _ = write!(
            body,
            "<tr><td><img src=\"{thumb}\" alt=\"\"></td><td>{title}</td><td>{description}</td>\
             <td class=\"num\">{price}</td><td class=\"num\">{quantity}</td>\
             <td class=\"num\">{total}</td></tr>",
            thumb = escape(&product.thumbnail_url),
            title = escape(&product.title),
            description = escape(&product.description),
            price = product.price,
            quantity = product.quantity,
            total = product.total,
        );
    }
    body.push_str("</table>");
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{code} {reason}</h1>\n<p id=\"error\">{message}</p>\n",
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape(message),
    );
    layout("Error", &body)
}
