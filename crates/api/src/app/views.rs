//! Server-rendered HTML views.
//!
//! Views receive plain data and return markup; they never touch the store.

use std::collections::HashMap;
use std::fmt::Write;

use axum::response::Html;

use stockroom_core::{Entity, ProductId};
use stockroom_inventory::{Product, Transaction};

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }
form { margin: 1rem 0; }
nav a { margin-right: 1rem; }
"#;

/// `GET /`: product list plus the add-product and record-transaction forms.
pub fn index(products: &[Product]) -> Html<String> {
    let mut body = String::from("<h1>Inventory</h1>\n<ul>\n");
    for p in products {
        let _ = writeln!(
            body,
            "<li>#{} {} &times; {} @ {:.2}</li>",
            p.id(),
            escape(p.name()),
            p.quantity(),
            p.price()
        );
    }
    body.push_str("</ul>\n");

    body.push_str(
        r#"<h2>Add product</h2>
<form method="post" action="/add">
  <input name="name" placeholder="Name" required>
  <input name="quantity" type="number" min="0" placeholder="Quantity" required>
  <input name="price" type="number" min="0" step="0.01" placeholder="Price" required>
  <button type="submit">Add</button>
</form>
<h2>Record transaction</h2>
<form method="post" action="/transaction">
  <input name="product_id" type="number" min="1" placeholder="Product ID" required>
  <select name="transaction_type">
    <option value="purchase">Purchase</option>
    <option value="sale">Sale</option>
  </select>
  <input name="quantity" type="number" min="1" placeholder="Quantity" required>
  <button type="submit">Record</button>
</form>
"#,
    );

    layout("Inventory", &body)
}

/// `GET /products`: tabular product list with delete links.
pub fn products_table(products: &[Product]) -> Html<String> {
    let mut body = String::from(
        "<h1>Products</h1>\n<table>\n<tr><th>ID</th><th>Name</th><th>Quantity</th><th>Price</th><th></th></tr>\n",
    );
    for p in products {
        let _ = writeln!(
            body,
            "<tr><td>{id}</td><td>{name}</td><td>{qty}</td><td>{price:.2}</td><td><a href=\"/delete/{id}\">Delete</a></td></tr>",
            id = p.id(),
            name = escape(p.name()),
            qty = p.quantity(),
            price = p.price(),
        );
    }
    body.push_str("</table>\n");
    layout("Products", &body)
}

/// `GET /transaction_history`: transactions newest first.
///
/// `names` maps product ids to names; transactions whose product is gone
/// render as "(deleted)".
pub fn transaction_history(
    transactions: &[Transaction],
    names: &HashMap<ProductId, String>,
) -> Html<String> {
    let mut body = String::from(
        "<h1>Transaction history</h1>\n<table>\n<tr><th>ID</th><th>Product</th><th>Type</th><th>Quantity</th><th>Timestamp</th><th></th></tr>\n",
    );
    for t in transactions {
        let product = names
            .get(&t.product_id())
            .map(|n| escape(n))
            .unwrap_or_else(|| "(deleted)".to_string());
        let _ = writeln!(
            body,
            "<tr><td>{id}</td><td>{product}</td><td>{kind}</td><td>{qty}</td><td>{ts}</td><td><a href=\"/delete_transaction/{id}\">Delete</a></td></tr>",
            id = t.id(),
            kind = t.transaction_type(),
            qty = t.quantity(),
            ts = t.timestamp().format("%Y-%m-%d %H:%M:%S"),
        );
    }
    body.push_str("</table>\n");
    layout("Transaction history", &body)
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href="/">Home</a><a href="/products">Products</a><a href="/transaction_history">History</a></nav>
{body}
</body>
</html>
"#,
        title = escape(title),
    ))
}

/// Minimal HTML text escaping for user-supplied values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
