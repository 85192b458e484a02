//! Ricevuta HTML stampabile di un ordine

use crate::models::Order;
use std::fmt::Write;

const SHOP_NAME: &str = "Rich Agri Supply";

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Genera la ricevuta. `rider_name` sostituisce l'id del rider quando è noto.
pub fn render_receipt(order: &Order, rider_name: Option<&str>) -> String {
    let payment_id = if order.payment_id.is_empty() {
        "N/A"
    } else {
        order.payment_id.as_str()
    };
    let status = order.status.as_str();

    let mut rows = String::new();
    if order.products.is_empty() {
        rows.push_str("<tr><td colspan=\"4\">No products found</td></tr>\n");
    }
    for item in &order.products {
        let title = if item.product_title.is_empty() {
            "Product"
        } else {
            item.product_title.as_str()
        };
        // write! su String non può fallire
        let _ = writeln!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>₱{:.2}</td><td>₱{:.2}</td></tr>",
            escape_html(title),
            item.quantity,
            item.price,
            item.sub_total
        );
    }

    let rider_row = match (rider_name, order.delivery_rider.as_deref()) {
        (Some(name), _) | (None, Some(name)) => format!(
            "<div class=\"info-row\"><strong>Delivery Rider:</strong> {}</div>\n",
            escape_html(name)
        ),
        (None, None) => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Receipt - Order {id}</title></head>
<body>
<div class="receipt-header"><h1>{shop}</h1><p>Order Receipt</p></div>
<div class="order-info">
<div class="order-info-row"><strong>Order ID:</strong> <span>{id}</span></div>
<div class="order-info-row"><strong>Payment ID:</strong> <span>{payment_id}</span></div>
<div class="order-info-row"><strong>Order Date:</strong> <span>{date}</span></div>
<div class="order-info-row"><strong>Status:</strong> <span class="status-badge status-{status}">{status}</span></div>
</div>
<div class="section-title">Customer Information</div>
<div class="info-row"><strong>Name:</strong> {name}</div>
<div class="info-row"><strong>Email:</strong> {email}</div>
<div class="info-row"><strong>Phone:</strong> {phone}</div>
<div class="section-title">Delivery Information</div>
<div class="info-row"><strong>Address:</strong> {address}</div>
<div class="info-row"><strong>Pincode:</strong> {pincode}</div>
{rider_row}<div class="section-title">Order Items</div>
<table>
<thead><tr><th>Product</th><th>Quantity</th><th>Price</th><th>Subtotal</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<div class="total-row grand-total"><span class="total-label">TOTAL AMOUNT:</span> <span>₱{amount:.2}</span></div>
<div class="receipt-footer"><p>Thank you for your order!</p></div>
</body>
</html>
"#,
        id = escape_html(&order.id),
        shop = SHOP_NAME,
        payment_id = escape_html(payment_id),
        date = order.date.format("%Y-%m-%d %H:%M"),
        status = status,
        name = escape_html(&order.name),
        email = escape_html(&order.email),
        phone = escape_html(&order.phone_number),
        address = escape_html(&order.address),
        pincode = escape_html(&order.pincode),
        rider_row = rider_row,
        rows = rows,
        amount = order.amount,
    )
}
