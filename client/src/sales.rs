//! Totali vendite, ordinamento e paginazione della lista ordini

use crate::models::{Order, OrderStatus};
use chrono::NaiveDate;

pub fn sort_by_date_desc(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Pagina `page` (da 0) di `rows_per_page` elementi; vuota oltre la fine
pub fn paginate<T>(items: &[T], page: usize, rows_per_page: usize) -> &[T] {
    let start = page.saturating_mul(rows_per_page).min(items.len());
    let end = start.saturating_add(rows_per_page).min(items.len());
    &items[start..end]
}

/// Somma degli importi degli ordini consegnati
pub fn delivered_sales(orders: &[Order]) -> f64 {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered)
        .map(|o| o.amount)
        .sum()
}

/// Come `delivered_sales`, limitato agli ordini creati nel giorno `today` (UTC)
pub fn today_sales(orders: &[Order], today: NaiveDate) -> f64 {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered && o.date.date_naive() == today)
        .map(|o| o.amount)
        .sum()
}
