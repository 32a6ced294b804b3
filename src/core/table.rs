use crate::core::inventory::Inventory;

const HEADERS: [&str; 3] = ["Part Name", "Price", "Quantity"];

/// Renders the inventory as a fixed-width text table. Rows are numbered from
/// 1; the selected row is marked with `*`.
pub fn render(inventory: &Inventory) -> String {
    let rows: Vec<[String; 3]> = inventory
        .parts()
        .iter()
        .map(|part| [part.name.clone(), part.price.to_string(), part.quantity.to_string()])
        .collect();

    let number_width = inventory.len().max(1).to_string().len().max(1);
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "  {:>nw$}  {:<w0$}  {:>w1$}  {:>w2$}\n",
        "#",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        nw = number_width,
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    ));
    let rule_len = number_width + widths.iter().sum::<usize>() + 6;
    out.push_str(&format!("  {}\n", "-".repeat(rule_len)));

    if rows.is_empty() {
        out.push_str("  (no parts)\n");
        return out;
    }

    for (index, row) in rows.iter().enumerate() {
        let marker = if inventory.selected() == Some(index) { '*' } else { ' ' };
        out.push_str(&format!(
            "{} {:>nw$}  {:<w0$}  {:>w1$}  {:>w2$}\n",
            marker,
            index + 1,
            row[0],
            row[1],
            row[2],
            nw = number_width,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        ));
    }
    out
}
