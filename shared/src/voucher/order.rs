//! Pricing cashier orders against the menu

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{Branch, MenuItem, OrderLine, OrderLineInput};

pub const MAX_QTY: i32 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedOrder {
    pub lines: Vec<OrderLine>,
    pub total: i64,
}

fn invalid_quantity(menu_item_id: i64, qty: i32) -> AppError {
    AppError::new(ErrorCode::InvalidQuantity)
        .with_detail("menu_item_id", menu_item_id)
        .with_detail("qty", qty)
}

/// Validate quantities, merge duplicate items (first occurrence keeps its
/// position) and drop zero-quantity lines.
pub fn merge_lines(lines: &[OrderLineInput]) -> AppResult<Vec<OrderLineInput>> {
    let mut merged: Vec<OrderLineInput> = Vec::with_capacity(lines.len());
    for line in lines {
        if !(0..=MAX_QTY).contains(&line.qty) {
            return Err(invalid_quantity(line.menu_item_id, line.qty));
        }
        match merged.iter_mut().find(|m| m.menu_item_id == line.menu_item_id) {
            Some(existing) => {
                existing.qty += line.qty;
                if existing.qty > MAX_QTY {
                    return Err(invalid_quantity(existing.menu_item_id, existing.qty));
                }
            }
            None => merged.push(*line),
        }
    }
    merged.retain(|line| line.qty > 0);

    if merged.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    Ok(merged)
}

/// Price merged lines at `branch` using menu items from `lookup`.
pub fn price_lines<'a>(
    lines: &[OrderLineInput],
    branch: Branch,
    lookup: impl Fn(i64) -> Option<&'a MenuItem>,
) -> AppResult<PricedOrder> {
    let mut priced = Vec::with_capacity(lines.len());
    for line in lines {
        let item = lookup(line.menu_item_id).ok_or_else(|| {
            AppError::new(ErrorCode::MenuItemNotFound).with_detail("menu_item_id", line.menu_item_id)
        })?;
        let unit_price = item.price_at(branch).ok_or_else(|| {
            AppError::new(ErrorCode::MenuItemUnavailable)
                .with_detail("menu_item_id", line.menu_item_id)
                .with_detail("branch", branch.as_str())
        })?;
        priced.push(OrderLine {
            menu_item_id: item.id,
            name: item.name.clone(),
            qty: line.qty,
            unit_price,
        });
    }

    let total = priced
        .iter()
        .try_fold(0i64, |acc, line| line.subtotal().and_then(|s| acc.checked_add(s)))
        .ok_or_else(|| AppError::new(ErrorCode::ValueOutOfRange).with_detail("field", "total"))?;
    Ok(PricedOrder {
        lines: priced,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(menu_item_id: i64, qty: i32) -> OrderLineInput {
        OrderLineInput { menu_item_id, qty }
    }

    fn menu() -> Vec<MenuItem> {
        vec![
            MenuItem {
                id: 1,
                category: "Makanan".into(),
                name: "Mie Ayam".into(),
                description: None,
                price_sedati: Some(12_000),
                price_tawangsari: Some(13_000),
                sold_sedati: 0,
                sold_tawangsari: 0,
            },
            MenuItem {
                id: 2,
                category: "Minuman".into(),
                name: "Es Jeruk".into(),
                description: None,
                price_sedati: Some(5_000),
                price_tawangsari: None,
                sold_sedati: 0,
                sold_tawangsari: 0,
            },
        ]
    }

    #[test]
    fn test_merge_duplicates_and_drop_zero() {
        let merged = merge_lines(&[line(2, 1), line(1, 0), line(2, 2), line(3, 1)]).unwrap();
        assert_eq!(merged, vec![line(2, 3), line(3, 1)]);
    }

    #[test]
    fn test_merge_rejects_empty_and_bad_quantities() {
        assert_eq!(merge_lines(&[]).unwrap_err().code, ErrorCode::OrderEmpty);
        assert_eq!(
            merge_lines(&[line(1, 0)]).unwrap_err().code,
            ErrorCode::OrderEmpty
        );
        assert_eq!(
            merge_lines(&[line(1, -1)]).unwrap_err().code,
            ErrorCode::InvalidQuantity
        );
        assert_eq!(
            merge_lines(&[line(1, 1000)]).unwrap_err().code,
            ErrorCode::InvalidQuantity
        );
        assert_eq!(
            merge_lines(&[line(1, 600), line(1, 400)]).unwrap_err().code,
            ErrorCode::InvalidQuantity
        );
    }

    #[test]
    fn test_price_lines_uses_branch_price() {
        let menu = menu();
        let lookup = |id| menu.iter().find(|m| m.id == id);

        let order = price_lines(&[line(1, 2), line(2, 1)], Branch::Sedati, lookup).unwrap();
        assert_eq!(order.total, 2 * 12_000 + 5_000);
        assert_eq!(order.lines[0].name, "Mie Ayam");
        assert_eq!(order.lines[0].unit_price, 12_000);

        let order = price_lines(&[line(1, 1)], Branch::Tawangsari, lookup).unwrap();
        assert_eq!(order.total, 13_000);
    }

    #[test]
    fn test_price_lines_errors() {
        let menu = menu();
        let lookup = |id| menu.iter().find(|m| m.id == id);

        let err = price_lines(&[line(9, 1)], Branch::Sedati, lookup).unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);

        let err = price_lines(&[line(2, 1)], Branch::Tawangsari, lookup).unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemUnavailable);
    }

    #[test]
    fn test_price_lines_rejects_overflowing_total() {
        let mut menu = menu();
        menu[0].price_sedati = Some(i64::MAX / 2 + 1);
        let lookup = |id| menu.iter().find(|m| m.id == id);

        let err = price_lines(&[line(1, 2)], Branch::Sedati, lookup).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        menu[1].price_sedati = Some(i64::MAX / 2);
        let lookup = |id| menu.iter().find(|m| m.id == id);
        let err = price_lines(&[line(1, 1), line(2, 1)], Branch::Sedati, lookup).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }
}
