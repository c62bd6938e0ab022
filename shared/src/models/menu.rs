//! Menu Item Model

use serde::{Deserialize, Serialize};

use super::nullable;
use super::transaction::Branch;
use crate::error::{AppError, AppResult, ErrorCode};

/// Menu item with per-branch prices and sold counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    /// `None` = not sold at Sedati
    pub price_sedati: Option<i64>,
    /// `None` = not sold at Tawangsari
    pub price_tawangsari: Option<i64>,
    pub sold_sedati: i64,
    pub sold_tawangsari: i64,
}

impl MenuItem {
    pub fn price_at(&self, branch: Branch) -> Option<i64> {
        match branch {
            Branch::Sedati => self.price_sedati,
            Branch::Tawangsari => self.price_tawangsari,
        }
    }

    pub fn sold_at(&self, branch: Branch) -> i64 {
        match branch {
            Branch::Sedati => self.sold_sedati,
            Branch::Tawangsari => self.sold_tawangsari,
        }
    }

    /// Cashier view of this item at a branch, if sold there
    pub fn for_branch(&self, branch: Branch) -> Option<BranchMenuItem> {
        self.price_at(branch).map(|price| BranchMenuItem {
            id: self.id,
            category: self.category.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price,
        })
    }
}

/// Menu item priced for one branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchMenuItem {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    pub price_sedati: Option<i64>,
    pub price_tawangsari: Option<i64>,
}

/// Update menu item payload (`null` clears optional fields)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub price_sedati: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub price_tawangsari: Option<Option<i64>>,
}

/// Highest accepted menu price (Rp)
pub const MAX_PRICE: i64 = 100_000_000;

fn check_price(field: &'static str, price: Option<i64>) -> AppResult<()> {
    match price {
        Some(p) if !(1..=MAX_PRICE).contains(&p) => {
            Err(AppError::new(ErrorCode::InvalidPrice).with_detail("field", field))
        }
        _ => Ok(()),
    }
}

fn check_text(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField).with_detail("field", field));
    }
    Ok(())
}

impl MenuItemCreate {
    pub fn validate(&self) -> AppResult<()> {
        check_text("category", &self.category)?;
        check_text("name", &self.name)?;
        check_price("price_sedati", self.price_sedati)?;
        check_price("price_tawangsari", self.price_tawangsari)
    }
}

impl MenuItemUpdate {
    /// Apply onto an existing item, validating the merged result
    pub fn apply(self, mut item: MenuItem) -> AppResult<MenuItem> {
        if let Some(category) = self.category {
            check_text("category", &category)?;
            item.category = category.trim().to_string();
        }
        if let Some(name) = self.name {
            check_text("name", &name)?;
            item.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(price) = self.price_sedati {
            check_price("price_sedati", price)?;
            item.price_sedati = price;
        }
        if let Some(price) = self.price_tawangsari {
            check_price("price_tawangsari", price)?;
            item.price_tawangsari = price;
        }
        Ok(item)
    }
}

/// Cashier menu query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuQuery {
    pub branch: Branch,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nasi_goreng() -> MenuItem {
        MenuItem {
            id: 1,
            category: "Makanan".into(),
            name: "Nasi Goreng".into(),
            description: None,
            price_sedati: Some(15_000),
            price_tawangsari: None,
            sold_sedati: 4,
            sold_tawangsari: 0,
        }
    }

    #[test]
    fn test_for_branch() {
        let item = nasi_goreng();
        let priced = item.for_branch(Branch::Sedati).unwrap();
        assert_eq!(priced.price, 15_000);
        assert!(item.for_branch(Branch::Tawangsari).is_none());
        assert_eq!(item.sold_at(Branch::Sedati), 4);
    }

    #[test]
    fn test_create_rejects_non_positive_price() {
        let create = MenuItemCreate {
            category: "Minuman".into(),
            name: "Es Teh".into(),
            description: None,
            price_sedati: Some(0),
            price_tawangsari: Some(4_000),
        };
        let err = create.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrice);
    }

    #[test]
    fn test_price_upper_bound() {
        let mut create = MenuItemCreate {
            category: "Minuman".into(),
            name: "Es Teh".into(),
            description: None,
            price_sedati: Some(MAX_PRICE),
            price_tawangsari: None,
        };
        assert!(create.validate().is_ok());

        create.price_sedati = Some(MAX_PRICE + 1);
        assert_eq!(create.validate().unwrap_err().code, ErrorCode::InvalidPrice);

        let patch = MenuItemUpdate {
            price_tawangsari: Some(Some(i64::MAX / 2 + 1)),
            ..Default::default()
        };
        assert_eq!(
            patch.apply(nasi_goreng()).unwrap_err().code,
            ErrorCode::InvalidPrice
        );
    }

    #[test]
    fn test_update_clears_price() {
        let patch: MenuItemUpdate =
            serde_json::from_str(r#"{"price_sedati": null, "price_tawangsari": 16000}"#).unwrap();
        let item = patch.apply(nasi_goreng()).unwrap();
        assert_eq!(item.price_sedati, None);
        assert_eq!(item.price_tawangsari, Some(16_000));
        assert_eq!(item.name, "Nasi Goreng");
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let patch = MenuItemUpdate {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(
            patch.apply(nasi_goreng()).unwrap_err().code,
            ErrorCode::RequiredField
        );
    }
}
