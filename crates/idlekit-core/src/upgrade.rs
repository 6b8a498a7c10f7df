//! Upgrade reference data and the catalog
//!
//! Upgrades are immutable reference data: a price and a flat
//! cookies-per-second contribution. The catalog keeps them in ascending cost
//! order, which is also the order the shop presents them in.

use std::collections::HashMap;

use crate::UpgradeId;

/// One purchasable upgrade
#[derive(Clone, Debug, PartialEq)]
pub struct Upgrade {
    pub id: UpgradeId,
    /// Display name, shown by the shop list
    pub name: String,
    /// Price in cookies, positive
    pub cost: f64,
    /// Passive accrual contribution, cookies per second, non-negative
    pub cps: f64,
}

impl Upgrade {
    pub fn new(id: UpgradeId, name: impl Into<String>, cost: f64, cps: f64) -> Self {
        Upgrade {
            id,
            name: name.into(),
            cost,
            cps,
        }
    }
}

/// Read-only upgrade catalog, ascending cost order
#[derive(Clone, Debug, Default)]
pub struct UpgradeCatalog {
    upgrades: Vec<Upgrade>,
    by_id: HashMap<UpgradeId, usize>,
}

impl UpgradeCatalog {
    /// Build a catalog from arbitrary-order reference data.
    /// Sorts by ascending cost; equal costs keep ascending id order so the
    /// listing is deterministic.
    pub fn from_upgrades(mut upgrades: Vec<Upgrade>) -> Self {
        upgrades.sort_by(|a, b| {
            a.cost
                .partial_cmp(&b.cost)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });

        let by_id = upgrades
            .iter()
            .enumerate()
            .map(|(idx, u)| (u.id, idx))
            .collect();

        UpgradeCatalog { upgrades, by_id }
    }

    /// Look up an upgrade by id
    pub fn get(&self, id: UpgradeId) -> Option<&Upgrade> {
        self.by_id.get(&id).map(|&idx| &self.upgrades[idx])
    }

    /// Check if an upgrade id exists
    pub fn contains(&self, id: UpgradeId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Iterate in ascending cost order
    pub fn iter(&self) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.iter()
    }

    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> UpgradeCatalog {
        UpgradeCatalog::from_upgrades(vec![
            Upgrade::new(UpgradeId::new(3), "Factory", 500.0, 8.0),
            Upgrade::new(UpgradeId::new(1), "Cursor", 15.0, 0.5),
            Upgrade::new(UpgradeId::new(2), "Grandma", 100.0, 2.0),
        ])
    }

    #[test]
    fn test_catalog_ascending_cost_order() {
        let catalog = catalog();
        let costs: Vec<f64> = catalog.iter().map(|u| u.cost).collect();

        assert_eq!(costs, vec![15.0, 100.0, 500.0]);
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = catalog();

        assert_eq!(catalog.get(UpgradeId::new(2)).unwrap().name, "Grandma");
        assert!(catalog.get(UpgradeId::new(99)).is_none());
        assert!(catalog.contains(UpgradeId::new(1)));
    }

    #[test]
    fn test_catalog_equal_costs_tie_break_on_id() {
        let catalog = UpgradeCatalog::from_upgrades(vec![
            Upgrade::new(UpgradeId::new(7), "B", 10.0, 1.0),
            Upgrade::new(UpgradeId::new(4), "A", 10.0, 1.0),
        ]);
        let ids: Vec<UpgradeId> = catalog.iter().map(|u| u.id).collect();

        assert_eq!(ids, vec![UpgradeId::new(4), UpgradeId::new(7)]);
    }
}
