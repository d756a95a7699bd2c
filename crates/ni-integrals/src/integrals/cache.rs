//! By-value cache of generated node/weight tables.
//!
//! A table is a pure function of `(family, N, alpha, beta)`, so entries are
//! written once and never modified afterwards. Parameters the family
//! ignores are dropped from the key, and `-0.0` is stored as `0.0`. Failed
//! generations are not cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use log::debug;
use ni_core::{Real, Result, Size};

use super::gaussianquadratures::{GaussianQuadrature, PolynomialFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TableKey {
    family: PolynomialFamily,
    n: Size,
    alpha: u64,
    beta: u64,
}

impl TableKey {
    fn new(family: PolynomialFamily, n: Size, alpha: Real, beta: Real) -> Self {
        // adding 0.0 folds -0.0 into 0.0
        let bits = |used: bool, v: Real| if used { (v + 0.0).to_bits() } else { 0 };
        Self {
            family,
            n,
            alpha: bits(family.uses_alpha(), alpha),
            beta: bits(family.uses_beta(), beta),
        }
    }
}

/// Thread-safe store of node/weight tables keyed by their parameters.
#[derive(Debug, Default)]
pub struct NodeTableCache {
    tables: Mutex<HashMap<TableKey, Arc<GaussianQuadrature>>>,
}

static GLOBAL: OnceLock<NodeTableCache> = OnceLock::new();

impl NodeTableCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`GaussianRule`](super::gaussian::GaussianRule).
    ///
    /// Entries are never evicted, so every distinct `(family, N, alpha, beta)`
    /// requested keeps one table alive. Callers sweeping many parameter
    /// values should [`clear`](Self::clear) it or use a local cache.
    pub fn global() -> &'static NodeTableCache {
        GLOBAL.get_or_init(NodeTableCache::new)
    }

    /// Return the table for the key, generating it on first request.
    pub fn get(
        &self,
        family: PolynomialFamily,
        n: Size,
        alpha: Real,
        beta: Real,
    ) -> Result<Arc<GaussianQuadrature>> {
        let key = TableKey::new(family, n, alpha, beta);
        if let Some(table) = self.lock().get(&key) {
            debug!("{n}-node {family} table served from cache");
            return Ok(Arc::clone(table));
        }
        // generated outside the lock; a concurrent insert of the same key wins
        let generated = Arc::new(GaussianQuadrature::new(family, n, alpha, beta)?);
        let mut tables = self.lock();
        Ok(Arc::clone(tables.entry(key).or_insert(generated)))
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached table.
    ///
    /// Tables already handed out stay valid; later requests regenerate.
    pub fn clear(&self) {
        let mut tables = self.lock();
        debug!("dropping {} cached node tables", tables.len());
        tables.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<TableKey, Arc<GaussianQuadrature>>> {
        // entries are immutable once inserted, so a poisoned map is still valid
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_shares_table() {
        let cache = NodeTableCache::new();
        let a = cache.get(PolynomialFamily::Legendre, 4, 0.0, 0.0).unwrap();
        let b = cache.get(PolynomialFamily::Legendre, 4, 0.0, 0.0).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn ignored_parameters_share_entry() {
        let cache = NodeTableCache::new();
        let a = cache.get(PolynomialFamily::Legendre, 3, 1.0, 1.0).unwrap();
        let b = cache.get(PolynomialFamily::Legendre, 3, 0.25, -7.0).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        let c = cache.get(PolynomialFamily::Gegenbauer, 3, 1.0, 1.0).unwrap();
        let d = cache.get(PolynomialFamily::Gegenbauer, 3, 1.0, 9.0).unwrap();
        assert!(Arc::ptr_eq(&c, &d));
    }

    #[test]
    fn distinct_keys_get_distinct_tables() {
        let cache = NodeTableCache::new();
        let a = cache.get(PolynomialFamily::Jacobi, 3, 1.0, 1.0).unwrap();
        let b = cache.get(PolynomialFamily::Jacobi, 3, 1.0, 2.0).unwrap();
        let c = cache.get(PolynomialFamily::Jacobi, 4, 1.0, 1.0).unwrap();
        assert_ne!(a.x(), b.x());
        assert_eq!(c.order(), 4);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn signed_zero_shares_entry() {
        let cache = NodeTableCache::new();
        let a = cache.get(PolynomialFamily::Jacobi, 3, 0.0, -0.0).unwrap();
        let b = cache.get(PolynomialFamily::Jacobi, 3, -0.0, 0.0).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_and_regenerates() {
        let cache = NodeTableCache::new();
        for alpha in [0.5, 1.0, 1.5, 2.0] {
            cache.get(PolynomialFamily::Gegenbauer, 5, alpha, 0.0).unwrap();
        }
        assert_eq!(cache.len(), 4);
        let held = cache.get(PolynomialFamily::Gegenbauer, 5, 1.0, 0.0).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(held.order(), 5);
        let fresh = cache.get(PolynomialFamily::Gegenbauer, 5, 1.0, 0.0).unwrap();
        assert!(!Arc::ptr_eq(&held, &fresh));
        assert_eq!(held.x(), fresh.x());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = NodeTableCache::new();
        assert!(cache.get(PolynomialFamily::Jacobi, 3, -1.5, 0.0).is_err());
        assert!(cache.is_empty());
    }
}
