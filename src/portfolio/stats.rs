// Aggregate statistics over a portfolio's asset list

use serde::{Deserialize, Serialize};

use crate::portfolio::Asset;

/// Portfolio-wide totals, recomputed from the asset list on each call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioStatistics {
    /// Total assets in the portfolio
    pub total_assets: usize,
    /// Assets with no parent (originals)
    pub root_assets: usize,
    /// Assets derived from another asset
    pub derivatives: usize,
    /// Sum of licenses issued across all assets
    pub licenses_issued: u64,
    /// Sum of royalties earned across all assets
    pub total_royalties: f64,
}

/// Compute statistics for a slice of assets.
///
/// Pure read over the input: an asset counts as a derivative when its
/// parent id is present and non-empty, roots are everything else, and
/// the optional numeric fields sum with absence treated as zero. The
/// empty slice yields the all-zero struct.
pub fn calculate_statistics(assets: &[Asset]) -> PortfolioStatistics {
    let total_assets = assets.len();
    let derivatives = assets.iter().filter(|a| a.has_parent()).count();

    let mut licenses_issued = 0u64;
    let mut total_royalties = 0.0f64;
    for asset in assets {
        licenses_issued += asset.licenses_issued.unwrap_or(0);
        total_royalties += asset.royalties_earned.unwrap_or(0.0);
    }

    PortfolioStatistics {
        total_assets,
        root_assets: total_assets - derivatives,
        derivatives,
        licenses_issued,
        total_royalties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str, parent: Option<&str>) -> Asset {
        Asset::new(id, &format!("Asset {}", id), parent)
    }

    #[test]
    fn test_empty_portfolio_is_all_zero() {
        let stats = calculate_statistics(&[]);

        assert_eq!(stats.total_assets, 0);
        assert_eq!(stats.root_assets, 0);
        assert_eq!(stats.derivatives, 0);
        assert_eq!(stats.licenses_issued, 0);
        assert_eq!(stats.total_royalties, 0.0);
    }

    #[test]
    fn test_roots_and_derivatives_partition_the_list() {
        let assets = vec![
            asset("a", None),
            asset("b", Some("a")),
            asset("c", Some("a")),
            asset("d", None),
        ];
        let stats = calculate_statistics(&assets);

        assert_eq!(stats.total_assets, 4);
        assert_eq!(stats.root_assets, 2);
        assert_eq!(stats.derivatives, 2);
        assert_eq!(stats.root_assets + stats.derivatives, stats.total_assets);
    }

    #[test]
    fn test_empty_parent_string_counts_as_root() {
        let mut orphan = asset("a", None);
        orphan.parent_id = Some(String::new());
        let stats = calculate_statistics(&[orphan]);

        assert_eq!(stats.root_assets, 1);
        assert_eq!(stats.derivatives, 0);
    }

    #[test]
    fn test_optional_sums_treat_missing_as_zero() {
        let mut a = asset("a", None);
        a.licenses_issued = Some(3);
        a.royalties_earned = Some(1.5);
        let mut b = asset("b", Some("a"));
        b.licenses_issued = Some(2);
        let c = asset("c", Some("a"));

        let stats = calculate_statistics(&[a, b, c]);

        assert_eq!(stats.licenses_issued, 5);
        assert!((stats.total_royalties - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_statistics_ignore_child_lists() {
        let mut a = asset("a", None);
        a.child_ids = vec!["ghost".to_string()];
        a.derivative_count = 1;
        let stats = calculate_statistics(&[a]);

        assert_eq!(stats.derivatives, 0);
        assert_eq!(stats.root_assets, 1);
    }

    #[test]
    fn test_statistics_serialize_to_json() {
        let stats = calculate_statistics(&[asset("a", None), asset("b", Some("a"))]);
        let json = serde_json::to_string(&stats).unwrap();

        assert!(json.contains("\"total_assets\":2"));
        assert!(json.contains("\"derivatives\":1"));
    }
}
