use crate::model::{AssetRecord, ChangeEntry, MarketCapEntry};

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Largest `n` assets by market cap. Stable, so equal caps keep provider order.
    pub fn top_by_market_cap(records: &[AssetRecord], n: usize) -> Vec<MarketCapEntry> {
        let mut ranked: Vec<&AssetRecord> = records.iter().collect();
        ranked.sort_by(|a, b| b.market_cap_usd.total_cmp(&a.market_cap_usd));

        ranked
            .into_iter()
            .take(n)
            .map(|r| MarketCapEntry {
                name: r.name.clone(),
                market_cap_usd: r.market_cap_usd,
            })
            .collect()
    }

    pub fn average_price(records: &[AssetRecord]) -> Option<f64> {
        if records.is_empty() {
            return None;
        }
        let total: f64 = records.iter().map(|r| r.price_usd).sum();
        Some(total / records.len() as f64)
    }

    pub fn highest_change(records: &[AssetRecord]) -> Option<ChangeEntry> {
        Self::pick_change(records, |candidate, best| candidate > best)
    }

    pub fn lowest_change(records: &[AssetRecord]) -> Option<ChangeEntry> {
        Self::pick_change(records, |candidate, best| candidate < best)
    }

    // First occurrence wins: a candidate only replaces the current pick when strictly better.
    fn pick_change(records: &[AssetRecord], better: impl Fn(f64, f64) -> bool) -> Option<ChangeEntry> {
        let mut best: Option<(&AssetRecord, f64)> = None;

        for record in records {
            let Some(pct) = record.price_change_24h_pct.filter(|p| !p.is_nan()) else {
                continue;
            };
            let replace = match best {
                Some((_, current)) => better(pct, current),
                None => true,
            };
            if replace {
                best = Some((record, pct));
            }
        }

        best.map(|(record, pct)| ChangeEntry {
            name: record.name.clone(),
            change_pct: pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, price: f64, cap: f64, change: Option<f64>) -> AssetRecord {
        AssetRecord {
            name: name.to_string(),
            symbol: name.to_lowercase(),
            price_usd: price,
            market_cap_usd: cap,
            volume_24h_usd: 0.0,
            price_change_24h_pct: change,
        }
    }

    #[test]
    fn top_is_descending_and_capped() {
        let records: Vec<_> = [10.0, 70.0, 30.0, 90.0, 50.0, 20.0, 80.0]
            .iter()
            .enumerate()
            .map(|(i, cap)| asset(&format!("A{i}"), 1.0, *cap, None))
            .collect();

        let top = MarketAnalyzer::top_by_market_cap(&records, 5);
        let caps: Vec<f64> = top.iter().map(|e| e.market_cap_usd).collect();
        assert_eq!(caps, vec![90.0, 80.0, 70.0, 50.0, 30.0]);
    }

    #[test]
    fn top_with_fewer_records_than_n() {
        let records = vec![asset("A", 1.0, 5.0, None), asset("B", 1.0, 9.0, None)];
        let top = MarketAnalyzer::top_by_market_cap(&records, 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "B");
    }

    #[test]
    fn equal_caps_keep_original_order() {
        let records = vec![
            asset("First", 1.0, 100.0, None),
            asset("Big", 1.0, 200.0, None),
            asset("Second", 1.0, 100.0, None),
            asset("Third", 1.0, 100.0, None),
        ];
        let names: Vec<_> = MarketAnalyzer::top_by_market_cap(&records, 3)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Big", "First", "Second"]);
    }

    #[test]
    fn average_of_known_prices() {
        let records: Vec<_> = [1.0, 2.0, 3.0, 4.0]
            .iter()
            .map(|p| asset("X", *p, 1.0, None))
            .collect();
        assert_eq!(MarketAnalyzer::average_price(&records), Some(2.5));
        assert_eq!(MarketAnalyzer::average_price(&[]), None);
    }

    #[test]
    fn extremes_take_first_occurrence() {
        let records = vec![
            asset("a", 1.0, 1.0, Some(5.0)),
            asset("b", 1.0, 1.0, Some(-3.0)),
            asset("c", 1.0, 1.0, Some(5.0)),
            asset("d", 1.0, 1.0, Some(10.0)),
            asset("e", 1.0, 1.0, Some(-3.0)),
        ];

        let max = MarketAnalyzer::highest_change(&records).unwrap();
        assert_eq!((max.name.as_str(), max.change_pct), ("d", 10.0));
        let min = MarketAnalyzer::lowest_change(&records).unwrap();
        assert_eq!((min.name.as_str(), min.change_pct), ("b", -3.0));

        let tied = vec![asset("x", 1.0, 1.0, Some(2.0)), asset("y", 1.0, 1.0, Some(2.0))];
        assert_eq!(MarketAnalyzer::highest_change(&tied).unwrap().name, "x");
        assert_eq!(MarketAnalyzer::lowest_change(&tied).unwrap().name, "x");
    }

    #[test]
    fn missing_changes_are_skipped() {
        let records = vec![
            asset("null", 1.0, 1.0, None),
            asset("nan", 1.0, 1.0, Some(f64::NAN)),
            asset("real", 1.0, 1.0, Some(-0.5)),
        ];
        assert_eq!(MarketAnalyzer::highest_change(&records).unwrap().name, "real");
        assert_eq!(MarketAnalyzer::lowest_change(&records).unwrap().name, "real");

        let none = vec![asset("null", 1.0, 1.0, None)];
        assert!(MarketAnalyzer::highest_change(&none).is_none());
    }
}
