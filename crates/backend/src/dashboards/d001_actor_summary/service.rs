//! Role dashboards and the administrative overview.
//!
//! Each dashboard is a pure summary over a slice of batches; the async
//! entry points only fetch the slice. Listings arrive newest-activity
//! first from the repository, so "recent" is a plain prefix.

use chrono::{DateTime, Utc};
use contracts::dashboards::d001_actor_summary::{
    DistributorDashboard, ProducerDashboard, RetailerDashboard, StatusCount, SystemStats,
};
use contracts::domain::a001_batch::aggregate::Batch;
use contracts::domain::common::ChainError;
use contracts::enums::BatchStatus;
use uuid::Uuid;

use crate::domain::a001_batch::repository;

const RECENT_LIMIT: usize = 5;

pub async fn producer_dashboard(producer_id: Uuid) -> Result<ProducerDashboard, ChainError> {
    let batches = repository::list_by_originator(producer_id, true).await?;
    Ok(summarize_producer(&batches))
}

pub async fn distributor_dashboard(
    distributor_id: Uuid,
) -> Result<DistributorDashboard, ChainError> {
    let batches = repository::list_by_owner(distributor_id, true).await?;
    Ok(summarize_distributor(&batches))
}

pub async fn retailer_dashboard(retailer_id: Uuid) -> Result<RetailerDashboard, ChainError> {
    let batches = repository::list_by_owner(retailer_id, true).await?;
    Ok(summarize_retailer(&batches))
}

pub async fn system_stats() -> Result<SystemStats, ChainError> {
    let batches = repository::list_all().await?;
    Ok(summarize_system(&batches, Utc::now()))
}

pub fn summarize_producer(batches: &[Batch]) -> ProducerDashboard {
    ProducerDashboard {
        total_batches: batches.len(),
        active_batches: batches.iter().filter(|b| !b.status.is_terminal()).count(),
        sold_batches: batches
            .iter()
            .filter(|b| b.status == BatchStatus::Sold)
            .count(),
        recent_batches: batches.iter().take(RECENT_LIMIT).cloned().collect(),
    }
}

pub fn summarize_distributor(batches: &[Batch]) -> DistributorDashboard {
    DistributorDashboard {
        total_batches: batches.len(),
        active_batches: batches.iter().filter(|b| !b.status.is_terminal()).count(),
        in_custody: batches
            .iter()
            .filter(|b| b.status == BatchStatus::WithDistributor)
            .count(),
        recent_batches: batches.iter().take(RECENT_LIMIT).cloned().collect(),
    }
}

pub fn summarize_retailer(batches: &[Batch]) -> RetailerDashboard {
    let sold: Vec<&Batch> = batches
        .iter()
        .filter(|b| b.status == BatchStatus::Sold)
        .collect();
    RetailerDashboard {
        total_batches: batches.len(),
        active_batches: batches.iter().filter(|b| !b.status.is_terminal()).count(),
        with_retailer: batches
            .iter()
            .filter(|b| b.status == BatchStatus::WithRetailer)
            .count(),
        sold_batches: sold.len(),
        revenue: sold.iter().map(|b| b.quantity * b.current_price).sum(),
        recent_batches: batches.iter().take(RECENT_LIMIT).cloned().collect(),
    }
}

pub fn summarize_system(batches: &[Batch], now: DateTime<Utc>) -> SystemStats {
    let live: Vec<&Batch> = batches.iter().filter(|b| b.is_active()).collect();

    let by_status = BatchStatus::all()
        .into_iter()
        .map(|status| StatusCount {
            status: status.code().to_string(),
            count: live.iter().filter(|b| b.status == status).count(),
        })
        .collect();

    let total_revenue: f64 = live
        .iter()
        .filter(|b| b.status == BatchStatus::Sold)
        .map(|b| b.quantity * b.current_price)
        .sum();

    let average_price = mean(live.iter().map(|b| b.current_price));

    let average_days_in_chain = mean(live.iter().map(|b| b.days_in_chain(now) as f64));

    // markup over origin price, only where an origin price exists
    let average_markup_percent = mean(
        live.iter()
            .filter(|b| b.origin_price > 0.0)
            .map(|b| (b.current_price - b.origin_price) / b.origin_price * 100.0),
    );

    SystemStats {
        total_batches: batches.len(),
        active_batches: live.iter().filter(|b| !b.status.is_terminal()).count(),
        by_status,
        total_revenue,
        average_price,
        average_days_in_chain,
        average_markup_percent,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_batch::aggregate::BatchDto;

    fn batch(status: BatchStatus, quantity: f64, origin: f64, current: f64) -> Batch {
        let dto = BatchDto {
            description: "Tomatoes".into(),
            category: "Vegetable".into(),
            quantity,
            unit: "kg".into(),
            origin_price: origin,
            ..Default::default()
        };
        let mut b = Batch::new_for_insert(dto, Uuid::new_v4(), "Farm".into());
        b.status = status;
        b.current_price = current;
        b
    }

    #[test]
    fn producer_summary_counts_sold_and_active() {
        let batches = vec![
            batch(BatchStatus::Registered, 10.0, 1.0, 1.0),
            batch(BatchStatus::Sold, 10.0, 1.0, 2.0),
            batch(BatchStatus::Expired, 10.0, 1.0, 1.0),
        ];
        let d = summarize_producer(&batches);
        assert_eq!(d.total_batches, 3);
        assert_eq!(d.active_batches, 1);
        assert_eq!(d.sold_batches, 1);
        assert_eq!(d.recent_batches.len(), 3);
    }

    #[test]
    fn recent_is_capped_at_five() {
        let batches: Vec<Batch> = (0..8)
            .map(|_| batch(BatchStatus::Registered, 10.0, 1.0, 1.0))
            .collect();
        assert_eq!(summarize_producer(&batches).recent_batches.len(), 5);
    }

    #[test]
    fn retailer_revenue_sums_sold_lots_only() {
        let batches = vec![
            batch(BatchStatus::Sold, 20.0, 1.0, 3.0),   // 60
            batch(BatchStatus::Sold, 5.0, 1.0, 4.0),    // 20
            batch(BatchStatus::WithRetailer, 50.0, 1.0, 9.0),
        ];
        let d = summarize_retailer(&batches);
        assert_eq!(d.sold_batches, 2);
        assert_eq!(d.with_retailer, 1);
        assert!((d.revenue - 80.0).abs() < 1e-9);
    }

    #[test]
    fn system_stats_average_markup_skips_zero_origin() {
        let batches = vec![
            batch(BatchStatus::WithRetailer, 10.0, 2.0, 3.0), // +50%
            batch(BatchStatus::WithDistributor, 10.0, 4.0, 5.0), // +25%
            batch(BatchStatus::Registered, 10.0, 0.0, 7.0),   // excluded
        ];
        let stats = summarize_system(&batches, Utc::now());
        assert!((stats.average_markup_percent - 37.5).abs() < 1e-9);
    }

    #[test]
    fn system_stats_revenue_and_status_breakdown() {
        let mut deleted = batch(BatchStatus::Sold, 10.0, 1.0, 2.0);
        deleted.base.metadata.mark_deleted();
        let batches = vec![
            batch(BatchStatus::Sold, 10.0, 1.0, 2.0), // 20
            batch(BatchStatus::Registered, 10.0, 1.0, 1.0),
            deleted, // invisible to the live stats
        ];
        let stats = summarize_system(&batches, Utc::now());
        assert_eq!(stats.total_batches, 3);
        assert_eq!(stats.active_batches, 1);
        assert!((stats.total_revenue - 20.0).abs() < 1e-9);

        let sold_count = stats
            .by_status
            .iter()
            .find(|s| s.status == "SOLD")
            .map(|s| s.count)
            .unwrap();
        assert_eq!(sold_count, 1);
    }

    #[test]
    fn average_days_runs_to_the_last_update() {
        let mut sold = batch(BatchStatus::Sold, 10.0, 1.0, 2.0);
        let t0 = sold.base.metadata.created_at;
        sold.base.metadata.updated_at = t0 + chrono::Duration::days(4);

        let mut held = batch(BatchStatus::WithRetailer, 10.0, 1.0, 2.0);
        held.base.metadata.updated_at = held.base.metadata.created_at + chrono::Duration::days(2);

        let stats = summarize_system(&[sold, held], t0 + chrono::Duration::days(30));
        assert!((stats.average_days_in_chain - 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_zeroed_stats() {
        let stats = summarize_system(&[], Utc::now());
        assert_eq!(stats.total_batches, 0);
        assert_eq!(stats.average_price, 0.0);
        assert_eq!(stats.average_markup_percent, 0.0);
    }
}
