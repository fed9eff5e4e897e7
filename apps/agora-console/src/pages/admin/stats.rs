use agora_core::domain::StatsPeriod;
use agora_core::ports::BoardFixtures;
use agora_shared::Endpoint;

use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

/// Overview tab. The series come from the fixtures; the pending report
/// counter is the live queue size.
pub async fn show(
    fixtures: &dyn BoardFixtures,
    period: StatsPeriod,
    pending_reports: usize,
) -> UiResult<Reply> {
    let mut stats = fixtures.dashboard_stats(period).await?;
    stats.pending_reports = pending_reports as u32;
    tracing::debug!(?period, pending_reports, "Dashboard stats loaded");
    Ok(Reply::view(render::stats(&stats), &stats)?.sent(Endpoint::DashboardStats, &[]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_infra::StaticFixtures;

    #[tokio::test]
    async fn pending_reports_are_counted_live() {
        let fixtures = StaticFixtures::embedded().unwrap();
        let reply = show(&fixtures, StatsPeriod::Month, 3).await.unwrap();
        let data = reply.data.unwrap();
        assert_eq!(data["pending_reports"], 3);
        assert_eq!(data["period"], "month");
        assert_eq!(reply.request.unwrap().path, "/admin/stats");
    }
}
