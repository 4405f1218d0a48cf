//! Daily match counting over a character's upstream activity history.
//!
//! Pages are walked newest first. The walk ends at the first countable record
//! older than the window, or at the first page with no activities at all, so
//! the number of upstream calls grows with the window rather than with the
//! whole history.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{ActivityMode, DEFAULT_EXCLUDED_MODES, Identity, MatchResults, TimeWindow};
use crate::upstream::{
    Activity, ActivityHistory, DEFAULT_BASE_URL, DEFAULT_MODE_FILTER, Transport,
    activity_history_url,
};
use crate::utils::time::{day_key, parse_period};

#[derive(Debug, Clone)]
pub struct CounterConfig {
    pub base_url: String,
    /// Sent upstream as the `mode` query parameter
    pub mode_filter: String,
    /// Never counted, whatever the upstream filter lets through
    pub excluded_modes: HashSet<ActivityMode>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mode_filter: DEFAULT_MODE_FILTER.to_string(),
            excluded_modes: DEFAULT_EXCLUDED_MODES.into_iter().collect(),
        }
    }
}

impl CounterConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();

        self
    }
}

/// Whether another page should be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Done,
}

#[derive(Clone)]
pub struct MatchCounter {
    transport: Arc<dyn Transport>,
    config: CounterConfig,
}

impl MatchCounter {
    pub fn new(transport: Arc<dyn Transport>, config: CounterConfig) -> Self {
        Self { transport, config }
    }

    /// Count qualifying matches per day for `identity` within `window`.
    ///
    /// Either the whole window is summarised or an error is returned; partial
    /// results are never surfaced.
    pub async fn get_results(
        &self,
        identity: &Identity,
        window: &TimeWindow,
    ) -> Result<MatchResults> {
        let mut results = MatchResults::empty(window);
        let mut page = 0;

        loop {
            page += 1;
            let url = activity_history_url(
                &self.config.base_url,
                identity,
                &self.config.mode_filter,
                page,
            );

            let body = self.transport.get(&url).await?;
            let history = decode_page(&body).inspect_err(|e| log_rejected(identity, page, e))?;

            tracing::debug!(
                %identity,
                page,
                activities = history.activities().len(),
                "fetched activity page"
            );

            let flow = self
                .tally_page(history.activities(), window, &mut results)
                .inspect_err(|e| log_rejected(identity, page, e))?;

            if flow == Flow::Done {
                break;
            }
        }

        tracing::debug!(%identity, pages = page, total = results.total, "activity history counted");
        Ok(results)
    }

    fn tally_page(
        &self,
        activities: &[Activity],
        window: &TimeWindow,
        results: &mut MatchResults,
    ) -> Result<Flow> {
        if activities.is_empty() {
            return Ok(Flow::Done);
        }

        let lower_bound = window.lower_bound();
        for activity in activities {
            if self.is_excluded(activity.activity_details.mode) {
                continue;
            }

            let period = parse_period(&activity.period)?;
            if period < lower_bound {
                return Ok(Flow::Done);
            }

            let day = day_key(period);
            if window.is_after(day) {
                continue;
            }

            results.record(day);
        }

        Ok(Flow::Continue)
    }

    fn is_excluded(&self, mode: ActivityMode) -> bool {
        self.config.excluded_modes.contains(&mode)
    }
}

fn decode_page(body: &str) -> Result<ActivityHistory> {
    let history: ActivityHistory = serde_json::from_str(body)?;

    if !history.is_ok() {
        return Err(Error::UpstreamResponse(format!(
            "status {:?}: {}",
            history.error_status, history.message
        )));
    }

    Ok(history)
}

fn log_rejected(identity: &Identity, page: u32, err: &Error) {
    if let Error::UpstreamResponse(reason) = err {
        tracing::warn!(%identity, page, reason = %reason, "rejected upstream payload");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use parking_lot::Mutex;
    use serde_json::json;

    use super::*;

    /// Serves canned bodies by page number; pages not scripted come back empty
    #[derive(Default)]
    struct ScriptedTransport {
        pages: HashMap<u32, std::result::Result<String, String>>,
        requested: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn with_page(mut self, page: u32, activities: serde_json::Value) -> Self {
            self.pages.insert(page, Ok(envelope(activities, "Ok").to_string()));
            self
        }

        fn with_body(mut self, page: u32, body: &str) -> Self {
            self.pages.insert(page, Ok(body.to_string()));
            self
        }

        fn with_failure(mut self, page: u32, message: &str) -> Self {
            self.pages.insert(page, Err(message.to_string()));
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().clone()
        }
    }

    #[async_trait::async_trait]
    impl Transport for ScriptedTransport {
        async fn get(&self, url: &str) -> Result<String> {
            self.requested.lock().push(url.to_string());

            let page: u32 = url
                .rsplit("page=")
                .next()
                .and_then(|p| p.parse().ok())
                .unwrap();

            match self.pages.get(&page) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(message)) => Err(Error::Transport(message.clone())),
                None => Ok(envelope(json!([]), "Ok").to_string()),
            }
        }
    }

    fn envelope(activities: serde_json::Value, message: &str) -> serde_json::Value {
        json!({
            "Response": { "data": { "activities": activities } },
            "ErrorStatus": "Success",
            "Message": message
        })
    }

    fn activity(period: &str, mode: i32) -> serde_json::Value {
        json!({ "period": period, "activityDetails": { "mode": mode } })
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn counter(transport: &Arc<ScriptedTransport>) -> MatchCounter {
        MatchCounter::new(
            transport.clone(),
            CounterConfig::default().with_base_url("https://stats.test/history"),
        )
    }

    fn identity() -> Identity {
        Identity::new("2", "111", "222")
    }

    fn assert_total_matches_breakdown(results: &MatchResults) {
        let sum: u64 = results.breakdown.iter().map(|b| b.count).sum();
        assert_eq!(results.total, sum);
    }

    #[tokio::test]
    async fn test_single_day_with_excluded_mode() {
        let transport = Arc::new(ScriptedTransport::default().with_page(
            1,
            json!([
                activity("2016-05-01T21:00:00Z", 10),
                activity("2016-05-01T20:00:00Z", 14),
                activity("2016-05-01T19:00:00Z", 13),
            ]),
        ));
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 1));

        let results = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&results).unwrap(),
            json!({
                "from": "2016-05-01",
                "to": "2016-05-01",
                "total": 2,
                "breakdown": [{ "date": "2016-05-01", "count": 2 }]
            })
        );
        assert_eq!(transport.requested().len(), 2);
        assert_eq!(
            transport.requested()[0],
            format!(
                "https://stats.test/history/2/111/222/?mode={}&page=1",
                DEFAULT_MODE_FILTER
            )
        );
    }

    #[tokio::test]
    async fn test_empty_history() {
        let transport = Arc::new(ScriptedTransport::default());
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 7));

        let results = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap();

        assert_eq!(results.total, 0);
        assert!(results.breakdown.is_empty());
        assert_eq!(results.from, date(2016, 5, 1));
        assert_eq!(results.to, date(2016, 5, 7));
        assert_eq!(transport.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_days_merge_across_pages() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .with_page(
                    1,
                    json!([
                        activity("2016-05-03T10:00:00Z", 10),
                        activity("2016-05-02T23:00:00Z", 11),
                    ]),
                )
                .with_page(
                    2,
                    json!([
                        activity("2016-05-02T08:00:00Z", 13),
                        activity("2016-05-01T12:00:00Z", 10),
                    ]),
                ),
        );
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 3));

        let results = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap();

        assert_eq!(results.total, 4);
        assert_eq!(results.count_for(date(2016, 5, 3)), 1);
        assert_eq!(results.count_for(date(2016, 5, 2)), 2);
        assert_eq!(results.count_for(date(2016, 5, 1)), 1);
        let days: Vec<_> = results.breakdown.iter().map(|b| b.date).collect();
        assert_eq!(days, vec![date(2016, 5, 3), date(2016, 5, 2), date(2016, 5, 1)]);
        assert_total_matches_breakdown(&results);
    }

    #[tokio::test]
    async fn test_lower_bound_is_inclusive() {
        let transport = Arc::new(ScriptedTransport::default().with_page(
            1,
            json!([
                activity("2016-05-01T00:00:00Z", 10),
                activity("2016-04-30T23:59:59Z", 10),
            ]),
        ));
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 1));

        let results = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap();

        assert_eq!(results.total, 1);
        assert_eq!(results.count_for(date(2016, 5, 1)), 1);
        assert_eq!(results.count_for(date(2016, 4, 30)), 0);
    }

    #[tokio::test]
    async fn test_stops_before_fetching_past_window() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .with_page(
                    1,
                    json!([
                        activity("2016-05-02T10:00:00Z", 10),
                        activity("2016-04-20T10:00:00Z", 10),
                        activity("2016-05-02T09:00:00Z", 10),
                    ]),
                )
                .with_failure(2, "page 2 must never be requested"),
        );
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 2));

        let results = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap();

        assert_eq!(results.total, 1);
        assert_eq!(transport.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_excluded_old_record_does_not_stop_walk() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .with_page(1, json!([activity("2015-01-01T10:00:00Z", 32)]))
                .with_page(2, json!([activity("2016-05-01T10:00:00Z", 10)])),
        );
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 1));

        let results = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap();

        assert_eq!(results.total, 1);
        assert_eq!(transport.requested().len(), 3);
    }

    #[tokio::test]
    async fn test_excluded_modes_never_counted() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .with_page(
                    1,
                    json!([
                        activity("2016-05-02T10:00:00Z", 19),
                        activity("2016-05-02T09:00:00Z", 14),
                    ]),
                )
                .with_page(2, json!([activity("2016-05-01T10:00:00Z", 32)])),
        );
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 2));

        let results = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap();

        assert!(results.is_empty());
        assert!(results.breakdown.is_empty());
    }

    #[tokio::test]
    async fn test_records_after_window_are_skipped() {
        let transport = Arc::new(ScriptedTransport::default().with_page(
            1,
            json!([
                activity("2016-05-05T10:00:00Z", 10),
                activity("2016-05-02T00:00:00Z", 10),
                activity("2016-05-01T10:00:00Z", 10),
            ]),
        ));
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 1));

        let results = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap();

        assert_eq!(results.total, 1);
        assert_eq!(results.breakdown.len(), 1);
    }

    #[tokio::test]
    async fn test_non_ok_message_is_rejected() {
        let transport = Arc::new(ScriptedTransport::default().with_body(
            1,
            &envelope(json!([activity("2016-05-01T10:00:00Z", 10)]), "Throttled").to_string(),
        ));
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 1));

        let err = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap_err();

        assert!(err.is_upstream_response());
        assert_eq!(err.to_string(), "could not parse upstream API");
    }

    #[tokio::test]
    async fn test_invalid_json_is_rejected() {
        let transport = Arc::new(ScriptedTransport::default().with_body(1, "<html>502</html>"));
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 1));

        let err = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap_err();

        assert!(err.is_upstream_response());
    }

    #[tokio::test]
    async fn test_unparseable_period_is_rejected() {
        let transport = Arc::new(ScriptedTransport::default().with_page(
            1,
            json!([
                activity("2016-05-01T10:00:00Z", 10),
                activity("not-a-timestamp", 10),
            ]),
        ));
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 1));

        let err = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap_err();

        assert!(err.is_upstream_response());
    }

    #[tokio::test]
    async fn test_transport_error_is_propagated() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .with_page(1, json!([activity("2016-05-01T10:00:00Z", 10)]))
                .with_failure(2, "connection reset by peer"),
        );
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 1));

        let err = counter(&transport)
            .get_results(&identity(), &window)
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.to_string(), "connection reset by peer");
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .with_page(
                    1,
                    json!([
                        activity("2016-05-02T10:00:00Z", 10),
                        activity("2016-05-01T10:00:00Z", 19),
                    ]),
                )
                .with_page(2, json!([activity("2016-05-01T09:00:00Z", 11)])),
        );
        let counter = counter(&transport);
        let window = TimeWindow::new(date(2016, 5, 1), date(2016, 5, 2));

        let first = counter.get_results(&identity(), &window).await.unwrap();
        let second = counter.get_results(&identity(), &window).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.total, 2);
        assert_total_matches_breakdown(&first);
    }
}
