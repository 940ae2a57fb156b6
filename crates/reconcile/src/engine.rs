//! The reconciliation loop.

use estimate::{
    BoardGateway, BoardTarget, CostTable, EstimatorError, ResolvedFields, RunId, RunStatistics,
    WorkItem, STANDARD_COST_TABLE,
};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::ItemOutcome;

/// Behaviour switches for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Evaluate every item but never issue the update mutation.
    pub dry_run: bool,
}

/// Drives one reconciliation run against a [`BoardGateway`].
pub struct ReconciliationEngine<G> {
    gateway: G,
    table: &'static CostTable,
    options: EngineOptions,
}

impl<G: BoardGateway> ReconciliationEngine<G> {
    /// Creates an engine using [`STANDARD_COST_TABLE`] and default options.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            table: &STANDARD_COST_TABLE,
            options: EngineOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    #[cfg(test)]
    fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Runs the full resolve → fetch → evaluate loop once.
    ///
    /// Identifier resolution and item fetching happen exactly once each; a
    /// failure in either ends the run with an error. Failures on individual
    /// items are logged and counted, and the loop moves on to the next item.
    ///
    /// # Errors
    ///
    /// - [`EstimatorError::Lookup`] if the project or estimate field cannot be
    ///   resolved.
    /// - [`EstimatorError::Fetch`] if any page of items fails to load.
    pub async fn run(&self, target: &BoardTarget) -> Result<RunStatistics, EstimatorError> {
        let run_id = RunId::new_random();
        let span = info_span!(
            "reconcile",
            run_id = %run_id,
            owner_kind = %target.owner_kind,
            owner = %target.owner,
            project_number = %target.project_number,
            dry_run = self.options.dry_run,
        );
        self.run_inner(target).instrument(span).await
    }

    async fn run_inner(&self, target: &BoardTarget) -> Result<RunStatistics, EstimatorError> {
        let resolved = self
            .gateway
            .resolve_field_ids(target)
            .await
            .map_err(EstimatorError::Lookup)?;
        info!(
            project_id = %resolved.project_id,
            field_id = %resolved.estimate_field.id,
            field = %resolved.estimate_field.name,
            "Resolved project and estimate field"
        );

        let items = self
            .gateway
            .fetch_all_items(&resolved.project_id, &resolved.estimate_field.name)
            .await
            .map_err(EstimatorError::Fetch)?;
        info!(count = items.len(), "Fetched project items");

        let mut stats = RunStatistics::default();
        for item in &items {
            stats.total += 1;
            let outcome = self.evaluate(&resolved, item).await;
            log_outcome(item, &outcome);
            outcome.record(&mut stats);
        }

        info!(
            total = stats.total,
            changed = stats.changed,
            unchanged = stats.unchanged,
            skipped_missing = stats.skipped_missing,
            errored = stats.errored,
            "Reconciliation finished"
        );
        Ok(stats)
    }

    /// Decides, and if needed applies, the estimate for one item.
    ///
    /// Never fails: every error is folded into the returned outcome.
    pub async fn evaluate(&self, resolved: &ResolvedFields, item: &WorkItem) -> ItemOutcome {
        let Some(size) = item.size_label() else {
            return ItemOutcome::MissingSize;
        };
        let Some(risk) = item.risk_label() else {
            return ItemOutcome::MissingRisk;
        };

        let days = match self.table.lookup(size, risk) {
            Ok(days) => days,
            Err(e) => return ItemOutcome::InvalidCode(e),
        };

        let previous = item.current_estimate();
        if days.matches(previous) {
            return ItemOutcome::Unchanged(days);
        }

        if self.options.dry_run {
            return ItemOutcome::WouldUpdate { previous, days };
        }

        match self
            .gateway
            .update_estimate(
                &resolved.project_id,
                item.id(),
                &resolved.estimate_field.id,
                days.as_f64(),
            )
            .await
        {
            Ok(()) => ItemOutcome::Updated { previous, days },
            Err(error) => ItemOutcome::UpdateFailed { days, error },
        }
    }
}

fn log_outcome(item: &WorkItem, outcome: &ItemOutcome) {
    let item_id = item.id().as_str();
    let title = item.title();
    match outcome {
        ItemOutcome::MissingSize => warn!(item_id, title, "Skipping item: missing Size"),
        ItemOutcome::MissingRisk => warn!(item_id, title, "Skipping item: missing Risk"),
        ItemOutcome::InvalidCode(e) => {
            warn!(item_id, title, error = %e, "Item has an invalid Size or Risk")
        }
        ItemOutcome::Unchanged(days) => {
            debug!(item_id, title, days = days.as_f64(), "Estimate already up to date")
        }
        ItemOutcome::Updated { previous, days } => info!(
            item_id,
            title,
            previous = ?previous,
            days = days.as_f64(),
            "Updated estimate"
        ),
        ItemOutcome::WouldUpdate { previous, days } => info!(
            item_id,
            title,
            previous = ?previous,
            days = days.as_f64(),
            "Dry run: estimate would be updated"
        ),
        ItemOutcome::UpdateFailed { days, error } => warn!(
            item_id,
            title,
            days = days.as_f64(),
            error = %error,
            "Failed to update estimate"
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use estimate::{
        EvaluationError, FieldDescriptor, FieldId, GatewayError, ItemId, OwnerKind, ProjectId,
        ProjectNumber, RiskCode, SizeCode,
    };

    use super::*;

    /// In-memory board: items live in a vector and updates are applied to it.
    struct FakeBoard {
        items: Mutex<Vec<WorkItem>>,
        resolve_error: Option<GatewayError>,
        fetch_error: Option<GatewayError>,
        failing_updates: HashSet<String>,
        updates: Mutex<Vec<(String, f64)>>,
    }

    impl FakeBoard {
        fn with_items(items: Vec<WorkItem>) -> Self {
            Self {
                items: Mutex::new(items),
                resolve_error: None,
                fetch_error: None,
                failing_updates: HashSet::new(),
                updates: Mutex::new(Vec::new()),
            }
        }

        fn updates(&self) -> Vec<(String, f64)> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BoardGateway for FakeBoard {
        async fn resolve_field_ids(
            &self,
            target: &BoardTarget,
        ) -> Result<ResolvedFields, GatewayError> {
            if let Some(e) = &self.resolve_error {
                return Err(e.clone());
            }
            Ok(ResolvedFields {
                project_id: ProjectId::new("PVT_1").unwrap(),
                estimate_field: FieldDescriptor {
                    id: FieldId::new("PVTF_days").unwrap(),
                    name: target.estimate_field.clone(),
                },
            })
        }

        async fn fetch_all_items(
            &self,
            _project_id: &ProjectId,
            _estimate_field: &str,
        ) -> Result<Vec<WorkItem>, GatewayError> {
            if let Some(e) = &self.fetch_error {
                return Err(e.clone());
            }
            Ok(self.items.lock().unwrap().clone())
        }

        async fn update_estimate(
            &self,
            _project_id: &ProjectId,
            item_id: &ItemId,
            field_id: &FieldId,
            value: f64,
        ) -> Result<(), GatewayError> {
            assert_eq!(field_id.as_str(), "PVTF_days");
            if self.failing_updates.contains(item_id.as_str()) {
                return Err(GatewayError::Protocol {
                    message: "field is read-only".to_string(),
                });
            }
            self.updates
                .lock()
                .unwrap()
                .push((item_id.to_string(), value));
            let mut items = self.items.lock().unwrap();
            if let Some(pos) = items.iter().position(|i| i.id() == item_id) {
                let updated = items[pos].clone().with_current_estimate(value);
                items[pos] = updated;
            }
            Ok(())
        }
    }

    fn target() -> BoardTarget {
        BoardTarget::new(
            OwnerKind::Organization,
            "acme",
            ProjectNumber::new(7),
            "Days Estimate",
        )
        .unwrap()
    }

    fn item(id: &str) -> WorkItem {
        WorkItem::new(ItemId::new(id).unwrap(), Some(format!("Item {id}")))
    }

    fn scenario_items() -> Vec<WorkItem> {
        vec![
            item("A")
                .with_size_label("M (3–5 days)")
                .with_risk_label("High: significant unknowns"),
            item("B")
                .with_size_label("XL")
                .with_risk_label("Low")
                .with_current_estimate(15.0),
            item("C").with_size_label("Weird").with_risk_label("Low"),
        ]
    }

    #[tokio::test]
    async fn test_run_updates_only_changed_items() {
        let engine = ReconciliationEngine::new(FakeBoard::with_items(scenario_items()));

        let stats = engine.run(&target()).await.unwrap();

        assert_eq!(
            stats,
            RunStatistics {
                total: 3,
                changed: 1,
                unchanged: 1,
                skipped_missing: 0,
                errored: 1,
            }
        );
        assert_eq!(engine.gateway().updates(), vec![("A".to_string(), 7.5)]);
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let engine = ReconciliationEngine::new(FakeBoard::with_items(vec![
            item("A").with_size_label("S").with_risk_label("Mid: some"),
            item("B")
                .with_size_label("L (large)")
                .with_risk_label("Severe: high uncertainty")
                .with_current_estimate(1.0),
        ]));

        let first = engine.run(&target()).await.unwrap();
        assert_eq!(first.changed, 2);

        let second = engine.run(&target()).await.unwrap();
        assert_eq!(second.changed, 0);
        assert_eq!(second.unchanged, 2);
        assert_eq!(engine.gateway().updates().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_labels_are_skipped_not_errored() {
        let engine = ReconciliationEngine::new(FakeBoard::with_items(vec![
            item("A").with_risk_label("Low"),
            item("B").with_size_label("S"),
            item("C"),
        ]));

        let stats = engine.run(&target()).await.unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.skipped_missing, 3);
        assert_eq!(stats.errored, 0);
        assert!(engine.gateway().updates().is_empty());
    }

    #[tokio::test]
    async fn test_missing_size_takes_precedence_over_invalid_risk() {
        let engine = ReconciliationEngine::new(FakeBoard::with_items(Vec::new()));
        let resolved = engine.gateway().resolve_field_ids(&target()).await.unwrap();

        let outcome = engine
            .evaluate(&resolved, &item("A").with_risk_label("Bogus"))
            .await;

        assert_eq!(outcome, ItemOutcome::MissingSize);
    }

    #[tokio::test]
    async fn test_invalid_risk_is_reported_after_valid_size() {
        let engine = ReconciliationEngine::new(FakeBoard::with_items(Vec::new()));
        let resolved = engine.gateway().resolve_field_ids(&target()).await.unwrap();

        let outcome = engine
            .evaluate(
                &resolved,
                &item("A").with_size_label("XS").with_risk_label("Extreme: yikes"),
            )
            .await;

        assert_eq!(
            outcome,
            ItemOutcome::InvalidCode(EvaluationError::InvalidRisk {
                label: "Extreme: yikes".to_string(),
                key: "EXTREME".to_string(),
            })
        );
        assert!(engine.gateway().updates().is_empty());
    }

    #[tokio::test]
    async fn test_update_failure_does_not_stop_later_items() {
        let mut board = FakeBoard::with_items(vec![
            item("A").with_size_label("S").with_risk_label("Low"),
            item("B").with_size_label("M").with_risk_label("Low"),
            item("C").with_size_label("Nope").with_risk_label("Low"),
            item("D").with_size_label("L").with_risk_label("Low"),
        ]);
        board.failing_updates.insert("A".to_string());
        let engine = ReconciliationEngine::new(board);

        let stats = engine.run(&target()).await.unwrap();

        assert_eq!(stats.errored, 2);
        assert_eq!(stats.changed, 2);
        assert_eq!(
            engine.gateway().updates(),
            vec![("B".to_string(), 4.0), ("D".to_string(), 7.5)]
        );
    }

    #[tokio::test]
    async fn test_comparison_is_exact() {
        let engine = ReconciliationEngine::new(FakeBoard::with_items(vec![item("A")
            .with_size_label("M")
            .with_risk_label("High")
            .with_current_estimate(7.4999)]));

        let stats = engine.run(&target()).await.unwrap();

        assert_eq!(stats.changed, 1);
        assert_eq!(engine.gateway().updates(), vec![("A".to_string(), 7.5)]);
    }

    #[tokio::test]
    async fn test_dry_run_issues_no_updates() {
        let engine = ReconciliationEngine::new(FakeBoard::with_items(scenario_items()))
            .with_options(EngineOptions { dry_run: true });

        let stats = engine.run(&target()).await.unwrap();

        assert_eq!(stats.changed, 1);
        assert_eq!(stats.errored, 1);
        assert!(engine.gateway().updates().is_empty());

        let resolved = engine.gateway().resolve_field_ids(&target()).await.unwrap();
        let outcome = engine.evaluate(&resolved, &scenario_items()[0]).await;
        assert_eq!(
            outcome,
            ItemOutcome::WouldUpdate {
                previous: None,
                days: STANDARD_COST_TABLE.days_for(SizeCode::M, RiskCode::High),
            }
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_is_fatal() {
        let mut board = FakeBoard::with_items(scenario_items());
        board.resolve_error = Some(GatewayError::FieldNotFound {
            field: "Days Estimate".to_string(),
        });
        let engine = ReconciliationEngine::new(board);

        let err = engine.run(&target()).await.unwrap_err();

        assert!(matches!(
            err,
            EstimatorError::Lookup(GatewayError::FieldNotFound { .. })
        ));
        assert!(engine.gateway().updates().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_fatal() {
        let mut board = FakeBoard::with_items(scenario_items());
        board.fetch_error = Some(GatewayError::Transport {
            message: "connection reset".to_string(),
        });
        let engine = ReconciliationEngine::new(board);

        let err = engine.run(&target()).await.unwrap_err();

        assert!(matches!(err, EstimatorError::Fetch(GatewayError::Transport { .. })));
        assert!(engine.gateway().updates().is_empty());
    }
}
