//! `BatchProcessor`: two-pass enrichment of a table of CNPJs.
//!
//! # Pass 1
//! Every non-empty `CNPJ` cell is normalized and looked up once. Failures are
//! parked for a retry; a pacing delay follows every query.
//!
//! # Pass 2
//! If anything failed, wait for the cooldown and look each parked identifier
//! up one more time. Whatever fails again is final.

use crate::cnpj::normalize;
use crate::error::BatchError;
use crate::lookup::LookupClient;
use crate::policy::BatchRetryPolicy;
use crate::record::{CompanyRecord, COLUMNS};
use crate::report::StatusEvent;
use crate::table::Table;
use crate::transport::RegistryTransport;

/// Column the input table must carry.
pub const INPUT_COLUMN: &str = "CNPJ";
/// Header of the single column of the failures table.
pub const ERROR_COLUMN: &str = "CNPJ com Erro";
/// Rows shown in the preview event.
pub const PREVIEW_ROWS: usize = 5;

/// Where an identifier stands during a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierState {
    Pending,
    Success,
    AwaitingRetry,
    PermanentFailure,
}

impl IdentifierState {
    /// Next state after a lookup that did (`true`) or did not succeed.
    pub fn advance(self, found: bool) -> Self {
        match (self, found) {
            (Self::Pending | Self::AwaitingRetry, true) => Self::Success,
            (Self::Pending, false) => Self::AwaitingRetry,
            (Self::AwaitingRetry, false) => Self::PermanentFailure,
            (terminal, _) => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::PermanentFailure)
    }
}

/// Result of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Records found, in query order (first pass, then retry pass).
    pub records: Vec<CompanyRecord>,
    /// Normalized identifiers that failed both passes.
    pub failed: Vec<String>,
    /// Non-empty identifiers read from the input.
    pub total_input: usize,
    /// Identifiers that failed the first pass but succeeded on retry.
    pub recovered: usize,
}

impl BatchOutcome {
    /// Results table, one row per record, columns in [`COLUMNS`] order.
    pub fn records_table(&self) -> Table {
        let mut table = Table::new(COLUMNS);
        for record in &self.records {
            table.push_row(record.cells());
        }
        table
    }

    /// Single-column table of the identifiers that failed.
    pub fn failures_table(&self) -> Table {
        let mut table = Table::new([ERROR_COLUMN]);
        for cnpj in &self.failed {
            table.push_row([cnpj.as_str()]);
        }
        table
    }
}

/// Runs a [`LookupClient`] over a whole table.
pub struct BatchProcessor<T> {
    client: LookupClient<T>,
    policy: BatchRetryPolicy,
}

impl<T: RegistryTransport> BatchProcessor<T> {
    /// The processor shares the client's sleeper and sink.
    pub fn new(client: LookupClient<T>) -> Self {
        Self {
            client,
            policy: BatchRetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: BatchRetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn client(&self) -> &LookupClient<T> {
        &self.client
    }

    /// Enrich every identifier in the `CNPJ` column of `input`.
    pub async fn process(&self, input: &Table) -> Result<BatchOutcome, BatchError> {
        let sink = self.client.sink();

        let Some(cells) = input.column(INPUT_COLUMN) else {
            sink.emit(StatusEvent::MissingColumn { column: INPUT_COLUMN.to_string() });
            return Err(BatchError::MissingColumn { column: INPUT_COLUMN.to_string() });
        };

        sink.emit(StatusEvent::Preview { table: input.head(PREVIEW_ROWS) });

        let identifiers: Vec<&str> = cells.into_iter().filter(|c| !c.trim().is_empty()).collect();
        tracing::info!(
            rows = input.len(),
            identifiers = identifiers.len(),
            url = %self.client.transport().url(),
            "starting batch"
        );

        let mut outcome = BatchOutcome {
            total_input: identifiers.len(),
            ..Default::default()
        };
        let mut pending: Vec<String> = Vec::new();

        for raw in identifiers {
            let cnpj = normalize(raw);
            let state = self.query(&cnpj, IdentifierState::Pending, &mut outcome).await;
            if state == IdentifierState::AwaitingRetry {
                pending.push(cnpj);
            }
        }

        if self.policy.should_retry(pending.len()) {
            sink.emit(StatusEvent::RetryPassStarted {
                pending: pending.len(),
                cooldown: self.policy.cooldown,
            });
            self.client.sleeper().sleep(self.policy.cooldown).await;

            for cnpj in pending {
                let state = self.query(&cnpj, IdentifierState::AwaitingRetry, &mut outcome).await;
                match state {
                    IdentifierState::Success => outcome.recovered += 1,
                    _ => {
                        sink.emit(StatusEvent::FinalFailure { cnpj: cnpj.clone() });
                        outcome.failed.push(cnpj);
                    }
                }
            }
        } else {
            outcome.failed = pending;
        }

        sink.emit(StatusEvent::BatchComplete {
            succeeded: outcome.records.len(),
            failed: outcome.failed.len(),
        });
        tracing::info!(
            succeeded = outcome.records.len(),
            recovered = outcome.recovered,
            failed = outcome.failed.len(),
            "batch complete"
        );
        Ok(outcome)
    }

    /// One paced lookup; returns the identifier's next state.
    async fn query(
        &self,
        cnpj: &str,
        state: IdentifierState,
        outcome: &mut BatchOutcome,
    ) -> IdentifierState {
        let record = self.client.lookup(cnpj).await;
        let next = state.advance(record.is_some());
        if let Some(record) = record {
            outcome.records.push(record);
        }
        tracing::debug!(cnpj, from = ?state, to = ?next, "identifier state");

        let pace = self.policy.pacing_delay();
        self.client.sleeper().sleep(pace).await;
        next
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::policy::RecordingSleeper;
    use crate::report::MemorySink;
    use crate::transport::mock::ScriptedTransport;

    const GOOD: &str = "12345678000195";
    const BAD: &str = "00000000000001";
    const BODY: &str = r#"{"cnpj": "12.345.678/0001-95", "nome": "ACME LTDA", "qsa": []}"#;

    struct Harness {
        processor: BatchProcessor<ScriptedTransport>,
        sleeper: Arc<RecordingSleeper>,
        sink: Arc<MemorySink>,
    }

    fn harness(transport: ScriptedTransport) -> Harness {
        let sleeper = Arc::new(RecordingSleeper::new());
        let sink = Arc::new(MemorySink::new());
        let client = LookupClient::new(transport)
            .with_sleeper(sleeper.clone())
            .with_sink(sink.clone());
        Harness { processor: BatchProcessor::new(client), sleeper, sink }
    }

    fn input(values: &[&str]) -> Table {
        let mut t = Table::new(["Empresa", "CNPJ"]);
        for (i, v) in values.iter().enumerate() {
            t.push_row([format!("empresa {i}"), v.to_string()]);
        }
        t
    }

    #[test]
    fn state_machine() {
        use IdentifierState::*;
        assert_eq!(Pending.advance(true), Success);
        assert_eq!(Pending.advance(false), AwaitingRetry);
        assert_eq!(AwaitingRetry.advance(true), Success);
        assert_eq!(AwaitingRetry.advance(false), PermanentFailure);
        assert_eq!(PermanentFailure.advance(true), PermanentFailure);
        assert!(Success.is_terminal() && PermanentFailure.is_terminal());
        assert!(!AwaitingRetry.is_terminal());
    }

    #[tokio::test]
    async fn one_found_one_reported_error() {
        let transport = ScriptedTransport::new()
            .respond(GOOD, 200, BODY)
            .respond(BAD, 200, r#"{"erro": "CNPJ inválido"}"#)
            .respond(BAD, 200, r#"{"erro": "CNPJ inválido"}"#);
        let h = harness(transport);

        let outcome = h
            .processor
            .process(&input(&["12.345.678/0001-95", "1"]))
            .await
            .unwrap();

        assert_eq!(outcome.records_table().len(), 1);
        assert_eq!(outcome.failures_table().len(), 1);
        assert_eq!(outcome.failed, vec![BAD.to_string()]);
        assert_eq!(outcome.failures_table().columns, vec![ERROR_COLUMN.to_string()]);
        assert_eq!(outcome.total_input, 2);
        assert_eq!(outcome.recovered, 0);

        // Second pass queried only the failure, once.
        assert_eq!(h.processor.client().transport().calls(), vec![GOOD, BAD, BAD]);
        assert!(h.sink.events().contains(&StatusEvent::FinalFailure { cnpj: BAD.into() }));
    }

    #[tokio::test]
    async fn pacing_and_cooldown_waits() {
        let transport = ScriptedTransport::new()
            .respond(GOOD, 200, BODY)
            .respond(BAD, 500, "");
        let h = harness(transport);
        h.processor.process(&input(&[GOOD, BAD])).await.unwrap();

        let waits = h.sleeper.waits();
        // pace, pace, cooldown, pace
        assert_eq!(waits.len(), 4);
        assert_eq!(waits[2], Duration::from_secs(30));
        let pacing = BatchRetryPolicy::default().pacing;
        for w in [waits[0], waits[1], waits[3]] {
            assert!(pacing.contains(w), "pacing {w:?} out of range");
        }
    }

    #[tokio::test]
    async fn retry_pass_recovers() {
        let transport = ScriptedTransport::new()
            .respond(GOOD, 503, "")
            .respond(GOOD, 200, BODY);
        let h = harness(transport);
        let outcome = h.processor.process(&input(&[GOOD])).await.unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.recovered, 1);
    }

    #[tokio::test]
    async fn no_retry_pass_without_failures() {
        let h = harness(ScriptedTransport::new().respond(GOOD, 200, BODY));
        h.processor.process(&input(&[GOOD])).await.unwrap();
        assert_eq!(h.sleeper.waits().len(), 1);
        assert!(!h
            .sink
            .events()
            .iter()
            .any(|e| matches!(e, StatusEvent::RetryPassStarted { .. })));
    }

    #[tokio::test]
    async fn empty_cells_are_skipped() {
        let h = harness(ScriptedTransport::new().respond(GOOD, 200, BODY));
        let outcome = h.processor.process(&input(&["", GOOD, "   "])).await.unwrap();
        assert_eq!(outcome.total_input, 1);
        assert_eq!(h.processor.client().transport().calls(), vec![GOOD]);
    }

    #[tokio::test]
    async fn invalid_identifiers_end_up_failed() {
        let h = harness(ScriptedTransport::new());
        let outcome = h.processor.process(&input(&["123456789012345"])).await.unwrap();
        assert_eq!(outcome.failed, vec!["123456789012345".to_string()]);
        assert!(h.processor.client().transport().calls().is_empty());
    }

    #[tokio::test]
    async fn missing_column_is_fatal() {
        let h = harness(ScriptedTransport::new());
        let mut table = Table::new(["cnpj"]);
        table.push_row([GOOD]);

        let err = h.processor.process(&table).await.unwrap_err();
        assert_eq!(err, BatchError::MissingColumn { column: "CNPJ".into() });
        assert_eq!(
            h.sink.events(),
            vec![StatusEvent::MissingColumn { column: "CNPJ".into() }]
        );
        assert!(h.processor.client().transport().calls().is_empty());
    }

    #[tokio::test]
    async fn preview_is_emitted_first() {
        let h = harness(ScriptedTransport::new());
        let values: Vec<String> = (0..8).map(|i| format!("{i}")).collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        h.processor.process(&input(&refs)).await.unwrap();
        match &h.sink.events()[0] {
            StatusEvent::Preview { table } => assert_eq!(table.len(), PREVIEW_ROWS),
            other => panic!("expected preview, got {other:?}"),
        }
    }
}
