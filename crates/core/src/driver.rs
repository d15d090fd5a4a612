use crate::{
    record::{CallKind, ContractCall, TxOutcome, TxRecord},
    submitter::TxSubmitter,
    Error, Result,
};
use std::time::{Duration, SystemTime};
use tracing::info;

/// Wall-clock bounds of a driver run: taken before the first call and after the last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunWindow {
    pub started_at: SystemTime,
    pub finished_at: SystemTime,
}

impl RunWindow {
    pub fn new(started_at: SystemTime, finished_at: SystemTime) -> Self {
        Self {
            started_at,
            finished_at,
        }
    }

    /// Zero if the system clock stepped backwards during the run.
    pub fn elapsed(&self) -> Duration {
        self.finished_at
            .duration_since(self.started_at)
            .unwrap_or_default()
    }
}

/// Everything the aggregation phase needs from a run.
#[derive(Clone, Debug)]
pub struct DriverRun {
    pub records: Vec<TxRecord>,
    pub window: RunWindow,
}

/// Sends donation calls, then match calls, strictly one after another.
pub struct Driver<S> {
    submitter: S,
    receipt_timeout: Option<Duration>,
}

impl<S: TxSubmitter> Driver<S> {
    pub fn new(submitter: S) -> Self {
        Self {
            submitter,
            receipt_timeout: None,
        }
    }

    /// Bounds each submission; `None` waits as long as the chain takes.
    pub fn with_receipt_timeout(mut self, receipt_timeout: Option<Duration>) -> Self {
        self.receipt_timeout = receipt_timeout;
        self
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Submits `n_donations` donation updates followed by `n_matches` blood
    /// comparisons. The first failing call aborts the run.
    pub async fn run(&self, n_donations: u64, n_matches: u64) -> Result<DriverRun> {
        let mut records = Vec::new();
        let started_at = SystemTime::now();

        for (kind, count) in [(CallKind::Donation, n_donations), (CallKind::Match, n_matches)] {
            for index in 0..count {
                let call = ContractCall::rotating(kind, index);
                let outcome = self.submit(&call).await?;
                let record = TxRecord::new(kind, &outcome);
                info!(
                    "{} {}: Gas={}, Latency={:.2}s, Status={}",
                    kind.progress_label(),
                    index + 1,
                    outcome.gas_used,
                    outcome.latency.as_secs_f64(),
                    u8::from(outcome.status)
                );
                records.push(record);
            }
        }

        let finished_at = SystemTime::now();
        Ok(DriverRun {
            records,
            window: RunWindow::new(started_at, finished_at),
        })
    }

    async fn submit(&self, call: &ContractCall) -> Result<TxOutcome> {
        let Some(timeout) = self.receipt_timeout else {
            return self.submitter.submit(call).await;
        };
        tokio::time::timeout(timeout, self.submitter.submit(call))
            .await
            .map_err(|_| Error::ReceiptTimeout {
                call: *call,
                timeout,
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::TxHash;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Confirms every call instantly and remembers what it was asked to send.
    #[derive(Default)]
    struct RecordingSubmitter {
        calls: Mutex<Vec<ContractCall>>,
        fail_at: Option<usize>,
        reverted: bool,
        delay: Option<Duration>,
    }

    impl RecordingSubmitter {
        fn calls(&self) -> Vec<ContractCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TxSubmitter for RecordingSubmitter {
        async fn submit(&self, call: &ContractCall) -> Result<TxOutcome> {
            let n = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(*call);
                calls.len()
            };
            if self.fail_at == Some(n) {
                return Err(Error::FunctionMissing(call.kind.function_name().to_owned()));
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(TxOutcome {
                tx_hash: TxHash::with_last_byte(n as u8),
                gas_used: 21_000 + call.param * 1_000,
                latency: Duration::from_millis(1_500),
                status: !self.reverted,
            })
        }
    }

    #[tokio::test]
    async fn donations_only_produce_donation_records_in_order() {
        for n in [0_u64, 1, 7, 8, 17] {
            let driver = Driver::new(RecordingSubmitter::default());
            let run = driver.run(n, 0).await.unwrap();

            assert_eq!(run.records.len(), n as usize);
            assert!(run.records.iter().all(|r| r.kind == CallKind::Donation));
            let gas = run.records.iter().map(|r| r.gas_used).collect::<Vec<_>>();
            let expected = (0..n).map(|i| 21_000 + (i % 8) * 1_000).collect::<Vec<_>>();
            assert_eq!(gas, expected);
        }
    }

    #[tokio::test]
    async fn param_rotates_within_each_phase() {
        let driver = Driver::new(RecordingSubmitter::default());
        let run = driver.run(10, 3).await.unwrap();
        let calls = driver.submitter().calls();

        assert_eq!(calls.len(), 13);
        let (donations, matches) = calls.split_at(10);
        for (k, call) in donations.iter().enumerate() {
            assert_eq!(*call, ContractCall::new(CallKind::Donation, k as u64 % 8));
        }
        for (k, call) in matches.iter().enumerate() {
            assert_eq!(*call, ContractCall::new(CallKind::Match, k as u64 % 8));
        }
        assert_eq!(run.records[9].kind, CallKind::Donation);
        assert_eq!(run.records[10].kind, CallKind::Match);
    }

    #[tokio::test]
    async fn empty_run_still_has_a_window() {
        let driver = Driver::new(RecordingSubmitter::default());
        let run = driver.run(0, 0).await.unwrap();
        assert!(run.records.is_empty());
        assert!(driver.submitter().calls().is_empty());
        assert!(run.window.finished_at >= run.window.started_at);
    }

    #[tokio::test]
    async fn reverted_calls_are_recorded_not_raised() {
        let driver = Driver::new(RecordingSubmitter {
            reverted: true,
            ..Default::default()
        });
        let run = driver.run(2, 2).await.unwrap();
        assert_eq!(run.records.len(), 4);
        assert!(run.records.iter().all(|r| !r.status));
        assert!(run.records.iter().all(|r| r.latency_secs == 1.5));
    }

    #[tokio::test]
    async fn first_failure_aborts_the_run() {
        let driver = Driver::new(RecordingSubmitter {
            fail_at: Some(3),
            ..Default::default()
        });
        let err = driver.run(5, 5).await.unwrap_err();
        assert!(matches!(err, Error::FunctionMissing(_)));
        assert_eq!(driver.submitter().calls().len(), 3);
    }

    #[tokio::test]
    async fn huge_counts_fail_on_the_first_call() {
        for (n_donations, n_matches) in [(u64::MAX, 1), (1 << 40, 0)] {
            let driver = Driver::new(RecordingSubmitter {
                fail_at: Some(1),
                ..Default::default()
            });
            let err = driver.run(n_donations, n_matches).await.unwrap_err();
            assert!(matches!(err, Error::FunctionMissing(_)));
            assert_eq!(driver.submitter().calls().len(), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_receipt_hits_the_timeout() {
        let driver = Driver::new(RecordingSubmitter {
            delay: Some(Duration::from_secs(60)),
            ..Default::default()
        })
        .with_receipt_timeout(Some(Duration::from_secs(5)));

        let err = driver.run(1, 0).await.unwrap_err();
        match err {
            Error::ReceiptTimeout { call, timeout } => {
                assert_eq!(call, ContractCall::new(CallKind::Donation, 0));
                assert_eq!(timeout, Duration::from_secs(5));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_leaves_fast_receipts_alone() {
        let driver = Driver::new(RecordingSubmitter {
            delay: Some(Duration::from_secs(1)),
            ..Default::default()
        })
        .with_receipt_timeout(Some(Duration::from_secs(5)));
        let run = driver.run(2, 1).await.unwrap();
        assert_eq!(run.records.len(), 3);
    }

    #[test]
    fn window_elapsed_saturates() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let window = RunWindow::new(start, start + Duration::from_secs(2));
        assert_eq!(window.elapsed(), Duration::from_secs(2));
        let backwards = RunWindow::new(start, start - Duration::from_secs(1));
        assert_eq!(backwards.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn drives_calls_through_anvil() {
        use crate::{
            deploy::deploy_contract,
            sender::test::{anvil_sender, spawn_anvil, stub_interface},
            submitter::RpcSubmitter,
        };

        let anvil = spawn_anvil();
        let sender = anvil_sender(&anvil).await;
        let interface = stub_interface();
        let deployment = deploy_contract(&sender, &interface, "anvil")
            .await
            .unwrap();

        let driver = Driver::new(RpcSubmitter::new(sender, deployment.address, interface))
            .with_receipt_timeout(Some(Duration::from_secs(30)));
        let run = driver.run(3, 2).await.unwrap();

        let kinds = run.records.iter().map(|r| r.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [
                CallKind::Donation,
                CallKind::Donation,
                CallKind::Donation,
                CallKind::Match,
                CallKind::Match,
            ]
        );
        assert!(run.records.iter().all(|r| r.status && r.gas_used > 21_000));
        assert!(run.records.iter().all(|r| r.latency_secs > 0.0));
        assert!(run.window.elapsed() > Duration::ZERO);
    }
}
