//! Integration tests for job composition: sequencing, fan-out/join, and
//! failure aggregation across whole job trees.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;

use volley::{
    BatchError, Converter, IdentityConverter, Job, JobGroup, JsonLinesWriter, LineReader, MockJob,
    ParallelJobGroup, RunLog, SimpleJob, Task,
};

struct Double;

#[async_trait]
impl Task for Double {
    type Param = i64;
    type Output = i64;

    async fn execute(&self, param: &i64) -> anyhow::Result<i64> {
        Ok(param * 2)
    }
}

#[test_log::test(tokio::test)]
async fn simple_job_scenario_doubles_parameters() {
    let job = SimpleJob::new("x", vec![2, 3, 4], Double, IdentityConverter::new());
    assert_eq!(job.collect().await.unwrap(), vec![4, 6, 8]);
}

#[test_log::test(tokio::test)]
async fn sequential_group_stops_at_first_failure() {
    let log: RunLog = Arc::new(Mutex::new(Vec::new()));
    let a = Arc::new(MockJob::succeeding("a").with_log(log.clone()));
    let b = Arc::new(MockJob::failing("b", "boom").with_log(log.clone()));
    let c = Arc::new(MockJob::succeeding("c").with_log(log.clone()));
    let c_started = c.started_handle();

    let group = JobGroup::new(
        "g",
        vec![a as Arc<dyn Job>, b as Arc<dyn Job>, c as Arc<dyn Job>],
    );
    let err = group.run().await.unwrap_err();

    assert_eq!(err.job_name(), Some("b"));
    assert_eq!(*log.lock(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(c_started.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[test_log::test(tokio::test)]
async fn parallel_group_waits_for_slowest_child() {
    let (slow, release) = MockJob::succeeding("slow").with_trigger();
    let slow = Arc::new(slow);
    let fast = Arc::new(MockJob::succeeding("fast"));
    let fast_completed = fast.completed_handle();
    let slow_completed = slow.completed_handle();

    let group = Arc::new(ParallelJobGroup::new(
        "p",
        vec![slow as Arc<dyn Job>, fast as Arc<dyn Job>],
    ));
    let runner = group.clone();
    let handle = tokio::spawn(async move { runner.run().await });

    // The fast child finishes, but the group must not return before the
    // slow child does.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(fast_completed.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert!(!handle.is_finished());

    release.send(()).unwrap();
    handle.await.unwrap().unwrap();
    assert_eq!(slow_completed.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test_log::test(tokio::test)]
async fn parallel_group_reports_failure_only_after_all_children_finish() {
    let failing = Arc::new(MockJob::failing("failing", "boom"));
    let (slow, release) = MockJob::succeeding("slow").with_trigger();
    let slow = Arc::new(slow);
    let slow_completed = slow.completed_handle();

    let group = Arc::new(ParallelJobGroup::new(
        "p",
        vec![failing as Arc<dyn Job>, slow as Arc<dyn Job>],
    ));
    let runner = group.clone();
    let handle = tokio::spawn(async move { runner.run().await });

    // One child has already failed, but the group keeps waiting.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!handle.is_finished());

    release.send(()).unwrap();
    let err = handle.await.unwrap().unwrap_err();

    assert_eq!(slow_completed.load(std::sync::atomic::Ordering::SeqCst), 1);
    match err {
        BatchError::Aggregate { total, failures, .. } => {
            assert_eq!(total, 2);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].job_name(), Some("failing"));
        }
        other => panic!("expected Aggregate error, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn parallel_group_aggregates_every_racing_failure() {
    let children: Vec<Arc<dyn Job>> = (0..4)
        .map(|i| Arc::new(MockJob::failing(format!("child-{i}"), "boom")) as Arc<dyn Job>)
        .collect();

    let err = ParallelJobGroup::new("p", children).run().await.unwrap_err();
    assert_eq!(err.failures().len(), 4);
}

#[test_log::test(tokio::test)]
async fn nested_tree_propagates_a_deep_failure_to_the_root() {
    struct FailOn(i64);

    #[async_trait]
    impl Task for FailOn {
        type Param = i64;
        type Output = i64;

        async fn execute(&self, param: &i64) -> anyhow::Result<i64> {
            if *param == self.0 {
                anyhow::bail!("refusing to process {param}");
            }
            Ok(*param)
        }
    }

    let healthy: Arc<dyn Job> = Arc::new(SimpleJob::new(
        "healthy",
        vec![1, 2, 3],
        Double,
        IdentityConverter::new(),
    ));
    let broken: Arc<dyn Job> = Arc::new(SimpleJob::new(
        "broken",
        vec![1, 2, 3],
        FailOn(2),
        IdentityConverter::new(),
    ));
    let inner: Arc<dyn Job> = Arc::new(ParallelJobGroup::new("inner", vec![healthy, broken]));
    let after = Arc::new(MockJob::succeeding("after"));
    let after_started = after.started_handle();

    let root = JobGroup::new("root", vec![inner, after as Arc<dyn Job>]);
    let err = root.run().await.unwrap_err();

    // The parallel group's aggregate reaches the root unchanged, and the
    // sequential group never starts the job after it.
    match err {
        BatchError::Aggregate { group, failures, .. } => {
            assert_eq!(group, "inner");
            assert_eq!(failures.len(), 1);
            match &failures[0] {
                BatchError::Step { job, index, .. } => {
                    assert_eq!(job, "broken");
                    assert_eq!(*index, 1);
                }
                other => panic!("expected Step failure, got {other:?}"),
            }
        }
        other => panic!("expected Aggregate error, got {other:?}"),
    }
    assert_eq!(after_started.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[test_log::test(tokio::test)]
async fn file_to_file_pipeline_preserves_order() {
    #[derive(Serialize)]
    struct Report {
        url: String,
        length: usize,
    }

    struct Measure;

    #[async_trait]
    impl Task for Measure {
        type Param = String;
        type Output = (String, usize);

        async fn execute(&self, param: &String) -> anyhow::Result<(String, usize)> {
            Ok((param.clone(), param.len()))
        }
    }

    struct ToReport;

    impl Converter for ToReport {
        type Input = (String, usize);
        type Output = Report;

        fn convert(&self, (url, length): (String, usize)) -> anyhow::Result<Report> {
            Ok(Report { url, length })
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("items.txt");
    let output = dir.path().join("reports.jsonl");
    tokio::fs::write(&input, "https://example.com/a\nhttps://example.com/bb\n")
        .await
        .unwrap();

    let urls = LineReader::new(&input).load().await.unwrap();
    let job = SimpleJob::new("measure", urls, Measure, ToReport);
    let reports = job.collect().await.unwrap();
    JsonLinesWriter::new(&output).write(&reports).await.unwrap();

    let written = tokio::fs::read_to_string(&output).await.unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("https://example.com/a"));
    assert!(lines[1].contains("https://example.com/bb"));
}
