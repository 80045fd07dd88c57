//! 고정 크기 워커 풀.
//!
//! `JoinSet` + `Semaphore`로 동시 실행 수를 제한하고, 작업마다 타임아웃을 건다.
//! 결과는 제출 순서가 아니라 완료 순서로 꺼낸다.
//! 풀이 drop되면 남은 작업은 중단(abort)된다.

use futures::FutureExt;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};
use tracing::debug;

/// 작업 하나의 종료 상태
#[derive(Debug)]
pub enum TaskOutcome<T> {
    /// 타임아웃 안에 완료
    Completed(T),
    /// 타임아웃 초과: 결과는 버려진다
    TimedOut(Duration),
    /// 작업 중 panic
    Panicked(String),
    /// 풀 종료로 실행되지 않음
    Cancelled,
}

/// 라벨이 붙은 작업 결과
#[derive(Debug)]
pub struct LabeledOutcome<T> {
    pub label: String,
    pub outcome: TaskOutcome<T>,
}

/// 고정 크기 워커 풀
pub struct WorkerPool<T> {
    tasks: JoinSet<LabeledOutcome<T>>,
    /// 작업 ID → 라벨 (중단/panic으로 결과가 없을 때 라벨 복구용)
    labels: HashMap<Id, String>,
    permits: Arc<Semaphore>,
    size: usize,
    task_timeout: Duration,
    submitted: usize,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// `size`개 워커, 작업당 `task_timeout`
    ///
    /// `size`가 0이면 1로 올린다.
    pub fn new(size: usize, task_timeout: Duration) -> Self {
        let size = size.max(1);
        Self {
            tasks: JoinSet::new(),
            labels: HashMap::new(),
            permits: Arc::new(Semaphore::new(size)),
            size,
            task_timeout,
            submitted: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// 지금까지 제출된 작업 수
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// 작업 제출
    ///
    /// 워커 슬롯을 얻은 시점부터 타임아웃을 잰다. 타임아웃이 지나면 작업 future는
    /// drop되고 진행 중이던 I/O 결과는 관찰되지 않는다.
    pub fn submit<F>(&mut self, label: impl Into<String>, work: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let label = label.into();
        let task_label = label.clone();
        let permits = self.permits.clone();
        let task_timeout = self.task_timeout;
        self.submitted += 1;

        let handle = self.tasks.spawn(async move {
            let label = task_label;
            let Ok(_permit) = permits.acquire_owned().await else {
                return LabeledOutcome {
                    label,
                    outcome: TaskOutcome::Cancelled,
                };
            };

            let guarded = AssertUnwindSafe(work).catch_unwind();
            let outcome = match tokio::time::timeout(task_timeout, guarded).await {
                Ok(Ok(value)) => TaskOutcome::Completed(value),
                Ok(Err(panic)) => TaskOutcome::Panicked(panic_message(panic.as_ref())),
                Err(_) => TaskOutcome::TimedOut(task_timeout),
            };
            LabeledOutcome { label, outcome }
        });
        self.labels.insert(handle.id(), label);
    }

    /// 다음으로 완료된 작업 결과 (완료 순서)
    ///
    /// 남은 작업이 없으면 `None`.
    pub async fn next_completed(&mut self) -> Option<LabeledOutcome<T>> {
        let labeled = match self.tasks.join_next_with_id().await? {
            Ok((id, labeled)) => {
                self.labels.remove(&id);
                labeled
            }
            Err(e) => {
                let label = self.labels.remove(&e.id()).unwrap_or_default();
                if e.is_cancelled() {
                    debug!("중단된 작업 {label}: {e}");
                    LabeledOutcome {
                        label,
                        outcome: TaskOutcome::Cancelled,
                    }
                } else {
                    // catch_unwind 밖에서의 panic
                    LabeledOutcome {
                        label,
                        outcome: TaskOutcome::Panicked(e.to_string()),
                    }
                }
            }
        };
        Some(labeled)
    }

    /// 풀 종료: 새 작업 슬롯을 닫고 남은 작업을 중단
    pub fn shutdown(&mut self) {
        if !self.permits.is_closed() {
            self.permits.close();
            self.tasks.abort_all();
            debug!("워커 풀 종료 (size={})", self.size);
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.permits.is_closed()
    }
}

impl<T> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        // JoinSet은 drop 시 남은 작업을 스스로 abort한다
        self.permits.close();
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "알 수 없는 panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn completes_all_submitted_tasks() {
        let mut pool = WorkerPool::new(3, Duration::from_secs(5));
        for i in 0..10 {
            pool.submit(format!("task-{i}"), async move { i * 2 });
        }
        assert_eq!(pool.submitted(), 10);

        let mut sum = 0;
        for _ in 0..pool.submitted() {
            match pool.next_completed().await.unwrap().outcome {
                TaskOutcome::Completed(v) => sum += v,
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
        assert_eq!(sum, (0..10).map(|i| i * 2).sum::<i32>());
        assert!(pool.next_completed().await.is_none());
    }

    #[tokio::test]
    async fn concurrency_is_bounded_by_size() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let mut pool = WorkerPool::new(2, Duration::from_secs(5));

        for i in 0..8 {
            let running = running.clone();
            let peak = peak.clone();
            pool.submit(format!("task-{i}"), async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            });
        }
        for _ in 0..8 {
            pool.next_completed().await.unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn results_arrive_in_completion_order() {
        let mut pool = WorkerPool::new(2, Duration::from_secs(5));
        pool.submit("slow", async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            "slow"
        });
        pool.submit("fast", async { "fast" });

        let first = pool.next_completed().await.unwrap();
        assert_eq!(first.label, "fast");
        let second = pool.next_completed().await.unwrap();
        assert_eq!(second.label, "slow");
    }

    #[tokio::test]
    async fn timeout_only_affects_slow_task() {
        let mut pool = WorkerPool::new(2, Duration::from_millis(100));
        pool.submit("stuck", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            1
        });
        pool.submit("quick", async { 2 });

        let mut completed = Vec::new();
        let mut timed_out = Vec::new();
        for _ in 0..2 {
            let labeled = pool.next_completed().await.unwrap();
            match labeled.outcome {
                TaskOutcome::Completed(v) => completed.push(v),
                TaskOutcome::TimedOut(_) => timed_out.push(labeled.label),
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
        assert_eq!(completed, vec![2]);
        assert_eq!(timed_out, vec!["stuck".to_string()]);
    }

    #[tokio::test]
    async fn panic_is_contained() {
        let mut pool = WorkerPool::new(1, Duration::from_secs(5));
        pool.submit("boom", async {
            let values: Vec<i32> = Vec::new();
            if values.is_empty() {
                panic!("task exploded");
            }
            values[0]
        });
        pool.submit("fine", async { 1 });

        let mut panicked = None;
        let mut completed = 0;
        for _ in 0..2 {
            let labeled = pool.next_completed().await.unwrap();
            match labeled.outcome {
                TaskOutcome::Panicked(msg) => panicked = Some((labeled.label, msg)),
                TaskOutcome::Completed(_) => completed += 1,
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
        let (label, msg) = panicked.unwrap();
        assert_eq!(label, "boom");
        assert!(msg.contains("task exploded"));
        assert_eq!(completed, 1);
    }

    #[tokio::test]
    async fn zero_size_is_raised_to_one() {
        let pool: WorkerPool<()> = WorkerPool::new(0, Duration::from_secs(1));
        assert_eq!(pool.size(), 1);
    }

    #[tokio::test]
    async fn aborted_task_keeps_its_label() {
        let mut pool = WorkerPool::new(1, Duration::from_secs(30));
        pool.submit("blocked", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
        });
        pool.shutdown();

        let labeled = pool.next_completed().await.unwrap();
        assert_eq!(labeled.label, "blocked");
        assert!(matches!(labeled.outcome, TaskOutcome::Cancelled));
        assert!(pool.next_completed().await.is_none());
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut pool: WorkerPool<()> = WorkerPool::new(2, Duration::from_secs(1));
        assert!(!pool.is_shutdown());
        pool.shutdown();
        pool.shutdown();
        assert!(pool.is_shutdown());
    }
}
