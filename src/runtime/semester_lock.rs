use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// 学期级互斥锁
///
/// 引擎本身不做跨请求加锁；可能并发触发整学期分配或人工调整的调用方，
/// 在操作期间持有对应学期的锁。
#[derive(Default)]
pub struct SemesterLocks {
    /// 学期名 -> 锁
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SemesterLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, semester: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(semester.trim().to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// 等待并持有学期锁
    pub async fn lock(&self, semester: &str) -> OwnedMutexGuard<()> {
        self.entry(semester).lock_owned().await
    }

    /// 学期正被占用时返回 `None`
    pub fn try_lock(&self, semester: &str) -> Option<OwnedMutexGuard<()>> {
        self.entry(semester).try_lock_owned().ok()
    }

    /// 清理无人持有的锁
    pub fn prune(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
