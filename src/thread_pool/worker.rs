use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use crate::dataloader::decode::{DecodeStage, DecodedImage};
use crate::dataloader::error::DataLoaderError;

pub enum WorkType {
    DecodeImage {
        row: usize,
        path: PathBuf,
        resize: Option<(u32, u32)>,
        decoder: Arc<dyn DecodeStage>,
    },
}

pub enum WorkResult {
    DecodeImage {
        row: usize,
        result: Result<DecodedImage, DataLoaderError>,
    },
}

#[derive(Clone)]
pub struct WorkFuture {
    state: Arc<(Mutex<Option<WorkResult>>, Condvar)>,
}

impl WorkFuture {
    pub fn new() -> Self {
        WorkFuture {
            state: Arc::new((Mutex::new(None), Condvar::new())),
        }
    }

    pub fn wait(self) -> WorkResult {
        let (lock, cvar) = &*self.state;
        let mut result = lock.lock().unwrap();
        while result.is_none() {
            result = cvar.wait(result).unwrap();
        }
        result.take().unwrap()
    }

    pub fn complete(&self, result: WorkResult) {
        let (lock, cvar) = &*self.state;
        *lock.lock().unwrap() = Some(result);
        cvar.notify_one();
    }
}

impl Default for WorkFuture {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WorkItem {
    pub work: WorkType,
    pub future: WorkFuture,
}

pub struct WorkQueue {
    pub queue: Mutex<VecDeque<WorkItem>>,
    pub condvar: Condvar,
    pub shutdown: AtomicBool,
}

impl WorkQueue {
    pub fn new() -> Self {
        WorkQueue {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Block until work arrives; None once the pool is shutting down and
    /// the queue has drained.
    fn wait_for_work(&self) -> Option<WorkItem> {
        let mut queue = self.queue.lock().unwrap();
        loop {
            if let Some(item) = queue.pop_front() {
                return Some(item);
            }
            if self.shutdown.load(Ordering::SeqCst) {
                return None;
            }
            queue = self.condvar.wait(queue).unwrap();
        }
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WorkFutureBatch {
    pub futures: Vec<WorkFuture>,
}

impl WorkFutureBatch {
    /// Results in submission order.
    pub fn wait(self) -> Vec<WorkResult> {
        self.futures.into_iter().map(WorkFuture::wait).collect()
    }
}

pub struct Worker {
    pub id: usize,
    pub thread: Option<thread::JoinHandle<()>>,
}

impl Worker {
    pub fn new(id: usize, work_queue: Arc<WorkQueue>) -> Worker {
        let thread = thread::spawn(move || {
            while let Some(work_item) = work_queue.wait_for_work() {
                Self::process_work(work_item);
            }
        });

        Worker {
            id,
            thread: Some(thread),
        }
    }

    fn process_work(work_item: WorkItem) {
        let result = match work_item.work {
            WorkType::DecodeImage {
                row,
                path,
                resize,
                decoder,
            } => WorkResult::DecodeImage {
                row,
                result: decoder.decode(&path, resize),
            },
        };

        work_item.future.complete(result);
    }
}
