use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::worker::{WorkFuture, WorkFutureBatch, WorkItem, WorkQueue, WorkType, Worker};

pub struct ThreadPool {
    work_queue: Arc<WorkQueue>,
    workers: Vec<Worker>,
}

impl ThreadPool {
    pub fn new(size: usize) -> ThreadPool {
        let size = size.max(1);
        let work_queue = Arc::new(WorkQueue::new());

        let mut workers = Vec::with_capacity(size);
        for id in 0..size {
            workers.push(Worker::new(id, Arc::clone(&work_queue)));
        }

        ThreadPool {
            work_queue,
            workers,
        }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn submit_work(&self, work: WorkType) -> WorkFuture {
        let future = WorkFuture::new();

        {
            let mut queue = self.work_queue.queue.lock().unwrap();
            queue.push_back(WorkItem {
                work,
                future: future.clone(),
            });
        }
        self.work_queue.condvar.notify_one();

        future
    }

    pub fn submit_batch(&self, work_items: Vec<WorkType>) -> WorkFutureBatch {
        let mut futures = Vec::with_capacity(work_items.len());

        {
            let mut queue = self.work_queue.queue.lock().unwrap();
            for work in work_items {
                let future = WorkFuture::new();
                futures.push(future.clone());
                queue.push_back(WorkItem { work, future });
            }
        }

        for _ in 0..futures.len().min(self.workers.len()) {
            self.work_queue.condvar.notify_one();
        }

        WorkFutureBatch { futures }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.work_queue.shutdown.store(true, Ordering::SeqCst);
        self.work_queue.condvar.notify_all();
        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                let _ = thread.join();
            }
        }
    }
}
