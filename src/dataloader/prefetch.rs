use std::thread;

use crossbeam_channel::{bounded, Receiver};

use super::batch::DataBatch;
use super::dataloader::ImageDataLoader;
use super::error::DataLoaderError;

/// Decodes batches ahead of the consumer on a background thread.
///
/// The thread owns the loader and keeps at most `prefetch_count` batches
/// queued in a bounded channel. The stream is endless (the cursor wraps)
/// until the first error, after which the iterator ends; dropping the
/// iterator unblocks and stops the producer on its next send.
pub struct PrefetchIterator {
    receiver: Receiver<Result<DataBatch, DataLoaderError>>,
}

impl PrefetchIterator {
    fn new(mut loader: ImageDataLoader) -> Self {
        let (sender, receiver) = bounded(loader.config().prefetch_count.max(1));

        thread::spawn(move || loop {
            let batch = loader.next_batch();
            let stop = batch.is_err();
            if sender.send(batch).is_err() || stop {
                break;
            }
        });

        PrefetchIterator { receiver }
    }
}

impl Iterator for PrefetchIterator {
    type Item = Result<DataBatch, DataLoaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.receiver.recv().ok()
    }
}

pub trait PrefetchDataLoaderIterator {
    fn prefetch_iter(self) -> PrefetchIterator;
}

impl PrefetchDataLoaderIterator for ImageDataLoader {
    fn prefetch_iter(self) -> PrefetchIterator {
        PrefetchIterator::new(self)
    }
}
