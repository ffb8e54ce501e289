use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

/// Single-step executor for the frame loop: the wrapped future is advanced
/// one poll per frame and never migrates threads.
pub struct FrameTask<T> {
    future: Pin<Box<dyn Future<Output = T>>>,
}

impl<T> FrameTask<T> {
    pub fn new(future: impl Future<Output = T> + 'static) -> Self {
        Self { future: Box::pin(future) }
    }

    /// Polls the future once. Returns `Some` when it resolved; the task must
    /// not be polled again after that.
    pub fn poll(&mut self) -> Option<T> {
        let mut cx = Context::from_waker(Waker::noop());
        match self.future.as_mut().poll(&mut cx) {
            Poll::Ready(value) => Some(value),
            Poll::Pending => None,
        }
    }
}

/// Suspends once, handing control back to the frame scheduler until the next
/// poll.
pub fn yield_once() -> YieldOnce {
    YieldOnce { yielded: false }
}

pub struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            Poll::Pending
        }
    }
}
