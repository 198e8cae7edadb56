//! Callback-to-blocking bridge.
//!
//! Adapter and device requests complete through callbacks that only fire
//! while the backend's own dispatch step is being driven. [`wait_driven`]
//! blocks on such a request while repeatedly driving that step.
//!
//! This only works where the calling thread owns dispatch. Under
//! [`HostModel::Cooperative`](super::HostModel::Cooperative) completions
//! arrive from the host's event loop, which a blocked thread never returns
//! to, so a wait there would not finish.

use std::future::Future;
use std::pin::pin;
use std::task::{Context, Poll, Waker};
use std::thread;

/// Blocks the calling thread until `future` completes.
///
/// Between polls `drive` is invoked once and the thread yields. There is no
/// timeout.
pub fn wait_driven<F>(future: F, mut drive: impl FnMut()) -> F::Output
where
    F: Future,
{
    let mut future = pin!(future);
    let mut cx = Context::from_waker(Waker::noop());
    let mut spins: u64 = 0;

    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            if spins > 0 {
                log::trace!("completion arrived after {spins} dispatch steps");
            }
            return output;
        }
        drive();
        spins += 1;
        thread::yield_now();
    }
}
