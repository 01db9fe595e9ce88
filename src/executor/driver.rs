// Query Driver
//
// This module is the sole translation point from the pull-based operator
// protocol to a push-based consumer stream: it pulls tuples from the root
// operator and forwards them over a rendezvous channel until exhaustion.

use crossbeam::channel::{self, Receiver, Sender};
use crossbeam::select;
use log::debug;

use crate::executor::operators::Operator;
use crate::executor::result::{QueryResult, Tuple};

/// One query execution: a root operator paired with the output channel its
/// tuples are handed to. Owned by the caller for the duration of a single
/// run; the operator tree is single-use.
pub struct QueryDescriptor {
    pub root: Option<Box<dyn Operator>>,
    pub dest: Sender<Tuple>,
}

/// Create the unbuffered output channel for a query.
///
/// The rendezvous semantics give implicit one-tuple backpressure: the
/// driver blocks on each send until the consumer is ready.
pub fn output_channel() -> (Sender<Tuple>, Receiver<Tuple>) {
    channel::bounded(0)
}

/// Run a query to exhaustion.
///
/// Every tuple pulled from the root is sent to the destination channel;
/// the channel is closed exactly once, after the last tuple (or
/// immediately when there is no root). A disconnected consumer stops the
/// run instead of blocking it.
pub fn run(query: QueryDescriptor) -> QueryResult<()> {
    run_until(query, &channel::never())
}

/// Run a query to exhaustion or until the cancellation channel yields.
///
/// The cancellation signal is checked alongside each send, so an abandoned
/// consumer never leaves the driver permanently blocked.
pub fn run_until(query: QueryDescriptor, cancel: &Receiver<()>) -> QueryResult<()> {
    let QueryDescriptor { root, dest } = query;

    let Some(mut node) = root else {
        drop(dest);
        return Ok(());
    };

    let mut sent = 0usize;
    loop {
        let tuple = match node.next() {
            Ok(Some(tuple)) => tuple,
            Ok(None) => break,
            Err(err) => {
                drop(dest);
                return Err(err);
            }
        };

        select! {
            send(dest, tuple) -> result => {
                if result.is_err() {
                    debug!("consumer disconnected after {} tuples", sent);
                    break;
                }
                sent += 1;
            }
            recv(cancel) -> _ => {
                debug!("query cancelled after {} tuples", sent);
                break;
            }
        }
    }

    drop(dest);
    debug!("query finished, {} tuples sent", sent);
    Ok(())
}
