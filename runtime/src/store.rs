//! The store: state owner and effect executor.

use crate::StoreError;
use crate::handle::{Counter, EffectHandle, InFlight, counter, drained};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use todo_master_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{RwLock, broadcast, watch};

/// Default capacity of the effect-action broadcast channel
const ACTION_CHANNEL_CAPACITY: usize = 16;

/// Runtime for one reducer
///
/// Cloning is cheap; clones share state, environment and channels.
///
/// # Type Parameters
///
/// - `S`: state
/// - `A`: action
/// - `E`: environment
/// - `R`: reducer over `S`, `A` and `E`
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    env: E,
    closed: Arc<AtomicBool>,
    in_flight: Counter,
    /// Actions produced by effects, for observers waiting on a result
    effect_actions: broadcast::Sender<A>,
    /// Latest state, replaced after every reduced action
    published: Arc<watch::Sender<Arc<S>>>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Clone + Send + 'static,
    S: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a store; nothing is sent until the caller sends it
    #[must_use]
    pub fn new(state: S, reducer: R, env: E) -> Self {
        Self::with_action_capacity(state, reducer, env, ACTION_CHANNEL_CAPACITY)
    }

    /// Create a store whose effect-action channel buffers `capacity` actions
    #[must_use]
    pub fn with_action_capacity(state: S, reducer: R, env: E, capacity: usize) -> Self {
        let (effect_actions, _) = broadcast::channel(capacity);
        let published = watch::Sender::new(Arc::new(state.clone()));

        Self {
            state: Arc::new(RwLock::new(state)),
            reducer,
            env,
            closed: Arc::new(AtomicBool::new(false)),
            in_flight: counter(),
            effect_actions,
            published: Arc::new(published),
        }
    }

    /// Reduce `action` and start its effects
    ///
    /// The new state is published before this returns. Effects keep
    /// running afterwards; the returned handle waits for them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once [`shutdown`](Self::shutdown)
    /// has been called.
    #[tracing::instrument(skip_all, name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        if self.closed.load(Ordering::Acquire) {
            tracing::warn!("Action rejected after shutdown");
            metrics::counter!("store.shutdown.rejected_actions").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }
        metrics::counter!("store.commands.total").increment(1);

        let effects = {
            let mut state = self.state.write().await;
            let effects = self.reducer.reduce(&mut *state, action, &self.env);
            self.published.send_replace(Arc::new(state.clone()));
            effects
        };
        tracing::trace!(effects = effects.len(), "Action reduced");

        let (handle, tracker) = EffectHandle::track();
        for effect in effects {
            self.run(effect, &tracker);
        }
        Ok(handle)
    }

    /// Send `action`, then wait for an effect to produce an action matching
    /// `predicate`
    ///
    /// The subscription starts before the send, so fast effects are not missed.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ShutdownInProgress`]: the store is shut down
    /// - [`StoreError::Timeout`]: nothing matched within `timeout`
    /// - [`StoreError::ChannelClosed`]: the action channel closed
    pub async fn send_and_wait_for<F>(
        &self,
        action: A,
        predicate: F,
        timeout: Duration,
    ) -> Result<A, StoreError>
    where
        F: Fn(&A) -> bool,
    {
        let mut actions = self.effect_actions.subscribe();
        self.send(action).await?;

        let matching = async {
            loop {
                match actions.recv().await {
                    Ok(produced) if predicate(&produced) => return Ok(produced),
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Effect action observer fell behind");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        };

        tokio::time::timeout(timeout, matching)
            .await
            .map_err(|_| StoreError::Timeout)?
    }

    /// Actions produced by effects, each sent after it has been reduced
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.effect_actions.subscribe()
    }

    /// Snapshot stream
    ///
    /// A slow reader sees only the latest snapshot, not every one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<S>> {
        self.published.subscribe()
    }

    /// The most recently published state
    #[must_use]
    pub fn snapshot(&self) -> Arc<S> {
        Arc::clone(&self.published.borrow())
    }

    /// Read the live state under the lock
    pub async fn state<F, T>(&self, read: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        read(&*self.state.read().await)
    }

    /// Effects running across all actions
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Refuse further actions and wait for running effects to finish
    ///
    /// Effects that outlive `timeout` keep running, but the actions they
    /// produce are refused.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] with the number of effects
    /// still running at the deadline.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("Store shutting down");
        metrics::counter!("store.shutdown.initiated").increment(1);
        self.closed.store(true, Ordering::Release);

        let mut running = self.in_flight.subscribe();
        let finished = tokio::time::timeout(timeout, drained(&mut running)).await.is_ok();

        if finished {
            metrics::counter!("store.shutdown.completed").increment(1);
            Ok(())
        } else {
            let pending = self.pending_effects();
            tracing::warn!(pending, "Shutdown deadline passed");
            metrics::counter!("store.shutdown.timeout").increment(1);
            Err(StoreError::ShutdownTimeout(pending))
        }
    }

    /// Reduce an effect's action, then broadcast it
    ///
    /// Subscribers only see the action once the published snapshot includes it.
    async fn feed_back(&self, action: A) {
        let observed = action.clone();

        match self.send(action).await {
            Ok(_) => {
                let _ = self.effect_actions.send(observed);
            },
            Err(error) => tracing::debug!(%error, "Effect action dropped"),
        }
    }

    /// Spawn `task` counted against `tracker` and the store
    fn spawn_counted<F>(&self, tracker: &Counter, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let guard = InFlight::enter(tracker, &self.in_flight);
        tokio::spawn(async move {
            let _guard = guard;
            task.await;
        });
    }

    fn run(&self, effect: Effect<A>, tracker: &Counter) {
        match effect {
            Effect::None => {
                metrics::counter!("store.effects.executed", "type" => "none").increment(1);
            },
            Effect::Future(fut) => {
                metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                let store = self.clone();
                self.spawn_counted(tracker, async move {
                    match fut.await {
                        Some(action) => store.feed_back(action).await,
                        None => tracing::trace!("Future effect finished without an action"),
                    }
                });
            },
            Effect::Delay { duration, action } => {
                metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                let store = self.clone();
                self.spawn_counted(tracker, async move {
                    tokio::time::sleep(duration).await;
                    store.feed_back(*action).await;
                });
            },
            Effect::Parallel(effects) => {
                metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                for effect in effects {
                    self.run(effect, tracker);
                }
            },
            Effect::Sequential(effects) => {
                metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);
                let store = self.clone();
                self.spawn_counted(tracker, async move {
                    for effect in effects {
                        let (mut step, step_tracker) = EffectHandle::track();
                        store.run(effect, &step_tracker);
                        drop(step_tracker);
                        step.wait().await;
                    }
                });
            },
        }
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            env: self.env.clone(),
            closed: Arc::clone(&self.closed),
            in_flight: Arc::clone(&self.in_flight),
            effect_actions: self.effect_actions.clone(),
            published: Arc::clone(&self.published),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_master_core::{SmallVec, smallvec};

    #[derive(Debug, Clone, Default)]
    struct Tally {
        total: i64,
        log: Vec<i64>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum TallyAction {
        Add(i64),
        AddLater(i64),
        AddAsync(i64),
        AddEach(Vec<i64>),
        AddInOrder(Vec<i64>),
        AddSlowly(i64),
        Nothing,
    }

    #[derive(Clone)]
    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = Tally;
        type Action = TallyAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Tally,
            action: TallyAction,
            _env: &(),
        ) -> SmallVec<[Effect<TallyAction>; 4]> {
            let add = |n: i64| -> Effect<TallyAction> {
                Effect::Future(Box::pin(async move { Some(TallyAction::Add(n)) }))
            };

            match action {
                TallyAction::Add(n) => {
                    state.total += n;
                    state.log.push(n);
                    SmallVec::new()
                },
                TallyAction::AddLater(n) => {
                    smallvec![Effect::delay(Duration::from_millis(10), TallyAction::Add(n))]
                },
                TallyAction::AddAsync(n) => smallvec![add(n)],
                TallyAction::AddEach(ns) => {
                    smallvec![Effect::merge(ns.into_iter().map(add).collect())]
                },
                TallyAction::AddInOrder(ns) => {
                    smallvec![Effect::chain(ns.into_iter().map(add).collect())]
                },
                TallyAction::AddSlowly(n) => smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    Some(TallyAction::Add(n))
                }))],
                TallyAction::Nothing => smallvec![Effect::None],
            }
        }
    }

    fn tally_store() -> Store<Tally, TallyAction, (), TallyReducer> {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Store::new(Tally::default(), TallyReducer, ())
    }

    #[tokio::test]
    async fn test_state_visible_when_send_returns() {
        let store = tally_store();

        tokio_test::assert_ok!(store.send(TallyAction::Add(4)).await);
        assert_eq!(store.state(|t| t.total).await, 4);
        assert_eq!(store.snapshot().total, 4);
    }

    #[tokio::test]
    async fn test_future_effect_result_is_reduced() -> Result<(), StoreError> {
        let store = tally_store();

        let mut handle = store.send(TallyAction::AddAsync(7)).await?;
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        assert_eq!(store.snapshot().total, 7);
        assert_eq!(store.pending_effects(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_delay_effect_waits() -> Result<(), StoreError> {
        let store = tally_store();

        let mut handle = store.send(TallyAction::AddLater(2)).await?;
        assert_eq!(handle.pending(), 1);
        assert_eq!(store.snapshot().total, 0);

        handle.wait_with_timeout(Duration::from_secs(1)).await?;
        assert_eq!(store.snapshot().total, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_parallel_effects_all_complete() -> Result<(), StoreError> {
        let store = tally_store();

        let mut handle = store.send(TallyAction::AddEach(vec![1, 2, 3])).await?;
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        assert_eq!(store.snapshot().total, 6);
        Ok(())
    }

    #[tokio::test]
    async fn test_sequential_effects_keep_order() -> Result<(), StoreError> {
        let store = tally_store();

        let mut handle = store.send(TallyAction::AddInOrder(vec![5, -1, 3])).await?;
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        assert_eq!(store.snapshot().log, vec![5, -1, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn test_subscribers_see_new_snapshots() -> Result<(), StoreError> {
        let store = tally_store();
        let mut frames = store.subscribe();
        let first = Arc::clone(&frames.borrow_and_update());

        store.send(TallyAction::Add(1)).await?;

        assert!(frames.has_changed().unwrap_or(false));
        assert_eq!(frames.borrow_and_update().total, 1);
        assert_eq!(first.total, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_send_and_wait_for_returns_effect_action() -> Result<(), StoreError> {
        let store = tally_store();

        let produced = store
            .send_and_wait_for(
                TallyAction::AddAsync(9),
                |a| matches!(a, TallyAction::Add(_)),
                Duration::from_secs(1),
            )
            .await?;

        assert_eq!(produced, TallyAction::Add(9));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_send_and_wait_for_sees_reduced_state() -> Result<(), StoreError> {
        for _ in 0..200 {
            let store = tally_store();

            store
                .send_and_wait_for(
                    TallyAction::AddAsync(4),
                    |a| matches!(a, TallyAction::Add(_)),
                    Duration::from_secs(1),
                )
                .await?;

            assert_eq!(store.snapshot().total, 4);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_send_and_wait_for_times_out() {
        let store = tally_store();

        let result = store
            .send_and_wait_for(TallyAction::Nothing, |_| true, Duration::from_millis(20))
            .await;

        assert_eq!(result, Err(StoreError::Timeout));
    }

    #[tokio::test]
    async fn test_shutdown_refuses_actions() -> Result<(), StoreError> {
        let store = tally_store();
        store.shutdown(Duration::from_secs(1)).await?;

        let result = store.send(TallyAction::Add(1)).await;
        assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
        assert_eq!(store.snapshot().total, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_late_effect_result_is_dropped() -> Result<(), StoreError> {
        let store = tally_store();

        store.send(TallyAction::AddSlowly(1)).await?;
        let result = store.shutdown(Duration::from_millis(20)).await;
        assert_eq!(result, Err(StoreError::ShutdownTimeout(1)));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(store.snapshot().total, 0);
        assert_eq!(store.pending_effects(), 0);
        Ok(())
    }
}
